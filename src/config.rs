use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::style::Theme;
use crate::table::TableOptions;
use crate::table::state::DEFAULT_PAGE_SIZE;

/// Viewer settings, read from a TOML file. Every key is optional.
///
/// ```toml
/// page_size = 20
/// left_fixed_columns = 2
/// right_fixed_columns = 1
/// max_col_width = 24
/// theme = "dark"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub page_size: usize,
    pub left_fixed_columns: usize,
    pub right_fixed_columns: usize,
    /// Upper bound on the shared column width, in cells
    pub max_col_width: u16,
    /// Cells moved per horizontal scroll step
    pub scroll_step: u16,
    /// Rows generated when no data file is given
    pub mock_rows: usize,
    /// Built-in theme name
    pub theme: Option<String>,
    /// Theme file, wins over `theme`
    pub theme_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            left_fixed_columns: 2,
            right_fixed_columns: 1,
            max_col_width: 30,
            scroll_step: 4,
            mock_rows: 100,
            theme: None,
            theme_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            left_fixed_columns: self.left_fixed_columns,
            right_fixed_columns: self.right_fixed_columns,
            page_size: self.page_size,
        }
    }

    /// Resolve the theme: file first, then built-in name, then default
    pub fn load_theme(&self) -> Result<Theme> {
        if let Some(path) = &self.theme_file {
            return Theme::from_file(path);
        }
        match &self.theme {
            Some(name) => Theme::by_name(name).ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "unknown theme '{}' (available: {})",
                    name,
                    Theme::builtin_names().join(", ")
                ))
            }),
            None => Ok(Theme::default()),
        }
    }

    /// Command line flags override file values
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(n) = args.page_size {
            self.page_size = n;
        }
        if let Some(n) = args.left_fixed_columns {
            self.left_fixed_columns = n;
        }
        if let Some(n) = args.right_fixed_columns {
            self.right_fixed_columns = n;
        }
        if let Some(n) = args.mock_rows {
            self.mock_rows = n;
        }
        if let Some(name) = &args.theme {
            self.theme = Some(name.clone());
            self.theme_file = None;
        }
    }
}

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub file_path: Option<PathBuf>,
    pub delimiter: Option<u8>,
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub page_size: Option<usize>,
    pub left_fixed_columns: Option<usize>,
    pub right_fixed_columns: Option<usize>,
    pub mock_rows: Option<usize>,
    pub theme: Option<String>,
    pub help: bool,
}

/// Parse command line arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut it = args.iter();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "-d" | "--delimiter" => {
                parsed.delimiter = Some(parse_delimiter(value_for(arg, it.next())?)?);
            }
            "-c" | "--config" => {
                parsed.config_path = Some(PathBuf::from(value_for(arg, it.next())?));
            }
            "--log" => {
                parsed.log_path = Some(PathBuf::from(value_for(arg, it.next())?));
            }
            "-t" | "--theme" => {
                parsed.theme = Some(value_for(arg, it.next())?.to_string());
            }
            "-p" | "--page-size" => {
                parsed.page_size = Some(parse_count(arg, value_for(arg, it.next())?)?);
            }
            "-L" | "--left" => {
                parsed.left_fixed_columns = Some(parse_count(arg, value_for(arg, it.next())?)?);
            }
            "-R" | "--right" => {
                parsed.right_fixed_columns = Some(parse_count(arg, value_for(arg, it.next())?)?);
            }
            "-r" | "--rows" => {
                parsed.mock_rows = Some(parse_count(arg, value_for(arg, it.next())?)?);
            }
            other if other.starts_with('-') => {
                return Err(Error::InvalidArgument(format!("unknown option: {}", other)));
            }
            path => parsed.file_path = Some(PathBuf::from(path)),
        }
    }

    Ok(parsed)
}

fn value_for<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str> {
    value
        .map(|v| v.as_str())
        .ok_or_else(|| Error::InvalidArgument(format!("{} requires an argument", flag)))
}

fn parse_count(flag: &str, value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{} expects a non-negative integer, got '{}'", flag, value)))
}

/// Parse a delimiter string into a byte
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s.to_lowercase().as_str() {
        "comma" | "," => Ok(b','),
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "semicolon" | ";" => Ok(b';'),
        "pipe" | "|" => Ok(b'|'),
        _ if s.len() == 1 => Ok(s.as_bytes()[0]),
        _ => Err(Error::InvalidArgument(format!(
            "invalid delimiter '{}': use comma, tab, semicolon, pipe, or a single character",
            s
        ))),
    }
}

pub fn help_text() -> String {
    [
        "datagrid - a terminal data table with sorting, paging and pinned columns",
        "",
        "USAGE:",
        "    datagrid [OPTIONS] [FILE]",
        "",
        "OPTIONS:",
        "    -r, --rows <N>           Sample rows to generate when no FILE is given (default 100)",
        "    -p, --page-size <N>      Rows per page (default 10)",
        "    -L, --left <N>           Columns pinned to the left edge (default 2)",
        "    -R, --right <N>          Columns pinned to the right edge (default 1)",
        "    -d, --delimiter <DELIM>  Field delimiter (comma, tab, semicolon, pipe, or char)",
        "    -c, --config <PATH>      TOML config file",
        "    -t, --theme <NAME>       Built-in theme (light, dark)",
        "        --log <PATH>         Write logs to a file instead of the main screen",
        "    -h, --help               Print this help message",
        "",
        "KEYS:",
        "    h/l, ←/→   scroll        Tab/S-Tab  focus column   a/d  sort asc/desc",
        "    n/p        next/prev     g/G        first/last     e    edit page size",
        "    [ ]        left pinned   { }        right pinned   q    quit",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());

        // The viewer pins two columns left and one right unless told otherwise
        let options = config.table_options();
        assert_eq!(options.left_fixed_columns, 2);
        assert_eq!(options.right_fixed_columns, 1);
        assert_eq!(options.page_size, TableOptions::default().page_size);

        let unpinned = AppConfig::from_toml("left_fixed_columns = 0\nright_fixed_columns = 0").unwrap();
        assert_eq!(unpinned.table_options(), TableOptions::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml("page_size = 25\nleft_fixed_columns = 2\ntheme = \"dark\"").unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.left_fixed_columns, 2);
        assert_eq!(config.right_fixed_columns, 1);
        assert_eq!(config.load_theme().unwrap().name, "dark");
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(AppConfig::from_toml("page_size = \"x\""), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_theme() {
        let config = AppConfig {
            theme: Some("neon".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.load_theme(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&args(&["-L", "2", "--right", "1", "-p", "20", "data.csv"])).unwrap();
        assert_eq!(parsed.left_fixed_columns, Some(2));
        assert_eq!(parsed.right_fixed_columns, Some(1));
        assert_eq!(parsed.page_size, Some(20));
        assert_eq!(parsed.file_path, Some(PathBuf::from("data.csv")));
        assert!(!parsed.help);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--left"])).is_err());
        assert!(parse_args(&args(&["--left", "-1"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["-d", "ab"])).is_err());
    }

    #[test]
    fn test_args_override_config() {
        let mut config = AppConfig::from_toml("page_size = 25\nright_fixed_columns = 3").unwrap();
        let parsed = parse_args(&args(&["-p", "5", "-t", "light"])).unwrap();
        config.apply_args(&parsed);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.right_fixed_columns, 3);
        assert_eq!(config.theme.as_deref(), Some("light"));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("PIPE").unwrap(), b'|');
        assert_eq!(parse_delimiter(":").unwrap(), b':');
    }
}
