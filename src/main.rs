use std::fs::File;
use std::io::{self, Write};
use std::panic;
use std::sync::Mutex;

use tracing::{error, info, warn};
use tracing_subscriber::fmt::writer::MakeWriter;

use crossterm::{
    cursor::MoveToColumn,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use datagrid::app::{App, MessageKind};
use datagrid::config::{help_text, parse_args, AppConfig, CliArgs};
use datagrid::fileio::FileIO;
use datagrid::mock::{mock_columns, mock_rows};
use datagrid::style::Style;
use datagrid::table::DataTable;

/// Handle panics gracefully
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);

        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occured"
            );
        } else {
            error!("panic occured");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

/// A `MakeWriter` for `tracing` that logs to the **main screen** by leaving the alternate screen temporarily.
pub struct MainScreenWriter;

impl<'a> MakeWriter<'a> for MainScreenWriter {
    type Writer = MainScreenWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        MainScreenWriterHandle
    }
}

/// A handle that writes to stdout outside the alternate screen
pub struct MainScreenWriterHandle;

impl Write for MainScreenWriterHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        execute!(io::stdout(), LeaveAlternateScreen)?;
        println!();
        execute!(io::stdout(), MoveToColumn(0))?;
        let result = io::stdout().write(buf);
        execute!(io::stdout(), MoveToColumn(0))?;
        io::stdout().flush()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

fn init_logging(args: &CliArgs) -> io::Result<()> {
    match &args.log_path {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => tracing_subscriber::fmt().with_writer(MainScreenWriter).init(),
    }
    Ok(())
}

/// Build the table from the data file, or from generated rows when none is given
fn load_table(args: &CliArgs, config: &AppConfig) -> datagrid::Result<(DataTable, Vec<String>)> {
    let options = config.table_options();
    match &args.file_path {
        Some(path) => {
            let file_io = FileIO::new(path.clone(), args.delimiter);
            let loaded = file_io.load()?;
            let mut messages = loaded.warnings;
            if args.delimiter.is_none() {
                messages.push(format!("Delimiter: {}", file_io.delimiter_name()));
            }
            Ok((DataTable::new(loaded.columns, loaded.rows, options)?, messages))
        }
        None => {
            let rows = mock_rows(config.mock_rows, &mut rand::thread_rng());
            info!(rows = rows.len(), "generated sample rows");
            Ok((DataTable::new(mock_columns(), rows, options)?, Vec::new()))
        }
    }
}

fn main() -> io::Result<()> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", help_text());
            std::process::exit(2);
        }
    };
    if args.help {
        eprintln!("{}", help_text());
        return Ok(());
    }

    init_logging(&args)?;
    info!("datagrid started");
    install_panic_hook();

    let mut config = match &args.config_path {
        Some(path) => AppConfig::from_file(path).unwrap_or_else(|e| {
            error!(error = %e, path = %path.display(), "failed to load config");
            eprintln!("{}", e);
            std::process::exit(1);
        }),
        None => AppConfig::default(),
    };
    config.apply_args(&args);

    let theme = config.load_theme().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default theme");
        Default::default()
    });

    let (table, messages) = match load_table(&args, &config) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(error = %e, "failed to load table");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(table, Style::with_theme(theme), &config);
    if !messages.is_empty() {
        app.message = Some((MessageKind::Info, messages.join("; ")));
    }

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;

    if let Err(e) = &result {
        error!(error = %e, "terminal error");
    }
    result
}
