//! Sample data for the demo viewer

use rand::seq::SliceRandom;
use rand::Rng;

use crate::table::{Column, Row};

const PHONE_PREFIXES: [&str; 6] = ["13", "15", "16", "17", "18", "19"];

/// Columns of the sample class roster
pub fn mock_columns() -> Vec<Column> {
    vec![
        Column::new("ID", "id"),
        Column::new("Student", "student"),
        Column::new("Teacher", "teacher"),
        Column::new("Classroom", "classRoom"),
        Column::new("Content", "content"),
        Column::new("Phone", "phone"),
        Column::new("Description", "description"),
    ]
}

/// An eleven digit phone number with a mobile prefix
pub fn random_phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = PHONE_PREFIXES.choose(rng).copied().unwrap_or("13");
    let middle: u32 = rng.gen_range(0..1_000_000_000);
    format!("{}{:09}", prefix, middle)
}

/// Generate `count` roster rows numbered from 1
pub fn mock_rows<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Row> {
    (1..=count)
        .map(|n| {
            let label = format!("{:02}", n);
            Row::new()
                .with("id", n as i64)
                .with("student", format!("Student {}", label))
                .with("teacher", format!("Teacher {}", label))
                .with("classRoom", format!("Classroom {}", label))
                .with("content", format!("Content {}", label))
                .with("phone", random_phone_number(rng))
                .with("description", format!("online class for {}", label))
        })
        .collect()
}
