use std::{collections::HashMap, path::Path};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use relief::{InquirerRow, InquiryLog};
use serde::Serialize;
use tracing::instrument;

/// Command arguments for `relief inquiries`.
#[derive(Debug, Default, Parser)]
#[command(about = "List the stored inquirer call log")]
pub struct Inquiries {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// One stored call, joined with the inquirer who made it.
#[derive(Debug, Clone, Serialize)]
struct Entry {
    id: i64,
    call_date: String,
    inquirer: String,
    phone: String,
    details: String,
}

impl Inquiries {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, db: &Path) -> anyhow::Result<()> {
        // Opening a missing database would create an empty one as a side
        // effect, so report rather than open.
        if !db.exists() {
            match self.output {
                OutputFormat::Table => println!("No inquiry log found at {}", db.display()),
                OutputFormat::Json => println!("[]"),
            }
            return Ok(());
        }

        let store = InquiryLog::open(db).context("failed to open the inquiry log")?;
        match self.output {
            OutputFormat::Table => print_table(&store),
            OutputFormat::Json => print_json(&store),
        }
    }
}

/// Render every stored call as an aligned table.
///
/// Shared with the interactive session's "stored inquirer log" option.
pub(super) fn print_table(store: &InquiryLog) -> anyhow::Result<()> {
    let entries = collect_entries(store)?;
    if entries.is_empty() {
        println!("No stored inquiries.");
        return Ok(());
    }

    let headers = ["ID", "Date", "Inquirer", "Phone", "Details"];
    let data: Vec<[String; 5]> = entries
        .into_iter()
        .map(|entry| {
            [
                entry.id.to_string(),
                entry.call_date,
                entry.inquirer,
                entry.phone,
                entry.details,
            ]
        })
        .collect();

    // Determine column widths for alignment.
    let widths = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            data.iter()
                .map(|row| row[idx].len())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect::<Vec<_>>();

    for (header, width) in headers.iter().zip(&widths) {
        print!("{header:<width$}  ");
    }
    println!();

    for width in &widths {
        print!("{:-<width$}  ", "");
    }
    println!();

    for row in &data {
        for (value, width) in row.iter().zip(&widths) {
            print!("{value:<width$}  ");
        }
        println!();
    }

    Ok(())
}

fn print_json(store: &InquiryLog) -> anyhow::Result<()> {
    let entries = collect_entries(store)?;
    serde_json::to_writer_pretty(std::io::stdout(), &entries)
        .context("failed to render json output")?;
    println!();
    Ok(())
}

fn collect_entries(store: &InquiryLog) -> anyhow::Result<Vec<Entry>> {
    let inquirers: HashMap<i64, InquirerRow> = store
        .inquirers()
        .context("failed to read inquirers")?
        .into_iter()
        .map(|row| (row.id, row))
        .collect();

    let mut entries = Vec::new();
    for interaction in store
        .interactions()
        .context("failed to read interactions")?
    {
        let (inquirer, phone) = inquirers.get(&interaction.inquirer).map_or_else(
            || (format!("#{}", interaction.inquirer), String::new()),
            |row| (display_name(row), row.phone.clone()),
        );

        entries.push(Entry {
            id: interaction.id,
            call_date: interaction.call_date,
            inquirer,
            phone,
            details: interaction.details,
        });
    }

    Ok(entries)
}

fn display_name(row: &InquirerRow) -> String {
    match &row.last_name {
        Some(last) => format!("{} {last}", row.first_name),
        None => row.first_name.clone(),
    }
}
