//! Snapsheet CLI - grid snapshot export tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use snapsheet::ledger::{AppendOutcome, LedgerClient, LedgerConfig, LedgerTarget};
use snapsheet::prelude::*;
use snapsheet::{export_file_name, ExportFormat};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snapsheet")]
#[command(author, version, about = "Export grid snapshots to files or a remote ledger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a JSON grid file to CSV, TSV, XLSX or ODS
    Export {
        /// Input grid file (JSON)
        input: PathBuf,

        /// Output format: csv, tsv, xlsx, ods
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Label used to name the output file
        #[arg(short, long, default_value = "")]
        label: String,

        /// Output file (default: derived from the label)
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Directory for the derived file name (default: current directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Append a JSON grid file to a remote spreadsheet
    Append {
        /// Input grid file (JSON)
        input: PathBuf,

        /// Remote spreadsheet id
        #[arg(long)]
        spreadsheet_id: String,

        /// Sheet id within the spreadsheet
        #[arg(long)]
        sheet_id: i64,

        /// Label row written above the block
        #[arg(short, long, default_value = "")]
        label: String,

        /// Bearer token
        #[arg(long, env = "SNAPSHEET_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,

        /// Override the batch-update endpoint root
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show information about a grid file
    Info {
        /// Input grid file (JSON)
        input: PathBuf,
    },
}

/// On-disk grid: `{"rows": [[{"displayValue": 5, "formula": null}]]}`
#[derive(Debug, Deserialize)]
struct GridFile {
    rows: Vec<Vec<CellSnapshot>>,
    /// Explicit column count; defaults to the widest row
    #[serde(default)]
    columns: Option<usize>,
}

impl GridFile {
    fn into_grid(self) -> Grid {
        // Re-capture so hand-written files get the same normalization
        let rows: Vec<Vec<CellSnapshot>> = self
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|c| CellSnapshot::new(c.display_value, c.formula.as_deref()))
                    .collect()
            })
            .collect();
        match self.columns {
            Some(columns) => Grid::with_columns(rows, columns),
            None => Grid::from_rows(rows),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            format,
            label,
            output,
            out_dir,
        } => export(&input, format, &label, output, out_dir),
        Commands::Append {
            input,
            spreadsheet_id,
            sheet_id,
            label,
            access_token,
            base_url,
        } => {
            let mut config = LedgerConfig {
                access_token,
                ..LedgerConfig::default()
            };
            if let Some(base_url) = base_url {
                config = config.with_base_url(base_url);
            }
            let target = LedgerTarget::new(spreadsheet_id, sheet_id);
            append(&input, &target, &label, config).await
        }
        Commands::Info { input } => show_info(&input),
    }
}

fn load_grid(input: &Path) -> Result<Grid> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let file: GridFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse grid file '{}'", input.display()))?;
    Ok(file.into_grid())
}

fn output_path(
    format: ExportFormat,
    label: &str,
    output: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> PathBuf {
    output.unwrap_or_else(|| {
        let name = export_file_name(label, format, chrono::Local::now().naive_local());
        out_dir.unwrap_or_else(|| PathBuf::from(".")).join(name)
    })
}

fn export(
    input: &Path,
    format: ExportFormat,
    label: &str,
    output: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let grid = load_grid(input)?;
    let path = output_path(format, label, output, out_dir);

    let bytes = grid
        .export(format)
        .with_context(|| format!("Failed to export {}", format))?;
    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;

    eprintln!(
        "Wrote {} ({} bytes) to '{}'",
        format.mime_type(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

async fn append(input: &Path, target: &LedgerTarget, label: &str, config: LedgerConfig) -> Result<()> {
    if config.access_token.is_none() {
        bail!("No access token; pass --access-token or set SNAPSHEET_ACCESS_TOKEN");
    }

    let grid = load_grid(input)?;
    let client = LedgerClient::new(config).context("Failed to create HTTP client")?;
    let outcome = client
        .append_block(target, label, &grid)
        .await
        .with_context(|| format!("Failed to append to spreadsheet '{}'", target.spreadsheet_id))?;

    match outcome {
        AppendOutcome::Skipped => eprintln!("Nothing to append"),
        AppendOutcome::Appended { rows } => eprintln!(
            "Appended {} rows to sheet {} of '{}'",
            rows, target.sheet_id, target.spreadsheet_id
        ),
    }
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let grid = load_grid(input)?;
    let formulas = grid
        .rows()
        .flatten()
        .filter(|c| c.formula_text().is_some())
        .count();

    println!("File: {}", input.display());
    println!("Size: {} rows x {} columns", grid.row_count(), grid.column_count());
    println!("Rows with content: {}", grid.content_row_count());
    println!("Formulas: {}", formulas);
    Ok(())
}
