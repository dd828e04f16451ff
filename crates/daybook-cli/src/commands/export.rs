use std::path::PathBuf;

use clap::Args;
use daybook_core::{ExportFormat, MonthKey};

use super::open_planner;

#[derive(Args)]
pub struct ExportArgs {
    /// json or csv
    format: ExportFormat,
    /// Month as YYYY-MM (default: current month)
    #[arg(long)]
    month: Option<MonthKey>,
    /// Output directory (default: configured export directory)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, planner) = open_planner()?;
    let month = match args.month {
        Some(month) => month,
        None => MonthKey::current()?,
    };
    let export = planner.export_month(month, args.format)?;

    if args.stdout {
        print!("{}", export.contents);
        return Ok(());
    }

    let dir = args.out.unwrap_or_else(|| config.export_dir());
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(&export.file_name);
    std::fs::write(&path, &export.contents)?;
    println!("Exported {} to {}", month, path.display());
    Ok(())
}
