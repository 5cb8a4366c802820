use std::{io, path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, error::ErrorKind};
use nbt_finder::{ScanConfig, Scanner, SearchCriteria, report};

const DEFAULT_WORLD_DIR: &str = "sample_world";
const DEFAULT_OUTPUT: &str = "nbt_findings.csv";
const DEMO_NAME: &str = "id";
const DEMO_VALUE: &str = "minecraft:elytra";

/// Find NBT data in a Minecraft world save.
///
/// Searches player data, region files (block entities), entity files and a
/// few fixed miscellaneous .dat files, then exports matches to CSV.
///
/// Run without any arguments for a demo search for elytras in ./sample_world.
#[derive(Parser)]
#[command(name = "find-nbt")]
#[command(version)]
struct Cli {
    /// Path to the Minecraft world directory (e.g. .minecraft/saves/MyWorld)
    #[arg(long = "world_dir", visible_alias = "world-dir", default_value = DEFAULT_WORLD_DIR)]
    world_dir: PathBuf,

    /// NBT tag name to search for (e.g. 'id', 'CustomName')
    #[arg(long, conflicts_with = "unnamed")]
    name: Option<String>,

    /// Match only unnamed tags (list elements) instead of a tag name
    #[arg(long)]
    unnamed: bool,

    /// NBT tag value to search for (e.g. 'minecraft:diamond')
    #[arg(long)]
    value: Option<String>,

    /// Output CSV file
    #[arg(long = "output_csv", visible_alias = "output-csv", default_value = DEFAULT_OUTPUT)]
    output_csv: PathBuf,
}

impl Cli {
    fn criteria(&self) -> SearchCriteria {
        let mut criteria = SearchCriteria::new();
        if self.unnamed {
            criteria = criteria.unnamed();
        } else if let Some(name) = self.name.as_deref().filter(|name| !name.is_empty()) {
            criteria = criteria.name(name);
        }
        if let Some(value) = self.value.as_deref().filter(|value| !value.is_empty()) {
            criteria = criteria.value(value);
        }
        criteria
    }

    fn is_default_run(&self) -> bool {
        self.world_dir.as_os_str() == DEFAULT_WORLD_DIR
            && self.output_csv.as_os_str() == DEFAULT_OUTPUT
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let mut criteria = cli.criteria();
    if criteria.is_empty() {
        if !cli.is_default_run() {
            Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "no search criteria (--name, --unnamed or --value) provided, \
                     but other arguments were changed from their defaults",
                )
                .exit();
        }
        println!(
            "No search criteria provided via command line, using default demo search: \
             Name='{DEMO_NAME}', Value='{DEMO_VALUE}'"
        );
        criteria = SearchCriteria::new().name(DEMO_NAME).value(DEMO_VALUE);
    }

    let start = Instant::now();
    let scanner = Scanner::new(ScanConfig::new(&cli.world_dir, criteria))?;
    let outcome = scanner.run();

    report::write_summary(&outcome.findings, &mut io::stdout().lock())?;
    let written = report::write_report(&outcome.findings, &cli.output_csv)
        .with_context(|| format!("writing {}", cli.output_csv.display()))?;
    if written {
        println!(
            "\nSuccessfully exported {} findings to {}",
            outcome.findings.len(),
            cli.output_csv.display()
        );
    } else {
        println!("\nNo findings to write to CSV.");
    }

    println!("\nTotal execution time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}
