//! Main entry point for the mapsync CLI application.
//!
//! Runs a mapshot synchronization or answers one of the package queries
//! and prints the result to stdout. Diagnostics go through `env_logger`.

use anyhow::{Context, Result};
use clap::Parser;

use mapsync::cli::Command;
use mapsync::{Cli, MapInfoRecord, SyncConfig, mapinfo, package, synchronize};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match &cli.command {
        Command::Sync(args) => {
            let report = synchronize(&SyncConfig::from(args))?;
            for name in &report.written {
                println!("  written: {}", name);
            }
            for name in &report.removed {
                println!("  removed: {}", name);
            }
            if !report.failed.is_empty() {
                eprintln!("{} images could not be converted", report.failed.len());
            }
        }
        Command::Packages { dir } => {
            let packages = package::list_packages(dir)
                .with_context(|| format!("Cannot list packages in {}", dir.display()))?;
            for name in packages {
                println!("{}", name);
            }
        }
        Command::List { package: path } => {
            for name in package::list_entries(path)? {
                println!("{}", name);
            }
        }
        Command::Mapinfo { map, pk3, dir } => {
            print_mapinfo(&mapinfo::lookup(dir, map, pk3.as_deref()));
        }
    }

    Ok(())
}

fn print_mapinfo(record: &MapInfoRecord) {
    println!("{:<12} {}", "Title:", record.name);
    println!("{:<12} {}", "Author:", record.author);
    println!("{:<12} {}", "Description:", record.description);
    println!("{:<12} {}", "Gametypes:", record.gametypes.join(", "));
}
