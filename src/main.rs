use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::*;
use sdcrc::Result;
use sdcrc::crc::parse_checksum;
use sdcrc::volume::*;

#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    commands: Commands,

    ///Files on the volume to operate on
    #[arg(global = true)]
    paths: Vec<String>,

    ///If paths contain these strings, ignore them
    #[arg(short, long, global = true, num_args = 1 ..)]
    ignore: Vec<String>,

    ///Directory to treat as the root of the card
    #[arg(short, long, global = true, default_value = ".")]
    root: String,

    ///Log every operation
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    ///Displays the CRC32 checksums of the specified files
    Crc,
    ///Fails unless the specified files have the given CRC32 checksum
    Verify {
        #[arg(value_parser = parse_checksum)]
        expected: u32,
    },
    ///Replace every occurrence of a string in the specified files
    Replace { search: String, replace: String },
    ///Copy the specified files next to themselves with a suffix
    Backup {
        #[arg(short, long, default_value = DEFAULT_BACKUP_SUFFIX)]
        suffix: String,
    },
    ///Append a line to the end of the specified files
    Append { line: String },
    ///Displays the value of a key in the specified ini files
    Get { key: String },
    ///Set the value of a key in the specified ini files
    Set { key: String, value: String },
}

fn ignoring(ignore: Vec<String>) -> impl Fn(&String) -> bool {
    move |p| !ignore.iter().any(|i| p.contains(i))
}

fn setup_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) if verbose => builder.parse_filters(concat!(env!("CARGO_CRATE_NAME"), "=debug")),
        Err(_) => builder.parse_filters(concat!(env!("CARGO_CRATE_NAME"), "=info")),
    };
    builder.init();
}

fn run(volume: &Volume, command: &Commands, path: &str) -> Result<()> {
    match command {
        Commands::Crc => println!("'{path}': {:08x}", volume.checksum(path)?),
        Commands::Verify { expected } => {
            let actual = volume.verify(path, *expected)?;
            println!("'{path}' matches {actual:08x}");
        }
        Commands::Replace { search, replace } => {
            let count = volume.search_and_replace(path, search, replace)?;
            println!("Replaced {count} occurrence(s) in '{path}'");
        }
        Commands::Backup { suffix } => {
            let backup = volume.create_backup(path, suffix)?;
            println!("Backed up '{path}' to '{backup}'");
        }
        Commands::Append { line } => {
            volume.append_line(path, line)?;
            println!("Appended to '{path}' successfully!");
        }
        Commands::Get { key } => match volume.config_value(path, key)? {
            Some(value) => println!("'{path}': {key}={value}"),
            None => println!("'{path}' does not have '{key}'"),
        },
        Commands::Set { key, value } => {
            if volume.set_config_value(path, key, value)? {
                println!("Updated '{key}' in '{path}'");
            } else {
                println!("Added '{key}' to '{path}'");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse_from(wild::args());
    setup_logger(args.verbose);

    let mut volume = Volume::new(&args.root);
    if let Err(e) = volume.begin() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let paths: Vec<String> = args.paths.into_iter().filter(ignoring(args.ignore)).collect();
    if paths.is_empty() {
        warn!("no paths given");
    }

    if run_all(&volume, &args.commands, &paths) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Runs `command` on every path, reporting failures without stopping. Returns
/// whether every path succeeded.
fn run_all(volume: &Volume, command: &Commands, paths: &[String]) -> bool {
    let mut succeeded = true;
    for path in paths {
        if let Err(e) = run(volume, command, path) {
            eprintln!("{e}");
            succeeded = false;
        }
    }
    succeeded
}
