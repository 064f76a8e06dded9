use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use oilcan::{load_from_file, save_to_file};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Log every function and record as it is read or written
    #[arg(long, global = true)]
    verbose: bool,

    /// Print without ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a saved module and print it as C-like source
    Show { file: PathBuf },
    /// Load a saved module and write it back out with freshly generated names
    Rewrite { input: PathBuf, output: PathBuf },
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(args.command) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Show { file } => {
            let module = load_from_file(&file)?;
            print!("{}", module.pretty());
        }
        Command::Rewrite { input, output } => {
            let mut module = load_from_file(&input)?;
            save_to_file(&mut module, &output)?;
            info!(
                "Rewrote module `{}` from {} to {}",
                module.name,
                input.display(),
                output.display()
            );
        }
    }

    Ok(())
}
