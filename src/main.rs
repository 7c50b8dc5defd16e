//! Main entry point for the splitzip CLI app

use splitzip::cli::{self, Commands};
use splitzip::progress::Phase;
use splitzip::{join, split, SplitOptions};

fn main() -> std::process::ExitCode {
    if let Err(e) = run_app() {
        if e.downcast_ref::<clap::Error>().is_none() {
            eprintln!("Error: {}", e);
        }
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    let command = cli::run()?;

    let printer = |phase: Phase, current: u64, total: u64| {
        eprintln!("[{phase}] {current}/{total}");
    };

    match command {
        Commands::Split {
            source,
            output,
            chunk_size,
            ext,
        } => {
            let opts = SplitOptions {
                chunk_size,
                extension: ext,
            };
            let parts = split(&source, &output, &opts, Some(&printer))?;
            for part in &parts {
                println!("{}", part.display());
            }
        }
        Commands::Join {
            source,
            output,
            ext,
        } => {
            let restored = join(&source, &output, &ext, Some(&printer))?;
            println!("{}", restored.display());
        }
    }

    Ok(())
}
