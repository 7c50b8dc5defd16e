use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::fragment::DEFAULT_EXTENSION;
use crate::split::DEFAULT_CHUNK_SIZE;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Pack a directory and split it into text-safe fragment files.
    #[command(alias = "s")]
    Split {
        /// The directory to pack and split.
        #[arg(required = true)]
        source: PathBuf,

        /// The directory where fragment files will be written.
        #[arg(short, long)]
        output: PathBuf,

        /// Size of each fragment's byte window, in bytes. [default: 16 MiB]
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: u64,

        /// Filename extension for fragment files.
        #[arg(long, default_value = DEFAULT_EXTENSION)]
        ext: String,
    },

    /// Reassemble fragment files and restore the original directory tree.
    #[command(alias = "j")]
    Join {
        /// The directory containing the fragment files.
        #[arg(required = true)]
        source: PathBuf,

        /// The directory where the restored tree will be written.
        #[arg(short, long)]
        output: PathBuf,

        /// Filename extension of the fragment files.
        #[arg(long, default_value = DEFAULT_EXTENSION)]
        ext: String,
    },
}

/// Parses command-line arguments using `clap` and returns the command to execute.
pub fn run() -> Result<Commands, Box<dyn std::error::Error>> {
    let args = Args::parse();
    Ok(args.command)
}
