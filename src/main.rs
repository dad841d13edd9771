use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budgetduo::cli::{handle_decrypt, handle_encrypt, handle_status, handle_verify};

#[derive(Parser)]
#[command(
    name = "budgetduo",
    version,
    about = "Per-record passphrase encryption for a shared budget tracker",
    long_about = "BudgetDuo seals the sensitive fields of shared-budget \
                  transactions under a passphrase-derived key, so the \
                  synchronized store never sees amounts, vendors, or who \
                  paid. Commands operate on local JSON snapshots of the \
                  store's transaction list."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt every plaintext transaction in a snapshot
    Encrypt {
        /// Path to the snapshot file
        file: PathBuf,
        /// Write the result here instead of replacing the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt every encrypted transaction in a snapshot
    Decrypt {
        /// Path to the snapshot file
        file: PathBuf,
        /// Write the result here instead of replacing the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify a passphrase against a snapshot
    Verify {
        /// Path to the snapshot file
        file: PathBuf,
    },

    /// Show the encryption status of a snapshot
    Status {
        /// Path to the snapshot file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encrypt { file, output } => {
            handle_encrypt(&file, output.as_deref())?;
        }
        Commands::Decrypt { file, output } => {
            handle_decrypt(&file, output.as_deref())?;
        }
        Commands::Verify { file } => {
            handle_verify(&file)?;
        }
        Commands::Status { file } => {
            handle_status(&file)?;
        }
    }

    Ok(())
}
