//! imarqd command-line front end.
//!
//! # Usage
//!
//! ```bash
//! imarqd embed-image --in photo.png --out marked.png --text klyvo-demo --parity 24
//! imarqd extract-image --in marked.png --bitlen 448 --check-text klyvo-demo --parity 24
//! imarqd verify --in candidate.png --owner-sha <64hex> --media-id <64hex> --media-id <64hex> --parity 32
//! ```

mod cli;
mod commands;
mod error;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    match cli.command {
        Command::EmbedImage(args) => commands::embed_image::run(&args)?,
        Command::ExtractImage(args) => commands::extract_image::run(&args)?,
        Command::EmbedVideo(args) => commands::embed_video::run(&args)?,
        Command::ExtractVideo(args) => commands::extract_video::run(&args)?,
        Command::EccEncode(args) => commands::ecc::encode(&args)?,
        Command::EccDecode(args) => commands::ecc::decode(&args)?,
        Command::Verify(args) => commands::verify::run(&args)?,
    }

    Ok(())
}
