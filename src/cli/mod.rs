use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `TokenForge` - brand design token generation from a guided brief.
#[derive(Parser, Debug)]
#[command(name = "tokenforge")]
#[command(version = "0.1.0")]
#[command(about = "Turn a brand brief into a design token set.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway (moodboard analysis + token generation)
    Serve {
        /// Port to listen on (use 0 for a random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Run the interactive brand wizard in the terminal
    Wizard {
        /// Moodboard image to attach (png or jpeg)
        #[arg(long)]
        moodboard: Option<PathBuf>,

        /// Directory to write design-tokens.json and design-tokens.css into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}
