use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::server::ServerConfig;

#[derive(Parser)]
#[command(name = "pagepick")]
#[command(about = "Extract a subset of pages from a PDF, from the command line or a web form")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy a contiguous page range into a new PDF
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// First page to keep (1-based)
        #[arg(short, long)]
        start: u32,

        /// Last page to keep (1-based, inclusive)
        #[arg(short, long)]
        end: u32,

        /// Output file [default: <input>_extracted_pages.pdf]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy a list of pages into a new PDF
    Pick {
        /// PDF file to extract from
        path: PathBuf,

        /// Pages and ranges (e.g., "1,3,5-7,9")
        pages: String,

        /// Output file [default: <input>_extracted_pages.pdf]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display page count and metadata
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Serve the interactive extraction form
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "PAGEPICK_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Largest accepted upload, in MiB
    #[arg(long, env = "PAGEPICK_MAX_UPLOAD_MB", default_value = "256")]
    pub max_upload_mb: usize,

    /// Number of worker threads [default: one per core]
    #[arg(long, env = "PAGEPICK_WORKERS")]
    pub workers: Option<usize>,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        ServerConfig {
            bind: args.bind,
            max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
            workers: args.workers,
        }
    }
}
