//! Gitwire CLI - inspect git objects and pkt-line streams.

use clap::{Parser, Subcommand};
use gitwire_object::ObjectKind;
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Format;

/// Gitwire - decode git objects and pkt-line streams
#[derive(Parser, Debug)]
#[command(name = "gitwire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a raw object body (commit, tree or blob)
    Object {
        /// Object kind
        kind: ObjectKind,
        /// File holding the object body, or - for stdin
        path: String,
        /// Also write the raw body to stdout after the summary
        #[arg(long)]
        content: bool,
    },

    /// Compute the id an object body would have
    Hash {
        /// Object kind
        kind: ObjectKind,
        /// File holding the object body, or - for stdin
        path: String,
    },

    /// Decode a pkt-line stream
    Pktline {
        /// File holding the stream, or - for stdin
        path: String,
        /// Print each block separately instead of one flat list
        #[arg(long)]
        blocks: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gitwire={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let format = if cli.json { Format::Json } else { Format::Text };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Object {
            kind,
            path,
            content,
        } => commands::object(kind, &path, content, format, &mut out),
        Commands::Hash { kind, path } => commands::hash(kind, &path, format, &mut out),
        Commands::Pktline { path, blocks } => commands::pktline(&path, blocks, format, &mut out),
        Commands::Version => writeln!(out, "gitwire {}", env!("CARGO_PKG_VERSION")).map_err(Into::into),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
