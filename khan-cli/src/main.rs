//! # Khan CLI
//!
//! Build sample error chains and show how they render, resolve and log.
//!
//! Usage:
//!   khan demo
//!   khan kinds
//!   khan wrap <kind> [<key> <value>]...
//!
//! Examples:
//!   khan demo --format debug
//!   khan --log wrap "not found" kaid kaid_123 attempt 2
//!   RUST_LOG=warn khan --log demo

use std::fmt;

use clap::{Parser, Subcommand, ValueEnum};
use khan_error::{
    fields, get_fields, get_kind, internal, is, not_found, unauthorized, Error, FieldValue, Kind,
};
use tracing_subscriber::{fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "khan")]
#[command(author, version, about = "Khan - kind-tagged errors with structured fields")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// How to print errors
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also emit each error as a tracing event (filtered by RUST_LOG)
    #[arg(short, long, global = true)]
    log: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a three-level chain and print it
    Demo,
    /// List the error kinds
    Kinds,
    /// Build an error of the given kind and wrap it with key/value fields
    Wrap {
        /// Kind label, e.g. "not found"
        kind: String,

        /// Alternating keys and values
        #[arg(trailing_var_arg = true)]
        fields: Vec<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Display string
    Text,
    /// Multi-line debug report
    Debug,
    /// Kind and merged fields as JSON
    Json,
}

/// A foreign error, standing in for one returned by some other library.
#[derive(Debug)]
struct UpstreamError {
    msg: String,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for UpstreamError {}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Ignore a subscriber that is already installed.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(log_fmt::layer().with_target(false))
        .try_init();
}

fn foo() -> Error {
    internal!(
        khan_error::Cause::foreign(UpstreamError {
            msg: "Something went wrong".to_string(),
        }),
        fields! { "internal" => "inside" }
    )
}

fn bar() -> Error {
    let with_err = unauthorized!(foo(), fields! { "bar" => true });
    not_found!(with_err, fields! { "found" => false })
}

fn print_error(err: &Error, format: Format, log: bool) {
    match format {
        Format::Text => println!("{}", err),
        Format::Debug => println!("{:?}", err),
        Format::Json => {
            let report = serde_json::json!({
                "kind": get_kind(err).as_str(),
                "location": err.location().to_string(),
                "fields": get_fields(err).to_json(),
            });
            match serde_json::to_string_pretty(&report) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Error: cannot render JSON: {}", e),
            }
        }
    }

    if log {
        err.log();
    }
}

fn run_demo(format: Format, log: bool) {
    let err = bar();
    print_error(&err, format, log);

    println!();
    for kind in [Kind::NotFound, Kind::Unauthorized, Kind::Internal, Kind::Service] {
        println!("is {:<20} {}", format!("{}:", kind), is(&err, &kind));
    }
}

fn show_kinds() {
    for kind in Kind::ALL {
        println!(
            "{:<30} transient={:<5} level={}",
            kind.as_str(),
            kind.is_transient(),
            kind.level()
        );
    }
}

fn run_wrap(label: &str, pairs: Vec<String>, format: Format, log: bool) -> anyhow::Result<()> {
    let kind: Kind = label.parse()?;
    let base = khan_error::wrap_error(kind, Vec::new());
    let args = pairs.into_iter().map(FieldValue::from).collect();
    let err = khan_error::wrap_error(base, args);
    print_error(&err, format, log);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if cli.log {
        init_logging();
    }

    match cli.command {
        Commands::Demo => run_demo(cli.format, cli.log),
        Commands::Kinds => show_kinds(),
        Commands::Wrap { kind, fields } => {
            if let Err(e) = run_wrap(&kind, fields, cli.format, cli.log) {
                eprintln!("Error: {}", e);
                eprintln!("Known kinds:");
                for kind in Kind::ALL {
                    eprintln!("  {}", kind);
                }
                std::process::exit(1);
            }
        }
    }
}
