//! `json-node-edit` — inspect and edit one node of a JSON document.
//!
//! Usage:
//!   json-node-edit list <document>
//!   json-node-edit show <document> '$["customer"]'
//!   json-node-edit set <document> '$["customer"]' age=31 name=Al [--in-place]
//!
//! A document of `-` is read from stdin. Logging goes to stderr; set
//! `RUST_LOG` or pass `-v` for more detail.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use json_node_edit::cli::{list_nodes, set_fields, show_node, Assignment};
use json_node_edit::{CommitPolicy, SyncOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "json-node-edit", version, about)]
struct Args {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file with save options (`commit_policy`, `refresh_on_failure`).
    #[arg(long, env = "JSON_NODE_EDIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the id of every node.
    List { document: PathBuf },
    /// Print a node's path and display text.
    Show { document: PathBuf, path: String },
    /// Edit fields of a node and print the resulting document.
    Set {
        document: PathBuf,
        path: String,
        #[arg(required = true)]
        edits: Vec<Assignment>,
        /// Patch the document in memory before touching any store.
        #[arg(long)]
        validate_first: bool,
        /// Write the result back to the document file.
        #[arg(long)]
        in_place: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

fn read_document(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    fs::read_to_string(path)
}

fn load_options(path: Option<&Path>) -> Result<SyncOptions, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(SyncOptions::from_json(&fs::read_to_string(path)?)?),
        None => Ok(SyncOptions::default()),
    }
}

fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let mut options = load_options(args.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match args.command {
        Command::List { document } => {
            for id in list_nodes(&read_document(&document)?)? {
                writeln!(stdout, "{id}")?;
            }
            Ok(true)
        }
        Command::Show { document, path } => {
            writeln!(stdout, "{}", show_node(&read_document(&document)?, &path)?)?;
            Ok(true)
        }
        Command::Set {
            document,
            path,
            edits,
            validate_first,
            in_place,
        } => {
            if validate_first {
                options.commit_policy = CommitPolicy::ValidateFirst;
            }
            let report = set_fields(&read_document(&document)?, &path, &edits, options)?;
            if let Some(error) = report.outcome.error() {
                eprintln!("document not updated: {error}");
            }
            if in_place && document.as_os_str() != "-" {
                fs::write(&document, format!("{}\n", report.text))?;
            } else {
                writeln!(stdout, "{}", report.text)?;
            }
            Ok(report.outcome.error().is_none())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
