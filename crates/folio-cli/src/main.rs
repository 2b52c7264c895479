use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_io::prelude::*;
use tabwriter::TabWriter;
use tracing_subscriber::EnvFilter;

mod config;
mod inspect;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Render, inspect and store Folio posts")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a post body (rich text or markdown) as HTML.
    Render {
        /// Post JSON path
        input: PathBuf,
    },
    /// Print a BlockDocument as HTML.
    RenderDocument {
        /// BlockDocument JSON path
        input: PathBuf,
    },
    /// List the blocks of a BlockDocument.
    Inspect {
        /// BlockDocument JSON path
        input: PathBuf,
        /// Only blocks of this type (e.g. paragraph, linkTool)
        #[arg(long = "kind", value_name = "TYPE")]
        kind: Option<String>,
        /// Only blocks whose type carries authored text
        #[arg(long)]
        text_only: bool,
    },
    /// List the block types this build understands.
    Kinds,
    /// Print the content hash of a BlockDocument (blocks only).
    Hash {
        /// BlockDocument JSON path
        input: PathBuf,
        /// xxh64 or sha256 (default: $FOLIO_HASH_ALGORITHM, else xxh64)
        #[arg(long)]
        algorithm: Option<HashAlgorithm>,
    },
    /// Manage posts in a directory store.
    Store {
        /// Store directory (default: $FOLIO_STORE_DIR, else ./posts)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        #[command(subcommand)]
        cmd: StoreCommand,
    },
}

#[derive(Debug, Subcommand)]
enum StoreCommand {
    /// List stored posts.
    List,
    /// Print a stored post as JSON.
    Show { id: String },
    /// Store a post from a JSON file and print its id.
    Put {
        /// Post JSON path
        input: PathBuf,
    },
    /// Delete a stored post.
    Delete { id: String },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Render { input } => {
            let post = parse_post_json_str(&read_input(&input)?)?;
            print_html(&render_post(&post).to_html());
        }
        Command::RenderDocument { input } => {
            let doc = parse_document_json_str(&read_input(&input)?)?;
            print_html(&to_html(&render(&doc)));
        }
        Command::Inspect {
            input,
            kind,
            text_only,
        } => {
            let doc = parse_document_json_str(&read_input(&input)?)?;
            let filter = inspect::Filter { kind, text_only };
            inspect::write_table(&doc, &filter, io::stdout().lock())?;
        }
        Command::Kinds => inspect::write_kinds(io::stdout().lock())?,
        Command::Hash { input, algorithm } => {
            let algorithm = match algorithm {
                Some(a) => a,
                None => Config::load()?.hash_algorithm,
            };
            let doc = parse_document_json_str(&read_input(&input)?)?;
            println!("{}", doc.content_hash(algorithm)?);
        }
        Command::Store { dir, cmd } => {
            let dir = match dir {
                Some(d) => d,
                None => Config::load()?.store_dir,
            };
            let store = DirStore::open(&dir)
                .with_context(|| format!("failed to open store at {}", dir.display()))?;
            run_store(store, cmd)?;
        }
    }

    Ok(())
}

fn run_store(mut store: DirStore, cmd: StoreCommand) -> Result<()> {
    match cmd {
        StoreCommand::List => {
            let mut tw = TabWriter::new(io::stdout().lock());
            writeln!(tw, "id\teditorType\tstatus\ttitle")?;
            for post in store.list()? {
                writeln!(
                    tw,
                    "{}\t{}\t{}\t{}",
                    post.id.as_deref().unwrap_or("-"),
                    post.editor_type.as_str(),
                    if post.is_published() { "published" } else { "draft" },
                    post.title
                )?;
            }
            tw.flush()?;
        }
        StoreCommand::Show { id } => {
            let post = store.fetch(&id)?;
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
        StoreCommand::Put { input } => {
            let post = parse_post_json_str(&read_input(&input)?)?;
            let saved = store.save(&post.normalized())?;
            println!("{}", saved.id.as_deref().unwrap_or_default());
        }
        StoreCommand::Delete { id } => {
            store.delete(&id)?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Print HTML with exactly one trailing newline.
fn print_html(html: &str) {
    println!("{}", html.trim_end_matches('\n'));
}
