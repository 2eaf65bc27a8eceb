//! iavl-dot CLI - render a tree snapshot as a Graphviz DOT graph
//!
//! Reads a JSON snapshot, optionally builds lookup paths for some keys,
//! and writes the DOT text to stdout or a file. Logs go to stderr.

use anyhow::Context;
use clap::Parser;
use iavl_dot::{write_dot_graph, PathToLeaf, SnapshotSpec};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "iavl-dot")]
#[command(about = "Render an IAVL tree snapshot as a Graphviz DOT graph")]
#[command(version)]
struct Cli {
    /// JSON snapshot: {"version": N, "entries": [{"key": "...", "value": "..."}]}
    input: PathBuf,

    /// Highlight the lookup path of this key (may be repeated)
    #[arg(short, long = "prove", value_name = "KEY")]
    prove: Vec<String>,

    /// Write the graph to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iavl_dot=warn")),
        )
        .init();

    let cli = Cli::parse();

    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    let tree = SnapshotSpec::from_reader(BufReader::new(file))?.into_tree()?;
    tree.ensure_hashes()?;
    info!(version = tree.version(), leaves = tree.len(), "Loaded snapshot");

    let paths = cli
        .prove
        .iter()
        .map(|key| tree.path_to_leaf(key.as_bytes()))
        .collect::<iavl_dot::Result<Vec<PathToLeaf>>>()?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_dot_graph(&mut BufWriter::new(file), &tree, &paths)?;
        }
        None => {
            write_dot_graph(&mut io::stdout().lock(), &tree, &paths)?;
        }
    }

    Ok(())
}
