use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use pytree_core::render::{FlattenReport, render_json};
use pytree_core::{
    Registry, SUBSTITUTIONS, Tree, TreeValue, tree_flatten, tree_iter, tree_structure,
    tree_unflatten,
};
use regex::Regex;
use serde_json::json;
use std::io::Read;
use tracing_subscriber::EnvFilter;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "pytree")]
#[command(about = "Flatten and rebuild nested JSON trees", long_about = None)]
struct Cli {
    /// Treat any value whose type name matches this regex as a leaf
    /// (type names: NoneType, bool, int, float, str, list, dict).
    #[arg(long, global = true)]
    leaf_pattern: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the leaves and the structure of a tree.
    Flatten {
        /// JSON file, or `-` for stdin.
        #[arg(long)]
        input: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Print the leaves of a tree, walking lazily.
    Leaves {
        #[arg(long)]
        input: String,

        /// Stop after this many leaves.
        #[arg(long)]
        limit: Option<usize>,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Rebuild the shape of `--input` with the leaves from `--leaves`.
    Unflatten {
        #[arg(long)]
        input: String,

        /// JSON array of replacement leaves.
        #[arg(long)]
        leaves: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Flatten, unflatten, and check the result equals the input.
    Roundtrip {
        #[arg(long)]
        input: String,
    },

    /// List the operations and whether they constant-fold.
    Ops,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = Registry::with_builtins();

    let pattern = cli
        .leaf_pattern
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("invalid --leaf-pattern")?;
    let matches_pattern = |t: &Tree| {
        pattern
            .as_ref()
            .is_some_and(|re| re.is_match(t.type_key().as_str()))
    };
    let is_leaf: Option<&dyn Fn(&Tree) -> bool> = match &pattern {
        Some(_) => Some(&matches_pattern),
        None => None,
    };

    match cli.cmd {
        Commands::Flatten { input, out } => {
            let tree = read_tree(&input)?;
            let (leaves, spec) = tree_flatten(tree, &registry, is_leaf)?;
            let report = FlattenReport::new(leaves, &spec);
            write_output(out.as_deref(), &render_json(&report)?)?;
        }
        Commands::Leaves { input, limit, out } => {
            let tree = read_tree(&input)?;
            let leaves = tree_iter(tree, &registry, is_leaf)
                .take(limit.unwrap_or(usize::MAX))
                .collect::<pytree_core::Result<Vec<Tree>>>()?;
            write_output(out.as_deref(), &render_json(&leaves)?)?;
        }
        Commands::Unflatten { input, leaves, out } => {
            let spec = tree_structure(read_tree(&input)?, &registry, is_leaf)?;
            let leaves = match read_tree(&leaves)? {
                Tree::List(items) => items,
                other => bail!("--leaves must be a JSON array, got {}", other.type_key()),
            };
            let tree = tree_unflatten(leaves, &spec)?;
            write_output(out.as_deref(), &render_json(&tree)?)?;
        }
        Commands::Roundtrip { input } => {
            let tree = read_tree(&input)?;
            let (leaves, spec) = tree_flatten(tree.clone(), &registry, is_leaf)?;
            let num_leaves = leaves.len();
            let rebuilt = spec.unflatten(leaves)?;
            if rebuilt != tree {
                bail!("round trip changed the tree ({})", spec);
            }
            let summary = json!({
                "ok": true,
                "num_leaves": num_leaves,
                "num_nodes": spec.num_nodes(),
                "spec": spec.to_string(),
            });
            write_output(None, &render_json(&summary)?)?;
        }
        Commands::Ops => {
            write_output(None, &render_json(&SUBSTITUTIONS)?)?;
        }
    }

    Ok(())
}

fn read_tree(path: &str) -> Result<Tree> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read tree from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("read tree file {}", path))?
    };
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parse JSON in {}", path))?;
    Ok(Tree::from(value))
}

fn write_output(out: Option<&str>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("write {}", path))?;
            println!("Wrote {}", path);
        }
        None => print!("{}", text),
    }
    Ok(())
}
