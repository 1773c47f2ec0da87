//! Defaults command - write the starting data document for a shader pair

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use kub_core::{DataTree, config, export, persist, save_tree};

use crate::project::{Project, ShaderArgs};

/// Arguments for the defaults command
#[derive(Args)]
pub struct DefaultsArgs {
    /// Vertex shader source
    pub vertex: PathBuf,

    /// Fragment shader source
    pub fragment: PathBuf,

    #[command(flatten)]
    pub shader: ShaderArgs,

    /// Output file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write compact JSON regardless of config
    #[arg(long)]
    pub compact: bool,
}

/// Execute the defaults command
pub fn execute(args: DefaultsArgs) -> Result<()> {
    let config = config::load();
    let pretty = config.data.pretty && !args.compact;

    let tree = default_tree(&args)?;

    match &args.output {
        Some(path) => {
            save_tree(path, &tree, pretty)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} parameters to {}", count_leaves(&tree), path.display());
        }
        None => println!("{}", persist::to_json(&tree, pretty)?),
    }

    Ok(())
}

fn default_tree(args: &DefaultsArgs) -> Result<DataTree> {
    let mut project = Project::default();
    project.add_shader_pair(&args.vertex, &args.fragment, &args.shader)?;
    export(&project).context("Failed to export default values")
}

fn count_leaves(tree: &DataTree) -> usize {
    tree.values()
        .filter_map(|value| value.as_object())
        .map(|node| {
            if node.contains_key("uniformType") {
                1
            } else {
                count_leaves(node)
            }
        })
        .sum()
}
