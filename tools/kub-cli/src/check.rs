//! Check command - verify a data document survives a load/save cycle
//!
//! Imports the document into a fresh editor graph (optionally with a shader
//! pair registered first), exports it again and compares the two trees.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use kub_core::{DataTree, config, export, ignored_keys, import, load_tree};

use crate::project::{Project, ShaderArgs, texture_cache};

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Data document to check (defaults to the configured save path)
    pub data: Option<PathBuf>,

    /// Vertex shader to register before loading
    #[arg(long, requires = "fragment")]
    pub vertex: Option<PathBuf>,

    /// Fragment shader to register before loading
    #[arg(long, requires = "vertex")]
    pub fragment: Option<PathBuf>,

    #[command(flatten)]
    pub shader: ShaderArgs,
}

/// Outcome of a load/save cycle
#[derive(Debug)]
pub struct CheckReport {
    /// Entries the graph has no place for
    pub ignored: Vec<String>,
    /// Top-level entries whose re-export differs from the document
    pub changed: Vec<String>,
    pub parameters: usize,
}

impl CheckReport {
    pub fn round_trips(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let config = config::load();
    let path = args.data.clone().unwrap_or(config.data.save_path.clone());

    let mut project = Project::default();
    if let (Some(vertex), Some(fragment)) = (&args.vertex, &args.fragment) {
        project.add_shader_pair(vertex, fragment, &args.shader)?;
    }

    let report = check_document(&mut project, &path, config.textures.asset_root.as_ref())?;

    println!("{}: {} parameters", path.display(), report.parameters);
    for key in &report.ignored {
        println!("  ignored: {}", key);
    }
    if !report.round_trips() {
        anyhow::bail!(
            "{} does not round-trip; changed entries: {}",
            path.display(),
            report.changed.join(", ")
        );
    }

    println!("  OK (round-trips unchanged)");
    Ok(())
}

/// Load `path` into `project`, save it again and compare
pub fn check_document(
    project: &mut Project,
    path: &Path,
    asset_root: Option<&PathBuf>,
) -> Result<CheckReport> {
    let tree = load_tree(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let mut textures = texture_cache(asset_root);

    import(project, &tree, &mut textures)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    let exported = export(&*project).context("Failed to export the loaded graph")?;

    let ignored = ignored_keys(&*project, &tree);
    Ok(CheckReport {
        changed: changed_entries(&tree, &exported, &ignored),
        ignored,
        parameters: project.materials.registry().len(),
    })
}

fn changed_entries(original: &DataTree, exported: &DataTree, ignored: &[String]) -> Vec<String> {
    let mut changed: Vec<String> = original
        .iter()
        .filter(|(key, _)| !ignored.iter().any(|i| i == *key))
        .filter(|(key, value)| exported.get(key.as_str()) != Some(*value))
        .map(|(key, _)| key.clone())
        .collect();
    changed.extend(
        exported
            .keys()
            .filter(|key| !original.contains_key(key.as_str()))
            .cloned(),
    );
    changed
}
