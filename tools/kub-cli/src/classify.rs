//! Classify command - list the uniforms of a shader pair
//!
//! Shows each supported declaration with the type it is registered as, its
//! persistence and inspector flags, and the registry name it ends up under.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use kub_core::{ConsumerScope, Declaration, ParameterRegistry, scan_declarations};

use crate::project::{ShaderArgs, read_pair};

/// Arguments for the classify command
#[derive(Args)]
pub struct ClassifyArgs {
    /// Vertex shader source
    pub vertex: PathBuf,

    /// Fragment shader source
    pub fragment: PathBuf,

    #[command(flatten)]
    pub shader: ShaderArgs,
}

/// Execute the classify command
pub fn execute(args: ClassifyArgs) -> Result<()> {
    let (vertex, fragment) = read_pair(&args.vertex, &args.fragment)?;
    let declarations = scan_declarations(&vertex, &fragment);

    if declarations.is_empty() {
        println!("No supported uniforms declared.");
        return Ok(());
    }

    let scope = if args.shader.unique {
        ConsumerScope::unique(&args.shader.consumer)
    } else {
        ConsumerScope::shared(&args.shader.consumer)
    };

    println!(
        "{:<20} {:<10} {:<10} {:<12} {}",
        "UNIFORM", "DECLARED", "TYPE", "FLAGS", "NAME"
    );
    for declaration in &declarations {
        println!("{}", describe(declaration, &scope));
    }
    println!("\n{} uniforms", declarations.len());

    Ok(())
}

/// One table row for a declaration
fn describe(declaration: &Declaration, scope: &ConsumerScope) -> String {
    let classification = &declaration.classification;
    let name = ParameterRegistry::canonical_name(
        &declaration.identifier,
        declaration.declared_type,
        scope,
    );
    format!(
        "{:<20} {:<10} {:<10} {:<12} {}",
        declaration.identifier,
        declaration.declared_type.as_str(),
        classification.ty.as_str(),
        flags(declaration),
        name
    )
}

fn flags(declaration: &Declaration) -> String {
    let policy = &declaration.classification.policy;
    let mut flags = Vec::new();
    if policy.persistent {
        flags.push("persist");
    }
    if policy.debug_visible {
        flags.push("debug");
    }
    if policy.engine_fed {
        flags.push("engine");
    }
    if flags.is_empty() {
        "-".to_string()
    } else {
        flags.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_rows() {
        let declarations = scan_declarations(
            "uniform float eTime;",
            "uniform vec3 p_baseColor;\nuniform sampler2D u_noise;",
        );
        let scope = ConsumerScope::shared("fog");
        let rows: Vec<String> = declarations.iter().map(|d| describe(d, &scope)).collect();

        assert!(rows[0].starts_with("eTime"));
        assert!(rows[0].contains("engine"));
        assert!(rows[1].contains("color"));
        assert!(rows[1].contains("persist,debug"));
        assert!(rows[1].ends_with("p_baseColor"));
        assert!(rows[2].ends_with("fog_noise"));
    }

    #[test]
    fn test_unique_scope_renames_everything() {
        let declarations = scan_declarations("", "uniform float p_density;");
        let row = describe(&declarations[0], &ConsumerScope::unique("water"));
        assert!(row.ends_with("water_density"));
    }
}
