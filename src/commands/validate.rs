//! `validate` - parse a manifest and list what it declares

use anyhow::Result;
use std::path::Path;

use crate::Context;
use crate::manifest::Manifest;
use crate::ui;

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let manifest = Manifest::load(path)?;

    if ctx.quiet {
        return Ok(());
    }

    ui::header(&format!("Manifest {}", path.display()));
    for resource in manifest.resources() {
        ui::kv(resource.kind().label(), &resource.description());
    }
    println!();
    ui::success(&format!("{} resources declared", manifest.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_validate_accepts_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentry.toml");
        fs::write(
            &path,
            "[[organization]]\norganization_slug = \"sentry\"\nname = \"Sentry\"\n",
        )
        .unwrap();

        let ctx = Context {
            verbose: 0,
            quiet: true,
        };
        assert!(run(&ctx, &path).is_ok());
    }

    #[test]
    fn test_validate_rejects_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentry.toml");
        fs::write(&path, "[[team]]\nunknown = 1\n").unwrap();

        let ctx = Context {
            verbose: 0,
            quiet: true,
        };
        assert!(run(&ctx, &path).is_err());
    }
}
