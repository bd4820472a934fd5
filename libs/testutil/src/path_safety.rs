use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Resolves `candidate` below `root`, rejecting absolute paths, `..` segments and anything that
/// canonicalizes outside the root (symlinks included).
pub fn normalize_under_root(root: &Path, candidate: &Path) -> Result<PathBuf> {
    if candidate.is_absolute() {
        anyhow::bail!("absolute fixture paths are not allowed: {}", candidate.display());
    }
    if candidate
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        anyhow::bail!("fixture path leaves the workspace: {}", candidate.display());
    }

    let root = root
        .canonicalize()
        .with_context(|| format!("failed to canonicalize {}", root.display()))?;
    let joined = root.join(candidate);
    let canon = joined
        .canonicalize()
        .with_context(|| format!("failed to canonicalize {}", joined.display()))?;

    if !canon.starts_with(&root) {
        anyhow::bail!(
            "fixture path escapes root ({}): {}",
            root.display(),
            canon.display()
        );
    }

    Ok(canon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_parent_segments() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let err = normalize_under_root(root, Path::new("../core/Cargo.toml")).unwrap_err();
        assert!(err.to_string().contains("leaves the workspace"));
    }

    #[test]
    fn rejects_absolute_paths() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        assert!(normalize_under_root(root, Path::new("/etc/hosts")).is_err());
    }

    #[test]
    fn resolves_files_below_the_root() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let path = normalize_under_root(root, Path::new("Cargo.toml")).unwrap();
        assert!(path.ends_with("Cargo.toml"));
    }
}
