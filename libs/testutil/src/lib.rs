//! Helpers shared by the Adaptive Card integration tests: fixture loading from the workspace
//! and the `load_card!` shorthand for assertions.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

mod path_safety;

pub use path_safety::normalize_under_root;

/// Workspace root, two levels above this crate's manifest (`libs/testutil`).
pub fn workspace_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .ancestors()
        .nth(2)
        .unwrap_or(manifest)
        .to_path_buf()
}

/// Reads a card fixture relative to the workspace root. `.json`, `.yaml` and `.yml` are
/// supported; YAML is converted to the equivalent JSON value.
pub fn load_card_value(path: &str) -> Result<Value> {
    let absolute = normalize_under_root(&workspace_root(), Path::new(path))?;
    let content = fs::read_to_string(&absolute)
        .with_context(|| format!("failed to read {}", absolute.display()))?;
    let extension = absolute
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse json {}", absolute.display())),
        "yaml" | "yml" => {
            let yaml: serde_yaml_bw::Value = serde_yaml_bw::from_str(&content)
                .with_context(|| format!("failed to parse yaml {}", absolute.display()))?;
            serde_json::to_value(yaml)
                .with_context(|| format!("failed to convert yaml {}", absolute.display()))
        }
        other => Err(anyhow!("unsupported fixture extension: {other}")),
    }
}

/// Fixture names (file stems) in a workspace-relative directory, sorted.
pub fn fixture_names(dir: &str, extension: &str) -> Result<Vec<String>> {
    let absolute = normalize_under_root(&workspace_root(), Path::new(dir))?;
    let mut names = Vec::new();
    for entry in
        fs::read_dir(&absolute).with_context(|| format!("failed to list {}", absolute.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(extension)
            && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
        {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[macro_export]
macro_rules! load_card {
    ($path:expr $(,)?) => {{
        $crate::load_card_value($path)
            .unwrap_or_else(|err| panic!("failed to load card {}: {}", $path, err))
    }};
}
