//! Reference arguments: a URL, or `@path` to a saved reference JSON file.

use anyhow::{Context, Result};
use httpres_core::Reference;
use std::path::Path;

pub fn load_reference(arg: &str) -> Result<Reference> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let path = Path::new(path);
            let bytes = std::fs::read(path)
                .with_context(|| format!("read saved reference: {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parse saved reference: {}", path.display()))
        }
        None => Ok(Reference::url(arg)),
    }
}

pub fn save_reference(reference: &Reference, path: &Path) -> Result<()> {
    let json = serde_json::to_vec_pretty(reference)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
