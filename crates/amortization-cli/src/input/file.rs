use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load loan or scenario input from disk. The extension picks the parser:
/// `.yaml`/`.yml` go through serde_yaml, anything else through serde_json.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let file = resolve_path(path)?;
    let contents = fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;

    let is_yaml = matches!(
        file.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    debug!(path = %file.display(), yaml = is_yaml, "reading input file");

    let value: T = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", file.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", file.display(), e))?
    };
    Ok(value)
}

/// Anchor a relative path at the working directory. Only regular files are
/// accepted, so a directory or a missing path fails before any parsing.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidate = Path::new(path);
    let full = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        std::env::current_dir()?.join(candidate)
    };

    match fs::metadata(&full) {
        Ok(meta) if meta.is_file() => Ok(full),
        Ok(_) => Err(format!("Not a file: {}", full.display()).into()),
        Err(_) => Err(format!("File not found: {}", full.display()).into()),
    }
}
