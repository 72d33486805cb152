//! Template files on disk.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Errors reading a template file.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read template file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template file {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template file {} must contain a JSON object", .0.display())]
    NotAnObject(PathBuf),
}

/// Read and parse a JSON template body.
pub fn load_template(path: &Path) -> Result<Value, TemplateError> {
    if !path.exists() {
        return Err(TemplateError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let body: Value = serde_json::from_str(&content).map_err(|source| TemplateError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !body.is_object() {
        return Err(TemplateError::NotAnObject(path.to_path_buf()));
    }

    Ok(body)
}

/// Template name for a file: its stem with `_template` removed,
/// so `logs_template.json` becomes `logs`.
pub fn template_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace("_template", ""))
        .unwrap_or_default()
}

/// Index patterns the template applies to.
///
/// `index_patterns` may be an array or a single string; anything else
/// yields no patterns.
pub fn index_patterns(body: &Value) -> Vec<String> {
    match body.get("index_patterns") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(pattern)) => vec![pattern.clone()],
        _ => Vec::new(),
    }
}

/// The `mappings` section, or an empty object when the template has none.
pub fn template_mappings(body: &Value) -> Value {
    body.get("mappings")
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()))
}
