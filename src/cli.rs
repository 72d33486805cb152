//! Command-line surface.
//!
//! Messages are written to a caller-supplied writer so the same code path
//! serves the binary (stdout) and tests (a buffer).

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde_json::Value;

use crate::templates::{
    load_template, template_name_from_path, IndexUpdateReport, TemplateError, TemplateManager,
};

#[derive(Parser, Debug)]
#[command(name = "es-templates")]
#[command(about = "Apply, list and delete Elasticsearch index templates", long_about = None)]
pub struct Cli {
    /// Action to perform
    #[arg(long, value_enum, default_value_t = Action::List)]
    pub action: Action,

    /// Template name (defaults to the template file name without `_template`)
    #[arg(long)]
    pub template: Option<String>,

    /// Path to a JSON template file
    #[arg(long)]
    pub template_file: Option<PathBuf>,

    /// After applying, push the template mappings onto existing indices
    #[arg(long)]
    pub update_existing: bool,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Elasticsearch URL, overriding config and ES_HOST_PROD
    #[arg(long)]
    pub host: Option<String>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Put a template from --template-file
    Apply,
    /// List template names
    List,
    /// Print one template
    Show,
    /// Delete the template named by --template
    Delete,
    /// Push a template file's mappings onto matching indices
    #[value(alias = "update_indices")]
    UpdateIndices,
}

/// Execute the selected action. Returns `Ok(false)` when the action failed;
/// the failure has already been reported to `out`.
pub async fn run<W: Write>(cli: &Cli, manager: &TemplateManager, out: &mut W) -> io::Result<bool> {
    tracing::debug!(action = ?cli.action, "Running action");

    // Empty values count as not given.
    let template = cli.template.as_deref().filter(|s| !s.is_empty());
    let template_file = cli
        .template_file
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty());

    match cli.action {
        Action::List => list(manager, out).await,
        Action::Show => {
            let Some(name) = template else {
                writeln!(out, "❌ Please specify the template name (--template)")?;
                return Ok(false);
            };
            show(manager, name, out).await
        }
        Action::Delete => {
            let Some(name) = template else {
                writeln!(out, "❌ Please specify the template to delete (--template)")?;
                return Ok(false);
            };
            delete(manager, name, out).await
        }
        Action::Apply => {
            let Some(path) = template_file else {
                writeln!(out, "❌ Please specify the template file path (--template-file)")?;
                return Ok(false);
            };
            let Some(body) = read_template(path, out)? else {
                return Ok(false);
            };
            let name = template
                .map(str::to_string)
                .unwrap_or_else(|| template_name_from_path(path));
            if name.is_empty() {
                writeln!(
                    out,
                    "❌ Cannot derive a template name from {}, please pass --template",
                    path.display()
                )?;
                return Ok(false);
            }
            apply(manager, &name, &body, cli.update_existing, out).await
        }
        Action::UpdateIndices => {
            let Some(path) = template_file else {
                writeln!(out, "❌ Please specify the template file path (--template-file)")?;
                return Ok(false);
            };
            let Some(body) = read_template(path, out)? else {
                return Ok(false);
            };
            update_indices(manager, &body, out).await
        }
    }
}

async fn list<W: Write>(manager: &TemplateManager, out: &mut W) -> io::Result<bool> {
    match manager.list().await {
        Ok(names) => {
            writeln!(out, "Current templates:")?;
            for name in names {
                writeln!(out, "  - {}", name)?;
            }
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "❌ Failed to list templates: {}", e)?;
            Ok(false)
        }
    }
}

async fn show<W: Write>(manager: &TemplateManager, name: &str, out: &mut W) -> io::Result<bool> {
    match manager.show(name).await {
        Ok(template) => {
            let pretty = serde_json::to_string_pretty(&template).map_err(io::Error::other)?;
            writeln!(out, "{}", pretty)?;
            Ok(true)
        }
        Err(e) if e.is_not_found() => {
            writeln!(out, "Template {} does not exist: {}", name, e)?;
            Ok(false)
        }
        Err(e) => {
            writeln!(out, "❌ Failed to get template {}: {}", name, e)?;
            Ok(false)
        }
    }
}

async fn delete<W: Write>(manager: &TemplateManager, name: &str, out: &mut W) -> io::Result<bool> {
    match manager.delete(name).await {
        Ok(_) => {
            writeln!(out, "✅ Template {} deleted", name)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "❌ Failed to delete template {}: {}", name, e)?;
            Ok(false)
        }
    }
}

async fn apply<W: Write>(
    manager: &TemplateManager,
    name: &str,
    body: &Value,
    update_existing: bool,
    out: &mut W,
) -> io::Result<bool> {
    writeln!(out, "Applying template: {}", name)?;
    if let Err(e) = manager.apply(name, body).await {
        writeln!(out, "❌ Failed to apply template {}: {}", name, e)?;
        return Ok(false);
    }
    writeln!(out, "✅ Template {} applied", name)?;

    if update_existing {
        return update_indices(manager, body, out).await;
    }
    Ok(true)
}

async fn update_indices<W: Write>(manager: &TemplateManager, body: &Value, out: &mut W) -> io::Result<bool> {
    writeln!(out, "Updating existing indices...")?;
    let report = manager.update_existing_indices(body).await;
    print_report(&report, out)?;
    Ok(report.is_clean())
}

fn print_report<W: Write>(report: &IndexUpdateReport, out: &mut W) -> io::Result<()> {
    for index in &report.updated {
        writeln!(out, "✅ Index {} mapping updated", index)?;
    }
    for failure in &report.failed {
        writeln!(out, "❌ Index {} mapping update failed: {}", failure.index, failure.reason)?;
    }
    if !report.updated.is_empty() {
        writeln!(out, "Updated indices: {}", report.updated.join(", "))?;
    }
    Ok(())
}

/// Load a template file, reporting problems to `out`.
fn read_template<W: Write>(path: &std::path::Path, out: &mut W) -> io::Result<Option<Value>> {
    match load_template(path) {
        Ok(body) => Ok(Some(body)),
        Err(e @ TemplateError::NotFound(_)) => {
            writeln!(out, "❌ {}", e)?;
            Ok(None)
        }
        Err(e) => {
            writeln!(out, "❌ Could not load template: {}", e)?;
            Ok(None)
        }
    }
}
