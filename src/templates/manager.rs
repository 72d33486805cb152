//! Template actions against a cluster.
//!
//! # Responsibilities
//! - Apply, show, list and delete index templates
//! - Push a template's mappings onto the indices it already matches
//!
//! Index updates are best effort: a pattern that cannot be resolved
//! contributes no indices, and a failing index is recorded before moving on.

use serde_json::Value;

use crate::client::{EsClient, EsResult};
use crate::templates::file::{index_patterns, template_mappings};

/// An index whose mapping could not be updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFailure {
    pub index: String,
    pub reason: String,
}

/// Outcome of propagating a template's mappings to existing indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexUpdateReport {
    /// Indices updated, in the order processed.
    pub updated: Vec<String>,
    pub failed: Vec<IndexFailure>,
}

impl IndexUpdateReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct TemplateManager {
    client: EsClient,
}

impl TemplateManager {
    pub fn new(client: EsClient) -> Self {
        Self { client }
    }

    /// Create or replace the template `name`.
    pub async fn apply(&self, name: &str, body: &Value) -> EsResult<Value> {
        let response = self.client.put_template(name, body).await?;
        tracing::info!(template = %name, "Template applied");
        Ok(response)
    }

    pub async fn show(&self, name: &str) -> EsResult<Value> {
        self.client.get_template(name).await
    }

    /// Names of all templates on the cluster, sorted.
    pub async fn list(&self) -> EsResult<Vec<String>> {
        let templates = self.client.list_templates().await?;
        let mut names: Vec<String> = templates.into_iter().map(|(name, _)| name).collect();
        names.sort();
        tracing::debug!(count = names.len(), "Templates listed");
        Ok(names)
    }

    pub async fn delete(&self, name: &str) -> EsResult<Value> {
        let response = self.client.delete_template(name).await?;
        tracing::info!(template = %name, "Template deleted");
        Ok(response)
    }

    /// Indices currently matching `pattern`; empty when the lookup fails.
    pub async fn matching_indices(&self, pattern: &str) -> Vec<String> {
        match self.client.get_alias(pattern).await {
            Ok(indices) => indices,
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "Could not resolve index pattern");
                Vec::new()
            }
        }
    }

    /// Put the template's `mappings` on every index matched by its
    /// `index_patterns`.
    pub async fn update_existing_indices(&self, body: &Value) -> IndexUpdateReport {
        let mappings = template_mappings(body);
        let mut report = IndexUpdateReport::default();

        for pattern in index_patterns(body) {
            let indices = self.matching_indices(&pattern).await;
            tracing::debug!(pattern = %pattern, matched = indices.len(), "Resolved index pattern");

            for index in indices {
                match self.update_index(&index, &mappings).await {
                    Ok(()) => {
                        tracing::info!(index = %index, "Index mapping updated");
                        report.updated.push(index);
                    }
                    Err(e) => {
                        tracing::warn!(index = %index, error = %e, "Index mapping update failed");
                        report.failed.push(IndexFailure {
                            index,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        report
    }

    async fn update_index(&self, index: &str, mappings: &Value) -> EsResult<()> {
        let current = self.client.get_mapping(index).await?;
        tracing::debug!(
            index = %index,
            current_fields = field_count(&current, index),
            "Fetched current mapping"
        );
        self.client.put_mapping(index, mappings).await?;
        Ok(())
    }
}

/// Number of top-level properties in a `GET /{index}/_mapping` response.
fn field_count(response: &Value, index: &str) -> usize {
    response
        .get(index)
        .and_then(|i| i.pointer("/mappings/properties"))
        .and_then(Value::as_object)
        .map_or(0, |props| props.len())
}
