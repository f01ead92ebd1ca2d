//! Upstream response envelope and MCP tool-result builders.
//!
//! Tool outputs relay the upstream JSON verbatim; the typed envelope here is
//! only used to inspect replies (pagination, structured error codes) without
//! reshaping what the caller sees.

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ClientError;

/// Pagination metadata of a list reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Pagination {
    /// Current page number (1-based).
    pub(crate) page: Option<u64>,
    /// Page size requested.
    pub(crate) page_size: Option<u64>,
    /// Total number of results reported by upstream.
    pub(crate) total_results: Option<u64>,
}

/// One structured error entry from an upstream failure reply.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpstreamError {
    /// Machine-readable error code, e.g. `invalid_reference`.
    #[serde(alias = "Code")]
    pub(crate) code: Option<String>,
    /// Human-readable message.
    #[serde(alias = "Message")]
    pub(crate) message: Option<String>,
    /// Offending parameter names.
    #[serde(default, alias = "Params")]
    pub(crate) params: Vec<String>,
    /// Extra detail.
    #[serde(alias = "Detail")]
    pub(crate) detail: Option<String>,
}

/// Generic upstream response wrapper. The `results` array is left in the raw
/// reply; only the metadata is read here.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Envelope {
    /// Pagination metadata of a paginated reply.
    pub(crate) pagination: Option<Pagination>,
    /// Structured errors of a failure reply.
    #[serde(default, alias = "Errors")]
    pub(crate) errors: Vec<UpstreamError>,
}

impl Envelope {
    /// Reads the envelope view of a raw reply. Replies that are not objects
    /// (or do not match) yield an empty envelope.
    pub(crate) fn inspect(body: &Value) -> Self {
        Self::deserialize(body).unwrap_or_default()
    }

    /// One-line rendering of the structured errors, for logging.
    pub(crate) fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(UpstreamError::summary)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl UpstreamError {
    /// `code: message [params] (detail)`, skipping absent parts.
    fn summary(&self) -> String {
        let mut parts = vec![self.code.clone().unwrap_or_else(|| "unknown".to_owned())];
        if let Some(message) = self.message.as_deref() {
            parts.push(format!(": {message}"));
        }
        if !self.params.is_empty() {
            parts.push(format!(" [{}]", self.params.join(", ")));
        }
        if let Some(detail) = self.detail.as_deref() {
            parts.push(format!(" ({detail})"));
        }
        parts.concat()
    }
}

/// Serializes a value to a pretty-printed JSON string for tool output.
fn to_json_text(value: &Value) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|err| {
        McpError::internal_error(format!("failed to serialize response: {err}"), None)
    })
}

/// Creates a successful tool result containing JSON text.
pub(crate) fn json_result(value: &Value) -> Result<CallToolResult, McpError> {
    let text = to_json_text(value)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Converts the outcome of one operation into a tool result.
///
/// Failures become an error-flagged result instead of a protocol error so the
/// caller sees the message and the server keeps serving.
pub(crate) fn tool_result(
    tool: &str,
    outcome: Result<Value, ClientError>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(value) => json_result(&value),
        Err(err) => {
            tracing::warn!(tool, %err, "tool invocation failed");
            Ok(CallToolResult::error(vec![Content::text(format!(
                "Error executing {tool}: {err}"
            ))]))
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::missing_docs_in_private_items,
    reason = "test code uses expect and indexing for readability"
)]
mod tests {
    use serde_json::json;

    use super::{Envelope, tool_result};
    use crate::error::ClientError;

    #[test]
    fn inspects_paginated_reply() {
        let body = json!({
            "pagination": {"page": 2, "page_size": 25, "total_results": 60},
            "results": [{"id": "a"}, {"id": "b"}]
        });
        let envelope = Envelope::inspect(&body);
        let pagination = envelope.pagination.expect("pagination present");
        assert_eq!(pagination.page, Some(2));
        assert_eq!(pagination.total_results, Some(60));
        assert!(envelope.errors.is_empty());
    }

    #[test]
    fn reads_pascal_case_errors() {
        let body = json!({
            "Errors": [
                {
                    "Code": "invalid_reference",
                    "Message": "Invalid account group",
                    "Params": ["account_group"]
                },
                {"Code": "parameter_required", "Message": "name is required"}
            ],
            "Status": 400
        });
        let envelope = Envelope::inspect(&body);
        assert_eq!(envelope.errors.len(), 2);
        assert_eq!(envelope.errors[0].params, vec!["account_group"]);
        assert_eq!(
            envelope.error_summary(),
            concat!(
                "invalid_reference: Invalid account group [account_group]; ",
                "parameter_required: name is required"
            )
        );
    }

    #[test]
    fn non_object_reply_yields_empty_envelope() {
        let envelope = Envelope::inspect(&json!([1, 2, 3]));
        assert!(envelope.pagination.is_none());
        assert!(envelope.errors.is_empty());
    }

    #[test]
    fn failure_becomes_error_flagged_text() {
        let result = tool_result(
            "get_product",
            Err(ClientError::Transport("connection refused".to_owned())),
        )
        .expect("tool result");
        assert_eq!(result.is_error, Some(true));
        let text = result.content[0]
            .as_text()
            .map(|t| t.text.clone())
            .expect("text content");
        assert_eq!(
            text,
            "Error executing get_product: request failed: connection refused"
        );
    }

    #[test]
    fn success_is_pretty_printed_json() {
        let result = tool_result("get_product", Ok(json!({"id": "p-1"}))).expect("tool result");
        assert_eq!(result.is_error, Some(false));
        let text = result.content[0]
            .as_text()
            .map(|t| t.text.clone())
            .expect("text content");
        assert_eq!(text, "{\n  \"id\": \"p-1\"\n}");
    }
}
