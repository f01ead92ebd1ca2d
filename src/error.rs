//! Error types for configuration and upstream API calls.

use thiserror::Error;

/// Errors raised while talking to the Siigo API or shaping a request for it.
///
/// Structured upstream errors (a non-2xx reply carrying a JSON body) are not
/// represented here: they are returned to the caller as data so their codes
/// survive.
#[derive(Debug, Error)]
pub(crate) enum ClientError {
    /// The credential exchange failed.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The request never produced a response (timeout, DNS, connection reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// Upstream answered with something that is neither success JSON nor a
    /// structured error body.
    #[error("unexpected response (HTTP {status}): {body}")]
    UnexpectedResponse {
        /// HTTP status code.
        status: u16,
        /// Raw response body or parse failure detail.
        body: String,
    },

    /// Tool arguments could not be turned into a request.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// No operation descriptor is registered under this name.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
}

impl ClientError {
    /// Builds a [`ClientError::Transport`] keeping the whole source chain,
    /// since `reqwest` hides the root cause behind a generic top-level message.
    pub(crate) fn transport(err: &reqwest::Error) -> Self {
        Self::Transport(error_chain(err))
    }
}

/// Joins an error and all of its sources with `": "`.
pub(crate) fn error_chain(err: &dyn core::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Startup configuration errors. Any of these is fatal.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    /// The partner identifier does not satisfy the upstream format.
    #[error("SIIGO_PARTNER_ID must be 3-100 alphanumeric characters, got '{0}'")]
    InvalidPartnerId(String),

    /// The base URL is not an http(s) URL.
    #[error("SIIGO_API_URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
#[allow(
    clippy::missing_docs_in_private_items,
    reason = "test code does not need docs"
)]
mod tests {
    use super::{ClientError, ConfigError, error_chain};

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Root;

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct Outer(#[source] Root);

    #[test]
    fn chain_includes_root_cause() {
        assert_eq!(
            error_chain(&Outer(Root)),
            "error sending request: connection refused"
        );
    }

    #[test]
    fn messages_are_readable() {
        let err = ClientError::UnexpectedResponse {
            status: 502,
            body: "Bad Gateway".to_owned(),
        };
        assert_eq!(err.to_string(), "unexpected response (HTTP 502): Bad Gateway");
        assert_eq!(
            ConfigError::Missing("SIIGO_USERNAME").to_string(),
            "SIIGO_USERNAME environment variable is required"
        );
    }
}
