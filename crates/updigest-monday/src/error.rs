use thiserror::Error;

/// Errors returned by the monday.com API client.
#[derive(Debug, Error)]
pub enum MondayError {
    /// Network or TLS failure, or a non-2xx status, from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The GraphQL endpoint answered with an `errors` array or an
    /// `error_message` field.
    #[error("monday.com API error: {0}")]
    ApiError(String),

    /// The query succeeded but returned no board for the requested id.
    #[error("board {0} not found or not accessible")]
    BoardNotFound(u64),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
