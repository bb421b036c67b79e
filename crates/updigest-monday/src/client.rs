//! HTTP client for the monday.com GraphQL API.
//!
//! Wraps `reqwest` with monday-specific authentication, the board-updates
//! query, and typed response deserialization. GraphQL-level failures (an
//! `errors` array or an `error_message` field in an otherwise 2xx response)
//! surface as [`MondayError::ApiError`].

use std::time::Duration;

use reqwest::{header, Client, Url};

use crate::error::MondayError;
use crate::types::{BoardItem, BoardsData, GraphqlResponse};

const DEFAULT_BASE_URL: &str = "https://api.monday.com/v2";

/// Client for the monday.com GraphQL API.
///
/// Use [`MondayClient::new`] for production or [`MondayClient::with_base_url`]
/// to point at a mock server in tests.
pub struct MondayClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl MondayClient {
    /// Creates a new client pointed at the production monday.com API.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, MondayError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MondayError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, MondayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| MondayError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches up to `limit` items of a board, each with its update posts.
    ///
    /// Only the first page is requested; boards with more than `limit`
    /// items are silently cut off.
    ///
    /// # Errors
    ///
    /// - [`MondayError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MondayError::ApiError`] if the GraphQL response reports errors.
    /// - [`MondayError::BoardNotFound`] if no board is returned.
    /// - [`MondayError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_board_items(
        &self,
        board_id: u64,
        limit: u32,
    ) -> Result<Vec<BoardItem>, MondayError> {
        let query = Self::board_updates_query(board_id, limit);
        let body = self.request_json(&query).await?;
        Self::check_api_error(&body)?;

        let envelope: GraphqlResponse<BoardsData> =
            serde_json::from_value(body).map_err(|e| MondayError::Deserialize {
                context: format!("boards(ids: {board_id})"),
                source: e,
            })?;

        let board = envelope
            .data
            .boards
            .into_iter()
            .next()
            .ok_or(MondayError::BoardNotFound(board_id))?;

        let items = board.items_page.items;
        tracing::info!(board_id, items = items.len(), "fetched board items");
        Ok(items)
    }

    /// Builds the GraphQL query for a board's items and their updates.
    fn board_updates_query(board_id: u64, limit: u32) -> String {
        format!(
            "{{ boards(ids: {board_id}) {{ items_page(limit: {limit}) {{ items {{ \
             id name updates {{ id body created_at creator {{ id name photo_small }} }} \
             }} }} }} }}"
        )
    }

    /// POSTs a GraphQL query, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::Http`] on network failure or a non-2xx status.
    /// Returns [`MondayError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, query: &str) -> Result<serde_json::Value, MondayError> {
        let response = self
            .client
            .post(self.base_url.clone())
            .header(header::AUTHORIZATION, &self.api_key)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| MondayError::Deserialize {
            context: self.base_url.to_string(),
            source: e,
        })
    }

    /// Maps a GraphQL `errors` array or `error_message` field to an error.
    fn check_api_error(body: &serde_json::Value) -> Result<(), MondayError> {
        if let Some(errors) = body.get("errors").and_then(serde_json::Value::as_array) {
            if !errors.is_empty() {
                let msg = errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(serde_json::Value::as_str))
                    .collect::<Vec<_>>()
                    .join("; ");
                let msg = if msg.is_empty() {
                    "unknown error".to_string()
                } else {
                    msg
                };
                return Err(MondayError::ApiError(msg));
            }
        }

        if let Some(msg) = body.get("error_message").and_then(serde_json::Value::as_str) {
            return Err(MondayError::ApiError(msg.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
