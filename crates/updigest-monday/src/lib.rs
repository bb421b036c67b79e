//! Client for the monday.com GraphQL API.
//!
//! Fetches the items of one board together with their update posts and
//! flattens them into [`updigest_core::Update`] records for the reporting
//! window.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::MondayClient;
pub use error::MondayError;
pub use normalize::{extract_updates, ExtractOptions};
pub use types::{BoardItem, Creator, ItemUpdate};
