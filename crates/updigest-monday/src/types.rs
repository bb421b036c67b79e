//! monday.com GraphQL response types.
//!
//! Only the fields requested by the board-updates query are modelled. The API
//! wraps every successful response in `{"data": {...}}`; [`GraphqlResponse`]
//! captures that envelope.

use serde::{Deserialize, Deserializer};

/// Top-level envelope: `{ "data": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: T,
}

/// `data` for the board query: `{ "boards": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct BoardsData {
    pub boards: Vec<Board>,
}

#[derive(Debug, Deserialize)]
pub struct Board {
    pub items_page: ItemsPage,
}

#[derive(Debug, Deserialize)]
pub struct ItemsPage {
    pub items: Vec<BoardItem>,
}

/// One board item (a company record).
#[derive(Debug, Clone, Deserialize)]
pub struct BoardItem {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub updates: Option<Vec<ItemUpdate>>,
}

/// An update post attached to an item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemUpdate {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub body: Option<String>,
    /// ISO-8601 timestamp, e.g. `"2025-05-02T09:15:00Z"`.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub creator: Option<Creator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo_small: Option<String>,
}

/// GraphQL `ID` values arrive as strings, but some endpoints emit plain
/// numbers. Accept both.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
