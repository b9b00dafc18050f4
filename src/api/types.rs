//! Wire types of the exhibition backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// List endpoints answer either `{"data": [...], "count": n}` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged { data: Vec<T> },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Paged { data, .. } => data,
            Listing::Plain(items) => items,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRegister {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Profile of the logged-in user. Keys this client does not know are kept
/// so an update sends them back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(alias = "key")]
    pub object_key: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhibitionCreate {
    pub title: String,
    pub description: String,
    pub cover_image_key: Option<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub cover_type: String,
    pub date_template: String,
    pub start_year: i32,
    pub end_year: i32,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExhibitionPublic {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image_key: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub organization: Option<OrganizationSummary>,
    #[serde(default)]
    pub blocks: Vec<BlockPublic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockCreate {
    #[serde(rename = "type")]
    pub block_type: String,
    pub content: Option<String>,
    pub settings: Value,
    pub position: usize,
    pub items: Vec<BlockItemCreate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockItemCreate {
    pub position: usize,
    pub text: Option<String>,
    pub image_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockPublic {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub settings: Option<Value>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub items: Vec<BlockItemPublic>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockItemPublic {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_key: Option<String>,
}

/// Create or full update of a standalone exhibit.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExhibitPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExhibitPublic {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationMembership {
    pub organization: OrganizationSummary,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message: String,
}
