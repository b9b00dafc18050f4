//! Exhibition drafts read from JSON files.
//!
//! ```json
//! {
//!   "title": "Bronze Age",
//!   "tags": ["archaeology"],
//!   "cover": "images/cover.jpg",
//!   "blocks": [
//!     {"type": "HEADER", "content": "Tools"},
//!     {"type": "IMAGES_GRID_2", "items": [{"image": "a.png"}, {"image": "key:exhibits/b.png"}]}
//!   ]
//! }
//! ```
//!
//! Image specs are a `data:` URI, `key:<object key>` for an uploaded image,
//! or a file path relative to the draft. After a publish the backend id is
//! written back as `"id"`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{
    mime_for_extension, BlockInit, BlockKind, BlockSettings, ImageError, ImageRef, Item,
    MetadataPatch, StagedImage,
};
use crate::ui::editor::DocumentEditor;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse draft '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Draft '{0}' is not a JSON object")]
    NotAnObject(PathBuf),

    #[error("Unknown block type '{0}'")]
    UnknownKind(String),

    #[error("Invalid image '{spec}': {source}")]
    Image {
        spec: String,
        #[source]
        source: ImageError,
    },

    #[error("Unsupported image file '{0}'")]
    UnsupportedImage(PathBuf),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Draft {
    /// Backend id once the draft has been published.
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub organization: String,
    pub team: String,
    pub tags: Vec<String>,
    pub cover: Option<String>,
    pub blocks: Vec<DraftBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftBlock {
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub settings: Option<Value>,
    #[serde(default)]
    pub items: Vec<DraftItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftItem {
    pub image: Option<String>,
    pub text: Option<String>,
}

impl Draft {
    pub fn load(path: &Path) -> Result<Self, DraftError> {
        let content = fs::read_to_string(path).map_err(|source| DraftError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DraftError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Store the backend id of a published draft in its file.
    pub fn record_id(path: &Path, id: Uuid) -> Result<(), DraftError> {
        let content = fs::read_to_string(path).map_err(|source| DraftError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut value: Value =
            serde_json::from_str(&content).map_err(|source| DraftError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let Value::Object(fields) = &mut value else {
            return Err(DraftError::NotAnObject(path.to_path_buf()));
        };
        fields.insert("id".to_string(), Value::String(id.to_string()));

        let mut out = serde_json::to_string_pretty(&value).map_err(|source| DraftError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        out.push('\n');
        fs::write(path, out).map_err(|source| DraftError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a document through the editor, block by block.
    ///
    /// Relative image paths resolve against `base_dir`; `key:` images
    /// resolve to URLs under `base_url`.
    pub fn into_editor(
        self,
        base_dir: &Path,
        base_url: &str,
    ) -> Result<DocumentEditor, DraftError> {
        let resolver = ImageResolver { base_dir, base_url };
        let mut editor = DocumentEditor::new();

        let cover = self
            .cover
            .as_deref()
            .map(|spec| resolver.resolve(spec))
            .transpose()?;
        editor.update_metadata(MetadataPatch {
            title: Some(self.title),
            description: Some(self.description),
            organization: Some(self.organization),
            team: Some(self.team),
            tags: Some(self.tags),
            cover: Some(cover),
        });
        if let Some(id) = self.id {
            editor.mark_created(id);
        }

        for block in self.blocks {
            let kind = BlockKind::parse(&block.kind);
            if !kind.is_known() {
                return Err(DraftError::UnknownKind(block.kind));
            }

            let items = block
                .items
                .into_iter()
                .map(|item| {
                    let mut built = Item::blank();
                    built.text = item.text;
                    built.image = item
                        .image
                        .as_deref()
                        .map(|spec| resolver.resolve(spec))
                        .transpose()?;
                    Ok(built)
                })
                .collect::<Result<Vec<_>, DraftError>>()?;

            let settings = block
                .settings
                .as_ref()
                .map(|value| BlockSettings::from_json(&kind, value));

            editor.add_block(
                kind,
                BlockInit {
                    content: block.content,
                    items: (!items.is_empty()).then_some(items),
                    settings,
                },
            );
        }

        Ok(editor)
    }
}

struct ImageResolver<'a> {
    base_dir: &'a Path,
    base_url: &'a str,
}

impl ImageResolver<'_> {
    fn resolve(&self, spec: &str) -> Result<ImageRef, DraftError> {
        if spec.starts_with("data:") {
            return StagedImage::from_data_uri(spec)
                .map(ImageRef::Staged)
                .map_err(|source| DraftError::Image {
                    spec: spec.to_string(),
                    source,
                });
        }
        if let Some(key) = spec.strip_prefix("key:") {
            return Ok(ImageRef::remote(self.base_url, key));
        }

        let path = self.base_dir.join(spec);
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_for_extension)
            .ok_or_else(|| DraftError::UnsupportedImage(path.clone()))?;
        let bytes = fs::read(&path).map_err(|source| DraftError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(ImageRef::Staged(StagedImage::from_bytes(&bytes, mime)))
    }
}
