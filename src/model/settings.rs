//! Typed per-kind block settings.
//!
//! The backend stores settings as an open JSON object. Each kind family gets
//! a record of optional fields here; unrecognised keys are ignored on read
//! and absent fields are defaulted by the renderers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::kind::BlockKind;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl QuoteSettings {
    fn merged(self, patch: Self) -> Self {
        Self {
            author: patch.author.or(self.author),
        }
    }
}

/// Text halves of the image/text layouts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_text: Option<String>,
}

impl LayoutSettings {
    fn merged(self, patch: Self) -> Self {
        Self {
            left_text: patch.left_text.or(self.left_text),
            right_text: patch.right_text.or(self.right_text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    /// Slide interval in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
}

impl CarouselSettings {
    pub const DEFAULT_VARIANT: &'static str = "default";
    pub const DEFAULT_SPEED_MS: u32 = 3000;

    pub fn variant(&self) -> &str {
        self.variant.as_deref().unwrap_or(Self::DEFAULT_VARIANT)
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay.unwrap_or(false)
    }

    /// Slide interval in milliseconds.
    pub fn speed(&self) -> u32 {
        self.speed.unwrap_or(Self::DEFAULT_SPEED_MS)
    }

    fn merged(self, patch: Self) -> Self {
        Self {
            variant: patch.variant.or(self.variant),
            autoplay: patch.autoplay.or(self.autoplay),
            speed: patch.speed.or(self.speed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
}

impl VideoSettings {
    fn merged(self, patch: Self) -> Self {
        Self {
            url: patch.url.or(self.url),
            autoplay: patch.autoplay.or(self.autoplay),
        }
    }
}

/// Settings of a block, one variant per kind family.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlockSettings {
    /// Kinds without settings (and unknown kinds).
    #[default]
    Empty,
    Quote(QuoteSettings),
    Layout(LayoutSettings),
    Carousel(CarouselSettings),
    Video(VideoSettings),
}

impl BlockSettings {
    /// Empty settings record matching `kind`.
    pub fn default_for(kind: &BlockKind) -> Self {
        match kind {
            BlockKind::Quote => Self::Quote(QuoteSettings::default()),
            BlockKind::ImageText | BlockKind::TextImage | BlockKind::ImagesText => {
                Self::Layout(LayoutSettings::default())
            }
            BlockKind::Carousel => Self::Carousel(CarouselSettings::default()),
            BlockKind::Video => Self::Video(VideoSettings::default()),
            _ => Self::Empty,
        }
    }

    /// Read backend settings for `kind`. Unknown keys are ignored and a
    /// malformed object falls back to the defaults for that kind.
    pub fn from_json(kind: &BlockKind, value: &Value) -> Self {
        match Self::default_for(kind) {
            Self::Empty => Self::Empty,
            Self::Quote(_) => Self::Quote(lenient(value)),
            Self::Layout(_) => Self::Layout(lenient(value)),
            Self::Carousel(_) => Self::Carousel(lenient(value)),
            Self::Video(_) => Self::Video(lenient(value)),
        }
    }

    /// Settings object sent to the backend. Unset fields are omitted.
    pub fn to_json(&self) -> Value {
        let value = match self {
            Self::Empty => Ok(Value::Object(Map::new())),
            Self::Quote(s) => serde_json::to_value(s),
            Self::Layout(s) => serde_json::to_value(s),
            Self::Carousel(s) => serde_json::to_value(s),
            Self::Video(s) => serde_json::to_value(s),
        };
        value.unwrap_or_else(|_| Value::Object(Map::new()))
    }

    /// Merge `patch` into these settings field by field.
    ///
    /// Fields set in the patch win; fields the patch leaves unset keep their
    /// current value. A patch of a different family replaces the settings.
    pub fn merge(self, patch: BlockSettings) -> BlockSettings {
        match (self, patch) {
            (Self::Quote(a), Self::Quote(b)) => Self::Quote(a.merged(b)),
            (Self::Layout(a), Self::Layout(b)) => Self::Layout(a.merged(b)),
            (Self::Carousel(a), Self::Carousel(b)) => Self::Carousel(a.merged(b)),
            (Self::Video(a), Self::Video(b)) => Self::Video(a.merged(b)),
            (current, Self::Empty) => current,
            (_, patch) => patch,
        }
    }
}

fn lenient<T: DeserializeOwned + Default>(value: &Value) -> T {
    match value {
        Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
        _ => T::default(),
    }
}
