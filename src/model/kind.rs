use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kinds of content block an exhibition can hold.
///
/// The wire tag (`as_str()`) is what the backend stores in a block's `type`
/// field. Tags this client does not recognise are kept as `Unknown` so a
/// loaded exhibition never fails to parse; such blocks are skipped when
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Header,
    Text,
    Quote,
    ImageUpload,
    ImagesGrid2,
    ImagesGrid3,
    ImagesGrid4,
    /// Image on the left, text on the right.
    ImageText,
    /// Text on the left, image on the right.
    TextImage,
    /// Two images framing a text column.
    ImagesText,
    Carousel,
    /// Before/after comparison of two images.
    Slider,
    Video,
    Unknown(String),
}

static KNOWN_KINDS: [BlockKind; 13] = [
    BlockKind::Header,
    BlockKind::Text,
    BlockKind::Quote,
    BlockKind::ImageUpload,
    BlockKind::ImagesGrid2,
    BlockKind::ImagesGrid3,
    BlockKind::ImagesGrid4,
    BlockKind::ImageText,
    BlockKind::TextImage,
    BlockKind::ImagesText,
    BlockKind::Carousel,
    BlockKind::Slider,
    BlockKind::Video,
];

impl BlockKind {
    /// Stable wire tag. Once published, do not rename.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Header => "HEADER",
            Self::Text => "TEXT",
            Self::Quote => "QUOTE",
            Self::ImageUpload => "IMAGE_UPLOAD",
            Self::ImagesGrid2 => "IMAGES_GRID_2",
            Self::ImagesGrid3 => "IMAGES_GRID_3",
            Self::ImagesGrid4 => "IMAGES_GRID_4",
            Self::ImageText => "IMAGE_TEXT",
            Self::TextImage => "TEXT_IMAGE",
            Self::ImagesText => "IMAGES_TEXT",
            Self::Carousel => "CAROUSEL",
            Self::Slider => "SLIDER",
            Self::Video => "VIDEO",
            Self::Unknown(tag) => tag,
        }
    }

    /// Parse a wire tag. Matching is case-insensitive; unrecognised tags
    /// become `Unknown` (forward compat).
    pub fn parse(tag: &str) -> Self {
        KNOWN_KINDS
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
            .cloned()
            .unwrap_or_else(|| Self::Unknown(tag.to_string()))
    }

    /// All kinds the constructor can create.
    pub fn known() -> &'static [BlockKind] {
        &KNOWN_KINDS
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Number of blank item slots a fresh block of this kind starts with.
    pub fn default_item_count(&self) -> usize {
        match self {
            Self::ImageUpload | Self::ImageText | Self::TextImage => 1,
            Self::ImagesGrid2 | Self::ImagesText | Self::Slider => 2,
            Self::ImagesGrid3 => 3,
            Self::ImagesGrid4 => 4,
            Self::Header
            | Self::Text
            | Self::Quote
            | Self::Carousel
            | Self::Video
            | Self::Unknown(_) => 0,
        }
    }

    /// Human label used by renderers and the CLI.
    pub fn label(&self) -> &str {
        match self {
            Self::Header => "Header",
            Self::Text => "Text",
            Self::Quote => "Quote",
            Self::ImageUpload => "Image",
            Self::ImagesGrid2 => "Grid of 2 images",
            Self::ImagesGrid3 => "Grid of 3 images",
            Self::ImagesGrid4 => "Grid of 4 images",
            Self::ImageText => "Image + text",
            Self::TextImage => "Text + image",
            Self::ImagesText => "Images + text",
            Self::Carousel => "Carousel",
            Self::Slider => "Before/after slider",
            Self::Video => "Video",
            Self::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlockKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}
