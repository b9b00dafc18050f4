//! Block dispatch: each kind projects to a `Text` body and, when editable,
//! the editing intents it offers.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use tracing::debug;

use crate::model::{Block, BlockId, BlockKind, BlockSettings, Document, ImageRef, Item};
use crate::ui::editor::{EditorIntent, MoveDirection};

use super::theme::{ACCENT, ACTION, BODY_TEXT, IMAGE_LINK, MUTED, STAGED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Authoring view with editing actions.
    Editable,
    /// Public view, no actions.
    ReadOnly,
}

/// Where a block sits in its document, for boundary-aware actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub mode: RenderMode,
    pub is_first: bool,
    pub is_last: bool,
}

impl RenderContext {
    pub fn read_only() -> Self {
        Self {
            mode: RenderMode::ReadOnly,
            is_first: true,
            is_last: true,
        }
    }

    /// Context of block `index` in a document of `len` blocks.
    pub fn at(mode: RenderMode, index: usize, len: usize) -> Self {
        Self {
            mode,
            is_first: index == 0,
            is_last: index + 1 >= len,
        }
    }
}

/// An editing action offered next to a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    MoveUp,
    MoveDown,
    Remove,
    AttachImage { slot: usize },
    DetachImage { slot: usize },
}

impl BlockAction {
    pub fn label(&self) -> String {
        match self {
            BlockAction::MoveUp => "Move up".to_string(),
            BlockAction::MoveDown => "Move down".to_string(),
            BlockAction::Remove => "Remove".to_string(),
            BlockAction::AttachImage { slot } => format!("Attach image {}", slot + 1),
            BlockAction::DetachImage { slot } => format!("Remove image {}", slot + 1),
        }
    }

    /// Editing intent for this action on `block_id`. Attaching needs the
    /// picked image; without one there is nothing to dispatch.
    pub fn to_intent(&self, block_id: &BlockId, image: Option<ImageRef>) -> Option<EditorIntent> {
        let id = block_id.clone();
        match *self {
            BlockAction::MoveUp => Some(EditorIntent::MoveBlock {
                id,
                direction: MoveDirection::Up,
            }),
            BlockAction::MoveDown => Some(EditorIntent::MoveBlock {
                id,
                direction: MoveDirection::Down,
            }),
            BlockAction::Remove => Some(EditorIntent::RemoveBlock { id }),
            BlockAction::AttachImage { slot } => image.map(|image| EditorIntent::AttachImage {
                block_id: id,
                item_index: slot,
                image,
            }),
            BlockAction::DetachImage { slot } => Some(EditorIntent::DetachImage {
                block_id: id,
                item_index: slot,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    pub id: BlockId,
    pub kind: BlockKind,
    pub body: Text<'static>,
    pub actions: Vec<BlockAction>,
}

/// Project one block. Unknown kinds are skipped.
pub fn render_block(block: &Block, context: RenderContext) -> Option<RenderedBlock> {
    let body = match &block.kind {
        BlockKind::Header => header_body(block),
        BlockKind::Text => text_body(block),
        BlockKind::Quote => quote_body(block),
        BlockKind::ImageUpload
        | BlockKind::ImagesGrid2
        | BlockKind::ImagesGrid3
        | BlockKind::ImagesGrid4 => images_body(block),
        BlockKind::ImageText | BlockKind::TextImage | BlockKind::ImagesText => layout_body(block),
        BlockKind::Carousel | BlockKind::Slider => carousel_body(block),
        BlockKind::Video => video_body(block),
        BlockKind::Unknown(tag) => {
            debug!(block_id = %block.id, tag = %tag, "skipping block of unknown kind");
            return None;
        }
    };

    let actions = match context.mode {
        RenderMode::Editable => editable_actions(block, context),
        RenderMode::ReadOnly => Vec::new(),
    };

    Some(RenderedBlock {
        id: block.id.clone(),
        kind: block.kind.clone(),
        body,
        actions,
    })
}

/// Project every block of `document` in order.
pub fn render_document(document: &Document, mode: RenderMode) -> Vec<RenderedBlock> {
    let len = document.blocks.len();
    document
        .blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| render_block(block, RenderContext::at(mode, index, len)))
        .collect()
}

/// Title, description, tags and cover of a document.
pub fn render_header(document: &Document) -> Text<'static> {
    let mut lines = vec![Line::from(Span::styled(
        document.title.clone(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))];
    if !document.organization.is_empty() {
        lines.push(muted(format!("by {}", document.organization)));
    }
    if !document.description.is_empty() {
        lines.extend(paragraph(&document.description));
    }
    if !document.tags.is_empty() {
        lines.push(muted(format!("tags: {}", document.tags.join(", "))));
    }
    if let Some(cover) = &document.cover {
        lines.push(image_line("cover", Some(cover)));
    }
    Text::from(lines)
}

/// Flatten rendered blocks to plain text, one blank line between blocks.
/// Actions, if any, follow each block on a single line.
pub fn to_plain_text(blocks: &[RenderedBlock]) -> String {
    blocks
        .iter()
        .map(|block| {
            let mut out = text_to_string(&block.body);
            if !block.actions.is_empty() {
                let labels: Vec<String> = block.actions.iter().map(BlockAction::label).collect();
                out.push_str(&format!("\n  [{}]", labels.join(" | ")));
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn text_to_string(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn editable_actions(block: &Block, context: RenderContext) -> Vec<BlockAction> {
    let mut actions = Vec::new();
    if !context.is_first {
        actions.push(BlockAction::MoveUp);
    }
    if !context.is_last {
        actions.push(BlockAction::MoveDown);
    }
    actions.push(BlockAction::Remove);

    for (slot, item) in block.items.iter().enumerate() {
        match item.image {
            Some(_) => actions.push(BlockAction::DetachImage { slot }),
            None => actions.push(BlockAction::AttachImage { slot }),
        }
    }
    // Carousels grow one slot at a time.
    if matches!(block.kind, BlockKind::Carousel) {
        actions.push(BlockAction::AttachImage {
            slot: block.items.len(),
        });
    }
    actions
}

fn header_body(block: &Block) -> Text<'static> {
    Text::from(Line::from(Span::styled(
        block.content.clone().unwrap_or_default(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )))
}

fn text_body(block: &Block) -> Text<'static> {
    Text::from(paragraph(block.content.as_deref().unwrap_or_default()))
}

fn quote_body(block: &Block) -> Text<'static> {
    let style = Style::default().fg(BODY_TEXT).add_modifier(Modifier::ITALIC);
    let mut lines: Vec<Line<'static>> = block
        .content
        .as_deref()
        .unwrap_or_default()
        .lines()
        .map(|line| Line::from(Span::styled(format!("> {}", line), style)))
        .collect();
    if let BlockSettings::Quote(settings) = &block.settings {
        if let Some(author) = settings.author.as_deref().filter(|a| !a.is_empty()) {
            lines.push(muted(format!("  - {}", author)));
        }
    }
    Text::from(lines)
}

fn images_body(block: &Block) -> Text<'static> {
    Text::from(item_lines(&block.items))
}

fn layout_body(block: &Block) -> Text<'static> {
    let mut lines = Vec::new();
    let text = paragraph(block.content.as_deref().unwrap_or_default());
    match block.kind {
        BlockKind::TextImage => {
            lines.extend(text);
            lines.extend(item_lines(&block.items));
        }
        _ => {
            lines.extend(item_lines(&block.items));
            lines.extend(text);
        }
    }
    if let BlockSettings::Layout(settings) = &block.settings {
        if let Some(left) = settings.left_text.as_deref().filter(|t| !t.is_empty()) {
            lines.push(muted(format!("left: {}", left)));
        }
        if let Some(right) = settings.right_text.as_deref().filter(|t| !t.is_empty()) {
            lines.push(muted(format!("right: {}", right)));
        }
    }
    Text::from(lines)
}

fn carousel_body(block: &Block) -> Text<'static> {
    let mut lines = Vec::new();
    let summary = match &block.settings {
        BlockSettings::Carousel(settings) => format!(
            "{} ({}, autoplay {}, {} ms)",
            block.kind.label(),
            settings.variant(),
            if settings.autoplay() { "on" } else { "off" },
            settings.speed()
        ),
        _ => block.kind.label().to_string(),
    };
    lines.push(muted(summary));
    lines.extend(item_lines(&block.items));
    Text::from(lines)
}

fn video_body(block: &Block) -> Text<'static> {
    let url = match &block.settings {
        BlockSettings::Video(settings) => settings.url.clone(),
        _ => None,
    }
    .or_else(|| block.content.clone())
    .unwrap_or_default();

    Text::from(Line::from(vec![
        Span::styled("video: ", Style::default().fg(MUTED)),
        Span::styled(url, Style::default().fg(IMAGE_LINK)),
    ]))
}

fn item_lines(items: &[Item]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (slot, item) in items.iter().enumerate() {
        lines.push(image_line(&format!("{}", slot + 1), item.image.as_ref()));
        if let Some(text) = item.text.as_deref().filter(|t| !t.is_empty()) {
            lines.push(Line::from(Span::styled(
                format!("    {}", text),
                Style::default().fg(BODY_TEXT),
            )));
        }
    }
    lines
}

fn image_line(label: &str, image: Option<&ImageRef>) -> Line<'static> {
    let target = match image {
        Some(ImageRef::Remote { url, .. }) => {
            Span::styled(url.clone(), Style::default().fg(IMAGE_LINK))
        }
        Some(ImageRef::Staged(staged)) => Span::styled(
            format!("pending upload ({})", staged.mime_type()),
            Style::default().fg(STAGED),
        ),
        None => Span::styled("empty", Style::default().fg(MUTED)),
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", label), Style::default().fg(ACTION)),
        target,
    ])
}

fn paragraph(text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(BODY_TEXT))))
        .collect()
}

fn muted(text: String) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(MUTED)))
}
