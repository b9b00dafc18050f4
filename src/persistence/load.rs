//! Load: map a fetched exhibition back into a document.

use tracing::debug;
use uuid::Uuid;

use crate::api::types::{BlockItemPublic, BlockPublic, ExhibitionPublic};
use crate::api::{ApiClient, ApiError};
use crate::model::{Block, BlockId, BlockKind, BlockSettings, Document, ImageRef, Item, ItemId};
use crate::session::SecureString;

/// Fetch exhibition `id` and hydrate it into a document.
pub async fn load_exhibition(
    client: &ApiClient,
    id: Uuid,
    token: &SecureString,
) -> Result<Document, ApiError> {
    let exhibition = client.get_exhibition(id, token).await?;
    let document = document_from_response(&exhibition, client.base_url());
    debug!(
        exhibition_id = %id,
        blocks = document.blocks.len(),
        "exhibition loaded"
    );
    Ok(document)
}

/// Build a document from a backend exhibition.
///
/// Blocks are ordered stably by their backend position (a missing position
/// counts as the array index) and then renumbered densely. Items follow the
/// same rule within a block. Object keys resolve to URLs under `base_url`.
pub fn document_from_response(exhibition: &ExhibitionPublic, base_url: &str) -> Document {
    let mut blocks: Vec<(i64, Block)> = exhibition
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            (
                block.position.unwrap_or(index as i64),
                block_from_response(block, base_url),
            )
        })
        .collect();
    blocks.sort_by_key(|(position, _)| *position);

    let mut document = Document {
        id: Some(exhibition.id),
        title: exhibition.title.clone(),
        description: exhibition.description.clone().unwrap_or_default(),
        organization: exhibition
            .organization
            .as_ref()
            .map(|org| org.name.clone())
            .unwrap_or_default(),
        team: String::new(),
        tags: exhibition.tags.clone(),
        cover: remote_image(exhibition.cover_image_key.as_deref(), base_url),
        blocks: blocks.into_iter().map(|(_, block)| block).collect(),
    };
    document.renumber();
    document
}

fn block_from_response(block: &BlockPublic, base_url: &str) -> Block {
    let kind = BlockKind::parse(&block.block_type);
    let settings = match &block.settings {
        Some(value) => BlockSettings::from_json(&kind, value),
        None => BlockSettings::default_for(&kind),
    };

    let mut items: Vec<(i64, Item)> = block
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            (
                item.position.unwrap_or(index as i64),
                item_from_response(item, base_url),
            )
        })
        .collect();
    items.sort_by_key(|(position, _)| *position);

    Block {
        id: block
            .id
            .map(|id| BlockId::new(id.to_string()))
            .unwrap_or_else(BlockId::generate),
        kind,
        position: 0,
        content: block.content.clone(),
        settings,
        items: items.into_iter().map(|(_, item)| item).collect(),
    }
}

fn item_from_response(item: &BlockItemPublic, base_url: &str) -> Item {
    Item {
        id: item
            .id
            .map(|id| ItemId::new(id.to_string()))
            .unwrap_or_else(ItemId::generate),
        image: remote_image(item.image_key.as_deref(), base_url),
        text: item.text.clone(),
    }
}

fn remote_image(key: Option<&str>, base_url: &str) -> Option<ImageRef> {
    key.filter(|key| !key.is_empty())
        .map(|key| ImageRef::remote(base_url, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuoteSettings;
    use serde_json::json;

    const BASE: &str = "http://museum.test";

    fn exhibition(value: serde_json::Value) -> ExhibitionPublic {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn blocks_are_sorted_by_position_and_renumbered() {
        let id = Uuid::new_v4();
        let response = exhibition(json!({
            "id": id,
            "title": "Bronze Age",
            "blocks": [
                {"type": "TEXT", "content": "c", "position": 2},
                {"type": "HEADER", "content": "a", "position": 0},
                {"type": "QUOTE", "content": "b", "position": 1}
            ]
        }));

        let document = document_from_response(&response, BASE);

        assert_eq!(document.id, Some(id));
        let contents: Vec<_> = document
            .blocks
            .iter()
            .map(|b| b.content.as_deref().unwrap())
            .collect();
        assert_eq!(contents, ["a", "b", "c"]);
        assert!(document.positions_are_dense());
    }

    #[test]
    fn missing_position_uses_array_index_and_sort_is_stable() {
        let response = exhibition(json!({
            "id": Uuid::new_v4(),
            "title": "t",
            "blocks": [
                {"type": "TEXT", "content": "first"},
                {"type": "TEXT", "content": "second", "position": 0},
                {"type": "TEXT", "content": "third"}
            ]
        }));

        let document = document_from_response(&response, BASE);
        let contents: Vec<_> = document
            .blocks
            .iter()
            .map(|b| b.content.as_deref().unwrap())
            .collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }

    #[test]
    fn cover_and_item_keys_become_urls() {
        let response = exhibition(json!({
            "id": Uuid::new_v4(),
            "title": "t",
            "cover_image_key": "exhibitions/cover.png",
            "blocks": [{
                "type": "IMAGES_GRID_2",
                "items": [
                    {"position": 1, "image_key": "exhibitions/b.png"},
                    {"position": 0, "image_key": "exhibitions/a.png", "text": "A"}
                ]
            }]
        }));

        let document = document_from_response(&response, BASE);

        assert_eq!(
            document.cover.as_ref().map(ImageRef::display_url),
            Some("http://museum.test/api/v1/files/exhibitions/cover.png")
        );
        let items = &document.blocks[0].items;
        assert_eq!(items[0].text.as_deref(), Some("A"));
        assert_eq!(
            items[0].image.as_ref().and_then(ImageRef::object_key),
            Some("exhibitions/a.png")
        );
        assert_eq!(
            items[1].image.as_ref().and_then(ImageRef::object_key),
            Some("exhibitions/b.png")
        );
    }

    #[test]
    fn absent_fields_default() {
        let response = exhibition(json!({
            "id": Uuid::new_v4(),
            "title": "t",
            "cover_image_key": "",
            "blocks": [{"type": "QUOTE"}]
        }));

        let document = document_from_response(&response, BASE);

        assert_eq!(document.cover, None);
        assert_eq!(document.description, "");
        let block = &document.blocks[0];
        assert_eq!(block.content, None);
        assert_eq!(block.settings, BlockSettings::Quote(QuoteSettings::default()));
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let response = exhibition(json!({
            "id": Uuid::new_v4(),
            "title": "t",
            "organization": {"id": Uuid::new_v4(), "name": "City Museum"},
            "blocks": [{"type": "PANORAMA", "settings": {"fov": 90}}]
        }));

        let document = document_from_response(&response, BASE);
        assert_eq!(document.organization, "City Museum");
        assert_eq!(
            document.blocks[0].kind,
            BlockKind::Unknown("PANORAMA".into())
        );
        assert_eq!(document.blocks[0].settings, BlockSettings::Empty);
    }
}
