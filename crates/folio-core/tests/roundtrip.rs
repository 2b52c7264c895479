mod common;

use common::util_fs;
use folio_core::model::{
    Block, BlockData, BlockDocument, ChecklistData, ChecklistItem, CodeData, EmbedData, Extra,
    ImageData, ListData, ListStyle, QuoteData, TableData,
};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn fixtures_round_trip_structurally() {
    for name in ["document.json", "showcase.json"] {
        let json = util_fs::read_fixture(name);
        let doc: BlockDocument = serde_json::from_str(&json).expect("fixture must parse");
        let again: BlockDocument =
            serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
        assert_eq!(doc, again, "{name} must round-trip");
    }
}

#[test]
fn empty_document_round_trips_with_empty_array() {
    let doc = BlockDocument::default();
    let s = serde_json::to_string(&doc).unwrap();
    assert_eq!(s, r#"{"blocks":[]}"#);
    assert_eq!(serde_json::from_str::<BlockDocument>(&s).unwrap(), doc);
}

#[test]
fn canonical_document_reserializes_to_the_stored_json() {
    let stored: serde_json::Value =
        serde_json::from_str(&util_fs::read_fixture("document.json")).unwrap();
    let doc: BlockDocument = serde_json::from_value(stored.clone()).unwrap();
    assert_eq!(serde_json::to_value(&doc).unwrap(), stored);
}

#[test]
fn showcase_is_stable_after_one_write() {
    // Stores one embed under the legacy `embed` key.
    let doc: BlockDocument =
        serde_json::from_str(&util_fs::read_fixture("showcase.json")).unwrap();
    let first = serde_json::to_value(&doc).unwrap();
    let reread: BlockDocument = serde_json::from_value(first.clone()).unwrap();
    assert_eq!(serde_json::to_value(&reread).unwrap(), first);
}

#[test]
fn accepted_input_forms_normalize_once_then_stay_put() {
    let cases = [
        (json!({"type": "delimiter"}), json!({"type": "delimiter", "data": {}})),
        (
            json!({"type": "delimiter", "data": null}),
            json!({"type": "delimiter", "data": {}}),
        ),
        (json!({"type": "poll"}), json!({"type": "poll", "data": null})),
        (
            json!({"type": "embed", "data": {"embed": "https://v/1"}}),
            json!({"type": "embed", "data": {"embedUrl": "https://v/1"}}),
        ),
        (
            json!({"type": "quote", "data": {"text": "q", "caption": null}}),
            json!({"type": "quote", "data": {"text": "q"}}),
        ),
        (
            json!({"type": "header", "data": {"text": "h", "level": "3"}}),
            json!({"type": "header", "data": {"text": "h"}}),
        ),
    ];

    for (input, normalized) in cases {
        let block: Block = serde_json::from_value(input.clone()).unwrap();
        let written = serde_json::to_value(&block).unwrap();
        assert_eq!(written, normalized, "first write of {input}");

        let again: Block = serde_json::from_value(written.clone()).unwrap();
        assert_eq!(again, block, "{input}");
        assert_eq!(serde_json::to_value(&again).unwrap(), written, "second write of {input}");
    }
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>/&\"\n]{0,24}"
}

fn block() -> impl Strategy<Value = Block> {
    prop_oneof![
        (text(), proptest::option::of(-2i64..10)).prop_map(|(t, level)| {
            let mut b = Block::header(t, 0);
            if let BlockData::Header(h) = &mut b.data {
                h.level = level;
            }
            b
        }),
        text().prop_map(Block::paragraph),
        (any::<bool>(), proptest::collection::vec(text(), 0..4)).prop_map(|(ordered, items)| {
            Block::new(BlockData::List(ListData {
                style: if ordered { ListStyle::Ordered } else { ListStyle::Unordered },
                items,
                extra: Extra::new(),
            }))
        }),
        proptest::collection::vec((text(), any::<bool>()), 0..4).prop_map(|items| {
            Block::new(BlockData::Checklist(ChecklistData {
                items: items
                    .into_iter()
                    .map(|(text, checked)| ChecklistItem { text, checked, extra: Extra::new() })
                    .collect(),
                extra: Extra::new(),
            }))
        }),
        (text(), proptest::option::of(text())).prop_map(|(text, caption)| {
            Block::new(BlockData::Quote(QuoteData { text, caption, extra: Extra::new() }))
        }),
        text().prop_map(|code| Block::new(BlockData::Code(CodeData { code, extra: Extra::new() }))),
        proptest::collection::vec(proptest::collection::vec(text(), 0..3), 0..3).prop_map(|content| {
            Block::new(BlockData::Table(TableData { content, with_headings: None, extra: Extra::new() }))
        }),
        proptest::option::of(text()).prop_map(|embed_url| {
            Block::new(BlockData::Embed(EmbedData { embed_url, caption: None, extra: Extra::new() }))
        }),
        (proptest::option::of(text()), proptest::option::of(text())).prop_map(|(file_url, caption)| {
            Block::new(BlockData::Image(ImageData { file_url, file: None, caption, extra: Extra::new() }))
        }),
        Just(Block::delimiter()),
        ("[a-z]{3,10}", text()).prop_map(|(kind, t)| {
            serde_json::from_value(serde_json::json!({"type": format!("x-{kind}"), "data": {"t": t}}))
                .unwrap()
        }),
    ]
}

proptest! {
    #[test]
    fn serialize_then_deserialize_is_identity(
        blocks in proptest::collection::vec(block(), 0..8),
        time in proptest::option::of(any::<i64>()),
        version in proptest::option::of("[0-9]\\.[0-9]{1,2}\\.[0-9]"),
    ) {
        let doc = BlockDocument {
            created_at_epoch_millis: time,
            blocks,
            format_version: version.map(Into::into),
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: BlockDocument = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, doc);
    }
}
