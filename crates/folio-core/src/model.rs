use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::hash::{ContentHash, HashAlgorithm};
use crate::kind::BlockKind;

/// Fields a payload does not model, kept so stored documents round-trip.
pub type Extra = Map<String, Value>;

/// A rich-text post body: ordered blocks plus editor metadata.
///
/// Wire shape: `{ "time"?, "blocks": [...], "version"? }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockDocument {
    /// Timestamp of the last save in epoch millis. Informational only.
    #[serde(rename = "time", default, skip_serializing_if = "Option::is_none")]
    pub created_at_epoch_millis: Option<i64>,
    pub blocks: Vec<Block>,
    /// Schema version of the originating editor. Never interpreted.
    #[serde(rename = "version", default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<FormatVersion>,
}

impl BlockDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            created_at_epoch_millis: None,
            blocks,
            format_version: None,
        }
    }

    pub fn with_time(mut self, epoch_millis: i64) -> Self {
        self.created_at_epoch_millis = Some(epoch_millis);
        self
    }

    pub fn with_version(mut self, version: impl Into<FormatVersion>) -> Self {
        self.format_version = Some(version.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Hash over `blocks` only; `time` and `version` never contribute.
    pub fn content_hash(&self, algorithm: HashAlgorithm) -> Result<ContentHash, serde_json::Error> {
        ContentHash::of_blocks(&self.blocks, algorithm)
    }

    /// Equality by content: same blocks in the same order, metadata ignored.
    pub fn same_content(&self, other: &BlockDocument) -> bool {
        self.blocks == other.blocks
    }
}

/// Opaque editor schema version: a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatVersion {
    Text(String),
    Number(Number),
}

impl From<&str> for FormatVersion {
    fn from(s: &str) -> Self {
        FormatVersion::Text(s.to_string())
    }
}

impl From<String> for FormatVersion {
    fn from(s: String) -> Self {
        FormatVersion::Text(s)
    }
}

impl From<u64> for FormatVersion {
    fn from(n: u64) -> Self {
        FormatVersion::Number(n.into())
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatVersion::Text(s) => f.write_str(s),
            FormatVersion::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One positional unit of content.
///
/// Wire shape: `{ "id"?, "type": <kind>, "data": {...}, "tunes"? }`. Blocks
/// have no identity beyond their position; `id` and `tunes` are carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "BlockWire")]
pub struct Block {
    pub id: Option<String>,
    pub data: BlockData,
    pub tunes: Option<Value>,
}

impl Block {
    pub fn new(data: BlockData) -> Self {
        Self {
            id: None,
            data,
            tunes: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn header(text: impl Into<String>, level: i64) -> Self {
        Self::new(BlockData::Header(HeaderData {
            text: text.into(),
            level: Some(level),
            extra: Extra::new(),
        }))
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockData::Paragraph(ParagraphData {
            text: text.into(),
            extra: Extra::new(),
        }))
    }

    pub fn delimiter() -> Self {
        Self::new(BlockData::Delimiter(DelimiterData::default()))
    }

    /// The `type` string this block is stored under.
    pub fn kind_name(&self) -> &str {
        self.data.kind_name()
    }

    /// The recognized kind, or `None` for unknown or malformed blocks.
    pub fn kind(&self) -> Option<BlockKind> {
        self.data.kind()
    }
}

/// Block payload, one variant per known kind plus a catch-all.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    Header(HeaderData),
    Paragraph(ParagraphData),
    List(ListData),
    Checklist(ChecklistData),
    Quote(QuoteData),
    Code(CodeData),
    InlineCode(InlineCodeData),
    Marker(MarkerData),
    Delimiter(DelimiterData),
    Table(TableData),
    Embed(EmbedData),
    LinkTool(LinkToolData),
    Image(ImageData),
    /// Unknown kind, or a known kind whose payload did not decode.
    Other(OtherBlock),
}

impl BlockData {
    /// Decode a raw `type` + `data` pair. Never fails: anything that does not
    /// fit a known payload is kept verbatim as [`BlockData::Other`].
    pub fn decode(kind: String, data: Value) -> BlockData {
        let Ok(known) = kind.parse::<BlockKind>() else {
            return BlockData::Other(OtherBlock {
                kind,
                data,
                reason: OtherReason::UnknownKind,
            });
        };

        let payload = match &data {
            Value::Null => Value::Object(Map::new()),
            other => other.clone(),
        };

        let decoded = match known {
            BlockKind::Header => serde_json::from_value(payload).map(BlockData::Header),
            BlockKind::Paragraph => serde_json::from_value(payload).map(BlockData::Paragraph),
            BlockKind::List => serde_json::from_value(payload).map(BlockData::List),
            BlockKind::Checklist => serde_json::from_value(payload).map(BlockData::Checklist),
            BlockKind::Quote => serde_json::from_value(payload).map(BlockData::Quote),
            BlockKind::Code => serde_json::from_value(payload).map(BlockData::Code),
            BlockKind::InlineCode => serde_json::from_value(payload).map(BlockData::InlineCode),
            BlockKind::Marker => serde_json::from_value(payload).map(BlockData::Marker),
            BlockKind::Delimiter => serde_json::from_value(payload).map(BlockData::Delimiter),
            BlockKind::Table => serde_json::from_value(payload).map(BlockData::Table),
            BlockKind::Embed => serde_json::from_value(payload).map(BlockData::Embed),
            BlockKind::LinkTool => serde_json::from_value(payload).map(BlockData::LinkTool),
            BlockKind::Image => serde_json::from_value(payload).map(BlockData::Image),
        };

        decoded.unwrap_or_else(|e| {
            BlockData::Other(OtherBlock {
                kind,
                data,
                reason: OtherReason::Malformed(e.to_string()),
            })
        })
    }

    pub fn kind(&self) -> Option<BlockKind> {
        Some(match self {
            BlockData::Header(_) => BlockKind::Header,
            BlockData::Paragraph(_) => BlockKind::Paragraph,
            BlockData::List(_) => BlockKind::List,
            BlockData::Checklist(_) => BlockKind::Checklist,
            BlockData::Quote(_) => BlockKind::Quote,
            BlockData::Code(_) => BlockKind::Code,
            BlockData::InlineCode(_) => BlockKind::InlineCode,
            BlockData::Marker(_) => BlockKind::Marker,
            BlockData::Delimiter(_) => BlockKind::Delimiter,
            BlockData::Table(_) => BlockKind::Table,
            BlockData::Embed(_) => BlockKind::Embed,
            BlockData::LinkTool(_) => BlockKind::LinkTool,
            BlockData::Image(_) => BlockKind::Image,
            BlockData::Other(_) => return None,
        })
    }

    pub fn kind_name(&self) -> &str {
        match self {
            BlockData::Other(other) => &other.kind,
            known => known.kind().map_or("", BlockKind::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeaderData {
    #[serde(default)]
    pub text: String,
    /// Heading level; anything outside 1–4 renders as level 2. A stored
    /// value that is not an integer reads as absent.
    #[serde(
        default,
        deserialize_with = "lenient_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub level: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParagraphData {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    #[default]
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListData {
    #[serde(default)]
    pub style: ListStyle,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChecklistItem {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChecklistData {
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteData {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeData {
    #[serde(default)]
    pub code: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InlineCodeData {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerData {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DelimiterData {
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    /// Rows of cells; rows may differ in length.
    #[serde(default)]
    pub content: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_headings: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedData {
    #[serde(default, alias = "embed", skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl EmbedData {
    /// The embed URL, treating blank strings as absent.
    pub fn url(&self) -> Option<&str> {
        non_blank(self.embed_url.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkToolData {
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<LinkMeta>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<FileRef>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "url": ... }` reference used by image-like payloads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ImageData {
    /// `fileUrl` if set, else the nested `file.url`; blank strings are absent.
    pub fn url(&self) -> Option<&str> {
        non_blank(self.file_url.as_deref())
            .or_else(|| non_blank(self.file.as_ref().and_then(|f| f.url.as_deref())))
    }
}

/// A block kept verbatim because it could not be typed.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherBlock {
    pub kind: String,
    pub data: Value,
    pub reason: OtherReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherReason {
    /// The `type` is not one this crate knows.
    UnknownKind,
    /// The `type` is known but `data` did not decode; holds the decode error.
    Malformed(String),
}

fn lenient_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_i64())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

#[derive(Deserialize)]
struct BlockWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    tunes: Option<Value>,
}

impl From<BlockWire> for Block {
    fn from(w: BlockWire) -> Self {
        Block {
            id: w.id,
            data: BlockData::decode(w.kind, w.data),
            tunes: w.tunes,
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        map.serialize_entry("type", self.kind_name())?;
        match &self.data {
            BlockData::Header(d) => map.serialize_entry("data", d)?,
            BlockData::Paragraph(d) => map.serialize_entry("data", d)?,
            BlockData::List(d) => map.serialize_entry("data", d)?,
            BlockData::Checklist(d) => map.serialize_entry("data", d)?,
            BlockData::Quote(d) => map.serialize_entry("data", d)?,
            BlockData::Code(d) => map.serialize_entry("data", d)?,
            BlockData::InlineCode(d) => map.serialize_entry("data", d)?,
            BlockData::Marker(d) => map.serialize_entry("data", d)?,
            BlockData::Delimiter(d) => map.serialize_entry("data", d)?,
            BlockData::Table(d) => map.serialize_entry("data", d)?,
            BlockData::Embed(d) => map.serialize_entry("data", d)?,
            BlockData::LinkTool(d) => map.serialize_entry("data", d)?,
            BlockData::Image(d) => map.serialize_entry("data", d)?,
            BlockData::Other(o) => map.serialize_entry("data", &o.data)?,
        }
        if let Some(tunes) = &self.tunes {
            map.serialize_entry("tunes", tunes)?;
        }
        map.end()
    }
}
