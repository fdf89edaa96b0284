use std::fmt;

use serde::{Deserialize, Serialize};

pub const DECORATOR_STRONG: &str = "strong";
pub const DECORATOR_EM: &str = "em";
pub const DECORATOR_CODE: &str = "code";

/// One unit of converted output.
///
/// Closed set, keyed on `_type` in the wire form. List items are text
/// blocks with `listItem`/`level` set; the grouping list is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum PortableBlock {
    #[serde(rename = "block")]
    Text(TextBlock),
    #[serde(rename = "code")]
    Code(CodeBlock),
    #[serde(rename = "image")]
    Image(ImageBlock),
}

impl PortableBlock {
    pub fn key(&self) -> &str {
        match self {
            PortableBlock::Text(b) => &b.key,
            PortableBlock::Code(b) => &b.key,
            PortableBlock::Image(b) => &b.key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(rename = "_key")]
    pub key: String,
    pub style: BlockStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<ListItemKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    pub children: Vec<PortableSpan>,
    pub mark_defs: Vec<MarkDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(rename = "_key")]
    pub key: String,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// `marks` holds decorator names and mark-def keys, in nesting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "span")]
pub struct PortableSpan {
    #[serde(rename = "_key")]
    pub key: String,
    pub text: String,
    pub marks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum MarkDef {
    Link {
        #[serde(rename = "_key")]
        key: String,
        href: String,
    },
}

impl MarkDef {
    pub fn key(&self) -> &str {
        match self {
            MarkDef::Link { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListItemKind {
    Unordered,
    Ordered,
}

/// Text block style. Wire names: `normal`, `heading-1`..`heading-6`, `quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BlockStyle {
    Normal,
    Heading(u8),
    Quote,
}

impl fmt::Display for BlockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockStyle::Normal => f.write_str("normal"),
            BlockStyle::Heading(level) => write!(f, "heading-{level}"),
            BlockStyle::Quote => f.write_str("quote"),
        }
    }
}

impl From<BlockStyle> for String {
    fn from(style: BlockStyle) -> Self {
        style.to_string()
    }
}

impl TryFrom<String> for BlockStyle {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "normal" => Ok(BlockStyle::Normal),
            "quote" => Ok(BlockStyle::Quote),
            other => other
                .strip_prefix("heading-")
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=6).contains(n))
                .map(BlockStyle::Heading)
                .ok_or_else(|| format!("unknown block style: {other}")),
        }
    }
}
