//! Leaf elements: text, images, media and rich text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{
    BlockElementHeight, Colors, FontSize, FontType, FontWeight, HorizontalAlignment, ImageSize,
    ImageStyle, Spacing, TextBlockStyle,
};
use super::node::{Node, SelectAction, opaque, tagged};
use super::path::NodePath;
use super::validate::{Flow, Validate, Validator};

/// Fields shared by every element kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementProps {
    /// Alternate element (or `"drop"`) for hosts that cannot render this one. Kept verbatim.
    #[serde(deserialize_with = "opaque::deserialize", skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<BlockElementHeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    /// Host feature requirements. Kept verbatim.
    #[serde(deserialize_with = "opaque::deserialize", skip_serializing_if = "Option::is_none")]
    pub requires: Option<Value>,
}

impl ElementProps {
    pub(crate) fn validate_at(&self, path: &NodePath, kind: &'static str, v: &mut Validator) -> Flow {
        v.check_enum(path, kind, "height", self.height.as_ref())?;
        v.check_enum(path, kind, "spacing", self.spacing.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextBlock {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Colors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_type: Option<FontType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subtle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextBlockStyle>,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for TextBlock {
    const KIND: &'static str = "TextBlock";
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = Some(wrap);
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_size(mut self, size: FontSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl Validate for TextBlock {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.require_text(path, Self::KIND, "text", &self.text)?;
        v.check_enum(path, Self::KIND, "color", self.color.as_ref())?;
        v.check_enum(path, Self::KIND, "fontType", self.font_type.as_ref())?;
        v.check_enum(
            path,
            Self::KIND,
            "horizontalAlignment",
            self.horizontal_alignment.as_ref(),
        )?;
        v.check_enum(path, Self::KIND, "size", self.size.as_ref())?;
        v.check_enum(path, Self::KIND, "weight", self.weight.as_ref())?;
        v.check_enum(path, Self::KIND, "style", self.style.as_ref())?;
        self.props.validate_at(path, Self::KIND, v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Image {
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alt_text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<SelectAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,
    /// Explicit pixel width such as `"50px"`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub width: String,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for Image {
    const KIND: &'static str = "Image";
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = alt_text.into();
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_select_action(mut self, action: impl Into<SelectAction>) -> Self {
        self.select_action = Some(action.into());
        self
    }
}

impl Validate for Image {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.require_resource(path, Self::KIND, "url", &self.url)?;
        v.check_enum(
            path,
            Self::KIND,
            "horizontalAlignment",
            self.horizontal_alignment.as_ref(),
        )?;
        v.check_enum(path, Self::KIND, "size", self.size.as_ref())?;
        v.check_enum(path, Self::KIND, "style", self.style.as_ref())?;
        self.props.validate_at(path, Self::KIND, v)?;
        v.optional_child(path, "selectAction", self.select_action.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Media {
    pub sources: Vec<MediaSource>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub poster: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alt_text: String,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for Media {
    const KIND: &'static str = "Media";
}

impl Media {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_source(&mut self, source: MediaSource) -> &mut Self {
        self.sources.push(source);
        self
    }

    pub fn with_source(mut self, source: MediaSource) -> Self {
        self.sources.push(source);
        self
    }
}

impl Validate for Media {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.optional_resource(path, Self::KIND, "poster", &self.poster)?;
        self.props.validate_at(path, Self::KIND, v)?;
        v.children(path, "sources", &self.sources)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaSource {
    pub mime_type: String,
    pub url: String,
}

impl MediaSource {
    pub fn new(mime_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            url: url.into(),
        }
    }
}

impl Validate for MediaSource {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.require_text(path, "MediaSource", "mimeType", &self.mime_type)?;
        v.require_resource(path, "MediaSource", "url", &self.url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RichTextBlock {
    #[serde(with = "tagged::vec")]
    pub inlines: Vec<TextRun>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for RichTextBlock {
    const KIND: &'static str = "RichTextBlock";
}

impl RichTextBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, run: TextRun) -> &mut Self {
        self.inlines.push(run);
        self
    }

    pub fn with_run(mut self, run: TextRun) -> Self {
        self.inlines.push(run);
        self
    }
}

impl Validate for RichTextBlock {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.check_enum(
            path,
            Self::KIND,
            "horizontalAlignment",
            self.horizontal_alignment.as_ref(),
        )?;
        self.props.validate_at(path, Self::KIND, v)?;
        v.children(path, "inlines", &self.inlines)
    }
}

/// A run of formatted text inside a `RichTextBlock`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextRun {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Colors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_type: Option<FontType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subtle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<SelectAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
}

impl Node for TextRun {
    const KIND: &'static str = "TextRun";
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }
}

impl Validate for TextRun {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.require_text(path, Self::KIND, "text", &self.text)?;
        v.check_enum(path, Self::KIND, "color", self.color.as_ref())?;
        v.check_enum(path, Self::KIND, "fontType", self.font_type.as_ref())?;
        v.check_enum(path, Self::KIND, "size", self.size.as_ref())?;
        v.check_enum(path, Self::KIND, "weight", self.weight.as_ref())?;
        v.optional_child(path, "selectAction", self.select_action.as_ref())
    }
}
