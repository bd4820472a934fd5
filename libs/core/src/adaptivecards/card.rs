//! The document root and its card-level metadata.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::actions::ActionExecute;
use super::enums::{
    HorizontalAlignment, ImageFillMode, VerticalAlignment, VerticalContentAlignment, Version,
};
use super::node::{Action, Element, Node, SelectAction, tagged};
use super::path::NodePath;
use super::validate::{Flow, Validate, Validator};

/// Default `$schema` written by [`AdaptiveCard::new`].
pub const SCHEMA_URI: &str = "http://adaptivecards.io/schemas/adaptive-card.json";

/// Version written by [`AdaptiveCard::new`].
pub const DEFAULT_VERSION: Version = Version::V1_3;

/// The `"type": "AdaptiveCard"` entry. Always written, and checked when present on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CardTag;

impl Serialize for CardTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(AdaptiveCard::KIND)
    }
}

impl<'de> Deserialize<'de> for CardTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kind = String::deserialize(deserializer)?;
        if kind == AdaptiveCard::KIND {
            Ok(Self)
        } else {
            Err(serde::de::Error::custom(format_args!(
                "expected type '{}', found '{kind}'",
                AdaptiveCard::KIND
            )))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdaptiveCard {
    #[serde(rename = "type")]
    kind: CardTag,
    #[serde(rename = "$schema", skip_serializing_if = "String::is_empty")]
    pub schema: String,
    /// Required on a top-level card; optional on cards embedded by `Action.ShowCard`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<Refresh>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<Element>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    /// Card-level tap action. Written as an array; a single object is accepted on decode.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub select_action: Vec<SelectAction>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fallback_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub min_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub speak: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_content_alignment: Option<VerticalContentAlignment>,
}

impl Node for AdaptiveCard {
    const KIND: &'static str = "AdaptiveCard";
}

impl AdaptiveCard {
    /// An empty card carrying the default schema URI and version 1.3.
    pub fn new() -> Self {
        Self {
            schema: SCHEMA_URI.to_string(),
            version: Some(DEFAULT_VERSION),
            ..Self::default()
        }
    }

    pub fn kind(&self) -> &'static str {
        Self::KIND
    }

    pub fn push_element(&mut self, element: impl Into<Element>) -> &mut Self {
        self.body.push(element.into());
        self
    }

    pub fn push_action(&mut self, action: impl Into<Action>) -> &mut Self {
        self.actions.push(action.into());
        self
    }

    pub fn push_select_action(&mut self, action: impl Into<SelectAction>) -> &mut Self {
        self.select_action.push(action.into());
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.body.push(element.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn with_fallback_text(mut self, text: impl Into<String>) -> Self {
        self.fallback_text = text.into();
        self
    }

    /// Validates a card embedded in `Action.ShowCard`, where `version` may be omitted.
    pub(crate) fn validate_embedded(&self, path: &NodePath, v: &mut Validator) -> Flow {
        self.validate_document(path, false, v)
    }

    fn validate_document(&self, path: &NodePath, top_level: bool, v: &mut Validator) -> Flow {
        match &self.version {
            Some(version) => v.check_enum(path, Self::KIND, "version", Some(version))?,
            None if top_level => v.missing(path, Self::KIND, "version")?,
            None => {}
        }
        v.check_enum(
            path,
            Self::KIND,
            "verticalContentAlignment",
            self.vertical_content_alignment.as_ref(),
        )?;
        v.optional_child(path, "refresh", self.refresh.as_ref())?;
        v.optional_child(path, "authentication", self.authentication.as_ref())?;
        v.optional_child(path, "backgroundImage", self.background_image.as_ref())?;
        v.children(path, "body", &self.body)?;
        v.children(path, "actions", &self.actions)?;
        v.children(path, "selectAction", &self.select_action)
    }
}

impl Validate for AdaptiveCard {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        self.validate_document(path, true, v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_mode: Option<ImageFillMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_alignment: Option<VerticalAlignment>,
}

impl BackgroundImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Validate for BackgroundImage {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        const KIND: &str = "BackgroundImage";
        v.require_resource(path, KIND, "url", &self.url)?;
        v.check_enum(path, KIND, "fillMode", self.fill_mode.as_ref())?;
        v.check_enum(
            path,
            KIND,
            "horizontalAlignment",
            self.horizontal_alignment.as_ref(),
        )?;
        v.check_enum(
            path,
            KIND,
            "verticalAlignment",
            self.vertical_alignment.as_ref(),
        )
    }
}

/// Automatic refresh of a card. The action is always an `Action.Execute`; an empty refresh
/// with neither an action nor user ids is reported as missing its action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Refresh {
    #[serde(with = "tagged::option", skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionExecute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<String>,
}

impl Validate for Refresh {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        if self.action.is_none() && self.user_ids.is_empty() {
            v.missing(path, "Refresh", "action")?;
        }
        v.optional_child(path, "action", self.action.as_ref())
    }
}

/// Single sign-on and OAuth settings used by hosts that support them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Authentication {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub connection_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_exchange_resource: Option<TokenExchangeResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<AuthCardButton>,
}

impl Validate for Authentication {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.optional_child(
            path,
            "tokenExchangeResource",
            self.token_exchange_resource.as_ref(),
        )?;
        v.children(path, "buttons", &self.buttons)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenExchangeResource {
    pub id: String,
    pub uri: String,
    pub provider_id: String,
}

impl Validate for TokenExchangeResource {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        const KIND: &str = "TokenExchangeResource";
        v.require_text(path, KIND, "id", &self.id)?;
        v.require_url(path, KIND, "uri", &self.uri)?;
        v.require_text(path, KIND, "providerId", &self.provider_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthCardButton {
    /// Button kind understood by the host, e.g. `"signin"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
}

impl Validate for AuthCardButton {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        const KIND: &str = "AuthCardButton";
        v.require_text(path, KIND, "type", &self.kind)?;
        v.require_text(path, KIND, "value", &self.value)?;
        v.optional_resource(path, KIND, "image", &self.image)
    }
}
