use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::card::AdaptiveCard;
use super::enums::{ActionMode, ActionStyle, AssociatedInputs};
use super::node::{Node, opaque};
use super::path::NodePath;
use super::validate::{Flow, Validate, Validator};

/// Fields shared by every action kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionProps {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ActionStyle>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tooltip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ActionMode>,
    #[serde(deserialize_with = "opaque::deserialize", skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Value>,
    #[serde(deserialize_with = "opaque::deserialize", skip_serializing_if = "Option::is_none")]
    pub requires: Option<Value>,
}

impl ActionProps {
    fn validate_at(&self, path: &NodePath, kind: &'static str, v: &mut Validator) -> Flow {
        v.optional_resource(path, kind, "iconUrl", &self.icon_url)?;
        v.check_enum(path, kind, "style", self.style.as_ref())?;
        v.check_enum(path, kind, "mode", self.mode.as_ref())
    }
}

macro_rules! action_builders {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                pub fn with_title(mut self, title: impl Into<String>) -> Self {
                    self.props.title = title.into();
                    self
                }

                pub fn with_id(mut self, id: impl Into<String>) -> Self {
                    self.props.id = id.into();
                    self
                }

                pub fn with_style(mut self, style: ActionStyle) -> Self {
                    self.props.style = Some(style);
                    self
                }
            }
        )+
    };
}

action_builders!(
    ActionOpenUrl,
    ActionSubmit,
    ActionShowCard,
    ActionToggleVisibility,
    ActionExecute,
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionOpenUrl {
    pub url: String,
    #[serde(flatten)]
    pub props: ActionProps,
}

impl Node for ActionOpenUrl {
    const KIND: &'static str = "Action.OpenUrl";
}

impl ActionOpenUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Validate for ActionOpenUrl {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.require_url(path, Self::KIND, "url", &self.url)?;
        self.props.validate_at(path, Self::KIND, v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionSubmit {
    /// Merged with the input values and sent back to the bot. Kept verbatim.
    #[serde(deserialize_with = "opaque::deserialize", skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_inputs: Option<AssociatedInputs>,
    #[serde(flatten)]
    pub props: ActionProps,
}

impl Node for ActionSubmit {
    const KIND: &'static str = "Action.Submit";
}

impl ActionSubmit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl Validate for ActionSubmit {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.check_enum(
            path,
            Self::KIND,
            "associatedInputs",
            self.associated_inputs.as_ref(),
        )?;
        self.props.validate_at(path, Self::KIND, v)
    }
}

/// Reveals an embedded card when invoked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionShowCard {
    pub card: Box<AdaptiveCard>,
    #[serde(flatten)]
    pub props: ActionProps,
}

impl Node for ActionShowCard {
    const KIND: &'static str = "Action.ShowCard";
}

impl ActionShowCard {
    pub fn new(card: AdaptiveCard) -> Self {
        Self {
            card: Box::new(card),
            ..Self::default()
        }
    }
}

impl Validate for ActionShowCard {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        self.props.validate_at(path, Self::KIND, v)?;
        self.card.validate_embedded(&path.field("card"), v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionToggleVisibility {
    pub target_elements: Vec<TargetElement>,
    #[serde(flatten)]
    pub props: ActionProps,
}

impl Node for ActionToggleVisibility {
    const KIND: &'static str = "Action.ToggleVisibility";
}

impl ActionToggleVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_target(&mut self, target: TargetElement) -> &mut Self {
        self.target_elements.push(target);
        self
    }

    pub fn with_target(mut self, target: TargetElement) -> Self {
        self.target_elements.push(target);
        self
    }
}

impl Validate for ActionToggleVisibility {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        self.props.validate_at(path, Self::KIND, v)?;
        v.children(path, "targetElements", &self.target_elements)
    }
}

/// An element id to show, hide or toggle. The id is not resolved against the card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetElement {
    pub element_id: String,
    /// `None` toggles, `Some(b)` forces the visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl TargetElement {
    pub fn toggle(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            is_visible: None,
        }
    }

    pub fn show(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            is_visible: Some(true),
        }
    }

    pub fn hide(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            is_visible: Some(false),
        }
    }
}

impl Validate for TargetElement {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.require_text(path, "TargetElement", "elementId", &self.element_id)
    }
}

/// Universal action. `verb` is passed through to the receiving bot untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionExecute {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub verb: String,
    #[serde(deserialize_with = "opaque::deserialize", skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_inputs: Option<AssociatedInputs>,
    #[serde(flatten)]
    pub props: ActionProps,
}

impl Node for ActionExecute {
    const KIND: &'static str = "Action.Execute";
}

impl ActionExecute {
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl Validate for ActionExecute {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.check_enum(
            path,
            Self::KIND,
            "associatedInputs",
            self.associated_inputs.as_ref(),
        )?;
        self.props.validate_at(path, Self::KIND, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptivecards::{CardError, TextBlock};

    #[test]
    fn open_url_checks_the_url_it_was_given() {
        let err = ActionOpenUrl::new("not a url").validate().unwrap_err();
        assert!(matches!(
            err,
            CardError::InvalidFieldValue {
                kind: "Action.OpenUrl",
                field: "url",
                ..
            }
        ));
        assert!(ActionOpenUrl::new("https://example.com").validate().is_ok());
    }

    #[test]
    fn open_url_without_url_is_missing_not_invalid() {
        let err = ActionOpenUrl::default().validate().unwrap_err();
        assert_eq!(err.code(), "missing_required_field");
    }

    #[test]
    fn show_card_validates_the_embedded_card() {
        let mut inner = AdaptiveCard::default();
        inner.push_element(TextBlock::default());
        let err = ActionShowCard::new(inner).validate().unwrap_err();
        assert_eq!(err.path().to_string(), "$.card.body[0]");
    }

    #[test]
    fn toggle_visibility_accepts_an_empty_target_list() {
        assert!(ActionToggleVisibility::new().validate().is_ok());
        let action = ActionToggleVisibility::new().with_target(TargetElement::toggle(""));
        let err = action.validate().unwrap_err();
        assert_eq!(err.path().to_string(), "$.targetElements[0]");
    }

    #[test]
    fn execute_and_submit_need_nothing_but_their_kind() {
        assert!(ActionExecute::default().validate().is_ok());
        assert!(ActionSubmit::new().validate().is_ok());
    }
}
