//! Canonical JSON form of a card.
//!
//! Encoding is plain serde: every node writes its discriminator first, omits empty optional
//! fields and keeps children in insertion order. Decoding walks the raw tree first so that
//! discriminator problems are reported with the path of the offending node, expands the wire
//! shorthands, and only then hands the value to serde.

use std::mem;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::actions::ActionExecute;
use super::card::AdaptiveCard;
use super::containers::{Column, TableCell, TableRow};
use super::elements::{Image, TextRun};
use super::error::CardError;
use super::node::{Action, Element, Node, SelectAction};
use super::path::NodePath;
use super::validate::Validate;

/// Positions in the tree that hold a node with a `type` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Card,
    Element,
    Action,
    SelectAction,
    Column,
    Image,
    TextRun,
    TableRow,
    TableCell,
    RefreshAction,
}

impl Slot {
    fn name(self) -> &'static str {
        match self {
            Self::Card => AdaptiveCard::KIND,
            Self::Element => "element",
            Self::Action => "action",
            Self::SelectAction => "select action",
            Self::Column => Column::KIND,
            Self::Image => Image::KIND,
            Self::TextRun => TextRun::KIND,
            Self::TableRow => TableRow::KIND,
            Self::TableCell => TableCell::KIND,
            Self::RefreshAction => ActionExecute::KIND,
        }
    }

    fn accepts(self, kind: &str) -> bool {
        match self {
            Self::Element => kind != Column::KIND && Element::KINDS.contains(&kind),
            Self::Action => Action::KINDS.contains(&kind),
            Self::SelectAction => SelectAction::KINDS.contains(&kind),
            other => other.name() == kind,
        }
    }

    /// Kind assumed when a node in this slot leaves out `type`.
    fn implicit_kind(self) -> Option<&'static str> {
        match self {
            Self::Card
            | Self::Column
            | Self::Image
            | Self::TextRun
            | Self::TableRow
            | Self::TableCell => Some(self.name()),
            Self::Element | Self::Action | Self::SelectAction | Self::RefreshAction => None,
        }
    }

    fn try_decode(self, value: &Value) -> Result<(), serde_json::Error> {
        match self {
            Self::Card => AdaptiveCard::deserialize(value).map(drop),
            Self::Element => Element::deserialize(value).map(drop),
            Self::Action => Action::deserialize(value).map(drop),
            Self::SelectAction => SelectAction::deserialize(value).map(drop),
            Self::Column => Column::deserialize(value).map(drop),
            Self::Image => Image::deserialize(value).map(drop),
            Self::TextRun => TextRun::deserialize(value).map(drop),
            Self::TableRow => TableRow::deserialize(value).map(drop),
            Self::TableCell => TableCell::deserialize(value).map(drop),
            Self::RefreshAction => ActionExecute::deserialize(value).map(drop),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    One(Slot),
    Many(Slot),
    /// An array, or a single object that is wrapped into one.
    OneOrMany(Slot),
    /// `targetElements`: objects or bare element id strings.
    Targets,
    /// `backgroundImage`: an object or a bare URL string.
    BackgroundImage,
    /// A plain object (not a node) whose own fields hold nodes.
    Object(&'static [Child]),
}

type Child = (&'static str, Shape);

const SELECT_ACTION: Child = ("selectAction", Shape::One(Slot::SelectAction));
const BACKGROUND: Child = ("backgroundImage", Shape::BackgroundImage);

const CARD: &[Child] = &[
    ("refresh", Shape::Object(&[("action", Shape::One(Slot::RefreshAction))])),
    ("body", Shape::Many(Slot::Element)),
    ("actions", Shape::Many(Slot::Action)),
    ("selectAction", Shape::OneOrMany(Slot::SelectAction)),
    BACKGROUND,
];
const ACTION_SET: &[Child] = &[("actions", Shape::Many(Slot::Action))];
const CONTAINER: &[Child] = &[("items", Shape::Many(Slot::Element)), SELECT_ACTION, BACKGROUND];
const COLUMN_SET: &[Child] = &[("columns", Shape::Many(Slot::Column)), SELECT_ACTION];
const IMAGE_SET: &[Child] = &[("images", Shape::Many(Slot::Image))];
const RICH_TEXT: &[Child] = &[("inlines", Shape::Many(Slot::TextRun))];
const TABLE: &[Child] = &[("rows", Shape::Many(Slot::TableRow))];
const TABLE_ROW: &[Child] = &[("cells", Shape::Many(Slot::TableCell))];
const SELECTABLE: &[Child] = &[SELECT_ACTION];
const INPUT_TEXT: &[Child] = &[("inlineAction", Shape::One(Slot::SelectAction))];
const SHOW_CARD: &[Child] = &[("card", Shape::One(Slot::Card))];
const TOGGLE: &[Child] = &[("targetElements", Shape::Targets)];

/// Kinds that never appear in an `Element` or `Action` slot.
const INLINE_KINDS: &[&str] = &[
    AdaptiveCard::KIND,
    TextRun::KIND,
    TableRow::KIND,
    TableCell::KIND,
];

fn is_known(kind: &str) -> bool {
    Element::KINDS.contains(&kind) || Action::KINDS.contains(&kind) || INLINE_KINDS.contains(&kind)
}

fn children_of(kind: &str) -> &'static [Child] {
    match kind {
        "AdaptiveCard" => CARD,
        "ActionSet" => ACTION_SET,
        "Container" | "Column" | "TableCell" => CONTAINER,
        "ColumnSet" => COLUMN_SET,
        "ImageSet" => IMAGE_SET,
        "RichTextBlock" => RICH_TEXT,
        "Table" => TABLE,
        "TableRow" => TABLE_ROW,
        "Image" | "TextRun" => SELECTABLE,
        "Input.Text" => INPUT_TEXT,
        "Action.ShowCard" => SHOW_CARD,
        "Action.ToggleVisibility" => TOGGLE,
        _ => &[],
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn scan_node(value: &mut Value, slot: Slot, path: &NodePath) -> Result<(), CardError> {
    if slot == Slot::TextRun
        && let Value::String(text) = value
    {
        let text = mem::take(text);
        *value = json!({ "type": TextRun::KIND, "text": text });
    }

    let Value::Object(obj) = value else {
        return Err(CardError::malformed(
            path,
            format!("expected {} object, found {}", slot.name(), describe(value)),
        ));
    };

    let kind = match obj.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => {
            return Err(CardError::malformed(
                path,
                format!("'type' must be a string, found {}", describe(other)),
            ));
        }
        None => match slot.implicit_kind() {
            Some(kind) => {
                obj.insert("type".into(), Value::String(kind.into()));
                kind.to_string()
            }
            None => {
                return Err(CardError::MissingRequiredField {
                    path: path.clone(),
                    kind: slot.name(),
                    field: "type",
                });
            }
        },
    };

    if !is_known(&kind) {
        return Err(CardError::UnknownKind {
            path: path.clone(),
            kind,
        });
    }
    if !slot.accepts(&kind) {
        return Err(CardError::TypeMismatch {
            path: path.clone(),
            expected: slot.name(),
            found: kind,
        });
    }
    scan_children(obj, children_of(&kind), path)
}

fn scan_children(
    obj: &mut Map<String, Value>,
    children: &[Child],
    path: &NodePath,
) -> Result<(), CardError> {
    for &(field, shape) in children {
        if obj.get(field).is_some_and(Value::is_null) {
            obj.remove(field);
            continue;
        }
        let Some(child) = obj.get_mut(field) else {
            continue;
        };
        let child_path = path.field(field);
        match shape {
            Shape::One(slot) => scan_node(child, slot, &child_path)?,
            Shape::Many(slot) => scan_array(child, slot, &child_path)?,
            Shape::OneOrMany(slot) => {
                if child.is_object() {
                    let single = child.take();
                    *child = Value::Array(vec![single]);
                }
                scan_array(child, slot, &child_path)?;
            }
            Shape::Targets => scan_targets(child, &child_path)?,
            Shape::BackgroundImage => {
                if let Value::String(url) = child {
                    let url = mem::take(url);
                    *child = json!({ "url": url });
                }
            }
            Shape::Object(inner) => match child {
                Value::Object(map) => scan_children(map, inner, &child_path)?,
                other => {
                    return Err(CardError::malformed(
                        &child_path,
                        format!("expected an object, found {}", describe(other)),
                    ));
                }
            },
        }
    }
    Ok(())
}

fn scan_array(value: &mut Value, slot: Slot, path: &NodePath) -> Result<(), CardError> {
    let Value::Array(items) = value else {
        return Err(CardError::malformed(
            path,
            format!("expected an array, found {}", describe(value)),
        ));
    };
    for (index, item) in items.iter_mut().enumerate() {
        scan_node(item, slot, &path.index(index))?;
    }
    Ok(())
}

fn scan_targets(value: &mut Value, path: &NodePath) -> Result<(), CardError> {
    let Value::Array(items) = value else {
        return Err(CardError::malformed(
            path,
            format!("expected an array, found {}", describe(value)),
        ));
    };
    for (index, item) in items.iter_mut().enumerate() {
        match item {
            Value::String(id) => {
                let id = mem::take(id);
                *item = json!({ "elementId": id });
            }
            Value::Object(_) => {}
            other => {
                return Err(CardError::malformed(
                    &path.index(index),
                    format!("expected a target element, found {}", describe(other)),
                ));
            }
        }
    }
    Ok(())
}

fn child_nodes<'v>(
    obj: &'v Map<String, Value>,
    children: &[Child],
    path: &NodePath,
    out: &mut Vec<(Slot, &'v Value, NodePath)>,
) {
    for &(field, shape) in children {
        let Some(child) = obj.get(field) else {
            continue;
        };
        let child_path = path.field(field);
        match shape {
            Shape::One(slot) => out.push((slot, child, child_path)),
            Shape::Many(slot) | Shape::OneOrMany(slot) => {
                if let Value::Array(items) = child {
                    out.extend(
                        items
                            .iter()
                            .enumerate()
                            .map(|(index, item)| (slot, item, child_path.index(index))),
                    );
                }
            }
            Shape::Object(inner) => {
                if let Value::Object(map) = child {
                    child_nodes(map, inner, &child_path, out);
                }
            }
            Shape::Targets | Shape::BackgroundImage => {}
        }
    }
}

/// Narrows a serde failure down to the deepest node that fails on its own.
fn locate(value: &Value, path: &NodePath, err: serde_json::Error) -> CardError {
    let mut nested = Vec::new();
    if let Value::Object(obj) = value
        && let Some(Value::String(kind)) = obj.get("type")
    {
        child_nodes(obj, children_of(kind), path, &mut nested);
    }
    for (slot, child, child_path) in nested {
        if let Err(child_err) = slot.try_decode(child) {
            return locate(child, &child_path, child_err);
        }
    }
    CardError::malformed(path, err.to_string())
}

fn decode_slot<T>(mut value: Value, slot: Slot) -> Result<T, CardError>
where
    T: for<'de> Deserialize<'de>,
{
    let root = NodePath::root();
    scan_node(&mut value, slot, &root)?;
    T::deserialize(&value).map_err(|err| locate(&value, &root, err))
}

/// Rebuilds a card from its wire form.
///
/// Unknown discriminators fail with [`CardError::UnknownKind`]; nodes in the wrong slot fail
/// with [`CardError::TypeMismatch`]. Nothing is dropped silently.
pub fn decode(value: Value) -> Result<AdaptiveCard, CardError> {
    decode_slot(value, Slot::Card)
}

pub fn decode_str(input: &str) -> Result<AdaptiveCard, CardError> {
    let value: Value = serde_json::from_str(input)
        .map_err(|err| CardError::malformed(&NodePath::root(), err.to_string()))?;
    decode(value)
}

pub fn decode_element(value: Value) -> Result<Element, CardError> {
    decode_slot(value, Slot::Element)
}

pub fn decode_action(value: Value) -> Result<Action, CardError> {
    decode_slot(value, Slot::Action)
}

pub fn decode_select_action(value: Value) -> Result<SelectAction, CardError> {
    decode_slot(value, Slot::SelectAction)
}

fn to_value<T: Serialize>(node: &T) -> Result<Value, CardError> {
    serde_json::to_value(node).map_err(|err| {
        CardError::malformed(&NodePath::root(), format!("encode failed: {err}"))
    })
}

/// Encodes a card into its canonical wire form.
pub fn encode(card: &AdaptiveCard) -> Result<Value, CardError> {
    to_value(card)
}

pub fn encode_element(element: &Element) -> Result<Value, CardError> {
    to_value(element)
}

pub fn encode_action(action: &Action) -> Result<Value, CardError> {
    to_value(action)
}

pub fn encode_string(card: &AdaptiveCard) -> Result<String, CardError> {
    serde_json::to_string(card).map_err(|err| {
        CardError::malformed(&NodePath::root(), format!("encode failed: {err}"))
    })
}

pub fn encode_pretty(card: &AdaptiveCard) -> Result<String, CardError> {
    serde_json::to_string_pretty(card).map_err(|err| {
        CardError::malformed(&NodePath::root(), format!("encode failed: {err}"))
    })
}

/// Validates (first error wins) and then encodes.
pub fn encode_validated(card: &AdaptiveCard) -> Result<Value, CardError> {
    card.validate()?;
    encode(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptivecards::{ActionOpenUrl, RichTextBlock, TextBlock};

    #[test]
    fn discriminator_leads_every_node() {
        let card = AdaptiveCard::new().with_element(TextBlock::new("hi"));
        let value = encode(&card).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys[0], "type");
        let block = value["body"][0].as_object().unwrap();
        assert_eq!(block.keys().next().map(String::as_str), Some("type"));
    }

    #[test]
    fn single_select_action_object_is_wrapped() {
        let card = decode(json!({
            "type": "AdaptiveCard",
            "version": "1.3",
            "selectAction": { "type": "Action.OpenUrl", "url": "https://example.com" }
        }))
        .unwrap();
        assert_eq!(card.select_action.len(), 1);
        assert_eq!(card.select_action[0].kind(), ActionOpenUrl::KIND);
    }

    #[test]
    fn inline_strings_become_text_runs() {
        let element = decode_element(json!({
            "type": "RichTextBlock",
            "inlines": ["plain", { "type": "TextRun", "text": "styled", "italic": true }]
        }))
        .unwrap();
        let Element::RichTextBlock(RichTextBlock { inlines, .. }) = element else {
            panic!("expected a rich text block");
        };
        assert_eq!(inlines[0].text, "plain");
        assert_eq!(inlines[1].italic, Some(true));
    }

    #[test]
    fn missing_discriminator_in_an_element_slot() {
        let err = decode(json!({ "type": "AdaptiveCard", "body": [{ "text": "x" }] })).unwrap_err();
        assert_eq!(
            err,
            CardError::MissingRequiredField {
                path: NodePath::root().field("body").index(0),
                kind: "element",
                field: "type",
            }
        );
    }

    #[test]
    fn serde_failures_point_at_the_deepest_node() {
        let err = decode(json!({
            "type": "AdaptiveCard",
            "body": [
                { "type": "TextBlock", "text": "ok" },
                { "type": "Container", "items": [{ "type": "TextBlock", "text": 42 }] }
            ]
        }))
        .unwrap_err();
        assert!(matches!(err, CardError::MalformedWire { .. }));
        assert_eq!(err.path().to_string(), "$.body[1].items[0]");
    }

    #[test]
    fn invalid_json_text_is_malformed() {
        let err = decode_str("{ not json").unwrap_err();
        assert_eq!(err.code(), "malformed_wire");
        assert!(err.path().is_root());
    }
}
