//! Typed Adaptive Card model.
//!
//! Cards are built from the node structs in this module, wrapped into the [`Element`],
//! [`Action`] and [`SelectAction`] capabilities, validated with [`Validate`] and converted to
//! and from the wire form with [`encode`] and [`decode`].

mod actions;
mod canonical;
mod card;
mod containers;
mod elements;
pub mod enums;
mod error;
mod inputs;
mod node;
mod path;
mod validate;

pub use actions::{
    ActionExecute, ActionOpenUrl, ActionProps, ActionShowCard, ActionSubmit,
    ActionToggleVisibility, TargetElement,
};
pub use canonical::{
    decode, decode_action, decode_element, decode_select_action, decode_str, encode,
    encode_action, encode_element, encode_pretty, encode_string, encode_validated,
};
pub use card::{
    AdaptiveCard, AuthCardButton, Authentication, BackgroundImage, CardTag, DEFAULT_VERSION,
    Refresh, SCHEMA_URI, TokenExchangeResource,
};
pub use containers::{
    ActionSet, Column, ColumnSet, ColumnWidth, Container, Fact, FactSet, ImageSet, Table,
    TableCell, TableColumnDefinition, TableRow,
};
pub use elements::{ElementProps, Image, Media, MediaSource, RichTextBlock, TextBlock, TextRun};
pub use enums::*;
pub use error::{CardError, ValidationErrors};
pub use inputs::{
    InputChoice, InputChoiceSet, InputDate, InputNumber, InputProps, InputText, InputTime,
    InputToggle,
};
pub use node::{Action, Element, Node, SelectAction};
pub use path::{NodePath, Segment};
pub use validate::{
    Flow, Halt, Validate, ValidationMode, ValidationOptions, Validator, ValueFormat,
    check_absolute_url, check_resource_url,
};

/// First-error validation of a top-level card.
pub fn validate(card: &AdaptiveCard) -> Result<(), CardError> {
    card.validate()
}
