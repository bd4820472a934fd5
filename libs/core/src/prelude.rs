//! Common imports for building, validating and sending cards.
pub use crate::adaptivecards::{
    Action, ActionExecute, ActionOpenUrl, ActionSet, ActionShowCard, ActionSubmit,
    ActionToggleVisibility, AdaptiveCard, CardError, Column, ColumnSet, ColumnWidth, Container,
    Element, Fact, FactSet, Image, ImageSet, InputChoiceSet, InputDate, InputNumber, InputText,
    InputTime, InputToggle, Media, MediaSource, RichTextBlock, SelectAction, Table, TableCell,
    TableRow, TargetElement, TextBlock, TextRun, Validate, ValidationOptions,
};
pub use crate::egress::{EgressError, EgressSender, SendResult, send_card};
pub use crate::message::Message;
pub use crate::platforms::teams::{TeamsWebhook, WebhookConfig};
