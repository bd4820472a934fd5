//! Input elements. Every input needs an `id`, which names its value in submitted data.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::elements::ElementProps;
use super::enums::{ChoiceInputStyle, TextInputStyle};
use super::node::{Node, SelectAction};
use super::path::NodePath;
use super::validate::{Flow, Validate, ValueFormat, Validator};

/// Fields shared by every input kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputProps {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
}

fn validate_input(
    path: &NodePath,
    kind: &'static str,
    id: &str,
    props: &ElementProps,
    v: &mut Validator,
) -> Flow {
    v.require_text(path, kind, "id", id)?;
    props.validate_at(path, kind, v)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputText {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multiline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub regex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextInputStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_action: Option<SelectAction>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(flatten)]
    pub input: InputProps,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for InputText {
    const KIND: &'static str = "Input.Text";
}

impl InputText {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.input.label = label.into();
        self
    }
}

impl Validate for InputText {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        validate_input(path, Self::KIND, &self.id, &self.props, v)?;
        v.check_enum(path, Self::KIND, "style", self.style.as_ref())?;
        if let Some(max) = self.max_length
            && self.value.chars().count() > max as usize
        {
            v.invalid(
                path,
                Self::KIND,
                "value",
                format!("longer than maxLength {max}"),
            )?;
        }
        v.optional_child(path, "inlineAction", self.inline_action.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputNumber {
    pub id: String,
    /// Numbers keep their wire form, so `1` stays an integer through a round trip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,
    #[serde(flatten)]
    pub input: InputProps,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for InputNumber {
    const KIND: &'static str = "Input.Number";
}

impl InputNumber {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, min: impl Into<Number>, max: impl Into<Number>) -> Self {
        self.min = Some(min.into());
        self.max = Some(max.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<Number>) -> Self {
        self.value = Some(value.into());
        self
    }
}

fn as_f64(number: Option<&Number>) -> Option<f64> {
    number.and_then(Number::as_f64)
}

impl Validate for InputNumber {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        validate_input(path, Self::KIND, &self.id, &self.props, v)?;
        let (min, max) = (as_f64(self.min.as_ref()), as_f64(self.max.as_ref()));
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            v.invalid(path, Self::KIND, "min", format!("{min} is greater than max {max}"))?;
        }
        if let Some(value) = as_f64(self.value.as_ref()) {
            if min.is_some_and(|min| value < min) {
                v.invalid(path, Self::KIND, "value", format!("{value} is below min"))?;
            }
            if max.is_some_and(|max| value > max) {
                v.invalid(path, Self::KIND, "value", format!("{value} is above max"))?;
            }
        }
        Ok(())
    }
}

/// Date picker. `value`, `min` and `max` are `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputDate {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub max: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub min: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(flatten)]
    pub input: InputProps,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for InputDate {
    const KIND: &'static str = "Input.Date";
}

impl InputDate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Validate for InputDate {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        validate_input(path, Self::KIND, &self.id, &self.props, v)?;
        v.check_format(path, Self::KIND, "min", &self.min, ValueFormat::Date)?;
        v.check_format(path, Self::KIND, "max", &self.max, ValueFormat::Date)?;
        v.check_format(path, Self::KIND, "value", &self.value, ValueFormat::Date)
    }
}

/// Time picker. `value`, `min` and `max` are `HH:MM` strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputTime {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub max: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub min: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(flatten)]
    pub input: InputProps,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for InputTime {
    const KIND: &'static str = "Input.Time";
}

impl InputTime {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Validate for InputTime {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        validate_input(path, Self::KIND, &self.id, &self.props, v)?;
        v.check_format(path, Self::KIND, "min", &self.min, ValueFormat::Time)?;
        v.check_format(path, Self::KIND, "max", &self.max, ValueFormat::Time)?;
        v.check_format(path, Self::KIND, "value", &self.value, ValueFormat::Time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputToggle {
    pub title: String,
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value_off: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value_on: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(flatten)]
    pub input: InputProps,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for InputToggle {
    const KIND: &'static str = "Input.Toggle";
}

impl InputToggle {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Validate for InputToggle {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        validate_input(path, Self::KIND, &self.id, &self.props, v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputChoiceSet {
    pub id: String,
    pub choices: Vec<InputChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multi_select: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ChoiceInputStyle>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(flatten)]
    pub input: InputProps,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for InputChoiceSet {
    const KIND: &'static str = "Input.ChoiceSet";
}

impl InputChoiceSet {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn push_choice(&mut self, choice: InputChoice) -> &mut Self {
        self.choices.push(choice);
        self
    }

    pub fn with_choice(mut self, title: impl Into<String>, value: impl Into<String>) -> Self {
        self.choices.push(InputChoice::new(title, value));
        self
    }
}

impl Validate for InputChoiceSet {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        validate_input(path, Self::KIND, &self.id, &self.props, v)?;
        if self.choices.is_empty() {
            v.missing(path, Self::KIND, "choices")?;
        }
        v.check_enum(path, Self::KIND, "style", self.style.as_ref())?;
        v.children(path, "choices", &self.choices)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputChoice {
    pub title: String,
    pub value: String,
}

impl InputChoice {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

impl Validate for InputChoice {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.require_text(path, "Input.Choice", "title", &self.title)?;
        v.require_text(path, "Input.Choice", "value", &self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptivecards::{CardError, ValidationOptions};
    use serde_json::json;

    fn missing_field(err: CardError) -> (&'static str, &'static str) {
        match err {
            CardError::MissingRequiredField { kind, field, .. } => (kind, field),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn every_input_requires_an_id() {
        assert_eq!(
            missing_field(InputText::default().validate().unwrap_err()),
            ("Input.Text", "id")
        );
        assert_eq!(
            missing_field(InputNumber::default().validate().unwrap_err()),
            ("Input.Number", "id")
        );
        assert_eq!(
            missing_field(InputDate::default().validate().unwrap_err()),
            ("Input.Date", "id")
        );
        assert_eq!(
            missing_field(InputTime::default().validate().unwrap_err()),
            ("Input.Time", "id")
        );
        assert_eq!(
            missing_field(InputToggle::default().validate().unwrap_err()),
            ("Input.Toggle", "id")
        );
    }

    #[test]
    fn choice_sets_need_choices() {
        let err = InputChoiceSet::new("color").validate().unwrap_err();
        assert_eq!(missing_field(err), ("Input.ChoiceSet", "choices"));

        let set = InputChoiceSet::new("color").with_choice("Red", "red");
        assert!(set.validate().is_ok());

        let set = InputChoiceSet::new("color").with_choice("Red", "");
        let err = set.validate().unwrap_err();
        assert_eq!(err.path().to_string(), "$.choices[0]");
    }

    #[test]
    fn number_ranges_must_be_ordered() {
        let input = InputNumber::new("qty").with_range(10, 1);
        let err = input.validate().unwrap_err();
        assert_eq!(err.code(), "invalid_field_value");

        let mut input = InputNumber::new("qty").with_range(1, 10).with_value(11);
        assert!(input.validate().is_err());
        input.value = Some(5.into());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn number_bounds_keep_their_wire_form() {
        let wire = json!({ "id": "qty", "max": 2.5, "min": 1, "value": 2 });
        let input: InputNumber = serde_json::from_value(wire.clone()).unwrap();
        assert!(input.validate().is_ok());
        let encoded = serde_json::to_value(&input).unwrap();
        assert_eq!(encoded, wire);
        assert!(encoded["min"].is_u64());
    }

    #[test]
    fn text_values_respect_max_length() {
        let mut input = InputText::new("name");
        input.max_length = Some(3);
        input.value = "abcd".into();
        assert!(input.validate().is_err());
    }

    #[test]
    fn strict_passes_check_date_and_time_hints() {
        let mut date = InputDate::new("due");
        date.value = "2024-13-01".into();
        assert!(date.validate().is_ok());
        assert!(
            date.validate_with(ValidationOptions::default().strict())
                .is_err()
        );

        let mut time = InputTime::new("at");
        time.min = "08:00".into();
        assert!(
            time.validate_with(ValidationOptions::default().strict())
                .is_ok()
        );
    }
}
