use time::macros::format_description;
use url::Url;

use super::enums::CardEnum;
use super::error::{CardError, ValidationErrors};
use super::path::NodePath;

/// How a validation pass reacts to the first problem it finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first problem.
    #[default]
    FirstError,
    /// Walk the whole tree and report everything.
    Collect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationOptions {
    pub mode: ValidationMode,
    /// Reject enumeration values outside the known set and malformed date/time hints.
    pub strict: bool,
}

impl ValidationOptions {
    pub fn collect() -> Self {
        Self {
            mode: ValidationMode::Collect,
            ..Self::default()
        }
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Signals that a first-error pass has stopped.
#[derive(Debug)]
pub struct Halt {
    _priv: (),
}

pub type Flow = Result<(), Halt>;

/// A node that can check itself (and everything it owns) against the card rules.
pub trait Validate {
    fn validate_at(&self, path: &NodePath, validator: &mut Validator) -> Flow;

    /// First-error validation rooted at this node.
    fn validate(&self) -> Result<(), CardError> {
        self.validate_with(ValidationOptions::default())
            .map_err(CardError::from)
    }

    fn validate_with(&self, options: ValidationOptions) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new(options);
        let _ = self.validate_at(&NodePath::root(), &mut validator);
        validator.finish()
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate_at(&self, path: &NodePath, validator: &mut Validator) -> Flow {
        (**self).validate_at(path, validator)
    }
}

/// Collects problems during a depth-first walk.
#[derive(Debug)]
pub struct Validator {
    options: ValidationOptions,
    errors: Vec<CardError>,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
        }
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    pub fn report(&mut self, error: CardError) -> Flow {
        self.errors.push(error);
        match self.options.mode {
            ValidationMode::FirstError => Err(Halt { _priv: () }),
            ValidationMode::Collect => Ok(()),
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        match ValidationErrors::new(self.errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }

    pub fn missing(&mut self, path: &NodePath, kind: &'static str, field: &'static str) -> Flow {
        self.report(CardError::MissingRequiredField {
            path: path.clone(),
            kind,
            field,
        })
    }

    pub fn invalid(
        &mut self,
        path: &NodePath,
        kind: &'static str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Flow {
        self.report(CardError::InvalidFieldValue {
            path: path.clone(),
            kind,
            field,
            reason: reason.into(),
        })
    }

    pub fn child<T: Validate + ?Sized>(
        &mut self,
        path: &NodePath,
        field: &'static str,
        node: &T,
    ) -> Flow {
        node.validate_at(&path.field(field), self)
    }

    pub fn optional_child<T: Validate>(
        &mut self,
        path: &NodePath,
        field: &'static str,
        node: Option<&T>,
    ) -> Flow {
        match node {
            Some(node) => self.child(path, field, node),
            None => Ok(()),
        }
    }

    pub fn children<T: Validate>(
        &mut self,
        path: &NodePath,
        field: &'static str,
        nodes: &[T],
    ) -> Flow {
        let base = path.field(field);
        for (index, node) in nodes.iter().enumerate() {
            node.validate_at(&base.index(index), self)?;
        }
        Ok(())
    }

    pub fn require_text(
        &mut self,
        path: &NodePath,
        kind: &'static str,
        field: &'static str,
        value: &str,
    ) -> Flow {
        if value.trim().is_empty() {
            return self.missing(path, kind, field);
        }
        Ok(())
    }

    /// Requires an absolute URL with a scheme and a host.
    pub fn require_url(
        &mut self,
        path: &NodePath,
        kind: &'static str,
        field: &'static str,
        value: &str,
    ) -> Flow {
        if value.trim().is_empty() {
            return self.missing(path, kind, field);
        }
        self.optional_url(path, kind, field, value)
    }

    pub fn optional_url(
        &mut self,
        path: &NodePath,
        kind: &'static str,
        field: &'static str,
        value: &str,
    ) -> Flow {
        if value.is_empty() {
            return Ok(());
        }
        match check_absolute_url(value) {
            Ok(_) => Ok(()),
            Err(reason) => self.invalid(path, kind, field, reason),
        }
    }

    /// Requires an image or media reference: an absolute URL or a `data:` URI.
    pub fn require_resource(
        &mut self,
        path: &NodePath,
        kind: &'static str,
        field: &'static str,
        value: &str,
    ) -> Flow {
        if value.trim().is_empty() {
            return self.missing(path, kind, field);
        }
        self.optional_resource(path, kind, field, value)
    }

    pub fn optional_resource(
        &mut self,
        path: &NodePath,
        kind: &'static str,
        field: &'static str,
        value: &str,
    ) -> Flow {
        if value.is_empty() {
            return Ok(());
        }
        match check_resource_url(value) {
            Ok(_) => Ok(()),
            Err(reason) => self.invalid(path, kind, field, reason),
        }
    }

    /// Only strict passes reject values outside the known set.
    pub fn check_enum<E: CardEnum>(
        &mut self,
        path: &NodePath,
        kind: &'static str,
        field: &'static str,
        value: Option<&E>,
    ) -> Flow {
        match value {
            Some(value) if self.options.strict && !value.is_known() => self.invalid(
                path,
                kind,
                field,
                format!("unknown value '{}'", value.as_str()),
            ),
            _ => Ok(()),
        }
    }

    /// Only strict passes check free-form hints such as `YYYY-MM-DD` dates.
    pub fn check_format(
        &mut self,
        path: &NodePath,
        kind: &'static str,
        field: &'static str,
        value: &str,
        format: ValueFormat,
    ) -> Flow {
        if !self.options.strict || value.is_empty() || format.matches(value) {
            return Ok(());
        }
        self.invalid(
            path,
            kind,
            field,
            format!("'{value}' is not a {}", format.describe()),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM`
    Time,
}

impl ValueFormat {
    pub fn matches(self, value: &str) -> bool {
        match self {
            Self::Date => {
                time::Date::parse(value, format_description!("[year]-[month]-[day]")).is_ok()
            }
            Self::Time => time::Time::parse(value, format_description!("[hour]:[minute]")).is_ok(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Date => "YYYY-MM-DD date",
            Self::Time => "HH:MM time",
        }
    }
}

/// Parses `value` as an absolute URL with a non-empty scheme and host.
pub fn check_absolute_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|err| format!("'{value}' is not a valid URL: {err}"))?;
    if url.scheme().is_empty() || url.host_str().is_none_or(str::is_empty) {
        return Err(format!("'{value}' is not an absolute URL with scheme and host"));
    }
    Ok(url)
}

/// Like [`check_absolute_url`] but also accepts `data:` URIs.
pub fn check_resource_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|err| format!("'{value}' is not a valid URL: {err}"))?;
    if url.scheme() == "data" {
        return Ok(url);
    }
    check_absolute_url(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_urls_need_scheme_and_host() {
        assert!(check_absolute_url("https://example.com").is_ok());
        assert!(check_absolute_url("not a url").is_err());
        assert!(check_absolute_url("mailto:someone@example.com").is_err());
        assert!(check_absolute_url("/relative/path").is_err());
    }

    #[test]
    fn resources_accept_data_uris() {
        assert!(check_resource_url("data:image/png;base64,iVBORw0KGgo=").is_ok());
        assert!(check_resource_url("https://example.com/a.png").is_ok());
        assert!(check_resource_url("a.png").is_err());
    }

    #[test]
    fn first_error_mode_halts() {
        let mut validator = Validator::new(ValidationOptions::default());
        let path = NodePath::root();
        assert!(validator.missing(&path, "TextBlock", "text").is_err());
        let errors = validator.finish().unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn collect_mode_keeps_going() {
        let mut validator = Validator::new(ValidationOptions::collect());
        let path = NodePath::root();
        assert!(validator.missing(&path, "TextBlock", "text").is_ok());
        assert!(validator.invalid(&path, "Image", "url", "bad").is_ok());
        assert_eq!(validator.finish().unwrap_err().len(), 2);
    }

    #[test]
    fn formats_are_only_checked_when_strict() {
        let path = NodePath::root();
        let mut lenient = Validator::new(ValidationOptions::collect());
        lenient
            .check_format(&path, "Input.Date", "value", "tomorrow", ValueFormat::Date)
            .unwrap();
        assert!(lenient.finish().is_ok());

        let mut strict = Validator::new(ValidationOptions::collect().strict());
        strict
            .check_format(&path, "Input.Date", "value", "tomorrow", ValueFormat::Date)
            .unwrap();
        strict
            .check_format(&path, "Input.Time", "value", "09:30", ValueFormat::Time)
            .unwrap();
        assert_eq!(strict.finish().unwrap_err().len(), 1);
    }
}
