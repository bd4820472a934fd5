//! Closed, string-backed value sets used by card nodes.
//!
//! Every enumeration keeps values it does not recognise in an `Other` variant so decoding
//! never drops data; whether such values are acceptable is decided by the validator.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Shared surface of the card enumerations, used by the validator for membership checks.
pub trait CardEnum {
    fn as_str(&self) -> &str;
    fn is_known(&self) -> bool;
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value outside the known set, kept verbatim.
            Other(String),
        }

        impl $name {
            pub const KNOWN: &'static [&'static str] = &[$($value),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Other(value) => value.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl CardEnum for $name {
            fn as_str(&self) -> &str {
                $name::as_str(self)
            }

            fn is_known(&self) -> bool {
                $name::is_known(self)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::from(value.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

string_enum! {
    /// Schema version a card requires.
    Version {
        V1_0 => "1.0",
        V1_1 => "1.1",
        V1_2 => "1.2",
        V1_3 => "1.3",
        V1_4 => "1.4",
        V1_5 => "1.5",
    }
}

string_enum! {
    ImageFillMode {
        Cover => "cover",
        RepeatHorizontally => "repeatHorizontally",
        RepeatVertically => "repeatVertically",
        Repeat => "repeat",
    }
}

string_enum! {
    HorizontalAlignment {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

string_enum! {
    VerticalAlignment {
        Top => "top",
        Center => "center",
        Bottom => "bottom",
    }
}

string_enum! {
    VerticalContentAlignment {
        Top => "top",
        Center => "center",
        Bottom => "bottom",
    }
}

string_enum! {
    /// Controls which inputs are gathered by `Action.Submit` and `Action.Execute`.
    AssociatedInputs {
        Auto => "Auto",
        None => "None",
    }
}

string_enum! {
    BlockElementHeight {
        Auto => "auto",
        Stretch => "stretch",
    }
}

string_enum! {
    Spacing {
        Default => "default",
        None => "none",
        Small => "small",
        Medium => "medium",
        Large => "large",
        ExtraLarge => "extraLarge",
        Padding => "padding",
    }
}

string_enum! {
    ImageSize {
        Auto => "auto",
        Stretch => "stretch",
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

string_enum! {
    ImageStyle {
        Default => "default",
        Person => "person",
    }
}

string_enum! {
    Colors {
        Default => "default",
        Dark => "dark",
        Light => "light",
        Accent => "accent",
        Good => "good",
        Warning => "warning",
        Attention => "attention",
    }
}

string_enum! {
    FontType {
        Default => "default",
        Monospace => "monospace",
    }
}

string_enum! {
    FontSize {
        Default => "default",
        Small => "small",
        Medium => "medium",
        Large => "large",
        ExtraLarge => "extraLarge",
    }
}

string_enum! {
    FontWeight {
        Default => "default",
        Lighter => "lighter",
        Bolder => "bolder",
    }
}

string_enum! {
    TextBlockStyle {
        Default => "default",
        Heading => "heading",
    }
}

string_enum! {
    ContainerStyle {
        Default => "default",
        Emphasis => "emphasis",
        Good => "good",
        Attention => "attention",
        Warning => "warning",
        Accent => "accent",
    }
}

string_enum! {
    ActionStyle {
        /// Displayed as normal.
        Default => "default",
        /// Displayed with a positive style, typically the accent color.
        Positive => "positive",
        /// Displayed with a destructive style, typically red.
        Destructive => "destructive",
    }
}

string_enum! {
    ActionMode {
        /// Shown as a button.
        Primary => "primary",
        /// Placed in an overflow menu.
        Secondary => "secondary",
    }
}

string_enum! {
    TextInputStyle {
        Text => "text",
        Tel => "tel",
        Url => "url",
        Email => "email",
        Password => "password",
    }
}

string_enum! {
    ChoiceInputStyle {
        Compact => "compact",
        Expanded => "expanded",
        Filtered => "filtered",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_values_map_to_variants() {
        assert_eq!(Spacing::from("extraLarge"), Spacing::ExtraLarge);
        assert_eq!(Version::from("1.5"), Version::V1_5);
        assert!(ImageSize::Medium.is_known());
        assert_eq!(ImageSize::KNOWN.len(), 5);
    }

    #[test]
    fn unknown_values_survive_a_round_trip() {
        let value: Colors = serde_json::from_value(json!("magenta")).unwrap();
        assert_eq!(value, Colors::Other("magenta".into()));
        assert!(!value.is_known());
        assert_eq!(serde_json::to_value(&value).unwrap(), json!("magenta"));
    }

    #[test]
    fn membership_is_case_sensitive() {
        assert_eq!(
            AssociatedInputs::from("auto"),
            AssociatedInputs::Other("auto".into())
        );
        assert_eq!(AssociatedInputs::from("Auto").to_string(), "Auto");
    }
}
