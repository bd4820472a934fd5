//! Node capabilities: the discriminator every concrete kind carries and the three
//! polymorphic slots (`Element`, `Action`, `SelectAction`) nodes can occupy.

use serde::{Deserialize, Serialize};

use super::actions::{
    ActionExecute, ActionOpenUrl, ActionShowCard, ActionSubmit, ActionToggleVisibility,
};
use super::containers::{ActionSet, Column, ColumnSet, Container, FactSet, ImageSet, Table};
use super::elements::{Image, Media, RichTextBlock, TextBlock};
use super::error::CardError;
use super::inputs::{InputChoiceSet, InputDate, InputNumber, InputText, InputTime, InputToggle};
use super::path::NodePath;
use super::validate::{Flow, Validate, Validator};

/// A concrete node kind with a fixed wire discriminator.
pub trait Node {
    const KIND: &'static str;
}

macro_rules! node_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type")]
        pub enum $name {
            $($(#[$vmeta])* $variant($ty),)+
        }

        impl $name {
            /// Discriminators of every variant, in declaration order.
            pub const KINDS: &'static [&'static str] = &[$(<$ty as Node>::KIND),+];

            /// The wire discriminator of the wrapped node.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => <$ty as Node>::KIND,)+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )+
    };
}

node_enum! {
    /// Anything that can sit in a body, container or column.
    Element {
        ActionSet(ActionSet),
        Container(Container),
        ColumnSet(ColumnSet),
        Column(Column),
        FactSet(FactSet),
        ImageSet(ImageSet),
        Image(Image),
        Media(Media),
        RichTextBlock(RichTextBlock),
        TextBlock(TextBlock),
        Table(Table),
        #[serde(rename = "Input.Text")]
        InputText(InputText),
        #[serde(rename = "Input.Number")]
        InputNumber(InputNumber),
        #[serde(rename = "Input.Date")]
        InputDate(InputDate),
        #[serde(rename = "Input.Time")]
        InputTime(InputTime),
        #[serde(rename = "Input.Toggle")]
        InputToggle(InputToggle),
        #[serde(rename = "Input.ChoiceSet")]
        InputChoiceSet(InputChoiceSet),
    }
}

node_enum! {
    /// Buttons shown in a card's action bar or an `ActionSet`.
    Action {
        #[serde(rename = "Action.OpenUrl")]
        OpenUrl(ActionOpenUrl),
        #[serde(rename = "Action.Submit")]
        Submit(ActionSubmit),
        #[serde(rename = "Action.ShowCard")]
        ShowCard(ActionShowCard),
        #[serde(rename = "Action.ToggleVisibility")]
        ToggleVisibility(ActionToggleVisibility),
        #[serde(rename = "Action.Execute")]
        Execute(ActionExecute),
    }
}

node_enum! {
    /// Tap targets for non-action nodes. `Action.ShowCard` has no variant here.
    SelectAction {
        #[serde(rename = "Action.OpenUrl")]
        OpenUrl(ActionOpenUrl),
        #[serde(rename = "Action.Submit")]
        Submit(ActionSubmit),
        #[serde(rename = "Action.ToggleVisibility")]
        ToggleVisibility(ActionToggleVisibility),
        #[serde(rename = "Action.Execute")]
        Execute(ActionExecute),
    }
}

impl From<SelectAction> for Action {
    fn from(action: SelectAction) -> Self {
        match action {
            SelectAction::OpenUrl(a) => Self::OpenUrl(a),
            SelectAction::Submit(a) => Self::Submit(a),
            SelectAction::ToggleVisibility(a) => Self::ToggleVisibility(a),
            SelectAction::Execute(a) => Self::Execute(a),
        }
    }
}

/// Fails with the original action when it cannot be used as a tap target.
impl TryFrom<Action> for SelectAction {
    type Error = Action;

    fn try_from(action: Action) -> Result<Self, Self::Error> {
        match action {
            Action::OpenUrl(a) => Ok(Self::OpenUrl(a)),
            Action::Submit(a) => Ok(Self::Submit(a)),
            Action::ToggleVisibility(a) => Ok(Self::ToggleVisibility(a)),
            Action::Execute(a) => Ok(Self::Execute(a)),
            other @ Action::ShowCard(_) => Err(other),
        }
    }
}

impl Validate for Element {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        match self {
            Self::ActionSet(node) => node.validate_at(path, v),
            Self::Container(node) => node.validate_at(path, v),
            Self::ColumnSet(node) => node.validate_at(path, v),
            // Columns are only meaningful inside `ColumnSet.columns`, which holds them directly.
            Self::Column(_) => v.report(CardError::TypeMismatch {
                path: path.clone(),
                expected: "element (Column is only allowed in ColumnSet.columns)",
                found: Column::KIND.to_string(),
            }),
            Self::FactSet(node) => node.validate_at(path, v),
            Self::ImageSet(node) => node.validate_at(path, v),
            Self::Image(node) => node.validate_at(path, v),
            Self::Media(node) => node.validate_at(path, v),
            Self::RichTextBlock(node) => node.validate_at(path, v),
            Self::TextBlock(node) => node.validate_at(path, v),
            Self::Table(node) => node.validate_at(path, v),
            Self::InputText(node) => node.validate_at(path, v),
            Self::InputNumber(node) => node.validate_at(path, v),
            Self::InputDate(node) => node.validate_at(path, v),
            Self::InputTime(node) => node.validate_at(path, v),
            Self::InputToggle(node) => node.validate_at(path, v),
            Self::InputChoiceSet(node) => node.validate_at(path, v),
        }
    }
}

impl Validate for Action {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        match self {
            Self::OpenUrl(node) => node.validate_at(path, v),
            Self::Submit(node) => node.validate_at(path, v),
            Self::ShowCard(node) => node.validate_at(path, v),
            Self::ToggleVisibility(node) => node.validate_at(path, v),
            Self::Execute(node) => node.validate_at(path, v),
        }
    }
}

impl Validate for SelectAction {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        match self {
            Self::OpenUrl(node) => node.validate_at(path, v),
            Self::Submit(node) => node.validate_at(path, v),
            Self::ToggleVisibility(node) => node.validate_at(path, v),
            Self::Execute(node) => node.validate_at(path, v),
        }
    }
}

/// Serde adapters for nodes stored outside the capability enums (columns, text runs, images in
/// an image set, table rows and cells, the refresh action). They write the discriminator in front
/// of the node's own fields and check it on the way back in.
pub(crate) mod tagged {
    use serde::{Deserialize, Serialize};

    use super::Node;

    #[derive(Serialize)]
    struct Out<'a, T> {
        #[serde(rename = "type")]
        kind: &'static str,
        #[serde(flatten)]
        node: &'a T,
    }

    #[derive(Deserialize)]
    struct In<T> {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(flatten)]
        node: T,
    }

    impl<T: Node> In<T> {
        fn into_node<E: serde::de::Error>(self) -> Result<T, E> {
            match self.kind {
                Some(kind) if kind != T::KIND => Err(E::custom(format_args!(
                    "expected type '{}', found '{kind}'",
                    T::KIND
                ))),
                _ => Ok(self.node),
            }
        }
    }

    pub(crate) mod vec {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        use super::{In, Node, Out};

        pub(crate) fn serialize<T, S>(nodes: &[T], serializer: S) -> Result<S::Ok, S::Error>
        where
            T: Node + Serialize,
            S: Serializer,
        {
            serializer.collect_seq(nodes.iter().map(|node| Out {
                kind: T::KIND,
                node,
            }))
        }

        pub(crate) fn deserialize<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
        where
            T: Node + Deserialize<'de>,
            D: Deserializer<'de>,
        {
            Vec::<In<T>>::deserialize(deserializer)?
                .into_iter()
                .map(In::into_node)
                .collect()
        }
    }

    pub(crate) mod option {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        use super::{In, Node, Out};

        pub(crate) fn serialize<T, S>(node: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
        where
            T: Node + Serialize,
            S: Serializer,
        {
            match node {
                Some(node) => serializer.serialize_some(&Out {
                    kind: T::KIND,
                    node,
                }),
                None => serializer.serialize_none(),
            }
        }

        pub(crate) fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
        where
            T: Node + Deserialize<'de>,
            D: Deserializer<'de>,
        {
            Option::<In<T>>::deserialize(deserializer)?
                .map(In::into_node)
                .transpose()
        }
    }
}

/// Deserializer for free-form JSON fields. A key that is present always decodes to `Some`, so an
/// explicit `null` survives as `Some(Value::Null)`; an absent key takes the container default.
pub(crate) mod opaque {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Some)
    }
}
