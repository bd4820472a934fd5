//! Elements that own ordered children.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::card::BackgroundImage;
use super::elements::{ElementProps, Image};
use super::enums::{
    ContainerStyle, HorizontalAlignment, ImageSize, VerticalAlignment, VerticalContentAlignment,
};
use super::node::{Action, Element, Node, SelectAction, tagged};
use super::path::NodePath;
use super::validate::{Flow, Validate, Validator};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionSet {
    pub actions: Vec<Action>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for ActionSet {
    const KIND: &'static str = "ActionSet";
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: impl Into<Action>) -> &mut Self {
        self.actions.push(action.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }
}

impl Validate for ActionSet {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        self.props.validate_at(path, Self::KIND, v)?;
        v.children(path, "actions", &self.actions)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub items: Vec<Element>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<SelectAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_content_alignment: Option<VerticalContentAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub min_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for Container {
    const KIND: &'static str = "Container";
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.items.push(element.into());
        self
    }

    pub fn with_item(mut self, element: impl Into<Element>) -> Self {
        self.items.push(element.into());
        self
    }

    pub fn with_style(mut self, style: ContainerStyle) -> Self {
        self.style = Some(style);
        self
    }
}

impl Validate for Container {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.check_enum(path, Self::KIND, "style", self.style.as_ref())?;
        v.check_enum(
            path,
            Self::KIND,
            "verticalContentAlignment",
            self.vertical_content_alignment.as_ref(),
        )?;
        self.props.validate_at(path, Self::KIND, v)?;
        v.optional_child(path, "backgroundImage", self.background_image.as_ref())?;
        v.optional_child(path, "selectAction", self.select_action.as_ref())?;
        v.children(path, "items", &self.items)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnSet {
    #[serde(with = "tagged::vec")]
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<SelectAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleed: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub min_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for ColumnSet {
    const KIND: &'static str = "ColumnSet";
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_column(&mut self, column: Column) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

impl Validate for ColumnSet {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.check_enum(path, Self::KIND, "style", self.style.as_ref())?;
        v.check_enum(
            path,
            Self::KIND,
            "horizontalAlignment",
            self.horizontal_alignment.as_ref(),
        )?;
        self.props.validate_at(path, Self::KIND, v)?;
        v.optional_child(path, "selectAction", self.select_action.as_ref())?;
        v.children(path, "columns", &self.columns)
    }
}

/// Width of a column or table column: a relative weight, or `"auto"`, `"stretch"`, `"<n>px"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnWidth {
    Weight(Number),
    Keyword(String),
}

impl ColumnWidth {
    pub fn auto() -> Self {
        Self::Keyword("auto".into())
    }

    pub fn stretch() -> Self {
        Self::Keyword("stretch".into())
    }

    pub fn weight(weight: u32) -> Self {
        Self::Weight(Number::from(weight))
    }

    pub fn pixels(px: u32) -> Self {
        Self::Keyword(format!("{px}px"))
    }

    fn check(&self) -> Result<(), String> {
        match self {
            Self::Weight(weight) if weight.as_f64().is_some_and(|w| w >= 0.0) => Ok(()),
            Self::Weight(weight) => Err(format!("weight {weight} must not be negative")),
            Self::Keyword(keyword) => {
                let pixels = keyword
                    .strip_suffix("px")
                    .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
                if pixels || keyword == "auto" || keyword == "stretch" {
                    Ok(())
                } else {
                    Err(format!("'{keyword}' is not auto, stretch or a pixel width"))
                }
            }
        }
    }

    fn validate_at(&self, path: &NodePath, kind: &'static str, v: &mut Validator) -> Flow {
        // Negative weights are always wrong; unknown keywords only fail strict passes.
        match self.check() {
            Err(reason) if v.options().strict || matches!(self, Self::Weight(_)) => {
                v.invalid(path, kind, "width", reason)
            }
            _ => Ok(()),
        }
    }
}

/// A column inside a `ColumnSet`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Column {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Element>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleed: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub min_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<SelectAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_content_alignment: Option<VerticalContentAlignment>,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for Column {
    const KIND: &'static str = "Column";
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.items.push(element.into());
        self
    }

    pub fn with_item(mut self, element: impl Into<Element>) -> Self {
        self.items.push(element.into());
        self
    }

    pub fn with_width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }
}

impl Validate for Column {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        if let Some(width) = &self.width {
            width.validate_at(path, Self::KIND, v)?;
        }
        v.check_enum(path, Self::KIND, "style", self.style.as_ref())?;
        v.check_enum(
            path,
            Self::KIND,
            "verticalContentAlignment",
            self.vertical_content_alignment.as_ref(),
        )?;
        self.props.validate_at(path, Self::KIND, v)?;
        v.optional_child(path, "backgroundImage", self.background_image.as_ref())?;
        v.optional_child(path, "selectAction", self.select_action.as_ref())?;
        v.children(path, "items", &self.items)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FactSet {
    pub facts: Vec<Fact>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for FactSet {
    const KIND: &'static str = "FactSet";
}

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fact: Fact) -> &mut Self {
        self.facts.push(fact);
        self
    }

    pub fn with_fact(mut self, title: impl Into<String>, value: impl Into<String>) -> Self {
        self.facts.push(Fact::new(title, value));
        self
    }
}

impl Validate for FactSet {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        self.props.validate_at(path, Self::KIND, v)?;
        v.children(path, "facts", &self.facts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

impl Fact {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

impl Validate for Fact {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.require_text(path, "Fact", "title", &self.title)?;
        v.require_text(path, "Fact", "value", &self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSet {
    #[serde(with = "tagged::vec")]
    pub images: Vec<Image>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for ImageSet {
    const KIND: &'static str = "ImageSet";
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, image: Image) -> &mut Self {
        self.images.push(image);
        self
    }

    pub fn with_image(mut self, image: Image) -> Self {
        self.images.push(image);
        self
    }
}

impl Validate for ImageSet {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.check_enum(path, Self::KIND, "imageSize", self.image_size.as_ref())?;
        self.props.validate_at(path, Self::KIND, v)?;
        v.children(path, "images", &self.images)
    }
}

/// Grid of rows and cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<TableColumnDefinition>,
    #[serde(with = "tagged::vec", skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<TableRow>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_row_as_header: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_grid_lines: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_style: Option<ContainerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_cell_content_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_cell_content_alignment: Option<VerticalAlignment>,
    #[serde(flatten)]
    pub props: ElementProps,
}

impl Node for Table {
    const KIND: &'static str = "Table";
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_column(&mut self, column: TableColumnDefinition) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn push_row(&mut self, row: TableRow) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn with_row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }
}

impl Validate for Table {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.check_enum(path, Self::KIND, "gridStyle", self.grid_style.as_ref())?;
        v.check_enum(
            path,
            Self::KIND,
            "horizontalCellContentAlignment",
            self.horizontal_cell_content_alignment.as_ref(),
        )?;
        v.check_enum(
            path,
            Self::KIND,
            "verticalCellContentAlignment",
            self.vertical_cell_content_alignment.as_ref(),
        )?;
        self.props.validate_at(path, Self::KIND, v)?;
        v.children(path, "columns", &self.columns)?;
        v.children(path, "rows", &self.rows)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableColumnDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_cell_content_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_cell_content_alignment: Option<VerticalAlignment>,
}

impl TableColumnDefinition {
    pub fn new(width: ColumnWidth) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }
}

impl Validate for TableColumnDefinition {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        const KIND: &str = "TableColumnDefinition";
        if let Some(width) = &self.width {
            width.validate_at(path, KIND, v)?;
        }
        v.check_enum(
            path,
            KIND,
            "horizontalCellContentAlignment",
            self.horizontal_cell_content_alignment.as_ref(),
        )?;
        v.check_enum(
            path,
            KIND,
            "verticalCellContentAlignment",
            self.vertical_cell_content_alignment.as_ref(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRow {
    #[serde(with = "tagged::vec", skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<TableCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_cell_content_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_cell_content_alignment: Option<VerticalAlignment>,
}

impl Node for TableRow {
    const KIND: &'static str = "TableRow";
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: TableCell) -> &mut Self {
        self.cells.push(cell);
        self
    }

    pub fn with_cell(mut self, cell: TableCell) -> Self {
        self.cells.push(cell);
        self
    }
}

impl Validate for TableRow {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.check_enum(path, Self::KIND, "style", self.style.as_ref())?;
        v.check_enum(
            path,
            Self::KIND,
            "horizontalCellContentAlignment",
            self.horizontal_cell_content_alignment.as_ref(),
        )?;
        v.check_enum(
            path,
            Self::KIND,
            "verticalCellContentAlignment",
            self.vertical_cell_content_alignment.as_ref(),
        )?;
        v.children(path, "cells", &self.cells)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    pub items: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<SelectAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_content_alignment: Option<VerticalContentAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub min_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
}

impl Node for TableCell {
    const KIND: &'static str = "TableCell";
}

impl TableCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.items.push(element.into());
        self
    }

    pub fn with_item(mut self, element: impl Into<Element>) -> Self {
        self.items.push(element.into());
        self
    }
}

impl Validate for TableCell {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        v.check_enum(path, Self::KIND, "style", self.style.as_ref())?;
        v.check_enum(
            path,
            Self::KIND,
            "verticalContentAlignment",
            self.vertical_content_alignment.as_ref(),
        )?;
        v.optional_child(path, "backgroundImage", self.background_image.as_ref())?;
        v.optional_child(path, "selectAction", self.select_action.as_ref())?;
        v.children(path, "items", &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptivecards::{CardError, TextBlock, ValidationOptions};

    #[test]
    fn child_errors_carry_their_index() {
        let container = Container::new()
            .with_item(TextBlock::new("ok"))
            .with_item(TextBlock::new(""));
        let err = container.validate().unwrap_err();
        assert_eq!(err.path().to_string(), "$.items[1]");
    }

    #[test]
    fn columns_inside_a_column_set_validate_recursively() {
        let set = ColumnSet::new()
            .with_column(Column::new().with_item(TextBlock::new("left")))
            .with_column(Column::new().with_item(TextBlock::new("")));
        let err = set.validate().unwrap_err();
        assert_eq!(err.path().to_string(), "$.columns[1].items[0]");
    }

    #[test]
    fn a_bare_column_in_a_container_is_a_type_mismatch() {
        let container = Container::new().with_item(Column::new());
        let err = container.validate().unwrap_err();
        assert!(matches!(err, CardError::TypeMismatch { .. }));
    }

    #[test]
    fn facts_need_title_and_value() {
        let set = FactSet::new().with_fact("Owner", "");
        let err = set.validate().unwrap_err();
        assert!(matches!(
            err,
            CardError::MissingRequiredField {
                kind: "Fact",
                field: "value",
                ..
            }
        ));
    }

    #[test]
    fn column_width_keywords_are_checked_only_when_strict() {
        let column = Column::new().with_width(ColumnWidth::Keyword("wide".into()));
        assert!(column.validate().is_ok());
        assert!(
            column
                .validate_with(ValidationOptions::default().strict())
                .is_err()
        );
        assert!(
            Column::new()
                .with_width(ColumnWidth::pixels(80))
                .validate_with(ValidationOptions::default().strict())
                .is_ok()
        );
    }

    #[test]
    fn table_cells_validate_their_items() {
        let table = Table::new().with_row(
            TableRow::new().with_cell(TableCell::new().with_item(TextBlock::new(" "))),
        );
        let err = table.validate().unwrap_err();
        assert_eq!(err.path().to_string(), "$.rows[0].cells[0].items[0]");
    }
}
