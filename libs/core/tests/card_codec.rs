use acard_core::adaptivecards::*;
use acard_testutil::load_card;
use serde_json::{Value, json};

const FIXTURES: &str = "fixtures/cards";

fn every_element() -> Vec<Element> {
    vec![
        ActionSet::new()
            .with_action(ActionOpenUrl::new("https://example.com").with_title("Open"))
            .into(),
        Container::new()
            .with_style(ContainerStyle::Emphasis)
            .with_item(TextBlock::new("inside"))
            .into(),
        ColumnSet::new()
            .with_column(
                Column::new()
                    .with_width(ColumnWidth::auto())
                    .with_item(TextBlock::new("left")),
            )
            .with_column(
                Column::new()
                    .with_width(ColumnWidth::weight(2))
                    .with_item(TextBlock::new("right")),
            )
            .into(),
        FactSet::new().with_fact("Owner", "Ada").into(),
        ImageSet::new()
            .with_image(Image::new("https://example.com/1.png"))
            .with_image(Image::new("https://example.com/2.png").with_alt_text("second"))
            .into(),
        Image::new("https://example.com/a.png")
            .with_size(ImageSize::Small)
            .with_select_action(ActionSubmit::new())
            .into(),
        Media::new()
            .with_source(MediaSource::new("video/mp4", "https://example.com/a.mp4"))
            .into(),
        RichTextBlock::new()
            .with_run(TextRun::new("plain"))
            .with_run(TextRun::new("bold").with_weight(FontWeight::Bolder))
            .into(),
        TextBlock::new("hello")
            .with_wrap(true)
            .with_size(FontSize::Large)
            .into(),
        Table::new()
            .with_row(TableRow::new().with_cell(TableCell::new().with_item(TextBlock::new("a1"))))
            .with_row(TableRow::new().with_cell(TableCell::new().with_item(TextBlock::new("b1"))))
            .into(),
        InputText::new("name").with_placeholder("Your name").into(),
        InputNumber::new("seats").with_range(1, 10).into(),
        InputDate::new("day").into(),
        InputTime::new("at").into(),
        InputToggle::new("remind", "Remind me").into(),
        InputChoiceSet::new("room")
            .with_choice("Red", "red")
            .with_choice("Blue", "blue")
            .into(),
    ]
}

fn every_action() -> Vec<Action> {
    vec![
        ActionOpenUrl::new("https://go.dev").with_title("Go").into(),
        ActionSubmit::new().with_data(json!({ "id": 7 })).into(),
        ActionShowCard::new(AdaptiveCard::new().with_element(TextBlock::new("more"))).into(),
        ActionToggleVisibility::new()
            .with_target(TargetElement::toggle("details"))
            .with_target(TargetElement::hide("summary"))
            .into(),
        ActionExecute::new("approve")
            .with_data(json!({ "ticket": 42 }))
            .into(),
    ]
}

#[test]
fn every_element_kind_round_trips() {
    for element in every_element() {
        let wire = encode_element(&element).expect("encode");
        let back = decode_element(wire.clone()).expect("decode");
        assert_eq!(back, element, "{}", element.kind());
        assert_eq!(encode_element(&back).expect("re-encode"), wire);
    }
}

#[test]
fn every_action_kind_round_trips() {
    for action in every_action() {
        let wire = encode_action(&action).expect("encode");
        let back = decode_action(wire).expect("decode");
        assert_eq!(back, action, "{}", action.kind());
    }
}

#[test]
fn discriminator_always_matches_the_variant() {
    let kinds: Vec<&str> = every_element().iter().map(Element::kind).collect();
    assert_eq!(kinds.len(), Element::KINDS.len() - 1);
    for element in every_element() {
        let wire = encode_element(&element).expect("encode");
        let obj = wire.as_object().expect("object");
        assert_eq!(obj.keys().next().map(String::as_str), Some("type"));
        assert_eq!(wire["type"], element.kind());
    }
    for action in every_action() {
        assert_eq!(encode_action(&action).expect("encode")["type"], action.kind());
    }
}

#[test]
fn nested_nodes_carry_their_discriminators() {
    let table: Element = Table::new()
        .with_row(TableRow::new().with_cell(TableCell::new().with_item(TextBlock::new("x"))))
        .into();
    let wire = encode_element(&table).expect("encode");
    assert_eq!(wire["rows"][0]["type"], "TableRow");
    assert_eq!(wire["rows"][0]["cells"][0]["type"], "TableCell");

    let columns: Element = ColumnSet::new().with_column(Column::new()).into();
    let wire = encode_element(&columns).expect("encode");
    assert_eq!(wire["columns"][0], json!({ "type": "Column" }));
}

#[test]
fn container_scenario_survives_a_round_trip() {
    let card = AdaptiveCard::new()
        .with_element(
            Container::new()
                .with_item(TextBlock::new("Hello"))
                .with_item(TextBlock::new("World")),
        )
        .with_element(
            ActionSet::new().with_action(ActionOpenUrl::new("https://go.dev").with_title("Go")),
        );
    card.validate().expect("valid card");

    let decoded = decode_str(&encode_string(&card).expect("encode")).expect("decode");
    assert_eq!(decoded, card);

    let Element::Container(container) = &decoded.body[0] else {
        panic!("body[0] should be a container");
    };
    let texts: Vec<&str> = container
        .items
        .iter()
        .map(|item| match item {
            Element::TextBlock(block) => block.text.as_str(),
            other => panic!("unexpected {}", other.kind()),
        })
        .collect();
    assert_eq!(texts, ["Hello", "World"]);

    let Element::ActionSet(set) = &decoded.body[1] else {
        panic!("body[1] should be an action set");
    };
    let Action::OpenUrl(open) = &set.actions[0] else {
        panic!("expected Action.OpenUrl");
    };
    assert_eq!(open.props.title, "Go");
    assert_eq!(open.url, "https://go.dev");
}

#[test]
fn schema_required_arrays_are_written_when_empty() {
    let cases: Vec<(Element, Value)> = vec![
        (FactSet::new().into(), json!({ "type": "FactSet", "facts": [] })),
        (ActionSet::new().into(), json!({ "type": "ActionSet", "actions": [] })),
        (Media::new().into(), json!({ "type": "Media", "sources": [] })),
        (ImageSet::new().into(), json!({ "type": "ImageSet", "images": [] })),
        (ColumnSet::new().into(), json!({ "type": "ColumnSet", "columns": [] })),
    ];
    for (element, expected) in cases {
        assert_eq!(encode_element(&element).expect("encode"), expected);
    }
}

#[test]
fn optional_fields_are_omitted_not_null() {
    let wire = encode(&AdaptiveCard::new()).expect("encode");
    assert_eq!(
        wire,
        json!({
            "type": "AdaptiveCard",
            "$schema": SCHEMA_URI,
            "version": "1.3"
        })
    );
}

#[test]
fn fixtures_decode_validate_and_round_trip() {
    let names = acard_testutil::fixture_names(FIXTURES, "json").expect("list fixtures");
    assert!(names.len() >= 3, "fixtures missing: {names:?}");
    for name in names {
        let value = load_card!(&format!("{FIXTURES}/{name}.json"));
        let card = decode(value).unwrap_or_else(|err| panic!("{name}: {err}"));
        card.validate_with(ValidationOptions::collect().strict())
            .unwrap_or_else(|err| panic!("{name}: {err}"));
        let again = decode(encode(&card).expect("encode")).expect("decode");
        assert_eq!(again, card, "{name}");
    }
}

#[test]
fn yaml_fixture_expands_shorthands() {
    let card = decode(load_card!(&format!("{FIXTURES}/layout.yaml"))).expect("decode");
    card.validate().expect("valid");

    let bg = card.background_image.as_ref().expect("background image");
    assert_eq!(bg.url, "https://example.com/background.png");
    assert_eq!(card.select_action.len(), 1);

    let Element::ColumnSet(set) = &card.body[0] else {
        panic!("expected a column set");
    };
    assert_eq!(set.columns[0].width, Some(ColumnWidth::auto()));
    assert_eq!(set.columns[1].width, Some(ColumnWidth::weight(2)));
    let Element::RichTextBlock(rich) = &set.columns[1].items[0] else {
        panic!("expected a rich text block");
    };
    assert_eq!(rich.inlines[0].text, "Status: ");
    assert_eq!(rich.inlines[1].weight, Some(FontWeight::Bolder));

    let Action::ToggleVisibility(toggle) = &card.actions[0] else {
        panic!("expected Action.ToggleVisibility");
    };
    assert_eq!(toggle.target_elements[0], TargetElement::toggle("summary"));
    assert_eq!(toggle.target_elements[1], TargetElement::hide("summary"));

    let wire = encode(&card).expect("encode");
    assert_eq!(wire["body"][0]["columns"][0]["type"], "Column");
    assert_eq!(wire["body"][3]["rows"][1]["cells"][1]["items"][0]["text"], "42%");
    assert_eq!(wire["selectAction"][0]["type"], "Action.OpenUrl");
}

#[test]
fn unknown_values_are_kept_verbatim() {
    let card = decode(json!({
        "type": "AdaptiveCard",
        "version": "1.6",
        "body": [{ "type": "TextBlock", "text": "x", "weight": "heavy" }]
    }))
    .expect("decode");
    assert_eq!(card.version, Some(Version::Other("1.6".into())));
    card.validate().expect("permissive by default");

    let err = card
        .validate_with(ValidationOptions::collect().strict())
        .expect_err("strict rejects unknown values");
    assert_eq!(err.len(), 2);
    assert!(err.errors().iter().all(|e| e.code() == "invalid_field_value"));

    let wire = encode(&card).expect("encode");
    assert_eq!(wire["version"], "1.6");
    assert_eq!(wire["body"][0]["weight"], "heavy");
}

#[test]
fn unknown_kinds_fail_with_their_path() {
    let err = decode(json!({
        "type": "AdaptiveCard",
        "version": "1.3",
        "body": [
            { "type": "TextBlock", "text": "ok" },
            { "type": "Container", "items": [{ "type": "Carousel" }] }
        ]
    }))
    .expect_err("unknown kind");
    assert_eq!(
        err,
        CardError::UnknownKind {
            path: NodePath::root().field("body").index(1).field("items").index(0),
            kind: "Carousel".into(),
        }
    );
}

#[test]
fn nodes_in_the_wrong_slot_are_type_mismatches() {
    let cases = [
        (
            json!({
                "type": "AdaptiveCard",
                "body": [{ "type": "Image", "url": "https://example.com/a.png",
                           "selectAction": { "type": "Action.ShowCard", "card": { "type": "AdaptiveCard" } } }]
            }),
            "$.body[0].selectAction",
            "Action.ShowCard",
        ),
        (
            json!({ "type": "AdaptiveCard", "body": [{ "type": "Column", "items": [] }] }),
            "$.body[0]",
            "Column",
        ),
        (
            json!({ "type": "AdaptiveCard", "actions": [{ "type": "TextBlock", "text": "x" }] }),
            "$.actions[0]",
            "TextBlock",
        ),
        (
            json!({
                "type": "AdaptiveCard",
                "refresh": { "action": { "type": "Action.Submit" } }
            }),
            "$.refresh.action",
            "Action.Submit",
        ),
        (
            json!({ "type": "TextBlock", "text": "not a card" }),
            "$",
            "TextBlock",
        ),
    ];
    for (value, path, found) in cases {
        match decode(value) {
            Err(CardError::TypeMismatch { path: at, found: kind, .. }) => {
                assert_eq!(at.to_string(), path);
                assert_eq!(kind, found);
            }
            other => panic!("{path}: expected a type mismatch, got {other:?}"),
        }
    }
}

#[test]
fn nested_discriminators_are_checked() {
    let err = decode(json!({
        "type": "AdaptiveCard",
        "body": [{ "type": "ColumnSet", "columns": [{ "type": "Container" }] }]
    }))
    .expect_err("container is not a column");
    assert_eq!(err.code(), "type_mismatch");
    assert_eq!(err.path().to_string(), "$.body[0].columns[0]");
}

#[test]
fn structural_errors_are_malformed_wire() {
    let cases = [
        (json!([]), "$"),
        (json!({ "type": "AdaptiveCard", "body": {} }), "$.body"),
        (json!({ "type": "AdaptiveCard", "body": [{ "type": 7 }] }), "$.body[0]"),
        (
            json!({ "type": "AdaptiveCard", "body": [{ "type": "FactSet", "facts": "none" }] }),
            "$.body[0]",
        ),
    ];
    for (value, path) in cases {
        let err = decode(value).expect_err("malformed");
        assert_eq!(err.code(), "malformed_wire", "{path}: {err}");
        assert_eq!(err.path().to_string(), path);
    }
}

#[test]
fn select_action_capability_excludes_show_card() {
    assert!(!SelectAction::KINDS.contains(&ActionShowCard::KIND));
    let show: Action = ActionShowCard::new(AdaptiveCard::new()).into();
    assert!(SelectAction::try_from(show).is_err());
    let open: Action = ActionOpenUrl::new("https://example.com").into();
    let select = SelectAction::try_from(open.clone()).expect("open url is selectable");
    assert_eq!(Action::from(select), open);
}

#[cfg(feature = "proptest")]
mod prop {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn text_cards_round_trip(texts in vec(".*", 0..6), wrap in any::<bool>()) {
            let mut card = AdaptiveCard::new();
            for text in &texts {
                card.push_element(TextBlock::new(text.as_str()).with_wrap(wrap));
            }

            let wire = encode(&card).expect("encode");
            let back = decode(wire.clone()).expect("decode");
            prop_assert_eq!(&back, &card);
            prop_assert_eq!(encode(&back).expect("re-encode"), wire);
        }

        #[test]
        fn container_order_is_preserved(texts in vec("[a-z]{1,8}", 1..8)) {
            let mut container = Container::new();
            for text in &texts {
                container.push(TextBlock::new(text.as_str()));
            }
            let card = AdaptiveCard::new().with_element(container);
            let back = decode_str(&encode_string(&card).expect("encode")).expect("decode");
            let Element::Container(container) = &back.body[0] else {
                panic!("expected a container");
            };
            let decoded: Vec<String> = container
                .items
                .iter()
                .filter_map(|item| match item {
                    Element::TextBlock(block) => Some(block.text.clone()),
                    _ => None,
                })
                .collect();
            prop_assert_eq!(decoded, texts);
        }
    }
}

#[test]
fn explicit_null_payloads_survive_a_round_trip() {
    let wire = json!({ "type": "Action.Submit", "data": null });
    let action = decode_action(wire.clone()).expect("decode");
    match &action {
        Action::Submit(submit) => assert_eq!(submit.data, Some(Value::Null)),
        other => panic!("expected a submit action, got {other:?}"),
    }
    assert_eq!(encode_action(&action).expect("encode"), wire);

    let wire = json!({ "type": "Action.Execute", "verb": "go", "data": null, "requires": null });
    let action = decode_action(wire.clone()).expect("decode");
    assert_eq!(encode_action(&action).expect("encode"), wire);

    let wire = json!({ "type": "TextBlock", "text": "hi", "fallback": null });
    let element = decode_element(wire.clone()).expect("decode");
    match &element {
        Element::TextBlock(block) => assert_eq!(block.props.fallback, Some(Value::Null)),
        other => panic!("expected a text block, got {other:?}"),
    }
    assert_eq!(encode_element(&element).expect("encode"), wire);
}

#[test]
fn absent_payloads_stay_absent() {
    let wire = json!({ "type": "Action.Submit", "title": "Send" });
    let action = decode_action(wire.clone()).expect("decode");
    match &action {
        Action::Submit(submit) => {
            assert_eq!(submit.data, None);
            assert_eq!(submit.props.fallback, None);
        }
        other => panic!("expected a submit action, got {other:?}"),
    }
    assert_eq!(encode_action(&action).expect("encode"), wire);

    let wire = json!({ "type": "TextBlock", "text": "hi" });
    let element = decode_element(wire.clone()).expect("decode");
    assert_eq!(encode_element(&element).expect("encode"), wire);
}
