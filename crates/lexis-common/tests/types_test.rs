//! Tests for the shared translation data model.

use lexis_common::{args, ArgValue, PluralCategory, PluralForms, TranslationValue, Variant};

#[test]
fn test_translation_value_from_json_shapes() {
    let scalar: TranslationValue = serde_json::from_str(r#""Hello %{name}""#).unwrap();
    assert_eq!(scalar, TranslationValue::Scalar("Hello %{name}".into()));

    let plural: TranslationValue =
        serde_json::from_str(r#"{"one": "1 mail", "many": "%{count} mails"}"#).unwrap();
    let expected = PluralForms::new()
        .with(PluralCategory::One, "1 mail")
        .with(PluralCategory::Many, "%{count} mails");
    assert_eq!(plural, TranslationValue::Plural(expected.clone()));

    let variants: TranslationValue =
        serde_json::from_str(r#"["Hi", {"one": "1 mail", "many": "%{count} mails"}]"#).unwrap();
    assert_eq!(
        variants,
        TranslationValue::Variants(vec![Variant::from("Hi"), Variant::Plural(expected)])
    );
}

#[test]
fn test_unknown_category_is_rejected() {
    let result: Result<TranslationValue, _> = serde_json::from_str(r#"{"other": "x"}"#);
    assert!(result.is_err());
}

#[test]
fn test_plural_forms_iterate_in_selection_order() {
    let forms: PluralForms = [
        (PluralCategory::Many, "m"),
        (PluralCategory::Zero, "z"),
        (PluralCategory::Few, "f"),
    ]
    .into_iter()
    .collect();

    let order: Vec<_> = forms.iter().map(|(category, _)| category).collect();
    assert_eq!(
        order,
        vec![PluralCategory::Zero, PluralCategory::Few, PluralCategory::Many]
    );
    assert!(!forms.contains(PluralCategory::One));
}

#[test]
fn test_arg_value_display() {
    let args = args!["name" => "Ann", "count" => 3, "ratio" => 0.5, "flag" => false];
    assert_eq!(args["name"].to_string(), "Ann");
    assert_eq!(args["count"].to_string(), "3");
    assert_eq!(args["ratio"].to_string(), "0.5");
    assert_eq!(args["flag"].to_string(), "false");
    assert_eq!(args["count"], ArgValue::Int(3));
}
