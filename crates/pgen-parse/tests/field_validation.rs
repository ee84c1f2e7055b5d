use pgen_core::{DataType, DefaultValue, Error, Field};
use pgen_parse::{DecodeError, parse_str};

/// Wrap one field spec in a minimal document with a `status` enumeration.
fn document(field: &str) -> String {
    let mut spec = String::new();
    for (i, line) in field.lines().enumerate() {
        let prefix = if i == 0 { "    - " } else { "      " };
        spec.push_str(prefix);
        spec.push_str(line);
        spec.push('\n');
    }
    format!(
        "status:\n  type: enum\n  value: [active, inactive]\nusers:\n  type: table\n  db: main\n  fields:\n{spec}"
    )
}

fn build(field: &str) -> Result<Field, Error> {
    match parse_str(&document(field)) {
        Ok(mut metadata) => Ok(metadata.tables.remove(0).fields.remove(0)),
        Err(DecodeError::Schema(err)) => Err(err),
        Err(DecodeError::Yaml(err)) => panic!("fixture is not valid yaml: {err}"),
    }
}

fn build_err(field: &str) -> Error {
    build(field).expect_err("field should be rejected")
}

#[test]
fn primary_key_field_defaults_to_not_nullable() {
    let field = build("age: i32\npk: true").expect("valid field");
    assert_eq!(field.name, "age");
    assert_eq!(field.data_type, DataType::Integer);
    assert!(field.primary_key);
    assert!(!field.nullable);
}

#[test]
fn varchar_requires_size() {
    let err = build_err("name: str");
    assert_eq!(
        err.to_string(),
        "name: should have size. if size is not a consideration, 'text' should be used"
    );
    assert_eq!(err.code(), "conflict");

    let field = build("name: str\nsize: 64").expect("sized varchar");
    assert_eq!(field.size, Some(64));
}

#[test]
fn size_must_be_positive_integer() {
    assert_eq!(build_err("name: str\nsize: 0").code(), "invalid_value");
    assert_eq!(build_err("name: str\nsize: -4").code(), "invalid_value");
    assert_eq!(build_err("name: str\nsize: big").code(), "invalid_value");
}

#[test]
fn size_is_rejected_for_other_types() {
    let err = build_err("bio: text\nsize: 10");
    assert_eq!(
        err.to_string(),
        "bio: data type 'text' can not have 'size' attribute"
    );
    assert_eq!(err.code(), "incompatible_attribute");
}

#[test]
fn timestamptz_default_accepts_only_now() {
    let field = build("created_at: tsz\ndefault: now").expect("now default");
    assert_eq!(field.default, Some(DefaultValue::CurrentTimestamp));

    let err = build_err("created_at: tsz\ndefault: yesterday");
    assert_eq!(err.to_string(), "created_at: invalid default value 'yesterday'");
}

#[test]
fn defaults_are_typed_by_column() {
    let field = build("count: i32\ndefault: 7").expect("integer default");
    assert_eq!(field.default, Some(DefaultValue::Integer(7)));

    let field = build("ratio: double\ndefault: 0.5").expect("float default");
    assert_eq!(field.default, Some(DefaultValue::Float(0.5)));

    let field = build("ratio: double\ndefault: 2").expect("integer literal for double");
    assert_eq!(field.default, Some(DefaultValue::Float(2.0)));

    let field = build("active: bool\ndefault: false").expect("bool default");
    assert_eq!(field.default, Some(DefaultValue::Bool(false)));

    let field = build("bio: text\ndefault: none yet").expect("text default");
    assert_eq!(field.default, Some(DefaultValue::Text("none yet".to_string())));

    let field = build("state: status\ndefault: active").expect("enum default");
    assert_eq!(field.data_type, DataType::Enum("status".to_string()));
    assert_eq!(field.default, Some(DefaultValue::EnumLabel("active".to_string())));
}

#[test]
fn mistyped_defaults_are_rejected() {
    assert_eq!(build_err("count: i32\ndefault: seven").code(), "invalid_value");
    assert_eq!(build_err("count: i32\ndefault: 3000000000").code(), "invalid_value");
    assert_eq!(build_err("active: bool\ndefault: 1").code(), "invalid_value");
    assert_eq!(build_err("name: str\nsize: 8\ndefault: 5").code(), "invalid_value");
    assert_eq!(build_err("state: status\ndefault: deleted").code(), "invalid_value");

    let field = build("big: i64\ndefault: 3000000000").expect("bigint default");
    assert_eq!(field.default, Some(DefaultValue::Integer(3_000_000_000)));
}

#[test]
fn default_is_forbidden_for_time_serial_and_jsonb() {
    for (spec, data_type) in [
        ("at: t\ndefault: noon", "time"),
        ("id: serial\ndefault: 1", "serial"),
        ("payload: jsonb\ndefault: '{}'", "jsonb"),
    ] {
        let err = build_err(spec);
        assert_eq!(err.code(), "incompatible_attribute", "{spec}");
        assert!(
            err.to_string()
                .ends_with(&format!("data type '{data_type}' can not have 'default' attribute")),
            "{err}"
        );
    }
}

#[test]
fn primary_key_requires_integer_family() {
    for spec in ["id: i32\npk: true", "id: i64\npk: true", "id: serial\npk: true"] {
        assert!(build(spec).is_ok(), "{spec}");
    }

    let err = build_err("code: text\npk: true");
    assert_eq!(err.to_string(), "code: primary key must be integer, bigint, serial");

    let err = build_err("state: status\npk: true");
    assert_eq!(err.code(), "incompatible_attribute");
}

#[test]
fn primary_key_can_not_be_nullable() {
    let err = build_err("id: serial\npk: true\nnullable: true");
    assert_eq!(err.to_string(), "id: primary key can not be nullable");

    let err = build_err("id: serial\nnullable: true\npk: true");
    assert_eq!(err.code(), "conflict");
}

#[test]
fn flags_must_be_booleans() {
    let err = build_err("note: text\nnullable: maybe");
    assert_eq!(err.to_string(), "note: 'nullable' must be a boolean");
}

#[test]
fn unknown_attribute_is_rejected() {
    let err = build_err("id: i32\nunique: true");
    assert_eq!(err.to_string(), "id: invalid attribute: unique");
    assert_eq!(err.code(), "unknown_attribute");
}

#[test]
fn unresolved_type_names_the_field() {
    let err = build_err("id: uuid");
    assert_eq!(err.to_string(), "id: invalid data type: uuid");
    assert_eq!(err.code(), "unresolved_type");
}

#[test]
fn comment_is_copied_verbatim() {
    let field = build("note: text\ncomment: free-form 'note'\nnullable: true").expect("field");
    assert_eq!(field.comment.as_deref(), Some("free-form 'note'"));
    assert!(field.nullable);
}
