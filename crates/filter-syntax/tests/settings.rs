//! Filter settings loading tests

use filter_syntax::{Filter, FilterError, FilterSettings, FilterValue};
use std::io::Write;

#[test]
fn test_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "default_rows": 100, "numeric_keywords": ["first", "rows", "level"] }}"#
    )
    .unwrap();

    let settings = FilterSettings::from_file(file.path()).unwrap();
    assert_eq!(settings.default_rows, 100);
    assert_eq!(settings.default_first, 1);

    let filter = Filter::from_string("level=3 min_qod=70");
    assert_eq!(
        filter.get_with("level", &settings),
        Some(FilterValue::Number(3))
    );
    assert_eq!(
        filter.get_with("min_qod", &settings),
        Some(FilterValue::from("70"))
    );
    assert_eq!(
        filter.next_with(&settings).get("first"),
        Some(FilterValue::Number(101))
    );
}

#[test]
fn test_missing_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = FilterSettings::from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(FilterError::Io(_))));
}

#[test]
fn test_invalid_settings_json() {
    let result = FilterSettings::from_json(r#"{ "default_rows": "ten" }"#);
    assert!(matches!(result, Err(FilterError::Decode(_))));
}
