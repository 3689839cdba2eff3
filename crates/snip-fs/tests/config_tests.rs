use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use snip_fs::{ConfigStore, Error, NormalizedPath};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
    name: String,
    proximity: usize,
}

#[rstest]
#[case("sample.toml")]
#[case("sample.json")]
#[case("sample.yaml")]
fn test_save_then_load_by_extension(#[case] file: &str) {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join(file));
    let store = ConfigStore::new();
    let value = Sample {
        name: "my-theme".into(),
        proximity: 30,
    };

    store.save(&path, &value).unwrap();
    let loaded: Sample = store.load(&path).unwrap();

    assert_eq!(loaded, value);
}

#[test]
fn test_json_map_is_written_pretty() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("index.json"));
    let mut map = BTreeMap::new();
    map.insert("theme_a.css_1_4", "snippets/theme/a.css");

    ConfigStore::new().save(&path, &map).unwrap();

    let raw = fs::read_to_string(path.to_native()).unwrap();
    assert!(raw.contains("\n  \"theme_a.css_1_4\": \"snippets/theme/a.css\""));
}

#[test]
fn test_corrupt_json_reports_parse_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("index.json");
    fs::write(&file, "{ not json").unwrap();

    let result: Result<BTreeMap<String, String>, _> =
        ConfigStore::new().load(&NormalizedPath::new(&file));

    assert!(matches!(result, Err(Error::ConfigParse { .. })));
}

#[test]
fn test_unknown_extension_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("index.ini"));

    let result = ConfigStore::new().save(&path, &BTreeMap::<String, String>::new());

    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}
