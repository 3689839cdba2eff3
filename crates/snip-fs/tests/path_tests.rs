use proptest::prelude::*;
use snip_fs::NormalizedPath;

#[test]
fn test_backslashes_are_normalized() {
    let path = NormalizedPath::new("snippets\\theme\\ui\\toggle.css");
    assert_eq!(path.as_str(), "snippets/theme/ui/toggle.css");
    assert_eq!(path.file_name(), Some("toggle.css"));
    assert_eq!(path.extension(), Some("css"));
}

#[test]
fn test_parent_of_nested_path() {
    let path = NormalizedPath::new("snippets/theme/toggle.css");
    assert_eq!(path.parent().unwrap().as_str(), "snippets/theme");
}

#[test]
fn test_parent_of_bare_name_is_none() {
    assert!(NormalizedPath::new("toggle.css").parent().is_none());
}

proptest! {
    #[test]
    fn test_no_backslashes_after_normalization(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));
    }

    #[test]
    fn test_join_keeps_prefix(base in "[a-z]{1,8}", seg in "[a-z]{1,8}") {
        let joined = NormalizedPath::new(&base).join(&seg);
        prop_assert!(joined.as_str().starts_with(&base));
        prop_assert_eq!(joined.file_name(), Some(seg.as_str()));
    }
}
