use super::*;

#[test]
fn normalize_drops_blank_tokens() {
    assert_eq!(normalize(None), None);
    assert_eq!(normalize(Some(String::new())), None);
    assert_eq!(normalize(Some("  \n".to_owned())), None);
    assert_eq!(normalize(Some(" abc ".to_owned())), Some("abc".to_owned()));
}

#[test]
fn storage_key_is_stable() {
    assert_eq!(STORAGE_KEY, "iam_console_token");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn ssr_storage_is_empty_and_writes_are_noops() {
    save("token");
    assert_eq!(load(), None);
    clear();
    assert_eq!(load(), None);
}
