//! Property tests for the id and label contracts.

use iiifgen::{BuilderConfig, Error, Manifest, Resource};
use proptest::prelude::*;

/// The characters `set_id` must always reject outside the scheme.
const UNENCODED: &[char] = &[
    ' ', '!', '"', '$', '%', '&', '\'', '(', ')', '*', '+', ':', ';', '<', '=', '>', '?', '@',
    '[', '\\', ']', '^', '`', '{', '|', '}', '~',
];

fn config() -> std::sync::Arc<BuilderConfig> {
    BuilderConfig::shared("https://example.org/")
}

/// Characters a resource identifier may contain without percent-encoding.
fn uri_safe() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._/,-]{1,40}").expect("valid regex")
}

proptest! {
    #[test]
    fn safe_suffixes_always_resolve(suffix in uri_safe()) {
        let mut manifest = Manifest::new(config());
        manifest.set_id(None, Some(&suffix)).expect("safe suffix accepted");
        prop_assert_eq!(
            manifest.id().expect("id set"),
            format!("https://example.org/{suffix}")
        );
    }

    #[test]
    fn unencoded_characters_are_always_rejected(
        prefix in uri_safe(),
        bad in proptest::sample::select(UNENCODED),
        suffix in uri_safe(),
    ) {
        let mut manifest = Manifest::new(config());
        let uri = format!("https://example.org/{prefix}{bad}{suffix}");
        let result = manifest.set_id(Some(&uri), None);
        let is_malformed = matches!(result, Err(Error::MalformedUri { .. }));
        prop_assert!(is_malformed);
    }

    #[test]
    fn labels_accumulate_in_call_order(texts in proptest::collection::vec("[a-z]{1,8}", 1..8)) {
        let mut manifest = Manifest::new(config());
        for text in &texts {
            manifest.add_label(Some("en"), text).expect("valid language");
        }
        let label = manifest.label().expect("label set");
        let stored = label.get("en").expect("entry for en");
        prop_assert_eq!(stored, &texts[..]);
    }
}
