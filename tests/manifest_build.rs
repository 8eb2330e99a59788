//! End-to-end builder scenarios against the strict serializer.

use iiifgen::{
    BuilderConfig, Error, FormatField, HasCommon, Manifest, Mode, Resource, Spatial,
};

fn config() -> std::sync::Arc<BuilderConfig> {
    BuilderConfig::shared("https://example.org/")
}

/// Base URL + suffix id, one label, one 100x200 Canvas, one painting
/// Annotation whose body is an image/jpeg Image.
fn build_test_manifest() -> Manifest {
    let mut manifest = Manifest::new(config());
    manifest.set_id(None, Some("manifest.json")).unwrap();
    manifest.add_label(Some("en"), "Test").unwrap();

    let canvas = manifest.add_canvas();
    canvas.set_id(None, Some("canvas/p1")).unwrap();
    canvas.set_height(100).unwrap();
    canvas.set_width(200).unwrap();

    let page = canvas.add_annotation_page();
    page.set_id(None, Some("page/p1/1")).unwrap();

    let annotation = page.add_annotation(Some("https://example.org/canvas/p1"));
    annotation.set_id(None, Some("annotation/p0001-image")).unwrap();
    annotation.set_motivation("painting");

    let body = annotation.body_painting_mut().expect("painting body");
    body.set_id(Some("https://example.org/page1.jpg"), None).unwrap();
    body.set_type("Image").unwrap();
    body.set_format("image/jpeg").unwrap();
    body.set_height_width(100, 200).unwrap();

    manifest
}

#[test]
fn strict_output_matches_the_built_tree() {
    let manifest = build_test_manifest();
    let json = manifest.json_ld(Mode::Strict).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["id"], "https://example.org/manifest.json");
    assert_eq!(value["items"][0]["height"], 100);
    assert_eq!(value["items"][0]["width"], 200);
    assert_eq!(value["items"][0]["items"][0]["items"][0]["body"]["type"], "Image");
}

#[test]
fn context_is_the_first_key() {
    let manifest = build_test_manifest();
    let json = manifest.json_ld(Mode::Strict).unwrap();
    assert!(
        json.starts_with("{\n  \"@context\": \"http://iiif.io/api/presentation/3/context.json\""),
        "got: {}",
        &json[..80.min(json.len())]
    );
}

#[test]
fn strict_serialization_fails_until_the_id_is_set() {
    let mut manifest = Manifest::new(config());
    let err = manifest.json_ld(Mode::Strict).unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField { ref field, .. } if field == "id"));

    manifest.set_id(None, Some("manifest.json")).unwrap();
    let err = manifest.json_ld(Mode::Strict).unwrap_err();
    // The id obligation is resolved; the next unmet one is the label.
    assert!(matches!(err, Error::MissingRequiredField { ref field, .. } if field == "label"));
}

#[test]
fn diagnostic_mode_never_fails() {
    let manifest = Manifest::new(config());
    let json = manifest.json_ld(Mode::Diagnostic).unwrap();
    assert!(json.contains("\"Required\""));
    assert!(json.contains("\"Recommended\""));
}

#[test]
fn inspection_counts_resolve_as_fields_are_set() {
    let manifest = build_test_manifest();
    let inspection = manifest.inspect().unwrap();
    assert_eq!(inspection.missing_required, 0);
    assert!(inspection.is_complete());
    // metadata/summary/thumbnail/provider on the Manifest, the canvas label,
    // the page item recommendation resolved by building them, etc. still
    // leave recommendations open.
    assert!(inspection.missing_recommended > 0);
}

#[test]
fn set_id_argument_exclusivity_holds_in_both_orders() {
    let mut manifest = build_test_manifest();
    assert!(matches!(
        manifest.set_id(Some("http://x"), Some("y")),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        manifest.set_id(None, None),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn media_type_rejection_names_the_replacement() {
    let mut manifest = build_test_manifest();
    let thumbnail = manifest.add_thumbnail();
    thumbnail.set_id(Some("https://example.org/thumb.jpg"), None).unwrap();
    let err = thumbnail.set_format("image/jpg").unwrap_err();
    assert!(err.to_string().contains("image/jpeg"));
    assert!(thumbnail.set_format("image/jpeg").is_ok());
}

#[test]
fn behavior_conflicts_surface_on_the_second_call() {
    let mut manifest = build_test_manifest();
    manifest.add_behavior("paged").unwrap();
    assert!(matches!(
        manifest.add_behavior("individuals"),
        Err(Error::InvalidBehavior { .. })
    ));
}

#[test]
fn save_writes_the_document_to_disk() {
    let manifest = build_test_manifest();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    manifest.save(&path, Mode::Strict).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["type"], "Manifest");
}
