//! Build → strict serialize → rehydrate → re-serialize must be lossless.

use std::sync::Arc;

use iiifgen::{
    reader, BuilderConfig, Collection, FormatField, HasCommon, Languages, Manifest, Mode,
    Navigable, Resource, Spatial, ViewingDirectional,
};

fn config() -> Arc<BuilderConfig> {
    BuilderConfig::shared("https://example.org/iiif/book1/")
}

/// A manifest exercising most of the schema surface.
fn rich_manifest() -> Manifest {
    let config = config();
    let mut manifest = Manifest::new(config.clone());
    manifest.set_id(None, Some("manifest.json")).unwrap();
    manifest.add_label(Some("en"), "Book 1").unwrap();
    manifest.add_label(Some("en"), "An example book").unwrap();
    manifest.add_summary(Some("en"), "A digitized book").unwrap();
    manifest
        .add_metadata_pair("Author", "Anonymous", Some("en"), Some("en"))
        .unwrap();
    {
        let statement = manifest.set_required_statement();
        statement.add_label(Some("en"), "Attribution").unwrap();
        statement.add_value(Some("en"), "Provided by Example Org").unwrap();
    }
    manifest
        .set_rights("http://creativecommons.org/licenses/by/4.0/")
        .unwrap();
    manifest.set_nav_date("1856-01-01T00:00:00Z").unwrap();
    manifest.set_viewing_direction("right-to-left").unwrap();
    manifest.add_behavior("paged").unwrap();

    {
        let thumbnail = manifest.add_thumbnail();
        thumbnail.set_id(Some("https://example.org/thumb.jpg"), None).unwrap();
        thumbnail.set_format("image/jpeg").unwrap();
        thumbnail.set_height_width(150, 100).unwrap();
    }
    {
        let see_also = manifest.add_see_also();
        see_also.set_id(Some("https://example.org/about.xml"), None).unwrap();
        see_also.set_type("Dataset").unwrap();
        see_also.add_label(Some("en"), "Metadata record").unwrap();
        see_also.set_format("text/xml").unwrap();
        see_also.set_profile("https://example.org/profiles/record");
    }
    {
        let homepage = manifest.add_homepage();
        homepage.set_id(Some("https://example.org/book1.html"), None).unwrap();
        homepage.set_type("Text").unwrap();
        homepage.add_label(Some("en"), "Book 1 homepage").unwrap();
        homepage.add_language("en").unwrap();
        homepage.set_format("text/html").unwrap();
    }
    {
        let rendering = manifest.add_rendering();
        rendering.set_id(Some("https://example.org/book1.pdf"), None).unwrap();
        rendering.set_type("Text").unwrap();
        rendering.add_label(Some("en"), "PDF rendering").unwrap();
        rendering.set_format("application/pdf").unwrap();
    }
    {
        let part_of = manifest.add_part_of();
        part_of.set_id(Some("https://example.org/collection/books"), None).unwrap();
        part_of.set_type("Collection").unwrap();
        part_of.add_label(Some("en"), "All books").unwrap();
    }
    {
        let provider = manifest.add_provider();
        provider.set_id(Some("https://example.org/about"), None).unwrap();
        provider.add_label(Some("en"), "Example Organization").unwrap();
        let homepage = provider.add_homepage();
        homepage.set_id(Some("https://example.org/"), None).unwrap();
        homepage.set_type("Text").unwrap();
        homepage.add_label(Some("en"), "Example homepage").unwrap();
        homepage.set_format("text/html").unwrap();
        let logo = provider.add_logo();
        logo.set_id(Some("https://example.org/logo.png"), None).unwrap();
        logo.set_format("image/png").unwrap();
        logo.set_height(100).unwrap();
        logo.set_width(120).unwrap();
        let logo_service = logo.add_service();
        logo_service.set_id(Some("https://example.org/iiif/logo"), None).unwrap();
        logo_service.set_type("ImageService3").unwrap();
        logo_service.set_profile("level2");
    }
    {
        let start = manifest.set_start();
        start.set_type("Canvas").unwrap();
        start.set_id(Some("https://example.org/iiif/book1/canvas/p2"), None).unwrap();
    }
    {
        let placeholder = manifest.set_placeholder_canvas().unwrap();
        placeholder
            .set_id(Some("https://example.org/iiif/book1/placeholder"), None)
            .unwrap();
        placeholder.set_height_width(100, 100).unwrap();
    }

    for index in 1..=2u32 {
        let canvas = manifest.add_canvas();
        canvas.set_id(None, Some(&format!("canvas/p{index}"))).unwrap();
        canvas.add_label(Some("en"), &format!("Page {index}")).unwrap();
        canvas.set_height_width(4613, 3204).unwrap();

        let page = canvas.add_annotation_page();
        page.set_id(None, Some(&format!("page/p{index}/1"))).unwrap();

        let target = format!("https://example.org/iiif/book1/canvas/p{index}");
        let annotation = page.add_annotation(Some(&target));
        annotation
            .set_id(None, Some(&format!("annotation/p{index}-image")))
            .unwrap();
        annotation.set_motivation("painting");
        let body = annotation.body_painting_mut().expect("painting body");
        body.set_id(Some(&format!("https://example.org/p{index}.jpg")), None).unwrap();
        body.set_type("Image").unwrap();
        body.set_format("image/jpeg").unwrap();
        body.set_height_width(4613, 3204).unwrap();
        body.set_profile("level2");
        let service = body.add_service();
        service
            .set_id(Some(&format!("https://example.org/iiif/p{index}")), None)
            .unwrap();
        service.set_type("ImageService3").unwrap();
        service.set_profile("level1");
        service.add_size(150, 100);
    }

    {
        let range = manifest.add_range();
        range.set_id(None, Some("range/toc")).unwrap();
        range.add_label(Some("en"), "Table of Contents").unwrap();
        range.add_canvas_ref("https://example.org/iiif/book1/canvas/p1");
        let part = range.add_specific_resource();
        part.set_source("https://example.org/iiif/book1/canvas/p2");
        let point = part.set_point_selector();
        point.set_x(500);
        point.set_y(500);
        range
            .set_supplementary(Some("https://example.org/iiif/book1/annos"), None)
            .unwrap();
    }

    {
        let comments = manifest.add_annotation_page_to_annotations();
        comments.set_id(None, Some("page/comments/1")).unwrap();
        let note = comments.add_annotation(Some("https://example.org/iiif/book1/canvas/p1"));
        note.set_id(None, Some("annotation/comment-1")).unwrap();
        note.set_motivation("commenting");
        let body = note.body_textual_mut().expect("textual body");
        body.set_value("A marginal note");
        body.set_language("en").unwrap();
    }

    manifest
}

#[test]
fn manifest_roundtrip_is_lossless() {
    let manifest = rich_manifest();
    let first = manifest.json_ld(Mode::Strict).expect("strict serialize");
    let parsed: serde_json::Value = serde_json::from_str(&first).expect("parse");

    let reread = reader::read_manifest(&parsed, &config()).expect("rehydrate");
    let second = reread.json_ld(Mode::Strict).expect("re-serialize");
    let reparsed: serde_json::Value = serde_json::from_str(&second).expect("reparse");

    assert_eq!(parsed, reparsed);
}

#[test]
fn roundtrip_preserves_unresolved_markers() {
    // A document missing recommended fields must still be missing them,
    // and nothing else, after a read-write cycle.
    let manifest = rich_manifest();
    let before = manifest.inspect().unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&manifest.json_ld(Mode::Strict).unwrap()).unwrap();
    let reread = reader::read_manifest(&parsed, &config()).unwrap();
    let after = reread.inspect().unwrap();

    assert_eq!(before.missing_required, after.missing_required);
    assert_eq!(before.missing_recommended, after.missing_recommended);
}

#[test]
fn collection_roundtrip_keeps_manifest_stubs() {
    let shared = config();
    let mut collection = Collection::new(shared.clone());
    collection
        .set_id(Some("https://example.org/collection/top"), None)
        .unwrap();
    collection.add_label(Some("en"), "Top collection").unwrap();
    collection.add_manifest(&rich_manifest());
    {
        let sub = collection.add_collection();
        sub.set_id(Some("https://example.org/collection/sub"), None).unwrap();
        sub.add_label(Some("en"), "Subcollection").unwrap();
        let stub = sub.add_manifest_ref();
        stub.set_id(Some("https://example.org/other/manifest.json"), None).unwrap();
        stub.add_label(Some("en"), "Another book").unwrap();
        let thumbnail = stub.add_thumbnail();
        thumbnail.set_id(Some("https://example.org/other/thumb.jpg"), None).unwrap();
        thumbnail.set_format("image/jpeg").unwrap();
    }

    let first = collection.json_ld(Mode::Strict).expect("strict serialize");
    let parsed: serde_json::Value = serde_json::from_str(&first).unwrap();

    // The embedded manifest stub must not carry canvases.
    assert!(parsed["items"][0].get("items").is_none());

    let reread = reader::read_collection(&parsed, &shared).expect("rehydrate");
    let second = reread.json_ld(Mode::Strict).expect("re-serialize");
    let reparsed: serde_json::Value = serde_json::from_str(&second).unwrap();

    assert_eq!(parsed, reparsed);
}
