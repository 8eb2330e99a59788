//! Rehydration of a parsed Presentation 3.0 document.
//!
//! Dispatches on the `type` field and rebuilds the object graph through the
//! same setters the builder API uses, so a re-read document carries the same
//! validation state as a freshly built one. Serialized field names equal the
//! setter targets throughout the crate, which is what makes this walk a
//! mechanical table dispatch.
//!
//! Unknown `type` values in a slot fail with [`Error::WrongChildType`]; a
//! fixed-type node whose document `type` disagrees fails with
//! [`Error::ImmutableField`]. Unknown keys are ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::json::{Inspection, Mode};
use crate::lang::MetadataEntry;
use crate::resources::{
    Annotation, AnnotationPage, Canvas, Collection, FormatField, FragmentSelector, HasCommon,
    Homepage, ImageApiSelector, Languages, Logo, Manifest, ManifestRef, Navigable, PaintingBody,
    PartOf, PointSelector, Provider, Range, Rendering, Resource, SeeAlso, Selector, Service,
    Services, Spatial, SpecificResource, Start, SvgSelector, Temporal, TextualBody, Thumbnail,
    ViewingDirectional,
};

/// A parsed top-level document.
#[derive(Clone, Debug)]
pub enum Document {
    Manifest(Manifest),
    Collection(Collection),
}

impl Document {
    pub fn inspect(&self) -> Result<Inspection, Error> {
        match self {
            Document::Manifest(m) => m.inspect(),
            Document::Collection(c) => c.inspect(),
        }
    }

    pub fn json_ld(&self, mode: Mode) -> Result<String, Error> {
        match self {
            Document::Manifest(m) => m.json_ld(mode),
            Document::Collection(c) => c.json_ld(mode),
        }
    }
}

/// Reads a Manifest or Collection document from a JSON file.
pub fn read_json_file(path: &Path, config: &Arc<BuilderConfig>) -> Result<Document, Error> {
    let file = File::open(path).map_err(Error::Io)?;
    let value: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    read_document(&value, config)
}

/// Dispatches a parsed document on its `type`.
pub fn read_document(value: &Value, config: &Arc<BuilderConfig>) -> Result<Document, Error> {
    let map = obj(value, "document")?;
    match type_of(map) {
        Some("Manifest") => Ok(Document::Manifest(read_manifest(value, config)?)),
        Some("Collection") => Ok(Document::Collection(read_collection(value, config)?)),
        Some(other) => Err(Error::WrongChildType {
            parent: "document".to_string(),
            child: other.to_string(),
        }),
        None => Err(Error::InvalidArgument(
            "the document has no type property".to_string(),
        )),
    }
}

/// Rebuilds a Manifest from a parsed document.
pub fn read_manifest(value: &Value, config: &Arc<BuilderConfig>) -> Result<Manifest, Error> {
    let map = obj(value, "Manifest")?;
    expect_kind(map, "Manifest")?;
    let mut manifest = Manifest::new(config.clone());
    read_id(&mut manifest, map)?;
    read_labels(&mut manifest, map)?;
    read_common(&mut manifest, map)?;
    read_nav(&mut manifest, map)?;
    if let Some(start) = map.get("start") {
        read_start_into(manifest.set_start(), start)?;
    }
    if let Some(direction) = str_key(map, "viewingDirection")? {
        manifest.set_viewing_direction(direction)?;
    }
    for entry in array_key(map, "services")? {
        read_services_into(manifest.add_services(), entry)?;
    }
    for entry in array_key(map, "items")? {
        let mut canvas = Canvas::new(config.clone());
        read_canvas_into(&mut canvas, entry)?;
        manifest.add_canvas_entry(canvas);
    }
    for entry in array_key(map, "annotations")? {
        read_annotation_page_into(manifest.add_annotation_page_to_annotations(), entry)?;
    }
    for entry in array_key(map, "structures")? {
        let mut range = Range::new(config.clone());
        read_range_into(&mut range, entry)?;
        manifest.add_range_entry(range);
    }
    Ok(manifest)
}

/// Rebuilds a Collection from a parsed document.
pub fn read_collection(value: &Value, config: &Arc<BuilderConfig>) -> Result<Collection, Error> {
    let map = obj(value, "Collection")?;
    expect_kind(map, "Collection")?;
    let mut collection = Collection::new(config.clone());
    read_id(&mut collection, map)?;
    read_labels(&mut collection, map)?;
    read_common(&mut collection, map)?;
    read_nav(&mut collection, map)?;
    if let Some(direction) = str_key(map, "viewingDirection")? {
        collection.set_viewing_direction(direction)?;
    }
    for entry in array_key(map, "services")? {
        read_services_into(collection.add_services(), entry)?;
    }
    for entry in array_key(map, "items")? {
        let entry_map = obj(entry, "collection item")?;
        match type_of(entry_map) {
            Some("Collection") => {
                let sub = read_collection(entry, config)?;
                collection.add_collection_entry(sub);
            }
            Some("Manifest") => {
                read_manifest_ref_into(collection.add_manifest_ref(), entry)?;
            }
            Some(other) => {
                return Err(Error::WrongChildType {
                    parent: "Collection".to_string(),
                    child: other.to_string(),
                })
            }
            None => {
                return Err(Error::InvalidArgument(
                    "a collection item has no type property".to_string(),
                ))
            }
        }
    }
    for entry in array_key(map, "annotations")? {
        read_annotation_page_into(collection.add_annotation_page_to_annotations(), entry)?;
    }
    Ok(collection)
}

fn read_canvas_into(canvas: &mut Canvas, value: &Value) -> Result<(), Error> {
    let map = obj(value, "Canvas")?;
    expect_kind(map, "Canvas")?;
    read_id(canvas, map)?;
    read_labels(canvas, map)?;
    // Dimensions first: behaviors like facing-pages require them, and
    // set_duration releases unset dimension markers while values set
    // beforehand survive it.
    if let Some(height) = u32_key(map, "height")? {
        canvas.set_height(height)?;
    }
    if let Some(width) = u32_key(map, "width")? {
        canvas.set_width(width)?;
    }
    if let Some(duration) = f64_key(map, "duration")? {
        canvas.set_duration(duration)?;
    }
    read_common(canvas, map)?;
    read_nav(canvas, map)?;
    for entry in array_key(map, "items")? {
        read_annotation_page_into(canvas.add_annotation_page(), entry)?;
    }
    for entry in array_key(map, "annotations")? {
        read_annotation_page_into(canvas.add_annotation_page_to_annotations(), entry)?;
    }
    Ok(())
}

fn read_annotation_page_into(page: &mut AnnotationPage, value: &Value) -> Result<(), Error> {
    let map = obj(value, "AnnotationPage")?;
    expect_kind(map, "AnnotationPage")?;
    read_id(page, map)?;
    read_labels(page, map)?;
    read_common(page, map)?;
    for entry in array_key(map, "items")? {
        read_annotation_into(page.add_annotation(None), entry)?;
    }
    Ok(())
}

fn read_annotation_into(annotation: &mut Annotation, value: &Value) -> Result<(), Error> {
    let map = obj(value, "Annotation")?;
    expect_kind(map, "Annotation")?;
    read_id(annotation, map)?;
    read_labels(annotation, map)?;
    read_common(annotation, map)?;
    if let Some(motivation) = str_key(map, "motivation")? {
        annotation.set_motivation(motivation);
    }
    if let Some(body) = map.get("body") {
        let body_map = obj(body, "annotation body")?;
        match type_of(body_map) {
            Some("TextualBody") => read_textual_body_into(annotation.set_body_textual(), body)?,
            _ => read_painting_body_into(annotation.set_body_painting(), body)?,
        }
    }
    if let Some(target) = map.get("target") {
        match target {
            Value::String(uri) => annotation.set_target(uri),
            Value::Object(_) => {
                read_specific_resource_into(annotation.set_target_specific(), target)?
            }
            _ => {
                return Err(Error::InvalidArgument(
                    "an annotation target must be a URI or a SpecificResource".to_string(),
                ))
            }
        }
    }
    Ok(())
}

fn read_painting_body_into(body: &mut PaintingBody, value: &Value) -> Result<(), Error> {
    let map = obj(value, "content resource")?;
    if let Some(kind) = type_of(map) {
        body.set_type(kind)?;
    }
    read_id(body, map)?;
    read_labels(body, map)?;
    if let Some(format) = str_key(map, "format")? {
        body.set_format(format)?;
    }
    if let Some(profile) = str_key(map, "profile")? {
        body.set_profile(profile);
    }
    if let Some(height) = u32_key(map, "height")? {
        body.set_height(height)?;
    }
    if let Some(width) = u32_key(map, "width")? {
        body.set_width(width)?;
    }
    if let Some(duration) = f64_key(map, "duration")? {
        body.set_duration(duration)?;
    }
    for entry in array_key(map, "service")? {
        read_service_into(body.add_service(), entry)?;
    }
    for language in string_array_key(map, "language")? {
        body.add_language(language)?;
    }
    for entry in array_key(map, "items")? {
        let config = body.config().clone();
        let mut alternative = PaintingBody::new(config);
        read_painting_body_into(&mut alternative, entry)?;
        body.add_choice_entry(alternative)?;
    }
    Ok(())
}

fn read_textual_body_into(body: &mut TextualBody, value: &Value) -> Result<(), Error> {
    let map = obj(value, "TextualBody")?;
    if let Some(text) = str_key(map, "value")? {
        body.set_value(text);
    }
    if let Some(language) = str_key(map, "language")? {
        body.set_language(language)?;
    }
    if let Some(format) = str_key(map, "format")? {
        body.set_format(format)?;
    }
    Ok(())
}

fn read_range_into(range: &mut Range, value: &Value) -> Result<(), Error> {
    let map = obj(value, "Range")?;
    expect_kind(map, "Range")?;
    read_id(range, map)?;
    read_labels(range, map)?;
    read_common(range, map)?;
    read_nav(range, map)?;
    if let Some(start) = map.get("start") {
        read_start_into(range.set_start(), start)?;
    }
    if let Some(direction) = str_key(map, "viewingDirection")? {
        range.set_viewing_direction(direction)?;
    }
    if let Some(supplementary) = map.get("supplementary") {
        let supplementary_map = obj(supplementary, "supplementary")?;
        expect_kind(supplementary_map, "AnnotationCollection")?;
        let config = range.config().clone();
        let mut entry = crate::resources::Supplementary::new(config);
        read_id(&mut entry, supplementary_map)?;
        read_labels(&mut entry, supplementary_map)?;
        range.set_supplementary_entry(entry);
    }
    let config = range.config().clone();
    for entry in array_key(map, "items")? {
        let entry_map = obj(entry, "range item")?;
        match type_of(entry_map) {
            Some("Range") => {
                let mut sub = Range::new(config.clone());
                read_range_into(&mut sub, entry)?;
                range.add_range_entry(sub);
            }
            Some("Canvas") if entry_map.len() <= 2 => {
                let id = str_key(entry_map, "id")?.ok_or_else(|| {
                    Error::InvalidArgument("a Canvas reference must have an id".to_string())
                })?;
                range.add_canvas_ref(id);
            }
            Some("Canvas") => {
                let mut canvas = Canvas::new(config.clone());
                read_canvas_into(&mut canvas, entry)?;
                range.add_canvas_entry(canvas);
            }
            Some("SpecificResource") => {
                let mut resource = SpecificResource::new(config.clone());
                read_specific_resource_into(&mut resource, entry)?;
                range.add_specific_resource_entry(resource);
            }
            Some(other) => {
                return Err(Error::WrongChildType {
                    parent: "Range".to_string(),
                    child: other.to_string(),
                })
            }
            None => {
                return Err(Error::InvalidArgument(
                    "a range item has no type property".to_string(),
                ))
            }
        }
    }
    for entry in array_key(map, "annotations")? {
        read_annotation_page_into(range.add_annotation_page_to_annotations(), entry)?;
    }
    Ok(())
}

fn read_specific_resource_into(
    resource: &mut SpecificResource,
    value: &Value,
) -> Result<(), Error> {
    let map = obj(value, "SpecificResource")?;
    expect_kind(map, "SpecificResource")?;
    read_id(resource, map)?;
    read_labels(resource, map)?;
    read_common(resource, map)?;
    if let Some(source) = str_key(map, "source")? {
        resource.set_source(source);
    }
    if let Some(selector) = map.get("selector") {
        let parsed = read_selector(selector, resource.config())?;
        resource.set_selector(parsed);
    }
    Ok(())
}

fn read_selector(value: &Value, config: &Arc<BuilderConfig>) -> Result<Selector, Error> {
    let map = obj(value, "selector")?;
    match type_of(map) {
        Some("PointSelector") => {
            let mut selector = PointSelector::new();
            if let Some(x) = u32_key(map, "x")? {
                selector.set_x(x);
            }
            if let Some(y) = u32_key(map, "y")? {
                selector.set_y(y);
            }
            if let Some(t) = f64_key(map, "t")? {
                selector.set_t(t);
            }
            Ok(Selector::Point(selector))
        }
        Some("FragmentSelector") => {
            let mut selector = FragmentSelector::new();
            if let Some(fragment) = str_key(map, "value")? {
                selector.set_value(fragment);
            }
            Ok(Selector::Fragment(selector))
        }
        Some("SvgSelector") => {
            let mut selector = SvgSelector::new();
            if let Some(svg) = str_key(map, "value")? {
                selector.set_value(svg);
            }
            Ok(Selector::Svg(selector))
        }
        Some("ImageApiSelector") => {
            let mut selector = ImageApiSelector::new(config.clone());
            if let Some(region) = str_key(map, "region")? {
                selector.set_region(region);
            }
            if let Some(size) = str_key(map, "size")? {
                selector.set_size(size);
            }
            if let Some(rotation) = str_key(map, "rotation")? {
                selector.set_rotation(rotation);
            }
            if let Some(quality) = str_key(map, "quality")? {
                selector.set_quality(quality);
            }
            if let Some(format) = str_key(map, "format")? {
                selector.set_format(format)?;
            }
            Ok(Selector::ImageApi(selector))
        }
        Some(other) => Err(Error::WrongChildType {
            parent: "selector".to_string(),
            child: other.to_string(),
        }),
        None => Err(Error::InvalidArgument(
            "a selector has no type property".to_string(),
        )),
    }
}

fn read_start_into(start: &mut Start, value: &Value) -> Result<(), Error> {
    let map = obj(value, "start")?;
    if let Some(kind) = type_of(map) {
        start.set_type(kind)?;
    }
    read_id(start, map)?;
    if let Some(profile) = str_key(map, "profile")? {
        start.set_profile(profile);
    }
    if let Some(source) = str_key(map, "source")? {
        start.set_source(source);
    }
    if let Some(selector) = map.get("selector") {
        let config = start.config().clone();
        let parsed = read_selector(selector, &config)?;
        start.set_selector(parsed);
    }
    Ok(())
}

fn read_see_also_into(see_also: &mut SeeAlso, value: &Value) -> Result<(), Error> {
    let map = obj(value, "seeAlso")?;
    if let Some(kind) = type_of(map) {
        see_also.set_type(kind)?;
    }
    read_id(see_also, map)?;
    read_labels(see_also, map)?;
    if let Some(format) = str_key(map, "format")? {
        see_also.set_format(format)?;
    }
    if let Some(profile) = str_key(map, "profile")? {
        see_also.set_profile(profile);
    }
    Ok(())
}

fn read_part_of_into(part_of: &mut PartOf, value: &Value) -> Result<(), Error> {
    let map = obj(value, "partOf")?;
    if let Some(kind) = type_of(map) {
        part_of.set_type(kind)?;
    }
    if let Some(id) = str_key(map, "id")? {
        part_of.set_id(Some(id), None)?;
    }
    read_labels(part_of, map)?;
    Ok(())
}

fn read_homepage_into(homepage: &mut Homepage, value: &Value) -> Result<(), Error> {
    let map = obj(value, "homepage")?;
    if let Some(kind) = type_of(map) {
        homepage.set_type(kind)?;
    }
    read_id(homepage, map)?;
    read_labels(homepage, map)?;
    for language in string_array_key(map, "language")? {
        homepage.add_language(language)?;
    }
    if let Some(format) = str_key(map, "format")? {
        homepage.set_format(format)?;
    }
    Ok(())
}

fn read_rendering_into(rendering: &mut Rendering, value: &Value) -> Result<(), Error> {
    let map = obj(value, "rendering")?;
    if let Some(kind) = type_of(map) {
        rendering.set_type(kind)?;
    }
    read_id(rendering, map)?;
    read_labels(rendering, map)?;
    if let Some(format) = str_key(map, "format")? {
        rendering.set_format(format)?;
    }
    Ok(())
}

fn read_logo_into(logo: &mut Logo, value: &Value) -> Result<(), Error> {
    let map = obj(value, "logo")?;
    expect_kind(map, "Image")?;
    read_id(logo, map)?;
    if let Some(format) = str_key(map, "format")? {
        logo.set_format(format)?;
    }
    if let Some(height) = u32_key(map, "height")? {
        logo.set_height(height)?;
    }
    if let Some(width) = u32_key(map, "width")? {
        logo.set_width(width)?;
    }
    for entry in array_key(map, "service")? {
        read_service_into(logo.add_service(), entry)?;
    }
    Ok(())
}

fn read_thumbnail_into(thumbnail: &mut Thumbnail, value: &Value) -> Result<(), Error> {
    let map = obj(value, "thumbnail")?;
    if let Some(kind) = type_of(map) {
        thumbnail.set_type(kind)?;
    }
    read_id(thumbnail, map)?;
    if let Some(format) = str_key(map, "format")? {
        thumbnail.set_format(format)?;
    }
    if let Some(height) = u32_key(map, "height")? {
        thumbnail.set_height(height)?;
    }
    if let Some(width) = u32_key(map, "width")? {
        thumbnail.set_width(width)?;
    }
    if let Some(duration) = f64_key(map, "duration")? {
        thumbnail.set_duration(duration)?;
    }
    for entry in array_key(map, "service")? {
        read_service_into(thumbnail.add_service(), entry)?;
    }
    Ok(())
}

fn read_provider_into(provider: &mut Provider, value: &Value) -> Result<(), Error> {
    let map = obj(value, "provider")?;
    expect_kind(map, "Agent")?;
    read_id(provider, map)?;
    read_labels(provider, map)?;
    for entry in array_key(map, "homepage")? {
        read_homepage_into(provider.add_homepage(), entry)?;
    }
    for entry in array_key(map, "logo")? {
        read_logo_into(provider.add_logo(), entry)?;
    }
    for entry in array_key(map, "seeAlso")? {
        read_see_also_into(provider.add_see_also(), entry)?;
    }
    Ok(())
}

fn read_service_into(service: &mut Service, value: &Value) -> Result<(), Error> {
    let map = obj(value, "service")?;
    if let Some(kind) = type_of(map) {
        service.set_type(kind)?;
    }
    read_id(service, map)?;
    if let Some(profile) = str_key(map, "profile")? {
        service.set_profile(profile);
    }
    if let Some(width) = u32_key(map, "width")? {
        service.set_width(width)?;
    }
    if let Some(height) = u32_key(map, "height")? {
        service.set_height(height)?;
    }
    for entry in array_key(map, "service")? {
        read_service_into(service.add_service(), entry)?;
    }
    for entry in array_key(map, "sizes")? {
        let size_map = obj(entry, "size")?;
        let width = u32_key(size_map, "width")?;
        let height = u32_key(size_map, "height")?;
        match (width, height) {
            (Some(width), Some(height)) => service.add_size(width, height),
            _ => {
                return Err(Error::InvalidArgument(
                    "a size entry needs width and height".to_string(),
                ))
            }
        }
    }
    Ok(())
}

fn read_services_into(services: &mut Services, value: &Value) -> Result<(), Error> {
    let map = obj(value, "services")?;
    if let Some(kind) = type_of(map) {
        services.set_type(kind)?;
    }
    read_id(services, map)?;
    if let Some(profile) = str_key(map, "profile")? {
        services.set_profile(profile);
    }
    for entry in array_key(map, "service")? {
        read_service_into(services.add_service(), entry)?;
    }
    Ok(())
}

fn read_manifest_ref_into(stub: &mut ManifestRef, value: &Value) -> Result<(), Error> {
    let map = obj(value, "Manifest reference")?;
    expect_kind(map, "Manifest")?;
    read_id(stub, map)?;
    read_labels(stub, map)?;
    for entry in array_key(map, "thumbnail")? {
        read_thumbnail_into(stub.add_thumbnail(), entry)?;
    }
    if let Some(nav_date) = str_key(map, "navDate")? {
        stub.set_nav_date(nav_date)?;
    }
    Ok(())
}

fn read_common<R: HasCommon>(resource: &mut R, map: &Map<String, Value>) -> Result<(), Error> {
    for entry in array_key(map, "metadata")? {
        read_metadata_entry_into(resource.add_metadata(), entry)?;
    }
    if let Some(summary) = map.get("summary") {
        for (tag, values) in obj(summary, "summary")? {
            for text in string_array(values)? {
                resource.add_summary(Some(tag), text)?;
            }
        }
    }
    if let Some(statement) = map.get("requiredStatement") {
        read_metadata_entry_into(resource.set_required_statement(), statement)?;
    }
    if let Some(rights) = str_key(map, "rights")? {
        resource.set_rights(rights)?;
    }
    for entry in array_key(map, "thumbnail")? {
        read_thumbnail_into(resource.add_thumbnail(), entry)?;
    }
    for value in string_array_key(map, "behavior")? {
        resource.add_behavior(value)?;
    }
    for entry in array_key(map, "seeAlso")? {
        read_see_also_into(resource.add_see_also(), entry)?;
    }
    for entry in array_key(map, "service")? {
        read_service_into(resource.add_service(), entry)?;
    }
    for entry in array_key(map, "homepage")? {
        read_homepage_into(resource.add_homepage(), entry)?;
    }
    for entry in array_key(map, "rendering")? {
        read_rendering_into(resource.add_rendering(), entry)?;
    }
    for entry in array_key(map, "partOf")? {
        read_part_of_into(resource.add_part_of(), entry)?;
    }
    for entry in array_key(map, "provider")? {
        read_provider_into(resource.add_provider(), entry)?;
    }
    Ok(())
}

fn read_metadata_entry_into(entry: &mut MetadataEntry, value: &Value) -> Result<(), Error> {
    let map = obj(value, "metadata entry")?;
    if let Some(label) = map.get("label") {
        for (tag, values) in obj(label, "metadata label")? {
            for text in string_array(values)? {
                entry.add_label(Some(tag), text)?;
            }
        }
    }
    if let Some(value) = map.get("value") {
        for (tag, values) in obj(value, "metadata value")? {
            for text in string_array(values)? {
                entry.add_value(Some(tag), text)?;
            }
        }
    }
    Ok(())
}

fn read_nav<R: Navigable>(resource: &mut R, map: &Map<String, Value>) -> Result<(), Error> {
    if let Some(placeholder) = map.get("placeholderCanvas") {
        let canvas = resource.set_placeholder_canvas()?;
        read_canvas_into(canvas, placeholder)?;
    }
    if let Some(accompanying) = map.get("accompanyingCanvas") {
        let canvas = resource.set_accompanying_canvas()?;
        read_canvas_into(canvas, accompanying)?;
    }
    if let Some(nav_date) = str_key(map, "navDate")? {
        resource.set_nav_date(nav_date)?;
    }
    Ok(())
}

fn read_id<R: Resource>(resource: &mut R, map: &Map<String, Value>) -> Result<(), Error> {
    if let Some(id) = str_key(map, "id")? {
        resource.set_id(Some(id), None)?;
    }
    Ok(())
}

fn read_labels<R: Resource>(resource: &mut R, map: &Map<String, Value>) -> Result<(), Error> {
    if let Some(label) = map.get("label") {
        for (tag, values) in obj(label, "label")? {
            for text in string_array(values)? {
                resource.add_label(Some(tag), text)?;
            }
        }
    }
    Ok(())
}

fn obj<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, Error> {
    value
        .as_object()
        .ok_or_else(|| Error::InvalidArgument(format!("expected {what} to be a JSON object")))
}

fn type_of(map: &Map<String, Value>) -> Option<&str> {
    map.get("type").and_then(Value::as_str)
}

/// Fails when a node whose type the schema fixes carries a different tag.
fn expect_kind(map: &Map<String, Value>, expected: &'static str) -> Result<(), Error> {
    match type_of(map) {
        Some(kind) if kind != expected => Err(Error::ImmutableField {
            kind: expected.to_string(),
            field: "type",
            reason: format!("the document says {kind}, but the type is always {expected}"),
        }),
        _ => Ok(()),
    }
}

fn str_key<'a>(map: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, Error> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(Error::InvalidArgument(format!("`{key}` must be a string"))),
    }
}

fn u32_key(map: &Map<String, Value>, key: &str) -> Result<Option<u32>, Error> {
    match map.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("`{key}` must be a non-negative integer"))
            }),
    }
}

fn f64_key(map: &Map<String, Value>, key: &str) -> Result<Option<f64>, Error> {
    match map.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::InvalidArgument(format!("`{key}` must be a number"))),
    }
}

fn array_key<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a [Value], Error> {
    match map.get(key) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(Error::InvalidArgument(format!("`{key}` must be an array"))),
    }
}

fn string_array(value: &Value) -> Result<Vec<&str>, Error> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| {
                    Error::InvalidArgument("expected an array of strings".to_string())
                })
            })
            .collect(),
        _ => Err(Error::InvalidArgument(
            "expected an array of strings".to_string(),
        )),
    }
}

fn string_array_key<'a>(map: &'a Map<String, Value>, key: &str) -> Result<Vec<&'a str>, Error> {
    match map.get(key) {
        None => Ok(Vec::new()),
        Some(value) => string_array(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::RangeItem;

    fn config() -> Arc<BuilderConfig> {
        BuilderConfig::shared("https://example.org/")
    }

    #[test]
    fn unknown_document_type_is_rejected() {
        let value = serde_json::json!({ "id": "https://example.org/x", "type": "Banana" });
        let err = read_document(&value, &config()).unwrap_err();
        assert!(matches!(err, Error::WrongChildType { .. }));
    }

    #[test]
    fn fixed_type_mismatch_is_immutable_field() {
        let value = serde_json::json!({
            "id": "https://example.org/manifest.json",
            "type": "Manifest",
            "label": { "en": ["x"] },
            "items": [
                { "id": "https://example.org/canvas/1", "type": "Range" }
            ],
        });
        let err = read_manifest(&value, &config()).unwrap_err();
        assert!(matches!(err, Error::ImmutableField { .. }));
    }

    #[test]
    fn bare_canvas_references_in_ranges_stay_bare() {
        let value = serde_json::json!({
            "id": "https://example.org/range/1",
            "type": "Range",
            "items": [
                { "id": "https://example.org/canvas/1", "type": "Canvas" }
            ],
        });
        let mut range = Range::new(config());
        read_range_into(&mut range, &value).unwrap();
        assert!(matches!(range.items()[0], RangeItem::CanvasRef(_)));
    }

    #[test]
    fn textual_bodies_dispatch_on_type() {
        let value = serde_json::json!({
            "id": "https://example.org/anno/1",
            "type": "Annotation",
            "motivation": "commenting",
            "body": { "type": "TextualBody", "value": "hello", "language": "en" },
            "target": "https://example.org/canvas/1",
        });
        let mut annotation = Annotation::new(config());
        read_annotation_into(&mut annotation, &value).unwrap();
        assert!(annotation.body().and_then(|b| b.as_textual()).is_some());
    }
}
