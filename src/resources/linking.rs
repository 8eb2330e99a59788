//! The small linking and reference resources.
//!
//! These hang off the major containers: machine-readable descriptions
//! (`seeAlso`), containing resources (`partOf`), web pages (`homepage`),
//! alternative representations (`rendering`), agents (`provider` with
//! `logo`), content previews (`thumbnail`), services (`service`/`services`),
//! the `start` pointer, a Range's `supplementary` Annotation Collection, and
//! the reference stub a Collection stores in place of an embedded Manifest.

use std::sync::Arc;

use serde_json::Value;

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::field::Field;
use crate::json::{Mode, ObjectWriter, ToJson};
use crate::resources::common::{check_nav_date, push_and_get, FormatField, Spatial, Temporal};
use crate::resources::core::{Core, Kind, Resource};
use crate::resources::manifest::Manifest;
use crate::resources::selector::{PointSelector, Selector};
use crate::resources::{resource_to_json, HasCommon as _, Languages};

/// A machine-readable resource related to the one carrying it, such as an
/// XML or RDF description.
#[derive(Clone, Debug)]
pub struct SeeAlso {
    core: Core,
    format: Field<String>,
    profile: Field<String>,
}

impl SeeAlso {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::open_required("a seeAlso resource must have a type, e.g. Dataset or Image"),
                Field::Required("a seeAlso resource must have the ID property"),
                Field::Recommended("a seeAlso resource should have the label property"),
            ),
            format: Field::Recommended(
                "a seeAlso resource should have the format property, e.g. text/xml",
            ),
            profile: Field::Recommended(
                "resources referenced by seeAlso or service should have the profile property",
            ),
        }
    }

    pub fn set_profile(&mut self, profile: &str) {
        self.profile.set(profile.to_string());
    }
}

impl Resource for SeeAlso {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("format", &self.format)?;
        w.field("profile", &self.profile)?;
        Ok(())
    }
}

impl FormatField for SeeAlso {
    fn format_slot(&mut self) -> &mut Field<String> {
        &mut self.format
    }
}

/// A containing resource, e.g. the Collection a Manifest belongs to.
///
/// Identifiers here point at arbitrary external resources, so `set_id`
/// performs no URI validation.
#[derive(Clone, Debug)]
pub struct PartOf {
    core: Core,
}

impl PartOf {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::open_required("each partOf item must have a type"),
                Field::Required("each partOf item must have the ID property"),
                Field::Recommended("each partOf item should have the label property"),
            ),
        }
    }
}

impl Resource for PartOf {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn set_id(&mut self, objid: Option<&str>, extend_base_url: Option<&str>) -> Result<(), Error> {
        let resolved = match (objid, extend_base_url) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidArgument(
                    "set the id using objid or extend_base_url, not both".to_string(),
                ))
            }
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "set_id needs either objid or extend_base_url".to_string(),
                ))
            }
            (Some(uri), None) => uri.to_string(),
            (None, Some(suffix)) => self.config().resolve(suffix)?,
        };
        self.core.id.set(resolved);
        Ok(())
    }

    fn set_type(&mut self, kind: &str) -> Result<(), Error> {
        if kind.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidArgument(
                "a partOf type must not start with a digit".to_string(),
            ));
        }
        match &mut self.core.kind {
            Kind::Open(slot) => {
                slot.set(kind.to_string());
                Ok(())
            }
            Kind::Fixed(_) => unreachable!("partOf has an open type"),
        }
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)
    }
}

/// A web page about the object, displayable directly to the user.
#[derive(Clone, Debug)]
pub struct Homepage {
    core: Core,
    language: Field<Vec<String>>,
    format: Field<String>,
}

impl Homepage {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::open_required("a homepage must have a type, e.g. Text"),
                Field::Required("a homepage must have the ID property"),
                Field::Required("a homepage must have a label"),
            ),
            language: Field::Absent,
            format: Field::Recommended(
                "a homepage should have the format property, e.g. text/html",
            ),
        }
    }
}

impl Resource for Homepage {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("language", &self.language)?;
        w.field("format", &self.format)?;
        Ok(())
    }
}

impl FormatField for Homepage {
    fn format_slot(&mut self) -> &mut Field<String> {
        &mut self.format
    }
}

impl Languages for Homepage {
    fn language_slot(&mut self) -> &mut Field<Vec<String>> {
        &mut self.language
    }
}

/// An alternative, non-IIIF representation: a PDF of the book, a 3D model.
#[derive(Clone, Debug)]
pub struct Rendering {
    core: Core,
    format: Field<String>,
}

impl Rendering {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::open_required("a rendering must have a type"),
                Field::Required("a rendering must have the ID property"),
                Field::Required("a rendering must have a label"),
            ),
            format: Field::Recommended(
                "a rendering should have the format property, e.g. application/pdf",
            ),
        }
    }
}

impl Resource for Rendering {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("format", &self.format)?;
        Ok(())
    }
}

impl FormatField for Rendering {
    fn format_slot(&mut self) -> &mut Field<String> {
        &mut self.format
    }
}

/// The small image representing an Agent. Its type is always `Image` and it
/// never carries a label.
#[derive(Clone, Debug)]
pub struct Logo {
    core: Core,
    format: Field<String>,
    height: Field<u32>,
    width: Field<u32>,
    service: Field<Vec<Service>>,
}

impl Logo {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("Image"),
                Field::Required("a logo must have the ID property"),
                Field::Absent,
            ),
            format: Field::Recommended("a logo should have a format attribute, e.g. image/png"),
            height: Field::Absent,
            width: Field::Absent,
            service: Field::Recommended(
                "a logo should have the service property; add one with add_service()",
            ),
        }
    }

    pub fn add_service(&mut self) -> &mut Service {
        let config = self.config().clone();
        push_and_get(&mut self.service, Service::new(config))
    }

    pub fn add_service_entry(&mut self, service: Service) {
        self.service.get_or_insert_with(Vec::new).push(service);
    }
}

impl Resource for Logo {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn add_label(&mut self, _language: Option<&str>, _text: &str) -> Result<(), Error> {
        Err(Error::ImmutableField {
            kind: "Image".to_string(),
            field: "label",
            reason: "a label is not permitted on a logo".to_string(),
        })
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("format", &self.format)?;
        w.field("height", &self.height)?;
        w.field("width", &self.width)?;
        w.field("service", &self.service)?;
        Ok(())
    }
}

impl FormatField for Logo {
    fn format_slot(&mut self) -> &mut Field<String> {
        &mut self.format
    }
}

impl Spatial for Logo {
    fn height_slot(&mut self) -> &mut Field<u32> {
        &mut self.height
    }

    fn width_slot(&mut self) -> &mut Field<u32> {
        &mut self.width
    }
}

/// A content preview: a small image or short clip representing the resource.
///
/// The type defaults to `Image`, the overwhelmingly common case, and stays
/// mutable for audio/video previews.
#[derive(Clone, Debug)]
pub struct Thumbnail {
    core: Core,
    format: Field<String>,
    height: Field<u32>,
    width: Field<u32>,
    duration: Field<f64>,
    service: Field<Vec<Service>>,
}

impl Thumbnail {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::open_value("Image"),
                Field::Required("a thumbnail must have the ID property"),
                Field::Absent,
            ),
            format: Field::Absent,
            height: Field::Absent,
            width: Field::Absent,
            duration: Field::Absent,
            service: Field::Absent,
        }
    }

    pub fn add_service(&mut self) -> &mut Service {
        let config = self.config().clone();
        push_and_get(&mut self.service, Service::new(config))
    }

    pub fn add_service_entry(&mut self, service: Service) {
        self.service.get_or_insert_with(Vec::new).push(service);
    }
}

impl Resource for Thumbnail {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("format", &self.format)?;
        w.field("height", &self.height)?;
        w.field("width", &self.width)?;
        w.field("duration", &self.duration)?;
        w.field("service", &self.service)?;
        Ok(())
    }
}

impl FormatField for Thumbnail {
    fn format_slot(&mut self) -> &mut Field<String> {
        &mut self.format
    }
}

impl Spatial for Thumbnail {
    fn height_slot(&mut self) -> &mut Field<u32> {
        &mut self.height
    }

    fn width_slot(&mut self) -> &mut Field<u32> {
        &mut self.width
    }
}

impl Temporal for Thumbnail {
    fn duration_slot(&mut self) -> &mut Field<f64> {
        &mut self.duration
    }
}

/// An organization or person that contributed to providing the content.
#[derive(Clone, Debug)]
pub struct Provider {
    core: Core,
    homepage: Field<Vec<Homepage>>,
    logo: Field<Vec<Logo>>,
    see_also: Field<Vec<SeeAlso>>,
}

impl Provider {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("Agent"),
                Field::Required("an Agent must have the id property"),
                Field::Required("an Agent must have the label property"),
            ),
            homepage: Field::Recommended("an Agent should have the homepage property"),
            logo: Field::Recommended("an Agent should have the logo property"),
            see_also: Field::Absent,
        }
    }

    pub fn add_homepage(&mut self) -> &mut Homepage {
        let config = self.config().clone();
        push_and_get(&mut self.homepage, Homepage::new(config))
    }

    pub fn add_homepage_entry(&mut self, homepage: Homepage) {
        self.homepage.get_or_insert_with(Vec::new).push(homepage);
    }

    pub fn add_logo(&mut self) -> &mut Logo {
        let config = self.config().clone();
        push_and_get(&mut self.logo, Logo::new(config))
    }

    pub fn add_logo_entry(&mut self, logo: Logo) {
        self.logo.get_or_insert_with(Vec::new).push(logo);
    }

    pub fn add_see_also(&mut self) -> &mut SeeAlso {
        let config = self.config().clone();
        push_and_get(&mut self.see_also, SeeAlso::new(config))
    }

    pub fn add_see_also_entry(&mut self, see_also: SeeAlso) {
        self.see_also.get_or_insert_with(Vec::new).push(see_also);
    }
}

impl Resource for Provider {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("homepage", &self.homepage)?;
        w.field("logo", &self.logo)?;
        w.field("seeAlso", &self.see_also)?;
        Ok(())
    }
}

/// An advertised size of an Image API service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl ToJson for Size {
    fn to_json(&self, _mode: Mode) -> Result<Value, Error> {
        Ok(serde_json::json!({ "width": self.width, "height": self.height }))
    }
}

/// A service the client can interact with, such as an Image API endpoint.
#[derive(Clone, Debug)]
pub struct Service {
    core: Core,
    profile: Field<String>,
    width: Field<u32>,
    height: Field<u32>,
    service: Field<Vec<Service>>,
    sizes: Field<Vec<Size>>,
}

impl Service {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::open_required("each service must have a type property, e.g. ImageService3"),
                Field::Required("each service must have the id property"),
                Field::Absent,
            ),
            profile: Field::Recommended("each service should have a profile property"),
            width: Field::Absent,
            height: Field::Absent,
            service: Field::Absent,
            sizes: Field::Absent,
        }
    }

    pub fn set_profile(&mut self, profile: &str) {
        self.profile.set(profile.to_string());
    }

    pub fn add_size(&mut self, width: u32, height: u32) {
        self.sizes
            .get_or_insert_with(Vec::new)
            .push(Size { width, height });
    }

    pub fn add_service(&mut self) -> &mut Service {
        let config = self.config().clone();
        push_and_get(&mut self.service, Service::new(config))
    }

    pub fn add_service_entry(&mut self, service: Service) {
        self.service.get_or_insert_with(Vec::new).push(service);
    }
}

impl Resource for Service {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("profile", &self.profile)?;
        w.field("width", &self.width)?;
        w.field("height", &self.height)?;
        w.field("service", &self.service)?;
        w.field("sizes", &self.sizes)?;
        Ok(())
    }
}

impl Spatial for Service {
    fn height_slot(&mut self) -> &mut Field<u32> {
        &mut self.height
    }

    fn width_slot(&mut self) -> &mut Field<u32> {
        &mut self.width
    }
}

/// An entry of the top-level `services` list: a shared service definition
/// referenced from deeper in the document.
#[derive(Clone, Debug)]
pub struct Services {
    core: Core,
    profile: Field<String>,
    service: Field<Vec<Service>>,
}

impl Services {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::open_required("each object in services must have a type property"),
                Field::Required("each object in services must have the id property"),
                Field::Absent,
            ),
            profile: Field::Recommended("services should have a profile property"),
            service: Field::Required(
                "services must have at least one service; add one with add_service()",
            ),
        }
    }

    pub fn set_profile(&mut self, profile: &str) {
        self.profile.set(profile.to_string());
    }

    pub fn add_service(&mut self) -> &mut Service {
        let config = self.config().clone();
        push_and_get(&mut self.service, Service::new(config))
    }

    pub fn add_service_entry(&mut self, service: Service) {
        self.service.get_or_insert_with(Vec::new).push(service);
    }
}

impl Resource for Services {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("profile", &self.profile)?;
        w.field("service", &self.service)?;
        Ok(())
    }
}

/// The Canvas (or part of one) a client should show on initialization.
///
/// Pointing the start at anything other than a Canvas obliges the caller to
/// provide a `source` and a `selector`.
#[derive(Clone, Debug)]
pub struct Start {
    core: Core,
    profile: Field<String>,
    source: Field<String>,
    selector: Field<Selector>,
}

impl Start {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::open_required("a start object must have a type"),
                Field::Required("a start object must have an id"),
                Field::Absent,
            ),
            profile: Field::Recommended("a start object should have a profile"),
            source: Field::Absent,
            selector: Field::Absent,
        }
    }

    pub fn set_profile(&mut self, profile: &str) {
        self.profile.set(profile.to_string());
    }

    pub fn set_source(&mut self, source: &str) {
        self.source.set(source.to_string());
    }

    pub fn set_selector(&mut self, selector: Selector) {
        self.selector.set(selector);
    }

    pub fn set_point_selector(&mut self) -> &mut PointSelector {
        match self.selector.insert(Selector::Point(PointSelector::new())) {
            Selector::Point(point) => point,
            _ => unreachable!(),
        }
    }
}

impl Resource for Start {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn set_type(&mut self, kind: &str) -> Result<(), Error> {
        if kind != "Canvas" {
            if self.source.is_unset() {
                self.source =
                    Field::Required("a start not pointing at a Canvas must specify a source");
            }
            if self.selector.is_unset() {
                self.selector =
                    Field::Required("a start not pointing at a Canvas must specify a selector");
            }
        }
        match &mut self.core.kind {
            Kind::Open(slot) => {
                slot.set(kind.to_string());
                Ok(())
            }
            Kind::Fixed(_) => unreachable!("start has an open type"),
        }
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("profile", &self.profile)?;
        w.field("source", &self.source)?;
        w.field("selector", &self.selector)?;
        Ok(())
    }
}

/// A Range's link to the Annotation Collection holding its supplementing
/// Annotations.
#[derive(Clone, Debug)]
pub struct Supplementary {
    core: Core,
}

impl Supplementary {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("AnnotationCollection"),
                Field::Required("a supplementary reference must have the ID property"),
                Field::Recommended(
                    "an Annotation Collection should have the label property",
                ),
            ),
        }
    }
}

impl Resource for Supplementary {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)
    }
}

/// The stub a Collection stores for a Manifest: Collections reference
/// Manifests, they do not embed them. Only id, type, label and thumbnail
/// survive the copy.
#[derive(Clone, Debug)]
pub struct ManifestRef {
    core: Core,
    thumbnail: Field<Vec<Thumbnail>>,
    nav_date: Field<String>,
}

impl ManifestRef {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("Manifest"),
                Field::Required("a Manifest reference must have the ID property"),
                Field::Absent,
            ),
            thumbnail: Field::Recommended(
                "a Manifest reference should have the thumbnail property with at least one item",
            ),
            nav_date: Field::Absent,
        }
    }

    /// Builds the reference stub from a full Manifest.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let mut stub = Self::new(manifest.config().clone());
        stub.core.id = manifest.core().id.clone();
        stub.core.label = manifest.core().label.clone();
        if let Some(thumbnails) = manifest.common().thumbnail.get() {
            stub.thumbnail.set(thumbnails.clone());
        }
        stub
    }

    pub fn add_thumbnail(&mut self) -> &mut Thumbnail {
        let config = self.config().clone();
        push_and_get(&mut self.thumbnail, Thumbnail::new(config))
    }

    pub fn add_thumbnail_entry(&mut self, thumbnail: Thumbnail) {
        self.thumbnail.get_or_insert_with(Vec::new).push(thumbnail);
    }

    pub fn set_nav_date(&mut self, nav_date: &str) -> Result<(), Error> {
        check_nav_date(nav_date)?;
        self.nav_date.set(nav_date.to_string());
        Ok(())
    }
}

impl Resource for ManifestRef {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        w.field("thumbnail", &self.thumbnail)?;
        w.field("navDate", &self.nav_date)?;
        Ok(())
    }
}

resource_to_json!(
    SeeAlso,
    PartOf,
    Homepage,
    Rendering,
    Logo,
    Thumbnail,
    Provider,
    Service,
    Services,
    Start,
    Supplementary,
    ManifestRef,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::Mode;

    fn config() -> Arc<BuilderConfig> {
        BuilderConfig::shared("https://example.org/")
    }

    #[test]
    fn logo_rejects_labels_and_type_changes() {
        let mut logo = Logo::new(config());
        assert!(matches!(
            logo.add_label(Some("en"), "Logo"),
            Err(Error::ImmutableField { .. })
        ));
        assert!(matches!(
            logo.set_type("Text"),
            Err(Error::ImmutableField { .. })
        ));
    }

    #[test]
    fn part_of_set_id_skips_uri_validation() {
        let mut part_of = PartOf::new(config());
        part_of.set_id(Some("urn:example:collection"), None).unwrap();
        assert_eq!(part_of.id(), Some("urn:example:collection"));
    }

    #[test]
    fn part_of_type_must_not_start_with_digit() {
        let mut part_of = PartOf::new(config());
        assert!(part_of.set_type("3Dataset").is_err());
        assert!(part_of.set_type("Collection").is_ok());
    }

    #[test]
    fn non_canvas_start_requires_source_and_selector() {
        let mut start = Start::new(config());
        start.set_type("SpecificResource").unwrap();
        start.set_id(Some("https://example.org/start/1"), None).unwrap();
        let err = start.to_value(Mode::Strict).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { .. }));

        let mut start = Start::new(config());
        start.set_type("Canvas").unwrap();
        start.set_id(Some("https://example.org/canvas/1"), None).unwrap();
        assert!(start.to_value(Mode::Strict).is_ok());
    }

    #[test]
    fn service_sizes_serialize_in_order() {
        let mut service = Service::new(config());
        service.set_id(Some("https://example.org/iiif/image"), None).unwrap();
        service.set_type("ImageService3").unwrap();
        service.set_profile("level1");
        service.add_size(150, 100);
        service.add_size(600, 400);
        let value = service.to_value(Mode::Strict).unwrap();
        assert_eq!(
            value["sizes"],
            serde_json::json!([
                { "width": 150, "height": 100 },
                { "width": 600, "height": 400 },
            ])
        );
    }
}
