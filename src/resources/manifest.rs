//! The Manifest: the description of one object and its views.

use std::sync::Arc;

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::field::Field;
use crate::json::ObjectWriter;
use crate::resources::annotation::AnnotationPage;
use crate::resources::canvas::Canvas;
use crate::resources::common::{
    push_and_get, Common, HasCommon, Nav, Navigable, ViewingDirectional,
};
use crate::resources::core::{Core, Kind, Resource};
use crate::resources::linking::{Services, Start};
use crate::resources::range::Range;
use crate::resources::resource_to_json;

/// The top-level document for a single digitized object.
///
/// ```
/// use iiifgen::{BuilderConfig, Manifest, Resource, Spatial};
///
/// let config = BuilderConfig::shared("https://example.org/iiif/book1/");
/// let mut manifest = Manifest::new(config);
/// manifest.set_id(None, Some("manifest.json"))?;
/// manifest.add_label(Some("en"), "Simple Manifest - Book")?;
/// let canvas = manifest.add_canvas();
/// canvas.set_id(None, Some("canvas/p1"))?;
/// canvas.set_height_width(1800, 1200)?;
/// # Ok::<(), iiifgen::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Manifest {
    core: Core,
    common: Common,
    nav: Nav,
    start: Field<Start>,
    viewing_direction: Field<String>,
    services: Field<Vec<Services>>,
    items: Field<Vec<Canvas>>,
    annotations: Field<Vec<AnnotationPage>>,
    structures: Field<Vec<Range>>,
}

impl Manifest {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        let common = Common {
            metadata: Field::Recommended(
                "a Manifest should have the metadata property with at least one item",
            ),
            summary: Field::Recommended(
                "a Manifest should have the summary property with at least one entry",
            ),
            thumbnail: Field::Recommended(
                "a Manifest should have the thumbnail property with at least one item",
            ),
            provider: Field::Recommended(
                "a Manifest should have the provider property with at least one item",
            ),
            ..Common::default()
        };
        Self {
            core: Core::new(
                config,
                Kind::Fixed("Manifest"),
                Field::Required("a Manifest must have the ID property"),
                Field::Required("a Manifest must have the label property with at least one entry"),
            ),
            common,
            nav: Nav::default(),
            start: Field::Absent,
            viewing_direction: Field::Absent,
            services: Field::Absent,
            items: Field::Required("the Manifest must have an items property"),
            annotations: Field::Absent,
            structures: Field::Absent,
        }
    }

    /// Starts the `start` pointer and returns it for type/id filling.
    pub fn set_start(&mut self) -> &mut Start {
        let config = self.config().clone();
        self.start.insert(Start::new(config))
    }

    /// Appends a fresh Canvas to `items` and returns it.
    pub fn add_canvas(&mut self) -> &mut Canvas {
        let config = self.config().clone();
        push_and_get(&mut self.items, Canvas::new(config))
    }

    pub fn add_canvas_entry(&mut self, canvas: Canvas) {
        self.items.get_or_insert_with(Vec::new).push(canvas);
    }

    /// Appends a fresh Range to `structures` — the table of contents.
    pub fn add_range(&mut self) -> &mut Range {
        let config = self.config().clone();
        push_and_get(&mut self.structures, Range::new(config))
    }

    pub fn add_range_entry(&mut self, range: Range) {
        self.structures.get_or_insert_with(Vec::new).push(range);
    }

    /// Appends an entry to the top-level `services` list.
    pub fn add_services(&mut self) -> &mut Services {
        let config = self.config().clone();
        push_and_get(&mut self.services, Services::new(config))
    }

    pub fn add_services_entry(&mut self, services: Services) {
        self.services.get_or_insert_with(Vec::new).push(services);
    }

    /// Appends a fresh AnnotationPage to `annotations`; its Annotations must
    /// not have `painting` as their motivation.
    pub fn add_annotation_page_to_annotations(&mut self) -> &mut AnnotationPage {
        let config = self.config().clone();
        push_and_get(&mut self.annotations, AnnotationPage::new(config))
    }

    pub fn add_annotation_page_to_annotations_entry(&mut self, page: AnnotationPage) {
        self.annotations.get_or_insert_with(Vec::new).push(page);
    }

    pub fn items(&self) -> &[Canvas] {
        self.items.get().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Resource for Manifest {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        self.common.write(w)?;
        self.nav.write(w)?;
        w.field("start", &self.start)?;
        w.field("viewingDirection", &self.viewing_direction)?;
        w.field("services", &self.services)?;
        w.field("items", &self.items)?;
        w.field("annotations", &self.annotations)?;
        w.field("structures", &self.structures)?;
        Ok(())
    }
}

impl HasCommon for Manifest {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}

impl Navigable for Manifest {
    fn nav(&self) -> &Nav {
        &self.nav
    }

    fn nav_mut(&mut self) -> &mut Nav {
        &mut self.nav
    }
}

impl ViewingDirectional for Manifest {
    fn viewing_direction_slot(&mut self) -> &mut Field<String> {
        &mut self.viewing_direction
    }
}

resource_to_json!(Manifest);
