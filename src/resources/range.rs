//! Ranges: the structure (table of contents) of a Manifest.
//!
//! A Range orders Canvases, parts of Canvases, or further Ranges. Items may
//! be embedded objects or bare `{id, type}` references to Canvases defined
//! in the Manifest's `items`.

use std::sync::Arc;

use serde_json::Value;

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::field::Field;
use crate::json::{Mode, ObjectWriter, ToJson};
use crate::resources::annotation::AnnotationPage;
use crate::resources::canvas::Canvas;
use crate::resources::common::{
    push_and_get, Common, HasCommon, Nav, Navigable, ViewingDirectional,
};
use crate::resources::core::{Core, Kind, Resource};
use crate::resources::linking::{Start, Supplementary};
use crate::resources::resource_to_json;
use crate::resources::selector::SpecificResource;

/// One entry of a Range's `items` list.
#[derive(Clone, Debug)]
pub enum RangeItem {
    Range(Box<Range>),
    Canvas(Box<Canvas>),
    /// A reference to a Canvas by URI, serialized as `{id, type: "Canvas"}`.
    CanvasRef(String),
    Specific(Box<SpecificResource>),
}

impl ToJson for RangeItem {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        match self {
            RangeItem::Range(range) => range.to_value(mode),
            RangeItem::Canvas(canvas) => canvas.to_value(mode),
            RangeItem::CanvasRef(id) => Ok(serde_json::json!({ "id": id, "type": "Canvas" })),
            RangeItem::Specific(resource) => resource.to_value(mode),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Range {
    core: Core,
    common: Common,
    nav: Nav,
    start: Field<Start>,
    viewing_direction: Field<String>,
    supplementary: Field<Supplementary>,
    items: Field<Vec<RangeItem>>,
    annotations: Field<Vec<AnnotationPage>>,
}

impl Range {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("Range"),
                Field::Required("a Range must have the ID property"),
                Field::Recommended("a Range should have the label property with at least one entry"),
            ),
            common: Common::default(),
            nav: Nav::default(),
            start: Field::Absent,
            viewing_direction: Field::Absent,
            supplementary: Field::Absent,
            items: Field::Required("a Range must have at least one item"),
            annotations: Field::Absent,
        }
    }

    /// Appends a nested Range and returns it.
    pub fn add_range(&mut self) -> &mut Range {
        let config = self.config().clone();
        match push_and_get(
            &mut self.items,
            RangeItem::Range(Box::new(Range::new(config))),
        ) {
            RangeItem::Range(range) => range,
            _ => unreachable!(),
        }
    }

    pub fn add_range_entry(&mut self, range: Range) {
        self.items
            .get_or_insert_with(Vec::new)
            .push(RangeItem::Range(Box::new(range)));
    }

    /// Appends a bare reference to a Canvas by its URI.
    pub fn add_canvas_ref(&mut self, canvas_id: &str) {
        self.items
            .get_or_insert_with(Vec::new)
            .push(RangeItem::CanvasRef(canvas_id.to_string()));
    }

    /// Appends an embedded Canvas.
    pub fn add_canvas_entry(&mut self, canvas: Canvas) {
        self.items
            .get_or_insert_with(Vec::new)
            .push(RangeItem::Canvas(Box::new(canvas)));
    }

    /// Appends a SpecificResource (for canvas-fragment targeting) and
    /// returns it for source/selector filling.
    pub fn add_specific_resource(&mut self) -> &mut SpecificResource {
        let config = self.config().clone();
        match push_and_get(
            &mut self.items,
            RangeItem::Specific(Box::new(SpecificResource::new(config))),
        ) {
            RangeItem::Specific(resource) => resource,
            _ => unreachable!(),
        }
    }

    pub fn add_specific_resource_entry(&mut self, resource: SpecificResource) {
        self.items
            .get_or_insert_with(Vec::new)
            .push(RangeItem::Specific(Box::new(resource)));
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

    /// Starts the `start` pointer and returns it for type/id filling.
    pub fn set_start(&mut self) -> &mut Start {
        let config = self.config().clone();
        self.start.insert(Start::new(config))
    }

    /// Links the Annotation Collection supplementing this Range.
    pub fn set_supplementary(
        &mut self,
        objid: Option<&str>,
        extend_base_url: Option<&str>,
    ) -> Result<(), Error> {
        let config = self.config().clone();
        let mut supplementary = Supplementary::new(config);
        supplementary.set_id(objid, extend_base_url)?;
        self.supplementary.set(supplementary);
        Ok(())
    }

    pub fn set_supplementary_entry(&mut self, supplementary: Supplementary) {
        self.supplementary.set(supplementary);
    }

    pub fn items(&self) -> &[RangeItem] {
        self.items.get().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Resource for Range {
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
        w.field("supplementary", &self.supplementary)?;
        w.field("items", &self.items)?;
        w.field("annotations", &self.annotations)?;
        Ok(())
    }
}

impl HasCommon for Range {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}

impl Navigable for Range {
    fn nav(&self) -> &Nav {
        &self.nav
    }

    fn nav_mut(&mut self) -> &mut Nav {
        &mut self.nav
    }
}

impl ViewingDirectional for Range {
    fn viewing_direction_slot(&mut self) -> &mut Field<String> {
        &mut self.viewing_direction
    }
}

resource_to_json!(Range);
