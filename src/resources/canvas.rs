//! The Canvas: one page or view of the object.
//!
//! A Canvas is a spatial and/or temporal extent — height and width, a
//! duration, or both — painted by the Annotations of its `items` pages.
//! Canvas URIs must be dereferenceable without a fragment.

use std::sync::Arc;

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::field::Field;
use crate::json::ObjectWriter;
use crate::resources::annotation::AnnotationPage;
use crate::resources::common::{
    push_and_get, Common, HasCommon, Nav, Navigable, Spatial, Temporal,
};
use crate::resources::core::{Core, Kind, Resource};
use crate::resources::resource_to_json;

#[derive(Clone, Debug)]
pub struct Canvas {
    core: Core,
    common: Common,
    nav: Nav,
    height: Field<u32>,
    width: Field<u32>,
    duration: Field<f64>,
    items: Field<Vec<AnnotationPage>>,
    annotations: Field<Vec<AnnotationPage>>,
    aux: bool,
}

impl Canvas {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self::build(config, false)
    }

    /// A placeholder or accompanying Canvas: identical except that it cannot
    /// carry placeholder/accompanying Canvases of its own.
    pub(crate) fn aux(config: Arc<BuilderConfig>) -> Self {
        Self::build(config, true)
    }

    fn build(config: Arc<BuilderConfig>, aux: bool) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("Canvas"),
                Field::Required("a Canvas must have the ID property"),
                Field::Recommended("a Canvas should have the label property"),
            ),
            common: Common::default(),
            nav: Nav::default(),
            height: Field::Required("a Canvas must have a height or a duration"),
            width: Field::Required("a Canvas must have a width or a duration"),
            duration: Field::Absent,
            items: Field::Recommended("a Canvas should contain at least one item"),
            annotations: Field::Absent,
            aux,
        }
    }

    /// Appends a fresh AnnotationPage to `items` and returns it.
    pub fn add_annotation_page(&mut self) -> &mut AnnotationPage {
        let config = self.config().clone();
        push_and_get(&mut self.items, AnnotationPage::new(config))
    }

    pub fn add_annotation_page_entry(&mut self, page: AnnotationPage) {
        self.items.get_or_insert_with(Vec::new).push(page);
    }

    /// Appends a fresh AnnotationPage to `annotations` — the home of
    /// non-painting Annotations about this Canvas.
    pub fn add_annotation_page_to_annotations(&mut self) -> &mut AnnotationPage {
        let config = self.config().clone();
        push_and_get(&mut self.annotations, AnnotationPage::new(config))
    }

    pub fn add_annotation_page_to_annotations_entry(&mut self, page: AnnotationPage) {
        self.annotations.get_or_insert_with(Vec::new).push(page);
    }

    pub fn items(&self) -> &[AnnotationPage] {
        self.items.get().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn height(&self) -> Option<u32> {
        self.height.get().copied()
    }

    pub fn width(&self) -> Option<u32> {
        self.width.get().copied()
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration.get().copied()
    }
}

impl Resource for Canvas {
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
        w.field("height", &self.height)?;
        w.field("width", &self.width)?;
        w.field("duration", &self.duration)?;
        w.field("items", &self.items)?;
        w.field("annotations", &self.annotations)?;
        Ok(())
    }
}

impl HasCommon for Canvas {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn spatial_dims_set(&self) -> bool {
        self.height.is_set() && self.width.is_set()
    }
}

impl Navigable for Canvas {
    fn nav(&self) -> &Nav {
        &self.nav
    }

    fn nav_mut(&mut self) -> &mut Nav {
        &mut self.nav
    }

    fn nested_canvas_allowed(&self) -> bool {
        !self.aux
    }
}

impl Spatial for Canvas {
    fn height_slot(&mut self) -> &mut Field<u32> {
        &mut self.height
    }

    fn width_slot(&mut self) -> &mut Field<u32> {
        &mut self.width
    }
}

impl Temporal for Canvas {
    fn duration_slot(&mut self) -> &mut Field<f64> {
        &mut self.duration
    }
}

resource_to_json!(Canvas);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::Mode;

    fn config() -> Arc<BuilderConfig> {
        BuilderConfig::shared("https://example.org/")
    }

    #[test]
    fn canvas_id_rejects_fragments() {
        let mut canvas = Canvas::new(config());
        let err = canvas
            .set_id(Some("https://example.org/canvas/1#xywh=0,0,10,10"), None)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedUri { .. }));
        assert!(canvas.set_id(Some("https://example.org/canvas/1"), None).is_ok());
    }

    #[test]
    fn strict_serialization_needs_dimensions_or_duration() {
        let mut canvas = Canvas::new(config());
        canvas.set_id(Some("https://example.org/canvas/1"), None).unwrap();
        assert!(canvas.to_value(Mode::Strict).is_err());

        canvas.set_duration(120.5).unwrap();
        let json = canvas.to_value(Mode::Strict).unwrap();
        assert_eq!(json["duration"], 120.5);
        assert!(json.get("height").is_none());
    }

    #[test]
    fn facing_pages_requires_dimensions_first() {
        let mut canvas = Canvas::new(config());
        assert!(canvas.add_behavior("facing-pages").is_err());
        canvas.set_height_width(4613, 3204).unwrap();
        assert!(canvas.add_behavior("facing-pages").is_ok());
    }

    #[test]
    fn paged_is_invalid_on_a_canvas() {
        let mut canvas = Canvas::new(config());
        canvas.set_height_width(100, 100).unwrap();
        let err = canvas.add_behavior("paged").unwrap_err();
        assert!(matches!(err, Error::InvalidBehavior { .. }));
    }

    #[test]
    fn placeholder_canvas_cannot_nest_further() {
        let mut canvas = Canvas::new(config());
        let placeholder = canvas.set_placeholder_canvas().unwrap();
        placeholder.set_height_width(100, 100).unwrap();
        assert!(matches!(
            placeholder.set_placeholder_canvas(),
            Err(Error::ImmutableField { .. })
        ));
        assert!(matches!(
            placeholder.set_accompanying_canvas(),
            Err(Error::ImmutableField { .. })
        ));
    }
}
