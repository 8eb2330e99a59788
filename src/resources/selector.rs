//! SpecificResource and the selector family.
//!
//! A SpecificResource narrows a target to part of a resource: a point, a
//! region fragment, an SVG outline, or an Image API request. Selectors are
//! plain values, not resources — they carry no id or label.

use std::sync::Arc;

use serde_json::Value;

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::field::Field;
use crate::json::{Mode, ObjectWriter, ToJson};
use crate::resources::common::{Common, HasCommon};
use crate::resources::core::{Core, Kind, Resource};
use crate::resources::resource_to_json;

/// One of the selector kinds defined for canvas-fragment targeting.
#[derive(Clone, Debug)]
pub enum Selector {
    Point(PointSelector),
    Fragment(FragmentSelector),
    Svg(SvgSelector),
    ImageApi(ImageApiSelector),
}

impl ToJson for Selector {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        match self {
            Selector::Point(s) => s.to_json(mode),
            Selector::Fragment(s) => s.to_json(mode),
            Selector::Svg(s) => s.to_json(mode),
            Selector::ImageApi(s) => s.to_json(mode),
        }
    }
}

/// An exact point on the target: a pin in a map, an instant in a recording.
#[derive(Clone, Debug, Default)]
pub struct PointSelector {
    x: Field<u32>,
    y: Field<u32>,
    t: Field<f64>,
}

impl PointSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_x(&mut self, x: u32) {
        self.x.set(x);
    }

    pub fn set_y(&mut self, y: u32) {
        self.y.set(y);
    }

    /// The time of the point in seconds, relative to the target's duration.
    pub fn set_t(&mut self, t: f64) {
        self.t.set(t);
    }
}

impl ToJson for PointSelector {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        let mut w = ObjectWriter::new(mode);
        w.raw("type", Value::String("PointSelector".to_string()));
        w.field("x", &self.x)?;
        w.field("y", &self.y)?;
        w.field("t", &self.t)?;
        Ok(w.finish())
    }
}

/// A media-fragment selector, e.g. `xywh=10,10,100,100`.
#[derive(Clone, Debug)]
pub struct FragmentSelector {
    value: Field<String>,
}

impl FragmentSelector {
    pub fn new() -> Self {
        Self {
            value: Field::Required("a FragmentSelector must have a value"),
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value.set(value.to_string());
    }

    /// Sets the value to the `xywh=` region form.
    pub fn set_xywh(&mut self, x: u32, y: u32, w: u32, h: u32) {
        self.value.set(format!("xywh={x},{y},{w},{h}"));
    }
}

impl Default for FragmentSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ToJson for FragmentSelector {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        let mut w = ObjectWriter::new(mode);
        w.raw("type", Value::String("FragmentSelector".to_string()));
        w.field("value", &self.value)?;
        Ok(w.finish())
    }
}

/// An SVG outline selecting a non-rectangular region.
#[derive(Clone, Debug)]
pub struct SvgSelector {
    value: Field<String>,
}

impl SvgSelector {
    pub fn new() -> Self {
        Self {
            value: Field::Required("an SvgSelector must have a value"),
        }
    }

    pub fn set_value(&mut self, svg: &str) {
        self.value.set(svg.to_string());
    }
}

impl Default for SvgSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ToJson for SvgSelector {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        let mut w = ObjectWriter::new(mode);
        w.raw("type", Value::String("SvgSelector".to_string()));
        w.field("value", &self.value)?;
        Ok(w.finish())
    }
}

/// A selector describing an Image API request: region, size, rotation,
/// quality and format.
#[derive(Clone, Debug)]
pub struct ImageApiSelector {
    config: Arc<BuilderConfig>,
    region: Field<String>,
    size: Field<String>,
    rotation: Field<String>,
    quality: Field<String>,
    format: Field<String>,
}

impl ImageApiSelector {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            config,
            region: Field::Absent,
            size: Field::Absent,
            rotation: Field::Absent,
            quality: Field::Absent,
            format: Field::Absent,
        }
    }

    pub fn set_region(&mut self, region: &str) {
        self.region.set(region.to_string());
    }

    pub fn set_size(&mut self, size: &str) {
        self.size.set(size.to_string());
    }

    pub fn set_rotation(&mut self, rotation: &str) {
        self.rotation.set(rotation.to_string());
    }

    pub fn set_quality(&mut self, quality: &str) {
        self.quality.set(quality.to_string());
    }

    pub fn set_format(&mut self, format: &str) -> Result<(), Error> {
        self.config.check_media_type(format)?;
        self.format.set(format.to_string());
        Ok(())
    }
}

impl ToJson for ImageApiSelector {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        let mut w = ObjectWriter::new(mode);
        w.raw("type", Value::String("ImageApiSelector".to_string()));
        w.field("region", &self.region)?;
        w.field("size", &self.size)?;
        w.field("rotation", &self.rotation)?;
        w.field("quality", &self.quality)?;
        w.field("format", &self.format)?;
        Ok(w.finish())
    }
}

/// A resource narrowed by a selector, used as a Range item or an Annotation
/// target pointing at part of a Canvas.
#[derive(Clone, Debug)]
pub struct SpecificResource {
    core: Core,
    common: Common,
    source: Field<String>,
    selector: Field<Selector>,
}

impl SpecificResource {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("SpecificResource"),
                Field::Recommended("an ID is recommended"),
                Field::Absent,
            ),
            common: Common::default(),
            source: Field::Absent,
            selector: Field::Absent,
        }
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

impl Resource for SpecificResource {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        self.common.write(w)?;
        w.field("source", &self.source)?;
        w.field("selector", &self.selector)?;
        Ok(())
    }
}

impl HasCommon for SpecificResource {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}

resource_to_json!(SpecificResource);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_selector_xywh() {
        let mut selector = FragmentSelector::new();
        selector.set_xywh(10, 20, 300, 400);
        let json = selector.to_json(Mode::Strict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "FragmentSelector", "value": "xywh=10,20,300,400" })
        );
    }

    #[test]
    fn fragment_selector_requires_a_value() {
        let selector = FragmentSelector::new();
        assert!(selector.to_json(Mode::Strict).is_err());
    }

    #[test]
    fn point_selector_serializes_set_fields_only() {
        let mut selector = PointSelector::new();
        selector.set_x(100);
        selector.set_y(200);
        let json = selector.to_json(Mode::Strict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "PointSelector", "x": 100, "y": 200 })
        );
    }

    #[test]
    fn specific_resource_with_point_selector() {
        let config = BuilderConfig::shared("https://example.org/");
        let mut sr = SpecificResource::new(config);
        sr.set_source("https://example.org/canvas/1");
        let point = sr.set_point_selector();
        point.set_x(500);
        point.set_y(500);
        let json = sr.to_value(Mode::Strict).unwrap();
        assert_eq!(json["type"], "SpecificResource");
        assert_eq!(json["selector"]["type"], "PointSelector");
        assert_eq!(json["selector"]["x"], 500);
    }

    #[test]
    fn image_api_selector_checks_format() {
        let config = BuilderConfig::shared("https://example.org/");
        let mut selector = ImageApiSelector::new(config);
        assert!(selector.set_format("image/jpg").is_err());
        assert!(selector.set_format("image/jpeg").is_ok());
    }
}
