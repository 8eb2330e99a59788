//! Annotation bodies.
//!
//! A painting Annotation carries a content resource (image, audio, video —
//! or a `Choice` nesting several alternatives); commenting and tagging
//! Annotations carry a TextualBody.

use std::sync::Arc;

use serde_json::Value;

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::field::Field;
use crate::json::{Mode, ObjectWriter, ToJson};
use crate::resources::common::{push_and_get, FormatField, Spatial, Temporal};
use crate::resources::core::{Core, Kind, Resource};
use crate::resources::linking::Service;
use crate::resources::{resource_to_json, Languages};

/// A content resource painted onto a Canvas.
///
/// Dimensions start as Required markers — a content resource must have a
/// height and width or a duration; setting a duration releases the spatial
/// obligation.
#[derive(Clone, Debug)]
pub struct PaintingBody {
    core: Core,
    format: Field<String>,
    profile: Field<String>,
    height: Field<u32>,
    width: Field<u32>,
    duration: Field<f64>,
    service: Field<Vec<Service>>,
    language: Field<Vec<String>>,
    items: Field<Vec<PaintingBody>>,
}

impl PaintingBody {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::open_required(
                    "the type of the content resource must be included, e.g. Image",
                ),
                Field::Required("the content resource must have an id"),
                Field::Absent,
            ),
            format: Field::Recommended(
                "the format of the content resource should be included; it should be the \
                 media type returned when the resource is dereferenced",
            ),
            profile: Field::Recommended(
                "the profile of the content resource, if it has one, should be included",
            ),
            height: Field::Required("the content resource must have a height or a duration"),
            width: Field::Required("the content resource must have a width or a duration"),
            duration: Field::Absent,
            service: Field::Absent,
            language: Field::Absent,
            items: Field::Absent,
        }
    }

    pub fn set_profile(&mut self, profile: &str) {
        self.profile.set(profile.to_string());
    }

    /// Clears the profile obligation without providing one.
    pub fn clear_profile(&mut self) {
        self.profile.clear();
    }

    pub fn add_service(&mut self) -> &mut Service {
        let config = self.config().clone();
        push_and_get(&mut self.service, Service::new(config))
    }

    pub fn add_service_entry(&mut self, service: Service) {
        self.service.get_or_insert_with(Vec::new).push(service);
    }

    /// Turns this body into a `Choice` and appends one alternative, returned
    /// for filling. The Choice wrapper itself loses id, format and
    /// dimensions — those belong on the alternatives.
    pub fn add_choice(&mut self) -> Result<&mut PaintingBody, Error> {
        self.force_choice()?;
        self.core.id.clear();
        self.format.clear();
        self.height.clear();
        self.width.clear();
        let config = self.config().clone();
        Ok(push_and_get(&mut self.items, PaintingBody::new(config)))
    }

    /// Appends a caller-built alternative under a `Choice` body.
    pub fn add_choice_entry(&mut self, body: PaintingBody) -> Result<(), Error> {
        self.force_choice()?;
        self.items.get_or_insert_with(Vec::new).push(body);
        Ok(())
    }

    fn force_choice(&mut self) -> Result<(), Error> {
        if let Some(kind) = self.kind() {
            if kind != "Choice" {
                return Err(Error::InvalidArgument(format!(
                    "the body type must be Choice to nest alternatives, not {kind}"
                )));
            }
        }
        self.set_type("Choice")
    }
}

impl Resource for PaintingBody {
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
        w.field("height", &self.height)?;
        w.field("width", &self.width)?;
        w.field("duration", &self.duration)?;
        w.field("service", &self.service)?;
        w.field("language", &self.language)?;
        w.field("items", &self.items)?;
        Ok(())
    }
}

impl FormatField for PaintingBody {
    fn format_slot(&mut self) -> &mut Field<String> {
        &mut self.format
    }
}

impl Spatial for PaintingBody {
    fn height_slot(&mut self) -> &mut Field<u32> {
        &mut self.height
    }

    fn width_slot(&mut self) -> &mut Field<u32> {
        &mut self.width
    }
}

impl Temporal for PaintingBody {
    fn duration_slot(&mut self) -> &mut Field<f64> {
        &mut self.duration
    }
}

impl Languages for PaintingBody {
    fn language_slot(&mut self) -> &mut Field<Vec<String>> {
        &mut self.language
    }
}

resource_to_json!(PaintingBody);

/// The embedded-text body of a commenting or tagging Annotation.
#[derive(Clone, Debug)]
pub struct TextualBody {
    config: Arc<BuilderConfig>,
    value: Field<String>,
    language: Field<String>,
    format: Field<String>,
}

impl TextualBody {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            config,
            value: Field::Required("a TextualBody must have a value"),
            language: Field::Absent,
            format: Field::Absent,
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value.set(value.to_string());
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), Error> {
        self.config.check_language(language)?;
        self.language.set(language.to_string());
        Ok(())
    }

    pub fn set_format(&mut self, format: &str) -> Result<(), Error> {
        self.config.check_media_type(format)?;
        self.format.set(format.to_string());
        Ok(())
    }
}

impl ToJson for TextualBody {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        let mut w = ObjectWriter::new(mode);
        w.raw("type", Value::String("TextualBody".to_string()));
        w.field("value", &self.value)?;
        w.field("language", &self.language)?;
        w.field("format", &self.format)?;
        Ok(w.finish())
    }
}

/// The body attached to an Annotation, shaped by its motivation.
#[derive(Clone, Debug)]
pub enum AnnotationBody {
    Painting(PaintingBody),
    Textual(TextualBody),
}

impl AnnotationBody {
    pub fn as_painting(&self) -> Option<&PaintingBody> {
        match self {
            AnnotationBody::Painting(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_painting_mut(&mut self) -> Option<&mut PaintingBody> {
        match self {
            AnnotationBody::Painting(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_textual(&self) -> Option<&TextualBody> {
        match self {
            AnnotationBody::Textual(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_textual_mut(&mut self) -> Option<&mut TextualBody> {
        match self {
            AnnotationBody::Textual(body) => Some(body),
            _ => None,
        }
    }
}

impl ToJson for AnnotationBody {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        match self {
            AnnotationBody::Painting(body) => body.to_json(mode),
            AnnotationBody::Textual(body) => body.to_json(mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Arc<BuilderConfig> {
        BuilderConfig::shared("https://example.org/")
    }

    #[test]
    fn duration_releases_the_dimension_obligation() {
        let mut body = PaintingBody::new(config());
        body.set_id(Some("https://example.org/audio.mp4"), None).unwrap();
        body.set_type("Sound").unwrap();
        body.set_format("audio/mp4").unwrap();
        body.clear_profile();
        assert!(body.to_value(Mode::Strict).is_err());

        body.set_duration(1985.024).unwrap();
        let json = body.to_value(Mode::Strict).unwrap();
        assert_eq!(json["duration"], 1985.024);
        assert!(json.get("height").is_none());
    }

    #[test]
    fn explicit_dimensions_survive_a_duration() {
        let mut body = PaintingBody::new(config());
        body.set_height_width(1080, 1920).unwrap();
        body.set_duration(60.0).unwrap();
        assert_eq!(body.to_value(Mode::Diagnostic).unwrap()["height"], 1080);
    }

    #[test]
    fn choice_nests_alternatives_and_strips_the_wrapper() {
        let mut body = PaintingBody::new(config());
        {
            let first = body.add_choice().unwrap();
            first.set_id(Some("https://example.org/color.jpg"), None).unwrap();
            first.set_type("Image").unwrap();
        }
        {
            let second = body.add_choice().unwrap();
            second.set_id(Some("https://example.org/gray.jpg"), None).unwrap();
            second.set_type("Image").unwrap();
        }
        assert_eq!(body.kind(), Some("Choice"));
        let json = body.to_value(Mode::Diagnostic).unwrap();
        assert_eq!(json["type"], "Choice");
        assert!(json.get("id").is_none());
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn a_typed_body_cannot_become_a_choice() {
        let mut body = PaintingBody::new(config());
        body.set_type("Image").unwrap();
        assert!(body.add_choice().is_err());
    }

    #[test]
    fn textual_body_serializes_value_and_language() {
        let mut body = TextualBody::new(config());
        body.set_value("Gänseliesel-Brunnen");
        body.set_language("de").unwrap();
        let json = body.to_json(Mode::Strict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "TextualBody",
                "value": "Gänseliesel-Brunnen",
                "language": "de",
            })
        );
    }
}
