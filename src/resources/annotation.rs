//! Annotations and their containers.
//!
//! An Annotation links a body (the content) to a target (the Canvas or
//! Canvas region), with a motivation saying how the two relate. Annotation
//! Pages group Annotations; Annotation Collections group Pages that belong
//! together regardless of target.

use std::sync::Arc;

use serde_json::Value;

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::field::Field;
use crate::json::{Mode, ObjectWriter, ToJson};
use crate::resources::body::{AnnotationBody, PaintingBody, TextualBody};
use crate::resources::common::{push_and_get, Common, HasCommon};
use crate::resources::core::{Core, Kind, Resource};
use crate::resources::resource_to_json;
use crate::resources::selector::SpecificResource;

/// Motivations with a defined body shape; anything else is allowed but
/// logged, since clients must ignore motivations they do not understand.
const KNOWN_MOTIVATIONS: &[&str] = &["painting", "supplementing", "commenting", "tagging"];

/// What an Annotation points at: the URI of a Canvas (possibly with a
/// fragment), or a SpecificResource narrowing the target with a selector.
#[derive(Clone, Debug)]
pub enum Target {
    Uri(String),
    Specific(Box<SpecificResource>),
}

impl ToJson for Target {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        match self {
            Target::Uri(uri) => Ok(Value::String(uri.clone())),
            Target::Specific(resource) => resource.to_value(mode),
        }
    }
}

/// A single Annotation.
#[derive(Clone, Debug)]
pub struct Annotation {
    core: Core,
    common: Common,
    motivation: Field<String>,
    body: Field<AnnotationBody>,
    target: Field<Target>,
}

impl Annotation {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("Annotation"),
                Field::Required("an Annotation must have the ID property"),
                Field::Absent,
            ),
            common: Common::default(),
            motivation: Field::Absent,
            body: Field::Absent,
            target: Field::Required(
                "the URI of the targeted Canvas must be repeated in the target property",
            ),
        }
    }

    /// Sets the motivation and attaches the matching body shape: `painting`
    /// gets a content-resource body, `commenting`/`tagging` a TextualBody.
    /// Other motivations leave the body untouched.
    pub fn set_motivation(&mut self, motivation: &str) {
        if !KNOWN_MOTIVATIONS.contains(&motivation) {
            log::warn!("motivation `{motivation}` has no IIIF-defined body shape");
        }
        match motivation {
            "painting" => {
                let config = self.core.config.clone();
                self.body
                    .set(AnnotationBody::Painting(PaintingBody::new(config)));
            }
            "commenting" | "tagging" => {
                let config = self.core.config.clone();
                self.body
                    .set(AnnotationBody::Textual(TextualBody::new(config)));
            }
            _ => {}
        }
        self.motivation.set(motivation.to_string());
    }

    pub fn motivation(&self) -> Option<&str> {
        self.motivation.get().map(String::as_str)
    }

    pub fn set_target(&mut self, target: &str) {
        self.target.set(Target::Uri(target.to_string()));
    }

    /// Targets part of a resource through a SpecificResource, returned for
    /// source/selector filling.
    pub fn set_target_specific(&mut self) -> &mut SpecificResource {
        let config = self.core.config.clone();
        match self
            .target
            .insert(Target::Specific(Box::new(SpecificResource::new(config))))
        {
            Target::Specific(resource) => resource,
            _ => unreachable!(),
        }
    }

    /// Attaches a content-resource body directly, for motivations (such as
    /// `supplementing`) that do not attach one themselves.
    pub fn set_body_painting(&mut self) -> &mut PaintingBody {
        let config = self.core.config.clone();
        match self
            .body
            .insert(AnnotationBody::Painting(PaintingBody::new(config)))
        {
            AnnotationBody::Painting(body) => body,
            _ => unreachable!(),
        }
    }

    /// Attaches a textual body directly.
    pub fn set_body_textual(&mut self) -> &mut TextualBody {
        let config = self.core.config.clone();
        match self
            .body
            .insert(AnnotationBody::Textual(TextualBody::new(config)))
        {
            AnnotationBody::Textual(body) => body,
            _ => unreachable!(),
        }
    }

    pub fn body(&self) -> Option<&AnnotationBody> {
        self.body.get()
    }

    pub fn body_mut(&mut self) -> Option<&mut AnnotationBody> {
        self.body.get_mut()
    }

    /// The painting body, when the motivation attached one.
    pub fn body_painting_mut(&mut self) -> Option<&mut PaintingBody> {
        self.body.get_mut().and_then(AnnotationBody::as_painting_mut)
    }

    /// The textual body, when the motivation attached one.
    pub fn body_textual_mut(&mut self) -> Option<&mut TextualBody> {
        self.body.get_mut().and_then(AnnotationBody::as_textual_mut)
    }
}

impl Resource for Annotation {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        self.common.write(w)?;
        w.field("motivation", &self.motivation)?;
        w.field("body", &self.body)?;
        w.field("target", &self.target)?;
        Ok(())
    }
}

impl HasCommon for Annotation {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}

/// An ordered page of Annotations.
#[derive(Clone, Debug)]
pub struct AnnotationPage {
    core: Core,
    common: Common,
    items: Field<Vec<Annotation>>,
}

impl AnnotationPage {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("AnnotationPage"),
                Field::Required("an AnnotationPage must have the ID property"),
                Field::Absent,
            ),
            common: Common::default(),
            items: Field::Recommended("an AnnotationPage should include at least one item"),
        }
    }

    /// Appends a fresh Annotation, targeting `target` when given, and
    /// returns it for filling.
    pub fn add_annotation(&mut self, target: Option<&str>) -> &mut Annotation {
        let config = self.core.config.clone();
        let mut annotation = Annotation::new(config);
        if let Some(target) = target {
            annotation.set_target(target);
        }
        push_and_get(&mut self.items, annotation)
    }

    pub fn add_annotation_entry(&mut self, annotation: Annotation) {
        self.items.get_or_insert_with(Vec::new).push(annotation);
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.items.get().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Resource for AnnotationPage {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        self.common.write(w)?;
        w.field("items", &self.items)?;
        Ok(())
    }
}

impl HasCommon for AnnotationPage {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}

/// A grouping of Annotation Pages managed as a whole, e.g. all the pages of
/// one translation.
#[derive(Clone, Debug)]
pub struct AnnotationCollection {
    core: Core,
    common: Common,
}

impl AnnotationCollection {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            core: Core::new(
                config,
                Kind::Fixed("AnnotationCollection"),
                Field::Required("an AnnotationCollection must have the ID property"),
                Field::Recommended(
                    "an Annotation Collection should have the label property",
                ),
            ),
            common: Common::default(),
        }
    }
}

impl Resource for AnnotationCollection {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// Annotation Collections may be identified outside the http space, so
    /// the usual URI checks do not apply.
    fn set_id(&mut self, objid: Option<&str>, extend_base_url: Option<&str>) -> Result<(), Error> {
        match (objid, extend_base_url) {
            (Some(_), Some(_)) => Err(Error::InvalidArgument(
                "set the id using objid or extend_base_url, not both".to_string(),
            )),
            (None, None) => Err(Error::InvalidArgument(
                "set_id needs either objid or extend_base_url".to_string(),
            )),
            (Some(uri), None) => {
                self.core.id.set(uri.to_string());
                Ok(())
            }
            (None, Some(suffix)) => {
                let joined = self.config().resolve(suffix)?;
                self.core.id.set(joined);
                Ok(())
            }
        }
    }

    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        self.core.write(w)?;
        self.common.write(w)
    }
}

impl HasCommon for AnnotationCollection {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}

resource_to_json!(Annotation, AnnotationPage, AnnotationCollection);

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Arc<BuilderConfig> {
        BuilderConfig::shared("https://example.org/")
    }

    #[test]
    fn painting_motivation_attaches_a_content_body() {
        let mut annotation = Annotation::new(config());
        annotation.set_motivation("painting");
        assert!(annotation.body_painting_mut().is_some());
        assert!(annotation.body_textual_mut().is_none());
    }

    #[test]
    fn commenting_and_tagging_attach_a_textual_body() {
        for motivation in ["commenting", "tagging"] {
            let mut annotation = Annotation::new(config());
            annotation.set_motivation(motivation);
            assert!(annotation.body_textual_mut().is_some(), "{motivation}");
        }
    }

    #[test]
    fn supplementing_attaches_no_body() {
        let mut annotation = Annotation::new(config());
        annotation.set_motivation("supplementing");
        assert!(annotation.body().is_none());
        assert_eq!(annotation.motivation(), Some("supplementing"));
    }

    #[test]
    fn annotation_without_target_fails_strict() {
        let mut annotation = Annotation::new(config());
        annotation
            .set_id(Some("https://example.org/anno/1"), None)
            .unwrap();
        let err = annotation.to_value(Mode::Strict).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { field, .. } if field == "target"));
    }

    #[test]
    fn annotation_collection_accepts_non_http_ids() {
        let mut collection = AnnotationCollection::new(config());
        collection.set_id(Some("urn:example:translation"), None).unwrap();
        assert_eq!(collection.id(), Some("urn:example:translation"));
    }

    #[test]
    fn page_items_accumulate() {
        let mut page = AnnotationPage::new(config());
        page.add_annotation(Some("https://example.org/canvas/1"));
        page.add_annotation(Some("https://example.org/canvas/1"));
        assert_eq!(page.annotations().len(), 2);
    }
}
