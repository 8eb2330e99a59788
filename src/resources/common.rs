//! Field groups and capability traits shared by the major containers.
//!
//! `Common` holds the descriptive and linking properties that Collection,
//! Manifest, Canvas, Range, the annotation resources and SpecificResource all
//! carry. `Nav` holds the navigation group shared by the four big containers
//! (navDate, placeholder and accompanying Canvas). The capability traits at
//! the bottom each own one property and its validating setter; a resource
//! opts in by wiring the slot accessor.

use crate::error::Error;
use crate::field::Field;
use crate::json::ObjectWriter;
use crate::lang::{LanguageMap, MetadataEntry};
use crate::resources::canvas::Canvas;
use crate::resources::linking::{
    Homepage, PartOf, Provider, Rendering, SeeAlso, Service, Thumbnail,
};
use crate::resources::Resource;
use crate::vocab::behavior;

/// Rights values must come from Creative Commons, RightsStatements.org, or an
/// extension registered by the publisher.
const RIGHTS_PREFIXES: &[&str] = &[
    "http://creativecommons.org/licenses/",
    "http://creativecommons.org/publicdomain/mark/",
    "http://rightsstatements.org/vocab/",
];

/// Appends to a list slot and hands back the new element.
pub(crate) fn push_and_get<T>(field: &mut Field<Vec<T>>, item: T) -> &mut T {
    let list = field.get_or_insert_with(Vec::new);
    list.push(item);
    let index = list.len() - 1;
    &mut list[index]
}

/// Properties common to all major containers.
#[derive(Clone, Debug, Default)]
pub struct Common {
    pub(crate) metadata: Field<Vec<MetadataEntry>>,
    pub(crate) summary: Field<LanguageMap>,
    pub(crate) required_statement: Field<MetadataEntry>,
    pub(crate) rights: Field<String>,
    pub(crate) thumbnail: Field<Vec<Thumbnail>>,
    pub(crate) behavior: Field<Vec<String>>,
    pub(crate) see_also: Field<Vec<SeeAlso>>,
    pub(crate) service: Field<Vec<Service>>,
    pub(crate) homepage: Field<Vec<Homepage>>,
    pub(crate) rendering: Field<Vec<Rendering>>,
    pub(crate) part_of: Field<Vec<PartOf>>,
    pub(crate) provider: Field<Vec<Provider>>,
}

impl Common {
    pub(crate) fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        w.field("metadata", &self.metadata)?;
        w.field("summary", &self.summary)?;
        w.field("requiredStatement", &self.required_statement)?;
        w.field("rights", &self.rights)?;
        w.field("thumbnail", &self.thumbnail)?;
        w.field("behavior", &self.behavior)?;
        w.field("seeAlso", &self.see_also)?;
        w.field("service", &self.service)?;
        w.field("homepage", &self.homepage)?;
        w.field("rendering", &self.rendering)?;
        w.field("partOf", &self.part_of)?;
        w.field("provider", &self.provider)?;
        Ok(())
    }
}

/// Builder surface over the [`Common`] field group.
pub trait HasCommon: Resource {
    #[doc(hidden)]
    fn common(&self) -> &Common;
    #[doc(hidden)]
    fn common_mut(&mut self) -> &mut Common;

    /// Whether height and width are set; consulted by the Canvas-only
    /// behavior preconditions.
    #[doc(hidden)]
    fn spatial_dims_set(&self) -> bool {
        false
    }

    /// Starts a new metadata entry and returns it for label/value filling.
    fn add_metadata(&mut self) -> &mut MetadataEntry {
        let config = self.config().clone();
        push_and_get(&mut self.common_mut().metadata, MetadataEntry::new(config))
    }

    /// Appends a one-label/one-value metadata entry in a single call.
    fn add_metadata_pair(
        &mut self,
        label: &str,
        value: &str,
        language_label: Option<&str>,
        language_value: Option<&str>,
    ) -> Result<(), Error> {
        let mut entry = MetadataEntry::new(self.config().clone());
        entry.add_label(language_label, label)?;
        entry.add_value(language_value, value)?;
        self.common_mut()
            .metadata
            .get_or_insert_with(Vec::new)
            .push(entry);
        Ok(())
    }

    /// Appends summary text under `language` (`None` maps to `"none"`).
    fn add_summary(&mut self, language: Option<&str>, text: &str) -> Result<(), Error> {
        let tag = language.unwrap_or("none").to_string();
        self.config().check_language(&tag)?;
        self.common_mut()
            .summary
            .get_or_insert_with(LanguageMap::new)
            .append(&tag, text);
        Ok(())
    }

    /// Starts the required statement and returns it for label/value filling.
    fn set_required_statement(&mut self) -> &mut MetadataEntry {
        let config = self.config().clone();
        self.common_mut()
            .required_statement
            .insert(MetadataEntry::new(config))
    }

    /// Sets the rights URI; must come from one of the known vocabularies.
    fn set_rights(&mut self, rights: &str) -> Result<(), Error> {
        if !RIGHTS_PREFIXES.iter().any(|p| rights.starts_with(p)) {
            return Err(Error::InvalidArgument(format!(
                "rights must start with one of: {}",
                RIGHTS_PREFIXES.join(", ")
            )));
        }
        self.common_mut().rights.set(rights.to_string());
        Ok(())
    }

    /// Adds a behavior value, checked against the compatibility rules for
    /// this resource type and the behaviors already applied.
    fn add_behavior(&mut self, value: &str) -> Result<(), Error> {
        let kind = self.kind().unwrap_or_default().to_string();
        let existing = self.common().behavior.get().cloned().unwrap_or_default();
        behavior::check(value, &kind, &existing, self.spatial_dims_set())?;
        self.common_mut()
            .behavior
            .get_or_insert_with(Vec::new)
            .push(value.to_string());
        Ok(())
    }

    fn add_thumbnail(&mut self) -> &mut Thumbnail {
        let config = self.config().clone();
        push_and_get(&mut self.common_mut().thumbnail, Thumbnail::new(config))
    }

    fn add_thumbnail_entry(&mut self, thumbnail: Thumbnail) {
        self.common_mut()
            .thumbnail
            .get_or_insert_with(Vec::new)
            .push(thumbnail);
    }

    fn add_see_also(&mut self) -> &mut SeeAlso {
        let config = self.config().clone();
        push_and_get(&mut self.common_mut().see_also, SeeAlso::new(config))
    }

    fn add_see_also_entry(&mut self, see_also: SeeAlso) {
        self.common_mut()
            .see_also
            .get_or_insert_with(Vec::new)
            .push(see_also);
    }

    fn add_service(&mut self) -> &mut Service {
        let config = self.config().clone();
        push_and_get(&mut self.common_mut().service, Service::new(config))
    }

    fn add_service_entry(&mut self, service: Service) {
        self.common_mut()
            .service
            .get_or_insert_with(Vec::new)
            .push(service);
    }

    fn add_homepage(&mut self) -> &mut Homepage {
        let config = self.config().clone();
        push_and_get(&mut self.common_mut().homepage, Homepage::new(config))
    }

    fn add_homepage_entry(&mut self, homepage: Homepage) {
        self.common_mut()
            .homepage
            .get_or_insert_with(Vec::new)
            .push(homepage);
    }

    fn add_rendering(&mut self) -> &mut Rendering {
        let config = self.config().clone();
        push_and_get(&mut self.common_mut().rendering, Rendering::new(config))
    }

    fn add_rendering_entry(&mut self, rendering: Rendering) {
        self.common_mut()
            .rendering
            .get_or_insert_with(Vec::new)
            .push(rendering);
    }

    fn add_part_of(&mut self) -> &mut PartOf {
        let config = self.config().clone();
        push_and_get(&mut self.common_mut().part_of, PartOf::new(config))
    }

    fn add_part_of_entry(&mut self, part_of: PartOf) {
        self.common_mut()
            .part_of
            .get_or_insert_with(Vec::new)
            .push(part_of);
    }

    fn add_provider(&mut self) -> &mut Provider {
        let config = self.config().clone();
        push_and_get(&mut self.common_mut().provider, Provider::new(config))
    }

    fn add_provider_entry(&mut self, provider: Provider) {
        self.common_mut()
            .provider
            .get_or_insert_with(Vec::new)
            .push(provider);
    }
}

/// The navigation group shared by Collection, Manifest, Canvas and Range.
#[derive(Clone, Debug, Default)]
pub struct Nav {
    pub(crate) placeholder_canvas: Field<Box<Canvas>>,
    pub(crate) accompanying_canvas: Field<Box<Canvas>>,
    pub(crate) nav_date: Field<String>,
}

impl Nav {
    pub(crate) fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        w.field("placeholderCanvas", &self.placeholder_canvas)?;
        w.field("accompanyingCanvas", &self.accompanying_canvas)?;
        w.field("navDate", &self.nav_date)?;
        Ok(())
    }
}

/// Validates an XSD dateTime with timezone; warns when the zone is not `Z`.
pub(crate) fn check_nav_date(value: &str) -> Result<(), Error> {
    match chrono::DateTime::parse_from_rfc3339(value) {
        Ok(_) => {
            if !value.ends_with('Z') {
                log::warn!(
                    "navDate `{value}` does not use the UTC designator Z; \
                     clients compare navDates as UTC"
                );
            }
            Ok(())
        }
        Err(err) => Err(Error::InvalidArgument(format!(
            "navDate `{value}` is not an XSD dateTime with timezone: {err}"
        ))),
    }
}

/// navDate and the placeholder/accompanying Canvas slots.
pub trait Navigable: Resource {
    #[doc(hidden)]
    fn nav(&self) -> &Nav;
    #[doc(hidden)]
    fn nav_mut(&mut self) -> &mut Nav;

    /// A placeholder/accompanying Canvas may not carry one of its own.
    #[doc(hidden)]
    fn nested_canvas_allowed(&self) -> bool {
        true
    }

    fn set_nav_date(&mut self, nav_date: &str) -> Result<(), Error> {
        check_nav_date(nav_date)?;
        self.nav_mut().nav_date.set(nav_date.to_string());
        Ok(())
    }

    fn set_placeholder_canvas(&mut self) -> Result<&mut Canvas, Error> {
        if !self.nested_canvas_allowed() {
            return Err(Error::ImmutableField {
                kind: "Canvas".to_string(),
                field: "placeholderCanvas",
                reason: "a placeholder or accompanying Canvas cannot have one of its own"
                    .to_string(),
            });
        }
        let config = self.config().clone();
        Ok(self
            .nav_mut()
            .placeholder_canvas
            .insert(Box::new(Canvas::aux(config))))
    }

    fn set_accompanying_canvas(&mut self) -> Result<&mut Canvas, Error> {
        if !self.nested_canvas_allowed() {
            return Err(Error::ImmutableField {
                kind: "Canvas".to_string(),
                field: "accompanyingCanvas",
                reason: "a placeholder or accompanying Canvas cannot have one of its own"
                    .to_string(),
            });
        }
        let config = self.config().clone();
        Ok(self
            .nav_mut()
            .accompanying_canvas
            .insert(Box::new(Canvas::aux(config))))
    }
}

/// The `format` property with its media-type check.
pub trait FormatField: Resource {
    #[doc(hidden)]
    fn format_slot(&mut self) -> &mut Field<String>;

    fn set_format(&mut self, format: &str) -> Result<(), Error> {
        self.config().check_media_type(format)?;
        self.format_slot().set(format.to_string());
        Ok(())
    }
}

/// Height and width in pixels; zero is rejected.
pub trait Spatial: Resource {
    #[doc(hidden)]
    fn height_slot(&mut self) -> &mut Field<u32>;
    #[doc(hidden)]
    fn width_slot(&mut self) -> &mut Field<u32>;

    fn set_height(&mut self, height: u32) -> Result<(), Error> {
        if height == 0 {
            return Err(Error::InvalidArgument(
                "height must be a positive integer".to_string(),
            ));
        }
        self.height_slot().set(height);
        Ok(())
    }

    fn set_width(&mut self, width: u32) -> Result<(), Error> {
        if width == 0 {
            return Err(Error::InvalidArgument(
                "width must be a positive integer".to_string(),
            ));
        }
        self.width_slot().set(width);
        Ok(())
    }

    fn set_height_width(&mut self, height: u32, width: u32) -> Result<(), Error> {
        self.set_height(height)?;
        self.set_width(width)
    }
}

/// Duration in seconds. Setting it releases an unresolved height/width
/// obligation (a time-based Canvas needs no spatial dimensions); values that
/// were explicitly set survive.
pub trait Temporal: Spatial {
    #[doc(hidden)]
    fn duration_slot(&mut self) -> &mut Field<f64>;

    fn set_duration(&mut self, duration: f64) -> Result<(), Error> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(Error::InvalidArgument(
                "duration must be a positive number of seconds".to_string(),
            ));
        }
        self.height_slot().demote_marker();
        self.width_slot().demote_marker();
        self.duration_slot().set(duration);
        Ok(())
    }
}

/// The `viewingDirection` property.
pub trait ViewingDirectional: Resource {
    #[doc(hidden)]
    fn viewing_direction_slot(&mut self) -> &mut Field<String>;

    fn set_viewing_direction(&mut self, direction: &str) -> Result<(), Error> {
        behavior::check_viewing_direction(direction)?;
        self.viewing_direction_slot().set(direction.to_string());
        Ok(())
    }
}

/// A `language` list property (homepage, content resources).
pub trait Languages: Resource {
    #[doc(hidden)]
    fn language_slot(&mut self) -> &mut Field<Vec<String>>;

    fn add_language(&mut self, language: &str) -> Result<(), Error> {
        self.config().check_language(language)?;
        self.language_slot()
            .get_or_insert_with(Vec::new)
            .push(language.to_string());
        Ok(())
    }
}
