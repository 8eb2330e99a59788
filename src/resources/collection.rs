//! Collections: ordered lists of Manifests and further Collections.
//!
//! Collections reference Manifests, they do not embed them: adding a built
//! Manifest stores only its reference stub (id, type, label, thumbnail).
//! Sub-Collections may be embedded in full.

use std::sync::Arc;

use serde_json::Value;

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::field::Field;
use crate::json::{Mode, ObjectWriter, ToJson};
use crate::resources::annotation::AnnotationPage;
use crate::resources::common::{
    push_and_get, Common, HasCommon, Nav, Navigable, ViewingDirectional,
};
use crate::resources::core::{Core, Kind, Resource};
use crate::resources::linking::{ManifestRef, Services};
use crate::resources::manifest::Manifest;
use crate::resources::resource_to_json;

/// One entry of a Collection's `items` list.
#[derive(Clone, Debug)]
pub enum CollectionItem {
    Collection(Box<Collection>),
    Manifest(ManifestRef),
}

impl ToJson for CollectionItem {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        match self {
            CollectionItem::Collection(collection) => collection.to_value(mode),
            CollectionItem::Manifest(stub) => stub.to_value(mode),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Collection {
    core: Core,
    common: Common,
    nav: Nav,
    viewing_direction: Field<String>,
    services: Field<Vec<Services>>,
    items: Field<Vec<CollectionItem>>,
    annotations: Field<Vec<AnnotationPage>>,
}

impl Collection {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        let common = Common {
            metadata: Field::Recommended(
                "a Collection should have the metadata property with at least one item",
            ),
            summary: Field::Recommended(
                "a Collection should have the summary property with at least one entry",
            ),
            thumbnail: Field::Recommended(
                "a Collection should have the thumbnail property with at least one item",
            ),
            provider: Field::Recommended(
                "a Collection should have the provider property with at least one item",
            ),
            ..Common::default()
        };
        Self {
            core: Core::new(
                config,
                Kind::Fixed("Collection"),
                Field::Required("a Collection must have the ID property"),
                Field::Required(
                    "a Collection must have the label property with at least one entry",
                ),
            ),
            common,
            nav: Nav::default(),
            viewing_direction: Field::Absent,
            services: Field::Absent,
            items: Field::Required("a Collection must have at least one item"),
            annotations: Field::Absent,
        }
    }

    /// Appends an embedded sub-Collection and returns it.
    pub fn add_collection(&mut self) -> &mut Collection {
        let config = self.config().clone();
        match push_and_get(
            &mut self.items,
            CollectionItem::Collection(Box::new(Collection::new(config))),
        ) {
            CollectionItem::Collection(collection) => collection,
            _ => unreachable!(),
        }
    }

    pub fn add_collection_entry(&mut self, collection: Collection) {
        self.items
            .get_or_insert_with(Vec::new)
            .push(CollectionItem::Collection(Box::new(collection)));
    }

    /// References a built Manifest: only id, type, label and thumbnail make
    /// it into the Collection.
    pub fn add_manifest(&mut self, manifest: &Manifest) {
        self.items
            .get_or_insert_with(Vec::new)
            .push(CollectionItem::Manifest(ManifestRef::from_manifest(manifest)));
    }

    /// Appends an empty Manifest reference and returns it for filling.
    pub fn add_manifest_ref(&mut self) -> &mut ManifestRef {
        let config = self.config().clone();
        match push_and_get(
            &mut self.items,
            CollectionItem::Manifest(ManifestRef::new(config)),
        ) {
            CollectionItem::Manifest(stub) => stub,
            _ => unreachable!(),
        }
    }

    pub fn add_manifest_ref_entry(&mut self, stub: ManifestRef) {
        self.items
            .get_or_insert_with(Vec::new)
            .push(CollectionItem::Manifest(stub));
    }

    /// Appends an entry to the top-level `services` list.
    pub fn add_services(&mut self) -> &mut Services {
        let config = self.config().clone();
        push_and_get(&mut self.services, Services::new(config))
    }

    pub fn add_services_entry(&mut self, services: Services) {
        self.services.get_or_insert_with(Vec::new).push(services);
    }

    pub fn add_annotation_page_to_annotations(&mut self) -> &mut AnnotationPage {
        let config = self.config().clone();
        push_and_get(&mut self.annotations, AnnotationPage::new(config))
    }

    pub fn items(&self) -> &[CollectionItem] {
        self.items.get().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Resource for Collection {
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
        w.field("viewingDirection", &self.viewing_direction)?;
        w.field("services", &self.services)?;
        w.field("items", &self.items)?;
        w.field("annotations", &self.annotations)?;
        Ok(())
    }
}

impl HasCommon for Collection {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}

impl Navigable for Collection {
    fn nav(&self) -> &Nav {
        &self.nav
    }

    fn nav_mut(&mut self) -> &mut Nav {
        &mut self.nav
    }
}

impl ViewingDirectional for Collection {
    fn viewing_direction_slot(&mut self) -> &mut Field<String> {
        &mut self.viewing_direction
    }
}

resource_to_json!(Collection);

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Arc<BuilderConfig> {
        BuilderConfig::shared("https://example.org/")
    }

    fn built_manifest() -> Manifest {
        let mut manifest = Manifest::new(config());
        manifest
            .set_id(Some("https://example.org/iiif/book1/manifest.json"), None)
            .unwrap();
        manifest.add_label(Some("en"), "Book 1").unwrap();
        let canvas = manifest.add_canvas();
        canvas.set_id(Some("https://example.org/canvas/p1"), None).unwrap();
        manifest
    }

    #[test]
    fn manifests_are_referenced_not_embedded() {
        let mut collection = Collection::new(config());
        collection
            .set_id(Some("https://example.org/collection/top"), None)
            .unwrap();
        collection.add_label(Some("en"), "Top collection").unwrap();
        collection.add_manifest(&built_manifest());

        let json = collection.to_value(Mode::Diagnostic).unwrap();
        let stub = &json["items"][0];
        assert_eq!(stub["type"], "Manifest");
        assert_eq!(stub["id"], "https://example.org/iiif/book1/manifest.json");
        assert_eq!(stub["label"]["en"][0], "Book 1");
        // The canvases of the full Manifest must not leak into the stub.
        assert!(stub.get("items").is_none());
    }

    #[test]
    fn sub_collections_embed_in_full() {
        let mut collection = Collection::new(config());
        collection
            .set_id(Some("https://example.org/collection/top"), None)
            .unwrap();
        let sub = collection.add_collection();
        sub.set_id(Some("https://example.org/collection/sub"), None).unwrap();
        sub.add_label(Some("en"), "Subcollection").unwrap();

        let json = collection.to_value(Mode::Diagnostic).unwrap();
        assert_eq!(json["items"][0]["type"], "Collection");
    }

    #[test]
    fn together_conflicts_with_multi_part() {
        let mut collection = Collection::new(config());
        collection.add_behavior("multi-part").unwrap();
        assert!(collection.add_behavior("together").is_err());
    }
}
