//! The IIIF Presentation 3.0 resource types.
//!
//! Each resource is a struct embedding a [`core::Core`] (identity) and, for
//! the major containers, a [`common::Common`] field group, with builder
//! methods that validate on mutation. The module layout follows the schema:
//! one file per major container, the small linking resources together in
//! [`linking`], annotation bodies in [`body`] and the selector family in
//! [`selector`].

pub mod annotation;
pub mod body;
pub mod canvas;
pub mod collection;
pub mod common;
pub mod core;
pub mod linking;
pub mod manifest;
pub mod range;
pub mod selector;

pub use annotation::{Annotation, AnnotationCollection, AnnotationPage, Target};
pub use body::{AnnotationBody, PaintingBody, TextualBody};
pub use canvas::Canvas;
pub use collection::{Collection, CollectionItem};
pub use common::{
    FormatField, HasCommon, Languages, Navigable, Spatial, Temporal, ViewingDirectional,
};
pub use self::core::Resource;
pub use linking::{
    Homepage, Logo, ManifestRef, PartOf, Provider, Rendering, SeeAlso, Service, Services, Size,
    Start, Supplementary, Thumbnail,
};
pub use manifest::Manifest;
pub use range::{Range, RangeItem};
pub use selector::{
    FragmentSelector, ImageApiSelector, PointSelector, Selector, SpecificResource, SvgSelector,
};

/// Wires a resource type into the serialization walk.
macro_rules! resource_to_json {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl crate::json::ToJson for $ty {
                fn to_json(
                    &self,
                    mode: crate::json::Mode,
                ) -> Result<serde_json::Value, crate::error::Error> {
                    crate::resources::Resource::to_value(self, mode)
                }
            }
        )+
    };
}
pub(crate) use resource_to_json;
