//! The identity shared by every resource and the `Resource` trait.
//!
//! `Core` carries the three properties present on every node (`id`, `type`,
//! `label`) plus the shared config handle. `Resource` supplies the contract
//! built on top of them: id assignment with URI validation, label
//! accumulation, and the serialization surface (strict and diagnostic
//! rendering, `@context` injection, saving, inspection).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::config::{check_uri, BuilderConfig};
use crate::error::Error;
use crate::field::Field;
use crate::json::{count_markers, into_document, Context, Inspection, Mode, ObjectWriter};
use crate::lang::LanguageMap;

/// The `type` tag of a resource.
///
/// Most kinds are fixed by the schema (a Manifest is always `"Manifest"`, a
/// logo always `"Image"`); a few carry an open slot that the caller must or
/// may fill (`seeAlso`, `homepage`, content-resource bodies, ...).
#[derive(Clone, Debug)]
pub enum Kind {
    Fixed(&'static str),
    Open(Field<String>),
}

impl Kind {
    pub(crate) fn open_required(message: &'static str) -> Self {
        Kind::Open(Field::Required(message))
    }

    pub(crate) fn open_value(kind: &str) -> Self {
        Kind::Open(Field::Value(kind.to_string()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Kind::Fixed(kind) => Some(*kind),
            Kind::Open(field) => field.get().map(String::as_str),
        }
    }
}

/// Identity fields and config handle embedded in every resource struct.
#[derive(Clone, Debug)]
pub struct Core {
    pub(crate) config: Arc<BuilderConfig>,
    pub(crate) kind: Kind,
    pub(crate) id: Field<String>,
    pub(crate) label: Field<LanguageMap>,
}

impl Core {
    pub(crate) fn new(
        config: Arc<BuilderConfig>,
        kind: Kind,
        id: Field<String>,
        label: Field<LanguageMap>,
    ) -> Self {
        Self {
            config,
            kind,
            id,
            label,
        }
    }

    /// Writes `id`, `type`, `label` — the head of every serialized node.
    pub(crate) fn write(&self, w: &mut ObjectWriter) -> Result<(), Error> {
        w.field("id", &self.id)?;
        match &self.kind {
            Kind::Fixed(kind) => w.raw("type", Value::String((*kind).to_string())),
            Kind::Open(field) => w.field("type", field)?,
        }
        w.field("label", &self.label)?;
        Ok(())
    }
}

/// The contract shared by every resource node.
///
/// Implementors provide access to their [`Core`] and a `write` method listing
/// their fields in declaration order; everything else is supplied here.
pub trait Resource {
    #[doc(hidden)]
    fn core(&self) -> &Core;
    #[doc(hidden)]
    fn core_mut(&mut self) -> &mut Core;

    /// Contributes this node's fields to the serialization walk.
    fn write(&self, w: &mut ObjectWriter) -> Result<(), Error>;

    fn config(&self) -> &Arc<BuilderConfig> {
        &self.core().config
    }

    /// The `type` tag, if fixed or already set.
    fn kind(&self) -> Option<&str> {
        self.core().kind.as_str()
    }

    fn id(&self) -> Option<&str> {
        self.core().id.get().map(String::as_str)
    }

    fn label(&self) -> Option<&LanguageMap> {
        self.core().label.get()
    }

    /// Sets the resource id, either as an explicit URI (`objid`) or by
    /// joining the configured base URL with `extend_base_url`. Exactly one of
    /// the two must be given.
    ///
    /// The explicit form must start with `http`; both forms reject characters
    /// that need percent-encoding, and a Canvas additionally rejects a URI
    /// fragment (a Canvas must be dereferenceable without one).
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
            (Some(uri), None) => {
                if !uri.starts_with("http") {
                    return Err(Error::MalformedUri {
                        uri: uri.to_string(),
                        reason: "must start with http or https".to_string(),
                    });
                }
                check_uri(uri)?;
                uri.to_string()
            }
            (None, Some(suffix)) => self.config().resolve(suffix)?,
        };
        if self.kind() == Some("Canvas") && resolved.contains('#') {
            return Err(Error::MalformedUri {
                uri: resolved,
                reason: "the URI of a Canvas must not contain a fragment".to_string(),
            });
        }
        self.core_mut().id.set(resolved);
        Ok(())
    }

    /// Sets the `type` tag on resources with an open kind; fails with
    /// [`Error::ImmutableField`] where the schema fixes it.
    fn set_type(&mut self, kind: &str) -> Result<(), Error> {
        match &mut self.core_mut().kind {
            Kind::Fixed(fixed) => Err(Error::ImmutableField {
                kind: (*fixed).to_string(),
                field: "type",
                reason: format!("the type property must be kept {fixed}"),
            }),
            Kind::Open(slot) => {
                slot.set(kind.to_string());
                Ok(())
            }
        }
    }

    /// Appends a label under `language` (`None` maps to the tag `"none"`).
    /// Repeated calls with the same tag accumulate in call order.
    fn add_label(&mut self, language: Option<&str>, text: &str) -> Result<(), Error> {
        let tag = language.unwrap_or("none").to_string();
        self.config().check_language(&tag)?;
        self.core_mut()
            .label
            .get_or_insert_with(LanguageMap::new)
            .append(&tag, text);
        Ok(())
    }

    /// Renders this node (and everything below it) to a JSON value.
    fn to_value(&self, mode: Mode) -> Result<Value, Error> {
        let mut w = ObjectWriter::new(mode);
        self.write(&mut w)?;
        Ok(w.finish())
    }

    /// Renders a complete document with the default Presentation context.
    fn json_ld(&self, mode: Mode) -> Result<String, Error> {
        self.json_ld_with_context(mode, &Context::default())
    }

    /// Renders a complete document with `@context` injected as the first key.
    fn json_ld_with_context(&self, mode: Mode, context: &Context) -> Result<String, Error> {
        let doc = into_document(self.to_value(mode)?, context)?;
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Writes the document to a file.
    fn save(&self, path: &Path, mode: Mode) -> Result<(), Error> {
        let rendered = self.json_ld(mode)?;
        let file = File::create(path).map_err(Error::Io)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Serializes in diagnostic mode and reports the unresolved markers.
    fn inspect(&self) -> Result<Inspection, Error> {
        let doc = into_document(self.to_value(Mode::Diagnostic)?, &Context::default())?;
        let (missing_required, missing_recommended) = count_markers(&doc);
        Ok(Inspection {
            missing_required,
            missing_recommended,
            json: serde_json::to_string_pretty(&doc)?,
        })
    }
}
