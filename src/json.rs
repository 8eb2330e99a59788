//! The serialization engine.
//!
//! A resource tree renders to JSON through a single recursive walk. Each node
//! contributes its fields to an [`ObjectWriter`], which owns the one place
//! where field markers are interpreted: strict mode drops unresolved
//! Recommended markers and aborts on unresolved Required markers, diagnostic
//! mode renders both as `{"Required": ...}` / `{"Recommended": ...}` objects
//! so a human can see what is missing. Key order is insertion order
//! throughout, and the top-level document gets `@context` injected as its
//! first key.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::error::Error;
use crate::field::Field;

/// The JSON-LD context of the Presentation API 3.0.
pub const PRESENTATION_CONTEXT: &str = "http://iiif.io/api/presentation/3/context.json";

/// Serialization mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Enforce Required markers; drop anything unset.
    Strict,
    /// Render markers as diagnostic placeholders; never fails.
    Diagnostic,
}

/// The `@context` value of a document: a single URI or an ordered list
/// (extension contexts first, the Presentation context last).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Context {
    Uri(String),
    List(Vec<String>),
}

impl Default for Context {
    fn default() -> Self {
        Context::Uri(PRESENTATION_CONTEXT.to_string())
    }
}

impl ToJson for Context {
    fn to_json(&self, _mode: Mode) -> Result<Value, Error> {
        Ok(match self {
            Context::Uri(uri) => Value::String(uri.clone()),
            Context::List(uris) => {
                Value::Array(uris.iter().cloned().map(Value::String).collect())
            }
        })
    }
}

/// Conversion of a field value to its JSON representation.
///
/// Implemented by scalars, the language structures and (via a blanket impl)
/// every resource type.
pub trait ToJson {
    fn to_json(&self, mode: Mode) -> Result<Value, Error>;
}

impl ToJson for String {
    fn to_json(&self, _mode: Mode) -> Result<Value, Error> {
        Ok(Value::String(self.clone()))
    }
}

impl ToJson for u32 {
    fn to_json(&self, _mode: Mode) -> Result<Value, Error> {
        Ok(Value::from(*self))
    }
}

impl ToJson for f64 {
    fn to_json(&self, _mode: Mode) -> Result<Value, Error> {
        Ok(Value::from(*self))
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        let mut items = Vec::with_capacity(self.len());
        for item in self {
            items.push(item.to_json(mode)?);
        }
        Ok(Value::Array(items))
    }
}

impl<T: ToJson> ToJson for Box<T> {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        (**self).to_json(mode)
    }
}

/// Collects one node's fields in declaration order, applying the mode rules.
pub struct ObjectWriter {
    mode: Mode,
    map: Map<String, Value>,
}

impl ObjectWriter {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            map: Map::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Writes a field slot under `key`, applying the marker rules.
    pub fn field<T: ToJson>(&mut self, key: &str, field: &Field<T>) -> Result<(), Error> {
        match field {
            Field::Absent => {}
            Field::Required(message) => match self.mode {
                Mode::Strict => {
                    return Err(Error::MissingRequiredField {
                        field: key.to_string(),
                        message: *message,
                    })
                }
                Mode::Diagnostic => {
                    self.map
                        .insert(key.to_string(), serde_json::json!({ "Required": message }));
                }
            },
            Field::Recommended(message) => {
                if self.mode == Mode::Diagnostic {
                    self.map
                        .insert(key.to_string(), serde_json::json!({ "Recommended": message }));
                }
            }
            Field::Value(value) => {
                self.map.insert(key.to_string(), value.to_json(self.mode)?);
            }
        }
        Ok(())
    }

    /// Writes an always-present value (e.g. a fixed `type` tag).
    pub fn value<T: ToJson>(&mut self, key: &str, value: &T) -> Result<(), Error> {
        self.map.insert(key.to_string(), value.to_json(self.mode)?);
        Ok(())
    }

    /// Writes a pre-built JSON value verbatim.
    pub fn raw(&mut self, key: &str, value: Value) {
        self.map.insert(key.to_string(), value);
    }

    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}

/// Wraps a serialized resource into a document with `@context` first.
pub(crate) fn into_document(body: Value, context: &Context) -> Result<Value, Error> {
    let mut doc = Map::new();
    doc.insert("@context".to_string(), context.to_json(Mode::Strict)?);
    if let Value::Object(fields) = body {
        for (key, value) in fields {
            doc.insert(key, value);
        }
    }
    Ok(Value::Object(doc))
}

/// The result of a diagnostic-mode inspection.
///
/// Carries the diagnostic JSON plus the number of unresolved markers found in
/// it, so callers (and the CLI) can gate on completeness.
#[derive(Clone, Debug, Serialize)]
pub struct Inspection {
    pub missing_required: usize,
    pub missing_recommended: usize,
    pub json: String,
}

impl Inspection {
    /// True when no Required marker is unresolved.
    pub fn is_complete(&self) -> bool {
        self.missing_required == 0
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.missing_required == 0 && self.missing_recommended == 0 {
            writeln!(f, "Inspection passed: no missing fields")
        } else {
            writeln!(
                f,
                "Inspection found {} missing required field(s) and {} missing recommended field(s)",
                self.missing_required, self.missing_recommended
            )
        }
    }
}

/// Counts the `{"Required": ...}` / `{"Recommended": ...}` placeholders in a
/// diagnostic-mode document.
pub(crate) fn count_markers(value: &Value) -> (usize, usize) {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(_)) = map.get("Required") {
                    return (1, 0);
                }
                if let Some(Value::String(_)) = map.get("Recommended") {
                    return (0, 1);
                }
            }
            map.values().fold((0, 0), |(req, rec), v| {
                let (r, c) = count_markers(v);
                (req + r, rec + c)
            })
        }
        Value::Array(items) => items.iter().fold((0, 0), |(req, rec), v| {
            let (r, c) = count_markers(v);
            (req + r, rec + c)
        }),
        _ => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_mode_raises_on_required() {
        let mut w = ObjectWriter::new(Mode::Strict);
        let field: Field<String> = Field::Required("an id is required");
        let err = w.field("id", &field).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { field, .. } if field == "id"));
    }

    #[test]
    fn strict_mode_drops_recommended_and_absent() {
        let mut w = ObjectWriter::new(Mode::Strict);
        w.field("label", &Field::<String>::Recommended("a label is recommended"))
            .unwrap();
        w.field("summary", &Field::<String>::Absent).unwrap();
        assert_eq!(w.finish(), serde_json::json!({}));
    }

    #[test]
    fn diagnostic_mode_renders_markers() {
        let mut w = ObjectWriter::new(Mode::Diagnostic);
        w.field("id", &Field::<String>::Required("an id is required"))
            .unwrap();
        w.field("label", &Field::<String>::Recommended("a label is recommended"))
            .unwrap();
        assert_eq!(
            w.finish(),
            serde_json::json!({
                "id": { "Required": "an id is required" },
                "label": { "Recommended": "a label is recommended" },
            })
        );
    }

    #[test]
    fn document_puts_context_first() {
        let body = serde_json::json!({ "id": "https://example.org/manifest.json" });
        let doc = into_document(body, &Context::default()).unwrap();
        let rendered = serde_json::to_string(&doc).unwrap();
        assert!(rendered.starts_with("{\"@context\":"), "got: {rendered}");
    }

    #[test]
    fn marker_counting_recurses() {
        let doc = serde_json::json!({
            "id": { "Required": "an id is required" },
            "items": [
                { "label": { "Recommended": "a label is recommended" } },
                { "height": { "Required": "height or duration" } },
            ],
        });
        assert_eq!(count_markers(&doc), (2, 1));
    }
}
