//! Language-tagged text values.
//!
//! The Presentation API represents human-readable text as a JSON object
//! mapping a BCP 47 tag (or the literal `"none"`) to an ordered list of
//! strings. Insertion order of both the tags and the strings is preserved;
//! repeated additions under the same tag accumulate in call order.

use std::sync::Arc;

use serde_json::Value;

use crate::config::BuilderConfig;
use crate::error::Error;
use crate::field::Field;
use crate::json::{Mode, ObjectWriter, ToJson};

/// An insertion-ordered map from language tag to text values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageMap {
    entries: Vec<(String, Vec<String>)>,
}

impl LanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` under `language`, creating the entry on first use.
    pub(crate) fn append(&mut self, language: &str, text: &str) {
        match self.entries.iter_mut().find(|(tag, _)| tag == language) {
            Some((_, values)) => values.push(text.to_string()),
            None => self
                .entries
                .push((language.to_string(), vec![text.to_string()])),
        }
    }

    pub fn get(&self, language: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(tag, _)| tag == language)
            .map(|(_, values)| values.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(tag, values)| (tag.as_str(), values.as_slice()))
    }
}

impl ToJson for LanguageMap {
    fn to_json(&self, _mode: Mode) -> Result<Value, Error> {
        let mut map = serde_json::Map::new();
        for (tag, values) in &self.entries {
            map.insert(
                tag.clone(),
                Value::Array(values.iter().cloned().map(Value::String).collect()),
            );
        }
        Ok(Value::Object(map))
    }
}

/// A label/value pair of language maps, used for `metadata` entries and the
/// `requiredStatement`.
///
/// Both halves start as Required markers; a fully usable entry needs at least
/// one label and one value:
///
/// ```
/// # use iiifgen::{BuilderConfig, Manifest, HasCommon};
/// # let config = BuilderConfig::shared("https://example.org/");
/// # let mut manifest = Manifest::new(config);
/// let statement = manifest.set_required_statement();
/// statement.add_label(Some("en"), "Hosting")?;
/// statement.add_value(Some("en"), "Hosted by the Example Organization")?;
/// # Ok::<(), iiifgen::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct MetadataEntry {
    config: Arc<BuilderConfig>,
    label: Field<LanguageMap>,
    value: Field<LanguageMap>,
}

impl MetadataEntry {
    pub fn new(config: Arc<BuilderConfig>) -> Self {
        Self {
            config,
            label: Field::Required("a metadata entry or required statement must have a label"),
            value: Field::Required("a metadata entry or required statement must have a value"),
        }
    }

    pub fn add_label(&mut self, language: Option<&str>, text: &str) -> Result<(), Error> {
        let tag = language.unwrap_or("none");
        self.config.check_language(tag)?;
        self.label
            .get_or_insert_with(LanguageMap::new)
            .append(tag, text);
        Ok(())
    }

    pub fn add_value(&mut self, language: Option<&str>, text: &str) -> Result<(), Error> {
        let tag = language.unwrap_or("none");
        self.config.check_language(tag)?;
        self.value
            .get_or_insert_with(LanguageMap::new)
            .append(tag, text);
        Ok(())
    }

    pub fn label(&self) -> Option<&LanguageMap> {
        self.label.get()
    }

    pub fn value(&self) -> Option<&LanguageMap> {
        self.value.get()
    }
}

impl ToJson for MetadataEntry {
    fn to_json(&self, mode: Mode) -> Result<Value, Error> {
        let mut w = ObjectWriter::new(mode);
        w.field("label", &self.label)?;
        w.field("value", &self.value)?;
        Ok(w.finish())
    }
}
