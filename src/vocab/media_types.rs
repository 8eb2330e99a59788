//! IANA media-type snapshot and the `format` property check.
//!
//! The registry is grouped by top-level type the way the IANA publishes it.
//! The lists are a curated snapshot of the types that actually occur in
//! digitized-object workflows, not the full registry; anything else can be
//! registered per document via `BuilderConfig::with_media_type`.

use crate::error::Error;

const APPLICATION: &[&str] = &[
    "application/epub+zip",
    "application/gzip",
    "application/javascript",
    "application/json",
    "application/ld+json",
    "application/marc",
    "application/marcxml+xml",
    "application/mets+xml",
    "application/mods+xml",
    "application/msword",
    "application/octet-stream",
    "application/pdf",
    "application/postscript",
    "application/rdf+xml",
    "application/rtf",
    "application/tei+xml",
    "application/vnd.ms-excel",
    "application/vnd.ms-powerpoint",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/xhtml+xml",
    "application/xml",
    "application/zip",
];

const AUDIO: &[&str] = &[
    "audio/aac",
    "audio/flac",
    "audio/midi",
    "audio/mp4",
    "audio/mpeg",
    "audio/ogg",
    "audio/opus",
    "audio/wav",
    "audio/webm",
    "audio/x-aiff",
];

const FONT: &[&str] = &[
    "font/collection",
    "font/otf",
    "font/sfnt",
    "font/ttf",
    "font/woff",
    "font/woff2",
];

const IMAGE: &[&str] = &[
    "image/apng",
    "image/avif",
    "image/bmp",
    "image/gif",
    "image/heic",
    "image/heif",
    "image/jp2",
    "image/jpeg",
    "image/jpx",
    "image/png",
    "image/svg+xml",
    "image/tiff",
    "image/webp",
];

const MESSAGE: &[&str] = &["message/rfc822"];

const MODEL: &[&str] = &[
    "model/gltf+json",
    "model/gltf-binary",
    "model/mtl",
    "model/obj",
    "model/stl",
];

const MULTIPART: &[&str] = &[
    "multipart/form-data",
    "multipart/mixed",
    "multipart/related",
];

const TEXT: &[&str] = &[
    "text/calendar",
    "text/css",
    "text/csv",
    "text/html",
    "text/markdown",
    "text/plain",
    "text/rtf",
    "text/vtt",
    "text/xml",
];

const VIDEO: &[&str] = &[
    "video/h264",
    "video/h265",
    "video/mp4",
    "video/mpeg",
    "video/ogg",
    "video/quicktime",
    "video/webm",
    "video/x-msvideo",
];

/// Legacy values seen in the wild, rejected with a pointer to the
/// registered spelling.
const CORRECTIVE: &[(&str, &str)] = &[
    ("image/jpg", "image/jpeg"),
    ("image/tif", "image/tiff"),
];

fn registry_for(top_level: &str) -> Option<&'static [&'static str]> {
    match top_level {
        "application" => Some(APPLICATION),
        "audio" => Some(AUDIO),
        "font" => Some(FONT),
        "image" => Some(IMAGE),
        "message" => Some(MESSAGE),
        "model" => Some(MODEL),
        "multipart" => Some(MULTIPART),
        "text" => Some(TEXT),
        "video" => Some(VIDEO),
        _ => None,
    }
}

/// Validates a `format` property value.
///
/// The value must have the `type/subtype` shape with an alphabetic top-level
/// type and must be present in the snapshot. Two legacy spellings are
/// rejected with the registered replacement named in the message.
pub(crate) fn check(value: &str) -> Result<(), Error> {
    let invalid = |reason: String| Error::InvalidMediaType {
        value: value.to_string(),
        reason,
    };

    let Some((top_level, subtype)) = value.split_once('/') else {
        return Err(invalid(
            "must have the form type/subtype, e.g. image/jpeg".to_string(),
        ));
    };
    if subtype.is_empty() || !top_level.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid(
            "must have the form type/subtype, e.g. image/jpeg".to_string(),
        ));
    }
    if let Some((_, correct)) = CORRECTIVE.iter().find(|(wrong, _)| *wrong == value) {
        return Err(invalid(format!("the registered media type is {correct}")));
    }
    match registry_for(top_level) {
        Some(registry) if registry.contains(&value) => Ok(()),
        _ => Err(invalid("not a registered IANA media type".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_types_pass() {
        assert!(check("image/jpeg").is_ok());
        assert!(check("image/png").is_ok());
        assert!(check("application/pdf").is_ok());
        assert!(check("text/html").is_ok());
        assert!(check("video/mp4").is_ok());
    }

    #[test]
    fn shape_is_enforced() {
        assert!(check("imagejpeg").is_err());
        assert!(check("image/").is_err());
        assert!(check("1mage/jpeg").is_err());
    }

    #[test]
    fn legacy_spellings_name_the_replacement() {
        let err = check("image/jpg").unwrap_err();
        assert!(err.to_string().contains("image/jpeg"), "got: {err}");

        let err = check("image/tif").unwrap_err();
        assert!(err.to_string().contains("image/tiff"), "got: {err}");
    }

    #[test]
    fn unregistered_types_fail() {
        assert!(check("image/madeup").is_err());
        assert!(check("sound/mp3").is_err());
    }
}
