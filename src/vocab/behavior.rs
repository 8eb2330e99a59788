//! The `behavior` controlled vocabulary and its compatibility rules.
//!
//! Each behavior value carries three constraints: the resource types it may
//! appear on, the sibling values it is disjoint with, and for the page-layout
//! values on a Canvas, a precondition that the Canvas already has spatial
//! dimensions. Encoding the rules as one table keeps the check itself to a
//! single lookup.

use crate::error::Error;

struct BehaviorRule {
    value: &'static str,
    valid_on: &'static [&'static str],
    disjoint_with: &'static [&'static str],
    needs_spatial_dims: bool,
}

const LAYOUT_SET: &[&str] = &[
    "unordered",
    "individuals",
    "continuous",
    "paged",
    "facing-pages",
    "non-paged",
];

const RULES: &[BehaviorRule] = &[
    BehaviorRule {
        value: "auto-advance",
        valid_on: &["Collection", "Manifest", "Canvas", "Range"],
        disjoint_with: &["no-auto-advance"],
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "no-auto-advance",
        valid_on: &["Collection", "Manifest", "Canvas", "Range"],
        disjoint_with: &["auto-advance"],
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "repeat",
        valid_on: &["Collection", "Manifest"],
        disjoint_with: &["no-repeat"],
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "no-repeat",
        valid_on: &["Collection", "Manifest"],
        disjoint_with: &["repeat"],
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "unordered",
        valid_on: &["Collection", "Manifest", "Range"],
        disjoint_with: LAYOUT_SET,
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "individuals",
        valid_on: &["Collection", "Manifest", "Range"],
        disjoint_with: LAYOUT_SET,
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "continuous",
        valid_on: &["Collection", "Manifest", "Range"],
        disjoint_with: LAYOUT_SET,
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "paged",
        valid_on: &["Collection", "Manifest", "Range"],
        disjoint_with: LAYOUT_SET,
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "facing-pages",
        valid_on: &["Canvas"],
        disjoint_with: LAYOUT_SET,
        needs_spatial_dims: true,
    },
    BehaviorRule {
        value: "non-paged",
        valid_on: &["Canvas"],
        disjoint_with: LAYOUT_SET,
        needs_spatial_dims: true,
    },
    BehaviorRule {
        value: "multi-part",
        valid_on: &["Collection"],
        disjoint_with: &["together"],
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "together",
        valid_on: &["Collection"],
        disjoint_with: &["multi-part"],
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "sequence",
        valid_on: &["Range"],
        disjoint_with: &["thumbnail-nav", "no-nav"],
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "thumbnail-nav",
        valid_on: &["Collection"],
        disjoint_with: &["sequence", "no-nav"],
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "no-nav",
        valid_on: &["Collection"],
        disjoint_with: &["sequence", "thumbnail-nav"],
        needs_spatial_dims: false,
    },
    BehaviorRule {
        value: "hidden",
        valid_on: &[
            "AnnotationCollection",
            "AnnotationPage",
            "Annotation",
            "SpecificResource",
            "Choice",
        ],
        disjoint_with: &[],
        needs_spatial_dims: false,
    },
];

/// The `viewingDirection` controlled vocabulary.
pub(crate) const VIEWING_DIRECTIONS: &[&str] = &[
    "left-to-right",
    "right-to-left",
    "top-to-bottom",
    "bottom-to-top",
];

pub(crate) fn check_viewing_direction(value: &str) -> Result<(), Error> {
    if VIEWING_DIRECTIONS.contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "viewing direction `{}` is not one of {}",
            value,
            VIEWING_DIRECTIONS.join(", ")
        )))
    }
}

/// Validates adding `value` to a resource of type `kind` that already
/// carries `existing` behaviors. `has_spatial_dims` reports whether the
/// resource has both height and width set (only consulted for the Canvas
/// layout values).
pub(crate) fn check(
    value: &str,
    kind: &str,
    existing: &[String],
    has_spatial_dims: bool,
) -> Result<(), Error> {
    let invalid = |reason: String| Error::InvalidBehavior {
        value: value.to_string(),
        reason,
    };

    let Some(rule) = RULES.iter().find(|r| r.value == value) else {
        return Err(invalid("not a known behavior value".to_string()));
    };
    if !rule.valid_on.contains(&kind) {
        return Err(invalid(format!(
            "only valid on {}, not on {kind}",
            rule.valid_on.join(", ")
        )));
    }
    if let Some(conflict) = existing
        .iter()
        .find(|b| rule.disjoint_with.contains(&b.as_str()) && b.as_str() != value)
    {
        return Err(invalid(format!("disjoint with already-applied `{conflict}`")));
    }
    if rule.needs_spatial_dims && !has_spatial_dims {
        return Err(invalid(
            "the Canvas must have height and width set first".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_value_is_rejected() {
        assert!(check("sideways", "Manifest", &[], false).is_err());
    }

    #[test]
    fn paged_is_rejected_on_a_canvas() {
        let err = check("paged", "Canvas", &[], true).unwrap_err();
        assert!(err.to_string().contains("only valid on"), "got: {err}");
    }

    #[test]
    fn layout_values_are_pairwise_disjoint() {
        let existing = vec!["paged".to_string()];
        assert!(check("individuals", "Manifest", &existing, false).is_err());
        assert!(check("continuous", "Manifest", &existing, false).is_err());
        assert!(check("unordered", "Manifest", &existing, false).is_err());
        // An unrelated value is fine alongside `paged`.
        assert!(check("auto-advance", "Manifest", &existing, false).is_ok());
    }

    #[test]
    fn facing_pages_needs_dimensions() {
        assert!(check("facing-pages", "Canvas", &[], false).is_err());
        assert!(check("facing-pages", "Canvas", &[], true).is_ok());
    }

    #[test]
    fn hidden_applies_to_annotation_resources() {
        assert!(check("hidden", "Annotation", &[], false).is_ok());
        assert!(check("hidden", "AnnotationPage", &[], false).is_ok());
        assert!(check("hidden", "Manifest", &[], false).is_err());
    }

    #[test]
    fn viewing_direction_vocabulary() {
        assert!(check_viewing_direction("right-to-left").is_ok());
        assert!(check_viewing_direction("diagonal").is_err());
    }
}
