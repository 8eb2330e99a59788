//! iiifgen: a typed builder for IIIF Presentation API 3.0 documents.
//!
//! Instead of hand-assembling JSON-LD, a Manifest or Collection is built
//! through typed constructor/setter calls. Every property slot carries its
//! RFC 2119 obligation — constructors seed Required/Recommended markers,
//! setters validate and resolve them — and serialization either enforces the
//! obligations (strict mode) or renders them as diagnostics for inspection.
//!
//! # Modules
//!
//! - [`resources`]: the resource types (Manifest, Canvas, Annotation, ...)
//! - [`field`]: the marker-carrying field slot
//! - [`json`]: the two-mode serialization engine
//! - [`reader`]: rehydration of parsed documents
//! - [`config`]: the per-document builder configuration
//! - [`error`]: error types for iiifgen operations
//!
//! # Example
//!
//! ```
//! use iiifgen::{BuilderConfig, FormatField, Manifest, Mode, Resource, Spatial};
//!
//! let config = BuilderConfig::shared("https://example.org/iiif/book1/");
//! let mut manifest = Manifest::new(config);
//! manifest.set_id(None, Some("manifest.json"))?;
//! manifest.add_label(Some("en"), "Image 1")?;
//!
//! let canvas = manifest.add_canvas();
//! canvas.set_id(None, Some("canvas/p1"))?;
//! canvas.set_height_width(1800, 1200)?;
//! let page = canvas.add_annotation_page();
//! page.set_id(None, Some("page/p1/1"))?;
//! let annotation = page.add_annotation(Some("https://example.org/iiif/book1/canvas/p1"));
//! annotation.set_id(None, Some("annotation/p0001-image"))?;
//! annotation.set_motivation("painting");
//! let body = annotation.body_painting_mut().expect("painting body");
//! body.set_id(Some("https://example.org/page1-full.png"), None)?;
//! body.set_type("Image")?;
//! body.set_format("image/png")?;
//! body.set_height_width(1800, 1200)?;
//!
//! let json = manifest.json_ld(Mode::Strict)?;
//! assert!(json.starts_with("{\n  \"@context\""));
//! # Ok::<(), iiifgen::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod json;
pub mod lang;
pub mod reader;
pub mod resources;
pub(crate) mod vocab;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

pub use config::BuilderConfig;
pub use error::Error;
pub use field::Field;
pub use json::{Context, Inspection, Mode, ObjectWriter, ToJson, PRESENTATION_CONTEXT};
pub use lang::{LanguageMap, MetadataEntry};
pub use reader::Document;
pub use resources::{
    Annotation, AnnotationBody, AnnotationCollection, AnnotationPage, Canvas, Collection,
    CollectionItem, FormatField, FragmentSelector, HasCommon, Homepage, ImageApiSelector,
    Languages, Logo, Manifest, ManifestRef, Navigable, PaintingBody, PartOf, PointSelector,
    Provider, Range, RangeItem, Rendering, Resource, SeeAlso, Selector, Service, Services, Size,
    Spatial, SpecificResource, Start, Supplementary, SvgSelector, Target, Temporal, TextualBody,
    Thumbnail, ViewingDirectional,
};

/// The iiifgen CLI application.
#[derive(Parser)]
#[command(name = "iiifgen")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Report missing required/recommended fields of a document.
    Inspect(InspectArgs),
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Manifest or Collection JSON file to inspect.
    input: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the iiifgen CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("iiifgen {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("A typed builder for IIIF Presentation API 3.0 documents.");
            println!();
            println!("Run 'iiifgen --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), Error> {
    let config = Arc::new(BuilderConfig::default());
    let document = reader::read_json_file(&args.input, &config)?;
    let report = document.inspect()?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!("{}", report.json);
            print!("{report}");
        }
    }

    if report.is_complete() {
        Ok(())
    } else {
        Err(Error::InspectionFailed {
            missing_required: report.missing_required,
            missing_recommended: report.missing_recommended,
        })
    }
}
