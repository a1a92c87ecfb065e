//! # bindery
//!
//! A library for assembling source documents (XHTML, images,
//! stylesheets) into a packaged EPUB 2 archive.
//!
//! ## Features
//!
//! - Classifies inputs by suffix and assigns stable, category-scoped ids
//! - Derives navigation labels from document titles and headings
//! - Synthesizes cover and table-of-contents pages
//! - Emits the OPF package manifest and NCX navigation document
//! - Packs the archive with the stored-first `mimetype` entry
//!
//! ## Quick Start
//!
//! ```no_run
//! use bindery::{Assembler, SourceFileSpec};
//!
//! let mut book = Assembler::new();
//! book.metadata.set_title("My Book");
//! book.metadata.add_author("Author Name");
//! book.add_file("intro.xhtml");
//! book.add_file(SourceFileSpec::new("chapter1.xhtml").with_nav_label("Chapter 1"));
//! book.add_file("style.css");
//! book.set_cover("cover.jpg");
//! book.assemble("book.epub")?;
//! # Ok::<(), bindery::Error>(())
//! ```
//!
//! Inputs with unrecognized suffixes are dropped from the package with a
//! warning; call [`Assembler::set_strict`] to fail the run instead.

pub mod archive;
pub mod assembler;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod package;
pub(crate) mod util;

pub use assembler::Assembler;
pub use error::{Error, Result};
pub use manifest::{Category, EntryBuilder, EntrySource, ManifestEntry, SourceFileSpec};
pub use metadata::{BookMetadata, DateValue, Identifier};
pub use package::CoverAssets;
