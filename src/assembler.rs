//! End-to-end assembly: ties classification, page synthesis, the
//! document writers, and archive packing together.

use std::path::{Path, PathBuf};

use crate::archive;
use crate::error::Result;
use crate::manifest::{EntryBuilder, EntrySource, ManifestEntry, SourceFileSpec};
use crate::metadata::BookMetadata;
use crate::package::{ncx, opf, pages};

/// Assembles source documents into a packaged EPUB archive.
///
/// Configure metadata and inputs first, then call [`assemble`]. The
/// pipeline is strictly sequential: classification, id assignment,
/// document writing, staging, packing. Every run rebuilds the staging
/// directory from scratch; running two assemblies concurrently against
/// the same staging root is the caller's responsibility to avoid.
///
/// [`assemble`]: Assembler::assemble
///
/// # Example
///
/// ```no_run
/// use bindery::Assembler;
///
/// let mut book = Assembler::new();
/// book.metadata.set_title("My Book");
/// book.metadata.add_author("Author Name");
/// book.add_file("chapter1.xhtml");
/// book.add_file("style.css");
/// book.assemble("book.epub")?;
/// # Ok::<(), bindery::Error>(())
/// ```
pub struct Assembler {
    pub metadata: BookMetadata,
    files: Vec<SourceFileSpec>,
    cover: Option<PathBuf>,
    staging_root: PathBuf,
    generate_toc: bool,
    strict: bool,
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            metadata: BookMetadata::default(),
            files: Vec::new(),
            cover: None,
            staging_root: PathBuf::from("ebook_root"),
            generate_toc: true,
            strict: false,
        }
    }

    /// Append one input file, with or without overrides.
    pub fn add_file(&mut self, spec: impl Into<SourceFileSpec>) {
        self.files.push(spec.into());
    }

    /// Replace the input file list.
    pub fn set_files(&mut self, specs: Vec<SourceFileSpec>) {
        self.files = specs;
    }

    /// Set the cover image path. A cover page is synthesized around it.
    pub fn set_cover(&mut self, cover: impl Into<PathBuf>) {
        self.cover = Some(cover.into());
    }

    /// Change the staging directory (default `ebook_root`). It is
    /// removed and recreated on every run.
    pub fn set_staging_root(&mut self, root: impl Into<PathBuf>) {
        self.staging_root = root.into();
    }

    /// Enable or disable the generated table-of-contents page
    /// (default enabled).
    pub fn set_generate_toc(&mut self, enabled: bool) {
        self.generate_toc = enabled;
    }

    /// In strict mode, input files with unrecognized suffixes fail the
    /// run instead of being dropped with a warning.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Run the whole pipeline and write the archive to `out`.
    pub fn assemble(&mut self, out: impl AsRef<Path>) -> Result<()> {
        self.metadata.ensure_identifier();
        let root = self.staging_root.clone();

        archive::create_structure(&root)?;

        let cover = self.cover.as_deref().map(pages::cover_assets);

        let mut builder = EntryBuilder::new(self.strict);
        let entries = builder.build_entries(&self.files)?;

        let toc_page = if self.generate_toc {
            Some(pages::toc_page(&entries))
        } else {
            None
        };

        let opf_doc = opf::write_opf(&self.metadata, &entries, cover.as_ref(), toc_page.as_ref());
        let ncx_doc = ncx::write_ncx(&self.metadata, &entries, toc_page.as_ref());

        if let Some(cover) = &cover {
            archive::stage_copy(&root, &cover.image_source, &cover.image_dest)?;
            stage_entry(&root, &cover.page)?;
        }
        for entry in &entries {
            stage_entry(&root, entry)?;
        }
        if let Some(toc) = &toc_page {
            stage_entry(&root, toc)?;
        }
        archive::stage_write(&root, "book.opf", &opf_doc)?;
        archive::stage_write(&root, "toc.ncx", &ncx_doc)?;

        archive::pack(&root, out.as_ref())
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

fn stage_entry(root: &Path, entry: &ManifestEntry) -> Result<()> {
    match &entry.source {
        EntrySource::Copy(src) => archive::stage_copy(root, src, &entry.dest),
        EntrySource::Markup(content) => archive::stage_write(root, &entry.dest, content),
        EntrySource::Internal => Ok(()),
    }
}
