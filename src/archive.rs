//! Staging-tree creation and final zip packing.
//!
//! The staging directory mirrors the package's internal layout and is
//! recreated from scratch on every run. Packing writes the mimetype
//! first and uncompressed so readers can sniff the format.

use std::fs;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};

pub const MIMETYPE: &str = "application/epub+zip";

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/book.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Recreate the staging tree from scratch and write the fixed files
/// (mimetype and container descriptor).
pub fn create_structure(root: &Path) -> Result<()> {
    if root.exists() {
        fs::remove_dir_all(root)?;
    }

    fs::create_dir_all(root.join("META-INF"))?;
    for subdir in ["images", "text", "css"] {
        fs::create_dir_all(root.join("OEBPS").join(subdir))?;
    }

    fs::write(root.join("mimetype"), MIMETYPE)?;
    fs::write(root.join("META-INF").join("container.xml"), CONTAINER_XML)?;
    Ok(())
}

/// Copy a source file into the staging tree under `dest` (relative to
/// OEBPS). A missing source aborts the run.
pub fn stage_copy(root: &Path, source: &Path, dest: &str) -> Result<()> {
    if !source.is_file() {
        return Err(Error::SourceNotFound(source.to_path_buf()));
    }
    fs::copy(source, root.join("OEBPS").join(dest))?;
    Ok(())
}

/// Write generated document content into the staging tree under `dest`
/// (relative to OEBPS).
pub fn stage_write(root: &Path, dest: &str, content: &str) -> Result<()> {
    fs::write(root.join("OEBPS").join(dest), content)?;
    Ok(())
}

/// Pack the staging tree into an EPUB zip archive at `out`.
///
/// Entry order: mimetype (stored), container.xml, book.opf, toc.ncx,
/// then the text/, images/, and css/ directories, each enumerated in
/// sorted order so repeated runs produce the same layout.
pub fn pack(root: &Path, out: &Path) -> Result<()> {
    let file = fs::File::create(out)?;
    let mut zip = ZipWriter::new(file);

    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("mimetype", stored)?;
    zip.write_all(MIMETYPE.as_bytes())?;

    for name in ["META-INF/container.xml", "OEBPS/book.opf", "OEBPS/toc.ncx"] {
        zip.start_file(name, deflated)?;
        zip.write_all(&fs::read(root.join(name))?)?;
    }

    for subdir in ["text", "images", "css"] {
        let dir = root.join("OEBPS").join(subdir);
        let mut names: Vec<String> = Vec::new();
        for dent in fs::read_dir(&dir)? {
            names.push(dent?.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        for name in names {
            zip.start_file(format!("OEBPS/{}/{}", subdir, name), deflated)?;
            zip.write_all(&fs::read(dir.join(&name))?)?;
        }
    }

    zip.finish()?;
    Ok(())
}
