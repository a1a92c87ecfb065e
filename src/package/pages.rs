//! Synthesized cover and table-of-contents pages.
//!
//! Both pages are minimal XHTML documents built by string assembly,
//! staged alongside the caller's text files.

use std::path::{Path, PathBuf};

use crate::manifest::{EntrySource, ManifestEntry};
use crate::util::{bare_filename, escape_xml};

const XHTML_PROLOGUE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                              <html xmlns=\"http://www.w3.org/1999/xhtml\">\n";

/// Cover image plus its synthesized page. Present only when a cover
/// source was set.
#[derive(Debug, Clone)]
pub struct CoverAssets {
    pub image_source: PathBuf,
    /// Destination of the copied cover image, relative to OEBPS.
    pub image_dest: String,
    pub page: ManifestEntry,
}

/// Build the cover assets for a caller-supplied cover image path.
pub fn cover_assets(cover_src: &Path) -> CoverAssets {
    let image_dest = format!("images/{}", bare_filename(cover_src));
    let page = cover_page(&image_dest);
    CoverAssets {
        image_source: cover_src.to_path_buf(),
        image_dest,
        page,
    }
}

/// Synthesize the cover page: one image reference, no headings. The
/// image href climbs one level up since the page lives in the text
/// directory.
fn cover_page(cover_image_dest: &str) -> ManifestEntry {
    let mut page = String::from(XHTML_PROLOGUE);
    page.push_str("  <head>\n    <title>Cover</title>\n  </head>\n");
    page.push_str("  <body>\n    <div>\n");
    page.push_str(&format!(
        "      <img src=\"../{}\" alt=\"Cover\"/>\n",
        escape_xml(cover_image_dest)
    ));
    page.push_str("    </div>\n  </body>\n</html>\n");

    ManifestEntry {
        dest: "text/cover.xhtml".to_string(),
        id: "page-cover".to_string(),
        class: "other".to_string(),
        navigation: false,
        label: "Cover".to_string(),
        source: EntrySource::Markup(page),
    }
}

/// Synthesize the table-of-contents page: an `<h1>Contents</h1>` and one
/// link per navigable entry. Links use bare filenames since the page
/// lives alongside the other text files.
pub fn toc_page(entries: &[ManifestEntry]) -> ManifestEntry {
    let mut page = String::from(XHTML_PROLOGUE);
    page.push_str("  <head>\n    <title>Table of contents</title>\n  </head>\n");
    page.push_str("  <body>\n    <h1>Contents</h1>\n    <ul>\n");

    for entry in entries.iter().filter(|e| e.navigation) {
        let filename = entry.dest.rsplit('/').next().unwrap_or(&entry.dest);
        page.push_str(&format!(
            "      <li><a href=\"{}\">{}</a></li>\n",
            escape_xml(filename),
            escape_xml(&entry.label)
        ));
    }

    page.push_str("    </ul>\n  </body>\n</html>\n");

    ManifestEntry {
        dest: "text/toc.xhtml".to_string(),
        id: "page-toc".to_string(),
        class: "other".to_string(),
        navigation: true,
        label: "Table of contents".to_string(),
        source: EntrySource::Markup(page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markup(entry: &ManifestEntry) -> &str {
        match &entry.source {
            EntrySource::Markup(content) => content,
            other => panic!("expected markup source, got {:?}", other),
        }
    }

    fn text_entry(id: &str, dest: &str, label: &str) -> ManifestEntry {
        ManifestEntry {
            dest: dest.to_string(),
            id: id.to_string(),
            class: "other".to_string(),
            navigation: true,
            label: label.to_string(),
            source: EntrySource::Copy(PathBuf::from(label)),
        }
    }

    #[test]
    fn test_cover_assets() {
        let cover = cover_assets(Path::new("art/cover.jpg"));
        assert_eq!(cover.image_dest, "images/cover.jpg");
        assert_eq!(cover.page.id, "page-cover");
        assert_eq!(cover.page.dest, "text/cover.xhtml");
        assert!(!cover.page.navigation);

        let content = markup(&cover.page);
        assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(content.contains("<img src=\"../images/cover.jpg\" alt=\"Cover\"/>"));
        assert!(content.contains("<title>Cover</title>"));
    }

    #[test]
    fn test_toc_page_lists_navigable_entries() {
        let mut img = text_entry("img_1", "images/pic.png", "pic.png");
        img.navigation = false;
        let entries = vec![
            text_entry("text_1", "text/a.html", "Chapter A"),
            img,
            text_entry("text_2", "text/b.html", "Chapter B"),
        ];

        let toc = toc_page(&entries);
        assert_eq!(toc.id, "page-toc");
        assert!(toc.navigation);
        assert_eq!(toc.label, "Table of contents");

        let content = markup(&toc);
        assert!(content.contains("<h1>Contents</h1>"));
        assert!(content.contains("<li><a href=\"a.html\">Chapter A</a></li>"));
        assert!(content.contains("<li><a href=\"b.html\">Chapter B</a></li>"));
        assert!(!content.contains("pic.png"));
    }

    #[test]
    fn test_toc_page_escapes_labels() {
        let entries = vec![text_entry("text_1", "text/a.html", "Cats & Dogs")];
        assert!(markup(&toc_page(&entries)).contains("Cats &amp; Dogs"));
    }
}
