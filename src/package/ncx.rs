//! NCX navigation document writer.
//!
//! One navPoint per navigable entry, numbered 1..k with no gaps. The
//! synthesized table-of-contents page, when present, leads the map to
//! match its position at the head of the spine.

use crate::manifest::ManifestEntry;
use crate::metadata::BookMetadata;
use crate::util::escape_xml;

/// Generate the navigation document from the normalized entry list.
pub fn write_ncx(
    metadata: &BookMetadata,
    entries: &[ManifestEntry],
    toc_page: Option<&ManifestEntry>,
) -> String {
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head/>
"#,
    );

    ncx.push_str(&format!(
        "  <docTitle>\n    <text>{}</text>\n  </docTitle>\n",
        escape_xml(&metadata.title)
    ));

    if let Some(author) = metadata.authors.first() {
        ncx.push_str(&format!(
            "  <docAuthor>\n    <text>{}</text>\n  </docAuthor>\n",
            escape_xml(author)
        ));
    }

    ncx.push_str("  <navMap>\n");

    let mut play_order = 1;
    if let Some(toc) = toc_page {
        nav_point(&mut ncx, toc, &mut play_order);
    }
    for entry in entries.iter().filter(|e| e.navigation) {
        nav_point(&mut ncx, entry, &mut play_order);
    }

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

fn nav_point(ncx: &mut String, entry: &ManifestEntry, play_order: &mut usize) {
    ncx.push_str(&format!(
        "    <navPoint class=\"{}\" id=\"{}\" playOrder=\"{}\">\n",
        escape_xml(&entry.class),
        escape_xml(&entry.id),
        play_order
    ));
    ncx.push_str(&format!(
        "      <navLabel>\n        <text>{}</text>\n      </navLabel>\n",
        escape_xml(&entry.label)
    ));
    ncx.push_str(&format!(
        "      <content src=\"{}\"/>\n",
        escape_xml(&entry.dest)
    ));
    ncx.push_str("    </navPoint>\n");

    *play_order += 1;
}
