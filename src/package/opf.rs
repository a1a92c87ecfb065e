//! OPF package document writer.
//!
//! Emits the EPUB 2 package: metadata block, manifest, reading-order
//! spine, and structural guide.

use std::path::Path;

use crate::manifest::{Category, ManifestEntry};
use crate::metadata::BookMetadata;
use crate::package::pages::CoverAssets;
use crate::util::{escape_xml, extension};

/// Generate the package document from the normalized entry list plus
/// book-level metadata.
pub fn write_opf(
    metadata: &BookMetadata,
    entries: &[ManifestEntry],
    cover: Option<&CoverAssets>,
    toc_page: Option<&ManifestEntry>,
) -> String {
    let mut opf = String::new();

    opf.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId">
"#,
    );

    metadata_block(&mut opf, metadata, cover.is_some());
    manifest_block(&mut opf, entries, cover, toc_page);
    spine_block(&mut opf, entries, toc_page);
    guide_block(&mut opf, cover, toc_page);

    opf.push_str("</package>\n");
    opf
}

fn metadata_block(opf: &mut String, metadata: &BookMetadata, has_cover: bool) {
    opf.push_str(
        "  <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:opf=\"http://www.idpf.org/2007/opf\">\n",
    );

    opf.push_str(&format!(
        "    <dc:title>{}</dc:title>\n",
        escape_xml(&metadata.title)
    ));
    opf.push_str(&format!(
        "    <dc:language>{}</dc:language>\n",
        escape_xml(&metadata.language)
    ));

    if let Some(id) = &metadata.identifier {
        opf.push_str(&format!(
            "    <dc:identifier id=\"BookId\" opf:scheme=\"{}\">{}</dc:identifier>\n",
            escape_xml(&id.scheme),
            escape_xml(&id.value)
        ));
    }

    for author in &metadata.authors {
        opf.push_str(&format!(
            "    <dc:creator opf:role=\"aut\">{}</dc:creator>\n",
            escape_xml(author)
        ));
    }

    for contributor in &metadata.contributors {
        opf.push_str(&format!(
            "    <dc:contributor>{}</dc:contributor>\n",
            escape_xml(contributor)
        ));
    }

    if let Some(rights) = &metadata.rights {
        opf.push_str(&format!(
            "    <dc:rights>{}</dc:rights>\n",
            escape_xml(rights)
        ));
    }

    if let Some(date) = &metadata.date {
        opf.push_str(&format!(
            "    <dc:date>{}</dc:date>\n",
            escape_xml(&date.render())
        ));
    }

    if let Some(description) = &metadata.description {
        opf.push_str(&format!(
            "    <dc:description>{}</dc:description>\n",
            escape_xml(description)
        ));
    }

    if let Some(publisher) = &metadata.publisher {
        opf.push_str(&format!(
            "    <dc:publisher>{}</dc:publisher>\n",
            escape_xml(publisher)
        ));
    }

    if has_cover {
        opf.push_str("    <meta name=\"cover\" content=\"cover\"/>\n");
    }

    opf.push_str("  </metadata>\n");
}

fn manifest_block(
    opf: &mut String,
    entries: &[ManifestEntry],
    cover: Option<&CoverAssets>,
    toc_page: Option<&ManifestEntry>,
) {
    opf.push_str("  <manifest>\n");

    // Cover image and page precede everything else
    if let Some(cover) = cover {
        item(opf, "cover", &cover.image_dest);
        item(opf, &cover.page.id, &cover.page.dest);
    }

    // Entries regrouped by destination category: text, images, css, ncx
    let mut images = Vec::new();
    let mut css = Vec::new();
    let mut ncx = None;
    for entry in entries {
        match Category::classify(Path::new(&entry.dest)) {
            Category::Text => item(opf, &entry.id, &entry.dest),
            Category::Image => images.push(entry),
            Category::Stylesheet => css.push(entry),
            Category::NavigationData => ncx = Some(entry),
            Category::Unclassified => {}
        }
    }
    for entry in images {
        item(opf, &entry.id, &entry.dest);
    }
    for entry in css {
        item(opf, &entry.id, &entry.dest);
    }
    if let Some(entry) = ncx {
        item(opf, &entry.id, &entry.dest);
    }

    if let Some(toc) = toc_page {
        item(opf, &toc.id, &toc.dest);
    }

    opf.push_str("  </manifest>\n");
}

fn spine_block(opf: &mut String, entries: &[ManifestEntry], toc_page: Option<&ManifestEntry>) {
    opf.push_str("  <spine toc=\"ncx\">\n");

    if let Some(toc) = toc_page {
        opf.push_str(&format!(
            "    <itemref idref=\"{}\"/>\n",
            escape_xml(&toc.id)
        ));
    }

    // Only text resources define the linear reading order
    for entry in entries {
        if Category::classify(Path::new(&entry.dest)) == Category::Text {
            opf.push_str(&format!(
                "    <itemref idref=\"{}\"/>\n",
                escape_xml(&entry.id)
            ));
        }
    }

    opf.push_str("  </spine>\n");
}

fn guide_block(opf: &mut String, cover: Option<&CoverAssets>, toc_page: Option<&ManifestEntry>) {
    opf.push_str("  <guide>\n");

    if let Some(cover) = cover {
        opf.push_str(&format!(
            "    <reference type=\"cover\" title=\"Cover\" href=\"{}\"/>\n",
            escape_xml(&cover.page.dest)
        ));
    }

    if let Some(toc) = toc_page {
        opf.push_str(&format!(
            "    <reference type=\"toc\" title=\"Table of contents\" href=\"{}\"/>\n",
            escape_xml(&toc.dest)
        ));
    }

    opf.push_str("  </guide>\n");
}

fn item(opf: &mut String, id: &str, href: &str) {
    opf.push_str(&format!(
        "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"/>\n",
        escape_xml(id),
        escape_xml(href),
        media_type(href)
    ));
}

/// Media type for a destination path, derived from its suffix. Agrees
/// with [`Category::classify`] for every recognized suffix.
pub fn media_type(dest: &str) -> &'static str {
    match extension(Path::new(dest)).as_deref() {
        Some("html") | Some("xhtml") | Some("htm") => "application/xhtml+xml",
        Some("css") => "text/css",
        Some("ncx") => "application/x-dtbncx+xml",
        Some("jpg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "unknown",
    }
}
