//! Navigation label resolution.
//!
//! Labels come from an explicit override, from the document's `<title>`
//! or first unambiguous heading, or from the bare filename. Markup
//! sniffing is best-effort: a document quick-xml cannot parse degrades
//! to the filename fallback instead of aborting the assembly.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::manifest::classify::Category;
use crate::util::bare_filename;

/// Resolve the navigation label for one input file.
///
/// An override is returned verbatim without ever opening the file.
pub fn resolve_label(path: &Path, override_label: Option<&str>) -> String {
    if let Some(label) = override_label {
        return label.to_string();
    }

    let fallback = bare_filename(path);
    if Category::classify(path) != Category::Text {
        return fallback;
    }

    match std::fs::read_to_string(path) {
        Ok(content) => sniff_label(&content).unwrap_or(fallback),
        Err(e) => {
            log::debug!("cannot read {} for labeling: {}", path.display(), e);
            fallback
        }
    }
}

enum Target {
    Title,
    Heading(usize),
}

/// Extract a label from markup: a single `/html/head/title`, else the
/// first heading level h1..h5 with exactly one occurrence directly under
/// `/html/body`.
fn sniff_label(content: &str) -> Option<String> {
    let mut reader = Reader::from_str(content);
    // Text is captured untrimmed so whitespace between text events and
    // entity references survives; only the assembled buffer is trimmed.
    reader.config_mut().check_end_names = false;

    let mut stack: Vec<String> = Vec::new();
    let mut titles: Vec<String> = Vec::new();
    let mut headings: [Vec<String>; 5] = Default::default();
    // (target, capture depth, text buffer)
    let mut current: Option<(Target, usize, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_lower(e.name().as_ref());
                // HTML void elements carry no end tag; pushing them
                // would skew the depth for everything that follows.
                if is_void(&name) {
                    continue;
                }
                stack.push(name);
                if current.is_none()
                    && let Some(target) = match_target(&stack)
                {
                    current = Some((target, stack.len(), String::new()));
                }
            }
            Ok(Event::Text(e)) => {
                if let Some((_, depth, buf)) = current.as_mut()
                    && stack.len() == *depth
                {
                    buf.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some((_, depth, buf)) = current.as_mut()
                    && stack.len() == *depth
                    && let Some(resolved) = resolve_entity(&String::from_utf8_lossy(e.as_ref()))
                {
                    buf.push_str(&resolved);
                }
            }
            Ok(Event::End(e)) => {
                // Pop to the matching open tag; an end tag with no match
                // on the stack (a stray </br> and the like) is ignored.
                let name = local_lower(e.name().as_ref());
                if let Some(pos) = stack.iter().rposition(|n| *n == name) {
                    stack.truncate(pos);
                }
                let closed = matches!(&current, Some((_, depth, _)) if stack.len() < *depth);
                if closed && let Some((target, _, buf)) = current.take() {
                    match target {
                        Target::Title => titles.push(buf.trim().to_string()),
                        Target::Heading(level) => headings[level].push(buf.trim().to_string()),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => return None,
            _ => {}
        }
    }

    if titles.len() == 1 && !titles[0].is_empty() {
        return Some(titles[0].clone());
    }
    for level in &headings {
        if level.len() == 1 && !level[0].is_empty() {
            return Some(level[0].clone());
        }
    }
    None
}

fn match_target(stack: &[String]) -> Option<Target> {
    if stack.len() != 3 || stack[0] != "html" {
        return None;
    }
    if stack[1] == "head" && stack[2] == "title" {
        return Some(Target::Title);
    }
    if stack[1] == "body" {
        let levels = ["h1", "h2", "h3", "h4", "h5"];
        if let Some(level) = levels.iter().position(|h| *h == stack[2]) {
            return Some(Target::Heading(level));
        }
    }
    None
}

/// HTML void elements: no content, no end tag.
fn is_void(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Local name of a possibly namespaced tag, lowercased.
fn local_lower(name: &[u8]) -> String {
    let raw = String::from_utf8_lossy(name);
    let local = raw.rsplit(':').next().unwrap_or(&raw);
    local.to_lowercase()
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_title_wins() {
        let doc = "<html><head><title>My Chapter</title></head>\
                   <body><h1>Something Else</h1></body></html>";
        assert_eq!(sniff_label(doc).as_deref(), Some("My Chapter"));
    }

    #[test]
    fn test_heading_fallback() {
        let doc = "<html><head></head><body><h1>Opening</h1></body></html>";
        assert_eq!(sniff_label(doc).as_deref(), Some("Opening"));
    }

    #[test]
    fn test_heading_requires_exactly_one() {
        // two h1 elements are ambiguous; the single h2 is used instead
        let doc = "<html><head></head><body>\
                   <h1>First</h1><h1>Second</h1><h2>Part One</h2>\
                   </body></html>";
        assert_eq!(sniff_label(doc).as_deref(), Some("Part One"));
    }

    #[test]
    fn test_nested_headings_are_ignored() {
        let doc = "<html><head></head><body><div><h1>Nested</h1></div></body></html>";
        assert_eq!(sniff_label(doc), None);
    }

    #[test]
    fn test_entities_in_title() {
        let doc = "<html><head><title>Tom &amp; Jerry</title></head><body></body></html>";
        assert_eq!(sniff_label(doc).as_deref(), Some("Tom & Jerry"));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed_interior_kept() {
        let doc = "<html><head><title>\n    War &amp; Peace  \n  </title></head>\
                   <body></body></html>";
        assert_eq!(sniff_label(doc).as_deref(), Some("War & Peace"));
    }

    #[test]
    fn test_void_elements_do_not_break_sniffing() {
        // plain HTML: unclosed <meta> and <link>, no self-closing slashes
        let doc = "<html><head>\
                   <meta charset=\"utf-8\">\
                   <link rel=\"stylesheet\" href=\"s.css\">\
                   <title>My Chapter</title>\
                   </head><body><p>text<br>more</p></body></html>";
        assert_eq!(sniff_label(doc).as_deref(), Some("My Chapter"));
    }

    #[test]
    fn test_void_elements_before_heading() {
        let doc = "<html><head><meta charset=\"utf-8\"></head>\
                   <body><hr><h1>Opening</h1></body></html>";
        assert_eq!(sniff_label(doc).as_deref(), Some("Opening"));
    }

    #[test]
    fn test_no_label_found() {
        let doc = "<html><head></head><body><p>just text</p></body></html>";
        assert_eq!(sniff_label(doc), None);
    }

    #[test]
    fn test_override_returned_verbatim() {
        // the path does not exist; an override never touches the filesystem
        let label = resolve_label(Path::new("missing/x.html"), Some("Intro"));
        assert_eq!(label, "Intro");
    }

    #[test]
    fn test_non_text_uses_filename() {
        let label = resolve_label(Path::new("dir/cover.png"), None);
        assert_eq!(label, "cover.png");
    }

    #[test]
    fn test_resolve_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ch1.html");
        fs::write(
            &path,
            "<html><head><title>Chapter One</title></head><body></body></html>",
        )
        .unwrap();
        assert_eq!(resolve_label(&path, None), "Chapter One");
    }

    #[test]
    fn test_malformed_markup_falls_back_to_filename() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.html");
        fs::write(&path, "<html><head><title>Broken<<</tit").unwrap();
        assert_eq!(resolve_label(&path, None), "bad.html");
    }

    #[test]
    fn test_missing_file_falls_back_to_filename() {
        let label = resolve_label(Path::new("nowhere/ch2.html"), None);
        assert_eq!(label, "ch2.html");
    }
}
