//! Normalization of caller file specs into manifest entries.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::manifest::classify::Category;
use crate::manifest::labels::resolve_label;
use crate::util::bare_filename;

/// A caller-provided reference to one input file, with optional
/// overrides for semantic class and navigation label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileSpec {
    pub src: PathBuf,
    pub class: Option<String>,
    pub nav_label: Option<String>,
}

impl SourceFileSpec {
    pub fn new(src: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            class: None,
            nav_label: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_nav_label(mut self, label: impl Into<String>) -> Self {
        self.nav_label = Some(label.into());
        self
    }
}

impl From<&str> for SourceFileSpec {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}

impl From<String> for SourceFileSpec {
    fn from(src: String) -> Self {
        Self::new(src)
    }
}

impl From<&Path> for SourceFileSpec {
    fn from(src: &Path) -> Self {
        Self::new(src)
    }
}

impl From<PathBuf> for SourceFileSpec {
    fn from(src: PathBuf) -> Self {
        Self::new(src)
    }
}

/// Where an entry's bytes come from at staging time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// Copied verbatim from a caller-supplied file.
    Copy(PathBuf),
    /// Synthesized markup written during staging.
    Markup(String),
    /// Written by a dedicated writer (the navigation document itself).
    Internal,
}

/// One packaged resource: destination, stable id, and navigation
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Destination path relative to the OEBPS root, category-prefixed.
    pub dest: String,
    pub id: String,
    /// Semantic class tag (chapter, other, ...).
    pub class: String,
    /// True only for entries that appear in the navigation document and
    /// reading order.
    pub navigation: bool,
    pub label: String,
    pub source: EntrySource,
}

/// Builds the normalized entry list. Owns the per-category id counters
/// for one assembly run; a fresh builder starts every counter at 1.
#[derive(Debug)]
pub struct EntryBuilder {
    image_counter: usize,
    text_counter: usize,
    css_counter: usize,
    strict: bool,
}

impl EntryBuilder {
    pub fn new(strict: bool) -> Self {
        Self {
            image_counter: 1,
            text_counter: 1,
            css_counter: 1,
            strict,
        }
    }

    /// Normalize the specs, in input order, into manifest entries.
    ///
    /// Files with unrecognized suffixes are excluded from the manifest:
    /// with a warning by default, or as an error in strict mode. The
    /// navigation document's self-entry (`id="ncx"`) is appended last
    /// and is never classified by suffix.
    pub fn build_entries(&mut self, specs: &[SourceFileSpec]) -> Result<Vec<ManifestEntry>> {
        let mut entries = Vec::with_capacity(specs.len() + 1);

        for spec in specs {
            match Category::classify(&spec.src) {
                Category::Image => {
                    let id = format!("img_{}", self.image_counter);
                    self.image_counter += 1;
                    entries.push(entry_for(spec, "images", id, false));
                }
                Category::Text => {
                    let id = format!("text_{}", self.text_counter);
                    self.text_counter += 1;
                    entries.push(entry_for(spec, "text", id, true));
                }
                Category::Stylesheet => {
                    let id = format!("css_{}", self.css_counter);
                    self.css_counter += 1;
                    entries.push(entry_for(spec, "css", id, false));
                }
                Category::NavigationData | Category::Unclassified => {
                    if self.strict {
                        return Err(Error::Unclassified(spec.src.clone()));
                    }
                    log::warn!(
                        "skipping input file with unrecognized suffix: {}",
                        spec.src.display()
                    );
                }
            }
        }

        entries.push(ManifestEntry {
            dest: "toc.ncx".to_string(),
            id: "ncx".to_string(),
            class: "other".to_string(),
            navigation: false,
            label: String::new(),
            source: EntrySource::Internal,
        });

        Ok(entries)
    }
}

fn entry_for(spec: &SourceFileSpec, subdir: &str, id: String, navigation: bool) -> ManifestEntry {
    let filename = bare_filename(&spec.src);
    ManifestEntry {
        dest: format!("{}/{}", subdir, filename),
        id,
        class: spec.class.clone().unwrap_or_else(|| "other".to_string()),
        navigation,
        label: resolve_label(&spec.src, spec.nav_label.as_deref()),
        source: EntrySource::Copy(spec.src.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn specs(paths: &[&str]) -> Vec<SourceFileSpec> {
        paths.iter().map(|p| SourceFileSpec::from(*p)).collect()
    }

    #[test]
    fn test_category_counters_are_independent() {
        let mut builder = EntryBuilder::new(false);
        let entries = builder
            .build_entries(&specs(&["a.html", "b.png", "c.html", "style.css", "d.gif"]))
            .unwrap();

        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["text_1", "img_1", "text_2", "css_1", "img_2", "ncx"]);
    }

    #[test]
    fn test_destinations_are_category_prefixed() {
        let mut builder = EntryBuilder::new(false);
        let entries = builder
            .build_entries(&specs(&["dir/a.html", "b.png", "s.css"]))
            .unwrap();
        assert_eq!(entries[0].dest, "text/a.html");
        assert_eq!(entries[1].dest, "images/b.png");
        assert_eq!(entries[2].dest, "css/s.css");
    }

    #[test]
    fn test_navigation_flag_only_for_text() {
        let mut builder = EntryBuilder::new(false);
        let entries = builder
            .build_entries(&specs(&["a.html", "b.png", "s.css"]))
            .unwrap();
        assert!(entries[0].navigation);
        assert!(!entries[1].navigation);
        assert!(!entries[2].navigation);
    }

    #[test]
    fn test_ncx_entry_appended_last() {
        let mut builder = EntryBuilder::new(false);
        let entries = builder.build_entries(&specs(&["a.html"])).unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.id, "ncx");
        assert_eq!(last.dest, "toc.ncx");
        assert!(!last.navigation);
        assert_eq!(last.source, EntrySource::Internal);
    }

    #[test]
    fn test_unclassified_files_are_dropped() {
        let mut builder = EntryBuilder::new(false);
        let entries = builder
            .build_entries(&specs(&["a.html", "readme.txt", "notes.ncx"]))
            .unwrap();
        // only the text entry and the ncx self-entry remain
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| !e.dest.contains("readme")));
    }

    #[test]
    fn test_strict_mode_rejects_unclassified() {
        let mut builder = EntryBuilder::new(true);
        let err = builder
            .build_entries(&specs(&["a.html", "readme.txt"]))
            .unwrap_err();
        assert!(matches!(err, Error::Unclassified(p) if p == Path::new("readme.txt")));
    }

    #[test]
    fn test_overrides_applied() {
        let spec = SourceFileSpec::new("x.html")
            .with_class("chapter")
            .with_nav_label("Intro");
        let mut builder = EntryBuilder::new(false);
        let entries = builder.build_entries(&[spec]).unwrap();
        assert_eq!(entries[0].class, "chapter");
        assert_eq!(entries[0].label, "Intro");
    }

    #[test]
    fn test_fresh_builder_resets_counters() {
        let mut builder = EntryBuilder::new(false);
        builder.build_entries(&specs(&["a.html", "b.html"])).unwrap();

        let mut builder = EntryBuilder::new(false);
        let entries = builder.build_entries(&specs(&["c.html"])).unwrap();
        assert_eq!(entries[0].id, "text_1");
    }

    proptest! {
        #[test]
        fn prop_ids_unique_and_increasing(picks in proptest::collection::vec(0usize..5, 0..40)) {
            let suffixes = ["html", "png", "css", "txt", "svg"];
            let input: Vec<SourceFileSpec> = picks
                .iter()
                .enumerate()
                .map(|(i, p)| SourceFileSpec::from(format!("file{}.{}", i, suffixes[*p])))
                .collect();

            let mut builder = EntryBuilder::new(false);
            let entries = builder.build_entries(&input).unwrap();

            let mut seen = std::collections::HashSet::new();
            for entry in &entries {
                prop_assert!(seen.insert(entry.id.clone()), "duplicate id {}", entry.id);
            }

            for prefix in ["text_", "img_", "css_"] {
                let nums: Vec<usize> = entries
                    .iter()
                    .filter_map(|e| e.id.strip_prefix(prefix))
                    .map(|n| n.parse().unwrap())
                    .collect();
                prop_assert!(nums.first().is_none_or(|&n| n == 1));
                prop_assert!(nums.windows(2).all(|w| w[0] + 1 == w[1]));
            }
        }
    }
}
