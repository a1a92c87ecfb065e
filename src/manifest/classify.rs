//! Input classification by filename suffix.

use std::path::Path;

use crate::util::extension;

/// Content category of an input file, decided by suffix alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Image,
    Text,
    Stylesheet,
    NavigationData,
    Unclassified,
}

impl Category {
    /// Classify a path by its suffix, case-insensitively. Paths with or
    /// without directory components are accepted.
    pub fn classify(path: &Path) -> Category {
        match extension(path).as_deref() {
            Some("jpg") | Some("gif") | Some("png") | Some("svg") => Category::Image,
            Some("html") | Some("xhtml") | Some("htm") => Category::Text,
            Some("css") => Category::Stylesheet,
            Some("ncx") => Category::NavigationData,
            _ => Category::Unclassified,
        }
    }

    /// Staging subdirectory under OEBPS for this category, if it has one.
    pub fn subdir(self) -> Option<&'static str> {
        match self {
            Category::Image => Some("images"),
            Category::Text => Some("text"),
            Category::Stylesheet => Some("css"),
            Category::NavigationData | Category::Unclassified => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_suffix() {
        assert_eq!(Category::classify(Path::new("a.jpg")), Category::Image);
        assert_eq!(Category::classify(Path::new("a.gif")), Category::Image);
        assert_eq!(Category::classify(Path::new("a.png")), Category::Image);
        assert_eq!(Category::classify(Path::new("a.svg")), Category::Image);
        assert_eq!(Category::classify(Path::new("a.html")), Category::Text);
        assert_eq!(Category::classify(Path::new("a.xhtml")), Category::Text);
        assert_eq!(Category::classify(Path::new("a.htm")), Category::Text);
        assert_eq!(Category::classify(Path::new("a.css")), Category::Stylesheet);
        assert_eq!(
            Category::classify(Path::new("toc.ncx")),
            Category::NavigationData
        );
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(Category::classify(Path::new("A.JPG")), Category::Image);
        assert_eq!(Category::classify(Path::new("A.Html")), Category::Text);
    }

    #[test]
    fn test_classify_with_directory_components() {
        assert_eq!(
            Category::classify(Path::new("some/dir/a.html")),
            Category::Text
        );
    }

    #[test]
    fn test_unknown_suffix_is_unclassified() {
        assert_eq!(
            Category::classify(Path::new("readme.txt")),
            Category::Unclassified
        );
        assert_eq!(Category::classify(Path::new("noext")), Category::Unclassified);
    }

    #[test]
    fn test_subdir() {
        assert_eq!(Category::Image.subdir(), Some("images"));
        assert_eq!(Category::Text.subdir(), Some("text"));
        assert_eq!(Category::Stylesheet.subdir(), Some("css"));
        assert_eq!(Category::NavigationData.subdir(), None);
        assert_eq!(Category::Unclassified.subdir(), None);
    }
}
