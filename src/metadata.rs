//! Book-level metadata.

use chrono::NaiveDate;

use crate::util::generate_identifier;

/// A publication date: either a preformatted string (passed through
/// verbatim) or a calendar date rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Text(String),
    Calendar(NaiveDate),
}

impl DateValue {
    /// Structured calendar date. Returns `None` when the components are
    /// out of range.
    pub fn calendar(year: i32, month: u32, day: u32) -> Option<DateValue> {
        NaiveDate::from_ymd_opt(year, month, day).map(DateValue::Calendar)
    }

    pub fn render(&self) -> String {
        match self {
            DateValue::Text(s) => s.clone(),
            DateValue::Calendar(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Unique book identifier plus its scheme tag (ISBN, DOI, URI, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub value: String,
    pub scheme: String,
}

/// Dublin Core style book metadata.
///
/// Mutated only before assembly begins; the assembler treats it as
/// read-only once the pipeline starts.
#[derive(Debug, Clone)]
pub struct BookMetadata {
    pub title: String,
    pub language: String,
    pub identifier: Option<Identifier>,
    pub authors: Vec<String>,
    pub contributors: Vec<String>,
    pub rights: Option<String>,
    pub date: Option<DateValue>,
    pub description: Option<String>,
    pub publisher: Option<String>,
}

impl Default for BookMetadata {
    fn default() -> Self {
        Self {
            title: "NoTitle".to_string(),
            language: "en".to_string(),
            identifier: None,
            authors: Vec::new(),
            contributors: Vec::new(),
            rights: None,
            date: None,
            description: None,
            publisher: None,
        }
    }
}

impl BookMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_identifier(mut self, value: impl Into<String>, scheme: impl Into<String>) -> Self {
        self.identifier = Some(Identifier {
            value: value.into(),
            scheme: scheme.into(),
        });
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn set_identifier(&mut self, value: impl Into<String>, scheme: impl Into<String>) {
        self.identifier = Some(Identifier {
            value: value.into(),
            scheme: scheme.into(),
        });
    }

    pub fn add_author(&mut self, author: impl Into<String>) {
        self.authors.push(author.into());
    }

    pub fn add_contributor(&mut self, contributor: impl Into<String>) {
        self.contributors.push(contributor.into());
    }

    pub fn set_rights(&mut self, rights: impl Into<String>) {
        self.rights = Some(rights.into());
    }

    pub fn set_date(&mut self, date: DateValue) {
        self.date = Some(date);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn set_publisher(&mut self, publisher: impl Into<String>) {
        self.publisher = Some(publisher.into());
    }

    /// Fill in a generated identifier (scheme `DOI`) when none was set.
    pub(crate) fn ensure_identifier(&mut self) {
        if self.identifier.is_none() {
            self.identifier = Some(Identifier {
                value: generate_identifier(),
                scheme: "DOI".to_string(),
            });
        }
    }
}
