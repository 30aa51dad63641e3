//! Document loading and cleaning.

pub mod cleaners;
pub mod loaders;

pub use cleaners::{clean_html, clean_markdown, clean_with_regex, markdown_to_text};
pub use loaders::{LoadedDocument, is_url, load_document};

use std::path::Path;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Html,
    Markdown,
    Txt,
}

impl DocumentFormat {
    /// Detect format from file extension. Returns None for unsupported formats.
    pub fn from_extension(path: &str) -> Option<Self> {
        // Strip query params for URLs
        let clean_path = path.split('?').next().unwrap_or(path);

        let ext = Path::new(clean_path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())?;

        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "html" | "htm" => Some(Self::Html),
            "md" | "markdown" => Some(Self::Markdown),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Txt => "txt",
        }
    }

    /// Cleaner matching the format's raw text.
    pub fn cleaner(&self) -> fn(&str) -> String {
        match self {
            Self::Pdf | Self::Docx => markdown_to_text,
            Self::Html => clean_html,
            Self::Markdown => clean_markdown,
            Self::Txt => clean_with_regex,
        }
    }

    pub fn clean(&self, raw: &str) -> String {
        (self.cleaner())(raw)
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `source` names something `load_document` can read.
pub fn is_supported_source(source: &str) -> bool {
    is_url(source) || DocumentFormat::from_extension(source).is_some()
}
