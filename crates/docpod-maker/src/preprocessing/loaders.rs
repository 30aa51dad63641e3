//! Raw text extraction from local files and URLs.

use super::DocumentFormat;
use crate::error::{PodcastError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};

/// Raw text of a document together with the format it was read as.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub source: String,
    pub format: DocumentFormat,
    pub text: String,
}

impl LoadedDocument {
    /// Run the cleaner registered for this document's format.
    pub fn clean(&self) -> String {
        self.format.clean(&self.text)
    }
}

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load a local document or fetch a URL.
///
/// The format of a local file follows its extension; URL content is read as HTML.
pub async fn load_document(source: &str) -> Result<LoadedDocument> {
    let (format, text) = if is_url(source) {
        log::info!("Fetching {}", source);
        let bytes = fetch_url(source).await?;
        (DocumentFormat::Html, parse_text(&bytes)?)
    } else {
        let format = DocumentFormat::from_extension(source)
            .ok_or_else(|| PodcastError::UnsupportedFormat(source.to_string()))?;
        log::info!("Loading {}", source);
        let bytes = tokio::fs::read(source).await?;
        let text = match format {
            DocumentFormat::Pdf => tokio::task::spawn_blocking(move || parse_pdf(&bytes)).await??,
            DocumentFormat::Docx => {
                tokio::task::spawn_blocking(move || parse_docx(&bytes)).await??
            }
            DocumentFormat::Html | DocumentFormat::Markdown | DocumentFormat::Txt => {
                parse_text(&bytes)?
            }
        };
        (format, text)
    };

    log::debug!("Loaded {} characters from {}", text.chars().count(), source);
    Ok(LoadedDocument {
        source: source.to_string(),
        format,
        text,
    })
}

async fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(PodcastError::HttpStatus(url.to_string(), status, body));
    }
    Ok(response.bytes().await?.to_vec())
}

pub(crate) fn parse_text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| PodcastError::DocumentParse(format!("input is not valid UTF-8: {e}")))
}

pub(crate) fn parse_pdf(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PodcastError::DocumentParse(format!("PDF extraction failed: {e}")))
}

/// Paragraph text of `word/document.xml`, one paragraph per line.
pub(crate) fn parse_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| PodcastError::DocumentParse(format!("DOCX is not a zip archive: {e}")))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| PodcastError::DocumentParse(format!("DOCX has no document body: {e}")))?
        .read_to_string(&mut xml)?;
    docx_text(&xml)
}

fn docx_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(text)) if in_text => {
                current.push_str(&text.decode().map_err(parse_error)?);
            }
            Ok(Event::GeneralRef(entity)) if in_text => {
                let name = entity.decode().map_err(parse_error)?;
                match resolve_entity(&name) {
                    Some(resolved) => current.push_str(&resolved),
                    None => current.push_str(&format!("&{name};")),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(e)),
            _ => {}
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs.join("\n"))
}

fn parse_error(err: impl std::fmt::Display) -> PodcastError {
    PodcastError::DocumentParse(format!("DOCX XML: {err}"))
}

fn resolve_entity(name: &str) -> Option<String> {
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => {
            let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => name.strip_prefix('#')?.parse().ok()?,
            };
            return char::from_u32(code).map(String::from);
        }
    };
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Lost in the Stars</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Ships &amp; sails </w:t></w:r><w:r><w:t>at dawn</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn docx_paragraphs_become_lines() {
        let text = parse_docx(&docx_bytes(DOCUMENT_XML)).unwrap();
        assert_eq!(text, "Lost in the Stars\nShips & sails at dawn");
    }

    #[test]
    fn docx_without_body_is_rejected() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(
            parse_docx(&bytes),
            Err(PodcastError::DocumentParse(_))
        ));
    }

    #[test]
    fn garbage_docx_is_rejected() {
        assert!(matches!(
            parse_docx(b"not a zip"),
            Err(PodcastError::DocumentParse(_))
        ));
    }

    #[test]
    fn entities_resolve() {
        assert_eq!(resolve_entity("amp").as_deref(), Some("&"));
        assert_eq!(resolve_entity("#65").as_deref(), Some("A"));
        assert_eq!(resolve_entity("#x263A").as_deref(), Some("\u{263A}"));
        assert_eq!(resolve_entity("nbsp"), None);
    }

    #[tokio::test]
    async fn loads_markdown_file_with_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Notes\n![diagram](d.png) Plain words").unwrap();

        let document = load_document(path.to_str().unwrap()).await.unwrap();
        assert_eq!(document.format, DocumentFormat::Markdown);
        assert!(document.text.starts_with("# Notes"));
        assert_eq!(document.clean(), "Notes Plain words");
    }

    #[tokio::test]
    async fn loads_docx_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("story.docx");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&docx_bytes(DOCUMENT_XML)).unwrap();
        drop(file);

        let document = load_document(path.to_str().unwrap()).await.unwrap();
        assert_eq!(document.format, DocumentFormat::Docx);
        assert_eq!(document.clean(), "Lost in the Stars Ships & sails at dawn");
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected() {
        let err = load_document("slides.pptx").await.unwrap_err();
        assert!(matches!(err, PodcastError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load_document(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, PodcastError::Io(_)));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn loads_url_as_html() {
        let document = load_document("https://example.com").await.unwrap();
        assert_eq!(document.format, DocumentFormat::Html);
        assert!(document.clean().contains("Example Domain"));
    }
}
