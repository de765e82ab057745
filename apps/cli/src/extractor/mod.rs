//! Uploaded CV or job description → plain text.
//!
//! The format comes from the file extension and is checked before any bytes
//! are read. Decoders are built on first use and shared for the rest of the
//! process.

mod pdf;
mod word;

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type '{name}'. Please upload PDF, DOCX, or TXT.")]
    UnsupportedFormat { name: String },

    #[error("Failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {format} document: {message}")]
    Decode {
        format: DocumentFormat,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    PlainText,
    Word,
    Pdf,
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DocumentFormat::PlainText => "text",
            DocumentFormat::Word => "Word",
            DocumentFormat::Pdf => "PDF",
        };
        f.write_str(label)
    }
}

impl DocumentFormat {
    /// Picks the format from a file name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self, ExtractError> {
        let lower = name.to_lowercase();
        if lower.ends_with(".txt") {
            Ok(DocumentFormat::PlainText)
        } else if lower.ends_with(".docx") || lower.ends_with(".doc") {
            Ok(DocumentFormat::Word)
        } else if lower.ends_with(".pdf") {
            Ok(DocumentFormat::Pdf)
        } else {
            Err(ExtractError::UnsupportedFormat {
                name: name.to_string(),
            })
        }
    }
}

trait TextDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<String, String>;
}

struct PlainTextDecoder;

impl TextDecoder for PlainTextDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

struct Decoders {
    by_format: HashMap<DocumentFormat, Box<dyn TextDecoder>>,
}

impl Decoders {
    fn load() -> Self {
        info!("Loading document decoders");
        let mut by_format: HashMap<DocumentFormat, Box<dyn TextDecoder>> = HashMap::new();
        by_format.insert(DocumentFormat::PlainText, Box::new(PlainTextDecoder));
        by_format.insert(DocumentFormat::Word, Box::new(word::WordDecoder));
        by_format.insert(DocumentFormat::Pdf, Box::new(pdf::PdfDecoder));
        Self { by_format }
    }

    fn decode(&self, format: DocumentFormat, bytes: &[u8]) -> Result<String, ExtractError> {
        let decoder = self
            .by_format
            .get(&format)
            .ok_or_else(|| ExtractError::Decode {
                format,
                message: "no decoder registered".to_string(),
            })?;
        decoder
            .decode(bytes)
            .map_err(|message| ExtractError::Decode { format, message })
    }
}

static DECODERS: OnceCell<Decoders> = OnceCell::new();

fn decoders() -> &'static Decoders {
    DECODERS.get_or_init(Decoders::load)
}

/// Decodes an in-memory document named `name`.
pub fn extract_bytes(name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_name(name)?;
    decoders().decode(format, bytes)
}

/// Reads and decodes the file at `path`. Unsupported extensions are
/// rejected without opening the file.
pub async fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let format = DocumentFormat::from_name(&name)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ExtractError::Io {
            name: name.clone(),
            source,
        })?;
    debug!(file = %name, %format, bytes = bytes.len(), "Decoding document");

    tokio::task::spawn_blocking(move || extract_bytes(&name, &bytes))
        .await
        .map_err(|e| ExtractError::Decode {
            format,
            message: format!("decoder aborted: {e}"),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_name("cv.TXT").unwrap(), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_name("CV.Docx").unwrap(), DocumentFormat::Word);
        assert_eq!(DocumentFormat::from_name("old.doc").unwrap(), DocumentFormat::Word);
        assert_eq!(DocumentFormat::from_name("jd.pdf").unwrap(), DocumentFormat::Pdf);
    }

    #[tokio::test]
    async fn test_unsupported_extension_rejected_without_reading() {
        // The file does not exist: reaching the read would give an Io error.
        let err = extract_text(Path::new("/nonexistent/notes.xyz")).await.unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat { .. }));
        let message = err.to_string();
        for ext in ["PDF", "DOCX", "TXT"] {
            assert!(message.contains(ext), "{message}");
        }
    }

    #[test]
    fn test_plain_text_is_verbatim() {
        let text = "Jane Doe\n\n  - Led ERP rollout\t(2019)\n";
        assert_eq!(extract_bytes("cv.txt", text.as_bytes()).unwrap(), text);
    }

    #[test]
    fn test_decoders_initialised_once() {
        assert!(std::ptr::eq(decoders(), decoders()));
    }

    #[tokio::test]
    async fn test_extract_text_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "Senior ERP Manager").unwrap();
        assert_eq!(extract_text(&path).await.unwrap(), "Senior ERP Manager");
    }

    #[tokio::test]
    async fn test_missing_supported_file_is_io_error() {
        let err = extract_text(Path::new("/nonexistent/cv.pdf")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();
        let err = extract_text(&path).await.unwrap_err();
        assert!(matches!(err, ExtractError::Decode { format: DocumentFormat::Pdf, .. }));
    }
}
