//! Markdown-like text → `.docx` export.
//!
//! Only line prefixes are interpreted: `# ` and `## ` become headings, `- `
//! becomes a bullet paragraph; every other line is a plain paragraph.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to build document: {0}")]
    Pack(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading1(String),
    Heading2(String),
    Bullet(String),
    Plain(String),
}

pub fn parse_blocks(text: &str) -> Vec<Block> {
    text.split('\n')
        .map(|line| {
            if line.starts_with("# ") {
                Block::Heading1(line[1..].trim_start().to_string())
            } else if line.starts_with("## ") {
                Block::Heading2(line[2..].trim_start().to_string())
            } else if let Some(rest) = line.strip_prefix("- ") {
                Block::Bullet(format!("• {rest}"))
            } else {
                Block::Plain(line.to_string())
            }
        })
        .collect()
}

fn paragraph(block: &Block) -> Paragraph {
    let (text, style) = match block {
        Block::Heading1(t) => (t, Some("Heading1")),
        Block::Heading2(t) => (t, Some("Heading2")),
        Block::Bullet(t) | Block::Plain(t) => (t, None),
    };
    let p = Paragraph::new().add_run(Run::new().add_text(text));
    match style {
        Some(id) => p.style(id),
        None => p,
    }
}

/// Renders `text` as a Word document and returns its bytes.
pub fn render_docx(text: &str) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .bold()
                .size(32),
        )
        .add_style(
            Style::new("Heading2", StyleType::Paragraph)
                .name("Heading 2")
                .bold()
                .size(26),
        );
    for block in parse_blocks(text) {
        docx = docx.add_paragraph(paragraph(&block));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Pack(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Writes `text` as `dir/file_name` and returns the full path.
pub fn export_docx(dir: &Path, file_name: &str, text: &str) -> Result<PathBuf, ExportError> {
    let path = dir.join(file_name);
    let bytes = render_docx(text)?;
    std::fs::create_dir_all(dir)
        .and_then(|_| std::fs::write(&path, bytes))
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_bytes;

    #[test]
    fn test_line_prefixes_map_to_blocks() {
        let blocks = parse_blocks("# Jane Doe\n## Experience\n- Led ERP rollout\nPlain line\n#NoSpace");
        assert_eq!(
            blocks,
            vec![
                Block::Heading1("Jane Doe".to_string()),
                Block::Heading2("Experience".to_string()),
                Block::Bullet("• Led ERP rollout".to_string()),
                Block::Plain("Plain line".to_string()),
                Block::Plain("#NoSpace".to_string()),
            ]
        );
    }

    #[test]
    fn test_exported_docx_extracts_back_to_text() {
        let bytes = render_docx("# Jane Doe\n- Rust").unwrap();
        let text = extract_bytes("Tailored_Resume.docx", &bytes).unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("• Rust"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_docx(dir.path(), "Cover_Letter.docx", "Dear team,").unwrap();
        assert!(path.ends_with("Cover_Letter.docx"));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
