//! Raw text from `.docx` files: `word/document.xml` inside the zip container,
//! run text only, one blank line after each paragraph.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::TextDecoder;

const DOCUMENT_PART: &str = "word/document.xml";

pub(super) struct WordDecoder;

impl TextDecoder for WordDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, String> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("not a Word document: {e}"))?;
        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| format!("missing {DOCUMENT_PART}: {e}"))?
            .read_to_string(&mut xml)
            .map_err(|e| format!("unreadable {DOCUMENT_PART}: {e}"))?;
        raw_text(&xml)
    }
}

fn raw_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut out = String::new();
    let mut paragraph = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                b"w:p" => {
                    out.push_str(&paragraph);
                    out.push_str("\n\n");
                    paragraph.clear();
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" if in_run => paragraph.push('\t'),
                b"w:br" | b"w:cr" if in_run => paragraph.push('\n'),
                b"w:p" => out.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| format!("bad text node: {e}"))?;
                paragraph.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed XML at byte {}: {e}",
                    reader.buffer_position()
                ))
            }
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
      <w:r><w:rPr><w:b/></w:rPr><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Rust</w:t><w:tab/><w:t>SQL &amp; ERP</w:t><w:br/><w:t>2019</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_raw_text_keeps_runs_and_drops_formatting() {
        let text = raw_text(BODY).unwrap();
        assert_eq!(text, "Jane Doe\n\n\n\nRust\tSQL & ERP\n2019\n\n");
    }

    #[test]
    fn test_legacy_binary_doc_is_rejected() {
        let ole_header = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0, 0, 0, 0];
        let err = WordDecoder.decode(&ole_header).unwrap_err();
        assert!(err.contains("not a Word document"));
    }
}
