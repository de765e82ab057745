use super::TextDecoder;

/// Page-ordered PDF text: whitespace runs inside a page collapse to single
/// spaces and each page ends with a newline.
pub(super) struct PdfDecoder;

impl TextDecoder for PdfDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| e.to_string())?;
        Ok(join_pages(&pages))
    }
}

fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        let items: Vec<&str> = page.as_ref().split_whitespace().collect();
        text.push_str(&items.join(" "));
        text.push('\n');
    }
    text
}
