//! Pulls the featured quote and image out of the resume markdown.
//!
//! Extraction is first-match pattern search, not document parsing: the first
//! quote and the first image anywhere in the text are taken, and both spans are
//! cut from the body.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A `>` line run, ended by a blank line or the end of the text.
    static ref QUOTE_RE: Regex = Regex::new(r"(?:^|\n)(>[\s\S]*?)(?:\n\n|$)").unwrap();
    static ref QUOTE_MARKER_RE: Regex = Regex::new(r"(?m)^>[ ]?").unwrap();
    static ref IMAGE_RE: Regex = Regex::new(r"!\[.*?\]\((.*?)\)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Featured {
    pub quote: Option<String>,
    pub image: Option<String>,
    pub body: String,
}

pub fn split_featured(markdown: &str) -> Featured {
    let quote_match = QUOTE_RE.captures(markdown);
    let quote = quote_match.as_ref().and_then(|caps| {
        let text = QUOTE_MARKER_RE.replace_all(&caps[1], "");
        let text = text.trim_end();
        (!text.is_empty()).then(|| text.to_string())
    });

    let image_match = IMAGE_RE.captures(markdown);
    let image = image_match
        .as_ref()
        .map(|caps| caps[1].trim().to_string())
        .filter(|url| !url.is_empty());

    let mut body = markdown.to_string();
    if let Some(caps) = &quote_match {
        // Leave a paragraph break so the text on either side does not merge.
        body = body.replacen(&caps[0], "\n\n", 1);
    }
    if let Some(caps) = &image_match {
        body = body.replacen(&caps[0], "", 1);
    }

    Featured {
        quote,
        image,
        body: body.trim().to_string(),
    }
}
