//! Typed property accessors and the fallback-chain combinator.
//!
//! Every accessor returns `None` for a property that is absent, of another
//! type, or empty, so chains fall through to the next candidate.

use crate::notion::models::{plain_text, Page, PropertyValue};

/// Tries each candidate name in order; the first accessor hit wins.
pub fn first_of<T>(names: &[&str], accessor: impl Fn(&str) -> Option<T>) -> Option<T> {
    names.iter().find_map(|&name| accessor(name))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

pub fn title_text(page: &Page, name: &str) -> Option<String> {
    match page.property(name)? {
        PropertyValue::Title { title } => non_empty(plain_text(&title)),
        _ => None,
    }
}

pub fn rich_text(page: &Page, name: &str) -> Option<String> {
    match page.property(name)? {
        PropertyValue::RichText { rich_text } => non_empty(plain_text(&rich_text)),
        _ => None,
    }
}

pub fn date_start(page: &Page, name: &str) -> Option<String> {
    match page.property(name)? {
        PropertyValue::Date { date: Some(d) } => non_empty(d.start),
        _ => None,
    }
}

/// Status label, also accepting a plain select used as a status column.
pub fn status(page: &Page, name: &str) -> Option<String> {
    match page.property(name)? {
        PropertyValue::Status { status: Some(s) } | PropertyValue::Select { select: Some(s) } => {
            non_empty(s.name)
        }
        _ => None,
    }
}

pub fn multi_select(page: &Page, name: &str) -> Option<Vec<String>> {
    match page.property(name)? {
        PropertyValue::MultiSelect { multi_select } => {
            Some(multi_select.into_iter().map(|o| o.name).collect())
        }
        _ => None,
    }
}

/// URL held by a file-valued property (its first file) or a url property.
pub fn file_url(page: &Page, name: &str) -> Option<String> {
    match page.property(name)? {
        PropertyValue::Files { files } => files.first()?.url().map(str::to_string),
        PropertyValue::Url { url } => url.and_then(non_empty),
        _ => None,
    }
}

/// Page-level cover image URL.
pub fn cover_url(page: &Page) -> Option<String> {
    page.cover.as_ref()?.url().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::memory::{
        date, external_file, hosted_file, page, rich_text as rt, status as st, tags, title,
    };
    use serde_json::json;

    fn parse(v: serde_json::Value) -> Page {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_first_of_takes_first_hit_in_order() {
        let p = parse(page(
            "p1",
            vec![("Name", title("From Name")), ("Title", title("From Title"))],
        ));
        assert_eq!(
            first_of(&["Title", "Name"], |n| title_text(&p, n)),
            Some("From Title".to_string())
        );
        assert_eq!(
            first_of(&["Name", "Title"], |n| title_text(&p, n)),
            Some("From Name".to_string())
        );
    }

    #[test]
    fn test_empty_title_falls_through() {
        let p = parse(page("p1", vec![("Title", title("")), ("Name", title("Named"))]));
        assert_eq!(
            first_of(&["Title", "Name"], |n| title_text(&p, n)),
            Some("Named".to_string())
        );
    }

    #[test]
    fn test_wrong_property_type_is_absent() {
        let p = parse(page("p1", vec![("Title", rt("not a title"))]));
        assert_eq!(title_text(&p, "Title"), None);
        assert_eq!(rich_text(&p, "Title"), Some("not a title".to_string()));
    }

    #[test]
    fn test_rich_text_joins_segments() {
        let p = parse(page(
            "p1",
            vec![(
                "Summary",
                json!({ "type": "rich_text", "rich_text": [
                    { "plain_text": "Hello " },
                    { "plain_text": "world" }
                ]}),
            )],
        ));
        assert_eq!(rich_text(&p, "Summary"), Some("Hello world".to_string()));
    }

    #[test]
    fn test_date_and_status() {
        let p = parse(page("p1", vec![("Date", date("2024-01-01")), ("Status", st("Published"))]));
        assert_eq!(date_start(&p, "Date"), Some("2024-01-01".to_string()));
        assert_eq!(status(&p, "Status"), Some("Published".to_string()));
        assert_eq!(date_start(&p, "Missing"), None);
    }

    #[test]
    fn test_empty_date_is_absent() {
        let p = parse(page("p1", vec![("Date", json!({ "type": "date", "date": null }))]));
        assert_eq!(date_start(&p, "Date"), None);
    }

    #[test]
    fn test_multi_select_keeps_order() {
        let p = parse(page("p1", vec![("Tags", tags(&["rust", "axum", "notion"]))]));
        assert_eq!(
            multi_select(&p, "Tags"),
            Some(vec!["rust".to_string(), "axum".to_string(), "notion".to_string()])
        );
    }

    #[test]
    fn test_file_url_external_and_hosted() {
        let p = parse(page(
            "p1",
            vec![
                ("A", external_file("https://cdn/a.png")),
                ("B", hosted_file("https://s3/b.png")),
                ("C", json!({ "type": "files", "files": [] })),
                ("D", json!({ "type": "url", "url": "https://img/d.png" })),
            ],
        ));
        assert_eq!(file_url(&p, "A"), Some("https://cdn/a.png".to_string()));
        assert_eq!(file_url(&p, "B"), Some("https://s3/b.png".to_string()));
        assert_eq!(file_url(&p, "C"), None);
        assert_eq!(file_url(&p, "D"), Some("https://img/d.png".to_string()));
    }

    #[test]
    fn test_cover_url_prefers_external() {
        let mut v = page("p1", vec![]);
        v["cover"] = json!({
            "type": "external",
            "external": { "url": "https://cdn/cover.png" },
            "file": { "url": "https://s3/cover.png" }
        });
        assert_eq!(cover_url(&parse(v)), Some("https://cdn/cover.png".to_string()));
        assert_eq!(cover_url(&parse(page("p2", vec![]))), None);
    }
}
