//! Maps Notion pages onto the site's display records.
//!
//! Each field resolves through an ordered list of candidate properties and a
//! final default. Missing or malformed properties never fail normalization.

use crate::content::fields::{
    cover_url, date_start, file_url, first_of, multi_select, rich_text, title_text,
};
use crate::models::content::{BlogPost, WorkItem};
use crate::notion::models::Page;

pub const BLOG_TITLE: &[&str] = &["Title", "Name"];
pub const WORK_TITLE: &[&str] = &["Title", "Name"];
/// `title` is the implicit title property of a page outside any database.
pub const RESUME_TITLE: &[&str] = &["Name", "Title", "title"];
pub const BLOG_COVER: &[&str] = &["coverImage", "CoverImage", "Cover", "CoverImageUrl"];
pub const WORK_IMAGE: &[&str] = &["Image", "Cover"];

pub const SLUG: &str = "Slug";
pub const DATE: &str = "Date";
pub const TAGS: &str = "Tags";
pub const STATUS: &str = "Status";
pub const PUBLISHED: &str = "Published";

const UNTITLED: &str = "Untitled";
const RESUME: &str = "Resume";

/// Explicit slug, if the page has one.
pub fn explicit_slug(page: &Page) -> Option<String> {
    rich_text(page, SLUG)
}

/// Slug, falling back to the page id. An id-slug is an opaque token.
pub fn slug(page: &Page) -> String {
    explicit_slug(page).unwrap_or_else(|| page.id.clone())
}

pub fn tags(page: &Page) -> Vec<String> {
    multi_select(page, TAGS).unwrap_or_default()
}

fn image(page: &Page, candidates: &[&str]) -> Option<String> {
    first_of(candidates, |n| file_url(page, n)).or_else(|| cover_url(page))
}

pub fn blog_post(page: &Page) -> BlogPost {
    BlogPost {
        id: page.id.clone(),
        title: first_of(BLOG_TITLE, |n| title_text(page, n)).unwrap_or_else(|| UNTITLED.to_string()),
        slug: slug(page),
        date: date_start(page, DATE).unwrap_or_else(|| page.created_time.clone()),
        tags: tags(page),
        cover_image: image(page, BLOG_COVER),
        summary: rich_text(page, "Summary"),
        read_time: rich_text(page, "ReadTime"),
    }
}

pub fn work_item(page: &Page) -> WorkItem {
    WorkItem {
        id: page.id.clone(),
        title: first_of(WORK_TITLE, |n| title_text(page, n)).unwrap_or_else(|| UNTITLED.to_string()),
        subtitle: rich_text(page, "Subtitle"),
        tags: tags(page),
        slug: slug(page),
        image: image(page, WORK_IMAGE),
    }
}

pub fn resume_title(page: &Page) -> String {
    first_of(RESUME_TITLE, |n| title_text(page, n)).unwrap_or_else(|| RESUME.to_string())
}
