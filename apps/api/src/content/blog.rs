//! Blog source: published listing and lookup by slug.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::content::fields::status;
use crate::content::find_by_id_slug;
use crate::content::normalize::{blog_post, DATE, PUBLISHED, SLUG, STATUS};
use crate::markdown::projection::page_markdown;
use crate::models::content::{BlogPost, Document};
use crate::notion::models::Page;
use crate::notion::query::{DatabaseQuery, Direction, Filter};
use crate::notion::{NotionApi, NotionError};

pub fn is_published(page: &Page) -> bool {
    status(page, STATUS).as_deref() == Some(PUBLISHED)
}

/// Sort key for a post date: RFC 3339 date-time or bare `YYYY-MM-DD`.
fn date_key(date: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(date)
        .map(|d| d.naive_utc())
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// All published posts, newest first. Posts with unparseable dates go last.
pub async fn list_published(
    notion: &dyn NotionApi,
    database_id: &str,
) -> Result<Vec<BlogPost>, NotionError> {
    let query = DatabaseQuery::filtered(Filter::status_equals(STATUS, PUBLISHED))
        .sorted_by(DATE, Direction::Descending);
    let pages = notion.query_database(database_id, &query).await?;

    let mut posts: Vec<BlogPost> = pages
        .iter()
        .filter(|p| is_published(p))
        .map(blog_post)
        .collect();
    posts.sort_by(|a, b| date_key(&b.date).cmp(&date_key(&a.date)));

    debug!("Listed {} published posts", posts.len());
    Ok(posts)
}

/// The first published post whose Slug equals `slug`, with its body.
pub async fn get_post_by_slug(
    notion: &dyn NotionApi,
    database_id: &str,
    slug: &str,
) -> Result<Option<Document<BlogPost>>, NotionError> {
    let query = DatabaseQuery::filtered(Filter::and(vec![
        Filter::status_equals(STATUS, PUBLISHED),
        Filter::rich_text_equals(SLUG, slug),
    ]));

    let page = match notion.query_database(database_id, &query).await?.into_iter().next() {
        Some(page) => Some(page),
        None => find_by_id_slug(notion, database_id, slug, is_published).await?,
    };
    let Some(page) = page else {
        debug!("No published post with slug {slug}");
        return Ok(None);
    };

    let markdown = page_markdown(notion, &page.id).await?;
    Ok(Some(Document {
        meta: blog_post(&page),
        markdown,
    }))
}
