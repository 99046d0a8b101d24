//! Work (case study) source. Every row is live; there is no status column.

use tracing::debug;

use crate::content::find_by_id_slug;
use crate::content::normalize::{work_item, SLUG};
use crate::markdown::projection::page_markdown;
use crate::models::content::{Document, WorkItem};
use crate::notion::query::{DatabaseQuery, Filter};
use crate::notion::{NotionApi, NotionError};

/// All work items in CMS order.
pub async fn list_work(
    notion: &dyn NotionApi,
    database_id: &str,
) -> Result<Vec<WorkItem>, NotionError> {
    let pages = notion.query_database(database_id, &DatabaseQuery::all()).await?;
    let items: Vec<WorkItem> = pages.iter().map(work_item).collect();
    debug!("Listed {} work items", items.len());
    Ok(items)
}

pub async fn get_work_by_slug(
    notion: &dyn NotionApi,
    database_id: &str,
    slug: &str,
) -> Result<Option<Document<WorkItem>>, NotionError> {
    let query = DatabaseQuery::filtered(Filter::rich_text_equals(SLUG, slug));

    let page = match notion.query_database(database_id, &query).await?.into_iter().next() {
        Some(page) => Some(page),
        None => find_by_id_slug(notion, database_id, slug, |_| true).await?,
    };
    let Some(page) = page else {
        debug!("No case study with slug {slug}");
        return Ok(None);
    };

    let markdown = page_markdown(notion, &page.id).await?;
    Ok(Some(Document {
        meta: work_item(&page),
        markdown,
    }))
}
