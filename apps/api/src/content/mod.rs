// Content layer: turns CMS pages into the site's display records.
// All CMS access goes through the `NotionApi` trait.

pub mod blog;
pub mod fields;
pub mod handlers;
pub mod normalize;
pub mod resume;
pub mod search;
pub mod work;

use crate::content::normalize::explicit_slug;
use crate::notion::models::{is_notion_id, same_id, Page};
use crate::notion::{NotionApi, NotionError};

/// Resolves a slug that is really a page id (the fallback slug of a page with
/// no explicit Slug). The page must live in `database_id`, must not be
/// archived or trashed, must have no explicit slug, and must pass `eligible`.
pub(crate) async fn find_by_id_slug(
    notion: &dyn NotionApi,
    database_id: &str,
    slug: &str,
    eligible: fn(&Page) -> bool,
) -> Result<Option<Page>, NotionError> {
    if !is_notion_id(slug) {
        return Ok(None);
    }

    let page = match notion.retrieve_page(slug).await {
        Ok(page) => page,
        Err(e) if e.is_not_found() => return Ok(None),
        Err(e) => return Err(e),
    };

    let in_database = page
        .database_id()
        .is_some_and(|id| same_id(id, database_id));

    let listed = in_database && !page.is_deleted();
    Ok((listed && explicit_slug(&page).is_none() && eligible(&page)).then_some(page))
}
