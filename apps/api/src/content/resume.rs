use crate::content::normalize::resume_title;
use crate::markdown::featured::split_featured;
use crate::markdown::projection::page_markdown;
use crate::models::content::{FeaturedResume, ResumeDocument};
use crate::notion::{NotionApi, NotionError};

/// Fetches the singleton resume page and projects its body.
pub async fn fetch_resume(
    notion: &dyn NotionApi,
    page_id: &str,
) -> Result<ResumeDocument, NotionError> {
    let page = notion.retrieve_page(page_id).await?;
    let markdown = page_markdown(notion, page_id).await?;
    Ok(ResumeDocument {
        title: resume_title(&page),
        markdown,
    })
}

/// The resume with its leading quote and image split out for the featured row.
pub async fn fetch_featured_resume(
    notion: &dyn NotionApi,
    page_id: &str,
) -> Result<FeaturedResume, NotionError> {
    let resume = fetch_resume(notion, page_id).await?;
    let featured = split_featured(&resume.markdown);
    Ok(FeaturedResume {
        title: resume.title,
        quote: featured.quote,
        image: featured.image,
        body: featured.body,
    })
}
