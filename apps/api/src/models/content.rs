use serde::{Deserialize, Serialize};

/// A published blog post as listed on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// ISO date or date-time string.
    pub date: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub summary: Option<String>,
    pub read_time: Option<String>,
}

/// A case study in the work section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub tags: Vec<String>,
    pub slug: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub title: String,
    pub markdown: String,
}

/// One full record: listing metadata plus the projected page body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<M> {
    pub meta: M,
    pub markdown: String,
}

/// The resume split into its featured quote/image and the remaining body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedResume {
    pub title: String,
    pub quote: Option<String>,
    pub image: Option<String>,
    pub body: String,
}
