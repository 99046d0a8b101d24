//! Axum route handlers for the content API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::content::search::filter_posts;
use crate::content::{blog, resume, work};
use crate::errors::AppError;
use crate::models::content::{BlogPost, Document, FeaturedResume, ResumeDocument, WorkItem};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/blog/posts
///
/// Published posts, newest first. `?q=` narrows by title or tag.
pub async fn handle_list_posts(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<BlogPost>>, AppError> {
    let posts = blog::list_published(state.notion.as_ref(), &state.config.blog_database_id)
        .await
        .map_err(AppError::upstream("Failed to fetch posts"))?;

    Ok(Json(filter_posts(posts, params.q.as_deref().unwrap_or(""))))
}

/// GET /api/blog/posts/:slug
pub async fn handle_get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Document<BlogPost>>, AppError> {
    blog::get_post_by_slug(state.notion.as_ref(), &state.config.blog_database_id, &slug)
        .await
        .map_err(AppError::upstream("Failed to fetch post"))?
        .map(Json)
        .ok_or(AppError::NotFound("Post not found"))
}

/// GET /api/work/posts
pub async fn handle_list_work(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkItem>>, AppError> {
    let items = work::list_work(state.notion.as_ref(), &state.config.work_database_id)
        .await
        .map_err(AppError::upstream("Failed to fetch work items"))?;
    Ok(Json(items))
}

/// GET /api/work/posts/:slug
pub async fn handle_get_work(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Document<WorkItem>>, AppError> {
    work::get_work_by_slug(state.notion.as_ref(), &state.config.work_database_id, &slug)
        .await
        .map_err(AppError::upstream("Failed to fetch case study"))?
        .map(Json)
        .ok_or(AppError::NotFound("Case study not found"))
}

/// GET /api/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
) -> Result<Json<ResumeDocument>, AppError> {
    let resume = resume::fetch_resume(state.notion.as_ref(), &state.config.resume_page_id)
        .await
        .map_err(AppError::upstream("Failed to fetch resume"))?;
    Ok(Json(resume))
}

/// GET /api/resume/featured
///
/// The resume with its first quote and image lifted out for the featured row.
pub async fn handle_get_featured_resume(
    State(state): State<AppState>,
) -> Result<Json<FeaturedResume>, AppError> {
    let featured =
        resume::fetch_featured_resume(state.notion.as_ref(), &state.config.resume_page_id)
            .await
            .map_err(AppError::upstream("Failed to fetch resume"))?;
    Ok(Json(featured))
}
