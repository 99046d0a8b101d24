pub mod health;

use axum::{routing::get, Router};

use crate::content::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Blog
        .route("/api/blog/posts", get(handlers::handle_list_posts))
        .route("/api/blog/posts/:slug", get(handlers::handle_get_post))
        // Work
        .route("/api/work/posts", get(handlers::handle_list_work))
        .route("/api/work/posts/:slug", get(handlers::handle_get_work))
        // Resume
        .route("/api/resume", get(handlers::handle_get_resume))
        .route("/api/resume/featured", get(handlers::handle_get_featured_resume))
        .with_state(state)
}
