use crate::models::content::BlogPost;

/// Keeps posts whose title or any tag contains `query`, case-insensitively.
/// A blank query keeps everything. Order is preserved.
pub fn filter_posts(posts: Vec<BlogPost>, query: &str) -> Vec<BlogPost> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return posts;
    }

    posts
        .into_iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&query)
                || post.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
        })
        .collect()
}
