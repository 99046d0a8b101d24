use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::markdown::blocks::{render_blocks, BlockNode};
use crate::notion::{NotionApi, NotionError};

/// Block types whose children belong to another document.
const NO_DESCENT: &[&str] = &["child_page", "child_database"];

type TreeFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<BlockNode>, NotionError>> + Send + 'a>>;

/// Fetches the full block tree under `parent_id`, depth first.
pub fn fetch_tree<'a>(notion: &'a dyn NotionApi, parent_id: &'a str) -> TreeFuture<'a> {
    Box::pin(async move {
        let blocks = notion.block_children(parent_id).await?;
        let mut nodes = Vec::with_capacity(blocks.len());

        for block in blocks {
            let children = if block.has_children && !NO_DESCENT.contains(&block.kind.as_str()) {
                fetch_tree(notion, &block.id).await?
            } else {
                Vec::new()
            };
            nodes.push(BlockNode { block, children });
        }

        Ok(nodes)
    })
}

/// Projects a page's content to one markdown string.
pub async fn page_markdown(notion: &dyn NotionApi, page_id: &str) -> Result<String, NotionError> {
    let tree = fetch_tree(notion, page_id).await?;
    let markdown = render_blocks(&tree);
    debug!("Projected page {page_id}: {} top-level blocks, {} bytes", tree.len(), markdown.len());
    Ok(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::memory::{block, text_block, MemoryNotion};
    use serde_json::json;

    #[tokio::test]
    async fn test_page_markdown_expands_columns() {
        let notion = MemoryNotion::new()
            .with_children(
                "page",
                vec![
                    text_block("h", "heading_2", "About"),
                    block("cl", "column_list", true, json!({})),
                ],
            )
            .with_children(
                "cl",
                vec![
                    block("c1", "column", true, json!({})),
                    block("c2", "column", true, json!({})),
                ],
            )
            .with_children("c1", vec![text_block("p1", "paragraph", "Left")])
            .with_children("c2", vec![text_block("p2", "paragraph", "Right")]);

        let md = page_markdown(&notion, "page").await.unwrap();
        assert!(md.starts_with("## About\n\n<div class=\"notion-column-list"));
        assert_eq!(md.matches("<div class=\"notion-column flex-1").count(), 2);
        assert!(md.contains("<p>Left</p>"));
        assert!(md.contains("<p>Right</p>"));
    }

    #[tokio::test]
    async fn test_nested_list_children_are_fetched() {
        let notion = MemoryNotion::new()
            .with_children(
                "page",
                vec![block(
                    "li",
                    "bulleted_list_item",
                    true,
                    json!({ "rich_text": [{ "plain_text": "parent" }] }),
                )],
            )
            .with_children("li", vec![text_block("c", "bulleted_list_item", "child")]);

        assert_eq!(
            page_markdown(&notion, "page").await.unwrap(),
            "- parent\n  - child"
        );
    }

    #[tokio::test]
    async fn test_child_pages_are_not_descended() {
        let notion = MemoryNotion::new()
            .with_children(
                "page",
                vec![block("sub", "child_page", true, json!({ "title": "Sub" }))],
            )
            .with_children("sub", vec![text_block("x", "paragraph", "private")]);

        let md = page_markdown(&notion, "page").await.unwrap();
        assert!(!md.contains("private"));
    }

    #[tokio::test]
    async fn test_empty_page_projects_to_empty_string() {
        let notion = MemoryNotion::new();
        assert_eq!(page_markdown(&notion, "nothing").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let notion = MemoryNotion::new().failing();
        assert!(page_markdown(&notion, "page").await.is_err());
    }
}
