//! In-memory `NotionApi` backend and JSON fixture builders for tests.
//!
//! Filters are evaluated against the stored pages; sorts are ignored, so
//! databases return pages in insertion order. Queries skip archived and
//! trashed rows, which stay reachable through `retrieve_page`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::models::{plain_text, same_id, Block, Page, PropertyValue};
use super::query::{Condition, DatabaseQuery, Filter};
use super::{NotionApi, NotionError};

#[derive(Default)]
pub struct MemoryNotion {
    databases: HashMap<String, Vec<Page>>,
    pages: HashMap<String, Page>,
    children: HashMap<String, Vec<Block>>,
    failing: bool,
}

impl MemoryNotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rows to a database. Each row's parent is set to the database.
    pub fn with_database(mut self, database_id: &str, pages: Vec<Value>) -> Self {
        let rows = pages
            .into_iter()
            .map(|mut p| {
                p["parent"] = json!({ "type": "database_id", "database_id": database_id });
                serde_json::from_value::<Page>(p).unwrap()
            })
            .collect();
        self.databases.insert(database_id.to_string(), rows);
        self
    }

    /// Adds a standalone page.
    pub fn with_page(mut self, page: Value) -> Self {
        let page: Page = serde_json::from_value(page).unwrap();
        self.pages.insert(page.id.clone(), page);
        self
    }

    pub fn with_children(mut self, parent_id: &str, blocks: Vec<Value>) -> Self {
        let blocks = blocks
            .into_iter()
            .map(|b| serde_json::from_value::<Block>(b).unwrap())
            .collect();
        self.children.insert(parent_id.to_string(), blocks);
        self
    }

    /// Makes every call fail with a 502 API error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn check(&self) -> Result<(), NotionError> {
        if self.failing {
            return Err(NotionError::Api {
                status: 502,
                code: "service_unavailable".to_string(),
                message: "upstream down".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(id: &str) -> NotionError {
    NotionError::Api {
        status: 404,
        code: "object_not_found".to_string(),
        message: format!("Could not find object with ID: {id}"),
    }
}

fn matches(page: &Page, filter: &Filter) -> bool {
    match filter {
        Filter::And { and } => and.iter().all(|f| matches(page, f)),
        Filter::Property {
            property,
            condition,
        } => match (condition, page.property(property)) {
            (Condition::Status(eq), Some(PropertyValue::Status { status: Some(s) })) => {
                s.name == eq.equals
            }
            (Condition::RichText(eq), Some(PropertyValue::RichText { rich_text })) => {
                plain_text(&rich_text) == eq.equals
            }
            _ => false,
        },
    }
}

#[async_trait]
impl NotionApi for MemoryNotion {
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<Vec<Page>, NotionError> {
        self.check()?;
        let rows = self.databases.get(database_id).ok_or_else(|| not_found(database_id))?;
        Ok(rows
            .iter()
            .filter(|p| !p.is_deleted())
            .filter(|p| query.filter.as_ref().map_or(true, |f| matches(p, f)))
            .cloned()
            .collect())
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<Page, NotionError> {
        self.check()?;
        self.pages
            .values()
            .chain(self.databases.values().flatten())
            .find(|p| same_id(&p.id, page_id))
            .cloned()
            .ok_or_else(|| not_found(page_id))
    }

    async fn block_children(&self, block_id: &str) -> Result<Vec<Block>, NotionError> {
        self.check()?;
        Ok(self.children.get(block_id).cloned().unwrap_or_default())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fixtures
// ────────────────────────────────────────────────────────────────────────────

fn segments(text: &str) -> Value {
    json!([{ "type": "text", "plain_text": text, "annotations": {} }])
}

pub fn title(text: &str) -> Value {
    json!({ "type": "title", "title": segments(text) })
}

pub fn rich_text(text: &str) -> Value {
    json!({ "type": "rich_text", "rich_text": segments(text) })
}

pub fn status(name: &str) -> Value {
    json!({ "type": "status", "status": { "name": name } })
}

pub fn date(start: &str) -> Value {
    json!({ "type": "date", "date": { "start": start, "end": null } })
}

pub fn tags(names: &[&str]) -> Value {
    let options: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
    json!({ "type": "multi_select", "multi_select": options })
}

pub fn external_file(url: &str) -> Value {
    json!({ "type": "files", "files": [{ "name": "f", "type": "external", "external": { "url": url } }] })
}

pub fn hosted_file(url: &str) -> Value {
    json!({ "type": "files", "files": [{ "name": "f", "type": "file", "file": { "url": url } }] })
}

/// A page with the given id and properties.
pub fn page(id: &str, properties: Vec<(&str, Value)>) -> Value {
    let props: Map<String, Value> = properties
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    json!({
        "object": "page",
        "id": id,
        "created_time": "2023-05-06T07:08:00.000Z",
        "cover": null,
        "properties": props
    })
}

/// A block with an arbitrary payload.
pub fn block(id: &str, kind: &str, has_children: bool, payload: Value) -> Value {
    let mut b = json!({ "object": "block", "id": id, "type": kind, "has_children": has_children });
    b[kind] = payload;
    b
}

/// A block whose payload is just a plain rich-text run.
pub fn text_block(id: &str, kind: &str, text: &str) -> Value {
    block(id, kind, false, json!({ "rich_text": segments(text) }))
}
