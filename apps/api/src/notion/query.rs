//! Database query model, serialized in the shape the Notion API expects.

use serde::Serialize;

/// A database filter: a single property condition or a compound `and`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Filter {
    And {
        and: Vec<Filter>,
    },
    Property {
        property: String,
        #[serde(flatten)]
        condition: Condition,
    },
}

/// Condition keyed by the property type, e.g. `{"status": {"equals": "Published"}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Status(Equals),
    RichText(Equals),
}

#[derive(Debug, Clone, Serialize)]
pub struct Equals {
    pub equals: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[allow(dead_code)]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
}

impl Filter {
    pub fn status_equals(property: &str, value: &str) -> Self {
        Filter::Property {
            property: property.to_string(),
            condition: Condition::Status(Equals {
                equals: value.to_string(),
            }),
        }
    }

    pub fn rich_text_equals(property: &str, value: &str) -> Self {
        Filter::Property {
            property: property.to_string(),
            condition: Condition::RichText(Equals {
                equals: value.to_string(),
            }),
        }
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And { and: filters }
    }
}

impl DatabaseQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filtered(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            sorts: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, property: &str, direction: Direction) -> Self {
        self.sorts.push(Sort {
            property: property.to_string(),
            direction,
        });
        self
    }
}
