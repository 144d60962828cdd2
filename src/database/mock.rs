//! In-memory stand-in for the product database.
//!
//! Every operation succeeds and answers with canned rows shaped like the real
//! persistence layer's output. Nothing is stored between calls.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{Database, Executor, QueryKind, QueryResult, Row, TransactionClient};
use crate::error::ApiError;

pub const MOCK_PRODUCT_ID: &str = "uuid-123";
pub const MOCK_SECTION_ID: &str = "section-uuid-123";
pub const MOCK_PRODUCT_NAME: &str = "Test Product";

#[derive(Debug, Clone, Default)]
pub struct MockDatabase;

impl MockDatabase {
    pub fn new() -> Self {
        Self
    }

    /// Canned answer for a classified query.
    pub fn respond(kind: QueryKind, params: &[Value]) -> QueryResult {
        match kind {
            QueryKind::ProductConfiguration => {
                let id = params.first().cloned().unwrap_or(Value::Null);
                QueryResult::single(configuration_row(id))
            }
            QueryKind::InsertProduct => QueryResult::single(id_row(MOCK_PRODUCT_ID)),
            QueryKind::InsertProductSection => QueryResult::single(id_row(MOCK_SECTION_ID)),
            QueryKind::Other => QueryResult::empty(),
        }
    }
}

fn id_row(id: &str) -> Row {
    let mut row = Row::new();
    row.insert("id".to_string(), Value::String(id.to_string()));
    row
}

fn configuration_row(product_id: Value) -> Row {
    // UI hints travel inside the parameter's validation rule as a JSON string.
    let validation_rule = json!({
        "icon": "fas fa-weight",
        "tables": [{ "headers": ["Time", "Value"], "rows": [] }],
        "uiMetadata": { "layout": "grid" }
    })
    .to_string();

    let config = json!({
        "product": {
            "id": product_id,
            "product_id": "TEST001",
            "name": MOCK_PRODUCT_NAME,
            "code": "TP001",
            "standard_weight": 185
        },
        "customVariables": [
            { "name": "var1", "value": 100, "description": "Test variable" }
        ],
        "sections": [
            {
                "section": {
                    "section_id": "section_1",
                    "section_name": "Quality Control",
                    "section_type": "quality_control"
                },
                "parameters": [
                    {
                        "parameter_id": "param_1",
                        "parameter_name": "Weight Check",
                        "parameter_type": "number",
                        "validation_rule": validation_rule
                    }
                ]
            }
        ]
    });

    let mut row = Row::new();
    row.insert("config".to_string(), config);
    row
}

#[async_trait]
impl Executor for MockDatabase {
    async fn query(&self, text: &str, params: &[Value]) -> Result<QueryResult, ApiError> {
        let kind = QueryKind::classify(text);
        debug!(query = %text, kind = %kind, params = ?params, "Mock query");
        Ok(Self::respond(kind, params))
    }
}

/// Transaction wrapper over the mock. Commit and rollback do nothing.
#[derive(Debug, Clone)]
pub struct MockTransaction {
    db: MockDatabase,
}

#[async_trait]
impl Executor for MockTransaction {
    async fn query(&self, text: &str, params: &[Value]) -> Result<QueryResult, ApiError> {
        self.db.query(text, params).await
    }
}

#[async_trait]
impl TransactionClient for MockTransaction {
    fn as_executor(&self) -> &dyn Executor {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), ApiError> {
        debug!("Mock transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), ApiError> {
        debug!("Mock transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl Database for MockDatabase {
    async fn begin(&self) -> Result<Box<dyn TransactionClient>, ApiError> {
        Ok(Box::new(MockTransaction { db: self.clone() }))
    }

    async fn find_by_id(&self, table: &str, id: &str) -> Result<Option<Row>, ApiError> {
        debug!(table, id, "Mock find_by_id");
        let mut row = id_row(id);
        row.insert(
            "name".to_string(),
            Value::String(MOCK_PRODUCT_NAME.to_string()),
        );
        Ok(Some(row))
    }

    async fn update_by_id(&self, table: &str, id: &str, patch: Row) -> Result<Row, ApiError> {
        debug!(table, id, fields = patch.len(), "Mock update_by_id");
        let mut row = id_row(id);
        row.extend(patch);
        Ok(row)
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<Row, ApiError> {
        debug!(table, id, "Mock delete_by_id");
        Ok(id_row(id))
    }

    async fn set_user_context(&self, user_id: Option<&str>) -> Result<(), ApiError> {
        debug!(user_id = ?user_id, "Mock set_user_context");
        Ok(())
    }
}
