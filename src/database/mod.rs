//! Persistence seam for the product API.
//!
//! Handlers never talk to a concrete client. They receive an
//! `Arc<dyn Database>` through `AppState`, which startup resolves from a
//! [`resolver::Resolve`] implementation.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ApiError;

pub mod mock;
pub mod query;
pub mod resolver;

pub use mock::MockDatabase;
pub use query::QueryKind;
pub use resolver::{Bindings, Resolve, ResolveExt, Substitution, DATABASE_BINDING};

/// A single result row: column name to value.
pub type Row = Map<String, Value>;

/// Rows returned by a query, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(row: Row) -> Self {
        Self { rows: vec![row] }
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Column `column` of the first row, if both exist.
    pub fn first_value(&self, column: &str) -> Option<&Value> {
        self.first().and_then(|row| row.get(column))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Anything that can run a query with positional parameters.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn query(&self, text: &str, params: &[Value]) -> Result<QueryResult, ApiError>;
}

/// Client handed to a transaction callback.
#[async_trait]
pub trait TransactionClient: Executor {
    fn as_executor(&self) -> &dyn Executor;

    async fn commit(self: Box<Self>) -> Result<(), ApiError>;

    async fn rollback(self: Box<Self>) -> Result<(), ApiError>;
}

/// Database operations the product API depends on.
#[async_trait]
pub trait Database: Executor {
    /// Open a transaction. Drive it with [`transaction`].
    async fn begin(&self) -> Result<Box<dyn TransactionClient>, ApiError>;

    async fn find_by_id(&self, table: &str, id: &str) -> Result<Option<Row>, ApiError>;

    /// Apply `patch` to the row and return the updated row.
    async fn update_by_id(&self, table: &str, id: &str, patch: Row) -> Result<Row, ApiError>;

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<Row, ApiError>;

    /// Attach the acting user to subsequent statements.
    async fn set_user_context(&self, user_id: Option<&str>) -> Result<(), ApiError>;
}

/// Run `f` inside a transaction on `db`.
///
/// `f` is called exactly once. Its value is returned unchanged after commit;
/// on error the transaction is rolled back and the original error returned.
pub async fn transaction<T, F>(db: &dyn Database, f: F) -> Result<T, ApiError>
where
    T: Send,
    F: for<'c> FnOnce(&'c dyn Executor) -> BoxFuture<'c, Result<T, ApiError>> + Send,
{
    let tx = db.begin().await?;

    let outcome = f(tx.as_executor()).await;

    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(e)
        }
    }
}
