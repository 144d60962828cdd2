//! Behaviour of the mock database, the transaction helper and binding
//! substitution, exercised through the public crate API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::executor::block_on;
use proptest::prelude::*;
use serde_json::{json, Value};

use product_config_harness::database::{
    transaction, Bindings, Database, Executor, MockDatabase, QueryKind, Resolve, ResolveExt,
    DATABASE_BINDING,
};
use product_config_harness::ApiError;

fn filler() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 (),.$*=]{0,40}"
}

proptest! {
    #[test]
    fn configuration_fetch_echoes_first_param(
        prefix in filler(),
        suffix in filler(),
        id in "[a-zA-Z0-9-]{1,24}",
        extra in proptest::collection::vec("[a-z]{0,8}", 0..3),
    ) {
        let text = format!("{}get_product_configuration{}", prefix, suffix);
        let mut params = vec![Value::from(id.clone())];
        params.extend(extra.into_iter().map(Value::from));

        let result = block_on(MockDatabase::new().query(&text, &params)).unwrap();

        prop_assert_eq!(result.rows.len(), 1);
        prop_assert_eq!(&result.rows[0]["config"]["product"]["id"], &Value::from(id));
    }

    #[test]
    fn products_insert_returns_placeholder_id(prefix in filler(), suffix in filler()) {
        let text = format!("{}INSERT INTO products{}", prefix, suffix);
        let result = block_on(MockDatabase::new().query(&text, &[])).unwrap();

        prop_assert_eq!(result.rows.len(), 1);
        let id = result.rows[0]["id"].as_str().unwrap_or_default();
        prop_assert!(!id.is_empty());
    }

    #[test]
    fn unmatched_text_returns_no_rows(text in "[a-z0-9 (),.$*=]{0,80}") {
        prop_assert_eq!(QueryKind::classify(&text), QueryKind::Other);

        let result = block_on(MockDatabase::new().query(&text, &[json!(1)])).unwrap();
        prop_assert!(result.rows.is_empty());
    }
}

#[tokio::test]
async fn configuration_fetch_scenario() {
    let db = MockDatabase::new();
    let result = db
        .query(
            "SELECT ... get_product_configuration ...",
            &[json!("abc-123")],
        )
        .await
        .unwrap();

    assert_eq!(result.rows[0]["config"]["product"]["id"], "abc-123");
}

#[tokio::test]
async fn section_insert_has_its_own_placeholder() {
    let db = MockDatabase::new();
    let product = db.query("INSERT INTO products (name) VALUES ($1)", &[]).await.unwrap();
    let section = db
        .query("INSERT INTO product_sections (product_id) VALUES ($1)", &[])
        .await
        .unwrap();

    assert_eq!(section.rows.len(), 1);
    assert_ne!(product.rows[0]["id"], section.rows[0]["id"]);
}

#[tokio::test]
async fn transaction_returns_callback_value_and_runs_it_once() {
    let db = MockDatabase::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let value = transaction(&db, move |tx| {
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            let inserted = tx
                .query("INSERT INTO products (name) VALUES ($1) RETURNING id", &[json!("x")])
                .await?;
            Ok((42_u32, inserted.rows[0]["id"].clone()))
        })
    })
    .await
    .unwrap();

    assert_eq!(value, (42, json!("uuid-123")));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transaction_passes_callback_error_through() {
    let db = MockDatabase::new();

    let err = transaction(&db, |_tx| {
        Box::pin(async move { Err::<(), _>(ApiError::not_found("Product")) })
    })
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Product not found");
}

#[test]
fn substitution_redirects_only_the_database_binding() {
    let cache: Arc<dyn Database> = Arc::new(MockDatabase::new());
    let base = Bindings::new().bind("config/cache", Arc::clone(&cache));
    let before = base.resolve(DATABASE_BINDING);
    assert!(before.is_none());

    let mock: Arc<dyn Database> = Arc::new(MockDatabase::new());
    let patched = base.substitute(DATABASE_BINDING, Arc::clone(&mock));

    let resolved = patched.resolve(DATABASE_BINDING).unwrap();
    assert!(Arc::ptr_eq(&resolved, &mock));

    let untouched = patched.resolve("config/cache").unwrap();
    assert!(Arc::ptr_eq(&untouched, &cache));
    assert!(patched.resolve("config/unknown").is_none());
}

#[test]
fn substituted_binding_wins_over_a_bound_one() {
    let original: Arc<dyn Database> = Arc::new(MockDatabase::new());
    let mock: Arc<dyn Database> = Arc::new(MockDatabase::new());
    let resolver = Bindings::new()
        .bind(DATABASE_BINDING, Arc::clone(&original))
        .substitute(DATABASE_BINDING, Arc::clone(&mock));

    let resolved = resolver.resolve(DATABASE_BINDING).unwrap();
    assert!(Arc::ptr_eq(&resolved, &mock));
    assert!(!Arc::ptr_eq(&resolved, &original));
}
