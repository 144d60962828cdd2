use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::database::{transaction, Database, Executor, Row};
use crate::error::{ApiError, ErrorCode, Result};
use crate::models::product::{
    CustomVariable, ProductConfiguration, ProductPayload, ProductUpdate, SectionPayload,
};

pub const PRODUCTS_TABLE: &str = "products";

const GET_PRODUCT_CONFIGURATION: &str = "SELECT get_product_configuration($1) AS config";

const INSERT_PRODUCT: &str = "INSERT INTO products (product_id, name, code, batch_code, standard_weight)
     VALUES ($1, $2, $3, $4, $5)
     RETURNING id";

const INSERT_CUSTOM_VARIABLE: &str =
    "INSERT INTO product_custom_variables (product_id, name, value, description)
     VALUES ($1, $2, $3, $4)";

const INSERT_SECTION: &str =
    "INSERT INTO product_sections (product_id, section_id, section_name, section_type, order_index)
     VALUES ($1, $2, $3, $4, $5)
     RETURNING id";

const INSERT_PARAMETER: &str = "INSERT INTO product_parameters (section_id, parameter_id, parameter_name, parameter_type,
                                     default_value, is_required, validation_rule)
     VALUES ($1, $2, $3, $4, $5, $6, $7)";

const DELETE_CUSTOM_VARIABLES: &str = "DELETE FROM product_custom_variables WHERE product_id = $1";

const DELETE_SECTIONS: &str = "DELETE FROM product_sections WHERE product_id = $1";

/// Product configuration CRUD on top of an injected [`Database`].
#[derive(Clone)]
pub struct ProductService {
    db: Arc<dyn Database>,
}

impl ProductService {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Fetch the full configuration of a product, with section UI hints lifted
    /// out of parameter validation rules.
    pub async fn get_configuration(&self, id: &str) -> Result<ProductConfiguration> {
        let result = self
            .db
            .query(GET_PRODUCT_CONFIGURATION, &[Value::from(id)])
            .await?;

        let config = match result.first_value("config") {
            Some(config) if !config.is_null() => config.clone(),
            _ => return Err(ApiError::not_found("Product")),
        };

        let config: ProductConfiguration = serde_json::from_value(config).map_err(|e| {
            ApiError::with_details(
                ErrorCode::UnexpectedResultShape,
                "Product configuration has an unexpected shape",
                e.to_string(),
            )
        })?;

        Ok(config.with_ui_hints())
    }

    /// Insert a product with its variables, sections and parameters in one
    /// transaction, then return the stored configuration.
    pub async fn create(
        &self,
        payload: ProductPayload,
        actor: Option<&str>,
    ) -> Result<ProductConfiguration> {
        self.db.set_user_context(actor).await?;

        let product_id = transaction(self.db.as_ref(), move |tx| {
            Box::pin(async move {
                let product_id = insert_product(tx, &payload).await?;
                insert_custom_variables(tx, &product_id, &payload.custom_variables).await?;
                insert_sections(tx, &product_id, &payload.sections).await?;
                Ok(product_id)
            })
        })
        .await?;

        info!(product_id = %product_id, "Product created");
        self.get_configuration(&product_id).await
    }

    /// Patch scalar columns and, when given, replace custom variables and
    /// sections wholesale.
    pub async fn update(
        &self,
        id: &str,
        update: ProductUpdate,
        actor: Option<&str>,
    ) -> Result<ProductConfiguration> {
        self.db.set_user_context(actor).await?;

        let patch = update.scalar_patch();
        if !patch.is_empty() {
            let row = self.db.update_by_id(PRODUCTS_TABLE, id, patch).await?;
            debug!(product_id = %id, columns = row.len(), "Product row updated");
        }

        if update.replaces_children() {
            let product_id = id.to_string();
            transaction(self.db.as_ref(), move |tx| {
                Box::pin(async move {
                    let key = [Value::from(product_id.as_str())];
                    if let Some(variables) = &update.custom_variables {
                        tx.query(DELETE_CUSTOM_VARIABLES, &key).await?;
                        insert_custom_variables(tx, &product_id, variables).await?;
                    }
                    if let Some(sections) = &update.sections {
                        tx.query(DELETE_SECTIONS, &key).await?;
                        insert_sections(tx, &product_id, sections).await?;
                    }
                    Ok(())
                })
            })
            .await?;
        }

        info!(product_id = %id, "Product updated");
        self.get_configuration(id).await
    }

    /// Delete a product. Returns the deleted row as reported by the database.
    pub async fn delete(&self, id: &str, actor: Option<&str>) -> Result<Row> {
        self.db.set_user_context(actor).await?;

        if self.db.find_by_id(PRODUCTS_TABLE, id).await?.is_none() {
            return Err(ApiError::not_found("Product"));
        }

        let row = self.db.delete_by_id(PRODUCTS_TABLE, id).await?;
        info!(product_id = %id, "Product deleted");
        Ok(row)
    }
}

fn returned_id(row_id: Option<&Value>, query: &str) -> Result<String> {
    row_id
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::unexpected_result(query, "id"))
}

async fn insert_product(tx: &dyn Executor, payload: &ProductPayload) -> Result<String> {
    let result = tx
        .query(
            INSERT_PRODUCT,
            &[
                json!(payload.product_id),
                json!(payload.name),
                json!(payload.code),
                json!(payload.batch_code),
                json!(payload.standard_weight),
            ],
        )
        .await?;

    returned_id(result.first_value("id"), INSERT_PRODUCT)
}

async fn insert_custom_variables(
    tx: &dyn Executor,
    product_id: &str,
    variables: &[CustomVariable],
) -> Result<()> {
    for variable in variables {
        tx.query(
            INSERT_CUSTOM_VARIABLE,
            &[
                json!(product_id),
                json!(variable.name),
                variable.value.clone(),
                json!(variable.description),
            ],
        )
        .await?;
    }
    Ok(())
}

async fn insert_sections(
    tx: &dyn Executor,
    product_id: &str,
    sections: &[SectionPayload],
) -> Result<()> {
    for section in sections {
        let result = tx
            .query(
                INSERT_SECTION,
                &[
                    json!(product_id),
                    json!(section.section_id),
                    json!(section.section_name),
                    json!(section.section_type),
                    json!(section.order_index),
                ],
            )
            .await?;
        let section_row_id = returned_id(result.first_value("id"), INSERT_SECTION)?;

        // Section hints ride along on each parameter that has no rule of its own.
        let hints = section.ui_hints();
        let hints_rule = if hints.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&hints)?)
        };

        for parameter in &section.parameters {
            let rule = parameter.validation_rule.clone().or_else(|| hints_rule.clone());
            tx.query(
                INSERT_PARAMETER,
                &[
                    json!(section_row_id),
                    json!(parameter.parameter_id),
                    json!(parameter.parameter_name),
                    json!(parameter.parameter_type),
                    json!(parameter.default_value),
                    json!(parameter.is_required),
                    json!(rule),
                ],
            )
            .await?;
        }
    }
    Ok(())
}
