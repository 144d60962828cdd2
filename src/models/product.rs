//! Product configuration models.
//!
//! `ProductConfiguration` is what the configuration query returns; the
//! `*Payload` types are what clients send to create or update a product.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use utoipa::ToSchema;
use validator::Validate;

use crate::database::Row;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(default)]
    pub id: Option<String>,
    pub product_id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_code: Option<String>,
    /// Kept as stored; an integer weight stays an integer.
    #[schema(value_type = f64)]
    pub standard_weight: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomVariable {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "mixingTime")]
    pub name: String,
    #[schema(value_type = Object)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A grid of readings shown with a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Section-level UI hints. Stored serialized in a parameter's validation rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(rename = "uiMetadata", default, skip_serializing_if = "Option::is_none")]
    pub ui_metadata: Option<Value>,
}

impl UiHints {
    pub fn is_empty(&self) -> bool {
        self.icon.is_none() && self.tables.is_empty() && self.ui_metadata.is_none()
    }

    /// Parse a validation rule. Rules that are not hint objects yield `None`.
    pub fn from_rule(rule: &str) -> Option<Self> {
        serde_json::from_str::<UiHints>(rule)
            .ok()
            .filter(|hints| !hints.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Section {
    pub section_id: String,
    pub section_name: String,
    pub section_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<Table>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Parameter {
    pub parameter_id: String,
    pub parameter_name: String,
    pub parameter_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rule: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SectionConfiguration {
    pub section: Section,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl SectionConfiguration {
    /// Copy UI hints from the first parameter that carries them onto the
    /// section. Values already set on the section are kept.
    pub fn lift_ui_hints(&mut self) {
        let Some(hints) = self
            .parameters
            .iter()
            .filter_map(|p| p.validation_rule.as_deref())
            .find_map(UiHints::from_rule)
        else {
            return;
        };

        if self.section.icon.is_none() {
            self.section.icon = hints.icon;
        }
        if self.section.tables.is_none() && !hints.tables.is_empty() {
            self.section.tables = Some(hints.tables);
        }
        if self.section.metadata.is_none() {
            self.section.metadata = hints.ui_metadata;
        }
    }
}

/// Full product configuration as assembled by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductConfiguration {
    pub product: Product,
    #[serde(rename = "customVariables", default)]
    pub custom_variables: Vec<CustomVariable>,
    #[serde(default)]
    pub sections: Vec<SectionConfiguration>,
}

impl ProductConfiguration {
    pub fn with_ui_hints(mut self) -> Self {
        self.sections
            .iter_mut()
            .for_each(SectionConfiguration::lift_ui_hints);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ParameterPayload {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "weight_check")]
    pub parameter_id: String,
    #[validate(length(min = 1, max = 200))]
    pub parameter_name: String,
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "number")]
    pub parameter_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rule: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct SectionPayload {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "quality_checks")]
    pub section_id: String,
    #[validate(length(min = 1, max = 200))]
    pub section_name: String,
    #[schema(example = "quality_control")]
    pub section_type: String,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    #[serde(default)]
    #[validate(nested)]
    pub parameters: Vec<ParameterPayload>,
}

impl SectionPayload {
    pub fn ui_hints(&self) -> UiHints {
        UiHints {
            icon: self.icon.clone(),
            tables: self.tables.clone(),
            ui_metadata: self.metadata.clone(),
        }
    }
}

/// Request body for `POST /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "TEST001")]
    pub product_id: String,
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Test Product")]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "TP001")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_code: Option<String>,
    #[validate(range(min = 0.0))]
    pub standard_weight: f64,
    #[serde(rename = "customVariables", default)]
    #[validate(nested)]
    pub custom_variables: Vec<CustomVariable>,
    #[serde(default)]
    #[validate(nested)]
    pub sections: Vec<SectionPayload>,
}

/// Request body for `PUT /api/products/{id}`. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub standard_weight: Option<f64>,
    #[serde(rename = "customVariables", default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub custom_variables: Option<Vec<CustomVariable>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub sections: Option<Vec<SectionPayload>>,
}

impl ProductUpdate {
    /// Column patch for the `products` row. Only scalar fields are included.
    pub fn scalar_patch(&self) -> Row {
        let mut patch = Row::new();
        let mut put = |column: &str, value: Option<Value>| {
            if let Some(value) = value {
                patch.insert(column.to_string(), value);
            }
        };

        put("product_id", self.product_id.clone().map(Value::from));
        put("name", self.name.clone().map(Value::from));
        put("code", self.code.clone().map(Value::from));
        put("batch_code", self.batch_code.clone().map(Value::from));
        put("standard_weight", self.standard_weight.map(Value::from));
        patch
    }

    pub fn replaces_children(&self) -> bool {
        self.custom_variables.is_some() || self.sections.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section_with_rule(rule: Option<&str>) -> SectionConfiguration {
        SectionConfiguration {
            section: Section {
                section_id: "s".into(),
                section_name: "S".into(),
                section_type: "quality_control".into(),
                order_index: None,
                icon: None,
                tables: None,
                metadata: None,
            },
            parameters: vec![Parameter {
                parameter_id: "p".into(),
                parameter_name: "P".into(),
                parameter_type: "number".into(),
                default_value: None,
                is_required: false,
                validation_rule: rule.map(str::to_string),
            }],
        }
    }

    #[test]
    fn test_lift_ui_hints() {
        let rule = json!({
            "icon": "fas fa-weight",
            "tables": [{ "headers": ["Time", "Value"], "rows": [] }],
            "uiMetadata": { "layout": "grid" }
        })
        .to_string();
        let mut section = section_with_rule(Some(&rule));
        section.lift_ui_hints();

        assert_eq!(section.section.icon.as_deref(), Some("fas fa-weight"));
        assert_eq!(section.section.tables.as_ref().unwrap()[0].headers, vec!["Time", "Value"]);
        assert_eq!(section.section.metadata, Some(json!({ "layout": "grid" })));
    }

    #[test]
    fn test_lift_ignores_plain_rules() {
        let mut section = section_with_rule(Some("^[0-9]+$"));
        section.lift_ui_hints();
        assert!(section.section.icon.is_none());

        let mut section = section_with_rule(Some(r#"{"min": 1}"#));
        section.lift_ui_hints();
        assert!(section.section.metadata.is_none());
    }

    #[test]
    fn test_lift_keeps_existing_icon() {
        let mut section = section_with_rule(Some(r#"{"icon":"fas fa-x"}"#));
        section.section.icon = Some("fas fa-check".into());
        section.lift_ui_hints();
        assert_eq!(section.section.icon.as_deref(), Some("fas fa-check"));
    }

    #[test]
    fn test_scalar_patch_only_has_present_fields() {
        let update = ProductUpdate {
            name: Some("Renamed".into()),
            standard_weight: Some(190.0),
            ..Default::default()
        };
        let patch = update.scalar_patch();

        assert_eq!(patch.len(), 2);
        assert_eq!(patch["name"], "Renamed");
        assert_eq!(patch["standard_weight"], json!(190.0));
        assert!(!update.replaces_children());
    }

    #[test]
    fn test_payload_validation_rejects_empty_name() {
        let payload: ProductPayload = serde_json::from_value(json!({
            "product_id": "P1",
            "name": "",
            "code": "C1",
            "standard_weight": 10
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_product_keeps_integer_weight() {
        let product: Product = serde_json::from_value(json!({
            "id": "p",
            "product_id": "TEST001",
            "name": "Test Product",
            "code": "TP001",
            "standard_weight": 185
        }))
        .unwrap();

        assert_eq!(serde_json::to_value(&product).unwrap()["standard_weight"], json!(185));
    }
}
