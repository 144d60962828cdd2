//! Example request body printed at startup.

use serde_json::json;

use super::product::{CustomVariable, ParameterPayload, ProductPayload, SectionPayload, Table};

pub fn sample_product_payload() -> ProductPayload {
    ProductPayload {
        product_id: "TEST001".to_string(),
        name: "Test Product".to_string(),
        code: "TP001".to_string(),
        batch_code: Some("BC001".to_string()),
        standard_weight: 185.0,
        custom_variables: vec![CustomVariable {
            name: "mixingTime".to_string(),
            value: json!(30),
            description: Some("Mixing duration in minutes".to_string()),
        }],
        sections: vec![SectionPayload {
            section_id: "quality_checks".to_string(),
            section_name: "Quality Checks".to_string(),
            section_type: "quality_control".to_string(),
            order_index: 0,
            icon: Some("fas fa-check".to_string()),
            tables: vec![Table {
                id: Some("weight_table".to_string()),
                headers: vec!["Time".into(), "Weight (g)".into(), "Status".into()],
                rows: vec![
                    vec!["9:00".into(), "185".into(), "OK".into()],
                    vec!["10:00".into(), "186".into(), "OK".into()],
                ],
            }],
            metadata: Some(json!({ "layout": "grid", "columns": 3 })),
            parameters: vec![ParameterPayload {
                parameter_id: "weight_check".to_string(),
                parameter_name: "Weight Check".to_string(),
                parameter_type: "number".to_string(),
                default_value: Some("185".to_string()),
                is_required: true,
                validation_rule: None,
            }],
        }],
    }
}

/// Pretty JSON rendering of [`sample_product_payload`].
pub fn sample_product_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&sample_product_payload())
}
