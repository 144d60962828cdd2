// Product configuration models and the example request payload

pub mod product;
pub mod sample;

pub use product::{
    CustomVariable, Parameter, ParameterPayload, Product, ProductConfiguration, ProductPayload,
    ProductUpdate, Section, SectionConfiguration, SectionPayload, Table, UiHints,
};
pub use sample::{sample_product_json, sample_product_payload};
