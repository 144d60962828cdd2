pub mod extractors;
pub mod health;
pub mod products;
pub mod response;

pub use extractors::{Actor, ValidatedJson, USER_ID_HEADER};
pub use response::{ApiResponse, Created};
