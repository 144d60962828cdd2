// Middleware module - request logging

pub mod request_logger;

pub use request_logger::{current_request_id, request_logger_middleware, REQUEST_ID_HEADER};
