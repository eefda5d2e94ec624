//! Utility functions for code generation, input validation and error classification.
//!
//! - [`code_generator`] - Random short codes and base-62 id encoding
//! - [`url_validator`] - URL normalization, URL and custom code validation
//! - [`db_error`] - PostgreSQL error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
