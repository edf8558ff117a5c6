// Core quotes module - request parsing and bounded history search.

pub mod quote_models;
pub mod quote_parser;
pub mod quote_service;
pub mod time_phrase;

pub use quote_models::*;
pub use quote_parser::*;
pub use quote_service::*;
pub use time_phrase::*;
