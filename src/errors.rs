//!
//! src/errors.rs
//!
//! Defines enums and methods of error conversion
//! for errors the saver uses
//!
//!

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaverError {
    #[error("config error: {0}")]
    Config(String),
    #[error("input error: {0}")]
    Input(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error)
}

impl From<reqwest::Error> for SaverError {
    fn from(e: reqwest::Error) -> Self { SaverError::Http(e.to_string()) }
}

impl From<serde_json::Error> for SaverError {
    fn from(e: serde_json::Error) -> Self { SaverError::Parse(e.to_string()) }
}
