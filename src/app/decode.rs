//! Strict and lenient JSON decoding behind one interface.

use crate::app::error::ParseError;
use serde_json::Value;

/// Turns raw document text into a JSON value.
pub trait Decoder {
    fn decode(&self, text: &str) -> Result<Value, ParseError>;
}

/// Plain RFC 8259 JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictJson;

/// JSON5: comments, trailing commas, single quotes and unquoted keys are accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct LenientJson;

impl Decoder for StrictJson {
    fn decode(&self, text: &str) -> Result<Value, ParseError> {
        serde_json::from_str(text).map_err(|e| ParseError::new(e.to_string()))
    }
}

impl Decoder for LenientJson {
    fn decode(&self, text: &str) -> Result<Value, ParseError> {
        json5::from_str(text).map_err(|e| ParseError::new(e.to_string()))
    }
}

pub fn parse_lenient(text: &str) -> Result<Value, ParseError> {
    LenientJson.decode(text)
}
