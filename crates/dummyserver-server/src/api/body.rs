//! Decoding of the `POST /number` body.
//!
//! A missing `Content-Type` is read as JSON; any other non-JSON content type
//! is a validation failure. `value` is an integer in lax form: a JSON
//! integer, an integral float (`3.0`) or a string holding an integer (`"3"`).

use std::fmt;

use axum::http::{header, HeaderMap};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;

use dummyserver_core::error::{CounterError, Result};
use dummyserver_core::ActionKind;

/// Body of `POST /number`.
#[derive(Debug, Deserialize)]
pub struct NumberOperation {
    pub action: ActionKind,
    #[serde(deserialize_with = "lax_i64")]
    pub value: i64,
}

pub fn decode_operation(headers: &HeaderMap, body: &[u8]) -> Result<NumberOperation> {
    if let Some(ct) = headers.get(header::CONTENT_TYPE) {
        let ct = ct.to_str().unwrap_or_default();
        if !is_json(ct) {
            return Err(CounterError::Validation(format!(
                "expected a JSON body, got content type {ct:?}"
            )));
        }
    }
    serde_json::from_slice(body)
        .map_err(|e| CounterError::Validation(format!("invalid operation: {e}")))
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn lax_i64<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<i64, D::Error> {
    d.deserialize_any(LaxI64)
}

struct LaxI64;

// i64::MAX as f64 rounds up to 2^63, which is out of range.
const I64_UPPER_F64: f64 = 9_223_372_036_854_775_808.0;

impl<'de> Visitor<'de> for LaxI64 {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<i64, E> {
        if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < I64_UPPER_F64 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<i64, E> {
        v.trim()
            .parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}
