//! Classification endpoint
//!
//! `GET <classify_path>?number=<int>`:
//! validate the raw token, classify it, resolve the fun fact, answer with
//! either the full classification (200) or an echo of the bad token (400).

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;

use crate::classifier::{self, Property};
use crate::fact::{self, FactProvider};
use crate::http;
use crate::logger;

/// Query parameter carrying the number
pub const NUMBER_PARAM: &str = "number";

/// Why a raw token was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("number parameter is missing")]
    Missing,
    #[error("number parameter is blank")]
    Blank,
    #[error("not a number")]
    NotNumeric,
    #[error("not an integer")]
    NotInteger,
    #[error("outside the supported integer range")]
    OutOfRange,
}

/// 200 body
#[derive(Debug, Serialize)]
pub struct ClassificationResponse {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u32,
    pub fun_fact: String,
}

/// 400 body
#[derive(Debug, Serialize)]
pub struct ErrorResponse<'a> {
    pub number: &'a str,
    pub error: bool,
}

/// First `number` value of a query string, URL-decoded (`+` is a space)
pub fn extract_number(query: Option<&str>) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key) == NUMBER_PARAM).then(|| decode_component(value).into_owned())
        })
        .next()
}

fn decode_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['+', '%']) {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&decoded).into_owned())
}

/// Parse a raw token into an integer
///
/// Accepts surrounding whitespace, an optional sign, decimal digits and an
/// all-zero fractional part (`"28.0"`, `"28."`). Exponents, radix prefixes,
/// `NaN`/`Infinity` and non-zero fractions are rejected.
pub fn parse_number(raw: Option<&str>) -> Result<i64, InputError> {
    let raw = raw.ok_or(InputError::Missing)?;
    let token = raw.trim();
    if token.is_empty() {
        return Err(InputError::Blank);
    }

    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (int_part, fraction) = match unsigned.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (unsigned, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotNumeric);
    }
    if let Some(fraction) = fraction {
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InputError::NotNumeric);
        }
        if fraction.bytes().any(|b| b != b'0') {
            return Err(InputError::NotInteger);
        }
    }

    // Sign and digits only, which `i64::from_str` accepts as-is
    let signed = &token[..token.len() - unsigned.len() + int_part.len()];
    signed.parse::<i64>().map_err(|_| InputError::OutOfRange)
}

/// Run the endpoint for an already extracted token
pub async fn handle_classify(
    raw: Option<&str>,
    provider: &dyn FactProvider,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let number = match parse_number(raw) {
        Ok(number) => number,
        Err(e) => {
            let echoed = raw.unwrap_or_default();
            logger::log_debug(&format!("Rejected number '{echoed}': {e}"));
            let body = ErrorResponse {
                number: echoed,
                error: true,
            };
            return http::build_json_response(StatusCode::BAD_REQUEST, &body, is_head);
        }
    };

    // Trial division on large inputs runs for seconds; keep it off the worker
    let (classified, looked_up) = tokio::join!(
        tokio::task::spawn_blocking(move || classifier::classify(number)),
        fact::lookup_fact(provider, number),
    );
    let classification = match classified {
        Ok(classification) => classification,
        Err(e) => {
            logger::log_error(&format!("Classification of {number} did not complete: {e}"));
            return http::build_500_response(is_head);
        }
    };
    let fun_fact =
        looked_up.unwrap_or_else(|| fact::fallback_fact(number, classification.is_prime));

    let body = ClassificationResponse {
        number: classification.number,
        is_prime: classification.is_prime,
        is_perfect: classification.is_perfect,
        properties: classification.properties,
        digit_sum: classification.digit_sum,
        fun_fact,
    };
    http::build_json_response(StatusCode::OK, &body, is_head)
}
