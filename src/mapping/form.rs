//! `application/x-www-form-urlencoded` decoding for query strings and bodies.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::error::EchoError;

/// Decoded parameters, values in input order.
pub type Params = BTreeMap<String, Vec<String>>;

/// Decode parameters, dropping pairs that hold a malformed escape.
pub fn parse_lenient(input: &[u8]) -> Params {
    let mut params = Params::new();
    for pair in input.split(|b| *b == b'&') {
        if validate_escapes(pair).is_err() {
            continue;
        }
        decode_into(&mut params, pair);
    }
    params
}

/// Decode parameters, rejecting `%` escapes that are not followed by two
/// hex digits.
pub fn parse_strict(input: &[u8]) -> Result<Params, EchoError> {
    validate_escapes(input)?;
    let mut params = Params::new();
    decode_into(&mut params, input);
    Ok(params)
}

fn decode_into(params: &mut Params, input: &[u8]) {
    for (key, value) in form_urlencoded::parse(input) {
        params.entry(key.into_owned()).or_default().push(value.into_owned());
    }
}

/// Check every percent escape in `input`.
pub fn validate_escapes(input: &[u8]) -> Result<(), EchoError> {
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' {
            let escape = &input[i..input.len().min(i + 3)];
            if escape.len() < 3 || !escape[1..].iter().all(u8::is_ascii_hexdigit) {
                return Err(EchoError::InvalidForm(format!(
                    "invalid URL escape {:?}",
                    String::from_utf8_lossy(escape)
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
