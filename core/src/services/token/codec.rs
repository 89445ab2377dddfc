//! Wire format of auth tokens: `payload.expiresAt.signature`
//!
//! The payload is an opaque string to the codec. Services that carry
//! structured data use the `k:v,k:v` encoding below, which has no escaping;
//! values containing `.`, `,` or `:` are refused when encoding.

use std::collections::BTreeMap;

use crate::domain::value_objects::UnixMinute;
use crate::errors::TokenError;

pub const SEGMENT_DELIMITER: char = '.';
pub const ENTRY_DELIMITER: char = ',';
pub const KEY_VALUE_DELIMITER: char = ':';

/// Borrowed view of a parsed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    pub payload: &'a str,
    pub expires_at: UnixMinute,
    pub signature: &'a str,
    /// `payload.expiresAt`, the exact string the signature covers
    pub unsigned: &'a str,
}

/// The string a signature is computed over
pub fn build_unsigned(payload: &str, expires_at: UnixMinute) -> String {
    format!("{}{}{}", payload, SEGMENT_DELIMITER, expires_at)
}

/// Appends the signature to an unsigned string
pub fn assemble(unsigned: &str, signature: &str) -> String {
    format!("{}{}{}", unsigned, SEGMENT_DELIMITER, signature)
}

/// Splits a token into exactly three segments with a numeric expiry
pub fn parse(token: &str) -> Result<TokenParts<'_>, TokenError> {
    let (unsigned, signature) = token
        .rsplit_once(SEGMENT_DELIMITER)
        .ok_or(TokenError::Malformed)?;
    let (payload, expires_at) = unsigned
        .split_once(SEGMENT_DELIMITER)
        .ok_or(TokenError::Malformed)?;

    // A fourth segment would otherwise be folded into the expiry
    if expires_at.contains(SEGMENT_DELIMITER) || signature.is_empty() {
        return Err(TokenError::Malformed);
    }

    Ok(TokenParts {
        payload,
        expires_at: expires_at.parse()?,
        signature,
        unsigned,
    })
}

/// Encodes ordered key/value pairs as `k:v,k:v`
pub fn encode_kv_payload<K, V>(entries: &[(K, V)]) -> Result<String, TokenError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut payload = String::new();
    for (key, value) in entries {
        let (key, value) = (key.as_ref(), value.as_ref());
        if key.is_empty() || has_reserved(key) {
            return Err(TokenError::ReservedCharacter {
                field: key.to_string(),
            });
        }
        if has_reserved(value) {
            return Err(TokenError::ReservedCharacter {
                field: key.to_string(),
            });
        }

        if !payload.is_empty() {
            payload.push(ENTRY_DELIMITER);
        }
        payload.push_str(key);
        payload.push(KEY_VALUE_DELIMITER);
        payload.push_str(value);
    }
    Ok(payload)
}

/// Decodes a `k:v,k:v` payload
///
/// Each entry splits on its first `:`. Entries without a `:` or with an empty
/// key are skipped; a repeated key keeps its last value.
pub fn decode_kv_payload(payload: &str) -> BTreeMap<String, String> {
    payload
        .split(ENTRY_DELIMITER)
        .filter_map(|entry| entry.split_once(KEY_VALUE_DELIMITER))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn has_reserved(s: &str) -> bool {
    s.contains(&[SEGMENT_DELIMITER, ENTRY_DELIMITER, KEY_VALUE_DELIMITER][..])
}
