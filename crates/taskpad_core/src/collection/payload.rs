//! Serialized slot payload schema.
//!
//! The stored format is a bare JSON array of strings, nothing else: no
//! envelope object, no version field, no trailing metadata. Writer and
//! reader must agree exactly, and the only writer is
//! [`super::persisted_list::PersistedList`].
//!
//! Example payload for a two-item collection: `["Buy milk","Call Sam"]`.

/// Encodes `items` as the canonical slot payload.
pub fn encode_items(items: &[String]) -> serde_json::Result<String> {
    serde_json::to_string(items)
}

/// Decodes a raw slot payload back into the ordered item sequence.
///
/// Any deviation from the schema (non-array JSON, non-string elements,
/// syntax errors) is a decode error; the caller decides how to degrade.
pub fn decode_items(raw: &str) -> serde_json::Result<Vec<String>> {
    serde_json::from_str(raw)
}
