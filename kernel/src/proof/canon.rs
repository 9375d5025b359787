//! Canonical bytes for values and collections.
//!
//! One writer produces the bytes every collection digest commits to. The
//! encoding is compact JSON with these rules:
//!
//! 1. `Null`, `Bool` and `Int` are written literally.
//! 2. `Double` is written as `{"f64":"<16 hex digits of the IEEE-754 bits>"}`,
//!    so `-0.0`, NaN payloads and precision never depend on float formatting.
//! 3. `Text` is a JSON string, escaped per RFC 8259 §7, UTF-8 passed through.
//! 4. `List` is `{"items":[...],"names":[...]}` with `"names":null` when the
//!    collection is unnamed. Keys are in byte order.

use std::io::Write;

use crate::data::collection::Collection;
use crate::data::value::Value;
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Canonical bytes of a single value.
#[must_use]
pub fn canonical_value_bytes(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_value(&mut buf, value);
    buf
}

/// Canonical bytes of a collection (the `List` encoding of rule 4).
#[must_use]
pub fn canonical_collection_bytes(list: &Collection) -> Vec<u8> {
    let mut buf = Vec::new();
    write_collection(&mut buf, list);
    buf
}

/// Content hash of a collection's canonical bytes.
#[must_use]
pub fn collection_digest(list: &Collection) -> ContentHash {
    canonical_hash(HashDomain::Collection, &canonical_collection_bytes(list))
}

fn write_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Int(i) => {
            let _ = write!(buf, "{i}");
        }
        Value::Double(d) => {
            buf.extend_from_slice(b"{\"f64\":\"");
            buf.extend_from_slice(hex::encode(d.to_bits().to_be_bytes()).as_bytes());
            buf.extend_from_slice(b"\"}");
        }
        Value::Text(s) => write_string(buf, s),
        Value::List(list) => write_collection(buf, list),
    }
}

fn write_collection(buf: &mut Vec<u8>, list: &Collection) {
    buf.extend_from_slice(b"{\"items\":[");
    for (i, item) in list.values().iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        write_value(buf, item);
    }
    buf.extend_from_slice(b"],\"names\":");
    match list.names() {
        None => buf.extend_from_slice(b"null"),
        Some(names) => {
            buf.push(b'[');
            for (i, name) in names.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_string(buf, name);
            }
            buf.push(b']');
        }
    }
    buf.push(b'}');
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');
    for ch in s.chars() {
        match ch {
            '"' => buf.extend_from_slice(b"\\\""),
            '\\' => buf.extend_from_slice(b"\\\\"),
            '\n' => buf.extend_from_slice(b"\\n"),
            '\r' => buf.extend_from_slice(b"\\r"),
            '\t' => buf.extend_from_slice(b"\\t"),
            c if c < '\u{0020}' => {
                let _ = write!(buf, "\\u{:04x}", u32::from(c));
            }
            c => {
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }
    buf.push(b'"');
}
