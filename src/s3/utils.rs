// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Encoding, hashing, validation and XML helpers

use multimap::MultiMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::{Digest, Sha256};
use std::net::Ipv4Addr;
pub use urlencoding::decode as urldecode;
pub use urlencoding::encode as urlencode;
use xmltree::Element;

use crate::s3::error::ValidationErr;

/// Multimap for string key and string value
pub type Multimap = MultiMap<String, String>;

/// SHA256 of an empty payload, used for requests without a body.
pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

pub trait MultimapExt {
    /// Adds a key-value pair to the multimap
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V);
}

impl MultimapExt for Multimap {
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.insert(key.into(), value.into());
    }
}

/// Hex encoded SHA256 of `data`.
pub fn sha256_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

// Unreserved characters of RFC 3986, plus `/` as the key separator.
const OBJECT_KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Percent-encodes an object key for use in a request path; `/` is kept.
pub fn urlencode_object_key(key: &str) -> String {
    utf8_percent_encode(key, OBJECT_KEY_ENCODE_SET).collect()
}

/// Sorted `key=value` pairs joined by `&`, both sides percent-encoded.
///
/// The same string is sent and signed.
pub fn encode_query(query: &Multimap) -> String {
    let mut pairs: Vec<String> = query
        .iter_all()
        .flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| format!("{}={}", urlencode(key), urlencode(value)))
        })
        .collect();
    pairs.sort();
    pairs.join("&")
}

/// Rejects bucket names no S3 service would accept, before a request is
/// made for them.
///
/// Legacy names (upper case, `_`, `:`) pass; only the structural rules are
/// enforced.
pub fn check_bucket_name(bucket: &str) -> Result<(), ValidationErr> {
    let reject = |reason: &str| -> Result<(), ValidationErr> {
        Err(ValidationErr::InvalidBucketName(format!(
            "'{bucket}' {reason}"
        )))
    };

    if bucket.trim().is_empty() {
        return Err(ValidationErr::InvalidBucketName(
            "bucket name cannot be empty".into(),
        ));
    }
    if !(3..=63).contains(&bucket.len()) {
        return reject("must be between 3 and 63 characters long");
    }
    if bucket.parse::<Ipv4Addr>().is_ok() {
        return reject("cannot be an IP address");
    }
    if ["..", ".-", "-."].iter().any(|s| bucket.contains(s)) {
        return reject("contains '..', '.-' or '-.'");
    }

    let edge_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
    let body_ok = bucket
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':'));
    if !edge_ok(bucket.chars().next()) || !edge_ok(bucket.chars().last()) || !body_ok {
        return reject("does not follow S3 standards");
    }
    Ok(())
}

/// Text of the `tag` child of `element`; empty for an empty element.
pub fn child_text(element: &Element, tag: &str) -> Option<String> {
    element
        .get_child(tag)
        .map(|child| child.get_text().unwrap_or_default().into_owned())
}

/// Like [`child_text`], but a missing child is an error.
pub fn required_child_text(element: &Element, tag: &str) -> Result<String, ValidationErr> {
    child_text(element, tag).ok_or_else(|| ValidationErr::XmlError(format!("<{tag}> tag not found")))
}
