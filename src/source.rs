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

//! Parser for `scheme://bucket/key` object URLs

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

lazy_static! {
    static ref SCHEME_REGEX: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").unwrap();
}

/// An object location such as `s3://my-bucket/some/directory/file`.
///
/// The host part is the bucket and the path without its leading `/` is the
/// key. Any scheme is accepted; only its shape is checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectUrl {
    pub scheme: String,
    pub bucket: String,
    pub key: String,
}

impl FromStr for ObjectUrl {
    type Err = Error;

    /// # Examples
    ///
    /// ```
    /// use s3_fetch::source::ObjectUrl;
    ///
    /// let url: ObjectUrl = "s3://my-bucket/some/directory/file".parse().unwrap();
    /// assert_eq!(url.bucket, "my-bucket");
    /// assert_eq!(url.key, "some/directory/file");
    /// ```
    fn from_str(s: &str) -> Result<Self, Error> {
        let (scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| Error::invalid_source(s, "missing '://'"))?;
        if !SCHEME_REGEX.is_match(scheme) {
            return Err(Error::invalid_source(s, "malformed scheme"));
        }
        if rest.contains(['?', '#']) {
            return Err(Error::invalid_source(
                s,
                "query and fragment are not allowed",
            ));
        }

        let (bucket, key) = match rest.split_once('/') {
            Some((b, k)) => (b, k),
            None => (rest, ""),
        };
        if bucket.is_empty() {
            return Err(Error::invalid_source(s, "bucket is missing"));
        }
        if bucket.contains(['@', ':']) || bucket.chars().any(char::is_whitespace) {
            return Err(Error::invalid_source(s, "malformed bucket"));
        }

        Ok(ObjectUrl {
            scheme: scheme.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}
