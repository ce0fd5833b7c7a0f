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

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Error;
use crate::path::is_directory;
use crate::source::ObjectUrl;

/// One declared object transfer of a manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSpec {
    /// Object location, `scheme://bucket/key`.
    pub source: String,
    /// Local file path.
    pub destination: String,
    #[serde(default)]
    pub overwrite: bool,
}

/// A [`TransferSpec`] with its source split into bucket and key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTransfer {
    pub bucket: String,
    pub key: String,
    pub destination: PathBuf,
    pub overwrite: bool,
}

impl TransferSpec {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            overwrite: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Splits the source into bucket and key.
    ///
    /// Only single objects are supported: a directory-shaped source or
    /// destination yields [`Error::UnsupportedDirectoryTransfer`].
    pub fn resolve(&self) -> Result<ResolvedTransfer, Error> {
        let url: ObjectUrl = self.source.parse()?;

        if is_directory(&self.source) || is_directory(&self.destination) {
            return Err(Error::UnsupportedDirectoryTransfer {
                from: self.source.clone(),
                to: self.destination.clone(),
            });
        }
        if url.key.is_empty() {
            return Err(Error::invalid_source(&self.source, "object key is missing"));
        }
        if self.destination.is_empty() {
            return Err(Error::Configuration(format!(
                "destination of {} is empty",
                self.source
            )));
        }

        Ok(ResolvedTransfer {
            bucket: url.bucket,
            key: url.key,
            destination: PathBuf::from(&self.destination),
            overwrite: self.overwrite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bucket_key_and_destination() {
        let spec = TransferSpec::new("s3://my-bucket/some/directory/file", "/local/file");
        let resolved = spec.resolve().unwrap();
        assert_eq!(resolved.bucket, "my-bucket");
        assert_eq!(resolved.key, "some/directory/file");
        assert_eq!(resolved.destination, PathBuf::from("/local/file"));
        assert!(!resolved.overwrite);
    }

    #[test]
    fn directory_source_is_unsupported() {
        let err = TransferSpec::new("s3://b/dir/", "/local/file")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedDirectoryTransfer { .. }));
    }

    #[test]
    fn directory_destination_is_unsupported() {
        let err = TransferSpec::new("s3://b/file", "/local/")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedDirectoryTransfer { .. }));
    }

    #[test]
    fn missing_key_is_invalid_source() {
        let err = TransferSpec::new("s3://bucket", "/local/file")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSource { .. }));
    }

    #[test]
    fn overwrite_defaults_to_false_in_json() {
        let spec: TransferSpec =
            serde_json::from_str(r#"{"source": "s3://b/k", "destination": "out/k"}"#).unwrap();
        assert!(!spec.overwrite);
        let spec: TransferSpec = serde_json::from_str(
            r#"{"source": "s3://b/k", "destination": "out/k", "overwrite": true}"#,
        )
        .unwrap();
        assert!(spec.overwrite);
    }
}
