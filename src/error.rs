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

//! Errors of the download tasks
//!
//! Every variant is fatal: the running task stops at the first one. Files
//! already written stay on disk.

use std::path::PathBuf;
use thiserror::Error;

use crate::s3::creds::CredentialsError;
use crate::s3::error::Error as S3Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("could not load credentials: {0}")]
    CredentialResolution(#[from] CredentialsError),

    #[error("invalid source '{url}': {reason}")]
    InvalidSource { url: String, reason: String },

    #[error("directory transfers are not supported: '{from}' -> '{to}'")]
    UnsupportedDirectoryTransfer { from: String, to: String },

    #[error("no such bucket: {bucket}")]
    BucketNotFound { bucket: String },

    #[error("unable to list s3://{bucket}/{prefix}: {cause}")]
    Listing {
        bucket: String,
        prefix: String,
        #[source]
        cause: S3Error,
    },

    #[error("unable to download s3://{bucket}/{key} to {}: {cause}", destination.display())]
    Download {
        bucket: String,
        key: String,
        destination: PathBuf,
        #[source]
        cause: S3Error,
    },

    #[error("filesystem error at {}: {cause}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("invalid manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("store request failed: {0}")]
    Store(#[source] S3Error),
}

impl Error {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, cause: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            cause,
        }
    }

    pub(crate) fn invalid_source(url: &str, reason: impl Into<String>) -> Self {
        Error::InvalidSource {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
