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

//! Conditional copy of a single object to a local path

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::Error;
use crate::path::is_directory;
use crate::s3::error::Error as S3Error;
use crate::store::ObjectStore;

/// What [`Downloader::copy`] did for one object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Object content was written; `replaced` if a file was overwritten.
    Downloaded { bytes: u64, replaced: bool },
    /// Destination already existed and overwriting was not requested.
    Skipped,
    /// Directory-shaped key; the local directory exists now.
    DirectoryCreated,
}

/// Creates `path` and its missing parents. Returns `true` if the directory
/// did not exist before.
pub async fn ensure_dir(path: &Path) -> Result<bool, Error> {
    if path.is_dir() {
        return Ok(false);
    }
    async_std::fs::create_dir_all(path)
        .await
        .map_err(|e| Error::filesystem(path, e))?;
    log::info!("Created new directory: {}", path.display());
    Ok(true)
}

/// Maps an object key to a path below `destination`.
///
/// A leading `/` in the key is ignored. Keys with `..` components would
/// escape `destination` and are rejected.
pub fn local_path(destination: &Path, key: &str) -> Result<PathBuf, Error> {
    let mut path = destination.to_path_buf();
    for component in Path::new(key.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::filesystem(
                    destination.join(key.trim_start_matches('/')),
                    std::io::Error::new(
                        ErrorKind::InvalidInput,
                        format!("object key '{key}' escapes the destination directory"),
                    ),
                ));
            }
        }
    }
    Ok(path)
}

/// Failures of the response body stream surface as I/O errors from the
/// content writer; tell them apart from local write failures.
fn is_transfer_error(e: &std::io::Error) -> bool {
    let from_http = e
        .get_ref()
        .is_some_and(|inner| inner.is::<reqwest::Error>());
    from_http
        || matches!(
            e.kind(),
            ErrorKind::UnexpectedEof
                | ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::TimedOut
        )
}

/// Copies objects from a store to local files, one at a time.
#[derive(Debug)]
pub struct Downloader<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized> Downloader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Copies `bucket`/`key` to `destination`.
    ///
    /// Directory-shaped keys only create the local directory. An existing
    /// destination file is left alone, without contacting the store, unless
    /// `overwrite` is set.
    pub async fn copy(
        &self,
        bucket: &str,
        key: &str,
        destination: &Path,
        overwrite: bool,
    ) -> Result<DownloadOutcome, Error> {
        if is_directory(key) {
            ensure_dir(destination).await?;
            return Ok(DownloadOutcome::DirectoryCreated);
        }

        let replaced = destination.is_file();
        if replaced {
            if !overwrite {
                log::info!("Skipping existing file: {}", destination.display());
                return Ok(DownloadOutcome::Skipped);
            }
            log::info!("Overwriting existing file: {}", destination.display());
        }

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent).await?;
        }

        log::info!(
            "Downloading s3://{bucket}/{key} to {}",
            destination.display()
        );
        let download_error = |cause: S3Error| Error::Download {
            bucket: bucket.to_string(),
            key: key.to_string(),
            destination: destination.to_path_buf(),
            cause,
        };

        let content = self
            .store
            .get_object(bucket, key)
            .await
            .map_err(download_error)?;
        let bytes = content.to_file(destination).await.map_err(|e| {
            if is_transfer_error(&e) {
                download_error(S3Error::Io(e))
            } else {
                Error::filesystem(destination, e)
            }
        })?;
        log::debug!("wrote {bytes} bytes to {}", destination.display());

        Ok(DownloadOutcome::Downloaded { bytes, replaced })
    }
}
