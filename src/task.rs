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

//! The two download tasks: an explicit object list, and a key prefix

use futures_util::{TryStreamExt, pin_mut};
use std::fmt;
use std::path::Path;

use crate::download::{DownloadOutcome, Downloader, ensure_dir, local_path};
use crate::error::Error;
use crate::lister::list_keys;
use crate::path::is_directory;
use crate::store::ObjectStore;
use crate::transfer::TransferSpec;

/// Counters of one task run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferSummary {
    /// Objects written, including replaced ones.
    pub downloaded: usize,
    pub replaced: usize,
    pub skipped: usize,
    pub directories: usize,
    pub bytes: u64,
}

impl TransferSummary {
    pub fn record(&mut self, outcome: DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded { bytes, replaced } => {
                self.downloaded += 1;
                self.bytes += bytes;
                if replaced {
                    self.replaced += 1;
                }
            }
            DownloadOutcome::Skipped => self.skipped += 1,
            DownloadOutcome::DirectoryCreated => self.directories += 1,
        }
    }
}

impl fmt::Display for TransferSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded ({} replaced, {} bytes), {} skipped, {} directories",
            self.downloaded, self.replaced, self.bytes, self.skipped, self.directories
        )
    }
}

/// Downloads an explicit list of single objects, in order.
#[derive(Clone, Debug, Default)]
pub struct ObjectsTask {
    transfers: Vec<TransferSpec>,
}

impl ObjectsTask {
    pub fn new(transfers: Vec<TransferSpec>) -> Self {
        Self { transfers }
    }

    /// Runs the transfers in declaration order and stops at the first
    /// error.
    pub async fn run<S: ObjectStore + ?Sized>(&self, store: &S) -> Result<TransferSummary, Error> {
        log::info!("{} objects to consider", self.transfers.len());

        let downloader = Downloader::new(store);
        let mut summary = TransferSummary::default();
        for spec in &self.transfers {
            let t = spec.resolve()?;
            let outcome = downloader
                .copy(&t.bucket, &t.key, &t.destination, t.overwrite)
                .await?;
            summary.record(outcome);
        }

        log::info!("Successfully processed all S3 objects");
        log::info!("{summary}");
        Ok(summary)
    }
}

/// Downloads everything under a key prefix into a local directory, or a
/// single object when the destination is not directory-shaped.
#[derive(Clone, Debug)]
pub struct PrefixTask {
    bucket: String,
    source: String,
    destination: String,
    overwrite: bool,
}

impl PrefixTask {
    pub fn new(bucket: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            source: String::new(),
            destination: destination.into(),
            overwrite: false,
        }
    }

    /// Key prefix to mirror, or the key to fetch for a file destination.
    /// Defaults to the empty prefix.
    pub fn source(mut self, source: Option<String>) -> Self {
        self.source = source.unwrap_or_default();
        self
    }

    pub fn overwrite(mut self, overwrite: Option<bool>) -> Self {
        self.overwrite = overwrite.unwrap_or(false);
        self
    }

    pub async fn run<S: ObjectStore + ?Sized>(&self, store: &S) -> Result<TransferSummary, Error> {
        log::info!(
            "Bucket: {}, source: {}, destination: {}",
            self.bucket,
            self.source,
            self.destination
        );

        if !store
            .bucket_exists(&self.bucket)
            .await
            .map_err(Error::Store)?
        {
            return Err(Error::BucketNotFound {
                bucket: self.bucket.clone(),
            });
        }

        let downloader = Downloader::new(store);
        let destination = Path::new(&self.destination);
        let mut summary = TransferSummary::default();

        if is_directory(&self.destination) {
            ensure_dir(destination).await?;

            let keys = list_keys(store, &self.bucket, &self.source);
            pin_mut!(keys);
            let mut considered = 0usize;
            while let Some(key) = keys.try_next().await? {
                considered += 1;
                let path = local_path(destination, &key)?;
                let outcome = downloader
                    .copy(&self.bucket, &key, &path, self.overwrite)
                    .await?;
                summary.record(outcome);
            }
            log::debug!("{considered} objects listed under '{}'", self.source);
        } else {
            if self.source.is_empty() {
                return Err(Error::invalid_source(
                    &format!("s3://{}/", self.bucket),
                    "object key is required for a file destination",
                ));
            }
            let outcome = downloader
                .copy(&self.bucket, &self.source, destination, self.overwrite)
                .await?;
            summary.record(outcome);
        }

        log::info!("Successfully downloaded all files");
        log::info!("{summary}");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_outcomes() {
        let mut summary = TransferSummary::default();
        summary.record(DownloadOutcome::Downloaded {
            bytes: 5,
            replaced: false,
        });
        summary.record(DownloadOutcome::Downloaded {
            bytes: 7,
            replaced: true,
        });
        summary.record(DownloadOutcome::Skipped);
        summary.record(DownloadOutcome::DirectoryCreated);
        assert_eq!(
            summary,
            TransferSummary {
                downloaded: 2,
                replaced: 1,
                skipped: 1,
                directories: 1,
                bytes: 12,
            }
        );
        assert_eq!(
            summary.to_string(),
            "2 downloaded (1 replaced, 12 bytes), 1 skipped, 1 directories"
        );
    }
}
