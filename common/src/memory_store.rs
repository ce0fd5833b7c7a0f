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

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream;
use s3_fetch::s3::error::{Error, ErrorResponse, NetworkError, S3ServerError};
use s3_fetch::s3::object_content::ObjectContent;
use s3_fetch::store::{ListingPage, ObjectStore};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory object store with request counters, for driving the download
/// tasks without a server.
///
/// Listings are served in key order, `page_size` keys per page, with the
/// index of the next key as continuation token.
#[derive(Debug)]
pub struct MemoryStore {
    buckets: Mutex<BTreeMap<String, BTreeMap<String, Bytes>>>,
    page_size: usize,
    failing_keys: Mutex<HashSet<String>>,
    truncated_keys: Mutex<HashSet<String>>,
    get_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn s3_error(code: &str, bucket: &str, key: &str) -> Error {
    Error::S3Server(S3ServerError::S3Error(Box::new(ErrorResponse {
        code: code.to_string(),
        message: format!("{code} (in-memory store)"),
        resource: format!("/{bucket}/{key}"),
        bucket_name: bucket.to_string(),
        object_name: key.to_string(),
        ..Default::default()
    })))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            buckets: Mutex::new(BTreeMap::new()),
            page_size: 1000,
            failing_keys: Mutex::new(HashSet::new()),
            truncated_keys: Mutex::new(HashSet::new()),
            get_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn create_bucket(&self, bucket: &str) {
        self.buckets
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default();
    }

    pub fn put(&self, bucket: &str, key: &str, data: impl Into<Bytes>) {
        self.buckets
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), data.into());
    }

    /// Requests for `key` fail with HTTP 500.
    pub fn fail_object(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }

    /// The body of `key` ends halfway through its announced length.
    pub fn truncate_object(&self, key: &str) {
        self.truncated_keys.lock().unwrap().insert(key.to_string());
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error> {
        Ok(self.buckets.lock().unwrap().contains_key(bucket))
    }

    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListingPage, Error> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let buckets = self.buckets.lock().unwrap();
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| s3_error("NoSuchBucket", bucket, ""))?;

        let start = match continuation {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| s3_error("InvalidArgument", bucket, &token))?,
            None => 0,
        };
        let matching: Vec<&String> = objects.keys().filter(|k| k.starts_with(prefix)).collect();
        let end = (start + self.page_size).min(matching.len());
        let truncated = end < matching.len();

        Ok(ListingPage {
            keys: matching[start.min(end)..end]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            truncated,
            continuation: truncated.then(|| end.to_string()),
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectContent, Error> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(Error::Network(NetworkError::ServerError(500)));
        }
        let data = {
            let buckets = self.buckets.lock().unwrap();
            let objects = buckets
                .get(bucket)
                .ok_or_else(|| s3_error("NoSuchBucket", bucket, key))?;
            objects
                .get(key)
                .cloned()
                .ok_or_else(|| s3_error("NoSuchKey", bucket, key))?
        };

        if self.truncated_keys.lock().unwrap().contains(key) {
            let size = data.len() as u64;
            let half = data.slice(..data.len() / 2);
            return Ok(ObjectContent::new_from_stream(
                stream::iter(vec![Ok(half)]),
                size,
            ));
        }
        Ok(ObjectContent::from(data))
    }
}
