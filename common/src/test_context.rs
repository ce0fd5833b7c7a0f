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

use crate::memory_store::MemoryStore;
use crate::utils::rand_bucket_name;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A populated in-memory store plus a scratch directory that is removed on
/// drop.
pub struct TestContext {
    pub store: MemoryStore,
    pub bucket: String,
    dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let bucket = rand_bucket_name();
        let store = MemoryStore::new();
        store.create_bucket(&bucket);
        Self {
            store,
            bucket,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn with_store(store: MemoryStore, bucket: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        store.create_bucket(bucket);
        Self {
            store,
            bucket: bucket.to_string(),
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn put(&self, key: &str, data: &'static [u8]) {
        self.store.put(&self.bucket, key, data);
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// `rel` below the scratch directory.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// `rel` below the scratch directory as a string, keeping a trailing
    /// `/` so it classifies as a directory.
    pub fn dest(&self, rel: &str) -> String {
        format!("{}/{rel}", self.dir.path().display())
    }

    pub fn source(&self, key: &str) -> String {
        format!("s3://{}/{key}", self.bucket)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
