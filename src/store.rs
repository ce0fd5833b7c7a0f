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

//! The store operations the download tasks depend on

use async_trait::async_trait;

use crate::s3::client::S3Client;
use crate::s3::error::Error;
use crate::s3::object_content::ObjectContent;
use crate::s3::types::S3Api;

/// One page of a prefix listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub keys: Vec<String>,
    pub truncated: bool,
    /// Marker to pass back to fetch the next page.
    pub continuation: Option<String>,
}

/// Object store as seen by the download tasks.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error>;

    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListingPage, Error>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectContent, Error>;
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error> {
        Ok(S3Client::bucket_exists(self, bucket).send().await?.exists)
    }

    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListingPage, Error> {
        let resp = self
            .list_objects(bucket)
            .prefix(Some(prefix.to_string()))
            .continuation_token(continuation)
            .send()
            .await?;
        Ok(ListingPage {
            keys: resp.keys,
            truncated: resp.is_truncated,
            continuation: resp.next_continuation_token,
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectContent, Error> {
        Ok(S3Client::get_object(self, bucket, key).send().await?.content)
    }
}
