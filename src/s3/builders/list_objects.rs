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

use crate::s3::client::S3Client;
use crate::s3::error::ValidationErr;
use crate::s3::response::ListObjectsResponse;
use crate::s3::types::{S3Api, S3Request, ToS3Request};
use crate::s3::utils::{Multimap, MultimapExt, check_bucket_name};
use http::Method;

/// Argument builder for one page of ListObjectsV2.
///
/// Keys are requested URL-encoded and decoded by the response, so keys
/// holding characters XML 1.0 cannot carry survive the round trip.
#[derive(Clone, Debug)]
pub struct ListObjects {
    client: S3Client,
    bucket: String,
    prefix: Option<String>,
    continuation_token: Option<String>,
}

impl ListObjects {
    pub fn new<S: Into<String>>(client: S3Client, bucket: S) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: None,
            continuation_token: None,
        }
    }

    /// Filter the listing to keys starting with the given prefix.
    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Token returned as `NextContinuationToken` by the previous page.
    pub fn continuation_token(mut self, token: Option<String>) -> Self {
        self.continuation_token = token;
        self
    }
}

impl S3Api for ListObjects {
    type S3Response = ListObjectsResponse;
}

impl ToS3Request for ListObjects {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket)?;

        let mut query_params = Multimap::new();
        query_params.add("list-type", "2");
        query_params.add("encoding-type", "url");
        query_params.add("prefix", self.prefix.unwrap_or_default());
        if let Some(v) = self.continuation_token {
            query_params.add("continuation-token", v);
        }

        Ok(S3Request::new(self.client, Method::GET, self.bucket).query_params(query_params))
    }
}
