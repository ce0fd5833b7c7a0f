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

use crate::s3::error::Error;
use crate::s3::types::{FromS3Response, S3Request};
use async_trait::async_trait;

/// Answer to HeadBucket. A missing bucket is an answer, not an error.
#[derive(Clone, Debug)]
pub struct BucketExistsResponse {
    pub bucket: String,
    pub exists: bool,
}

#[async_trait]
impl FromS3Response for BucketExistsResponse {
    async fn from_s3response(
        req: S3Request,
        resp: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error> {
        let exists = match resp {
            Ok(_) => true,
            Err(e) if e.error_response().is_some_and(|er| er.is_no_such_bucket()) => false,
            Err(e) => return Err(e),
        };
        Ok(Self {
            bucket: req.bucket,
            exists,
        })
    }
}
