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
use crate::s3::object_content::ObjectContent;
use crate::s3::types::{FromS3Response, S3Request};
use async_trait::async_trait;
use futures_util::TryStreamExt;

/// Streamed body of a GetObject call, sized by `Content-Length` when the
/// server sent one.
pub struct GetObjectResponse {
    pub content: ObjectContent,
}

#[async_trait]
impl FromS3Response for GetObjectResponse {
    async fn from_s3response(
        _req: S3Request,
        resp: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error> {
        let resp = resp?;
        let size = resp.content_length();
        let body = resp.bytes_stream().map_err(std::io::Error::other);
        Ok(GetObjectResponse {
            content: ObjectContent::new_from_stream(body, size),
        })
    }
}
