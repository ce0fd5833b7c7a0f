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

//! Lazy, paginated listing of the keys under a prefix

use async_stream::try_stream;
use futures_util::Stream;

use crate::error::Error;
use crate::s3::error::{Error as S3Error, S3ServerError};
use crate::store::ObjectStore;

/// Streams every key starting with `prefix`, in store order.
///
/// Pages are fetched on demand, each one with the continuation marker of
/// the previous page, until a page reports it is not truncated. The stream
/// ends at the first failure.
pub fn list_keys<'a, S>(
    store: &'a S,
    bucket: &'a str,
    prefix: &'a str,
) -> impl Stream<Item = Result<String, Error>> + Send + 'a
where
    S: ObjectStore + ?Sized,
{
    let listing_error = move |cause: S3Error| Error::Listing {
        bucket: bucket.to_string(),
        prefix: prefix.to_string(),
        cause,
    };

    try_stream! {
        let mut continuation: Option<String> = None;
        let mut page_number = 0u32;
        loop {
            page_number += 1;
            let page = store
                .list_page(bucket, prefix, continuation.take())
                .await
                .map_err(listing_error)?;
            log::debug!(
                "listing page {page_number} of s3://{bucket}/{prefix}: {} keys",
                page.keys.len()
            );

            for key in page.keys {
                yield key;
            }

            if !page.truncated {
                break;
            }
            match page.continuation {
                Some(token) if !token.is_empty() => continuation = Some(token),
                _ => Err(listing_error(S3Error::S3Server(
                    S3ServerError::InvalidServerResponse {
                        message: "truncated listing page without continuation token".into(),
                        http_status_code: 200,
                        content_type: "application/xml".into(),
                    },
                )))?,
            }
        }
    }
}
