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

//! Fetch objects from Amazon S3 compatible object storage into local files.
//!
//! Two entry points are provided. [`task::ObjectsTask`] copies an explicit
//! list of `s3://bucket/key` objects to local files. [`task::PrefixTask`]
//! mirrors every object under a key prefix into a local directory. Both
//! skip existing files unless asked to overwrite them.
//!
//! Store access goes through the [`store::ObjectStore`] trait, implemented
//! for the bundled [`s3::S3Client`].
//!
//! ```no_run
//! use s3_fetch::config::ClientConfig;
//! use s3_fetch::task::PrefixTask;
//!
//! # async fn run() -> Result<(), s3_fetch::error::Error> {
//! let config = ClientConfig::default().region(Some("eu-west-1".into()));
//! let client = config.build_client().await?;
//! let summary = PrefixTask::new("my-bucket", "out/")
//!     .source(Some("data/".into()))
//!     .run(&client)
//!     .await?;
//! println!("{} files downloaded", summary.downloaded);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::result_large_err)]
#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod download;
pub mod error;
pub mod lister;
pub mod path;
pub mod s3;
pub mod source;
pub mod store;
pub mod task;
pub mod transfer;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
