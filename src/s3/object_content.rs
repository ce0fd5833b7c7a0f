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

use async_std::io::WriteExt;
use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};
use std::path::Path;
use std::pin::Pin;
use uuid::Uuid;

type IoResult<T> = Result<T, std::io::Error>;

/// Object size, when the server announced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Known(u64),
    Unknown,
}

impl From<Option<u64>> for Size {
    fn from(value: Option<u64>) -> Self {
        match value {
            Some(v) => Size::Known(v),
            None => Size::Unknown,
        }
    }
}

impl From<u64> for Size {
    fn from(value: u64) -> Self {
        Size::Known(value)
    }
}

/// Object content that can be streamed to a file.
pub struct ObjectContent(ObjectContentInner);

enum ObjectContentInner {
    Stream(Pin<Box<dyn Stream<Item = IoResult<Bytes>> + Send>>, Size),
    Bytes(Bytes),
}

impl From<Bytes> for ObjectContent {
    fn from(value: Bytes) -> Self {
        ObjectContent(ObjectContentInner::Bytes(value))
    }
}

impl ObjectContent {
    pub fn new_from_stream(
        r: impl Stream<Item = IoResult<Bytes>> + Send + 'static,
        size: impl Into<Size>,
    ) -> Self {
        ObjectContent(ObjectContentInner::Stream(Box::pin(r), size.into()))
    }

    fn into_stream(self) -> (Pin<Box<dyn Stream<Item = IoResult<Bytes>> + Send>>, Size) {
        match self.0 {
            ObjectContentInner::Stream(r, size) => (r, size),
            ObjectContentInner::Bytes(b) => {
                let size = Size::Known(b.len() as u64);
                (Box::pin(stream::iter(vec![Ok(b)])), size)
            }
        }
    }

    /// Writes the content to `file_path` and returns the number of bytes
    /// written.
    ///
    /// Data goes to a uniquely named sibling file first, which is renamed
    /// over `file_path` once complete; a failed transfer never leaves a
    /// partial file at `file_path`. Missing parent directories are created.
    pub async fn to_file(self, file_path: &Path) -> IoResult<u64> {
        if file_path.is_dir() {
            return Err(std::io::Error::other(format!(
                "{} is a directory",
                file_path.display()
            )));
        }
        let parent_dir = match file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent_dir.is_dir() {
            async_std::fs::create_dir_all(parent_dir).await?;
        }
        let file_name = file_path.file_name().ok_or(std::io::Error::other(
            "could not get filename-component of path",
        ))?;
        let mut tmp_file_name = file_name.to_os_string();
        tmp_file_name.push(format!("_{}", Uuid::new_v4().to_string().replace('-', "_")));
        let tmp_file_path = parent_dir.join(tmp_file_name);

        match self.write_to(&tmp_file_path).await {
            Ok(n) => {
                async_std::fs::rename(&tmp_file_path, file_path).await?;
                Ok(n)
            }
            Err(e) => {
                let _ = async_std::fs::remove_file(&tmp_file_path).await;
                Err(e)
            }
        }
    }

    async fn write_to(self, tmp_file_path: &Path) -> IoResult<u64> {
        let mut fp = async_std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(tmp_file_path)
            .await?;
        let (mut r, size) = self.into_stream();
        let mut total_bytes_written = 0;
        while let Some(bytes) = r.next().await {
            let bytes = bytes?;
            total_bytes_written += bytes.len() as u64;
            fp.write_all(&bytes).await?;
        }
        fp.flush().await?;

        if let Size::Known(expected) = size {
            if expected != total_bytes_written {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("expected {expected} bytes, received {total_bytes_written}"),
                ));
            }
        }
        Ok(total_bytes_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn to_file_replaces_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out.bin");

        let n = ObjectContent::from(Bytes::from_static(b"first")).to_file(&target).await.unwrap();
        assert_eq!(n, 5);
        let n = ObjectContent::from(Bytes::from_static(b"second!"))
            .to_file(&target)
            .await
            .unwrap();
        assert_eq!(n, 7);
        assert_eq!(std::fs::read(&target).unwrap(), b"second!");

        let names: Vec<_> = std::fs::read_dir(target.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[tokio::test]
    async fn short_stream_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        std::fs::write(&target, b"old").unwrap();

        let body = stream::iter(vec![Ok(Bytes::from_static(b"par"))]);
        let err = ObjectContent::new_from_stream(body, 10u64)
            .to_file(&target)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
        assert_eq!(std::fs::read(&target).unwrap(), b"old");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn stream_error_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        let body = stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(std::io::Error::other("connection reset")),
        ]);
        let res = ObjectContent::new_from_stream(body, Size::Unknown)
            .to_file(&target)
            .await;
        assert!(res.is_err());
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn to_file_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ObjectContent::from(Bytes::from_static(b"x")).to_file(dir.path()).await.is_err());
    }
}
