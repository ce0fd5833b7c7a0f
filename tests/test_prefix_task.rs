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

use s3_fetch::error::Error;
use s3_fetch::task::PrefixTask;
use s3_fetch_common::{MemoryStore, TestContext};

#[tokio::test]
async fn mirrors_prefix_into_destination_directory() {
    let ctx = TestContext::new();
    ctx.put("data/a.txt", b"alpha");
    ctx.put("data/sub/", b"");
    ctx.put("data/b.txt", b"beta");
    ctx.put("other/c.txt", b"not listed");

    let summary = PrefixTask::new(&ctx.bucket, ctx.dest("out/"))
        .source(Some("data/".into()))
        .run(&ctx.store)
        .await
        .unwrap();

    assert!(ctx.path("out/data/sub").is_dir());
    assert_eq!(std::fs::read(ctx.path("out/data/a.txt")).unwrap(), b"alpha");
    assert_eq!(std::fs::read(ctx.path("out/data/b.txt")).unwrap(), b"beta");
    assert!(!ctx.path("out/other").exists());
    assert_eq!(summary.downloaded, 2);
    assert_eq!(summary.directories, 1);
    assert_eq!(summary.bytes, 9);
}

#[tokio::test]
async fn follows_pagination() {
    let ctx = TestContext::with_store(MemoryStore::new().with_page_size(2), "paged-bucket");
    for i in 0..5 {
        ctx.put(&format!("logs/{i}.log"), b"x");
    }

    let summary = PrefixTask::new(&ctx.bucket, ctx.dest("out/"))
        .source(Some("logs/".into()))
        .run(&ctx.store)
        .await
        .unwrap();

    assert_eq!(summary.downloaded, 5);
    assert_eq!(ctx.store.list_calls(), 3);
    for i in 0..5 {
        assert!(ctx.path(&format!("out/logs/{i}.log")).is_file());
    }
}

#[tokio::test]
async fn empty_source_mirrors_whole_bucket() {
    let ctx = TestContext::new();
    ctx.put("a", b"1");
    ctx.put("d/b", b"2");

    let summary = PrefixTask::new(&ctx.bucket, ctx.dest("all/"))
        .run(&ctx.store)
        .await
        .unwrap();
    assert_eq!(summary.downloaded, 2);
    assert!(ctx.path("all/d/b").is_file());
}

#[tokio::test]
async fn existing_files_are_skipped_unless_overwriting() {
    let ctx = TestContext::new();
    ctx.put("data/a.txt", b"remote");
    std::fs::create_dir_all(ctx.path("out/data")).unwrap();
    std::fs::write(ctx.path("out/data/a.txt"), b"local").unwrap();

    let task = PrefixTask::new(&ctx.bucket, ctx.dest("out/")).source(Some("data/".into()));
    let summary = task.clone().run(&ctx.store).await.unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(ctx.store.get_calls(), 0);
    assert_eq!(std::fs::read(ctx.path("out/data/a.txt")).unwrap(), b"local");

    let summary = task.overwrite(Some(true)).run(&ctx.store).await.unwrap();
    assert_eq!(summary.replaced, 1);
    assert_eq!(std::fs::read(ctx.path("out/data/a.txt")).unwrap(), b"remote");
}

#[tokio::test]
async fn file_destination_downloads_single_key() {
    let ctx = TestContext::new();
    ctx.put("data/a.txt", b"alpha");
    ctx.put("data/b.txt", b"beta");

    let summary = PrefixTask::new(&ctx.bucket, ctx.dest("single.txt"))
        .source(Some("data/a.txt".into()))
        .run(&ctx.store)
        .await
        .unwrap();
    assert_eq!(summary.downloaded, 1);
    assert_eq!(ctx.store.list_calls(), 0);
    assert_eq!(std::fs::read(ctx.path("single.txt")).unwrap(), b"alpha");
}

#[tokio::test]
async fn file_destination_requires_a_key() {
    let ctx = TestContext::new();
    let err = PrefixTask::new(&ctx.bucket, ctx.dest("single.txt"))
        .run(&ctx.store)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSource { .. }));
}

#[tokio::test]
async fn missing_bucket_fails_before_anything_else() {
    let ctx = TestContext::new();
    let err = PrefixTask::new("no-such-bucket", ctx.dest("out/"))
        .run(&ctx.store)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BucketNotFound { ref bucket } if bucket == "no-such-bucket"));
    assert!(!ctx.path("out").exists());
    assert_eq!(ctx.store.list_calls(), 0);
}

#[tokio::test]
async fn failing_object_aborts_and_keeps_earlier_files() {
    let ctx = TestContext::new();
    ctx.put("data/1", b"one");
    ctx.put("data/2", b"two");
    ctx.put("data/3", b"three");
    ctx.store.fail_object("data/2");

    let err = PrefixTask::new(&ctx.bucket, ctx.dest("out/"))
        .source(Some("data/".into()))
        .run(&ctx.store)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Download { ref key, .. } if key == "data/2"));
    assert!(ctx.path("out/data/1").is_file());
    assert!(!ctx.path("out/data/3").exists());
}

#[tokio::test]
async fn escaping_key_is_rejected() {
    let ctx = TestContext::new();
    ctx.put("../escape.txt", b"x");

    let err = PrefixTask::new(&ctx.bucket, ctx.dest("out/"))
        .run(&ctx.store)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Filesystem { .. }));
    assert!(!ctx.path("escape.txt").exists());
}
