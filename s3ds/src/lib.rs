//! s3ds is a key-value datastore on top of Amazon S3 and S3 compatible object storage.
//!
//! Keys such as `/a/b/c` are stored one object per key, optionally scoped under a "folder" of
//! the bucket. Queries enumerate a key prefix through the object listing API.
//!
//! # Example
//! ```no_run
//! use bytes::Bytes;
//! use futures_util::StreamExt;
//! use s3ds::{Datastore, Key, Query, S3Datastore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), s3ds::Error> {
//!     let store = S3Datastore::builder("my-bucket")
//!         .region("us-east-1")
//!         .path("datastore")
//!         .build()?;
//!
//!     let key = Key::new("/a/b");
//!     store.put(&key, Bytes::from_static(b"hello")).await?;
//!     assert_eq!(store.get(&key).await?, Bytes::from_static(b"hello"));
//!
//!     let results = store.query(Query::new("/a/").keys_only(true)).await?;
//!     let mut results = std::pin::pin!(results);
//!     while let Some(entry) = results.next().await {
//!         println!("{}", entry?.key);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
mod batch;
mod error;
pub mod mapper;
pub mod options;
mod query;
#[cfg(feature = "aws")]
mod s3;
mod store;

pub use backend::{
    mem::{CallCounts, InMemoryBackend},
    ObjectBackend, ObjectMeta,
};
pub use batch::ImmediateBatch;
pub use error::BackendError;
pub use mapper::KeyMapper;
pub use options::{OffsetPolicy, S3Options};
#[cfg(feature = "aws")]
pub use s3::{S3Datastore, S3DatastoreBuilder};
pub use s3ds_core::{
    dynamic::DynValue,
    query::{rest, Op},
    Batch, Batching, BoxedError, Datastore, DynDatastore, Entry, Error, Filter, Key, MaybeSend,
    MaybeSync, Order, Query, QueryResult,
};
pub use store::ObjectDatastore;
