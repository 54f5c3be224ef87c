//! The key-value datastore contract implemented by s3ds backends.

pub mod dynamic;
mod error;
pub mod key;
mod maybe;
pub mod query;

use core::future::Future;

use bytes::Bytes;
pub use dynamic::DynDatastore;
pub use error::{BoxedError, Error, Result};
use futures_core::Stream;
pub use key::Key;
pub use maybe::{MaybeSend, MaybeSendFuture, MaybeSendStream, MaybeSync};
pub use query::{Entry, Filter, Order, Query, QueryResult};

pub trait Datastore: MaybeSend + MaybeSync {
    //! The generic key-value datastore contract.
    //!
    //! Values are opaque byte sequences. Every operation reports failure through an explicit
    //! [`Error`]; [`Error::NotFound`] is reserved for absent keys.
    //!
    //! # Dyn Compatibility
    //! This trait is not dyn compatible.
    //! If you want to use [`Datastore`] in a dynamic way, you could use [`DynDatastore`].

    /// Stores `value` under `key`, replacing whatever was there.
    fn put(&self, key: &Key, value: Bytes) -> impl Future<Output = Result<()>> + MaybeSend;

    fn get(&self, key: &Key) -> impl Future<Output = Result<Bytes>> + MaybeSend;

    fn has(&self, key: &Key) -> impl Future<Output = Result<bool>> + MaybeSend;

    fn delete(&self, key: &Key) -> impl Future<Output = Result<()>> + MaybeSend;

    /// Enumerates entries matching `query`.
    ///
    /// The returned stream is single-pass; consuming it again requires issuing the query again.
    /// A failure while producing an entry is yielded as the last item of the stream.
    fn query(
        &self,
        query: Query,
    ) -> impl Future<Output = Result<impl Stream<Item = QueryResult> + MaybeSend>> + MaybeSend;

    fn close(&self) -> impl Future<Output = Result<()>> + MaybeSend;
}

pub trait Batch: MaybeSend {
    fn put(&mut self, key: Key, value: Bytes) -> impl Future<Output = Result<()>> + MaybeSend;

    fn delete(&mut self, key: Key) -> impl Future<Output = Result<()>> + MaybeSend;

    fn commit(&mut self) -> impl Future<Output = Result<()>> + MaybeSend;
}

pub trait Batching: Datastore {
    type Batch<'a>: Batch
    where
        Self: 'a;

    fn batch(&self) -> Result<Self::Batch<'_>>;
}
