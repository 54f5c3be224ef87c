use std::{any::Any, pin::Pin};

use bytes::Bytes;

use crate::{
    Datastore, Error, Key, MaybeSend, MaybeSendFuture, MaybeSendStream, MaybeSync, Query,
    QueryResult, Result,
};

/// An untyped value handed to [`DynDatastore::put`].
pub type DynValue = Box<dyn Any + Send>;

pub type DynQueryResults<'s> = Pin<Box<dyn MaybeSendStream<Item = QueryResult> + 's>>;

pub trait DynDatastore: MaybeSend + MaybeSync {
    //! Dyn compatible(object safety) version of [`Datastore`].
    //! All implementations of [`Datastore`] has already implemented this trait.
    //!
    //! Values cross this boundary untyped: [`DynDatastore::put`] accepts anything and fails with
    //! [`Error::InvalidValueType`] unless the value is a byte sequence (`Bytes`, `Vec<u8>` or
    //! `&'static [u8]`). The check happens before the underlying datastore is touched.

    fn put<'s, 'key: 's>(
        &'s self,
        key: &'key Key,
        value: DynValue,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<()>> + 's>>;

    fn get<'s, 'key: 's>(
        &'s self,
        key: &'key Key,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<Bytes>> + 's>>;

    fn has<'s, 'key: 's>(
        &'s self,
        key: &'key Key,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<bool>> + 's>>;

    fn delete<'s, 'key: 's>(
        &'s self,
        key: &'key Key,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<()>> + 's>>;

    fn query(
        &self,
        query: Query,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<DynQueryResults<'_>>> + '_>>;

    fn close(&self) -> Pin<Box<dyn MaybeSendFuture<Output = Result<()>> + '_>>;
}

/// Recovers the byte sequence from an untyped value.
pub fn value_bytes(value: DynValue) -> Result<Bytes> {
    let value = match value.downcast::<Bytes>() {
        Ok(bytes) => return Ok(*bytes),
        Err(value) => value,
    };
    let value = match value.downcast::<Vec<u8>>() {
        Ok(vec) => return Ok(Bytes::from(*vec)),
        Err(value) => value,
    };
    match value.downcast::<&'static [u8]>() {
        Ok(slice) => Ok(Bytes::from_static(*slice)),
        Err(_) => Err(Error::InvalidValueType),
    }
}

impl<D: Datastore> DynDatastore for D {
    fn put<'s, 'key: 's>(
        &'s self,
        key: &'key Key,
        value: DynValue,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<()>> + 's>> {
        Box::pin(async move {
            let value = value_bytes(value)?;
            D::put(self, key, value).await
        })
    }

    fn get<'s, 'key: 's>(
        &'s self,
        key: &'key Key,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<Bytes>> + 's>> {
        Box::pin(D::get(self, key))
    }

    fn has<'s, 'key: 's>(
        &'s self,
        key: &'key Key,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<bool>> + 's>> {
        Box::pin(D::has(self, key))
    }

    fn delete<'s, 'key: 's>(
        &'s self,
        key: &'key Key,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<()>> + 's>> {
        Box::pin(D::delete(self, key))
    }

    fn query(
        &self,
        query: Query,
    ) -> Pin<Box<dyn MaybeSendFuture<Output = Result<DynQueryResults<'_>>> + '_>> {
        Box::pin(async move {
            let results = D::query(self, query).await?;
            Ok(Box::pin(results) as DynQueryResults<'_>)
        })
    }

    fn close(&self) -> Pin<Box<dyn MaybeSendFuture<Output = Result<()>> + '_>> {
        Box::pin(D::close(self))
    }
}

impl Datastore for Box<dyn DynDatastore> {
    async fn put(&self, key: &Key, value: Bytes) -> Result<()> {
        DynDatastore::put(self.as_ref(), key, Box::new(value)).await
    }

    async fn get(&self, key: &Key) -> Result<Bytes> {
        DynDatastore::get(self.as_ref(), key).await
    }

    async fn has(&self, key: &Key) -> Result<bool> {
        DynDatastore::has(self.as_ref(), key).await
    }

    async fn delete(&self, key: &Key) -> Result<()> {
        DynDatastore::delete(self.as_ref(), key).await
    }

    async fn query(
        &self,
        query: Query,
    ) -> Result<impl futures_core::Stream<Item = QueryResult> + MaybeSend> {
        DynDatastore::query(self.as_ref(), query).await
    }

    async fn close(&self) -> Result<()> {
        DynDatastore::close(self.as_ref()).await
    }
}
