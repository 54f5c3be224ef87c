use bytes::Bytes;
use futures_core::Stream;
use s3ds_core::{Batching, Datastore, Error, Key, MaybeSend, Query, QueryResult};

use crate::{
    backend::ObjectBackend, batch::ImmediateBatch, mapper::KeyMapper, options::OffsetPolicy,
    query, BackendError,
};

/// A key-value datastore stored as one object per key.
///
/// Each key maps to the object at [`KeyMapper::object_path`]. The datastore keeps no state of its
/// own besides its configuration: durability, consistency and retries are whatever the backend
/// provides.
pub struct ObjectDatastore<B> {
    backend: B,
    mapper: KeyMapper,
    offset_policy: OffsetPolicy,
}

impl<B: ObjectBackend> ObjectDatastore<B> {
    /// Builds a datastore on an already configured backend, scoped under `path`.
    pub fn with_backend(backend: B, path: impl AsRef<str>) -> Self {
        Self {
            backend,
            mapper: KeyMapper::new(path),
            offset_policy: OffsetPolicy::default(),
        }
    }

    pub fn offset_policy(mut self, offset_policy: OffsetPolicy) -> Self {
        self.offset_policy = offset_policy;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn mapper(&self) -> &KeyMapper {
        &self.mapper
    }

    pub(crate) async fn fetch(&self, key: &Key) -> Result<Bytes, Error> {
        let path = self.mapper.object_path(key);
        match self.backend.get_object(&path).await {
            Ok(value) => Ok(value),
            Err(BackendError::NoSuchKey { .. }) => Err(Error::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    async fn probe(&self, key: &Key) -> Result<bool, Error> {
        let path = self.mapper.object_path(key);
        match self.backend.head_object(&path).await {
            Ok(_) => Ok(true),
            Err(BackendError::NotFound { .. }) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

impl<B: ObjectBackend> Datastore for ObjectDatastore<B> {
    #[tracing::instrument(skip_all, fields(key = %key, size = value.len()))]
    async fn put(&self, key: &Key, value: Bytes) -> Result<(), Error> {
        let path = self.mapper.object_path(key);
        self.backend.put_object(&path, value).await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(key = %key))]
    async fn get(&self, key: &Key) -> Result<Bytes, Error> {
        self.fetch(key).await
    }

    #[tracing::instrument(skip_all, fields(key = %key))]
    async fn has(&self, key: &Key) -> Result<bool, Error> {
        self.probe(key).await
    }

    /// Fails with [`Error::NotFound`] when nothing is stored under `key`.
    ///
    /// Existence is probed before deleting, and the two calls are not atomic: a concurrent
    /// delete in between goes unnoticed.
    #[tracing::instrument(skip_all, fields(key = %key))]
    async fn delete(&self, key: &Key) -> Result<(), Error> {
        if !self.probe(key).await? {
            return Err(Error::NotFound);
        }

        let path = self.mapper.object_path(key);
        if let Err(err) = self.backend.delete_object(&path).await {
            tracing::warn!(path, error = %err, "delete failed after existence probe");
            return Err(err.into());
        }

        Ok(())
    }

    async fn query(
        &self,
        query: Query,
    ) -> Result<impl Stream<Item = QueryResult> + MaybeSend, Error> {
        query::check_supported(&query)?;

        let prefix = self.mapper.listing_prefix(&query.prefix);
        let listing = self.backend.list_objects(&prefix).await?;
        tracing::debug!(
            prefix,
            listed = listing.len(),
            offset = query.offset,
            limit = query.limit,
            keys_only = query.keys_only,
            "query listing"
        );

        let keys = query::select(
            listing.iter().map(|meta| self.mapper.key(&meta.path)),
            query.offset,
            query.limit,
            self.offset_policy,
        );

        Ok(query::results(self, keys, query.keys_only))
    }

    async fn close(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<B: ObjectBackend> Batching for ObjectDatastore<B> {
    type Batch<'a>
        = ImmediateBatch<'a, B>
    where
        Self: 'a;

    fn batch(&self) -> Result<Self::Batch<'_>, Error> {
        Ok(ImmediateBatch::new(self))
    }
}
