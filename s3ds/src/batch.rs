use bytes::Bytes;
use s3ds_core::{Batch, Datastore, Error, Key};

use crate::{backend::ObjectBackend, store::ObjectDatastore};

/// Batch in immediate mode.
///
/// Nothing is staged: every `put` and `delete` is applied to the datastore as it is called, and
/// [`Batch::commit`] does nothing. There is no atomicity and no rollback.
pub struct ImmediateBatch<'a, B> {
    store: &'a ObjectDatastore<B>,
}

impl<'a, B: ObjectBackend> ImmediateBatch<'a, B> {
    pub(crate) fn new(store: &'a ObjectDatastore<B>) -> Self {
        Self { store }
    }
}

impl<B: ObjectBackend> Batch for ImmediateBatch<'_, B> {
    async fn put(&mut self, key: Key, value: Bytes) -> Result<(), Error> {
        Datastore::put(self.store, &key, value).await
    }

    async fn delete(&mut self, key: Key) -> Result<(), Error> {
        Datastore::delete(self.store, &key).await
    }

    async fn commit(&mut self) -> Result<(), Error> {
        Ok(())
    }
}
