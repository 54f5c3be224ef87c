//! This module contains the `ObjectBackend` trait, the object-storage operations a datastore
//! is built on.

pub mod mem;
#[cfg(feature = "aws")]
pub mod s3;

use std::future::Future;

use bytes::Bytes;
use s3ds_core::{MaybeSend, MaybeSync};

use crate::BackendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    pub path: String,
    pub size: u64,
}

/// Flat object storage addressed by string paths.
///
/// Implementations report a missing object with [`BackendError::NoSuchKey`] from
/// [`ObjectBackend::get_object`] and [`BackendError::NotFound`] from
/// [`ObjectBackend::head_object`], the way S3 does.
pub trait ObjectBackend: MaybeSend + MaybeSync {
    /// Writes the whole object, replacing any existing one.
    fn put_object(
        &self,
        path: &str,
        body: Bytes,
    ) -> impl Future<Output = Result<(), BackendError>> + MaybeSend;

    fn get_object(&self, path: &str) -> impl Future<Output = Result<Bytes, BackendError>> + MaybeSend;

    /// Metadata only, no body is transferred.
    fn head_object(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<ObjectMeta, BackendError>> + MaybeSend;

    fn delete_object(&self, path: &str) -> impl Future<Output = Result<(), BackendError>> + MaybeSend;

    /// Every object whose path starts with `prefix`, in lexicographic order of path.
    fn list_objects(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<ObjectMeta>, BackendError>> + MaybeSend;
}
