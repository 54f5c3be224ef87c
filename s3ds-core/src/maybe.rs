use core::future::Future;

use futures_core::Stream;

/// Marker for values that must cross task boundaries unless `no-send` is enabled.
///
/// Datastore futures and result streams are `Send` by default so they can be spawned on
/// multi-threaded runtimes. Enabling the `no-send` feature drops the bound for single-threaded
/// executors.
///
/// # Safety
///
/// Do not implement this trait directly. It is implemented for every eligible type.
#[cfg(not(feature = "no-send"))]
pub unsafe trait MaybeSend: Send {}

/// Marker for values that must cross task boundaries unless `no-send` is enabled.
///
/// # Safety
///
/// Do not implement this trait directly. It is implemented for every type.
#[cfg(feature = "no-send")]
pub unsafe trait MaybeSend {}

#[cfg(not(feature = "no-send"))]
unsafe impl<T: Send> MaybeSend for T {}
#[cfg(feature = "no-send")]
unsafe impl<T> MaybeSend for T {}

/// Same as [`MaybeSend`], but for [`Sync`].
///
/// # Safety
///
/// Do not implement this trait directly. It is implemented for every eligible type.
#[cfg(not(feature = "no-send"))]
pub unsafe trait MaybeSync: Sync {}

/// Same as [`MaybeSend`], but for [`Sync`].
///
/// # Safety
///
/// Do not implement this trait directly. It is implemented for every type.
#[cfg(feature = "no-send")]
pub unsafe trait MaybeSync {}

#[cfg(not(feature = "no-send"))]
unsafe impl<T: Sync> MaybeSync for T {}
#[cfg(feature = "no-send")]
unsafe impl<T> MaybeSync for T {}

/// A [`Future`] that is [`MaybeSend`], usable behind `dyn`.
pub trait MaybeSendFuture: Future + MaybeSend {}

impl<F> MaybeSendFuture for F where F: Future + MaybeSend {}

/// A [`Stream`] that is [`MaybeSend`], usable behind `dyn`.
pub trait MaybeSendStream: Stream + MaybeSend {}

impl<S> MaybeSendStream for S where S: Stream + MaybeSend {}
