//! Mount tracking for views that start asynchronous work.
//!
//! A [`ViewLifecycle`] is handed to every asynchronous read a view issues. Results are only
//! applied while the view is mounted, and an unmount wakes any read still in flight so it can
//! resolve as [`BackendError::Aborted`](crate::backend::BackendError::Aborted).

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::backend::BackendError;

#[derive(Debug)]
struct LifecycleInner {
    mounted: AtomicBool,
    unmounted: Notify,
}

/// Cloneable mount flag shared between a view and the work it spawned.
#[derive(Debug, Clone)]
pub struct ViewLifecycle {
    inner: Arc<LifecycleInner>,
}

impl ViewLifecycle {
    pub fn mounted() -> Self {
        Self {
            inner: Arc::new(LifecycleInner {
                mounted: AtomicBool::new(true),
                unmounted: Notify::new(),
            }),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::Acquire)
    }

    /// Marks the view as gone. Idempotent.
    pub fn unmount(&self) {
        if self.inner.mounted.swap(false, Ordering::AcqRel) {
            self.inner.unmounted.notify_waiters();
        }
    }

    /// Resolves once [`unmount`](Self::unmount) has been called.
    pub async fn unmounted(&self) {
        let notified = self.inner.unmounted.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if !self.is_mounted() {
            return;
        }
        notified.await;
    }

    /// Drives `work` to completion unless the view unmounts first.
    pub async fn guard<T, F>(&self, work: F) -> Result<T, BackendError>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        if !self.is_mounted() {
            return Err(BackendError::Aborted);
        }

        tokio::select! {
            biased;
            _ = self.unmounted() => Err(BackendError::Aborted),
            result = work => result,
        }
    }
}
