//! Liveness of a mounted component.
//!
//! Every asynchronous session call made on behalf of a component goes through
//! its [`ComponentScope`]. Once the component unmounts, results that resolve
//! afterwards are discarded at the boundary instead of being applied to state.

use std::future::Future;
use tokio_util::sync::{CancellationToken, DropGuard};

#[derive(Debug, Clone, Default)]
pub struct ComponentScope {
    token: CancellationToken,
}

impl ComponentScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope that unmounts together with `self`, or on its own
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    /// Resolves once the scope is unmounted
    pub async fn unmounted(&self) {
        self.token.cancelled().await
    }

    /// Unmounts the scope when the returned guard is dropped
    pub fn drop_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    /// Await `fut` to completion and hand back its output only if the scope
    /// is still live at that point.
    ///
    /// The call itself is not aborted: a sign-out or refresh that is already
    /// on the wire still reaches the auth service.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let output = fut.await;
        if self.is_live() {
            Some(output)
        } else {
            tracing::trace!("Discarding result resolved after unmount");
            None
        }
    }
}
