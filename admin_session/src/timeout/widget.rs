use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::DropGuard;

use super::state::{MonitorState, TimeoutConfig, WarningState, evaluate_warning};
use crate::scope::ComponentScope;
use crate::session::SessionError;
use crate::store::SessionStore;
use crate::utils::now_epoch;

/// Session expiry poller bound to one mounted screen.
///
/// State updates go through the watch channel and are dropped once the
/// widget's scope has unmounted.
pub struct SessionTimeoutWidget<S: SessionStore + ?Sized> {
    store: Arc<S>,
    config: TimeoutConfig,
    scope: ComponentScope,
    state: watch::Sender<MonitorState>,
}

impl<S: SessionStore + ?Sized> SessionTimeoutWidget<S> {
    pub fn new(store: Arc<S>, config: TimeoutConfig, scope: ComponentScope) -> Self {
        let (state, _) = watch::channel(MonitorState::Unchecked);
        Self {
            store,
            config,
            scope,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MonitorState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> MonitorState {
        self.state.borrow().clone()
    }

    pub fn scope(&self) -> &ComponentScope {
        &self.scope
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    fn publish(&self, next: MonitorState) {
        if !self.scope.is_live() {
            return;
        }
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    /// Mount check. Returns `Some(true)` when polling should start, `None`
    /// when the scope unmounted before the read resolved.
    pub async fn check_auth(&self) -> Option<bool> {
        let result = self.scope.run(self.store.get_session()).await?;
        let authenticated = match result {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Session check on mount failed: {}", e);
                false
            }
        };

        self.publish(if authenticated {
            MonitorState::Authenticated(WarningState::default())
        } else {
            MonitorState::Unauthenticated
        });
        Some(authenticated)
    }

    /// One poll tick. Returns the published state, or `None` when the
    /// scope unmounted mid-check.
    pub async fn check_expiry(&self) -> Option<MonitorState> {
        let result = self.scope.run(self.store.get_session()).await?;
        let next = match result {
            Ok(Some(session)) => {
                let warning =
                    evaluate_warning(&session, now_epoch(), self.config.warning_threshold_secs);
                if warning.show {
                    tracing::debug!(
                        time_remaining = warning.time_remaining,
                        "Session expiring soon"
                    );
                }
                MonitorState::Authenticated(warning)
            }
            Ok(None) => {
                tracing::debug!("Session ended, clearing expiry warning");
                MonitorState::Unauthenticated
            }
            Err(e) => {
                tracing::warn!("Session expiry check failed: {}", e);
                MonitorState::Authenticated(WarningState::default())
            }
        };

        self.publish(next.clone());
        Some(next)
    }

    /// Mount check followed by the polling loop.
    ///
    /// Returns once the session is gone or the scope unmounts.
    pub async fn run(&self) {
        if self.check_auth().await != Some(true) {
            return;
        }

        // First tick completes immediately
        let mut interval = tokio::time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.scope.unmounted() => break,
                _ = interval.tick() => {
                    match self.check_expiry().await {
                        Some(MonitorState::Authenticated(_)) => {}
                        _ => break,
                    }
                }
            }
        }
        tracing::trace!("Session timeout polling stopped");
    }

    /// Renew the session and clear the warning.
    ///
    /// On failure the warning stays up and the error is returned.
    pub async fn extend(&self) -> Result<(), SessionError> {
        let Some(result) = self.scope.run(self.store.refresh_session()).await else {
            return Ok(());
        };

        match result {
            Ok(session) => {
                tracing::info!(expires_at = session.expires_at, "Session extended");
                self.publish(MonitorState::Authenticated(WarningState {
                    time_remaining: Some(session.time_remaining(now_epoch())),
                    show: false,
                }));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to extend session: {}", e);
                Err(e)
            }
        }
    }

    /// End the session. Returns the page to navigate to.
    pub async fn log_out(&self) -> Result<String, SessionError> {
        if let Err(e) = self.store.sign_out().await {
            tracing::warn!("Sign-out from timeout warning failed: {}", e);
            return Err(e);
        }

        tracing::info!("Signed out from timeout warning");
        self.publish(MonitorState::Unauthenticated);
        self.scope.unmount();
        Ok(self.config.login_url.clone())
    }
}

impl<S: SessionStore + ?Sized + 'static> SessionTimeoutWidget<S> {
    /// Run the widget on the tokio runtime. Dropping the handle unmounts it.
    pub fn spawn(self: Arc<Self>) -> WidgetHandle {
        let guard = self.scope.drop_guard();
        let task = tokio::spawn(async move { self.run().await });
        WidgetHandle {
            task,
            _guard: guard,
        }
    }
}

pub struct WidgetHandle {
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl WidgetHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Unmount the widget and wait for the polling task to stop
    pub async fn shutdown(self) {
        let WidgetHandle {
            task,
            _guard: guard,
        } = self;
        drop(guard);
        if let Err(e) = task.await {
            tracing::error!("Session timeout task failed: {}", e);
        }
    }
}
