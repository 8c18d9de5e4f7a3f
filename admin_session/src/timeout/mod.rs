//! Background expiry monitor for an open admin screen.
//!
//! The widget confirms the session once on mount, then polls it on a fixed
//! interval and publishes a [`MonitorState`] through a watch channel. The
//! rendering side only ever reads that channel.

mod state;
mod widget;

pub use state::{MonitorState, TimeoutConfig, WarningState, evaluate_warning};
pub use widget::{SessionTimeoutWidget, WidgetHandle};
