//! Effect boundary traits.
//!
//! Toasts, navigation and the session store are app-wide facilities the
//! coordinator drives but does not own. They are fire-and-forget: assumed
//! always available, never failing. Test doubles record the calls.

use huddle_core::UserId;

/// One user-facing toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastSpec {
    pub title: String,
    pub message: String,
    /// Seconds before the toast dismisses itself.
    pub auto_dismiss_secs: u32,
    /// Label of an optional acknowledgement action.
    pub action_label: Option<String>,
}

impl ToastSpec {
    pub fn new(title: impl Into<String>, message: impl Into<String>, auto_dismiss_secs: u32) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            auto_dismiss_secs,
            action_label: None,
        }
    }

    pub fn with_action(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }
}

/// Receives derived toasts.
pub trait ToastSink {
    fn push(&mut self, toast: ToastSpec);
}

/// Receives derived redirects.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

/// Receives session updates from reissued auth tokens.
pub trait SessionSink {
    /// Install the reissued token as the ambient session.
    fn set_session(&mut self, token: &str, user_id: &UserId);

    /// Remember where the welcome flow should send the viewer afterwards.
    fn set_welcome_destination(&mut self, path: &str);
}

/// The three sinks bundled, as the coordinator consumes them.
pub struct EffectSinks<'a> {
    pub toasts: &'a mut dyn ToastSink,
    pub navigator: &'a mut dyn Navigator,
    pub session: &'a mut dyn SessionSink,
}
