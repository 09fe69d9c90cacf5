//! Transient toast notifications.
//!
//! DESIGN
//! ======
//! The queue is plain data so workflow code can push notifications without a
//! rendering surface; `ToastContainer` owns display and auto-dismissal.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Severity of a toast, used for styling only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    #[default]
    Info,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Info => "toast--info",
            Self::Error => "toast--error",
        }
    }
}

/// A notification waiting to be shown or dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// A notification the workflow wants shown, before it has an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: ToastKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, message: message.into() }
    }
}

/// Screen corner the container is pinned to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ToastPosition {
    pub fn class(self) -> &'static str {
        match self {
            Self::TopLeft => "toast-container--top-left",
            Self::TopRight => "toast-container--top-right",
            Self::BottomLeft => "toast-container--bottom-left",
            Self::BottomRight => "toast-container--bottom-right",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastTheme {
    Light,
    #[default]
    Dark,
}

impl ToastTheme {
    pub fn class(self) -> &'static str {
        match self {
            Self::Light => "toast-container--light",
            Self::Dark => "toast-container--dark",
        }
    }
}

/// Container presentation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastOptions {
    pub position: ToastPosition,
    /// Milliseconds before a toast dismisses itself; `0` keeps it until clicked.
    pub auto_close_ms: u32,
    pub theme: ToastTheme,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self { position: ToastPosition::TopRight, auto_close_ms: 3000, theme: ToastTheme::Dark }
    }
}

/// Ordered queue of visible toasts.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
    /// Highest id already handed to an auto-close timer.
    auto_close_claimed: u64,
}

impl ToastState {
    /// Append a toast and return its id. Ids are never reused.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, kind, message: message.into() });
        id
    }

    pub fn notify(&mut self, notification: Notification) -> u64 {
        self.push(notification.kind, notification.message)
    }

    /// Ids of visible toasts that have no auto-close timer yet. Each id is
    /// returned at most once.
    pub fn claim_auto_close(&mut self) -> Vec<u64> {
        let claimed = self.auto_close_claimed;
        self.auto_close_claimed = self.next_id;
        self.toasts.iter().map(|toast| toast.id).filter(|id| *id > claimed).collect()
    }

    /// Remove a toast; returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }
}
