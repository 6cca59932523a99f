// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What actions may ask of the host application.

use std::cell::{Cell, RefCell};
use std::fmt::{self, Debug};

use crate::error::ActionError;

/// Importance of a user notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Informational result.
    Info,
    /// Completed successfully.
    Success,
    /// Completed with caveats.
    Warning,
    /// Failed.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Critical => "critical",
        })
    }
}

/// Host application handle available to actions.
///
/// Methods take `&self`; implementations use interior mutability.
pub trait HostServices: Debug {
    /// Shows a message to the user.
    fn notify(&self, severity: Severity, title: &str, message: &str);

    /// Replaces the clipboard text.
    fn set_clipboard_text(&self, text: &str);

    /// Zooms the map to a scale denominator.
    fn set_map_scale(&self, denominator: f64) -> Result<(), ActionError>;

    /// Asks the user a yes/no question.
    fn confirm(&self, _title: &str, _message: &str) -> bool {
        true
    }
}

/// One call to [`HostServices::notify`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Importance.
    pub severity: Severity,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
}

/// Host services that record every request.
///
/// Useful for headless hosts and tests.
#[derive(Debug)]
pub struct RecordingServices {
    notifications: RefCell<Vec<Notification>>,
    clipboard: RefCell<Option<String>>,
    scale: Cell<Option<f64>>,
    answer: Cell<bool>,
}

impl Default for RecordingServices {
    fn default() -> Self {
        Self {
            notifications: RefCell::new(Vec::new()),
            clipboard: RefCell::new(None),
            scale: Cell::new(None),
            answer: Cell::new(true),
        }
    }
}

impl RecordingServices {
    /// A recorder that confirms every question.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the answer given to [`HostServices::confirm`].
    pub fn answer_confirmations(&self, answer: bool) {
        self.answer.set(answer);
    }

    /// Notifications so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    /// Most recent notification.
    #[must_use]
    pub fn last_notification(&self) -> Option<Notification> {
        self.notifications.borrow().last().cloned()
    }

    /// Current clipboard text.
    #[must_use]
    pub fn clipboard(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }

    /// Last requested scale denominator.
    #[must_use]
    pub fn map_scale(&self) -> Option<f64> {
        self.scale.get()
    }

    /// Forgets everything recorded.
    pub fn clear(&self) {
        self.notifications.borrow_mut().clear();
        self.clipboard.borrow_mut().take();
        self.scale.set(None);
    }
}

impl HostServices for RecordingServices {
    fn notify(&self, severity: Severity, title: &str, message: &str) {
        self.notifications.borrow_mut().push(Notification {
            severity,
            title: title.to_owned(),
            message: message.to_owned(),
        });
    }

    fn set_clipboard_text(&self, text: &str) {
        *self.clipboard.borrow_mut() = Some(text.to_owned());
    }

    fn set_map_scale(&self, denominator: f64) -> Result<(), ActionError> {
        if !denominator.is_finite() || denominator <= 0.0 {
            return Err(ActionError::Host(format!("invalid scale 1:{denominator}")));
        }
        self.scale.set(Some(denominator));
        Ok(())
    }

    fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.answer.get()
    }
}
