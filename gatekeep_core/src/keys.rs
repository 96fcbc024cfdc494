//! Keyboard shortcuts for the review surface.
//!
//! Keys never drive the controller directly: they are translated into the
//! same [`ReviewCommand`] a pointer click produces. Listening is scoped with
//! [`ShortcutSubscription`], which deregisters itself when dropped.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::ReviewCommand;

/// Physical key identity, reduced to what the review surface cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Return / Enter.
    Enter,
    /// Escape.
    Escape,
    /// A printable character.
    Char(char),
    /// Any other key.
    Other,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub ctrl: bool,
    /// Alt / Option.
    pub alt: bool,
    /// Command / Super.
    pub meta: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Returns `true` if any modifier is held.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// A key press delivered to the review surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

impl Key {
    /// A key press without modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// A key press with `modifiers` held.
    #[must_use]
    pub const fn with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// The review command bound to this key, if any.
    ///
    /// Enter without modifiers approves and Escape rejects. Requesting an
    /// alternative has no default binding.
    #[must_use]
    pub const fn command(&self) -> Option<ReviewCommand> {
        match self.code {
            KeyCode::Enter if !self.modifiers.any() => Some(ReviewCommand::Approve),
            KeyCode::Escape => Some(ReviewCommand::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct HubState {
    next_id: u64,
    active: BTreeMap<u64, String>,
}

/// Registry of live shortcut listeners.
///
/// Cloning the hub yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct ShortcutHub {
    state: Arc<Mutex<HubState>>,
}

impl ShortcutHub {
    /// Create a hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered until the returned guard drops.
    #[must_use]
    pub fn subscribe(&self, label: impl Into<String>) -> ShortcutSubscription {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.active.insert(id, label.into());
        ShortcutSubscription {
            state: Arc::clone(&self.state),
            id,
        }
    }

    /// Number of listeners currently registered.
    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.lock().active.len()
    }

    /// Labels of the registered listeners, oldest first.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.lock().active.values().cloned().collect()
    }

    /// Deregister every listener, e.g. while another surface owns the keyboard.
    ///
    /// Subscriptions stay alive as guards but no longer receive keys.
    pub fn clear(&self) {
        self.lock().active.clear();
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Guard for one registered listener.
#[derive(Debug)]
pub struct ShortcutSubscription {
    state: Arc<Mutex<HubState>>,
    id: u64,
}

impl ShortcutSubscription {
    /// The command `key` triggers for this listener.
    ///
    /// Returns `None` once the listener has been deregistered from its hub.
    #[must_use]
    pub fn route(&self, key: &Key) -> Option<ReviewCommand> {
        let registered = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active
            .contains_key(&self.id);
        if registered {
            key.command()
        } else {
            None
        }
    }
}

impl Drop for ShortcutSubscription {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active
            .remove(&self.id);
    }
}
