//! Host-facing event types.
//!
//! The canvas host owns the native input plumbing. It forwards each key
//! press as a [`KeyPress`], applies the suppression flags the dispatcher
//! returns in [`DispatchOutcome`] to its native event, and relays the
//! canvas bus notifications (`pointer-enter-canvas`,
//! `pointer-leave-canvas`, `before-host-destroy`) as [`HostEvent`]s.

use smallvec::SmallVec;
use tracing::trace;

use crate::combo::CodeSet;
use crate::keymap::Key;

/// A raw key press as delivered by the host: modifier flags plus the
/// primary key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            alt: false,
            shift: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// True when any modifier flag is held alongside the primary key.
    #[inline]
    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt || self.shift
    }

    /// Canonical code set for this press. Ctrl and Meta both contribute
    /// the single Control code; the primary key's code is dropped when it
    /// duplicates a modifier code already present (pressing the Control
    /// key itself while the ctrl flag is set yields one code, not two).
    pub fn code_set(&self) -> CodeSet {
        let mut codes: CodeSet = SmallVec::new();

        if self.ctrl || self.meta {
            codes.push(Key::Control.code());
        }
        if self.alt {
            codes.push(Key::Alt.code());
        }
        if self.shift {
            codes.push(Key::Shift.code());
        }

        let key_code = self.key.code();
        if !codes.contains(&key_code) {
            codes.push(key_code);
        }

        codes.sort_unstable();
        codes
    }
}

/// What a dispatch did, expressed as flags the host applies to the
/// underlying native event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Number of aliases whose code set matched the press.
    pub matched_aliases: usize,

    /// Total handlers invoked across all matched aliases.
    pub handlers_invoked: usize,

    /// Host should call the native `preventDefault` equivalent.
    pub default_prevented: bool,

    /// Host should call the native `stopPropagation` equivalent.
    pub propagation_stopped: bool,
}

impl DispatchOutcome {
    /// True when at least one registered alias matched.
    #[inline]
    pub fn handled(&self) -> bool {
        self.matched_aliases > 0
    }
}

/// Canvas bus notification relayed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Pointer moved into the canvas region.
    PointerEnter,

    /// Pointer left the canvas region.
    PointerLeave,

    /// Host is about to destroy the canvas; release the key listener.
    BeforeDestroy,
}

/// Scoped ownership of the host's key-listener subscription.
///
/// The host hands the dispatcher the unsubscribe closure it got from its
/// event-subscription API; the dispatcher releases it exactly once,
/// either at explicit teardown or on drop.
pub struct ListenerGuard {
    release_fn: Option<Box<dyn FnOnce() + Send>>,
}

impl ListenerGuard {
    pub fn new(release_fn: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release_fn: Some(Box::new(release_fn)),
        }
    }

    /// Run the unsubscribe closure. Safe to call more than once; only the
    /// first call does anything.
    pub fn release(&mut self) {
        if let Some(f) = self.release_fn.take() {
            trace!("releasing host key-listener subscription");
            f();
        }
    }

    pub fn is_released(&self) -> bool {
        self.release_fn.is_none()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_code_set_includes_held_modifiers() {
        let press = KeyPress::new(Key::V).with_ctrl();
        assert_eq!(press.code_set().as_slice(), &[17, 86]);

        let press = KeyPress::new(Key::Z).with_ctrl().with_shift();
        assert_eq!(press.code_set().as_slice(), &[16, 17, 90]);
    }

    #[test]
    fn test_meta_maps_to_control_code() {
        let ctrl = KeyPress::new(Key::V).with_ctrl();
        let meta = KeyPress::new(Key::V).with_meta();
        assert_eq!(ctrl.code_set(), meta.code_set());
    }

    #[test]
    fn test_modifier_key_press_dedupes_own_code() {
        // Holding Control while the pressed key *is* Control: one code.
        let press = KeyPress::new(Key::Control).with_ctrl();
        assert_eq!(press.code_set().as_slice(), &[17]);
    }

    #[test]
    fn test_has_modifier() {
        assert!(!KeyPress::new(Key::Enter).has_modifier());
        assert!(KeyPress::new(Key::Enter).with_shift().has_modifier());
        assert!(KeyPress::new(Key::Enter).with_meta().has_modifier());
    }

    #[test]
    fn test_guard_releases_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in = Arc::clone(&calls);

        let mut guard = ListenerGuard::new(move || {
            calls_in.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!guard.is_released());
        guard.release();
        guard.release();
        drop(guard);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
