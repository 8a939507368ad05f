//! # hotkeyr - Keyboard Shortcut Dispatch for Canvas Editors
//!
//! A shortcut dispatcher for interactive canvas hosts (mind-map editors,
//! diagram tools). The host forwards raw key presses and pointer
//! enter/leave notifications; the dispatcher matches presses against
//! registered shortcut specs and invokes the bound handlers.
//!
//! ## Key Features
//! - Multi-alias shortcut specs (`"Tab | Insert"`, `"Control+z"`)
//! - Order-independent modifier matching via canonical code sets
//! - Pause/resume and pointer-inside-canvas gating
//! - Single-slot registry snapshot for modal editing modes
//! - Scoped ownership of the host key-listener subscription

pub mod combo;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod keymap;

// Re-export main types for easy use
pub use combo::{KeyCombo, KeySpec};
pub use config::DispatcherConfig;
pub use dispatcher::{ShortcutDispatcher, ShortcutHandler};
pub use error::{KeyError, KeyResult};
pub use event::{DispatchOutcome, HostEvent, KeyPress, ListenerGuard};
pub use keymap::Key;
