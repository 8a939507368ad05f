//! ShortcutDispatcher: registry, gating, and the dispatch loop.
//!
//! One dispatcher exists per canvas instance. Application features bind
//! handlers with [`ShortcutDispatcher::register`]; the host forwards raw
//! key presses through [`ShortcutDispatcher::dispatch`] and relays canvas
//! bus notifications through [`ShortcutDispatcher::handle_host_event`].
//! All mutation happens through `&mut self` on the host's single logical
//! thread; there is no internal locking.

use std::mem;
use std::sync::Arc;

use compact_str::CompactString;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace, warn};

use crate::combo::{KeyCombo, KeySpec, normalize_alias, split_aliases};
use crate::config::DispatcherConfig;
use crate::error::KeyResult;
use crate::event::{DispatchOutcome, HostEvent, KeyPress, ListenerGuard};

/// Shortcut callback. Identity (for removal) is `Arc::ptr_eq`, so keep a
/// clone of the `Arc` you registered if you intend to unregister it.
pub type ShortcutHandler = Arc<dyn Fn() + Send + Sync>;

/// One registered alias: its parsed combo plus handlers in registration
/// order.
struct Binding {
    combo: KeyCombo,
    handlers: Vec<ShortcutHandler>,
}

/// Insertion-ordered alias registry. Handlers for an alias run in
/// registration order; aliases are visited in registration order too,
/// though only coinciding code sets can make more than one fire.
type Registry = IndexMap<CompactString, Binding, FxBuildHasher>;

pub struct ShortcutDispatcher {
    config: DispatcherConfig,

    /// Parsed passthrough combos from config. An event matching any of
    /// these fires handlers but never suppresses the native event.
    passthrough: Vec<KeyCombo>,

    registry: Registry,

    /// Single-slot snapshot for modal editing modes. Not an `Option`:
    /// restoring without a prior save swaps in an empty registry, which
    /// is exactly the destructive semantics save/restore advertise.
    snapshot: Registry,

    paused: bool,
    pointer_inside: bool,
    edit_overlay_active: bool,

    listener: Option<ListenerGuard>,
}

impl ShortcutDispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        let mut passthrough: Vec<KeyCombo> = Vec::with_capacity(config.passthrough.len());
        for spec in &config.passthrough {
            match KeyCombo::parse(spec, spec) {
                Ok(combo) => passthrough.push(combo),
                Err(e) => warn!("ignoring unparsable passthrough combo '{spec}': {e}"),
            }
        }

        debug!(
            restrict_to_canvas = config.restrict_to_canvas,
            passthrough = passthrough.len(),
            "shortcut dispatcher created"
        );

        Self {
            config,
            passthrough,
            registry: Registry::default(),
            snapshot: Registry::default(),
            paused: false,
            pointer_inside: false,
            edit_overlay_active: false,
            listener: None,
        }
    }

    /// Suspend shortcut response. Idempotent.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume shortcut response. Idempotent.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Move the live registry into the snapshot slot and clear it.
    /// Overwrites any previous snapshot; anything registered between this
    /// call and [`restore`](Self::restore) is lost on restore.
    pub fn save_and_clear(&mut self) {
        debug!(aliases = self.registry.len(), "saving and clearing registry");
        self.snapshot = mem::take(&mut self.registry);
    }

    /// Move the snapshot back into the live registry and clear the slot.
    /// Without a prior save this installs an empty registry.
    pub fn restore(&mut self) {
        debug!(aliases = self.snapshot.len(), "restoring saved registry");
        self.registry = mem::take(&mut self.snapshot);
    }

    /// Bind `handler` to every alias in `spec` (`"Tab | Insert"` binds
    /// both). Duplicate registrations are not an error; duplicates simply
    /// both fire. Fails without touching the registry if any alias has an
    /// unknown token.
    pub fn register(&mut self, spec: &str, handler: ShortcutHandler) -> KeyResult<()> {
        let parsed = KeySpec::parse(spec)?;

        for (label, combo) in parsed.aliases() {
            let binding = self
                .registry
                .entry(label.clone())
                .or_insert_with(|| Binding {
                    combo: combo.clone(),
                    handlers: Vec::new(),
                });
            binding.handlers.push(Arc::clone(&handler));
            trace!(alias = %label, handlers = binding.handlers.len(), "shortcut registered");
        }

        Ok(())
    }

    /// Remove every alias in `spec` entirely, handlers and all. Quiet
    /// no-op for aliases that were never registered.
    pub fn unregister(&mut self, spec: &str) {
        for alias in split_aliases(spec) {
            let label = normalize_alias(alias);
            if self.registry.shift_remove(label.as_str()).is_some() {
                trace!(alias = %label, "shortcut unregistered");
            }
        }
    }

    /// Remove the first identity-equal `handler` from each alias in
    /// `spec`. An alias whose handler list empties is deleted outright;
    /// the registry never keeps empty bindings.
    pub fn unregister_handler(&mut self, spec: &str, handler: &ShortcutHandler) {
        for alias in split_aliases(spec) {
            let label = normalize_alias(alias);
            let Some(binding) = self.registry.get_mut(label.as_str()) else {
                continue;
            };

            if let Some(idx) = binding
                .handlers
                .iter()
                .position(|h| Arc::ptr_eq(h, handler))
            {
                binding.handlers.remove(idx);
                trace!(alias = %label, "handler removed");
            }

            if binding.handlers.is_empty() {
                self.registry.shift_remove(label.as_str());
            }
        }
    }

    /// Handlers bound to the **last** alias in `spec`, in registration
    /// order. Deliberately not a union across aliases: with a multi-alias
    /// spec like `"Tab | Insert"` only the `Insert` binding is consulted,
    /// matching the long-standing behavior host code relies on. An
    /// unregistered alias yields an empty list.
    pub fn lookup(&self, spec: &str) -> Vec<ShortcutHandler> {
        let mut result: Vec<ShortcutHandler> = Vec::new();
        for alias in split_aliases(spec) {
            let label = normalize_alias(alias);
            result = self
                .registry
                .get(label.as_str())
                .map(|b| b.handlers.clone())
                .unwrap_or_default();
        }
        result
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Host signal: a text-edit overlay opened or closed. While active,
    /// pointer-leave notifications do not clear the inside-canvas gate,
    /// so shortcuts keep working when the pointer drifts over the
    /// overlay.
    pub fn set_edit_overlay_active(&mut self, active: bool) {
        self.edit_overlay_active = active;
    }

    pub fn is_pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// React to a canvas bus notification.
    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::PointerEnter => {
                self.pointer_inside = true;
            }
            HostEvent::PointerLeave => {
                if !self.edit_overlay_active {
                    self.pointer_inside = false;
                }
            }
            HostEvent::BeforeDestroy => {
                self.teardown();
            }
        }
    }

    /// Take ownership of the host's key-listener subscription handle.
    pub fn attach_listener(&mut self, guard: ListenerGuard) {
        self.listener = Some(guard);
    }

    /// Release the key-listener subscription. Safe to call repeatedly;
    /// the handle is released exactly once.
    pub fn teardown(&mut self) {
        if let Some(mut guard) = self.listener.take() {
            debug!("dispatcher teardown, releasing key listener");
            guard.release();
        }
    }

    /// Match a key press against the registry and invoke the handlers of
    /// every matching alias, in registration order.
    ///
    /// Returns the suppression flags the host must apply to its native
    /// event. A matched press sets both flags unless the press is one of
    /// the configured passthrough combinations (paste by default, whose
    /// native event the host still needs). A paused dispatcher, or one
    /// gated on pointer focus while the pointer is outside the canvas,
    /// matches nothing.
    pub fn dispatch(&mut self, press: &KeyPress) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        if self.paused {
            trace!("dispatch skipped: paused");
            return outcome;
        }
        if self.config.restrict_to_canvas && !self.pointer_inside {
            trace!("dispatch skipped: pointer outside canvas");
            return outcome;
        }

        let codes = press.code_set();
        let passthrough = self.passthrough.iter().any(|c| c.matches(&codes));

        // Collect matches before invoking anything so handlers never run
        // while the registry is being traversed.
        let mut matched: Vec<ShortcutHandler> = Vec::new();
        for (label, binding) in &self.registry {
            if binding.combo.matches(&codes) {
                trace!(alias = %label, "shortcut matched");
                outcome.matched_aliases += 1;
                matched.extend(binding.handlers.iter().cloned());
            }
        }

        if outcome.matched_aliases > 0 && !passthrough {
            outcome.default_prevented = true;
            outcome.propagation_stopped = true;
        }

        for handler in &matched {
            handler();
        }
        outcome.handlers_invoked = matched.len();

        outcome
    }
}

impl Default for ShortcutDispatcher {
    fn default() -> Self {
        Self::new(DispatcherConfig::default())
    }
}

impl std::fmt::Debug for ShortcutDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutDispatcher")
            .field("aliases", &self.registry.len())
            .field("snapshot_aliases", &self.snapshot.len())
            .field("paused", &self.paused)
            .field("pointer_inside", &self.pointer_inside)
            .finish()
    }
}
