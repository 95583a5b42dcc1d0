//! Theme preference controller
//!
//! Single source of truth for the on-screen appearance. Reconciles the
//! persisted user choice with the environment color-scheme signal and keeps
//! exactly one appearance marker on the render root.
//!
//! While the preference is `System` the controller holds exactly one
//! color-scheme subscription; any other preference holds none.

use super::color_scheme::ColorSchemeSignal;
use super::preference_store::{PreferenceStore, THEME_KEY};
use super::signal::Subscription;
use crate::model::theme::{ResolvedAppearance, ThemePreference};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

/// Appearance used when the environment cannot report one
pub const FALLBACK_APPEARANCE: ResolvedAppearance = ResolvedAppearance::Light;

#[derive(Debug, Default)]
struct RootMarkers {
    markers: BTreeSet<ResolvedAppearance>,
    revision: u64,
}

/// Top-level rendering context carrying the appearance marker.
/// Clones share the same markers.
#[derive(Debug, Clone, Default)]
pub struct RenderRoot {
    inner: Rc<RefCell<RootMarkers>>,
}

impl RenderRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently applied markers, in order
    #[cfg(test)]
    pub fn markers(&self) -> Vec<ResolvedAppearance> {
        self.inner.borrow().markers.iter().copied().collect()
    }

    /// The applied appearance, if exactly one marker is present
    pub fn appearance(&self) -> Option<ResolvedAppearance> {
        let inner = self.inner.borrow();
        if inner.markers.len() == 1 {
            inner.markers.iter().next().copied()
        } else {
            None
        }
    }

    /// Incremented on every application
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    fn apply(&self, appearance: ResolvedAppearance) {
        let mut inner = self.inner.borrow_mut();
        inner.markers.clear();
        inner.markers.insert(appearance);
        inner.revision += 1;
    }
}

struct ControllerState {
    preference: ThemePreference,
    store: Box<dyn PreferenceStore>,
    root: RenderRoot,
}

/// Owns the theme preference state machine
pub struct ThemeController {
    state: Rc<RefCell<ControllerState>>,
    signal: Rc<dyn ColorSchemeSignal>,
    subscription: Option<Subscription>,
}

impl ThemeController {
    /// Read the persisted preference, subscribe if it is `System`, then
    /// resolve and apply once. Nothing is applied before this returns.
    pub fn new(
        store: Box<dyn PreferenceStore>,
        signal: Rc<dyn ColorSchemeSignal>,
        root: RenderRoot,
    ) -> Self {
        let preference = load_preference(store.as_ref());
        info!(%preference, "theme preference loaded");

        let mut controller = Self {
            state: Rc::new(RefCell::new(ControllerState {
                preference,
                store,
                root,
            })),
            signal,
            subscription: None,
        };
        controller.sync_subscription();
        controller.apply_appearance(controller.resolve_appearance());
        controller
    }

    pub fn preference(&self) -> ThemePreference {
        self.state.borrow().preference
    }

    /// Switch preference, persist it (best effort) and re-apply
    pub fn set_preference(&mut self, preference: ThemePreference) {
        {
            let mut state = self.state.borrow_mut();
            state.preference = preference;
            if let Err(e) = state.store.write(THEME_KEY, preference.as_str()) {
                warn!(error = %e, %preference, "failed to persist theme preference");
            }
        }
        info!(%preference, "theme preference changed");

        self.sync_subscription();
        self.apply_appearance(self.resolve_appearance());
    }

    /// Advance Light → Dark → System → Light
    pub fn cycle_preference(&mut self) -> ThemePreference {
        let next = self.preference().next();
        self.set_preference(next);
        next
    }

    pub fn resolve_appearance(&self) -> ResolvedAppearance {
        resolve(self.preference(), self.signal.as_ref())
    }

    /// Replace whatever marker is on the render root with `appearance`
    pub fn apply_appearance(&self, appearance: ResolvedAppearance) {
        self.state.borrow().root.apply(appearance);
        debug!(%appearance, "appearance applied");
    }

    pub fn root(&self) -> RenderRoot {
        self.state.borrow().root.clone()
    }

    /// Whether a color-scheme subscription is currently held
    pub fn is_following_system(&self) -> bool {
        self.subscription.is_some()
    }

    /// Release the color-scheme subscription. Dropping the controller does
    /// the same.
    pub fn shutdown(&mut self) {
        if self.subscription.take().is_some() {
            debug!("color scheme subscription released");
        }
    }

    fn sync_subscription(&mut self) {
        let wants = self.preference() == ThemePreference::System;
        match (wants, self.subscription.is_some()) {
            (true, false) => {
                let weak: Weak<RefCell<ControllerState>> = Rc::downgrade(&self.state);
                self.subscription = Some(self.signal.on_color_scheme_change(Box::new(
                    move |is_dark| {
                        let Some(state) = weak.upgrade() else {
                            return;
                        };
                        let state = state.borrow();
                        if state.preference == ThemePreference::System {
                            let appearance = ResolvedAppearance::from_dark(*is_dark);
                            state.root.apply(appearance);
                            debug!(%appearance, "appearance follows system change");
                        }
                    },
                )));
                debug!("color scheme subscription acquired");
            }
            (false, true) => self.shutdown(),
            _ => {}
        }
    }
}

impl Drop for ThemeController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Read the stored preference. Missing, unreadable or unknown values fall
/// back to `System`.
fn load_preference(store: &dyn PreferenceStore) -> ThemePreference {
    match store.read(THEME_KEY) {
        Ok(Some(value)) => ThemePreference::parse(&value).unwrap_or_else(|| {
            warn!(%value, "unknown stored theme preference");
            ThemePreference::System
        }),
        Ok(None) => ThemePreference::System,
        Err(e) => {
            warn!(error = %e, "failed to read theme preference");
            ThemePreference::System
        }
    }
}

/// Resolve a preference against the environment signal
pub fn resolve(preference: ThemePreference, signal: &dyn ColorSchemeSignal) -> ResolvedAppearance {
    match preference {
        ThemePreference::Light => ResolvedAppearance::Light,
        ThemePreference::Dark => ResolvedAppearance::Dark,
        ThemePreference::System => signal
            .prefers_dark()
            .map(ResolvedAppearance::from_dark)
            .unwrap_or(FALLBACK_APPEARANCE),
    }
}
