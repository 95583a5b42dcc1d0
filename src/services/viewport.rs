//! Viewport visibility observation
//!
//! Elements are laid out in content coordinates (a tall virtual canvas);
//! the viewport is the window of that canvas currently on screen. Each
//! observation reports crossings of its visibility threshold.

use ratatui::layout::Rect;
use std::collections::HashMap;

/// Identifies one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationHandle(u64);

impl ObservationHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A threshold crossing for one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub handle: ObservationHandle,
    pub visible: bool,
}

/// Capability for tracking element visibility
pub trait VisibilityObserver {
    /// Start tracking `target`. Visibility is evaluated immediately, so a
    /// target already on screen produces a change right away.
    fn observe(&mut self, target: &str, threshold: f32, trigger_once: bool) -> ObservationHandle;

    /// Stop tracking. Unknown or already finished handles are ignored.
    fn release(&mut self, handle: ObservationHandle);

    /// Drain the crossings recorded since the last call
    fn take_changes(&mut self) -> Vec<VisibilityChange>;
}

/// Fraction of `element` covered by `viewport`, in `0.0..=1.0`
pub fn visible_fraction(element: Rect, viewport: Rect) -> f32 {
    let left = element.x.max(viewport.x) as u32;
    let top = element.y.max(viewport.y) as u32;
    let right = (element.x as u32 + element.width as u32)
        .min(viewport.x as u32 + viewport.width as u32);
    let bottom = (element.y as u32 + element.height as u32)
        .min(viewport.y as u32 + viewport.height as u32);

    let area = element.width as u32 * element.height as u32;
    if area == 0 {
        // Degenerate elements count as fully visible when their origin is inside
        let inside = element.x >= viewport.x
            && (element.x as u32) < viewport.x as u32 + viewport.width as u32
            && element.y >= viewport.y
            && (element.y as u32) < viewport.y as u32 + viewport.height as u32;
        return if inside { 1.0 } else { 0.0 };
    }
    if right <= left || bottom <= top {
        return 0.0;
    }

    ((right - left) * (bottom - top)) as f32 / area as f32
}

/// Whether `fraction` satisfies `threshold`
pub fn meets_threshold(fraction: f32, threshold: f32) -> bool {
    fraction > 0.0 && fraction >= threshold.clamp(0.0, 1.0)
}

#[derive(Debug)]
struct Observation {
    target: String,
    threshold: f32,
    trigger_once: bool,
    visible: bool,
}

/// Rectangle-intersection observer over a scrollable viewport
#[derive(Debug)]
pub struct ViewportObserver {
    viewport: Rect,
    bounds: HashMap<String, Rect>,
    observations: HashMap<ObservationHandle, Observation>,
    pending: Vec<VisibilityChange>,
    next_id: u64,
}

impl ViewportObserver {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            bounds: HashMap::new(),
            observations: HashMap::new(),
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Move or resize the viewport and re-evaluate every observation
    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.evaluate_all();
        }
    }

    /// Record where `target` sits in content coordinates
    pub fn set_bounds(&mut self, target: &str, bounds: Rect) {
        let changed = self.bounds.get(target) != Some(&bounds);
        self.bounds.insert(target.to_string(), bounds);
        if changed {
            self.evaluate_all();
        }
    }

    #[cfg(test)]
    pub fn active_observations(&self) -> usize {
        self.observations.len()
    }

    fn allocate_handle(&mut self) -> ObservationHandle {
        let handle = ObservationHandle(self.next_id);
        self.next_id += 1;
        handle
    }

    fn evaluate_all(&mut self) {
        let mut handles: Vec<ObservationHandle> = self.observations.keys().copied().collect();
        handles.sort();
        for handle in handles {
            self.evaluate(handle);
        }
    }

    fn evaluate(&mut self, handle: ObservationHandle) {
        let Some(observation) = self.observations.get_mut(&handle) else {
            return;
        };

        let visible = self
            .bounds
            .get(&observation.target)
            .map(|bounds| meets_threshold(visible_fraction(*bounds, self.viewport), observation.threshold))
            .unwrap_or(false);

        if visible == observation.visible {
            return;
        }

        observation.visible = visible;
        self.pending.push(VisibilityChange { handle, visible });

        if visible && observation.trigger_once {
            self.observations.remove(&handle);
        }
    }
}

impl VisibilityObserver for ViewportObserver {
    fn observe(&mut self, target: &str, threshold: f32, trigger_once: bool) -> ObservationHandle {
        let handle = self.allocate_handle();
        if !self.bounds.contains_key(target) {
            // Nothing to watch: the handle stays inert
            tracing::debug!(target, "observe called for a target without bounds");
            return handle;
        }

        self.observations.insert(
            handle,
            Observation {
                target: target.to_string(),
                threshold: threshold.clamp(0.0, 1.0),
                trigger_once,
                visible: false,
            },
        );
        self.evaluate(handle);
        handle
    }

    fn release(&mut self, handle: ObservationHandle) {
        self.observations.remove(&handle);
        self.pending.retain(|change| change.handle != handle);
    }

    fn take_changes(&mut self) -> Vec<VisibilityChange> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(y: u16, height: u16) -> Rect {
        Rect::new(0, y, 80, height)
    }

    #[test]
    fn test_visible_fraction() {
        let element = Rect::new(0, 10, 10, 10);
        assert_eq!(visible_fraction(element, viewport(0, 30)), 1.0);
        assert_eq!(visible_fraction(element, viewport(15, 30)), 0.5);
        assert_eq!(visible_fraction(element, viewport(20, 30)), 0.0);
        assert_eq!(visible_fraction(element, viewport(0, 10)), 0.0);
    }

    #[test]
    fn test_visible_fraction_degenerate_element() {
        let element = Rect::new(5, 5, 0, 0);
        assert_eq!(visible_fraction(element, viewport(0, 10)), 1.0);
        assert_eq!(visible_fraction(element, viewport(6, 10)), 0.0);
    }

    #[test]
    fn test_meets_threshold() {
        assert!(meets_threshold(0.5, 0.5));
        assert!(!meets_threshold(0.49, 0.5));
        assert!(meets_threshold(0.01, 0.0));
        assert!(!meets_threshold(0.0, 0.0));
        assert!(meets_threshold(1.0, 3.0));
    }

    #[test]
    fn test_observe_already_visible_fires_immediately() {
        let mut observer = ViewportObserver::new(viewport(0, 20));
        observer.set_bounds("card", Rect::new(0, 2, 20, 4));

        let handle = observer.observe("card", 0.5, true);
        assert_eq!(
            observer.take_changes(),
            vec![VisibilityChange {
                handle,
                visible: true
            }]
        );
        // Terminal after the first visible report
        assert_eq!(observer.active_observations(), 0);
    }

    #[test]
    fn test_scrolling_reports_crossings() {
        let mut observer = ViewportObserver::new(viewport(0, 10));
        observer.set_bounds("card", Rect::new(0, 20, 20, 4));

        let handle = observer.observe("card", 0.5, false);
        assert!(observer.take_changes().is_empty());

        observer.set_viewport(viewport(11, 10));
        assert!(observer.take_changes().is_empty(), "only a quarter visible");

        observer.set_viewport(viewport(12, 10));
        assert_eq!(
            observer.take_changes(),
            vec![VisibilityChange {
                handle,
                visible: true
            }]
        );

        observer.set_viewport(viewport(0, 10));
        assert_eq!(
            observer.take_changes(),
            vec![VisibilityChange {
                handle,
                visible: false
            }]
        );
    }

    #[test]
    fn test_missing_target_is_inert() {
        let mut observer = ViewportObserver::new(viewport(0, 10));
        let handle = observer.observe("ghost", 0.1, true);
        assert_eq!(observer.active_observations(), 0);

        // Bounds appearing later do not revive an inert handle
        observer.set_bounds("ghost", Rect::new(0, 0, 5, 5));
        assert!(observer.take_changes().is_empty());

        observer.release(handle);
        observer.release(handle);
    }

    #[test]
    fn test_release_is_idempotent_and_silences() {
        let mut observer = ViewportObserver::new(viewport(0, 10));
        observer.set_bounds("card", Rect::new(0, 20, 20, 4));
        let handle = observer.observe("card", 0.1, false);

        observer.release(handle);
        observer.release(handle);
        observer.set_viewport(viewport(18, 10));
        assert!(observer.take_changes().is_empty());
    }

    #[test]
    fn test_release_drops_pending_change() {
        let mut observer = ViewportObserver::new(viewport(0, 10));
        observer.set_bounds("card", Rect::new(0, 0, 20, 4));
        let handle = observer.observe("card", 0.1, true);
        observer.release(handle);
        assert!(observer.take_changes().is_empty());
    }
}
