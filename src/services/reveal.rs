//! Viewport reveal sequencer
//!
//! Turns visibility crossings into scheduled entrance transitions. Siblings
//! in a group start `stagger_interval` apart, and a higher index never
//! starts before a lower index that has already been scheduled.

use super::viewport::{ObservationHandle, VisibilityObserver};
use crate::model::reveal::{RevealGroup, RevealableElement, Transition, VisualState};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Start offset for the element at `index` within its group
pub fn compute_start_delay(index: usize, stagger_interval: Duration, base_delay: Duration) -> Duration {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    base_delay.saturating_add(stagger_interval.saturating_mul(index))
}

/// Emitted by `process` for each scheduling decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// The element's transition will begin at `start_at`
    Started { key: String, start_at: Instant },
    /// A repeatable element left the viewport and returned to hidden
    Reset { key: String },
}

#[derive(Debug)]
struct Entry {
    element: RevealableElement,
    group: Option<(String, usize)>,
    transition: Option<Transition>,
    handles: Vec<ObservationHandle>,
}

#[derive(Debug)]
struct GroupEntry {
    stagger_interval: Duration,
    members: Vec<String>,
}

#[derive(Debug, Clone)]
struct HandleEntry {
    key: String,
    repeatable: bool,
}

/// Schedules entrance transitions for observed elements
pub struct RevealSequencer<O: VisibilityObserver> {
    observer: O,
    entries: HashMap<String, Entry>,
    groups: HashMap<String, GroupEntry>,
    handles: HashMap<ObservationHandle, HandleEntry>,
}

impl<O: VisibilityObserver> RevealSequencer<O> {
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            entries: HashMap::new(),
            groups: HashMap::new(),
            handles: HashMap::new(),
        }
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Register a standalone element
    pub fn register(&mut self, element: RevealableElement) {
        self.insert_entry(element, None);
    }

    /// Register every element of `group`, indexed by position
    pub fn register_group(&mut self, group: RevealGroup) {
        let members = group.elements.iter().map(|e| e.key.clone()).collect();
        for (index, element) in group.elements.into_iter().enumerate() {
            self.insert_entry(element, Some((group.key.clone(), index)));
        }
        self.groups.insert(
            group.key,
            GroupEntry {
                stagger_interval: group.stagger_interval,
                members,
            },
        );
    }

    fn insert_entry(&mut self, element: RevealableElement, group: Option<(String, usize)>) {
        if let Some(previous) = self.entries.remove(&element.key) {
            for handle in previous.handles {
                self.release(handle);
            }
        }
        self.entries.insert(
            element.key.clone(),
            Entry {
                element,
                group,
                transition: None,
                handles: Vec::new(),
            },
        );
    }

    /// Track `key` for visibility. Registration is the first evaluation:
    /// an element already on screen fires on the next `process`.
    pub fn observe(&mut self, key: &str, threshold: f32, trigger_once: bool) -> ObservationHandle {
        let handle = self.observer.observe(key, threshold, trigger_once);
        let Some(entry) = self.entries.get_mut(key) else {
            // Nothing to animate; hand back an already released handle
            self.observer.release(handle);
            return handle;
        };
        entry.handles.push(handle);
        self.handles.insert(
            handle,
            HandleEntry {
                key: key.to_string(),
                repeatable: !trigger_once,
            },
        );
        handle
    }

    /// Stop tracking. Safe to call any number of times.
    pub fn release(&mut self, handle: ObservationHandle) {
        self.observer.release(handle);
        if let Some(released) = self.handles.remove(&handle) {
            if let Some(entry) = self.entries.get_mut(&released.key) {
                entry.handles.retain(|h| *h != handle);
            }
        }
    }

    /// Release every observation this sequencer holds
    pub fn release_all(&mut self) {
        let handles: Vec<ObservationHandle> = self.handles.keys().copied().collect();
        for handle in handles {
            self.release(handle);
        }
    }

    /// Drain visibility changes and schedule the resulting transitions
    pub fn process(&mut self, now: Instant) -> Vec<RevealEvent> {
        let mut events = Vec::new();

        for change in self.observer.take_changes() {
            let Some(handle_entry) = self.handles.get(&change.handle).cloned() else {
                continue;
            };

            if change.visible {
                if !handle_entry.repeatable {
                    // The observer already stopped watching this one
                    self.handles.remove(&change.handle);
                    if let Some(entry) = self.entries.get_mut(&handle_entry.key) {
                        entry.handles.retain(|h| *h != change.handle);
                    }
                }
                if let Some(start_at) = self.trigger(&handle_entry.key, now) {
                    events.push(RevealEvent::Started {
                        key: handle_entry.key.clone(),
                        start_at,
                    });
                }
            } else if handle_entry.repeatable {
                if let Some(entry) = self.entries.get_mut(&handle_entry.key) {
                    if entry.element.triggered {
                        entry.element.triggered = false;
                        entry.transition = None;
                        events.push(RevealEvent::Reset {
                            key: handle_entry.key.clone(),
                        });
                    }
                }
            }
        }

        // A later lower-index trigger may have pushed siblings back
        for event in events.iter_mut() {
            if let RevealEvent::Started { key, start_at } = event {
                if let Some(start) = self.start_time(key) {
                    *start_at = start;
                }
            }
        }

        for event in &events {
            debug!(?event, "reveal");
        }
        events
    }

    /// Mark `key` triggered and schedule its transition
    fn trigger(&mut self, key: &str, now: Instant) -> Option<Instant> {
        let entry = self.entries.get(key)?;
        if entry.element.triggered {
            return None;
        }

        let (index, stagger, siblings) = match &entry.group {
            Some((group_key, index)) => match self.groups.get(group_key) {
                Some(group) => (*index, group.stagger_interval, group.members.clone()),
                None => (0, Duration::ZERO, Vec::new()),
            },
            None => (0, Duration::ZERO, Vec::new()),
        };

        let mut start_at = now + compute_start_delay(index, stagger, entry.element.delay);

        // Never start before a lower-index sibling already scheduled
        for sibling in siblings.iter().take(index) {
            if let Some(transition) = self.entries.get(sibling).and_then(|e| e.transition) {
                start_at = start_at.max(transition.start);
            }
        }

        // Pending higher-index siblings must not start before this one
        for sibling in siblings.iter().skip(index + 1) {
            if let Some(sibling_entry) = self.entries.get_mut(sibling) {
                if let Some(transition) = sibling_entry.transition.as_mut() {
                    if !transition.has_started(now) && transition.start < start_at {
                        transition.start = start_at;
                    }
                }
            }
        }

        let entry = self.entries.get_mut(key)?;
        entry.element.triggered = true;
        entry.transition = Some(Transition {
            start: start_at,
            duration: entry.element.duration,
        });
        Some(start_at)
    }

    pub fn is_triggered(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|e| e.element.triggered)
            .unwrap_or(false)
    }

    /// When the element's transition begins, if scheduled
    pub fn start_time(&self, key: &str) -> Option<Instant> {
        self.entries.get(key)?.transition.map(|t| t.start)
    }

    /// Visual state of `key` at `now`. Unknown keys render fully shown.
    pub fn visual_state(&self, key: &str, now: Instant) -> VisualState {
        let Some(entry) = self.entries.get(key) else {
            return VisualState::SHOWN;
        };
        let variant = entry.element.variant;
        match entry.transition {
            Some(transition) => variant.hidden.lerp(&variant.visible, transition.progress(now)),
            None => variant.hidden,
        }
    }
}

impl<O: VisibilityObserver> Drop for RevealSequencer<O> {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::reveal::RevealVariant;
    use crate::services::viewport::VisibilityChange;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    /// Observer whose crossings are scripted by the test
    #[derive(Default, Clone)]
    struct ScriptedObserver {
        state: Rc<RefCell<ScriptState>>,
    }

    #[derive(Default)]
    struct ScriptState {
        next_id: u64,
        targets: HashMap<ObservationHandle, (String, bool)>,
        active: HashSet<ObservationHandle>,
        visible_on_register: HashSet<String>,
        pending: Vec<VisibilityChange>,
        release_calls: usize,
    }

    impl ScriptedObserver {
        fn set_visible(&self, target: &str, visible: bool) {
            let mut state = self.state.borrow_mut();
            let mut handles: Vec<ObservationHandle> = state
                .targets
                .iter()
                .filter(|(h, (t, _))| t == target && state.active.contains(*h))
                .map(|(h, _)| *h)
                .collect();
            handles.sort();
            for handle in handles {
                state.pending.push(VisibilityChange { handle, visible });
                let trigger_once = state.targets[&handle].1;
                if visible && trigger_once {
                    state.active.remove(&handle);
                }
            }
        }

        fn set_visible_on_register(&self, target: &str) {
            self.state
                .borrow_mut()
                .visible_on_register
                .insert(target.to_string());
        }

        fn active(&self) -> usize {
            self.state.borrow().active.len()
        }

        fn release_calls(&self) -> usize {
            self.state.borrow().release_calls
        }
    }

    impl VisibilityObserver for ScriptedObserver {
        fn observe(&mut self, target: &str, _threshold: f32, trigger_once: bool) -> ObservationHandle {
            let mut state = self.state.borrow_mut();
            let handle = ObservationHandle::new(state.next_id);
            state.next_id += 1;
            state.targets.insert(handle, (target.to_string(), trigger_once));
            if state.visible_on_register.contains(target) {
                state.pending.push(VisibilityChange {
                    handle,
                    visible: true,
                });
                if !trigger_once {
                    state.active.insert(handle);
                }
            } else {
                state.active.insert(handle);
            }
            handle
        }

        fn release(&mut self, handle: ObservationHandle) {
            let mut state = self.state.borrow_mut();
            state.release_calls += 1;
            state.active.remove(&handle);
            state.pending.retain(|c| c.handle != handle);
        }

        fn take_changes(&mut self) -> Vec<VisibilityChange> {
            std::mem::take(&mut self.state.borrow_mut().pending)
        }
    }

    fn group(key: &str, count: usize, stagger_ms: u64) -> RevealGroup {
        let mut group = RevealGroup::new(key, Duration::from_millis(stagger_ms));
        for i in 0..count {
            group.push(RevealableElement::new(
                format!("{key}-{i}"),
                RevealVariant::slide_up(2),
            ));
        }
        group
    }

    fn started_at(events: &[RevealEvent], key: &str) -> Option<Instant> {
        events.iter().find_map(|event| match event {
            RevealEvent::Started { key: k, start_at } if k == key => Some(*start_at),
            _ => None,
        })
    }

    #[test]
    fn test_compute_start_delay() {
        assert_eq!(
            compute_start_delay(0, Duration::from_millis(200), Duration::ZERO),
            Duration::ZERO
        );
        assert_eq!(
            compute_start_delay(3, Duration::from_millis(200), Duration::from_millis(50)),
            Duration::from_millis(650)
        );
    }

    #[test]
    fn test_compute_start_delay_saturates() {
        let delay = compute_start_delay(usize::MAX, Duration::MAX, Duration::MAX);
        assert_eq!(delay, Duration::MAX);
    }

    #[test]
    fn test_group_staggers_simultaneous_visibility() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        sequencer.register_group(group("skills", 4, 100));
        for i in 0..4 {
            sequencer.observe(&format!("skills-{i}"), 0.2, true);
        }

        for i in 0..4 {
            observer.set_visible(&format!("skills-{i}"), true);
        }
        let t = Instant::now();
        let events = sequencer.process(t);

        for i in 0..4u64 {
            assert_eq!(
                started_at(&events, &format!("skills-{i}")),
                Some(t + Duration::from_millis(100 * i))
            );
        }
    }

    #[test]
    fn test_ordering_holds_for_reversed_arrival() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        let mut g = group("jobs", 3, 100);
        // A long delay on the first element must hold back its siblings
        g.elements[0].delay = Duration::from_millis(500);
        sequencer.register_group(g);
        for i in 0..3 {
            sequencer.observe(&format!("jobs-{i}"), 0.2, true);
        }

        for i in (0..3).rev() {
            observer.set_visible(&format!("jobs-{i}"), true);
        }
        let t = Instant::now();
        let events = sequencer.process(t);

        let starts: Vec<Instant> = (0..3)
            .map(|i| sequencer.start_time(&format!("jobs-{i}")).unwrap())
            .collect();
        assert_eq!(starts[0], t + Duration::from_millis(500));
        assert!(starts[0] <= starts[1]);
        assert!(starts[1] <= starts[2]);

        // Reported start times match the final schedule
        for (i, start) in starts.iter().enumerate() {
            assert_eq!(started_at(&events, &format!("jobs-{i}")), Some(*start));
        }
    }

    #[test]
    fn test_zero_stagger_ties() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        sequencer.register_group(group("g", 3, 0));
        for i in 0..3 {
            sequencer.observe(&format!("g-{i}"), 0.0, true);
            observer.set_visible(&format!("g-{i}"), true);
        }
        let t = Instant::now();
        sequencer.process(t);
        for i in 0..3 {
            assert_eq!(sequencer.start_time(&format!("g-{i}")), Some(t));
        }
    }

    #[test]
    fn test_trigger_once_never_resets() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        sequencer.register(RevealableElement::new("hero", RevealVariant::fade_in()));
        sequencer.observe("hero", 0.5, true);

        observer.set_visible("hero", true);
        let t = Instant::now();
        assert_eq!(sequencer.process(t).len(), 1);
        assert!(sequencer.is_triggered("hero"));

        observer.set_visible("hero", false);
        observer.set_visible("hero", true);
        assert!(sequencer.process(t + Duration::from_secs(1)).is_empty());
        assert!(sequencer.is_triggered("hero"));
        assert_eq!(sequencer.start_time("hero"), Some(t));
    }

    #[test]
    fn test_repeatable_element_resets_and_fires_again() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        sequencer.register(RevealableElement::new("banner", RevealVariant::fade_in()));
        sequencer.observe("banner", 0.5, false);

        let t = Instant::now();
        observer.set_visible("banner", true);
        assert_eq!(sequencer.process(t).len(), 1);

        observer.set_visible("banner", false);
        assert_eq!(
            sequencer.process(t + Duration::from_secs(1)),
            vec![RevealEvent::Reset {
                key: "banner".to_string()
            }]
        );
        assert!(!sequencer.is_triggered("banner"));

        observer.set_visible("banner", true);
        let later = t + Duration::from_secs(2);
        assert_eq!(started_at(&sequencer.process(later), "banner"), Some(later));
    }

    #[test]
    fn test_visible_at_registration_fires() {
        let observer = ScriptedObserver::default();
        observer.set_visible_on_register("card");
        let mut sequencer = RevealSequencer::new(observer.clone());
        sequencer.register(RevealableElement::new("card", RevealVariant::fade_in()));
        sequencer.observe("card", 0.2, true);

        let events = sequencer.process(Instant::now());
        assert_eq!(events.len(), 1);
        assert!(sequencer.is_triggered("card"));
    }

    #[test]
    fn test_released_before_visible_never_fires() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        sequencer.register(RevealableElement::new("card", RevealVariant::fade_in()));
        let handle = sequencer.observe("card", 0.2, true);

        sequencer.release(handle);
        observer.set_visible("card", true);
        assert!(sequencer.process(Instant::now()).is_empty());
        assert!(!sequencer.is_triggered("card"));
    }

    #[test]
    fn test_observing_unregistered_key_is_inert() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        let handle = sequencer.observe("ghost", 0.2, false);
        assert_eq!(observer.active(), 0);

        observer.set_visible("ghost", true);
        assert!(sequencer.process(Instant::now()).is_empty());
        sequencer.release(handle);
        drop(sequencer);
        assert_eq!(observer.active(), 0);
    }

    #[test]
    fn test_double_release_is_noop() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        sequencer.register(RevealableElement::new("card", RevealVariant::fade_in()));
        let handle = sequencer.observe("card", 0.2, false);

        sequencer.release(handle);
        sequencer.release(handle);
        observer.set_visible("card", true);
        assert!(sequencer.process(Instant::now()).is_empty());
    }

    #[test]
    fn test_release_after_fired_is_noop() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        sequencer.register(RevealableElement::new("card", RevealVariant::fade_in()));
        let handle = sequencer.observe("card", 0.2, true);
        observer.set_visible("card", true);
        sequencer.process(Instant::now());

        sequencer.release(handle);
        assert!(sequencer.is_triggered("card"));
    }

    #[test]
    fn test_visual_state_follows_transition() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        let element = RevealableElement::new("card", RevealVariant::slide_up(3))
            .with_duration(Duration::from_millis(200));
        sequencer.register(element);
        sequencer.observe("card", 0.2, true);

        let t = Instant::now();
        assert_eq!(sequencer.visual_state("card", t).offset_y, 3);

        observer.set_visible("card", true);
        sequencer.process(t);
        assert_eq!(
            sequencer.visual_state("card", t + Duration::from_millis(200)),
            VisualState::SHOWN
        );
    }

    #[test]
    fn test_unknown_key_renders_shown() {
        let sequencer = RevealSequencer::new(ScriptedObserver::default());
        assert_eq!(sequencer.visual_state("nope", Instant::now()), VisualState::SHOWN);
    }

    #[test]
    fn test_groups_are_independent() {
        let observer = ScriptedObserver::default();
        let mut sequencer = RevealSequencer::new(observer.clone());
        sequencer.register_group(group("a", 2, 100));
        sequencer.register_group(group("b", 2, 100));
        for key in ["a-0", "a-1", "b-0", "b-1"] {
            sequencer.observe(key, 0.2, true);
        }

        observer.set_visible("b-1", true);
        let t = Instant::now();
        sequencer.process(t);
        assert_eq!(sequencer.start_time("b-1"), Some(t + Duration::from_millis(100)));

        observer.set_visible("a-0", true);
        sequencer.process(t);
        assert_eq!(sequencer.start_time("a-0"), Some(t));
    }

    #[test]
    fn test_drop_releases_observations() {
        let observer = ScriptedObserver::default();
        {
            let mut sequencer = RevealSequencer::new(observer.clone());
            sequencer.register_group(group("g", 3, 50));
            for i in 0..3 {
                sequencer.observe(&format!("g-{i}"), 0.2, true);
            }
            assert_eq!(observer.active(), 3);
        }
        assert_eq!(observer.active(), 0);
        assert_eq!(observer.release_calls(), 3);
    }
}
