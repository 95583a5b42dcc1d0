//! Entrance animation data: visual states, elements and groups
//!
//! An element moves from its `hidden` state to its `visible` state exactly
//! once (unless observed as repeatable). Offsets are in terminal cells.

use std::time::{Duration, Instant};

/// Default duration of an entrance transition
pub const DEFAULT_REVEAL_DURATION: Duration = Duration::from_millis(450);

/// A point in an element's entrance animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// 0.0 = invisible, 1.0 = fully drawn
    pub opacity: f32,
    /// Horizontal displacement in cells
    pub offset_x: i16,
    /// Vertical displacement in cells
    pub offset_y: i16,
}

impl VisualState {
    pub const SHOWN: VisualState = VisualState {
        opacity: 1.0,
        offset_x: 0,
        offset_y: 0,
    };

    pub const fn new(opacity: f32, offset_x: i16, offset_y: i16) -> Self {
        Self {
            opacity,
            offset_x,
            offset_y,
        }
    }

    /// Interpolate toward `to` by `t` in `0.0..=1.0`
    pub fn lerp(&self, to: &VisualState, t: f32) -> VisualState {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: i16, b: i16| -> i16 { (a as f32 + (b as f32 - a as f32) * t).round() as i16 };
        VisualState {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            offset_x: mix(self.offset_x, to.offset_x),
            offset_y: mix(self.offset_y, to.offset_y),
        }
    }

    pub fn is_invisible(&self) -> bool {
        self.opacity <= f32::EPSILON
    }
}

/// Pair of hidden/visible descriptors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealVariant {
    pub hidden: VisualState,
    pub visible: VisualState,
}

impl RevealVariant {
    pub fn fade_in() -> Self {
        Self {
            hidden: VisualState::new(0.0, 0, 0),
            visible: VisualState::SHOWN,
        }
    }

    /// Rise into place from `rows` below
    pub fn slide_up(rows: i16) -> Self {
        Self {
            hidden: VisualState::new(0.0, 0, rows),
            visible: VisualState::SHOWN,
        }
    }

    /// Enter from the left by `cols`
    pub fn slide_from_left(cols: i16) -> Self {
        Self {
            hidden: VisualState::new(0.0, -cols, 0),
            visible: VisualState::SHOWN,
        }
    }

    /// Enter from the right by `cols`
    pub fn slide_from_right(cols: i16) -> Self {
        Self {
            hidden: VisualState::new(0.0, cols, 0),
            visible: VisualState::SHOWN,
        }
    }
}

/// One animatable unit of the page
#[derive(Debug, Clone, PartialEq)]
pub struct RevealableElement {
    pub key: String,
    pub variant: RevealVariant,
    pub delay: Duration,
    pub duration: Duration,
    /// Set on the first visible crossing
    pub triggered: bool,
}

impl RevealableElement {
    pub fn new(key: impl Into<String>, variant: RevealVariant) -> Self {
        Self {
            key: key.into(),
            variant,
            delay: Duration::ZERO,
            duration: DEFAULT_REVEAL_DURATION,
            triggered: false,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Ordered siblings that enter one after another
#[derive(Debug, Clone, PartialEq)]
pub struct RevealGroup {
    pub key: String,
    pub stagger_interval: Duration,
    pub elements: Vec<RevealableElement>,
}

impl RevealGroup {
    pub fn new(key: impl Into<String>, stagger_interval: Duration) -> Self {
        Self {
            key: key.into(),
            stagger_interval,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: RevealableElement) {
        self.elements.push(element);
    }
}

/// A scheduled hidden → visible transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub start: Instant,
    pub duration: Duration,
}

impl Transition {
    /// Eased progress at `now`, 0.0 before start and 1.0 once finished
    pub fn progress(&self, now: Instant) -> f32 {
        if now < self.start {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.duration_since(self.start).as_secs_f32();
        ease_out_cubic(elapsed / self.duration.as_secs_f32())
    }

    pub fn has_started(&self, now: Instant) -> bool {
        now >= self.start
    }
}

/// Fast start, soft landing
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
