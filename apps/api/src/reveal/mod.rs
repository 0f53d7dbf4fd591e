// Only the options and CSS classes are reached from the server at runtime;
// the rest is exercised by the tests below.
#![cfg_attr(not(test), allow(dead_code))]

//! Reveal-on-scroll: a one-way visibility latch driven by viewport intersection.
//!
//! The browser does the actual watching (see `assets/app.js`). This module is
//! the authoritative model of that behaviour and the source of the parameters
//! the page hands to the client:
//!
//! - `RevealOptions` carries the 10% threshold, the -50px bottom root margin and
//!   the per-item stagger delay.
//! - `RevealLatch` is the two-state machine (Hidden → Visible, never back).
//! - `RevealObserver` + `Observation` pair registration with release: dropping
//!   the guard deregisters the target.
//!
//! At runtime the server only uses `RevealOptions` and `RevealState::css_class`
//! to write the page. The browser script is the live observer; the latch,
//! geometry and registry here are the reference model it mirrors.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_BOTTOM_MARGIN_PX: f64 = -50.0;
/// Delay added per sibling when callers stagger a list of items.
pub const STAGGER_STEP_MS: u32 = 150;

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn right(&self) -> f64 {
        self.x + self.width
    }

    fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// CSS-style root margin, in pixels. Negative values shrink the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    fn apply(&self, root: Rect) -> Rect {
        Rect {
            x: root.x - self.left,
            y: root.y - self.top,
            width: root.width + self.left + self.right,
            height: root.height + self.top + self.bottom,
        }
    }

    /// Serialized the way `IntersectionObserver` expects it.
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: DEFAULT_BOTTOM_MARGIN_PX,
            left: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
    pub delay_ms: u32,
}

impl RevealOptions {
    pub fn with_delay(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            ..Self::default()
        }
    }

    /// Delay for the `index`-th sibling in a staggered list.
    pub fn staggered(index: usize) -> Self {
        let step = u32::try_from(index).unwrap_or(u32::MAX);
        Self::with_delay(step.saturating_mul(STAGGER_STEP_MS))
    }
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: RootMargin::default(),
            delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    /// Visible fraction of the target, 0.0 – 1.0.
    pub ratio: f64,
}

impl IntersectionEntry {
    /// Intersects `target` with the margin-adjusted `viewport`.
    ///
    /// Edge-adjacent rects count as intersecting with ratio 0. A zero-area
    /// target that touches the root reports ratio 1.
    pub fn compute(target: Rect, viewport: Rect, margin: &RootMargin) -> Self {
        let root = margin.apply(viewport);
        let left = target.x.max(root.x);
        let top = target.y.max(root.y);
        let width = target.right().min(root.right()) - left;
        let height = target.bottom().min(root.bottom()) - top;

        if width < 0.0 || height < 0.0 {
            return Self {
                is_intersecting: false,
                ratio: 0.0,
            };
        }

        let target_area = target.area();
        let ratio = if target_area == 0.0 {
            1.0
        } else {
            (width * height / target_area).clamp(0.0, 1.0)
        };
        Self {
            is_intersecting: true,
            ratio,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Latch
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Visible,
}

impl RevealState {
    pub fn css_class(self) -> &'static str {
        match self {
            RevealState::Hidden => "reveal",
            RevealState::Visible => "reveal active",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RevealLatch {
    state: RevealState,
}

impl RevealLatch {
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Returns true only on the Hidden → Visible transition.
    pub fn observe(&mut self, entry: &IntersectionEntry, threshold: f64) -> bool {
        if self.state == RevealState::Visible {
            return false;
        }
        if entry.is_intersecting && entry.ratio >= threshold {
            self.state = RevealState::Visible;
            return true;
        }
        false
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Observer registry
// ────────────────────────────────────────────────────────────────────────────

pub type ObservationId = u64;

#[derive(Debug)]
struct Target {
    bounds: Rect,
    latch: RevealLatch,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: ObservationId,
    targets: BTreeMap<ObservationId, Target>,
}

/// Watches any number of targets against a single viewport.
///
/// Single-threaded, like the event loop it models.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    options: RevealOptions,
    registry: Rc<RefCell<Registry>>,
}

impl RevealObserver {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            registry: Rc::new(RefCell::new(Registry::default())),
        }
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Registers a target. The returned guard deregisters it when dropped.
    pub fn observe(&self, bounds: Rect) -> Observation {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.targets.insert(
            id,
            Target {
                bounds,
                latch: RevealLatch::default(),
            },
        );
        Observation {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Evaluates every registered, still-hidden target against `viewport`.
    /// Returns the ids that became visible on this pass.
    pub fn update_viewport(&self, viewport: Rect) -> Vec<ObservationId> {
        let mut registry = self.registry.borrow_mut();
        let mut revealed = Vec::new();
        for (id, target) in registry.targets.iter_mut() {
            if target.latch.state() == RevealState::Visible {
                continue;
            }
            let entry =
                IntersectionEntry::compute(target.bounds, viewport, &self.options.root_margin);
            if target.latch.observe(&entry, self.options.threshold) {
                revealed.push(*id);
            }
        }
        revealed
    }

    pub fn watched(&self) -> usize {
        self.registry.borrow().targets.len()
    }
}

/// Scoped registration of one target with a `RevealObserver`.
#[derive(Debug)]
pub struct Observation {
    id: ObservationId,
    registry: Weak<RefCell<Registry>>,
}

impl Observation {
    pub fn id(&self) -> ObservationId {
        self.id
    }

    /// Current state; `Hidden` if the observer itself is gone.
    pub fn state(&self) -> RevealState {
        self.registry
            .upgrade()
            .and_then(|registry| {
                registry
                    .borrow()
                    .targets
                    .get(&self.id)
                    .map(|t| t.latch.state())
            })
            .unwrap_or_default()
    }

    /// Moves the target, e.g. after layout changes.
    pub fn set_bounds(&self, bounds: Rect) {
        if let Some(registry) = self.registry.upgrade() {
            if let Some(target) = registry.borrow_mut().targets.get_mut(&self.id) {
                target.bounds = bounds;
            }
        }
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().targets.remove(&self.id);
        }
    }
}
