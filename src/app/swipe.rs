//! Swipe gesture tracking for the card review screen
//!
//! A card is dragged horizontally with the mouse and released. Releasing past
//! the commit threshold records a verdict and flings the card off screen;
//! releasing short of it springs the card back to center. A release with no
//! meaningful drag counts as a tap, which flips the card. The verdict is
//! recorded at release time, not when the fling animation lands.

/// Columns of drag needed to commit a verdict on release
pub const COMMIT_THRESHOLD: f32 = 12.0;

/// Columns the card travels during a committed fling
pub const FLING_DISTANCE: f32 = 60.0;

/// Fling duration in seconds at normal animation speed
pub const FLING_SECS: f32 = 0.35;

/// Spring-back duration in seconds at normal animation speed
pub const SPRING_SECS: f32 = 0.25;

/// Drags under this many columns count as a tap
pub const TAP_TOLERANCE: f32 = 1.0;

/// How a card was rated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeVerdict {
    /// Swiped right: the topic is known
    Know,
    /// Swiped left: the topic needs review
    Review,
}

/// Outcome of releasing a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeRelease {
    /// Past the threshold: verdict recorded, card flings off screen
    Committed(SwipeVerdict),
    /// Short of the threshold: card springs back to center
    SpringBack,
    /// No meaningful drag: treat as a card flip
    Tap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    Dragging,
    Flinging(SwipeVerdict),
    SpringingBack,
}

/// Drag and animation state for the card on screen
#[derive(Debug, Clone, Default)]
pub struct SwipeGesture {
    phase: Phase,
    /// Column where the drag started
    origin: f32,
    /// Current horizontal displacement in columns
    offset: f32,
    /// Displacement at the moment the animation started
    start_offset: f32,
    /// Seconds into the current animation
    elapsed: f32,
    /// Animation duration multiplier (1.0 = normal, 0.0 = instant)
    speed: f32,
}

fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

impl SwipeGesture {
    pub fn new(animation_speed: f32) -> Self {
        Self { speed: animation_speed, ..Default::default() }
    }

    /// Begin a drag at the given column. Ignored while a card is in flight.
    pub fn press(&mut self, column: u16) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Dragging;
        self.origin = f32::from(column);
        self.offset = 0.0;
    }

    /// Update the drag position
    pub fn drag(&mut self, column: u16) {
        if self.phase == Phase::Dragging {
            self.offset = f32::from(column) - self.origin;
        }
    }

    /// End the drag and decide its outcome
    ///
    /// Returns `None` for a release that was never preceded by a press.
    pub fn release(&mut self) -> Option<SwipeRelease> {
        if self.phase != Phase::Dragging {
            return None;
        }
        if self.offset.abs() < TAP_TOLERANCE {
            self.phase = Phase::Idle;
            self.offset = 0.0;
            return Some(SwipeRelease::Tap);
        }
        if self.offset.abs() >= COMMIT_THRESHOLD {
            let verdict =
                if self.offset > 0.0 { SwipeVerdict::Know } else { SwipeVerdict::Review };
            self.start_animation(Phase::Flinging(verdict));
            return Some(SwipeRelease::Committed(verdict));
        }
        self.start_animation(Phase::SpringingBack);
        Some(SwipeRelease::SpringBack)
    }

    /// Fling the card from center, as if released past the threshold
    ///
    /// Used by the keyboard bindings, which carry no drag position.
    pub fn fling(&mut self, verdict: SwipeVerdict) {
        self.start_animation(Phase::Flinging(verdict));
    }

    fn start_animation(&mut self, phase: Phase) {
        self.start_offset = self.offset;
        self.elapsed = 0.0;
        self.phase = phase;
    }

    /// Advance animations by `dt` seconds
    ///
    /// Returns `true` exactly once per fling, on the tick where the card
    /// leaves the screen.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.phase {
            Phase::Flinging(verdict) => {
                self.elapsed += dt;
                let t = self.progress(FLING_SECS);
                let target = match verdict {
                    SwipeVerdict::Know => FLING_DISTANCE,
                    SwipeVerdict::Review => -FLING_DISTANCE,
                };
                self.offset = self.start_offset + (target - self.start_offset) * ease_out_cubic(t);
                if t >= 1.0 {
                    self.phase = Phase::Idle;
                    self.offset = 0.0;
                    return true;
                }
                false
            }
            Phase::SpringingBack => {
                self.elapsed += dt;
                let t = self.progress(SPRING_SECS);
                self.offset = self.start_offset * (1.0 - ease_out_cubic(t));
                if t >= 1.0 {
                    self.phase = Phase::Idle;
                    self.offset = 0.0;
                }
                false
            }
            _ => false,
        }
    }

    fn progress(&self, base_secs: f32) -> f32 {
        let duration = base_secs * self.speed;
        if duration > 0.0 {
            (self.elapsed / duration).min(1.0)
        } else {
            1.0
        }
    }

    /// Horizontal card displacement in whole columns
    pub fn offset(&self) -> i16 {
        self.offset.round() as i16
    }

    /// Signed drag distance, for directional hints while dragging
    pub fn pull(&self) -> f32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Flinging(_) | Phase::SpringingBack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn release_without_press_is_ignored() {
        let mut gesture = SwipeGesture::new(0.0);
        assert_eq!(gesture.release(), None);
    }

    #[test]
    fn tap_without_movement_reports_tap() {
        let mut gesture = SwipeGesture::new(0.0);
        gesture.press(40);
        gesture.drag(40);

        assert_eq!(gesture.release(), Some(SwipeRelease::Tap));
        assert!(!gesture.is_animating());
        assert_eq!(gesture.offset(), 0);
    }

    #[test]
    fn short_drag_springs_back() {
        let mut gesture = SwipeGesture::new(0.0);
        gesture.press(40);
        gesture.drag(45);

        assert_eq!(gesture.release(), Some(SwipeRelease::SpringBack));
        assert!(gesture.is_animating());

        // Instant speed: one tick lands the card back at center
        assert!(!gesture.tick(0.016));
        assert_eq!(gesture.offset(), 0);
        assert!(!gesture.is_animating());
    }

    #[test]
    fn right_drag_past_threshold_commits_know() {
        let mut gesture = SwipeGesture::new(0.0);
        gesture.press(40);
        gesture.drag(55);

        // Verdict is reported at release, before the fling finishes
        assert_eq!(
            gesture.release(),
            Some(SwipeRelease::Committed(SwipeVerdict::Know))
        );
        assert!(gesture.is_animating());
    }

    #[test]
    fn left_drag_past_threshold_commits_review() {
        let mut gesture = SwipeGesture::new(0.0);
        gesture.press(40);
        gesture.drag(25);

        assert_eq!(
            gesture.release(),
            Some(SwipeRelease::Committed(SwipeVerdict::Review))
        );
    }

    #[test]
    fn drag_just_under_threshold_does_not_commit() {
        let mut gesture = SwipeGesture::new(0.0);
        gesture.press(40);
        gesture.drag(51);

        assert_eq!(gesture.release(), Some(SwipeRelease::SpringBack));
    }

    #[test]
    fn fling_finishes_and_reports_once() {
        let mut gesture = SwipeGesture::new(0.0);
        gesture.fling(SwipeVerdict::Know);

        assert!(gesture.tick(0.016));
        assert!(!gesture.tick(0.016));
        assert_eq!(gesture.offset(), 0);
    }

    #[test]
    fn fling_travels_toward_the_edge() {
        let mut gesture = SwipeGesture::new(1.0);
        gesture.fling(SwipeVerdict::Know);

        assert!(!gesture.tick(0.1));
        assert!(gesture.offset() > 0);
        assert!(f32::from(gesture.offset()) < FLING_DISTANCE);

        // Run past the full duration
        assert!(gesture.tick(1.0));
    }

    #[test]
    fn review_fling_travels_left() {
        let mut gesture = SwipeGesture::new(1.0);
        gesture.fling(SwipeVerdict::Review);

        gesture.tick(0.1);
        assert!(gesture.offset() < 0);
    }

    #[test]
    fn press_during_fling_is_ignored() {
        let mut gesture = SwipeGesture::new(1.0);
        gesture.fling(SwipeVerdict::Know);
        gesture.tick(0.1);

        gesture.press(40);
        assert!(!gesture.is_dragging());
        assert!(gesture.is_animating());
    }

    #[test]
    fn pull_reflects_drag_direction() {
        let mut gesture = SwipeGesture::new(0.0);
        gesture.press(40);
        gesture.drag(34);

        assert!(gesture.pull() < 0.0);
        assert!(gesture.is_dragging());
    }

    #[test]
    fn spring_back_eases_toward_center() {
        let mut gesture = SwipeGesture::new(1.0);
        gesture.press(40);
        gesture.drag(48);
        gesture.release();

        gesture.tick(0.1);
        let mid = gesture.offset().abs();
        assert!(mid < 8);

        gesture.tick(1.0);
        assert_eq!(gesture.offset(), 0);
    }
}
