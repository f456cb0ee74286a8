//! View transitions — a short highlight when the lyrics view opens or closes.
//!
//! The state change itself is immediate; only the rendering lags. While a
//! transition runs the entered pane is drawn with a highlight that fades out
//! in steps as the window elapses.

use std::time::{Duration, Instant};

pub const TRANSITION_DURATION: Duration = Duration::from_millis(240);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Entering the lyrics view.
    Enter,
    /// Returning to the list.
    Leave,
}

/// How to render the pane a transition is moving into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionHint {
    #[default]
    Idle,
    /// `step` counts down 2, 1, 0 as the highlight fades.
    Active { direction: Direction, step: u8 },
}

pub struct ViewTransition {
    enabled: bool,
    running: Option<(Direction, Instant)>,
}

impl ViewTransition {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            running: None,
        }
    }

    pub fn start(&mut self, direction: Direction) {
        self.start_at(direction, Instant::now());
    }

    pub fn start_at(&mut self, direction: Direction, since: Instant) {
        if self.enabled {
            self.running = Some((direction, since));
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Advance the animation. Returns `true` if the hint changed.
    pub fn tick(&mut self) -> bool {
        match self.running {
            Some((_, since)) if since.elapsed() >= TRANSITION_DURATION => {
                self.running = None;
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    pub fn hint(&self) -> TransitionHint {
        let Some((direction, since)) = self.running else {
            return TransitionHint::Idle;
        };
        let elapsed = since.elapsed();
        if elapsed >= TRANSITION_DURATION {
            return TransitionHint::Idle;
        }
        let third = TRANSITION_DURATION / 3;
        let step = 2 - (elapsed.as_millis() / third.as_millis()).min(2) as u8;
        TransitionHint::Active { direction, step }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_never_runs() {
        let mut t = ViewTransition::new(false);
        t.start(Direction::Enter);
        assert!(!t.is_running());
        assert_eq!(t.hint(), TransitionHint::Idle);
    }

    #[test]
    fn test_fresh_transition_is_brightest() {
        let mut t = ViewTransition::new(true);
        t.start(Direction::Enter);
        assert_eq!(
            t.hint(),
            TransitionHint::Active {
                direction: Direction::Enter,
                step: 2
            }
        );
    }

    #[test]
    fn test_expired_transition_stops_on_tick() {
        let mut t = ViewTransition::new(true);
        let Some(long_ago) = Instant::now().checked_sub(Duration::from_secs(5)) else {
            return;
        };
        t.start_at(Direction::Leave, long_ago);
        assert_eq!(t.hint(), TransitionHint::Idle);
        assert!(t.tick());
        assert!(!t.is_running());
        assert!(!t.tick());
    }
}
