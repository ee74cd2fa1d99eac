//! Slide transition planning.
//!
//! The slide strip holds `len` real slides followed by one synthetic copy of
//! slide 0. Showing slot `p` means translating the strip left by
//! `p / (len + 1)` of its width. [`plan`] maps a `go` request onto one of
//! four transition shapes:
//!
//! | Request                  | Shape            | Phase 1                 | Phase 2 (follow-up)                 |
//! |--------------------------|------------------|-------------------------|-------------------------------------|
//! | `go(-1, true)`           | wrap backward    | jump to slot `len`      | next turn: animate to `len - 1`     |
//! | `go(len, true)`          | wrap forward     | animate to slot `len`   | after 300 ms: jump to slot 0        |
//! | `go(i, true)`            | direct animated  | animate to slot `i`     | none                                |
//! | `go(i, false)`           | direct instant   | jump to slot `i`        | none                                |
//!
//! Targets outside `-1..=len` are rejected. The sentinels without animation
//! wrap instantly (`-1` to `len - 1`, `len` to `0`), so the settled index is
//! always a real slide.

use crate::error::NavigationError;
use std::fmt;
use std::time::Duration;

/// Duration of an animated strip movement.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Delay of the wrap-backward follow-up: the next scheduler turn.
///
/// The runtime's ticker rejects a zero period, so the shortest non-zero
/// delay stands in for "as soon as possible".
pub const NEXT_TURN: Duration = Duration::from_nanos(1);

/// How the strip moves to a new offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Snap with no CSS transition.
    Instant,
    /// Slide over [`TRANSITION_DURATION`].
    Animated,
}

impl Motion {
    /// The CSS `transition` value for this motion.
    pub fn css(self) -> &'static str {
        match self {
            Motion::Instant => "none",
            Motion::Animated => "all 0.3s",
        }
    }
}

/// Strip position, as slot `position` out of `len + 1` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    position: usize,
    slots: usize,
}

impl Offset {
    /// Offset of slot `position` in a strip of `len` real slides.
    pub fn new(position: usize, len: usize) -> Self {
        Self {
            position,
            slots: len + 1,
        }
    }

    /// The slot shown. `len` is the synthetic slide.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Fraction of the strip width the strip is translated by.
    pub fn fraction(&self) -> f64 {
        self.position as f64 / self.slots as f64
    }

    /// The CSS `transform` value for this offset.
    pub fn css(&self) -> String {
        if self.position == 0 {
            "translateX(0)".to_string()
        } else {
            format!("translateX(-{}%)", self.fraction() * 100.0)
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.position, self.slots)
    }
}

/// A strip offset together with how to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Where the strip ends up.
    pub offset: Offset,
    /// How it gets there.
    pub motion: Motion,
}

impl Frame {
    fn instant(position: usize, len: usize) -> Self {
        Self {
            offset: Offset::new(position, len),
            motion: Motion::Instant,
        }
    }

    fn animated(position: usize, len: usize) -> Self {
        Self {
            offset: Offset::new(position, len),
            motion: Motion::Animated,
        }
    }
}

/// The four transition shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// From the first slide backwards onto the last, through the synthetic slide.
    WrapBackward,
    /// From the last slide forwards onto the synthetic slide, then back to slot 0.
    WrapForward,
    /// Animated move to a real slide.
    DirectAnimated,
    /// Instant move to a real slide.
    DirectInstant,
}

/// Second half of a wrap transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUp {
    /// How long after phase 1 to apply `frame`.
    pub delay: Duration,
    /// The strip frame to apply.
    pub frame: Frame,
}

/// A fully resolved transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    /// Which shape this is.
    pub kind: Kind,
    /// The real slide that becomes current.
    pub index: usize,
    /// Strip frame applied immediately.
    pub frame: Frame,
    /// Strip frame applied later, for wrap transitions.
    pub follow_up: Option<FollowUp>,
}

/// Resolves `go(target, animated)` on a strip of `len` real slides.
///
/// # Examples
///
/// ```rust
/// use carousel_widget::transition::{plan, Kind, Motion};
///
/// let p = plan(6, true, 6).unwrap();
/// assert_eq!(p.kind, Kind::WrapForward);
/// assert_eq!(p.index, 0);
/// assert_eq!(p.frame.offset.position(), 6);
///
/// let settle = p.follow_up.unwrap();
/// assert_eq!(settle.frame.offset.position(), 0);
/// assert_eq!(settle.frame.motion, Motion::Instant);
///
/// assert!(plan(7, true, 6).is_err());
/// ```
pub fn plan(target: i64, animated: bool, len: usize) -> Result<Plan, NavigationError> {
    let last = len as i64;
    if len == 0 || target < -1 || target > last {
        return Err(NavigationError { target, len });
    }

    let plan = match (target, animated) {
        (-1, true) => Plan {
            kind: Kind::WrapBackward,
            index: len - 1,
            frame: Frame::instant(len, len),
            follow_up: Some(FollowUp {
                delay: NEXT_TURN,
                frame: Frame::animated(len - 1, len),
            }),
        },
        (t, true) if t == last => Plan {
            kind: Kind::WrapForward,
            index: 0,
            frame: Frame::animated(len, len),
            follow_up: Some(FollowUp {
                delay: TRANSITION_DURATION,
                frame: Frame::instant(0, len),
            }),
        },
        (t, true) => Plan {
            kind: Kind::DirectAnimated,
            index: t as usize,
            frame: Frame::animated(t as usize, len),
            follow_up: None,
        },
        (t, false) => {
            let index = if t == -1 {
                len - 1
            } else if t == last {
                0
            } else {
                t as usize
            };
            Plan {
                kind: Kind::DirectInstant,
                index,
                frame: Frame::instant(index, len),
                follow_up: None,
            }
        }
    };
    Ok(plan)
}
