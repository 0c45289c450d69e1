//! Easing curves and the clock-driven animator behind indicator and scroll
//! transitions.
//!
//! Hosts never see time directly: the strip feeds `Instant`s from its frame
//! callback into [`Animator::tick`], which turns them into an eased fraction.

use std::{
    f32::consts::FRAC_PI_2,
    time::{Duration, Instant},
};

/// An easing curve mapping linear progress in `[0, 1]` to eased progress.
pub type Easing = fn(f32) -> f32;

/// Identity easing.
pub fn linear(progress: f32) -> f32 {
    progress.clamp(0.0, 1.0)
}

/// Starts slowly and ends at full speed: `1 - cos(t * pi / 2)`.
pub fn accelerate(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    if t >= 1.0 {
        return 1.0;
    }
    1.0 - (t * FRAC_PI_2).cos()
}

/// Starts at full speed and settles slowly: `sin(t * pi / 2)`.
pub fn decelerate(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    if t >= 1.0 {
        return 1.0;
    }
    (t * FRAC_PI_2).sin()
}

/// Material "standard" curve, `cubic-bezier(0.4, 0.0, 0.2, 1.0)`.
pub fn fast_out_slow_in(progress: f32) -> f32 {
    const CURVE: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);
    CURVE.ease(progress)
}

/// A CSS-style cubic bezier timing curve anchored at (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    /// Creates a curve from its two control points.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(p1: f32, p2: f32, t: f32) -> f32 {
        let inv = 1.0 - t;
        3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t
    }

    /// Solves the curve for `progress` along x and returns its y.
    pub fn ease(&self, progress: f32) -> f32 {
        let x = progress.clamp(0.0, 1.0);
        if x <= 0.0 || x >= 1.0 {
            return x;
        }
        // x(t) is monotonic for control points inside [0, 1].
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        let mut t = x;
        for _ in 0..32 {
            let sampled = Self::sample(self.x1, self.x2, t);
            if (sampled - x).abs() < 1e-6 {
                break;
            }
            if sampled < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        Self::sample(self.y1, self.y2, t)
    }
}

/// What an [`Animator`] reports for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationFrame {
    /// Still running, carrying the eased fraction in `[0, 1)`.
    Running(f32),
    /// The duration has elapsed; the animator is idle again.
    Finished,
}

/// A cancellable timer producing eased fractions.
///
/// The clock starts on the first [`tick`](Self::tick) after
/// [`start`](Self::start), so a transition started between frames does not
/// skip its beginning.
#[derive(Debug, Clone)]
pub struct Animator {
    easing: Easing,
    duration: Duration,
    started_at: Option<Instant>,
    running: bool,
    fraction: f32,
}

impl Animator {
    /// Creates an idle animator using `easing`.
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            duration: Duration::ZERO,
            started_at: None,
            running: false,
            fraction: 0.0,
        }
    }

    /// Starts (or restarts) the animation.
    pub fn start(&mut self, duration: Duration) {
        self.duration = duration;
        self.started_at = None;
        self.running = true;
        self.fraction = 0.0;
    }

    /// Stops the animation immediately. The last reported fraction is kept.
    pub fn cancel(&mut self) {
        self.running = false;
        self.started_at = None;
    }

    /// Whether a transition is in flight.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The last eased fraction reported.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Advances the clock to `now`. Returns `None` when idle.
    pub fn tick(&mut self, now: Instant) -> Option<AnimationFrame> {
        if !self.running {
            return None;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        if self.duration.is_zero() || elapsed >= self.duration {
            self.running = false;
            self.started_at = None;
            self.fraction = 1.0;
            return Some(AnimationFrame::Finished);
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.fraction = (self.easing)(progress);
        Some(AnimationFrame::Running(self.fraction))
    }
}
