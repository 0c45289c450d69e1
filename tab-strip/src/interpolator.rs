//! Indicator interpolation strategies.
//!
//! An interpolator maps a start rectangle, a destination rectangle and a
//! fraction to the indicator that should be drawn for that frame. It is a
//! pure function: the strip owns the clock and the captured start bounds and
//! checks that the destination still exists before calling in.
//!
//! Per-tab rectangles are produced by [`IndicatorGeometry::rect_for`]. The
//! destination rectangle is recomputed on every animation tick, so a
//! relayout mid-flight retargets the indicator.

use crate::px::{Px, PxRect};

/// Which interpolation strategy drives indicator motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndicatorAnimationMode {
    /// Both edges slide together.
    #[default]
    Linear,
    /// The leading edge runs ahead and the trailing edge catches up.
    Elastic,
    /// The old indicator fades out in place, then the new one fades in.
    Fade,
}

impl IndicatorAnimationMode {
    /// The interpolator implementing this mode.
    pub fn interpolator(self) -> &'static dyn IndicatorInterpolator {
        match self {
            IndicatorAnimationMode::Linear => &LinearInterpolator,
            IndicatorAnimationMode::Elastic => &ElasticInterpolator,
            IndicatorAnimationMode::Fade => &FadeInterpolator,
        }
    }
}

/// Vertical placement of the indicator within the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndicatorGravity {
    /// Along the bottom edge.
    #[default]
    Bottom,
    /// Along the top edge.
    Top,
    /// Vertically centered.
    Center,
    /// Covers the full strip height; the indicator height is ignored.
    Stretch,
}

/// A rectangle drawn with its own opacity, used for the fading-out half of
/// a cross-fade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadingRect {
    /// Where the rectangle is drawn.
    pub bounds: PxRect,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

/// Indicator output for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorFrame {
    /// Primary indicator rectangle.
    pub bounds: PxRect,
    /// Opacity of the primary rectangle.
    pub alpha: f32,
    /// Secondary rectangle that is fading out, if any.
    pub trailing: Option<FadingRect>,
}

impl IndicatorFrame {
    /// A fully opaque indicator at rest.
    pub fn settled(bounds: PxRect) -> Self {
        Self {
            bounds,
            alpha: 1.0,
            trailing: None,
        }
    }

    /// The rectangle a superseding transition should start from: whichever
    /// of the two cross-fading rectangles is more visible.
    pub fn visible_bounds(&self) -> PxRect {
        match self.trailing {
            Some(trailing) if trailing.alpha > self.alpha => trailing.bounds,
            _ => self.bounds,
        }
    }
}

/// Strategy computing indicator frames between two tab rectangles.
pub trait IndicatorInterpolator: Send + Sync {
    /// Computes the frame at `fraction` (clamped to `[0, 1]`) of the way from
    /// `origin` to `destination`.
    fn indicator_frame(&self, origin: PxRect, destination: PxRect, fraction: f32) -> IndicatorFrame;
}

fn lerp_rect(origin: PxRect, destination: PxRect, left: f32, right: f32, vertical: f32) -> PxRect {
    PxRect::from_edges(
        origin.left().lerp(destination.left(), left),
        origin.top().lerp(destination.top(), vertical),
        origin.right().lerp(destination.right(), right),
        origin.bottom().lerp(destination.bottom(), vertical),
    )
}

/// Interpolates both edges with the same fraction.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearInterpolator;

impl IndicatorInterpolator for LinearInterpolator {
    fn indicator_frame(&self, origin: PxRect, destination: PxRect, fraction: f32) -> IndicatorFrame {
        let t = fraction.clamp(0.0, 1.0);
        IndicatorFrame::settled(lerp_rect(origin, destination, t, t, t))
    }
}

/// Moves the leading edge on a decelerating curve and the trailing edge on
/// an accelerating one, so the indicator stretches mid-flight.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElasticInterpolator;

impl IndicatorInterpolator for ElasticInterpolator {
    fn indicator_frame(&self, origin: PxRect, destination: PxRect, fraction: f32) -> IndicatorFrame {
        if fraction <= 0.0 {
            return IndicatorFrame::settled(origin);
        }
        if fraction >= 1.0 {
            return IndicatorFrame::settled(destination);
        }
        let moving_right = origin.left() < destination.left();
        let (left, right) = if moving_right {
            (
                crate::animation::accelerate(fraction),
                crate::animation::decelerate(fraction),
            )
        } else {
            (
                crate::animation::decelerate(fraction),
                crate::animation::accelerate(fraction),
            )
        };
        IndicatorFrame::settled(lerp_rect(origin, destination, left, right, fraction))
    }
}

/// Cross-fades: the origin fades out over the first half, the destination
/// fades in over the second half. Nothing moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct FadeInterpolator;

impl IndicatorInterpolator for FadeInterpolator {
    fn indicator_frame(&self, origin: PxRect, destination: PxRect, fraction: f32) -> IndicatorFrame {
        let t = fraction.clamp(0.0, 1.0);
        if t >= 1.0 || origin == destination {
            return IndicatorFrame::settled(destination);
        }
        if t < 0.5 {
            IndicatorFrame {
                bounds: destination,
                alpha: 0.0,
                trailing: Some(FadingRect {
                    bounds: origin,
                    alpha: 1.0 - t * 2.0,
                }),
            }
        } else {
            IndicatorFrame {
                bounds: destination,
                alpha: (t - 0.5) * 2.0,
                trailing: None,
            }
        }
    }
}

/// How a tab's indicator rectangle is derived from the tab view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorGeometry {
    /// Span the whole tab instead of its content.
    pub full_width: bool,
    /// Lower bound for content-width indicators.
    pub min_width: Px,
    /// Explicit indicator width centered on the tab; overrides both
    /// full-width and content-width sizing.
    pub fixed_width: Option<Px>,
    /// Vertical placement.
    pub gravity: IndicatorGravity,
    /// Indicator thickness.
    pub height: Px,
}

impl IndicatorGeometry {
    /// Indicator rectangle for a tab whose view occupies `frame` and whose
    /// visible content spans `content`.
    pub fn rect_for(&self, frame: PxRect, content: Option<PxRect>, strip_height: Px) -> PxRect {
        let (left, right) = if let Some(width) = self.fixed_width {
            centered(frame, width.positive())
        } else if self.full_width {
            (frame.left(), frame.right())
        } else {
            let content_width = content.map(|content| content.width).unwrap_or(Px::ZERO);
            let width = content_width.min(frame.width).max(self.min_width);
            centered(frame, width)
        };

        let height = self.height.positive().min(strip_height);
        let (top, bottom) = match self.gravity {
            IndicatorGravity::Bottom => (strip_height - height, strip_height),
            IndicatorGravity::Top => (Px::ZERO, height),
            IndicatorGravity::Center => {
                let top = (strip_height - height) / 2;
                (top, top + height)
            }
            IndicatorGravity::Stretch => (Px::ZERO, strip_height),
        };
        PxRect::from_edges(left, top, right, bottom)
    }
}

fn centered(frame: PxRect, width: Px) -> (Px, Px) {
    let left = frame.center_x() - width / 2;
    (left, left + width)
}
