//! Physical pixel units used by strip measurement and indicator geometry.
//!
//! # Key Types
//!
//! - [`Px`] - a single signed pixel value; negative values appear while the
//!   row is scrolled
//! - [`PxSize`] - measured width and height of a tab part
//! - [`PxRect`] - an axis-aligned rectangle in strip coordinates
//!
//! Strip coordinates put the origin at the top-left corner of the unscrolled
//! row. Drawing subtracts the current scroll offset.
//!
//! # Example
//!
//! ```
//! use tab_strip::px::{Px, PxRect};
//!
//! let tab = PxRect::new(Px(96), Px(0), Px(120), Px(48));
//! assert_eq!(tab.right(), Px(216));
//! assert_eq!(tab.center_x(), Px(156));
//! ```

use std::ops::{AddAssign, Neg, SubAssign};

/// A physical pixel value.
///
/// Unlike [`Dp`](crate::dp::Dp), physical pixels are not scaled by screen density.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// The largest representable pixel value, used as "unbounded".
    pub const MAX: Self = Self(i32::MAX);

    /// Returns the raw i32 value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Returns only the positive value, or zero if negative.
    pub fn positive(self) -> Px {
        if self.0 < 0 { Px::ZERO } else { self }
    }

    /// Creates a `Px` from an f32 value, saturating at the numeric bounds.
    ///
    /// ```
    /// use tab_strip::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f32(42.7), Px(42));
    /// assert_eq!(Px::saturating_from_f32(f32::MAX), Px::MAX);
    /// ```
    pub fn saturating_from_f32(value: f32) -> Self {
        let clamped_value = value.clamp(i32::MIN as f32, i32::MAX as f32);
        Px(clamped_value as i32)
    }

    /// Rounds an f32 value to the nearest pixel, saturating at the bounds.
    pub fn round_from_f32(value: f32) -> Self {
        Self::saturating_from_f32(value.round())
    }

    /// Saturating addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Px(self.0.saturating_sub(rhs.0))
    }

    /// Saturating multiplication by an integer factor.
    pub fn saturating_mul(self, rhs: i32) -> Self {
        Px(self.0.saturating_mul(rhs))
    }

    /// Multiplies the pixel value by a scalar, truncating toward zero.
    pub fn mul_f32(self, rhs: f32) -> Self {
        Px((self.0 as f32 * rhs) as i32)
    }

    /// Linear interpolation between `self` and `other`, rounded to the
    /// nearest pixel. `fraction` 0 yields `self` and 1 yields `other` exactly.
    pub fn lerp(self, other: Self, fraction: f32) -> Self {
        if fraction <= 0.0 {
            return self;
        }
        if fraction >= 1.0 {
            return other;
        }
        let delta = (other.0 as i64 - self.0 as i64) as f32 * fraction;
        Px::round_from_f32(self.0 as f32 + delta)
    }
}

/// A width/height pair in physical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxSize {
    /// Width in physical pixels.
    pub width: Px,
    /// Height in physical pixels.
    pub height: Px,
}

impl PxSize {
    /// A zero size.
    pub const ZERO: Self = Self {
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new size.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}

/// A rectangle in physical pixel space.
///
/// Stored as top-left corner plus extent, matching the layout pass. The
/// edge accessors give the left/top/right/bottom view used by indicator
/// interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxRect {
    /// The x-coordinate of the left edge.
    pub x: Px,
    /// The y-coordinate of the top edge.
    pub y: Px,
    /// The width of the rectangle.
    pub width: Px,
    /// The height of the rectangle.
    pub height: Px,
}

impl PxRect {
    /// A zero rectangle at the origin.
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new rectangle from its top-left corner and extent.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from its four edges. Inverted edges produce an
    /// empty rectangle rather than a negative extent.
    pub fn from_edges(left: Px, top: Px, right: Px, bottom: Px) -> Self {
        Self {
            x: left,
            y: top,
            width: (right - left).positive(),
            height: (bottom - top).positive(),
        }
    }

    /// Left edge.
    pub fn left(&self) -> Px {
        self.x
    }

    /// Top edge.
    pub fn top(&self) -> Px {
        self.y
    }

    /// Right edge.
    pub fn right(&self) -> Px {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> Px {
        self.y + self.height
    }

    /// Horizontal center, rounded down.
    pub fn center_x(&self) -> Px {
        self.x + self.width / 2
    }

    /// Returns the same rectangle shifted horizontally by `dx`.
    pub fn translate_x(&self, dx: Px) -> Self {
        Self {
            x: self.x + dx,
            ..*self
        }
    }

    /// The smallest rectangle that contains both rectangles.
    ///
    /// ```
    /// use tab_strip::px::{Px, PxRect};
    ///
    /// let icon = PxRect::new(Px(40), Px(8), Px(24), Px(24));
    /// let label = PxRect::new(Px(20), Px(36), Px(64), Px(20));
    /// assert_eq!(icon.union(&label), PxRect::new(Px(20), Px(8), Px(64), Px(48)));
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.0.min(other.x.0);
        let y = self.y.0.min(other.y.0);
        let width = (self.x.0 + self.width.0).max(other.x.0 + other.width.0) - x;
        let height = (self.y.0 + self.height.0).max(other.y.0 + other.height.0) - y;

        Self {
            x: Px(x),
            y: Px(y),
            width: Px(width),
            height: Px(height),
        }
    }

    /// Whether a horizontal coordinate falls inside `[left, right)`.
    pub fn contains_x(&self, x: Px) -> bool {
        x >= self.left() && x < self.right()
    }
}

impl std::ops::Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Px(-self.0)
    }
}

impl std::ops::Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl std::ops::Mul<i32> for Px {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Px(self.0 * rhs)
    }
}

impl std::ops::Div<i32> for Px {
    type Output = Self;

    fn div(self, rhs: i32) -> Self::Output {
        Px(self.0 / rhs)
    }
}

impl std::iter::Sum for Px {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Px::ZERO, |acc, px| acc.saturating_add(px))
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_arithmetic() {
        let a = Px(10);
        let b = Px(5);

        assert_eq!(a + b, Px(15));
        assert_eq!(a - b, Px(5));
        assert_eq!(a * 2, Px(20));
        assert_eq!(a / 2, Px(5));
        assert_eq!(-a, Px(-10));
        assert_eq!([a, b, Px(1)].into_iter().sum::<Px>(), Px(16));
    }

    #[test]
    fn test_px_saturating_arithmetic() {
        let max = Px(i32::MAX);
        let min = Px(i32::MIN);
        assert_eq!(max.saturating_add(Px(1)), max);
        assert_eq!(min.saturating_sub(Px(1)), min);
        assert_eq!(Px(i32::MAX / 2).saturating_mul(3), max);
        assert_eq!(Px::saturating_from_f32(-100.5), Px(-100));
        assert_eq!(Px::round_from_f32(99.5), Px(100));
    }

    #[test]
    fn test_lerp_is_exact_at_the_ends() {
        let from = Px(-37);
        let to = Px(413);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 0.5), Px(188));
        assert_eq!(to.lerp(from, 0.25), Px(301));
    }

    #[test]
    fn test_rect_edges() {
        let rect = PxRect::from_edges(Px(10), Px(4), Px(50), Px(24));
        assert_eq!(rect, PxRect::new(Px(10), Px(4), Px(40), Px(20)));
        assert_eq!(rect.right(), Px(50));
        assert_eq!(rect.bottom(), Px(24));
        assert_eq!(rect.center_x(), Px(30));
    }

    #[test]
    fn test_rect_union_and_hit() {
        let a = PxRect::new(Px(0), Px(0), Px(100), Px(48));
        let b = PxRect::new(Px(100), Px(0), Px(80), Px(48));
        let union = a.union(&b);
        assert_eq!(union, PxRect::new(Px(0), Px(0), Px(180), Px(48)));
        assert!(a.contains_x(Px(99)));
        assert!(!a.contains_x(Px(100)));
        assert_eq!(b.translate_x(Px(-30)).left(), Px(70));
    }
}
