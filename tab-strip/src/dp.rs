//! # Density-Independent Pixels (Dp)
//!
//! Every configurable length of the strip (indicator height, tab padding,
//! gutters, minimum widths) is expressed in [`Dp`] and converted to [`Px`]
//! at measurement time, so a change of display density only needs a new
//! scale factor and a relayout.
//!
//! ## Scale Factor
//!
//! The conversion is controlled by a process-wide scale factor. Hosts
//! update it with [`set_scale_factor`] when the window moves to a display
//! with another density. Until then a factor of `1.0` is assumed.
//!
//! ```
//! use tab_strip::Dp;
//!
//! let padding = Dp(12.0);
//! assert_eq!(padding.to_pixels_f32(), 12.0 * tab_strip::dp::scale_factor() as f32);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::Px;

/// Global scale factor used for Dp to Px conversion.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Returns the current scale factor, `1.0` when none has been set.
pub fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Replaces the global scale factor. Non-finite or non-positive factors are
/// ignored.
pub fn set_scale_factor(factor: f64) {
    if !factor.is_finite() || factor <= 0.0 {
        tracing::warn!("Ignoring invalid scale factor {factor}");
        return;
    }
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(1.0));
    *lock.write() = factor;
}

/// Density-independent pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Zero dp.
    pub const ZERO: Self = Self(0.0);

    /// Converts to physical pixels as f32.
    pub fn to_pixels_f32(&self) -> f32 {
        (self.0 * scale_factor()) as f32
    }

    /// Converts to [`Px`], truncating toward zero.
    pub fn to_px(&self) -> Px {
        Px::saturating_from_f32(self.to_pixels_f32())
    }
}
