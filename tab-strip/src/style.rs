//! Strip-level configuration.
//!
//! [`TabStripStyle`] collects every setting that affects measurement, the
//! indicator and drawing. It is built with chained setters:
//!
//! ```
//! use tab_strip::{Dp, TabMode, TabStripStyle, IndicatorAnimationMode};
//!
//! let style = TabStripStyle::default()
//!     .mode(TabMode::Scrollable)
//!     .indicator_animation_mode(IndicatorAnimationMode::Elastic)
//!     .display_count(4usize)
//!     .content_inset_start(Dp(52.0));
//! assert_eq!(style.display_count, Some(4));
//! ```
use std::time::Duration;

use derive_setters::Setters;

use crate::{
    color::Color,
    dp::Dp,
    interpolator::{IndicatorAnimationMode, IndicatorGravity},
    sizing::{SingleTabGravity, TabGravity, TabMode},
};

/// Defaults for [`TabStripStyle`].
pub struct TabStripDefaults;

impl TabStripDefaults {
    /// Duration of tap-driven indicator and scroll transitions.
    pub const ANIMATION_DURATION: Duration = Duration::from_millis(300);
    /// Indicator thickness.
    pub const INDICATOR_HEIGHT: Dp = Dp(2.0);
    /// Minimum width of a content-width indicator.
    pub const INDICATOR_MIN_WIDTH: Dp = Dp(24.0);
    /// Strip height for text-only or inline-label tabs.
    pub const DEFAULT_HEIGHT: Dp = Dp(48.0);
    /// Strip height when a tab stacks its icon above its label.
    pub const LARGE_HEIGHT: Dp = Dp(72.0);
    /// Default minimum tab width for scrollable rows.
    pub const SCROLLABLE_MIN_TAB_WIDTH: Dp = Dp(72.0);
    /// Space reserved next to a tab at its maximum width.
    pub const TAB_MIN_WIDTH_MARGIN: Dp = Dp(56.0);
    /// Margin on both sides of a centered fixed row.
    pub const FIXED_WRAP_GUTTER_MIN: Dp = Dp(16.0);
    /// Horizontal padding inside each tab.
    pub const TAB_PADDING: Dp = Dp(12.0);
    /// Gap between icon and label.
    pub const ICON_TEXT_GAP: Dp = Dp(8.0);
    /// Label text size.
    pub const TEXT_SIZE: Dp = Dp(14.0);
    /// Label text size once an unselected label wraps onto several lines.
    pub const MULTI_LINE_TEXT_SIZE: Dp = Dp(12.0);
    /// Indicator color.
    pub const INDICATOR_COLOR: Color = Color::new(0.40, 0.31, 0.64, 1.0);
    /// Label color of unselected tabs.
    pub const TEXT_COLOR: Color = Color::new(0.29, 0.27, 0.31, 1.0);
    /// Label color of the selected tab.
    pub const SELECTED_TEXT_COLOR: Color = Color::new(0.40, 0.31, 0.64, 1.0);
    /// Strip background.
    pub const BACKGROUND_COLOR: Color = Color::new(1.0, 0.98, 1.0, 1.0);
}

/// Vertical placement of a divider shorter than the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DividerGravity {
    /// Flush with the top edge.
    Top,
    /// Centered vertically.
    #[default]
    Center,
    /// Flush with the bottom edge.
    Bottom,
}

/// Dividers drawn between adjacent tabs.
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
pub struct DividerStyle {
    /// Divider thickness, also reserved in the row width.
    pub width: Dp,
    /// Divider height, clamped to the strip height.
    pub height: Dp,
    /// Vertical placement.
    pub gravity: DividerGravity,
    /// Divider color.
    pub color: Color,
}

impl Default for DividerStyle {
    fn default() -> Self {
        Self {
            width: Dp(1.0),
            height: Dp(24.0),
            gravity: DividerGravity::default(),
            color: Color::new(0.79, 0.77, 0.82, 1.0),
        }
    }
}

/// Configuration of a tab strip.
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct TabStripStyle {
    /// Sizing mode.
    pub mode: TabMode,
    /// Distribution of tabs within the strip.
    pub gravity: TabGravity,
    /// Placement of a lone tab.
    pub single_tab_gravity: SingleTabGravity,
    /// Strategy used for indicator motion.
    pub indicator_animation_mode: IndicatorAnimationMode,
    /// Whether the indicator spans the whole tab instead of its content.
    pub indicator_full_width: bool,
    /// Vertical placement of the indicator.
    pub indicator_gravity: IndicatorGravity,
    /// Indicator thickness.
    pub indicator_height: Dp,
    /// Explicit indicator width, centered on the tab.
    #[setters(strip_option)]
    pub indicator_width: Option<Dp>,
    /// Minimum width of a content-width indicator.
    pub indicator_min_width: Dp,
    /// Indicator color.
    pub indicator_color: Color,
    /// Duration of tap-driven transitions.
    pub animation_duration: Duration,
    /// Explicit minimum tab width.
    #[setters(strip_option)]
    pub tab_min_width: Option<Dp>,
    /// Explicit maximum tab width.
    #[setters(strip_option)]
    pub tab_max_width: Option<Dp>,
    /// Number of tabs that should span the full strip width.
    #[setters(strip_option)]
    pub display_count: Option<usize>,
    /// Dividers between tabs.
    #[setters(strip_option)]
    pub divider: Option<DividerStyle>,
    /// Leading padding inside each tab.
    pub tab_padding_start: Dp,
    /// Trailing padding inside each tab.
    pub tab_padding_end: Dp,
    /// Leading inset of scrollable rows. The first tab's own leading padding
    /// counts toward it.
    pub content_inset_start: Dp,
    /// Label size of unselected tabs.
    pub text_size: Dp,
    /// Label size of the selected tab.
    pub selected_text_size: Dp,
    /// Lines an unselected label without an icon may wrap onto.
    pub text_max_lines: usize,
    /// Label size used while a label wraps.
    pub multi_line_text_size: Dp,
    /// Whether unselected labels are bold.
    pub text_bold: bool,
    /// Whether the selected label is bold.
    pub selected_text_bold: bool,
    /// Whether icons sit beside the label rather than above it.
    pub inline_label: bool,
    /// Gap between icon and label.
    pub icon_text_gap: Dp,
    /// Label color of unselected tabs.
    pub text_color: Color,
    /// Label color of the selected tab.
    pub selected_text_color: Color,
    /// Strip background.
    pub background_color: Color,
    /// Background of unselected tabs.
    #[setters(strip_option)]
    pub tab_background_color: Option<Color>,
    /// Background of the selected tab.
    #[setters(strip_option)]
    pub selected_tab_background_color: Option<Color>,
    /// Fixed strip height; derived from tab content when unset.
    #[setters(strip_option)]
    pub height: Option<Dp>,
}

impl Default for TabStripStyle {
    fn default() -> Self {
        Self {
            mode: TabMode::default(),
            gravity: TabGravity::default(),
            single_tab_gravity: SingleTabGravity::default(),
            indicator_animation_mode: IndicatorAnimationMode::default(),
            indicator_full_width: true,
            indicator_gravity: IndicatorGravity::default(),
            indicator_height: TabStripDefaults::INDICATOR_HEIGHT,
            indicator_width: None,
            indicator_min_width: TabStripDefaults::INDICATOR_MIN_WIDTH,
            indicator_color: TabStripDefaults::INDICATOR_COLOR,
            animation_duration: TabStripDefaults::ANIMATION_DURATION,
            tab_min_width: None,
            tab_max_width: None,
            display_count: None,
            divider: None,
            tab_padding_start: TabStripDefaults::TAB_PADDING,
            tab_padding_end: TabStripDefaults::TAB_PADDING,
            content_inset_start: Dp::ZERO,
            text_size: TabStripDefaults::TEXT_SIZE,
            selected_text_size: TabStripDefaults::TEXT_SIZE,
            text_max_lines: 1,
            multi_line_text_size: TabStripDefaults::MULTI_LINE_TEXT_SIZE,
            text_bold: false,
            selected_text_bold: false,
            inline_label: false,
            icon_text_gap: TabStripDefaults::ICON_TEXT_GAP,
            text_color: TabStripDefaults::TEXT_COLOR,
            selected_text_color: TabStripDefaults::SELECTED_TEXT_COLOR,
            background_color: TabStripDefaults::BACKGROUND_COLOR,
            tab_background_color: None,
            selected_tab_background_color: None,
            height: None,
        }
    }
}
