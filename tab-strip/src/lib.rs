//! A horizontally scrolling tab strip with an animated selection indicator.
//!
//! The crate is renderer agnostic. A host gives it a container width and a
//! [`TextMeasurer`], forwards frame ticks, taps and pager callbacks, and
//! paints the [`DrawCommand`] list it gets back.
//!
//! # Sizing
//!
//! Tabs are sized by a [`TabMode`]:
//!
//! - [`TabMode::Fixed`] gives every tab the same width, filling the strip or
//!   centered at the widest tab's width ([`TabGravity`]).
//! - [`TabMode::Scrollable`] keeps content widths and scrolls the row when
//!   it overflows.
//! - [`TabMode::Auto`] fills the strip when every tab fits and scrolls
//!   otherwise.
//!
//! # Indicator
//!
//! The indicator follows pager drags continuously and animates between tabs
//! on discrete selections, with a [`IndicatorAnimationMode`] choosing how it
//! moves.
//!
//! # Example
//!
//! ```
//! use tab_strip::{
//!     Dp, IndicatorAnimationMode, Px, PxSize, TabMode, TabStripController, TabStripStyle,
//!     TextMeasurer,
//! };
//!
//! struct Monospace;
//!
//! impl TextMeasurer for Monospace {
//!     fn measure_text(&self, text: &str, _size: Dp, _bold: bool) -> PxSize {
//!         PxSize::new(Px(8 * text.chars().count() as i32), Px(20))
//!     }
//! }
//!
//! let style = TabStripStyle::default()
//!     .mode(TabMode::Fixed)
//!     .indicator_animation_mode(IndicatorAnimationMode::Elastic);
//! let mut strip = TabStripController::with_style(style);
//! for title in ["Inbox", "Sent", "Drafts", "Spam"] {
//!     let tab = strip.new_tab().with_text(title);
//!     strip.add_tab(tab).unwrap();
//! }
//! strip.layout(Px(400), &Monospace);
//!
//! let widths: Vec<Px> = strip.strip().views().iter().map(|v| v.frame().width).collect();
//! assert_eq!(widths, vec![Px(100); 4]);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

mod pool;

pub mod animation;
pub mod color;
pub mod controller;
pub mod dp;
pub mod error;
pub mod interpolator;
pub mod pager;
pub mod px;
pub mod sizing;
pub mod strip;
pub mod style;
pub mod tab;
pub mod tab_view;

pub use crate::{
    color::Color,
    controller::{ListenerId, SelectionVeto, TabSelectionListener, TabStripController},
    dp::{Dp, scale_factor, set_scale_factor},
    error::{Result, TabStripError},
    interpolator::{
        FadingRect, IndicatorAnimationMode, IndicatorFrame, IndicatorGravity,
        IndicatorInterpolator,
    },
    pager::{ConfigureTab, PageScrollTracker, PagerEvent, PagerSource, ScrollState, SharedPager},
    px::{Px, PxRect, PxSize},
    sizing::{SingleTabGravity, TabGravity, TabMode},
    strip::{DrawCommand, IndicatorMotion, TabStrip},
    style::{DividerGravity, DividerStyle, TabStripDefaults, TabStripStyle},
    tab::{CustomContent, LabelVisibility, StripId, Tab, TabIcon, TabKey},
    tab_view::{LabelStyle, TabItemView, TextMeasurer},
};
