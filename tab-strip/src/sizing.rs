//! Tab sizing policy.
//!
//! The strip measures every tab at its wrap-content width, then asks
//! [`decide`] how the row should be distributed. The decision is pure: the
//! same inputs always produce the same [`SizingDecision`], which is what lets
//! the strip stop after a single correction pass.

use crate::px::Px;

/// Overall sizing policy of the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabMode {
    /// Tabs share the strip width; the row never scrolls.
    Fixed,
    /// Tabs keep their content width; the row scrolls when it overflows.
    Scrollable,
    /// Behaves as `Fixed` + `Fill` while every tab fits, otherwise as
    /// `Scrollable` + `Start`.
    #[default]
    Auto,
}

/// Distribution of tabs within the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabGravity {
    /// Tabs stretch to share the available width.
    #[default]
    Fill,
    /// Tabs are grouped in the middle of the strip.
    Center,
    /// Tabs are packed against the leading edge.
    Start,
}

/// Placement of the only tab when the strip holds exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SingleTabGravity {
    /// Wrap the content, pinned to the leading edge.
    #[default]
    Start,
    /// Wrap the content, centered.
    Center,
    /// Wrap the content, pinned to the trailing edge.
    End,
    /// Stretch across the strip.
    Fill,
}

/// Width assignment of a tab view for one measurement pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChildWidth {
    /// The view's own content width.
    #[default]
    Wrap,
    /// An equal share of the available width.
    Fill,
    /// An explicit width shared by every tab.
    Fixed(Px),
}

/// Horizontal placement of the row inside the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowAlignment {
    /// Leading edge.
    #[default]
    Start,
    /// Centered in the available width.
    Center,
    /// Trailing edge.
    End,
}

/// A per-pass downgrade recorded by [`decide`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutFallback {
    /// `Fixed` + `Center` did not fit and the pass used `Fill` instead. The
    /// configured gravity is left untouched.
    CenterToFill,
}

/// A configuration-level substitution for unsupported mode/gravity pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GravityFallback {
    /// `Fixed` + `Start` behaves as `Fixed` + `Center`.
    StartToCenter,
    /// `Scrollable` + `Fill` behaves as `Scrollable` + `Start`.
    FillToStart,
}

/// Resolves the gravity actually used for `mode`.
pub fn effective_gravity(mode: TabMode, gravity: TabGravity) -> (TabGravity, Option<GravityFallback>) {
    match (mode, gravity) {
        (TabMode::Fixed, TabGravity::Start) => {
            (TabGravity::Center, Some(GravityFallback::StartToCenter))
        }
        (TabMode::Scrollable, TabGravity::Fill) => {
            (TabGravity::Start, Some(GravityFallback::FillToStart))
        }
        _ => (gravity, None),
    }
}

/// Width hint given to a freshly created view before the first decision.
pub fn initial_child_width(mode: TabMode, gravity: TabGravity) -> ChildWidth {
    match (mode, effective_gravity(mode, gravity).0) {
        (TabMode::Fixed, TabGravity::Fill) => ChildWidth::Fill,
        _ => ChildWidth::Wrap,
    }
}

/// Inputs of one sizing decision.
#[derive(Clone, Copy, Debug)]
pub struct SizingInput<'a> {
    /// Configured mode.
    pub mode: TabMode,
    /// Configured gravity.
    pub gravity: TabGravity,
    /// Placement of a lone tab.
    pub single_tab_gravity: SingleTabGravity,
    /// Measured wrap-content width of every tab, already clamped to the
    /// per-tab minimum and maximum.
    pub wrap_widths: &'a [Px],
    /// Strip width minus leading inset.
    pub available_width: Px,
    /// Margin kept on both sides of a centered fixed row.
    pub gutter: Px,
    /// Width of one divider, zero when dividers are disabled.
    pub divider_width: Px,
}

impl SizingInput<'_> {
    /// Total divider width. Dividers sit on interior gaps only.
    pub fn dividers(&self) -> Px {
        divider_total(self.wrap_widths.len(), self.divider_width)
    }

    /// Sum of wrap widths plus dividers.
    pub fn total_wrap_width(&self) -> Px {
        self.wrap_widths
            .iter()
            .copied()
            .sum::<Px>()
            .saturating_add(self.dividers())
    }
}

/// Outcome of [`decide`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizingDecision {
    /// Width assignment shared by every tab.
    pub child_width: ChildWidth,
    /// Placement of the row.
    pub alignment: RowAlignment,
    /// Whether the row may be wider than the strip.
    pub scrollable: bool,
    /// Set when the pass downgraded the configured policy.
    pub fallback: Option<LayoutFallback>,
}

impl SizingDecision {
    const FILL: Self = Self {
        child_width: ChildWidth::Fill,
        alignment: RowAlignment::Start,
        scrollable: false,
        fallback: None,
    };

    fn wrap(alignment: RowAlignment, scrollable: bool) -> Self {
        Self {
            child_width: ChildWidth::Wrap,
            alignment,
            scrollable,
            fallback: None,
        }
    }
}

/// Total width taken by dividers between `count` tabs.
pub fn divider_total(count: usize, divider_width: Px) -> Px {
    divider_width.saturating_mul(count.saturating_sub(1) as i32)
}

/// Equal share of `available` for `count` tabs, `None` when nothing can be
/// distributed yet.
pub fn fill_share(available: Px, count: usize, divider_width: Px) -> Option<Px> {
    if count == 0 {
        return None;
    }
    let distributable = available.saturating_sub(divider_total(count, divider_width));
    if distributable <= Px::ZERO {
        return None;
    }
    Some(distributable / count as i32)
}

/// Final width of a tab for an assignment.
pub fn resolve_child_width(spec: ChildWidth, wrap: Px, share: Option<Px>) -> Px {
    match spec {
        ChildWidth::Wrap => wrap,
        ChildWidth::Fill => share.unwrap_or(wrap),
        ChildWidth::Fixed(width) => width,
    }
}

/// Decides how the row is distributed. Returns `None` while the strip has
/// no tabs or no usable width, in which case layout is deferred.
pub fn decide(input: &SizingInput<'_>) -> Option<SizingDecision> {
    let count = input.wrap_widths.len();
    if count == 0 || input.available_width <= Px::ZERO {
        return None;
    }

    if count == 1 {
        return Some(match input.single_tab_gravity {
            SingleTabGravity::Fill => SizingDecision::FILL,
            SingleTabGravity::Start => SizingDecision::wrap(RowAlignment::Start, false),
            SingleTabGravity::Center => SizingDecision::wrap(RowAlignment::Center, false),
            SingleTabGravity::End => SizingDecision::wrap(RowAlignment::End, false),
        });
    }

    let (gravity, _) = effective_gravity(input.mode, input.gravity);
    let total = input.total_wrap_width();
    let decision = match input.mode {
        TabMode::Fixed => fixed_decision(input, gravity),
        TabMode::Scrollable => {
            let alignment = if gravity == TabGravity::Center && total < input.available_width {
                RowAlignment::Center
            } else {
                RowAlignment::Start
            };
            SizingDecision::wrap(alignment, total > input.available_width)
        }
        TabMode::Auto => {
            if total < input.available_width {
                SizingDecision::FILL
            } else {
                SizingDecision::wrap(RowAlignment::Start, total > input.available_width)
            }
        }
    };
    Some(decision)
}

fn fixed_decision(input: &SizingInput<'_>, gravity: TabGravity) -> SizingDecision {
    if gravity == TabGravity::Fill {
        return SizingDecision::FILL;
    }
    let count = input.wrap_widths.len() as i32;
    let widest = input.wrap_widths.iter().copied().max().unwrap_or(Px::ZERO);
    let needed = widest.saturating_mul(count).saturating_add(input.dividers());
    let limit = input.available_width.saturating_sub(input.gutter.saturating_mul(2));
    if widest > Px::ZERO && needed <= limit {
        SizingDecision {
            child_width: ChildWidth::Fixed(widest),
            alignment: RowAlignment::Center,
            scrollable: false,
            fallback: None,
        }
    } else {
        SizingDecision {
            fallback: Some(LayoutFallback::CenterToFill),
            ..SizingDecision::FILL
        }
    }
}

/// Inputs of the per-tab minimum width.
#[derive(Clone, Copy, Debug)]
pub struct MinWidthInput {
    /// Configured mode.
    pub mode: TabMode,
    /// Explicitly requested minimum.
    pub requested: Option<Px>,
    /// Number of tabs that should span the full strip.
    pub display_count: Option<usize>,
    /// Current number of tabs.
    pub tab_count: usize,
    /// Strip width.
    pub container_width: Px,
    /// Default minimum for scrollable rows.
    pub scrollable_min: Px,
}

/// Per-tab minimum width.
///
/// A display count wins over everything else. Without one, an explicit
/// request is used, then the scrollable default for `Scrollable`/`Auto`.
pub fn tab_min_width(input: MinWidthInput) -> Px {
    if let Some(display) = input.display_count.filter(|display| *display > 0) {
        let container = input.container_width.positive();
        return if display == 1 || input.tab_count <= 1 {
            container
        } else if input.tab_count < display {
            container / input.tab_count as i32
        } else {
            container / display as i32
        };
    }
    match (input.requested, input.mode) {
        (Some(requested), _) => requested.positive(),
        (None, TabMode::Fixed) => Px::ZERO,
        (None, TabMode::Scrollable | TabMode::Auto) => input.scrollable_min,
    }
}

/// Per-tab maximum width: the request, else the strip width minus `margin`.
/// Unbounded until the strip has been measured.
pub fn tab_max_width(requested: Option<Px>, container_width: Px, margin: Px) -> Px {
    match requested {
        Some(requested) => requested.positive(),
        None if container_width <= Px::ZERO => Px::MAX,
        None => container_width.saturating_sub(margin).positive(),
    }
}

/// Clamps a measured width into `[min, max]`; the maximum wins on conflict.
pub fn clamp_wrap(measured: Px, min: Px, max: Px) -> Px {
    min.max(measured).min(max)
}
