//! The horizontally laid out row of tab views.
//!
//! [`TabStrip`] owns the views, the sizing decision, the row scroll offset
//! and the indicator state machine. It never owns tabs: the controller
//! passes its tab arena in whenever content is needed.
//!
//! - `layout` measures and places views and computes scroll targets.
//! - `indicator` drives the Idle / Tweening / Animating indicator.
//! - `render` produces the ordered draw list.

use crate::{
    animation::{Animator, fast_out_slow_in},
    pool::Pool,
    px::Px,
    sizing::{SizingDecision, initial_child_width},
    style::TabStripStyle,
    tab::TabKey,
    tab_view::{LabelStyle, TabItemView},
};

pub use indicator::IndicatorMotion;
pub use render::DrawCommand;

use indicator::IndicatorState;

mod indicator;
mod layout;
mod render;

const VIEW_POOL_CAPACITY: usize = 12;

#[derive(Debug, Clone)]
struct RowScroll {
    offset: Px,
    range: Px,
    animator: Animator,
    from: Px,
    target: Option<TabKey>,
}

impl Default for RowScroll {
    fn default() -> Self {
        Self {
            offset: Px::ZERO,
            range: Px::ZERO,
            animator: Animator::new(fast_out_slow_in),
            from: Px::ZERO,
            target: None,
        }
    }
}

/// Container of tab views.
#[derive(Debug)]
pub struct TabStrip {
    views: Vec<TabItemView>,
    view_pool: Pool<TabItemView>,
    container_width: Px,
    height: Px,
    leading_inset: Px,
    row_width: Px,
    decision: Option<SizingDecision>,
    measure_passes: usize,
    laid_out: bool,
    scroll: RowScroll,
    indicator: IndicatorState,
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStrip {
    pub(crate) fn new() -> Self {
        Self {
            views: Vec::new(),
            view_pool: Pool::new(VIEW_POOL_CAPACITY),
            container_width: Px::ZERO,
            height: Px::ZERO,
            leading_inset: Px::ZERO,
            row_width: Px::ZERO,
            decision: None,
            measure_passes: 0,
            laid_out: false,
            scroll: RowScroll::default(),
            indicator: IndicatorState::default(),
        }
    }

    /// Views in tab order.
    pub fn views(&self) -> &[TabItemView] {
        &self.views
    }

    /// View at `position`.
    pub fn view(&self, position: usize) -> Option<&TabItemView> {
        self.views.get(position)
    }

    /// Position of the view rendering `key`.
    pub fn index_of(&self, key: TabKey) -> Option<usize> {
        self.views.iter().position(|view| view.tab_key() == key)
    }

    /// Strip width given to the last layout.
    pub fn container_width(&self) -> Px {
        self.container_width
    }

    /// Strip height resolved by the last layout.
    pub fn height(&self) -> Px {
        self.height
    }

    /// Width of the laid out row, dividers included.
    pub fn row_width(&self) -> Px {
        self.row_width
    }

    /// Sizing decision of the last layout.
    pub fn decision(&self) -> Option<SizingDecision> {
        self.decision
    }

    /// Number of measurement passes the last layout needed: one, or two
    /// when the decision changed a view's width assignment.
    pub fn measure_passes(&self) -> usize {
        self.measure_passes
    }

    /// Whether a layout with a usable width has completed since the views
    /// last changed.
    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    /// Whether some view has not been given a width yet.
    pub fn children_need_layout(&self) -> bool {
        self.views.iter().any(|view| view.frame().width <= Px::ZERO)
    }

    /// Current horizontal scroll offset of the row.
    pub fn scroll_x(&self) -> Px {
        self.scroll.offset
    }

    /// Largest scroll offset the row allows.
    pub fn scroll_range(&self) -> Px {
        self.scroll.range
    }

    pub(crate) fn insert_view(&mut self, position: usize, key: TabKey, style: &TabStripStyle) {
        let spec = initial_child_width(style.mode, style.gravity);
        let label_style = LabelStyle {
            size: style.text_size,
            bold: style.text_bold,
        };
        let view = match self.view_pool.acquire() {
            Some(mut view) => {
                view.rebind(key, spec, label_style);
                view
            }
            None => TabItemView::new(key, spec, label_style),
        };
        let position = position.min(self.views.len());
        self.views.insert(position, view);
        self.indicator.on_views_shifted();
    }

    pub(crate) fn remove_view(&mut self, position: usize) {
        if position >= self.views.len() {
            return;
        }
        let view = self.views.remove(position);
        self.view_pool.release(view);
        self.indicator.on_views_shifted();
    }

    /// Removes every view, last first, and resets indicator and scroll.
    pub(crate) fn remove_all_views(&mut self) {
        while let Some(view) = self.views.pop() {
            self.view_pool.release(view);
        }
        self.indicator = IndicatorState::default();
        self.scroll = RowScroll::default();
        self.row_width = Px::ZERO;
        self.decision = None;
    }

    /// Re-applies the initial width hint after a mode or gravity change.
    pub(crate) fn apply_mode_and_gravity(&mut self, style: &TabStripStyle) {
        let spec = initial_child_width(style.mode, style.gravity);
        for view in &mut self.views {
            view.set_width_spec(spec);
        }
    }

    /// Marks exactly the view at `position` as selected.
    pub(crate) fn set_selected_view(&mut self, position: Option<usize>) {
        for (index, view) in self.views.iter_mut().enumerate() {
            view.set_selected(Some(index) == position);
        }
    }

    /// Position of the tab under strip-relative `x`, accounting for scroll.
    pub fn position_at(&self, x: Px) -> Option<usize> {
        let row_x = x + self.scroll.offset;
        self.views
            .iter()
            .position(|view| view.frame().contains_x(row_x))
    }
}
