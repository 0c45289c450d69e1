use slotmap::SlotMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    animation::AnimationFrame,
    px::{Px, PxRect},
    sizing::{
        ChildWidth, MinWidthInput, RowAlignment, SizingDecision, SizingInput, TabMode, decide,
        divider_total, fill_share, resolve_child_width, tab_max_width, tab_min_width,
    },
    style::{TabStripDefaults, TabStripStyle},
    tab::{Tab, TabKey},
    tab_view::{LabelStyle, TextMeasurer, ViewMetrics},
};

use super::TabStrip;

type Widths = SmallVec<[Px; 8]>;

fn view_metrics(style: &TabStripStyle, tab_count: usize, container_width: Px) -> ViewMetrics {
    let min_width = tab_min_width(MinWidthInput {
        mode: style.mode,
        requested: style.tab_min_width.map(|dp| dp.to_px()),
        display_count: style.display_count,
        tab_count,
        container_width,
        scrollable_min: TabStripDefaults::SCROLLABLE_MIN_TAB_WIDTH.to_px(),
    });
    let mut max_width = tab_max_width(
        style.tab_max_width.map(|dp| dp.to_px()),
        container_width,
        TabStripDefaults::TAB_MIN_WIDTH_MARGIN.to_px(),
    );
    if style.display_count.is_some() {
        max_width = max_width.max(min_width);
    }
    ViewMetrics {
        padding_start: style.tab_padding_start.to_px(),
        padding_end: style.tab_padding_end.to_px(),
        min_width,
        max_width,
        icon_gap: style.icon_text_gap.to_px(),
        inline_label: style.inline_label,
        normal: LabelStyle {
            size: style.text_size,
            bold: style.text_bold,
        },
        selected: LabelStyle {
            size: style.selected_text_size,
            bold: style.selected_text_bold,
        },
        fixed_mode: style.mode == TabMode::Fixed,
        max_lines: style.text_max_lines.max(1),
        multi_line_size: style.multi_line_text_size,
    }
}

impl TabStrip {
    /// Measures and places every view for a strip `container_width` wide.
    ///
    /// One measurement pass with the current width assignments, one sizing
    /// decision, and at most one correction pass when the decision changed
    /// an assignment.
    #[tracing::instrument(level = "debug", skip(self, tabs, style, measurer))]
    pub(crate) fn measure(
        &mut self,
        tabs: &SlotMap<TabKey, Tab>,
        style: &TabStripStyle,
        measurer: &dyn TextMeasurer,
        container_width: Px,
    ) {
        self.measure_passes = 0;
        self.container_width = container_width.positive();
        if self.container_width == Px::ZERO {
            debug!("Strip has no width yet, deferring layout");
            self.laid_out = false;
            return;
        }

        let count = self.views.len();
        self.leading_inset = if style.mode == TabMode::Fixed {
            Px::ZERO
        } else {
            style
                .content_inset_start
                .to_px()
                .saturating_sub(style.tab_padding_start.to_px())
                .positive()
        };
        let available = self.container_width.saturating_sub(self.leading_inset).positive();
        let metrics = view_metrics(style, count, self.container_width);
        let divider_width = style
            .divider
            .map(|divider| divider.width.to_px())
            .unwrap_or(Px::ZERO);
        let share = fill_share(available, count, divider_width);

        let mut wraps = self.measure_pass(tabs, &metrics, share, measurer);
        self.height = self.resolve_height(style);

        let decision = decide(&SizingInput {
            mode: style.mode,
            gravity: style.gravity,
            single_tab_gravity: style.single_tab_gravity,
            wrap_widths: &wraps,
            available_width: available,
            gutter: TabStripDefaults::FIXED_WRAP_GUTTER_MIN.to_px(),
            divider_width,
        });
        let Some(decision) = decision else {
            debug!("Nothing to distribute across {available:?}, deferring layout");
            self.decision = None;
            self.row_width = Px::ZERO;
            self.scroll.range = Px::ZERO;
            self.scroll.offset = Px::ZERO;
            self.laid_out = count == 0;
            self.refresh_indicator(style);
            return;
        };
        if let Some(fallback) = decision.fallback {
            debug!("Sizing fell back for this pass: {fallback:?}");
        }

        let target = decision.child_width;
        if self.views.iter().any(|view| view.width_spec() != target) {
            for view in &mut self.views {
                view.set_width_spec(target);
            }
            wraps = self.measure_pass(tabs, &metrics, share, measurer);
            self.height = self.resolve_height(style);
        }
        debug!(
            "Measured {count} tabs in {} passes: {decision:?}",
            self.measure_passes
        );

        self.decision = Some(decision);
        self.place(&metrics, &wraps, share, divider_width, available, decision);
        self.laid_out = true;

        self.refresh_indicator(style);
        if !self.scroll.animator.is_running() {
            self.scroll.offset = self.scroll.offset.min(self.scroll.range).positive();
        }
    }

    fn measure_pass(
        &mut self,
        tabs: &SlotMap<TabKey, Tab>,
        metrics: &ViewMetrics,
        share: Option<Px>,
        measurer: &dyn TextMeasurer,
    ) -> Widths {
        self.measure_passes += 1;
        self.views
            .iter_mut()
            .map(|view| {
                let Some(tab) = tabs.get(view.tab_key()) else {
                    return Px::ZERO;
                };
                let available = match view.width_spec() {
                    ChildWidth::Wrap => None,
                    ChildWidth::Fill => share,
                    ChildWidth::Fixed(width) => Some(width),
                };
                view.measure(tab, metrics, available, measurer)
            })
            .collect()
    }

    fn resolve_height(&self, style: &TabStripStyle) -> Px {
        if let Some(height) = style.height {
            return height.to_px();
        }
        let base = if self.views.iter().any(|view| view.is_stacked()) {
            TabStripDefaults::LARGE_HEIGHT
        } else {
            TabStripDefaults::DEFAULT_HEIGHT
        };
        let tallest = self
            .views
            .iter()
            .map(|view| view.content_height())
            .max()
            .unwrap_or(Px::ZERO);
        base.to_px().max(tallest)
    }

    fn place(
        &mut self,
        metrics: &ViewMetrics,
        wraps: &[Px],
        share: Option<Px>,
        divider_width: Px,
        available: Px,
        decision: SizingDecision,
    ) {
        let widths: Widths = wraps
            .iter()
            .map(|wrap| resolve_child_width(decision.child_width, *wrap, share))
            .collect();
        let row_width = widths
            .iter()
            .copied()
            .sum::<Px>()
            .saturating_add(divider_total(widths.len(), divider_width));
        let slack = available.saturating_sub(row_width).positive();
        let mut x = self.leading_inset.saturating_add(match decision.alignment {
            RowAlignment::Start => Px::ZERO,
            RowAlignment::Center => slack / 2,
            RowAlignment::End => slack,
        });

        let height = self.height;
        for (view, width) in self.views.iter_mut().zip(widths) {
            view.layout(PxRect::new(x, Px::ZERO, width, height), metrics);
            x = x.saturating_add(width).saturating_add(divider_width);
        }
        self.row_width = row_width;
        self.scroll.range = self
            .leading_inset
            .saturating_add(row_width)
            .saturating_sub(self.container_width)
            .positive();
    }

    /// Scroll offset that centers the point `offset` of the way from tab
    /// `position` toward the next tab. Always zero in fixed mode.
    pub(crate) fn scroll_x_for(&self, position: usize, offset: f32, style: &TabStripStyle) -> Px {
        if style.mode == TabMode::Fixed {
            return Px::ZERO;
        }
        let Some(view) = self.views.get(position) else {
            return Px::ZERO;
        };
        let width = view.frame().width;
        let next_width = self
            .views
            .get(position + 1)
            .map(|next| next.frame().width)
            .unwrap_or(Px::ZERO);
        let target = (view.frame().left() + width / 2)
            .saturating_sub(self.container_width / 2)
            .saturating_add(width.saturating_add(next_width).mul_f32(0.5 * offset));
        target.min(self.scroll.range).positive()
    }

    /// Jumps the row scroll, cancelling a running scroll animation.
    pub(crate) fn set_scroll_x(&mut self, x: Px) {
        self.scroll.animator.cancel();
        self.scroll.target = None;
        self.scroll.offset = x.min(self.scroll.range).positive();
    }

    pub(crate) fn animate_scroll_to(&mut self, key: TabKey, style: &TabStripStyle) {
        self.scroll.from = self.scroll.offset;
        self.scroll.target = Some(key);
        self.scroll.animator.start(style.animation_duration);
    }

    pub(super) fn tick_scroll(&mut self, now: std::time::Instant, style: &TabStripStyle) -> bool {
        let Some(frame) = self.scroll.animator.tick(now) else {
            return false;
        };
        let Some(index) = self.scroll.target.and_then(|key| self.index_of(key)) else {
            self.scroll.animator.cancel();
            self.scroll.target = None;
            return false;
        };
        let to = self.scroll_x_for(index, 0.0, style);
        match frame {
            AnimationFrame::Running(fraction) => {
                self.scroll.offset = self.scroll.from.lerp(to, fraction);
                true
            }
            AnimationFrame::Finished => {
                self.scroll.offset = to;
                self.scroll.target = None;
                false
            }
        }
    }

    pub(crate) fn is_scroll_animating(&self) -> bool {
        self.scroll.animator.is_running()
    }
}
