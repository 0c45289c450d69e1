//! Per-tab view state: content measurement, placement and the
//! selected/unselected label style switch.
//!
//! Views are homogeneous, so released views go back to a single pool and are
//! rebound to whichever tab is attached next.

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    dp::Dp,
    px::{Px, PxRect, PxSize},
    sizing::{ChildWidth, clamp_wrap},
    tab::{Tab, TabKey},
};

/// Host text measurement.
///
/// The strip never shapes text itself; it asks the host for the single-line
/// extent of a label at a given size and weight.
pub trait TextMeasurer {
    /// Returns the size of `text` rendered on one line.
    fn measure_text(&self, text: &str, size: Dp, bold: bool) -> PxSize;
}

/// Size and weight a label is currently rendered with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    /// Text size.
    pub size: Dp,
    /// Bold weight.
    pub bold: bool,
}

/// Measurement settings shared by every view of a strip for one pass.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ViewMetrics {
    pub padding_start: Px,
    pub padding_end: Px,
    pub min_width: Px,
    pub max_width: Px,
    pub icon_gap: Px,
    pub inline_label: bool,
    pub normal: LabelStyle,
    pub selected: LabelStyle,
    pub fixed_mode: bool,
    pub max_lines: usize,
    pub multi_line_size: Dp,
}

impl ViewMetrics {
    fn horizontal_padding(&self) -> Px {
        self.padding_start.saturating_add(self.padding_end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part {
    Icon,
    Label,
    Custom,
}

/// Render state of one attached tab.
#[derive(Debug, Clone)]
pub struct TabItemView {
    tab: TabKey,
    selected: bool,
    label_style: LabelStyle,
    label_size: Dp,
    label_lines: usize,
    width_spec: ChildWidth,
    wrap_width: Px,
    parts: SmallVec<[(Part, PxSize); 2]>,
    content_size: PxSize,
    stacked: bool,
    frame: PxRect,
    icon_bounds: Option<PxRect>,
    label_bounds: Option<PxRect>,
    custom_bounds: Option<PxRect>,
}

impl TabItemView {
    pub(crate) fn new(tab: TabKey, width_spec: ChildWidth, label_style: LabelStyle) -> Self {
        Self {
            tab,
            selected: false,
            label_style,
            label_size: label_style.size,
            label_lines: 1,
            width_spec,
            wrap_width: Px::ZERO,
            parts: SmallVec::new(),
            content_size: PxSize::ZERO,
            stacked: false,
            frame: PxRect::ZERO,
            icon_bounds: None,
            label_bounds: None,
            custom_bounds: None,
        }
    }

    /// Reuses a pooled view for another tab.
    pub(crate) fn rebind(&mut self, tab: TabKey, width_spec: ChildWidth, label_style: LabelStyle) {
        *self = Self::new(tab, width_spec, label_style);
    }

    /// Key of the tab this view renders.
    pub fn tab_key(&self) -> TabKey {
        self.tab
    }

    /// Whether the view renders the selected style.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Label style currently applied.
    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    /// Width assignment of the last measurement pass.
    pub fn width_spec(&self) -> ChildWidth {
        self.width_spec
    }

    /// Wrap-content width of the last measurement pass, clamped to the
    /// per-tab minimum and maximum.
    pub fn wrap_width(&self) -> Px {
        self.wrap_width
    }

    /// Frame in strip coordinates.
    pub fn frame(&self) -> PxRect {
        self.frame
    }

    /// Icon bounds, when an icon is shown.
    pub fn icon_bounds(&self) -> Option<PxRect> {
        self.icon_bounds
    }

    /// Label bounds, when a label is shown.
    pub fn label_bounds(&self) -> Option<PxRect> {
        self.label_bounds
    }

    /// Size the label is drawn at. Smaller than the label style while an
    /// unselected label wraps.
    pub fn label_text_size(&self) -> Dp {
        self.label_size
    }

    /// Lines the label occupies.
    pub fn label_lines(&self) -> usize {
        self.label_lines
    }

    /// Custom content bounds, when custom content is shown.
    pub fn custom_bounds(&self) -> Option<PxRect> {
        self.custom_bounds
    }

    /// Union of the visible icon, label and custom content.
    pub fn content_bounds(&self) -> Option<PxRect> {
        [self.icon_bounds, self.label_bounds, self.custom_bounds]
            .into_iter()
            .flatten()
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Width of [`content_bounds`](Self::content_bounds), zero when empty.
    pub fn content_width(&self) -> Px {
        self.content_bounds()
            .map(|bounds| bounds.width)
            .unwrap_or(Px::ZERO)
    }

    /// Whether this view stacks an icon above a label.
    pub(crate) fn is_stacked(&self) -> bool {
        self.stacked
    }

    /// Height of the measured content.
    pub(crate) fn content_height(&self) -> Px {
        self.content_size.height
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_width_spec(&mut self, spec: ChildWidth) {
        self.width_spec = spec;
    }

    /// Measures content and returns the clamped wrap width.
    ///
    /// `available` is the width the current assignment gives this view, or
    /// `None` when it wraps its content.
    pub(crate) fn measure(
        &mut self,
        tab: &Tab,
        metrics: &ViewMetrics,
        available: Option<Px>,
        measurer: &dyn TextMeasurer,
    ) -> Px {
        self.update_label_style(tab, metrics, available, measurer);

        self.parts.clear();
        if let Some(custom) = tab.custom_content() {
            self.parts.push((
                Part::Custom,
                PxSize::new(custom.width.to_px(), custom.height.to_px()),
            ));
        } else {
            if let Some(icon) = tab.icon() {
                let edge = icon.size.to_px();
                self.parts.push((Part::Icon, PxSize::new(edge, edge)));
            }
            self.label_size = self.label_style.size;
            self.label_lines = 1;
            if let Some(text) = tab.text().filter(|_| tab.shows_label()) {
                let size = self.measure_label(text, metrics, available, measurer);
                self.parts.push((Part::Label, size));
            }
        }

        self.stacked = self.parts.len() > 1 && !metrics.inline_label;
        let gaps = metrics.icon_gap.saturating_mul(self.parts.len().saturating_sub(1) as i32);
        let (width, height) = if self.stacked {
            (
                self.parts.iter().map(|(_, size)| size.width).max().unwrap_or(Px::ZERO),
                self.parts.iter().map(|(_, size)| size.height).sum::<Px>().saturating_add(gaps),
            )
        } else {
            (
                self.parts.iter().map(|(_, size)| size.width).sum::<Px>().saturating_add(gaps),
                self.parts.iter().map(|(_, size)| size.height).max().unwrap_or(Px::ZERO),
            )
        };
        self.content_size = PxSize::new(width, height);

        self.wrap_width = clamp_wrap(
            width.saturating_add(metrics.horizontal_padding()),
            metrics.min_width,
            metrics.max_width,
        );
        self.wrap_width
    }

    /// A label too long for its tab wraps onto up to `max_lines` lines,
    /// shrinking to the multi-line size unless the tab is selected. Labels
    /// under an icon stay on one line.
    fn measure_label(
        &mut self,
        text: &str,
        metrics: &ViewMetrics,
        available: Option<Px>,
        measurer: &dyn TextMeasurer,
    ) -> PxSize {
        let style = self.label_style;
        let single = measurer.measure_text(text, style.size, style.bold);
        let has_icon = self.parts.iter().any(|(part, _)| *part == Part::Icon);
        let room = available
            .unwrap_or(metrics.max_width)
            .saturating_sub(metrics.horizontal_padding());
        if has_icon || metrics.max_lines <= 1 || room <= Px::ZERO || single.width <= room {
            return single;
        }

        let size = if self.selected {
            style.size
        } else {
            metrics.multi_line_size
        };
        let line = measurer.measure_text(text, size, style.bold);
        let lines = (line.width.0.max(0) as u32)
            .div_ceil(room.0 as u32)
            .clamp(1, metrics.max_lines as u32);
        debug!("Wrapping {text:?} onto {lines} lines of {room:?} at {size:?}");
        self.label_size = size;
        self.label_lines = lines as usize;
        PxSize::new(line.width.min(room), line.height.saturating_mul(lines as i32))
    }

    fn update_label_style(
        &mut self,
        tab: &Tab,
        metrics: &ViewMetrics,
        available: Option<Px>,
        measurer: &dyn TextMeasurer,
    ) {
        let desired = if self.selected {
            metrics.selected
        } else {
            metrics.normal
        };
        if desired == self.label_style {
            return;
        }

        let mut next = desired;
        // A fixed-width tab must not grow its label past the space it has.
        if metrics.fixed_mode && desired.size > self.label_style.size {
            let text = tab.text().filter(|_| tab.shows_label());
            if let (Some(available), Some(text)) = (available, text) {
                let room = available.saturating_sub(metrics.horizontal_padding());
                let width = measurer.measure_text(text, desired.size, desired.bold).width;
                if width > room {
                    debug!(
                        "Keeping label size {:?} for {text:?}: {width:?} exceeds {room:?}",
                        self.label_style.size
                    );
                    next.size = self.label_style.size;
                }
            }
        }
        self.label_style = next;
    }

    /// Places the view at `frame` and lays its content out centered inside
    /// the padded area.
    pub(crate) fn layout(&mut self, frame: PxRect, metrics: &ViewMetrics) {
        self.frame = frame;
        self.icon_bounds = None;
        self.label_bounds = None;
        self.custom_bounds = None;

        let inner = frame.width.saturating_sub(metrics.horizontal_padding());
        let content_x = frame
            .x
            .saturating_add(metrics.padding_start)
            .saturating_add((inner.saturating_sub(self.content_size.width) / 2).positive());
        let content_y = frame
            .y
            .saturating_add((frame.height.saturating_sub(self.content_size.height) / 2).positive());

        let mut cursor_x = content_x;
        let mut cursor_y = content_y;
        for (part, size) in self.parts.clone() {
            let rect = if self.stacked {
                let x = content_x.saturating_add((self.content_size.width - size.width) / 2);
                let rect = PxRect::new(x, cursor_y, size.width, size.height);
                cursor_y = cursor_y.saturating_add(size.height).saturating_add(metrics.icon_gap);
                rect
            } else {
                let y = content_y.saturating_add((self.content_size.height - size.height) / 2);
                let rect = PxRect::new(cursor_x, y, size.width, size.height);
                cursor_x = cursor_x.saturating_add(size.width).saturating_add(metrics.icon_gap);
                rect
            };
            match part {
                Part::Icon => self.icon_bounds = Some(rect),
                Part::Label => self.label_bounds = Some(rect),
                Part::Custom => self.custom_bounds = Some(rect),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use slotmap::SlotMap;

    use super::*;
    use crate::tab::{CustomContent, LabelVisibility, StripId, TabIcon};

    /// Monospace measurer: `advance` pixels per character at 14dp, scaled
    /// linearly with size, one extra pixel per character when bold.
    pub(crate) struct MonospaceMeasurer {
        pub advance: f32,
    }

    impl TextMeasurer for MonospaceMeasurer {
        fn measure_text(&self, text: &str, size: Dp, bold: bool) -> PxSize {
            let per_char = self.advance * (size.0 as f32 / 14.0) + if bold { 1.0 } else { 0.0 };
            let width = Px::round_from_f32(per_char * text.chars().count() as f32);
            PxSize::new(width, Px::round_from_f32(size.0 as f32 * 1.4))
        }
    }

    pub(crate) fn metrics() -> ViewMetrics {
        ViewMetrics {
            padding_start: Px(12),
            padding_end: Px(12),
            min_width: Px::ZERO,
            max_width: Px::MAX,
            icon_gap: Px(8),
            inline_label: false,
            normal: LabelStyle {
                size: Dp(14.0),
                bold: false,
            },
            selected: LabelStyle {
                size: Dp(14.0),
                bold: false,
            },
            fixed_mode: false,
            max_lines: 1,
            multi_line_size: Dp(12.0),
        }
    }

    fn key() -> TabKey {
        let mut keys: SlotMap<TabKey, ()> = SlotMap::with_key();
        keys.insert(())
    }

    fn view() -> TabItemView {
        TabItemView::new(key(), ChildWidth::Wrap, metrics().normal)
    }

    #[test]
    fn test_text_only_wrap_width() {
        let measurer = MonospaceMeasurer { advance: 8.0 };
        let tab = Tab::new(StripId::next()).with_text("Pending");
        let mut view = view();
        assert_eq!(view.measure(&tab, &metrics(), None, &measurer), Px(80));

        view.layout(PxRect::new(Px(100), Px(0), Px(120), Px(48)), &metrics());
        // 96 px of room, 56 px of text.
        assert_eq!(view.label_bounds(), Some(PxRect::new(Px(132), Px(14), Px(56), Px(20))));
        assert_eq!(view.content_width(), Px(56));
    }

    #[test]
    fn test_wrap_width_is_clamped() {
        let measurer = MonospaceMeasurer { advance: 8.0 };
        let tab = Tab::new(StripId::next()).with_text("All");
        let mut view = view();
        let mut metrics = metrics();
        metrics.min_width = Px(72);
        assert_eq!(view.measure(&tab, &metrics, None, &measurer), Px(72));
        metrics.min_width = Px::ZERO;
        metrics.max_width = Px(40);
        assert_eq!(view.measure(&tab, &metrics, None, &measurer), Px(40));
    }

    #[test]
    fn test_stacked_icon_and_label() {
        let measurer = MonospaceMeasurer { advance: 8.0 };
        let tab = Tab::new(StripId::next())
            .with_text("Photos")
            .with_icon(TabIcon::new("photo"));
        let mut view = view();
        assert_eq!(view.measure(&tab, &metrics(), None, &measurer), Px(72));
        assert!(view.is_stacked());
        assert_eq!(view.content_height(), Px(52));

        view.layout(PxRect::new(Px(0), Px(0), Px(100), Px(72)), &metrics());
        let icon = view.icon_bounds().expect("icon placed");
        let label = view.label_bounds().expect("label placed");
        assert_eq!(icon, PxRect::new(Px(38), Px(10), Px(24), Px(24)));
        assert_eq!(label, PxRect::new(Px(26), Px(42), Px(48), Px(20)));
        assert_eq!(view.content_bounds(), Some(icon.union(&label)));
    }

    #[test]
    fn test_inline_icon_and_label() {
        let measurer = MonospaceMeasurer { advance: 8.0 };
        let tab = Tab::new(StripId::next())
            .with_text("Map")
            .with_icon(TabIcon::new("map"));
        let mut metrics = metrics();
        metrics.inline_label = true;
        let mut view = view();
        // 24 icon + 8 gap + 24 text + 24 padding.
        assert_eq!(view.measure(&tab, &metrics, None, &measurer), Px(80));
        assert!(!view.is_stacked());
    }

    #[test]
    fn test_unlabeled_and_custom_content() {
        let measurer = MonospaceMeasurer { advance: 8.0 };
        let owner = StripId::next();
        let unlabeled = Tab::new(owner)
            .with_text("Map")
            .with_icon(TabIcon::new("map"))
            .with_label_visibility(LabelVisibility::Unlabeled);
        let mut view = view();
        assert_eq!(view.measure(&unlabeled, &metrics(), None, &measurer), Px(48));

        let custom = Tab::new(owner)
            .with_text("ignored")
            .with_custom_content(CustomContent::new("badge", Dp(60.0), Dp(30.0)));
        assert_eq!(view.measure(&custom, &metrics(), None, &measurer), Px(84));
        view.layout(PxRect::new(Px(0), Px(0), Px(84), Px(48)), &metrics());
        assert!(view.label_bounds().is_none());
        assert_eq!(view.custom_bounds(), Some(PxRect::new(Px(12), Px(9), Px(60), Px(30))));
    }

    #[test]
    fn test_long_label_wraps_at_multi_line_size() {
        let measurer = MonospaceMeasurer { advance: 8.0 };
        let owner = StripId::next();
        let mut metrics = metrics();
        metrics.max_lines = 2;
        let mut view = view();

        // 13 chars: 104px at 14dp, 89px at 12dp, with 60px of room.
        let tab = Tab::new(owner).with_text("Notifications");
        assert_eq!(view.measure(&tab, &metrics, Some(Px(84)), &measurer), Px(84));
        assert_eq!(view.label_lines(), 2);
        assert_eq!(view.label_text_size(), Dp(12.0));
        assert_eq!(view.content_height(), Px(34));

        // Longer labels are capped at the configured line count.
        let long = Tab::new(owner).with_text("Notifications and alerts");
        view.measure(&long, &metrics, Some(Px(84)), &measurer);
        assert_eq!(view.label_lines(), 2);

        let short = Tab::new(owner).with_text("Map");
        view.measure(&short, &metrics, Some(Px(84)), &measurer);
        assert_eq!(view.label_lines(), 1);
        assert_eq!(view.label_text_size(), Dp(14.0));
    }

    #[test]
    fn test_label_wrapping_exceptions() {
        let measurer = MonospaceMeasurer { advance: 8.0 };
        let owner = StripId::next();
        let mut metrics = metrics();
        metrics.max_lines = 2;
        metrics.max_width = Px(84);

        let with_icon = Tab::new(owner)
            .with_text("Notifications")
            .with_icon(TabIcon::new("bell"));
        let mut stacked = view();
        stacked.measure(&with_icon, &metrics, None, &measurer);
        assert_eq!(stacked.label_lines(), 1);
        assert_eq!(stacked.label_text_size(), Dp(14.0));

        // The selected label wraps but keeps its size.
        let plain = Tab::new(owner).with_text("Notifications");
        let mut selected = view();
        selected.set_selected(true);
        selected.measure(&plain, &metrics, None, &measurer);
        assert_eq!(selected.label_lines(), 2);
        assert_eq!(selected.label_text_size(), Dp(14.0));

        metrics.max_lines = 1;
        selected.measure(&plain, &metrics, None, &measurer);
        assert_eq!(selected.label_lines(), 1);
    }

    #[test]
    fn test_selected_style_switch() {
        let measurer = MonospaceMeasurer { advance: 8.0 };
        let tab = Tab::new(StripId::next()).with_text("Done");
        let mut metrics = metrics();
        metrics.selected = LabelStyle {
            size: Dp(16.0),
            bold: true,
        };
        let mut view = view();
        view.set_selected(true);
        view.measure(&tab, &metrics, None, &measurer);
        assert_eq!(view.label_style(), metrics.selected);

        view.set_selected(false);
        view.measure(&tab, &metrics, None, &measurer);
        assert_eq!(view.label_style(), metrics.normal);
    }

    #[test]
    fn test_fixed_mode_refuses_label_growth_that_overflows() {
        let measurer = MonospaceMeasurer { advance: 8.0 };
        let tab = Tab::new(StripId::next()).with_text("Pending");
        let mut metrics = metrics();
        metrics.fixed_mode = true;
        metrics.selected = LabelStyle {
            size: Dp(28.0),
            bold: true,
        };
        let mut view = view();
        view.set_selected(true);

        // 7 chars at 28dp bold = 119 px, only 96 px of room.
        view.measure(&tab, &metrics, Some(Px(120)), &measurer);
        assert_eq!(
            view.label_style(),
            LabelStyle {
                size: Dp(14.0),
                bold: true
            }
        );

        view.set_selected(false);
        view.measure(&tab, &metrics, Some(Px(120)), &measurer);
        view.set_selected(true);
        view.measure(&tab, &metrics, Some(Px(200)), &measurer);
        assert_eq!(view.label_style(), metrics.selected);
    }
}
