//! The public face of the tab strip.
//!
//! [`TabStripController`] owns the tab arena, the ordered tab list, the
//! selection and the [`TabStrip`] that renders them. Hosts drive it through
//! a small pipeline:
//!
//! 1. [`on_attached`](TabStripController::on_attached) once the strip is on
//!    screen,
//! 2. [`layout`](TabStripController::layout) whenever
//!    [`needs_layout`](TabStripController::needs_layout) reports `true` or the
//!    container width changes,
//! 3. [`on_frame`](TabStripController::on_frame) every frame while it
//!    returns `true`,
//! 4. [`draw`](TabStripController::draw) to obtain the draw list.
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use tab_strip::{Dp, Px, PxSize, TabStripController, TextMeasurer};
//!
//! struct Fixed;
//!
//! impl TextMeasurer for Fixed {
//!     fn measure_text(&self, text: &str, _size: Dp, _bold: bool) -> PxSize {
//!         PxSize::new(Px(8 * text.len() as i32), Px(20))
//!     }
//! }
//!
//! let mut strip = TabStripController::new();
//! for title in ["All", "Pending", "Done"] {
//!     let tab = strip.new_tab().with_text(title);
//!     strip.add_tab(tab).unwrap();
//! }
//! strip.on_attached();
//! strip.layout(Px(360), &Fixed);
//!
//! let done = strip.tab_key_at(2).unwrap();
//! strip.select_tab(Some(done), true).unwrap();
//! assert_eq!(strip.selected_tab_position(), Some(2));
//!
//! let start = Instant::now();
//! assert!(strip.on_frame(start));
//! assert!(!strip.on_frame(start + Duration::from_millis(300)));
//! assert_eq!(strip.indicator_position(), Some(2));
//! ```

use std::{sync::Arc, time::Instant};

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::{
    dp::Dp,
    error::{Result, TabStripError},
    interpolator::{IndicatorAnimationMode, IndicatorFrame, IndicatorGravity},
    pager::PagerBinding,
    pool::Pool,
    px::Px,
    sizing::{SingleTabGravity, TabGravity, TabMode, effective_gravity},
    strip::{DrawCommand, IndicatorMotion, TabStrip},
    style::TabStripStyle,
    tab::{StripId, Tab, TabKey},
    tab_view::TextMeasurer,
};

const TAB_POOL_CAPACITY: usize = 16;

/// Receives selection changes.
///
/// Every method has an empty default, so implementors only override what
/// they need. Callbacks get the controller mutably and may add, remove or
/// select tabs; the tab passed in is a copy taken when the event fired.
pub trait TabSelectionListener: Send + Sync {
    /// A tab became selected.
    fn on_tab_selected(&self, strip: &mut TabStripController, tab: &Tab) {
        let _ = (strip, tab);
    }

    /// A tab stopped being selected. A tab that was removed while selected
    /// is reported with no position.
    fn on_tab_unselected(&self, strip: &mut TabStripController, tab: &Tab) {
        let _ = (strip, tab);
    }

    /// The selected tab was selected again.
    fn on_tab_reselected(&self, strip: &mut TabStripController, tab: &Tab) {
        let _ = (strip, tab);
    }
}

/// Predicate consulted before every selection change. Returning `false`
/// cancels the change.
pub type SelectionVeto = Arc<dyn Fn(Option<&Tab>) -> bool + Send + Sync>;

/// Handle returned when registering a listener or veto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug)]
enum SelectionEvent {
    Selected,
    Unselected,
    Reselected,
}

/// Tab list, selection and rendering state of one strip.
pub struct TabStripController {
    id: StripId,
    style: TabStripStyle,
    tabs: SlotMap<TabKey, Tab>,
    order: Vec<TabKey>,
    selected: Option<TabKey>,
    strip: TabStrip,
    listeners: Vec<(ListenerId, Arc<dyn TabSelectionListener>)>,
    vetoes: Vec<(ListenerId, SelectionVeto)>,
    next_listener_id: u64,
    tab_pool: Pool<Tab>,
    pub(crate) pager: Option<PagerBinding>,
    attached: bool,
    needs_layout: bool,
}

impl Default for TabStripController {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStripController {
    /// Creates an empty strip with the default style.
    pub fn new() -> Self {
        Self::with_style(TabStripStyle::default())
    }

    /// Creates an empty strip.
    pub fn with_style(style: TabStripStyle) -> Self {
        warn_on_fallback(style.mode, style.gravity);
        Self {
            id: StripId::next(),
            style,
            tabs: SlotMap::with_key(),
            order: Vec::new(),
            selected: None,
            strip: TabStrip::new(),
            listeners: Vec::new(),
            vetoes: Vec::new(),
            next_listener_id: 0,
            tab_pool: Pool::new(TAB_POOL_CAPACITY),
            pager: None,
            attached: false,
            needs_layout: true,
        }
    }

    /// Identity stamped on every tab this controller creates.
    pub fn id(&self) -> StripId {
        self.id
    }

    /// Current configuration.
    pub fn style(&self) -> &TabStripStyle {
        &self.style
    }

    /// The rendered row.
    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    // ---- tabs ----

    /// Returns a blank tab owned by this controller. It is shown once passed
    /// to [`add_tab`](Self::add_tab) or [`insert_tab`](Self::insert_tab).
    pub fn new_tab(&mut self) -> Tab {
        self.tab_pool.acquire().unwrap_or_else(|| Tab::new(self.id))
    }

    /// Appends `tab`. The first tab added to an empty strip is selected.
    pub fn add_tab(&mut self, tab: Tab) -> Result<TabKey> {
        let position = self.order.len();
        self.insert_tab(tab, position, false)
    }

    /// Inserts `tab` at `position`, shifting later tabs right. The tab is
    /// selected when `set_selected` is set or the strip was empty.
    pub fn insert_tab(&mut self, tab: Tab, position: usize, set_selected: bool) -> Result<TabKey> {
        let was_empty = self.order.is_empty();
        let key = self.attach_tab(tab, position)?;
        if set_selected || was_empty {
            self.select_tab(Some(key), true)?;
        }
        Ok(key)
    }

    /// Inserts without selecting.
    pub(crate) fn attach_tab(&mut self, mut tab: Tab, position: usize) -> Result<TabKey> {
        if tab.owner() != self.id {
            return Err(TabStripError::ForeignTab {
                tab_owner: tab.owner(),
                strip: self.id,
            });
        }
        let len = self.order.len();
        if position > len {
            return Err(TabStripError::PositionOutOfRange { position, len });
        }
        tab.set_position(Some(position));
        let key = self.tabs.insert(tab);
        self.order.insert(position, key);
        self.renumber(position);
        self.strip.insert_view(position, key, &self.style);
        self.needs_layout = true;
        debug!("Inserted tab at {position}, {} tabs", self.order.len());
        Ok(key)
    }

    /// Removes the tab behind `key`.
    pub fn remove_tab(&mut self, key: TabKey) -> Result<()> {
        let position = self.position_of(key).ok_or(TabStripError::DetachedTab)?;
        self.remove_tab_at(position)
    }

    /// Removes the tab at `position`. When it was selected, the tab before
    /// it (or the new first tab) becomes selected, regardless of vetoes.
    pub fn remove_tab_at(&mut self, position: usize) -> Result<()> {
        let len = self.order.len();
        if position >= len {
            return Err(TabStripError::PositionOutOfRange { position, len });
        }
        let key = self.order.remove(position);
        self.strip.remove_view(position);
        self.renumber(position);
        self.needs_layout = true;
        let Some(mut removed) = self.tabs.remove(key) else {
            return Ok(());
        };
        debug!("Removed tab at {position}, {} tabs left", self.order.len());

        if self.selected == Some(key) {
            let next = if self.order.is_empty() {
                None
            } else {
                Some(self.order[position.saturating_sub(1)])
            };
            self.change_selection(next, true, Some(removed.detached_snapshot()));
        }
        removed.reset();
        self.tab_pool.release(removed);
        Ok(())
    }

    /// Removes every tab without selection notifications.
    pub fn remove_all_tabs(&mut self) {
        self.strip.remove_all_views();
        for key in self.order.drain(..) {
            if let Some(mut tab) = self.tabs.remove(key) {
                tab.reset();
                self.tab_pool.release(tab);
            }
        }
        self.selected = None;
        self.needs_layout = true;
    }

    /// Edits an attached tab in place and schedules a relayout.
    pub fn update_tab(&mut self, key: TabKey, edit: impl FnOnce(&mut Tab)) -> Result<()> {
        let tab = self.tabs.get_mut(key).ok_or(TabStripError::DetachedTab)?;
        edit(tab);
        self.needs_layout = true;
        Ok(())
    }

    /// Attached tab behind `key`.
    pub fn tab(&self, key: TabKey) -> Option<&Tab> {
        self.tabs.get(key)
    }

    /// Tab at `position`.
    pub fn tab_at(&self, position: usize) -> Option<&Tab> {
        self.tab_key_at(position).and_then(|key| self.tabs.get(key))
    }

    /// Key of the tab at `position`.
    pub fn tab_key_at(&self, position: usize) -> Option<TabKey> {
        self.order.get(position).copied()
    }

    /// Keys of all tabs in order.
    pub fn tab_keys(&self) -> &[TabKey] {
        &self.order
    }

    /// Number of attached tabs.
    pub fn tab_count(&self) -> usize {
        self.order.len()
    }

    fn position_of(&self, key: TabKey) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == key)
    }

    fn renumber(&mut self, from: usize) {
        for (index, key) in self.order.iter().enumerate().skip(from) {
            if let Some(tab) = self.tabs.get_mut(*key) {
                tab.set_position(Some(index));
            }
        }
    }

    // ---- selection ----

    /// Key of the selected tab.
    pub fn selected_tab(&self) -> Option<TabKey> {
        self.selected
    }

    /// Position of the selected tab, `None` when nothing is selected.
    pub fn selected_tab_position(&self) -> Option<usize> {
        self.selected.and_then(|key| self.position_of(key))
    }

    /// Selects `key`, or clears the selection with `None`.
    ///
    /// Any registered veto returning `false` turns the call into a no-op.
    /// Selecting the selected tab again reports a reselection and replays
    /// the indicator animation. With `update_indicator` unset the indicator
    /// is left where it is, for callers that drive it themselves.
    pub fn select_tab(&mut self, key: Option<TabKey>, update_indicator: bool) -> Result<()> {
        if key.is_some_and(|key| !self.tabs.contains_key(key)) {
            return Err(TabStripError::DetachedTab);
        }

        let vetoes: Vec<SelectionVeto> = self.vetoes.iter().map(|(_, veto)| veto.clone()).collect();
        let candidate = key.and_then(|key| self.tabs.get(key));
        if vetoes.iter().any(|veto| !veto(candidate)) {
            debug!("Selection of {key:?} vetoed");
            return Ok(());
        }

        if key.is_some() && key == self.selected {
            if let Some(tab) = key.and_then(|key| self.tabs.get(key)).cloned() {
                self.dispatch(SelectionEvent::Reselected, &tab);
                if let Some(position) = tab.position() {
                    self.animate_to_tab(position);
                }
            }
            return Ok(());
        }

        let previous = self.selected.and_then(|key| self.tabs.get(key)).cloned();
        self.change_selection(key, update_indicator, previous);
        Ok(())
    }

    fn change_selection(&mut self, next: Option<TabKey>, update_indicator: bool, previous: Option<Tab>) {
        let position = next.and_then(|key| self.position_of(key));
        if update_indicator {
            let had_valid_selection = previous.as_ref().is_some_and(Tab::is_attached);
            match position {
                Some(position) if had_valid_selection => self.animate_to_tab(position),
                Some(position) => self.set_scroll_position(position, 0.0, true, true),
                None => self.strip.clear_indicator(),
            }
        }
        self.mark_selected_view(position);
        self.selected = next;
        debug!(
            "Selection moved from {:?} to {position:?}",
            previous.as_ref().and_then(Tab::position)
        );

        if let Some(previous) = previous {
            self.dispatch(SelectionEvent::Unselected, &previous);
        }
        if let Some(tab) = next.and_then(|key| self.tabs.get(key)).cloned() {
            self.dispatch(SelectionEvent::Selected, &tab);
        }
    }

    fn mark_selected_view(&mut self, position: Option<usize>) {
        self.strip.set_selected_view(position);
        let style = &self.style;
        // Wrapped labels change size with selection too.
        if style.text_size != style.selected_text_size
            || style.text_bold != style.selected_text_bold
            || style.text_max_lines > 1
        {
            self.needs_layout = true;
        }
    }

    fn dispatch(&mut self, event: SelectionEvent, tab: &Tab) {
        let listeners: Vec<Arc<dyn TabSelectionListener>> = self
            .listeners
            .iter()
            .rev()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            match event {
                SelectionEvent::Selected => listener.on_tab_selected(self, tab),
                SelectionEvent::Unselected => listener.on_tab_unselected(self, tab),
                SelectionEvent::Reselected => listener.on_tab_reselected(self, tab),
            }
        }
    }

    /// Registers `listener`. Registering the same listener twice returns the
    /// existing id. Listeners run newest first.
    pub fn add_selection_listener(&mut self, listener: Arc<dyn TabSelectionListener>) -> ListenerId {
        if let Some((id, _)) = self
            .listeners
            .iter()
            .find(|(_, existing)| Arc::ptr_eq(existing, &listener))
        {
            return *id;
        }
        let id = self.next_listener_id();
        self.listeners.push((id, listener));
        id
    }

    /// Unregisters a listener. Returns whether it was registered.
    pub fn remove_selection_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Unregisters every listener.
    pub fn clear_selection_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Registers a predicate that can cancel selection changes.
    pub fn add_selection_veto(
        &mut self,
        veto: impl Fn(Option<&Tab>) -> bool + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_listener_id();
        self.vetoes.push((id, Arc::new(veto)));
        id
    }

    /// Unregisters a veto. Returns whether it was registered.
    pub fn remove_selection_veto(&mut self, id: ListenerId) -> bool {
        let before = self.vetoes.len();
        self.vetoes.retain(|(existing, _)| *existing != id);
        self.vetoes.len() != before
    }

    /// Unregisters every veto.
    pub fn clear_selection_vetoes(&mut self) {
        self.vetoes.clear();
    }

    fn next_listener_id(&mut self) -> ListenerId {
        self.next_listener_id += 1;
        ListenerId(self.next_listener_id)
    }

    // ---- configuration ----

    /// Sets the sizing mode.
    pub fn set_tab_mode(&mut self, mode: TabMode) {
        if self.style.mode == mode {
            return;
        }
        warn_on_fallback(mode, self.style.gravity);
        self.style.mode = mode;
        self.strip.apply_mode_and_gravity(&self.style);
        self.needs_layout = true;
    }

    /// Sets the distribution of tabs.
    pub fn set_tab_gravity(&mut self, gravity: TabGravity) {
        if self.style.gravity == gravity {
            return;
        }
        warn_on_fallback(self.style.mode, gravity);
        self.style.gravity = gravity;
        self.strip.apply_mode_and_gravity(&self.style);
        self.needs_layout = true;
    }

    /// Sets the placement of a lone tab.
    pub fn set_single_tab_gravity(&mut self, gravity: SingleTabGravity) {
        if self.style.single_tab_gravity != gravity {
            self.style.single_tab_gravity = gravity;
            self.needs_layout = true;
        }
    }

    /// Sets the indicator motion strategy.
    pub fn set_indicator_animation_mode(&mut self, mode: IndicatorAnimationMode) {
        self.style.indicator_animation_mode = mode;
        self.strip.refresh_indicator(&self.style);
    }

    /// Spans the indicator over the whole tab instead of its content.
    pub fn set_indicator_full_width(&mut self, full_width: bool) {
        self.style.indicator_full_width = full_width;
        self.strip.refresh_indicator(&self.style);
    }

    /// Sets the vertical placement of the indicator.
    pub fn set_indicator_gravity(&mut self, gravity: IndicatorGravity) {
        self.style.indicator_gravity = gravity;
        self.strip.refresh_indicator(&self.style);
    }

    /// Sets the indicator thickness.
    pub fn set_indicator_height(&mut self, height: Dp) {
        self.style.indicator_height = height;
        self.strip.refresh_indicator(&self.style);
    }

    /// Sets an explicit indicator width, or returns to derived widths.
    pub fn set_indicator_width(&mut self, width: Option<Dp>) {
        self.style.indicator_width = width;
        self.strip.refresh_indicator(&self.style);
    }

    /// Replaces the whole configuration.
    pub fn set_style(&mut self, style: TabStripStyle) {
        if style == self.style {
            return;
        }
        warn_on_fallback(style.mode, style.gravity);
        self.style = style;
        self.strip.apply_mode_and_gravity(&self.style);
        self.needs_layout = true;
    }

    // ---- scrolling ----

    /// Places the strip at `offset` of the way from tab `position` to the
    /// next one, as a pager drag does.
    ///
    /// `update_text` restyles the tab nearest to the offset as selected;
    /// `update_indicator` moves the indicator with the offset. Positions
    /// outside the tab list are ignored.
    pub fn set_scroll_position(
        &mut self,
        position: usize,
        offset: f32,
        update_text: bool,
        update_indicator: bool,
    ) {
        let rounded = (position as f32 + offset).round();
        if rounded < 0.0 || rounded as usize >= self.order.len() {
            return;
        }
        if update_indicator {
            self.strip.tween_indicator(position, offset, &self.style);
        }
        let scroll_x = self.strip.scroll_x_for(position, offset, &self.style);
        self.strip.set_scroll_x(scroll_x);
        if update_text {
            self.mark_selected_view(Some(rounded as usize));
        }
    }

    /// Scrolls the row by `dx`, clamped to the scrollable range. Fixed rows
    /// do not scroll.
    pub fn scroll_by(&mut self, dx: Px) {
        if self.style.mode == TabMode::Fixed {
            return;
        }
        let x = self.strip.scroll_x() + dx;
        self.strip.set_scroll_x(x);
    }

    fn animate_to_tab(&mut self, position: usize) {
        let Some(key) = self.tab_key_at(position) else {
            return;
        };
        if !self.attached || !self.strip.is_laid_out() || self.strip.children_need_layout() {
            debug!("Strip not ready, jumping to tab {position}");
            self.set_scroll_position(position, 0.0, true, true);
            return;
        }
        if self.strip.scroll_x() != self.strip.scroll_x_for(position, 0.0, &self.style) {
            self.strip.animate_scroll_to(key, &self.style);
        }
        self.strip.animate_indicator_to(key, &self.style);
    }

    // ---- host pipeline ----

    /// The strip is now on screen. Selection changes animate from here on.
    pub fn on_attached(&mut self) {
        self.attached = true;
    }

    /// The strip left the screen. Selection changes jump until reattached.
    pub fn on_detached(&mut self) {
        self.attached = false;
    }

    /// Whether the strip is on screen.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether something changed since the last [`layout`](Self::layout).
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Measures and places every tab for a strip `container_width` wide.
    pub fn layout(&mut self, container_width: Px, measurer: &dyn TextMeasurer) {
        self.strip
            .measure(&self.tabs, &self.style, measurer, container_width);
        self.needs_layout = !self.strip.is_laid_out();
    }

    /// Advances running transitions to `now`. Returns `true` while another
    /// frame is needed.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        self.strip.tick(now, &self.style)
    }

    /// Draw list for the current state.
    pub fn draw(&self) -> Vec<DrawCommand> {
        self.strip.draw(&self.tabs, &self.style)
    }

    /// Selects the tab under strip-relative `x`, as a tap does. Returns the
    /// tapped position.
    pub fn handle_tap(&mut self, x: Px) -> Option<usize> {
        let position = self.strip.position_at(x)?;
        let key = self.tab_key_at(position)?;
        if let Err(err) = self.select_tab(Some(key), true) {
            warn!("Tap on tab {position} failed: {err}");
        }
        Some(position)
    }

    // ---- indicator ----

    /// Indicator frame to draw.
    pub fn indicator_frame(&self) -> Option<IndicatorFrame> {
        self.strip.indicator_frame()
    }

    /// Indicator motion state.
    pub fn indicator_motion(&self) -> IndicatorMotion {
        self.strip.indicator_motion()
    }

    /// Tab the indicator rests on or tweens away from.
    pub fn indicator_position(&self) -> Option<usize> {
        self.strip.indicator_position()
    }

    /// Tween fraction toward the next tab.
    pub fn selection_offset(&self) -> f32 {
        self.strip.selection_offset()
    }

    /// Whether the indicator or the row scroll is animating.
    pub fn is_animating(&self) -> bool {
        self.strip.is_indicator_animating() || self.strip.is_scroll_animating()
    }
}

fn warn_on_fallback(mode: TabMode, gravity: TabGravity) {
    if let (effective, Some(fallback)) = effective_gravity(mode, gravity) {
        warn!("{mode:?} tabs do not support {gravity:?} gravity, using {effective:?} ({fallback:?})");
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::tab_view::tests::MonospaceMeasurer;

    const MEASURER: MonospaceMeasurer = MonospaceMeasurer { advance: 8.0 };

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.events.lock())
        }

        fn record(&self, kind: &str, tab: &Tab) {
            let label = format!("{kind}:{}@{:?}", tab.text().unwrap_or(""), tab.position());
            self.events.lock().push(label);
        }
    }

    impl TabSelectionListener for Recorder {
        fn on_tab_selected(&self, _strip: &mut TabStripController, tab: &Tab) {
            self.record("selected", tab);
        }

        fn on_tab_unselected(&self, _strip: &mut TabStripController, tab: &Tab) {
            self.record("unselected", tab);
        }

        fn on_tab_reselected(&self, _strip: &mut TabStripController, tab: &Tab) {
            self.record("reselected", tab);
        }
    }

    fn controller_with(labels: &[&str]) -> (TabStripController, Vec<TabKey>) {
        let mut strip = TabStripController::new();
        let keys = labels
            .iter()
            .map(|label| {
                let tab = strip.new_tab().with_text(*label);
                strip.add_tab(tab).expect("own tab")
            })
            .collect();
        (strip, keys)
    }

    fn positions(strip: &TabStripController) -> Vec<Option<usize>> {
        strip
            .tab_keys()
            .iter()
            .map(|key| strip.tab(*key).and_then(Tab::position))
            .collect()
    }

    #[test]
    fn test_first_tab_is_selected() {
        let (strip, keys) = controller_with(&["A", "B"]);
        assert_eq!(strip.selected_tab(), Some(keys[0]));
        assert_eq!(strip.selected_tab_position(), Some(0));
    }

    #[test]
    fn test_positions_follow_inserts_and_removals() {
        let (mut strip, keys) = controller_with(&["A", "B", "C"]);
        let front = strip.new_tab().with_text("Front");
        let front = strip.insert_tab(front, 0, false).expect("insert");
        let middle = strip.new_tab().with_text("Middle");
        strip.insert_tab(middle, 2, false).expect("insert");
        assert_eq!(positions(&strip), (0..5).map(Some).collect::<Vec<_>>());
        assert_eq!(strip.tab(front).and_then(Tab::position), Some(0));
        assert_eq!(strip.tab(keys[0]).and_then(Tab::position), Some(1));

        strip.remove_tab(keys[1]).expect("remove");
        strip.remove_tab_at(0).expect("remove");
        assert_eq!(positions(&strip), (0..3).map(Some).collect::<Vec<_>>());
        assert!(strip.tab(keys[1]).is_none());
        assert_eq!(strip.strip().views().len(), 3);
        for (position, key) in strip.tab_keys().iter().enumerate() {
            assert_eq!(strip.strip().view(position).map(|view| view.tab_key()), Some(*key));
        }
    }

    #[test]
    fn test_misuse_is_reported() {
        let (mut strip, keys) = controller_with(&["A"]);
        let mut other = TabStripController::new();
        let foreign = other.new_tab();
        assert_eq!(
            strip.add_tab(foreign),
            Err(TabStripError::ForeignTab {
                tab_owner: other.id(),
                strip: strip.id()
            })
        );

        let tab = strip.new_tab();
        assert_eq!(
            strip.insert_tab(tab, 5, false),
            Err(TabStripError::PositionOutOfRange { position: 5, len: 1 })
        );
        assert_eq!(
            strip.remove_tab_at(1),
            Err(TabStripError::PositionOutOfRange { position: 1, len: 1 })
        );

        strip.remove_tab(keys[0]).expect("remove");
        assert_eq!(strip.remove_tab(keys[0]), Err(TabStripError::DetachedTab));
        assert_eq!(strip.select_tab(Some(keys[0]), true), Err(TabStripError::DetachedTab));
        assert_eq!(
            strip.update_tab(keys[0], |tab| tab.set_text("gone")),
            Err(TabStripError::DetachedTab)
        );
    }

    #[test]
    fn test_removing_selected_tab_selects_previous() {
        let (mut strip, keys) = controller_with(&["A", "B", "C", "D"]);
        let recorder = Arc::new(Recorder::default());
        strip.select_tab(Some(keys[2]), true).expect("select");
        strip.add_selection_listener(recorder.clone());

        strip.remove_tab_at(2).expect("remove");
        assert_eq!(strip.selected_tab(), Some(keys[1]));
        assert_eq!(strip.selected_tab_position(), Some(1));
        assert_eq!(recorder.take(), vec!["unselected:C@None", "selected:B@Some(1)"]);

        // Removing the first tab while it is selected keeps position 0.
        strip.select_tab(Some(keys[0]), true).expect("select");
        recorder.take();
        strip.remove_tab_at(0).expect("remove");
        assert_eq!(strip.selected_tab(), Some(keys[1]));
        assert_eq!(strip.selected_tab_position(), Some(0));

        // Removing an unselected tab leaves the selection alone.
        recorder.take();
        strip.remove_tab(keys[3]).expect("remove");
        assert_eq!(strip.selected_tab(), Some(keys[1]));
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_removing_only_tab_clears_selection() {
        let (mut strip, _) = controller_with(&["Solo"]);
        let recorder = Arc::new(Recorder::default());
        strip.add_selection_listener(recorder.clone());
        strip.remove_tab_at(0).expect("remove");
        assert_eq!(strip.selected_tab_position(), None);
        assert_eq!(recorder.take(), vec!["unselected:Solo@None"]);
        assert_eq!(strip.indicator_frame(), None);
    }

    #[test]
    fn test_reselect_keeps_position_and_reports_each_time() {
        let (mut strip, keys) = controller_with(&["A", "B"]);
        let recorder = Arc::new(Recorder::default());
        strip.add_selection_listener(recorder.clone());
        strip.select_tab(Some(keys[1]), true).expect("select");
        recorder.take();

        strip.select_tab(Some(keys[1]), true).expect("select");
        strip.select_tab(Some(keys[1]), true).expect("select");
        assert_eq!(strip.selected_tab_position(), Some(1));
        assert_eq!(
            recorder.take(),
            vec!["reselected:B@Some(1)", "reselected:B@Some(1)"]
        );
    }

    #[test]
    fn test_reselect_animates_indicator() {
        let (mut strip, keys) = controller_with(&["A", "B", "C"]);
        strip.on_attached();
        strip.layout(Px(360), &MEASURER);
        strip.select_tab(Some(keys[1]), true).expect("select");
        let start = Instant::now();
        strip.on_frame(start);
        assert!(!strip.on_frame(start + std::time::Duration::from_millis(300)));
        if strip.needs_layout() {
            strip.layout(Px(360), &MEASURER);
        }
        let recorder = Arc::new(Recorder::default());
        strip.add_selection_listener(recorder.clone());

        strip.select_tab(Some(keys[1]), true).expect("reselect");
        assert_eq!(recorder.take(), vec!["reselected:B@Some(1)"]);
        assert!(matches!(
            strip.indicator_motion(),
            IndicatorMotion::Animating { target, .. } if target == keys[1]
        ));
        assert!(strip.is_animating());
        assert_eq!(strip.selected_tab_position(), Some(1));
    }

    #[test]
    fn test_veto_blocks_everything() {
        let (mut strip, keys) = controller_with(&["A", "B", "C"]);
        let recorder = Arc::new(Recorder::default());
        strip.add_selection_listener(recorder.clone());
        let veto = strip.add_selection_veto(|tab| tab.and_then(Tab::text) != Some("C"));

        strip.select_tab(Some(keys[2]), true).expect("select");
        assert_eq!(strip.selected_tab(), Some(keys[0]));
        assert!(recorder.take().is_empty());

        strip.select_tab(Some(keys[1]), true).expect("select");
        assert_eq!(strip.selected_tab(), Some(keys[1]));

        assert!(strip.remove_selection_veto(veto));
        assert!(!strip.remove_selection_veto(veto));
        strip.select_tab(Some(keys[2]), true).expect("select");
        assert_eq!(strip.selected_tab(), Some(keys[2]));
    }

    #[test]
    fn test_listeners_run_newest_first_and_see_new_selection() {
        struct Probe {
            name: &'static str,
            log: Arc<Mutex<Vec<String>>>,
        }

        impl TabSelectionListener for Probe {
            fn on_tab_unselected(&self, strip: &mut TabStripController, _tab: &Tab) {
                self.log
                    .lock()
                    .push(format!("{} sees {:?}", self.name, strip.selected_tab_position()));
            }
        }

        let (mut strip, keys) = controller_with(&["A", "B"]);
        let log = Arc::new(Mutex::new(Vec::new()));
        let first: Arc<dyn TabSelectionListener> = Arc::new(Probe {
            name: "first",
            log: log.clone(),
        });
        let id = strip.add_selection_listener(first.clone());
        assert_eq!(strip.add_selection_listener(first), id);
        strip.add_selection_listener(Arc::new(Probe {
            name: "second",
            log: log.clone(),
        }));

        strip.select_tab(Some(keys[1]), true).expect("select");
        assert_eq!(
            *log.lock(),
            vec!["second sees Some(1)".to_owned(), "first sees Some(1)".to_owned()]
        );
    }

    #[test]
    fn test_listener_may_mutate_strip() {
        struct RemoveOnSelect;

        impl TabSelectionListener for RemoveOnSelect {
            fn on_tab_selected(&self, strip: &mut TabStripController, tab: &Tab) {
                if tab.text() == Some("Close") {
                    let _ = strip.remove_tab_at(tab.position().unwrap_or_default());
                }
            }
        }

        let (mut strip, keys) = controller_with(&["Home", "Close"]);
        let recorder = Arc::new(Recorder::default());
        strip.add_selection_listener(recorder.clone());
        strip.add_selection_listener(Arc::new(RemoveOnSelect));

        strip.select_tab(Some(keys[1]), true).expect("select");
        assert_eq!(strip.tab_count(), 1);
        assert_eq!(strip.selected_tab(), Some(keys[0]));
        assert_eq!(positions(&strip), vec![Some(0)]);
        // The recorder was registered first, so it still receives the
        // original event after the nested reselection.
        assert_eq!(
            recorder.take(),
            vec![
                "unselected:Home@Some(0)",
                "unselected:Close@None",
                "selected:Home@Some(0)",
                "selected:Close@Some(1)"
            ]
        );
    }

    #[test]
    fn test_remove_all_is_silent_and_recycles() {
        let (mut strip, _) = controller_with(&["A", "B", "C"]);
        let recorder = Arc::new(Recorder::default());
        strip.add_selection_listener(recorder.clone());
        strip.remove_all_tabs();
        assert_eq!(strip.tab_count(), 0);
        assert_eq!(strip.selected_tab(), None);
        assert!(recorder.take().is_empty());
        assert_eq!(strip.tab_pool.len(), 3);

        let recycled = strip.new_tab();
        assert_eq!(recycled.text(), None);
        assert_eq!(recycled.position(), None);
        assert_eq!(recycled.owner(), strip.id());
    }

    #[test]
    fn test_selection_without_indicator_update_keeps_indicator() {
        let (mut strip, keys) = controller_with(&["A", "B", "C"]);
        strip.on_attached();
        strip.layout(Px(360), &MEASURER);
        strip.select_tab(Some(keys[2]), false).expect("select");
        assert_eq!(strip.indicator_position(), Some(0));
        assert_eq!(strip.indicator_motion(), IndicatorMotion::Idle);
        assert!(strip.strip().view(2).is_some_and(|view| view.is_selected()));
        assert!(!strip.strip().view(0).is_some_and(|view| view.is_selected()));
    }

    #[test]
    fn test_unattached_selection_jumps() {
        let (mut strip, keys) = controller_with(&["A", "B", "C"]);
        strip.layout(Px(360), &MEASURER);
        strip.select_tab(Some(keys[2]), true).expect("select");
        assert_eq!(strip.indicator_motion(), IndicatorMotion::Idle);
        assert_eq!(strip.indicator_position(), Some(2));
        assert!(!strip.is_animating());
    }

    #[test]
    fn test_tap_selects_tab_under_pointer() {
        let (mut strip, keys) = controller_with(&["A", "B", "C"]);
        strip.on_attached();
        strip.layout(Px(360), &MEASURER);
        assert_eq!(strip.handle_tap(Px(250)), Some(2));
        assert_eq!(strip.selected_tab(), Some(keys[2]));
        assert!(strip.is_animating());
        assert_eq!(strip.handle_tap(Px(-5)), None);
    }

    #[test]
    fn test_scroll_position_tweens_and_restyles() {
        let style = TabStripStyle::default()
            .mode(TabMode::Scrollable)
            .selected_text_bold(true);
        let mut strip = TabStripController::with_style(style);
        for label in ["Overview", "Activity", "Settings", "Members", "Billing"] {
            let tab = strip.new_tab().with_text(label);
            strip.add_tab(tab).expect("add");
        }
        strip.layout(Px(300), &MEASURER);
        assert!(!strip.needs_layout());

        strip.set_scroll_position(1, 0.75, true, true);
        assert_eq!(
            strip.indicator_motion(),
            IndicatorMotion::Tweening {
                position: 1,
                offset: 0.75
            }
        );
        assert!(strip.strip().view(2).is_some_and(|view| view.is_selected()));
        assert!(strip.needs_layout());
        assert!(strip.strip().scroll_x() > Px::ZERO);
        // The logical selection does not follow a drag.
        assert_eq!(strip.selected_tab_position(), Some(0));

        strip.set_scroll_position(9, 0.0, true, true);
        assert_eq!(strip.indicator_position(), Some(1));
    }

    #[test]
    fn test_user_scroll_is_clamped_and_disabled_when_fixed() {
        let style = TabStripStyle::default().mode(TabMode::Scrollable);
        let mut strip = TabStripController::with_style(style);
        for label in ["Overview", "Activity", "Settings", "Members", "Billing"] {
            let tab = strip.new_tab().with_text(label);
            strip.add_tab(tab).expect("add");
        }
        strip.layout(Px(300), &MEASURER);
        strip.scroll_by(Px(40));
        assert_eq!(strip.strip().scroll_x(), Px(40));
        strip.scroll_by(Px(10_000));
        assert_eq!(strip.strip().scroll_x(), strip.strip().scroll_range());

        strip.set_tab_mode(TabMode::Fixed);
        strip.layout(Px(300), &MEASURER);
        strip.scroll_by(Px(10));
        assert_eq!(strip.strip().scroll_x(), Px::ZERO);
    }

    #[test]
    fn test_config_changes_request_layout() {
        let (mut strip, _) = controller_with(&["A", "B"]);
        strip.layout(Px(360), &MEASURER);
        assert!(!strip.needs_layout());

        strip.set_tab_mode(TabMode::Fixed);
        assert!(strip.needs_layout());
        strip.layout(Px(360), &MEASURER);

        // Fixed + Start is substituted, not rejected.
        strip.set_tab_gravity(TabGravity::Start);
        assert_eq!(strip.style().gravity, TabGravity::Start);
        strip.layout(Px(360), &MEASURER);
        assert!(strip.strip().decision().is_some());

        strip.set_indicator_gravity(IndicatorGravity::Top);
        let bounds = strip.indicator_frame().map(|frame| frame.bounds);
        assert_eq!(bounds.map(|rect| rect.top()), Some(Px::ZERO));
    }

    #[test]
    fn test_wrapped_label_restyles_on_selection() {
        let style = TabStripStyle::default().mode(TabMode::Fixed).text_max_lines(2usize);
        let mut strip = TabStripController::with_style(style);
        let mut keys = Vec::new();
        for label in ["A", "Notifications", "B"] {
            let tab = strip.new_tab().with_text(label);
            keys.push(strip.add_tab(tab).expect("add"));
        }
        strip.layout(Px(240), &MEASURER);
        let label_of = |strip: &TabStripController| {
            strip.draw().into_iter().find_map(|command| match command {
                DrawCommand::Label {
                    position: 1,
                    size,
                    lines,
                    ..
                } => Some((size, lines)),
                _ => None,
            })
        };
        assert_eq!(label_of(&strip), Some((Dp(12.0), 2)));

        strip.select_tab(Some(keys[1]), true).expect("select");
        assert!(strip.needs_layout());
        strip.layout(Px(240), &MEASURER);
        assert_eq!(label_of(&strip), Some((Dp(14.0), 2)));
    }
}
