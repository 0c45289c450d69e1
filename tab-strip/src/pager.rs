//! Keeping a strip in step with a swipeable pager.
//!
//! The host forwards its pager's callbacks as [`PagerEvent`]s. Continuous
//! scroll updates move the indicator and the selected text style directly,
//! discrete page selections go through
//! [`select_tab`](TabStripController::select_tab). Which of the two paths
//! handles a movement depends on how the pager got into its current scroll
//! state, tracked by [`PageScrollTracker`].

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{
    controller::{ListenerId, TabSelectionListener, TabStripController},
    tab::Tab,
};

/// A pager the strip can mirror.
pub trait PagerSource: Send + Sync {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Title of page `index`, used as the tab text.
    fn page_title(&self, index: usize) -> Option<String>;

    /// Index of the page currently shown.
    fn current_page(&self) -> usize;

    /// Moves the pager to page `index`.
    fn set_current_page(&mut self, index: usize, smooth: bool);
}

/// A pager shared between the host and the strip.
pub type SharedPager = Arc<RwLock<dyn PagerSource>>;

/// Configures the tab created for page `index` during population.
pub type ConfigureTab = Arc<dyn Fn(&mut Tab, usize) + Send + Sync>;

/// Scroll state reported by the pager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollState {
    /// At rest.
    #[default]
    Idle,
    /// Following the user's finger.
    Dragging,
    /// Settling on a page, after a fling or a programmatic jump.
    Settling,
}

/// Pager callbacks, forwarded by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PagerEvent {
    /// The pager is `offset` of the way from `position` to the next page.
    PageScrolled {
        /// Left-hand page.
        position: usize,
        /// Fraction toward the next page.
        offset: f32,
    },
    /// A new page became current.
    PageSelected(usize),
    /// The pager's scroll state changed.
    ScrollStateChanged(ScrollState),
    /// The pages behind the pager changed.
    DataSetChanged,
    /// The pager was given a different page source.
    AdapterChanged,
}

/// Last two scroll states of a pager and the gates derived from them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageScrollTracker {
    scroll_state: ScrollState,
    previous_scroll_state: ScrollState,
}

impl PageScrollTracker {
    /// A tracker for a pager at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scroll state change.
    pub fn on_scroll_state_changed(&mut self, state: ScrollState) {
        self.previous_scroll_state = self.scroll_state;
        self.scroll_state = state;
    }

    /// Current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Scroll state before the current one.
    pub fn previous_scroll_state(&self) -> ScrollState {
        self.previous_scroll_state
    }

    /// Whether a continuous scroll restyles the selected text. A settle that
    /// did not start from a drag leaves the text alone.
    pub fn update_text(&self) -> bool {
        self.scroll_state != ScrollState::Settling
            || self.previous_scroll_state == ScrollState::Dragging
    }

    /// Whether a continuous scroll moves the indicator. A programmatic jump
    /// (settling straight from rest) is animated by the page selection
    /// instead.
    pub fn update_indicator_on_scroll(&self) -> bool {
        !(self.scroll_state == ScrollState::Settling
            && self.previous_scroll_state == ScrollState::Idle)
    }

    /// Whether a page selection animates the indicator.
    pub fn update_indicator_on_select(&self) -> bool {
        self.scroll_state == ScrollState::Idle
            || (self.scroll_state == ScrollState::Settling
                && self.previous_scroll_state == ScrollState::Idle)
    }

    /// Forgets both states.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Moves the pager when the user selects a tab.
struct PagerSelectionListener {
    pager: SharedPager,
}

impl TabSelectionListener for PagerSelectionListener {
    fn on_tab_selected(&self, _strip: &mut TabStripController, tab: &Tab) {
        if let Some(position) = tab.position() {
            self.pager.write().set_current_page(position, true);
        }
    }
}

pub(crate) struct PagerBinding {
    pager: SharedPager,
    tracker: PageScrollTracker,
    auto_refresh: bool,
    configure: Option<ConfigureTab>,
    listener: ListenerId,
}

impl TabStripController {
    /// Mirrors `pager`: one tab per page titled after it, the selection
    /// following the current page and tab selections moving the pager.
    ///
    /// With `auto_refresh` set, [`PagerEvent::DataSetChanged`] rebuilds the
    /// tabs. Passing `None` unbinds and removes every tab.
    pub fn bind_to_pager(&mut self, pager: Option<SharedPager>, auto_refresh: bool) {
        self.bind(pager, auto_refresh, None);
    }

    /// Like [`bind_to_pager`](Self::bind_to_pager), calling `configure` on
    /// every tab it creates after the title is set.
    pub fn bind_to_pager_with(
        &mut self,
        pager: Option<SharedPager>,
        auto_refresh: bool,
        configure: ConfigureTab,
    ) {
        self.bind(pager, auto_refresh, Some(configure));
    }

    fn bind(&mut self, pager: Option<SharedPager>, auto_refresh: bool, configure: Option<ConfigureTab>) {
        if let Some(previous) = self.pager.take() {
            self.remove_selection_listener(previous.listener);
        }
        let Some(pager) = pager else {
            debug!("Unbound from pager");
            self.remove_all_tabs();
            return;
        };
        let listener = self.add_selection_listener(Arc::new(PagerSelectionListener {
            pager: pager.clone(),
        }));
        self.pager = Some(PagerBinding {
            pager,
            tracker: PageScrollTracker::new(),
            auto_refresh,
            configure,
            listener,
        });
        self.populate_from_pager();
    }

    /// Scroll state tracker of the bound pager.
    pub fn pager_scroll_tracker(&self) -> Option<PageScrollTracker> {
        self.pager.as_ref().map(|binding| binding.tracker)
    }

    /// Applies a pager callback. Ignored while no pager is bound.
    pub fn handle_pager_event(&mut self, event: PagerEvent) {
        let Some(binding) = self.pager.as_mut() else {
            return;
        };
        match event {
            PagerEvent::ScrollStateChanged(state) => {
                binding.tracker.on_scroll_state_changed(state);
            }
            PagerEvent::PageScrolled { position, offset } => {
                let tracker = binding.tracker;
                self.set_scroll_position(
                    position,
                    offset,
                    tracker.update_text(),
                    tracker.update_indicator_on_scroll(),
                );
            }
            PagerEvent::PageSelected(index) => {
                let update_indicator = binding.tracker.update_indicator_on_select();
                if self.selected_tab_position() == Some(index) {
                    return;
                }
                let Some(key) = self.tab_key_at(index) else {
                    return;
                };
                if let Err(err) = self.select_tab(Some(key), update_indicator) {
                    warn!("Could not follow pager to page {index}: {err}");
                }
            }
            PagerEvent::DataSetChanged => {
                if binding.auto_refresh {
                    self.populate_from_pager();
                }
            }
            PagerEvent::AdapterChanged => {
                binding.tracker.reset();
                self.populate_from_pager();
            }
        }
    }

    /// Rebuilds every tab from the bound pager and selects its current page.
    fn populate_from_pager(&mut self) {
        let Some(binding) = self.pager.as_ref() else {
            return;
        };
        let configure = binding.configure.clone();
        let (titles, current) = {
            let source = binding.pager.read();
            let titles: Vec<Option<String>> =
                (0..source.page_count()).map(|index| source.page_title(index)).collect();
            (titles, source.current_page())
        };

        self.remove_all_tabs();
        for (index, title) in titles.into_iter().enumerate() {
            let mut tab = self.new_tab();
            if let Some(title) = title {
                tab.set_text(title);
            }
            if let Some(configure) = &configure {
                configure(&mut tab, index);
            }
            if let Err(err) = self.attach_tab(tab, index) {
                warn!("Skipping page {index}: {err}");
            }
        }
        debug!("Populated {} tabs from pager", self.tab_count());

        let Some(last) = self.tab_count().checked_sub(1) else {
            return;
        };
        let current = current.min(last);
        if self.selected_tab_position() == Some(current) {
            return;
        }
        if let Err(err) = self.select_tab(self.tab_key_at(current), true) {
            warn!("Could not select page {current}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{px::Px, strip::IndicatorMotion, tab_view::tests::MonospaceMeasurer};

    const MEASURER: MonospaceMeasurer = MonospaceMeasurer { advance: 8.0 };

    struct Pages {
        titles: Vec<String>,
        current: usize,
        moves: Vec<(usize, bool)>,
    }

    impl Pages {
        fn shared(titles: &[&str], current: usize) -> Arc<RwLock<Pages>> {
            Arc::new(RwLock::new(Pages {
                titles: titles.iter().map(|title| (*title).to_owned()).collect(),
                current,
                moves: Vec::new(),
            }))
        }
    }

    impl PagerSource for Pages {
        fn page_count(&self) -> usize {
            self.titles.len()
        }

        fn page_title(&self, index: usize) -> Option<String> {
            self.titles.get(index).cloned()
        }

        fn current_page(&self) -> usize {
            self.current
        }

        fn set_current_page(&mut self, index: usize, smooth: bool) {
            self.current = index;
            self.moves.push((index, smooth));
        }
    }

    fn titles(strip: &TabStripController) -> Vec<String> {
        (0..strip.tab_count())
            .filter_map(|position| strip.tab_at(position).and_then(Tab::text))
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_gates_follow_scroll_state_history() {
        let mut tracker = PageScrollTracker::new();
        assert!(tracker.update_text());
        assert!(tracker.update_indicator_on_scroll());
        assert!(tracker.update_indicator_on_select());

        // User drag, then fling.
        tracker.on_scroll_state_changed(ScrollState::Dragging);
        assert!(tracker.update_text());
        assert!(tracker.update_indicator_on_scroll());
        assert!(!tracker.update_indicator_on_select());
        tracker.on_scroll_state_changed(ScrollState::Settling);
        assert!(tracker.update_text());
        assert!(tracker.update_indicator_on_scroll());
        assert!(!tracker.update_indicator_on_select());

        // Programmatic jump.
        tracker.reset();
        tracker.on_scroll_state_changed(ScrollState::Settling);
        assert_eq!(tracker.previous_scroll_state(), ScrollState::Idle);
        assert!(!tracker.update_text());
        assert!(!tracker.update_indicator_on_scroll());
        assert!(tracker.update_indicator_on_select());
    }

    #[test]
    fn test_binding_populates_and_selects_current_page() {
        let pages = Pages::shared(&["Music", "Films", "Books"], 1);
        let mut strip = TabStripController::new();
        strip.bind_to_pager(Some(pages.clone()), true);

        assert_eq!(titles(&strip), vec!["Music", "Films", "Books"]);
        assert_eq!(strip.selected_tab_position(), Some(1));
        // Selecting the current page moves the pager to where it already is.
        assert_eq!(pages.read().moves, vec![(1, true)]);
    }

    #[test]
    fn test_current_page_past_the_end_selects_last() {
        let pages = Pages::shared(&["Music", "Films"], 7);
        let mut strip = TabStripController::new();
        strip.bind_to_pager(Some(pages), false);
        assert_eq!(strip.selected_tab_position(), Some(1));
    }

    #[test]
    fn test_data_set_change_repopulates_only_with_auto_refresh() {
        let pages = Pages::shared(&["Music", "Films"], 0);
        let mut strip = TabStripController::new();
        strip.bind_to_pager(Some(pages.clone()), false);
        pages.write().titles.push("Books".to_owned());

        strip.handle_pager_event(PagerEvent::DataSetChanged);
        assert_eq!(strip.tab_count(), 2);

        // Adapter changes always repopulate.
        strip.handle_pager_event(PagerEvent::AdapterChanged);
        assert_eq!(titles(&strip), vec!["Music", "Films", "Books"]);

        strip.bind_to_pager(Some(pages.clone()), true);
        pages.write().titles.remove(0);
        pages.write().current = 1;
        strip.handle_pager_event(PagerEvent::DataSetChanged);
        assert_eq!(titles(&strip), vec!["Films", "Books"]);
        assert_eq!(strip.selected_tab_position(), Some(1));
    }

    #[test]
    fn test_tab_selection_moves_pager() {
        let pages = Pages::shared(&["Music", "Films", "Books"], 0);
        let mut strip = TabStripController::new();
        strip.bind_to_pager(Some(pages.clone()), true);
        pages.write().moves.clear();

        let books = strip.tab_key_at(2);
        strip.select_tab(books, true).expect("select");
        assert_eq!(pages.read().current, 2);
        assert_eq!(pages.read().moves, vec![(2, true)]);

        // Unbinding removes the listener and the tabs.
        strip.bind_to_pager(None, true);
        assert_eq!(strip.tab_count(), 0);
        assert_eq!(strip.pager_scroll_tracker(), None);
    }

    #[test]
    fn test_drag_tweens_then_settles() {
        let pages = Pages::shared(&["Music", "Films", "Books"], 0);
        let mut strip = TabStripController::new();
        strip.bind_to_pager(Some(pages), true);
        strip.on_attached();
        strip.layout(Px(360), &MEASURER);

        strip.handle_pager_event(PagerEvent::ScrollStateChanged(ScrollState::Dragging));
        strip.handle_pager_event(PagerEvent::PageScrolled {
            position: 0,
            offset: 0.4,
        });
        assert_eq!(
            strip.indicator_motion(),
            IndicatorMotion::Tweening {
                position: 0,
                offset: 0.4
            }
        );

        strip.handle_pager_event(PagerEvent::ScrollStateChanged(ScrollState::Settling));
        // Mid-fling page selection does not restart the indicator.
        strip.handle_pager_event(PagerEvent::PageSelected(1));
        assert_eq!(strip.selected_tab_position(), Some(1));
        assert!(!strip.is_animating());

        strip.handle_pager_event(PagerEvent::PageScrolled {
            position: 1,
            offset: 0.0,
        });
        strip.handle_pager_event(PagerEvent::ScrollStateChanged(ScrollState::Idle));
        assert_eq!(strip.indicator_motion(), IndicatorMotion::Idle);
        assert_eq!(strip.indicator_position(), Some(1));
    }

    #[test]
    fn test_programmatic_jump_animates_instead_of_tweening() {
        let pages = Pages::shared(&["Music", "Films", "Books"], 0);
        let mut strip = TabStripController::new();
        strip.bind_to_pager(Some(pages), true);
        strip.on_attached();
        strip.layout(Px(360), &MEASURER);

        strip.handle_pager_event(PagerEvent::ScrollStateChanged(ScrollState::Settling));
        strip.handle_pager_event(PagerEvent::PageSelected(2));
        assert!(matches!(
            strip.indicator_motion(),
            IndicatorMotion::Animating { .. }
        ));

        // Scroll callbacks during the jump leave the animation running.
        strip.handle_pager_event(PagerEvent::PageScrolled {
            position: 1,
            offset: 0.5,
        });
        assert!(matches!(
            strip.indicator_motion(),
            IndicatorMotion::Animating { .. }
        ));
        assert!(strip.strip().view(2).is_some_and(|view| view.is_selected()));
    }

    #[test]
    fn test_events_without_pager_are_ignored() {
        let mut strip = TabStripController::new();
        let tab = strip.new_tab().with_text("Solo");
        strip.add_tab(tab).expect("add");
        strip.handle_pager_event(PagerEvent::DataSetChanged);
        strip.handle_pager_event(PagerEvent::PageSelected(0));
        assert_eq!(strip.tab_count(), 1);
        assert_eq!(strip.pager_scroll_tracker(), None);
    }

    #[test]
    fn test_configure_closure_decorates_tabs() {
        let pages = Pages::shared(&["Music", "Films"], 0);
        let mut strip = TabStripController::new();
        strip.bind_to_pager_with(
            Some(pages),
            true,
            Arc::new(|tab: &mut Tab, index: usize| {
                tab.set_text(format!("{index}. {}", tab.text().unwrap_or_default()));
            }),
        );
        assert_eq!(titles(&strip), vec!["0. Music", "1. Films"]);
    }
}
