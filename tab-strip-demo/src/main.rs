//! Drives a tab strip through a scripted session and logs what a renderer
//! would paint.
//!
//! Run with `RUST_LOG=tab_strip=debug` to see layout and indicator decisions.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::RwLock;
use tab_strip::{
    Dp, DrawCommand, IndicatorAnimationMode, PagerEvent, PagerSource, Px, PxSize, ScrollState,
    Tab, TabMode, TabSelectionListener, TabStripController, TabStripStyle, TextMeasurer,
    set_scale_factor,
};
use tracing::info;

const FRAME: Duration = Duration::from_millis(16);

struct Monospace;

impl TextMeasurer for Monospace {
    fn measure_text(&self, text: &str, size: Dp, bold: bool) -> PxSize {
        let advance = size.to_pixels_f32() * if bold { 0.62 } else { 0.56 };
        let width = (advance * text.chars().count() as f32).round() as i32;
        PxSize::new(Px(width), Dp(size.0 * 1.4).to_px())
    }
}

struct Library {
    shelves: Vec<&'static str>,
    current: usize,
}

impl PagerSource for Library {
    fn page_count(&self) -> usize {
        self.shelves.len()
    }

    fn page_title(&self, index: usize) -> Option<String> {
        self.shelves.get(index).map(|shelf| (*shelf).to_owned())
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn set_current_page(&mut self, index: usize, smooth: bool) {
        info!("Pager moves to {index} (smooth: {smooth})");
        self.current = index;
    }
}

struct Announcer;

impl TabSelectionListener for Announcer {
    fn on_tab_selected(&self, _strip: &mut TabStripController, tab: &Tab) {
        info!("Selected {:?} at {:?}", tab.text(), tab.position());
    }

    fn on_tab_reselected(&self, _strip: &mut TabStripController, tab: &Tab) {
        info!("Reselected {:?}", tab.text());
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,tab_strip=info,tab_strip_demo=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

fn run_until_idle(strip: &mut TabStripController, clock: &mut Instant) {
    while strip.on_frame(*clock) {
        *clock += FRAME;
    }
}

fn paint(strip: &TabStripController) {
    for command in strip.draw() {
        match command {
            DrawCommand::Indicator { bounds, color } => {
                info!("indicator {bounds:?} alpha {:.2}", color.a)
            }
            DrawCommand::Label {
                position,
                text,
                bounds,
                bold,
                ..
            } => info!("label #{position} {text:?} at {:?} bold {bold}", bounds.x),
            _ => {}
        }
    }
}

fn main() {
    init_tracing();
    set_scale_factor(2.0);

    let width = Dp(360.0).to_px();
    let style = TabStripStyle::default()
        .mode(TabMode::Auto)
        .indicator_animation_mode(IndicatorAnimationMode::Elastic)
        .selected_text_bold(true)
        .content_inset_start(Dp(52.0));
    let mut strip = TabStripController::with_style(style);
    strip.add_selection_listener(Arc::new(Announcer));

    let library = Arc::new(RwLock::new(Library {
        shelves: vec!["Fiction", "History", "Science", "Poetry"],
        current: 1,
    }));
    strip.bind_to_pager(Some(library.clone()), true);
    strip.on_attached();
    strip.layout(width, &Monospace);
    paint(&strip);

    let mut clock = Instant::now();

    info!("User drags from page 1 toward page 2");
    strip.handle_pager_event(PagerEvent::ScrollStateChanged(ScrollState::Dragging));
    for step in 1..=4 {
        strip.handle_pager_event(PagerEvent::PageScrolled {
            position: 1,
            offset: step as f32 * 0.2,
        });
        if strip.needs_layout() {
            strip.layout(width, &Monospace);
        }
    }
    strip.handle_pager_event(PagerEvent::ScrollStateChanged(ScrollState::Settling));
    strip.handle_pager_event(PagerEvent::PageSelected(2));
    strip.handle_pager_event(PagerEvent::PageScrolled {
        position: 2,
        offset: 0.0,
    });
    strip.handle_pager_event(PagerEvent::ScrollStateChanged(ScrollState::Idle));
    strip.layout(width, &Monospace);
    paint(&strip);

    info!("User taps the first tab");
    if let Some(position) = strip.handle_tap(Px(10)) {
        info!("Tapped tab {position}");
    }
    strip.layout(width, &Monospace);
    run_until_idle(&mut strip, &mut clock);
    paint(&strip);

    info!("A shelf is added behind the pager");
    library.write().shelves.push("Travel writing");
    strip.handle_pager_event(PagerEvent::DataSetChanged);
    strip.layout(width, &Monospace);
    info!(
        "{} tabs, row {:?} wide, scrollable: {}",
        strip.tab_count(),
        strip.strip().row_width(),
        strip.strip().decision().is_some_and(|decision| decision.scrollable)
    );

    if let Some(last) = strip.tab_count().checked_sub(1) {
        let key = strip.tab_key_at(last);
        if let Err(err) = strip.select_tab(key, true) {
            info!("Selection failed: {err}");
        }
        run_until_idle(&mut strip, &mut clock);
        info!("Scrolled to {:?}", strip.strip().scroll_x());
    }
    paint(&strip);
}
