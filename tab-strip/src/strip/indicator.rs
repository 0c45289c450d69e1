use std::time::Instant;

use tracing::{debug, trace};

use crate::{
    animation::{AnimationFrame, Animator, fast_out_slow_in},
    interpolator::{IndicatorFrame, IndicatorGeometry},
    px::PxRect,
    style::TabStripStyle,
    tab::TabKey,
};

use super::TabStrip;

/// Motion state of the selection indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IndicatorMotion {
    /// Pinned to the tab it rests on.
    Idle,
    /// Following an external scroll fraction between `position` and the
    /// next tab.
    Tweening {
        /// Left-hand tab of the transition.
        position: usize,
        /// Fraction toward the next tab, in `(0, 1)`.
        offset: f32,
    },
    /// Running a timed transition toward `target`.
    Animating {
        /// Destination tab, tracked by key so relayouts re-target it.
        target: TabKey,
        /// Bounds captured when the transition started.
        start: PxRect,
    },
}

#[derive(Debug, Clone)]
pub(super) struct IndicatorState {
    motion: IndicatorMotion,
    animator: Animator,
    anchor: Option<TabKey>,
    offset: f32,
    frame: Option<IndicatorFrame>,
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self {
            motion: IndicatorMotion::Idle,
            animator: Animator::new(fast_out_slow_in),
            anchor: None,
            offset: 0.0,
            frame: None,
        }
    }
}

impl IndicatorState {
    /// Positions held by a tween are stale once views move.
    pub(super) fn on_views_shifted(&mut self) {
        if let IndicatorMotion::Tweening { .. } = self.motion {
            self.motion = IndicatorMotion::Idle;
            self.offset = 0.0;
        }
    }
}

impl TabStrip {
    fn indicator_geometry(&self, style: &TabStripStyle) -> IndicatorGeometry {
        IndicatorGeometry {
            full_width: style.indicator_full_width,
            min_width: style.indicator_min_width.to_px(),
            fixed_width: style.indicator_width.map(|dp| dp.to_px()),
            gravity: style.indicator_gravity,
            height: style.indicator_height.to_px(),
        }
    }

    /// Indicator rectangle for the tab at `position`, `None` until that view
    /// has been given a width.
    pub(crate) fn indicator_rect(&self, position: usize, style: &TabStripStyle) -> Option<PxRect> {
        let view = self.views.get(position)?;
        if view.frame().width.raw() <= 0 {
            return None;
        }
        Some(self.indicator_geometry(style).rect_for(
            view.frame(),
            view.content_bounds(),
            self.height,
        ))
    }

    /// Current motion state.
    pub fn indicator_motion(&self) -> IndicatorMotion {
        self.indicator.motion
    }

    /// Frame to draw, `None` while there is nothing to point at.
    pub fn indicator_frame(&self) -> Option<IndicatorFrame> {
        self.indicator.frame
    }

    /// Position of the tab the indicator rests on (or tweens away from).
    pub fn indicator_position(&self) -> Option<usize> {
        self.indicator.anchor.and_then(|key| self.index_of(key))
    }

    /// Fraction toward the next tab while tweening, otherwise zero.
    pub fn selection_offset(&self) -> f32 {
        self.indicator.offset
    }

    /// Whether a timed indicator transition is in flight.
    pub fn is_indicator_animating(&self) -> bool {
        matches!(self.indicator.motion, IndicatorMotion::Animating { .. })
    }

    /// Moves the indicator to `offset` of the way from `position` to the
    /// next tab. Cancels any timed transition. An offset of zero pins the
    /// indicator to `position`.
    pub(crate) fn tween_indicator(&mut self, position: usize, offset: f32, style: &TabStripStyle) {
        let Some(view) = self.views.get(position) else {
            return;
        };
        self.indicator.animator.cancel();
        self.indicator.anchor = Some(view.tab_key());
        let offset = offset.clamp(0.0, 1.0);
        if offset > 0.0 && position + 1 < self.views.len() {
            self.indicator.offset = offset;
            self.indicator.motion = IndicatorMotion::Tweening { position, offset };
        } else {
            self.indicator.offset = 0.0;
            self.indicator.motion = IndicatorMotion::Idle;
        }
        self.refresh_indicator(style);
    }

    /// Starts a timed transition toward `target` from the bounds currently
    /// drawn. Jumps when there is nothing drawn to start from.
    pub(crate) fn animate_indicator_to(&mut self, target: TabKey, style: &TabStripStyle) {
        let Some(position) = self.index_of(target) else {
            return;
        };
        let start = self.indicator.frame.map(|frame| frame.visible_bounds()).or_else(|| {
            self.indicator_position()
                .and_then(|anchor| self.indicator_rect(anchor, style))
        });
        let Some(start) = start else {
            self.tween_indicator(position, 0.0, style);
            return;
        };
        debug!("Animating indicator to tab {position} from {start:?}");
        self.indicator.motion = IndicatorMotion::Animating { target, start };
        self.indicator.offset = 0.0;
        self.indicator.animator.start(style.animation_duration);
        self.refresh_indicator(style);
    }

    /// Hides the indicator.
    pub(crate) fn clear_indicator(&mut self) {
        self.indicator.animator.cancel();
        self.indicator.motion = IndicatorMotion::Idle;
        self.indicator.anchor = None;
        self.indicator.offset = 0.0;
        self.indicator.frame = None;
    }

    /// Recomputes the drawn frame for the current motion against the
    /// current geometry.
    pub(crate) fn refresh_indicator(&mut self, style: &TabStripStyle) {
        let interpolator = style.indicator_animation_mode.interpolator();
        match self.indicator.motion {
            IndicatorMotion::Idle => {
                self.indicator.frame = self
                    .indicator_position()
                    .and_then(|position| self.indicator_rect(position, style))
                    .map(IndicatorFrame::settled);
            }
            IndicatorMotion::Tweening { position, offset } => {
                let from = self.indicator_rect(position, style);
                let to = self.indicator_rect(position + 1, style);
                self.indicator.frame = match (from, to) {
                    (Some(from), Some(to)) => Some(interpolator.indicator_frame(from, to, offset)),
                    (from, _) => from.map(IndicatorFrame::settled),
                };
            }
            IndicatorMotion::Animating { target, start } => {
                let Some(position) = self.index_of(target) else {
                    self.abort_indicator_animation(style);
                    return;
                };
                // Not yet measured: keep drawing the last frame.
                if let Some(destination) = self.indicator_rect(position, style) {
                    self.indicator.frame = Some(interpolator.indicator_frame(
                        start,
                        destination,
                        self.indicator.animator.fraction(),
                    ));
                }
            }
        }
    }

    /// The destination disappeared mid-flight: settle on the selected view.
    fn abort_indicator_animation(&mut self, style: &TabStripStyle) {
        debug!("Indicator target vanished, settling on the selected tab");
        self.indicator.animator.cancel();
        self.indicator.motion = IndicatorMotion::Idle;
        self.indicator.offset = 0.0;
        let selected = self
            .views
            .iter()
            .find(|view| view.is_selected())
            .map(|view| view.tab_key());
        if selected.is_some() {
            self.indicator.anchor = selected;
        }
        self.refresh_indicator(style);
    }

    /// Advances timed transitions. Returns `true` while another frame is
    /// needed.
    pub(crate) fn tick(&mut self, now: Instant, style: &TabStripStyle) -> bool {
        if let IndicatorMotion::Animating { target, .. } = self.indicator.motion {
            match self.indicator.animator.tick(now) {
                Some(AnimationFrame::Running(fraction)) => {
                    trace!("Indicator fraction {fraction}");
                    self.refresh_indicator(style);
                }
                Some(AnimationFrame::Finished) => {
                    if self.index_of(target).is_some() {
                        self.indicator.anchor = Some(target);
                        self.indicator.offset = 0.0;
                        self.indicator.motion = IndicatorMotion::Idle;
                        self.refresh_indicator(style);
                    } else {
                        self.abort_indicator_animation(style);
                    }
                }
                None => {}
            }
        }
        let scrolling = self.tick_scroll(now, style);
        self.is_indicator_animating() || scrolling
    }
}
