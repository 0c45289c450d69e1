use slotmap::SlotMap;

use crate::{
    color::Color,
    dp::Dp,
    px::{Px, PxRect},
    style::{DividerGravity, TabStripStyle},
    tab::{Tab, TabKey},
};

use super::TabStrip;

/// One primitive of the strip's draw list, in strip coordinates with the
/// row scroll already applied. Hosts paint commands in order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Strip background.
    Background {
        /// Whole strip.
        bounds: PxRect,
        /// Fill color.
        color: Color,
    },
    /// Per-tab background.
    TabBackground {
        /// Tab position.
        position: usize,
        /// Tab frame.
        bounds: PxRect,
        /// Fill color.
        color: Color,
    },
    /// Selection indicator, or one half of a cross-fade.
    Indicator {
        /// Indicator rectangle.
        bounds: PxRect,
        /// Fill color, alpha already applied.
        color: Color,
    },
    /// Divider between two tabs.
    Divider {
        /// Divider rectangle.
        bounds: PxRect,
        /// Fill color.
        color: Color,
    },
    /// Tab icon.
    Icon {
        /// Tab position.
        position: usize,
        /// Host-resolved icon name.
        name: String,
        /// Icon rectangle.
        bounds: PxRect,
        /// Tint matching the label color.
        tint: Color,
    },
    /// Tab label.
    Label {
        /// Tab position.
        position: usize,
        /// Label text.
        text: String,
        /// Label rectangle.
        bounds: PxRect,
        /// Text size.
        size: Dp,
        /// Lines the label wraps onto.
        lines: usize,
        /// Bold weight.
        bold: bool,
        /// Text color.
        color: Color,
    },
    /// Host-drawn custom content.
    Custom {
        /// Tab position.
        position: usize,
        /// Host-resolved content name.
        name: String,
        /// Content rectangle.
        bounds: PxRect,
    },
}

impl TabStrip {
    /// Builds the draw list for the current layout: background, tab
    /// backgrounds, indicator, dividers, then tab content.
    pub(crate) fn draw(&self, tabs: &SlotMap<TabKey, Tab>, style: &TabStripStyle) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(2 + self.views.len() * 3);
        let scroll = -self.scroll.offset;
        let visible = |rect: PxRect| rect.translate_x(scroll);

        commands.push(DrawCommand::Background {
            bounds: PxRect::new(Px::ZERO, Px::ZERO, self.container_width, self.height),
            color: style.background_color,
        });
        if !self.laid_out {
            return commands;
        }

        for (position, view) in self.views.iter().enumerate() {
            let color = if view.is_selected() {
                style.selected_tab_background_color.or(style.tab_background_color)
            } else {
                style.tab_background_color
            };
            if let Some(color) = color {
                commands.push(DrawCommand::TabBackground {
                    position,
                    bounds: visible(view.frame()),
                    color,
                });
            }
        }

        if let Some(frame) = self.indicator_frame() {
            if let Some(trailing) = frame.trailing.filter(|trailing| trailing.alpha > 0.0) {
                commands.push(DrawCommand::Indicator {
                    bounds: visible(trailing.bounds),
                    color: style.indicator_color.multiply_alpha(trailing.alpha),
                });
            }
            if frame.alpha > 0.0 {
                commands.push(DrawCommand::Indicator {
                    bounds: visible(frame.bounds),
                    color: style.indicator_color.multiply_alpha(frame.alpha),
                });
            }
        }

        if let Some(divider) = style.divider {
            let width = divider.width.to_px();
            let height = divider.height.to_px().min(self.height);
            let top = match divider.gravity {
                DividerGravity::Top => Px::ZERO,
                DividerGravity::Center => (self.height - height) / 2,
                DividerGravity::Bottom => self.height - height,
            };
            for view in self.views.iter().take(self.views.len().saturating_sub(1)) {
                commands.push(DrawCommand::Divider {
                    bounds: visible(PxRect::new(view.frame().right(), top, width, height)),
                    color: divider.color,
                });
            }
        }

        for (position, view) in self.views.iter().enumerate() {
            let Some(tab) = tabs.get(view.tab_key()) else {
                continue;
            };
            let color = if view.is_selected() {
                style.selected_text_color
            } else {
                style.text_color
            };
            if let (Some(content), Some(bounds)) = (tab.custom_content(), view.custom_bounds()) {
                commands.push(DrawCommand::Custom {
                    position,
                    name: content.name.clone(),
                    bounds: visible(bounds),
                });
                continue;
            }
            if let (Some(icon), Some(bounds)) = (tab.icon(), view.icon_bounds()) {
                commands.push(DrawCommand::Icon {
                    position,
                    name: icon.name.clone(),
                    bounds: visible(bounds),
                    tint: color,
                });
            }
            if let (Some(text), Some(bounds)) = (tab.text(), view.label_bounds()) {
                commands.push(DrawCommand::Label {
                    position,
                    text: text.to_owned(),
                    bounds: visible(bounds),
                    size: view.label_text_size(),
                    lines: view.label_lines(),
                    bold: view.label_style().bold,
                    color,
                });
            }
        }
        commands
    }
}
