//! Toolbar component
//!
//! Top bar with the app title, the discount filter options, and the
//! dialog trigger buttons. Remembers where it drew the filter options so
//! pointer hits can be resolved later.

use crate::model::filter::DiscountFilter;
use crate::overlay::Trigger;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "⌂ Lodge Admin";

/// Toolbar with filter segments and trigger buttons
#[derive(Default)]
pub struct Toolbar {
    filter_regions: Vec<(DiscountFilter, Rect)>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a pointer position to the filter option drawn there.
    pub fn filter_at(&self, position: Position) -> Option<DiscountFilter> {
        self.filter_regions
            .iter()
            .find(|(_, region)| region.contains(position))
            .map(|(filter, _)| *filter)
    }

    pub fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        triggers: &mut [Trigger],
        active_filter: DiscountFilter,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }
        let row = Rect::new(inner.x, inner.y, inner.width, 1);

        // Title on the far left.
        let title = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
        let title_width = (TITLE.width() as u16).min(row.width);
        frame.render_widget(title, Rect::new(row.x, row.y, title_width, 1));

        // Filter segments after the title.
        self.filter_regions.clear();
        let mut x = row.x + title_width + 3;
        for filter in DiscountFilter::all() {
            let label = format!(" {} ", filter.label());
            let width = label.width() as u16;
            if x + width > row.right() {
                break;
            }
            let style = if filter == active_filter {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let region = Rect::new(x, row.y, width, 1);
            frame.render_widget(Paragraph::new(Line::from(Span::styled(label, style))), region);
            self.filter_regions.push((filter, region));
            x += width + 1;
        }

        // Trigger buttons packed against the right edge.
        let mut right = row.right();
        for trigger in triggers.iter_mut().rev() {
            let width = trigger.desired_width();
            if right.saturating_sub(row.x) < width + 1 {
                break;
            }
            right -= width + 1;
            trigger.draw(frame, Rect::new(right, row.y, width, 1));
        }
    }
}
