use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::filter::CategoryFilter;
use crate::ui::theme::Theme;

/// Sidebar listing every category option, shown on wide terminals.
pub struct CategoryList<'a> {
    pub categories: &'a [CategoryFilter],
    pub selected: &'a CategoryFilter,
    pub title: &'a str,
    pub all_label: &'a str,
    pub theme: &'a Theme,
}

impl Widget for CategoryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .categories
            .iter()
            .map(|category| {
                let is_selected = category == self.selected;
                let marker = if is_selected { "> " } else { "  " };
                let style = if is_selected {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(Span::styled(
                    format!("{marker}{}", category.label(self.all_label)),
                    style,
                ))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
