use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// Search box with the current category in the title and a `visible/total`
/// chip on the right.
pub struct SearchBar<'a> {
    pub input: &'a LineInput,
    pub placeholder: &'a str,
    pub title: String,
    pub visible: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let chip = format!(" {}/{} ", self.visible, self.total);
        let chip_width = chip.chars().count() as u16;

        let cursor_style = Style::default().fg(colors.bg()).bg(colors.accent());
        let spans = if self.input.is_empty() {
            vec![
                Span::styled(" ", cursor_style),
                Span::styled(self.placeholder, Style::default().fg(colors.text_muted())),
            ]
        } else {
            let (before, cursor_ch, after) = self.input.render_parts();
            let cursor_text = cursor_ch.map_or(" ".to_string(), |c| c.to_string());
            vec![
                Span::styled(before, Style::default().fg(colors.fg())),
                Span::styled(cursor_text, cursor_style),
                Span::styled(after, Style::default().fg(colors.fg())),
            ]
        };
        let text_area = Rect::new(
            inner.x,
            inner.y,
            inner.width.saturating_sub(chip_width + 1),
            1,
        );
        Paragraph::new(Line::from(spans)).render(text_area, buf);

        if inner.width > chip_width {
            let chip_x = inner.x + inner.width - chip_width;
            buf.set_string(
                chip_x,
                inner.y,
                &chip,
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.accent_dim())
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}
