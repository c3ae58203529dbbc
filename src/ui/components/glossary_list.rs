use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::GlossaryEntry;
use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;

/// Localized strings the list needs.
pub struct GlossaryLabels<'a> {
    pub tip: &'a str,
    pub no_results_title: &'a str,
    pub no_results_text: &'a str,
}

/// Entry cards starting at `scroll` (an entry index, not a line offset).
pub struct GlossaryList<'a> {
    pub entries: &'a [&'a GlossaryEntry],
    pub scroll: usize,
    pub labels: GlossaryLabels<'a>,
    pub theme: &'a Theme,
}

/// Rows a card occupies at `width`, including the blank separator.
pub fn card_height(entry: &GlossaryEntry, width: usize, tip_label: &str) -> usize {
    let header = wrapped_line_count(&format!("{}  [{}]", entry.term, entry.category), width);
    let body = wrapped_line_count(&entry.definition, width);
    let tip = entry
        .tip
        .as_deref()
        .map_or(0, |t| wrapped_line_count(&format!("{tip_label}: {t}"), width));
    header + body + tip + 1
}

impl Widget for GlossaryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            let lines = vec![
                Line::from(Span::styled(
                    self.labels.no_results_title,
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    self.labels.no_results_text,
                    Style::default().fg(colors.text_muted()),
                )),
            ];
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        let width = inner.width as usize;
        let mut lines: Vec<Line> = Vec::new();
        let mut used = 0usize;
        for entry in self.entries.iter().skip(self.scroll) {
            if used >= inner.height as usize {
                break;
            }
            used += card_height(entry, width, self.labels.tip);

            lines.push(Line::from(vec![
                Span::styled(
                    entry.term.as_str(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{}]", entry.category),
                    Style::default().fg(colors.text_muted()),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                entry.definition.as_str(),
                Style::default().fg(colors.fg()),
            )));
            if let Some(tip) = entry.tip.as_deref() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{}: ", self.labels.tip),
                        Style::default().fg(colors.tip()).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(tip, Style::default().fg(colors.tip())),
                ]));
            }
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
