use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::catalog::GlossaryEntry;
use crate::engine::quiz::{OptionStatus, Question, QuizPhase, QuizSession};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Renders whichever quiz phase the session is in.
pub struct QuizCard<'a> {
    pub session: &'a QuizSession,
    pub theme: &'a Theme,
}

impl<'a> QuizCard<'a> {
    pub fn new(session: &'a QuizSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    fn render_message(&self, title: &str, lines: Vec<Line<'_>>, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_start(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let hint = t!("quiz.start_hint", count = self.session.question_count()).to_string();
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("quiz.start").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().fg(colors.text_muted()))),
        ];
        self.render_message(&t!("quiz.title"), lines, area, buf);
    }

    fn render_not_enough(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("quiz.not_enough_text").to_string(),
                Style::default().fg(colors.text_muted()),
            )),
        ];
        self.render_message(&t!("quiz.not_enough_title"), lines, area, buf);
    }

    fn render_result(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let Some(summary) = self.session.summary() else {
            return;
        };
        let score_color = if summary.percent() >= 80.0 {
            colors.correct()
        } else if summary.percent() >= 50.0 {
            colors.tip()
        } else {
            colors.wrong()
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{}/{}", summary.score, summary.total),
                Style::default().fg(score_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{:.0}%", summary.percent()),
                Style::default().fg(colors.text_muted()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                t!("quiz.result_text", score = summary.score, total = summary.total).to_string(),
                Style::default().fg(colors.fg()),
            )),
        ];
        self.render_message(&t!("quiz.result_title"), lines, area, buf);
    }

    /// Definition line plus the tip line, labelled in the active locale.
    fn reveal_paragraph(&self, correct: &GlossaryEntry) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{}: ", correct.term),
                Style::default().fg(colors.tip()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(correct.definition.clone(), Style::default().fg(colors.fg())),
        ])];
        if let Some(tip) = correct.tip.as_deref() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", t!("glossary.tip")),
                    Style::default().fg(colors.tip()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(tip.to_string(), Style::default().fg(colors.tip())),
            ]));
        }
        Paragraph::new(lines).wrap(Wrap { trim: true })
    }

    fn render_question(&self, question: &Question, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let session = self.session;

        let block = Block::bordered()
            .title(format!(" {} ", t!("quiz.title")))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        // Both boxes have a one-cell border on each side
        let text_width = inner.width.saturating_sub(2);
        let prompt = Paragraph::new(question.prompt())
            .style(Style::default().fg(colors.fg()))
            .wrap(Wrap { trim: true });
        let prompt_rows = box_rows(prompt.line_count(text_width));
        let reveal = session
            .is_revealed()
            .then(|| self.reveal_paragraph(question.correct_entry()));
        let reveal_rows = reveal
            .as_ref()
            .map_or(0, |p| box_rows(p.line_count(text_width)));

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(prompt_rows),
                Constraint::Length(question.options().len() as u16 * 2),
                Constraint::Min(reveal_rows),
            ])
            .split(inner);

        let status = Line::from(vec![
            Span::styled(
                t!(
                    "quiz.progress",
                    current = session.current_index() + 1,
                    total = session.total()
                )
                .to_string(),
                Style::default().fg(colors.text_muted()),
            ),
            Span::raw("   "),
            Span::styled(
                format!("{}: ", t!("quiz.score_label")),
                Style::default().fg(colors.text_muted()),
            ),
            Span::styled(
                session.score().to_string(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(status).render(layout[0], buf);

        ProgressBar::new(session.current_index(), session.total(), self.theme).render(layout[1], buf);

        let prompt_block = Block::bordered()
            .title(format!(" {} ", t!("quiz.prompt_title")))
            .border_style(Style::default().fg(colors.border()));
        let prompt_inner = prompt_block.inner(layout[3]);
        prompt_block.render(layout[3], buf);
        prompt.render(prompt_inner, buf);

        let correct_badge = t!("quiz.correct_badge").to_string();
        let wrong_badge = t!("quiz.wrong_badge").to_string();
        let mut option_lines: Vec<Line> = Vec::new();
        for (i, option) in question.options().iter().enumerate() {
            let status = session.option_status(&option.term);
            let (marker, term_style, badge) = match status {
                OptionStatus::Pending => (
                    Span::styled("•", Style::default().fg(colors.text_muted())),
                    Style::default().fg(colors.fg()),
                    None,
                ),
                OptionStatus::Correct => (
                    Span::styled("✓", Style::default().fg(colors.correct())),
                    Style::default()
                        .fg(colors.correct())
                        .add_modifier(Modifier::BOLD),
                    Some(Span::styled(
                        format!("  {correct_badge}"),
                        Style::default().fg(colors.correct()),
                    )),
                ),
                OptionStatus::WrongSelected => (
                    Span::styled("✕", Style::default().fg(colors.wrong())),
                    Style::default().fg(colors.wrong()).add_modifier(Modifier::BOLD),
                    Some(Span::styled(
                        format!("  {wrong_badge}"),
                        Style::default().fg(colors.wrong()),
                    )),
                ),
                OptionStatus::Neutral => (
                    Span::styled("•", Style::default().fg(colors.text_muted())),
                    Style::default().fg(colors.text_muted()),
                    None,
                ),
            };
            let mut spans = vec![
                Span::styled(format!(" [{}] ", i + 1), Style::default().fg(colors.accent())),
                marker,
                Span::raw(" "),
                Span::styled(option.term.as_str(), term_style),
            ];
            spans.push(badge.unwrap_or_else(|| {
                Span::styled(
                    format!("  {}", option.category),
                    Style::default().fg(colors.text_muted()),
                )
            }));
            option_lines.push(Line::from(spans));
            option_lines.push(Line::from(""));
        }
        Paragraph::new(option_lines).render(layout[4], buf);

        if let Some(reveal) = reveal {
            let reveal_block = Block::bordered()
                .title(format!(" {} ", t!("quiz.reveal")))
                .border_style(Style::default().fg(colors.tip()));
            let reveal_inner = reveal_block.inner(layout[5]);
            reveal_block.render(layout[5], buf);
            reveal.render(reveal_inner, buf);
        }
    }
}

/// Rendered text rows plus the two border rows and one spare row.
fn box_rows(text_rows: usize) -> u16 {
    u16::try_from(text_rows).unwrap_or(u16::MAX).saturating_add(3)
}

impl Widget for QuizCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.session.phase() {
            QuizPhase::NotStarted => self.render_start(area, buf),
            QuizPhase::NotEnoughEntries => self.render_not_enough(area, buf),
            QuizPhase::Finished => self.render_result(area, buf),
            QuizPhase::InProgress => {
                if let Some(question) = self.session.current_question() {
                    self.render_question(question, area, buf);
                }
            }
        }
    }
}
