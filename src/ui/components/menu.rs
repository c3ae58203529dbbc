use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Glossary,
    Quiz,
    Settings,
}

pub struct MenuItem {
    pub key: &'static str,
    pub label: String,
    pub description: String,
    pub action: MenuAction,
}

/// Menu labels come from the active locale, so items are rebuilt per render.
pub fn menu_items() -> Vec<MenuItem> {
    vec![
        MenuItem {
            key: "1",
            label: t!("menu.glossary").to_string(),
            description: t!("menu.glossary_desc").to_string(),
            action: MenuAction::Glossary,
        },
        MenuItem {
            key: "2",
            label: t!("menu.quiz").to_string(),
            description: t!("menu.quiz_desc").to_string(),
            action: MenuAction::Quiz,
        },
        MenuItem {
            key: "c",
            label: t!("menu.settings").to_string(),
            description: t!("menu.settings_desc").to_string(),
            action: MenuAction::Settings,
        },
    ]
}

const ITEM_COUNT: usize = 3;

#[derive(Clone, Debug, Default)]
pub struct Menu {
    pub selected: usize,
}

impl Menu {
    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % ITEM_COUNT;
    }

    pub fn prev(&mut self) {
        self.selected = (self.selected + ITEM_COUNT - 1) % ITEM_COUNT;
    }

    pub fn selected_action(&self) -> MenuAction {
        match self.selected {
            0 => MenuAction::Glossary,
            1 => MenuAction::Quiz,
            _ => MenuAction::Settings,
        }
    }
}

pub struct MenuView<'a> {
    pub menu: &'a Menu,
    pub theme: &'a Theme,
}

impl<'a> MenuView<'a> {
    pub fn new(menu: &'a Menu, theme: &'a Theme) -> Self {
        Self { menu, theme }
    }
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("app.title").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("app.subtitle").to_string(),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let items = menu_items();
        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(items.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
            .split(layout[2]);

        for (i, item) in items.iter().enumerate() {
            let is_selected = i == self.menu.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", item.key, item.label);
            let desc_text = format!("     {}", item.description);

            let label_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            let lines = vec![
                Line::from(Span::styled(label_text, label_style)),
                Line::from(Span::styled(desc_text, Style::default().fg(colors.text_muted()))),
            ];
            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}
