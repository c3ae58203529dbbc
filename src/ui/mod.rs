pub mod components;
pub mod layout;
pub mod line_input;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::app::{App, AppScreen, SettingsField};
use crate::engine::quiz::QuizPhase;
use components::category_list::CategoryList;
use components::glossary_list::{GlossaryLabels, GlossaryList};
use components::menu::MenuView;
use components::quiz_card::QuizCard;
use components::search_bar::SearchBar;
use layout::{AppLayout, pack_hint_lines, split_hints};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Glossary => render_glossary(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn screen_layout(area: Rect, footer: &str) -> (AppLayout, Vec<String>) {
    let hints = split_hints(footer);
    let lines = pack_hint_lines(&hints, area.width as usize);
    let layout = AppLayout::new(area, lines.len() as u16);
    (layout, lines)
}

fn render_header(frame: &mut Frame, app: &App, area: Rect, screen_title: &str) {
    let colors = &app.theme.colors;
    let mut spans = vec![
        Span::styled(
            format!(" {} ", t!("app.title")),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {screen_title} | {} ", app.config.locale.native_name()),
            Style::default().fg(colors.text_muted()).bg(colors.header_bg()),
        ),
    ];
    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {message}"),
            Style::default().fg(colors.wrong()).bg(colors.header_bg()),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect, lines: Vec<String>) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_muted()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (layout, footer) = screen_layout(area, &t!("menu.footer"));

    render_header(frame, app, layout.header, &t!("app.subtitle"));

    let content = match layout.sidebar {
        Some(sidebar) => layout.main.union(sidebar),
        None => layout.main,
    };
    let menu_area = layout::centered_rect(50, 80, content);
    frame.render_widget(MenuView::new(&app.menu, app.theme), menu_area);

    render_footer(frame, app, layout.footer, footer);
}

fn render_glossary(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (layout, footer) = screen_layout(area, &t!("glossary.footer"));

    render_header(frame, app, layout.header, &t!("glossary.title"));

    let visible = app.visible_entries();
    let all_label = t!("glossary.all").to_string();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(layout.main);

    let placeholder = t!("glossary.search").to_string();
    let title = format!(
        "{}: {}",
        t!("glossary.filter"),
        app.filter.category().label(&all_label)
    );
    frame.render_widget(
        SearchBar {
            input: &app.search,
            placeholder: &placeholder,
            title,
            visible: visible.len(),
            total: app.catalog.len(),
            theme: app.theme,
        },
        rows[0],
    );

    let tip = t!("glossary.tip").to_string();
    let no_results_title = t!("glossary.no_results_title").to_string();
    let no_results_text = t!("glossary.no_results_text").to_string();
    frame.render_widget(
        GlossaryList {
            entries: &visible,
            scroll: app.glossary_scroll,
            labels: GlossaryLabels {
                tip: &tip,
                no_results_title: &no_results_title,
                no_results_text: &no_results_text,
            },
            theme: app.theme,
        },
        rows[1],
    );

    if let Some(sidebar) = layout.sidebar {
        let title = t!("glossary.filter").to_string();
        frame.render_widget(
            CategoryList {
                categories: &app.categories,
                selected: app.filter.category(),
                title: &title,
                all_label: &all_label,
                theme: app.theme,
            },
            sidebar,
        );
    }

    render_footer(frame, app, layout.footer, footer);
}

fn quiz_footer(app: &App) -> String {
    let footer = match app.quiz.phase() {
        QuizPhase::NotStarted => t!("quiz.footer_start"),
        QuizPhase::NotEnoughEntries => t!("quiz.footer_unplayable"),
        QuizPhase::Finished => t!("quiz.footer_result"),
        QuizPhase::InProgress if app.quiz.is_answered() => t!("quiz.footer_answered"),
        QuizPhase::InProgress => t!("quiz.footer_question"),
    };
    footer.to_string()
}

fn render_quiz(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (layout, footer) = screen_layout(area, &quiz_footer(app));

    render_header(frame, app, layout.header, &t!("quiz.title"));

    let content = match layout.sidebar {
        Some(sidebar) => layout.main.union(sidebar),
        None => layout.main,
    };
    let card_area = match app.quiz.phase() {
        QuizPhase::InProgress => content,
        _ => layout::centered_rect(60, 50, content),
    };
    frame.render_widget(QuizCard::new(&app.quiz, app.theme), card_area);

    render_footer(frame, app, layout.footer, footer);
}

fn render_settings(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let (layout, footer) = screen_layout(area, &t!("settings.footer"));

    render_header(frame, app, layout.header, &t!("settings.title"));

    let content = match layout.sidebar {
        Some(sidebar) => layout.main.union(sidebar),
        None => layout.main,
    };
    let centered = layout::centered_rect(60, 80, content);

    let block = Block::bordered()
        .title(format!(" {} ", t!("settings.title")))
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = SettingsField::ALL
        .iter()
        .map(|field| match field {
            SettingsField::Locale => (
                t!("settings.locale").to_string(),
                app.config.locale.native_name().to_string(),
            ),
            SettingsField::QuestionCount => (
                t!("settings.question_count").to_string(),
                app.config.question_count.to_string(),
            ),
            SettingsField::Theme => (t!("settings.theme").to_string(), app.config.theme.clone()),
        })
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
        ])
        .split(inner);

    Paragraph::new(Line::from(Span::styled(
        format!("  {}", t!("settings.hint")),
        Style::default().fg(colors.text_muted()),
    )))
    .render(rows[0], frame.buffer_mut());

    let field_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(rows[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let value_style = Style::default().fg(if is_selected {
            colors.border_focused()
        } else {
            colors.text_muted()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("  < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_rows[i], frame.buffer_mut());
    }

    render_footer(frame, app, layout.footer, footer);
}
