use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use glossquiz::app::{App, AppScreen, load_catalog};
use glossquiz::catalog::Locale;
use glossquiz::config::Config;
use glossquiz::engine::quiz::QuizPhase;
use glossquiz::event::{AppEvent, EventHandler};
use glossquiz::ui::line_input::InputResult;
use glossquiz::{logging, ui};

#[derive(Parser)]
#[command(
    name = "glossquiz",
    version,
    about = "Terminal crypto glossary with a multiple-choice self-quiz"
)]
struct Cli {
    #[arg(short, long, value_enum, help = "Interface and glossary language")]
    locale: Option<Locale>,

    #[arg(short, long, help = "Number of questions per quiz")]
    questions: Option<usize>,

    #[arg(short, long, help = "JSON catalog to use instead of the bundled glossary")]
    catalog: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Seed for reproducible question order")]
    seed: Option<u64>,

    #[arg(long, help = "Validate the catalog, print a summary and exit")]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best effort: a read-only data dir must not block the app.
    let log_file = logging::init().ok();

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("ignoring unreadable config: {e}");
        Config::default()
    });
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(questions) = cli.questions {
        config.question_count = questions;
        config.normalize_question_count();
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    let catalog_override = cli
        .catalog
        .or_else(|| config.catalog_path.as_ref().map(PathBuf::from));

    if cli.check {
        return run_check(&config, catalog_override.as_deref());
    }

    let mut app = App::new(config, catalog_override, cli.seed)?;
    tracing::info!(log_file = ?log_file, "starting glossquiz");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("app loop failed: {err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_check(config: &Config, catalog_override: Option<&std::path::Path>) -> Result<()> {
    let catalog = load_catalog(config.locale, catalog_override).with_context(|| match catalog_override {
        Some(path) => format!("catalog {} is invalid", path.display()),
        None => format!("bundled {} catalog is invalid", config.locale),
    })?;

    println!("entries:    {}", catalog.len());
    println!("categories: {}", catalog.categories().join(", "));
    println!("playable:   {}", if catalog.is_playable() { "yes" } else { "no" });
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    app.status_message = None;

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Glossary => handle_glossary_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.go_to_glossary(),
        KeyCode::Char('2') => app.go_to_quiz(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            let action = app.menu.selected_action();
            app.activate_menu(action);
        }
        _ => {}
    }
}

fn handle_glossary_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Tab => app.cycle_category(true),
        KeyCode::BackTab => app.cycle_category(false),
        KeyCode::Char('r') if ctrl => app.reset_filter(),
        KeyCode::Up => app.scroll_glossary(false),
        KeyCode::Down => app.scroll_glossary(true),
        _ => {
            if app.search.handle(key) == InputResult::Changed {
                app.apply_search();
            }
        }
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.go_to_menu();
        return;
    }

    match app.quiz.phase() {
        QuizPhase::NotStarted => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                app.start_quiz();
            }
        }
        QuizPhase::InProgress => match key.code {
            KeyCode::Char(ch @ '1'..='4') => {
                let index = ch as usize - '1' as usize;
                app.choose_option(index);
            }
            KeyCode::Char('s') => app.reveal_solution(),
            KeyCode::Enter | KeyCode::Char('n') => app.next_question(),
            KeyCode::Char('r') => app.restart_quiz(),
            _ => {}
        },
        QuizPhase::Finished => {
            if matches!(key.code, KeyCode::Char('r') | KeyCode::Enter) {
                app.restart_quiz();
            }
        }
        QuizPhase::NotEnoughEntries => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.save_config();
            app.go_to_menu();
        }
        KeyCode::Up | KeyCode::Char('k') => app.settings_move(false),
        KeyCode::Down | KeyCode::Char('j') => app.settings_move(true),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle(true),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle(false),
        _ => {}
    }
}
