use std::path::{Path, PathBuf};

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::{Catalog, CatalogError, GlossaryEntry, Locale};
use crate::config::Config;
use crate::engine::filter::{CategoryFilter, FilterState, available_categories};
use crate::engine::quiz::QuizSession;
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Glossary,
    Quiz,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Locale,
    QuestionCount,
    Theme,
}

impl SettingsField {
    pub const ALL: [SettingsField; 3] = [
        SettingsField::Locale,
        SettingsField::QuestionCount,
        SettingsField::Theme,
    ];
}

/// Bundled catalog for `locale`, or the validated override file.
pub fn load_catalog(locale: Locale, catalog_override: Option<&Path>) -> Result<Catalog, CatalogError> {
    let catalog = match catalog_override {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::bundled(locale)?,
    };
    tracing::info!(
        %locale,
        entries = catalog.len(),
        custom = catalog_override.is_some(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu,
    pub catalog: Catalog,
    pub filter: FilterState,
    pub search: LineInput,
    pub categories: Vec<CategoryFilter>,
    pub glossary_scroll: usize,
    pub quiz: QuizSession,
    pub settings_selected: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
    catalog_override: Option<PathBuf>,
    rng: SmallRng,
}

impl App {
    /// `seed` makes every quiz draw reproducible; otherwise the generator is
    /// seeded from OS entropy.
    pub fn new(config: Config, catalog_override: Option<PathBuf>, seed: Option<u64>) -> Result<Self> {
        let catalog = load_catalog(config.locale, catalog_override.as_deref())?;
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut app = Self::with_catalog(config, catalog, rng);
        app.catalog_override = catalog_override;
        Ok(app)
    }

    pub fn with_catalog(config: Config, catalog: Catalog, rng: SmallRng) -> Self {
        rust_i18n::set_locale(config.locale.as_str());
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let categories = available_categories(&catalog);
        let quiz = QuizSession::new(config.question_count);

        Self {
            screen: AppScreen::Menu,
            config,
            theme,
            menu: Menu::default(),
            catalog,
            filter: FilterState::new(),
            search: LineInput::default(),
            categories,
            glossary_scroll: 0,
            quiz,
            settings_selected: 0,
            status_message: None,
            should_quit: false,
            catalog_override: None,
            rng,
        }
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_glossary(&mut self) {
        self.screen = AppScreen::Glossary;
    }

    /// An unplayable catalog is reported straight away instead of offering
    /// a start button.
    pub fn go_to_quiz(&mut self) {
        self.screen = AppScreen::Quiz;
        if !self.catalog.is_playable() {
            self.start_quiz();
        }
    }

    pub fn go_to_settings(&mut self) {
        self.screen = AppScreen::Settings;
        self.settings_selected = 0;
    }

    pub fn activate_menu(&mut self, action: MenuAction) {
        match action {
            MenuAction::Glossary => self.go_to_glossary(),
            MenuAction::Quiz => self.go_to_quiz(),
            MenuAction::Settings => self.go_to_settings(),
        }
    }

    // --- glossary ---

    pub fn visible_entries(&self) -> Vec<&GlossaryEntry> {
        self.filter.visible_entries(&self.catalog)
    }

    /// Push the search box text into the filter.
    pub fn apply_search(&mut self) {
        self.filter.set_query(self.search.value());
        self.glossary_scroll = 0;
    }

    pub fn cycle_category(&mut self, forward: bool) {
        if self.categories.is_empty() {
            return;
        }
        let len = self.categories.len();
        let current = self
            .categories
            .iter()
            .position(|c| c == self.filter.category())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.filter.set_category(self.categories[next].clone());
        self.glossary_scroll = 0;
    }

    pub fn reset_filter(&mut self) {
        self.filter.reset();
        self.search.clear();
        self.glossary_scroll = 0;
    }

    pub fn scroll_glossary(&mut self, down: bool) {
        if down {
            let max = self.visible_entries().len().saturating_sub(1);
            self.glossary_scroll = (self.glossary_scroll + 1).min(max);
        } else {
            self.glossary_scroll = self.glossary_scroll.saturating_sub(1);
        }
    }

    // --- quiz ---

    pub fn start_quiz(&mut self) {
        self.quiz = std::mem::take(&mut self.quiz).start(&self.catalog, &mut self.rng);
    }

    pub fn restart_quiz(&mut self) {
        self.quiz = std::mem::take(&mut self.quiz).restart(&self.catalog, &mut self.rng);
    }

    /// Answer with the option at `index` (0-based). Out-of-range is ignored.
    pub fn choose_option(&mut self, index: usize) {
        let Some(term) = self
            .quiz
            .current_question()
            .and_then(|q| q.options().get(index))
            .map(|o| o.term.clone())
        else {
            return;
        };
        self.quiz = std::mem::take(&mut self.quiz).choose(&term);
    }

    pub fn reveal_solution(&mut self) {
        self.quiz = std::mem::take(&mut self.quiz).reveal();
    }

    pub fn next_question(&mut self) {
        self.quiz = std::mem::take(&mut self.quiz).next();
    }

    // --- settings ---

    pub fn settings_field(&self) -> SettingsField {
        SettingsField::ALL[self.settings_selected.min(SettingsField::ALL.len() - 1)]
    }

    pub fn settings_move(&mut self, down: bool) {
        let last = SettingsField::ALL.len() - 1;
        self.settings_selected = if down {
            (self.settings_selected + 1).min(last)
        } else {
            self.settings_selected.saturating_sub(1)
        };
    }

    pub fn settings_cycle(&mut self, forward: bool) {
        match self.settings_field() {
            SettingsField::Locale => {
                let next = self.config.locale.next();
                self.set_locale(next);
            }
            SettingsField::QuestionCount => {
                self.config.step_question_count(forward);
                // The count is fixed per session, so a change means a new one
                self.quiz = QuizSession::new(self.config.question_count);
            }
            SettingsField::Theme => {
                let name = Theme::cycle_name(&self.config.theme, forward);
                if let Some(theme) = Theme::load(&name) {
                    self.theme = Box::leak(Box::new(theme));
                    self.config.theme = name;
                }
            }
        }
    }

    /// Switch UI language and, unless a custom catalog is in use, the
    /// glossary. Filter and quiz state belong to the old catalog and are
    /// discarded.
    pub fn set_locale(&mut self, locale: Locale) {
        if let Some(path) = &self.catalog_override {
            tracing::debug!(path = %path.display(), "custom catalog kept across locale switch");
        } else {
            match load_catalog(locale, None) {
                Ok(catalog) => self.replace_catalog(catalog),
                Err(e) => {
                    tracing::error!(%locale, "failed to load catalog: {e}");
                    self.status_message = Some(e.to_string());
                    return;
                }
            }
        }
        self.config.locale = locale;
        rust_i18n::set_locale(locale.as_str());
    }

    fn replace_catalog(&mut self, catalog: Catalog) {
        self.categories = available_categories(&catalog);
        self.catalog = catalog;
        self.reset_filter();
        self.quiz = QuizSession::new(self.config.question_count);
    }

    pub fn save_config(&mut self) {
        if let Err(e) = self.config.save() {
            tracing::warn!("failed to save config: {e}");
            self.status_message = Some(format!("config not saved: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::quiz::QuizPhase;

    fn small_catalog(n: usize) -> Catalog {
        Catalog::new(
            (0..n)
                .map(|i| {
                    let category = if i % 2 == 0 { "Even" } else { "Odd" };
                    GlossaryEntry::new(&format!("term{i}"), category, &format!("meaning {i}"))
                })
                .collect(),
        )
    }

    fn app_with(n: usize) -> App {
        let mut config = Config::default();
        config.question_count = 3;
        App::with_catalog(config, small_catalog(n), SmallRng::seed_from_u64(5))
    }

    #[test]
    fn test_quiz_flow_through_app() {
        let mut app = app_with(6);
        app.go_to_quiz();
        assert_eq!(app.quiz.phase(), QuizPhase::NotStarted);
        app.start_quiz();
        assert_eq!(app.quiz.phase(), QuizPhase::InProgress);

        for _ in 0..3 {
            let correct = app.quiz.current_question().unwrap().correct_entry().term.clone();
            let index = app
                .quiz
                .current_question()
                .unwrap()
                .options()
                .iter()
                .position(|o| o.term == correct)
                .unwrap();
            app.choose_option(index);
            app.reveal_solution();
            assert!(app.quiz.is_revealed());
            app.next_question();
        }
        assert_eq!(app.quiz.phase(), QuizPhase::Finished);
        assert_eq!(app.quiz.score(), 3);

        app.restart_quiz();
        assert_eq!(app.quiz.phase(), QuizPhase::InProgress);
        assert_eq!(app.quiz.score(), 0);
    }

    #[test]
    fn test_choose_out_of_range_ignored() {
        let mut app = app_with(6);
        app.start_quiz();
        app.choose_option(9);
        assert!(!app.quiz.is_answered());
    }

    #[test]
    fn test_unplayable_catalog_reported_on_entry() {
        let mut app = app_with(3);
        app.go_to_quiz();
        assert_eq!(app.quiz.phase(), QuizPhase::NotEnoughEntries);
    }

    #[test]
    fn test_category_cycle_and_reset() {
        let mut app = app_with(6);
        assert_eq!(app.categories.len(), 3);
        app.cycle_category(true);
        assert_eq!(app.filter.category(), &CategoryFilter::Only("Even".to_string()));
        assert_eq!(app.visible_entries().len(), 3);
        app.cycle_category(false);
        app.cycle_category(false);
        assert_eq!(app.filter.category(), &CategoryFilter::Only("Odd".to_string()));

        app.search = LineInput::new("term1");
        app.apply_search();
        assert_eq!(app.visible_entries().len(), 1);

        app.reset_filter();
        assert!(app.filter.is_default());
        assert!(app.search.is_empty());
        assert_eq!(app.visible_entries().len(), 6);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut app = app_with(4);
        for _ in 0..10 {
            app.scroll_glossary(true);
        }
        assert_eq!(app.glossary_scroll, 3);
        app.scroll_glossary(false);
        assert_eq!(app.glossary_scroll, 2);
        app.apply_search();
        assert_eq!(app.glossary_scroll, 0);
    }

    #[test]
    fn test_question_count_change_discards_session() {
        let mut app = app_with(6);
        app.start_quiz();
        app.settings_selected = 1;
        assert_eq!(app.settings_field(), SettingsField::QuestionCount);
        app.settings_cycle(true);
        assert_eq!(app.config.question_count, 5);
        assert_eq!(app.quiz.phase(), QuizPhase::NotStarted);
        assert_eq!(app.quiz.question_count(), 5);
    }

    #[test]
    fn test_locale_switch_reloads_bundled_catalog() {
        let mut app = app_with(6);
        app.search = LineInput::new("term");
        app.apply_search();
        app.set_locale(Locale::En);
        assert_eq!(app.config.locale, Locale::En);
        assert_eq!(
            app.catalog.len(),
            Catalog::bundled(Locale::En).unwrap().len()
        );
        assert!(app.filter.is_default());
        assert_eq!(app.quiz.phase(), QuizPhase::NotStarted);
    }

    #[test]
    fn test_settings_move_clamps() {
        let mut app = app_with(4);
        app.settings_move(false);
        assert_eq!(app.settings_selected, 0);
        for _ in 0..5 {
            app.settings_move(true);
        }
        assert_eq!(app.settings_field(), SettingsField::Theme);
    }
}
