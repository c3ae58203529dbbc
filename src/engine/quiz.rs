//! Multiple-choice quiz over a glossary catalog.
//!
//! A [`QuizSession`] is a plain value. Every transition consumes the session
//! and returns the next one, so the UI layer only has to swap its copy:
//!
//! ```ignore
//! let session = QuizSession::new(20).start(&catalog, &mut rng);
//! let session = session.choose("Seed Phrase").reveal().next();
//! ```
//!
//! Transitions that are not allowed in the current phase return the session
//! unchanged.

use rand::Rng;

use crate::catalog::{Catalog, GlossaryEntry};
use crate::engine::sampling::{sample_unique, shuffled};

pub const DEFAULT_QUESTION_COUNT: usize = 20;
pub const OPTIONS_PER_QUESTION: usize = 4;
/// Smallest catalog that can fill every option slot with a distinct term.
pub const MIN_CATALOG_SIZE: usize = OPTIONS_PER_QUESTION;

const DISTRACTORS_PER_QUESTION: usize = OPTIONS_PER_QUESTION - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Finished,
    /// The catalog had fewer than [`MIN_CATALOG_SIZE`] entries at start.
    NotEnoughEntries,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    correct: GlossaryEntry,
    options: Vec<GlossaryEntry>,
}

impl Question {
    fn build<R: Rng + ?Sized>(correct: &GlossaryEntry, catalog: &[GlossaryEntry], rng: &mut R) -> Self {
        let pool: Vec<&GlossaryEntry> = catalog.iter().filter(|e| e.term != correct.term).collect();
        let distractors = sample_unique(&pool, DISTRACTORS_PER_QUESTION, rng);

        let mut options: Vec<&GlossaryEntry> = Vec::with_capacity(OPTIONS_PER_QUESTION);
        options.push(correct);
        options.extend(distractors);

        Self {
            prompt: correct.definition.clone(),
            correct: correct.clone(),
            options: shuffled(&options, rng).into_iter().cloned().collect(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn correct_entry(&self) -> &GlossaryEntry {
        &self.correct
    }

    pub fn options(&self) -> &[GlossaryEntry] {
        &self.options
    }

    /// Exact, case-sensitive comparison against the correct term.
    pub fn is_correct(&self, term: &str) -> bool {
        self.correct.term == term
    }
}

/// Builds `min(count, catalog.len())` questions with distinct correct terms.
/// Callers are expected to check [`MIN_CATALOG_SIZE`] first; smaller catalogs
/// produce questions with fewer than four options.
pub fn generate_questions<R: Rng + ?Sized>(
    catalog: &[GlossaryEntry],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let refs: Vec<&GlossaryEntry> = catalog.iter().collect();
    sample_unique(&refs, count, rng)
        .into_iter()
        .map(|correct| Question::build(correct, catalog, rng))
        .collect()
}

/// How an option should be shown for the current question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionStatus {
    /// Not answered yet.
    Pending,
    /// The right answer, shown once the question is answered.
    Correct,
    /// The wrong option the user picked.
    WrongSelected,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
}

impl QuizSummary {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64 * 100.0
    }
}

#[derive(Clone, Debug)]
pub struct QuizSession {
    question_count: usize,
    started: bool,
    not_enough_entries: bool,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    selected_term: Option<String>,
    answered: bool,
    revealed: bool,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_COUNT)
    }
}

impl QuizSession {
    /// `question_count` is fixed for the lifetime of the session value.
    pub fn new(question_count: usize) -> Self {
        Self {
            question_count,
            started: false,
            not_enough_entries: false,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            selected_term: None,
            answered: false,
            revealed: false,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        if self.not_enough_entries {
            QuizPhase::NotEnoughEntries
        } else if !self.started {
            QuizPhase::NotStarted
        } else if self.current_index >= self.questions.len() {
            QuizPhase::Finished
        } else {
            QuizPhase::InProgress
        }
    }

    /// Begins the first play-through. Only acts from `NotStarted`, or from
    /// `NotEnoughEntries` to re-check a catalog that may have grown.
    pub fn start<R: Rng + ?Sized>(self, catalog: &Catalog, rng: &mut R) -> Self {
        match self.phase() {
            QuizPhase::NotStarted | QuizPhase::NotEnoughEntries => self.restart(catalog, rng),
            QuizPhase::InProgress | QuizPhase::Finished => self,
        }
    }

    /// Discards any progress and draws a fresh question set. Always allowed.
    pub fn restart<R: Rng + ?Sized>(self, catalog: &Catalog, rng: &mut R) -> Self {
        let mut next = Self::new(self.question_count);
        next.started = true;

        if !catalog.is_playable() {
            tracing::warn!(
                entries = catalog.len(),
                required = MIN_CATALOG_SIZE,
                "catalog too small for a quiz"
            );
            next.not_enough_entries = true;
            return next;
        }

        next.questions = generate_questions(catalog.entries(), self.question_count, rng);
        tracing::info!(questions = next.questions.len(), "quiz session started");
        next
    }

    /// Records the answer for the current question. Ignored once answered.
    pub fn choose(mut self, term: &str) -> Self {
        if self.answered {
            return self;
        }
        let Some(question) = self.current_question() else {
            return self;
        };
        let correct = question.is_correct(term);
        if correct {
            self.score += 1;
        }
        tracing::debug!(index = self.current_index, correct, "answer recorded");
        self.selected_term = Some(term.to_string());
        self.answered = true;
        self
    }

    /// Shows the explanation. Ignored before answering.
    pub fn reveal(mut self) -> Self {
        if self.answered && self.phase() == QuizPhase::InProgress {
            self.revealed = true;
        }
        self
    }

    /// Moves past an answered question.
    pub fn next(mut self) -> Self {
        if !self.answered || self.phase() != QuizPhase::InProgress {
            return self;
        }
        self.current_index += 1;
        self.selected_term = None;
        self.answered = false;
        self.revealed = false;
        if self.phase() == QuizPhase::Finished {
            tracing::info!(score = self.score, total = self.questions.len(), "quiz finished");
        }
        self
    }

    pub fn current_question(&self) -> Option<&Question> {
        if !self.started || self.not_enough_entries {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Configured questions per session.
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// Number of questions actually generated for this play-through.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selected_term(&self) -> Option<&str> {
        self.selected_term.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Fraction of questions completed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.current_index as f64 / self.questions.len() as f64).min(1.0)
    }

    pub fn option_status(&self, term: &str) -> OptionStatus {
        let Some(question) = self.current_question() else {
            return OptionStatus::Pending;
        };
        if !self.answered {
            OptionStatus::Pending
        } else if question.is_correct(term) {
            OptionStatus::Correct
        } else if self.selected_term.as_deref() == Some(term) {
            OptionStatus::WrongSelected
        } else {
            OptionStatus::Neutral
        }
    }

    /// Final result, only once every question has been answered.
    pub fn summary(&self) -> Option<QuizSummary> {
        (self.phase() == QuizPhase::Finished).then_some(QuizSummary {
            score: self.score,
            total: self.questions.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn catalog(terms: &[&str]) -> Catalog {
        Catalog::new(
            terms
                .iter()
                .map(|t| GlossaryEntry::new(t, "cat", &format!("definition of {t}")))
                .collect(),
        )
    }

    fn started(terms: &[&str], count: usize, seed: u64) -> QuizSession {
        let mut rng = SmallRng::seed_from_u64(seed);
        QuizSession::new(count).start(&catalog(terms), &mut rng)
    }

    fn wrong_option(session: &QuizSession) -> String {
        let q = session.current_question().unwrap();
        q.options()
            .iter()
            .find(|o| o.term != q.correct_entry().term)
            .unwrap()
            .term
            .clone()
    }

    #[test]
    fn test_new_session_not_started() {
        let session = QuizSession::default();
        assert_eq!(session.phase(), QuizPhase::NotStarted);
        assert_eq!(session.question_count(), DEFAULT_QUESTION_COUNT);
        assert!(session.current_question().is_none());
        assert!(session.summary().is_none());
    }

    #[test]
    fn test_five_entry_scenario() {
        let mut session = started(&["A", "B", "C", "D", "E"], 20, 1);
        assert_eq!(session.phase(), QuizPhase::InProgress);
        assert_eq!(session.total(), 5);

        for i in 0..5 {
            assert_eq!(session.current_index(), i);
            assert_eq!(session.phase(), QuizPhase::InProgress);
            let term = session.current_question().unwrap().correct_entry().term.clone();
            session = session.choose(&term).next();
        }

        assert_eq!(session.current_index(), 5);
        assert_eq!(session.phase(), QuizPhase::Finished);
        assert_eq!(session.summary(), Some(QuizSummary { score: 5, total: 5 }));
    }

    #[test]
    fn test_question_shape() {
        let session = started(&["A", "B", "C", "D", "E", "F"], 20, 9);
        let mut correct_terms = HashSet::new();
        for q in session.questions() {
            assert_eq!(q.options().len(), OPTIONS_PER_QUESTION);
            let terms: HashSet<&str> = q.options().iter().map(|o| o.term.as_str()).collect();
            assert_eq!(terms.len(), OPTIONS_PER_QUESTION);
            assert!(terms.contains(q.correct_entry().term.as_str()));
            assert_eq!(q.prompt(), q.correct_entry().definition);
            assert!(correct_terms.insert(q.correct_entry().term.clone()));
        }
    }

    #[test]
    fn test_question_count_caps_draw() {
        let session = started(&["A", "B", "C", "D", "E", "F", "G"], 3, 5);
        assert_eq!(session.total(), 3);
    }

    #[test]
    fn test_too_small_catalog_is_unplayable() {
        let session = started(&["A", "B", "C"], 20, 0);
        assert_eq!(session.phase(), QuizPhase::NotEnoughEntries);
        assert!(session.current_question().is_none());

        let mut rng = SmallRng::seed_from_u64(0);
        let session = session.restart(&catalog(&["A", "B", "C"]), &mut rng);
        assert_eq!(session.phase(), QuizPhase::NotEnoughEntries);
        let session = session.choose("A").next();
        assert_eq!(session.phase(), QuizPhase::NotEnoughEntries);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_start_rechecks_after_not_enough_entries() {
        let mut rng = SmallRng::seed_from_u64(3);
        let session = QuizSession::new(20).start(&catalog(&["A", "B"]), &mut rng);
        assert_eq!(session.phase(), QuizPhase::NotEnoughEntries);
        let session = session.start(&catalog(&["A", "B", "C", "D"]), &mut rng);
        assert_eq!(session.phase(), QuizPhase::InProgress);
    }

    #[test]
    fn test_start_ignored_while_in_progress() {
        let mut rng = SmallRng::seed_from_u64(4);
        let cat = catalog(&["A", "B", "C", "D", "E"]);
        let session = QuizSession::new(5).start(&cat, &mut rng);
        let term = session.current_question().unwrap().correct_entry().term.clone();
        let session = session.choose(&term).next();
        let before = session.questions().to_vec();
        let session = session.start(&cat, &mut rng);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.score(), 1);
        assert_eq!(session.questions(), before.as_slice());
    }

    #[test]
    fn test_choose_twice_is_noop() {
        let session = started(&["A", "B", "C", "D"], 4, 2);
        let correct = session.current_question().unwrap().correct_entry().term.clone();
        let wrong = wrong_option(&session);

        let session = session.choose(&correct);
        assert_eq!(session.score(), 1);
        let session = session.choose(&wrong);
        assert_eq!(session.score(), 1);
        assert_eq!(session.selected_term(), Some(correct.as_str()));

        let session = started(&["A", "B", "C", "D"], 4, 2);
        let wrong = wrong_option(&session);
        let session = session.choose(&wrong).choose(&correct);
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_term(), Some(wrong.as_str()));
    }

    #[test]
    fn test_scoring_is_case_sensitive() {
        let session = started(&["alpha", "beta", "gamma", "delta"], 4, 11);
        let correct = session.current_question().unwrap().correct_entry().term.clone();
        let session = session.choose(&correct.to_uppercase());
        assert!(session.is_answered());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_all_wrong_scores_zero() {
        let mut session = started(&["A", "B", "C", "D", "E", "F"], 20, 21);
        while session.phase() == QuizPhase::InProgress {
            let wrong = wrong_option(&session);
            session = session.choose(&wrong).next();
        }
        assert_eq!(session.summary(), Some(QuizSummary { score: 0, total: 6 }));
    }

    #[test]
    fn test_next_requires_answer() {
        let session = started(&["A", "B", "C", "D"], 4, 8);
        let session = session.next();
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_reveal_requires_answer() {
        let session = started(&["A", "B", "C", "D"], 4, 8);
        let session = session.reveal();
        assert!(!session.is_revealed());

        let term = wrong_option(&session);
        let session = session.choose(&term).reveal();
        assert!(session.is_revealed());
        let session = session.reveal();
        assert!(session.is_revealed());

        let session = session.next();
        assert!(!session.is_answered());
        assert!(!session.is_revealed());
        assert_eq!(session.selected_term(), None);
    }

    #[test]
    fn test_actions_before_start_are_noops() {
        let session = QuizSession::new(4).choose("A").reveal().next();
        assert_eq!(session.phase(), QuizPhase::NotStarted);
        assert_eq!(session.score(), 0);
        assert!(!session.is_answered());
    }

    #[test]
    fn test_finished_ignores_actions_until_restart() {
        let cat = catalog(&["A", "B", "C", "D"]);
        let mut rng = SmallRng::seed_from_u64(30);
        let mut session = QuizSession::new(4).start(&cat, &mut rng);
        while session.phase() == QuizPhase::InProgress {
            let term = session.current_question().unwrap().correct_entry().term.clone();
            session = session.choose(&term).next();
        }
        let session = session.choose("A").reveal().next();
        assert_eq!(session.phase(), QuizPhase::Finished);
        assert_eq!(session.score(), 4);

        let session = session.restart(&cat, &mut rng);
        assert_eq!(session.phase(), QuizPhase::InProgress);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.total(), 4);
    }

    #[test]
    fn test_restart_mid_session_resets() {
        let cat = catalog(&["A", "B", "C", "D", "E"]);
        let mut rng = SmallRng::seed_from_u64(31);
        let session = QuizSession::new(5).start(&cat, &mut rng);
        let term = session.current_question().unwrap().correct_entry().term.clone();
        let session = session.choose(&term).reveal().restart(&cat, &mut rng);
        assert_eq!(session.score(), 0);
        assert!(!session.is_answered());
        assert!(!session.is_revealed());
        assert_eq!(session.selected_term(), None);
        assert_eq!(session.question_count(), 5);
    }

    #[test]
    fn test_same_seed_same_questions() {
        let a = started(&["A", "B", "C", "D", "E", "F", "G", "H"], 5, 77);
        let b = started(&["A", "B", "C", "D", "E", "F", "G", "H"], 5, 77);
        assert_eq!(a.questions(), b.questions());
    }

    #[test]
    fn test_restarts_draw_fresh_orders() {
        let terms: Vec<String> = (0..30).map(|i| format!("T{i}")).collect();
        let refs: Vec<&str> = terms.iter().map(String::as_str).collect();
        let catalog = catalog(&refs);
        let mut rng = SmallRng::seed_from_u64(3);

        let first = QuizSession::new(10).start(&catalog, &mut rng);
        let order = |s: &QuizSession| -> Vec<String> {
            s.questions().iter().map(|q| q.correct_entry().term.clone()).collect()
        };
        let before = order(&first);
        let second = first.restart(&catalog, &mut rng);
        assert_ne!(before, order(&second));
    }

    #[test]
    fn test_option_status() {
        let session = started(&["A", "B", "C", "D"], 4, 13);
        let q = session.current_question().unwrap().clone();
        let correct = q.correct_entry().term.clone();
        let wrong = wrong_option(&session);
        assert_eq!(session.option_status(&correct), OptionStatus::Pending);

        let session = session.choose(&wrong);
        assert_eq!(session.option_status(&correct), OptionStatus::Correct);
        assert_eq!(session.option_status(&wrong), OptionStatus::WrongSelected);
        let other = q
            .options()
            .iter()
            .find(|o| o.term != correct && o.term != wrong)
            .unwrap();
        assert_eq!(session.option_status(&other.term), OptionStatus::Neutral);
    }

    #[test]
    fn test_progress() {
        let session = started(&["A", "B", "C", "D"], 4, 14);
        assert_eq!(session.progress(), 0.0);
        let term = wrong_option(&session);
        let session = session.choose(&term).next();
        assert!((session.progress() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_question_count_finishes_immediately() {
        let session = started(&["A", "B", "C", "D"], 0, 15);
        assert_eq!(session.phase(), QuizPhase::Finished);
        let summary = session.summary().unwrap();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.percent(), 0.0);
    }

    #[test]
    fn test_summary_percent() {
        let summary = QuizSummary { score: 3, total: 4 };
        assert!((summary.percent() - 75.0).abs() < f64::EPSILON);
    }
}
