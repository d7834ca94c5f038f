//! Lesson session state.
//!
//! A session owns a private working copy of its words together with the
//! per-word `correct`/`revealed` flags. Nothing here writes back to the
//! persisted [`Word`] rows; the flags start cleared every time a session is
//! built.

use crate::error::SessionError;
use crate::matching::is_correct;
use crate::types::{Lesson, SessionOptions, SessionSource, SessionView, Word};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// A word inside a running session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWord {
    pub word: Word,
    pub correct: bool,
    pub revealed: bool,
}

impl SessionWord {
    fn new(word: Word) -> Self {
        Self {
            word,
            correct: false,
            revealed: false,
        }
    }
}

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    Correct,
    /// The answer did not match; the caller should clear its input.
    Retry,
}

/// State of one quiz pass over a lesson.
#[derive(Debug, Clone)]
pub struct LessonSession {
    id: Uuid,
    source: SessionSource,
    words: Vec<SessionWord>,
    current: usize,
}

impl LessonSession {
    /// Build a session over `words`.
    ///
    /// Review sessions are always shuffled; lesson sessions only when
    /// `options.shuffle` is set.
    pub fn new<R: Rng>(
        source: SessionSource,
        words: Vec<Word>,
        options: SessionOptions,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(SessionError::EmptySession);
        }

        let mut words: Vec<SessionWord> = words.into_iter().map(SessionWord::new).collect();
        if options.shuffle || source == SessionSource::Review {
            shuffle(&mut words, rng);
        }

        let session = Self {
            id: Uuid::new_v4(),
            source,
            words,
            current: 0,
        };
        debug!(id = %session.id, ?source, words = session.words.len(), "session created");
        Ok(session)
    }

    /// Session over a persisted lesson's words.
    pub fn from_lesson<R: Rng>(
        lesson: &Lesson,
        options: SessionOptions,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        Self::new(
            SessionSource::Lesson(lesson.id),
            lesson.words.clone(),
            options,
            rng,
        )
    }

    /// Review session over the whole vocabulary.
    pub fn review<R: Rng>(words: Vec<Word>, rng: &mut R) -> Result<Self, SessionError> {
        Self::new(SessionSource::Review, words, SessionOptions::default(), rng)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source(&self) -> SessionSource {
        self.source
    }

    pub fn words(&self) -> &[SessionWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: construction rejects empty word lists.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_at_start(&self) -> bool {
        self.current == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.current + 1 >= self.words.len()
    }

    pub fn current_word(&self) -> &SessionWord {
        &self.words[self.current]
    }

    fn current_word_mut(&mut self) -> &mut SessionWord {
        &mut self.words[self.current]
    }

    /// Move to the next word. Returns false when already at the last one.
    ///
    /// The word left behind keeps its `revealed` flag.
    pub fn advance(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move to the previous word. Returns false when already at the first.
    pub fn retreat(&mut self) -> bool {
        if self.is_at_start() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Check `input` against the current word's glosses.
    ///
    /// A correct word stays correct: a later wrong answer still reports
    /// [`SubmitOutcome::Retry`] but never clears the flag. `revealed` is
    /// left untouched either way.
    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        let entry = self.current_word_mut();
        if is_correct(input, &entry.word.glosses()) {
            entry.correct = true;
            SubmitOutcome::Correct
        } else {
            debug!(spanish = %entry.word.spanish, input, "answer rejected");
            SubmitOutcome::Retry
        }
    }

    /// Flip the current word's `revealed` flag and return its new value.
    pub fn toggle_reveal(&mut self) -> bool {
        let entry = self.current_word_mut();
        entry.revealed = !entry.revealed;
        entry.revealed
    }

    /// `(correct words, total words)`.
    pub fn progress(&self) -> (usize, usize) {
        let num_correct = self.words.iter().filter(|w| w.correct).count();
        (num_correct, self.words.len())
    }

    pub fn is_complete(&self) -> bool {
        let (num_correct, total) = self.progress();
        num_correct == total
    }

    /// IDs of the words answered correctly, in session order.
    pub fn correct_word_ids(&self) -> Vec<i64> {
        self.words
            .iter()
            .filter(|w| w.correct)
            .map(|w| w.word.id)
            .collect()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> SessionView {
        let (num_correct, total) = self.progress();
        let entry = self.current_word();
        let translations = (entry.correct || entry.revealed).then(|| entry.word.glosses());

        SessionView {
            position: self.current,
            total,
            num_correct,
            spanish: entry.word.spanish.clone(),
            correct: entry.correct,
            revealed: entry.revealed,
            translations,
        }
    }
}

/// Uniform in-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
