//! In-memory question repository with duplicate prevention.
//!
//! The repository owns every question, hands out ids from a counter that
//! never goes backwards, and keeps two secondary indices (texts per year and
//! text to id) that drive the similarity check. Both indices are derived from
//! `questions` and every mutation keeps them in step with it.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::RepositoryError;
use crate::model::{BloomLevel, Question, QuestionId};

/// Owns the question bank for one session.
#[derive(Debug)]
pub struct QuestionRepository {
    questions: Vec<Question>,
    next_id: QuestionId,
    texts_by_year: HashMap<u32, HashSet<String>>,
    id_by_text: HashMap<String, QuestionId>,
}

impl Default for QuestionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            next_id: 1,
            texts_by_year: HashMap::new(),
            id_by_text: HashMap::new(),
        }
    }

    /// Whether `(text, year)` collides with a live question.
    ///
    /// A candidate is similar when its text is registered under the same
    /// year, under the immediately preceding year, or anywhere at all. The
    /// last rule subsumes the first two; all three are kept so each rejection
    /// reason stays visible.
    pub fn is_similar(&self, text: &str, year: u32) -> bool {
        let registered = |y: u32| {
            self.texts_by_year
                .get(&y)
                .is_some_and(|texts| texts.contains(text))
        };

        if year > 0 && registered(year) {
            return true;
        }
        if year > 1 && registered(year - 1) {
            return true;
        }
        self.id_by_text.contains_key(text)
    }

    /// Store a new question and return its freshly assigned id.
    pub fn insert(&mut self, mut question: Question) -> Result<QuestionId, RepositoryError> {
        question.validate()?;

        if self.is_similar(question.text(), question.year()) {
            debug!(year = question.year(), "insert rejected as similar");
            return Err(RepositoryError::Rejected {
                text: question.text().to_owned(),
                year: question.year(),
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        question.assign_id(id);
        self.register(question.text(), question.year(), id);
        self.questions.push(question);

        debug!(id, total = self.questions.len(), "question inserted");
        Ok(id)
    }

    /// Replace the question stored under `id` with `question`.
    ///
    /// The stored record keeps `id` whatever id the new value carries. On
    /// rejection the old registration is restored and nothing changes.
    pub fn update(&mut self, id: QuestionId, mut question: Question) -> Result<(), RepositoryError> {
        let index = self.position(id)?;
        question.validate()?;

        let old_text = self.questions[index].text().to_owned();
        let old_year = self.questions[index].year();
        self.unregister(&old_text, old_year);

        if question.text() != old_text && self.is_similar(question.text(), question.year()) {
            self.register(&old_text, old_year, id);
            debug!(id, year = question.year(), "update rejected as similar");
            return Err(RepositoryError::Rejected {
                text: question.text().to_owned(),
                year: question.year(),
            });
        }

        question.assign_id(id);
        self.register(question.text(), question.year(), id);
        self.questions[index] = question;

        debug!(id, "question updated");
        Ok(())
    }

    /// Remove the question with `id`, freeing its text for reuse.
    pub fn delete(&mut self, id: QuestionId) -> Result<Question, RepositoryError> {
        let index = self.position(id)?;
        let removed = self.questions.remove(index);
        self.unregister(removed.text(), removed.year());

        debug!(id, total = self.questions.len(), "question deleted");
        Ok(removed)
    }

    pub fn find_by_id(&self, id: QuestionId) -> Result<&Question, RepositoryError> {
        self.get(id).ok_or(RepositoryError::NotFound(id))
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Questions at `level`, in insertion order.
    pub fn find_by_bloom_level(&self, level: BloomLevel) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.bloom_level() == level)
            .collect()
    }

    /// Questions whose year equals `year` exactly. Zero matches only yearless questions.
    pub fn find_by_year(&self, year: u32) -> Vec<&Question> {
        self.questions.iter().filter(|q| q.year() == year).collect()
    }

    /// Sum of estimated minutes over all live questions, widened to `u64`.
    pub fn total_estimated_minutes(&self) -> u64 {
        self.questions
            .iter()
            .map(|q| u64::from(q.estimated_minutes()))
            .sum()
    }

    /// Every live question, in insertion order.
    pub fn all_questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    fn position(&self, id: QuestionId) -> Result<usize, RepositoryError> {
        self.questions
            .iter()
            .position(|q| q.id() == id)
            .ok_or(RepositoryError::NotFound(id))
    }

    fn register(&mut self, text: &str, year: u32, id: QuestionId) {
        if year > 0 {
            self.texts_by_year
                .entry(year)
                .or_default()
                .insert(text.to_owned());
        }
        self.id_by_text.insert(text.to_owned(), id);
    }

    fn unregister(&mut self, text: &str, year: u32) {
        if year > 0 {
            if let Some(texts) = self.texts_by_year.get_mut(&year) {
                texts.remove(text);
                if texts.is_empty() {
                    self.texts_by_year.remove(&year);
                }
            }
        }
        self.id_by_text.remove(text);
    }
}
