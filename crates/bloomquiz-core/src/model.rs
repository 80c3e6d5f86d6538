//! Core data model types for bloomquiz.
//!
//! A [`Question`] carries the fields shared by every question plus a
//! [`QuestionKind`] holding the variant-specific answer data. Construction
//! and every mutator validate the index invariants, so a `Question` value
//! that exists is always structurally sound.

use std::fmt;
use std::str::FromStr;

use crate::error::QuestionError;

/// Identifier assigned by the repository. Zero means "not stored yet".
pub type QuestionId = u32;

/// Minimum number of options or matching pairs.
pub const MIN_ITEMS: usize = 2;
/// Maximum number of options or matching pairs.
pub const MAX_ITEMS: usize = 6;

/// Cognitive levels of Bloom's Taxonomy, ordered from least to most demanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BloomLevel {
    Remember = 1,
    Understand = 2,
    Apply = 3,
    Analyze = 4,
    Evaluate = 5,
    Create = 6,
}

impl BloomLevel {
    /// All levels in ascending order.
    pub const ALL: [BloomLevel; 6] = [
        BloomLevel::Remember,
        BloomLevel::Understand,
        BloomLevel::Apply,
        BloomLevel::Analyze,
        BloomLevel::Evaluate,
        BloomLevel::Create,
    ];

    /// Numeric value, 1 (Remember) through 6 (Create).
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            BloomLevel::Remember => "Remember",
            BloomLevel::Understand => "Understand",
            BloomLevel::Apply => "Apply",
            BloomLevel::Analyze => "Analyze",
            BloomLevel::Evaluate => "Evaluate",
            BloomLevel::Create => "Create",
        }
    }

    /// One-line explanation shown next to the level in menus.
    pub fn description(self) -> &'static str {
        match self {
            BloomLevel::Remember => "most basic level (recall information)",
            BloomLevel::Understand => "explain meanings",
            BloomLevel::Apply => "use knowledge in new situations",
            BloomLevel::Analyze => "break information into parts",
            BloomLevel::Evaluate => "judge the value of information",
            BloomLevel::Create => "highest level (produce something new)",
        }
    }
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for BloomLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BloomLevel::ALL
            .into_iter()
            .find(|level| level.value() == value)
            .ok_or_else(|| format!("bloom level must be between 1 and 6, got {value}"))
    }
}

impl FromStr for BloomLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return BloomLevel::try_from(n);
        }
        BloomLevel::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown bloom level: {s}"))
    }
}

/// Field-less tag naming which variant a question is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Matching,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "Multiple choice"),
            QuestionType::TrueFalse => write!(f, "True/False"),
            QuestionType::Matching => write!(f, "Matching"),
        }
    }
}

/// Variant-specific answer data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        /// 0-based index into `options`.
        correct_option: usize,
    },
    TrueFalse {
        correct_answer: bool,
    },
    Matching {
        left_items: Vec<String>,
        right_items: Vec<String>,
        /// `correct_mapping[i]` is the index in `right_items` matching `left_items[i]`.
        correct_mapping: Vec<usize>,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::TrueFalse { .. } => QuestionType::TrueFalse,
            QuestionKind::Matching { .. } => QuestionType::Matching,
        }
    }

    /// Check item counts and that every index points inside its list.
    pub fn validate(&self) -> Result<(), QuestionError> {
        match self {
            QuestionKind::MultipleChoice {
                options,
                correct_option,
            } => {
                check_item_count("options", options.len())?;
                if *correct_option >= options.len() {
                    return Err(QuestionError::CorrectOptionOutOfRange {
                        index: *correct_option,
                        len: options.len(),
                    });
                }
                Ok(())
            }
            QuestionKind::TrueFalse { .. } => Ok(()),
            QuestionKind::Matching {
                left_items,
                right_items,
                correct_mapping,
            } => {
                check_item_count("left items", left_items.len())?;
                check_item_count("right items", right_items.len())?;
                if left_items.len() != right_items.len() {
                    return Err(QuestionError::UnbalancedSides {
                        left: left_items.len(),
                        right: right_items.len(),
                    });
                }
                if correct_mapping.len() != left_items.len() {
                    return Err(QuestionError::MappingLength {
                        expected: left_items.len(),
                        len: correct_mapping.len(),
                    });
                }
                if let Some((left, &index)) = correct_mapping
                    .iter()
                    .enumerate()
                    .find(|&(_, &index)| index >= right_items.len())
                {
                    return Err(QuestionError::MappingOutOfRange {
                        left,
                        index,
                        len: right_items.len(),
                    });
                }
                Ok(())
            }
        }
    }
}

fn check_item_count(field: &'static str, len: usize) -> Result<(), QuestionError> {
    if (MIN_ITEMS..=MAX_ITEMS).contains(&len) {
        Ok(())
    } else {
        Err(QuestionError::ItemCount {
            field,
            len,
            min: MIN_ITEMS,
            max: MAX_ITEMS,
        })
    }
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    bloom_level: BloomLevel,
    estimated_minutes: u32,
    /// Zero means no year is associated.
    year: u32,
    kind: QuestionKind,
}

impl Question {
    /// Build a validated question. The id stays 0 until a repository stores it.
    pub fn new(
        text: impl Into<String>,
        bloom_level: BloomLevel,
        estimated_minutes: u32,
        year: u32,
        kind: QuestionKind,
    ) -> Result<Self, QuestionError> {
        let question = Self {
            id: 0,
            text: text.into(),
            bloom_level,
            estimated_minutes,
            year,
            kind,
        };
        question.validate()?;
        Ok(question)
    }

    /// Re-check every invariant of this value.
    pub fn validate(&self) -> Result<(), QuestionError> {
        check_text(&self.text)?;
        check_minutes(self.estimated_minutes)?;
        self.kind.validate()
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bloom_level(&self) -> BloomLevel {
        self.bloom_level
    }

    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), QuestionError> {
        let text = text.into();
        check_text(&text)?;
        self.text = text;
        Ok(())
    }

    pub fn set_bloom_level(&mut self, level: BloomLevel) {
        self.bloom_level = level;
    }

    pub fn set_estimated_minutes(&mut self, minutes: u32) -> Result<(), QuestionError> {
        check_minutes(minutes)?;
        self.estimated_minutes = minutes;
        Ok(())
    }

    pub fn set_year(&mut self, year: u32) {
        self.year = year;
    }

    pub fn set_kind(&mut self, kind: QuestionKind) -> Result<(), QuestionError> {
        kind.validate()?;
        self.kind = kind;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: QuestionId) {
        self.id = id;
    }

    #[cfg(test)]
    pub(crate) fn kind_mut(&mut self) -> &mut QuestionKind {
        &mut self.kind
    }

    /// Multi-line human-readable rendering.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Text cut to `width` characters, with "..." appended when cut.
    pub fn truncated_text(&self, width: usize) -> String {
        let mut out: String = self.text.chars().take(width).collect();
        if self.text.chars().count() > width {
            out.push_str("...");
        }
        out
    }

    /// One-line listing entry: truncated text, type and year when present.
    pub fn summary_line(&self, width: usize) -> String {
        let mut line = format!("{} ({})", self.truncated_text(width), self.question_type());
        if self.year > 0 {
            line.push_str(&format!(" - Year: {}", self.year));
        }
        line
    }
}

fn check_text(text: &str) -> Result<(), QuestionError> {
    if text.trim().is_empty() {
        Err(QuestionError::EmptyText)
    } else {
        Ok(())
    }
}

fn check_minutes(minutes: u32) -> Result<(), QuestionError> {
    if minutes == 0 {
        Err(QuestionError::ZeroMinutes)
    } else {
        Ok(())
    }
}

/// Letter label for a right-hand matching item: 0 -> 'A'.
fn item_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Question: {}", self.text)?;
        writeln!(f, "Bloom level: {}", self.bloom_level)?;
        writeln!(f, "Estimated time: {} minutes", self.estimated_minutes)?;
        if self.year > 0 {
            writeln!(f, "Year: {}", self.year)?;
        }
        writeln!(f, "Type: {}", self.question_type())?;

        match &self.kind {
            QuestionKind::MultipleChoice {
                options,
                correct_option,
            } => {
                writeln!(f, "Options:")?;
                for (i, option) in options.iter().enumerate() {
                    writeln!(f, "  {}. {option}", i + 1)?;
                }
                write!(f, "Correct option: {}", correct_option + 1)
            }
            QuestionKind::TrueFalse { correct_answer } => {
                let answer = if *correct_answer { "True" } else { "False" };
                write!(f, "Correct answer: {answer}")
            }
            QuestionKind::Matching {
                left_items,
                right_items,
                correct_mapping,
            } => {
                writeln!(f, "Left items:")?;
                for (i, item) in left_items.iter().enumerate() {
                    writeln!(f, "  {}. {item}", i + 1)?;
                }
                writeln!(f, "Right items:")?;
                for (i, item) in right_items.iter().enumerate() {
                    writeln!(f, "  {}. {item}", item_letter(i))?;
                }
                write!(f, "Correct matches:")?;
                for (i, &right) in correct_mapping.iter().enumerate() {
                    write!(f, "\n  {} -> {}", i + 1, item_letter(right))?;
                }
                Ok(())
            }
        }
    }
}
