//! Aggregate completion time for a question bank.

use std::fmt;

use crate::repository::QuestionRepository;

/// Total estimated time to answer every question, split into hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionTime {
    pub total_minutes: u64,
}

impl CompletionTime {
    pub fn from_minutes(total_minutes: u64) -> Self {
        Self { total_minutes }
    }

    pub fn for_repository(repo: &QuestionRepository) -> Self {
        Self::from_minutes(repo.total_estimated_minutes())
    }

    pub fn hours(&self) -> u64 {
        self.total_minutes / 60
    }

    /// Minutes left over after whole hours.
    pub fn minutes(&self) -> u64 {
        self.total_minutes % 60
    }
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

impl fmt::Display for CompletionTime {
    /// "125 minutes (2 hours and 5 minutes)"; the breakdown only appears from one hour up.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.total_minutes)?;
        if self.total_minutes >= 60 {
            write!(f, " ({}", plural(self.hours(), "hour"))?;
            if self.minutes() > 0 {
                write!(f, " and {}", plural(self.minutes(), "minute"))?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BloomLevel, Question, QuestionKind};

    #[test]
    fn under_an_hour() {
        assert_eq!(CompletionTime::from_minutes(0).to_string(), "0 minutes");
        assert_eq!(CompletionTime::from_minutes(59).to_string(), "59 minutes");
    }

    #[test]
    fn hour_breakdown() {
        assert_eq!(
            CompletionTime::from_minutes(60).to_string(),
            "60 minutes (1 hour)"
        );
        assert_eq!(
            CompletionTime::from_minutes(61).to_string(),
            "61 minutes (1 hour and 1 minute)"
        );
        assert_eq!(
            CompletionTime::from_minutes(125).to_string(),
            "125 minutes (2 hours and 5 minutes)"
        );
        assert_eq!(
            CompletionTime::from_minutes(180).to_string(),
            "180 minutes (3 hours)"
        );
    }

    #[test]
    fn from_repository() {
        let mut repo = QuestionRepository::new();
        for (text, minutes) in [("a", 40), ("b", 30)] {
            let q = Question::new(
                text,
                BloomLevel::Evaluate,
                minutes,
                0,
                QuestionKind::TrueFalse {
                    correct_answer: true,
                },
            )
            .unwrap();
            repo.insert(q).unwrap();
        }
        let time = CompletionTime::for_repository(&repo);
        assert_eq!(time.hours(), 1);
        assert_eq!(time.minutes(), 10);
    }

    #[test]
    fn totals_beyond_u32() {
        let total = u64::from(u32::MAX) + 1;
        let time = CompletionTime::from_minutes(total);
        assert_eq!(time.hours(), total / 60);
        assert!(time.to_string().starts_with("4294967296 minutes ("));
    }
}
