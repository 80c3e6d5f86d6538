//! Interactive menu driving the question repository.
//!
//! Everything here is presentation: the session collects validated input,
//! builds whole [`Question`] values and hands them to the repository, which
//! alone decides whether a question is accepted.

mod prompt;
mod render;

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, info};

use bloomquiz_core::model::{BloomLevel, Question, QuestionKind, MAX_ITEMS, MIN_ITEMS};
use bloomquiz_core::{CompletionTime, QuestionRepository, RepositoryError};

use crate::config::BloomquizConfig;

use prompt::{InputClosed, Prompter};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// One console session over an in-memory question bank.
pub struct Session<R, W> {
    repo: QuestionRepository,
    prompter: Prompter<R, W>,
    config: BloomquizConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: BloomquizConfig) -> Self {
        Self {
            repo: QuestionRepository::new(),
            prompter: Prompter::new(input, output),
            config,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run the menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        info!("session started");
        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is::<InputClosed>() => {
                    debug!("input closed, ending session");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(
            self.prompter.out(),
            "\nThank you for using the Bloom's Taxonomy question manager!"
        )?;
        info!(questions = self.repo.len(), "session finished");
        Ok(())
    }

    /// Show the menu and handle one choice. Returns `false` on exit.
    fn step(&mut self) -> Result<bool> {
        self.clear()?;
        writeln!(
            self.prompter.out(),
            "===== Bloom's Taxonomy Question Manager =====\n\
             1. Create a new question\n\
             2. Update an existing question\n\
             3. Delete a question\n\
             4. Search questions by Bloom level\n\
             5. Search questions by year\n\
             6. Show all questions\n\
             7. Show estimated test completion time\n\
             0. Exit"
        )?;

        match self.prompter.read_number("Enter your choice: ", 0, 7)? {
            0 => return Ok(false),
            1 => self.create_question()?,
            2 => self.update_question()?,
            3 => self.delete_question()?,
            4 => self.search_by_level()?,
            5 => self.search_by_year()?,
            6 => self.show_all()?,
            _ => self.show_total_time()?,
        }
        Ok(true)
    }

    fn create_question(&mut self) -> Result<()> {
        self.screen("Create a New Question")?;
        writeln!(
            self.prompter.out(),
            "Select the question type:\n1. Multiple choice\n2. True/False\n3. Matching"
        )?;

        let question_type = self.prompter.read_number("Enter the type (1-3): ", 1, 3)?;
        let text = self.prompter.read_non_empty("Enter the question text: ")?;
        let year = self.prompter.read_number(
            &format!(
                "Enter the question year (0 if none, up to {}): ",
                self.config.max_year
            ),
            0,
            self.config.max_year,
        )?;

        if self.repo.is_similar(&text, year) {
            writeln!(
                self.prompter.out(),
                "Error: the question is similar to an existing one in the same or previous year."
            )?;
            return self.pause();
        }

        write!(self.prompter.out(), "{}", render::bloom_levels(true))?;
        let level = self.read_level("Enter the Bloom level (1-6): ")?;
        let minutes = self.prompter.read_number(
            &format!(
                "Enter the estimated time to answer (in minutes, 1-{}): ",
                self.config.max_minutes
            ),
            1,
            self.config.max_minutes,
        )?;

        let kind = match question_type {
            1 => self.read_multiple_choice(&[])?,
            2 => self.read_true_false()?,
            _ => self.read_matching(&[], &[])?,
        };

        let result = Question::new(text, level, minutes, year, kind)
            .map_err(RepositoryError::from)
            .and_then(|q| self.repo.insert(q));
        match result {
            Ok(id) => writeln!(
                self.prompter.out(),
                "Question added successfully with ID: {id}"
            )?,
            Err(RepositoryError::Rejected { .. }) => writeln!(
                self.prompter.out(),
                "Error: the question is similar to an existing one in the same or previous year."
            )?,
            Err(e) => writeln!(self.prompter.out(), "Error: {e}")?,
        }

        self.pause()
    }

    fn update_question(&mut self) -> Result<()> {
        self.screen("Update a Question")?;
        if self.repo.is_empty() {
            writeln!(self.prompter.out(), "No questions available to update.")?;
            return self.pause();
        }

        self.list_available()?;
        let id = self.prompter.read_number(
            "Enter the ID of the question to update: ",
            0,
            u32::MAX,
        )?;
        let Some(current) = self.repo.get(id).cloned() else {
            writeln!(self.prompter.out(), "Question not found.")?;
            return self.pause();
        };

        writeln!(
            self.prompter.out(),
            "Current question details:\n{}",
            current.describe()
        )?;

        let mut draft = current.clone();

        let text = self
            .prompter
            .read_line("Enter the new question text (leave empty to keep the current one): ")?;
        if !text.trim().is_empty() {
            draft.set_text(text)?;
        }

        let keep_year = if current.year() > 0 {
            current.year().to_string()
        } else {
            "no year".to_string()
        };
        let year = self.prompter.read_number(
            &format!("Enter the new year (0 to keep {keep_year}): "),
            0,
            self.config.max_year,
        )?;
        if year > 0 {
            draft.set_year(year);
        }

        write!(self.prompter.out(), "{}", render::bloom_levels(false))?;
        let level = self.prompter.read_number(
            "Enter the new Bloom level (1-6, 0 to keep the current one): ",
            0,
            6,
        )?;
        if level > 0 {
            draft.set_bloom_level(level_from(level)?);
        }

        let minutes = self.prompter.read_number(
            "Enter the new estimated time (in minutes, 0 to keep the current one): ",
            0,
            self.config.max_minutes,
        )?;
        if minutes > 0 {
            draft.set_estimated_minutes(minutes)?;
        }

        match current.kind() {
            QuestionKind::MultipleChoice { options, .. } => {
                if self
                    .prompter
                    .read_yes_no("Update the options? (1 for yes, 0 for no): ")?
                {
                    draft.set_kind(self.read_multiple_choice(options)?)?;
                }
            }
            QuestionKind::TrueFalse { .. } => {
                if self
                    .prompter
                    .read_yes_no("Update the correct answer? (1 for yes, 0 for no): ")?
                {
                    draft.set_kind(self.read_true_false()?)?;
                }
            }
            QuestionKind::Matching {
                left_items,
                right_items,
                ..
            } => {
                if self
                    .prompter
                    .read_yes_no("Update the matching items? (1 for yes, 0 for no): ")?
                {
                    draft.set_kind(self.read_matching(left_items, right_items)?)?;
                }
            }
        }

        match self.repo.update(id, draft) {
            Ok(()) => writeln!(self.prompter.out(), "Question updated successfully.")?,
            Err(RepositoryError::Rejected { .. }) => writeln!(
                self.prompter.out(),
                "Error: could not update the question. It may be similar to an existing one."
            )?,
            Err(e) => writeln!(self.prompter.out(), "Error: {e}")?,
        }

        self.pause()
    }

    fn delete_question(&mut self) -> Result<()> {
        self.screen("Delete a Question")?;
        if self.repo.is_empty() {
            writeln!(self.prompter.out(), "No questions available to delete.")?;
            return self.pause();
        }

        self.list_available()?;
        let id = self.prompter.read_number(
            "Enter the ID of the question to delete: ",
            0,
            u32::MAX,
        )?;

        match self.repo.delete(id) {
            Ok(removed) => writeln!(
                self.prompter.out(),
                "Question deleted successfully.\nRemoved: {}",
                removed.summary_line(self.config.summary_width)
            )?,
            Err(_) => writeln!(self.prompter.out(), "Question not found.")?,
        }

        self.pause()
    }

    fn search_by_level(&mut self) -> Result<()> {
        self.screen("Search Questions by Bloom Level")?;
        write!(self.prompter.out(), "{}", render::bloom_levels(false))?;

        let level = self.read_level("Enter the Bloom level to search for (1-6): ")?;

        let found = self.repo.find_by_bloom_level(level);
        let out = self.prompter.out();
        if found.is_empty() {
            writeln!(out, "No questions found for Bloom level: {level}")?;
        } else {
            writeln!(
                out,
                "Found {} question(s) for Bloom level: {level}\n",
                found.len()
            )?;
            write_descriptions(out, &found)?;
        }

        self.pause()
    }

    fn search_by_year(&mut self) -> Result<()> {
        self.screen("Search Questions by Year")?;
        let year = self.prompter.read_number(
            "Enter the year to search for (0 for questions without a year): ",
            0,
            self.config.max_year,
        )?;

        let found = self.repo.find_by_year(year);
        let out = self.prompter.out();
        if found.is_empty() {
            writeln!(out, "No questions found for year: {year}")?;
        } else {
            writeln!(out, "Found {} question(s) for year: {year}\n", found.len())?;
            write_descriptions(out, &found)?;
        }

        self.pause()
    }

    fn show_all(&mut self) -> Result<()> {
        self.screen("All Questions")?;

        let all: Vec<&Question> = self.repo.all_questions().iter().collect();
        let out = self.prompter.out();
        if all.is_empty() {
            writeln!(out, "No questions available.")?;
        } else {
            writeln!(out, "Total questions: {}\n", all.len())?;
            write_descriptions(out, &all)?;
        }

        self.pause()
    }

    fn show_total_time(&mut self) -> Result<()> {
        self.screen("Estimated Test Completion Time")?;
        let time = CompletionTime::for_repository(&self.repo);
        writeln!(self.prompter.out(), "Total estimated time: {time}")?;
        self.pause()
    }

    fn read_level(&mut self, message: &str) -> Result<BloomLevel> {
        let n = self.prompter.read_number(message, 1, 6)?;
        level_from(n)
    }

    fn read_multiple_choice(&mut self, defaults: &[String]) -> Result<QuestionKind> {
        let count = self.prompter.read_index(
            &format!("Enter the number of options ({MIN_ITEMS}-{MAX_ITEMS}): "),
            MIN_ITEMS,
            MAX_ITEMS,
        )?;
        let options = self.read_items("option", count, defaults)?;
        let correct = self.prompter.read_index(
            &format!("Enter the correct option (1-{count}): "),
            1,
            count,
        )?;

        Ok(QuestionKind::MultipleChoice {
            options,
            correct_option: correct - 1,
        })
    }

    fn read_true_false(&mut self) -> Result<QuestionKind> {
        let correct_answer = self
            .prompter
            .read_yes_no("Enter the correct answer (1 for True, 0 for False): ")?;
        Ok(QuestionKind::TrueFalse { correct_answer })
    }

    fn read_matching(
        &mut self,
        left_defaults: &[String],
        right_defaults: &[String],
    ) -> Result<QuestionKind> {
        let pairs = self.prompter.read_index(
            &format!("Enter the number of pairs to match ({MIN_ITEMS}-{MAX_ITEMS}): "),
            MIN_ITEMS,
            MAX_ITEMS,
        )?;
        let left_items = self.read_items("left item", pairs, left_defaults)?;
        let right_items = self.read_items("right item", pairs, right_defaults)?;

        let mut correct_mapping = Vec::with_capacity(pairs);
        for i in 1..=pairs {
            let right = self.prompter.read_index(
                &format!("Enter the right item matching left item {i} (1-{pairs}): "),
                1,
                pairs,
            )?;
            correct_mapping.push(right - 1);
        }

        Ok(QuestionKind::Matching {
            left_items,
            right_items,
            correct_mapping,
        })
    }

    /// Read `count` items; an empty answer keeps the matching default, if any.
    fn read_items(&mut self, label: &str, count: usize, defaults: &[String]) -> Result<Vec<String>> {
        let mut items = Vec::with_capacity(count);
        for i in 0..count {
            let default = defaults.get(i);
            let message = match default {
                Some(d) => format!("Enter {label} {} [{d}]: ", i + 1),
                None => format!("Enter {label} {}: ", i + 1),
            };
            let answer = self.prompter.read_line(&message)?;
            if answer.is_empty() {
                items.push(default.cloned().unwrap_or_default());
            } else {
                items.push(answer);
            }
        }
        Ok(items)
    }

    fn list_available(&mut self) -> Result<()> {
        let table = render::question_table(self.repo.all_questions(), self.config.summary_width);
        writeln!(self.prompter.out(), "Available questions:\n{table}")?;
        Ok(())
    }

    fn screen(&mut self, title: &str) -> Result<()> {
        self.clear()?;
        writeln!(self.prompter.out(), "===== {title} =====")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.config.clear_screen {
            write!(self.prompter.out(), "{CLEAR_SCREEN}")?;
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if self.config.pause_after_action {
            self.prompter.read_line("\nPress Enter to continue...")?;
        }
        Ok(())
    }
}

fn level_from(n: u32) -> Result<BloomLevel> {
    let n = u8::try_from(n)?;
    BloomLevel::try_from(n).map_err(anyhow::Error::msg)
}

fn write_descriptions(out: &mut impl Write, questions: &[&Question]) -> Result<()> {
    for q in questions {
        writeln!(out, "{}\n{}", q.describe(), render::SEPARATOR)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quiet_config() -> BloomquizConfig {
        BloomquizConfig {
            clear_screen: false,
            pause_after_action: false,
            ..BloomquizConfig::default()
        }
    }

    /// Run a scripted session; each element is one input line.
    fn run_script(lines: &[&str]) -> (QuestionRepository, String) {
        let mut input = lines.join("\n");
        input.push('\n');
        let mut session = Session::new(Cursor::new(input.into_bytes()), Vec::new(), quiet_config());
        session.run().unwrap();

        let Session { repo, prompter, .. } = session;
        let output = String::from_utf8(prompter.into_output()).unwrap();
        (repo, output)
    }

    const CREATE_MC: &[&str] = &[
        "1", "1", "Capital of France?", "2020", "1", "5", "3", "Berlin", "Paris", "Rome", "2",
    ];

    #[test]
    fn create_multiple_choice() {
        let mut script = CREATE_MC.to_vec();
        script.push("0");
        let (repo, output) = run_script(&script);

        assert!(output.contains("Question added successfully with ID: 1"));
        let q = repo.find_by_id(1).unwrap();
        assert_eq!(q.text(), "Capital of France?");
        assert_eq!(q.year(), 2020);
        assert_eq!(q.bloom_level(), BloomLevel::Remember);
        assert_eq!(q.estimated_minutes(), 5);
        assert_eq!(
            q.kind(),
            &QuestionKind::MultipleChoice {
                options: vec!["Berlin".into(), "Paris".into(), "Rome".into()],
                correct_option: 1,
            }
        );
        assert!(output.contains("Thank you for using"));
    }

    #[test]
    fn create_true_false_and_matching() {
        let (repo, _) = run_script(&[
            "1", "2", "Rust has a GC", "0", "1", "1", "0", //
            "1", "3", "Match animals", "2023", "4", "10", "2", "dog", "cat", "meow", "woof", "2",
            "1", //
            "0",
        ]);

        assert_eq!(repo.len(), 2);
        assert_eq!(
            repo.find_by_id(1).unwrap().kind(),
            &QuestionKind::TrueFalse {
                correct_answer: false
            }
        );
        assert_eq!(
            repo.find_by_id(2).unwrap().kind(),
            &QuestionKind::Matching {
                left_items: vec!["dog".into(), "cat".into()],
                right_items: vec!["meow".into(), "woof".into()],
                correct_mapping: vec![1, 0],
            }
        );
    }

    #[test]
    fn duplicate_in_next_year_is_refused_before_details() {
        let (repo, output) = run_script(&[
            "1", "2", "Same text", "2020", "1", "1", "1", //
            "1", "2", "Same text", "2021", //
            "0",
        ]);
        assert_eq!(repo.len(), 1);
        assert!(output.contains("similar to an existing one"));
    }

    #[test]
    fn update_keeps_fields_on_empty_answers() {
        let mut script = CREATE_MC.to_vec();
        script.extend_from_slice(&["2", "1", "", "0", "0", "0", "1", "2", "", "Lyon", "1", "0"]);
        let (repo, output) = run_script(&script);

        assert!(output.contains("Question updated successfully."));
        let q = repo.find_by_id(1).unwrap();
        assert_eq!(q.text(), "Capital of France?");
        assert_eq!(q.year(), 2020);
        assert_eq!(q.estimated_minutes(), 5);
        assert_eq!(
            q.kind(),
            &QuestionKind::MultipleChoice {
                options: vec!["Berlin".into(), "Lyon".into()],
                correct_option: 0,
            }
        );
    }

    #[test]
    fn update_to_existing_text_is_rejected() {
        let (repo, output) = run_script(&[
            "1", "2", "First", "2020", "1", "1", "1", //
            "1", "2", "Second", "2010", "1", "1", "1", //
            "2", "1", "Second", "0", "0", "0", "0", //
            "0",
        ]);

        assert!(output.contains("could not update the question"));
        assert_eq!(repo.find_by_id(1).unwrap().text(), "First");
        assert_eq!(repo.find_by_year(2020)[0].id(), 1);
    }

    #[test]
    fn update_unknown_id() {
        let (_, output) = run_script(&[
            "1", "2", "Only", "0", "1", "1", "1", //
            "2", "42", //
            "0",
        ]);
        assert!(output.contains("Question not found."));
    }

    #[test]
    fn delete_then_reuse_text() {
        let (repo, output) = run_script(&[
            "1", "2", "Reusable", "2020", "1", "1", "1", //
            "3", "1", //
            "3", //
            "1", "2", "Reusable", "2021", "2", "3", "0", //
            "0",
        ]);
        assert!(output.contains("Question deleted successfully."));
        assert!(output.contains("Removed: Reusable (True/False) - Year: 2020"));
        assert!(output.contains("No questions available to delete."));
        assert!(output.contains("Question added successfully with ID: 2"));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn searches_and_totals() {
        let (_, output) = run_script(&[
            "1", "2", "Easy one", "2020", "1", "45", "1", //
            "1", "2", "Hard one", "2022", "6", "30", "0", //
            "4", "6", //
            "4", "3", //
            "5", "2020", //
            "5", "0", //
            "6", //
            "7", //
            "0",
        ]);

        assert!(output.contains("Found 1 question(s) for Bloom level: Create"));
        assert!(output.contains("No questions found for Bloom level: Apply"));
        assert!(output.contains("Found 1 question(s) for year: 2020"));
        assert!(output.contains("No questions found for year: 0"));
        assert!(output.contains("Total questions: 2"));
        assert!(output.contains("Total estimated time: 75 minutes (1 hour and 15 minutes)"));
    }

    #[test]
    fn invalid_menu_choice_reprompts() {
        let (_, output) = run_script(&["9", "x", "0"]);
        assert_eq!(
            output
                .matches("Invalid input. Please enter a number between 0 and 7.")
                .count(),
            2
        );
    }

    #[test]
    fn end_of_input_mid_question_ends_session() {
        let (repo, output) = run_script(&["1", "1", "Unfinished"]);
        assert!(repo.is_empty());
        assert!(output.contains("Thank you for using"));
    }

    #[test]
    fn pause_and_clear_when_enabled() {
        let input = "7\n\n0\n";
        let mut session = Session::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            BloomquizConfig::default(),
        );
        session.run().unwrap();
        let output = String::from_utf8(session.into_output()).unwrap();
        assert!(output.contains(CLEAR_SCREEN));
        assert!(output.contains("Press Enter to continue..."));
        assert!(output.contains("Total estimated time: 0 minutes"));
    }

    #[test]
    fn invalid_utf8_line_does_not_end_session() {
        let mut input = CREATE_MC.join("\n").into_bytes();
        input.extend_from_slice(b"\n1\n2\n");
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"0\n1\n3\n1\n0\n");

        let mut session = Session::new(Cursor::new(input), Vec::new(), quiet_config());
        session.run().unwrap();

        let Session { repo, prompter, .. } = session;
        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find_by_id(2).unwrap().text(), "\u{fffd}\u{fffd}");
        assert!(output.contains("Question added successfully with ID: 2"));
        assert!(output.contains("Thank you for using"));
    }
}
