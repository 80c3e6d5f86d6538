//! Text rendering shared by the console screens.

use bloomquiz_core::model::{BloomLevel, Question};
use comfy_table::{Cell, Table};

/// Rule printed between full question descriptions.
pub const SEPARATOR: &str = "------------------------";

/// Compact listing used when picking a question to update or delete.
pub fn question_table<'a>(questions: impl IntoIterator<Item = &'a Question>, width: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Question", "Type", "Year"]);

    for q in questions {
        let year = if q.year() > 0 {
            q.year().to_string()
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            Cell::new(q.id()),
            Cell::new(q.truncated_text(width)),
            Cell::new(q.question_type()),
            Cell::new(year),
        ]);
    }

    table
}

/// Numbered level list; `with_descriptions` adds the one-line explanation.
pub fn bloom_levels(with_descriptions: bool) -> String {
    let mut out = String::from("Bloom's Taxonomy levels:\n");
    for level in BloomLevel::ALL {
        if with_descriptions {
            out.push_str(&format!(
                "{}. {} - {}\n",
                level.value(),
                level,
                level.description()
            ));
        } else {
            out.push_str(&format!("{}. {}\n", level.value(), level));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloomquiz_core::model::QuestionKind;

    #[test]
    fn table_lists_each_question() {
        let a = Question::new(
            "A question long enough to be cut",
            BloomLevel::Apply,
            3,
            2024,
            QuestionKind::TrueFalse {
                correct_answer: true,
            },
        )
        .unwrap();
        let b = Question::new(
            "Short",
            BloomLevel::Create,
            3,
            0,
            QuestionKind::TrueFalse {
                correct_answer: false,
            },
        )
        .unwrap();

        let rendered = question_table([&a, &b], 10).to_string();
        assert!(rendered.contains("A question..."));
        assert!(rendered.contains("2024"));
        assert!(rendered.contains("Short"));
        assert!(rendered.contains("True/False"));
    }

    #[test]
    fn level_list() {
        let plain = bloom_levels(false);
        assert!(plain.contains("1. Remember\n"));
        assert!(plain.contains("6. Create\n"));

        let described = bloom_levels(true);
        assert!(described.contains("3. Apply - use knowledge in new situations"));
    }
}
