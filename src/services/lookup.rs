//! Resolving a typed surname to a teacher and their upcoming classes.

use crate::database::{connection::DatabaseManager, models::*};
use crate::utils::markdown::escape_markdown;

pub const SURNAME_PROMPT: &str = "Напишите фамилию преподавателя, которого надо найти:";
pub const UNKNOWN_SURNAME: &str = "Введенная фамилия отсутствует в списке преподавателей.";
pub const RETRY_HINT: &str = "Наберите команду /find еще раз, чтобы снова найти преподавателя.";
pub const GENERIC_FAILURE: &str = "Произошла ошибка в работе бота. Попробуйте еще раз позже.";

/// Result of looking up one surname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Exact surname match, with classes from the requested date onwards
    Found {
        teacher: Teacher,
        classes: Vec<ClassSession>,
    },
    /// No exact match, but these surnames are close
    Suggestions(Vec<String>),
    /// Nothing close enough
    Unknown,
}

#[derive(Clone)]
pub struct TeacherLookup {
    db: DatabaseManager,
}

impl TeacherLookup {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    /// Exact lookup first; on a miss, surnames within
    /// [`SUGGESTION_MAX_DISTANCE`] edits are offered instead.
    pub async fn resolve(
        &self,
        surname: &str,
        from_day: i64,
        from_month: i64,
    ) -> Result<LookupOutcome, sqlx::Error> {
        if let Some(teacher) = Teacher::find_by_last_name(&self.db.pool, surname).await? {
            let classes =
                ClassSession::for_teacher(&self.db.pool, teacher.id, from_day, from_month).await?;
            tracing::debug!(
                "Resolved '{}' to teacher {} with {} upcoming classes",
                surname,
                teacher.id,
                classes.len()
            );
            return Ok(LookupOutcome::Found { teacher, classes });
        }

        let suggestions =
            Teacher::surname_suggestions(&self.db.pool, surname, SUGGESTION_MAX_DISTANCE).await?;
        tracing::debug!("No teacher '{}', {} suggestions", surname, suggestions.len());

        if suggestions.is_empty() {
            Ok(LookupOutcome::Unknown)
        } else {
            Ok(LookupOutcome::Suggestions(suggestions))
        }
    }
}

/// One line per class: `*DD.MM, TIME*: INFO`, with the label in bold.
pub fn format_sessions(classes: &[ClassSession]) -> String {
    classes
        .iter()
        .map(|class| {
            let label = format!("{:02}.{:02}, {}", class.day, class.month, class.time);
            format!("*{}*: {}", escape_markdown(&label), escape_markdown(&class.info))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reply text (Telegram MarkdownV2) for a lookup outcome.
pub fn format_reply(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Found { teacher, classes } if classes.is_empty() => format!(
            "К сожалению, не удалось найти, в какие дни можно встретить преподавателя *{}*\\.",
            escape_markdown(&teacher.full_name)
        ),
        LookupOutcome::Found { teacher, classes } => format!(
            "Преподавателя *{}* можно встретить в следующие дни:\n{}",
            escape_markdown(&teacher.full_name),
            format_sessions(classes)
        ),
        LookupOutcome::Suggestions(surnames) => {
            let phrase = if surnames.len() > 1 {
                "Может быть, Вы имели в виду одну из следующих фамилий?"
            } else {
                "Может быть, Вы имели в виду следующую фамилию?"
            };
            let listed = surnames
                .iter()
                .map(|s| format!("*{}*", escape_markdown(s)))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "{} {}\n{}\n{}",
                escape_markdown(UNKNOWN_SURNAME),
                escape_markdown(phrase),
                listed,
                escape_markdown(RETRY_HINT)
            )
        }
        LookupOutcome::Unknown => escape_markdown(UNKNOWN_SURNAME),
    }
}
