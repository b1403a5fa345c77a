//! Domain types for homework review statuses.

use std::fmt;

/// Review status of a homework, as reported by the Practicum API.
///
/// The set is closed: a status outside it is a [`crate::DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Look up a status by its API code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the chat.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A homework record reduced to the fields the bot reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    /// The notification text for this record.
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(HomeworkStatus::from_code("approved"), Some(HomeworkStatus::Approved));
        assert_eq!(HomeworkStatus::from_code("reviewing"), Some(HomeworkStatus::Reviewing));
        assert_eq!(HomeworkStatus::from_code("rejected"), Some(HomeworkStatus::Rejected));
        assert_eq!(HomeworkStatus::from_code("Approved"), None);
        assert_eq!(HomeworkStatus::from_code(""), None);
    }

    #[test]
    fn test_message_embeds_name_and_verdict() {
        for status in HomeworkStatus::ALL {
            let record = HomeworkRecord {
                homework_name: "hw_sprint_7".to_string(),
                status,
            };
            let message = record.message();
            assert!(message.contains("\"hw_sprint_7\""));
            assert!(message.ends_with(status.verdict()));
        }
    }
}
