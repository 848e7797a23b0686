use serde::{Deserialize, Serialize};

/// Per-user notification settings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Opted in to email updates
    #[serde(default)]
    pub receive_emails: bool,
    /// Opted in to a daily "keep your streak" reminder
    #[serde(default)]
    pub daily_reminders: bool,
}

impl UserPreferences {
    pub fn new(receive_emails: bool, daily_reminders: bool) -> Self {
        Self {
            receive_emails,
            daily_reminders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = UserPreferences::default();
        assert!(!prefs.receive_emails);
        assert!(!prefs.daily_reminders);
    }

    #[test]
    fn test_preferences_serialization() {
        let prefs = UserPreferences::new(true, false);
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"receiveEmails":true,"dailyReminders":false}"#);
    }

    #[test]
    fn test_missing_fields_default_to_false() {
        let prefs: UserPreferences = serde_json::from_str(r#"{"dailyReminders":true}"#).unwrap();
        assert_eq!(prefs, UserPreferences::new(false, true));
    }
}
