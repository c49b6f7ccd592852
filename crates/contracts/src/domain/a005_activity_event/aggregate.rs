use serde::{Deserialize, Serialize};

/// Действие реферала
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Registration,
    Purchase,
}

impl ActivityAction {
    pub fn key(&self) -> &'static str {
        match self {
            ActivityAction::Registration => "registration",
            ActivityAction::Purchase => "purchase",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "registration" => Some(ActivityAction::Registration),
            "purchase" => Some(ActivityAction::Purchase),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityAction::Registration => "Регистрация",
            ActivityAction::Purchase => "Покупка",
        }
    }
}

/// Событие в истории активности рефералов
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// ID реферала
    pub id: String,
    pub action: ActivityAction,
    pub date: String,
    pub source: String,
    /// "0 ₸" для событий без оплаты
    pub revenue: String,
}

impl ActivityEvent {
    pub fn has_revenue(&self) -> bool {
        crate::domain::common::parse_tenge(&self.revenue).map_or(false, |v| v > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_keys() {
        let json = serde_json::to_string(&ActivityAction::Purchase).unwrap();
        assert_eq!(json, "\"purchase\"");
        assert_eq!(
            ActivityAction::from_key("registration"),
            Some(ActivityAction::Registration)
        );
        assert_eq!(ActivityAction::from_key("refund"), None);
    }
}
