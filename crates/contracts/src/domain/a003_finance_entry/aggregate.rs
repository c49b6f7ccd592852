use serde::{Deserialize, Serialize};
use std::fmt;

/// Статус выплаты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoutStatus {
    #[serde(rename = "Выплачено")]
    Paid,
    #[serde(rename = "Ожидает")]
    Pending,
    #[serde(rename = "Отменено")]
    Cancelled,
}

impl PayoutStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PayoutStatus::Paid => "Выплачено",
            PayoutStatus::Pending => "Ожидает",
            PayoutStatus::Cancelled => "Отменено",
        }
    }

    /// Only a pending request may be cancelled; nothing moves to Paid on the client.
    pub fn can_transition_to(&self, next: PayoutStatus) -> bool {
        matches!((self, next), (PayoutStatus::Pending, PayoutStatus::Cancelled))
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Запись истории выплат
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub date: String,
    pub amount: String,
    pub status: PayoutStatus,
}

impl FinanceEntry {
    pub fn is_pending(&self) -> bool {
        self.status == PayoutStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialized_as_label() {
        let entry = FinanceEntry {
            date: "05.03.2025".to_string(),
            amount: "20,000 ₸".to_string(),
            status: PayoutStatus::Pending,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "Ожидает");

        let back: FinanceEntry =
            serde_json::from_str(r#"{"date":"03.03.2025","amount":"15,000 ₸","status":"Отменено"}"#)
                .unwrap();
        assert_eq!(back.status, PayoutStatus::Cancelled);
    }

    #[test]
    fn test_transitions() {
        assert!(PayoutStatus::Pending.can_transition_to(PayoutStatus::Cancelled));
        assert!(!PayoutStatus::Cancelled.can_transition_to(PayoutStatus::Pending));
        assert!(!PayoutStatus::Pending.can_transition_to(PayoutStatus::Paid));
        assert!(!PayoutStatus::Paid.can_transition_to(PayoutStatus::Cancelled));
    }
}
