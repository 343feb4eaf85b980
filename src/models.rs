use serde::{Deserialize, Serialize};

/// Direction of a transaction as suggested by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// One parsed transaction candidate from the preview endpoint.
/// Field names follow the wire contract of `POST /api/upload/preview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub suggested_category: String,
    pub suggested_type: TxnType,
    pub confidence: f64,
    pub needs_review: bool,
    pub account: String,
}

/// Body of a successful preview response.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewResponse {
    pub preview: Vec<PreviewRow>,
    pub total_count: usize,
    pub needs_review_count: usize,
}

/// Display tier for a server confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.7 {
            Self::High
        } else if confidence >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// The ordered set of preview rows from one preview call, owned by the
/// workflow for the duration of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    rows: Vec<PreviewRow>,
}

impl Batch {
    pub fn new(rows: Vec<PreviewRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[PreviewRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PreviewRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut PreviewRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    pub fn needs_review_count(&self) -> usize {
        self.rows.iter().filter(|r| r.needs_review).count()
    }

    /// Rows whose category is no longer valid for their current type,
    /// e.g. after the type was flipped without re-selecting a category.
    pub fn rows_with_invalid_category(&self) -> Vec<&PreviewRow> {
        self.rows
            .iter()
            .filter(|r| !crate::categories::is_valid_for(&r.suggested_category, r.suggested_type))
            .collect()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txn_type_wire_format() {
        assert_eq!(serde_json::to_string(&TxnType::Income).unwrap(), "\"income\"");
        assert_eq!(serde_json::to_string(&TxnType::Expense).unwrap(), "\"expense\"");
        let t: TxnType = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(t, TxnType::Expense);
    }

    #[test]
    fn test_txn_type_parse() {
        assert_eq!(TxnType::parse("Income"), Some(TxnType::Income));
        assert_eq!(TxnType::parse(" expense "), Some(TxnType::Expense));
        assert_eq!(TxnType::parse("transfer"), None);
    }

    #[test]
    fn test_preview_row_wire_format() {
        let json = r#"{
            "id": "r1",
            "date": "2025-01-15",
            "description": "STARBUCKS #1234",
            "amount": -6.50,
            "suggested_category": "Food & Dining",
            "suggested_type": "expense",
            "confidence": 0.85,
            "needs_review": false,
            "account": "Checking"
        }"#;
        let row: PreviewRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.id, "r1");
        assert_eq!(row.suggested_type, TxnType::Expense);
        assert_eq!(row.amount, -6.5);
        assert!(!row.needs_review);
    }

    #[test]
    fn test_preview_response_wire_format() {
        let json = r#"{"preview": [], "total_count": 0, "needs_review_count": 0}"#;
        let resp: PreviewResponse = serde_json::from_str(json).unwrap();
        assert!(resp.preview.is_empty());
        assert_eq!(resp.total_count, 0);
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::from_score(0.95), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.7), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.69), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.4), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.39), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.0), ConfidenceTier::Low);
    }

    fn row(id: &str, needs_review: bool) -> PreviewRow {
        PreviewRow {
            id: id.to_string(),
            date: "2025-01-15".to_string(),
            description: "TEST".to_string(),
            amount: -10.0,
            suggested_category: "Groceries".to_string(),
            suggested_type: TxnType::Expense,
            confidence: 0.8,
            needs_review,
            account: "Checking".to_string(),
        }
    }

    #[test]
    fn test_batch_lookup_and_counts() {
        let mut batch = Batch::new(vec![row("a", false), row("b", true), row("c", true)]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.needs_review_count(), 2);
        assert!(batch.get("b").is_some());
        assert!(batch.get("z").is_none());
        batch.get_mut("a").unwrap().needs_review = true;
        assert_eq!(batch.needs_review_count(), 3);
    }

    #[test]
    fn test_batch_flags_category_invalid_for_type() {
        let mut batch = Batch::new(vec![row("a", false)]);
        assert!(batch.rows_with_invalid_category().is_empty());
        // "Groceries" is not an income category
        batch.get_mut("a").unwrap().suggested_type = TxnType::Income;
        let stale = batch.rows_with_invalid_category();
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].id, "a");
    }
}
