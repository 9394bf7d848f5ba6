//! Keyword-based advisor: maps a free-text question to a canned answer.
//!
//! Rules are checked in table order against the lower-cased message; the
//! first keyword hit wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Emi,
    RentVsBuy,
    Prepayment,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorReply {
    pub intent: Intent,
    pub response: String,
}

const RULES: &[(&[&str], Intent)] = &[
    (&["emi"], Intent::Emi),
    (&["rent", "buy"], Intent::RentVsBuy),
    (&["prepayment"], Intent::Prepayment),
];

impl Intent {
    pub fn response(self) -> &'static str {
        match self {
            Intent::Emi => {
                "EMI is your Equated Monthly Installment. It covers both principal and interest repayments."
            }
            Intent::RentVsBuy => {
                "Buying is often better if you plan to stay long-term and property value grows faster than rent costs."
            }
            Intent::Prepayment => {
                "Prepayments target your principal directly, saving massive amounts in long-term interest."
            }
            Intent::Unknown => {
                "I'm not sure about that. Try asking about EMI, renting, or prepayment!"
            }
        }
    }
}

/// Classify a question and return the canned reply for it.
pub fn classify_intent(text: &str) -> AdvisorReply {
    let query = text.to_lowercase();
    let intent = RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| query.contains(*k)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Unknown);

    AdvisorReply {
        intent,
        response: intent.response().to_string(),
    }
}
