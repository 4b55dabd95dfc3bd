// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Error Types

use crate::types::Currency;

/// Every user-facing failure of the café demo.
///
/// All variants abort the attempted operation with no partial state change;
/// the host surfaces the message and the session carries on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CafeError {
    #[error("not enough {currency}: requested {requested}, available {available}")]
    InsufficientBalance {
        currency: Currency,
        requested: f64,
        available: f64,
    },

    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("wallet not connected")]
    NotConnected,

    #[error("{subject} is already {state}")]
    AlreadyInState {
        subject: String,
        state: &'static str,
    },

    #[error("brew session already active")]
    AlreadyActive,

    #[error("quest {0} has not been completed yet")]
    QuestNotCompleted(u32),

    #[error("unknown quest {0}")]
    UnknownQuest(u32),

    #[error("nothing brewed yet")]
    NothingToCollect,

    #[error("invalid config: {0}")]
    Config(String),
}

impl CafeError {
    /// Text for the blocking notification shown to the visitor.
    pub fn user_message(&self) -> String {
        match self {
            CafeError::NotConnected => "Connect your wallet first.".to_string(),
            CafeError::InvalidAmount(_) => "Please enter an amount of LADY to spend.".to_string(),
            CafeError::InsufficientBalance { currency, .. } => {
                format!("Not enough {currency} in this demo balance.")
            }
            CafeError::NothingToCollect => "Nothing brewed yet — start your Brew first.".to_string(),
            CafeError::AlreadyActive => "Your Brew is already running.".to_string(),
            CafeError::QuestNotCompleted(_) => "Finish this quest before claiming it.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for CafeError {
    fn from(e: serde_json::Error) -> Self {
        CafeError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CafeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = CafeError::InsufficientBalance {
            currency: Currency::Lady,
            requested: 3.0,
            available: 2.5,
        };
        assert_eq!(err.to_string(), "not enough LADY: requested 3, available 2.5");

        let err = CafeError::AlreadyInState {
            subject: "quest 2".to_string(),
            state: "claimed",
        };
        assert_eq!(err.to_string(), "quest 2 is already claimed");
    }

    #[test]
    fn user_messages_match_the_page() {
        assert_eq!(CafeError::NotConnected.user_message(), "Connect your wallet first.");
        let err = CafeError::InsufficientBalance {
            currency: Currency::Lady,
            requested: 3.0,
            available: 2.5,
        };
        assert_eq!(err.user_message(), "Not enough LADY in this demo balance.");
        assert_eq!(CafeError::UnknownQuest(7).user_message(), "unknown quest 7");
    }
}
