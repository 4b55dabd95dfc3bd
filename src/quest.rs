// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Quests

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::QuestSpec;
use crate::error::{CafeError, Result};
use crate::types::QuestState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRow {
    pub id: u32,
    pub title: String,
    pub reward: f64,
    pub state: QuestState,
}

impl QuestRow {
    pub fn new(spec: &QuestSpec) -> Self {
        Self {
            id: spec.id,
            title: spec.title.clone(),
            reward: spec.reward,
            state: QuestState::Idle,
        }
    }

    /// `Idle -> Completed`.
    pub fn start(&mut self) -> Result<()> {
        if self.state != QuestState::Idle {
            return Err(self.already(self.state));
        }
        self.state = QuestState::Completed;
        Ok(())
    }

    /// The reward a claim would pay right now, without claiming.
    pub fn claimable(&self) -> Result<f64> {
        match self.state {
            QuestState::Idle => Err(CafeError::QuestNotCompleted(self.id)),
            QuestState::Claimed => Err(self.already(QuestState::Claimed)),
            QuestState::Completed => Ok(self.reward),
        }
    }

    /// `Completed -> Claimed`, returning the reward to credit.
    pub fn claim(&mut self) -> Result<f64> {
        let reward = self.claimable()?;
        self.state = QuestState::Claimed;
        Ok(reward)
    }

    fn already(&self, state: QuestState) -> CafeError {
        CafeError::AlreadyInState {
            subject: format!("quest {}", self.id),
            state: state.label(),
        }
    }
}

/// The quest/tier grid: independent rows keyed by id, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestBoard {
    rows: Vec<QuestRow>,
}

impl QuestBoard {
    pub fn new(specs: &[QuestSpec]) -> Self {
        Self { rows: specs.iter().map(QuestRow::new).collect() }
    }

    pub fn rows(&self) -> &[QuestRow] {
        &self.rows
    }

    pub fn get(&self, id: u32) -> Option<&QuestRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn claimable(&self, id: u32) -> Result<f64> {
        self.get(id).ok_or(CafeError::UnknownQuest(id))?.claimable()
    }

    fn row_mut(&mut self, id: u32) -> Result<&mut QuestRow> {
        self.rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CafeError::UnknownQuest(id))
    }

    pub fn start(&mut self, id: u32) -> Result<()> {
        let row = self.row_mut(id)?;
        row.start().inspect_err(|e| warn!(quest = id, error = %e, "quest start rejected"))?;
        info!(quest = id, "quest completed");
        Ok(())
    }

    pub fn claim(&mut self, id: u32) -> Result<f64> {
        let row = self.row_mut(id)?;
        let reward = row
            .claim()
            .inspect_err(|e| warn!(quest = id, error = %e, "quest claim rejected"))?;
        info!(quest = id, reward, "quest claimed");
        Ok(reward)
    }

    pub fn claimed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.state.is_terminal()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> QuestBoard {
        QuestBoard::new(&[QuestSpec::new(1, "Sit down", 5.0), QuestSpec::new(2, "Order", 10.0)])
    }

    #[test]
    fn claim_before_start_is_rejected() {
        let mut b = board();
        assert_eq!(b.claim(1), Err(CafeError::QuestNotCompleted(1)));
        assert_eq!(b.get(1).unwrap().state, QuestState::Idle);
    }

    #[test]
    fn claimable_does_not_claim() {
        let mut b = board();
        assert_eq!(b.claimable(9), Err(CafeError::UnknownQuest(9)));
        b.start(1).unwrap();
        assert_eq!(b.claimable(1), Ok(5.0));
        assert_eq!(b.get(1).unwrap().state, QuestState::Completed);
    }

    #[test]
    fn claim_pays_exactly_once() {
        let mut b = board();
        b.start(2).unwrap();
        assert_eq!(b.claim(2), Ok(10.0));
        assert_eq!(
            b.claim(2),
            Err(CafeError::AlreadyInState { subject: "quest 2".into(), state: "claimed" })
        );
        assert_eq!(b.claimed_count(), 1);
    }

    #[test]
    fn start_is_one_way() {
        let mut b = board();
        b.start(1).unwrap();
        assert!(matches!(b.start(1), Err(CafeError::AlreadyInState { state: "completed", .. })));
        b.claim(1).unwrap();
        assert!(matches!(b.start(1), Err(CafeError::AlreadyInState { state: "claimed", .. })));
        assert_eq!(b.get(1).unwrap().state, QuestState::Claimed);
    }

    #[test]
    fn unknown_quest() {
        let mut b = board();
        assert_eq!(b.start(99), Err(CafeError::UnknownQuest(99)));
        assert_eq!(b.claim(99), Err(CafeError::UnknownQuest(99)));
    }
}
