//! Run milestones
//!
//! Unlocks are checked against the stats of the live run and reported once.
//! The unlocked set survives restarts so collaborators can store it.

use serde::{Deserialize, Serialize};

use crate::sim::RunStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    FirstSteps,
    Century,
    HighFlyer,
    PowerHunter,
    Endurance,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstSteps,
        Achievement::Century,
        Achievement::HighFlyer,
        Achievement::PowerHunter,
        Achievement::Endurance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Achievement::FirstSteps => "First Steps",
            Achievement::Century => "Century",
            Achievement::HighFlyer => "High Flyer",
            Achievement::PowerHunter => "Power Hunter",
            Achievement::Endurance => "Endurance",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstSteps => "Make your first jump",
            Achievement::Century => "Reach a score of 100",
            Achievement::HighFlyer => "Reach a score of 500",
            Achievement::PowerHunter => "Collect 10 power-ups in one run",
            Achievement::Endurance => "Survive for 5 minutes",
        }
    }

    fn is_met(self, stats: &RunStats, score: u64) -> bool {
        match self {
            Achievement::FirstSteps => stats.jumps >= 1,
            Achievement::Century => score >= 100,
            Achievement::HighFlyer => score >= 500,
            Achievement::PowerHunter => stats.pickups_collected >= 10,
            Achievement::Endurance => stats.seconds_survived() >= 300,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Achievements {
    unlocked: Vec<Achievement>,
}

impl Achievements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    /// Unlocked achievements in unlock order
    pub fn unlocked(&self) -> &[Achievement] {
        &self.unlocked
    }

    /// Unlock everything the run now satisfies; returns only new unlocks
    pub fn check(&mut self, stats: &RunStats, score: u64) -> Vec<Achievement> {
        let mut fresh = Vec::new();
        for achievement in Achievement::ALL {
            if !self.is_unlocked(achievement) && achievement.is_met(stats, score) {
                log::info!("Achievement unlocked: {}", achievement.name());
                self.unlocked.push(achievement);
                fresh.push(achievement);
            }
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_at_start() {
        let mut achievements = Achievements::new();
        assert!(achievements.check(&RunStats::default(), 0).is_empty());
    }

    #[test]
    fn test_unlocks_once() {
        let mut achievements = Achievements::new();
        let stats = RunStats {
            jumps: 3,
            ..Default::default()
        };
        assert_eq!(
            achievements.check(&stats, 120),
            vec![Achievement::FirstSteps, Achievement::Century]
        );
        assert!(achievements.check(&stats, 120).is_empty());
        assert_eq!(
            achievements.check(&stats, 500),
            vec![Achievement::HighFlyer]
        );
    }

    #[test]
    fn test_pickups_and_time() {
        let mut achievements = Achievements::new();
        let stats = RunStats {
            jumps: 0,
            pickups_collected: 10,
            ticks_survived: 300 * 60,
        };
        let fresh = achievements.check(&stats, 0);
        assert_eq!(
            fresh,
            vec![Achievement::PowerHunter, Achievement::Endurance]
        );
    }

    #[test]
    fn test_endurance_threshold() {
        let mut achievements = Achievements::new();
        let stats = RunStats {
            ticks_survived: 300 * 60 - 1,
            ..Default::default()
        };
        achievements.check(&stats, 0);
        assert!(!achievements.is_unlocked(Achievement::Endurance));
    }

    #[test]
    fn test_serde_keeps_unlocks() {
        let mut achievements = Achievements::new();
        achievements.check(
            &RunStats {
                jumps: 1,
                ..Default::default()
            },
            0,
        );
        let json = serde_json::to_string(&achievements).unwrap();
        let loaded: Achievements = serde_json::from_str(&json).unwrap();
        assert!(loaded.is_unlocked(Achievement::FirstSteps));
        assert_eq!(loaded.unlocked().len(), 1);
    }
}
