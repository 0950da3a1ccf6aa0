//! Achievement checking logic
//!
//! Pure evaluation: given prospective totals and the keys a wallet already
//! holds, decide which catalog entries unlock now. Persisting unlocks and
//! crediting XP is the manager's job.

use std::collections::HashSet;

use super::definitions::{AchievementCatalog, AchievementDef, RequirementType};

/// Running totals an evaluation compares thresholds against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressTotals {
    pub lamports_recovered: u64,
    pub accounts_closed: u64,
    pub transactions: u64,
    pub referrals: u64,
}

impl ProgressTotals {
    /// Value of the metric a requirement type reads
    pub fn metric(&self, requirement: RequirementType) -> u64 {
        match requirement {
            RequirementType::SolRecovered => self.lamports_recovered,
            RequirementType::AccountsClosed => self.accounts_closed,
            RequirementType::Transactions => self.transactions,
            RequirementType::Referrals => self.referrals,
        }
    }
}

/// Achievements that qualify at `totals` and are not yet in `unlocked`.
///
/// Order follows the catalog: ascending requirement value, then key.
pub fn check_achievements<'a>(
    catalog: &'a AchievementCatalog,
    totals: &ProgressTotals,
    unlocked: &HashSet<String>,
) -> Vec<&'a AchievementDef> {
    catalog
        .iter_thresholds()
        .filter(|(a, _)| !unlocked.contains(&a.key))
        .filter(|(a, threshold)| totals.metric(a.requirement_type) >= *threshold)
        .map(|(a, _)| a)
        .collect()
}

/// XP granted by a batch of unlocks
pub fn xp_for(unlocks: &[&AchievementDef]) -> u64 {
    unlocks
        .iter()
        .fold(0u64, |acc, a| acc.saturating_add(a.xp_reward))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::achievements::definitions::achievement;
    use crate::stats::fees::LAMPORTS_PER_SOL;

    fn catalog() -> AchievementCatalog {
        AchievementCatalog::new(vec![
            achievement("first_reclaim", RequirementType::Transactions, 1.0, 25),
            achievement("pair_closer", RequirementType::AccountsClosed, 2.0, 50),
            achievement("tenth_sol", RequirementType::SolRecovered, 0.1, 30),
            achievement("one_sol", RequirementType::SolRecovered, 1.0, 100),
            achievement("first_friend", RequirementType::Referrals, 1.0, 40),
        ])
        .unwrap()
    }

    fn keys(unlocks: &[&AchievementDef]) -> Vec<String> {
        unlocks.iter().map(|a| a.key.clone()).collect()
    }

    #[test]
    fn test_batch_unlock_in_order() {
        let c = catalog();
        let totals = ProgressTotals {
            lamports_recovered: 150_000_000,
            accounts_closed: 2,
            transactions: 1,
            referrals: 0,
        };
        let unlocks = check_achievements(&c, &totals, &HashSet::new());
        assert_eq!(keys(&unlocks), vec!["tenth_sol", "first_reclaim", "pair_closer"]);
        assert_eq!(xp_for(&unlocks), 105);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let c = catalog();
        let totals = ProgressTotals {
            lamports_recovered: LAMPORTS_PER_SOL,
            ..Default::default()
        };
        let unlocks = check_achievements(&c, &totals, &HashSet::new());
        assert_eq!(keys(&unlocks), vec!["tenth_sol", "one_sol"]);
    }

    #[test]
    fn test_referrals_use_referral_count() {
        let c = catalog();
        let totals = ProgressTotals {
            referrals: 1,
            ..Default::default()
        };
        let unlocks = check_achievements(&c, &totals, &HashSet::new());
        assert_eq!(keys(&unlocks), vec!["first_friend"]);
    }

    #[test]
    fn test_second_pass_is_empty() {
        let c = catalog();
        let totals = ProgressTotals {
            lamports_recovered: 5 * LAMPORTS_PER_SOL,
            accounts_closed: 10,
            transactions: 3,
            referrals: 2,
        };
        let first = check_achievements(&c, &totals, &HashSet::new());
        assert_eq!(first.len(), 5);

        let unlocked: HashSet<String> = keys(&first).into_iter().collect();
        let second = check_achievements(&c, &totals, &unlocked);
        assert!(second.is_empty());
        assert_eq!(xp_for(&second), 0);
    }

    #[test]
    fn test_one_lamport_short_stays_locked() {
        let c = catalog();
        let totals = ProgressTotals {
            lamports_recovered: LAMPORTS_PER_SOL - 1,
            ..Default::default()
        };
        let unlocks = check_achievements(&c, &totals, &HashSet::new());
        assert_eq!(keys(&unlocks), vec!["tenth_sol"]);
    }

    #[test]
    fn test_nothing_below_thresholds() {
        let c = catalog();
        let unlocks = check_achievements(&c, &ProgressTotals::default(), &HashSet::new());
        assert!(unlocks.is_empty());
    }
}
