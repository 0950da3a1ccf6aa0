//! Integration tests for recording recoveries against the default catalogs

mod common;

use std::collections::HashSet;
use std::thread;

use common::{tx, TestEnv, ALICE, BOB};
use sol_reclaim::config::Config;
use sol_reclaim::stats::achievements::{level_from_xp, AchievementDef, RequirementType};
use sol_reclaim::stats::ReclaimError;

#[test]
fn test_first_recovery_with_default_catalog() {
    let env = TestEnv::new();
    let outcome = env
        .manager
        .progression()
        .record_transaction(ALICE, &tx("sig-1", 2, 0.15))
        .unwrap();

    // first_reclaim (50) + pocket_change (75)
    let keys: HashSet<&str> = outcome
        .new_unlocks
        .iter()
        .map(|u| u.achievement.key.as_str())
        .collect();
    assert_eq!(keys, HashSet::from(["first_reclaim", "pocket_change"]));
    assert_eq!(outcome.xp_gained, 125);
    assert_eq!(outcome.stats.current_level, 2);
    assert!(outcome.leveled_up());
    assert_eq!(outcome.tier.name, "Bronze");
    assert!(!outcome.tier_changed);
}

#[test]
fn test_climb_to_silver() {
    let env = TestEnv::new();
    let progression = env.manager.progression();

    let outcomes: Vec<_> = (1..=10)
        .map(|i| {
            progression
                .record_transaction(ALICE, &tx(&format!("sig-{i}"), 12, 0.6))
                .unwrap()
        })
        .collect();

    // 9th recovery: janitor pushes XP to 875 (level 5) with 5.4 SOL recovered
    assert_eq!(outcomes[7].tier.name, "Bronze");
    assert_eq!(outcomes[8].stats.current_xp, 875);
    assert_eq!(outcomes[8].stats.current_level, 5);
    assert_eq!(outcomes[8].tier.name, "Silver");
    assert!(outcomes[8].tier_changed);
    assert!(!outcomes[9].tier_changed);

    let last = &outcomes[9].stats;
    assert_eq!(last.current_xp, 1025);
    assert_eq!(last.total_transactions, 10);
    assert_eq!(last.total_accounts_closed, 120);

    // Fees are charged at the tier held before each transaction
    let history = env.manager.query().history(ALICE, 10).unwrap();
    let fee_of = |sig: &str| {
        history
            .iter()
            .find(|r| r.signature == sig)
            .map(|r| r.fee_percent)
            .unwrap()
    };
    assert_eq!(fee_of("sig-9"), 5.0);
    assert_eq!(fee_of("sig-10"), 4.5);

    let quote = progression.quote(ALICE, 1.0).unwrap();
    assert_eq!(quote.tier.name, "Silver");
    assert_eq!(quote.quote.fee_lamports, 45_000_000);
    assert_eq!(quote.quote.net_lamports, 955_000_000);
}

#[test]
fn test_ten_tenths_of_sol_unlock_sol_collector() {
    let env = TestEnv::new();
    let progression = env.manager.progression();

    let outcomes: Vec<_> = (1..=10)
        .map(|i| {
            progression
                .record_transaction(ALICE, &tx(&format!("tenth-{i}"), 1, 0.1))
                .unwrap()
        })
        .collect();

    let unlocked_on = |key: &str| {
        outcomes
            .iter()
            .position(|o| o.new_unlocks.iter().any(|u| u.achievement.key == key))
    };
    assert_eq!(unlocked_on("pocket_change"), Some(0));
    assert_eq!(unlocked_on("sol_collector"), Some(9));

    let stats = &outcomes[9].stats;
    assert_eq!(stats.total_lamports_recovered, 1_000_000_000);
    assert_eq!(stats.total_sol(), 1.0);

    let history = env.manager.query().history(ALICE, 10).unwrap();
    assert!(history.iter().all(|r| r.lamports_recovered == 100_000_000));
}

#[test]
fn test_high_level_without_sol_stays_bronze() {
    let mut config = Config::with_defaults();
    config.achievement.push(AchievementDef {
        key: "jackpot".to_string(),
        name: "Jackpot".to_string(),
        description: "Huge XP for one transaction".to_string(),
        icon: String::new(),
        requirement_type: RequirementType::Transactions,
        requirement_value: 1.0,
        xp_reward: 100_000,
    });
    let env = TestEnv::with_config(config);

    let outcome = env
        .manager
        .progression()
        .record_transaction(ALICE, &tx("sig-1", 1, 0.01))
        .unwrap();
    assert!(outcome.stats.current_level >= 16);
    assert_eq!(outcome.tier.name, "Bronze");

    let profile = env.manager.query().profile(ALICE).unwrap().unwrap();
    assert_eq!(profile.tier_index, 0);
    assert_eq!(profile.next_tier.unwrap().name, "Silver");
}

#[test]
fn test_state_survives_reopen() {
    let env = TestEnv::new();
    env.manager
        .progression()
        .record_transaction(ALICE, &tx("sig-1", 3, 0.2))
        .unwrap();
    let before = env.manager.progression().get_user(ALICE).unwrap().unwrap();

    let reopened = env.reopen(&env.config);
    let after = reopened.progression().get_user(ALICE).unwrap().unwrap();
    assert_eq!(before, after);

    let err = reopened
        .progression()
        .record_transaction(ALICE, &tx("sig-1", 3, 0.2))
        .unwrap_err();
    assert!(matches!(err, ReclaimError::DuplicateTransaction(_)));
}

#[test]
fn test_concurrent_recoveries_apply_exactly_once() {
    let env = TestEnv::new();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let progression = env.manager.progression();
            thread::spawn(move || {
                for i in 0..5 {
                    progression
                        .record_transaction(ALICE, &tx(&format!("sig-{t}-{i}"), 1, 0.05))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let stats = env.manager.progression().get_user(ALICE).unwrap().unwrap();
    assert_eq!(stats.total_transactions, 40);
    assert_eq!(stats.total_accounts_closed, 40);

    let unlocked = env.manager.query().unlocked(ALICE).unwrap();
    let keys: HashSet<_> = unlocked.iter().map(|u| u.achievement.key.clone()).collect();
    assert_eq!(keys.len(), unlocked.len());

    let xp: u64 = unlocked.iter().map(|u| u.achievement.xp_reward).sum();
    assert_eq!(stats.current_xp, xp);
    assert_eq!(stats.current_level, level_from_xp(xp));
}

#[test]
fn test_wallets_are_independent() {
    let env = TestEnv::new();
    let progression = env.manager.progression();
    progression.record_transaction(ALICE, &tx("a-1", 5, 1.5)).unwrap();
    progression.record_transaction(BOB, &tx("b-1", 1, 0.001)).unwrap();

    let bob = progression.get_user(BOB).unwrap().unwrap();
    assert_eq!(bob.total_transactions, 1);
    assert_eq!(bob.current_xp, 50);

    let board = env.manager.query().leaderboard(5).unwrap();
    assert_eq!(board[0].wallet_address, ALICE);
    assert_eq!(board[1].wallet_address, BOB);
}
