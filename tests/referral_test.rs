//! Integration tests for referral codes

mod common;

use std::thread;

use common::{tx, TestEnv, ALICE, BOB, CAROL, DAVE};
use sol_reclaim::stats::{ReclaimError, ReferralOutcome};

#[test]
fn test_apply_referral_links_and_credits() {
    let env = TestEnv::new();
    let referrals = env.manager.referrals();

    let code = referrals.referral_code(ALICE).unwrap();
    assert_eq!(code.len(), env.config.settings.referral_code_length);
    // Stable across calls
    assert_eq!(referrals.referral_code(ALICE).unwrap(), code);

    referrals.apply_referral(BOB, &code).unwrap();

    let progression = env.manager.progression();
    let alice = progression.get_user(ALICE).unwrap().unwrap();
    let bob = progression.get_user(BOB).unwrap().unwrap();
    assert_eq!(alice.referral_count, 1);
    assert_eq!(bob.referred_by.as_deref(), Some(code.as_str()));
    assert_eq!(bob.referral_count, 0);
}

#[test]
fn test_self_referral_rejected() {
    let env = TestEnv::new();
    let referrals = env.manager.referrals();
    let code = referrals.referral_code(ALICE).unwrap();

    let err = referrals.apply_referral(ALICE, &code).unwrap_err();
    assert!(matches!(err, ReclaimError::SelfReferral));

    let alice = env.manager.progression().get_user(ALICE).unwrap().unwrap();
    assert_eq!(alice.referral_count, 0);
    assert!(alice.referred_by.is_none());
}

#[test]
fn test_second_referral_rejected() {
    let env = TestEnv::new();
    let referrals = env.manager.referrals();
    let alice_code = referrals.referral_code(ALICE).unwrap();
    let carol_code = referrals.referral_code(CAROL).unwrap();

    referrals.apply_referral(BOB, &alice_code).unwrap();
    let err = referrals.apply_referral(BOB, &carol_code).unwrap_err();
    assert!(matches!(err, ReclaimError::AlreadyReferred(_)));

    let progression = env.manager.progression();
    assert_eq!(progression.get_user(CAROL).unwrap().unwrap().referral_count, 0);
    assert_eq!(progression.get_user(ALICE).unwrap().unwrap().referral_count, 1);
    assert_eq!(
        progression.get_user(BOB).unwrap().unwrap().referred_by,
        Some(alice_code)
    );
}

#[test]
fn test_unknown_code_leaves_no_trace() {
    let env = TestEnv::new();
    let err = env
        .manager
        .referrals()
        .apply_referral(BOB, "NOSUCHCD")
        .unwrap_err();
    assert!(matches!(err, ReclaimError::InvalidReferralCode(_)));
    assert!(err.is_rejection());

    // The caller's row is created inside the rejected transaction and rolled back
    assert!(env.manager.progression().get_user(BOB).unwrap().is_none());
}

#[test]
fn test_code_is_case_insensitive() {
    let env = TestEnv::new();
    let referrals = env.manager.referrals();
    let code = referrals.referral_code(ALICE).unwrap();

    referrals
        .apply_referral(BOB, &format!("  {}  ", code.to_lowercase()))
        .unwrap();
    assert_eq!(
        env.manager.progression().get_user(ALICE).unwrap().unwrap().referral_count,
        1
    );
}

#[test]
fn test_referral_outcome_shape() {
    let env = TestEnv::new();
    let referrals = env.manager.referrals();
    let code = referrals.referral_code(ALICE).unwrap();

    let ok = ReferralOutcome::from_result(&referrals.apply_referral(BOB, &code));
    assert_eq!(
        serde_json::to_value(&ok).unwrap(),
        serde_json::json!({ "success": true })
    );

    let rejected = ReferralOutcome::from_result(&referrals.apply_referral(ALICE, &code));
    assert!(!rejected.success);
    assert!(rejected.error.is_some());
}

#[test]
fn test_referral_achievement_unlocks_on_next_recovery() {
    let env = TestEnv::new();
    let code = env.manager.referrals().referral_code(ALICE).unwrap();
    env.manager.referrals().apply_referral(BOB, &code).unwrap();

    let outcome = env
        .manager
        .progression()
        .record_transaction(ALICE, &tx("sig-1", 1, 0.002))
        .unwrap();
    assert!(outcome
        .new_unlocks
        .iter()
        .any(|u| u.achievement.key == "friendly"));
}

#[test]
fn test_concurrent_referrals_all_counted() {
    let env = TestEnv::new();
    let code = env.manager.referrals().referral_code(ALICE).unwrap();

    let handles: Vec<_> = [BOB, CAROL, DAVE]
        .into_iter()
        .map(|wallet| {
            let referrals = env.manager.referrals();
            let code = code.clone();
            thread::spawn(move || referrals.apply_referral(wallet, &code))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    let alice = env.manager.progression().get_user(ALICE).unwrap().unwrap();
    assert_eq!(alice.referral_count, 3);
}
