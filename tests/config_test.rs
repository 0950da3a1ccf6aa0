//! Tests for configuration loading and catalog persistence

mod common;

use common::{tx, TestEnv, ALICE};
use sol_reclaim::config::Config;
use tempfile::TempDir;

#[test]
fn test_custom_config_file_drives_manager() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[settings]
referral_code_length = 6

[[tier]]
name = "Standard"
min_level = 1
min_sol = 0.0
fee_percent = 2.0

[[tier]]
name = "Pro"
min_level = 1
min_sol = 0.5
fee_percent = 1.0
"#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();
    // Built-in achievements are merged and written back; user tiers are kept
    assert_eq!(config.tier.len(), 2);
    assert!(!config.achievement.is_empty());
    let saved = std::fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("first_reclaim"));

    let env = TestEnv::with_config(config);
    let code = env.manager.referrals().referral_code(ALICE).unwrap();
    assert_eq!(code.len(), 6);

    let outcome = env
        .manager
        .progression()
        .record_transaction(ALICE, &tx("sig-1", 1, 0.75))
        .unwrap();
    assert_eq!(outcome.tier.name, "Pro");
    assert!(outcome.tier_changed);

    let history = env.manager.query().history(ALICE, 1).unwrap();
    assert_eq!(history[0].fee_percent, 2.0);
}

#[test]
fn test_stored_achievement_definition_wins() {
    let env = TestEnv::new();

    let mut edited = env.config.clone();
    let first = edited
        .achievement
        .iter_mut()
        .find(|a| a.key == "first_reclaim")
        .unwrap();
    first.xp_reward = 5_000;

    let reopened = env.reopen(&edited);
    let effective = reopened
        .catalogs()
        .achievements
        .get("first_reclaim")
        .unwrap();
    assert_eq!(effective.xp_reward, 50);

    let outcome = reopened
        .progression()
        .record_transaction(ALICE, &tx("sig-1", 1, 0.001))
        .unwrap();
    assert_eq!(outcome.xp_gained, 50);
}

#[test]
fn test_invalid_tier_config_is_rejected() {
    let mut config = Config::with_defaults();
    config.tier[2].fee_percent = 150.0;
    assert!(config.catalogs().is_err());

    let dir = TempDir::new().unwrap();
    let result =
        sol_reclaim::stats::ReclaimManager::with_path(&dir.path().join("reclaim.db"), &config);
    assert!(result.is_err());
}
