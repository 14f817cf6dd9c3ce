use std::io::Write;

use road_dodger::compute::init_state;
use road_dodger::config::*;

#[test]
fn defaults_are_valid() {
    let c = Config::new();
    assert!(c.validate().is_ok());
    assert_eq!(c.width, 400.0);
    assert_eq!(c.height, 600.0);
    assert_eq!(c.road_width, 200.0);
    assert_eq!(c.player_y(), 530.0);
}

#[test]
fn toml_overrides_only_listed_fields() {
    let c = Config::from_toml_str("road_width = 240.0\ncoin_reward = 25\n").unwrap();
    assert_eq!(c.road_width, 240.0);
    assert_eq!(c.coin_reward, 25);
    assert_eq!(c.width, Params::WIDTH);
    assert_eq!(c.obstacle_chance, Params::OBSTACLE_CHANCE);
}

#[test]
fn empty_toml_gives_defaults() {
    assert_eq!(Config::from_toml_str("").unwrap(), Config::new());
}

#[test]
fn unknown_key_is_rejected() {
    let err = Config::from_toml_str("lanes = 4\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn road_as_wide_as_playfield_is_rejected() {
    let c = Config {
        road_width: 400.0,
        ..Config::new()
    };
    assert!(matches!(
        c.validate(),
        Err(ConfigError::RoadTooWide { .. })
    ));
    assert!(init_state(c).is_err());
}

#[test]
fn non_positive_speed_is_rejected() {
    let c = Config {
        obstacle_speed: 0.0,
        ..Config::new()
    };
    match c.validate() {
        Err(ConfigError::NonPositive { field, .. }) => assert_eq!(field, "obstacle_speed"),
        other => panic!("expected NonPositive, got {:?}", other),
    }
}

#[test]
fn nan_dimension_is_rejected() {
    let c = Config {
        height: f32::NAN,
        ..Config::new()
    };
    assert!(matches!(c.validate(), Err(ConfigError::NonPositive { .. })));
}

#[test]
fn car_wider_than_lane_is_rejected() {
    let c = Config {
        player_width: 80.0, // lane is 200 / 3 ≈ 66.7
        ..Config::new()
    };
    match c.validate() {
        Err(ConfigError::EntityTooWide { entity, .. }) => assert_eq!(entity, "player"),
        other => panic!("expected EntityTooWide, got {:?}", other),
    }
}

#[test]
fn chance_above_one_is_rejected() {
    let c = Config {
        tree_chance: 1.5,
        ..Config::new()
    };
    assert!(matches!(
        c.validate(),
        Err(ConfigError::ChanceOutOfRange { field: "tree_chance", .. })
    ));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "width = 500.0").unwrap();
    writeln!(file, "road_width = 260.0").unwrap();

    let c = Config::load(file.path()).unwrap();
    assert_eq!(c.width, 500.0);
    assert_eq!(c.road_width, 260.0);
    assert_eq!(c.shoulder_width(), 120.0);
}

#[test]
fn load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn zero_coin_reward_is_rejected() {
    let c = Config::from_toml_str("coin_reward = 0").unwrap();
    assert!(matches!(
        c.validate(),
        Err(ConfigError::RewardOutOfRange { value: 0, .. })
    ));
}

#[test]
fn huge_coin_reward_is_rejected() {
    let c = Config::from_toml_str("coin_reward = 4000000000").unwrap();
    assert!(matches!(
        c.validate(),
        Err(ConfigError::RewardOutOfRange { .. })
    ));
    assert!(init_state(c).is_err());

    let at_cap = Config {
        coin_reward: Params::MAX_COIN_REWARD,
        ..Config::new()
    };
    assert!(at_cap.validate().is_ok());
}

#[test]
fn trees_faster_than_traffic_are_rejected() {
    let c = Config::from_toml_str("tree_speed = 9.0").unwrap();
    assert!(matches!(
        c.validate(),
        Err(ConfigError::SceneryTooFast { .. })
    ));

    // Equal speed loses the depth cue too
    let level = Config {
        tree_speed: 4.0,
        ..Config::new()
    };
    assert!(matches!(
        level.validate(),
        Err(ConfigError::SceneryTooFast { .. })
    ));

    // Slower coins also count
    let slow_coins = Config {
        coin_speed: 2.0,
        ..Config::new()
    };
    assert!(matches!(
        slow_coins.validate(),
        Err(ConfigError::SceneryTooFast { .. })
    ));
}

#[test]
fn car_below_the_bottom_edge_is_rejected() {
    for margin in [-10.0, 0.0, 49.0, 601.0] {
        let c = Config {
            player_bottom_margin: margin,
            ..Config::new()
        };
        assert!(
            matches!(c.validate(), Err(ConfigError::PlayerOffField { .. })),
            "margin {} accepted",
            margin
        );
    }

    // Car flush with the bottom edge still fits
    let flush = Config {
        player_bottom_margin: 50.0,
        ..Config::new()
    };
    assert!(flush.validate().is_ok());
}

#[test]
fn non_finite_spawn_height_reports_finite_requirement() {
    let c = Config {
        spawn_y: f32::INFINITY,
        ..Config::new()
    };
    let err = c.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NonFinite { field: "spawn_y", .. }));
    assert!(!err.to_string().contains("positive"));
}
