mod support;

use bevy_math::Vec3;
use spotlight_common::{
    AlertState, DifficultyTier, EventKind, LocomotionMode, Occluder, OccluderSet, PursuitEngine, SpotlightConfig,
    constants::{SPOTLIGHT_ALERT_COLOR, SPOTLIGHT_NORMAL_COLOR},
    difficulty,
};
use support::{TestPlayer, count, record_events};

const DT: f32 = 0.125;

// Light parked over the origin: a single waypoint at its own start.
fn parked_engine() -> PursuitEngine {
    PursuitEngine::new(SpotlightConfig {
        patrol_points: vec![[0.0, 0.0]],
        ..SpotlightConfig::default()
    })
}

fn tick_n(engine: &mut PursuitEngine, player: &mut TestPlayer, occluders: &OccluderSet, ticks: usize) {
    for _ in 0..ticks {
        let _ = engine.tick(DT, player, occluders);
    }
}

#[test]
fn player_flag_is_pushed_every_tick() {
    let mut engine = parked_engine();
    let mut player = TestPlayer::at(20.0, 0.0, 20.0);
    let occluders = OccluderSet::default();

    tick_n(&mut engine, &mut player, &occluders, 5);
    assert_eq!(player.pushes, 5);
    assert!(!player.illuminated);

    player.position = Vec3::ZERO;
    let report = engine.tick(DT, &mut player, &occluders);
    assert!(player.illuminated);
    assert_eq!(report.state, AlertState::Detecting);
    assert!(report.detection.is_some_and(|d| d.visible));
}

#[test]
fn detected_event_fires_once_and_switches_to_chase() {
    let mut engine = parked_engine();
    let log = record_events(&mut engine);
    let mut player = TestPlayer::at(0.0, 0.0, 0.0);
    let occluders = OccluderSet::default();

    tick_n(&mut engine, &mut player, &occluders, 3);
    assert_eq!(count(&log, EventKind::PlayerDetected), 0);
    assert_eq!(engine.locomotion_mode(), LocomotionMode::Patrol);
    assert_eq!(engine.light_color(), SPOTLIGHT_NORMAL_COLOR);

    let report = engine.tick(DT, &mut player, &occluders);
    assert_eq!(report.events, 1);
    assert_eq!(count(&log, EventKind::PlayerDetected), 1);
    assert_eq!(engine.alert_state(), AlertState::Alerted);
    assert_eq!(engine.locomotion_mode(), LocomotionMode::Chase);
    assert_eq!(engine.light_color(), SPOTLIGHT_ALERT_COLOR);

    tick_n(&mut engine, &mut player, &occluders, 4);
    assert_eq!(count(&log, EventKind::PlayerDetected), 1);
}

#[test]
fn capture_fires_once_until_reset() {
    let mut engine = parked_engine();
    let log = record_events(&mut engine);
    let mut player = TestPlayer::at(0.0, 0.0, 0.0);
    let occluders = OccluderSet::default();

    tick_n(&mut engine, &mut player, &occluders, 24);
    assert_eq!(count(&log, EventKind::PlayerCaptured), 1);
    assert!(engine.is_captured());

    tick_n(&mut engine, &mut player, &occluders, 40);
    assert_eq!(count(&log, EventKind::PlayerCaptured), 1);
    // Detection keeps running after capture
    assert!(player.illuminated);

    engine.reset();
    tick_n(&mut engine, &mut player, &occluders, 24);
    assert_eq!(count(&log, EventKind::PlayerCaptured), 2);
}

#[test]
fn hiding_behind_cover_lets_the_player_escape() {
    let mut engine = parked_engine();
    let log = record_events(&mut engine);
    let mut player = TestPlayer::at(0.0, 0.0, 0.0);
    let mut occluders = OccluderSet::default();

    tick_n(&mut engine, &mut player, &occluders, 4);
    assert_eq!(engine.alert_state(), AlertState::Alerted);

    occluders.push(Occluder::new([0.0, 2.5, 0.0], [2.0, 0.5, 2.0]));
    tick_n(&mut engine, &mut player, &occluders, 39);
    assert_eq!(engine.alert_state(), AlertState::Escaping);
    assert!(!player.illuminated);

    let _ = engine.tick(DT, &mut player, &occluders);
    assert_eq!(engine.alert_state(), AlertState::Idle);
    assert_eq!(count(&log, EventKind::PlayerEscaped), 1);
    assert_eq!(engine.locomotion_mode(), LocomotionMode::Patrol);
    assert_eq!(engine.light_color(), SPOTLIGHT_NORMAL_COLOR);
}

#[test]
fn difficulty_is_idempotent() {
    let mut engine = PursuitEngine::default();

    assert!(engine.set_difficulty(1));
    let agent_once = engine.agent().clone();
    let overrides_once = engine.overrides();

    assert!(!engine.set_difficulty(1));
    assert_eq!(engine.agent(), &agent_once);
    assert_eq!(engine.overrides(), overrides_once);
    assert!((engine.agent().patrol_speed - engine.agent().base_patrol_speed() * 1.5).abs() < 1e-6);
}

#[test]
fn difficulty_rows_do_not_depend_on_history() {
    let mut stepped = PursuitEngine::default();
    for tier in 0..=2 {
        let _ = stepped.set_difficulty(tier);
    }

    let mut jumped = PursuitEngine::default();
    let _ = jumped.set_difficulty(2);

    assert_eq!(stepped.agent(), jumped.agent());
    assert_eq!(stepped.overrides(), difficulty::apply(DifficultyTier(2)));
}

#[test]
fn top_tier_forces_chase_while_idle() {
    let mut engine = PursuitEngine::default();
    let mut player = TestPlayer::at(15.0, 0.0, 15.0);
    let occluders = OccluderSet::default();

    assert!(engine.set_difficulty(3));
    assert_eq!(engine.alert_state(), AlertState::Idle);
    assert_eq!(engine.locomotion_mode(), LocomotionMode::Chase);
    // Forced chase does not raise the alert colour
    assert_eq!(engine.light_color(), SPOTLIGHT_NORMAL_COLOR);

    let before = engine.agent().position.distance(Vec3::new(15.0, 5.0, 15.0));
    tick_n(&mut engine, &mut player, &occluders, 16);
    let after = engine.agent().position.distance(Vec3::new(15.0, 5.0, 15.0));
    assert!(after < before, "forced chase should close in on the player");
}

#[test]
fn unknown_tiers_clamp_to_the_last_row() {
    let mut engine = PursuitEngine::default();
    assert!(engine.set_difficulty(99));
    assert_eq!(engine.difficulty(), DifficultyTier::MAX);
    assert!(!engine.set_difficulty(3));
    assert!(engine.overrides().force_chase);
}

#[test]
fn forced_chase_survives_an_escape() {
    let mut engine = parked_engine();
    let mut player = TestPlayer::at(0.0, 0.0, 0.0);
    let mut occluders = OccluderSet::default();
    let _ = engine.set_difficulty(3);

    tick_n(&mut engine, &mut player, &occluders, 4);
    assert_eq!(engine.alert_state(), AlertState::Alerted);

    occluders.push(Occluder::new([0.0, 2.5, 0.0], [40.0, 0.5, 40.0]));
    tick_n(&mut engine, &mut player, &occluders, 40);
    assert_eq!(engine.alert_state(), AlertState::Idle);
    assert_eq!(engine.locomotion_mode(), LocomotionMode::Chase);
}

#[test]
fn wider_cone_reaches_further() {
    let mut engine = parked_engine();
    let occluders = OccluderSet::default();
    // Just outside the base cone, inside the 1.5x cone
    let base = engine.agent().cone_half_angle;
    let offset = engine.agent().mount_height() * (base * 1.2).tan();
    let mut player = TestPlayer::at(offset, 0.0, 0.0);

    let _ = engine.tick(0.0, &mut player, &occluders);
    assert!(!player.illuminated);

    let _ = engine.set_difficulty(2);
    let _ = engine.tick(0.0, &mut player, &occluders);
    assert!(player.illuminated);
}

#[test]
fn reset_restores_the_session_start() {
    let mut engine = PursuitEngine::default();
    let mut player = TestPlayer::at(0.0, 0.0, 0.0);
    let occluders = OccluderSet::default();

    let _ = engine.set_difficulty(2);
    tick_n(&mut engine, &mut player, &occluders, 12);
    assert_ne!(engine.alert_state(), AlertState::Idle);

    engine.reset();
    assert_eq!(engine.alert_state(), AlertState::Idle);
    assert_eq!(engine.difficulty(), DifficultyTier::BASELINE);
    assert_eq!(engine.route().index(), 0);
    assert_eq!(engine.agent().position, engine.config().start_position());
    assert_eq!(engine.agent().velocity, Vec3::ZERO);
    assert!(engine.detection_progress().abs() < f32::EPSILON);
    assert!(engine.alert().detection_timer().abs() < f32::EPSILON);
    assert!(engine.alert().escape_timer().abs() < f32::EPSILON);
    assert!((engine.agent().cone_half_angle - engine.agent().base_cone_half_angle()).abs() < f32::EPSILON);
}

#[test]
fn inactive_engine_holds_still_and_reports_dark() {
    let mut engine = PursuitEngine::default();
    let mut player = TestPlayer::at(0.0, 0.0, 0.0);
    let occluders = OccluderSet::default();

    engine.deactivate();
    let start = engine.agent().position;
    tick_n(&mut engine, &mut player, &occluders, 10);
    assert_eq!(engine.agent().position, start);
    assert!(!player.illuminated);
    assert_eq!(player.pushes, 10);
    assert_eq!(engine.alert_state(), AlertState::Idle);

    engine.activate();
    let _ = engine.tick(DT, &mut player, &occluders);
    assert!(player.illuminated);
}

#[test]
fn zero_delta_leaves_position_and_timers_unchanged() {
    let mut engine = PursuitEngine::default();
    let mut player = TestPlayer::at(0.5, 0.0, 0.0);
    let occluders = OccluderSet::default();

    tick_n(&mut engine, &mut player, &occluders, 3);
    let position = engine.agent().position;
    let detection = engine.alert().detection_timer();
    let escape = engine.alert().escape_timer();

    let _ = engine.tick(0.0, &mut player, &occluders);
    assert_eq!(engine.agent().position, position);
    assert!((engine.alert().detection_timer() - detection).abs() < f32::EPSILON);
    assert!((engine.alert().escape_timer() - escape).abs() < f32::EPSILON);
}

#[test]
fn invalid_deltas_count_as_zero() {
    let mut engine = PursuitEngine::default();
    let mut player = TestPlayer::at(0.0, 0.0, 0.0);
    let occluders = OccluderSet::default();

    for dt in [f32::NAN, f32::INFINITY, -1.0] {
        let _ = engine.tick(dt, &mut player, &occluders);
        assert!(engine.agent().position.is_finite());
        assert!(engine.alert().detection_timer().abs() < f32::EPSILON);
    }
}

#[test]
fn huge_delta_stays_finite() {
    let mut engine = PursuitEngine::default();
    let mut player = TestPlayer::at(3.0, 0.0, 3.0);
    let occluders = OccluderSet::default();

    for _ in 0..5 {
        let _ = engine.tick(1.0e4, &mut player, &occluders);
        let agent = engine.agent();
        assert!(agent.position.is_finite(), "position diverged: {:?}", agent.position);
        assert!(agent.velocity.is_finite());
        assert!(engine.alert().detection_timer().is_finite() && engine.alert().detection_timer() >= 0.0);
        assert!(engine.alert().escape_timer().is_finite() && engine.alert().escape_timer() >= 0.0);
    }
}

#[test]
fn longest_frame_is_capped_and_the_light_recovers() {
    let mut engine = PursuitEngine::default();
    let mut player = TestPlayer::at(3.0, 0.0, 3.0);
    let occluders = OccluderSet::default();
    let target = Vec3::new(3.0, engine.agent().mount_height(), 3.0);
    let _ = engine.set_difficulty(3);

    let start = engine.agent().position;
    for _ in 0..4 {
        let _ = engine.tick(f32::MAX, &mut player, &occluders);
        assert!(engine.agent().position.is_finite(), "position diverged: {:?}", engine.agent().position);
        assert!(engine.agent().velocity.is_finite());
    }
    // Four capped frames cover at most four max steps at chase speed
    let reach = engine.agent().chase_speed * engine.config().max_step * 4.0;
    assert!(engine.agent().position.distance(start) <= reach + 1e-4);

    let mut previous = engine.agent().position.distance(target);
    for _ in 0..3 {
        let _ = engine.tick(0.016, &mut player, &occluders);
        let distance = engine.agent().position.distance(target);
        assert!(distance < previous, "light stopped chasing ({previous} -> {distance})");
        previous = distance;
    }
}

#[test]
fn light_stays_at_mount_height() {
    let mut engine = PursuitEngine::default();
    let mut player = TestPlayer::at(4.0, 0.0, -3.0);
    let occluders = OccluderSet::default();
    let _ = engine.set_difficulty(3);

    tick_n(&mut engine, &mut player, &occluders, 200);
    assert!((engine.agent().position.y - engine.agent().mount_height()).abs() < 1e-4);
}

#[test]
fn tuning_setters_rebase_the_current_tier() {
    let mut engine = PursuitEngine::default();
    let _ = engine.set_difficulty(1);

    engine.set_patrol_speed(2.0);
    assert!((engine.agent().patrol_speed - 3.0).abs() < 1e-6);

    engine.set_cone_half_angle(10.0);
    assert!(engine.agent().cone_half_angle < std::f32::consts::FRAC_PI_2);

    engine.set_patrol_points(&[[1.0, 1.0], [2.0, 2.0]]);
    assert_eq!(engine.route().points().len(), 2);
    assert_eq!(engine.route().index(), 0);

    engine.set_patrol_points(&[]);
    assert_eq!(engine.route().points().len(), 2);

    engine.set_chase_speed(-4.0);
    assert!(engine.agent().chase_speed.abs() < f32::EPSILON);

    engine.set_position(3.0, -7.0);
    assert_eq!(engine.agent().position, Vec3::new(3.0, engine.agent().mount_height(), -7.0));
}

#[test]
fn last_detection_tracks_the_latest_tick() {
    let mut engine = parked_engine();
    let occluders = OccluderSet::default();
    assert!(engine.last_detection().is_none());

    let mut player = TestPlayer::at(0.0, 0.0, 0.0);
    let report = engine.tick(DT, &mut player, &occluders);
    assert_eq!(engine.last_detection(), report.detection);

    engine.reset();
    assert!(engine.last_detection().is_none());
}
