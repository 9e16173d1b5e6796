mod support;

use rehab_engine::domain::ports::{HighScoreStore, LandmarkSource};
use rehab_engine::domain::{PostureConfig, SessionKind, WarningKind};
use rehab_engine::frameworks::runner::demo_landmarks;
use rehab_engine::interface_adapters::{
    ContractionSimulator, FileHighScoreStore, InMemoryHighScoreStore, InMemorySessionRecorder,
    ScriptedLandmarkSource, upright_torso,
};
use rehab_engine::run_session;
use rehab_engine::use_cases::{
    Biofeedback, ExerciseCycle, ExercisePhase, Feedback, GameOverCause, PhaseTiming,
    PostureAnalyzer, SessionAggregator,
};
use std::io::ErrorKind;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn when_scripted_game_ends_then_session_is_recorded_with_posture_summary() {
    let recorder = InMemorySessionRecorder::default();

    let summary = run_session(
        support::settings(),
        InMemoryHighScoreStore::default(),
        recorder.clone(),
        demo_landmarks(),
    )
    .await
    .expect("session should finish");

    let record = &summary.record;
    assert!(summary.recorded);
    assert_eq!(recorder.records(), vec![record.clone()]);
    assert_eq!(record.kind, SessionKind::Game);
    assert_eq!(record.score, Some(summary.outcome.stats.final_score));
    assert_eq!(record.contractions, summary.outcome.stats.sample_count);
    assert!(record.contractions > 0);
    assert_eq!(record.max_strength, 85);
    assert!(record.posture_enabled);
    // The demo subject shrugs in two of every eight frames.
    assert!(record.posture_warnings > 0);
    assert!(record.average_stability > 0.0 && record.average_stability < 100.0);
    assert!(matches!(
        summary.outcome.cause,
        GameOverCause::Floor | GameOverCause::Obstacle
    ));
}

#[tokio::test(start_paused = true)]
async fn when_recorder_is_offline_then_game_result_is_still_returned() {
    let summary = run_session(
        support::settings(),
        InMemoryHighScoreStore::new(2),
        support::FailingRecorder,
        ScriptedLandmarkSource::steady(200.0, 400.0),
    )
    .await
    .expect("session should finish");

    assert!(!summary.recorded);
    assert_eq!(summary.record.posture_warnings, 0);
    assert_eq!(
        summary.outcome.high_score,
        summary.outcome.stats.final_score.max(2)
    );
}

#[tokio::test(start_paused = true)]
async fn when_game_outlasts_the_tick_cap_then_run_times_out() {
    let settings = rehab_engine::RuntimeSettings {
        max_ticks: 10,
        ..support::settings()
    };

    let result = run_session(
        settings,
        InMemoryHighScoreStore::default(),
        InMemorySessionRecorder::default(),
        demo_landmarks(),
    )
    .await;

    let err = result.expect_err("run should hit the tick cap");
    assert_eq!(err.kind(), ErrorKind::TimedOut);
}

#[tokio::test(start_paused = true)]
async fn when_high_score_file_exists_then_it_seeds_the_game() {
    let path = support::scratch_file("rehab-flow-high-score");
    std::fs::write(&path, "250").expect("seed high score");
    let store = FileHighScoreStore::new(&path);

    let summary = run_session(
        support::settings(),
        store.clone(),
        InMemorySessionRecorder::default(),
        demo_landmarks(),
    )
    .await
    .expect("session should finish");

    assert_eq!(summary.outcome.high_score, 250);
    assert!(!summary.outcome.new_high_score);
    assert_eq!(store.load(), Ok(250));
    let _ = std::fs::remove_file(path);
}

#[test]
fn when_exercise_cycle_is_followed_then_one_contraction_is_recorded() {
    let mut cycle = ExerciseCycle::new(PhaseTiming::default());
    let mut simulator = ContractionSimulator::for_exercise();
    let mut aggregator = SessionAggregator::new(false);
    let mut in_target_seconds = 0;

    for _ in 0..18 {
        match cycle.phase() {
            ExercisePhase::Contract => simulator.press(),
            ExercisePhase::Rest | ExercisePhase::Release => simulator.release(),
        }
        let feedback = Biofeedback::evaluate(simulator.strength(), 70);
        if feedback.feedback == Feedback::Success {
            in_target_seconds += 1;
        }
        aggregator.record_strength(simulator.strength());
        cycle.tick_second();
    }

    assert_eq!(cycle.completed_cycles(), 1);
    assert_eq!(in_target_seconds, 5);

    let record = aggregator.exercise_record("Slow holds", Duration::from_secs(18));
    assert_eq!(record.kind, SessionKind::Exercise);
    assert_eq!(record.contractions, 1);
    assert_eq!(record.max_strength, 75);
    assert_eq!(record.score, None);
}

#[test]
fn when_subject_shrugs_during_exercise_then_biofeedback_turns_to_warning() {
    let mut analyzer = PostureAnalyzer::new(PostureConfig::default());
    let mut frames = ScriptedLandmarkSource::new(vec![
        Some(upright_torso(200.0, 400.0)),
        Some(upright_torso(160.0, 400.0)),
    ]);

    let calibration = analyzer.analyze(frames.next_frame().as_ref(), 0);
    let shrug = analyzer.analyze(frames.next_frame().as_ref(), 100);

    assert!(calibration.is_correct);
    assert!(!shrug.is_correct);
    assert_eq!(shrug.warnings[0].kind, WarningKind::ShouldersRaised);
    let feedback = Biofeedback::evaluate(75, 70).with_posture(shrug.is_correct);
    assert_eq!(feedback.feedback, Feedback::Warning);
}
