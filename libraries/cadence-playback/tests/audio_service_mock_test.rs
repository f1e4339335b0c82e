//! Command ordering against a mocked audio service
//!
//! The state machine must talk to the platform player in a precise order:
//! load before play, exactly one transport command per toggle, nothing at
//! all after a rejected load.

use cadence_core::{Playlist, Track};
use cadence_playback::{AudioService, PlaybackError, PlaybackStateMachine, Result};
use mockall::{mock, predicate::eq, Sequence};

mock! {
    pub Audio {}

    impl AudioService for Audio {
        fn load(&mut self, audio_ref: &str) -> Result<()>;
        fn play(&mut self);
        fn pause(&mut self);
        fn seek(&mut self, seconds: f64);
        fn position_seconds(&self) -> Option<f64>;
        fn duration_seconds(&self) -> Option<f64>;
    }
}

fn playlist() -> Playlist {
    Playlist::new(vec![
        Track::new("One", "A", "c1", "one.mp3"),
        Track::new("Two", "B", "c2", "two.mp3"),
        Track::new("Three", "C", "c3", "three.mp3"),
    ])
    .unwrap()
}

fn expect_load(audio: &mut MockAudio, seq: &mut Sequence, audio_ref: &'static str) {
    audio
        .expect_load()
        .withf(move |r| r == audio_ref)
        .times(1)
        .in_sequence(seq)
        .returning(|_| Ok(()));
}

#[test]
fn test_skip_loads_then_plays() {
    let mut audio = MockAudio::new();
    let mut seq = Sequence::new();
    expect_load(&mut audio, &mut seq, "one.mp3");
    expect_load(&mut audio, &mut seq, "two.mp3");
    audio.expect_play().times(1).in_sequence(&mut seq).return_const(());
    expect_load(&mut audio, &mut seq, "one.mp3");
    audio.expect_play().times(1).in_sequence(&mut seq).return_const(());

    let mut machine = PlaybackStateMachine::new(playlist(), audio);
    machine.load_track(0).unwrap();
    machine.skip_forward().unwrap();
    machine.skip_backward().unwrap();

    assert_eq!(machine.current_index(), 0);
    assert!(machine.is_playing());
}

#[test]
fn test_toggle_alternates_play_and_pause() {
    let mut audio = MockAudio::new();
    let mut seq = Sequence::new();
    expect_load(&mut audio, &mut seq, "one.mp3");
    audio.expect_play().times(1).in_sequence(&mut seq).return_const(());
    audio.expect_pause().times(1).in_sequence(&mut seq).return_const(());
    audio.expect_play().times(1).in_sequence(&mut seq).return_const(());

    let mut machine = PlaybackStateMachine::new(playlist(), audio);
    machine.load_track(0).unwrap();
    machine.toggle_playback();
    machine.toggle_playback();
    machine.toggle_playback();

    assert!(machine.is_playing());
}

#[test]
fn test_rejected_load_sends_nothing_else() {
    let mut audio = MockAudio::new();
    let mut seq = Sequence::new();
    expect_load(&mut audio, &mut seq, "one.mp3");
    audio
        .expect_load()
        .withf(|r| r == "three.mp3")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|r| Err(PlaybackError::ResourceNotFound(r.to_string())));
    audio.expect_play().never();
    audio.expect_pause().never();

    let mut machine = PlaybackStateMachine::new(playlist(), audio);
    machine.load_track(0).unwrap();
    let err = machine.skip_backward().unwrap_err();

    assert_eq!(err, PlaybackError::ResourceNotFound("three.mp3".to_string()));
    assert_eq!(machine.current_index(), 0);
    assert!(!machine.is_playing());
}

#[test]
fn test_seek_is_clamped_before_reaching_the_service() {
    let mut audio = MockAudio::new();
    audio.expect_load().returning(|_| Ok(()));
    audio.expect_duration_seconds().return_const(Some(90.0));
    audio.expect_seek().with(eq(90.0)).times(1).return_const(());
    audio.expect_play().never();

    let mut machine = PlaybackStateMachine::new(playlist(), audio);
    machine.load_track(0).unwrap();

    assert_eq!(machine.seek_to(300.0).unwrap(), 90.0);
    assert!(!machine.is_playing());
}
