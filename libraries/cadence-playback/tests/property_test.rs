//! Property-based tests for navigation and the carousel
//!
//! Uses proptest to verify invariants across many random playlists and
//! gestures.

use cadence_core::{Playlist, Track};
use cadence_playback::{
    format_time, AudioService, CarouselGeometry, CarouselReconciler, PlaybackStateMachine, Result,
    ScreenConfig, ScrollCommand, SettleOutcome,
};
use proptest::prelude::*;

// ===== Helpers =====

/// Audio service that accepts everything and counts transport commands
#[derive(Default)]
struct CountingService {
    plays: usize,
    pauses: usize,
}

impl AudioService for CountingService {
    fn load(&mut self, _audio_ref: &str) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) {
        self.plays += 1;
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn seek(&mut self, _seconds: f64) {}

    fn position_seconds(&self) -> Option<f64> {
        Some(0.0)
    }

    fn duration_seconds(&self) -> Option<f64> {
        Some(120.0)
    }
}

fn playlist(n: usize) -> Playlist {
    Playlist::new(
        (0..n)
            .map(|i| Track::new(format!("Song {i}"), "Artist", format!("cover{i}"), format!("audio{i}")))
            .collect(),
    )
    .unwrap()
}

fn machine_at(n: usize, index: usize) -> PlaybackStateMachine<CountingService> {
    let mut machine = PlaybackStateMachine::new(playlist(n), CountingService::default());
    machine.load_track(index).unwrap();
    machine
}

// ===== Property Tests =====

proptest! {
    /// Property: skip_forward from i lands on (i + 1) mod n, playing
    #[test]
    fn skip_forward_wraps(n in 1usize..40, seed in any::<usize>()) {
        let start = seed % n;
        let mut machine = machine_at(n, start);

        let index = machine.skip_forward().unwrap();

        prop_assert_eq!(index, (start + 1) % n);
        prop_assert_eq!(machine.current_index(), index);
        prop_assert!(machine.is_playing());
    }

    /// Property: skip_backward from i lands on (i - 1 + n) mod n, playing
    #[test]
    fn skip_backward_wraps(n in 1usize..40, seed in any::<usize>()) {
        let start = seed % n;
        let mut machine = machine_at(n, start);

        let index = machine.skip_backward().unwrap();

        prop_assert_eq!(index, (start + n - 1) % n);
        prop_assert!(machine.is_playing());
    }

    /// Property: n forward skips return to the starting track
    #[test]
    fn full_cycle_returns_home(n in 1usize..20, seed in any::<usize>()) {
        let start = seed % n;
        let mut machine = machine_at(n, start);

        for _ in 0..n {
            machine.skip_forward().unwrap();
        }

        prop_assert_eq!(machine.current_index(), start);
    }

    /// Property: toggling twice restores the play flag, one command per toggle
    #[test]
    fn toggle_is_an_involution(toggles in 0usize..20) {
        let mut machine = machine_at(3, 0);
        for _ in 0..toggles {
            machine.toggle_playback();
        }
        let before = machine.is_playing();
        let commands_before = machine.service().plays + machine.service().pauses;

        machine.toggle_playback();
        machine.toggle_playback();

        prop_assert_eq!(machine.is_playing(), before);
        prop_assert_eq!(machine.service().plays + machine.service().pauses, commands_before + 2);
    }

    /// Property: index_at always lands inside the playlist
    #[test]
    fn index_at_is_clamped(
        viewport in 100.0f64..2000.0,
        offset in -1.0e6f64..1.0e6,
        count in 1usize..50,
    ) {
        let geometry = CarouselGeometry::new(viewport, 40.0).unwrap();

        prop_assert!(geometry.index_at(offset, count) < count);
    }

    /// Property: a drag never targets more than one cover away from its origin
    /// when the finger stays on the origin cover
    #[test]
    fn swipe_moves_at_most_one_cover(
        count in 1usize..20,
        seed in any::<usize>(),
        velocity in -5.0f64..5.0,
    ) {
        let mut carousel = CarouselReconciler::new(&ScreenConfig::default()).unwrap();
        let before = seed % count;
        let offset = carousel.geometry().offset_for(before);

        carousel.drag_begin(offset, count);
        let command = carousel.drag_end(offset, velocity, count);

        let target = command.target_index();
        prop_assert!(target < count);
        prop_assert!(target.abs_diff(before) <= 1);
        if let ScrollCommand::Spring { index, .. } = command {
            prop_assert_ne!(index, before);
        }
    }

    /// Property: settling on the drag origin only bounces at the boundaries
    #[test]
    fn settle_on_origin(count in 1usize..20, seed in any::<usize>()) {
        let mut carousel = CarouselReconciler::new(&ScreenConfig::default()).unwrap();
        let before = seed % count;
        let offset = carousel.geometry().offset_for(before);

        carousel.drag_begin(offset, count);
        let outcome = carousel.drag_settle(offset, count);

        if before == 0 || before == count - 1 {
            prop_assert_eq!(outcome, SettleOutcome::BoundaryBounce(before));
        } else {
            prop_assert_eq!(outcome, SettleOutcome::Switch(before));
        }
    }

    /// Property: labels are always minutes, a colon and two second digits
    #[test]
    fn time_labels_are_well_formed(seconds in 0.0f64..100_000.0) {
        let label = format_time(seconds).unwrap();
        let (minutes, secs) = label.split_once(':').unwrap();

        prop_assert_eq!(secs.len(), 2);
        prop_assert!(secs.parse::<u64>().unwrap() < 60);
        prop_assert_eq!(minutes.parse::<u64>().unwrap(), (seconds as u64) / 60);
    }
}
