use std::path::Path;

use raylib::core::audio::{Music, RaylibAudio};
use tracing::{debug, info, warn};

use crate::constants::*;
use crate::error::{LoadError, PlaybackError};
use crate::presentation::TimerTask;
use crate::timer::{Scheduler, TimerId};

/// A single playable track.
pub trait Media {
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn rewind(&mut self);
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    /// Called once per frame.
    fn update(&mut self) {}
}

pub struct AudioController<M: Media> {
    track: Option<M>,
    playing: bool,
    fade: Option<TimerId>,
    pending_fade: Option<TimerId>,
}

impl<M: Media> AudioController<M> {
    pub fn new(track: Option<M>) -> Self {
        if track.is_none() {
            info!("no music track bound");
        }
        Self {
            track,
            playing: false,
            fade: None,
            pending_fade: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[cfg(test)]
    pub fn track(&self) -> Option<&M> {
        self.track.as_ref()
    }

    pub fn toggle(&mut self) {
        let Some(track) = self.track.as_mut() else {
            return;
        };
        if self.playing {
            track.pause();
            self.playing = false;
        } else {
            self.try_play();
        }
    }

    /// Begins playback unless the music is already on.
    pub fn start(&mut self) {
        if !self.playing {
            self.try_play();
        }
    }

    /// Rewinds to the beginning and plays at full volume.
    pub fn replay(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.cancel_fades(scheduler);
        let Some(track) = self.track.as_mut() else {
            return;
        };
        track.set_volume(1.0);
        track.rewind();
        self.try_play();
    }

    pub fn schedule_fade(&mut self, delay_ms: u64, scheduler: &mut Scheduler<TimerTask>) {
        if self.track.is_none() {
            return;
        }
        if let Some(id) = self.pending_fade.take() {
            scheduler.cancel(id);
        }
        self.pending_fade = Some(scheduler.schedule_once(delay_ms, TimerTask::BeginMusicFade));
    }

    pub fn fade_out(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.pending_fade = None;
        if self.track.is_none() {
            return;
        }
        if let Some(id) = self.fade.take() {
            scheduler.cancel(id);
        }
        debug!("fading out music");
        self.fade = Some(scheduler.schedule_repeating(MUSIC_FADE_TICK_MS, TimerTask::MusicFadeStep));
    }

    pub fn fade_step(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        let Some(track) = self.track.as_mut() else {
            return;
        };
        let volume = track.volume();
        if volume > MUSIC_FADE_STEP {
            track.set_volume((volume - MUSIC_FADE_STEP).max(0.0));
            return;
        }

        track.pause();
        track.set_volume(1.0);
        self.playing = false;
        if let Some(id) = self.fade.take() {
            scheduler.cancel(id);
        }
        debug!("music faded out");
    }

    pub fn pump(&mut self) {
        if let Some(track) = self.track.as_mut() {
            track.update();
        }
    }

    fn try_play(&mut self) {
        let Some(track) = self.track.as_mut() else {
            return;
        };
        match track.play() {
            Ok(()) => self.playing = true,
            Err(e) => {
                warn!("music playback was prevented: {e}");
                self.playing = false;
            }
        }
    }

    fn cancel_fades(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        for id in [self.fade.take(), self.pending_fade.take()].into_iter().flatten() {
            scheduler.cancel(id);
        }
    }
}

/// Music stream on the raylib audio device.
pub struct MusicTrack<'aud> {
    device: &'aud RaylibAudio,
    music: Music<'aud>,
    volume: f32,
    started: bool,
}

impl<'aud> MusicTrack<'aud> {
    pub fn open(device: &'aud RaylibAudio, path: &Path) -> Result<Self, LoadError> {
        let music = device
            .new_music(&path.to_string_lossy())
            .map_err(|e| LoadError::Music {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        info!("loaded music {:?}", path);
        Ok(Self {
            device,
            music,
            volume: 1.0,
            started: false,
        })
    }
}

impl Media for MusicTrack<'_> {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.device.is_audio_device_ready() {
            return Err(PlaybackError::DeviceUnavailable);
        }
        if self.started {
            self.music.resume_stream();
        } else {
            self.music.play_stream();
            self.started = true;
        }
        if self.music.is_stream_playing() {
            Ok(())
        } else {
            Err(PlaybackError::Rejected("stream reported not playing".into()))
        }
    }

    fn pause(&mut self) {
        self.music.pause_stream();
    }

    fn rewind(&mut self) {
        self.music.seek_stream(0.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.music.set_volume(self.volume);
    }

    fn update(&mut self) {
        self.music.update_stream();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug)]
    pub struct FakeTrack {
        pub playing: bool,
        pub volume: f32,
        pub position: f32,
        pub reject: bool,
        pub play_calls: u32,
    }

    impl FakeTrack {
        pub fn new() -> Self {
            Self {
                playing: false,
                volume: 1.0,
                position: 0.0,
                reject: false,
                play_calls: 0,
            }
        }

        pub fn rejecting() -> Self {
            Self {
                reject: true,
                ..Self::new()
            }
        }
    }

    impl Media for FakeTrack {
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.play_calls += 1;
            if self.reject {
                return Err(PlaybackError::Rejected("autoplay blocked".into()));
            }
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) {
            self.playing = false;
        }

        fn rewind(&mut self) {
            self.position = 0.0;
        }

        fn volume(&self) -> f32 {
            self.volume
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn update(&mut self) {
            if self.playing {
                self.position += 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeTrack;
    use super::*;

    fn run(audio: &mut AudioController<FakeTrack>, scheduler: &mut Scheduler<TimerTask>, ms: u64) -> u32 {
        let until = scheduler.now() + ms;
        let mut steps = 0;
        while let Some(task) = scheduler.pop_due(until) {
            match task {
                TimerTask::BeginMusicFade => audio.fade_out(scheduler),
                TimerTask::MusicFadeStep => {
                    steps += 1;
                    audio.fade_step(scheduler);
                }
                _ => {}
            }
        }
        scheduler.settle(until);
        steps
    }

    #[test]
    fn toggle_plays_then_pauses() {
        let mut audio = AudioController::new(Some(FakeTrack::new()));

        audio.toggle();
        assert!(audio.is_playing());
        assert!(audio.track().is_some_and(|t| t.playing));

        audio.toggle();
        assert!(!audio.is_playing());
        assert!(audio.track().is_some_and(|t| !t.playing));
    }

    #[test]
    fn rejected_playback_leaves_the_flag_off() {
        let mut audio = AudioController::new(Some(FakeTrack::rejecting()));

        audio.toggle();
        assert!(!audio.is_playing());

        audio.start();
        assert!(!audio.is_playing());
        assert_eq!(audio.track().map(|t| t.play_calls), Some(2));
    }

    #[test]
    fn start_does_not_pause_music_that_is_already_on() {
        let mut audio = AudioController::new(Some(FakeTrack::new()));

        audio.start();
        audio.start();
        assert!(audio.is_playing());
        assert_eq!(audio.track().map(|t| t.play_calls), Some(1));
    }

    #[test]
    fn fade_out_ends_paused_at_full_volume_within_bounded_ticks() {
        let mut audio = AudioController::new(Some(FakeTrack::new()));
        let mut scheduler = Scheduler::new();
        audio.start();

        audio.fade_out(&mut scheduler);
        let steps = run(&mut audio, &mut scheduler, MUSIC_FADE_TICK_MS * 25);

        assert!((19..=21).contains(&steps), "took {steps} steps");
        assert!(!audio.is_playing());
        let track = audio.track().unwrap();
        assert!(!track.playing);
        assert_eq!(track.volume, 1.0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn scheduled_fade_waits_for_its_delay() {
        let mut audio = AudioController::new(Some(FakeTrack::new()));
        let mut scheduler = Scheduler::new();
        audio.start();

        audio.schedule_fade(MUSIC_FADE_DELAY_MS, &mut scheduler);
        audio.schedule_fade(MUSIC_FADE_DELAY_MS, &mut scheduler);
        assert_eq!(scheduler.pending(), 1);

        run(&mut audio, &mut scheduler, MUSIC_FADE_DELAY_MS - 1);
        assert_eq!(audio.track().map(|t| t.volume), Some(1.0));

        run(&mut audio, &mut scheduler, MUSIC_FADE_DELAY_MS);
        assert!(audio.is_playing());
        assert!(audio.track().is_some_and(|t| t.volume < 1.0));
    }

    #[test]
    fn replay_cancels_a_running_fade() {
        let mut audio = AudioController::new(Some(FakeTrack::new()));
        let mut scheduler = Scheduler::new();
        audio.start();
        audio.fade_out(&mut scheduler);
        run(&mut audio, &mut scheduler, MUSIC_FADE_TICK_MS * 4);

        audio.replay(&mut scheduler);

        assert_eq!(scheduler.pending(), 0);
        assert!(audio.is_playing());
        assert_eq!(audio.track().map(|t| t.volume), Some(1.0));
    }

    #[test]
    fn everything_is_a_no_op_without_a_track() {
        let mut audio: AudioController<FakeTrack> = AudioController::new(None);
        let mut scheduler = Scheduler::new();

        audio.toggle();
        audio.start();
        audio.fade_out(&mut scheduler);
        audio.schedule_fade(MUSIC_FADE_DELAY_MS, &mut scheduler);
        audio.replay(&mut scheduler);

        assert!(!audio.is_playing());
        assert_eq!(scheduler.pending(), 0);
    }
}
