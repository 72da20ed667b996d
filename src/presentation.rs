//! Page lifecycle coordinator.
//!
//! `Presentation` owns every controller and the scheduler. Pages are switched
//! with `show_page`, which runs the entry effects of the destination page; all
//! timers come back through `update` as `TimerTask` values and are dispatched
//! to the controller that scheduled them.

use tracing::{debug, info, warn};

use crate::audio::{AudioController, Media};
use crate::confetti::Confetti;
use crate::config::Settings;
use crate::constants::*;
use crate::page::{Page, PageEffect, PageKind};
use crate::slide::SlideSource;
use crate::slider::SlideController;
use crate::state::NavigationState;
use crate::timer::Scheduler;
use crate::typewriter::Typewriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    TypeNext { generation: u64 },
    RevealSlide(usize),
    SettleSlide(usize),
    AutoAdvance,
    BeginMusicFade,
    MusicFadeStep,
}

pub struct Presentation<M: Media> {
    pages: Vec<Page>,
    current_page: usize,

    slider: SlideController,
    typewriter: Typewriter,
    audio: AudioController<M>,
    confetti: Confetti,

    scheduler: Scheduler<TimerTask>,
    clock_carry: f32,
}

impl<M: Media> Presentation<M> {
    pub fn new(settings: &Settings, gallery: Vec<SlideSource>, track: Option<M>) -> Self {
        Self {
            pages: settings.build_pages(),
            current_page: 0,
            slider: SlideController::new(gallery, settings.slide_interval_ms),
            typewriter: Typewriter::new(&settings.message),
            audio: AudioController::new(track),
            confetti: Confetti::new(),
            scheduler: Scheduler::new(),
            clock_carry: 0.0,
        }
    }

    /// Shows the first page.
    pub fn start(&mut self) {
        info!("presentation starting with {} pages", self.pages.len());
        self.show_page(0);
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_page: self.current_page,
            current_slide: self.slider.current(),
            is_music_playing: self.audio.is_playing(),
        }
    }

    #[cfg(test)]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current_page]
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page + 1 == self.pages.len()
    }

    pub fn on_gallery(&self) -> bool {
        self.current_page().kind == PageKind::Gallery
    }

    pub fn slider(&self) -> &SlideController {
        &self.slider
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    #[cfg(test)]
    pub fn audio(&self) -> &AudioController<M> {
        &self.audio
    }

    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    pub fn show_page(&mut self, index: usize) {
        if index >= self.pages.len() {
            warn!("page {index} does not exist");
            return;
        }

        let leaving = self.current_page().kind;
        if leaving == PageKind::Gallery && index != self.current_page {
            self.slider.suspend(&mut self.scheduler);
        }

        for page in self.pages.iter_mut() {
            page.active = false;
        }
        self.pages[index].active = true;
        self.current_page = index;
        debug!("showing page {index}");

        for &effect in self.pages[index].effects() {
            self.run_effect(effect);
        }
    }

    pub fn next_page(&mut self) {
        if self.current_page + 1 < self.pages.len() {
            self.show_page(self.current_page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 0 {
            self.show_page(self.current_page - 1);
        }
    }

    pub fn first_page(&mut self) {
        self.show_page(0);
    }

    pub fn last_page(&mut self) {
        self.show_page(self.pages.len() - 1);
    }

    /// Back to the first page. Music that was on starts over from the top.
    pub fn restart(&mut self) {
        info!("restarting the journey");
        self.show_page(0);
        if self.audio.is_playing() {
            self.audio.replay(&mut self.scheduler);
        }
    }

    pub fn next_slide(&mut self) {
        self.slider.next(&mut self.scheduler);
    }

    pub fn prev_slide(&mut self) {
        self.slider.prev(&mut self.scheduler);
    }

    pub fn go_to_slide(&mut self, index: usize) {
        self.slider.go_to(index as isize, &mut self.scheduler);
    }

    pub fn slide_swipe(&mut self, start_x: f32, end_x: f32) {
        self.slider.handle_swipe(start_x, end_x, &mut self.scheduler);
    }

    pub fn gallery_hover(&mut self, hovered: bool) {
        if hovered {
            self.slider.pointer_enter(&mut self.scheduler);
        } else {
            self.slider.pointer_leave(&mut self.scheduler);
        }
    }

    pub fn toggle_music(&mut self) {
        self.audio.toggle();
    }

    /// Advances every timer and animation by one frame.
    pub fn update(&mut self, dt: f32) {
        let ms = self.frame_ms(dt);
        self.advance_ms(ms);
        self.slider.update(dt);
        self.confetti.update(dt);
        self.audio.pump();
    }

    pub fn advance_ms(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.dispatch(task);
        }
        self.scheduler.settle(until);
    }

    fn frame_ms(&mut self, dt: f32) -> u64 {
        self.clock_carry += dt.max(0.0) * 1000.0;
        let whole = self.clock_carry.floor();
        self.clock_carry -= whole;
        whole as u64
    }

    fn dispatch(&mut self, task: TimerTask) {
        match task {
            TimerTask::TypeNext { generation } => self.typewriter.tick(generation, &mut self.scheduler),
            TimerTask::RevealSlide(index) => self.slider.reveal(index),
            TimerTask::SettleSlide(index) => self.slider.settle(index),
            TimerTask::AutoAdvance => self.slider.next(&mut self.scheduler),
            TimerTask::BeginMusicFade => self.audio.fade_out(&mut self.scheduler),
            TimerTask::MusicFadeStep => self.audio.fade_step(&mut self.scheduler),
        }
    }

    fn run_effect(&mut self, effect: PageEffect) {
        match effect {
            PageEffect::RestartTypewriter => self.typewriter.start(&mut self.scheduler),
            PageEffect::EnterGallery => {
                if self.slider.is_initialized() {
                    self.slider.resume(&mut self.scheduler);
                } else {
                    self.slider.start(&mut self.scheduler);
                }
            }
            PageEffect::StartConfetti => self.confetti.burst(&mut rand::rng()),
            PageEffect::StartMusic => self.audio.start(),
            PageEffect::ScheduleMusicFade => self.audio.schedule_fade(MUSIC_FADE_DELAY_MS, &mut self.scheduler),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::audio::testing::FakeTrack;

    pub(crate) const GALLERY: usize = 3;
    pub(crate) const CELEBRATION: usize = 4;
    pub(crate) const FINALE: usize = 5;

    pub(crate) fn presentation(slides: usize) -> Presentation<FakeTrack> {
        let gallery = (0..slides)
            .map(|i| SlideSource::new(format!("{i:02}.jpg"), true))
            .collect();
        let mut presentation = Presentation::new(&Settings::default(), gallery, Some(FakeTrack::new()));
        presentation.start();
        presentation
    }

    fn active_pages(presentation: &Presentation<FakeTrack>) -> Vec<usize> {
        presentation.pages().iter().filter(|p| p.active).map(|p| p.index).collect()
    }

    #[test]
    fn show_page_marks_exactly_one_page_active() {
        let mut presentation = presentation(3);

        for i in 0..presentation.page_count() {
            presentation.show_page(i);
            assert_eq!(active_pages(&presentation), vec![i]);
            assert_eq!(presentation.state().current_page, i);
        }
    }

    #[test]
    fn out_of_range_page_is_ignored() {
        let mut presentation = presentation(3);
        presentation.show_page(2);

        presentation.show_page(99);

        assert_eq!(presentation.state().current_page, 2);
        assert_eq!(active_pages(&presentation), vec![2]);
    }

    #[test]
    fn page_navigation_is_clamped_at_both_ends() {
        let mut presentation = presentation(3);

        presentation.prev_page();
        assert_eq!(presentation.state().current_page, 0);

        for _ in 0..20 {
            presentation.next_page();
        }
        assert_eq!(presentation.state().current_page, FINALE);

        presentation.next_page();
        assert_eq!(presentation.state().current_page, FINALE);
    }

    #[test]
    fn home_and_end_jump_to_the_ends() {
        let mut presentation = presentation(3);

        presentation.last_page();
        assert_eq!(presentation.state().current_page, FINALE);

        presentation.first_page();
        assert_eq!(presentation.state().current_page, 0);
    }

    #[test]
    fn entering_the_intro_restarts_the_typewriter() {
        let mut presentation = presentation(3);
        presentation.advance_ms(2000);
        let typed = presentation.typewriter().output().len();
        assert!(typed > 1);

        presentation.next_page();
        presentation.prev_page();
        assert_eq!(presentation.typewriter().output().chars().count(), 1);
    }

    #[test]
    fn gallery_initializes_on_first_entry_and_resumes_later() {
        let mut presentation = presentation(4);
        assert!(!presentation.slider().is_initialized());

        presentation.show_page(GALLERY);
        assert!(presentation.slider().is_initialized());
        assert!(presentation.slider().is_auto_advancing());

        presentation.next_slide();
        presentation.next_slide();
        presentation.next_page();
        assert!(!presentation.slider().is_auto_advancing());

        presentation.advance_ms(SLIDE_INTERVAL_MS * 3);
        assert_eq!(presentation.state().current_slide, 2);

        presentation.prev_page();
        assert_eq!(presentation.state().current_slide, 2);
        assert!(presentation.slider().is_auto_advancing());
        assert!(presentation.slider().slides()[2].displayed);
    }

    #[test]
    fn empty_gallery_does_not_break_the_page() {
        let mut presentation = presentation(0);

        presentation.show_page(GALLERY);
        presentation.next_slide();
        presentation.advance_ms(SLIDE_INTERVAL_MS * 2);

        assert_eq!(presentation.state().current_page, GALLERY);
        assert!(!presentation.slider().is_initialized());
    }

    #[test]
    fn celebration_starts_confetti_and_music() {
        let mut presentation = presentation(3);

        presentation.show_page(CELEBRATION);

        assert_eq!(presentation.confetti().particles().len(), CONFETTI_COUNT);
        assert!(presentation.state().is_music_playing);
    }

    #[test]
    fn reentering_the_celebration_keeps_the_music_on() {
        let mut presentation = presentation(3);

        presentation.show_page(CELEBRATION);
        presentation.prev_page();
        presentation.next_page();

        assert!(presentation.state().is_music_playing);
    }

    #[test]
    fn finale_fades_the_music_after_its_delay() {
        let mut presentation = presentation(3);
        presentation.show_page(CELEBRATION);
        presentation.next_page();

        presentation.advance_ms(MUSIC_FADE_DELAY_MS - 1);
        assert!(presentation.state().is_music_playing);

        presentation.advance_ms(1 + MUSIC_FADE_TICK_MS * 25);
        assert!(!presentation.state().is_music_playing);
        assert_eq!(presentation.audio().track().map(|t| t.volume), Some(1.0));
    }

    #[test]
    fn restart_rewinds_playing_music_without_stopping_it() {
        let mut presentation = presentation(3);
        presentation.show_page(CELEBRATION);
        presentation.update(0.5);
        presentation.next_page();

        presentation.restart();
        presentation.advance_ms(MUSIC_FADE_DELAY_MS * 3);

        let state = presentation.state();
        assert_eq!(state.current_page, 0);
        assert!(state.is_music_playing);
        let track = presentation.audio().track().unwrap();
        assert!(track.playing);
        assert_eq!(track.position, 0.0);
    }

    #[test]
    fn restart_leaves_silent_music_silent() {
        let mut presentation = presentation(3);
        presentation.show_page(2);

        presentation.restart();

        assert_eq!(presentation.state().current_page, 0);
        assert!(!presentation.state().is_music_playing);
        assert_eq!(presentation.audio().track().map(|t| t.play_calls), Some(0));
    }

    #[test]
    fn frame_time_accumulates_fractional_milliseconds() {
        let mut presentation = presentation(3);
        presentation.show_page(GALLERY);

        for _ in 0..(SLIDE_INTERVAL_MS * 60 / 1000) {
            presentation.update(1.0 / 60.0);
        }
        presentation.update(0.01);

        assert_eq!(presentation.state().current_slide, 1);
    }
}
