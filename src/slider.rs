use tracing::{debug, info, warn};

use crate::constants::*;
use crate::input::{classify_swipe, SwipeDirection};
use crate::presentation::TimerTask;
use crate::slide::{Slide, SlideSource};
use crate::timer::{Scheduler, TimerId};

pub struct SlideController {
    catalog: Vec<SlideSource>,
    slides: Vec<Slide>,
    current: usize,

    interval_ms: u64,
    auto_advance: Option<TimerId>,
    hovered: bool,
}

impl SlideController {
    pub fn new(catalog: Vec<SlideSource>, interval_ms: u64) -> Self {
        Self {
            catalog,
            slides: Vec::new(),
            current: 0,
            interval_ms,
            auto_advance: None,
            hovered: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        !self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance.is_some()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Builds the slide list from the catalog on first use. Returns false when
    /// the gallery is empty; every navigation call is then a no-op.
    pub fn ensure_initialized(&mut self) -> bool {
        if self.is_initialized() {
            return true;
        }
        if self.catalog.is_empty() {
            warn!("no gallery slides found");
            return false;
        }

        self.slides = self
            .catalog
            .iter()
            .enumerate()
            .map(|(i, source)| Slide::new(source, i == 0))
            .collect();
        self.current = 0;
        info!("gallery initialized with {} slides", self.slides.len());
        true
    }

    /// First entry to the gallery page: show slide 0 and start auto-advance.
    pub fn start(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        if !self.ensure_initialized() {
            warn!("gallery failed to initialize");
            return;
        }
        self.show_slide(0, scheduler);
        self.reset_auto_advance(scheduler);
    }

    /// Re-entry to the gallery page: keep the last viewed slide.
    pub fn resume(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.show_slide(self.current as isize, scheduler);
        self.reset_auto_advance(scheduler);
    }

    pub fn show_slide(&mut self, index: isize, scheduler: &mut Scheduler<TimerTask>) {
        if !self.ensure_initialized() {
            return;
        }

        let count = self.slides.len() as isize;
        let index = index.rem_euclid(count) as usize;

        if index == self.current {
            self.slides[index].reassert();
            return;
        }

        debug!("showing slide {} of {}", index, self.slides.len() - 1);

        let outgoing = self.current;
        let settle = scheduler.schedule_once(SLIDE_SETTLE_MS, TimerTask::SettleSlide(outgoing));
        let slide = &mut self.slides[outgoing];
        if let Some(previous) = slide.pending.replace(settle) {
            scheduler.cancel(previous);
        }
        slide.begin_fade_out();

        let reveal = scheduler.schedule_once(SLIDE_REVEAL_MS, TimerTask::RevealSlide(index));
        let slide = &mut self.slides[index];
        if let Some(previous) = slide.pending.replace(reveal) {
            scheduler.cancel(previous);
        }
        slide.begin_fade_in();

        self.current = index;
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.active = i == index;
        }
    }

    pub fn next(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.show_slide(self.current as isize + 1, scheduler);
        self.reset_auto_advance(scheduler);
    }

    pub fn prev(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.show_slide(self.current as isize - 1, scheduler);
        self.reset_auto_advance(scheduler);
    }

    pub fn go_to(&mut self, index: isize, scheduler: &mut Scheduler<TimerTask>) {
        self.show_slide(index, scheduler);
        self.reset_auto_advance(scheduler);
    }

    pub fn handle_swipe(&mut self, start_x: f32, end_x: f32, scheduler: &mut Scheduler<TimerTask>) {
        match classify_swipe(start_x, end_x) {
            Some(SwipeDirection::Left) => {
                debug!("swipe left, next slide");
                self.next(scheduler);
            }
            Some(SwipeDirection::Right) => {
                debug!("swipe right, previous slide");
                self.prev(scheduler);
            }
            None => {}
        }
    }

    /// Cancels the running auto-advance timer and arms a fresh one.
    pub fn reset_auto_advance(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.cancel_auto_advance(scheduler);
        if !self.is_initialized() {
            return;
        }
        self.auto_advance = Some(scheduler.schedule_repeating(self.interval_ms, TimerTask::AutoAdvance));
    }

    pub fn pointer_enter(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.hovered = true;
        self.cancel_auto_advance(scheduler);
    }

    pub fn pointer_leave(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.hovered = false;
        self.reset_auto_advance(scheduler);
    }

    /// The gallery page was left.
    pub fn suspend(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.hovered = false;
        self.cancel_auto_advance(scheduler);
    }

    pub fn reveal(&mut self, index: usize) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.pending = None;
            slide.reveal();
        }
    }

    pub fn settle(&mut self, index: usize) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.pending = None;
            slide.settle();
        }
    }

    pub fn update(&mut self, dt: f32) {
        for slide in self.slides.iter_mut() {
            slide.update(dt);
        }
    }

    fn cancel_auto_advance(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        if let Some(id) = self.auto_advance.take() {
            scheduler.cancel(id);
        }
    }
}
