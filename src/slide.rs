use crate::constants::*;
use crate::state::SlidePhase;
use crate::timer::TimerId;

/// A gallery entry as discovered on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSource {
    pub label: String,
    pub available: bool,
}

impl SlideSource {
    pub fn new(label: impl Into<String>, available: bool) -> Self {
        Self {
            label: label.into(),
            available,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub label: String,
    pub available: bool,

    pub displayed: bool,
    pub active: bool,
    pub phase: SlidePhase,

    opacity: f32,
    target_opacity: f32,

    // Settle or reveal timer for the transition this slide is currently in
    pub(crate) pending: Option<TimerId>,
}

impl Slide {
    pub fn new(source: &SlideSource, shown: bool) -> Self {
        let opacity = if shown { 1.0 } else { 0.0 };
        Self {
            label: source.label.clone(),
            available: source.available,
            displayed: shown,
            active: shown,
            phase: if shown { SlidePhase::Shown } else { SlidePhase::Hidden },
            opacity,
            target_opacity: opacity,
            pending: None,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn target_opacity(&self) -> f32 {
        self.target_opacity
    }

    /// Puts the slide back on screen at full opacity, whatever it was doing.
    pub fn reassert(&mut self) {
        self.displayed = true;
        self.active = true;
        self.phase = SlidePhase::Shown;
        self.opacity = 1.0;
        self.target_opacity = 1.0;
    }

    pub fn begin_fade_out(&mut self) {
        self.target_opacity = 0.0;
        self.phase = SlidePhase::FadingOut;
        self.active = false;
    }

    pub fn begin_fade_in(&mut self) {
        self.displayed = true;
        self.active = true;
        self.phase = SlidePhase::FadingIn;
    }

    /// Reveal timer fired. Ignored if another transition took over meanwhile.
    pub fn reveal(&mut self) -> bool {
        if self.phase != SlidePhase::FadingIn {
            return false;
        }
        self.target_opacity = 1.0;
        self.phase = SlidePhase::Shown;
        true
    }

    /// Settle timer fired. Ignored if the slide was shown again meanwhile.
    pub fn settle(&mut self) -> bool {
        if self.phase != SlidePhase::FadingOut {
            return false;
        }
        self.displayed = false;
        self.phase = SlidePhase::Hidden;
        true
    }

    pub fn update(&mut self, dt: f32) {
        let step = dt / SLIDE_FADE_DURATION;
        if self.opacity < self.target_opacity {
            self.opacity = (self.opacity + step).min(self.target_opacity);
        } else if self.opacity > self.target_opacity {
            self.opacity = (self.opacity - step).max(self.target_opacity);
        }
    }
}
