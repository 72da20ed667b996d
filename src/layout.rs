use raylib::prelude::*;

use crate::constants::*;
use crate::page::PageKind;

/// On-screen buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    PrevSlide,
    NextSlide,
    Indicator(usize),
    Continue,
    Restart,
    ToggleMusic,
}

impl Control {
    pub fn label(self) -> &'static str {
        match self {
            Control::PrevSlide => "<",
            Control::NextSlide => ">",
            Control::Indicator(_) => "",
            Control::Continue => "Continue",
            Control::Restart => "Start again",
            Control::ToggleMusic => "Music",
        }
    }
}

/// Fixed rectangles in render space, shared by drawing and hit testing.
#[derive(Debug, Clone)]
pub struct Layout {
    pub gallery: Rectangle,
    pub prev_slide: Rectangle,
    pub next_slide: Rectangle,
    pub primary_button: Rectangle,
    pub music_button: Rectangle,
}

impl Default for Layout {
    fn default() -> Self {
        let w = RENDER_WIDTH as f32;
        let h = RENDER_HEIGHT as f32;

        let gallery = Rectangle::new(w * 0.15, h * 0.18, w * 0.70, h * 0.62);
        let arrow = 90.0;
        let arrow_y = gallery.y + (gallery.height - arrow) * 0.5;

        Self {
            gallery,
            prev_slide: Rectangle::new(gallery.x + 20.0, arrow_y, arrow, arrow),
            next_slide: Rectangle::new(gallery.x + gallery.width - arrow - 20.0, arrow_y, arrow, arrow),
            primary_button: Rectangle::new((w - 360.0) * 0.5, h * 0.86, 360.0, 90.0),
            music_button: Rectangle::new(w - 220.0, 40.0, 180.0, 70.0),
        }
    }
}

impl Layout {
    /// Dot for slide `index` in a row of `count`, centered under the gallery.
    pub fn indicator(&self, index: usize, count: usize) -> Rectangle {
        const SIZE: f32 = 20.0;
        const SPACING: f32 = 32.0;
        let row = SPACING * count.saturating_sub(1) as f32 + SIZE;
        let x = self.gallery.x + (self.gallery.width - row) * 0.5 + SPACING * index as f32;
        Rectangle::new(x, self.gallery.y + self.gallery.height + 20.0, SIZE, SIZE)
    }

    /// Controls present on a page, topmost first.
    pub fn controls(&self, kind: PageKind, is_last: bool, slide_count: usize) -> Vec<(Control, Rectangle)> {
        let mut controls = Vec::new();
        if kind == PageKind::Gallery {
            controls.push((Control::PrevSlide, self.prev_slide));
            controls.push((Control::NextSlide, self.next_slide));
            for i in 0..slide_count {
                controls.push((Control::Indicator(i), self.indicator(i, slide_count)));
            }
        }
        if is_last {
            controls.push((Control::Restart, self.primary_button));
        } else {
            controls.push((Control::Continue, self.primary_button));
        }
        controls.push((Control::ToggleMusic, self.music_button));
        controls
    }

    pub fn control_at(&self, point: Vector2, kind: PageKind, is_last: bool, slide_count: usize) -> Option<Control> {
        self.controls(kind, is_last, slide_count)
            .into_iter()
            .find(|(_, rect)| contains(rect, point))
            .map(|(control, _)| control)
    }

    /// The slider and its arrow buttons.
    pub fn in_gallery(&self, point: Vector2) -> bool {
        contains(&self.gallery, point) || contains(&self.prev_slide, point) || contains(&self.next_slide, point)
    }
}

pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x && point.x < rect.x + rect.width && point.y >= rect.y && point.y < rect.y + rect.height
}

pub fn center(rect: &Rectangle) -> Vector2 {
    Vector2::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5)
}
