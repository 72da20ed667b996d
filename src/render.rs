use raylib::core::text::measure_text;
use raylib::prelude::*;

use crate::audio::Media;
use crate::constants::*;
use crate::layout::{center, Control, Layout};
use crate::page::PageKind;
use crate::presentation::Presentation;
use crate::slide::Slide;

const TITLE_SIZE: i32 = 72;
const BODY_SIZE: i32 = 40;
const BUTTON_SIZE: i32 = 36;
const LINE_GAP: i32 = 16;

// Failed images stay in the gallery, dimmed
const PLACEHOLDER_OPACITY: f32 = 0.25;

pub fn with_opacity(color: Color, opacity: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * opacity.clamp(0.0, 1.0)) as u8)
}

fn background(kind: PageKind) -> Color {
    match kind {
        PageKind::Intro => Color::new(24, 16, 40, 255),
        PageKind::Story => Color::new(36, 22, 56, 255),
        PageKind::Gallery => Color::new(16, 16, 24, 255),
        PageKind::Celebration => Color::new(70, 20, 60, 255),
        PageKind::Finale => Color::new(20, 24, 48, 255),
    }
}

/// Draws the presentation into the render texture.
pub struct Renderer {
    textures: Vec<Option<Texture2D>>,
}

impl Renderer {
    pub fn new(textures: Vec<Option<Texture2D>>) -> Self {
        Self { textures }
    }

    pub fn draw<M: Media>(&self, d: &mut RaylibDrawHandle, presentation: &Presentation<M>, layout: &Layout) {
        let page = presentation.current_page();
        d.clear_background(background(page.kind));

        if page.kind == PageKind::Celebration {
            presentation.confetti().draw(d);
        }

        draw_centered(d, &page.title, RENDER_HEIGHT / 12, TITLE_SIZE, Color::GOLD);

        match page.kind {
            PageKind::Intro => {
                draw_lines(d, presentation.typewriter().output().split('\n'), RENDER_HEIGHT / 4);
            }
            PageKind::Gallery => self.draw_gallery(d, presentation, layout),
            _ => draw_lines(d, page.body.iter().map(String::as_str), RENDER_HEIGHT / 3),
        }

        let slide_count = presentation.slider().slides().len();
        for (control, rect) in layout.controls(page.kind, presentation.is_last_page(), slide_count) {
            let label = match control {
                Control::Indicator(_) => continue,
                Control::ToggleMusic if presentation.state().is_music_playing => "Music: on",
                Control::ToggleMusic => "Music: off",
                other => other.label(),
            };
            draw_button(d, rect, label);
        }

        let counter = format!("{} / {}", page.index + 1, presentation.page_count());
        d.draw_text(&counter, 40, RENDER_HEIGHT - 60, 28, Color::LIGHTGRAY);
    }

    fn draw_gallery<M: Media>(&self, d: &mut RaylibDrawHandle, presentation: &Presentation<M>, layout: &Layout) {
        let area = layout.gallery;
        d.draw_rectangle_rec(area, Color::new(0, 0, 0, 255));

        let slider = presentation.slider();
        if !slider.is_initialized() {
            draw_centered(d, "No photos yet", (area.y + area.height * 0.5) as i32, BODY_SIZE, Color::GRAY);
            return;
        }

        for (i, slide) in slider.slides().iter().enumerate() {
            if slide.displayed {
                let texture = self.textures.get(i).and_then(Option::as_ref);
                draw_slide(d, slide, texture, area);
            }
        }

        let count = slider.slides().len();
        for (i, slide) in slider.slides().iter().enumerate() {
            let dot = layout.indicator(i, count);
            let color = if slide.active { Color::GOLD } else { Color::DARKGRAY };
            d.draw_circle_v(center(&dot), dot.width * 0.5, color);
        }
    }
}

fn draw_slide(d: &mut RaylibDrawHandle, slide: &Slide, texture: Option<&Texture2D>, area: Rectangle) {
    let Some(texture) = texture.filter(|_| slide.available) else {
        let tint = with_opacity(Color::LIGHTGRAY, slide.opacity() * PLACEHOLDER_OPACITY);
        d.draw_rectangle_rec(area, tint);
        let label = format!("{} could not be loaded", slide.label);
        draw_centered(d, &label, (area.y + area.height * 0.5) as i32, BODY_SIZE, with_opacity(Color::WHITE, slide.opacity()));
        return;
    };

    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let scale = (area.width / tex_width).min(area.height / tex_height);
    let scaled_width = tex_width * scale;
    let scaled_height = tex_height * scale;

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        Rectangle::new(
            area.x + (area.width - scaled_width) * 0.5,
            area.y + (area.height - scaled_height) * 0.5,
            scaled_width,
            scaled_height,
        ),
        Vector2::new(0.0, 0.0),
        0.0,
        with_opacity(Color::WHITE, slide.opacity()),
    );
}

fn draw_button(d: &mut RaylibDrawHandle, rect: Rectangle, label: &str) {
    d.draw_rectangle_rec(rect, Color::new(255, 255, 255, 40));
    d.draw_rectangle_lines_ex(rect, 3.0, Color::GOLD);
    let width = measure_text(label, BUTTON_SIZE);
    d.draw_text(
        label,
        (rect.x + (rect.width - width as f32) * 0.5) as i32,
        (rect.y + (rect.height - BUTTON_SIZE as f32) * 0.5) as i32,
        BUTTON_SIZE,
        Color::WHITE,
    );
}

fn draw_centered(d: &mut RaylibDrawHandle, text: &str, y: i32, size: i32, color: Color) {
    let width = measure_text(text, size);
    d.draw_text(text, (RENDER_WIDTH - width) / 2, y, size, color);
}

fn draw_lines<'a>(d: &mut RaylibDrawHandle, lines: impl Iterator<Item = &'a str>, top: i32) {
    let mut y = top;
    for line in lines {
        if !line.is_empty() {
            draw_centered(d, line, y, BODY_SIZE, Color::RAYWHITE);
        }
        y += BODY_SIZE + LINE_GAP;
    }
}
