use raylib::prelude::*;
use tracing::debug;

use crate::audio::Media;
use crate::constants::*;
use crate::layout::{Control, Layout};
use crate::presentation::Presentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,  // Finger moved towards the left edge
    Right,
}

/// Horizontal drag from `start_x` to `end_x`, if it travelled far enough.
pub fn classify_swipe(start_x: f32, end_x: f32) -> Option<SwipeDirection> {
    let distance = start_x - end_x;
    if distance.abs() <= SWIPE_THRESHOLD {
        None
    } else if distance > 0.0 {
        Some(SwipeDirection::Left)
    } else {
        Some(SwipeDirection::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
    Home,
    End,
    Restart,
    ToggleMusic,
}

/// Positions are in render space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    Click(Vector2),
    PointerMove(Vector2),
    TouchStart(Vector2),
    TouchEnd(Vector2),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Gallery(f32),
    Page(f32),
}

pub struct InputRouter {
    layout: Layout,
    drag: Option<Drag>,
}

impl InputRouter {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            drag: None,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn handle<M: Media>(&mut self, event: InputEvent, presentation: &mut Presentation<M>) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key, presentation),
            InputEvent::Click(point) => {
                self.click(point, presentation);
            }
            InputEvent::PointerMove(point) => self.pointer_move(point, presentation),
            InputEvent::TouchStart(point) => {
                self.drag = Some(if presentation.on_gallery() && self.layout.in_gallery(point) {
                    Drag::Gallery(point.x)
                } else {
                    Drag::Page(point.x)
                });
            }
            InputEvent::TouchEnd(point) => self.touch_end(point, presentation),
        }
    }

    fn key_down<M: Media>(&mut self, key: Key, presentation: &mut Presentation<M>) {
        let on_gallery = presentation.on_gallery();
        match key {
            Key::ArrowRight if on_gallery => presentation.next_slide(),
            Key::ArrowRight => presentation.next_page(),
            Key::ArrowLeft if on_gallery => presentation.prev_slide(),
            Key::ArrowLeft => presentation.prev_page(),
            Key::Space if !on_gallery => presentation.next_page(),
            Key::Space => {}
            Key::Home => presentation.first_page(),
            Key::End => presentation.last_page(),
            Key::Restart => presentation.restart(),
            Key::ToggleMusic => presentation.toggle_music(),
        }
    }

    /// Returns true when the click landed on a control.
    fn click<M: Media>(&mut self, point: Vector2, presentation: &mut Presentation<M>) -> bool {
        let kind = presentation.current_page().kind;
        let slide_count = presentation.slider().slides().len();
        let Some(control) = self.layout.control_at(point, kind, presentation.is_last_page(), slide_count) else {
            return false;
        };
        debug!("clicked {:?}", control);
        match control {
            Control::PrevSlide => presentation.prev_slide(),
            Control::NextSlide => presentation.next_slide(),
            Control::Indicator(index) => presentation.go_to_slide(index),
            Control::Continue => presentation.next_page(),
            Control::Restart => presentation.restart(),
            Control::ToggleMusic => presentation.toggle_music(),
        }
        true
    }

    fn pointer_move<M: Media>(&mut self, point: Vector2, presentation: &mut Presentation<M>) {
        // Leaving the page already suspended the slider
        if !presentation.on_gallery() {
            return;
        }
        let hovering = self.layout.in_gallery(point);
        if hovering != presentation.slider().is_hovered() {
            presentation.gallery_hover(hovering);
        }
    }

    fn touch_end<M: Media>(&mut self, point: Vector2, presentation: &mut Presentation<M>) {
        match self.drag.take() {
            Some(Drag::Gallery(start_x)) => presentation.slide_swipe(start_x, point.x),
            Some(Drag::Page(start_x)) => {
                if presentation.on_gallery() && self.layout.in_gallery(point) {
                    return;
                }
                match classify_swipe(start_x, point.x) {
                    Some(SwipeDirection::Left) => presentation.next_page(),
                    Some(SwipeDirection::Right) => presentation.prev_page(),
                    None => {}
                }
            }
            None => {}
        }
    }
}

/// Turns raylib input into router events, scaling the pointer from window to
/// render space.
#[derive(Default)]
pub struct InputPoller {
    pressed_at: Option<Vector2>,
    last_pointer: Option<Vector2>,
}

impl InputPoller {
    pub fn poll(&mut self, rl: &RaylibHandle) -> Vec<InputEvent> {
        let mut events = Vec::new();

        const KEYS: [(KeyboardKey, Key); 7] = [
            (KeyboardKey::KEY_RIGHT, Key::ArrowRight),
            (KeyboardKey::KEY_LEFT, Key::ArrowLeft),
            (KeyboardKey::KEY_SPACE, Key::Space),
            (KeyboardKey::KEY_HOME, Key::Home),
            (KeyboardKey::KEY_END, Key::End),
            (KeyboardKey::KEY_R, Key::Restart),
            (KeyboardKey::KEY_M, Key::ToggleMusic),
        ];
        for (raylib_key, key) in KEYS {
            if rl.is_key_pressed(raylib_key) {
                events.push(InputEvent::KeyDown(key));
            }
        }

        let scale = Vector2::new(
            RENDER_WIDTH as f32 / rl.get_screen_width().max(1) as f32,
            RENDER_HEIGHT as f32 / rl.get_screen_height().max(1) as f32,
        );
        let mouse = rl.get_mouse_position();
        let pointer = Vector2::new(mouse.x * scale.x, mouse.y * scale.y);

        if self.last_pointer != Some(pointer) {
            self.last_pointer = Some(pointer);
            events.push(InputEvent::PointerMove(pointer));
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            self.pressed_at = Some(pointer);
            events.push(InputEvent::TouchStart(pointer));
        }

        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            // A press that barely moved is a click rather than a swipe
            if let Some(start) = self.pressed_at.take() {
                if (start.x - pointer.x).abs() <= SWIPE_THRESHOLD && (start.y - pointer.y).abs() <= SWIPE_THRESHOLD {
                    events.push(InputEvent::Click(pointer));
                }
            }
            events.push(InputEvent::TouchEnd(pointer));
        }

        events
    }
}
