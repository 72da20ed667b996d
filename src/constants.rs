pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second

pub const TYPE_DELAY_MS: u64 = 40;            // Delay between typed characters
pub const NEWLINE_DELAY_MS: u64 = TYPE_DELAY_MS * 2;

pub const SLIDE_INTERVAL_MS: u64 = 5000;      // Gallery auto-advance period
pub const SLIDE_SETTLE_MS: u64 = 500;         // Outgoing slide is hidden after its fade
pub const SLIDE_REVEAL_MS: u64 = 10;          // Incoming slide starts fading in after this
pub const SLIDE_FADE_DURATION: f32 = 0.5;     // Opacity transition length (seconds)

pub const SWIPE_THRESHOLD: f32 = 50.0;        // Minimum horizontal drag for a swipe

pub const MUSIC_FADE_DELAY_MS: u64 = 2000;    // Wait on the final page before fading music
pub const MUSIC_FADE_TICK_MS: u64 = 150;
pub const MUSIC_FADE_STEP: f32 = 0.05;

pub const CONFETTI_COUNT: usize = 100;
