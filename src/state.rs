/// Which page and slide are showing, and whether the music is on.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct NavigationState {
    pub current_page: usize,
    pub current_slide: usize,
    pub is_music_playing: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SlidePhase {
    Hidden,    // Not displayed
    FadingIn,  // Displayed, waiting to start the opacity transition to 1
    Shown,     // Displayed, opacity heading to (or at) 1
    FadingOut, // Opacity heading to 0, hidden once the settle timer fires
}
