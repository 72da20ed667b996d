use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Intro,
    Story,
    Gallery,
    Celebration,
    Finale,
}

/// Side effects run, in order, each time a page is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEffect {
    RestartTypewriter,
    EnterGallery,
    StartConfetti,
    StartMusic,
    ScheduleMusicFade,
}

impl PageKind {
    pub fn entry_effects(self) -> &'static [PageEffect] {
        match self {
            PageKind::Intro => &[PageEffect::RestartTypewriter],
            PageKind::Story => &[],
            PageKind::Gallery => &[PageEffect::EnterGallery],
            PageKind::Celebration => &[PageEffect::StartConfetti, PageEffect::StartMusic],
            PageKind::Finale => &[PageEffect::ScheduleMusicFade],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub index: usize,
    pub kind: PageKind,
    pub title: String,
    pub body: Vec<String>,
    pub active: bool,
}

impl Page {
    pub fn new(index: usize, kind: PageKind, title: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            index,
            kind,
            title: title.into(),
            body,
            active: false,
        }
    }

    pub fn effects(&self) -> &'static [PageEffect] {
        self.kind.entry_effects()
    }
}
