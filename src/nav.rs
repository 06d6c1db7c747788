//! Which screen is showing. Exactly one session is alive at a time; switching
//! screens drops the old session together with its pending timers.

use std::time::Duration;

use crate::config::Config;
use crate::content::Content;
use crate::games::{HuntSession, PuzzleSession, StorySession, WelcomeSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    WordPuzzle,
    Story,
    HideSeek,
}

impl Screen {
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::WordPuzzle => "word-puzzle",
            Screen::Story => "story",
            Screen::HideSeek => "hide-seek",
        }
    }
}

#[derive(Debug)]
pub enum ActiveView {
    Welcome(WelcomeSession),
    WordPuzzle(PuzzleSession),
    Story(StorySession),
    HideSeek(HuntSession),
}

impl ActiveView {
    pub fn screen(&self) -> Screen {
        match self {
            ActiveView::Welcome(_) => Screen::Welcome,
            ActiveView::WordPuzzle(_) => Screen::WordPuzzle,
            ActiveView::Story(_) => Screen::Story,
            ActiveView::HideSeek(_) => Screen::HideSeek,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        match self {
            ActiveView::Welcome(s) => s.advance(elapsed),
            ActiveView::WordPuzzle(s) => s.advance(elapsed),
            ActiveView::Story(_) => {}
            ActiveView::HideSeek(s) => s.advance(elapsed),
        }
    }

    pub fn until_next_timer(&self) -> Option<Duration> {
        match self {
            ActiveView::Welcome(s) => s.until_next_timer(),
            ActiveView::WordPuzzle(s) => s.until_next_timer(),
            ActiveView::Story(_) => None,
            ActiveView::HideSeek(s) => s.until_next_timer(),
        }
    }
}

pub struct Navigator {
    content: Content,
    config: Config,
    view: ActiveView,
}

impl Navigator {
    pub fn new(content: Content, config: Config) -> Self {
        let view = Self::mount(&content, &config, Screen::Welcome);
        Navigator {
            content,
            config,
            view,
        }
    }

    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ActiveView {
        &mut self.view
    }

    pub fn select(&mut self, target: Screen) {
        log::info!("{} -> {}", self.screen().id(), target.id());
        self.view = Self::mount(&self.content, &self.config, target);
    }

    pub fn back(&mut self) {
        self.select(Screen::Welcome);
    }

    fn mount(content: &Content, config: &Config, screen: Screen) -> ActiveView {
        match screen {
            Screen::Welcome => ActiveView::Welcome(WelcomeSession::new(
                content.greeting.clone(),
                content.promos.clone(),
                &config.timing,
            )),
            Screen::WordPuzzle => {
                ActiveView::WordPuzzle(PuzzleSession::new(content.puzzles.clone(), &config.timing))
            }
            Screen::Story => ActiveView::Story(StorySession::new(content.chapters.clone())),
            Screen::HideSeek => ActiveView::HideSeek(HuntSession::new(
                content.items.clone(),
                &config.hunt,
                &config.timing,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;

    fn navigator() -> Navigator {
        Navigator::new(content::builtin().unwrap(), Config::default())
    }

    #[test]
    fn starts_on_welcome() {
        let nav = navigator();
        assert_eq!(nav.screen(), Screen::Welcome);
        assert!(matches!(nav.view(), ActiveView::Welcome(_)));
    }

    #[test]
    fn select_mounts_matching_session() {
        let mut nav = navigator();
        for screen in [Screen::WordPuzzle, Screen::Story, Screen::HideSeek] {
            nav.select(screen);
            assert_eq!(nav.screen(), screen);
            assert_eq!(nav.view().screen(), screen);
        }
        nav.back();
        assert_eq!(nav.screen(), Screen::Welcome);
    }

    #[test]
    fn reentry_starts_fresh() {
        let mut nav = navigator();
        nav.select(Screen::Story);
        if let ActiveView::Story(story) = nav.view_mut() {
            story.choose(0);
            story.choose(0);
        }
        nav.back();
        nav.select(Screen::Story);
        match nav.view() {
            ActiveView::Story(story) => assert_eq!(story.index(), 0),
            other => panic!("expected story, got {:?}", other.screen()),
        }
    }

    #[test]
    fn abandoned_hunt_clock_does_not_leak() {
        let mut nav = navigator();
        nav.select(Screen::HideSeek);
        if let ActiveView::HideSeek(hunt) = nav.view_mut() {
            hunt.start();
        }
        nav.view_mut().advance(Duration::from_millis(1500));
        nav.back();
        nav.select(Screen::HideSeek);
        nav.view_mut().advance(Duration::from_secs(5));
        match nav.view() {
            ActiveView::HideSeek(hunt) => {
                assert!(!hunt.is_started());
                assert_eq!(hunt.time_left(), 60);
            }
            other => panic!("expected hunt, got {:?}", other.screen()),
        }
    }

    #[test]
    fn story_has_no_timers() {
        let mut nav = navigator();
        nav.select(Screen::Story);
        assert!(nav.view().until_next_timer().is_none());
    }
}
