//! Welcome screen: Maveli's greeting, the game menu, and a promo carousel.

use std::rc::Rc;
use std::time::Duration;

use crate::config::Timing;
use crate::content::{Greeting, Promo};
use crate::timer::Timers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WelcomeTimer {
    ShowGreeting,
    ShowMenu,
    Rotate,
}

#[derive(Debug)]
pub struct WelcomeSession {
    greeting: Rc<Greeting>,
    promos: Rc<[Promo]>,
    demo_index: usize,
    greeting_visible: bool,
    menu_visible: bool,
    demo_interval: Duration,
    timers: Timers<WelcomeTimer>,
}

impl WelcomeSession {
    pub fn new(greeting: Rc<Greeting>, promos: Rc<[Promo]>, timing: &Timing) -> Self {
        let mut timers = Timers::new();
        timers.schedule(timing.greeting_delay(), WelcomeTimer::ShowGreeting);
        timers.schedule(timing.menu_delay(), WelcomeTimer::ShowMenu);
        timers.schedule(timing.demo_interval(), WelcomeTimer::Rotate);

        WelcomeSession {
            greeting,
            promos,
            demo_index: 0,
            greeting_visible: false,
            menu_visible: false,
            demo_interval: timing.demo_interval(),
            timers,
        }
    }

    pub fn greeting(&self) -> &Greeting {
        &self.greeting
    }

    pub fn promo(&self) -> &Promo {
        &self.promos[self.demo_index]
    }

    pub fn demo_index(&self) -> usize {
        self.demo_index
    }

    pub fn promo_count(&self) -> usize {
        self.promos.len()
    }

    pub fn greeting_visible(&self) -> bool {
        self.greeting_visible
    }

    pub fn menu_visible(&self) -> bool {
        self.menu_visible
    }

    pub fn advance_demo(&mut self) {
        self.demo_index = (self.demo_index + 1) % self.promos.len();
    }

    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(timer) = self.timers.fire_next(until) {
            match timer {
                WelcomeTimer::ShowGreeting => self.greeting_visible = true,
                WelcomeTimer::ShowMenu => self.menu_visible = true,
                WelcomeTimer::Rotate => {
                    self.advance_demo();
                    self.timers.schedule(self.demo_interval, WelcomeTimer::Rotate);
                }
            }
        }
        self.timers.catch_up(until);
    }

    pub fn until_next_timer(&self) -> Option<Duration> {
        self.timers.until_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;

    fn session() -> WelcomeSession {
        let content = content::builtin().unwrap();
        WelcomeSession::new(content.greeting, content.promos, &Timing::default())
    }

    #[test]
    fn reveals_greeting_then_menu() {
        let mut s = session();
        assert!(!s.greeting_visible());
        assert!(!s.menu_visible());

        s.advance(Duration::from_millis(500));
        assert!(s.greeting_visible());
        assert!(!s.menu_visible());

        s.advance(Duration::from_millis(1500));
        assert!(s.menu_visible());
    }

    #[test]
    fn demo_wraps_around() {
        let mut s = session();
        assert_eq!(s.promo_count(), 3);
        s.advance_demo();
        s.advance_demo();
        assert_eq!(s.demo_index(), 2);
        s.advance_demo();
        assert_eq!(s.demo_index(), 0);
    }

    #[test]
    fn demo_rotates_every_interval() {
        let mut s = session();
        s.advance(Duration::from_millis(3999));
        assert_eq!(s.demo_index(), 0);
        s.advance(Duration::from_millis(1));
        assert_eq!(s.demo_index(), 1);
        s.advance(Duration::from_secs(8));
        assert_eq!(s.demo_index(), 0);
        assert_eq!(s.until_next_timer(), Some(Duration::from_secs(4)));
    }
}
