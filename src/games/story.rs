//! The Legend of Mahabali, told one chapter at a time.
//!
//! Both choices on a chapter lead to the next one; they only change how the
//! reader phrases the question. The last chapter offers a restart or a way
//! back to the games.

use std::rc::Rc;

use crate::content::StoryChapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryStep {
    Advanced(usize),
    Restarted,
    Exit,
    Ignored,
}

#[derive(Debug)]
pub struct StorySession {
    chapters: Rc<[StoryChapter]>,
    current: usize,
}

impl StorySession {
    pub fn new(chapters: Rc<[StoryChapter]>) -> Self {
        StorySession {
            chapters,
            current: 0,
        }
    }

    pub fn chapter(&self) -> &StoryChapter {
        &self.chapters[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_final(&self) -> bool {
        self.current + 1 == self.chapters.len()
    }

    pub fn progress(&self) -> f64 {
        (self.current + 1) as f64 / self.chapters.len() as f64
    }

    pub fn choose(&mut self, choice: usize) -> StoryStep {
        if choice > 1 {
            return StoryStep::Ignored;
        }
        if !self.is_final() {
            self.current += 1;
            return StoryStep::Advanced(self.current);
        }
        if choice == 0 {
            self.current = 0;
            log::info!("story restarted");
            StoryStep::Restarted
        } else {
            StoryStep::Exit
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}
