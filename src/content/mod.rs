//! Immutable game content: puzzles, story chapters, hidden items and the
//! welcome screen text. Sessions share these tables and never mutate them.

pub mod loader;
pub mod types;

use std::rc::Rc;

pub use loader::{builtin, load_content};
pub use types::{Greeting, HiddenItem, Promo, PuzzleEntry, StoryChapter};

#[derive(Debug, Clone)]
pub struct Content {
    pub greeting: Rc<Greeting>,
    pub promos: Rc<[Promo]>,
    pub puzzles: Rc<[PuzzleEntry]>,
    pub chapters: Rc<[StoryChapter]>,
    pub items: Rc<[HiddenItem]>,
}
