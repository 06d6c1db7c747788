pub mod hunt;
pub mod puzzle;
pub mod story;
pub mod welcome;

pub use hunt::{HuntOutcome, HuntSession};
pub use puzzle::PuzzleSession;
pub use story::{StorySession, StoryStep};
pub use welcome::WelcomeSession;
