//! Onam word puzzle: one clue at a time, answered by typing.
//!
//! A correct answer scores a point and moves on after a short pause. Asking
//! Maveli for help fills in the answer and moves on after a longer pause,
//! without scoring.

use std::rc::Rc;
use std::time::Duration;

use crate::config::Timing;
use crate::content::PuzzleEntry;
use crate::timer::{TimerHandle, Timers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    TryAgain,
    Assisted,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Correct => "🎉 Correct! Well done!",
            Feedback::TryAgain => "❌ Try again! Think about Kerala traditions...",
            Feedback::Assisted => {
                "🪔 Maveli leans in and whispers the answer. No point this time, but the feast goes on!"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    /// Finished, or already waiting to move to the next clue.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PuzzleTimer {
    NextClue,
}

#[derive(Debug)]
pub struct PuzzleSession {
    puzzles: Rc<[PuzzleEntry]>,
    success_delay: Duration,
    assist_delay: Duration,
    current: usize,
    input: String,
    input_revision: u64,
    score: u32,
    hint_visible: bool,
    assist_used: bool,
    feedback: Option<Feedback>,
    completed: bool,
    pending: Option<TimerHandle>,
    timers: Timers<PuzzleTimer>,
}

fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

impl PuzzleSession {
    pub fn new(puzzles: Rc<[PuzzleEntry]>, timing: &Timing) -> Self {
        PuzzleSession {
            puzzles,
            success_delay: timing.success_delay(),
            assist_delay: timing.assist_delay(),
            current: 0,
            input: String::new(),
            input_revision: 0,
            score: 0,
            hint_visible: false,
            assist_used: false,
            feedback: None,
            completed: false,
            pending: None,
            timers: Timers::new(),
        }
    }

    pub fn entry(&self) -> &PuzzleEntry {
        &self.puzzles[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.puzzles.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Bumped whenever the session itself overwrites the input, so an
    /// editor widget knows to reload it.
    pub fn input_revision(&self) -> u64 {
        self.input_revision
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn assist_used(&self) -> bool {
        self.assist_used
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_waiting(&self) -> bool {
        self.pending
            .is_some_and(|handle| self.timers.is_pending(handle))
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        if self.completed || self.is_waiting() {
            return SubmitOutcome::Ignored;
        }
        self.input = input.to_string();

        if normalize(input) == self.entry().answer {
            self.score += 1;
            self.feedback = Some(Feedback::Correct);
            self.pending = Some(self.timers.schedule(self.success_delay, PuzzleTimer::NextClue));
            log::info!(
                "puzzle {}/{} solved, score {}",
                self.current + 1,
                self.total(),
                self.score
            );
            SubmitOutcome::Correct
        } else {
            self.feedback = Some(Feedback::TryAgain);
            log::debug!("puzzle {} wrong guess {:?}", self.current + 1, input);
            SubmitOutcome::Incorrect
        }
    }

    pub fn toggle_hint(&mut self) {
        self.hint_visible = !self.hint_visible;
    }

    /// Returns false when help was already used for this clue.
    pub fn request_assist(&mut self) -> bool {
        if self.completed || self.is_waiting() || self.assist_used {
            return false;
        }
        self.assist_used = true;
        self.input = self.entry().answer.clone();
        self.input_revision += 1;
        self.feedback = Some(Feedback::Assisted);
        self.pending = Some(self.timers.schedule(self.assist_delay, PuzzleTimer::NextClue));
        log::info!("puzzle {} answered by Maveli", self.current + 1);
        true
    }

    pub fn reset(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
        self.current = 0;
        self.input.clear();
        self.input_revision += 1;
        self.score = 0;
        self.hint_visible = false;
        self.assist_used = false;
        self.feedback = None;
        self.completed = false;
    }

    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(timer) = self.timers.fire_next(until) {
            match timer {
                PuzzleTimer::NextClue => self.next_clue(),
            }
        }
        self.timers.catch_up(until);
    }

    pub fn until_next_timer(&self) -> Option<Duration> {
        self.timers.until_next()
    }

    fn next_clue(&mut self) {
        self.pending = None;
        if self.current + 1 < self.puzzles.len() {
            self.current += 1;
            self.input.clear();
            self.input_revision += 1;
            self.hint_visible = false;
            self.assist_used = false;
            self.feedback = None;
        } else {
            self.completed = true;
            log::info!("word puzzle finished with {}/{}", self.score, self.total());
        }
    }
}
