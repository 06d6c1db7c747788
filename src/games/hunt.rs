//! Find the Onam treasures: festival items hidden on a 6x6 grid, found one
//! cell at a time against a countdown.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;
use std::time::Duration;

use crate::config::{HuntRules, Timing};
use crate::content::HiddenItem;
use crate::timer::Timers;

pub const GRID_SIZE: usize = 6;
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// A grid cell. Item cells carry the index into the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Holds(usize),
    Revealed(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameGrid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl GameGrid {
    /// Places items `0..item_count` on distinct cells, each drawn uniformly
    /// from the cells still free.
    pub fn generate<R: Rng + ?Sized>(item_count: usize, rng: &mut R) -> Self {
        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        let mut free: Vec<(usize, usize)> = (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
            .collect();

        for item in 0..item_count {
            if free.is_empty() {
                break;
            }
            let (row, col) = free.swap_remove(rng.gen_range(0..free.len()));
            cells[row][col] = Cell::Holds(item);
        }

        GameGrid { cells }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; GRID_SIZE]> {
        self.cells.iter()
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntOutcome {
    AllFound,
    TimeUp,
}

impl HuntOutcome {
    pub fn headline(&self) -> &'static str {
        match self {
            HuntOutcome::AllFound => "Amazing!",
            HuntOutcome::TimeUp => "Time's Up!",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            HuntOutcome::AllFound => "🎉",
            HuntOutcome::TimeUp => "⏰",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Found(usize),
    Miss,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HuntTimer {
    Tick,
}

#[derive(Debug)]
pub struct HuntSession {
    items: Rc<[HiddenItem]>,
    found: Vec<bool>,
    grid: GameGrid,
    found_count: usize,
    duration: u32,
    time_left: u32,
    started: bool,
    completed: bool,
    tick_every: Duration,
    timers: Timers<HuntTimer>,
    rng: SmallRng,
}

impl HuntSession {
    pub fn new(items: Rc<[HiddenItem]>, rules: &HuntRules, timing: &Timing) -> Self {
        Self::with_rng(items, rules, timing, SmallRng::from_entropy())
    }

    pub fn with_rng(
        items: Rc<[HiddenItem]>,
        rules: &HuntRules,
        timing: &Timing,
        mut rng: SmallRng,
    ) -> Self {
        let grid = GameGrid::generate(items.len(), &mut rng);
        HuntSession {
            found: vec![false; items.len()],
            items,
            grid,
            found_count: 0,
            duration: rules.duration_seconds,
            time_left: rules.duration_seconds,
            started: false,
            completed: false,
            tick_every: timing.tick(),
            timers: Timers::new(),
            rng,
        }
    }

    pub fn grid(&self) -> &GameGrid {
        &self.grid
    }

    /// Each item paired with whether it has been found.
    pub fn items(&self) -> impl Iterator<Item = (&HiddenItem, bool)> {
        self.items.iter().zip(self.found.iter().copied())
    }

    pub fn found_count(&self) -> usize {
        self.found_count
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn outcome(&self) -> Option<HuntOutcome> {
        if !self.completed {
            None
        } else if self.found_count == self.items.len() {
            Some(HuntOutcome::AllFound)
        } else {
            Some(HuntOutcome::TimeUp)
        }
    }

    pub fn start(&mut self) {
        if self.started || self.completed {
            return;
        }
        self.started = true;
        self.timers.schedule(self.tick_every, HuntTimer::Tick);
        log::info!("hunt started, {} seconds on the clock", self.time_left);
    }

    pub fn tick(&mut self) {
        if !self.started || self.completed {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        log::debug!("hunt clock {}s", self.time_left);
        if self.time_left == 0 {
            self.finish();
        }
    }

    pub fn reveal(&mut self, row: usize, col: usize) -> RevealOutcome {
        if !self.started || self.completed {
            return RevealOutcome::Ignored;
        }
        match self.grid.cell(row, col) {
            None => RevealOutcome::Ignored,
            Some(Cell::Holds(item)) => {
                self.grid.set(row, col, Cell::Revealed(item));
                self.found[item] = true;
                self.found_count += 1;
                log::info!(
                    "found {} at ({}, {}), {}/{}",
                    self.items[item].name,
                    row,
                    col,
                    self.found_count,
                    self.items.len()
                );
                if self.found_count == self.items.len() {
                    self.finish();
                }
                RevealOutcome::Found(item)
            }
            Some(Cell::Empty) | Some(Cell::Revealed(_)) => {
                log::debug!("miss at ({}, {})", row, col);
                RevealOutcome::Miss
            }
        }
    }

    pub fn reset(&mut self) {
        self.timers.clear();
        self.found.iter_mut().for_each(|f| *f = false);
        self.found_count = 0;
        self.time_left = self.duration;
        self.started = false;
        self.completed = false;
        self.grid = GameGrid::generate(self.items.len(), &mut self.rng);
    }

    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(timer) = self.timers.fire_next(until) {
            match timer {
                HuntTimer::Tick => {
                    self.tick();
                    if self.started && !self.completed {
                        self.timers.schedule(self.tick_every, HuntTimer::Tick);
                    }
                }
            }
        }
        self.timers.catch_up(until);
    }

    pub fn until_next_timer(&self) -> Option<Duration> {
        self.timers.until_next()
    }

    fn finish(&mut self) {
        self.completed = true;
        self.timers.clear();
        log::info!(
            "hunt over: {}/{} found with {}s left",
            self.found_count,
            self.items.len(),
            self.time_left
        );
    }
}
