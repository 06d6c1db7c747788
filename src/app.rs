use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use std::time::Duration;
use tui_textarea::{CursorMove, TextArea};

use crate::config::Config;
use crate::content::Content;
use crate::games::hunt::{RevealOutcome, GRID_SIZE};
use crate::games::puzzle::SubmitOutcome;
use crate::games::{HuntSession, PuzzleSession, StorySession, StoryStep};
use crate::nav::{ActiveView, Navigator, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    WordPuzzle,
    Story,
    HideSeek,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::WordPuzzle,
        MenuOption::Story,
        MenuOption::HideSeek,
        MenuOption::Quit,
    ];

    fn next(&self) -> Self {
        match self {
            MenuOption::WordPuzzle => MenuOption::Story,
            MenuOption::Story => MenuOption::HideSeek,
            MenuOption::HideSeek => MenuOption::Quit,
            MenuOption::Quit => MenuOption::WordPuzzle,
        }
    }

    fn prev(&self) -> Self {
        match self {
            MenuOption::WordPuzzle => MenuOption::Quit,
            MenuOption::Story => MenuOption::WordPuzzle,
            MenuOption::HideSeek => MenuOption::Story,
            MenuOption::Quit => MenuOption::HideSeek,
        }
    }

    fn target(&self) -> Option<Screen> {
        match self {
            MenuOption::WordPuzzle => Some(Screen::WordPuzzle),
            MenuOption::Story => Some(Screen::Story),
            MenuOption::HideSeek => Some(Screen::HideSeek),
            MenuOption::Quit => None,
        }
    }
}

pub struct App {
    nav: Navigator,
    pub running: bool,
    menu_selection: MenuOption,
    story_selection: usize,
    cursor: (usize, usize),
    last_found: Option<usize>,
    answer_box: TextArea<'static>,
    answer_revision: u64,
}

fn answer_box(text: &str) -> TextArea<'static> {
    let mut area = TextArea::new(vec![text.to_string()]);
    area.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your Answer [Enter: Submit | F1: Hint | F2: Ask Maveli | Esc: Back] "),
    );
    area.set_cursor_line_style(Style::default());
    area.set_placeholder_text("Enter your answer...");
    area.set_placeholder_style(Style::default().fg(Color::DarkGray));
    area.move_cursor(CursorMove::End);
    area
}

impl App {
    pub fn new(content: Content, config: Config) -> Self {
        App {
            nav: Navigator::new(content, config),
            running: true,
            menu_selection: MenuOption::WordPuzzle,
            story_selection: 0,
            cursor: (0, 0),
            last_found: None,
            answer_box: answer_box(""),
            answer_revision: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.nav.screen()
    }

    pub fn view(&self) -> &ActiveView {
        self.nav.view()
    }

    pub fn menu_selection(&self) -> MenuOption {
        self.menu_selection
    }

    pub fn story_selection(&self) -> usize {
        self.story_selection
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Index of the item the most recent reveal turned up.
    pub fn last_found(&self) -> Option<usize> {
        self.last_found
    }

    pub fn answer_box(&self) -> &TextArea<'static> {
        &self.answer_box
    }

    pub fn answer_text(&self) -> String {
        self.answer_box.lines().join("")
    }

    pub fn select_game(&mut self, screen: Screen) {
        self.nav.select(screen);
        self.clear_ui_state();
    }

    pub fn go_back(&mut self) {
        self.nav.back();
        self.clear_ui_state();
    }

    pub fn submit_answer(&mut self, text: &str) -> Option<SubmitOutcome> {
        let outcome = self.puzzle_mut()?.submit(text);
        Some(outcome)
    }

    pub fn toggle_hint(&mut self) {
        if let Some(puzzle) = self.puzzle_mut() {
            puzzle.toggle_hint();
        }
    }

    pub fn request_assist(&mut self) {
        if let Some(puzzle) = self.puzzle_mut() {
            puzzle.request_assist();
        }
        self.sync_answer_box();
    }

    pub fn choose_story_option(&mut self, index: usize) {
        let Some(story) = self.story_mut() else {
            return;
        };
        match story.choose(index) {
            StoryStep::Exit => self.go_back(),
            StoryStep::Advanced(chapter) => {
                log::debug!("story at chapter {}", chapter + 1);
                self.story_selection = 0;
            }
            StoryStep::Restarted => self.story_selection = 0,
            StoryStep::Ignored => {}
        }
    }

    pub fn start_hunt(&mut self) {
        if let Some(hunt) = self.hunt_mut() {
            hunt.start();
        }
    }

    pub fn reveal_cell(&mut self, row: usize, col: usize) -> Option<RevealOutcome> {
        let outcome = self.hunt_mut()?.reveal(row, col);
        if let RevealOutcome::Found(item) = outcome {
            self.last_found = Some(item);
        }
        Some(outcome)
    }

    pub fn reset_game(&mut self) {
        match self.nav.view_mut() {
            ActiveView::Welcome(_) => return,
            ActiveView::WordPuzzle(puzzle) => puzzle.reset(),
            ActiveView::Story(story) => story.reset(),
            ActiveView::HideSeek(hunt) => hunt.reset(),
        }
        log::info!("{} reset", self.screen().id());
        self.clear_ui_state();
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.nav.view_mut().advance(elapsed);
        self.sync_answer_box();
    }

    /// One pass of the event loop. The clock is brought up to the moment the
    /// key arrived before the key is handled, so any timer the key schedules
    /// starts counting from the press.
    pub fn step(&mut self, elapsed: Duration, key: Option<KeyEvent>) {
        self.advance(elapsed);
        if let Some(key) = key {
            self.handle_key(key);
        }
    }

    pub fn until_next_timer(&self) -> Option<Duration> {
        self.nav.view().until_next_timer()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }
        match self.screen() {
            Screen::Welcome => self.handle_welcome_key(key),
            Screen::WordPuzzle => self.handle_puzzle_key(key),
            Screen::Story => self.handle_story_key(key),
            Screen::HideSeek => self.handle_hunt_key(key),
        }
    }

    fn handle_welcome_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.menu_selection = self.menu_selection.prev(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.menu_selection = self.menu_selection.next()
            }
            KeyCode::Enter => match self.menu_selection.target() {
                Some(screen) => self.select_game(screen),
                None => self.running = false,
            },
            KeyCode::Char('1') => self.select_game(Screen::WordPuzzle),
            KeyCode::Char('2') => self.select_game(Screen::Story),
            KeyCode::Char('3') => self.select_game(Screen::HideSeek),
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            _ => {}
        }
    }

    fn handle_puzzle_key(&mut self, key: KeyEvent) {
        let Some(puzzle) = self.puzzle_mut() else {
            return;
        };
        let (completed, waiting) = (puzzle.is_completed(), puzzle.is_waiting());

        if completed {
            match key.code {
                KeyCode::Char('r') | KeyCode::Enter => self.reset_game(),
                KeyCode::Esc | KeyCode::Char('q') => self.go_back(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => {
                let text = self.answer_text();
                self.submit_answer(&text);
            }
            KeyCode::F(1) => self.toggle_hint(),
            KeyCode::F(2) => self.request_assist(),
            _ if !waiting => {
                if self.answer_box.input(key) {
                    let text = self.answer_text();
                    if let Some(puzzle) = self.puzzle_mut() {
                        puzzle.set_input(&text);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_story_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.go_back(),
            KeyCode::Char('1') => self.choose_story_option(0),
            KeyCode::Char('2') => self.choose_story_option(1),
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                self.story_selection = 1 - self.story_selection
            }
            KeyCode::Enter => self.choose_story_option(self.story_selection),
            _ => {}
        }
    }

    fn handle_hunt_key(&mut self, key: KeyEvent) {
        let Some(hunt) = self.hunt_mut() else {
            return;
        };
        let (started, completed) = (hunt.is_started(), hunt.is_completed());

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.go_back(),
            KeyCode::Char('r') => self.reset_game(),
            KeyCode::Enter if completed => self.reset_game(),
            KeyCode::Enter | KeyCode::Char('s') if !started => self.start_hunt(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let (row, col) = self.cursor;
                self.reveal_cell(row, col);
            }
            KeyCode::Up | KeyCode::Char('k') => self.cursor.0 = self.cursor.0.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor.0 = (self.cursor.0 + 1).min(GRID_SIZE - 1)
            }
            KeyCode::Left | KeyCode::Char('h') => self.cursor.1 = self.cursor.1.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor.1 = (self.cursor.1 + 1).min(GRID_SIZE - 1)
            }
            _ => {}
        }
    }

    fn puzzle_mut(&mut self) -> Option<&mut PuzzleSession> {
        match self.nav.view_mut() {
            ActiveView::WordPuzzle(puzzle) => Some(puzzle),
            _ => None,
        }
    }

    fn story_mut(&mut self) -> Option<&mut StorySession> {
        match self.nav.view_mut() {
            ActiveView::Story(story) => Some(story),
            _ => None,
        }
    }

    fn hunt_mut(&mut self) -> Option<&mut HuntSession> {
        match self.nav.view_mut() {
            ActiveView::HideSeek(hunt) => Some(hunt),
            _ => None,
        }
    }

    fn clear_ui_state(&mut self) {
        self.story_selection = 0;
        self.cursor = (0, 0);
        self.last_found = None;
        self.answer_box = answer_box("");
        self.answer_revision = 0;
        self.sync_answer_box();
    }

    /// Reloads the answer box when the puzzle replaced the input itself
    /// (assist, next clue, reset).
    fn sync_answer_box(&mut self) {
        let ActiveView::WordPuzzle(puzzle) = self.nav.view() else {
            return;
        };
        if puzzle.input_revision() != self.answer_revision {
            self.answer_revision = puzzle.input_revision();
            self.answer_box = answer_box(puzzle.input());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::games::hunt::Cell;
    use crate::ui;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(content::builtin().unwrap(), Config::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| ui::draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn hidden_cells(app: &App) -> Vec<(usize, usize)> {
        let ActiveView::HideSeek(hunt) = app.view() else {
            panic!("not on the hunt screen");
        };
        let mut cells = Vec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if let Some(Cell::Holds(_)) = hunt.grid().cell(row, col) {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    #[test]
    fn finding_everything_shows_amazing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.screen(), Screen::HideSeek);
        assert!(screen_text(&app).contains("Start Game (60 seconds)"));

        press(&mut app, KeyCode::Enter);
        app.advance(Duration::from_secs(10));
        for (row, col) in hidden_cells(&app) {
            assert!(matches!(app.reveal_cell(row, col), Some(RevealOutcome::Found(_))));
        }

        let text = screen_text(&app);
        assert!(text.contains("Amazing!"), "{}", text);
        assert!(text.contains("You found 6 out of 6 items!"));
    }

    #[test]
    fn running_out_of_time_shows_times_up() {
        let mut app = app();
        app.select_game(Screen::HideSeek);
        app.start_hunt();
        let first = hidden_cells(&app)[0];
        app.reveal_cell(first.0, first.1);

        app.advance(Duration::from_secs(59));
        assert!(screen_text(&app).contains("Time: 1s"));
        app.advance(Duration::from_secs(1));

        let text = screen_text(&app);
        assert!(text.contains("Time's Up!"), "{}", text);
        assert!(text.contains("You found 1 out of 6 items!"));
    }

    #[test]
    fn cursor_reveal_through_keys() {
        let mut app = app();
        app.select_game(Screen::HideSeek);
        press(&mut app, KeyCode::Char('s'));
        let (row, col) = hidden_cells(&app)[0];
        for _ in 0..row {
            press(&mut app, KeyCode::Down);
        }
        for _ in 0..col {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.cursor(), (row, col));
        press(&mut app, KeyCode::Char(' '));

        let ActiveView::HideSeek(hunt) = app.view() else {
            panic!("left the hunt");
        };
        assert_eq!(hunt.found_count(), 1);
    }

    #[test]
    fn cursor_stays_on_grid() {
        let mut app = app();
        app.select_game(Screen::HideSeek);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor(), (0, 0));
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.cursor(), (GRID_SIZE - 1, GRID_SIZE - 1));
    }

    #[test]
    fn typed_answer_is_submitted() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        type_text(&mut app, "  vallam kali ");
        press(&mut app, KeyCode::Enter);

        let ActiveView::WordPuzzle(puzzle) = app.view() else {
            panic!("left the puzzle");
        };
        assert_eq!(puzzle.score(), 1);
        assert!(screen_text(&app).contains("Correct! Well done!"));

        app.advance(Duration::from_millis(1500));
        assert_eq!(app.answer_text(), "");
        assert!(screen_text(&app).contains("Flower carpet made during Onam"));
    }

    #[test]
    fn success_delay_counts_from_the_key_press() {
        let mut app = app();
        app.select_game(Screen::WordPuzzle);
        type_text(&mut app, "vallam kali");

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        app.step(Duration::from_millis(200), Some(enter));
        app.step(Duration::from_millis(1300), None);
        let ActiveView::WordPuzzle(puzzle) = app.view() else {
            panic!("left the puzzle");
        };
        assert_eq!(puzzle.index(), 0);
        assert!(puzzle.is_waiting());

        app.step(Duration::from_millis(200), None);
        let ActiveView::WordPuzzle(puzzle) = app.view() else {
            panic!("left the puzzle");
        };
        assert_eq!(puzzle.index(), 1);
    }

    #[test]
    fn hunt_tick_counts_from_start_key() {
        let mut app = app();
        app.select_game(Screen::HideSeek);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        app.step(Duration::from_millis(200), Some(enter));
        app.step(Duration::from_millis(900), None);
        assert!(screen_text(&app).contains("Time: 60s"));
        app.step(Duration::from_millis(100), None);
        assert!(screen_text(&app).contains("Time: 59s"));
    }

    #[test]
    fn found_item_is_named_on_checklist() {
        let mut app = app();
        app.select_game(Screen::HideSeek);
        app.start_hunt();
        assert!(screen_text(&app).contains(" Treasures "));

        let (row, col) = hidden_cells(&app)[0];
        let Some(RevealOutcome::Found(item)) = app.reveal_cell(row, col) else {
            panic!("nothing found at ({}, {})", row, col);
        };
        assert_eq!(app.last_found(), Some(item));
        let name = content::builtin().unwrap().items[item].name.clone();
        assert!(screen_text(&app).contains(&format!("Found the {}!", name)));

        app.reset_game();
        assert_eq!(app.last_found(), None);
    }

    #[test]
    fn assist_fills_answer_box() {
        let mut app = app();
        app.select_game(Screen::WordPuzzle);
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.answer_text(), "VALLAM KALI");

        // Typing is locked while the next clue is on its way.
        type_text(&mut app, "xyz");
        assert_eq!(app.answer_text(), "VALLAM KALI");

        app.advance(Duration::from_secs(3));
        assert_eq!(app.answer_text(), "");
    }

    #[test]
    fn puzzle_result_screen_offers_replay() {
        let mut app = app();
        app.select_game(Screen::WordPuzzle);
        for _ in 0..5 {
            app.request_assist();
            app.advance(Duration::from_secs(3));
        }
        assert!(screen_text(&app).contains("You scored 0 out of 5!"));

        press(&mut app, KeyCode::Char('r'));
        let ActiveView::WordPuzzle(puzzle) = app.view() else {
            panic!("left the puzzle");
        };
        assert!(!puzzle.is_completed());
        assert_eq!(puzzle.index(), 0);
    }

    #[test]
    fn hint_toggles_with_f1() {
        let mut app = app();
        app.select_game(Screen::WordPuzzle);
        press(&mut app, KeyCode::F(1));
        assert!(screen_text(&app).contains("Two words: ___ KALI"));
        press(&mut app, KeyCode::F(1));
        assert!(!screen_text(&app).contains("Two words: ___ KALI"));
    }

    #[test]
    fn story_exit_returns_to_welcome() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        for _ in 0..7 {
            press(&mut app, KeyCode::Char('1'));
        }
        assert!(screen_text(&app).contains("The Return of Mahabali"));
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.screen(), Screen::Welcome);
    }

    #[test]
    fn story_restart_through_selection() {
        let mut app = app();
        app.select_game(Screen::Story);
        for _ in 0..7 {
            press(&mut app, KeyCode::Enter);
        }
        press(&mut app, KeyCode::Enter);
        let ActiveView::Story(story) = app.view() else {
            panic!("left the story");
        };
        assert_eq!(story.index(), 0);
    }

    #[test]
    fn welcome_menu_navigation() {
        let mut app = app();
        assert_eq!(app.menu_selection(), MenuOption::WordPuzzle);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Story);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Welcome);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.menu_selection(), MenuOption::Quit);
        press(&mut app, KeyCode::Enter);
        assert!(!app.running);
    }

    #[test]
    fn welcome_reveals_over_time() {
        let mut app = app();
        assert!(!screen_text(&app).contains("Welcome to Onam!"));
        app.advance(Duration::from_secs(2));
        let text = screen_text(&app);
        assert!(text.contains("Welcome to Onam!"));
        assert!(text.contains("Hide & Seek"));
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = app();
        app.select_game(Screen::WordPuzzle);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn interaction_points_ignore_other_screens() {
        let mut app = app();
        assert_eq!(app.submit_answer("SADHYA"), None);
        assert_eq!(app.reveal_cell(0, 0), None);
        app.choose_story_option(1);
        app.reset_game();
        assert_eq!(app.screen(), Screen::Welcome);
    }
}
