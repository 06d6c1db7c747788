use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, MenuOption};
use crate::games::hunt::{Cell, HuntOutcome};
use crate::games::puzzle::Feedback;
use crate::games::{HuntSession, PuzzleSession, StorySession, WelcomeSession};
use crate::nav::ActiveView;

const TITLE_ART: &str = r#"
 ██████╗ ███╗   ██╗ █████╗ ███╗   ███╗
██╔═══██╗████╗  ██║██╔══██╗████╗ ████║
██║   ██║██╔██╗ ██║███████║██╔████╔██║
██║   ██║██║╚██╗██║██╔══██║██║╚██╔╝██║
╚██████╔╝██║ ╚████║██║  ██║██║ ╚═╝ ██║
 ╚═════╝ ╚═╝  ╚═══╝╚═╝  ╚═╝╚═╝     ╚═╝
"#;

pub fn draw(f: &mut Frame, app: &App) {
    match app.view() {
        ActiveView::Welcome(welcome) => draw_welcome(f, app, welcome),
        ActiveView::WordPuzzle(puzzle) if puzzle.is_completed() => draw_puzzle_result(f, puzzle),
        ActiveView::WordPuzzle(puzzle) => draw_puzzle(f, app, puzzle),
        ActiveView::Story(story) => draw_story(f, app, story),
        ActiveView::HideSeek(hunt) => match hunt.outcome() {
            Some(outcome) => draw_hunt_result(f, hunt, outcome),
            None if hunt.is_started() => draw_hunt(f, app, hunt),
            None => draw_hunt_intro(f, hunt),
        },
    }
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn status_bar(f: &mut Frame, area: Rect, title: &str, mut spans: Vec<Span<'static>>) {
    let mut line = vec![
        Span::styled(format!(" {} ", title), Style::default().fg(Color::Black).bg(Color::Yellow)),
        Span::raw("  "),
    ];
    line.append(&mut spans);
    let status = Paragraph::new(Line::from(line)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(status, area);
}

fn help_line(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, area);
}

fn draw_welcome(f: &mut Frame, app: &App, welcome: &WelcomeSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(f.area());

    let title = Paragraph::new(TITLE_ART)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    if welcome.greeting_visible() {
        let greeting = welcome.greeting();
        let text = Text::from(vec![
            Line::styled(
                greeting.headline.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Line::styled(greeting.quote.clone(), Style::default().fg(Color::LightRed)),
            Line::styled(
                "Choose your festive adventure and celebrate the spirit of Kerala!",
                Style::default().fg(Color::Gray),
            ),
        ]);
        f.render_widget(Paragraph::new(text).alignment(Alignment::Center), chunks[1]);
    }

    if welcome.menu_visible() {
        let lines: Vec<Line> = MenuOption::ALL
            .iter()
            .map(|option| {
                let label = match option {
                    MenuOption::WordPuzzle => "  1  🧩 Word Puzzle  ",
                    MenuOption::Story => "  2  📚 Maveli's Story  ",
                    MenuOption::HideSeek => "  3  🔍 Hide & Seek  ",
                    MenuOption::Quit => "  QUIT  ",
                };
                let style = if *option == app.menu_selection() {
                    highlight()
                } else {
                    Style::default().fg(Color::White)
                };
                Line::styled(label, style)
            })
            .collect();
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[2]);
    }

    let promo = welcome.promo();
    let dots: String = (0..welcome.promo_count())
        .map(|i| if i == welcome.demo_index() { "● " } else { "○ " })
        .collect();
    let carousel = Paragraph::new(Text::from(vec![
        Line::styled(
            format!("{}  {}", promo.emoji, promo.title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::raw(promo.tagline.clone()),
        Line::styled(dots, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Featured "))
    .alignment(Alignment::Center);
    f.render_widget(carousel, centered(chunks[3], 50));

    if welcome.menu_visible() {
        let blessing = Paragraph::new(welcome.greeting().blessing.clone())
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center);
        f.render_widget(blessing, chunks[4]);
    }

    help_line(f, chunks[5], "↑/↓ to select  •  ENTER to confirm  •  1-3 to jump  •  q to quit");
}

fn draw_puzzle(f: &mut Frame, app: &App, puzzle: &PuzzleSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(f.area());

    let mut status = vec![
        Span::styled(
            format!(" Puzzle {} of {} ", puzzle.index() + 1, puzzle.total()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Score: {} ", puzzle.score()),
            Style::default().fg(Color::Yellow),
        ),
    ];
    if puzzle.assist_used() {
        status.push(Span::raw("  "));
        status.push(Span::styled(" Maveli helped ", Style::default().fg(Color::Magenta)));
    }
    status_bar(f, chunks[0], "ONAM WORD PUZZLE", status);

    let clue = Paragraph::new(format!("🧩\n\n{}", puzzle.entry().clue))
        .block(Block::default().borders(Borders::ALL).title(" Clue "))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(clue, chunks[1]);

    f.render_widget(app.answer_box(), chunks[2]);

    if puzzle.hint_visible() {
        let hint = Paragraph::new(format!("Hint: {}", puzzle.entry().hint))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(hint, chunks[3]);
    }

    if let Some(feedback) = puzzle.feedback() {
        let style = match feedback {
            Feedback::Correct => Style::default().fg(Color::Black).bg(Color::Green),
            Feedback::TryAgain => Style::default().fg(Color::Red),
            Feedback::Assisted => Style::default().fg(Color::Magenta),
        };
        let message = Paragraph::new(feedback.message())
            .block(Block::default().borders(Borders::ALL).title(" Maveli Says "))
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        f.render_widget(message, chunks[4]);
    }
}

fn draw_puzzle_result(f: &mut Frame, puzzle: &PuzzleSession) {
    let text = Text::from(vec![
        Line::raw("🏆"),
        Line::raw(""),
        Line::styled(
            "Congratulations!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(format!("You scored {} out of {}!", puzzle.score(), puzzle.total())),
        Line::styled(
            "You know your Onam traditions well! 🌺",
            Style::default().fg(Color::Gray),
        ),
        Line::raw(""),
        Line::styled("[r] Play Again    [Esc] Back to Games", Style::default().fg(Color::Cyan)),
    ]);
    draw_result_card(f, text);
}

fn draw_story(f: &mut Frame, app: &App, story: &StorySession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    status_bar(
        f,
        chunks[0],
        "THE LEGEND OF MAHABALI",
        vec![Span::styled(
            format!(" Chapter {} of {} ", story.index() + 1, story.total()),
            Style::default().fg(Color::Cyan),
        )],
    );

    let chapter = story.chapter();
    let title = Paragraph::new(format!("{}  {}", chapter.emoji, chapter.title))
        .style(Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let body = Paragraph::new(chapter.body.as_str())
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));
    f.render_widget(body, chunks[2]);

    let choices: Vec<Line> = chapter
        .choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let style = if i == app.story_selection() {
                highlight()
            } else {
                Style::default().fg(Color::White)
            };
            Line::styled(format!(" {}. {} ", i + 1, choice), style)
        })
        .collect();
    let choices =
        Paragraph::new(choices).block(Block::default().borders(Borders::ALL).title(" What next? "));
    f.render_widget(choices, chunks[3]);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Story Progress "))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(story.progress());
    f.render_widget(progress, chunks[4]);

    help_line(f, chunks[5], "1/2 or ↑/↓ + ENTER to choose  •  Esc back to games");
}

fn draw_hunt_intro(f: &mut Frame, hunt: &HuntSession) {
    let mut lines = vec![
        Line::styled(
            "Find the Onam Treasures",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("🔍"),
        Line::raw(""),
        Line::raw(format!(
            "Find all {} hidden Onam items before time runs out!",
            hunt.total()
        )),
        Line::raw(""),
    ];
    for (item, _) in hunt.items() {
        lines.push(Line::raw(format!("{}  {}", item.emoji, item.name)));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!("[Enter] Start Game ({} seconds)", hunt.duration()),
        highlight(),
    ));
    lines.push(Line::styled("[Esc] Back to Games", Style::default().fg(Color::DarkGray)));
    draw_result_card(f, Text::from(lines));
}

fn draw_hunt(f: &mut Frame, app: &App, hunt: &HuntSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8), Constraint::Length(1)])
        .split(f.area());

    let clock_color = if hunt.time_left() > 10 { Color::Green } else { Color::Red };
    status_bar(
        f,
        chunks[0],
        "FIND THE ONAM TREASURES",
        vec![
            Span::styled(
                format!(" Found: {}/{} ", hunt.found_count(), hunt.total()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" Time: {}s ", hunt.time_left()),
                Style::default().fg(clock_color),
            ),
        ],
    );

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let cursor = app.cursor();
    let mut rows = vec![Line::raw("")];
    for (r, cells) in hunt.grid().rows().enumerate() {
        let spans: Vec<Span> = cells
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                let (symbol, mut style) = match cell {
                    Cell::Revealed(_) => {
                        (" ✓ ", Style::default().fg(Color::Black).bg(Color::Green))
                    }
                    Cell::Empty | Cell::Holds(_) => {
                        (" ? ", Style::default().fg(Color::White).bg(Color::DarkGray))
                    }
                };
                if (r, c) == cursor {
                    style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                }
                Span::styled(format!("{} ", symbol), style)
            })
            .collect();
        rows.push(Line::from(spans));
        rows.push(Line::raw(""));
    }
    let grid = Paragraph::new(rows)
        .block(Block::default().borders(Borders::ALL).title(" The Courtyard "))
        .alignment(Alignment::Center);
    f.render_widget(grid, main[0]);

    let items: Vec<Line> = hunt
        .items()
        .map(|(item, found)| {
            if found {
                Line::styled(
                    format!(" {}  {}  ✓", item.emoji, item.name),
                    Style::default().fg(Color::Green),
                )
            } else {
                Line::styled(
                    format!(" {}  {}", item.emoji, item.name),
                    Style::default().fg(Color::DarkGray),
                )
            }
        })
        .collect();
    let title = match app.last_found().and_then(|i| hunt.items().nth(i)) {
        Some((item, _)) => format!(" Found the {}! ", item.name),
        None => " Treasures ".to_string(),
    };
    let checklist =
        Paragraph::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(checklist, main[1]);

    help_line(f, chunks[2], "arrows/hjkl move  •  ENTER/space look  •  r restart  •  Esc back");
}

fn draw_hunt_result(f: &mut Frame, hunt: &HuntSession, outcome: HuntOutcome) {
    let mut lines = vec![
        Line::raw(outcome.emoji()),
        Line::raw(""),
        Line::styled(
            outcome.headline(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(format!(
            "You found {} out of {} items!",
            hunt.found_count(),
            hunt.total()
        )),
    ];
    if outcome == HuntOutcome::AllFound {
        lines.push(Line::styled(
            "You found all the Onam treasures! 🌺",
            Style::default().fg(Color::Gray),
        ));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "[r] Play Again    [Esc] Back to Games",
        Style::default().fg(Color::Cyan),
    ));
    draw_result_card(f, Text::from(lines));
}

fn draw_result_card(f: &mut Frame, text: Text) {
    let height = text.lines.len() as u16 + 2;
    let area = f.area();
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let card = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(card, centered(vertical[1], 60));
}

/// A horizontally centered slice of `area`, `width` columns wide at most.
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
