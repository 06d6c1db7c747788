use anyhow::{bail, ensure, Context, Result};
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use super::types::{
    ChapterFile, HiddenItem, HuntFile, PuzzleEntry, PuzzleFile, StoryChapter, WelcomeFile,
};
use super::Content;
use crate::games::hunt::GRID_CELLS;

const BUILTIN_WELCOME: &str = include_str!("../../content/welcome.toml");
const BUILTIN_PUZZLES: &str = include_str!("../../content/puzzles.toml");
const BUILTIN_HUNT: &str = include_str!("../../content/hunt.toml");
const BUILTIN_CHAPTERS: [&str; 8] = [
    include_str!("../../content/story/chapter_01.toml"),
    include_str!("../../content/story/chapter_02.toml"),
    include_str!("../../content/story/chapter_03.toml"),
    include_str!("../../content/story/chapter_04.toml"),
    include_str!("../../content/story/chapter_05.toml"),
    include_str!("../../content/story/chapter_06.toml"),
    include_str!("../../content/story/chapter_07.toml"),
    include_str!("../../content/story/chapter_08.toml"),
];

/// The content compiled into the binary.
pub fn builtin() -> Result<Content> {
    let welcome: WelcomeFile = toml::from_str(BUILTIN_WELCOME)?;
    let puzzles: PuzzleFile = toml::from_str(BUILTIN_PUZZLES)?;
    let hunt: HuntFile = toml::from_str(BUILTIN_HUNT)?;
    let chapters = BUILTIN_CHAPTERS
        .iter()
        .map(|text| toml::from_str(text))
        .collect::<Result<Vec<ChapterFile>, _>>()?;

    assemble(welcome, puzzles, chapters, hunt)
}

/// Loads a content directory with the same layout as the built-in `content/`.
pub fn load_content(dir: &Path) -> Result<Content> {
    let welcome: WelcomeFile = read_toml(&dir.join("welcome.toml"))?;
    let puzzles: PuzzleFile = read_toml(&dir.join("puzzles.toml"))?;
    let hunt: HuntFile = read_toml(&dir.join("hunt.toml"))?;
    let chapters = load_story(&dir.join("story"))?;

    assemble(welcome, puzzles, chapters, hunt)
}

pub fn load_story(story_dir: &Path) -> Result<Vec<ChapterFile>> {
    let pattern = story_dir.join("chapter_*.toml");
    let pattern = pattern.to_string_lossy();

    // glob yields paths in alphabetical order, so chapter_01, chapter_02, ...
    let mut chapters = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        chapters.push(read_toml(&path)?);
    }

    Ok(chapters)
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn assemble(
    welcome: WelcomeFile,
    puzzles: PuzzleFile,
    chapters: Vec<ChapterFile>,
    hunt: HuntFile,
) -> Result<Content> {
    ensure!(!welcome.promos.is_empty(), "welcome needs at least one promo");
    check_puzzles(&puzzles.puzzles)?;
    let chapters = check_chapters(chapters)?;
    check_items(&hunt.items)?;

    Ok(Content {
        greeting: Rc::new(welcome.greeting),
        promos: welcome.promos.into(),
        puzzles: puzzles.puzzles.into(),
        chapters: chapters.into(),
        items: hunt.items.into(),
    })
}

fn check_puzzles(puzzles: &[PuzzleEntry]) -> Result<()> {
    ensure!(!puzzles.is_empty(), "no puzzles found");
    for (i, puzzle) in puzzles.iter().enumerate() {
        let canonical = puzzle.answer.trim().to_uppercase();
        if puzzle.answer.is_empty() || puzzle.answer != canonical {
            bail!(
                "puzzle {} answer {:?} must be non-empty, trimmed and uppercase",
                i + 1,
                puzzle.answer
            );
        }
    }
    Ok(())
}

fn check_chapters(files: Vec<ChapterFile>) -> Result<Vec<StoryChapter>> {
    ensure!(!files.is_empty(), "no story chapters found");
    files
        .into_iter()
        .enumerate()
        .map(|(i, file)| -> Result<StoryChapter> {
            let expected = i as u32 + 1;
            ensure!(
                file.meta.number == expected,
                "chapter {:?} is numbered {} but sits at position {}",
                file.chapter.title,
                file.meta.number,
                expected
            );
            let mut chapter = file.chapter;
            chapter.body = chapter.body.trim().to_string();
            Ok(chapter)
        })
        .collect()
}

fn check_items(items: &[HiddenItem]) -> Result<()> {
    ensure!(!items.is_empty(), "no hidden items found");
    ensure!(
        items.len() <= GRID_CELLS,
        "{} hidden items do not fit on a grid of {} cells",
        items.len(),
        GRID_CELLS
    );
    let mut seen = HashSet::new();
    for item in items {
        ensure!(
            seen.insert(item.emoji.as_str()),
            "hidden item emoji {} is used twice",
            item.emoji
        );
    }
    Ok(())
}
