use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PuzzleEntry {
    pub clue: String,
    pub answer: String, // canonical: trimmed, uppercase
    pub hint: String,
}

#[derive(Debug, Deserialize)]
pub struct PuzzleFile {
    #[serde(rename = "puzzle")]
    pub puzzles: Vec<PuzzleEntry>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoryChapter {
    pub title: String,
    pub emoji: String,
    pub body: String,
    pub choices: [String; 2],
}

#[derive(Debug, Deserialize)]
pub struct ChapterMeta {
    pub number: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChapterFile {
    pub meta: ChapterMeta,
    pub chapter: StoryChapter,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HiddenItem {
    pub name: String,
    pub emoji: String,
}

#[derive(Debug, Deserialize)]
pub struct HuntFile {
    #[serde(rename = "item")]
    pub items: Vec<HiddenItem>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub headline: String,
    pub quote: String,
    pub blessing: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Promo {
    pub emoji: String,
    pub title: String,
    pub tagline: String,
}

#[derive(Debug, Deserialize)]
pub struct WelcomeFile {
    pub greeting: Greeting,
    #[serde(rename = "promo")]
    pub promos: Vec<Promo>,
}
