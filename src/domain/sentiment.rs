//! Lexicon-based sentiment scoring for entry bodies

use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};
use regex::Regex;
use std::sync::OnceLock;

/// Normalization constant; larger values pull scores toward zero
const ALPHA: f64 = 15.0;
/// How many words after a negator have their polarity flipped
const NEGATION_WINDOW: usize = 3;

const POSITIVE: &[(&str, f64)] = &[
    ("happy", 2.0),
    ("happier", 2.0),
    ("joy", 2.5),
    ("joyful", 2.5),
    ("love", 2.5),
    ("loved", 2.5),
    ("grateful", 2.5),
    ("gratitude", 2.5),
    ("thankful", 2.0),
    ("calm", 1.5),
    ("peaceful", 2.0),
    ("peace", 1.5),
    ("relaxed", 1.5),
    ("good", 1.5),
    ("great", 2.0),
    ("wonderful", 2.5),
    ("amazing", 2.5),
    ("hopeful", 2.0),
    ("hope", 1.5),
    ("proud", 2.0),
    ("excited", 2.0),
    ("content", 1.0),
    ("energized", 1.5),
    ("rested", 1.5),
    ("kind", 1.5),
    ("better", 1.0),
    ("confident", 2.0),
    ("inspired", 2.0),
    ("connected", 1.5),
    ("safe", 1.5),
    ("light", 1.0),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("sad", -2.0),
    ("sadness", -2.0),
    ("unhappy", -2.0),
    ("angry", -2.5),
    ("anger", -2.5),
    ("anxious", -2.0),
    ("anxiety", -2.0),
    ("afraid", -2.0),
    ("fear", -2.0),
    ("scared", -2.0),
    ("worried", -1.5),
    ("worry", -1.5),
    ("stressed", -2.0),
    ("stress", -1.5),
    ("tired", -1.0),
    ("exhausted", -2.0),
    ("lonely", -2.0),
    ("alone", -1.0),
    ("bad", -1.5),
    ("terrible", -2.5),
    ("awful", -2.5),
    ("hurt", -2.0),
    ("hate", -2.5),
    ("frustrated", -2.0),
    ("overwhelmed", -2.0),
    ("lost", -1.5),
    ("stuck", -1.5),
    ("guilty", -1.5),
    ("ashamed", -2.0),
    ("worse", -1.5),
    ("drained", -1.5),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "didn't", "didnt", "isn't", "isnt", "wasn't",
    "wasnt", "can't", "cant", "won't", "wont", "hardly",
];

fn word_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?").unwrap())
}

fn valence(word: &str) -> Option<f64> {
    POSITIVE
        .iter()
        .chain(NEGATIVE.iter())
        .find(|(w, _)| *w == word)
        .map(|(_, v)| *v)
}

/// Plain prose of a markdown document, without code blocks or inline code
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::new();
    let mut in_code_block = false;

    for event in MdParser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) if !in_code_block => {
                text.push_str(&t);
                text.push(' ');
            }
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph) => {
                text.push(' ');
            }
            _ => {}
        }
    }

    text
}

/// Score text in [-1, 1]; text with no known words scores 0
pub fn score(markdown: &str) -> f64 {
    let text = plain_text(markdown).to_lowercase();
    let mut total = 0.0;
    let mut negate_for = 0usize;

    for m in word_regex().find_iter(&text) {
        let word = m.as_str();
        if NEGATORS.contains(&word) {
            negate_for = NEGATION_WINDOW;
            continue;
        }

        if let Some(v) = valence(word) {
            total += if negate_for > 0 { -v } else { v };
        }
        negate_for = negate_for.saturating_sub(1);
    }

    if total == 0.0 {
        return 0.0;
    }

    let normalized = total / (total * total + ALPHA).sqrt();
    (normalized.clamp(-1.0, 1.0) * 100.0).round() / 100.0
}
