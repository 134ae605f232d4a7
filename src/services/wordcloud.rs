//! Word-frequency cloud rendered as SVG.
//!
//! Counts content words across review texts and lays the most frequent ones
//! out on a fixed-width canvas, font size proportional to frequency. Pure
//! string generation, fully deterministic for a given input.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Words rendered at most
const MAX_WORDS: usize = 30;
/// Tokens shorter than this are noise
const MIN_WORD_LEN: usize = 3;

const CANVAS_WIDTH: u32 = 800;
const ROW_HEIGHT: u32 = 64;
const MARGIN: u32 = 20;
const MIN_FONT: f64 = 14.0;
const MAX_FONT: f64 = 52.0;

/// Approximate glyph width as a fraction of font size, enough for layout
const GLYPH_WIDTH_RATIO: f64 = 0.6;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was",
        "one", "our", "out", "has", "him", "his", "how", "man", "new", "now", "old", "see",
        "two", "way", "who", "its", "did", "get", "may", "she", "use", "this", "that", "with",
        "from", "they", "have", "were", "been", "their", "there", "which", "will", "would",
        "what", "when", "than", "then", "them", "these", "those", "some", "into", "just",
        "like", "more", "most", "much", "very", "also", "about", "because", "movie", "film",
    ]
    .into_iter()
    .collect()
});

/// Cycled fill colors, index keyed by rank
const PALETTE: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
];

/// Renders a word cloud over the given review texts.
///
/// No input words yields a valid empty canvas with a placeholder message.
pub fn render_svg(texts: &[String]) -> String {
    let frequencies = count_words(texts);

    let mut ranked: Vec<(&String, &usize)> = frequencies.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(MAX_WORDS);

    if ranked.is_empty() {
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS_WIDTH}\" height=\"120\">\
             <text x=\"{MARGIN}\" y=\"60\" font-size=\"20\" fill=\"#666\">No reviews yet</text>\
             </svg>"
        );
    }

    let max_count = *ranked[0].1 as f64;
    let min_count = *ranked[ranked.len() - 1].1 as f64;

    let mut elements = String::new();
    let mut x = MARGIN as f64;
    let mut y = ROW_HEIGHT;
    for (rank, (word, &count)) in ranked.iter().enumerate() {
        let size = font_size(count as f64, min_count, max_count);
        let width = word.chars().count() as f64 * size * GLYPH_WIDTH_RATIO;

        if x + width > (CANVAS_WIDTH - MARGIN) as f64 && x > MARGIN as f64 {
            x = MARGIN as f64;
            y += ROW_HEIGHT;
        }

        let color = PALETTE[rank % PALETTE.len()];
        elements.push_str(&format!(
            "<text x=\"{x:.0}\" y=\"{y}\" font-size=\"{size:.0}\" \
             font-family=\"sans-serif\" fill=\"{color}\">{word}</text>"
        ));
        x += width + MARGIN as f64;
    }

    let height = y + ROW_HEIGHT / 2;
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS_WIDTH}\" height=\"{height}\">\
         {elements}</svg>"
    )
}

/// Counts content words: lowercased alphabetic tokens, stopwords and short
/// tokens excluded. Alphabetic-only tokens need no XML escaping downstream.
fn count_words(texts: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for text in texts {
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| w.len() >= MIN_WORD_LEN && !STOPWORDS.contains(w))
        {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn font_size(count: f64, min_count: f64, max_count: f64) -> f64 {
    if max_count <= min_count {
        return (MIN_FONT + MAX_FONT) / 2.0;
    }
    MIN_FONT + (count - min_count) / (max_count - min_count) * (MAX_FONT - MIN_FONT)
}
