//! Lexicon/rule-based sentiment classifier.
//!
//! Scores text with a static valence lexicon plus negation and intensifier
//! rules, then normalizes the summed valence into a compound polarity score in
//! [-1.0, 1.0]. No I/O, no trained model, never fails.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::models::SentimentLabel;

/// Compound score at or above which a text is labeled positive
const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which a text is labeled negative
const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Normalization constant for the compound score
const NORMALIZATION_ALPHA: f64 = 15.0;
/// Valence scaling applied when a negator precedes a lexicon word
const NEGATION_FACTOR: f64 = -0.74;
/// Valence shift contributed by an intensifier or dampener
const BOOSTER_STEP: f64 = 0.293;
/// How many preceding tokens are inspected for negators and boosters
const LOOKBACK_WINDOW: usize = 3;

static VALENCE_LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    vec![
        // positive
        ("good", 1.9),
        ("great", 3.1),
        ("excellent", 2.7),
        ("amazing", 2.8),
        ("wonderful", 2.7),
        ("fantastic", 2.6),
        ("superb", 3.0),
        ("outstanding", 3.1),
        ("brilliant", 2.8),
        ("love", 3.2),
        ("loved", 2.9),
        ("loving", 2.9),
        ("like", 1.5),
        ("liked", 1.7),
        ("best", 3.2),
        ("better", 1.9),
        ("happy", 2.7),
        ("joy", 2.8),
        ("beautiful", 2.9),
        ("perfect", 2.7),
        ("awesome", 3.1),
        ("incredible", 2.6),
        ("magnificent", 3.0),
        ("delightful", 2.8),
        ("pleasant", 2.3),
        ("satisfying", 2.0),
        ("enjoyable", 2.2),
        ("enjoyed", 2.3),
        ("recommend", 1.7),
        ("recommended", 1.8),
        ("impressive", 2.3),
        ("exceptional", 2.7),
        ("remarkable", 2.4),
        ("masterpiece", 3.4),
        ("stunning", 2.6),
        ("gripping", 1.9),
        ("thrilling", 1.8),
        ("funny", 1.9),
        ("hilarious", 2.6),
        ("charming", 2.4),
        ("compelling", 1.8),
        ("captivating", 2.3),
        ("entertaining", 2.1),
        ("engaging", 1.9),
        ("fresh", 1.3),
        ("solid", 1.4),
        ("fun", 2.3),
        ("win", 2.8),
        ("winner", 2.8),
        ("favorite", 2.0),
        ("triumph", 2.7),
        ("flawless", 2.9),
        // negative
        ("bad", -2.5),
        ("terrible", -2.1),
        ("awful", -2.0),
        ("horrible", -2.5),
        ("poor", -2.3),
        ("worst", -3.1),
        ("worse", -2.1),
        ("hate", -2.7),
        ("hated", -3.2),
        ("dislike", -1.6),
        ("disliked", -1.8),
        ("disappointing", -2.2),
        ("disappointed", -2.3),
        ("disappointment", -2.3),
        ("failure", -2.6),
        ("failed", -2.3),
        ("fail", -2.5),
        ("boring", -1.3),
        ("bored", -1.4),
        ("dull", -1.7),
        ("tedious", -1.6),
        ("sad", -2.1),
        ("unhappy", -1.8),
        ("angry", -2.3),
        ("annoyed", -1.8),
        ("annoying", -1.9),
        ("frustrated", -2.1),
        ("frustrating", -2.1),
        ("mess", -1.5),
        ("messy", -1.5),
        ("problem", -1.7),
        ("problems", -1.7),
        ("broken", -1.8),
        ("wrong", -2.1),
        ("useless", -1.8),
        ("waste", -1.8),
        ("wasted", -2.2),
        ("fake", -2.1),
        ("unwatchable", -2.8),
        ("slow", -1.2),
        ("predictable", -1.1),
        ("confusing", -1.4),
        ("incoherent", -1.9),
        ("overrated", -1.6),
        ("bland", -1.5),
        ("forgettable", -1.6),
        ("mediocre", -1.5),
        ("subpar", -1.8),
        ("inferior", -2.0),
        ("pathetic", -2.5),
        ("garbage", -2.6),
        ("trash", -2.3),
        ("atrocious", -2.7),
        ("cringe", -1.7),
        ("lifeless", -1.9),
    ]
    .into_iter()
    .collect()
});

static NEGATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "not", "no", "never", "neither", "nor", "nothing", "nobody", "none", "cannot", "cant",
        "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "werent", "wont", "wouldnt",
        "shouldnt", "couldnt", "hardly", "barely", "scarcely", "without", "lacks", "lacking",
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    vec![
        // intensifiers
        ("absolutely", BOOSTER_STEP),
        ("amazingly", BOOSTER_STEP),
        ("completely", BOOSTER_STEP),
        ("considerably", BOOSTER_STEP),
        ("decidedly", BOOSTER_STEP),
        ("deeply", BOOSTER_STEP),
        ("especially", BOOSTER_STEP),
        ("exceptionally", BOOSTER_STEP),
        ("extremely", BOOSTER_STEP),
        ("fabulously", BOOSTER_STEP),
        ("highly", BOOSTER_STEP),
        ("hugely", BOOSTER_STEP),
        ("incredibly", BOOSTER_STEP),
        ("intensely", BOOSTER_STEP),
        ("really", BOOSTER_STEP),
        ("remarkably", BOOSTER_STEP),
        ("so", BOOSTER_STEP),
        ("thoroughly", BOOSTER_STEP),
        ("totally", BOOSTER_STEP),
        ("truly", BOOSTER_STEP),
        ("utterly", BOOSTER_STEP),
        ("very", BOOSTER_STEP),
        // dampeners
        ("almost", -BOOSTER_STEP),
        ("barely", -BOOSTER_STEP),
        ("fairly", -BOOSTER_STEP),
        ("kind", -BOOSTER_STEP),
        ("kinda", -BOOSTER_STEP),
        ("less", -BOOSTER_STEP),
        ("marginally", -BOOSTER_STEP),
        ("mildly", -BOOSTER_STEP),
        ("moderately", -BOOSTER_STEP),
        ("partly", -BOOSTER_STEP),
        ("slightly", -BOOSTER_STEP),
        ("somewhat", -BOOSTER_STEP),
        ("sort", -BOOSTER_STEP),
        ("sorta", -BOOSTER_STEP),
    ]
    .into_iter()
    .collect()
});

/// Result of sentiment analysis
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentAnalysis {
    pub label: SentimentLabel,
    /// Compound polarity score in [-1.0, 1.0]
    pub score: f64,
    /// Whitespace-token count of the raw input
    pub word_count: usize,
}

/// Maps a compound score onto its label.
///
/// Thresholds are exact: a score of 0.05 is positive and -0.05 is negative.
pub fn label_for(score: f64) -> SentimentLabel {
    if score >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Analyzes the sentiment of the provided text.
///
/// Empty or lexicon-free input yields score 0.0 and a neutral label.
pub fn analyze(text: &str) -> SentimentAnalysis {
    let word_count = text.split_whitespace().count();

    let lowercase = text.to_lowercase();
    let tokens: Vec<&str> = lowercase
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();

    let mut total = 0.0;
    for (i, token) in tokens.iter().enumerate() {
        let Some(&base_valence) = VALENCE_LEXICON.get(token) else {
            continue;
        };

        let mut valence = base_valence;
        let window_start = i.saturating_sub(LOOKBACK_WINDOW);
        for preceding in &tokens[window_start..i] {
            if let Some(&boost) = BOOSTERS.get(preceding) {
                valence += boost * base_valence.signum();
            }
        }
        if tokens[window_start..i].iter().any(|w| NEGATORS.contains(w)) {
            valence *= NEGATION_FACTOR;
        }

        total += valence;
    }

    let score = normalize(total);

    SentimentAnalysis {
        label: label_for(score),
        score,
        word_count,
    }
}

/// Squashes a raw valence sum into [-1.0, 1.0]
fn normalize(sum: f64) -> f64 {
    if sum == 0.0 {
        return 0.0;
    }
    let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    score.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_neutral() {
        let result = analyze("");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.word_count, 0);
    }

    #[test]
    fn test_word_count_is_whitespace_tokens() {
        assert_eq!(analyze("one two  three").word_count, 3);
        assert_eq!(analyze("   ").word_count, 0);
        assert_eq!(analyze("a\nb\tc d").word_count, 4);
    }

    #[test]
    fn test_word_count_ignores_lexicon() {
        // tokens that carry no sentiment still count as words
        let result = analyze("the cat sat on the mat");
        assert_eq!(result.word_count, 6);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_positive_text() {
        let result = analyze("An amazing, wonderful film. I loved it!");
        assert!(result.score > 0.05);
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_negative_text() {
        let result = analyze("Terrible pacing, awful acting, a complete waste of time.");
        assert!(result.score < -0.05);
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let positive = analyze("good");
        let negated = analyze("not good");
        assert!(positive.score > 0.0);
        assert!(negated.score < 0.0);
    }

    #[test]
    fn test_intensifier_raises_magnitude() {
        let plain = analyze("good");
        let boosted = analyze("really good");
        assert!(boosted.score > plain.score);
    }

    #[test]
    fn test_dampener_lowers_magnitude() {
        let plain = analyze("good");
        let dampened = analyze("slightly good");
        assert!(dampened.score < plain.score);
        assert!(dampened.score > 0.0);
    }

    #[test]
    fn test_label_threshold_boundaries() {
        assert_eq!(label_for(0.05), SentimentLabel::Positive);
        assert_eq!(label_for(-0.05), SentimentLabel::Negative);
        assert_eq!(label_for(0.049999), SentimentLabel::Neutral);
        assert_eq!(label_for(-0.049999), SentimentLabel::Neutral);
        assert_eq!(label_for(0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn test_score_stays_in_range() {
        let long_positive = "amazing wonderful fantastic superb outstanding brilliant \
                             masterpiece perfect awesome incredible magnificent delightful"
            .repeat(20);
        let result = analyze(&long_positive);
        assert!(result.score <= 1.0);
        assert!(result.score > 0.9);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let a = analyze("GREAT movie!!!");
        let b = analyze("great movie");
        assert!((a.score - b.score).abs() < 1e-9);
    }
}
