//! In-process lexicon sentiment analyzer
//!
//! VADER-style scoring: every token carries a valence from a fixed lexicon,
//! preceding negations flip it and preceding boosters amplify or dampen it,
//! and the summed valence is alpha-normalized into a compound score in
//! [-1, 1]. Labels follow the standard compound thresholds: >= 0.05 is
//! positive, <= -0.05 is negative, anything between is neutral.
//!
//! Runs entirely in-process and never fails, which makes it the one
//! classifier that still answers when both remote sources are down.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use trisent_common::{ClassifierOutput, Sentiment};

use super::Classifier;

/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;

/// Valence multiplier applied when a negation precedes a sentiment word
const NEGATION_SCALAR: f64 = -0.74;

/// Booster increment/decrement magnitude
const BOOSTER_SCALAR: f64 = 0.293;

/// Compound thresholds separating the three classes
const POSITIVE_THRESHOLD: f64 = 0.05;
const NEGATIVE_THRESHOLD: f64 = -0.05;

/// How many preceding tokens are scanned for negations and boosters
const LOOKBACK: usize = 3;

/// Damping applied to boosters two and three tokens before the target
const BOOSTER_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(build_lexicon);
static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(build_negations);
static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(build_boosters);

/// Per-class score breakdown produced by [`VaderAnalyzer::polarity_scores`]
#[derive(Debug, Clone, PartialEq)]
pub struct PolarityScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

/// Lexicon-based sentiment analyzer
pub struct VaderAnalyzer;

impl VaderAnalyzer {
    pub fn new() -> Self {
        // Force lexicon construction at startup rather than first request
        Lazy::force(&LEXICON);
        Lazy::force(&NEGATIONS);
        Lazy::force(&BOOSTERS);
        Self
    }

    /// Score one text.
    ///
    /// `negative`/`neutral`/`positive` are proportions in [0,1] that sum to
    /// ~1 for non-empty text; `compound` is the normalized net valence.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);

        let mut valences: Vec<f64> = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let mut valence = match LEXICON.get(token.as_str()) {
                Some(v) => *v,
                None => {
                    valences.push(0.0);
                    continue;
                }
            };

            // Scan up to LOOKBACK preceding tokens for boosters and negations
            for distance in 1..=LOOKBACK.min(i) {
                let prior = tokens[i - distance].as_str();
                if let Some(boost) = BOOSTERS.get(prior) {
                    let damped = boost * BOOSTER_DAMPING[distance - 1];
                    valence += if valence > 0.0 { damped } else { -damped };
                }
                if NEGATIONS.contains(prior) {
                    valence *= NEGATION_SCALAR;
                }
            }

            valences.push(valence);
        }

        score_valences(&valences)
    }

    /// Map a compound score to a sentiment label
    pub fn label(compound: f64) -> Sentiment {
        if compound >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl Default for VaderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Classifier for VaderAnalyzer {
    fn name(&self) -> &'static str {
        "vader"
    }

    async fn classify(&self, text: &str) -> ClassifierOutput {
        let scores = self.polarity_scores(text);
        let sentiment = Self::label(scores.compound);

        tracing::debug!(
            compound = scores.compound,
            sentiment = sentiment.as_str(),
            "Lexicon analysis complete"
        );

        ClassifierOutput {
            negative: Some(scores.negative),
            neutral: Some(scores.neutral),
            positive: Some(scores.positive),
            compound: Some(scores.compound),
            sentiment,
            error: None,
        }
    }
}

/// Lowercase tokens with surrounding punctuation stripped
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Fold per-token valences into proportions and the compound score
fn score_valences(valences: &[f64]) -> PolarityScores {
    let sum: f64 = valences.iter().sum();
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &v in valences {
        if v > 0.0 {
            pos_sum += v + 1.0;
        } else if v < 0.0 {
            neg_sum += v - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    if total > 0.0 {
        PolarityScores {
            negative: round3(neg_sum.abs() / total),
            neutral: round3(neu_count / total),
            positive: round3(pos_sum / total),
            compound: round4(compound),
        }
    } else {
        PolarityScores {
            negative: 0.0,
            neutral: 0.0,
            positive: 0.0,
            compound: 0.0,
        }
    }
}

/// Alpha-normalize a raw valence sum into [-1, 1]
fn normalize(sum: f64) -> f64 {
    let norm = sum / (sum * sum + ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}

fn build_lexicon() -> HashMap<&'static str, f64> {
    [
        // Positive valences
        ("love", 3.2),
        ("loved", 2.9),
        ("loves", 3.0),
        ("adore", 3.2),
        ("like", 1.5),
        ("liked", 1.7),
        ("likes", 1.6),
        ("great", 3.1),
        ("good", 1.9),
        ("best", 3.2),
        ("better", 1.9),
        ("awesome", 3.1),
        ("amazing", 2.8),
        ("excellent", 2.7),
        ("wonderful", 2.7),
        ("fantastic", 2.6),
        ("superb", 3.1),
        ("brilliant", 2.8),
        ("perfect", 2.7),
        ("beautiful", 2.9),
        ("happy", 2.7),
        ("happiness", 2.9),
        ("joy", 2.8),
        ("glad", 2.0),
        ("delight", 2.9),
        ("delighted", 3.0),
        ("pleased", 1.9),
        ("pleasant", 2.3),
        ("enjoy", 2.2),
        ("enjoyed", 2.3),
        ("fun", 2.3),
        ("nice", 1.8),
        ("cool", 1.3),
        ("impressive", 2.3),
        ("impressed", 2.2),
        ("recommend", 1.5),
        ("recommended", 1.6),
        ("win", 2.8),
        ("winning", 2.4),
        ("won", 2.7),
        ("success", 2.7),
        ("successful", 2.8),
        ("improve", 1.9),
        ("improved", 2.1),
        ("improvement", 2.0),
        ("strong", 2.3),
        ("solid", 1.5),
        ("helpful", 1.9),
        ("thank", 1.9),
        ("thanks", 1.9),
        ("grateful", 3.1),
        ("excited", 2.4),
        ("exciting", 2.2),
        ("hope", 1.9),
        ("hopeful", 2.3),
        ("smile", 2.1),
        ("positive", 2.3),
        ("favorite", 2.0),
        ("fresh", 1.3),
        ("worth", 0.9),
        ("trust", 2.3),
        ("trusted", 2.4),
        ("reliable", 2.1),
        ("safe", 1.8),
        ("easy", 1.9),
        ("clean", 1.7),
        ("smooth", 1.4),
        ("fast", 1.0),
        // Negative valences
        ("hate", -2.7),
        ("hated", -2.9),
        ("hates", -2.6),
        ("dislike", -1.6),
        ("bad", -2.5),
        ("worse", -2.1),
        ("worst", -3.1),
        ("terrible", -2.1),
        ("awful", -2.0),
        ("horrible", -2.5),
        ("horrific", -2.8),
        ("disgusting", -2.9),
        ("dreadful", -2.6),
        ("pathetic", -2.6),
        ("ugly", -2.3),
        ("sad", -2.1),
        ("unhappy", -1.8),
        ("miserable", -2.7),
        ("angry", -2.3),
        ("anger", -2.7),
        ("mad", -2.2),
        ("furious", -2.6),
        ("annoying", -1.9),
        ("annoyed", -1.8),
        ("irritating", -2.0),
        ("disappointing", -2.2),
        ("disappointed", -2.3),
        ("disappointment", -2.2),
        ("poor", -2.1),
        ("fail", -2.5),
        ("failed", -2.3),
        ("failure", -2.4),
        ("broken", -1.6),
        ("broke", -1.4),
        ("wrong", -2.1),
        ("useless", -1.8),
        ("worthless", -2.7),
        ("boring", -1.3),
        ("bored", -1.3),
        ("garbage", -2.2),
        ("trash", -2.2),
        ("scam", -2.6),
        ("fraud", -2.8),
        ("crash", -1.9),
        ("crashed", -1.9),
        ("problem", -1.7),
        ("problems", -1.7),
        ("issue", -1.0),
        ("issues", -1.1),
        ("lose", -2.2),
        ("losing", -2.0),
        ("lost", -1.7),
        ("loss", -1.9),
        ("hurt", -2.0),
        ("pain", -2.1),
        ("painful", -2.2),
        ("fear", -2.2),
        ("afraid", -2.0),
        ("scared", -2.2),
        ("worried", -1.8),
        ("worry", -1.8),
        ("crisis", -2.3),
        ("risk", -1.1),
        ("risky", -1.3),
        ("doubt", -1.5),
        ("negative", -2.3),
        ("slow", -1.2),
        ("expensive", -0.9),
        ("difficult", -1.5),
        ("hard", -0.4),
        ("dead", -3.1),
        ("die", -2.9),
        ("kill", -3.0),
        ("war", -2.9),
        ("disaster", -3.1),
        ("catastrophe", -3.3),
    ]
    .into_iter()
    .collect()
}

fn build_negations() -> HashSet<&'static str> {
    [
        "not", "no", "never", "none", "neither", "nor", "nothing", "nobody", "without", "cannot",
        "cant", "can't", "dont", "don't", "doesnt", "doesn't", "isnt", "isn't", "wasnt", "wasn't",
        "werent", "weren't", "wont", "won't", "wouldnt", "wouldn't", "shouldnt", "shouldn't",
        "couldnt", "couldn't", "didnt", "didn't", "aint", "ain't", "hasnt", "hasn't", "havent",
        "haven't", "hadnt", "hadn't", "rarely", "hardly", "barely",
    ]
    .into_iter()
    .collect()
}

fn build_boosters() -> HashMap<&'static str, f64> {
    [
        // Intensifiers
        ("very", BOOSTER_SCALAR),
        ("really", BOOSTER_SCALAR),
        ("extremely", BOOSTER_SCALAR),
        ("absolutely", BOOSTER_SCALAR),
        ("completely", BOOSTER_SCALAR),
        ("totally", BOOSTER_SCALAR),
        ("incredibly", BOOSTER_SCALAR),
        ("remarkably", BOOSTER_SCALAR),
        ("exceptionally", BOOSTER_SCALAR),
        ("deeply", BOOSTER_SCALAR),
        ("highly", BOOSTER_SCALAR),
        ("so", BOOSTER_SCALAR),
        // Dampeners
        ("slightly", -BOOSTER_SCALAR),
        ("somewhat", -BOOSTER_SCALAR),
        ("marginally", -BOOSTER_SCALAR),
        ("partly", -BOOSTER_SCALAR),
        ("kinda", -BOOSTER_SCALAR),
        ("sorta", -BOOSTER_SCALAR),
        ("almost", -BOOSTER_SCALAR),
    ]
    .into_iter()
    .collect()
}
