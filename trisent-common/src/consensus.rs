//! Consensus aggregation over independent classifier verdicts
//!
//! Pure and deterministic: no I/O, no hidden state. Each classifier
//! contributes at most one vote (its sentiment, when valid); the label with
//! the most votes wins; any tie at the maximum resolves to neutral; zero
//! votes overall means every classifier failed and the verdict is error.

use serde::{Deserialize, Serialize};

use crate::types::{ClassifierOutput, Sentiment, Verdict};

/// The aggregation output: final verdict plus the explainable grouping of
/// which classifiers voted for which label, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub final_sentiment: Verdict,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
}

/// Combine classifier verdicts into one consensus.
///
/// Consumes `(name, output)` pairs in evaluation order. A classifier whose
/// sentiment is not a valid vote (error, unknown) lands in no group and
/// counts toward nothing; its failure never disturbs the votes of the
/// others.
///
/// Tie policy: when two or more labels share the maximum vote count the
/// verdict is neutral, even if neutral itself received zero votes. A
/// positive/negative split therefore reads as disagreement, not as either
/// extreme.
pub fn aggregate<'a, I>(outputs: I) -> ConsensusResult
where
    I: IntoIterator<Item = (&'a str, &'a ClassifierOutput)>,
{
    let mut positive: Vec<String> = Vec::new();
    let mut negative: Vec<String> = Vec::new();
    let mut neutral: Vec<String> = Vec::new();

    for (name, output) in outputs {
        match output.sentiment {
            Sentiment::Positive => positive.push(name.to_string()),
            Sentiment::Negative => negative.push(name.to_string()),
            Sentiment::Neutral => neutral.push(name.to_string()),
            // error / unknown: no group, no vote
            _ => {}
        }
    }

    let tally = [
        (Verdict::Positive, positive.len()),
        (Verdict::Negative, negative.len()),
        (Verdict::Neutral, neutral.len()),
    ];
    let total: usize = tally.iter().map(|(_, n)| n).sum();

    let final_sentiment = if total == 0 {
        Verdict::Error
    } else {
        let max = tally.iter().map(|(_, n)| *n).max().unwrap_or(0);
        let mut at_max = tally.iter().filter(|(_, n)| *n == max).map(|(v, _)| *v);
        match (at_max.next(), at_max.next()) {
            // Exactly one label at the maximum wins outright
            (Some(winner), None) => winner,
            // Two or more labels tied at the maximum
            _ => Verdict::Neutral,
        }
    };

    ConsensusResult {
        final_sentiment,
        positive,
        negative,
        neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(sentiment: Sentiment) -> ClassifierOutput {
        ClassifierOutput {
            negative: None,
            neutral: None,
            positive: None,
            compound: None,
            sentiment,
            error: None,
        }
    }

    fn run(inputs: &[(&str, Sentiment)]) -> ConsensusResult {
        let outputs: Vec<(&str, ClassifierOutput)> =
            inputs.iter().map(|(n, s)| (*n, vote(*s))).collect();
        aggregate(outputs.iter().map(|(n, o)| (*n, o)))
    }

    #[test]
    fn unanimous_verdict_wins_with_full_group() {
        let result = run(&[
            ("vader", Sentiment::Positive),
            ("naive_bayes", Sentiment::Positive),
            ("roberta", Sentiment::Positive),
        ]);
        assert_eq!(result.final_sentiment, Verdict::Positive);
        assert_eq!(result.positive, vec!["vader", "naive_bayes", "roberta"]);
        assert!(result.negative.is_empty());
        assert!(result.neutral.is_empty());
    }

    #[test]
    fn majority_beats_dissent() {
        // Concrete scenario A
        let result = run(&[
            ("vader", Sentiment::Positive),
            ("naive_bayes", Sentiment::Positive),
            ("roberta", Sentiment::Negative),
        ]);
        assert_eq!(result.final_sentiment, Verdict::Positive);
        assert_eq!(result.positive, vec!["vader", "naive_bayes"]);
        assert_eq!(result.negative, vec!["roberta"]);
        assert!(result.neutral.is_empty());
    }

    #[test]
    fn all_failed_yields_error_with_empty_groups() {
        // Concrete scenario B
        let result = run(&[
            ("vader", Sentiment::Error),
            ("naive_bayes", Sentiment::Error),
            ("roberta", Sentiment::Error),
        ]);
        assert_eq!(result.final_sentiment, Verdict::Error);
        assert!(result.positive.is_empty());
        assert!(result.negative.is_empty());
        assert!(result.neutral.is_empty());
    }

    #[test]
    fn two_way_tie_resolves_to_neutral_without_neutral_votes() {
        // Concrete scenario C: positive/negative tie, zero neutral votes
        let result = run(&[
            ("vader", Sentiment::Positive),
            ("naive_bayes", Sentiment::Negative),
            ("roberta", Sentiment::Error),
        ]);
        assert_eq!(result.final_sentiment, Verdict::Neutral);
        assert_eq!(result.positive, vec!["vader"]);
        assert_eq!(result.negative, vec!["naive_bayes"]);
        assert!(result.neutral.is_empty());
    }

    #[test]
    fn three_way_tie_resolves_to_neutral() {
        let result = run(&[
            ("vader", Sentiment::Positive),
            ("naive_bayes", Sentiment::Negative),
            ("roberta", Sentiment::Neutral),
        ]);
        assert_eq!(result.final_sentiment, Verdict::Neutral);
        assert_eq!(result.positive, vec!["vader"]);
        assert_eq!(result.negative, vec!["naive_bayes"]);
        assert_eq!(result.neutral, vec!["roberta"]);
    }

    #[test]
    fn single_surviving_vote_decides() {
        for (label, verdict) in [
            (Sentiment::Positive, Verdict::Positive),
            (Sentiment::Negative, Verdict::Negative),
            (Sentiment::Neutral, Verdict::Neutral),
        ] {
            let result = run(&[
                ("vader", Sentiment::Error),
                ("naive_bayes", label),
                ("roberta", Sentiment::Error),
            ]);
            assert_eq!(result.final_sentiment, verdict);
        }
    }

    #[test]
    fn two_against_failure_wins_outright() {
        let result = run(&[
            ("vader", Sentiment::Negative),
            ("naive_bayes", Sentiment::Negative),
            ("roberta", Sentiment::Error),
        ]);
        assert_eq!(result.final_sentiment, Verdict::Negative);
        assert_eq!(result.negative, vec!["vader", "naive_bayes"]);
    }

    #[test]
    fn unknown_contributes_no_vote() {
        let result = run(&[
            ("vader", Sentiment::Unknown),
            ("naive_bayes", Sentiment::Unknown),
            ("roberta", Sentiment::Positive),
        ]);
        assert_eq!(result.final_sentiment, Verdict::Positive);
        assert_eq!(result.positive, vec!["roberta"]);
        assert!(result.negative.is_empty());
        assert!(result.neutral.is_empty());
    }

    #[test]
    fn groups_are_disjoint_and_ordered() {
        let result = run(&[
            ("vader", Sentiment::Neutral),
            ("naive_bayes", Sentiment::Positive),
            ("roberta", Sentiment::Neutral),
        ]);
        // Each name appears in exactly one group, in evaluation order
        assert_eq!(result.neutral, vec!["vader", "roberta"]);
        assert_eq!(result.positive, vec!["naive_bayes"]);
        assert!(result.negative.is_empty());
        assert_eq!(result.final_sentiment, Verdict::Neutral);
    }

    #[test]
    fn aggregation_is_pure() {
        let inputs = [
            ("vader", vote(Sentiment::Positive)),
            ("naive_bayes", vote(Sentiment::Error)),
            ("roberta", vote(Sentiment::Negative)),
        ];
        let a = aggregate(inputs.iter().map(|(n, o)| (*n, o)));
        let b = aggregate(inputs.iter().map(|(n, o)| (*n, o)));
        assert_eq!(a, b);
    }

    #[test]
    fn error_output_with_message_stays_out_of_groups() {
        let failed = ClassifierOutput::failure("HuggingFace API timeout");
        let ok = vote(Sentiment::Positive);
        let result = aggregate([("roberta", &failed), ("vader", &ok)]);
        assert_eq!(result.final_sentiment, Verdict::Positive);
        assert_eq!(result.positive, vec!["vader"]);
    }
}
