//! Built-in screening questionnaires, one module per instrument.

pub mod asrs;
pub mod audit;
pub mod bes;
pub mod dast10;
pub mod gad7;
pub mod isi;
pub mod mbi;
pub mod mdq;
pub mod oci_r;
pub mod pcl5;
pub mod pdss;
pub mod phobia;
pub mod phq9;
pub mod pss;
pub mod spin;

use crate::scoring::{Question, SeverityBand, UNANSWERED, saturating_sum};

pub(crate) const PAST_TWO_WEEKS: [&str; 4] = [
    "Not at all",
    "Several days",
    "More than half the days",
    "Nearly every day",
];

pub(crate) const FREQUENCY: [&str; 5] = ["Never", "Rarely", "Sometimes", "Often", "Very often"];

pub(crate) const INTENSITY: [&str; 5] = [
    "Not at all",
    "A little bit",
    "Moderately",
    "Quite a bit",
    "Extremely",
];

pub(crate) const YES_NO: [&str; 2] = ["No", "Yes"];

/// Questions sharing one option scale.
pub(crate) fn questions(texts: &[&str], options: &[&str]) -> Vec<Question> {
    texts
        .iter()
        .map(|text| Question {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        })
        .collect()
}

pub(crate) fn bands(bands: &[(i32, i32, &str)]) -> Vec<SeverityBand> {
    bands
        .iter()
        .map(|&(min, max, label)| SeverityBand::new(min, max, label))
        .collect()
}

/// Sum of answered items where the items in `reversed` score `max - value`.
pub(crate) fn reverse_scored_sum(answers: &[i32], reversed: &[usize], max: i32) -> i32 {
    saturating_sum(
        answers
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a != UNANSWERED)
            .map(|(i, &a)| if reversed.contains(&i) { max.saturating_sub(a) } else { a }),
    )
}
