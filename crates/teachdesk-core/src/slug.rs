//! Export filename helpers

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Slugify a lesson topic: whitespace runs become `-`, then lowercase.
pub fn slugify(topic: &str) -> String {
    WHITESPACE_RUNS.replace_all(topic, "-").to_lowercase()
}

/// Filename for a downloaded plan text
pub fn plan_text_filename(topic: &str) -> String {
    format!("{}-lesson-plan.txt", slugify(topic))
}

/// Filename for a downloaded visual aid
pub fn visual_aid_filename(topic: &str) -> String {
    format!("lesson-visual-{}.png", slugify(topic))
}
