//! Humanized relative ages.

use chrono::{DateTime, Utc};
use chrono_humanize::{Accuracy, HumanTime, Tense};

/// Text shown for timestamps at or after `now`.
pub const NOW: &str = "now";

/// Rough English age of `then` as seen at `now`, e.g. "2 hours ago".
///
/// Timestamps in the future read as [`NOW`].
#[must_use]
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;
    if elapsed <= chrono::Duration::zero() {
        return NOW.to_owned();
    }
    HumanTime::from(elapsed).to_text_en(Accuracy::Rough, Tense::Past)
}
