//! The due-date convention embedded in follow-up notes.
//!
//! A log's `next_action` carries its due date as a plain-text prefix:
//! `"YYYY-MM-DD：安排看房"`. The colon may be full-width (`：`) or ASCII
//! (`:`). Everything that reads or writes that convention lives here so the
//! rest of the engine only ever sees structured dates and titles.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static RE_DUE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})[：:]").unwrap());

/// Parse the due date out of a `next_action` string.
///
/// Returns `None` when the prefix is missing or the digits don't form a real
/// calendar date (e.g. `2025-02-30`). Unparseable notes are not an error:
/// they simply never become tasks.
pub fn parse_due_date(next_action: &str) -> Option<NaiveDate> {
    let caps = RE_DUE_PREFIX.captures(next_action)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Render a date as the zero-padded `YYYY-MM-DD` prefix form.
///
/// Inverse of [`parse_due_date`]: for any valid date,
/// `parse_due_date(&format!("{}：x", format_due_date(d))) == Some(d)`.
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Human-readable task title for a log entry.
///
/// Prefers a non-blank `next_action_todo`; otherwise the trimmed text after
/// the first colon of `next_action` (either width); otherwise the whole
/// `next_action` string.
pub fn resolve_title(next_action: &str, next_action_todo: Option<&str>) -> String {
    if let Some(todo) = next_action_todo {
        if !todo.trim().is_empty() {
            return todo.to_string();
        }
    }
    if let Some((idx, colon)) = next_action
        .char_indices()
        .find(|(_, c)| *c == '：' || *c == ':')
    {
        let rest = next_action[idx + colon.len_utf8()..].trim();
        if !rest.is_empty() {
            return rest.to_string();
        }
    }
    next_action.to_string()
}

/// Re-encode a due date and title into the `next_action` convention.
///
/// Always writes the full-width colon, matching what the intake forms write.
pub fn encode_next_action(due: NaiveDate, title: &str) -> String {
    format!("{}：{}", format_due_date(due), title)
}
