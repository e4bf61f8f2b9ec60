//! Client-list filtering and the birthday reminder window.

use chrono::{Datelike, NaiveDate};

use crate::models::{Client, Urgency};

/// Active filter selections for the client list. Empty selections mean
/// "no constraint".
#[derive(Debug, Clone, Default)]
pub struct ClientFilters {
    pub keyword: String,
    pub areas: Vec<String>,
    pub statuses: Vec<String>,
    pub urgencies: Vec<Urgency>,
    pub tags: Vec<String>,
}

fn matches_keyword(client: &Client, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let contains = |s: &str| s.to_lowercase().contains(term);
    client.name.as_deref().is_some_and(contains)
        || contains(&client.remark_name)
        || client.phone.as_deref().is_some_and(|p| p.contains(term))
        || client.wechat.as_deref().is_some_and(contains)
        || client.requirements.areas.iter().any(|a| contains(a))
}

/// Apply the filter selections, keeping collection order.
pub fn filter_clients<'a>(clients: &'a [Client], filters: &ClientFilters) -> Vec<&'a Client> {
    let term = filters.keyword.trim().to_lowercase();
    clients
        .iter()
        .filter(|c| matches_keyword(c, &term))
        .filter(|c| {
            filters.areas.is_empty()
                || c.requirements.areas.iter().any(|a| filters.areas.contains(a))
        })
        .filter(|c| filters.statuses.is_empty() || filters.statuses.contains(&c.status))
        .filter(|c| filters.urgencies.is_empty() || filters.urgencies.contains(&c.urgency))
        .filter(|c| {
            filters.tags.is_empty() || c.tags.iter().any(|t| filters.tags.contains(t))
        })
        .collect()
}

/// Union of client tags and requirement tags, first-seen order.
pub fn available_tags(clients: &[Client]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for client in clients {
        for tag in client.tags.iter().chain(client.requirements.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

/// Union of requirement areas across the collection, first-seen order.
pub fn available_areas(clients: &[Client]) -> Vec<String> {
    let mut areas: Vec<String> = Vec::new();
    for client in clients {
        for area in &client.requirements.areas {
            if !areas.contains(area) {
                areas.push(area.clone());
            }
        }
    }
    areas
}

/// Upcoming-birthday marker shown on client cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayStatus {
    /// Days until the next occurrence (0 = today).
    pub days: i64,
    /// Month-day display, e.g. `2月15日`.
    pub display: String,
}

/// Birthday reminders fire within this many days.
pub const BIRTHDAY_WINDOW_DAYS: i64 = 30;

/// Whether the client's next birthday falls within the reminder window.
///
/// `birthday` is an ISO `YYYY-MM-DD` string; the year is ignored. Feb 29
/// rolls over to Mar 1 in non-leap years. Unparseable input yields `None`.
pub fn birthday_status(birthday: &str, today: NaiveDate) -> Option<BirthdayStatus> {
    let parsed = NaiveDate::parse_from_str(birthday, "%Y-%m-%d").ok()?;
    let (month, day) = (parsed.month(), parsed.day());

    let in_year = |year: i32| {
        NaiveDate::from_ymd_opt(year, month, day)
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).filter(|_| month == 2 && day == 29))
    };

    let mut next = in_year(today.year())?;
    if next < today {
        next = in_year(today.year() + 1)?;
    }

    let days = (next - today).num_days();
    if days <= BIRTHDAY_WINDOW_DAYS {
        Some(BirthdayStatus {
            days,
            display: format!("{}月{}日", month, day),
        })
    } else {
        None
    }
}
