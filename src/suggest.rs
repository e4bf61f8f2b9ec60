//! "What should I do today" suggestions.
//!
//! Three passes in fixed precedence: overdue tasks, tasks due today, then
//! re-engaging the longest-silent clients. At most three suggestions per
//! call, and a client consumed by the overdue or today pass never shows up
//! again in a later pass within the same call.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Client;
use crate::nextaction::{parse_due_date, resolve_title};
use crate::utils::parse_log_date;

/// Hard cap on suggestions per call.
pub const MAX_SUGGESTIONS: usize = 3;

pub const CTA_OPEN_CLIENT: &str = "打开客户";
pub const CTA_RECORD: &str = "去记录";
pub const REVIVE_TITLE: &str = "发微信激活一下";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Overdue,
    Today,
    Revive,
}

/// One recommended (client, action) pair for the dashboard panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    /// Status label, when the client has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_text: Option<String>,
    pub action_title: String,
    pub reason: String,
    pub cta_text: String,
    pub kind: SuggestionKind,
    /// The originating log, for overdue/today suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_log_id: Option<String>,
}

fn badge_for(client: &Client) -> Option<String> {
    if client.status.is_empty() {
        None
    } else {
        Some(client.status.clone())
    }
}

/// Most recent contact date across a client's logs, if any log has a
/// readable date.
fn last_contact_date(client: &Client) -> Option<NaiveDate> {
    client
        .logs
        .iter()
        .filter_map(|log| parse_log_date(&log.date))
        .max()
}

/// Build at most [`MAX_SUGGESTIONS`] suggestions for the dashboard.
///
/// Pure and deterministic for a fixed `today`; the input collection is
/// never touched.
pub fn select_next_actions(clients: &[Client], today: NaiveDate) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let mut used_client_ids: Vec<&str> = Vec::new();

    // Pass 1: every overdue task, one suggestion each. A client with two
    // overdue tasks contributes two.
    for client in clients {
        for log in &client.logs {
            let Some(next_action) = log.next_action.as_deref() else {
                continue;
            };
            let Some(due) = parse_due_date(next_action) else {
                continue;
            };
            if due >= today {
                continue;
            }
            let days_overdue = (today - due).num_days();
            suggestions.push(Suggestion {
                id: format!("overdue-{}-{}", client.id, log.id),
                client_id: client.id.clone(),
                client_name: client.display_name(),
                badge_text: badge_for(client),
                action_title: resolve_title(next_action, log.next_action_todo.as_deref()),
                reason: format!("已逾期 {} 天", days_overdue),
                cta_text: CTA_OPEN_CLIENT.to_string(),
                kind: SuggestionKind::Overdue,
                task_log_id: Some(log.id.clone()),
            });
            if !used_client_ids.contains(&client.id.as_str()) {
                used_client_ids.push(&client.id);
            }
        }
    }

    // Pass 2: first due-today task per not-yet-used client.
    for client in clients {
        if used_client_ids.contains(&client.id.as_str()) {
            continue;
        }
        for log in &client.logs {
            let Some(next_action) = log.next_action.as_deref() else {
                continue;
            };
            let Some(due) = parse_due_date(next_action) else {
                continue;
            };
            if due != today {
                continue;
            }
            suggestions.push(Suggestion {
                id: format!("today-{}-{}", client.id, log.id),
                client_id: client.id.clone(),
                client_name: client.display_name(),
                badge_text: badge_for(client),
                action_title: resolve_title(next_action, log.next_action_todo.as_deref()),
                reason: "今天要收尾".to_string(),
                cta_text: CTA_OPEN_CLIENT.to_string(),
                kind: SuggestionKind::Today,
                task_log_id: Some(log.id.clone()),
            });
            used_client_ids.push(&client.id);
            break; // one today task per client
        }
    }

    // Pass 3: top up with the longest-silent clients. A client with no
    // logs has no last-contact date and is never a candidate.
    if suggestions.len() < MAX_SUGGESTIONS {
        let mut candidates: Vec<(&Client, i64)> = clients
            .iter()
            .filter(|c| !used_client_ids.contains(&c.id.as_str()))
            .filter_map(|c| {
                last_contact_date(c).map(|last| (c, (today - last).num_days().abs()))
            })
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1));

        for (client, days_since) in candidates {
            if suggestions.len() >= MAX_SUGGESTIONS {
                break;
            }
            suggestions.push(Suggestion {
                id: format!("revive-{}", client.id),
                client_id: client.id.clone(),
                client_name: client.display_name(),
                badge_text: badge_for(client),
                action_title: REVIVE_TITLE.to_string(),
                reason: format!("{} 天未联系", days_since),
                cta_text: CTA_RECORD.to_string(),
                kind: SuggestionKind::Revive,
                task_log_id: None,
            });
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
