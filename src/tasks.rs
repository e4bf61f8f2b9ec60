//! Task derivation: turn the client collection into dated, bucketed tasks.
//!
//! Tasks are never stored. Each call re-derives them from whatever logs
//! carry a parseable `next_action` due date; a log whose note doesn't match
//! the date convention simply contributes nothing. All entry points take
//! `today` explicitly so one derivation pass works from a single notion of
//! "today" (and so tests can pin the clock).

use chrono::{Days, NaiveDate};

use crate::models::Client;
use crate::nextaction::{encode_next_action, parse_due_date, resolve_title};

/// Due dates up to this many days out count as "this week".
pub const WEEK_HORIZON_DAYS: u64 = 7;

/// A task inferred from one log entry's `next_action`. Recomputed on every
/// read, identified by owning client + log.
#[derive(Debug, Clone)]
pub struct DerivedTask {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub log_id: String,
    pub due_date: NaiveDate,
    pub title: String,
    pub is_overdue: bool,
    pub is_today: bool,
    pub is_this_week: bool,
    /// Whole days past due; 0 when not overdue.
    pub days_overdue: i64,
}

/// Extract the flat task list: one task per log entry whose `next_action`
/// carries a valid due-date prefix, in client order then log order.
pub fn extract_tasks(clients: &[Client], today: NaiveDate) -> Vec<DerivedTask> {
    let week_end = today
        .checked_add_days(Days::new(WEEK_HORIZON_DAYS))
        .unwrap_or(today);
    let mut tasks = Vec::new();

    for client in clients {
        let client_name = client.display_name();
        for log in &client.logs {
            let Some(next_action) = log.next_action.as_deref() else {
                continue;
            };
            let Some(due) = parse_due_date(next_action) else {
                continue;
            };

            let is_overdue = due < today;
            let days_overdue = if is_overdue { (today - due).num_days() } else { 0 };
            tasks.push(DerivedTask {
                id: format!("{}-{}", client.id, log.id),
                client_id: client.id.clone(),
                client_name: client_name.clone(),
                log_id: log.id.clone(),
                due_date: due,
                title: resolve_title(next_action, log.next_action_todo.as_deref()),
                is_overdue,
                is_today: due == today,
                is_this_week: due > today && due <= week_end,
                days_overdue,
            });
        }
    }

    tasks
}

/// Overdue tasks, most overdue first. Ties keep extraction order.
pub fn overdue_tasks(clients: &[Client], today: NaiveDate) -> Vec<DerivedTask> {
    let mut tasks: Vec<_> = extract_tasks(clients, today)
        .into_iter()
        .filter(|t| t.is_overdue)
        .collect();
    tasks.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    tasks
}

/// Tasks due exactly today, in extraction order.
pub fn today_tasks(clients: &[Client], today: NaiveDate) -> Vec<DerivedTask> {
    let mut tasks: Vec<_> = extract_tasks(clients, today)
        .into_iter()
        .filter(|t| t.is_today)
        .collect();
    tasks.sort_by_key(|t| t.due_date);
    tasks
}

/// Everything that must be handled today: overdue tasks followed by
/// tasks due today.
pub fn action_tasks(clients: &[Client], today: NaiveDate) -> Vec<DerivedTask> {
    let mut tasks = overdue_tasks(clients, today);
    tasks.extend(today_tasks(clients, today));
    tasks
}

/// Tasks due within the next week (exclusive of today, inclusive of
/// today+7), soonest first.
pub fn week_tasks(clients: &[Client], today: NaiveDate) -> Vec<DerivedTask> {
    let mut tasks: Vec<_> = extract_tasks(clients, today)
        .into_iter()
        .filter(|t| t.is_this_week)
        .collect();
    tasks.sort_by_key(|t| t.due_date);
    tasks
}

/// Group a task list by owning client, preserving the clients'
/// first-seen order and each client's sub-order. Display helper for
/// consumers that render per-client cards.
pub fn group_by_client(tasks: &[DerivedTask]) -> Vec<(String, Vec<&DerivedTask>)> {
    let mut groups: Vec<(String, Vec<&DerivedTask>)> = Vec::new();
    for task in tasks {
        match groups.iter_mut().find(|(id, _)| *id == task.client_id) {
            Some((_, bucket)) => bucket.push(task),
            None => groups.push((task.client_id.clone(), vec![task])),
        }
    }
    groups
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub overdue: usize,
    pub due_today: usize,
    pub total_clients: usize,
}

pub fn dashboard_stats(clients: &[Client], today: NaiveDate) -> DashboardStats {
    let tasks = extract_tasks(clients, today);
    DashboardStats {
        overdue: tasks.iter().filter(|t| t.is_overdue).count(),
        due_today: tasks.iter().filter(|t| t.is_today).count(),
        total_clients: clients.len(),
    }
}

/// The `n` hottest clients by urgency rank (stable within a rank).
pub fn top_clients(clients: &[Client], n: usize) -> Vec<&Client> {
    let mut ranked: Vec<&Client> = clients.iter().collect();
    ranked.sort_by(|a, b| b.urgency.rank().cmp(&a.urgency.rank()));
    ranked.truncate(n);
    ranked
}

/// Mark the task on `log_id` complete: clear its `next_action` and
/// `next_action_todo`. Returns a new collection; the input is untouched.
pub fn complete_task(clients: &[Client], log_id: &str) -> Vec<Client> {
    clients
        .iter()
        .map(|client| {
            let mut client = client.clone();
            for log in &mut client.logs {
                if log.id == log_id {
                    log.next_action = None;
                    log.next_action_todo = None;
                }
            }
            client
        })
        .collect()
}

/// Move the task on `log_id` to a new due date, keeping its resolved title.
/// Logs without a `next_action` are left alone. Returns a new collection.
pub fn postpone_task(clients: &[Client], log_id: &str, new_due: NaiveDate) -> Vec<Client> {
    clients
        .iter()
        .map(|client| {
            let mut client = client.clone();
            for log in &mut client.logs {
                if log.id != log_id {
                    continue;
                }
                if let Some(next_action) = log.next_action.as_deref() {
                    let title = resolve_title(next_action, log.next_action_todo.as_deref());
                    log.next_action = Some(encode_next_action(new_due, &title));
                }
            }
            client
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, ClientLog, Requirements, Urgency};
    use crate::nextaction::parse_due_date;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn client(id: &str, remark: &str, logs: Vec<ClientLog>) -> Client {
        Client {
            id: id.to_string(),
            name: None,
            remark_name: remark.to_string(),
            phone: None,
            wechat: None,
            birthday: None,
            status: "新客户".to_string(),
            urgency: Urgency::Medium,
            tags: Vec::new(),
            requirements: Requirements::default(),
            logs,
        }
    }

    fn dated_log(id: &str, next_action: Option<&str>) -> ClientLog {
        ClientLog {
            id: id.to_string(),
            date: "2025-03-01".to_string(),
            content: "跟进".to_string(),
            images: Vec::new(),
            next_action: next_action.map(str::to_string),
            next_action_todo: None,
        }
    }

    #[test]
    fn extracts_one_task_per_parseable_next_action() {
        let clients = vec![client(
            "a",
            "客户A",
            vec![
                dated_log("l1", Some("2025-03-05：安排看房")),
                dated_log("l2", Some("下周再说")), // no date prefix
                dated_log("l3", None),
            ],
        )];
        let tasks = extract_tasks(&clients, date(2025, 3, 10));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "a-l1");
        assert_eq!(tasks[0].due_date, date(2025, 3, 5));
        assert_eq!(tasks[0].title, "安排看房");
        assert_eq!(tasks[0].client_name, "客户A");
    }

    #[test]
    fn malformed_dates_are_silently_dropped() {
        let clients = vec![client(
            "a",
            "客户A",
            vec![dated_log("l1", Some("2025-02-30：看房"))],
        )];
        assert!(extract_tasks(&clients, date(2025, 3, 10)).is_empty());
    }

    #[test]
    fn classification_flags_are_day_granular() {
        let today = date(2025, 3, 10);
        let clients = vec![client(
            "a",
            "客户A",
            vec![
                dated_log("past", Some("2025-03-07：去电")),
                dated_log("now", Some("2025-03-10：收尾")),
                dated_log("soon", Some("2025-03-17：复看")), // today + 7: in
                dated_log("later", Some("2025-03-18：复看")), // today + 8: out
            ],
        )];
        let tasks = extract_tasks(&clients, today);
        assert_eq!(tasks.len(), 4);

        let by_log = |id: &str| tasks.iter().find(|t| t.log_id == id).unwrap();
        let past = by_log("past");
        assert!(past.is_overdue && !past.is_today && !past.is_this_week);
        assert_eq!(past.days_overdue, 3);

        let now = by_log("now");
        assert!(now.is_today && !now.is_overdue && !now.is_this_week);
        assert_eq!(now.days_overdue, 0);

        assert!(by_log("soon").is_this_week);
        let later = by_log("later");
        assert!(!later.is_this_week && !later.is_overdue && !later.is_today);
    }

    #[test]
    fn overdue_view_sorts_most_overdue_first() {
        let today = date(2025, 3, 10);
        let clients = vec![
            client("a", "A", vec![dated_log("l1", Some("2025-03-05：回访"))]), // 5 days
            client("b", "B", vec![dated_log("l2", Some("2025-03-01：回访"))]), // 9 days
        ];
        let overdue = overdue_tasks(&clients, today);
        assert_eq!(
            overdue.iter().map(|t| t.log_id.as_str()).collect::<Vec<_>>(),
            vec!["l2", "l1"]
        );
        assert!(overdue.iter().all(|t| t.due_date < today));
    }

    #[test]
    fn today_view_contains_only_today() {
        let today = date(2025, 3, 10);
        let clients = vec![client(
            "a",
            "A",
            vec![
                dated_log("l1", Some("2025-03-09：回访")),
                dated_log("l2", Some("2025-03-10：收尾")),
            ],
        )];
        let due = today_tasks(&clients, today);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].log_id, "l2");

        assert!(today_tasks(&clients, date(2025, 3, 20)).is_empty());
    }

    #[test]
    fn action_list_is_overdue_then_today() {
        let today = date(2025, 3, 10);
        let clients = vec![client(
            "a",
            "A",
            vec![
                dated_log("t", Some("2025-03-10：收尾")),
                dated_log("o", Some("2025-03-08：回访")),
            ],
        )];
        let actions = action_tasks(&clients, today);
        assert_eq!(
            actions.iter().map(|t| t.log_id.as_str()).collect::<Vec<_>>(),
            vec!["o", "t"]
        );
    }

    #[test]
    fn week_view_sorts_by_due_date_ascending() {
        let today = date(2025, 3, 10);
        let clients = vec![client(
            "a",
            "A",
            vec![
                dated_log("l1", Some("2025-03-16：复看")),
                dated_log("l2", Some("2025-03-12：发房源")),
            ],
        )];
        let week = week_tasks(&clients, today);
        assert_eq!(
            week.iter().map(|t| t.log_id.as_str()).collect::<Vec<_>>(),
            vec!["l2", "l1"]
        );
    }

    #[test]
    fn client_without_logs_is_invisible_to_all_views() {
        let today = date(2025, 3, 10);
        let clients = vec![client("a", "A", Vec::new())];
        assert!(extract_tasks(&clients, today).is_empty());
        assert!(overdue_tasks(&clients, today).is_empty());
        assert!(today_tasks(&clients, today).is_empty());
        assert!(week_tasks(&clients, today).is_empty());
    }

    #[test]
    fn grouping_preserves_first_seen_client_order() {
        let today = date(2025, 3, 10);
        let clients = vec![
            client(
                "a",
                "A",
                vec![
                    dated_log("l1", Some("2025-03-12：看房")),
                    dated_log("l2", Some("2025-03-13：看房")),
                ],
            ),
            client("b", "B", vec![dated_log("l3", Some("2025-03-12：看房"))]),
        ];
        let week = week_tasks(&clients, today);
        let groups = group_by_client(&week);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "a");
        assert_eq!(
            groups[0].1.iter().map(|t| t.log_id.as_str()).collect::<Vec<_>>(),
            vec!["l1", "l2"]
        );
        assert_eq!(groups[1].0, "b");
    }

    #[test]
    fn stats_count_overdue_and_today() {
        let today = date(2025, 3, 10);
        let clients = vec![
            client("a", "A", vec![dated_log("l1", Some("2025-03-01：回访"))]),
            client("b", "B", vec![dated_log("l2", Some("2025-03-10：收尾"))]),
            client("c", "C", Vec::new()),
        ];
        let stats = dashboard_stats(&clients, today);
        assert_eq!(
            stats,
            DashboardStats {
                overdue: 1,
                due_today: 1,
                total_clients: 3
            }
        );
    }

    #[test]
    fn top_clients_orders_by_urgency_rank() {
        let mut a = client("a", "A", Vec::new());
        a.urgency = Urgency::Low;
        let mut b = client("b", "B", Vec::new());
        b.urgency = Urgency::High;
        let mut c = client("c", "C", Vec::new());
        c.urgency = Urgency::Medium;

        let clients = vec![a, b, c];
        let top = top_clients(&clients, 2);
        assert_eq!(
            top.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["b", "c"]
        );
    }

    #[test]
    fn complete_task_clears_both_action_fields_without_mutating_input() {
        let mut log = dated_log("l1", Some("2025-03-10：收尾"));
        log.next_action_todo = Some("发两套房源".to_string());
        let clients = vec![client("a", "A", vec![log])];

        let updated = complete_task(&clients, "l1");
        assert!(updated[0].logs[0].next_action.is_none());
        assert!(updated[0].logs[0].next_action_todo.is_none());
        // Original collection untouched.
        assert!(clients[0].logs[0].next_action.is_some());
    }

    #[test]
    fn postpone_rewrites_the_date_prefix_and_keeps_the_title() {
        let clients = vec![client(
            "a",
            "A",
            vec![dated_log("l1", Some("2025-03-10：准备出 offer"))],
        )];
        let updated = postpone_task(&clients, "l1", date(2025, 3, 15));
        let next_action = updated[0].logs[0].next_action.as_deref().unwrap();
        assert_eq!(next_action, "2025-03-15：准备出 offer");
        assert_eq!(parse_due_date(next_action), Some(date(2025, 3, 15)));
    }

    #[test]
    fn postpone_ignores_logs_without_a_next_action() {
        let clients = vec![client("a", "A", vec![dated_log("l1", None)])];
        let updated = postpone_task(&clients, "l1", date(2025, 3, 15));
        assert!(updated[0].logs[0].next_action.is_none());
    }

    #[test]
    fn empty_collection_yields_empty_outputs() {
        let today = date(2025, 3, 10);
        assert!(extract_tasks(&[], today).is_empty());
        assert_eq!(dashboard_stats(&[], today).total_clients, 0);
    }
}
