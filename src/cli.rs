use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::filter::{self, ClientFilters};
use crate::intake;
use crate::models::{ClientLog, Urgency};
use crate::nextaction::encode_next_action;
use crate::store::{ClientStore, StoreError};
use crate::suggest::select_next_actions;
use crate::tasks::{self, DerivedTask};
use crate::utils::parse_date;

#[derive(Parser)]
#[command(name = "genjin")]
#[command(about = "Follow-up CRM for real-estate agents: dated next actions and a daily work dashboard")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/data file)
    #[arg(long)]
    pub dev: bool,

    /// Client data file (overrides the configured path)
    #[arg(long)]
    pub data: Option<String>,

    /// Run against the built-in sample clients, touching no files
    #[arg(long)]
    pub sample: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Today's work dashboard: stats, suggestions, and task buckets (default)
    Dashboard,
    /// Just the top action suggestions (at most 3)
    Suggest,
    /// List clients, optionally filtered
    List {
        /// Match against names, phone, wechat and areas
        #[arg(long)]
        keyword: Option<String>,
        /// Only clients carrying this tag (repeatable)
        #[arg(long)]
        tag: Vec<String>,
        /// Only this urgency level (high, medium, low; repeatable)
        #[arg(long)]
        urgency: Vec<Urgency>,
        /// Only this status label (repeatable)
        #[arg(long)]
        status: Vec<String>,
        /// Only clients interested in this area (repeatable)
        #[arg(long)]
        area: Vec<String>,
    },
    /// Show one client in full
    Show {
        /// Client id
        id: String,
    },
    /// Create a client from pasted free-form text
    Intake {
        /// The pasted text (first line becomes the remark name)
        text: String,
    },
    /// Create a client from explicit fields
    AddClient {
        /// Remark name (the name you actually use)
        remark_name: String,
        /// Legal name
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        wechat: Option<String>,
        /// Birthday (YYYY-MM-DD)
        #[arg(long)]
        birthday: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Record a follow-up log on a client
    AddLog {
        /// Client id
        client: String,
        /// What happened (or use --template)
        content: Option<String>,
        /// Use a canned follow-up template by key (see `presets`)
        #[arg(long, conflicts_with = "content")]
        template: Option<String>,
        /// Due date for the next action (YYYY-MM-DD)
        #[arg(long)]
        next_date: Option<String>,
        /// Next action text
        #[arg(long)]
        next_action: Option<String>,
        /// Short label for the next action
        #[arg(long)]
        todo: Option<String>,
    },
    /// List the preset statuses, tags, follow-up templates and next-action texts
    Presets,
    /// Mark a log entry's task done (clears its next action)
    Complete {
        /// Log id
        log: String,
    },
    /// Move a log entry's task to a new due date
    Postpone {
        /// Log id
        log: String,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Unknown client: {0}")]
    UnknownClient(String),
    #[error("Unknown follow-up template: {0}")]
    UnknownTemplate(String),
    #[error("A log needs content (or --template)")]
    MissingLogContent,
}

fn parse_cli_date(date_str: &str) -> Result<NaiveDate, CliError> {
    parse_date(date_str)
        .map_err(|e| CliError::DateParseError(format!("Invalid date format '{}': {}", date_str, e)))
}

fn print_task_group(heading: &str, grouped: &[(String, Vec<&DerivedTask>)]) {
    println!("{}", heading);
    if grouped.is_empty() {
        println!("  （无）");
        return;
    }
    for (_, group) in grouped {
        println!("  {}", group[0].client_name);
        for task in group {
            let marker = if task.is_overdue {
                format!("逾期 {} 天", task.days_overdue)
            } else {
                task.due_date.format("%Y-%m-%d").to_string()
            };
            println!("    [{}] {} — {}", task.log_id, marker, task.title);
        }
    }
}

/// Handle the dashboard command
pub fn handle_dashboard(store: &ClientStore, today: NaiveDate) -> Result<(), CliError> {
    let clients = store.snapshot();
    let stats = tasks::dashboard_stats(clients, today);
    println!("今日工作台 {}", today.format("%Y-%m-%d"));
    println!(
        "已逾期 {} ｜ 今天到期 {} ｜ 客户总数 {}",
        stats.overdue, stats.due_today, stats.total_clients
    );
    println!();

    println!("行动建议：");
    let suggestions = select_next_actions(clients, today);
    if suggestions.is_empty() {
        println!("  （无）");
    }
    for (i, s) in suggestions.iter().enumerate() {
        let badge = s
            .badge_text
            .as_deref()
            .map(|b| format!("[{}] ", b))
            .unwrap_or_default();
        println!(
            "  {}. {}{} — {}（{}）→ {}",
            i + 1,
            badge,
            s.client_name,
            s.action_title,
            s.reason,
            s.cta_text
        );
    }
    println!();

    print_task_group("已逾期：", &tasks::group_by_client(&tasks::overdue_tasks(clients, today)));
    println!();
    print_task_group("今天到期：", &tasks::group_by_client(&tasks::today_tasks(clients, today)));
    println!();
    print_task_group("本周推进：", &tasks::group_by_client(&tasks::week_tasks(clients, today)));

    Ok(())
}

/// Handle the suggest command
pub fn handle_suggest(store: &ClientStore, today: NaiveDate) -> Result<(), CliError> {
    let suggestions = select_next_actions(store.snapshot(), today);
    if suggestions.is_empty() {
        println!("今天没有待办建议。");
        return Ok(());
    }
    for s in &suggestions {
        println!(
            "[{}] {} — {}（{}）→ {}",
            s.client_id, s.client_name, s.action_title, s.reason, s.cta_text
        );
    }
    Ok(())
}

/// Handle the list command
pub fn handle_list(store: &ClientStore, filters: &ClientFilters) -> Result<(), CliError> {
    let matched = filter::filter_clients(store.snapshot(), filters);
    println!("共找到 {} 位客户", matched.len());
    for client in matched {
        let tags = if client.tags.is_empty() {
            String::new()
        } else {
            format!("  #{}", client.tags.join(" #"))
        };
        println!(
            "[{}] {}（{}，{}）{}",
            client.id,
            client.display_name(),
            client.status,
            client.urgency.label(),
            tags
        );
    }
    Ok(())
}

/// Handle the show command
pub fn handle_show(store: &ClientStore, client_id: &str, today: NaiveDate) -> Result<(), CliError> {
    let client = store
        .find_client(client_id)
        .ok_or_else(|| CliError::UnknownClient(client_id.to_string()))?;

    println!("{} [{}]", client.display_name(), client.id);
    if let Some(name) = &client.name {
        println!("  姓名：{}", name);
    }
    if let Some(phone) = &client.phone {
        println!("  电话：{}", phone);
    }
    if let Some(wechat) = &client.wechat {
        println!("  微信：{}", wechat);
    }
    println!("  状态：{}（{}）", client.status, client.urgency.label());
    if let Some(birthday) = &client.birthday {
        match filter::birthday_status(birthday, today) {
            Some(status) => println!("  生日：{}（{} 天后）", status.display, status.days),
            None => println!("  生日：{}", birthday),
        }
    }
    if !client.tags.is_empty() {
        println!("  标签：{}", client.tags.join("、"));
    }

    let req = &client.requirements;
    if req.budget_min.is_some() || req.budget_max.is_some() {
        println!(
            "  预算：{} - {}",
            req.budget_min.as_deref().unwrap_or("?"),
            req.budget_max.as_deref().unwrap_or("?")
        );
    }
    if !req.areas.is_empty() {
        println!("  区域：{}", req.areas.join("、"));
    }
    if let Some(property_type) = &req.property_type {
        println!("  类型：{}", property_type);
    }
    if let Some(notes) = &req.notes {
        println!("  备注：{}", notes);
    }

    println!("  跟进记录：");
    if client.logs.is_empty() {
        println!("    （无）");
    }
    for log in &client.logs {
        println!("    [{}] {}  {}", log.id, log.date, log.content);
        if let Some(next_action) = &log.next_action {
            println!("        下一步：{}", next_action);
        }
    }
    Ok(())
}

/// Handle the intake command
pub fn handle_intake(store: &mut ClientStore, text: &str) -> Result<(), CliError> {
    let parsed = intake::parse_pasted_client(text);
    let client = parsed.into_client();
    let id = client.id.clone();
    let name = client.display_name();
    let recognized: Vec<&str> = [
        client.phone.as_ref().map(|_| "电话"),
        client.wechat.as_ref().map(|_| "微信"),
        client.requirements.budget_min.as_ref().map(|_| "预算"),
        (!client.requirements.areas.is_empty()).then_some("区域"),
        (!client.tags.is_empty()).then_some("标签"),
    ]
    .into_iter()
    .flatten()
    .collect();

    store.add_client(client)?;
    println!("Client created successfully (ID: {})", id);
    println!("  识别为：{}", name);
    if !recognized.is_empty() {
        println!("  识别出字段：{}", recognized.join("、"));
    }
    Ok(())
}

/// Handle the add-client command
pub fn handle_add_client(
    store: &mut ClientStore,
    remark_name: String,
    name: Option<String>,
    phone: Option<String>,
    wechat: Option<String>,
    birthday: Option<String>,
    tags: Option<String>,
) -> Result<(), CliError> {
    if let Some(b) = &birthday {
        parse_cli_date(b)?;
    }
    let mut client = crate::models::Client::new(remark_name);
    client.name = name;
    client.phone = phone;
    client.wechat = wechat;
    client.birthday = birthday;
    if let Some(tags) = tags {
        client.tags = tags
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        client.requirements.tags = client.tags.clone();
    }
    let id = client.id.clone();
    store.add_client(client)?;
    println!("Client created successfully (ID: {})", id);
    Ok(())
}

/// Handle the add-log command
pub fn handle_add_log(
    store: &mut ClientStore,
    client_id: &str,
    content: Option<String>,
    template: Option<String>,
    next_date: Option<String>,
    next_action: Option<String>,
    todo: Option<String>,
) -> Result<(), CliError> {
    let content = match (content, template) {
        (Some(content), _) => content,
        (None, Some(key)) => crate::presets::QUICK_LOG_TEMPLATES
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.content.to_string())
            .ok_or(CliError::UnknownTemplate(key))?,
        (None, None) => return Err(CliError::MissingLogContent),
    };
    let mut log = ClientLog::new(content);
    log.next_action = match (next_date, next_action) {
        // Dated next action: encode into the due-date prefix convention.
        (Some(date_str), Some(action)) => {
            let due = parse_cli_date(&date_str)?;
            Some(encode_next_action(due, action.trim()))
        }
        // Undated next action: kept as plain text, never becomes a task.
        (None, Some(action)) => Some(action),
        (Some(date_str), None) => {
            return Err(CliError::DateParseError(format!(
                "--next-date {} given without --next-action",
                date_str
            )));
        }
        (None, None) => None,
    };
    log.next_action_todo = todo;

    let id = log.id.clone();
    store.add_log(client_id, log)?;
    println!("Log created successfully (ID: {})", id);
    Ok(())
}

/// Handle the presets command
pub fn handle_presets() -> Result<(), CliError> {
    println!("状态：{}", crate::presets::CLIENT_STATUSES.join("、"));
    println!("标签：{}", crate::presets::TAG_OPTIONS.join("、"));
    println!("快速跟进模板：");
    for template in crate::presets::QUICK_LOG_TEMPLATES {
        println!("  {}  {} — {}", template.key, template.label, template.content);
    }
    println!("下一步计划预设：");
    for option in crate::presets::NEXT_ACTION_OPTIONS {
        println!("  {} — {}", option.label, option.value);
    }
    Ok(())
}

/// Handle the complete command
pub fn handle_complete(store: &mut ClientStore, log_id: &str) -> Result<(), CliError> {
    store.complete_task(log_id)?;
    println!("Task completed (log {})", log_id);
    Ok(())
}

/// Handle the postpone command
pub fn handle_postpone(store: &mut ClientStore, log_id: &str, to: &str) -> Result<(), CliError> {
    let new_due = parse_cli_date(to)?;
    store.postpone_task(log_id, new_due)?;
    println!("Task postponed to {} (log {})", new_due.format("%Y-%m-%d"), log_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nextaction::parse_due_date;
    use crate::presets::sample_clients;

    #[test]
    fn add_log_encodes_dated_next_actions() {
        let mut store = ClientStore::in_memory(sample_clients());
        handle_add_log(
            &mut store,
            "c1",
            Some("电话沟通贷款进度。".to_string()),
            None,
            Some("2025-03-20".to_string()),
            Some("确认贷款方案".to_string()),
            None,
        )
        .unwrap();

        let c1 = store.find_client("c1").unwrap();
        let log = c1.logs.last().unwrap();
        let next_action = log.next_action.as_deref().unwrap();
        assert_eq!(next_action, "2025-03-20：确认贷款方案");
        assert_eq!(
            parse_due_date(next_action),
            NaiveDate::from_ymd_opt(2025, 3, 20)
        );
    }

    #[test]
    fn add_log_rejects_a_date_without_an_action() {
        let mut store = ClientStore::in_memory(sample_clients());
        let err = handle_add_log(
            &mut store,
            "c1",
            Some("跟进".to_string()),
            None,
            Some("2025-03-20".to_string()),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::DateParseError(_)));
    }

    #[test]
    fn add_log_accepts_a_template_key() {
        let mut store = ClientStore::in_memory(sample_clients());
        handle_add_log(
            &mut store,
            "c1",
            None,
            Some("call_unanswered".to_string()),
            None,
            None,
            None,
        )
        .unwrap();
        let log = store.find_client("c1").unwrap().logs.last().unwrap().clone();
        assert!(log.content.contains("无人接听"));

        let err = handle_add_log(&mut store, "c1", None, Some("nope".to_string()), None, None, None)
            .unwrap_err();
        assert!(matches!(err, CliError::UnknownTemplate(_)));
    }

    #[test]
    fn add_client_splits_comma_tags() {
        let mut store = ClientStore::in_memory(Vec::new());
        handle_add_client(
            &mut store,
            "海景房客户".to_string(),
            None,
            None,
            None,
            None,
            Some("豪宅, 海景".to_string()),
        )
        .unwrap();
        let client = &store.snapshot()[0];
        assert_eq!(client.tags, vec!["豪宅", "海景"]);
    }
}
