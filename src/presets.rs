//! Fixed vocabularies and the built-in sample collection.
//!
//! The status labels, tag options and quick templates mirror what the
//! hosted app offers in its pickers; the sample clients are what the CLI
//! runs against when no data file exists yet.

use crate::models::{Client, ClientLog, Requirements, Urgency};

/// Status assigned to freshly created clients.
pub const DEFAULT_STATUS: &str = "新客户";

/// The fixed set of status labels clients move through.
pub const CLIENT_STATUSES: &[&str] = &[
    "新客户",
    "看房中",
    "意向强烈",
    "已下Offer",
    "遇到困难/停滞",
    "已成交",
    "暂缓/冷淡",
];

/// Tag vocabulary offered by the intake form (free-text tags are also
/// allowed; these are just the suggestions).
pub const TAG_OPTIONS: &[&str] = &["学区房", "投资", "新移民", "首次购房", "出租需求", "豪宅"];

/// A canned follow-up note, one keypress instead of typing.
pub struct QuickLogTemplate {
    pub key: &'static str,
    pub label: &'static str,
    pub content: &'static str,
}

pub const QUICK_LOG_TEMPLATES: &[QuickLogTemplate] = &[
    QuickLogTemplate {
        key: "call_unanswered",
        label: "📞 电话未接",
        content: "致电客户无人接听，已通过微信留言告知事宜。",
    },
    QuickLogTemplate {
        key: "organize_listings",
        label: "🔍 整理房源",
        content: "正在根据客户最新反馈筛选新一轮房源，计划整理好后发送给客户。",
    },
    QuickLogTemplate {
        key: "sent_listings",
        label: "📬 已发房源",
        content: "已通过微信发送最新房源清单，请客户查看并反馈意向。",
    },
    QuickLogTemplate {
        key: "confirmed_viewing",
        label: "📅 确认约看",
        content: "已与客户确认看房时间与地点，提醒提前安排好行程。",
    },
    QuickLogTemplate {
        key: "viewing_satisfied",
        label: "✅ 带看满意",
        content: "本次带看整体满意，客户对其中一两套房源有进一步兴趣。",
    },
    QuickLogTemplate {
        key: "viewing_rejected",
        label: "❌ 带看否决",
        content: "本次带看整体不合适，已与客户沟通具体原因并调整选房方向。",
    },
    QuickLogTemplate {
        key: "still_considering",
        label: "🤔 还在考虑",
        content: "客户表示还在综合比较，计划几天后再做下一步跟进。",
    },
];

/// Preset next-action texts for the add-log flow.
pub struct NextActionOption {
    pub label: &'static str,
    pub value: &'static str,
}

pub const NEXT_ACTION_OPTIONS: &[NextActionOption] = &[
    NextActionOption {
        label: "安排看房",
        value: "安排线下看房，确认时间地点。",
    },
    NextActionOption {
        label: "发送房源",
        value: "发送新一轮匹配房源给客户。",
    },
    NextActionOption {
        label: "确认贷款方案",
        value: "与客户沟通贷款方案和预算区间。",
    },
    NextActionOption {
        label: "跟进反馈",
        value: "通过微信跟进客户对现有房源的反馈。",
    },
];

fn log(
    id: &str,
    date: &str,
    content: &str,
    next_action: Option<&str>,
    next_action_todo: Option<&str>,
) -> ClientLog {
    ClientLog {
        id: id.to_string(),
        date: date.to_string(),
        content: content.to_string(),
        images: Vec::new(),
        next_action: next_action.map(str::to_string),
        next_action_todo: next_action_todo.map(str::to_string),
    }
}

/// The five-client demo collection used when no data file is present.
pub fn sample_clients() -> Vec<Client> {
    vec![
        Client {
            id: "c1".to_string(),
            name: Some("王小明".to_string()),
            remark_name: "学区房客户".to_string(),
            phone: Some("1234567890".to_string()),
            wechat: Some("wx001".to_string()),
            birthday: Some("1990-02-15".to_string()),
            status: "新客户".to_string(),
            urgency: Urgency::High,
            tags: vec!["学区房".to_string(), "首次购房".to_string()],
            requirements: Requirements {
                budget_min: Some("100万".to_string()),
                budget_max: Some("150万".to_string()),
                areas: vec!["Irvine".to_string(), "Tustin".to_string()],
                property_type: Some("Condo".to_string()),
                tags: vec!["学区房".to_string(), "首次购房".to_string()],
                notes: Some("偏好新小区，靠近学校".to_string()),
            },
            logs: vec![
                log(
                    "c1-log-1",
                    "2025-02-01",
                    "初次沟通，对 Irvine 地区学区房感兴趣。",
                    Some("安排看房"),
                    Some("下周末安排 2 套看房"),
                ),
                log(
                    "c1-log-2",
                    "2025-02-10",
                    "客户看房后反馈满意度高。",
                    Some("跟进预算确认"),
                    None,
                ),
            ],
        },
        Client {
            id: "c2".to_string(),
            name: Some("Lisa Huang".to_string()),
            remark_name: "投资客".to_string(),
            phone: Some("9876543210".to_string()),
            wechat: Some("lisa-invest".to_string()),
            birthday: Some("1985-06-20".to_string()),
            status: "已成交".to_string(),
            urgency: Urgency::Low,
            tags: vec!["投资".to_string(), "出租需求".to_string()],
            requirements: Requirements {
                budget_min: Some("80万".to_string()),
                budget_max: Some("100万".to_string()),
                areas: vec!["Costa Mesa".to_string(), "Anaheim".to_string()],
                property_type: Some("Townhouse".to_string()),
                tags: vec!["投资".to_string(), "出租需求".to_string()],
                notes: Some("购买后预计长期出租".to_string()),
            },
            logs: vec![log(
                "c2-log-1",
                "2025-01-12",
                "客户想找高租金回报的 townhouse。",
                Some("推荐 Anaheim 区域新盘"),
                None,
            )],
        },
        Client {
            id: "c3".to_string(),
            name: Some("陈建国".to_string()),
            remark_name: "豪宅客户".to_string(),
            phone: Some("6668889999".to_string()),
            wechat: Some("cjg-rich".to_string()),
            birthday: Some("1978-11-02".to_string()),
            status: "看房中".to_string(),
            urgency: Urgency::Medium,
            tags: vec!["豪宅".to_string(), "海景".to_string()],
            requirements: Requirements {
                budget_min: Some("300万".to_string()),
                budget_max: Some("500万".to_string()),
                areas: vec!["Newport Beach".to_string(), "Laguna Beach".to_string()],
                property_type: Some("Single House".to_string()),
                tags: vec!["豪宅".to_string(), "海景".to_string()],
                notes: Some("必须有海景与大庭院".to_string()),
            },
            logs: vec![log(
                "c3-log-1",
                "2025-02-05",
                "客户看中一套 Newport Beach 海景房。",
                Some("准备出 offer"),
                None,
            )],
        },
        Client {
            id: "c4".to_string(),
            name: Some("赵丽".to_string()),
            remark_name: "新移民".to_string(),
            phone: Some("1357924680".to_string()),
            wechat: Some("zhaoli2025".to_string()),
            birthday: Some("1992-12-05".to_string()),
            status: "暂缓/冷淡".to_string(),
            urgency: Urgency::Low,
            tags: vec!["新移民".to_string()],
            requirements: Requirements {
                budget_min: Some("60万".to_string()),
                budget_max: Some("80万".to_string()),
                areas: vec!["Fullerton".to_string()],
                property_type: Some("Condo".to_string()),
                tags: vec!["新移民".to_string()],
                notes: Some("预算有限，需要慢慢看".to_string()),
            },
            logs: vec![log(
                "c4-log-1",
                "2025-02-01",
                "沟通后发现预算有限，决定先不急。",
                None,
                None,
            )],
        },
        Client {
            id: "c5".to_string(),
            name: Some("Jenny Wu".to_string()),
            remark_name: "首次购房者".to_string(),
            phone: Some("5551231234".to_string()),
            wechat: Some("jennyhome".to_string()),
            birthday: Some("1994-03-18".to_string()),
            status: "意向强烈".to_string(),
            urgency: Urgency::High,
            tags: vec!["首次购房".to_string()],
            requirements: Requirements {
                budget_min: Some("70万".to_string()),
                budget_max: Some("90万".to_string()),
                areas: vec!["Lake Forest".to_string(), "Mission Viejo".to_string()],
                property_type: Some("Townhouse".to_string()),
                tags: vec!["首次购房".to_string()],
                notes: Some("希望三房两卫".to_string()),
            },
            logs: vec![log(
                "c5-log-1",
                "2025-02-05",
                "客户非常积极，本周末看房。",
                Some("准备预审贷款"),
                None,
            )],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_clients_have_stable_ids_and_logs() {
        let clients = sample_clients();
        assert_eq!(clients.len(), 5);
        assert!(clients.iter().all(|c| !c.id.is_empty()));
        // Every sample client has at least one historical contact point.
        assert!(clients.iter().all(|c| !c.logs.is_empty()));
    }

    #[test]
    fn default_status_is_a_known_status() {
        assert!(CLIENT_STATUSES.contains(&DEFAULT_STATUS));
    }
}
