use serde::{Deserialize, Serialize};

/// Display name used when a client has neither a remark name nor a legal name.
pub const UNNAMED_CLIENT: &str = "未命名客户";

/// How hot a client is right now. Drives list ordering, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::High => "非常紧急",
            Urgency::Medium => "中等",
            Urgency::Low => "不急/慢慢看",
        }
    }

    /// Numeric rank for ordering clients (high first).
    pub fn rank(&self) -> u8 {
        match self {
            Urgency::High => 3,
            Urgency::Medium => 2,
            Urgency::Low => 1,
        }
    }
}

impl std::str::FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Urgency::High),
            "medium" => Ok(Urgency::Medium),
            "low" => Ok(Urgency::Low),
            other => Err(format!("Unknown urgency level: {}", other)),
        }
    }
}

/// One timestamped follow-up note on a client.
///
/// `next_action` optionally carries a due date in the
/// `"YYYY-MM-DD：<text>"` convention (see the `nextaction` module);
/// `next_action_todo` is the short form of the task shown instead of the
/// raw sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLog {
    pub id: String,
    pub date: String, // ISO 8601 timestamp
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>, // embedded data URLs, not references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action_todo: Option<String>,
}

impl ClientLog {
    pub fn new(content: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: format!("log-{}", now.timestamp_millis()),
            date: now.to_rfc3339(),
            content,
            images: Vec::new(),
            next_action: None,
            next_action_todo: None,
        }
    }
}

/// What the client is looking for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<String>, // free text, e.g. "100万"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<String>,
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A prospective or active customer record.
///
/// Field names serialize in camelCase so JSON snapshots stay interchangeable
/// with the documents the hosted backend stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    /// Legal name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nickname / WeChat remark, the name the agent actually uses.
    pub remark_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wechat: Option<String>,
    /// ISO date, e.g. 1992-01-11.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    pub status: String,
    pub urgency: Urgency,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default)]
    pub logs: Vec<ClientLog>,
}

impl Client {
    pub fn new(remark_name: String) -> Self {
        Self {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            name: None,
            remark_name,
            phone: None,
            wechat: None,
            birthday: None,
            status: crate::presets::DEFAULT_STATUS.to_string(),
            urgency: Urgency::Medium,
            tags: Vec::new(),
            requirements: Requirements::default(),
            logs: Vec::new(),
        }
    }

    /// Preferred display name: remark name, then legal name, then a fixed
    /// placeholder.
    pub fn display_name(&self) -> String {
        if !self.remark_name.trim().is_empty() {
            return self.remark_name.clone();
        }
        if let Some(name) = self.name.as_deref() {
            if !name.trim().is_empty() {
                return name.to_string();
            }
        }
        UNNAMED_CLIENT.to_string()
    }
}
