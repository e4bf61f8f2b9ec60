//! Free-form intake: turn pasted contact blurbs into a partial client record.
//!
//! Best-effort field recognition over loosely structured text (a forwarded
//! WeChat profile, a scribbled note). Anything that doesn't match stays
//! empty; intake never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Client, Urgency};
use crate::presets::DEFAULT_STATUS;

static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?1[-\s]?)?(\d{3})[-\s]?(\d{3})[-\s]?(\d{4})").unwrap()
});

static RE_WECHAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"微信[:：]?\s*([a-zA-Z0-9_\-]+)").unwrap());

static RE_BUDGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*[-~到]\s*(\d+)\s*(万|USD|\$)?").unwrap());

// Mainland-style 11-digit mobile number, used by the quick heuristic.
static RE_CN_MOBILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"1\d{10}").unwrap());

static RE_NAMEISH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z一-龥]{2,10}").unwrap());

/// Area names the parser knows how to spot in free text.
pub const AREA_KEYWORDS: &[&str] = &["Irvine", "Tustin", "Chino Hills", "Walnut"];

/// Tag words the parser knows how to spot in free text.
pub const TAG_KEYWORDS: &[&str] = &["学区房", "首次购房", "投资", "急", "仓库"];

/// Fields recognized from pasted text. Everything optional; the manual
/// form fills in the rest.
#[derive(Debug, Clone, Default)]
pub struct ParsedClient {
    pub remark_name: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub wechat: Option<String>,
    pub birthday: Option<String>,
    pub budget_min: Option<String>,
    pub budget_max: Option<String>,
    pub areas: Vec<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl ParsedClient {
    /// Build a full client record, defaulting status and urgency the same
    /// way the intake form does.
    pub fn into_client(self) -> Client {
        let mut client = Client::new(self.remark_name.unwrap_or_default());
        client.name = self.name;
        client.phone = self.phone;
        client.wechat = self.wechat;
        client.birthday = self.birthday;
        client.status = DEFAULT_STATUS.to_string();
        client.urgency = Urgency::Medium;
        client.tags = self.tags.clone();
        client.requirements.budget_min = self.budget_min;
        client.requirements.budget_max = self.budget_max;
        client.requirements.areas = self.areas;
        client.requirements.tags = self.tags;
        client.requirements.notes = self.notes;
        client
    }
}

/// Recognize client fields in a pasted blurb.
///
/// The first line becomes the remark name; phone, wechat handle and budget
/// range are matched by pattern; areas and tags by keyword. The whole text
/// is kept as the requirement notes.
pub fn parse_pasted_client(text: &str) -> ParsedClient {
    let clean = text.trim();
    let mut result = ParsedClient::default();

    result.remark_name = clean
        .lines()
        .next()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty());

    if let Some(m) = RE_PHONE.find(clean) {
        result.phone = Some(m.as_str().to_string());
    }

    if let Some(caps) = RE_WECHAT.captures(clean) {
        result.wechat = Some(caps[1].to_string());
    }

    if let Some(caps) = RE_BUDGET.captures(clean) {
        result.budget_min = Some(caps[1].to_string());
        result.budget_max = Some(caps[2].to_string());
    }

    for area in AREA_KEYWORDS {
        if clean.contains(area) {
            result.areas.push((*area).to_string());
        }
    }

    for tag in TAG_KEYWORDS {
        if clean.contains(tag) {
            result.tags.push((*tag).to_string());
        }
    }

    if !clean.is_empty() {
        result.notes = Some(clean.to_string());
    }

    result
}

/// The lighter heuristic used for one-line snippets: a name-ish token and
/// a mainland mobile number.
pub fn extract_info_from_text(text: &str) -> ParsedClient {
    let mut result = ParsedClient::default();
    if text.is_empty() {
        return result;
    }

    if let Some(m) = RE_CN_MOBILE.find(text) {
        result.phone = Some(m.as_str().to_string());
    }
    if let Some(m) = RE_NAMEISH.find(text) {
        result.remark_name = Some(m.as_str().to_string());
    }

    result
}
