use serde::{Deserialize, Serialize};

// ── Skills ──

/// Freshness of a skill, derived from its directory modification time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Fresh,
    Stale,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub downloads: String,
    pub last_updated: String,
    pub status: Freshness,
    pub rating: String,
    pub icon: String,
    pub refresh_command: String,
}

/// A live event matched to a cataloged skill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSkillBinding {
    pub name: String,
    pub icon: String,
    pub last_seen: String,
    pub event: String,
    pub status: Freshness,
}

// ── Events and traces ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiveEvent {
    pub icon: String,
    pub text: String,
    pub time: String,
    pub status: String,
    /// Name of the matched skill, if any.
    #[serde(default)]
    pub skill: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Action,
    Tool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTraceEntry {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatLine {
    pub role: String,
    pub text: String,
    pub time: String,
}

// ── Memory ──

/// A `.md` note under the workspace memory directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryFileRef {
    pub name: String,
    /// Modification time, ms since the Unix epoch.
    pub modified: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemorySection {
    pub current_file: String,
    pub files: Vec<String>,
    pub content: String,
}

// ── Overview ──

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hero {
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeroMetric {
    pub label: String,
    pub value: String,
    pub trend: String,
    #[serde(rename = "type")]
    pub kind: Trend,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub hero: Hero,
    pub metrics: Vec<HeroMetric>,
    pub activity_data: Vec<u32>,
    pub live_events: Vec<LiveEvent>,
    pub buddy_log: Vec<String>,
    pub thesis_summary: String,
}

// ── Usage ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelShare {
    pub name: String,
    pub percent: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySpend {
    pub day: String,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectCost {
    pub name: String,
    pub cost: u32,
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total_spend: u32,
    pub billing_cycle: String,
    pub total_tokens: String,
    pub model_split: Vec<ModelShare>,
    pub weekly_spend: Vec<DailySpend>,
    pub project_usage: Vec<ProjectCost>,
}

// ── Health ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemStat {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogLine {
    pub time: String,
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub detail: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub status: String,
    pub uptime: String,
    pub last_incident: String,
    pub system_stats: Vec<SystemStat>,
    pub live_activity: Vec<LiveEvent>,
    pub recent_logs: Vec<LogLine>,
}

// ── Scheduler ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskSpan {
    pub start: u8,
    pub end: u8,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledTasks {
    pub reports: Vec<TaskSpan>,
    pub backups: Vec<TaskSpan>,
    pub alerts: Vec<TaskSpan>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelShare {
    pub name: String,
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerMetrics {
    pub tasks_completed: u32,
    pub avg_response_time: u32,
    pub channel_activity: Vec<ChannelShare>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerSummary {
    pub current_month: String,
    pub timezone: String,
    pub selected_day: u8,
    pub tasks: ScheduledTasks,
    pub metrics: SchedulerMetrics,
    pub failed_tasks: u32,
}

// ── Security ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub action: String,
    pub time: String,
    pub detail: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityStats {
    pub block_rate: String,
    pub breaches: u32,
    pub log_retention: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentTeam {
    pub name: String,
    pub status: String,
    pub uptime: String,
    pub tasks: u32,
    pub health: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Policy {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySummary {
    pub activity_map: Vec<u32>,
    pub audit_log: Vec<AuditEntry>,
    pub stats: SecurityStats,
    pub team: Vec<AgentTeam>,
    pub policies: Vec<Policy>,
}

// ── Biometrics ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Biometrics {
    pub energy: u32,
    pub sleep: f32,
    pub focus: String,
    pub water: String,
    pub alerts: Vec<String>,
}

impl Default for Biometrics {
    fn default() -> Self {
        Self {
            energy: 82,
            sleep: 7.2,
            focus: "High".into(),
            water: "1.2L".into(),
            alerts: Vec::new(),
        }
    }
}

// ── Snapshot ──

/// One complete aggregation of workspace state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub overview: Overview,
    pub usage: UsageSummary,
    pub health: HealthSummary,
    pub skills: Vec<Skill>,
    pub memory: MemorySection,
    pub scheduler: SchedulerSummary,
    pub security: SecuritySummary,
    pub biometrics: Biometrics,
    pub decision_trace: Vec<DecisionTraceEntry>,
    pub chat_logs: Vec<ChatLine>,
    pub active_skills: Vec<ActiveSkillBinding>,
    pub buddy_log: Vec<String>,
    pub thesis_summary: String,
    pub next_move: String,
}

// ── Live automations ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    pub price: String,
    pub tokens: i64,
    pub breakeven: String,
    pub value: String,
    pub pnl: String,
    pub pnl_percent: String,
    pub last_update: String,
    pub next_check: String,
}

impl Default for PositionRecord {
    fn default() -> Self {
        Self {
            price: "0.9742".into(),
            tokens: 2977,
            breakeven: "1.0846".into(),
            value: "2900.19".into(),
            pnl: "-328.66".into(),
            pnl_percent: "-10.4".into(),
            last_update: "Just now".into(),
            next_check: "Next hour".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentPost {
    pub account: String,
    pub time: String,
    pub sentiment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    pub summary: String,
    pub badge: String,
    pub latest_posts: Vec<SentimentPost>,
    pub next_check: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckinSummary {
    pub schedule: String,
    pub last_question: String,
    pub insights_count: u32,
    pub next_check: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThesisProgress {
    pub progress: u32,
    pub current_focus: String,
    pub last_action: String,
}

/// Summary of the recurring automations that write into the workspace.
///
/// The widget reads the position, sentiment and check-in records under
/// `sui`, `crypto` and `buddy`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutomationsSummary {
    pub last_update: String,
    #[serde(rename = "sui")]
    pub position: PositionRecord,
    #[serde(rename = "crypto")]
    pub sentiment: SentimentSummary,
    #[serde(rename = "buddy")]
    pub checkin: CheckinSummary,
    pub thesis: ThesisProgress,
}
