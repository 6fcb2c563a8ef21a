use std::sync::OnceLock;
use std::time::{Duration, Instant};

use kidboard_core::matcher::{build_bindings, tag_events, SkillMatcher, SubstringMatcher};
use kidboard_core::*;
use kidboard_store::{GitHistory, WorkspaceConfig};
use rand::Rng;
use time::OffsetDateTime;

use crate::collect;
use crate::host::HostStats;
use crate::skills::{fallback_catalog, SkillCatalogBuilder};

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Instant the first builder was created in this process.
fn process_started() -> Instant {
    *PROCESS_START.get_or_init(Instant::now)
}

// ── Raw inputs ──

/// Everything read from disk, git and the host before assembly.
#[derive(Debug, Clone, Default)]
struct Inputs {
    memory_files: Vec<MemoryFileRef>,
    memory_name: String,
    memory_content: String,
    commit_count: String,
    skills: Vec<Skill>,
    live_events: Vec<LiveEvent>,
    trace: Vec<DecisionTraceEntry>,
    buddy_log: Vec<String>,
    thesis_summary: String,
    host: HostStats,
    uptime: Duration,
    network: u32,
}

// ── Builder ──

/// Assembles a [`WorkspaceSnapshot`] from an explicit [`WorkspaceConfig`].
pub struct SnapshotBuilder {
    config: WorkspaceConfig,
    now: Option<OffsetDateTime>,
    started: Instant,
    host: Option<HostStats>,
    matcher: Box<dyn SkillMatcher + Send + Sync>,
}

impl SnapshotBuilder {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self {
            config,
            now: None,
            started: process_started(),
            host: None,
            matcher: Box::new(SubstringMatcher),
        }
    }

    /// Pin "now" instead of reading the clock at build time.
    pub fn with_now(mut self, now: OffsetDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Measure uptime from `started` instead of process start.
    pub fn with_started(mut self, started: Instant) -> Self {
        self.started = started;
        self
    }

    /// Use fixed host figures instead of probing.
    pub fn with_host(mut self, host: HostStats) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_matcher(mut self, matcher: Box<dyn SkillMatcher + Send + Sync>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Build a fresh snapshot. Never fails.
    pub fn build(&self) -> WorkspaceSnapshot {
        let now = self.now.unwrap_or_else(OffsetDateTime::now_utc);
        let inputs = self.gather(now);
        tracing::debug!(
            skills = inputs.skills.len(),
            memory_files = inputs.memory_files.len(),
            events = inputs.live_events.len(),
            "workspace inputs gathered"
        );
        assemble(inputs, now, self.matcher.as_ref())
    }

    fn gather(&self, now: OffsetDateTime) -> Inputs {
        let paths = self.config.paths();
        let git = GitHistory::new(&self.config.project_root);
        let now_ms = (now.unix_timestamp_nanos() / 1_000_000) as i64;

        let memory_files = collect::memory_files(&paths);
        let (memory_name, memory_content) = collect::latest_memory(&paths, &memory_files);
        let commits = git.recent_commits(self.config.commit_limit);

        Inputs {
            commit_count: git.commit_count(),
            skills: SkillCatalogBuilder::new(&paths, now_ms).build(),
            live_events: collect::live_events(&git.working_tree_changes(), self.config.event_limit),
            trace: collect::decision_trace(&paths, &commits, self.config.trace_note_limit),
            buddy_log: collect::buddy_log(&paths),
            thesis_summary: collect::thesis_summary(&paths),
            host: self.host.unwrap_or_else(HostStats::probe),
            uptime: self.started.elapsed(),
            network: rand::thread_rng().gen_range(50..=90),
            memory_files,
            memory_name,
            memory_content,
        }
    }
}

/// Structurally complete snapshot built without touching the workspace.
pub fn fallback_snapshot() -> WorkspaceSnapshot {
    let inputs = Inputs {
        memory_name: collect::DEFAULT_MEMORY_FILE.into(),
        commit_count: "0".into(),
        skills: fallback_catalog(),
        live_events: collect::live_events(&[], 0),
        network: 50,
        ..Inputs::default()
    };
    assemble(inputs, OffsetDateTime::now_utc(), &SubstringMatcher)
}

// ── Assembly ──

fn assemble(mut inputs: Inputs, now: OffsetDateTime, matcher: &dyn SkillMatcher) -> WorkspaceSnapshot {
    let memory_count = inputs.memory_files.len() as u32;

    let mut live_events = std::mem::take(&mut inputs.live_events);
    tag_events(&mut live_events, &inputs.skills, matcher);
    let active_skills = build_bindings(&live_events, &inputs.skills, matcher);
    let next_move = collect::next_move(&inputs.buddy_log, &inputs.thesis_summary);
    let chat_logs = collect::chat_logs(&inputs.memory_content);

    WorkspaceSnapshot {
        overview: Overview {
            hero: Hero {
                title: "Kid Live Control".into(),
                desc: "Everything you need to monitor Richie + Codex in one responsive board."
                    .into(),
            },
            metrics: hero_metrics(&inputs, memory_count),
            activity_data: Vec::new(),
            live_events: live_events.clone(),
            buddy_log: inputs.buddy_log.clone(),
            thesis_summary: inputs.thesis_summary.clone(),
        },
        usage: usage_summary(memory_count),
        health: health_summary(&inputs, &live_events),
        skills: inputs.skills.clone(),
        memory: MemorySection {
            current_file: inputs.memory_name.clone(),
            files: inputs.memory_files.iter().map(|f| f.name.clone()).collect(),
            content: inputs.memory_content.clone(),
        },
        scheduler: scheduler_summary(now, memory_count),
        security: security_summary(&live_events),
        biometrics: Biometrics::default(),
        decision_trace: inputs.trace,
        chat_logs,
        active_skills,
        buddy_log: inputs.buddy_log,
        thesis_summary: inputs.thesis_summary,
        next_move,
    }
}

fn metric(label: &str, value: String, trend: String, kind: Trend) -> HeroMetric {
    HeroMetric {
        label: label.into(),
        value,
        trend,
        kind,
    }
}

fn hero_metrics(inputs: &Inputs, memory_count: u32) -> Vec<HeroMetric> {
    let memory_trend = if memory_count > 0 {
        format!("+{memory_count}")
    } else {
        "—".to_string()
    };
    vec![
        metric("Memory files", memory_count.to_string(), memory_trend, Trend::Up),
        metric("Skills ready", inputs.skills.len().to_string(), "+1".into(), Trend::Up),
        metric("Git commits", inputs.commit_count.clone(), "+1".into(), Trend::Up),
        metric(
            "Uptime",
            format!("{}m", inputs.uptime.as_secs() / 60),
            "-0m".into(),
            Trend::Down,
        ),
    ]
}

fn usage_summary(memory_count: u32) -> UsageSummary {
    const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    UsageSummary {
        total_spend: (memory_count * 12).max(120),
        billing_cycle: "Budget refreshes every 30 days".into(),
        total_tokens: format!("{}K", memory_count.min(12) * 120),
        model_split: [
            ("gpt-4", 45, "#a3e635"),
            ("Claude", 35, "#818cf8"),
            ("Local", 20, "#22d3d1"),
        ]
        .into_iter()
        .map(|(name, percent, color)| ModelShare {
            name: name.into(),
            percent,
            color: color.into(),
        })
        .collect(),
        weekly_spend: DAYS
            .iter()
            .enumerate()
            .map(|(i, day)| DailySpend {
                day: day.to_string(),
                amount: 200 + i as u32 * 45,
            })
            .collect(),
        project_usage: [
            ("Kid Dashboard", 680, 55),
            ("ERP Pilot", 420, 32),
            ("Research", 220, 12),
        ]
        .into_iter()
        .map(|(name, cost, percent)| ProjectCost {
            name: name.into(),
            cost,
            percent,
        })
        .collect(),
    }
}

fn health_summary(inputs: &Inputs, live_events: &[LiveEvent]) -> HealthSummary {
    let stat = |name: &str, value: u32| SystemStat {
        name: name.into(),
        value,
    };
    HealthSummary {
        status: "All systems operational".into(),
        uptime: format!("{}h", (inputs.uptime.as_secs_f64() / 3600.0).round() as u64),
        last_incident: "None this week".into(),
        system_stats: vec![
            stat("CPU", inputs.host.cpu_percent()),
            stat("Memory", inputs.host.memory_percent()),
            stat("Storage", 48),
            stat("Network", inputs.network.min(100)),
        ],
        live_activity: live_events.to_vec(),
        recent_logs: live_events
            .iter()
            .take(6)
            .enumerate()
            .map(|(idx, e)| LogLine {
                time: format!("{}:{:02}", 16 - idx, idx * 3),
                kind: TraceKind::Action,
                detail: e.text.clone(),
                duration: format!("{}s", idx + 1),
            })
            .collect(),
    }
}

fn span(start: u8, end: u8, label: &str) -> TaskSpan {
    TaskSpan {
        start,
        end,
        label: label.into(),
    }
}

fn scheduler_summary(now: OffsetDateTime, memory_count: u32) -> SchedulerSummary {
    SchedulerSummary {
        current_month: format!("{} {}", now.month(), now.year()),
        timezone: "Asia/Shanghai".into(),
        selected_day: now.day(),
        tasks: ScheduledTasks {
            reports: vec![span(1, 2, "Weekly"), span(15, 17, "Monthly")],
            backups: vec![span(3, 3, "Daily"), span(28, 29, "Full")],
            alerts: vec![span(9, 15, "Monitoring")],
        },
        metrics: SchedulerMetrics {
            tasks_completed: 120 + memory_count,
            avg_response_time: 90 + memory_count,
            channel_activity: [("WhatsApp", 45), ("Email", 30), ("Slack", 15), ("Other", 10)]
                .into_iter()
                .map(|(name, percent)| ChannelShare {
                    name: name.into(),
                    percent,
                })
                .collect(),
        },
        failed_tasks: memory_count.min(5),
    }
}

fn security_summary(live_events: &[LiveEvent]) -> SecuritySummary {
    let team = |name: &str, status: &str, uptime: &str, tasks: u32| AgentTeam {
        name: name.into(),
        status: status.into(),
        uptime: uptime.into(),
        tasks,
        health: "Good".into(),
    };
    let policy = |name: &str, value: &str| Policy {
        name: name.into(),
        value: value.into(),
    };
    SecuritySummary {
        activity_map: vec![10, 15, 8, 22, 5, 18, 12, 25, 8, 14],
        audit_log: live_events
            .iter()
            .take(6)
            .map(|e| AuditEntry {
                action: e.icon.clone(),
                time: e.time.clone(),
                detail: e.text.clone(),
                status: "allowed".into(),
            })
            .collect(),
        stats: SecurityStats {
            block_rate: "99.9%".into(),
            breaches: 0,
            log_retention: "28d".into(),
        },
        team: vec![
            team("Personal", "Online", "14d 3h", 142),
            team("Family", "Online", "7d 12h", 89),
            team("Company", "Maintenance", "2h 15m", 0),
        ],
        policies: vec![
            policy("Default sandbox level", "restricted"),
            policy("Auto-approve shell", "disabled"),
            policy("Memory encryption", "enabled"),
            policy("Audit retention", "90 days"),
        ],
    }
}
