//! Summary of the recurring automations that drop files into the
//! workspace: the position tracker, the sentiment scan, the check-in
//! prompts and the thesis tracker.

use std::sync::LazyLock;

use kidboard_core::{
    AutomationsSummary, CheckinSummary, PositionRecord, SentimentPost, SentimentSummary,
    ThesisProgress,
};
use kidboard_store::{read_text, ReadError, WorkspaceConfig, WorkspacePaths};
use regex::Regex;
use time::OffsetDateTime;

static OVERALL_BIAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Overall Bias:\*\* (.+)").unwrap());
static QUESTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Q:\*\* (.+)").unwrap());
static FLOAT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap());
static INT_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+").unwrap());

const SENTIMENT_DIGEST: &str = "3 bullish, 1 mixed, 1 bearish - Bottom territory";
const INSIGHTS_HEADING: &str = "What I've Learned About";
const QUESTION_PREVIEW_CHARS: usize = 60;

// ── Position log ──

fn column<'a>(cols: &[&'a str], idx: usize, name: &str) -> Result<&'a str, ReadError> {
    cols.get(idx)
        .map(|c| c.trim())
        .ok_or_else(|| ReadError::parse("position log", format!("missing column `{name}`")))
}

/// Parse the leading number of `raw`, ignoring anything after it
/// (`"0.97abc"` reads as 0.97). No leading number is an error.
fn leading<T: std::str::FromStr>(re: &Regex, raw: &str, name: &str) -> Result<T, ReadError> {
    re.find(raw)
        .and_then(|m| m.as_str().parse::<T>().ok())
        .ok_or_else(|| ReadError::parse("position log", format!("{name}={raw:?} is not a number")))
}

fn float(cols: &[&str], idx: usize, name: &str) -> Result<f64, ReadError> {
    leading(&FLOAT_PREFIX, column(cols, idx, name)?, name)
}

fn integer(cols: &[&str], idx: usize, name: &str) -> Result<i64, ReadError> {
    leading(&INT_PREFIX, column(cols, idx, name)?, name)
}

/// Parse one `timestamp,price,tokens,breakeven,value,cost,pnl,pnlPercent`
/// line into display values.
pub fn parse_position_line(line: &str) -> Result<PositionRecord, ReadError> {
    let cols: Vec<&str> = line.split(',').collect();
    Ok(PositionRecord {
        last_update: column(&cols, 0, "timestamp")?.to_string(),
        price: format!("{:.4}", float(&cols, 1, "price")?),
        tokens: integer(&cols, 2, "tokens")?,
        breakeven: format!("{:.4}", float(&cols, 3, "breakeven")?),
        value: format!("{:.2}", float(&cols, 4, "value")?),
        pnl: format!("{:.2}", float(&cols, 6, "pnl")?),
        pnl_percent: format!("{:.1}", float(&cols, 7, "pnlPercent")?),
        next_check: "Next hour".into(),
    })
}

fn load_position(paths: &WorkspacePaths) -> PositionRecord {
    let content = read_text(&paths.position_log);
    let Some(last) = content.trim().lines().last() else {
        return PositionRecord::default();
    };
    parse_position_line(last).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "position log unusable, using defaults");
        PositionRecord::default()
    })
}

// ── Sentiment ──

fn sentiment_posts() -> Vec<SentimentPost> {
    [
        ("KillaXBT", "6h ago", "bullish"),
        ("CryptoBheem", "Feb 5", "bullish"),
        ("BrutalBtc", "19h ago", "bullish"),
        ("RealInsider69", "7h ago", "bearish"),
        ("TheCryptoLemon", "8h ago", "mixed"),
    ]
    .into_iter()
    .map(|(account, time, sentiment)| SentimentPost {
        account: account.into(),
        time: time.into(),
        sentiment: sentiment.into(),
    })
    .collect()
}

fn bias_badge(bias: &str) -> &'static str {
    let bias = bias.to_lowercase();
    if bias.contains("bullish") {
        "🟢"
    } else if bias.contains("bearish") {
        "🔴"
    } else if bias.contains("mixed") {
        "🟡"
    } else {
        "⚪"
    }
}

fn load_sentiment(paths: &WorkspacePaths) -> SentimentSummary {
    let content = read_text(&paths.sentiment_note);
    if content.is_empty() {
        return SentimentSummary {
            summary: "No data available".into(),
            badge: "⚪".into(),
            latest_posts: Vec::new(),
            next_check: "30 min".into(),
        };
    }
    let bias = OVERALL_BIAS
        .captures(&content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or("Analyzing...");
    SentimentSummary {
        summary: SENTIMENT_DIGEST.into(),
        badge: bias_badge(bias).into(),
        latest_posts: sentiment_posts(),
        next_check: "30 min".into(),
    }
}

// ── Check-ins ──

fn load_checkin(paths: &WorkspacePaths) -> CheckinSummary {
    let log = read_text(&paths.workspace_checkin);
    let soul = read_text(&paths.soul_file);

    let last_question = QUESTION
        .captures_iter(&log)
        .last()
        .and_then(|c| c.get(1))
        .map(|m| {
            let preview: String = m.as_str().trim().chars().take(QUESTION_PREVIEW_CHARS).collect();
            format!("{preview}...")
        })
        .unwrap_or_else(|| "Ready for next check-in".into());

    CheckinSummary {
        schedule: "3x/day (10AM, 3PM, 9PM)".into(),
        last_question,
        insights_count: if soul.contains(INSIGHTS_HEADING) { 5 } else { 3 },
        next_check: "10:00 AM".into(),
    }
}

// ── Thesis ──

fn thesis_progress(tracker: &str) -> ThesisProgress {
    let mut progress: u32 = 0;
    if tracker.contains("Theme") {
        progress += 20;
    }
    if tracker.contains("research question") {
        progress += 20;
    }
    if tracker.contains("outline") || tracker.contains("structure") {
        progress += 20;
    }
    if tracker.chars().count() > 500 {
        progress = progress.max(15);
    }
    let current_focus = match progress {
        p if p < 20 => "Defining thesis topic",
        p if p < 40 => "Research questions",
        p if p < 60 => "Literature review",
        _ => "Writing draft",
    };
    ThesisProgress {
        progress,
        current_focus: current_focus.into(),
        last_action: if tracker.is_empty() {
            "Not started".into()
        } else {
            "Updated tracker".into()
        },
    }
}

// ── Collector ──

pub struct AutomationsCollector<'a> {
    paths: &'a WorkspacePaths,
    now: OffsetDateTime,
}

impl<'a> AutomationsCollector<'a> {
    pub fn new(paths: &'a WorkspacePaths, now: OffsetDateTime) -> Self {
        Self { paths, now }
    }

    pub fn build(&self) -> AutomationsSummary {
        AutomationsSummary {
            last_update: format!("{:02}:{:02}", self.now.hour(), self.now.minute()),
            position: load_position(self.paths),
            sentiment: load_sentiment(self.paths),
            checkin: load_checkin(self.paths),
            thesis: thesis_progress(&read_text(&self.paths.thesis_tracker)),
        }
    }
}

/// Collect the automation summary for `config` as of now.
pub fn build_automations(config: &WorkspaceConfig) -> AutomationsSummary {
    let paths = config.paths();
    AutomationsCollector::new(&paths, OffsetDateTime::now_utc()).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn workspace() -> (tempfile::TempDir, WorkspacePaths) {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("dashboard");
        fs::create_dir_all(&project).unwrap();
        fs::create_dir_all(tmp.path().join("memory")).unwrap();
        let paths = WorkspacePaths::discover(project, tmp.path());
        (tmp, paths)
    }

    // 2026-02-05 09:05:00 UTC
    fn morning() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_770_282_300).unwrap()
    }

    #[test]
    fn position_from_last_csv_line() {
        let (_tmp, paths) = workspace();
        fs::write(
            &paths.position_log,
            "timestamp,price,tokens,breakeven,value,cost,pnl,pnlPercent\n2026-02-04T10:00:00,1.1,2977,1.0846,3274.70,0,45.85,1.4\n2026-02-05T10:00:00,0.9742,2977,1.0846,2900.19,0,-328.66,-10.4\n",
        )
        .unwrap();
        let p = load_position(&paths);
        assert_eq!(p.price, "0.9742");
        assert_eq!(p.pnl, "-328.66");
        assert_eq!(p.pnl_percent, "-10.4");
        assert_eq!(p.tokens, 2977);
        assert_eq!(p.breakeven, "1.0846");
        assert_eq!(p.value, "2900.19");
        assert_eq!(p.last_update, "2026-02-05T10:00:00");
    }

    #[test]
    fn position_values_are_reformatted() {
        let p = parse_position_line("t,1.5,10.9,2,3.456,0,-1,7").unwrap();
        assert_eq!(p.price, "1.5000");
        assert_eq!(p.tokens, 10);
        assert_eq!(p.breakeven, "2.0000");
        assert_eq!(p.value, "3.46");
        assert_eq!(p.pnl, "-1.00");
        assert_eq!(p.pnl_percent, "7.0");
    }

    #[test]
    fn trailing_garbage_after_numbers_is_ignored() {
        let p = parse_position_line("t,0.97abc,2977 tokens,1.08x,+2900.5$,0,-328.661 usd,-10.44%").unwrap();
        assert_eq!(p.price, "0.9700");
        assert_eq!(p.tokens, 2977);
        assert_eq!(p.breakeven, "1.0800");
        assert_eq!(p.value, "2900.50");
        assert_eq!(p.pnl, "-328.66");
        assert_eq!(p.pnl_percent, "-10.4");
    }

    #[test]
    fn bad_position_line_falls_back() {
        assert!(matches!(
            parse_position_line("t,abc"),
            Err(ReadError::ParseFailure { .. })
        ));
        let (_tmp, paths) = workspace();
        fs::write(&paths.position_log, "garbage\n").unwrap();
        assert_eq!(load_position(&paths), PositionRecord::default());
    }

    #[test]
    fn missing_position_log_uses_defaults() {
        let (_tmp, paths) = workspace();
        assert_eq!(load_position(&paths), PositionRecord::default());
    }

    #[test]
    fn sentiment_badges() {
        let (_tmp, paths) = workspace();
        assert_eq!(load_sentiment(&paths).summary, "No data available");
        assert!(load_sentiment(&paths).latest_posts.is_empty());

        fs::write(&paths.sentiment_note, "**Overall Bias:** Cautiously BULLISH\n").unwrap();
        let s = load_sentiment(&paths);
        assert_eq!(s.badge, "🟢");
        assert_eq!(s.latest_posts.len(), 5);

        fs::write(&paths.sentiment_note, "**Overall Bias:** mixed signals\n").unwrap();
        assert_eq!(load_sentiment(&paths).badge, "🟡");

        fs::write(&paths.sentiment_note, "no bias line here\n").unwrap();
        assert_eq!(load_sentiment(&paths).badge, "⚪");
    }

    #[test]
    fn checkin_last_question_and_insights() {
        let (_tmp, paths) = workspace();
        assert_eq!(load_checkin(&paths).last_question, "Ready for next check-in");
        assert_eq!(load_checkin(&paths).insights_count, 3);

        fs::write(
            &paths.workspace_checkin,
            "**Q:** first question\n**Q:** What would you tell your younger self about the thesis and the startup ideas you keep chasing?\n",
        )
        .unwrap();
        fs::write(&paths.soul_file, "## What I've Learned About Richie\n").unwrap();
        let c = load_checkin(&paths);
        assert!(c.last_question.starts_with("What would you tell"));
        assert!(c.last_question.ends_with("..."));
        assert_eq!(c.last_question.chars().count(), 63);
        assert_eq!(c.insights_count, 5);
    }

    #[test]
    fn thesis_progress_bands() {
        assert_eq!(thesis_progress("").progress, 0);
        assert_eq!(thesis_progress("").last_action, "Not started");
        assert_eq!(thesis_progress("Theme: agents").current_focus, "Research questions");
        let full = thesis_progress("Theme\nresearch question\noutline");
        assert_eq!(full.progress, 60);
        assert_eq!(full.current_focus, "Writing draft");
        let long = "x".repeat(501);
        assert_eq!(thesis_progress(&long).progress, 15);
        assert_eq!(thesis_progress(&long).current_focus, "Defining thesis topic");
    }

    #[test]
    fn summary_timestamp_and_sections() {
        let (_tmp, paths) = workspace();
        let summary = AutomationsCollector::new(&paths, morning()).build();
        assert_eq!(summary.last_update, "09:05");
        assert_eq!(summary.position, PositionRecord::default());
        assert_eq!(summary.thesis.progress, 0);
    }
}
