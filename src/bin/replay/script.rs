// Scripted Visits: timed sequences of page interactions
// Each step fires one UI trigger at a virtual wall-clock time

use cafe_engine::graph::FrameState;
use cafe_engine::*;
use serde::{Deserialize, Serialize};

const MINUTE: u64 = 60_000;

// ─── Script Types ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    ToggleWallet,
    SwapInput { raw: String },
    Buy,
    OpenDex,
    StartBrew,
    Refresh,
    Collect,
    StopBrew,
    StartQuest { id: u32 },
    ClaimQuest { id: u32 },
    FeedEvent,
    Frame { dt_ms: f32 },
    Jitter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

impl Step {
    fn new(at_ms: u64, action: Action) -> Self {
        Self { at_ms, action }
    }
}

/// What a step did, beyond the view snapshot taken after it.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub ok: bool,
    pub error: Option<String>,
    pub detail: Option<String>,
    pub frame: Option<FrameState>,
}

impl StepOutcome {
    fn ok(detail: Option<String>) -> Self {
        Self { ok: true, error: None, detail, frame: None }
    }

    fn from_result<T: std::fmt::Debug>(result: Result<T>) -> Self {
        match result {
            Ok(v) => Self::ok(Some(format!("{v:?}"))),
            Err(e) => Self { ok: false, error: Some(e.user_message()), detail: None, frame: None },
        }
    }
}

// ─── Execution ──────────────────────────────────────────────────────────────

pub fn apply(app: &mut CafeApp, step: &Step) -> StepOutcome {
    let now = Timestamp::from_millis(step.at_ms);
    match &step.action {
        Action::ToggleWallet => {
            let connected = app.cafe_mut().toggle_wallet();
            StepOutcome::ok(Some(format!("connected={connected}")))
        }
        Action::SwapInput { raw } => StepOutcome::from_result(app.cafe_mut().set_swap_input(raw)),
        Action::Buy => StepOutcome::from_result(app.cafe_mut().buy_from_input()),
        Action::OpenDex => {
            app.cafe_mut().open_dex();
            StepOutcome::ok(None)
        }
        Action::StartBrew => StepOutcome::from_result(app.cafe_mut().start_brew(now)),
        Action::Refresh => {
            let accumulated = app.cafe_mut().refresh(now);
            StepOutcome::ok(Some(format!("accumulated={accumulated}")))
        }
        Action::Collect => StepOutcome::from_result(app.cafe_mut().collect_brew(now)),
        Action::StopBrew => {
            app.cafe_mut().stop_brew(now);
            StepOutcome::ok(None)
        }
        Action::StartQuest { id } => StepOutcome::from_result(app.cafe_mut().start_quest(*id)),
        Action::ClaimQuest { id } => StepOutcome::from_result(app.cafe_mut().claim_quest(*id)),
        Action::FeedEvent => {
            let message = app.feed_mut().generate(now).message.clone();
            StepOutcome::ok(Some(message))
        }
        Action::Frame { dt_ms } => {
            let frame = app.scene_mut().frame(*dt_ms);
            StepOutcome { frame: Some(frame), ..StepOutcome::ok(None) }
        }
        Action::Jitter => {
            app.jitter();
            StepOutcome::ok(None)
        }
    }
}

// ─── Built-in Visit ─────────────────────────────────────────────────────────

/// A typical visitor: poke around disconnected, sit down, swap, brew for an
/// hour with a throttled refresh timer, collect twice, run through a quest.
pub fn default_visit() -> Vec<Step> {
    use Action::*;
    let mut steps = vec![
        Step::new(0, FeedEvent),
        Step::new(500, StartBrew), // rejected: not connected
        Step::new(1_000, ToggleWallet),
        Step::new(2_000, SwapInput { raw: "0.5".into() }),
        Step::new(2_500, Buy),
        Step::new(3_000, SwapInput { raw: "10".into() }),
        Step::new(3_500, Buy), // rejected: not enough LADY
        Step::new(4_000, OpenDex),
        Step::new(5_000, StartBrew),
    ];
    // Irregular refreshes: a background tab throttles the timer.
    let mut t = 5_000;
    for gap in [1_500, 1_500, 9 * MINUTE, 1_500, 20 * MINUTE] {
        t += gap;
        steps.push(Step::new(t, Refresh));
        steps.push(Step::new(t, Frame { dt_ms: 16.7 }));
    }
    steps.extend([
        Step::new(5_000 + 30 * MINUTE, Collect),
        Step::new(5_000 + 30 * MINUTE, Collect), // rejected: empty cup
        Step::new(5_000 + 40 * MINUTE, FeedEvent),
        Step::new(5_000 + 41 * MINUTE, Jitter),
        Step::new(5_000 + 60 * MINUTE, StopBrew),
        Step::new(5_000 + 61 * MINUTE, ClaimQuest { id: 1 }), // rejected: not completed
        Step::new(5_000 + 62 * MINUTE, StartQuest { id: 1 }),
        Step::new(5_000 + 63 * MINUTE, ClaimQuest { id: 1 }),
        Step::new(5_000 + 64 * MINUTE, ClaimQuest { id: 1 }), // rejected: already claimed
        Step::new(5_000 + 90 * MINUTE, Collect),
        Step::new(5_000 + 91 * MINUTE, ToggleWallet),
    ]);
    steps
}

/// Load a custom visit from a JSON array of steps.
pub fn load_visit(path: &std::path::Path) -> std::io::Result<Vec<Step>> {
    let json = std::fs::read_to_string(path)?;
    let mut steps: Vec<Step> = serde_json::from_str(&json)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    steps.sort_by_key(|s| s.at_ms);
    Ok(steps)
}
