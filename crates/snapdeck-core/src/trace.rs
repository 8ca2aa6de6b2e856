//! Offline replay of recorded wheel traces
//!
//! A trace is a JSON document listing wheel deltas with millisecond offsets. Replay
//! feeds them through the wheel adapter and a headless controller, reporting what
//! the core decided for each event. Useful for tuning the classifier constants
//! against real trackpad recordings.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::gesture::GestureKind;
use crate::input::{Axis, WheelAdapter, WheelDecision, WheelEvent};
use crate::navigation::{NavigationController, NullHost, StepOutcome};
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelTrace {
    #[serde(default)]
    pub axis: Axis,
    /// Number of sections in the deck
    pub total: usize,
    /// Delay after which the headless host reports the target visible; `None` never confirms
    #[serde(default = "default_settle")]
    pub settle_ms: Option<u64>,
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Offset from the start of the recording
    pub t_ms: u64,
    #[serde(default)]
    pub delta_x: f64,
    #[serde(default)]
    pub delta_y: f64,
    #[serde(default)]
    pub shift: bool,
}

fn default_settle() -> Option<u64> {
    Some(300)
}

impl WheelTrace {
    pub fn from_json(json: &str) -> Result<Self> {
        let trace: Self = serde_json::from_str(json)?;
        trace.validate()?;
        Ok(trace)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.total == 0 {
            return Err(Error::Trace("total must be at least 1".into()));
        }
        if let Some(pair) = self.events.windows(2).find(|pair| pair[1].t_ms < pair[0].t_ms) {
            return Err(Error::Trace(format!(
                "events out of order: {}ms after {}ms",
                pair[1].t_ms, pair[0].t_ms
            )));
        }
        Ok(())
    }
}

/// Decision for one replayed event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayLine {
    pub t_ms: u64,
    pub decision: WheelDecision,
    /// Active index after the event
    pub index: usize,
}

impl ReplayLine {
    pub fn is_accepted(&self) -> bool {
        matches!(
            self.decision,
            WheelDecision::Step { outcome, .. } if outcome.is_accepted()
        )
    }
}

impl fmt::Display for ReplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, verdict) = match self.decision {
            WheelDecision::Noise => ("-", "noise".to_string()),
            WheelDecision::Step { kind, outcome } => {
                let kind = match kind {
                    GestureKind::Intentional => "intentional",
                    GestureKind::Momentum => "momentum",
                };
                let verdict = match outcome {
                    StepOutcome::Accepted { from, to } => format!("accepted {} -> {}", from, to),
                    StepOutcome::Busy => "busy".to_string(),
                    StepOutcome::Throttled { remaining } => {
                        format!("throttled ({}ms left)", remaining.as_millis())
                    }
                    StepOutcome::OutOfRange => "out-of-range".to_string(),
                    StepOutcome::NoDirection => "no-direction".to_string(),
                };
                (kind, verdict)
            }
        };
        write!(
            f,
            "{:>7}ms  {:<11}  {:<26}  index={}",
            self.t_ms, kind, verdict, self.index
        )
    }
}

/// Replay `trace` against a fresh controller configured from `config`
pub fn replay(trace: &WheelTrace, config: &AppConfig) -> Vec<ReplayLine> {
    let base = Instant::now();
    let at = |ms: u64| base + Duration::from_millis(ms);

    let mut controller = NavigationController::new(NullHost, trace.axis, trace.total, config);
    let mut wheel = WheelAdapter::new(&config.gesture);
    let mut arrival: Option<u64> = None;
    let mut lines = Vec::with_capacity(trace.events.len());

    for event in &trace.events {
        let now = at(event.t_ms);

        if matches!(arrival, Some(due) if due <= event.t_ms) {
            controller.confirm_arrived();
            arrival = None;
        }
        controller.expire_transition(now);
        controller.watchdog_tick(now);

        let outcome = wheel.handle(
            WheelEvent {
                delta_x: event.delta_x,
                delta_y: event.delta_y,
                horizontal_intent: event.shift,
                timestamp: now,
            },
            &mut controller,
        );

        let line = ReplayLine {
            t_ms: event.t_ms,
            decision: outcome.decision,
            index: controller.current_index(),
        };
        if line.is_accepted() {
            arrival = trace.settle_ms.map(|settle| event.t_ms + settle);
        }
        lines.push(line);
    }

    lines
}
