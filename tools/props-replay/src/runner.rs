//! Applies parsed steps to an in-memory ledger.

use crate::script::{ScriptCall, ScriptStep};
use props_ledger::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Outcome of a single call, mirroring the host's response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepResult {
    /// New record id.
    Ok(PropsId),
    /// Error code.
    Err(u32),
}

/// One line of replay output.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    /// Script line the step came from.
    pub line: usize,
    /// Call result.
    pub result: StepResult,
    /// Events drained after the call.
    pub events: Vec<LedgerEvent>,
}

/// Final ledger view printed after the replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Summary {
    /// `get-total-props`.
    pub total_props: Amount,
    /// `get-current-props-id`.
    pub current_props_id: PropsId,
    /// Calls that committed.
    pub successful: u64,
    /// Calls rejected by the ledger or the message boundary.
    pub rejected: u64,
    /// `get-user-stats` for each requested principal.
    pub users: BTreeMap<String, UserStats>,
}

/// Host simulator state.
pub struct Replay {
    ledger: PropsLedgerService<InMemoryOutbox>,
    outbox: Arc<InMemoryOutbox>,
    boundary_rejections: u64,
}

impl Replay {
    /// Fresh ledger with the given configuration.
    pub fn new(config: LedgerConfig) -> Self {
        let outbox = Arc::new(InMemoryOutbox::new());
        Self {
            ledger: PropsLedgerService::new(Arc::clone(&outbox), config),
            outbox,
            boundary_rejections: 0,
        }
    }

    /// The ledger being driven.
    pub fn ledger(&self) -> &PropsLedgerService<InMemoryOutbox> {
        &self.ledger
    }

    /// Apply one step and collect its events.
    pub fn apply(&mut self, step: &ScriptStep) -> StepOutcome {
        let ctx = CallContext::new(step.caller.as_str(), step.height);
        let result = match &step.call {
            ScriptCall::GiveProps { receiver, message } => self.call(message, |ledger, message| {
                ledger.give_props(&ctx, &Principal::new(receiver.as_str()), message)
            }),
            ScriptCall::GiveMultipleProps {
                receiver,
                amount,
                message,
            } => self.call(message, |ledger, message| {
                ledger.give_multiple_props(
                    &ctx,
                    &Principal::new(receiver.as_str()),
                    Amount::from(*amount),
                    message,
                )
            }),
        };

        StepOutcome {
            line: step.line,
            result,
            events: self.outbox.drain(),
        }
    }

    fn call<F>(&mut self, raw_message: &str, op: F) -> StepResult
    where
        F: FnOnce(&mut PropsLedgerService<InMemoryOutbox>, Message) -> Result<PropsId, PropsError>,
    {
        let message = match Message::new(raw_message) {
            Ok(message) => message,
            Err(err) => {
                debug!(code = err.code(), "Message rejected at boundary: {err}");
                self.boundary_rejections += 1;
                return StepResult::Err(err.code());
            }
        };
        match op(&mut self.ledger, message) {
            Ok(id) => StepResult::Ok(id),
            Err(err) => StepResult::Err(err.code()),
        }
    }

    /// Summary over the whole run.
    pub fn summary<'a>(&self, users: impl IntoIterator<Item = &'a str>) -> Summary {
        let stats = self.ledger.stats();
        Summary {
            total_props: self.ledger.get_total_props(),
            current_props_id: self.ledger.get_current_props_id(),
            successful: stats.successful_mutations,
            rejected: stats.rejected_self_props
                + stats.rejected_invalid_amount
                + stats.rejected_overflow
                + stats.rejected_stale
                + self.boundary_rejections,
            users: users
                .into_iter()
                .map(|u| (u.to_string(), self.ledger.get_user_stats(&Principal::new(u))))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    const SCRIPT: &str = r#"
{"caller": "W1", "height": 3, "op": "give-props", "receiver": "W2", "message": "hi"}
{"caller": "W1", "height": 3, "op": "give-props", "receiver": "W1", "message": "me"}
{"caller": "W3", "height": 4, "op": "give-multiple-props", "receiver": "W2", "amount": 0, "message": "zero"}
{"caller": "W3", "height": 5, "op": "give-multiple-props", "receiver": "W2", "amount": 3, "message": "wow"}
{"caller": "W3", "height": 5, "op": "give-props", "receiver": "W2", "message": ""}
"#;

    fn run(script: &str) -> (Vec<StepOutcome>, Replay) {
        let mut replay = Replay::new(LedgerConfig::default());
        let outcomes = parse_script(script)
            .unwrap()
            .iter()
            .map(|step| replay.apply(step))
            .collect();
        (outcomes, replay)
    }

    #[test]
    fn test_results_and_codes() {
        let (outcomes, _) = run(SCRIPT);
        let results: Vec<StepResult> = outcomes.iter().map(|o| o.result).collect();
        assert_eq!(
            results,
            vec![
                StepResult::Ok(0),
                StepResult::Err(101),
                StepResult::Err(102),
                StepResult::Ok(1),
                StepResult::Err(104),
            ]
        );
    }

    #[test]
    fn test_events_attached_to_committing_step() {
        let (outcomes, _) = run(SCRIPT);
        let counts: Vec<usize> = outcomes.iter().map(|o| o.events.len()).collect();
        assert_eq!(counts, vec![1, 0, 0, 1, 0]);

        let json = serde_json::to_value(&outcomes[3]).unwrap();
        assert_eq!(json["result"]["ok"], 1);
        assert_eq!(json["events"][0]["receiver-total"], 4);
        assert_eq!(json["events"][0]["block-height"], 5);
    }

    #[test]
    fn test_summary() {
        let (_, replay) = run(SCRIPT);
        let summary = replay.summary(["W2", "W3"]);
        assert_eq!(summary.total_props, 4);
        assert_eq!(summary.current_props_id, 2);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.rejected, 3);
        assert_eq!(summary.users["W2"].props_received, 4);
        assert_eq!(summary.users["W2"].first_props_block, Some(3));
        assert_eq!(summary.users["W3"].props_given, 3);
    }

    #[test]
    fn test_too_long_message_rejected_at_boundary() {
        let step = ScriptStep {
            line: 1,
            caller: "W1".to_string(),
            height: 1,
            call: ScriptCall::GiveProps {
                receiver: "W2".to_string(),
                message: "a".repeat(501),
            },
        };
        let mut replay = Replay::new(LedgerConfig::default());
        assert_eq!(replay.apply(&step).result, StepResult::Err(103));
        assert_eq!(replay.ledger().get_current_props_id(), 0);
    }
}
