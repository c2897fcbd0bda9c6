//! Call script parsing.
//!
//! One JSON object per line:
//!
//! ```text
//! {"caller": "W1", "height": 3, "op": "give-props", "receiver": "W2", "message": "hi"}
//! {"caller": "W3", "height": 4, "op": "give-multiple-props", "receiver": "W2", "amount": 5, "message": "wow"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Keys an operation does
//! not take (such as `amount` on `give-props`) are rejected.

use props_ledger::domain::BlockHeight;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// One host call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptStep {
    /// 1-based line in the script.
    #[serde(skip)]
    pub line: usize,
    /// Authenticated caller.
    pub caller: String,
    /// Height at call time.
    pub height: BlockHeight,
    /// Operation and its arguments.
    #[serde(flatten)]
    pub call: ScriptCall,
}

/// Mutation to invoke.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum ScriptCall {
    /// `give-props(receiver, message)`
    GiveProps {
        /// Receiver principal.
        receiver: String,
        /// Raw message text, validated when applied.
        message: String,
    },
    /// `give-multiple-props(receiver, amount, message)`
    GiveMultipleProps {
        /// Receiver principal.
        receiver: String,
        /// Amount to give. Scripts stay within `u64`.
        amount: u64,
        /// Raw message text, validated when applied.
        message: String,
    },
}

/// Keys every step carries.
const STEP_FIELDS: [&str; 3] = ["caller", "height", "op"];

impl ScriptCall {
    /// Wire name of the operation.
    #[must_use]
    pub const fn op(&self) -> &'static str {
        match self {
            Self::GiveProps { .. } => "give-props",
            Self::GiveMultipleProps { .. } => "give-multiple-props",
        }
    }

    /// Argument keys the operation takes.
    #[must_use]
    pub const fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::GiveProps { .. } => &["receiver", "message"],
            Self::GiveMultipleProps { .. } => &["receiver", "amount", "message"],
        }
    }
}

/// Script rejected before any call is applied.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Line is not a valid step.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Step carries a key its operation does not take.
    #[error("line {line}: `{op}` does not take `{field}`")]
    UnexpectedField {
        /// 1-based line number.
        line: usize,
        /// Operation named by the step.
        op: &'static str,
        /// Offending key.
        field: String,
    },

    /// The host clock went backwards.
    #[error("line {line}: height {height} is below previous height {previous}")]
    HeightDecreased {
        /// 1-based line number.
        line: usize,
        /// Height of the earlier step.
        previous: BlockHeight,
        /// Offending height.
        height: BlockHeight,
    },
}

/// Parse a whole script, checking that heights never decrease.
///
/// # Errors
///
/// Returns the first malformed line, unexpected key or height regression.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    let mut previous: Option<BlockHeight> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parse = |source| ScriptError::Parse { line, source };
        let value: Value = serde_json::from_str(trimmed).map_err(parse)?;
        let keys: Vec<String> = value
            .as_object()
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default();
        let mut step: ScriptStep = serde_json::from_value(value).map_err(parse)?;
        step.line = line;

        let allowed = step.call.fields();
        if let Some(field) = keys
            .into_iter()
            .find(|k| !STEP_FIELDS.contains(&k.as_str()) && !allowed.contains(&k.as_str()))
        {
            return Err(ScriptError::UnexpectedField {
                line,
                op: step.call.op(),
                field,
            });
        }

        if let Some(previous) = previous {
            if step.height < previous {
                return Err(ScriptError::HeightDecreased {
                    line,
                    previous,
                    height: step.height,
                });
            }
        }
        previous = Some(step.height);
        steps.push(step);
    }

    Ok(steps)
}
