//! # Props Ledger Service
//!
//! Owns the state store and the outbound event sink, and implements the
//! inbound ports.
//!
//! ## Mutation Flow
//!
//! 1. `LedgerState::apply` validates (self-award, then amount), computes every
//!    new value with checked arithmetic and then commits; a failure returns
//!    here with no write
//! 2. The receiver's new total is read back for the event
//! 3. A `props-given` event is published to the sink
//! 4. Optionally, all invariants are re-checked

use crate::domain::entities::{CallContext, PropsDetails, UserStats};
use crate::domain::invariants::check_all_invariants;
use crate::domain::state::LedgerState;
use crate::domain::value_objects::{Amount, BlockHeight, Message, Principal, PropsId};
use crate::errors::PropsError;
use crate::events::{LedgerEvent, PropsGivenEvent};
use crate::ports::inbound::{PropsLedgerApi, PropsQueryApi};
use crate::ports::outbound::EventSink;

use std::env;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Ledger service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Re-check every invariant after each commit. Scans the whole ledger.
    pub verify_invariants: bool,
    /// Log each committed record at `info`.
    pub log_events: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            verify_invariants: false,
            log_events: true,
        }
    }
}

impl LedgerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PROPS_VERIFY_INVARIANTS`: `true`/`false` (default: false)
    /// - `PROPS_LOG_EVENTS`: `true`/`false` (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            verify_invariants: env_flag("PROPS_VERIFY_INVARIANTS")
                .unwrap_or(defaults.verify_invariants),
            log_events: env_flag("PROPS_LOG_EVENTS").unwrap_or(defaults.log_events),
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key).ok().and_then(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Statistics for the ledger service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStats {
    /// Committed mutations.
    pub successful_mutations: u64,
    /// Calls rejected with `ERR_SELF_PROPS`.
    pub rejected_self_props: u64,
    /// Calls rejected with `ERR_INVALID_AMOUNT`.
    pub rejected_invalid_amount: u64,
    /// Calls rejected because a total would overflow.
    pub rejected_overflow: u64,
    /// Commits refused because the transition was stale.
    pub rejected_stale: u64,
}

impl ServiceStats {
    fn record_rejection(&mut self, err: PropsError) {
        match err {
            PropsError::SelfProps => self.rejected_self_props += 1,
            PropsError::InvalidAmount => self.rejected_invalid_amount += 1,
            PropsError::ArithmeticOverflow => self.rejected_overflow += 1,
            PropsError::StaleTransition { .. } => self.rejected_stale += 1,
        }
    }
}

/// The props ledger.
pub struct PropsLedgerService<E: EventSink> {
    config: LedgerConfig,
    state: LedgerState,
    events: Arc<E>,
    stats: ServiceStats,
}

impl<E: EventSink> PropsLedgerService<E> {
    /// Create an empty ledger publishing to `events`.
    pub fn new(events: Arc<E>, config: LedgerConfig) -> Self {
        Self {
            config,
            state: LedgerState::new(),
            events,
            stats: ServiceStats::default(),
        }
    }

    /// Read-only view of the state store.
    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Current service statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The event sink this ledger publishes to.
    #[must_use]
    pub fn events(&self) -> &Arc<E> {
        &self.events
    }

    fn verify(&self) {
        let result = check_all_invariants(&self.state);
        for violation in &result.violations {
            error!(%violation, "Ledger invariant violated");
        }
    }
}

impl<E: EventSink> PropsLedgerApi for PropsLedgerService<E> {
    #[instrument(skip(self, message), fields(caller = %ctx.caller, height = ctx.block_height))]
    fn give_multiple_props(
        &mut self,
        ctx: &CallContext,
        receiver: &Principal,
        amount: Amount,
        message: Message,
    ) -> Result<PropsId, PropsError> {
        let record = match self.state.apply(ctx, receiver, amount, message) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    code = err.code(),
                    receiver = %receiver,
                    amount = %amount,
                    "Props rejected: {err}"
                );
                self.stats.record_rejection(err);
                return Err(err);
            }
        };

        let receiver_total = self.state.props_received(&record.receiver);
        self.stats.successful_mutations += 1;

        if self.config.log_events {
            info!(
                props_id = record.id,
                receiver = %record.receiver,
                amount = %record.amount,
                receiver_total = %receiver_total,
                "Props given"
            );
        }

        self.events.publish(&LedgerEvent::PropsGiven(PropsGivenEvent::from_record(
            &record,
            receiver_total,
        )));

        if self.config.verify_invariants {
            self.verify();
        }

        Ok(record.id)
    }
}

impl<E: EventSink> PropsQueryApi for PropsLedgerService<E> {
    fn get_props_received(&self, account: &Principal) -> Amount {
        self.state.props_received(account)
    }

    fn get_props_given(&self, account: &Principal) -> Amount {
        self.state.props_given(account)
    }

    fn has_given_props_to(&self, giver: &Principal, receiver: &Principal) -> bool {
        self.state.has_given_to(giver, receiver)
    }

    fn get_first_props_block(&self, account: &Principal) -> Option<BlockHeight> {
        self.state.account(account).and_then(|a| a.first_props_block)
    }

    fn get_user_history(&self, account: &Principal) -> Vec<PropsId> {
        self.state
            .account(account)
            .map(|a| a.history.clone())
            .unwrap_or_default()
    }

    fn get_props_by_id(&self, id: PropsId) -> Option<PropsDetails> {
        let details = self.state.record(id).map(|r| r.details());
        if details.is_none() {
            debug!(props_id = id, "Props id not found");
        }
        details
    }

    fn get_user_stats(&self, account: &Principal) -> UserStats {
        self.state
            .account(account)
            .map(|a| a.stats())
            .unwrap_or_default()
    }

    fn get_current_props_id(&self) -> PropsId {
        self.state.next_id()
    }

    fn get_total_props(&self) -> Amount {
        self.state.total_props()
    }
}

// =============================================================================
// TESTS
// =============================================================================
