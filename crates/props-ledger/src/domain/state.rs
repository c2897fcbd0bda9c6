//! # Ledger State Store
//!
//! Single owner of every persisted entity: records, counters, per-account
//! aggregates and the given-to relation.
//!
//! Writes go through a two-phase protocol. [`LedgerState::prepare`] validates
//! a call and builds a [`PropsTransition`] without touching state;
//! [`LedgerState::commit`] re-derives every total from the live state and
//! writes only once all checked arithmetic has succeeded. A rejected call
//! therefore never leaves a partial write behind. [`LedgerState::apply`] runs
//! both phases back to back.

use crate::domain::entities::{AccountAggregate, CallContext, PropsRecord};
use crate::domain::value_objects::{Amount, Message, Principal, PropsId};
use crate::errors::PropsError;
use std::collections::{HashMap, HashSet};

/// A validated mutation waiting to be committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropsTransition {
    record: PropsRecord,
    receiver_total: Amount,
}

impl PropsTransition {
    /// The record that will be stored.
    #[must_use]
    pub fn record(&self) -> &PropsRecord {
        &self.record
    }

    /// Receiver's `props-received` after the commit, as seen at prepare time.
    #[must_use]
    pub fn receiver_total(&self) -> Amount {
        self.receiver_total
    }
}

/// Counter values after one more record.
struct Totals {
    next_id: PropsId,
    total_props: Amount,
    receiver_total: Amount,
    giver_total: Amount,
}

/// All ledger state.
#[derive(Clone, Debug, Default)]
pub struct LedgerState {
    /// Records indexed by id (ids are gap-free, so the index is the id).
    records: Vec<PropsRecord>,
    next_id: PropsId,
    total_props: Amount,
    accounts: HashMap<Principal, AccountAggregate>,
    /// giver -> receivers
    given_to: HashMap<Principal, HashSet<Principal>>,
}

impl LedgerState {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // WRITE PATH
    // =========================================================================

    /// Validates a mutation and builds its transition.
    ///
    /// Preconditions are checked in order: self-award first, then amount.
    ///
    /// # Errors
    ///
    /// * [`PropsError::SelfProps`] - `receiver == ctx.caller`
    /// * [`PropsError::InvalidAmount`] - `amount == 0`
    /// * [`PropsError::ArithmeticOverflow`] - a running total would overflow
    pub fn prepare(
        &self,
        ctx: &CallContext,
        receiver: &Principal,
        amount: Amount,
        message: Message,
    ) -> Result<PropsTransition, PropsError> {
        if *receiver == ctx.caller {
            return Err(PropsError::SelfProps);
        }
        if amount == 0 {
            return Err(PropsError::InvalidAmount);
        }

        let totals = self.totals_after(&ctx.caller, receiver, amount)?;

        Ok(PropsTransition {
            record: PropsRecord {
                id: self.next_id,
                giver: ctx.caller.clone(),
                receiver: receiver.clone(),
                message,
                amount,
                timestamp: ctx.block_height,
            },
            receiver_total: totals.receiver_total,
        })
    }

    /// Applies a prepared transition and returns the stored record.
    ///
    /// # Errors
    ///
    /// * [`PropsError::StaleTransition`] - another record was committed since
    ///   the transition was prepared
    /// * [`PropsError::ArithmeticOverflow`] - a running total would overflow
    ///
    /// Nothing is written on error.
    pub fn commit(&mut self, transition: PropsTransition) -> Result<PropsRecord, PropsError> {
        let PropsTransition { record, .. } = transition;
        if record.id != self.next_id {
            return Err(PropsError::StaleTransition {
                expected: self.next_id,
                found: record.id,
            });
        }
        let totals = self.totals_after(&record.giver, &record.receiver, record.amount)?;

        self.next_id = totals.next_id;
        self.total_props = totals.total_props;

        let receiver = self.accounts.entry(record.receiver.clone()).or_default();
        receiver.props_received = totals.receiver_total;
        receiver.history.push(record.id);
        if receiver.first_props_block.is_none() {
            receiver.first_props_block = Some(record.timestamp);
        }

        self.accounts.entry(record.giver.clone()).or_default().props_given = totals.giver_total;

        self.given_to
            .entry(record.giver.clone())
            .or_default()
            .insert(record.receiver.clone());

        self.records.push(record.clone());
        Ok(record)
    }

    /// Validates and commits in one step.
    ///
    /// # Errors
    ///
    /// Same as [`prepare`](Self::prepare).
    pub fn apply(
        &mut self,
        ctx: &CallContext,
        receiver: &Principal,
        amount: Amount,
        message: Message,
    ) -> Result<PropsRecord, PropsError> {
        let transition = self.prepare(ctx, receiver, amount, message)?;
        self.commit(transition)
    }

    fn totals_after(
        &self,
        giver: &Principal,
        receiver: &Principal,
        amount: Amount,
    ) -> Result<Totals, PropsError> {
        let overflow = || PropsError::ArithmeticOverflow;
        Ok(Totals {
            next_id: self.next_id.checked_add(1).ok_or_else(overflow)?,
            total_props: self.total_props.checked_add(amount).ok_or_else(overflow)?,
            receiver_total: self
                .props_received(receiver)
                .checked_add(amount)
                .ok_or_else(overflow)?,
            giver_total: self
                .props_given(giver)
                .checked_add(amount)
                .ok_or_else(overflow)?,
        })
    }

    // =========================================================================
    // READ PATH
    // =========================================================================

    /// Id the next successful mutation will receive.
    #[must_use]
    pub fn next_id(&self) -> PropsId {
        self.next_id
    }

    /// Sum of all amounts ever awarded.
    #[must_use]
    pub fn total_props(&self) -> Amount {
        self.total_props
    }

    /// Record by id.
    #[must_use]
    pub fn record(&self, id: PropsId) -> Option<&PropsRecord> {
        usize::try_from(id).ok().and_then(|idx| self.records.get(idx))
    }

    /// All records in creation order.
    pub fn records(&self) -> impl Iterator<Item = &PropsRecord> {
        self.records.iter()
    }

    /// Aggregate for an account, if it was ever touched.
    #[must_use]
    pub fn account(&self, account: &Principal) -> Option<&AccountAggregate> {
        self.accounts.get(account)
    }

    /// All touched accounts.
    pub fn accounts(&self) -> impl Iterator<Item = (&Principal, &AccountAggregate)> {
        self.accounts.iter()
    }

    /// Total received by an account (0 if unknown).
    #[must_use]
    pub fn props_received(&self, account: &Principal) -> Amount {
        self.accounts.get(account).map_or(0, |a| a.props_received)
    }

    /// Total given by an account (0 if unknown).
    #[must_use]
    pub fn props_given(&self, account: &Principal) -> Amount {
        self.accounts.get(account).map_or(0, |a| a.props_given)
    }

    /// Whether `giver` ever sent a record to `receiver`.
    #[must_use]
    pub fn has_given_to(&self, giver: &Principal, receiver: &Principal) -> bool {
        self.given_to
            .get(giver)
            .is_some_and(|receivers| receivers.contains(receiver))
    }

    /// Every (giver, receiver) pair in the relation, in no particular order.
    pub fn given_pairs(&self) -> impl Iterator<Item = (&Principal, &Principal)> {
        self.given_to
            .iter()
            .flat_map(|(giver, receivers)| receivers.iter().map(move |r| (giver, r)))
    }

    /// Number of stored records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
