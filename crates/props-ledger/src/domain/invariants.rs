//! # Domain Invariants
//!
//! Properties that MUST hold for every reachable ledger state.
//!
//! - Gap-free ids: `next_id` equals the record count and record `i` has id `i`
//! - Conservation: total == sum of amounts == sum received == sum given
//! - History partition: each history is exactly the receiver's ids, ascending
//! - First-seen: `first_props_block` is the timestamp of the earliest record received
//! - Relation: the given-to pairs are exactly the (giver, receiver) pairs of the records

use crate::domain::state::LedgerState;
use crate::domain::value_objects::{Amount, BlockHeight, Principal, PropsId};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Ids are sequential from 0 and the counter equals the record count.
#[must_use]
pub fn check_sequential_ids_invariant(state: &LedgerState) -> bool {
    let count_matches = u64::try_from(state.record_count()).is_ok_and(|n| n == state.next_id());
    count_matches
        && state
            .records()
            .zip(0u64..)
            .all(|(record, expected)| record.id == expected)
}

/// Global and per-account totals agree with the records.
///
/// Returns the four sums on violation.
#[must_use]
pub fn check_conservation_invariant(
    state: &LedgerState,
) -> Option<(Amount, Amount, Amount, Amount)> {
    let from_records = state.records().map(|r| r.amount).sum::<Amount>();
    let received = state.accounts().map(|(_, a)| a.props_received).sum::<Amount>();
    let given = state.accounts().map(|(_, a)| a.props_given).sum::<Amount>();
    let total = state.total_props();

    if total == from_records && total == received && total == given {
        None
    } else {
        Some((total, from_records, received, given))
    }
}

/// Every account's history, first block and totals match its records.
///
/// Returns the offending accounts.
#[must_use]
pub fn check_account_invariants(state: &LedgerState) -> Vec<Principal> {
    let mut expected_history: HashMap<&Principal, Vec<PropsId>> = HashMap::new();
    let mut expected_first: HashMap<&Principal, BlockHeight> = HashMap::new();
    let mut expected_given: HashMap<&Principal, Amount> = HashMap::new();
    for record in state.records() {
        expected_history.entry(&record.receiver).or_default().push(record.id);
        expected_first.entry(&record.receiver).or_insert(record.timestamp);
        *expected_given.entry(&record.giver).or_default() += record.amount;
    }

    let mut offenders: Vec<Principal> = state
        .accounts()
        .filter(|(account, aggregate)| {
            let history = expected_history.get(account).map_or(&[][..], Vec::as_slice);
            let received = history
                .iter()
                .filter_map(|id| state.record(*id))
                .map(|r| r.amount)
                .sum::<Amount>();
            aggregate.history != history
                || aggregate.first_props_block != expected_first.get(account).copied()
                || aggregate.props_received != received
                || aggregate.props_given != expected_given.get(account).copied().unwrap_or(0)
        })
        .map(|(account, _)| account.clone())
        .collect();
    offenders.sort();
    offenders
}

/// The given-to relation holds exactly the pairs seen in records.
#[must_use]
pub fn check_relation_invariant(state: &LedgerState) -> bool {
    let from_records: BTreeSet<(&Principal, &Principal)> = state
        .records()
        .map(|r| (&r.giver, &r.receiver))
        .collect();
    let stored: BTreeSet<(&Principal, &Principal)> = state.given_pairs().collect();
    from_records == stored && state.records().all(|r| r.giver != r.receiver)
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(state: &LedgerState) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_sequential_ids_invariant(state) {
        violations.push(InvariantViolation::IdSequenceBroken {
            next_id: state.next_id(),
            records: state.record_count(),
        });
    }

    if let Some((total, records, received, given)) = check_conservation_invariant(state) {
        violations.push(InvariantViolation::TotalsNotConserved {
            total,
            records,
            received,
            given,
        });
    }

    for account in check_account_invariants(state) {
        violations.push(InvariantViolation::AccountMismatch { account });
    }

    if !check_relation_invariant(state) {
        violations.push(InvariantViolation::RelationMismatch);
    }

    InvariantCheckResult { violations }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, Default)]
pub struct InvariantCheckResult {
    /// List of violations found.
    pub violations: Vec<InvariantViolation>,
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// Counter and stored records disagree.
    #[error("id sequence broken: next_id {next_id}, {records} records")]
    IdSequenceBroken {
        /// Counter value.
        next_id: PropsId,
        /// Stored records.
        records: usize,
    },

    /// Totals disagree.
    #[error(
        "totals not conserved: total {total}, records {records}, received {received}, given {given}"
    )]
    TotalsNotConserved {
        /// Global total.
        total: Amount,
        /// Sum over records.
        records: Amount,
        /// Sum of props received.
        received: Amount,
        /// Sum of props given.
        given: Amount,
    },

    /// Aggregate for an account does not match its records.
    #[error("aggregate mismatch for {account}")]
    AccountMismatch {
        /// Offending account.
        account: Principal,
    },

    /// Given-to relation does not match the records.
    #[error("given-to relation mismatch")]
    RelationMismatch,
}

// =============================================================================
// TESTS
// =============================================================================
