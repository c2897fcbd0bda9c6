//! # Ledger Scenario Tests
//!
//! End-to-end flows through the public API: giving props, tracking
//! aggregates, history, stats and the emitted events.
//!
//! ## Test Categories
//!
//! 1. **Give Props** - single awards, id sequencing, self-award rejection
//! 2. **Give Multiple Props** - amounts, zero-amount rejection, receiver totals
//! 3. **Tracking** - received/given/total, relation, first block
//! 4. **History & Stats** - per-user history, record lookup, stats
//! 5. **Integration** - multi-user flows, volume, height progression

use props_ledger::prelude::*;
use std::sync::Arc;

// =============================================================================
// TEST HELPERS
// =============================================================================

const W1: &str = "ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5";
const W2: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";
const W3: &str = "ST2JHG361ZXG51QTKY2NQCVBPPRRE2KZB1HR05NNC";

struct Harness {
    ledger: PropsLedgerService<InMemoryOutbox>,
    outbox: Arc<InMemoryOutbox>,
    height: BlockHeight,
}

impl Harness {
    fn new() -> Self {
        let outbox = Arc::new(InMemoryOutbox::new());
        let config = LedgerConfig {
            verify_invariants: true,
            log_events: false,
        };
        Self {
            ledger: PropsLedgerService::new(Arc::clone(&outbox), config),
            outbox,
            height: 3,
        }
    }

    fn ctx(&self, caller: &str) -> CallContext {
        CallContext::new(caller, self.height)
    }

    fn give(&mut self, from: &str, to: &str, message: &str) -> Result<PropsId, PropsError> {
        let ctx = self.ctx(from);
        self.ledger.give_props(&ctx, &p(to), Message::new(message).unwrap())
    }

    fn give_many(
        &mut self,
        from: &str,
        to: &str,
        amount: Amount,
        message: &str,
    ) -> Result<PropsId, PropsError> {
        let ctx = self.ctx(from);
        let message = Message::new(message).unwrap();
        self.ledger.give_multiple_props(&ctx, &p(to), amount, message)
    }

    fn mine_empty_blocks(&mut self, n: u64) {
        self.height += n;
    }

    fn single_event(&self) -> PropsGivenEvent {
        let mut events = self.outbox.drain();
        assert_eq!(events.len(), 1, "expected exactly one event");
        match events.remove(0) {
            LedgerEvent::PropsGiven(event) => event,
        }
    }
}

fn p(id: &str) -> Principal {
    Principal::new(id)
}

// =============================================================================
// GIVE PROPS
// =============================================================================

#[test]
fn allows_giving_a_single_prop_to_another_user() {
    let mut h = Harness::new();
    assert_eq!(h.give(W1, W2, "Great work on the project!"), Ok(0));
}

#[test]
fn emits_event_when_giving_props() {
    let mut h = Harness::new();
    let height = h.height;
    assert_eq!(h.give(W1, W2, "Amazing contribution!"), Ok(0));

    let event = h.single_event();
    assert_eq!(
        event,
        PropsGivenEvent {
            props_id: 0,
            giver: p(W1),
            receiver: p(W2),
            amount: 1,
            message: Message::new("Amazing contribution!").unwrap(),
            block_height: height,
            receiver_total: 1,
        }
    );
}

#[test]
fn prevents_giving_props_to_yourself() {
    let mut h = Harness::new();
    let err = h.give(W1, W1, "I'm awesome!").unwrap_err();
    assert_eq!(err.code(), 101);
    assert!(h.outbox.is_empty());
}

#[test]
fn allows_messages_exactly_at_max_length() {
    let mut h = Harness::new();
    assert_eq!(h.give(W1, W2, &"a".repeat(500)), Ok(0));
}

#[test]
fn increments_props_id_for_each_transaction() {
    let mut h = Harness::new();
    assert_eq!(h.give(W1, W2, "Good job!"), Ok(0));
    assert_eq!(h.give(W1, W3, "Good job!"), Ok(1));
    assert_eq!(h.give(W3, W2, "Good job!"), Ok(2));
}

#[test]
fn allows_multiple_users_to_give_props_to_same_recipient() {
    let mut h = Harness::new();
    assert_eq!(h.give(W1, W3, "Excellent!"), Ok(0));
    assert_eq!(h.give(W2, W3, "Excellent!"), Ok(1));
    assert_eq!(h.ledger.get_props_received(&p(W3)), 2);
}

// =============================================================================
// GIVE MULTIPLE PROPS
// =============================================================================

#[test]
fn emits_event_when_giving_multiple_props() {
    let mut h = Harness::new();
    assert_eq!(h.give_many(W1, W2, 10, "Amazing contributions!"), Ok(0));

    let event = h.single_event();
    assert_eq!(event.amount, 10);
    assert_eq!(event.receiver_total, 10);
    assert_eq!(event.message.as_str(), "Amazing contributions!");
}

#[test]
fn prevents_giving_zero_props() {
    let mut h = Harness::new();
    let before = h.ledger.get_current_props_id();

    let err = h.give_many(W1, W2, 0, "No props for you!").unwrap_err();

    assert_eq!(err.code(), 102);
    assert_eq!(h.ledger.get_current_props_id(), before);
    assert_eq!(h.ledger.get_total_props(), 0);
    assert!(h.ledger.get_user_history(&p(W2)).is_empty());
    assert!(!h.ledger.has_given_props_to(&p(W1), &p(W2)));
}

#[test]
fn self_award_is_checked_before_amount() {
    let mut h = Harness::new();
    assert_eq!(
        h.give_many(W1, W1, 0, "zero to myself"),
        Err(PropsError::SelfProps)
    );
    assert_eq!(
        h.give_many(W1, W1, 10, "I deserve 10 props!"),
        Err(PropsError::SelfProps)
    );
}

#[test]
fn accumulates_multiple_props_in_receiver_total() {
    let mut h = Harness::new();
    h.give_many(W1, W2, 5, "Great!").unwrap();
    h.outbox.drain();
    assert_eq!(h.give_many(W3, W2, 3, "Great!"), Ok(1));

    let event = h.single_event();
    assert_eq!(event.props_id, 1);
    assert_eq!(event.giver, p(W3));
    assert_eq!(event.receiver, p(W2));
    assert_eq!(event.amount, 3);
    assert_eq!(event.receiver_total, 8);

    // The first record is untouched by the second call
    let first = h.ledger.get_props_by_id(0).unwrap();
    assert_eq!(first.giver, p(W1));
    assert_eq!(first.amount, 5);
}

// =============================================================================
// TRACKING
// =============================================================================

#[test]
fn tracks_props_given_across_both_operations() {
    let mut h = Harness::new();
    h.give(W1, W2, "Nice!").unwrap();
    h.give(W1, W3, "Nice!").unwrap();
    h.give_many(W1, W2, 5, "Nice!").unwrap();

    assert_eq!(h.ledger.get_props_given(&p(W1)), 7);
    assert_eq!(h.ledger.get_props_received(&p(W2)), 6);
}

#[test]
fn tracks_total_props_across_entire_system() {
    let mut h = Harness::new();
    h.give(W1, W2, "Great!").unwrap();
    h.give_many(W2, W3, 10, "Great!").unwrap();
    h.give(W3, W1, "Great!").unwrap();

    assert_eq!(h.ledger.get_total_props(), 12);
    assert_eq!(h.ledger.get_current_props_id(), 3);
}

#[test]
fn tracks_has_given_props_to_relationship() {
    let mut h = Harness::new();
    h.give(W1, W2, "Thanks!").unwrap();

    assert!(h.ledger.has_given_props_to(&p(W1), &p(W2)));
    assert!(!h.ledger.has_given_props_to(&p(W2), &p(W1)));

    // Repeat awards keep the pair without duplicating anything
    h.give(W1, W2, "Thanks again!").unwrap();
    assert!(h.ledger.has_given_props_to(&p(W1), &p(W2)));
}

#[test]
fn maintains_first_props_block_on_subsequent_props() {
    let mut h = Harness::new();
    let first = h.height;
    h.give(W1, W2, "First!").unwrap();
    assert_eq!(h.ledger.get_first_props_block(&p(W2)), Some(first));

    h.mine_empty_blocks(5);
    h.give(W3, W2, "Second!").unwrap();
    assert_eq!(h.ledger.get_first_props_block(&p(W2)), Some(first));

    // Givers never get a first block from giving
    assert_eq!(h.ledger.get_first_props_block(&p(W1)), None);
}

// =============================================================================
// HISTORY & STATS
// =============================================================================

#[test]
fn stores_props_in_user_history() {
    let mut h = Harness::new();
    h.give(W1, W2, "One").unwrap();
    h.give(W3, W2, "Two").unwrap();
    assert_eq!(h.ledger.get_user_history(&p(W2)), vec![0, 1]);
}

#[test]
fn retrieves_props_details_by_id() {
    let mut h = Harness::new();
    let height = h.height;
    h.give_many(W1, W2, 5, "Amazing contribution!").unwrap();

    assert_eq!(
        h.ledger.get_props_by_id(0),
        Some(PropsDetails {
            giver: p(W1),
            receiver: p(W2),
            message: Message::new("Amazing contribution!").unwrap(),
            timestamp: height,
            amount: 5,
        })
    );
    assert_eq!(h.ledger.get_props_by_id(999), None);
}

#[test]
fn maintains_separate_histories_for_different_users() {
    let mut h = Harness::new();
    h.give(W1, W2, "Props!").unwrap();
    h.give(W1, W3, "Props!").unwrap();
    h.give(W3, W2, "Props!").unwrap();

    assert_eq!(h.ledger.get_user_history(&p(W2)), vec![0, 2]);
    assert_eq!(h.ledger.get_user_history(&p(W3)), vec![1]);
    assert!(h.ledger.get_user_history(&p(W1)).is_empty());
}

#[test]
fn returns_comprehensive_user_stats() {
    let mut h = Harness::new();
    let height = h.height;
    h.give(W1, W2, "Good job!").unwrap();
    h.give(W2, W3, "Good job!").unwrap();

    assert_eq!(
        h.ledger.get_user_stats(&p(W2)),
        UserStats {
            props_received: 1,
            props_given: 1,
            first_props_block: Some(height),
        }
    );
    assert_eq!(h.ledger.get_user_stats(&p("fresh")), UserStats::default());
}

#[test]
fn user_rank_mirrors_props_received() {
    let mut h = Harness::new();
    h.give_many(W1, W2, 4, "Props!").unwrap();
    h.give(W3, W2, "Props!").unwrap();
    assert_eq!(h.ledger.get_user_rank(&p(W2)), 5);
    assert_eq!(h.ledger.get_user_rank(&p(W1)), 0);
}

// =============================================================================
// INTEGRATION
// =============================================================================

#[test]
fn handles_complete_flow_for_multiple_users() {
    let mut h = Harness::new();
    h.give(W1, W2, "Great collaboration!").unwrap();
    h.give_many(W2, W3, 3, "Excellent code review!").unwrap();
    h.give(W3, W1, "Thanks for the help!").unwrap();
    h.give_many(W1, W3, 2, "Amazing presentation!").unwrap();

    let stats = |who: &str| h.ledger.get_user_stats(&p(who));
    assert_eq!((stats(W1).props_received, stats(W1).props_given), (1, 3));
    assert_eq!((stats(W2).props_received, stats(W2).props_given), (1, 3));
    assert_eq!((stats(W3).props_received, stats(W3).props_given), (5, 1));
    assert_eq!(h.ledger.get_total_props(), 7);
    assert!(check_all_invariants(h.ledger.state()).is_ok());
}

#[test]
fn handles_emoji_and_special_characters() {
    let mut h = Harness::new();
    assert_eq!(h.give(W1, W2, "Amazing work! 🚀🎉 Keep it up! 💪"), Ok(0));
    let record = h.ledger.get_props_by_id(0).unwrap();
    assert_eq!(record.message.as_str(), "Amazing work! 🚀🎉 Keep it up! 💪");
}

#[test]
fn handles_high_volume_of_props() {
    let mut h = Harness::new();
    for i in 0..20 {
        h.give(W1, W2, &format!("Props! #{i}")).unwrap();
    }

    assert_eq!(h.ledger.get_props_received(&p(W2)), 20);
    assert_eq!(h.ledger.get_props_given(&p(W1)), 20);
    assert_eq!(
        h.ledger.get_user_history(&p(W2)),
        (0..20).collect::<Vec<PropsId>>()
    );
    assert_eq!(h.outbox.drain().len(), 20);
}

#[test]
fn tracks_props_across_block_heights() {
    let mut h = Harness::new();
    let start = h.height;
    h.give(W1, W2, "Props!").unwrap();
    h.mine_empty_blocks(10);
    h.give(W1, W2, "Props!").unwrap();

    assert_eq!(h.ledger.get_props_by_id(0).unwrap().timestamp, start);
    assert_eq!(h.ledger.get_props_by_id(1).unwrap().timestamp, start + 10);
    assert_eq!(h.ledger.get_first_props_block(&p(W2)), Some(start));
}

#[test]
fn rejected_calls_are_invisible() {
    let mut h = Harness::new();
    h.give(W1, W2, "ok").unwrap();
    let before = h.ledger.state().clone();

    h.give(W2, W2, "self").unwrap_err();
    h.give_many(W3, W1, 0, "zero").unwrap_err();

    let after = h.ledger.state();
    assert_eq!(after.next_id(), before.next_id());
    assert_eq!(after.total_props(), before.total_props());
    assert_eq!(after.record_count(), before.record_count());
    let expected = UserStats {
        props_received: 0,
        props_given: 1,
        first_props_block: None,
    };
    assert_eq!(h.ledger.get_user_stats(&p(W1)), expected);
    assert!(h.ledger.state().account(&p(W3)).is_none());

    let stats = h.ledger.stats();
    assert_eq!(stats.successful_mutations, 1);
    assert_eq!(stats.rejected_self_props, 1);
    assert_eq!(stats.rejected_invalid_amount, 1);
}
