//! # Shared Ledger Handle
//!
//! Cloneable handle for hosts that reach the ledger from several threads.
//! Mutations hold the write lock for the whole prepare/commit/publish
//! sequence, so a reader never sees a half-applied award.

use crate::domain::entities::{CallContext, PropsDetails, UserStats};
use crate::domain::value_objects::{Amount, BlockHeight, Message, Principal, PropsId};
use crate::errors::PropsError;
use crate::ports::inbound::{PropsLedgerApi, PropsQueryApi};
use crate::ports::outbound::EventSink;
use crate::service::PropsLedgerService;
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe handle to a single ledger.
pub struct SharedPropsLedger<E: EventSink> {
    inner: Arc<RwLock<PropsLedgerService<E>>>,
}

impl<E: EventSink> Clone for SharedPropsLedger<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: EventSink> SharedPropsLedger<E> {
    /// Wrap a ledger.
    pub fn new(ledger: PropsLedgerService<E>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Run several reads against one consistent view.
    pub fn read<R>(&self, f: impl FnOnce(&PropsLedgerService<E>) -> R) -> R {
        f(&*self.inner.read())
    }
}

impl<E: EventSink> PropsLedgerApi for SharedPropsLedger<E> {
    fn give_multiple_props(
        &mut self,
        ctx: &CallContext,
        receiver: &Principal,
        amount: Amount,
        message: Message,
    ) -> Result<PropsId, PropsError> {
        self.inner
            .write()
            .give_multiple_props(ctx, receiver, amount, message)
    }
}

impl<E: EventSink> PropsQueryApi for SharedPropsLedger<E> {
    fn get_props_received(&self, account: &Principal) -> Amount {
        self.inner.read().get_props_received(account)
    }

    fn get_props_given(&self, account: &Principal) -> Amount {
        self.inner.read().get_props_given(account)
    }

    fn has_given_props_to(&self, giver: &Principal, receiver: &Principal) -> bool {
        self.inner.read().has_given_props_to(giver, receiver)
    }

    fn get_first_props_block(&self, account: &Principal) -> Option<BlockHeight> {
        self.inner.read().get_first_props_block(account)
    }

    fn get_user_history(&self, account: &Principal) -> Vec<PropsId> {
        self.inner.read().get_user_history(account)
    }

    fn get_props_by_id(&self, id: PropsId) -> Option<PropsDetails> {
        self.inner.read().get_props_by_id(id)
    }

    fn get_user_stats(&self, account: &Principal) -> UserStats {
        self.inner.read().get_user_stats(account)
    }

    fn get_current_props_id(&self) -> PropsId {
        self.inner.read().get_current_props_id()
    }

    fn get_total_props(&self) -> Amount {
        self.inner.read().get_total_props()
    }
}
