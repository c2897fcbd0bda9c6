//! # Driving Ports (API - Inbound)
//!
//! The call surface hosts invoke. Mutations take exclusive access; queries
//! only read and never fail.

use crate::domain::entities::{CallContext, PropsDetails, UserStats};
use crate::domain::value_objects::{Amount, BlockHeight, Message, Principal, PropsId};
use crate::errors::PropsError;

/// Mutation operations.
pub trait PropsLedgerApi {
    /// Give one prop to `receiver`.
    ///
    /// Equivalent to `give_multiple_props(ctx, receiver, 1, message)`.
    ///
    /// # Errors
    ///
    /// * [`PropsError::SelfProps`] - `receiver` is the caller
    fn give_props(
        &mut self,
        ctx: &CallContext,
        receiver: &Principal,
        message: Message,
    ) -> Result<PropsId, PropsError> {
        self.give_multiple_props(ctx, receiver, 1, message)
    }

    /// Give `amount` props to `receiver` in a single record.
    ///
    /// # Returns
    ///
    /// * `Ok(id)` - id of the new record
    ///
    /// # Errors
    ///
    /// * [`PropsError::SelfProps`] - `receiver` is the caller (checked first)
    /// * [`PropsError::InvalidAmount`] - `amount` is zero
    /// * [`PropsError::ArithmeticOverflow`] - a running total would overflow
    fn give_multiple_props(
        &mut self,
        ctx: &CallContext,
        receiver: &Principal,
        amount: Amount,
        message: Message,
    ) -> Result<PropsId, PropsError>;
}

/// Read-only accessors. Unknown accounts and ids yield defaults.
pub trait PropsQueryApi {
    /// Total amount received (0 if unknown).
    fn get_props_received(&self, account: &Principal) -> Amount;

    /// Total amount given (0 if unknown).
    fn get_props_given(&self, account: &Principal) -> Amount;

    /// Whether `giver` ever gave props to `receiver`.
    fn has_given_props_to(&self, giver: &Principal, receiver: &Principal) -> bool;

    /// Height of the first props received, if any.
    fn get_first_props_block(&self, account: &Principal) -> Option<BlockHeight>;

    /// Ids received, in creation order (empty if unknown).
    fn get_user_history(&self, account: &Principal) -> Vec<PropsId>;

    /// Record snapshot by id.
    fn get_props_by_id(&self, id: PropsId) -> Option<PropsDetails>;

    /// Received, given and first block in one call.
    fn get_user_stats(&self, account: &Principal) -> UserStats;

    /// Id the next successful mutation will receive.
    fn get_current_props_id(&self) -> PropsId;

    /// Sum of all amounts ever awarded.
    fn get_total_props(&self) -> Amount;

    /// Same value as [`get_props_received`](Self::get_props_received).
    ///
    /// Not a competitive rank: no cross-account ordering is computed.
    fn get_user_rank(&self, account: &Principal) -> Amount {
        self.get_props_received(account)
    }
}
