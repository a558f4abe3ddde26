//! Hard-coded ticket prices and the amounts derived from them.
//!
//! All amounts are whole Indonesian rupiah.

use serde::Serialize;
use utoipa::ToSchema;

/// Share of the total that must be transferred up front, in percent.
pub const MIN_DOWN_PAYMENT_PERCENT: u64 = 30;

/// Per-ticket prices for an event sold in VIP and regular tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TicketPricing {
    /// Price of one VIP ticket.
    pub vip_price: u64,
    /// Price of one regular ticket.
    pub regular_price: u64,
}

/// Prices for the ZIN gathering backed by `event_registrations`.
pub const ZIN_GATHERING_PRICING: TicketPricing = TicketPricing {
    vip_price: 350_000,
    regular_price: 200_000,
};

impl TicketPricing {
    /// Total payable: `vip × vip_price + regular × regular_price`.
    ///
    /// Saturates instead of wrapping; real ticket counts never get close.
    #[must_use]
    pub const fn total_payable(&self, vip_tickets: u32, regular_tickets: u32) -> u64 {
        (vip_tickets as u64)
            .saturating_mul(self.vip_price)
            .saturating_add((regular_tickets as u64).saturating_mul(self.regular_price))
    }
}

/// Minimum down payment for `total`, rounded down to the rupiah.
#[must_use]
pub const fn minimum_down_payment(total: u64) -> u64 {
    total.saturating_mul(MIN_DOWN_PAYMENT_PERCENT) / 100
}
