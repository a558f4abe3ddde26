//! Dashboard statistics over a set of registrations.

use serde::Serialize;
use utoipa::ToSchema;

use super::pricing::TicketPricing;
use super::{PaymentStatus, Registration};

/// Which rows count toward revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueBasis {
    /// Every visible row, settled or not (user dashboard).
    AllRows,
    /// Only rows marked paid (admin dashboard).
    PaidOnly,
}

/// Aggregate figures shown above the registration list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Number of registrations.
    pub total_registrations: u64,
    /// Sum of VIP tickets.
    pub total_vip_tickets: u64,
    /// Sum of regular tickets.
    pub total_regular_tickets: u64,
    /// VIP plus regular.
    pub total_tickets: u64,
    /// Registrations still awaiting verification.
    pub pending: u64,
    /// Registrations marked paid.
    pub paid: u64,
    /// Revenue in rupiah according to the chosen [`RevenueBasis`].
    pub revenue: u64,
}

impl DashboardStats {
    /// Folds `registrations` into dashboard figures.
    #[must_use]
    pub fn compute(
        registrations: &[Registration],
        pricing: &TicketPricing,
        basis: RevenueBasis,
    ) -> Self {
        registrations.iter().fold(Self::default(), |mut acc, reg| {
            acc.total_registrations += 1;
            acc.total_vip_tickets += u64::from(reg.vip_tickets);
            acc.total_regular_tickets += u64::from(reg.regular_tickets);
            acc.total_tickets += reg.total_tickets();
            match reg.payment_status {
                PaymentStatus::Pending => acc.pending += 1,
                PaymentStatus::Paid => acc.paid += 1,
            }
            let counts = match basis {
                RevenueBasis::AllRows => true,
                RevenueBasis::PaidOnly => reg.payment_status == PaymentStatus::Paid,
            };
            if counts {
                acc.revenue = acc.revenue.saturating_add(reg.total_payable(pricing));
            }
            acc
        })
    }
}
