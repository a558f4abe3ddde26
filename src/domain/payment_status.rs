//! Payment status flag and the list filter built on top of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Whether an administrator has confirmed receipt of a bank transfer.
///
/// Every registration starts as [`PaymentStatus::Pending`]. Admins may
/// move it to [`PaymentStatus::Paid`] and back; the update is
/// unconditional, so concurrent admins resolve as last write wins.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Transfer proof submitted (or not), awaiting verification.
    #[default]
    Pending,
    /// An administrator marked the registration as settled ("lunas").
    Paid,
}

impl PaymentStatus {
    /// Returns the column value stored in the relational store.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(AppError::InvalidRequest(format!(
                "status pembayaran tidak dikenal: {other}"
            ))),
        }
    }
}

/// Dashboard tab selector: all registrations, or only one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Only pending registrations.
    Pending,
    /// Only paid registrations.
    Paid,
}

impl StatusFilter {
    /// Returns `true` if a registration with `status` belongs in this tab.
    #[must_use]
    pub const fn matches(&self, status: PaymentStatus) -> bool {
        matches!(
            (self, status),
            (Self::All, _)
                | (Self::Pending, PaymentStatus::Pending)
                | (Self::Paid, PaymentStatus::Paid)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn parses_column_values() {
        assert_eq!("pending".parse::<PaymentStatus>().ok(), Some(PaymentStatus::Pending));
        assert_eq!("paid".parse::<PaymentStatus>().ok(), Some(PaymentStatus::Paid));
        assert!("lunas".parse::<PaymentStatus>().is_err());
        assert!("PAID".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn as_str_round_trips_through_from_str() {
        for status in [PaymentStatus::Pending, PaymentStatus::Paid] {
            assert_eq!(status.as_str().parse::<PaymentStatus>().ok(), Some(status));
        }
    }

    #[test]
    fn filter_matches_tabs() {
        assert!(StatusFilter::All.matches(PaymentStatus::Pending));
        assert!(StatusFilter::All.matches(PaymentStatus::Paid));
        assert!(StatusFilter::Pending.matches(PaymentStatus::Pending));
        assert!(!StatusFilter::Pending.matches(PaymentStatus::Paid));
        assert!(StatusFilter::Paid.matches(PaymentStatus::Paid));
        assert!(!StatusFilter::Paid.matches(PaymentStatus::Pending));
    }
}
