//! Power Duo Zumba Bali ticket tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Event name stored on every `zumba_registrations` row.
pub const ZUMBA_EVENT_NAME: &str = "Power Duo Zumba Bali";

/// Ticket tier for the zumba event. Each tier has a fixed unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ZumbaTier {
    /// Platinum VVIP.
    Platinum,
    /// Gold VIP.
    Gold,
    /// Blue Cat BEC.
    Blue,
    /// Green Cat.
    Green,
}

impl ZumbaTier {
    /// Every tier, most expensive first.
    pub const ALL: [Self; 4] = [Self::Platinum, Self::Gold, Self::Blue, Self::Green];

    /// Stable identifier used in forms (`platinum`, `gold`, ...).
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Platinum => "platinum",
            Self::Gold => "gold",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }

    /// Display name stored in the `ticket_category` column.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Platinum => "Platinum VVIP",
            Self::Gold => "Gold VIP",
            Self::Blue => "Blue Cat BEC",
            Self::Green => "Green Cat",
        }
    }

    /// Unit price in rupiah.
    #[must_use]
    pub const fn price(&self) -> u64 {
        match self {
            Self::Platinum => 1_200_000,
            Self::Gold => 500_000,
            Self::Blue => 300_000,
            Self::Green => 185_000,
        }
    }

    /// What the ticket includes.
    #[must_use]
    pub const fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Platinum => &[
                "Front Row Seat",
                "Exclusive Merchandise",
                "Meet & Greet",
                "Photo Session",
                "VIP Lounge Access",
                "Premium Goodie Bag",
            ],
            Self::Gold => &[
                "VIP Seat",
                "Official Merchandise",
                "VIP Lounge Access",
                "Goodie Bag",
                "Priority Entry",
            ],
            Self::Blue => &["Regular Seat", "Event T-Shirt", "Snack & Drink", "Certificate"],
            Self::Green => &["Standing Area", "Event T-Shirt", "Mineral Water"],
        }
    }

    /// Total cost of `ticket_count` tickets in this tier.
    #[must_use]
    pub const fn total_cost(&self, ticket_count: u32) -> u64 {
        (ticket_count as u64).saturating_mul(self.price())
    }

    /// Resolves a stored `ticket_category` display name back to a tier.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.display_name() == name)
    }
}

impl fmt::Display for ZumbaTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ZumbaTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| AppError::InvalidRequest(format!("kategori tiket tidak dikenal: {s}")))
    }
}
