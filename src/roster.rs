//! Billionaire roster shared by the game and the net-worth API
//!
//! Only the net-worth magnitude is stored; the price to eat is derived at
//! every point of use so the two can never drift apart.

use serde::{Deserialize, Serialize};

/// A catchable public figure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Billionaire {
    /// Display name
    pub name: String,
    /// Net worth in dollars
    pub net_worth: u64,
    /// Sprite path served alongside the game
    pub image: String,
}

impl Billionaire {
    pub fn new(name: &str, net_worth: u64, image: &str) -> Self {
        Self {
            name: name.to_owned(),
            net_worth,
            image: image.to_owned(),
        }
    }

    /// Score value for eating this billionaire
    pub fn price_to_eat(&self) -> u32 {
        price_to_eat(self.net_worth)
    }
}

/// Square-root scaling: a 4x richer target is only 2x more expensive to eat
pub fn price_to_eat(net_worth: u64) -> u32 {
    let billions = net_worth as f64 / 1_000_000_000.0;
    (billions.sqrt() * 100.0).round() as u32
}

/// Wire format for `/api/billionaires`
///
/// `price_to_eat` is computed from `net_worth` when the DTO is built and
/// discarded when converting back, so a tampered or stale wire value never
/// reaches scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillionaireDto {
    pub name: String,
    pub net_worth: u64,
    pub price_to_eat: u32,
    pub image: String,
}

impl From<&Billionaire> for BillionaireDto {
    fn from(b: &Billionaire) -> Self {
        Self {
            name: b.name.clone(),
            net_worth: b.net_worth,
            price_to_eat: b.price_to_eat(),
            image: b.image.clone(),
        }
    }
}

impl From<BillionaireDto> for Billionaire {
    fn from(dto: BillionaireDto) -> Self {
        Self {
            name: dto.name,
            net_worth: dto.net_worth,
            image: dto.image,
        }
    }
}

/// Built-in roster used whenever the live source is unavailable
pub fn fallback_roster() -> Vec<Billionaire> {
    vec![
        Billionaire::new("Elon Musk", 234_000_000_000, "/elonmuskface.png"),
        Billionaire::new("Jeff Bezos", 180_000_000_000, "/jeffbezosface.png"),
        Billionaire::new("Mark Zuckerberg", 177_000_000_000, "/markzuckface.png"),
        Billionaire::new("Donald Trump", 2_500_000_000, "/trumpface.png"),
    ]
}

/// Replace the entry whose name contains `name_match` with live data.
///
/// The sprite stays local; only name and net worth come from upstream.
/// Returns false (leaving the fallback entry untouched) when nothing matches.
pub fn merge_live_entry(
    roster: &mut [Billionaire],
    name_match: &str,
    name: &str,
    net_worth: u64,
) -> bool {
    match roster.iter_mut().find(|b| b.name.contains(name_match)) {
        Some(entry) => {
            entry.name = name.to_owned();
            entry.net_worth = net_worth;
            true
        }
        None => false,
    }
}
