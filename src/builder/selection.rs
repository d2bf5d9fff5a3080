use crate::catalog::LazyProduct;
use crate::model::ProductDetails;
use crate::{CatalogError, ScrapeError};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One component slot in a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildSlot {
    Cpu,
    Motherboard,
    Storage,
    Memory,
    Case,
    Psu,
    Os,
}

impl BuildSlot {
    /// Every slot, in report order
    pub const ALL: [BuildSlot; 7] = [
        BuildSlot::Cpu,
        BuildSlot::Motherboard,
        BuildSlot::Storage,
        BuildSlot::Memory,
        BuildSlot::Case,
        BuildSlot::Psu,
        BuildSlot::Os,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Motherboard => "motherboard",
            Self::Storage => "storage",
            Self::Memory => "memory",
            Self::Case => "case",
            Self::Psu => "psu",
            Self::Os => "os",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for BuildSlot {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == wanted)
            .ok_or_else(|| CatalogError::Validation(format!("Unknown build slot '{}'", s)))
    }
}

impl fmt::Display for BuildSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price sums over the filled slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildTotals {
    pub discount: u64,
    pub common: u64,
}

/// The chosen product per slot; any slot may be empty
#[derive(Debug, Clone, Default)]
pub struct BuildSelection {
    slots: [Option<LazyProduct>; 7],
}

impl BuildSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `product` in `slot`, returning what was there before
    pub fn set(&mut self, slot: BuildSlot, product: LazyProduct) -> Option<LazyProduct> {
        debug!("Selected {} for {}", product.name(), slot);
        self.slots[slot.index()].replace(product)
    }

    pub fn get(&self, slot: BuildSlot) -> Option<&LazyProduct> {
        self.slots[slot.index()].as_ref()
    }

    pub fn clear(&mut self, slot: BuildSlot) -> Option<LazyProduct> {
        self.slots[slot.index()].take()
    }

    /// Filled slots in report order
    pub fn filled(&self) -> impl Iterator<Item = (BuildSlot, &LazyProduct)> {
        BuildSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|p| (slot, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Loads the detail page of every filled slot that is still a summary
    pub async fn ensure_full(&self) -> Result<(), CatalogError> {
        for (_, product) in self.filled() {
            product.ensure_full().await?;
        }
        Ok(())
    }

    /// Sums discount and common prices over the filled slots
    ///
    /// Fails with a validation error if a filled slot has not been loaded
    /// in full; call [`BuildSelection::ensure_full`] first.
    pub fn totals(&self) -> Result<BuildTotals, CatalogError> {
        let details = self
            .filled()
            .map(|(slot, product)| {
                product.details().ok_or_else(|| {
                    CatalogError::Validation(format!(
                        "{} '{}' has not been loaded in full",
                        slot,
                        product.name()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sum_prices(details)?)
    }
}

/// Sums discount and common prices
///
/// A sum that does not fit in `u64` means a price was misread from the
/// page, and is reported as such.
pub(crate) fn sum_prices<'a>(
    details: impl IntoIterator<Item = &'a ProductDetails>,
) -> Result<BuildTotals, ScrapeError> {
    details
        .into_iter()
        .try_fold(BuildTotals::default(), |acc, d| {
            let overflow = || ScrapeError::InvalidPrice {
                text: format!(
                    "{} ({} + {} / {} + {})",
                    d.name, acc.discount, d.discount_price, acc.common, d.common_price
                ),
            };
            Ok(BuildTotals {
                discount: acc.discount.checked_add(d.discount_price).ok_or_else(overflow)?,
                common: acc.common.checked_add(d.common_price).ok_or_else(overflow)?,
            })
        })
}
