//! Discount and bonus stacking.
//!
//! Order of application is fixed: the referral discount comes off the base
//! price first, the wallet-bonus debit second, and the payable amount clamps
//! at zero. The clamp is the only silent adjustment in the engine — bonus
//! and discount inputs that break an invariant are rejected with a specific
//! reason so the caller can re-prompt, never trimmed quietly.
//!
//! The discount amount itself comes from the external referral-validation
//! service; the engine treats it as opaque but still re-checks it against
//! the price it is supposed to apply to.

use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// A fully validated price computation for one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Pre-discount base price in minor units.
    pub original_minor: i64,

    /// Referral discount in minor units.
    pub discount_minor: i64,

    /// Wallet bonuses debited, in minor units.
    pub bonuses_minor: i64,

    /// Final payable amount in minor units, clamped at zero.
    pub payable_minor: i64,
}

impl PriceBreakdown {
    /// Validate the discount and bonus against the base price and the wallet
    /// balance, then stack them into the final payable amount.
    ///
    /// # Errors
    ///
    /// Rejects a negative discount or bonus, a discount exceeding the base
    /// price, a bonus exceeding the wallet balance, and a bonus exceeding
    /// the price left after the discount.
    pub fn stack(
        base_minor: i64,
        discount_minor: i64,
        bonuses_minor: i64,
        available_balance_minor: i64,
    ) -> Result<Self> {
        validate_discount(discount_minor, base_minor)?;
        let after_discount = base_minor - discount_minor;
        validate_bonus(bonuses_minor, available_balance_minor, after_discount)?;

        Ok(Self {
            original_minor: base_minor,
            discount_minor,
            bonuses_minor,
            payable_minor: final_price(base_minor, discount_minor, bonuses_minor),
        })
    }
}

/// Stack a discount and a bonus onto a base price, clamping at zero.
///
/// A customer is never charged a negative amount, even if discount plus
/// bonus overshoot the base.
#[must_use]
pub fn final_price(base_minor: i64, discount_minor: i64, bonuses_minor: i64) -> i64 {
    (base_minor - discount_minor - bonuses_minor).max(0)
}

/// Check a referral discount against the price it applies to.
///
/// # Errors
///
/// Rejects a negative discount and a discount larger than the base price.
pub fn validate_discount(discount_minor: i64, base_minor: i64) -> Result<()> {
    if discount_minor < 0 {
        return Err(BookingError::NegativeAmount {
            amount: discount_minor,
        });
    }
    if discount_minor > base_minor {
        return Err(BookingError::DiscountExceedsPrice {
            discount: discount_minor,
            price: base_minor,
        });
    }
    Ok(())
}

/// Check a requested bonus debit before accepting it.
///
/// # Errors
///
/// Rejects a negative bonus, a bonus larger than the wallet balance, and a
/// bonus larger than the price still owed after the discount.
pub fn validate_bonus(
    bonuses_minor: i64,
    available_balance_minor: i64,
    price_after_discount_minor: i64,
) -> Result<()> {
    if bonuses_minor < 0 {
        return Err(BookingError::NegativeAmount {
            amount: bonuses_minor,
        });
    }
    if bonuses_minor > available_balance_minor {
        return Err(BookingError::BonusExceedsBalance {
            requested: bonuses_minor,
            balance: available_balance_minor,
        });
    }
    if bonuses_minor > price_after_discount_minor {
        return Err(BookingError::BonusExceedsPayable {
            requested: bonuses_minor,
            payable: price_after_discount_minor,
        });
    }
    Ok(())
}
