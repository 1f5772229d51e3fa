use crate::domain::model::Offering;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_negative, validate_range, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FEE_RATE: f64 = 0.03;
pub const GST_RATE: f64 = 0.18;
pub const DEFAULT_FEE_FLOOR: f64 = 10.0;

/// How the platform fee is rounded to whole rupees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeRounding {
    /// Ties go toward positive infinity: 12.5 -> 13, -12.5 -> -12.
    #[default]
    HalfUp,
    /// Ties go to the even neighbour: 12.5 -> 12, 13.5 -> 14.
    HalfEven,
    /// Ties go away from zero: 12.5 -> 13, -12.5 -> -13.
    HalfAwayFromZero,
}

impl FeeRounding {
    pub fn round(self, value: f64) -> f64 {
        match self {
            FeeRounding::HalfUp => {
                let floor = value.floor();
                if value - floor >= 0.5 {
                    floor + 1.0
                } else {
                    floor
                }
            }
            FeeRounding::HalfEven => value.round_ties_even(),
            FeeRounding::HalfAwayFromZero => value.round(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    pub fee_rate: f64,
    pub tax_rate: f64,
    pub fee_floor: f64,
    pub rounding: FeeRounding,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            fee_rate: DEFAULT_FEE_RATE,
            tax_rate: GST_RATE,
            fee_floor: DEFAULT_FEE_FLOOR,
            rounding: FeeRounding::default(),
        }
    }
}

impl Validate for PricingPolicy {
    fn validate(&self) -> Result<()> {
        validate_range("pricing.fee_rate", self.fee_rate, 0.0, 1.0)?;
        validate_range("pricing.tax_rate", self.tax_rate, 0.0, 1.0)?;
        validate_range("pricing.fee_floor", self.fee_floor, 0.0, f64::MAX)?;
        Ok(())
    }
}

/// Fee- and tax-inclusive breakdown. Only `fee` is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub base: f64,
    pub fee: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Unchecked: negative inputs produce negative quotes.
pub fn compute_totals(energy_kwh: f64, price_per_kwh: f64, policy: &PricingPolicy) -> Quote {
    let base = energy_kwh * price_per_kwh;
    let fee = policy
        .fee_floor
        .max(policy.rounding.round(policy.fee_rate * base));
    let subtotal = base + fee;
    let tax = subtotal * policy.tax_rate;
    let total = subtotal + tax;

    Quote {
        base,
        fee,
        subtotal,
        tax,
        total,
    }
}

/// Like [`compute_totals`] but refuses negative or non-finite input.
pub fn quote(energy_kwh: f64, price_per_kwh: f64, policy: &PricingPolicy) -> Result<Quote> {
    let energy_kwh = validate_non_negative("energy_kwh", energy_kwh)?;
    let price_per_kwh = validate_non_negative("price_per_kwh", price_per_kwh)?;
    Ok(compute_totals(energy_kwh, price_per_kwh, policy))
}

pub fn clamp_energy(requested_kwh: f64, offering: &Offering) -> f64 {
    offering.min_kwh.max(offering.max_kwh.min(requested_kwh))
}

/// Whole rupees with Indian digit grouping, e.g. `₹1,23,45,678`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if negative {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}
