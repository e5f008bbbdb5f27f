use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::CalcError, money::ensure_non_negative};

/// Identifier assigned to a giant by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GiantId(pub i64);

impl fmt::Display for GiantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for GiantId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiantStatus {
    #[default]
    Active,
    Defeated,
}

impl GiantStatus {
    /// Status after `paid` has been put toward `total_to_pay`.
    ///
    /// `Defeated` is terminal: it is returned unchanged whatever the figures.
    pub fn after_payments(self, total_to_pay: Decimal, paid: Decimal) -> GiantStatus {
        match self {
            GiantStatus::Defeated => GiantStatus::Defeated,
            GiantStatus::Active if paid >= total_to_pay => GiantStatus::Defeated,
            GiantStatus::Active => GiantStatus::Active,
        }
    }

    pub fn is_defeated(self) -> bool {
        self == GiantStatus::Defeated
    }
}

/// A debt being paid down toward a target total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtTarget {
    pub id: GiantId,
    pub name: String,
    pub total_to_pay: Decimal,
    #[serde(default)]
    pub weekly_goal: Decimal,
    #[serde(default)]
    pub interest_rate: Decimal,
    #[serde(default = "DebtTarget::default_priority")]
    pub priority: u32,
    #[serde(default)]
    pub status: GiantStatus,
}

impl DebtTarget {
    pub fn new(id: impl Into<GiantId>, name: impl Into<String>, total_to_pay: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_to_pay,
            weekly_goal: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            priority: Self::default_priority(),
            status: GiantStatus::Active,
        }
    }

    pub fn with_weekly_goal(mut self, weekly_goal: Decimal) -> Self {
        self.weekly_goal = weekly_goal;
        self
    }

    fn default_priority() -> u32 {
        1
    }

    /// Checks a new payment against this giant and reports the status it
    /// leads to, given what had been paid before it.
    ///
    /// The giant itself is not modified; the caller stores the payment and
    /// the new status together.
    pub fn register_payment(
        &self,
        paid_before: Decimal,
        payment: &Payment,
    ) -> Result<PaymentOutcome, CalcError> {
        if payment.giant_id != self.id {
            return Err(CalcError::InvalidInput(format!(
                "payment for giant {} registered against giant {}",
                payment.giant_id, self.id
            )));
        }
        if payment.amount <= Decimal::ZERO {
            return Err(CalcError::InvalidInput(
                "payment amount must be greater than zero".into(),
            ));
        }
        ensure_non_negative(paid_before, "paid so far")?;

        let paid_after = paid_before.checked_add(payment.amount).ok_or_else(|| {
            CalcError::InvalidInput(format!("paid total for giant {} is too large", self.id))
        })?;
        let status = self.status.after_payments(self.total_to_pay, paid_after);
        let defeated_now = !self.status.is_defeated() && status.is_defeated();
        if defeated_now {
            tracing::info!(giant = %self.id, name = %self.name, "giant defeated");
        }
        Ok(PaymentOutcome {
            paid_after,
            status,
            defeated_now,
        })
    }
}

/// What registering a payment leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub paid_after: Decimal,
    pub status: GiantStatus,
    /// This payment moved the giant from `Active` to `Defeated`.
    pub defeated_now: bool,
}

/// An immutable payment toward a giant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub giant_id: GiantId,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl Payment {
    pub fn new(giant_id: impl Into<GiantId>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            giant_id: giant_id.into(),
            amount,
            date,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}
