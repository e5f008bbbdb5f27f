use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    forecast::{forecast, progress, DebtForecast},
    giant::{DebtTarget, GiantId, GiantStatus, Payment},
    history::{deposits_since, total_paid},
};
use crate::{config::CalculatorConfig, errors::CalcError};

/// One row of the payoff plan: where a giant stands today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiantOverview {
    pub id: GiantId,
    pub name: String,
    pub total_to_pay: Decimal,
    pub paid: Decimal,
    pub remaining: Decimal,
    /// 0..=1
    pub progress: Decimal,
    /// Paid within the trailing payment window.
    pub recent_deposits: Decimal,
    /// `None` when no weekly goal is set.
    pub weekly_goal: Option<Decimal>,
    pub status: GiantStatus,
    pub forecast: DebtForecast,
}

impl GiantOverview {
    /// Recent deposits cover `config.payment_window_days` before `today`.
    pub fn build(
        giant: &DebtTarget,
        payments: &[Payment],
        today: NaiveDate,
        config: &CalculatorConfig,
    ) -> Result<Self, CalcError> {
        let paid = total_paid(payments, giant.id)?;
        let recent_deposits =
            deposits_since(payments, giant.id, today, config.payment_window_days)?;
        let forecast = forecast(giant.total_to_pay, paid, giant.weekly_goal)?;
        Ok(Self {
            id: giant.id,
            name: giant.name.clone(),
            total_to_pay: giant.total_to_pay,
            paid,
            remaining: forecast.remaining,
            progress: progress(giant.total_to_pay, paid),
            recent_deposits,
            weekly_goal: (giant.weekly_goal > Decimal::ZERO).then_some(giant.weekly_goal),
            status: giant.status.after_payments(giant.total_to_pay, paid),
            forecast,
        })
    }

    /// Overviews for every giant, in priority order (lowest number first,
    /// then input order).
    pub fn build_all(
        giants: &[DebtTarget],
        payments: &[Payment],
        today: NaiveDate,
        config: &CalculatorConfig,
    ) -> Result<Vec<Self>, CalcError> {
        let mut ordered: Vec<&DebtTarget> = giants.iter().collect();
        ordered.sort_by_key(|giant| giant.priority);
        ordered
            .into_iter()
            .map(|giant| Self::build(giant, payments, today, config))
            .collect()
    }

    /// Whether the trailing deposits reached the weekly goal.
    pub fn weekly_goal_met(&self) -> Option<bool> {
        self.weekly_goal.map(|goal| self.recent_deposits >= goal)
    }
}
