//! Debts ("giants"): payment history, payoff forecasts and the daily budget
//! available to pay them down.

pub mod budget;
pub mod forecast;
pub mod giant;
pub mod history;
pub mod overview;

pub use budget::giant_daily_budget;
pub use forecast::{forecast, progress, DebtForecast};
pub use giant::{DebtTarget, GiantId, GiantStatus, Payment, PaymentOutcome};
pub use history::{deposits_since, total_paid};
pub use overview::GiantOverview;
