//! Recurring bills and the agenda shown on the dashboard.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of upcoming bills kept in an agenda.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub paid: bool,
}

impl Bill {
    pub fn new(id: i64, title: impl Into<String>, amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            amount,
            due_date,
            is_critical: false,
            paid: false,
        }
    }

    pub fn status(&self, today: NaiveDate) -> BillStatus {
        BillStatus::classify(self, today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Paid,
    Overdue,
    DueToday,
    DueTomorrow,
    Upcoming,
}

impl BillStatus {
    pub fn classify(bill: &Bill, today: NaiveDate) -> BillStatus {
        if bill.paid {
            return BillStatus::Paid;
        }
        if bill.due_date < today {
            return BillStatus::Overdue;
        }
        if bill.due_date == today {
            return BillStatus::DueToday;
        }
        if bill.due_date == today + Duration::days(1) {
            BillStatus::DueTomorrow
        } else {
            BillStatus::Upcoming
        }
    }
}

/// An unpaid bill past its due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueBill {
    pub bill: Bill,
    pub days_late: i64,
}

/// Unpaid bills grouped by urgency, each group sorted by due date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAgenda {
    pub overdue: Vec<OverdueBill>,
    pub due_today: Vec<Bill>,
    pub due_tomorrow: Vec<Bill>,
    pub upcoming: Vec<Bill>,
    pub overdue_total: Decimal,
}

impl BillAgenda {
    /// Groups `bills` relative to `today`, keeping at most `upcoming_limit`
    /// upcoming bills. Paid bills are left out.
    pub fn build(bills: &[Bill], today: NaiveDate, upcoming_limit: usize) -> Self {
        let mut sorted: Vec<&Bill> = bills.iter().collect();
        sorted.sort_by_key(|bill| bill.due_date);

        let mut agenda = BillAgenda::default();
        for bill in sorted {
            match bill.status(today) {
                BillStatus::Paid => {}
                BillStatus::Overdue => {
                    agenda.overdue_total += bill.amount;
                    agenda.overdue.push(OverdueBill {
                        bill: bill.clone(),
                        days_late: (today - bill.due_date).num_days(),
                    });
                }
                BillStatus::DueToday => agenda.due_today.push(bill.clone()),
                BillStatus::DueTomorrow => agenda.due_tomorrow.push(bill.clone()),
                BillStatus::Upcoming => {
                    if agenda.upcoming.len() < upcoming_limit {
                        agenda.upcoming.push(bill.clone());
                    }
                }
            }
        }
        tracing::debug!(
            overdue = agenda.overdue.len(),
            due_today = agenda.due_today.len(),
            due_tomorrow = agenda.due_tomorrow.len(),
            upcoming = agenda.upcoming.len(),
            "bill agenda built"
        );
        agenda
    }

    /// Overdue bills flagged as critical.
    pub fn critical_overdue(&self) -> impl Iterator<Item = &OverdueBill> {
        self.overdue.iter().filter(|entry| entry.bill.is_critical)
    }

    pub fn is_clear(&self) -> bool {
        self.overdue.is_empty() && self.due_today.is_empty() && self.due_tomorrow.is_empty()
    }
}
