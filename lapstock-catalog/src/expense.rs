//! Recurring expense scheduling.
//!
//! Pure date math over `chrono::NaiveDate`: status of an expense relative to
//! a reference day, and projection of the next due date for recurring ones.
//! "Today" is always passed in so results are reproducible.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How often a recurring expense comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Advance `date` by one period. `None` only on calendar overflow.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => date.checked_add_days(Days::new(1)),
            Self::Weekly => date.checked_add_days(Days::new(7)),
            Self::Monthly => add_months(date, 1),
            Self::Quarterly => add_months(date, 3),
            Self::Yearly => add_months(date, 12),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown frequency: {0}")]
pub struct FrequencyParseError(pub String);

impl std::str::FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            _ => Err(FrequencyParseError(s.to_string())),
        }
    }
}

/// Add calendar months, clamping the day to the length of the target month.
///
/// Jan 31 + 1 month is Feb 28 (or Feb 29 in a leap year).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// First occurrence strictly after `today`, stepping from `due` one period
/// at a time.
///
/// Each step starts from the previous result, so a clamped day carries
/// forward (Jan 31 → Feb 28 → Mar 28).
pub fn next_due_date(due: NaiveDate, frequency: Frequency, today: NaiveDate) -> Option<NaiveDate> {
    let mut next = due;
    while next <= today {
        next = frequency.advance(next)?;
    }
    Some(next)
}

/// Payment status of an expense on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Paid,
    Overdue,
    Pending,
}

/// The scheduling fields of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub due_date: NaiveDate,
    /// `None` for one-off expenses.
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub is_paid: bool,
    /// Days before the due date at which a reminder becomes relevant.
    #[serde(default = "default_advance_days")]
    pub advance_days: u32,
    /// Paying a recurring expense schedules the next one.
    #[serde(default = "default_auto_renew")]
    pub auto_renew: bool,
}

fn default_advance_days() -> u32 {
    7
}

fn default_auto_renew() -> bool {
    true
}

impl RecurringExpense {
    pub fn new(due_date: NaiveDate, frequency: Option<Frequency>) -> Self {
        Self {
            due_date,
            frequency,
            is_paid: false,
            advance_days: default_advance_days(),
            auto_renew: default_auto_renew(),
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.frequency.is_some()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_paid && self.due_date < today
    }

    pub fn status(&self, today: NaiveDate) -> ExpenseStatus {
        if self.is_paid {
            ExpenseStatus::Paid
        } else if self.is_overdue(today) {
            ExpenseStatus::Overdue
        } else {
            ExpenseStatus::Pending
        }
    }

    /// Days left until the due date; 0 when paid or already past due.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        if self.is_paid {
            return 0;
        }
        (self.due_date - today).num_days().max(0)
    }

    /// Next occurrence after `today`. `None` for one-off expenses.
    pub fn next_due_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        let frequency = self.frequency?;
        next_due_date(self.due_date, frequency, today)
    }

    /// Day from which the expense counts as coming up.
    pub fn reminder_date(&self) -> NaiveDate {
        self.due_date
            .checked_sub_days(Days::new(u64::from(self.advance_days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Unpaid and inside the reminder window (overdue included).
    pub fn is_due_soon(&self, today: NaiveDate) -> bool {
        !self.is_paid && today >= self.reminder_date()
    }

    /// Mark paid and, for auto-renewing recurring expenses, return the
    /// follow-up instance due at the next occurrence.
    pub fn pay(&mut self, today: NaiveDate) -> Option<RecurringExpense> {
        self.is_paid = true;
        if !self.auto_renew {
            return None;
        }
        let next_due = self.next_due_date(today)?;
        Some(RecurringExpense {
            due_date: next_due,
            frequency: self.frequency,
            is_paid: false,
            advance_days: self.advance_days,
            auto_renew: true,
        })
    }
}
