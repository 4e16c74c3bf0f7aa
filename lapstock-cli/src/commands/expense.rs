use chrono::NaiveDate;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lapstock_catalog::{ExpenseStatus, Frequency, RecurringExpense};

use crate::CliError;

/// Show the schedule of an expense relative to a reference date.
pub(crate) fn run_next_due(
    due: NaiveDate,
    frequency: Option<Frequency>,
    today: Option<NaiveDate>,
    paid: bool,
    advance_days: u32,
) -> Result<(), CliError> {
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut expense = RecurringExpense::new(due, frequency);
    expense.is_paid = paid;
    expense.advance_days = advance_days;

    let status = match expense.status(today) {
        ExpenseStatus::Paid => "paid".if_supports_color(Stdout, |t| t.green()).to_string(),
        ExpenseStatus::Overdue => "overdue".if_supports_color(Stdout, |t| t.red()).to_string(),
        ExpenseStatus::Pending => "pending".to_string(),
    };

    log::info!("  Due date:   {}", expense.due_date);
    log::info!("  Status:     {}", status);
    log::info!("  Days until: {}", expense.days_until(today));
    log::info!(
        "  Reminder:   {}{}",
        expense.reminder_date(),
        if expense.is_due_soon(today) { " (due soon)" } else { "" }
    );

    match frequency {
        Some(f) => {
            let next = expense.next_due_date(today).ok_or_else(|| {
                CliError::input(format!("{} past {} is out of the date range", f.as_str(), due))
            })?;
            log::info!(
                "  Next due:   {} ({})",
                next.if_supports_color(Stdout, |t| t.bold()),
                f.as_str()
            );
        }
        None => log::info!("  Next due:   (one-off expense)"),
    }
    Ok(())
}
