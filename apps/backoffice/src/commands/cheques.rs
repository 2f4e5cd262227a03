//! # Cheques Command
//!
//! The accountant's daily list: overdue cheques, cheques due today, and
//! those coming up inside the banner window (or the week with `--week`).
//! Each line ends with the cheque's bank status and its due-state badge.

use std::io::Write;

use chrono::NaiveDate;
use estate_core::cheque::{
    cheques_where, is_due_soon_banner, is_due_today, is_due_within_week, DUE_SOON_BANNER_DAYS,
    DUE_WITHIN_WEEK_DAYS,
};
use estate_core::money::format_amount;
use estate_core::{ChequeDetails, Transaction};

use crate::error::AppResult;
use crate::state::AppState;

struct Section {
    title: String,
    lines: Vec<String>,
}

pub fn list_due_cheques(state: &AppState, week: bool, out: &mut dyn Write) -> AppResult<()> {
    let today = state.today;
    let decimals = state.config.finance.decimals;

    let sections = state.store.with_store(|store| {
        let txs = store.transactions();
        let render = |pred: fn(&ChequeDetails, NaiveDate) -> bool| -> Vec<String> {
            cheques_where(txs, |cheque| pred(cheque, today))
                .map(|(tx, cheque)| cheque_line(tx, cheque, today, decimals))
                .collect()
        };

        let upcoming = if week {
            Section {
                title: format!("DUE WITHIN {} DAYS", DUE_WITHIN_WEEK_DAYS),
                lines: render(|c, today| open(c) && is_due_within_week(c.due_date, today)),
            }
        } else {
            Section {
                title: format!("DUE WITHIN {} DAYS", DUE_SOON_BANNER_DAYS),
                lines: render(|c, today| open(c) && is_due_soon_banner(c.due_date, today)),
            }
        };

        vec![
            Section {
                title: "OVERDUE".to_string(),
                lines: render(|c, today| c.is_overdue(today)),
            },
            Section {
                title: "DUE TODAY".to_string(),
                lines: render(|c, today| open(c) && is_due_today(c.due_date, today)),
            },
            upcoming,
        ]
    });

    writeln!(out, "Cheques as of {}", today)?;
    for section in sections {
        writeln!(out)?;
        writeln!(out, "{} ({})", section.title, section.lines.len())?;
        if section.lines.is_empty() {
            writeln!(out, "  none")?;
        }
        for line in section.lines {
            writeln!(out, "  {}", line)?;
        }
    }
    Ok(())
}

fn open(cheque: &ChequeDetails) -> bool {
    !cheque.status.is_settled()
}

fn cheque_line(
    tx: &Transaction,
    cheque: &ChequeDetails,
    today: NaiveDate,
    decimals: usize,
) -> String {
    format!(
        "{}  #{:<8} {:<24} {:<22} {:>18}  {:<12} [{}]",
        date(cheque.due_date),
        cheque.cheque_number,
        cheque.bank_name,
        tx.customer_name,
        format_amount(tx.amount, &tx.currency, decimals),
        cheque.status.as_str(),
        cheque.due_state(today)
    )
}

fn date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}
