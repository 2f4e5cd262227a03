//! # Cheque Lifecycle Deriver
//!
//! Date-relative classification of post-dated cheques, plus the rules for
//! moving a cheque through its bank lifecycle.
//!
//! ## Due Windows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            today-1    today    today+1  today+2  today+3 ... today+7    │
//! │   ──────────┼──────────┼─────────┼────────┼────────┼──────────┼──────   │
//! │   overdue ◄─┘          │         └────────┘        │          │         │
//! │   (unless cleared/     │      due soon banner      │          │         │
//! │    cancelled)      due today  (strictly inside 3d) │          │         │
//! │                                 └─────────────────────────────┘         │
//! │                                 due this week filter (inside 7d)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The 3-day banner and the 7-day filter are deliberately separate
//! predicates: the banner alerts, the filter lists.
//!
//! ## Lifecycle
//! ```text
//! pending ──► sent_to_bank ──┬──► cleared
//!                            └──► bounced
//! any state except cancelled ───► cancelled
//! ```
//!
//! Every comparison is at calendar-day granularity against a `today` the
//! caller supplies (the local date in the app).

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{ChequeDetails, ChequeStatus, PaymentMethod, Transaction};

/// Width of the "due soon" banner window, in days.
pub const DUE_SOON_BANNER_DAYS: i64 = 3;

/// Width of the "due this week" filter window, in days.
pub const DUE_WITHIN_WEEK_DAYS: i64 = 7;

// =============================================================================
// Due Predicates
// =============================================================================

/// Past due and still expected to clear.
///
/// Always false for cleared or cancelled cheques.
pub fn is_overdue(due_date: NaiveDate, status: ChequeStatus, today: NaiveDate) -> bool {
    due_date < today && !status.is_settled()
}

/// Due on `today`.
pub fn is_due_today(due_date: NaiveDate, today: NaiveDate) -> bool {
    due_date == today
}

/// Due strictly after today and strictly before `today + 3 days`.
pub fn is_due_soon_banner(due_date: NaiveDate, today: NaiveDate) -> bool {
    within_window(due_date, today, DUE_SOON_BANNER_DAYS)
}

/// Due strictly after today and strictly before `today + 7 days`.
pub fn is_due_within_week(due_date: NaiveDate, today: NaiveDate) -> bool {
    within_window(due_date, today, DUE_WITHIN_WEEK_DAYS)
}

fn within_window(due_date: NaiveDate, today: NaiveDate, days: i64) -> bool {
    today < due_date && due_date < today + Duration::days(days)
}

// =============================================================================
// Classification
// =============================================================================

/// Single due-state used to badge a cheque in list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChequeDueState {
    /// Cleared or cancelled; no longer tracked.
    Settled,
    Overdue,
    DueToday,
    /// Inside the 3-day banner window.
    DueSoon,
    Upcoming,
}

impl ChequeDueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChequeDueState::Settled => "settled",
            ChequeDueState::Overdue => "overdue",
            ChequeDueState::DueToday => "due_today",
            ChequeDueState::DueSoon => "due_soon",
            ChequeDueState::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for ChequeDueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a cheque for display. Settled cheques win over any date rule.
pub fn classify(due_date: NaiveDate, status: ChequeStatus, today: NaiveDate) -> ChequeDueState {
    if status.is_settled() {
        ChequeDueState::Settled
    } else if is_overdue(due_date, status, today) {
        ChequeDueState::Overdue
    } else if is_due_today(due_date, today) {
        ChequeDueState::DueToday
    } else if is_due_soon_banner(due_date, today) {
        ChequeDueState::DueSoon
    } else {
        ChequeDueState::Upcoming
    }
}

impl ChequeDetails {
    #[inline]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        is_overdue(self.due_date, self.status, today)
    }

    #[inline]
    pub fn due_state(&self, today: NaiveDate) -> ChequeDueState {
        classify(self.due_date, self.status, today)
    }
}

// =============================================================================
// Transitions
// =============================================================================

/// Whether the lifecycle allows moving from `from` to `to`.
pub fn can_transition(from: ChequeStatus, to: ChequeStatus) -> bool {
    use ChequeStatus::*;

    match (from, to) {
        (Cancelled, _) => false,
        (_, Cancelled) => true,
        (Pending, SentToBank) => true,
        (SentToBank, Cleared) | (SentToBank, Bounced) => true,
        _ => false,
    }
}

/// Applies a status change to a cheque after checking the lifecycle.
///
/// ## Side Fields
/// - `cleared` / `bounced` stamp `bank_processed_date` with `processed_on`
/// - `bounced` requires a non-empty `bounce_reason`
///
/// On error the cheque is left untouched.
pub fn apply_transition(
    cheque: &mut ChequeDetails,
    to: ChequeStatus,
    processed_on: NaiveDate,
    bounce_reason: Option<String>,
) -> CoreResult<()> {
    if !can_transition(cheque.status, to) {
        return Err(CoreError::InvalidChequeTransition {
            from: cheque.status,
            to,
        });
    }

    let bounce_reason = bounce_reason
        .map(|reason| reason.trim().to_string())
        .filter(|reason| !reason.is_empty());

    if to == ChequeStatus::Bounced && bounce_reason.is_none() {
        return Err(ValidationError::conditional("bounceReason", "the cheque bounced").into());
    }

    if matches!(to, ChequeStatus::Cleared | ChequeStatus::Bounced) {
        cheque.bank_processed_date = Some(processed_on);
    }
    if to == ChequeStatus::Bounced {
        cheque.bounce_reason = bounce_reason;
    }
    cheque.status = to;
    Ok(())
}

// =============================================================================
// Transaction Helpers
// =============================================================================

impl Transaction {
    /// The embedded cheque, when this payment was made by cheque.
    pub fn cheque(&self) -> Option<&ChequeDetails> {
        match self.payment_method {
            PaymentMethod::Cheque => self.cheque_details.as_ref(),
            _ => None,
        }
    }
}

/// Cheque-paid transactions matching a due predicate, in collection order.
pub fn cheques_where<'a, F>(
    transactions: &'a [Transaction],
    mut predicate: F,
) -> impl Iterator<Item = (&'a Transaction, &'a ChequeDetails)> + 'a
where
    F: FnMut(&ChequeDetails) -> bool + 'a,
{
    transactions
        .iter()
        .filter_map(|tx| tx.cheque().map(|cheque| (tx, cheque)))
        .filter(move |(_, cheque)| predicate(cheque))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn days(offset: i64) -> NaiveDate {
        today() + Duration::days(offset)
    }

    fn cheque(due_date: NaiveDate, status: ChequeStatus) -> ChequeDetails {
        ChequeDetails {
            cheque_number: "100234".to_string(),
            bank_name: "National Bank".to_string(),
            branch_name: "Downtown".to_string(),
            account_number: "1234567890".to_string(),
            due_date,
            status,
            bank_processed_date: None,
            bounce_reason: None,
        }
    }

    #[test]
    fn test_overdue_yesterday_scenario() {
        assert!(is_overdue(days(-1), ChequeStatus::Pending, today()));
        assert!(!is_overdue(days(-1), ChequeStatus::Cleared, today()));
    }

    #[test]
    fn test_settled_never_overdue() {
        for offset in [-400, -30, -1, 0, 1, 30] {
            assert!(!is_overdue(days(offset), ChequeStatus::Cleared, today()));
            assert!(!is_overdue(days(offset), ChequeStatus::Cancelled, today()));
        }
    }

    #[test]
    fn test_overdue_iff_before_today() {
        for status in [ChequeStatus::Pending, ChequeStatus::SentToBank, ChequeStatus::Bounced] {
            for offset in -10..=10 {
                assert_eq!(is_overdue(days(offset), status, today()), offset < 0);
            }
        }
    }

    #[test]
    fn test_windows_are_exclusive() {
        assert!(!is_due_soon_banner(days(0), today()));
        assert!(is_due_soon_banner(days(1), today()));
        assert!(is_due_soon_banner(days(2), today()));
        assert!(!is_due_soon_banner(days(3), today()));

        assert!(!is_due_within_week(days(0), today()));
        assert!(is_due_within_week(days(3), today()));
        assert!(is_due_within_week(days(6), today()));
        assert!(!is_due_within_week(days(7), today()));
    }

    #[test]
    fn test_due_today() {
        assert!(is_due_today(days(0), today()));
        assert!(!is_due_today(days(1), today()));
    }

    #[test]
    fn test_classify() {
        let t = today();
        assert_eq!(classify(days(-1), ChequeStatus::Cleared, t), ChequeDueState::Settled);
        assert_eq!(classify(days(-1), ChequeStatus::Pending, t), ChequeDueState::Overdue);
        assert_eq!(classify(days(0), ChequeStatus::SentToBank, t), ChequeDueState::DueToday);
        assert_eq!(classify(days(2), ChequeStatus::Pending, t), ChequeDueState::DueSoon);
        assert_eq!(classify(days(5), ChequeStatus::Pending, t), ChequeDueState::Upcoming);
        assert_eq!(cheque(days(0), ChequeStatus::Pending).due_state(t).to_string(), "due_today");
    }

    #[test]
    fn test_transition_table() {
        use ChequeStatus::*;

        let legal = [
            (Pending, SentToBank),
            (SentToBank, Cleared),
            (SentToBank, Bounced),
            (Pending, Cancelled),
            (SentToBank, Cancelled),
            (Cleared, Cancelled),
            (Bounced, Cancelled),
        ];

        for from in ChequeStatus::ALL {
            for to in ChequeStatus::ALL {
                let expected = legal.contains(&(*from, *to));
                assert_eq!(can_transition(*from, *to), expected, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_apply_clear_stamps_processed_date() {
        let mut c = cheque(days(1), ChequeStatus::Pending);
        apply_transition(&mut c, ChequeStatus::SentToBank, today(), None).unwrap();
        assert_eq!(c.bank_processed_date, None);

        apply_transition(&mut c, ChequeStatus::Cleared, days(2), None).unwrap();
        assert_eq!(c.status, ChequeStatus::Cleared);
        assert_eq!(c.bank_processed_date, Some(days(2)));
    }

    #[test]
    fn test_bounce_requires_reason() {
        let mut c = cheque(days(1), ChequeStatus::SentToBank);
        let err = apply_transition(&mut c, ChequeStatus::Bounced, today(), Some("  ".to_string()));
        assert!(matches!(err, Err(CoreError::Validation(_))));
        assert_eq!(c.status, ChequeStatus::SentToBank);

        apply_transition(
            &mut c,
            ChequeStatus::Bounced,
            today(),
            Some("Insufficient funds".to_string()),
        )
        .unwrap();
        assert_eq!(c.bounce_reason.as_deref(), Some("Insufficient funds"));
    }

    #[test]
    fn test_illegal_transition_leaves_cheque_untouched() {
        let mut c = cheque(days(1), ChequeStatus::Pending);
        let err = apply_transition(&mut c, ChequeStatus::Cleared, today(), None);
        assert!(matches!(err, Err(CoreError::InvalidChequeTransition { .. })));
        assert_eq!(c.status, ChequeStatus::Pending);
        assert_eq!(c.bank_processed_date, None);
    }
}
