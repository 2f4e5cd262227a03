//! # Transaction Repository
//!
//! Payments received from customers, including post-dated cheques.
//!
//! `customerName` is copied from the customer when the transaction is
//! recorded (and again if the transaction is moved to another customer); a
//! later rename of the customer does not rewrite payment history.
//!
//! A patch that changes a cheque's status must follow the same lifecycle
//! as [`EntityStore::update_cheque_status`], and must carry the side fields
//! (`bankProcessedDate`, `bounceReason`) the new status needs.

use chrono::NaiveDate;
use estate_core::cheque::{apply_transition, can_transition};
use estate_core::validation::validate_transaction;
use estate_core::{
    ChequeDetails, ChequeStatus, CoreError, PaymentMethod, Transaction, TransactionStatus,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::merge_patch;
use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub customer_id: String,
    #[serde(default)]
    pub payee_details: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub unit_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub accountant: String,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub cheque_details: Option<ChequeDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    pub customer_id: Option<String>,
    pub payee_details: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub unit_id: Option<Option<String>>,
    pub payment_method: Option<PaymentMethod>,
    pub accountant: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub due_date: Option<Option<NaiveDate>>,
    pub status: Option<TransactionStatus>,
    pub comments: Option<Option<String>>,
    pub attachments: Option<Vec<String>>,
    pub cheque_details: Option<Option<ChequeDetails>>,
}

impl EntityStore {
    pub fn add_transaction(&mut self, new: NewTransaction) -> StoreResult<Transaction> {
        let customer_name = self.require_customer(&new.customer_id)?.name.clone();

        let transaction = Transaction {
            id: Self::next_id(),
            customer_id: new.customer_id,
            customer_name,
            payee_details: new.payee_details,
            amount: new.amount,
            currency: new.currency,
            unit_id: new.unit_id,
            payment_method: new.payment_method,
            accountant: new.accountant,
            transaction_date: new.transaction_date,
            due_date: new.due_date,
            status: new.status,
            comments: new.comments,
            attachments: new.attachments,
            cheque_details: new.cheque_details,
        };

        self.check_transaction(&transaction)?;

        debug!(
            id = %transaction.id,
            customer_id = %transaction.customer_id,
            amount = transaction.amount,
            method = %transaction.payment_method,
            "Adding transaction"
        );
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    pub fn update_transaction(
        &mut self,
        id: &str,
        patch: TransactionPatch,
    ) -> StoreResult<Transaction> {
        let current = self.transactions.require(id)?;
        let mut transaction = current.clone();

        merge_patch!(transaction <- patch {
            customer_id, payee_details, amount, currency, unit_id,
            payment_method, accountant, transaction_date, due_date, status,
            comments, attachments, cheque_details,
        });

        if transaction == *current {
            return Ok(transaction);
        }

        if let (Some(before), Some(after)) = (current.cheque(), transaction.cheque()) {
            let (from, to) = (before.status, after.status);
            if from != to && !can_transition(from, to) {
                warn!(id = %transaction.id, %from, %to, "Cheque status change rejected");
                return Err(CoreError::InvalidChequeTransition { from, to }.into());
            }
        }

        if transaction.customer_id != current.customer_id {
            transaction.customer_name = self.require_customer(&transaction.customer_id)?.name.clone();
        }

        self.check_transaction(&transaction)?;

        debug!(id = %transaction.id, status = %transaction.status, "Updating transaction");
        self.transactions.replace(transaction.clone())?;
        Ok(transaction)
    }

    /// Moves the cheque of a cheque-paid transaction through its lifecycle.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown transaction id
    /// - `NotACheque` when the transaction is not paid by cheque
    /// - `InvalidChequeTransition` for an edge the lifecycle does not allow
    /// - validation error when bouncing without a reason
    pub fn update_cheque_status(
        &mut self,
        transaction_id: &str,
        to: ChequeStatus,
        processed_on: NaiveDate,
        bounce_reason: Option<String>,
    ) -> StoreResult<Transaction> {
        let mut transaction = self.transactions.require(transaction_id)?.clone();

        let cheque = match (transaction.payment_method, transaction.cheque_details.as_mut()) {
            (PaymentMethod::Cheque, Some(cheque)) => cheque,
            _ => return Err(CoreError::NotACheque(transaction.id.clone()).into()),
        };

        let from = cheque.status;
        if let Err(err) = apply_transition(cheque, to, processed_on, bounce_reason) {
            warn!(id = %transaction.id, %from, %to, error = %err, "Cheque status change rejected");
            return Err(err.into());
        }

        info!(id = %transaction.id, %from, %to, "Cheque status changed");
        self.transactions.replace(transaction.clone())?;
        Ok(transaction)
    }

    fn check_transaction(&self, transaction: &Transaction) -> StoreResult<()> {
        let result = validate_transaction(transaction)
            .map_err(StoreError::from)
            .and_then(|()| self.require_customer(&transaction.customer_id).map(|_| ()))
            .and_then(|()| match transaction.unit_id.as_deref() {
                Some(unit_id) => self.require_unit(unit_id).map(|_| ()),
                None => Ok(()),
            });

        if let Err(err) = &result {
            warn!(id = %transaction.id, error = %err, "Transaction rejected");
        }
        result
    }
}
