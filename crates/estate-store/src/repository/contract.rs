//! # Contract Repository
//!
//! Contract numbers are assigned here: `CNT-<year of signedDate>-<sequence>`,
//! where the sequence is one past the highest number already used that year.

use chrono::{Datelike, NaiveDate};
use estate_core::validation::validate_contract;
use estate_core::{Contract, ContractStatus};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{check_number_year, merge_patch};
use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContract {
    pub customer_id: String,
    pub unit_id: String,
    pub signed_date: NaiveDate,
    pub total_value: f64,
    pub payment_terms: String,
    pub status: ContractStatus,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub legal_reviewed: bool,
    #[serde(default)]
    pub reviewed_by: Option<String>,
}

/// The contract number is fixed once assigned and cannot be patched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractPatch {
    pub customer_id: Option<String>,
    pub unit_id: Option<String>,
    pub signed_date: Option<NaiveDate>,
    pub total_value: Option<f64>,
    pub payment_terms: Option<String>,
    pub status: Option<ContractStatus>,
    pub documents: Option<Vec<String>>,
    pub legal_reviewed: Option<bool>,
    pub reviewed_by: Option<Option<String>>,
}

impl EntityStore {
    pub fn add_contract(&mut self, new: NewContract) -> StoreResult<Contract> {
        let contract = Contract {
            id: Self::next_id(),
            contract_number: self.next_contract_number(new.signed_date.year()),
            customer_id: new.customer_id,
            unit_id: new.unit_id,
            signed_date: new.signed_date,
            total_value: new.total_value,
            payment_terms: new.payment_terms,
            status: new.status,
            documents: new.documents,
            legal_reviewed: new.legal_reviewed,
            reviewed_by: new.reviewed_by,
        };

        self.check_contract(&contract)?;

        debug!(id = %contract.id, number = %contract.contract_number, "Adding contract");
        self.contracts.push(contract.clone());
        Ok(contract)
    }

    pub fn update_contract(&mut self, id: &str, patch: ContractPatch) -> StoreResult<Contract> {
        let current = self.contracts.require(id)?;
        let mut contract = current.clone();

        merge_patch!(contract <- patch {
            customer_id, unit_id, signed_date, total_value, payment_terms,
            status, documents, legal_reviewed, reviewed_by,
        });

        if contract == *current {
            return Ok(contract);
        }

        let year = check_number_year(
            "signedDate",
            &contract.contract_number,
            current.signed_date,
            contract.signed_date,
        );
        if let Err(err) = year {
            warn!(id = %contract.id, error = %err, "Contract rejected");
            return Err(err);
        }

        self.check_contract(&contract)?;

        debug!(id = %contract.id, status = %contract.status, "Updating contract");
        self.contracts.replace(contract.clone())?;
        Ok(contract)
    }

    fn check_contract(&self, contract: &Contract) -> StoreResult<()> {
        let result = validate_contract(contract)
            .map_err(StoreError::from)
            .and_then(|()| self.require_customer(&contract.customer_id).map(|_| ()))
            .and_then(|()| self.require_unit(&contract.unit_id).map(|_| ()));

        if let Err(err) = &result {
            warn!(id = %contract.id, error = %err, "Contract rejected");
        }
        result
    }
}
