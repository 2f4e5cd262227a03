//! # Document Commands
//!
//! Look a contract or invoice up by id or number, render it, and print it
//! or write it into a directory.

use std::io::Write;
use std::path::PathBuf;

use estate_export::{
    contract_document, contract_file_name, invoice_document, invoice_file_name, write_document,
    ContractParties,
};

use crate::error::AppResult;
use crate::state::AppState;

pub fn contract(
    state: &AppState,
    key: &str,
    dir: Option<PathBuf>,
    out: &mut dyn Write,
) -> AppResult<()> {
    let letterhead = state.config.letterhead();

    let (file_name, text) = state.store.with_store(|store| -> AppResult<_> {
        let contract = store.find_contract(key)?;
        let unit = store.unit(&contract.unit_id);
        let parties = ContractParties {
            customer: store.customer(&contract.customer_id),
            unit,
            property: unit.and_then(|u| store.property(&u.property_id)),
        };
        Ok((
            contract_file_name(contract),
            contract_document(&letterhead, contract, parties),
        ))
    })?;

    emit(dir, &file_name, &text, out)
}

pub fn invoice(
    state: &AppState,
    key: &str,
    dir: Option<PathBuf>,
    out: &mut dyn Write,
) -> AppResult<()> {
    let letterhead = state.config.letterhead();

    let (file_name, text) = state.store.with_store(|store| -> AppResult<_> {
        let invoice = store.find_invoice(key)?;
        let customer = store.customer(&invoice.customer_id);
        Ok((
            invoice_file_name(invoice),
            invoice_document(&letterhead, invoice, customer),
        ))
    })?;

    emit(dir, &file_name, &text, out)
}

fn emit(dir: Option<PathBuf>, file_name: &str, text: &str, out: &mut dyn Write) -> AppResult<()> {
    match dir {
        Some(dir) => {
            let path = write_document(&dir, file_name, text)?;
            writeln!(out, "Wrote {}", path.display())?;
        }
        None => out.write_all(text.as_bytes())?,
    }
    Ok(())
}
