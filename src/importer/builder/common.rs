// ==========================================
// CRM Core - Helpers shared by company builders
// ==========================================

use crate::domain::{
    Address, CaseDraft, Contact, Contractor, ContractorSet, CustomerDraft, DocumentType,
};
use crate::importer::builder::{BuildContext, CustomerLink};
use crate::importer::column_index::RowView;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::money::{parse_money, NumberConvention};
use crate::importer::state_codes::state_code;

/// Header names of a company's customer columns
#[derive(Debug, Clone, Copy)]
pub struct CustomerColumns {
    pub document: &'static str,
    pub full_name: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub street: &'static str,
    pub neighborhood: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub zip_code: &'static str,
}

/// Splits at the first whitespace: "Maria da Silva" → ("Maria", "da Silva")
pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

/// Monetary cell under `header`; a bad value reports row and column.
///
/// Typed spreadsheet numbers are taken as they are, `convention` only
/// applies to text.
pub fn money_cell(row: &RowView<'_>, header: &str, convention: NumberConvention) -> ImportResult<f64> {
    if let Some(value) = row.number(header) {
        return Ok(value);
    }
    parse_money(row.get(header), convention).map_err(|value| ImportError::ValueParseError {
        row: row.line(),
        field: header.to_string(),
        value,
    })
}

pub fn require_contractor<'a>(
    contractors: &'a ContractorSet,
    company_name: &str,
) -> ImportResult<&'a Contractor> {
    contractors
        .by_name(company_name)
        .ok_or_else(|| ImportError::NotFound(format!("contractor '{}'", company_name)))
}

/// Case skeleton for `contractor`, linked to the resolved customer if any
pub fn case_for(
    contractor: &Contractor,
    customer: Option<&CustomerLink>,
    ctx: &BuildContext,
) -> CaseDraft {
    let mut draft = CaseDraft::new(&contractor.contractor_id, &ctx.created_by, ctx.now, ctx.due_in);
    if let Some(link) = customer {
        draft.customer_id = Some(link.customer_id.clone());
        draft.region = link.region.clone();
    }
    draft
}

pub fn customer_from_columns(
    row: &RowView<'_>,
    columns: &CustomerColumns,
    ctx: &BuildContext,
) -> ImportResult<CustomerDraft> {
    let document = row.get(columns.document).to_string();
    if document.is_empty() {
        return Err(ImportError::Validation(format!(
            "row {}: empty customer document",
            row.line()
        )));
    }

    let (first_name, last_name) = split_full_name(row.get(columns.full_name));

    Ok(CustomerDraft {
        first_name,
        last_name,
        document_type: DocumentType::infer(&document),
        document,
        contact: Contact {
            phone: row.get(columns.phone).to_string(),
            email: row.get(columns.email).to_string(),
        },
        address: Address {
            street: row.get(columns.street).to_string(),
            neighborhood: row.get(columns.neighborhood).to_string(),
            city: row.get(columns.city).to_string(),
            state: state_code(row.get(columns.state)).to_string(),
            zip_code: row.get(columns.zip_code).to_string(),
        },
        created_by: ctx.created_by.clone(),
    })
}
