// ==========================================
// CRM Core - Zurich layout (composite)
// ==========================================
// One file carries claims of two legal entities;
// the "Base" column names the contractor of each row.
// Values use comma-decimal (1.234,56).
// ==========================================

use crate::domain::{CaseDraft, ContractorSet, CustomerDraft, ProductDraft};
use crate::importer::builder::common::{
    case_for, customer_from_columns, money_cell, require_contractor, CustomerColumns,
};
use crate::importer::builder::{BuildContext, CompanyBuilder, CompanyIdentity, CustomerLink};
use crate::importer::column_index::RowView;
use crate::importer::error::ImportResult;
use crate::importer::money::NumberConvention;

pub const SANTANDER_COMPANY: &str = "Zurich Santander";
pub const MINUANO_COMPANY: &str = "Zurich Minuano";

pub const BASE: &str = "Base";
pub const DOCUMENT: &str = "CPF/CNPJ Segurado";
pub const CLAIM_NUMBER: &str = "Número do Sinistro";
pub const EVENT_DESCRIPTION: &str = "Descrição do Evento";
pub const INSURED_ITEM: &str = "Item Segurado";
pub const MANUFACTURER: &str = "Fabricante";
pub const MODEL: &str = "Modelo";
pub const SERIAL_NUMBER: &str = "Número de Série";
pub const INSURED_AMOUNT: &str = "Importância Segurada";

const CUSTOMER_COLUMNS: CustomerColumns = CustomerColumns {
    document: DOCUMENT,
    full_name: "Nome do Segurado",
    phone: "Telefone",
    email: "E-mail",
    street: "Logradouro",
    neighborhood: "Bairro",
    city: "Município",
    state: "UF",
    zip_code: "CEP",
};

pub struct ZurichBuilder;

impl ZurichBuilder {
    /// Contractor name for a row's "Base" cell
    pub fn company_for_base(base: &str) -> &'static str {
        if base.to_lowercase().contains("santander") {
            SANTANDER_COMPANY
        } else {
            MINUANO_COMPANY
        }
    }
}

impl CompanyBuilder for ZurichBuilder {
    fn identity(&self) -> CompanyIdentity {
        CompanyIdentity::pair(SANTANDER_COMPANY, MINUANO_COMPANY)
    }

    fn customer_document_header(&self) -> Option<&'static str> {
        Some(DOCUMENT)
    }

    fn build_case(
        &self,
        row: &RowView<'_>,
        contractors: &ContractorSet,
        customer: Option<&CustomerLink>,
        ctx: &BuildContext,
    ) -> ImportResult<CaseDraft> {
        let company = Self::company_for_base(row.get(BASE));
        let contractor = require_contractor(contractors, company)?;

        let mut draft = case_for(contractor, customer, ctx);
        draft.subject = row.get(EVENT_DESCRIPTION).to_string();
        draft.external_reference = row.get(CLAIM_NUMBER).to_string();
        Ok(draft)
    }

    fn build_product(&self, row: &RowView<'_>, ctx: &BuildContext) -> ImportResult<ProductDraft> {
        Ok(ProductDraft {
            name: row.get(INSURED_ITEM).to_string(),
            description: row.get(EVENT_DESCRIPTION).to_string(),
            value: money_cell(row, INSURED_AMOUNT, NumberConvention::CommaDecimal)?,
            brand: row.get(MANUFACTURER).to_string(),
            model: row.get(MODEL).to_string(),
            serial_number: row.get(SERIAL_NUMBER).to_string(),
            created_by: ctx.created_by.clone(),
        })
    }

    fn build_customer(&self, row: &RowView<'_>, ctx: &BuildContext) -> ImportResult<CustomerDraft> {
        customer_from_columns(row, &CUSTOMER_COLUMNS, ctx)
    }
}
