// ==========================================
// CRM Core - Pitzi layout
// ==========================================
// Device protection claims without customer data;
// cases start as draft and are completed by an operator.
// ==========================================

use crate::domain::{CaseDraft, CaseStatus, ContractorSet, CustomerDraft, ProductDraft};
use crate::importer::builder::common::{case_for, money_cell, require_contractor};
use crate::importer::builder::{BuildContext, CompanyBuilder, CompanyIdentity, CustomerLink};
use crate::importer::column_index::RowView;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::money::NumberConvention;

pub const COMPANY_NAME: &str = "Pitzi";

pub const PROTOCOL: &str = "Protocolo";
pub const DEVICE: &str = "Aparelho";
pub const BRAND: &str = "Marca";
pub const MODEL: &str = "Modelo";
pub const IMEI: &str = "IMEI";
pub const PROBLEM_DESCRIPTION: &str = "Descrição do Problema";
pub const DEVICE_VALUE: &str = "Valor do Aparelho";

pub struct PitziBuilder;

impl CompanyBuilder for PitziBuilder {
    fn identity(&self) -> CompanyIdentity {
        CompanyIdentity::single(COMPANY_NAME)
    }

    fn customer_document_header(&self) -> Option<&'static str> {
        None
    }

    fn build_case(
        &self,
        row: &RowView<'_>,
        contractors: &ContractorSet,
        customer: Option<&CustomerLink>,
        ctx: &BuildContext,
    ) -> ImportResult<CaseDraft> {
        let contractor = require_contractor(contractors, COMPANY_NAME)?;

        let mut draft = case_for(contractor, customer, ctx);
        draft.subject = row.get(PROBLEM_DESCRIPTION).to_string();
        draft.external_reference = row.get(PROTOCOL).to_string();
        draft.status = CaseStatus::Draft;
        Ok(draft)
    }

    fn build_product(&self, row: &RowView<'_>, ctx: &BuildContext) -> ImportResult<ProductDraft> {
        Ok(ProductDraft {
            name: row.get(DEVICE).to_string(),
            description: row.get(PROBLEM_DESCRIPTION).to_string(),
            value: money_cell(row, DEVICE_VALUE, NumberConvention::CommaDecimal)?,
            brand: row.get(BRAND).to_string(),
            model: row.get(MODEL).to_string(),
            serial_number: row.get(IMEI).to_string(),
            created_by: ctx.created_by.clone(),
        })
    }

    fn build_customer(&self, row: &RowView<'_>, _ctx: &BuildContext) -> ImportResult<CustomerDraft> {
        Err(ImportError::Validation(format!(
            "row {}: {} files carry no customer data",
            row.line(),
            COMPANY_NAME
        )))
    }
}
