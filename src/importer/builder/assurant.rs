// ==========================================
// CRM Core - Assurant layout
// ==========================================
// One row per claim; customer identified by CPF.
// Values use comma-thousands (1,234.56).
// ==========================================

use crate::domain::{CaseDraft, ContractorSet, CustomerDraft, ProductDraft};
use crate::importer::builder::common::{
    case_for, customer_from_columns, money_cell, require_contractor, CustomerColumns,
};
use crate::importer::builder::{BuildContext, CompanyBuilder, CompanyIdentity, CustomerLink};
use crate::importer::column_index::RowView;
use crate::importer::error::ImportResult;
use crate::importer::money::NumberConvention;

pub const COMPANY_NAME: &str = "Assurant";

pub const DOCUMENT: &str = "CPF Cliente";
pub const CUSTOMER_NAME: &str = "Nome Cliente";
pub const PRODUCT_VALUE: &str = "Valor Produto";
pub const BRAND: &str = "Marca";
pub const PRODUCT: &str = "Produto";
pub const SERIAL_NUMBER: &str = "Número de Série";
pub const REPORTED_DEFECT: &str = "Defeito Reclamado";
pub const CLAIM_NUMBER: &str = "Número Sinistro";

const CUSTOMER_COLUMNS: CustomerColumns = CustomerColumns {
    document: DOCUMENT,
    full_name: CUSTOMER_NAME,
    phone: "Telefone Celular",
    email: "E-mail",
    street: "Endereço",
    neighborhood: "Bairro",
    city: "Cidade",
    state: "Estado",
    zip_code: "CEP",
};

pub struct AssurantBuilder;

impl CompanyBuilder for AssurantBuilder {
    fn identity(&self) -> CompanyIdentity {
        CompanyIdentity::single(COMPANY_NAME)
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
        let contractor = require_contractor(contractors, COMPANY_NAME)?;

        let mut draft = case_for(contractor, customer, ctx);
        draft.subject = row.get(REPORTED_DEFECT).to_string();
        draft.external_reference = row.get(CLAIM_NUMBER).to_string();
        Ok(draft)
    }

    fn build_product(&self, row: &RowView<'_>, ctx: &BuildContext) -> ImportResult<ProductDraft> {
        Ok(ProductDraft {
            name: row.get(PRODUCT).to_string(),
            description: row.get(REPORTED_DEFECT).to_string(),
            value: money_cell(row, PRODUCT_VALUE, NumberConvention::CommaThousands)?,
            brand: row.get(BRAND).to_string(),
            model: String::new(),
            serial_number: row.get(SERIAL_NUMBER).to_string(),
            created_by: ctx.created_by.clone(),
        })
    }

    fn build_customer(&self, row: &RowView<'_>, ctx: &BuildContext) -> ImportResult<CustomerDraft> {
        customer_from_columns(row, &CUSTOMER_COLUMNS, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CaseStatus, Contractor, DocumentType};
    use crate::importer::column_index::{Cell, ColumnIndex, RawRow};
    use crate::importer::error::ImportError;
    use chrono::Utc;

    fn strings(cells: &[&str]) -> RawRow {
        cells.iter().map(|s| Cell::from(*s)).collect()
    }

    fn header() -> RawRow {
        strings(&[
            "CPF Cliente",
            "Nome Cliente",
            "Valor Produto",
            "Marca",
            "Produto",
            "Número de Série",
            "Defeito Reclamado",
            "Número Sinistro",
            "Telefone Celular",
            "E-mail",
            "Endereço",
            "Bairro",
            "Cidade",
            "Estado",
            "CEP",
        ])
    }

    fn sample_row() -> RawRow {
        strings(&[
            "12345678901",
            "Maria da Silva",
            "1,234.56",
            "Samsung",
            "Galaxy S21",
            "SN123",
            "Tela quebrada",
            "SIN-001",
            "11999990000",
            "maria@example.com",
            "Rua A, 10",
            "Centro",
            "São Paulo",
            "São Paulo",
            "01000-000",
        ])
    }

    fn contractors() -> ContractorSet {
        ContractorSet::new(vec![Contractor {
            contractor_id: "c-assurant".to_string(),
            company_name: "Assurant".to_string(),
            document: None,
            created_at: Utc::now(),
        }])
    }

    #[test]
    fn test_build_case_product_and_customer() {
        let header = header();
        let cells = sample_row();
        let columns = ColumnIndex::from_header(&header);
        let row = RowView::new(&cells, &columns, 2);
        let ctx = BuildContext::new("ana", Utc::now(), 7);
        let link = CustomerLink {
            customer_id: "cust-1".to_string(),
            region: Some("SP".to_string()),
        };

        let case = AssurantBuilder
            .build_case(&row, &contractors(), Some(&link), &ctx)
            .unwrap();
        assert_eq!(case.contractor_id, "c-assurant");
        assert_eq!(case.customer_id.as_deref(), Some("cust-1"));
        assert_eq!(case.region.as_deref(), Some("SP"));
        assert_eq!(case.subject, "Tela quebrada");
        assert_eq!(case.external_reference, "SIN-001");
        assert_eq!(case.status, CaseStatus::Open);

        let product = AssurantBuilder.build_product(&row, &ctx).unwrap();
        assert_eq!(product.value, 1234.56);
        assert_eq!(product.brand, "Samsung");
        assert_eq!(product.serial_number, "SN123");

        let customer = AssurantBuilder.build_customer(&row, &ctx).unwrap();
        assert_eq!(customer.first_name, "Maria");
        assert_eq!(customer.last_name, "da Silva");
        assert_eq!(customer.document_type, DocumentType::Cpf);
        assert_eq!(customer.address.state, "SP");
        assert_eq!(customer.created_by, "ana");
    }

    #[test]
    fn test_missing_contractor_is_not_found() {
        let header = header();
        let cells = sample_row();
        let columns = ColumnIndex::from_header(&header);
        let row = RowView::new(&cells, &columns, 2);
        let ctx = BuildContext::new("ana", Utc::now(), 7);

        let err = AssurantBuilder
            .build_case(&row, &ContractorSet::default(), None, &ctx)
            .unwrap_err();
        assert!(matches!(err, ImportError::NotFound(_)));
    }
}
