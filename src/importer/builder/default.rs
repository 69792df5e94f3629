// ==========================================
// CRM Core - Generic layout
// ==========================================
// Used for any company without a dedicated builder.
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

pub const DOCUMENT: &str = "Documento";
pub const PROTOCOL: &str = "Protocolo";
pub const SUBJECT: &str = "Assunto";
pub const PRODUCT: &str = "Produto";
pub const DESCRIPTION: &str = "Descrição";
pub const BRAND: &str = "Marca";
pub const MODEL: &str = "Modelo";
pub const SERIAL_NUMBER: &str = "Número de Série";
pub const VALUE: &str = "Valor";

const CUSTOMER_COLUMNS: CustomerColumns = CustomerColumns {
    document: DOCUMENT,
    full_name: "Nome",
    phone: "Telefone",
    email: "E-mail",
    street: "Endereço",
    neighborhood: "Bairro",
    city: "Cidade",
    state: "Estado",
    zip_code: "CEP",
};

pub struct DefaultBuilder {
    company_name: String,
}

impl DefaultBuilder {
    pub fn new(company_name: &str) -> Self {
        Self {
            company_name: company_name.trim().to_string(),
        }
    }
}

impl CompanyBuilder for DefaultBuilder {
    fn identity(&self) -> CompanyIdentity {
        CompanyIdentity::single(&self.company_name)
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
        let contractor = require_contractor(contractors, &self.company_name)?;

        let mut draft = case_for(contractor, customer, ctx);
        draft.subject = row.get(SUBJECT).to_string();
        draft.external_reference = row.get(PROTOCOL).to_string();
        Ok(draft)
    }

    fn build_product(&self, row: &RowView<'_>, ctx: &BuildContext) -> ImportResult<ProductDraft> {
        Ok(ProductDraft {
            name: row.get(PRODUCT).to_string(),
            description: row.get(DESCRIPTION).to_string(),
            value: money_cell(row, VALUE, NumberConvention::CommaThousands)?,
            brand: row.get(BRAND).to_string(),
            model: row.get(MODEL).to_string(),
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
    use crate::domain::Contractor;
    use crate::importer::column_index::{Cell, ColumnIndex, RawRow};
    use crate::importer::error::ImportError;
    use chrono::Utc;

    fn strings(cells: &[&str]) -> RawRow {
        cells.iter().map(|s| Cell::from(*s)).collect()
    }

    #[test]
    fn test_identity_is_the_requested_company() {
        let builder = DefaultBuilder::new("  Acme Seguros ");
        assert_eq!(builder.identity().names(), ["Acme Seguros"]);
        assert!(!builder.identity().is_composite());
    }

    #[test]
    fn test_build_case_and_product() {
        let header = strings(&["Documento", "Protocolo", "Assunto", "Produto", "Valor"]);
        let cells = strings(&["12345678901", "ACM-9", "Troca", "Geladeira", "2,100.50"]);
        let columns = ColumnIndex::from_header(&header);
        let row = RowView::new(&cells, &columns, 2);
        let ctx = BuildContext::new("ana", Utc::now(), 3);
        let contractors = ContractorSet::new(vec![Contractor {
            contractor_id: "c-acme".to_string(),
            company_name: "Acme Seguros".to_string(),
            document: None,
            created_at: Utc::now(),
        }]);
        let builder = DefaultBuilder::new("acme seguros");

        let case = builder.build_case(&row, &contractors, None, &ctx).unwrap();
        assert_eq!(case.contractor_id, "c-acme");
        assert_eq!(case.subject, "Troca");
        assert_eq!(case.due_date, ctx.now + chrono::Duration::days(3));

        let product = builder.build_product(&row, &ctx).unwrap();
        assert_eq!(product.value, 2100.5);
    }

    #[test]
    fn test_bad_value_is_a_parse_error() {
        let header = strings(&["Documento", "Valor"]);
        let cells = strings(&["1", "abc"]);
        let columns = ColumnIndex::from_header(&header);
        let row = RowView::new(&cells, &columns, 5);
        let ctx = BuildContext::new("ana", Utc::now(), 7);

        let err = DefaultBuilder::new("Acme").build_product(&row, &ctx).unwrap_err();
        assert!(matches!(err, ImportError::ValueParseError { row: 5, .. }));
    }
}
