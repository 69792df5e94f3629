// ==========================================
// CRM Core - Case batch importer
// ==========================================
// Flow: read file → column index → builder → contractors →
//       customers → per-row case + product → bulk case insert
// ==========================================
// Customers and products created before a failure are kept;
// only the final case insert is transactional.
// ==========================================

use crate::config::CaseBatchConfigReader;
use crate::domain::ContractorSet;
use crate::importer::builder::{BuildContext, CompanyBuilderRegistry};
use crate::importer::column_index::{ColumnIndex, RowView};
use crate::importer::customer_resolver::{CustomerResolutionMap, CustomerResolver};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::repository::{
    CaseRepository, ContractorRepository, CustomerRepository, ProductRepository,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

pub struct CaseBatchImporter {
    contractor_repo: Arc<dyn ContractorRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    product_repo: Arc<dyn ProductRepository>,
    case_repo: Arc<dyn CaseRepository>,
    config: Arc<dyn CaseBatchConfigReader>,
    registry: CompanyBuilderRegistry,
    file_parser: UniversalFileParser,
}

impl CaseBatchImporter {
    pub fn new(
        contractor_repo: Arc<dyn ContractorRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        product_repo: Arc<dyn ProductRepository>,
        case_repo: Arc<dyn CaseRepository>,
        config: Arc<dyn CaseBatchConfigReader>,
    ) -> Self {
        Self {
            contractor_repo,
            customer_repo,
            product_repo,
            case_repo,
            config,
            registry: CompanyBuilderRegistry::default(),
            file_parser: UniversalFileParser,
        }
    }

    /// Replaces the builder registry (companies with custom layouts)
    pub fn with_registry(mut self, registry: CompanyBuilderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Imports one uploaded file as a batch of cases.
    ///
    /// # Arguments
    /// - bytes: file content
    /// - file_name: uploaded name, its extension picks the decoder
    /// - created_by: author recorded on every created entity
    /// - company_name: company whose layout the file follows
    ///
    /// # Returns
    /// - Ok(ids): case ids in data-row order
    /// - Err: first failure; no case is persisted
    #[instrument(skip(self, bytes), fields(batch_id, size = bytes.len()))]
    pub async fn create_batch(
        &self,
        bytes: &[u8],
        file_name: &str,
        created_by: &str,
        company_name: &str,
    ) -> ImportResult<Vec<String>> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        if company_name.trim().is_empty() {
            return Err(ImportError::Validation("company name is empty".to_string()));
        }
        if created_by.trim().is_empty() {
            return Err(ImportError::Validation("author is empty".to_string()));
        }

        info!(batch_id = %batch_id, company = %company_name, file_name = %file_name, "case batch started");

        // === Step 1: read file ===
        debug!("step 1: read file");
        let rows = self.file_parser.parse(bytes, file_name).map_err(|e| {
            error!(error = %e, "file read failed");
            e
        })?;

        // === Step 2: column index ===
        let (header, data_rows) = rows
            .split_first()
            .ok_or_else(|| ImportError::Validation(format!("{} is empty", file_name)))?;
        let columns = ColumnIndex::from_header(header);
        info!(data_rows = data_rows.len(), columns = columns.len(), "file read");

        // === Step 3: builder ===
        let builder = self.registry.select(company_name);

        let page_limit = self.config.get_customer_search_page_limit().await?;
        let due_days = self.config.get_case_due_days().await?;
        let ctx = BuildContext::new(created_by, Utc::now(), due_days);

        // === Step 4: contractors ===
        debug!("step 4: resolve contractors");
        let names = builder.identity().names().to_vec();
        let page = self
            .contractor_repo
            .search(&names, names.len(), 0)
            .await
            .map_err(|e| {
                error!(error = %e, "contractor search failed");
                ImportError::from(e)
            })?;
        let contractors = ContractorSet::new(page.items);
        if contractors.is_empty() {
            error!(companies = ?names, "no contractor registered");
            return Err(ImportError::NotFound(format!(
                "contractor for company '{}'",
                company_name
            )));
        }
        debug!(contractors = contractors.len(), "contractors resolved");

        // the document column is checked once the company is known
        let document_column = builder.customer_document_column_index(&columns)?;

        // === Step 5: customers ===
        let customers = match document_column {
            Some(column) => {
                debug!(column = column, "step 5: resolve customers");
                CustomerResolver::new(self.customer_repo.clone(), page_limit)
                    .resolve(data_rows, &columns, column, builder.as_ref(), &ctx)
                    .await?
            }
            None => {
                debug!("step 5: skipped, company files carry no customer document");
                CustomerResolutionMap::default()
            }
        };

        // === Step 6: cases and products ===
        debug!("step 6: build cases");
        let mut cases = Vec::with_capacity(data_rows.len());
        let mut skipped = 0usize;
        for (idx, row) in data_rows.iter().enumerate() {
            if row.len() <= 1 {
                skipped += 1;
                continue;
            }
            let view = RowView::new(row, &columns, idx + 2);

            let link = document_column
                .and_then(|column| view.at(column))
                .filter(|document| !document.is_empty())
                .and_then(|document| customers.link(document));

            let mut case = builder
                .build_case(&view, &contractors, link.as_ref(), &ctx)
                .map_err(|e| {
                    error!(row = view.line(), error = %e, "case build failed");
                    e
                })?;

            let product = builder.build_product(&view, &ctx).map_err(|e| {
                error!(row = view.line(), error = %e, "product build failed");
                e
            })?;
            let product_id = self.product_repo.create(&product).await.map_err(|e| {
                error!(row = view.line(), error = %e, "product creation failed");
                ImportError::from(e)
            })?;

            case.product_id = Some(product_id);
            cases.push(case);
        }
        info!(cases = cases.len(), skipped = skipped, "cases built");

        // === Step 7: bulk persistence ===
        for case in &cases {
            case.validate().map_err(ImportError::Validation)?;
        }

        let case_ids = self.case_repo.create_batch(cases).await.map_err(|e| {
            error!(error = %e, "case persistence failed");
            ImportError::from(e)
        })?;

        info!(
            batch_id = %batch_id,
            cases = case_ids.len(),
            customers = customers.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "case batch finished"
        );

        Ok(case_ids)
    }
}
