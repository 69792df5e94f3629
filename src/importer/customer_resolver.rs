// ==========================================
// CRM Core - Customer resolution cache
// ==========================================
// One search pass per batch, then one create per missing document.
// A document repeated across rows is resolved exactly once.
// ==========================================

use crate::domain::Customer;
use crate::importer::builder::{BuildContext, CompanyBuilder, CustomerLink};
use crate::importer::column_index::{ColumnIndex, RawRow, RowView};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::CustomerRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

// ==========================================
// CustomerResolutionMap - document → customer
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CustomerResolutionMap {
    customers: HashMap<String, Customer>,
}

impl CustomerResolutionMap {
    pub fn get(&self, document: &str) -> Option<&Customer> {
        self.customers.get(document)
    }

    /// Case link for a document, None when the document is unknown
    pub fn link(&self, document: &str) -> Option<CustomerLink> {
        self.customers.get(document).map(|customer| CustomerLink {
            customer_id: customer.customer_id.clone(),
            region: customer.region().map(str::to_string),
        })
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

// ==========================================
// CustomerResolver
// ==========================================
pub struct CustomerResolver {
    customer_repo: Arc<dyn CustomerRepository>,
    page_limit: usize,
}

impl CustomerResolver {
    pub fn new(customer_repo: Arc<dyn CustomerRepository>, page_limit: usize) -> Self {
        Self {
            customer_repo,
            page_limit: page_limit.max(1),
        }
    }

    /// Resolves every distinct document of the batch to a customer.
    ///
    /// # Arguments
    /// - rows: data rows (header excluded), row i is file line i + 2
    /// - document_column: position of the document column
    ///
    /// # Returns
    /// - Ok(map): every non-empty document of the batch has an entry
    /// - Err: first search/create failure; customers created before it stay
    #[instrument(skip(self, rows, columns, builder, ctx))]
    pub async fn resolve(
        &self,
        rows: &[RawRow],
        columns: &ColumnIndex,
        document_column: usize,
        builder: &dyn CompanyBuilder,
        ctx: &BuildContext,
    ) -> ImportResult<CustomerResolutionMap> {
        // document → index of the first data row carrying it
        let mut first_rows: HashMap<String, usize> = HashMap::new();
        let mut documents: Vec<String> = Vec::new();
        for (idx, row) in rows.iter().enumerate() {
            if row.len() <= 1 {
                continue;
            }
            let document = match row.get(document_column) {
                Some(cell) if !cell.is_empty() => cell.as_str(),
                _ => continue,
            };
            if !first_rows.contains_key(document) {
                first_rows.insert(document.to_string(), idx);
                documents.push(document.to_string());
            }
        }

        if documents.is_empty() {
            debug!("no customer documents in batch");
            return Ok(CustomerResolutionMap::default());
        }

        let mut resolved: HashMap<String, Option<Customer>> =
            documents.iter().map(|d| (d.clone(), None)).collect();

        // === existing customers ===
        for chunk in documents.chunks(self.page_limit) {
            let page = self
                .customer_repo
                .search(chunk, self.page_limit, 0)
                .await
                .map_err(|e| {
                    error!(error = %e, "customer search failed");
                    ImportError::from(e)
                })?;

            for customer in page.items {
                if let Some(slot) = resolved.get_mut(&customer.document) {
                    *slot = Some(customer);
                }
            }
        }

        let existing = resolved.values().filter(|c| c.is_some()).count();

        // === missing customers, in order of first appearance ===
        let mut created = 0usize;
        for document in &documents {
            let already_known = resolved.get(document).map_or(false, |c| c.is_some());
            if already_known {
                continue;
            }

            let row_idx = first_rows[document];
            let view = RowView::new(&rows[row_idx], columns, row_idx + 2);
            let mut draft = builder.build_customer(&view, ctx)?;
            draft.document = document.clone();

            let customer_id = self.customer_repo.create(&draft).await.map_err(|e| {
                error!(document = %document, error = %e, "customer creation failed");
                ImportError::from(e)
            })?;

            resolved.insert(
                document.clone(),
                Some(Customer::from_draft(customer_id, draft, ctx.now)),
            );
            created += 1;
        }

        info!(
            documents = documents.len(),
            existing = existing,
            created = created,
            "customers resolved"
        );

        let mut customers = HashMap::with_capacity(resolved.len());
        for (document, customer) in resolved {
            let customer = customer.ok_or_else(|| {
                ImportError::InternalError(format!("customer for {} left unresolved", document))
            })?;
            customers.insert(document, customer);
        }

        Ok(CustomerResolutionMap { customers })
    }
}
