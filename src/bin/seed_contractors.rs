// Small dev utility: register the contractors a batch upload needs.
//
// Usage:
//   cargo run --bin seed_contractors -- <db_path> "Assurant" "Zurich Santander" ...
//
// Names already registered are reported and skipped.

use crm_core::db::{init_schema, open_sqlite_connection};
use crm_core::repository::{ContractorRepository, ContractorRepositoryImpl, RepositoryError};
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let db_path = args.next().unwrap_or_else(|| "crm.db".to_string());
    let names: Vec<String> = args
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if names.is_empty() {
        anyhow::bail!("usage: seed_contractors <db_path> <company name>...");
    }

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;
    let repo = ContractorRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)));

    for name in &names {
        match repo.create(name, None).await {
            Ok(id) => println!("{} => {}", name, id),
            Err(RepositoryError::UniqueConstraintViolation(_)) => {
                println!("{} already registered", name)
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
