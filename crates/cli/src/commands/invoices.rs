//! Invoice lookup commands.

use tiendita_core::InvoiceId;
use tiendita_storefront::db::{self, InvoiceRepository};
use tiendita_storefront::models::notice::search_results;
use tiendita_storefront::services::{SearchOutcome, search_invoices};

use super::load_config;

/// Print every invoice matching `query` by name, email or phone.
///
/// # Errors
///
/// Returns an error if the query is blank or the database cannot be read.
pub async fn search(query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let pool = db::open(&config.database_url).await?;

    let outcome = search_invoices(&InvoiceRepository::new(&pool), query).await;
    pool.close().await;

    #[allow(clippy::print_stdout)]
    {
        match outcome? {
            SearchOutcome::Found(invoices) => print!("{}", search_results(&invoices)),
            SearchOutcome::NotFound => println!("No invoices match '{query}'"),
        }
    }

    Ok(())
}

/// Print a single invoice as pretty JSON.
///
/// # Errors
///
/// Returns an error if `id` is not a six-digit number, no such invoice
/// exists, or the database cannot be read.
pub async fn show(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let id = InvoiceId::checked(id)?;

    let config = load_config()?;
    let pool = db::open(&config.database_url).await?;

    let invoice = InvoiceRepository::new(&pool).get_by_id(id).await;
    pool.close().await;

    let invoice = invoice?.ok_or_else(|| format!("Invoice {id} not found"))?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&invoice)?);
    }

    Ok(())
}
