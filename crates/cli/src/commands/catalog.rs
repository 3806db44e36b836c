//! Catalog inspection command.

use tiendita_storefront::catalog::CatalogClient;

use super::load_config;

/// Fetch the catalog and print one line per product.
///
/// Unlike the storefront, which shows an empty listing when the catalog is
/// unreachable, this reports the failure.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or parsed.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let catalog = CatalogClient::new(&config.catalog);

    tracing::info!(endpoint = %catalog.endpoint(), "Fetching catalog");
    let products = catalog.fetch_products().await?;

    #[allow(clippy::print_stdout)]
    {
        for product in &products {
            println!("{:>6}  {:<60}  {}", product.id, product.title, product.price);
        }
        println!("{} products", products.len());
    }

    Ok(())
}
