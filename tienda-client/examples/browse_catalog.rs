//! Catalog browsing example
//!
//! Drives the catalog controller against a live backend configured through
//! the environment (TIENDA_URL, TIENDA_API_KEY, ...).
//!
//! Run: cargo run --example browse_catalog

use tienda_client::{CatalogController, ClientConfig, SortOrder};

fn print_page(label: &str, catalog: &CatalogController<tienda_client::StoreClient>) {
    let snapshot = catalog.snapshot();
    println!(
        "\n{label}: {} products, page {} of {}",
        snapshot.total_count, snapshot.page, snapshot.total_pages
    );
    if let Some(error) = &snapshot.error {
        println!("  error: {error}");
        return;
    }
    for product in &snapshot.items {
        println!("  {} - ${} ({})", product.title, product.price, product.category);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = ClientConfig::from_env();
    let catalog = CatalogController::new(config.build_store_client(), config.catalog_settings());

    catalog.refresh().await;
    print_page("Newest", &catalog);

    catalog.set_sort_order(SortOrder::PriceAsc);
    catalog.refresh().await;
    print_page("Cheapest first", &catalog);

    if catalog.set_page(2) {
        catalog.refresh().await;
        print_page("Second page", &catalog);
    }

    Ok(())
}
