//! Read-only commands: credential check, lookups and counts.

use shopex_client::ShopifyClient;
use shopex_core::ProductFilters;

pub(crate) async fn run_validate(client: &ShopifyClient) -> anyhow::Result<()> {
    let shop = client.validate_credentials().await?;
    match (&shop.plan, &shop.currency_code) {
        (Some(plan), Some(currency)) => println!(
            "connected to {} ({}, {} plan, {currency})",
            shop.name,
            client.shop(),
            plan.display_name
        ),
        _ => println!("connected to {} ({})", shop.name, client.shop()),
    }
    Ok(())
}

pub(crate) async fn run_vendors(client: &ShopifyClient) -> anyhow::Result<()> {
    let vendors = client.fetch_vendors().await?;
    tracing::info!(count = vendors.len(), "vendors loaded");
    for vendor in vendors {
        println!("{vendor}");
    }
    Ok(())
}

pub(crate) async fn run_tags(client: &ShopifyClient) -> anyhow::Result<()> {
    let tags = client.fetch_tags().await?;
    tracing::info!(count = tags.len(), "tags loaded");
    for tag in tags {
        println!("{tag}");
    }
    Ok(())
}

pub(crate) async fn run_publications(client: &ShopifyClient) -> anyhow::Result<()> {
    for publication in client.fetch_publications().await? {
        println!("{}\t{}", publication.id, publication.name);
    }
    Ok(())
}

pub(crate) async fn run_count(
    client: &ShopifyClient,
    filters: &ProductFilters,
) -> anyhow::Result<()> {
    let count = client.fetch_product_count(filters).await?;
    println!("{count}");
    Ok(())
}
