//! The `export` command.
//!
//! The export is all-or-nothing: pages stream into an in-memory sheet and the
//! file is written only after the last page arrives. Any fetch error aborts
//! the run without touching the output path.

use anyhow::Context;
use shopex_client::ShopifyClient;
use shopex_core::{load_profile, ExportProfile};
use shopex_export::{flatten_product, SheetWriter};

use crate::args::ExportArgs;

pub(crate) async fn run_export(client: &ShopifyClient, args: &ExportArgs) -> anyhow::Result<()> {
    let profile = match &args.profile {
        Some(path) => load_profile(path)
            .with_context(|| format!("failed to load export profile {}", path.display()))?,
        None => ExportProfile::default(),
    };
    let options = args.merge(profile);
    options.filters.validate()?;
    let columns = options.column_selection()?;
    let limit = options.effective_limit();

    let shop = client.validate_credentials().await?;
    tracing::info!(shop = %shop.name, query = ?options.filters.search_query(), "starting export");

    match client.fetch_product_count(&options.filters).await {
        Ok(count) => tracing::info!(
            matching = count,
            exporting = limit.map_or(count, |l| count.min(u64::from(l))),
            "products to export"
        ),
        Err(e) => tracing::warn!(error = %e, "could not count matching products, continuing"),
    }

    let mut writer = SheetWriter::create(&args.output, columns)?;
    let clean_ids = options.clean_ids;
    let summary = client
        .fetch_products(&options.filters, limit, |page| {
            let rows: Vec<_> = page
                .iter()
                .flat_map(|product| flatten_product(product, clean_ids))
                .collect();
            writer.append(&rows)?;
            tracing::debug!(rows = writer.rows(), "rows buffered");
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    tracing::info!(
        pages = summary.pages,
        products = summary.products,
        variants = summary.variants,
        "fetch complete"
    );

    let saved = writer.finish()?;
    println!("saved {} rows to {}", saved.rows, saved.path.display());
    Ok(())
}
