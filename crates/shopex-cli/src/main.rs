mod args;
mod export;
mod lookup;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::args::{ExportArgs, FilterArgs};

#[derive(Debug, Parser)]
#[command(name = "shopex")]
#[command(about = "Export Shopify products and variants to a spreadsheet")]
struct Cli {
    /// Store domain, e.g. `mystore.myshopify.com` (overrides SHOPEX_SHOP_DOMAIN)
    #[arg(long, global = true)]
    shop: Option<String>,

    /// Admin API access token (overrides SHOPEX_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Admin API version, e.g. `2024-04` (overrides SHOPEX_API_VERSION)
    #[arg(long, global = true)]
    api_version: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check the domain and access token
    Validate,
    /// List the distinct product vendors
    Vendors,
    /// List the distinct product tags
    Tags,
    /// List the store's sales channels
    Publications,
    /// Count products matching the filters
    Count {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Export products matching the filters to an .xlsx file
    Export(ExportArgs),
}

/// Domain, token and API version after applying flag overrides.
#[derive(Debug)]
struct Credentials {
    shop: String,
    token: String,
    api_version: String,
}

fn resolve_credentials(
    cli: &Cli,
    config: &shopex_core::AppConfig,
) -> anyhow::Result<Credentials> {
    let shop = cli
        .shop
        .clone()
        .or_else(|| config.shop_domain.clone())
        .filter(|s| !s.trim().is_empty());
    let token = cli
        .token
        .clone()
        .or_else(|| config.access_token.clone())
        .filter(|s| !s.trim().is_empty());

    match (shop, token) {
        (Some(shop), Some(token)) => Ok(Credentials {
            shop,
            token,
            api_version: cli
                .api_version
                .clone()
                .unwrap_or_else(|| config.api_version.clone()),
        }),
        _ => anyhow::bail!(
            "both a shop domain and an access token are required: pass --shop and --token \
             or set SHOPEX_SHOP_DOMAIN and SHOPEX_ACCESS_TOKEN"
        ),
    }
}

fn build_client(
    credentials: &Credentials,
    config: &shopex_core::AppConfig,
) -> anyhow::Result<shopex_client::ShopifyClient> {
    shopex_client::ShopifyClient::new(
        &credentials.shop,
        &credentials.token,
        &credentials.api_version,
        shopex_client::ClientSettings::from(config),
    )
    .map_err(|e| anyhow::anyhow!("failed to build Shopify client: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shopex_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let credentials = resolve_credentials(&cli, &config)?;
    let client = build_client(&credentials, &config)?;

    match cli.command {
        Commands::Validate => lookup::run_validate(&client).await,
        Commands::Vendors => lookup::run_vendors(&client).await,
        Commands::Tags => lookup::run_tags(&client).await,
        Commands::Publications => lookup::run_publications(&client).await,
        Commands::Count { filters } => {
            lookup::run_count(&client, &filters.apply(shopex_core::ProductFilters::default()))
                .await
        }
        Commands::Export(args) => export::run_export(&client, &args).await,
    }
}
