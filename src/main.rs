mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use ods_catalog::catalog::{
    CatalogRegistry, GetResourceContext, ListContext, ODS_CATALOG, PrepareContext,
};
use ods_catalog::config::Config;
use ods_catalog::lister::ListParams;
use ods_catalog::models::ImportConfig;
use ods_catalog::observability::init_tracing;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::load_unvalidated()?;
    if let Some(url) = cli.url {
        config.catalog.url = url;
    }
    config.validate()?;

    let registry = CatalogRegistry::with_defaults(&config)?;
    let plugin = registry.get(ODS_CATALOG)?;
    let catalog_config = config.catalog.clone();

    let output = match cli.command {
        Commands::Prepare => {
            let prepared = plugin.prepare(PrepareContext { catalog_config }).await?;
            serde_json::to_string_pretty(&prepared)?
        }
        Commands::List(args) => {
            let params = ListParams {
                q: args.q,
                size: args.size,
                page: args.page,
            };
            let page = plugin
                .list_resources(ListContext {
                    catalog_config,
                    params,
                })
                .await?;
            serde_json::to_string_pretty(&page)?
        }
        Commands::Get(args) => {
            let import_config: ImportConfig = match args.import_config {
                Some(path) => serde_json::from_str(&tokio::fs::read_to_string(path).await?)?,
                None => ImportConfig::default(),
            };
            let ctx = GetResourceContext::builder()
                .catalog_config(catalog_config)
                .resource_id(args.resource_id)
                .import_config(import_config)
                .tmp_dir(args.tmp_dir)
                .build();
            let resource = plugin.get_resource(ctx).await?;
            serde_json::to_string_pretty(&resource)?
        }
    };

    println!("{output}");
    Ok(())
}
