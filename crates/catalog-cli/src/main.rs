use anyhow::{Context, Result, bail};
use catalog_render::{Catalog, CatalogError, PaperSize, RenderConfig, RenderOptions};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "catalog", about = "Product catalog PDF generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a collection catalog: cover page plus one page per item
    Collection {
        /// Collection document (.json with name and items) or item records
        /// (.json array or .csv table)
        #[arg(short, long)]
        input: PathBuf,

        /// Collection name shown on the cover and used for the file name;
        /// required for bare item records
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a one-page spec sheet for a single item
    Item {
        /// Item records (.json array or .csv table)
        #[arg(short, long)]
        input: PathBuf,

        /// Item id to render (defaults to the first record)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Write the default configuration as JSON
    InitConfig {
        /// Destination file
        path: PathBuf,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Overlay the brand watermark
    #[arg(long)]
    watermark: bool,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to save the PDF into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Paper size, overriding the configuration
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    Letter,
    Legal,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl RenderArgs {
    async fn config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(paper) = self.paper {
            config.paper_size = paper.into();
        }
        config.validate()?;
        Ok(config)
    }

    fn options(&self) -> RenderOptions {
        RenderOptions {
            with_watermark: self.watermark,
        }
    }
}

/// Print the user-facing message before handing the error to anyhow
fn report(result: catalog_render::Result<PathBuf>) -> Result<PathBuf> {
    result.map_err(|e: CatalogError| {
        eprintln!("{}", e.user_message());
        anyhow::Error::new(e)
    })
}

async fn load_records(input: &Path) -> Result<Vec<catalog_render::CatalogItem>> {
    catalog_render::load_items(input)
        .await
        .with_context(|| format!("Failed to read items from {}", input.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Collection {
            input,
            name,
            render,
        } => {
            let collection = catalog_render::load_collection(&input, name.as_deref())
                .await
                .with_context(|| format!("Failed to read collection from {}", input.display()))?;
            let catalog = Catalog::new(render.config().await?);
            let path = report(
                catalog
                    .generate_collection(&collection, render.options())
                    .await,
            )?;
            println!(
                "Generated '{}' catalog with {} items → {}",
                collection.name,
                collection.items.len(),
                path.display()
            );
        }

        Commands::Item { input, id, render } => {
            let items = load_records(&input).await?;
            let item = match &id {
                Some(id) => items.iter().find(|item| &item.id == id),
                None => items.first(),
            };
            let Some(item) = item else {
                match id {
                    Some(id) => bail!("No item with id '{}' in {}", id, input.display()),
                    None => bail!("{} contains no items", input.display()),
                }
            };

            let catalog = Catalog::new(render.config().await?);
            let path = report(
                catalog
                    .generate_single_item_document(item, render.options())
                    .await,
            )?;
            println!("Generated spec sheet for '{}' → {}", item.name, path.display());
        }

        Commands::InitConfig { path } => {
            RenderConfig::default().save(&path).await?;
            log::info!("Wrote default configuration to {}", path.display());
            println!("Configuration → {}", path.display());
        }
    }

    Ok(())
}
