//! Document assembly
//!
//! [`Catalog`] is the public face of the renderer. Each call builds one
//! document from scratch: validate the input, compose the pages item by item
//! (images are best-effort), serialize, and save once with an atomic rename.
//! A collection is raced against the overall time budget; when the budget
//! runs out nothing is written.

mod cover;
mod item;
mod naming;

pub use cover::{CoverContent, draw_cover};
pub use item::metadata_rows;
pub use naming::{collection_file_name, item_file_name, sanitize, today};

use crate::cancel::CancelToken;
use crate::canvas::{Canvas, PdfCanvas};
use crate::compose::{ComposerState, PageComposer};
use crate::flight::FlightGate;
use crate::loader::{HttpImageSource, ImageSource, ResourceLoader, resolve_url};
use crate::options::RenderConfig;
use crate::types::{
    CatalogError, CatalogItem, Collection, LoadedImage, RenderOptions, ResourceError, Result,
};
use item::ItemPainter;
use std::path::{Path, PathBuf};

/// Catalog renderer bound to one configuration and image source.
pub struct Catalog<S = HttpImageSource> {
    config: RenderConfig,
    loader: ResourceLoader<S>,
    gate: FlightGate,
}

impl Catalog<HttpImageSource> {
    /// Renderer fetching images over HTTP
    pub fn new(config: RenderConfig) -> Self {
        Self::with_source(config, HttpImageSource::new())
    }
}

impl<S: ImageSource> Catalog<S> {
    pub fn with_source(config: RenderConfig, source: S) -> Self {
        let loader = ResourceLoader::new(source, config.max_image_dimension_px);
        Self {
            config,
            loader,
            gate: FlightGate::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn flight_gate(&self) -> &FlightGate {
        &self.gate
    }

    fn pdf_canvas(&self, title: &str) -> PdfCanvas {
        PdfCanvas::new(title, self.config.page_size_pt(), self.config.theme.paper)
    }

    /// Render a cover page plus one page per item and save it as
    /// `<Name>_Collection_<date>.pdf` in the output directory.
    pub async fn generate_collection_document(
        &self,
        name: &str,
        items: &[CatalogItem],
        options: RenderOptions,
    ) -> Result<PathBuf> {
        let canvas = self.pdf_canvas(&format!("{} Collection", name));
        self.generate_collection_into(canvas, name, items, options).await
    }

    pub async fn generate_collection(
        &self,
        collection: &Collection,
        options: RenderOptions,
    ) -> Result<PathBuf> {
        self.generate_collection_document(&collection.name, &collection.items, options)
            .await
    }

    /// Render a one-page spec sheet for `item` and save it as
    /// `<Name>_<date>.pdf` in the output directory.
    pub async fn generate_single_item_document(
        &self,
        item: &CatalogItem,
        options: RenderOptions,
    ) -> Result<PathBuf> {
        let canvas = self.pdf_canvas(&item.name);
        self.generate_single_item_into(canvas, item, options).await
    }

    /// [`generate_collection_document`](Self::generate_collection_document)
    /// on a caller-supplied canvas
    pub async fn generate_collection_into<C: Canvas + Send + 'static>(
        &self,
        canvas: C,
        name: &str,
        items: &[CatalogItem],
        options: RenderOptions,
    ) -> Result<PathBuf> {
        if items.is_empty() {
            log::warn!("Refusing to render empty collection '{}'", name);
            return Err(CatalogError::EmptyInput);
        }
        let _flight = self
            .gate
            .try_acquire(flight_key("collection", name, items, options))?;

        log::info!(
            "Generating collection '{}' with {} items",
            name,
            items.len()
        );
        let cancel = CancelToken::new();
        let budget = self.config.overall_timeout();

        let work = async {
            let mut canvas = canvas;
            self.render_collection(&mut canvas, name, items, options, &cancel).await?;
            serialize(canvas).await
        };

        let bytes = match tokio::time::timeout(budget, work).await {
            Ok(result) => result?,
            Err(_) => {
                cancel.cancel();
                log::error!(
                    "Collection '{}' not finished within {:?}, nothing saved",
                    name,
                    budget
                );
                return Err(CatalogError::OverallTimeout(budget));
            }
        };

        let path = self
            .config
            .output_dir
            .join(collection_file_name(name, today()));
        write_atomic(&path, &bytes).await?;
        log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// [`generate_single_item_document`](Self::generate_single_item_document)
    /// on a caller-supplied canvas
    pub async fn generate_single_item_into<C: Canvas + Send + 'static>(
        &self,
        canvas: C,
        item: &CatalogItem,
        options: RenderOptions,
    ) -> Result<PathBuf> {
        let _flight = self.gate.try_acquire(flight_key(
            "item",
            &item.name,
            std::slice::from_ref(item),
            options,
        ))?;

        log::info!("Generating spec sheet for '{}'", item.name);
        let cancel = CancelToken::new();
        let mut canvas = canvas;
        self.render_single_item(&mut canvas, item, options, &cancel).await?;
        let bytes = serialize(canvas).await?;

        let path = self
            .config
            .output_dir
            .join(item_file_name(&item.name, today()));
        write_atomic(&path, &bytes).await?;
        log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Draw the collection onto `canvas` without saving. Returns the number
    /// of pages composed.
    pub async fn render_collection<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        name: &str,
        items: &[CatalogItem],
        options: RenderOptions,
        cancel: &CancelToken,
    ) -> Result<usize> {
        if items.is_empty() {
            return Err(CatalogError::EmptyInput);
        }

        let mut composer = PageComposer::new(&*canvas, &self.config, items.len() + 1);
        let geo = composer.geometry();

        let ctx = composer.enter(canvas, ComposerState::Cover);
        let content = CoverContent {
            name,
            item_count: items.len(),
            date: today(),
        };
        draw_cover(canvas, ctx, &geo, &content, &self.config, options);

        let painter = ItemPainter {
            geo,
            config: &self.config,
            options,
        };
        for (index, item) in items.iter().enumerate() {
            cancel.check()?;
            let image = self.item_image(item, cancel).await?;
            let ctx = composer.enter(canvas, ComposerState::ItemPage(index + 1));
            painter.paint(canvas, ctx, item, image.as_ref(), cancel)?;
        }

        Ok(composer.finish(canvas))
    }

    /// Draw a single item onto `canvas` without saving.
    pub async fn render_single_item<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        item: &CatalogItem,
        options: RenderOptions,
        cancel: &CancelToken,
    ) -> Result<usize> {
        let mut composer = PageComposer::new(&*canvas, &self.config, 1);
        let painter = ItemPainter {
            geo: composer.geometry(),
            config: &self.config,
            options,
        };

        let image = self.item_image(item, cancel).await?;
        let ctx = composer.enter(canvas, ComposerState::ItemPage(1));
        painter.paint(canvas, ctx, item, image.as_ref(), cancel)?;

        Ok(composer.finish(canvas))
    }

    /// The item's image, or `None` when it has none or it failed to load.
    /// Only cancellation is an error.
    async fn item_image(
        &self,
        item: &CatalogItem,
        cancel: &CancelToken,
    ) -> Result<Option<LoadedImage>> {
        let Some(url) = item
            .image_ref()
            .and_then(|r| resolve_url(r, &self.config.api_base_url))
        else {
            return Ok(None);
        };

        match self
            .loader
            .load_image(&url, self.config.image_timeout(), cancel)
            .await
        {
            Ok(image) => Ok(Some(image)),
            Err(ResourceError::Cancelled) => Err(CatalogError::Cancelled),
            Err(e) => {
                log::warn!(
                    "Rendering item '{}' without image ({:?}): {}",
                    item.id,
                    e.kind(),
                    e
                );
                Ok(None)
            }
        }
    }
}

/// Identity of a generation request for the single-flight gate
fn flight_key(kind: &str, name: &str, items: &[CatalogItem], options: RenderOptions) -> String {
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    format!(
        "{}|{}|{}|watermark={}",
        kind,
        name,
        ids.join(","),
        options.with_watermark
    )
}

async fn serialize<C: Canvas + Send + 'static>(canvas: C) -> Result<Vec<u8>> {
    // Serialization is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || canvas.save()).await??;
    Ok(bytes)
}

/// Write to a `.part` sibling and rename into place
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    tokio::fs::write(&part, bytes).await?;
    if let Err(e) = tokio::fs::rename(&part, path).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(e.into());
    }
    Ok(())
}
