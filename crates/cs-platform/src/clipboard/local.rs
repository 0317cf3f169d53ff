use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use clipboard_rs::common::RustImage;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use tokio::task::spawn_blocking;
use tracing::trace;

use cs_core::ports::SystemClipboardPort;
use cs_core::{ClipboardContent, MimeType};

const TEXT_HTML: &str = "text/html";
const IMAGE_PNG: &str = "image/png";

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

/// The system clipboard through `clipboard-rs`.
///
/// Plain text and HTML use the dedicated accessors; every other type is read
/// and written as a raw buffer named by its MIME type. All calls run on the
/// blocking pool since the windowing system may stall.
pub struct LocalClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl LocalClipboard {
    pub fn new() -> Result<Self> {
        let context = map_clipboard_err(ClipboardContext::new())
            .context("ClipboardContext::new failed")?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }

    async fn with_context<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ClipboardContext) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        spawn_blocking(move || {
            let ctx = inner
                .lock()
                .map_err(|_| anyhow!("clipboard context lock poisoned"))?;
            f(&ctx)
        })
        .await
        .context("clipboard task panicked")?
    }
}

fn read_blocking(ctx: &ClipboardContext, mime: &MimeType) -> Result<Option<Vec<u8>>> {
    if mime.is_text_plain() {
        if !ctx.has(ContentFormat::Text) {
            return Ok(None);
        }
        return map_clipboard_err(ctx.get_text()).map(|text| Some(text.into_bytes()));
    }

    let essence = mime.essence();
    if essence == TEXT_HTML {
        if !ctx.has(ContentFormat::Html) {
            return Ok(None);
        }
        return map_clipboard_err(ctx.get_html()).map(|html| Some(html.into_bytes()));
    }

    let available = map_clipboard_err(ctx.available_formats())?;
    if available.iter().any(|format| format.eq_ignore_ascii_case(&essence)) {
        return map_clipboard_err(ctx.get_buffer(&essence)).map(Some);
    }

    // Some platforms only expose images as a decoded bitmap.
    if essence == IMAGE_PNG && ctx.has(ContentFormat::Image) {
        let image = map_clipboard_err(ctx.get_image())?;
        let png = map_clipboard_err(image.to_png())?;
        return Ok(Some(png.get_bytes().to_vec()));
    }

    Ok(None)
}

fn write_blocking(ctx: &ClipboardContext, content: &ClipboardContent) -> Result<()> {
    if content.mime.is_text_plain() {
        return map_clipboard_err(ctx.set_text(content.text_lossy()));
    }

    let essence = content.mime.essence();
    if essence == TEXT_HTML {
        return map_clipboard_err(ctx.set_html(content.text_lossy()));
    }
    map_clipboard_err(ctx.set_buffer(&essence, content.bytes.to_vec()))
}

#[async_trait]
impl SystemClipboardPort for LocalClipboard {
    async fn read_content(&self, mime: &MimeType) -> Result<Option<Bytes>> {
        let mime = mime.clone();
        let bytes = self
            .with_context(move |ctx| read_blocking(ctx, &mime))
            .await?;
        trace!(found = bytes.is_some(), "clipboard probe");
        Ok(bytes.filter(|b| !b.is_empty()).map(Bytes::from))
    }

    async fn write_content(&self, content: &ClipboardContent) -> Result<()> {
        let content = content.clone();
        self.with_context(move |ctx| write_blocking(ctx, &content))
            .await
            .context("write clipboard failed")
    }

    async fn clear(&self) -> Result<()> {
        self.with_context(|ctx| map_clipboard_err(ctx.clear()))
            .await
            .context("clear clipboard failed")
    }
}
