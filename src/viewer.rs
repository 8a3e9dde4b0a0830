//! Server-rendered viewer page: picks one of four rendering strategies from
//! the share's MIME type and website flag, then renders it as plain HTML.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::ShareMetadata;

/// How a share's main content should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Sandboxed iframe hosting the uploaded site
    Website,
    /// Contained image with a zoom toggle
    Image,
    /// Native embedded document viewer with a download fallback
    Pdf,
    /// No preview; download only
    Unsupported,
}

impl RenderStrategy {
    /// Select a strategy once from (MIME type, website flag)
    pub fn select(mime_type: &str, is_website: bool) -> Self {
        if is_website {
            RenderStrategy::Website
        } else if mime_type.starts_with("image/") {
            RenderStrategy::Image
        } else if mime_type == "application/pdf" {
            RenderStrategy::Pdf
        } else {
            RenderStrategy::Unsupported
        }
    }
}

/// Render the viewer page for a share. Pure function of (metadata, MIME type,
/// content URL).
pub fn render_view_page(meta: &ShareMetadata, mime_type: &str, content_url: &str) -> String {
    let strategy = RenderStrategy::select(mime_type, meta.is_website);
    let title = encode_text(&meta.title);
    let title_attr = encode_double_quoted_attribute(&meta.title);
    let url = encode_double_quoted_attribute(content_url);

    let body = match strategy {
        RenderStrategy::Website => format!(
            concat!(
                r#"<div class="frame-wrap"><div id="spinner" class="spinner">Loading…</div>"#,
                r#"<iframe src="{url}" title="{title_attr}" "#,
                r#"sandbox="allow-scripts allow-same-origin allow-forms" "#,
                r#"onload="document.getElementById('spinner').hidden=true" "#,
                r#"onerror="document.getElementById('spinner').textContent='Failed to load'">"#,
                r#"</iframe></div>"#
            ),
            url = url,
            title_attr = title_attr,
        ),
        RenderStrategy::Image => format!(
            concat!(
                r#"<div id="stage" class="stage" onclick="this.classList.toggle('zoomed')">"#,
                r#"<img src="{url}" alt="{title_attr}" "#,
                r#"onerror="document.getElementById('stage').textContent='Failed to load'">"#,
                r#"</div>"#
            ),
            url = url,
            title_attr = title_attr,
        ),
        RenderStrategy::Pdf => format!(
            concat!(
                r#"<object data="{url}" type="application/pdf" class="doc">"#,
                r#"<p>This browser does not support PDFs. "#,
                r#"<a href="{url}" download="{title_attr}">Download instead.</a></p>"#,
                r#"</object>"#
            ),
            url = url,
            title_attr = title_attr,
        ),
        RenderStrategy::Unsupported => format!(
            concat!(
                r#"<div class="placeholder"><h2>Preview Not Available</h2>"#,
                r#"<p>No preview for "{mime}" files yet.</p>"#,
                r#"<a class="button" href="{url}" download="{title_attr}">Download File</a></div>"#
            ),
            mime = encode_text(mime_type),
            url = url,
            title_attr = title_attr,
        ),
    };

    page(&title, &format!(
        concat!(
            r#"<header><h1>{title}</h1>"#,
            r#"<p class="meta">{count} files · <a href="{url}" download="{title_attr}">Download</a></p>"#,
            r#"</header><main>{body}</main>"#
        ),
        title = title,
        title_attr = title_attr,
        count = meta.file_count,
        url = url,
        body = body,
    ))
}

/// Render the not-found page shown for unknown share identifiers
pub fn render_not_found() -> String {
    page(
        "Not Found",
        r#"<main class="placeholder"><h2>Sketch Not Found</h2><p><a href="/">Go Home</a></p></main>"#,
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!doctype html><html><head><meta charset=\"utf-8\">",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            "<title>{title}</title><style>{css}</style></head>",
            "<body>{body}</body></html>"
        ),
        title = title,
        css = PAGE_CSS,
        body = body,
    )
}

const PAGE_CSS: &str = concat!(
    "body{margin:0;font-family:sans-serif}",
    "header{padding:1rem;border-bottom:1px solid #ddd}",
    "main{height:80vh}",
    ".frame-wrap{position:relative;height:100%}",
    ".spinner{position:absolute;inset:0;display:flex;align-items:center;justify-content:center;background:#fff}",
    "iframe,object.doc{width:100%;height:100%;border:none}",
    ".stage{height:100%;display:flex;align-items:center;justify-content:center;cursor:zoom-in}",
    ".stage img{max-width:100%;max-height:70vh}",
    ".stage.zoomed{cursor:zoom-out;background:rgba(0,0,0,.4)}",
    ".stage.zoomed img{max-width:95vw;max-height:95vh}",
    ".placeholder{display:flex;flex-direction:column;align-items:center;justify-content:center;height:100%;text-align:center}",
);
