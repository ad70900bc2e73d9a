use rocket::fs::NamedFile;
use std::path::Path;
use tracing::warn;

pub const INDEX_PAGE: &str = "index.html";
pub const DASHBOARD_PAGE: &str = "dashboard.html";

/// Open a page from the pages directory; `None` becomes a 404.
pub async fn serve_page(pages_dir: &Path, page: &str) -> Option<NamedFile> {
    let path = pages_dir.join(page);
    match NamedFile::open(&path).await {
        Ok(file) => Some(file),
        Err(e) => {
            warn!("Failed to open page {}: {}", path.display(), e);
            None
        }
    }
}
