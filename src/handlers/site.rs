use std::path::Path;

use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};

/// Serve the pre-built site bundle. Paths with no matching file get `index.html`
/// so client-side routes (`/privacy`, `/terms`, ...) resolve.
pub fn static_site(dist_dir: &Path) -> Files {
    let index = dist_dir.join("index.html");
    Files::new("/", dist_dir)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(&index).await?;
                let res = file.into_response(&req);
                Ok(ServiceResponse::new(req, res))
            }
        }))
}
