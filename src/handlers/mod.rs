pub mod agenda_handlers;

use actix_web::web;

use crate::auth::middleware::{require_auth, require_json_content_type};
use crate::commit::VersionControl;
use crate::models::agenda::PriorMinutes;
use crate::models::pending::PendingStore;

/// Register the agenda routes for a coordinator built from `V`, `S` and `M`.
///
/// The coordinator itself must be registered as `web::Data` by the caller.
pub fn configure<V, S, M>(cfg: &mut web::ServiceConfig)
where
    V: VersionControl + Send + Sync + 'static,
    S: PendingStore + Send + Sync + 'static,
    M: PriorMinutes + Send + Sync + 'static,
{
    cfg.service(
        web::scope("")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .wrap(actix_web::middleware::from_fn(require_auth))
            .route("/pending", web::get().to(agenda_handlers::pending::<V, S, M>))
            .route("/agenda/commit", web::post().to(agenda_handlers::commit::<V, S, M>))
            .route("/agenda/{file}", web::get().to(agenda_handlers::show::<V, S, M>)),
    );
}
