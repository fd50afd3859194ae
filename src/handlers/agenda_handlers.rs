use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::session::{get_credentials, get_username};
use crate::commit::{CommitCoordinator, CommitRequest, VersionControl};
use crate::errors::AppError;
use crate::models::agenda::PriorMinutes;
use crate::models::pending::PendingStore;

/// JSON body of `POST /agenda/commit`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitForm {
    pub message: String,
    #[serde(default)]
    pub initials: String,
}

/// GET /agenda/{file}
/// Parsed back-section items of one agenda.
pub async fn show<V, S, M>(
    coordinator: web::Data<CommitCoordinator<V, S, M>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError>
where
    V: VersionControl + Send + Sync + 'static,
    S: PendingStore + Send + Sync + 'static,
    M: PriorMinutes + Send + Sync + 'static,
{
    let file = path.into_inner();
    let items = web::block(move || coordinator.read_agenda(&file)).await??;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /pending
/// The logged-in member's uncommitted approvals and comments.
pub async fn pending<V, S, M>(
    coordinator: web::Data<CommitCoordinator<V, S, M>>,
    session: Session,
) -> Result<HttpResponse, AppError>
where
    V: VersionControl + Send + Sync + 'static,
    S: PendingStore + Send + Sync + 'static,
    M: PriorMinutes + Send + Sync + 'static,
{
    let user = get_username(&session)?;
    let pending = web::block(move || coordinator.store().get(&user)).await??;
    Ok(HttpResponse::Ok().json(pending))
}

/// POST /agenda/commit
/// Merges the member's pending session into the agenda and commits it.
pub async fn commit<V, S, M>(
    coordinator: web::Data<CommitCoordinator<V, S, M>>,
    session: Session,
    body: web::Json<CommitForm>,
) -> Result<HttpResponse, AppError>
where
    V: VersionControl + Send + Sync + 'static,
    S: PendingStore + Send + Sync + 'static,
    M: PriorMinutes + Send + Sync + 'static,
{
    let user = get_username(&session)?;
    let credentials = get_credentials(&session);
    let form = body.into_inner();

    // the lock wait and svn calls block, keep them off the async workers
    let outcome = web::block(move || {
        coordinator.commit(&CommitRequest {
            user: &user,
            initials: form.initials.trim(),
            message: &form.message,
            credentials: credentials.as_ref(),
        })
    })
    .await??;

    Ok(HttpResponse::Ok().json(outcome))
}
