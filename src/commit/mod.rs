pub mod vcs;

use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;

use crate::auth::validate::{require, validate_agenda_filename, validate_initials, validate_user_id};
use crate::errors::AppError;
use crate::models::agenda::{self, AgendaItem, PriorMinutes, patch};
use crate::models::pending::{Pending, PendingStore};

pub use vcs::{CommitOutput, Credentials, Subversion, VersionControl};

const GENERIC_FAILURE: &str = "svn commit failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStage {
    Idle,
    Locked,
    Synced,
    Patched,
    Written,
    Committed,
    Cleared,
}

impl fmt::Display for CommitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommitStage::Idle => "idle",
            CommitStage::Locked => "locked",
            CommitStage::Synced => "synced",
            CommitStage::Patched => "patched",
            CommitStage::Written => "written",
            CommitStage::Committed => "committed",
            CommitStage::Cleared => "cleared",
        };
        f.write_str(name)
    }
}

/// Who is committing, and how.
#[derive(Debug, Clone)]
pub struct CommitRequest<'a> {
    pub user: &'a str,
    /// Empty means the initials stored with the pending session.
    pub initials: &'a str,
    pub message: &'a str,
    pub credentials: Option<&'a Credentials>,
}

/// The cleared pending session and the agenda as committed.
#[derive(Debug, Clone, Serialize)]
pub struct CommitOutcome {
    pub pending: Pending,
    pub agenda: Vec<AgendaItem>,
}

/// Sync, patch, write and commit of an agenda, all under an exclusive lock
/// on the agenda file. The lock goes away with the file handle.
pub struct CommitCoordinator<V, S, M> {
    board_dir: PathBuf,
    vcs: V,
    store: S,
    minutes: M,
}

impl<V, S, M> CommitCoordinator<V, S, M>
where
    V: VersionControl,
    S: PendingStore,
    M: PriorMinutes,
{
    pub fn new(board_dir: impl Into<PathBuf>, vcs: V, store: S, minutes: M) -> Self {
        CommitCoordinator {
            board_dir: board_dir.into(),
            vcs,
            store,
            minutes,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Resolve an agenda filename inside the board directory.
    pub fn agenda_path(&self, agenda: &str) -> Result<PathBuf, AppError> {
        require(validate_agenda_filename(agenda))?;
        Ok(self.board_dir.join(agenda))
    }

    /// Parse an agenda from the board directory.
    pub fn read_agenda(&self, agenda: &str) -> Result<Vec<AgendaItem>, AppError> {
        let text = fs::read_to_string(self.agenda_path(agenda)?)?;
        Ok(agenda::parse(&text, &self.minutes))
    }

    /// Merge the user's pending edits into the agenda and commit them.
    ///
    /// On failure the pending session is left as it was, so the same edits
    /// can be committed again.
    pub fn commit(&self, request: &CommitRequest<'_>) -> Result<CommitOutcome, AppError> {
        require(validate_user_id(request.user))?;
        if request.message.trim().is_empty() {
            return Err(AppError::InvalidInput("Commit message is required".to_string()));
        }

        let mut pending = self.store.get(request.user)?;
        let initials = match request.initials.trim() {
            "" => pending.initials.clone().unwrap_or_default(),
            given => given.to_string(),
        };
        require(validate_initials(&initials))?;
        let path = self.agenda_path(&pending.agenda)?;

        let mut stage = CommitStage::Idle;
        let committed = self
            .critical_section(&path, &mut pending, request, &initials, &mut stage)
            .inspect_err(|e| log::error!("Commit of {} failed after stage {stage}: {e}", path.display()))?;

        Ok(CommitOutcome {
            pending,
            agenda: agenda::parse(&committed, &self.minutes),
        })
    }

    fn critical_section(
        &self,
        path: &Path,
        pending: &mut Pending,
        request: &CommitRequest<'_>,
        initials: &str,
        stage: &mut CommitStage,
    ) -> Result<String, AppError> {
        let file = File::open(path)?;
        file.lock_exclusive()?;
        advance(stage, CommitStage::Locked, path);

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        self.vcs.cleanup(dir)?;
        self.vcs.update(path)?;
        self.vcs.revert(path)?;
        advance(stage, CommitStage::Synced, path);

        let text = fs::read_to_string(path)?;
        let patched = patch::apply(&text, &pending.approved, &pending.comments, initials);
        advance(stage, CommitStage::Patched, path);

        fs::write(path, &patched)?;
        advance(stage, CommitStage::Written, path);

        let result = self.vcs.commit(path, request.message, request.credentials)?;
        if !result.success() {
            let output = result.output.trim();
            return Err(AppError::CommitFailed(if output.is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                output.to_string()
            }));
        }
        advance(stage, CommitStage::Committed, path);
        log::info!("{} committed {}: {}", request.user, path.display(), request.message);

        self.clear_pending(request.user, pending).inspect_err(|e| {
            log::error!(
                "{} is committed but the pending session of {} was not cleared: {e}. \
                 Committing the same session again is safe, its edits apply only once",
                path.display(),
                request.user
            )
        })?;
        advance(stage, CommitStage::Cleared, path);

        let committed = fs::read_to_string(path)?;
        drop(file);
        Ok(committed)
    }

    fn clear_pending(&self, user: &str, pending: &mut Pending) -> Result<(), AppError> {
        self.store.archive(user)?;
        pending.clear();
        self.store.put(user, pending)
    }
}

fn advance(stage: &mut CommitStage, next: CommitStage, path: &Path) {
    log::debug!("{}: {} -> {}", path.display(), stage, next);
    *stage = next;
}
