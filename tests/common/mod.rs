//! Shared test infrastructure for agenda tests.
//!
//! - `AGENDA` - a small agenda document with every patchable block shape
//! - `setup_workspace()` - board and work directories in a temp dir
//! - `FakeVcs` - scripted stand-in for the Subversion client
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

use board_agenda::commit::{CommitCoordinator, CommitOutput, Credentials, VersionControl};
use board_agenda::errors::AppError;
use board_agenda::models::agenda::NoMinutes;
use board_agenda::models::pending::{Pending, PendingStore, YamlPendingStore};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const AGENDA_FILE: &str = "board_agenda_2024_03_20.txt";
pub const INITIALS: &str = "XY";

pub const AGENDA: &str = " 3. Minutes from previous meetings

    Published minutes can be found at:

        http://www.apache.org/foundation/board/calendar.html

    A. The meeting of February 21, 2024

       See: board_minutes_2024_02_21.txt

       [ February 21, 2024
         approved:
         comments:
         ]

 4. Executive Officer Reports

    A. President [Sally]

       See Attachment 1

       [ comments:
         ]

    B. Treasurer [Craig]

       See Attachment 2

       [ Treasurer.
         approved:
         comments:
         ]

 6. Reports from Apache Projects

    A. Apache Accumulo Project [Ed Coleman / Sam]

       See Attachment A

       [ Accumulo.
         approved: sr, jj
         comments:
         ]

    B. Apache Airflow Project [Jarek Potiuk / Rich]

       See Attachment B

       [ Airflow.
         approved:
         comments:
         ]

 7. Special Orders

 8. Discussion Items

    A. Budget review

 9. Review Outstanding Action Items

    * Sam: Follow up with Accumulo about the late report
          [ Accumulo 2024-01-17 ]
          Status:

    * Rich: Draft trademark guidance
          [ Legal ]
          Status: In progress

10. Unfinished Business

11. New Business

12. Announcements

13. Adjournment

    Scheduled to adjourn by 11:30am Pacific.

============
ATTACHMENTS:
============
";

// ============================================================================
// WORKSPACE SETUP
// ============================================================================

pub struct Workspace {
    pub dir: TempDir,
    pub board: PathBuf,
    pub work: PathBuf,
}

impl Workspace {
    pub fn agenda_path(&self) -> PathBuf {
        self.board.join(AGENDA_FILE)
    }

    pub fn agenda_text(&self) -> String {
        fs::read_to_string(self.agenda_path()).expect("read agenda")
    }

    pub fn store(&self) -> YamlPendingStore {
        YamlPendingStore::new(&self.work)
    }

    pub fn coordinator(&self, vcs: FakeVcs) -> CommitCoordinator<FakeVcs, YamlPendingStore, NoMinutes> {
        CommitCoordinator::new(&self.board, vcs, self.store(), NoMinutes)
    }

    /// Write a pending session for `user` against the test agenda.
    pub fn pending(&self, user: &str, approved: &[&str], comments: &[(&str, &str)]) -> Pending {
        let pending = Pending {
            agenda: AGENDA_FILE.to_string(),
            approved: approved.iter().map(|s| s.to_string()).collect(),
            comments: comments
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Pending::default()
        };
        self.store().put(user, &pending).expect("store pending");
        pending
    }
}

/// Temp dir with `board/<AGENDA_FILE>` and an empty `work/`.
pub fn setup_workspace() -> Workspace {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let board = dir.path().join("board");
    let work = dir.path().join("work");
    fs::create_dir_all(&board).expect("create board dir");
    fs::create_dir_all(&work).expect("create work dir");
    fs::write(board.join(AGENDA_FILE), AGENDA).expect("write agenda");
    Workspace { dir, board, work }
}

// ============================================================================
// FAKE VERSION CONTROL
// ============================================================================

/// Records every call; `revert` restores `pristine` when set, `commit`
/// answers with `result`.
pub struct FakeVcs {
    pub result: CommitOutput,
    pub pristine: Option<String>,
    pub calls: Mutex<Vec<String>>,
    pub credentials: Mutex<Option<Credentials>>,
}

impl FakeVcs {
    pub fn committing() -> Self {
        Self::answering(0, "Sending        board_agenda_2024_03_20.txt\nCommitted revision 42.\n")
    }

    pub fn answering(status: i32, output: &str) -> Self {
        FakeVcs {
            result: CommitOutput { status, output: output.to_string() },
            pristine: None,
            calls: Mutex::new(Vec::new()),
            credentials: Mutex::new(None),
        }
    }

    pub fn with_pristine(mut self, text: &str) -> Self {
        self.pristine = Some(text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

impl VersionControl for FakeVcs {
    fn cleanup(&self, _dir: &Path) -> Result<(), AppError> {
        self.record("cleanup");
        Ok(())
    }

    fn update(&self, _path: &Path) -> Result<(), AppError> {
        self.record("update");
        Ok(())
    }

    fn revert(&self, path: &Path) -> Result<(), AppError> {
        self.record("revert");
        if let Some(text) = &self.pristine {
            fs::write(path, text)?;
        }
        Ok(())
    }

    fn commit(
        &self,
        _path: &Path,
        message: &str,
        credentials: Option<&Credentials>,
    ) -> Result<CommitOutput, AppError> {
        self.record(&format!("commit {message}"));
        *self.credentials.lock().unwrap() = credentials.cloned();
        Ok(self.result.clone())
    }
}
