use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use crate::errors::AppError;

/// Credentials passed through to the commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Exit status and combined stdout/stderr of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutput {
    pub status: i32,
    pub output: String,
}

impl CommitOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// The version-controlled store holding the agenda.
pub trait VersionControl {
    fn cleanup(&self, dir: &Path) -> Result<(), AppError>;
    fn update(&self, path: &Path) -> Result<(), AppError>;
    fn revert(&self, path: &Path) -> Result<(), AppError>;
    fn commit(
        &self,
        path: &Path,
        message: &str,
        credentials: Option<&Credentials>,
    ) -> Result<CommitOutput, AppError>;
}

/// Subversion working copy driven through the `svn` command line client.
#[derive(Debug, Clone)]
pub struct Subversion {
    bin: String,
}

impl Subversion {
    pub fn new(bin: impl Into<String>) -> Self {
        Subversion { bin: bin.into() }
    }

    fn run<I, S>(&self, args: I) -> Result<Output, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(&self.bin)
            .args(args)
            .output()
            .map_err(|e| AppError::Vcs(format!("failed to run {}: {e}", self.bin)))
    }

    /// Working-copy maintenance; a failure is logged and otherwise ignored.
    fn sync(&self, action: &str, target: &Path) -> Result<(), AppError> {
        let output = self.run([OsStr::new(action), target.as_os_str()])?;
        if !output.status.success() {
            log::warn!(
                "svn {action} {} exited with {}: {}",
                target.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

impl Default for Subversion {
    fn default() -> Self {
        Subversion::new("svn")
    }
}

impl VersionControl for Subversion {
    fn cleanup(&self, dir: &Path) -> Result<(), AppError> {
        self.sync("cleanup", dir)
    }

    fn update(&self, path: &Path) -> Result<(), AppError> {
        self.sync("up", path)
    }

    fn revert(&self, path: &Path) -> Result<(), AppError> {
        self.sync("revert", path)
    }

    fn commit(
        &self,
        path: &Path,
        message: &str,
        credentials: Option<&Credentials>,
    ) -> Result<CommitOutput, AppError> {
        let mut args: Vec<&OsStr> = vec![
            OsStr::new("commit"),
            OsStr::new("-m"),
            OsStr::new(message),
            path.as_os_str(),
            OsStr::new("--no-auth-cache"),
            OsStr::new("--non-interactive"),
        ];
        if let Some(credentials) = credentials {
            args.extend([
                OsStr::new("--username"),
                OsStr::new(credentials.username.as_str()),
                OsStr::new("--password"),
                OsStr::new(credentials.password.as_str()),
            ]);
        }

        let output = self.run(args)?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommitOutput {
            status: output.status.code().unwrap_or(-1),
            output: combined,
        })
    }
}
