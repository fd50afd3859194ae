use crate::errors::AppError;

/// Resolves the prior-meeting report reference for a back-section title.
pub trait PriorMinutes {
    fn lookup(&self, title: &str) -> Result<Option<String>, AppError>;
}

/// Links each section title to its page in the board minutes archive.
#[derive(Debug, Clone)]
pub struct MinutesArchive {
    pub base_url: String,
}

impl MinutesArchive {
    pub fn new(base_url: impl Into<String>) -> Self {
        MinutesArchive { base_url: base_url.into() }
    }
}

impl PriorMinutes for MinutesArchive {
    fn lookup(&self, title: &str) -> Result<Option<String>, AppError> {
        if self.base_url.is_empty() {
            return Ok(None);
        }
        let slug: String = title
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        Ok(Some(format!("{}/{}", self.base_url.trim_end_matches('/'), slug)))
    }
}

/// No prior-minutes enrichment at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMinutes;

impl PriorMinutes for NoMinutes {
    fn lookup(&self, _title: &str) -> Result<Option<String>, AppError> {
        Ok(None)
    }
}
