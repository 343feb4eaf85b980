use std::path::{Path, PathBuf};

use crate::api::UploadApi;
use crate::categories;
use crate::error::{Result, SatchelError};
use crate::models::{Batch, TxnType};

pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx"];

/// Soft guidance only; the server enforces its own limit.
pub const SOFT_SIZE_LIMIT_BYTES: u64 = 10 * 1024 * 1024;

const PREVIEW_FALLBACK: &str = "Failed to process file. Please try again.";
const IMPORT_FALLBACK: &str = "Failed to import transactions. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    FileSelected,
    PreviewLoading,
    PreviewReady,
    Confirming,
    Done,
}

impl UploadState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "no file is selected",
            Self::FileSelected => "the file has not been previewed",
            Self::PreviewLoading => "the preview request is in flight",
            Self::PreviewReady => "the preview is awaiting confirmation",
            Self::Confirming => "the import request is in flight",
            Self::Done => "the import has completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl CandidateFile {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(SatchelError::InvalidFileType(ext));
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        // Size is display-only; a stat failure surfaces later as an IO error
        // when the file is actually read for upload.
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size,
        })
    }

    pub fn oversize(&self) -> bool {
        self.size > SOFT_SIZE_LIMIT_BYTES
    }
}

/// Row counts reported after a successful preview. Derived from the
/// populated batch, not echoed from the server's own counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSummary {
    pub total: usize,
    pub needs_review: usize,
}

/// The upload-preview/import controller: select a file, fetch the server's
/// parse+categorization preview, apply per-row corrections, then confirm
/// the full batch. All operations are validated against the current state;
/// at most one network call is ever in flight.
pub struct UploadWorkflow<A: UploadApi> {
    api: A,
    state: UploadState,
    file: Option<CandidateFile>,
    batch: Batch,
    on_complete: Option<Box<dyn FnMut(usize)>>,
}

impl<A: UploadApi> UploadWorkflow<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: UploadState::Idle,
            file: None,
            batch: Batch::default(),
            on_complete: None,
        }
    }

    /// Register a callback invoked exactly once per successful import,
    /// with the number of imported rows.
    pub fn on_complete(mut self, callback: impl FnMut(usize) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn file(&self) -> Option<&CandidateFile> {
        self.file.as_ref()
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    fn require(&self, expected: UploadState, op: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SatchelError::InvalidState {
                op,
                state: self.state.name(),
            })
        }
    }

    /// Select (or replace) the candidate file. Rejects extensions outside
    /// {csv, xls, xlsx} with no state change.
    pub fn select_file(&mut self, path: &Path) -> Result<()> {
        match self.state {
            UploadState::Idle | UploadState::FileSelected => {}
            _ => {
                return Err(SatchelError::InvalidState {
                    op: "select a file",
                    state: self.state.name(),
                })
            }
        }
        let candidate = CandidateFile::from_path(path)?;
        self.file = Some(candidate);
        self.state = UploadState::FileSelected;
        Ok(())
    }

    /// Send the selected file to the preview endpoint and populate the
    /// batch. On failure the state returns to `FileSelected` with the file
    /// still selected for retry.
    pub fn request_preview(&mut self) -> Result<PreviewSummary> {
        self.require(UploadState::FileSelected, "request a preview")?;
        let Some(file) = self.file.clone() else {
            return Err(SatchelError::Other("no file selected".to_string()));
        };
        self.state = UploadState::PreviewLoading;
        match self.api.preview(&file.path) {
            Ok(resp) => {
                self.batch = Batch::new(resp.preview);
                self.state = UploadState::PreviewReady;
                Ok(PreviewSummary {
                    total: self.batch.len(),
                    needs_review: self.batch.needs_review_count(),
                })
            }
            Err(err) => {
                self.state = UploadState::FileSelected;
                Err(match err {
                    SatchelError::PreviewFailed(detail) => SatchelError::PreviewFailed(detail),
                    _ => SatchelError::PreviewFailed(PREVIEW_FALLBACK.to_string()),
                })
            }
        }
    }

    /// Change a row's category. Unknown ids are a silent no-op; a category
    /// not valid for the row's current type is rejected.
    pub fn update_row_category(&mut self, id: &str, category: &str) -> Result<()> {
        self.require(UploadState::PreviewReady, "edit rows")?;
        let Some(row) = self.batch.get_mut(id) else {
            return Ok(());
        };
        if !categories::is_valid_for(category, row.suggested_type) {
            return Err(SatchelError::UnknownCategory(category.to_string()));
        }
        row.suggested_category = category.to_string();
        Ok(())
    }

    /// Change a row's type. The category is kept as-is and must be
    /// re-selected by the user if it is not valid for the new type; see
    /// `Batch::rows_with_invalid_category`.
    pub fn update_row_type(&mut self, id: &str, txn_type: TxnType) -> Result<()> {
        self.require(UploadState::PreviewReady, "edit rows")?;
        if let Some(row) = self.batch.get_mut(id) {
            row.suggested_type = txn_type;
        }
        Ok(())
    }

    /// Submit the full edited batch to the confirm endpoint. On success the
    /// file and batch are cleared and the completion callback fires once.
    /// On failure the batch is preserved unmodified for retry.
    pub fn confirm_import(&mut self) -> Result<usize> {
        self.require(UploadState::PreviewReady, "confirm the import")?;
        self.state = UploadState::Confirming;
        match self.api.confirm(self.batch.rows()) {
            Ok(()) => {
                let imported = self.batch.len();
                self.batch.clear();
                self.file = None;
                self.state = UploadState::Done;
                if let Some(callback) = self.on_complete.as_mut() {
                    callback(imported);
                }
                Ok(imported)
            }
            Err(err) => {
                self.state = UploadState::PreviewReady;
                Err(match err {
                    SatchelError::ImportFailed(detail) => SatchelError::ImportFailed(detail),
                    _ => SatchelError::ImportFailed(IMPORT_FALLBACK.to_string()),
                })
            }
        }
    }

    /// Discard the preview batch and return to `FileSelected`, keeping the
    /// file so it can be re-previewed or replaced.
    pub fn go_back(&mut self) -> Result<()> {
        self.require(UploadState::PreviewReady, "go back")?;
        self.batch.clear();
        self.state = UploadState::FileSelected;
        Ok(())
    }

    /// Abandon the session entirely: clear file and batch, return to `Idle`.
    pub fn cancel(&mut self) -> Result<()> {
        match self.state {
            UploadState::PreviewLoading | UploadState::Confirming => Err(SatchelError::InvalidState {
                op: "cancel",
                state: self.state.name(),
            }),
            _ => {
                self.file = None;
                self.batch.clear();
                self.state = UploadState::Idle;
                Ok(())
            }
        }
    }
}
