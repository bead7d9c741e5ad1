use std::path::PathBuf;

/// Which kind of source the user is about to submit for indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    File,
    Url,
}

/// One picked file: display name, size in bytes and where to read it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }
}

/// Ingestion selector: the active mode plus the input retained for each mode.
///
/// Switching modes keeps the other mode's input so the user can switch back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ingestion {
    mode: Mode,
    files: Vec<FileDescriptor>,
    url_input: String,
}

impl Ingestion {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub(crate) fn select_files(&mut self, files: Vec<FileDescriptor>) {
        self.files = files;
    }

    /// Removes the file at `index`. Returns `None` when out of range, otherwise
    /// whether the selection is now empty (the picker must be reset).
    pub(crate) fn remove_file(&mut self, index: usize) -> Option<bool> {
        if index >= self.files.len() {
            return None;
        }
        self.files.remove(index);
        Some(self.files.is_empty())
    }

    pub(crate) fn clear_files(&mut self) {
        self.files.clear();
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        self.url_input = text;
    }

    /// The URL as it would be submitted, or `None` when blank.
    pub(crate) fn submittable_url(&self) -> Option<String> {
        let trimmed = self.url_input.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub(crate) fn clear_url(&mut self) {
        self.url_input.clear();
    }
}
