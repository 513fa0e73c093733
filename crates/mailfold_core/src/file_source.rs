use crate::SubmitError;

/// Suffix every uploadable file must carry. The match is case-sensitive.
pub const EML_EXTENSION: &str = ".eml";

/// A file offered by a drop or the picker. Lives for one submission attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn is_eml(&self) -> bool {
        self.name.ends_with(EML_EXTENSION)
    }
}

// File contents can be megabytes; keep them out of log lines.
impl std::fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Drop target with a picker fallback.
///
/// Picks exactly one file per interaction and hands it to the caller. The
/// enabled flag only drives rendering; the upload guard lives in the
/// coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    enabled: bool,
    dragging: bool,
}

impl Default for FileSource {
    fn default() -> Self {
        Self {
            enabled: true,
            dragging: false,
        }
    }
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// First `.eml` file of a drop wins; the rest are ignored.
    pub fn take_drop(&mut self, files: Vec<CandidateFile>) -> Result<CandidateFile, SubmitError> {
        self.dragging = false;
        files
            .into_iter()
            .find(CandidateFile::is_eml)
            .ok_or(SubmitError::InvalidFileType)
    }

    pub fn take_pick(&mut self, file: Option<CandidateFile>) -> Result<CandidateFile, SubmitError> {
        match file {
            Some(file) if file.is_eml() => Ok(file),
            _ => Err(SubmitError::InvalidFileType),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.dragging = false;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns true when the hover state actually changed.
    pub fn set_dragging(&mut self, dragging: bool) -> bool {
        let dragging = dragging && self.enabled;
        let changed = self.dragging != dragging;
        self.dragging = dragging;
        changed
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> CandidateFile {
        CandidateFile::new(name, name.as_bytes().to_vec())
    }

    #[test]
    fn drop_picks_first_eml_and_ignores_rest() {
        let mut source = FileSource::new();
        let picked = source
            .take_drop(vec![file("notes.txt"), file("a.eml"), file("b.eml")])
            .unwrap();
        assert_eq!(picked.name, "a.eml");
    }

    #[test]
    fn drop_without_eml_is_rejected() {
        let mut source = FileSource::new();
        assert_eq!(
            source.take_drop(vec![file("a.EML"), file("b.msg")]),
            Err(SubmitError::InvalidFileType)
        );
        assert_eq!(source.take_drop(Vec::new()), Err(SubmitError::InvalidFileType));
    }

    #[test]
    fn drop_clears_hover_state() {
        let mut source = FileSource::new();
        assert!(source.set_dragging(true));
        let _ = source.take_drop(vec![file("a.eml")]);
        assert!(!source.is_dragging());
    }

    #[test]
    fn disabled_source_shows_no_hover() {
        let mut source = FileSource::new();
        source.set_enabled(false);
        assert!(!source.set_dragging(true));
        assert!(!source.is_dragging());
    }

    #[test]
    fn picker_requires_eml() {
        let mut source = FileSource::new();
        assert_eq!(source.take_pick(None), Err(SubmitError::InvalidFileType));
        assert_eq!(
            source.take_pick(Some(file("mail.eml.txt"))),
            Err(SubmitError::InvalidFileType)
        );
        assert!(source.take_pick(Some(file("mail.eml"))).is_ok());
    }
}
