use std::fs;
use std::path::{Path, PathBuf};

use mailfold_core::{CandidateFile, Msg, EML_EXTENSION};
use mailfold_logging::client_warn;

/// Loads a dropped or picked path.
///
/// Only `.eml` files are read into memory; anything else can never be
/// uploaded, so it is passed on by name alone for the file source to reject.
pub fn load_candidate(path: &Path) -> Result<CandidateFile, Msg> {
    let name = display_name(path);
    if !name.ends_with(EML_EXTENSION) {
        return Ok(CandidateFile::new(name, Vec::new()));
    }
    match fs::read(path) {
        Ok(bytes) => Ok(CandidateFile::new(name, bytes)),
        Err(err) => {
            client_warn!("Failed to read {:?}: {}", path, err);
            Err(Msg::FileUnreadable {
                name,
                reason: err.to_string(),
            })
        }
    }
}

/// Turns a drop of several paths into messages for the state machine.
///
/// Only the first `.eml` path is read; the rest of the drop is ignored. A drop
/// without any `.eml` is forwarded by name so the file source can reject it.
pub fn drop_messages(paths: &[PathBuf]) -> Vec<Msg> {
    let first_eml = paths
        .iter()
        .find(|path| display_name(path).ends_with(EML_EXTENSION));
    let Some(path) = first_eml else {
        let names = paths
            .iter()
            .map(|path| CandidateFile::new(display_name(path), Vec::new()))
            .collect();
        return vec![Msg::FilesDropped(names)];
    };
    match load_candidate(path) {
        Ok(file) => vec![Msg::FilesDropped(vec![file])],
        Err(msg) => vec![msg],
    }
}

pub fn pick_message(path: &Path) -> Msg {
    match load_candidate(path) {
        Ok(file) => Msg::FilePicked(Some(file)),
        Err(msg) => msg,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
