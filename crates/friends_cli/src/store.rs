//! Document file access.
//!
//! An absent document reads as empty text; writes create parent directories.

use log::debug;
use std::io::ErrorKind;
use std::path::Path;

pub fn load_document(path: &Path) -> std::io::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            debug!("event=document_load module=store status=ok bytes={}", text.len());
            Ok(text)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("event=document_load module=store status=ok missing=true");
            Ok(String::new())
        }
        Err(err) => Err(err),
    }
}

pub fn save_document(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    debug!("event=document_save module=store status=ok bytes={}", text.len());
    Ok(())
}
