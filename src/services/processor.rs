use std::io::{Cursor, Read};

use base64::{engine::general_purpose, Engine as _};

use crate::error::Result;
use crate::models::FileRecord;
use crate::services::mime::mime_type_for;

/// An input file as selected by the user, before processing
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    /// MIME type declared by the source, when known
    pub declared_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            bytes,
        }
    }

    pub fn with_type(name: impl Into<String>, declared_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type.to_string()),
            bytes,
        }
    }
}

/// Flatten a batch of input files into upload-ready records.
///
/// A `.zip` input is expanded into one record per non-directory entry; any
/// other input yields a single record. Inputs are processed in order and
/// concatenated with no deduplication across sources. An unreadable archive
/// fails the whole batch.
pub fn process_files(inputs: Vec<InputFile>) -> Result<Vec<FileRecord>> {
    let mut processed = Vec::new();
    for input in inputs {
        if input.name.ends_with(".zip") {
            extract_zip(&input.bytes, &mut processed)?;
        } else {
            let mime_type = match input.declared_type {
                Some(t) if !t.is_empty() => t,
                _ => mime_type_for(&input.name).to_string(),
            };
            processed.push(FileRecord {
                path: input.name,
                content: general_purpose::STANDARD.encode(&input.bytes),
                mime_type,
                size: input.bytes.len() as i64,
            });
        }
    }
    Ok(processed)
}

/// Expand a zip archive into one record per non-directory entry
fn extract_zip(bytes: &[u8], out: &mut Vec<FileRecord>) -> Result<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let path = entry.name().to_string();
        let size = entry.size() as i64;

        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut buf)?;

        out.push(FileRecord {
            path: path.clone(),
            content: general_purpose::STANDARD.encode(&buf),
            mime_type: mime_type_for(&path).to_string(),
            size,
        });
    }
    Ok(())
}
