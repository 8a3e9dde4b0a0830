use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single uploaded file within a share
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    /// Relative path, unique within the share
    pub path: String,
    /// Base64-encoded payload
    pub content: String,
    /// MIME type, declared or inferred from the extension
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Byte length of the decoded payload
    pub size: i64,
}

/// Full share state as persisted: metadata plus the path -> file mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    pub id: String,
    pub title: String,
    /// Epoch milliseconds
    pub created_at: i64,
    pub file_count: i64,
    pub total_size: i64,
    pub is_website: bool,
    pub main_file: String,
    pub file_paths: Vec<String>,
    pub files: BTreeMap<String, FileRecord>,
}

impl ShareRecord {
    /// Merge a batch of files into the share, overwriting on path collision.
    ///
    /// `file_count` and `file_paths` are recomputed from the merged mapping;
    /// `total_size` grows by the batch's sizes even when an existing path is
    /// overwritten, matching the upload contract callers rely on.
    pub fn merge_files(&mut self, batch: Vec<FileRecord>) {
        let mut added = 0i64;
        for file in batch {
            added += file.size;
            self.files.insert(file.path.clone(), file);
        }
        self.file_paths = self.files.keys().cloned().collect();
        self.file_count = self.file_paths.len() as i64;
        self.total_size += added;
    }

    pub fn metadata(&self) -> ShareMetadata {
        ShareMetadata {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            file_count: self.file_count,
            total_size: self.total_size,
            is_website: self.is_website,
            main_file: self.main_file.clone(),
            file_paths: self.file_paths.clone(),
        }
    }
}

/// Share metadata as returned to clients (everything except `files`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareMetadata {
    pub id: String,
    pub title: String,
    pub created_at: i64,
    pub file_count: i64,
    pub total_size: i64,
    pub is_website: bool,
    pub main_file: String,
    pub file_paths: Vec<String>,
}

/// Caller-supplied metadata for share creation
#[derive(Debug, Default, Deserialize)]
pub struct CreateShareMetadata {
    pub id: Option<String>,
    pub title: Option<String>,
}

/// Request to create a share
#[derive(Debug, Deserialize)]
pub struct CreateShareRequest {
    #[serde(default)]
    pub metadata: CreateShareMetadata,
    pub files: Vec<FileRecord>,
}

/// Response to share creation
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Response to share deletion
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// Query parameters for share listing
/// GET /api/shares?ids=a,b,c or ?cursor=...&limit=...
#[derive(Debug, Default, Deserialize)]
pub struct ListSharesQuery {
    pub ids: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}

/// One page of share metadata
#[derive(Debug, Serialize)]
pub struct ShareListPage {
    pub items: Vec<ShareMetadata>,
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, size: i64) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            content: String::new(),
            mime_type: "text/plain".to_string(),
            size,
        }
    }

    fn empty_share() -> ShareRecord {
        ShareRecord {
            id: "s1".to_string(),
            title: "Test".to_string(),
            created_at: 0,
            file_count: 0,
            total_size: 0,
            is_website: false,
            main_file: "a.txt".to_string(),
            file_paths: vec![],
            files: BTreeMap::new(),
        }
    }

    #[test]
    fn merge_recomputes_count_and_paths() {
        let mut share = empty_share();
        share.merge_files(vec![record("a.txt", 3), record("b.txt", 5)]);

        assert_eq!(share.file_count, 2);
        assert_eq!(share.total_size, 8);
        assert_eq!(share.file_paths, vec!["a.txt", "b.txt"]);
        assert_eq!(share.files.len(), 2);
    }

    #[test]
    fn merge_overwrites_path_but_still_adds_size() {
        let mut share = empty_share();
        share.merge_files(vec![record("a.txt", 3)]);
        share.merge_files(vec![record("a.txt", 4)]);

        // One file, but total_size still accumulates both batches.
        assert_eq!(share.file_count, 1);
        assert_eq!(share.total_size, 7);
        assert_eq!(share.files["a.txt"].size, 4);
    }

    #[test]
    fn metadata_omits_files() {
        let mut share = empty_share();
        share.merge_files(vec![record("a.txt", 3)]);

        let meta = serde_json::to_value(share.metadata()).unwrap();
        assert!(meta.get("files").is_none());
        assert_eq!(meta["fileCount"], 1);
        assert_eq!(meta["filePaths"][0], "a.txt");
    }
}
