use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{
    CreateShareRequest, FileRecord, ListSharesQuery, ShareListPage, ShareMetadata, ShareRecord,
};
use crate::services::EntityStore;

/// Namespace for share records in the kv store
const SHARE_NS: &str = "share";

const DEFAULT_TITLE: &str = "My Sketch";
const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

pub struct ShareService;

impl ShareService {
    /// Create a new share from a processed file batch.
    ///
    /// Validates before any write: an empty batch or a first file without a
    /// path is rejected and the store is left untouched.
    pub async fn create_share(db: &Database, req: CreateShareRequest) -> Result<String> {
        if req.files.is_empty() {
            return Err(AppError::BadRequest("No files provided".to_string()));
        }
        if req.files[0].path.is_empty() {
            return Err(AppError::BadRequest("First file has no path".to_string()));
        }

        let id = match req.metadata.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::new_v4().to_string(),
        };
        let title = match req.metadata.title {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_TITLE.to_string(),
        };

        let is_website = req
            .files
            .iter()
            .any(|f| f.path.eq_ignore_ascii_case("index.html"));
        let main_file = if is_website {
            "index.html".to_string()
        } else {
            req.files[0].path.clone()
        };

        // Aggregates start at zero; the merge below brings them up to date.
        let mut record = ShareRecord {
            id: id.clone(),
            title,
            created_at: Utc::now().timestamp_millis(),
            file_count: 0,
            total_size: 0,
            is_website,
            main_file,
            file_paths: Vec::new(),
            files: BTreeMap::new(),
        };
        record.merge_files(req.files);

        EntityStore::put(db, SHARE_NS, &id, &record).await?;
        tracing::info!(share_id = %id, files = record.file_count, "Share created");
        Ok(id)
    }

    /// Merge additional files into an existing share
    pub async fn add_files(db: &Database, id: &str, batch: Vec<FileRecord>) -> Result<()> {
        let mut record: ShareRecord = EntityStore::get(db, SHARE_NS, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Share not found".to_string()))?;
        record.merge_files(batch);
        EntityStore::put(db, SHARE_NS, id, &record).await
    }

    /// Get share metadata (everything except the file contents)
    pub async fn get_metadata(db: &Database, id: &str) -> Result<ShareMetadata> {
        let record: ShareRecord = EntityStore::get(db, SHARE_NS, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Share not found".to_string()))?;
        Ok(record.metadata())
    }

    /// List shares, either a cursored page or filtered by explicit ids.
    ///
    /// The ids mode silently omits identifiers with no record and never
    /// returns a cursor.
    pub async fn list_shares(db: &Database, query: ListSharesQuery) -> Result<ShareListPage> {
        if let Some(ids) = query.ids {
            let mut items = Vec::new();
            for id in ids.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if let Some(record) = EntityStore::get::<ShareRecord>(db, SHARE_NS, id).await? {
                    items.push(record.metadata());
                }
            }
            return Ok(ShareListPage { items, next: None });
        }

        let limit = (query.limit.unwrap_or(DEFAULT_PAGE_SIZE as u32) as i64).clamp(1, MAX_PAGE_SIZE);
        let (records, next) = EntityStore::list_page::<ShareRecord>(
            db,
            SHARE_NS,
            query.cursor.as_deref(),
            limit,
        )
        .await?;

        let items = records.iter().map(ShareRecord::metadata).collect();
        Ok(ShareListPage { items, next })
    }

    /// Get a single file record from a share
    pub async fn get_file(db: &Database, id: &str, path: &str) -> Result<FileRecord> {
        let record: ShareRecord = EntityStore::get(db, SHARE_NS, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Share not found".to_string()))?;
        record
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }

    /// Delete a share wholesale
    pub async fn delete_share(db: &Database, id: &str) -> Result<()> {
        if !EntityStore::delete(db, SHARE_NS, id).await? {
            return Err(AppError::NotFound("Share not found".to_string()));
        }
        tracing::info!(share_id = %id, "Share deleted");
        Ok(())
    }
}
