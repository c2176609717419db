//! Axum route handlers for résumé editing, preview and export.

use anyhow::anyhow;
use axum::{extract::State, Json};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::layout::{render_paginated, PaginatedDocument};
use crate::models::resume::{has_text, EntryKind, RecordError, ResumeRecord};
use crate::render::{render_flow, render_preview, FlowDocument, PreviewNode};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryAction {
    Add,
    Remove,
    Update,
}

#[derive(Debug, Deserialize)]
pub struct EditEntriesRequest {
    #[serde(default)]
    pub record: ResumeRecord,
    pub kind: EntryKind,
    pub action: EntryAction,
    #[serde(default)]
    pub index: usize,
    /// Replacement entry for `update`, in the same shape as the record's entries.
    #[serde(default)]
    pub entry: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditEntriesResponse {
    pub record: ResumeRecord,
    pub entry_count: usize,
    /// False when the edit was a no-op (removing the last remaining entry).
    pub changed: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume/template
///
/// A blank record with one placeholder entry per collection.
pub async fn handle_template() -> Json<ResumeRecord> {
    Json(ResumeRecord::new())
}

/// POST /api/v1/resume/entries
///
/// Adds, removes or replaces one entry of a repeatable collection and returns
/// the updated record. Removing the only entry leaves the record unchanged.
pub async fn handle_edit_entries(
    Json(request): Json<EditEntriesRequest>,
) -> Result<Json<EditEntriesResponse>, AppError> {
    let EditEntriesRequest {
        mut record,
        kind,
        action,
        index,
        entry,
    } = request;

    record.ensure_placeholders();
    let changed = apply_entry_edit(&mut record, kind, action, index, entry)?;
    let entry_count = record.entry_count(kind);
    debug!(%kind, ?action, changed, entry_count, "Edited record entries");

    Ok(Json(EditEntriesResponse {
        record,
        entry_count,
        changed,
    }))
}

/// POST /api/v1/resume/preview
///
/// Renders the live preview tree. Never rejects: an empty record previews as a
/// bare header.
pub async fn handle_preview(
    Json(mut record): Json<ResumeRecord>,
) -> Result<Json<PreviewNode>, AppError> {
    record.ensure_placeholders();
    let tree = render_preview(&record);
    debug!(sections = ?tree.sections_present(), "Rendered preview");
    Ok(Json(tree))
}

/// POST /api/v1/resume/export/pdf
///
/// Lays the record out on fixed pages. Layout is CPU-bound and runs on the
/// blocking pool.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(record): Json<ResumeRecord>,
) -> Result<Json<PaginatedDocument>, AppError> {
    let record = prepare_export(record)?;
    let config = state.page_config.clone();

    let document = tokio::task::spawn_blocking(move || render_paginated(&record, &config))
        .await
        .map_err(|e| AppError::Internal(anyhow!("layout task failed: {e}")))?;

    debug!(
        pages = document.page_count(),
        sections = ?document.sections_present(),
        file = %document.file_name,
        "Rendered paginated export"
    );
    Ok(Json(document))
}

/// POST /api/v1/resume/export/docx
pub async fn handle_export_docx(
    Json(record): Json<ResumeRecord>,
) -> Result<Json<FlowDocument>, AppError> {
    let record = prepare_export(record)?;
    let document = render_flow(&record);
    debug!(
        blocks = document.blocks.len(),
        sections = ?document.sections_present(),
        file = %document.file_name,
        "Rendered flow export"
    );
    Ok(Json(document))
}

fn apply_entry_edit(
    record: &mut ResumeRecord,
    kind: EntryKind,
    action: EntryAction,
    index: usize,
    entry: Option<Value>,
) -> Result<bool, AppError> {
    match action {
        EntryAction::Add => {
            record.add_entry(kind);
            Ok(true)
        }
        EntryAction::Remove => {
            let len = record.entry_count(kind);
            if index >= len {
                return Err(RecordError::IndexOutOfRange { kind, index, len }.into());
            }
            Ok(record.remove_entry(kind, index))
        }
        EntryAction::Update => {
            let entry = entry.ok_or_else(|| {
                AppError::Validation("entry is required for update".to_string())
            })?;
            match kind {
                EntryKind::Experience => replace_entry(record.experience_mut(index)?, kind, entry)?,
                EntryKind::Education => replace_entry(record.education_mut(index)?, kind, entry)?,
                EntryKind::Project => replace_entry(record.project_mut(index)?, kind, entry)?,
            }
            Ok(true)
        }
    }
}

fn replace_entry<T: DeserializeOwned>(
    slot: &mut T,
    kind: EntryKind,
    entry: Value,
) -> Result<(), AppError> {
    *slot = serde_json::from_value(entry)
        .map_err(|e| AppError::Validation(format!("invalid {kind} entry: {e}")))?;
    Ok(())
}

/// Exports need a name for the file; the renderers themselves accept anything.
fn prepare_export(mut record: ResumeRecord) -> Result<ResumeRecord, AppError> {
    if !has_text(&record.personal_info.name) {
        return Err(AppError::Validation(
            "personalInfo.name is required to export".to_string(),
        ));
    }
    record.ensure_placeholders();
    Ok(record)
}
