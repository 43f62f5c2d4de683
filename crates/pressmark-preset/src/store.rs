// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persistent preset store backed by SQLite.
//
// Presets are stored as their full JSON record in a single column, with id,
// name, and timestamp lifted into columns for listing. The "default preset"
// designation lives in a separate settings row referencing the preset id —
// deleting the referenced preset invalidates the designation rather than
// cascading.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use tracing::{debug, info, instrument};

use pressmark_core::error::{PressmarkError, Result};
use pressmark_core::{Preset, PresetId, PresetMeta};

use crate::normalize::normalize_preset;

/// SQLite schema for presets and store-level settings.
const CREATE_TABLES_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS presets (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        body TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
"#;

const DEFAULT_PRESET_KEY: &str = "default_preset";

/// Preset store backed by a SQLite database.
///
/// All methods are synchronous because `rusqlite` does not support async
/// natively. In an async context, wrap calls in `tokio::task::spawn_blocking`.
pub struct PresetStore {
    conn: Connection,
}

impl PresetStore {
    /// Open (or create) the preset database at the given path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| PressmarkError::Database(format!("open: {e}")))?;

        // WAL mode survives unclean shutdowns more gracefully and lets the
        // UI thread read while a save is in flight.
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| PressmarkError::Database(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLES_SQL)
            .map_err(|e| PressmarkError::Database(format!("create tables: {e}")))?;

        info!("preset database opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PressmarkError::Database(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLES_SQL)
            .map_err(|e| PressmarkError::Database(format!("create tables: {e}")))?;

        debug!("in-memory preset database opened");
        Ok(Self { conn })
    }

    /// Save (create or update) a preset and return its id.
    ///
    /// The record is normalized before persisting, so a store never holds
    /// an unnormalized row regardless of where the preset came from.
    #[instrument(skip(self, preset), fields(preset_id = %preset.id))]
    pub fn save(&self, preset: &Preset) -> Result<PresetId> {
        let norm = normalize_preset(&serde_json::to_value(preset)?)?;
        let body = serde_json::to_string(&norm)?;

        self.conn
            .execute(
                "INSERT INTO presets (id, name, updated_at, body) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET name = ?2, updated_at = ?3, body = ?4",
                params![norm.id.as_str(), norm.name, norm.updated_at.to_rfc3339(), body],
            )
            .map_err(|e| PressmarkError::Database(format!("save preset: {e}")))?;

        debug!(name = %norm.name, "preset saved");
        Ok(norm.id)
    }

    /// Save a loose JSON record (e.g. straight from a UI form), returning
    /// the normalized preset that was persisted.
    pub fn save_record(&self, record: &Value) -> Result<Preset> {
        let preset = normalize_preset(record)?;
        self.save(&preset)?;
        Ok(preset)
    }

    /// Load a preset by id, normalized to the current schema.
    ///
    /// Returns Ok(None) for an unknown id. A stored row that cannot be
    /// parsed as a JSON object fails loudly — that is corruption, not a
    /// missing field.
    pub fn load(&self, id: &PresetId) -> Result<Option<Preset>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM presets WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| PressmarkError::Database(format!("load preset: {e}")))?;

        match body {
            None => Ok(None),
            Some(body) => {
                let value: Value = serde_json::from_str(&body)?;
                normalize_preset(&value).map(Some)
            }
        }
    }

    /// List metadata for every stored preset, ordered by name.
    pub fn list(&self) -> Result<Vec<PresetMeta>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, updated_at FROM presets ORDER BY name COLLATE NOCASE, id")
            .map_err(|e| PressmarkError::Database(format!("list presets: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| PressmarkError::Database(format!("list presets: {e}")))?;

        let mut out = Vec::new();
        for row in rows {
            let (id, name, updated_at) =
                row.map_err(|e| PressmarkError::Database(format!("list presets: {e}")))?;
            let updated_at = DateTime::parse_from_rfc3339(&updated_at)
                .map_err(|e| PressmarkError::Database(format!("bad timestamp: {e}")))?
                .with_timezone(&Utc);
            out.push(PresetMeta {
                id: PresetId(id),
                name,
                updated_at,
            });
        }
        Ok(out)
    }

    /// Delete a preset. Unknown ids are a no-op. If the deleted preset was
    /// the default, the designation is cleared (invalidated, not cascaded).
    #[instrument(skip(self), fields(preset_id = %id))]
    pub fn delete(&self, id: &PresetId) -> Result<()> {
        self.conn
            .execute("DELETE FROM presets WHERE id = ?1", params![id.as_str()])
            .map_err(|e| PressmarkError::Database(format!("delete preset: {e}")))?;

        if self.default_preset()?.as_ref() == Some(id) {
            self.conn
                .execute(
                    "DELETE FROM settings WHERE key = ?1",
                    params![DEFAULT_PRESET_KEY],
                )
                .map_err(|e| PressmarkError::Database(format!("clear default: {e}")))?;
            debug!("default preset designation cleared");
        }
        Ok(())
    }

    /// Designate a preset as the default. Fails if the id does not exist.
    pub fn set_default(&self, id: &PresetId) -> Result<()> {
        if self.load(id)?.is_none() {
            return Err(PressmarkError::PresetNotFound(id.to_string()));
        }
        self.conn
            .execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![DEFAULT_PRESET_KEY, id.as_str()],
            )
            .map_err(|e| PressmarkError::Database(format!("set default: {e}")))?;
        Ok(())
    }

    /// The currently designated default preset id, if any.
    pub fn default_preset(&self) -> Result<Option<PresetId>> {
        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![DEFAULT_PRESET_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| PressmarkError::Database(format!("get default: {e}")))?;
        Ok(id.map(PresetId))
    }

    /// Export a preset as pretty-printed JSON. Fails if the id is unknown —
    /// export is an explicit user action that expects feedback.
    pub fn export(&self, id: &PresetId) -> Result<String> {
        let preset = self
            .load(id)?
            .ok_or_else(|| PressmarkError::PresetNotFound(id.to_string()))?;
        Ok(serde_json::to_string_pretty(&preset)?)
    }

    /// Import a preset from JSON text.
    ///
    /// Unparseable text fails loudly. The incoming id is stripped so a
    /// fresh one is generated (imports can never collide with existing
    /// presets) and updatedAt is restamped.
    #[instrument(skip_all)]
    pub fn import(&self, json: &str) -> Result<Preset> {
        let mut value: Value = serde_json::from_str(json)?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("id");
            obj.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));
        }
        let preset = self.save_record(&value)?;
        info!(preset_id = %preset.id, name = %preset.name, "preset imported");
        Ok(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::DEFAULT_PRESET_NAME;
    use serde_json::json;

    fn store() -> PresetStore {
        PresetStore::open_in_memory().expect("in-memory store")
    }

    fn sample(name: &str) -> Preset {
        normalize_preset(&json!({
            "name": name,
            "docConfig": { "title": "Report", "pageSize": "Letter" },
            "headerFooter": { "headerMd": "# {{TITLE}}" }
        }))
        .expect("normalize sample")
    }

    #[test]
    fn save_and_load_round_trip() {
        let store = store();
        let preset = sample("Quarterly");
        let id = store.save(&preset).expect("save");
        let loaded = store.load(&id).expect("load").expect("present");
        assert_eq!(loaded, preset);
    }

    #[test]
    fn load_unknown_id_is_none() {
        let store = store();
        let missing = store.load(&PresetId::from("nope")).expect("load");
        assert!(missing.is_none());
    }

    #[test]
    fn save_upserts_by_id() {
        let store = store();
        let mut preset = sample("First");
        let id = store.save(&preset).expect("save");
        preset.name = "Renamed".into();
        let id2 = store.save(&preset).expect("save again");
        assert_eq!(id, id2);
        assert_eq!(store.list().expect("list").len(), 1);
        assert_eq!(store.load(&id).expect("load").expect("present").name, "Renamed");
    }

    #[test]
    fn list_returns_metadata_sorted_by_name() {
        let store = store();
        store.save(&sample("beta")).expect("save");
        store.save(&sample("Alpha")).expect("save");
        let names: Vec<String> = store
            .list()
            .expect("list")
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "beta"]);
    }

    #[test]
    fn delete_invalidates_default_designation() {
        let store = store();
        let id = store.save(&sample("Default one")).expect("save");
        store.set_default(&id).expect("set default");
        assert_eq!(store.default_preset().expect("get"), Some(id.clone()));

        store.delete(&id).expect("delete");
        assert!(store.default_preset().expect("get").is_none());
        assert!(store.load(&id).expect("load").is_none());
    }

    #[test]
    fn deleting_non_default_keeps_designation() {
        let store = store();
        let keep = store.save(&sample("Keep")).expect("save");
        let drop = store.save(&sample("Drop")).expect("save");
        store.set_default(&keep).expect("set default");
        store.delete(&drop).expect("delete");
        assert_eq!(store.default_preset().expect("get"), Some(keep));
    }

    #[test]
    fn set_default_requires_existing_preset() {
        let store = store();
        let err = store.set_default(&PresetId::from("ghost")).unwrap_err();
        assert!(matches!(err, PressmarkError::PresetNotFound(_)));
    }

    #[test]
    fn export_import_regenerates_id() {
        let store = store();
        let id = store.save(&sample("Exported")).expect("save");
        let json = store.export(&id).expect("export");

        let imported = store.import(&json).expect("import");
        assert_ne!(imported.id, id);
        assert_eq!(imported.name, "Exported");
        assert_eq!(store.list().expect("list").len(), 2);
    }

    #[test]
    fn export_unknown_id_fails() {
        let store = store();
        assert!(matches!(
            store.export(&PresetId::from("ghost")).unwrap_err(),
            PressmarkError::PresetNotFound(_)
        ));
    }

    #[test]
    fn import_bad_json_fails_loudly() {
        let store = store();
        assert!(matches!(
            store.import("{not json").unwrap_err(),
            PressmarkError::Serialization(_)
        ));
    }

    #[test]
    fn import_defaults_missing_sections() {
        let store = store();
        let imported = store.import(r#"{"docConfig":{"pageSize":"Nonsense"}}"#).expect("import");
        assert_eq!(imported.name, DEFAULT_PRESET_NAME);
        assert_eq!(imported.doc_config.page_size, pressmark_core::PageSize::A4);
    }

    #[test]
    fn store_survives_reopen_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("presets.db");
        let id = {
            let store = PresetStore::open(&path).expect("open");
            store.save(&sample("Persistent")).expect("save")
        };
        let store = PresetStore::open(&path).expect("reopen");
        let loaded = store.load(&id).expect("load").expect("present");
        assert_eq!(loaded.name, "Persistent");
    }
}
