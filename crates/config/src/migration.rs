use super::errors::ConfigError;
use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

type Result<T> = std::result::Result<T, ConfigError>;

/// Keys renamed in [sync]: (old, new)
const RENAMED_SYNC_KEYS: &[(&str, &str)] = &[
    ("valid_images", "accepted_images"),
    ("exclude_servers", "exclude_name_patterns"),
    ("concurrency", "upload_concurrency"),
];

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<panelsync_events::EventBus>>,
) -> Result<()> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let mut doc = content.parse::<DocumentMut>()?;
    let added_fields = migrate_document(&mut doc)?;

    // Only write if we added fields
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), doc.to_string()).await?;

        if let Some(event_bus) = events {
            event_bus.emit(panelsync_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

pub(crate) fn migrate_document(doc: &mut DocumentMut) -> Result<Vec<String>> {
    let mut added_fields = Vec::new();

    migrate_panel_section(doc, &mut added_fields)?;
    migrate_sync_section(doc, &mut added_fields)?;

    Ok(added_fields)
}

fn migrate_panel_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<()> {
    ensure_table(doc, "panel", added_fields);

    let panel = doc["panel"]
        .as_table_mut()
        .ok_or_else(|| ConfigError::MigrationError("Invalid [panel] section in config".to_string()))?;
    // Left empty so validation refuses to run until the user sets it
    ensure_field(panel, "url", Value::from(""), added_fields);
    ensure_field(panel, "api_key", Value::from(""), added_fields);
    ensure_field(panel, "timeout_secs", Value::from(30), added_fields);

    Ok(())
}

fn migrate_sync_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<()> {
    ensure_table(doc, "sync", added_fields);

    let sync = doc["sync"]
        .as_table_mut()
        .ok_or_else(|| ConfigError::MigrationError("Invalid [sync] section in config".to_string()))?;

    for (old, new) in RENAMED_SYNC_KEYS {
        let Some(item) = sync.remove(*old) else {
            continue;
        };

        if sync.contains_key(*new) {
            tracing::warn!(
                "Dropped legacy sync.{}: sync.{} is already set and takes precedence",
                old,
                new
            );
            added_fields.push(format!("sync.{} (dropped, sync.{} already set)", old, new));
        } else {
            sync[*new] = item;
            added_fields.push(format!("sync.{} (renamed from {})", new, old));
        }
    }

    ensure_field(sync, "root", Value::from("upload"), added_fields);
    ensure_field(sync, "accepted_eggs", Value::Array(Array::new()), added_fields);
    ensure_field(sync, "accepted_images", Value::Array(Array::new()), added_fields);
    ensure_field(sync, "exclude_name_patterns", Value::Array(Array::new()), added_fields);
    ensure_field(sync, "upload_concurrency", Value::from(4), added_fields);
    ensure_field(sync, "server_parallelism", Value::from(1), added_fields);
    ensure_field(sync, "max_upload_attempts", Value::from(1), added_fields);
    ensure_field(sync, "retry_backoff_ms", Value::from(500), added_fields);
    ensure_field(sync, "probe_existing_directories", Value::from(false), added_fields);

    Ok(())
}

fn ensure_table(doc: &mut DocumentMut, key: &str, added_fields: &mut Vec<String>) {
    if !doc.contains_key(key) {
        let mut table = Table::new();
        table.set_implicit(true);
        doc[key] = Item::Table(table);
        added_fields.push(key.to_string());
    }
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}
