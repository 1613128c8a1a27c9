use crate::error::{Result, StoreError};
use farmhand_core::domain::tag::DEFAULT_TAG_COLOR;
use farmhand_core::domain::{Tag, TagId};
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

pub struct TagsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> TagsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn upsert(&self, now_utc: i64, name: &str, color: Option<&str>) -> Result<Tag> {
        upsert_inner(self.conn, now_utc, name, color)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, is_protected, usage_count, created_at
             FROM tags WHERE name = ?1;",
        )?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            Ok(Some(tag_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn list_all(&self) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, is_protected, usage_count, created_at
             FROM tags ORDER BY name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(tag_from_row(row)?);
        }
        Ok(tags)
    }

    /// Protected tags refuse deletion.
    pub fn delete(&self, name: &str) -> Result<()> {
        let protected: Option<bool> = self
            .conn
            .query_row(
                "SELECT is_protected FROM tags WHERE name = ?1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        match protected {
            None => Err(StoreError::NotFound(name.to_string())),
            Some(true) => Err(StoreError::ProtectedTag(name.to_string())),
            Some(false) => {
                self.conn
                    .execute("DELETE FROM tags WHERE name = ?1;", [name])?;
                Ok(())
            }
        }
    }

    pub fn adjust_usage(&self, name: &str, delta: i64) -> Result<()> {
        adjust_usage_inner(self.conn, name, delta)
    }
}

pub(crate) fn upsert_inner(
    conn: &Connection,
    now_utc: i64,
    name: &str,
    color: Option<&str>,
) -> Result<Tag> {
    let new_id = TagId::new();
    conn.execute(
        "INSERT INTO tags (id, name, color, is_protected, usage_count, created_at)
         VALUES (?1, ?2, ?3, 0, 0, ?4)
         ON CONFLICT(name) DO NOTHING;",
        params![
            new_id.to_string(),
            name,
            color.unwrap_or(DEFAULT_TAG_COLOR),
            now_utc
        ],
    )?;

    let mut stmt = conn.prepare(
        "SELECT id, name, color, is_protected, usage_count, created_at FROM tags WHERE name = ?1;",
    )?;
    let mut rows = stmt.query([name])?;
    if let Some(row) = rows.next()? {
        tag_from_row(row)
    } else {
        Err(StoreError::Migration("missing tag after upsert".to_string()))
    }
}

/// Usage counters floor at zero; a decrement for an unknown tag is a no-op.
pub(crate) fn adjust_usage_inner(conn: &Connection, name: &str, delta: i64) -> Result<()> {
    conn.execute(
        "UPDATE tags SET usage_count = MAX(0, usage_count + ?2) WHERE name = ?1;",
        params![name, delta],
    )?;
    Ok(())
}

fn tag_from_row(row: &rusqlite::Row<'_>) -> Result<Tag> {
    let id_str: String = row.get(0)?;
    let id = TagId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(Tag {
        id,
        name: row.get(1)?,
        color: row.get(2)?,
        is_protected: row.get(3)?,
        usage_count: row.get(4)?,
        created_at: row.get(5)?,
    })
}
