use crate::error::{Result, StoreError};
use farmhand_core::domain::{BuyerId, Group, GroupId, GroupKind};
use rusqlite::{params, Connection};
use std::str::FromStr;

#[derive(Debug, Clone, Default)]
pub struct GroupNew {
    pub name: String,
    pub description: Option<String>,
    pub kind: GroupKind,
    pub criteria: Option<String>,
}

pub struct GroupsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> GroupsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: GroupNew) -> Result<Group> {
        let group = Group {
            id: GroupId::new(),
            name: input.name,
            description: input.description,
            kind: input.kind,
            criteria: input.criteria,
            created_at: now_utc,
            updated_at: now_utc,
        };

        self.conn.execute(
            "INSERT INTO groups (id, name, description, kind, criteria, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                group.id.to_string(),
                group.name,
                group.description,
                group.kind.as_str(),
                group.criteria,
                group.created_at,
                group.updated_at,
            ],
        )?;

        Ok(group)
    }

    pub fn get(&self, id: GroupId) -> Result<Option<Group>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, kind, criteria, created_at, updated_at
             FROM groups WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(group_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn list_all(&self) -> Result<Vec<Group>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, kind, criteria, created_at, updated_at
             FROM groups ORDER BY name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut groups = Vec::new();
        while let Some(row) = rows.next()? {
            groups.push(group_from_row(row)?);
        }
        Ok(groups)
    }

    pub fn delete(&self, id: GroupId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM groups WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Cross product of buyers and groups, duplicates ignored, one
    /// transaction per call.
    pub fn add_buyers(&self, buyer_ids: &[BuyerId], group_ids: &[GroupId]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut added = 0;
        for buyer_id in buyer_ids {
            for group_id in group_ids {
                added += tx.execute(
                    "INSERT OR IGNORE INTO buyer_groups (buyer_id, group_id) VALUES (?1, ?2);",
                    params![buyer_id.to_string(), group_id.to_string()],
                )?;
            }
        }
        tx.commit()?;
        Ok(added)
    }

    pub fn remove_buyer(&self, buyer_id: BuyerId, group_id: GroupId) -> Result<()> {
        self.conn.execute(
            "DELETE FROM buyer_groups WHERE buyer_id = ?1 AND group_id = ?2;",
            params![buyer_id.to_string(), group_id.to_string()],
        )?;
        Ok(())
    }

    pub fn member_count(&self, group_id: GroupId) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM buyer_groups WHERE group_id = ?1;",
            [group_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn member_ids(&self, group_id: GroupId) -> Result<Vec<BuyerId>> {
        let mut stmt = self.conn.prepare(
            "SELECT bg.buyer_id FROM buyer_groups bg
             INNER JOIN buyers b ON b.id = bg.buyer_id
             WHERE bg.group_id = ?1
             ORDER BY b.created_at DESC, b.rowid DESC;",
        )?;
        let mut rows = stmt.query([group_id.to_string()])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            let raw: String = row.get(0)?;
            ids.push(BuyerId::from_str(&raw).map_err(|_| StoreError::InvalidId(raw.clone()))?);
        }
        Ok(ids)
    }

    pub fn names_for_buyer(&self, buyer_id: BuyerId) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT g.name FROM groups g
             INNER JOIN buyer_groups bg ON bg.group_id = g.id
             WHERE bg.buyer_id = ?1
             ORDER BY g.name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([buyer_id.to_string()])?;
        let mut names = Vec::new();
        while let Some(row) = rows.next()? {
            names.push(row.get(0)?);
        }
        Ok(names)
    }
}

fn group_from_row(row: &rusqlite::Row<'_>) -> Result<Group> {
    let id_str: String = row.get(0)?;
    let id = GroupId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let kind_raw: String = row.get(3)?;
    Ok(Group {
        id,
        name: row.get(1)?,
        description: row.get(2)?,
        kind: GroupKind::parse(&kind_raw),
        criteria: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
