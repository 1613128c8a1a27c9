use crate::error::{Result, StoreError};
use crate::repo::{decode_labels, encode_labels};
use farmhand_core::domain::{Seller, SellerId};
use rusqlite::{params, Connection};
use std::str::FromStr;

#[derive(Debug, Clone, Default)]
pub struct SellerNew {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub score: i64,
    pub property_address: Option<String>,
    pub asking_price: Option<i64>,
    pub timeline: Option<String>,
    pub status: Option<String>,
    pub tags: Vec<String>,
}

pub struct SellersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SellersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: SellerNew) -> Result<Seller> {
        let seller = Seller {
            id: SellerId::new(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            score: input.score,
            property_address: input.property_address,
            asking_price: input.asking_price,
            timeline: input.timeline,
            status: input.status,
            tags: input.tags,
            created_at: now_utc,
            updated_at: now_utc,
        };

        self.conn.execute(
            "INSERT INTO sellers (id, name, email, phone, score, property_address, asking_price, \
             timeline, status, tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                seller.id.to_string(),
                seller.name,
                seller.email,
                seller.phone,
                seller.score,
                seller.property_address,
                seller.asking_price,
                seller.timeline,
                seller.status,
                encode_labels(&seller.tags)?,
                seller.created_at,
                seller.updated_at,
            ],
        )?;

        Ok(seller)
    }

    pub fn list_all(&self) -> Result<Vec<Seller>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, email, phone, score, property_address, asking_price, timeline, \
             status, tags, created_at, updated_at
             FROM sellers ORDER BY name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut sellers = Vec::new();
        while let Some(row) = rows.next()? {
            sellers.push(seller_from_row(row)?);
        }
        Ok(sellers)
    }
}

fn seller_from_row(row: &rusqlite::Row<'_>) -> Result<Seller> {
    let id_str: String = row.get(0)?;
    let id = SellerId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let tags_raw: String = row.get(9)?;
    Ok(Seller {
        id,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        score: row.get(4)?,
        property_address: row.get(5)?,
        asking_price: row.get(6)?,
        timeline: row.get(7)?,
        status: row.get(8)?,
        tags: decode_labels(&tags_raw)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
