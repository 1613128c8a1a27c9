use crate::error::{Result, StoreError};
use crate::repo::{decode_labels, encode_labels};
use farmhand_core::domain::{Buyer, BuyerId, BuyerStatus};
use rusqlite::{params, Connection};
use std::str::FromStr;

const BUYER_COLUMNS: &str = "id, fname, lname, full_name, email, phone, phone2, phone3, company, \
     score, notes, mailing_address, mailing_city, mailing_state, mailing_zip, locations, tags, \
     vetted, vip, can_receive_sms, can_receive_email, property_type, budget_min, budget_max, \
     timeline, source, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct BuyerNew {
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone2: Option<String>,
    pub phone3: Option<String>,
    pub company: Option<String>,
    pub score: i64,
    pub notes: Option<String>,
    pub mailing_address: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_state: Option<String>,
    pub mailing_zip: Option<String>,
    pub locations: Vec<String>,
    pub tags: Vec<String>,
    pub vetted: bool,
    pub vip: bool,
    pub can_receive_sms: bool,
    pub can_receive_email: bool,
    pub property_type: Vec<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub timeline: Option<String>,
    pub source: Option<String>,
    pub status: BuyerStatus,
}

impl Default for BuyerNew {
    fn default() -> Self {
        Self {
            fname: None,
            lname: None,
            full_name: None,
            email: None,
            phone: None,
            phone2: None,
            phone3: None,
            company: None,
            score: 0,
            notes: None,
            mailing_address: None,
            mailing_city: None,
            mailing_state: None,
            mailing_zip: None,
            locations: Vec::new(),
            tags: Vec::new(),
            vetted: false,
            vip: false,
            can_receive_sms: true,
            can_receive_email: true,
            property_type: Vec::new(),
            budget_min: None,
            budget_max: None,
            timeline: None,
            source: None,
            status: BuyerStatus::Lead,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuyerUpdate {
    pub fname: Option<Option<String>>,
    pub lname: Option<Option<String>>,
    pub full_name: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub phone2: Option<Option<String>>,
    pub phone3: Option<Option<String>>,
    pub company: Option<Option<String>>,
    pub score: Option<i64>,
    pub notes: Option<Option<String>>,
    pub mailing_address: Option<Option<String>>,
    pub mailing_city: Option<Option<String>>,
    pub mailing_state: Option<Option<String>>,
    pub mailing_zip: Option<Option<String>>,
    pub locations: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub vetted: Option<bool>,
    pub vip: Option<bool>,
    pub can_receive_sms: Option<bool>,
    pub can_receive_email: Option<bool>,
    pub property_type: Option<Vec<String>>,
    pub budget_min: Option<Option<i64>>,
    pub budget_max: Option<Option<i64>>,
    pub timeline: Option<Option<String>>,
    pub source: Option<Option<String>>,
    pub status: Option<BuyerStatus>,
}

impl BuyerUpdate {
    pub fn is_empty(&self) -> bool {
        self.fname.is_none()
            && self.lname.is_none()
            && self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.phone2.is_none()
            && self.phone3.is_none()
            && self.company.is_none()
            && self.score.is_none()
            && self.notes.is_none()
            && self.mailing_address.is_none()
            && self.mailing_city.is_none()
            && self.mailing_state.is_none()
            && self.mailing_zip.is_none()
            && self.locations.is_none()
            && self.tags.is_none()
            && self.vetted.is_none()
            && self.vip.is_none()
            && self.can_receive_sms.is_none()
            && self.can_receive_email.is_none()
            && self.property_type.is_none()
            && self.budget_min.is_none()
            && self.budget_max.is_none()
            && self.timeline.is_none()
            && self.source.is_none()
            && self.status.is_none()
    }
}

pub struct BuyersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> BuyersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: BuyerNew) -> Result<Buyer> {
        let tx = self.conn.unchecked_transaction()?;
        let buyer = create_inner(&tx, now_utc, input)?;
        tx.commit()?;
        Ok(buyer)
    }

    /// One batch, one transaction. Callers submit batches sequentially;
    /// a failed batch rolls back only itself.
    pub fn insert_batch(&self, now_utc: i64, inputs: Vec<BuyerNew>) -> Result<Vec<BuyerId>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(inputs.len());
        for input in inputs {
            let buyer = create_inner(&tx, now_utc, input)?;
            ids.push(buyer.id);
        }
        tx.commit()?;
        Ok(ids)
    }

    pub fn get(&self, id: BuyerId) -> Result<Option<Buyer>> {
        get_inner(self.conn, id)
    }

    /// Snapshot load, newest first. The in-memory copy is replaced
    /// wholesale on reload, never patched.
    pub fn list_all(&self) -> Result<Vec<Buyer>> {
        let sql = format!("SELECT {BUYER_COLUMNS} FROM buyers ORDER BY created_at DESC, rowid DESC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut buyers = Vec::new();
        while let Some(row) = rows.next()? {
            buyers.push(buyer_from_row(row)?);
        }
        Ok(buyers)
    }

    pub fn update(&self, now_utc: i64, id: BuyerId, update: BuyerUpdate) -> Result<Buyer> {
        let tx = self.conn.unchecked_transaction()?;
        let buyer = update_inner(&tx, now_utc, id, update)?;
        tx.commit()?;
        Ok(buyer)
    }

    pub fn delete(&self, id: BuyerId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM buyers WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Adds a tag label to the buyer row and keeps the catalog counter in
    /// step, all inside one transaction.
    pub fn add_tag(&self, now_utc: i64, id: BuyerId, label: &str) -> Result<Buyer> {
        let label = label.trim();
        let tx = self.conn.unchecked_transaction()?;
        let mut buyer =
            get_inner(&tx, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !buyer.tags.iter().any(|tag| tag == label) {
            buyer.tags.push(label.to_string());
            buyer.updated_at = now_utc;
            tx.execute(
                "UPDATE buyers SET tags = ?2, updated_at = ?3 WHERE id = ?1;",
                params![id.to_string(), encode_labels(&buyer.tags)?, now_utc],
            )?;
            crate::repo::tags::upsert_inner(&tx, now_utc, label, None)?;
            crate::repo::tags::adjust_usage_inner(&tx, label, 1)?;
        }
        tx.commit()?;
        Ok(buyer)
    }

    pub fn remove_tag(&self, now_utc: i64, id: BuyerId, label: &str) -> Result<Buyer> {
        let label = label.trim();
        let tx = self.conn.unchecked_transaction()?;
        let mut buyer =
            get_inner(&tx, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let before = buyer.tags.len();
        buyer.tags.retain(|tag| tag != label);
        if buyer.tags.len() != before {
            buyer.updated_at = now_utc;
            tx.execute(
                "UPDATE buyers SET tags = ?2, updated_at = ?3 WHERE id = ?1;",
                params![id.to_string(), encode_labels(&buyer.tags)?, now_utc],
            )?;
            crate::repo::tags::adjust_usage_inner(&tx, label, -1)?;
        }
        tx.commit()?;
        Ok(buyer)
    }

    pub fn existing_emails(&self) -> Result<Vec<String>> {
        self.existing_column("email")
    }

    pub fn existing_phones(&self) -> Result<Vec<String>> {
        self.existing_column("phone")
    }

    fn existing_column(&self, column: &str) -> Result<Vec<String>> {
        let sql = format!("SELECT {column} FROM buyers WHERE {column} IS NOT NULL;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            values.push(row.get(0)?);
        }
        Ok(values)
    }
}

fn create_inner(conn: &Connection, now_utc: i64, input: BuyerNew) -> Result<Buyer> {
    let buyer = Buyer {
        id: BuyerId::new(),
        fname: input.fname,
        lname: input.lname,
        full_name: input.full_name,
        email: input.email,
        phone: input.phone,
        phone2: input.phone2,
        phone3: input.phone3,
        company: input.company,
        score: input.score,
        notes: input.notes,
        mailing_address: input.mailing_address,
        mailing_city: input.mailing_city,
        mailing_state: input.mailing_state,
        mailing_zip: input.mailing_zip,
        locations: input.locations,
        tags: input.tags,
        vetted: input.vetted,
        vip: input.vip,
        can_receive_sms: input.can_receive_sms,
        can_receive_email: input.can_receive_email,
        property_type: input.property_type,
        budget_min: input.budget_min,
        budget_max: input.budget_max,
        timeline: input.timeline,
        source: input.source,
        status: input.status,
        created_at: now_utc,
        updated_at: now_utc,
    };

    conn.execute(
        "INSERT INTO buyers (id, fname, lname, full_name, email, phone, phone2, phone3, company, \
         score, notes, mailing_address, mailing_city, mailing_state, mailing_zip, locations, tags, \
         vetted, vip, can_receive_sms, can_receive_email, property_type, budget_min, budget_max, \
         timeline, source, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, \
         ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29);",
        params![
            buyer.id.to_string(),
            buyer.fname,
            buyer.lname,
            buyer.full_name,
            buyer.email,
            buyer.phone,
            buyer.phone2,
            buyer.phone3,
            buyer.company,
            buyer.score,
            buyer.notes,
            buyer.mailing_address,
            buyer.mailing_city,
            buyer.mailing_state,
            buyer.mailing_zip,
            encode_labels(&buyer.locations)?,
            encode_labels(&buyer.tags)?,
            buyer.vetted,
            buyer.vip,
            buyer.can_receive_sms,
            buyer.can_receive_email,
            encode_labels(&buyer.property_type)?,
            buyer.budget_min,
            buyer.budget_max,
            buyer.timeline,
            buyer.source,
            buyer.status.as_str(),
            buyer.created_at,
            buyer.updated_at,
        ],
    )?;

    Ok(buyer)
}

fn update_inner(conn: &Connection, now_utc: i64, id: BuyerId, update: BuyerUpdate) -> Result<Buyer> {
    let mut buyer = get_inner(conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    if let Some(value) = update.fname {
        buyer.fname = value;
    }
    if let Some(value) = update.lname {
        buyer.lname = value;
    }
    if let Some(value) = update.full_name {
        buyer.full_name = value;
    }
    if let Some(value) = update.email {
        buyer.email = value;
    }
    if let Some(value) = update.phone {
        buyer.phone = value;
    }
    if let Some(value) = update.phone2 {
        buyer.phone2 = value;
    }
    if let Some(value) = update.phone3 {
        buyer.phone3 = value;
    }
    if let Some(value) = update.company {
        buyer.company = value;
    }
    if let Some(value) = update.score {
        buyer.score = value;
    }
    if let Some(value) = update.notes {
        buyer.notes = value;
    }
    if let Some(value) = update.mailing_address {
        buyer.mailing_address = value;
    }
    if let Some(value) = update.mailing_city {
        buyer.mailing_city = value;
    }
    if let Some(value) = update.mailing_state {
        buyer.mailing_state = value;
    }
    if let Some(value) = update.mailing_zip {
        buyer.mailing_zip = value;
    }
    if let Some(value) = update.locations {
        buyer.locations = value;
    }
    if let Some(value) = update.tags {
        buyer.tags = value;
    }
    if let Some(value) = update.vetted {
        buyer.vetted = value;
    }
    if let Some(value) = update.vip {
        buyer.vip = value;
    }
    if let Some(value) = update.can_receive_sms {
        buyer.can_receive_sms = value;
    }
    if let Some(value) = update.can_receive_email {
        buyer.can_receive_email = value;
    }
    if let Some(value) = update.property_type {
        buyer.property_type = value;
    }
    if let Some(value) = update.budget_min {
        buyer.budget_min = value;
    }
    if let Some(value) = update.budget_max {
        buyer.budget_max = value;
    }
    if let Some(value) = update.timeline {
        buyer.timeline = value;
    }
    if let Some(value) = update.source {
        buyer.source = value;
    }
    if let Some(value) = update.status {
        buyer.status = value;
    }

    buyer.updated_at = now_utc;

    conn.execute(
        "UPDATE buyers SET fname = ?2, lname = ?3, full_name = ?4, email = ?5, phone = ?6, \
         phone2 = ?7, phone3 = ?8, company = ?9, score = ?10, notes = ?11, mailing_address = ?12, \
         mailing_city = ?13, mailing_state = ?14, mailing_zip = ?15, locations = ?16, tags = ?17, \
         vetted = ?18, vip = ?19, can_receive_sms = ?20, can_receive_email = ?21, \
         property_type = ?22, budget_min = ?23, budget_max = ?24, timeline = ?25, source = ?26, \
         status = ?27, updated_at = ?28
         WHERE id = ?1;",
        params![
            buyer.id.to_string(),
            buyer.fname,
            buyer.lname,
            buyer.full_name,
            buyer.email,
            buyer.phone,
            buyer.phone2,
            buyer.phone3,
            buyer.company,
            buyer.score,
            buyer.notes,
            buyer.mailing_address,
            buyer.mailing_city,
            buyer.mailing_state,
            buyer.mailing_zip,
            encode_labels(&buyer.locations)?,
            encode_labels(&buyer.tags)?,
            buyer.vetted,
            buyer.vip,
            buyer.can_receive_sms,
            buyer.can_receive_email,
            encode_labels(&buyer.property_type)?,
            buyer.budget_min,
            buyer.budget_max,
            buyer.timeline,
            buyer.source,
            buyer.status.as_str(),
            buyer.updated_at,
        ],
    )?;

    Ok(buyer)
}

fn get_inner(conn: &Connection, id: BuyerId) -> Result<Option<Buyer>> {
    let sql = format!("SELECT {BUYER_COLUMNS} FROM buyers WHERE id = ?1;");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(buyer_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn buyer_from_row(row: &rusqlite::Row<'_>) -> Result<Buyer> {
    let id_str: String = row.get(0)?;
    let id = BuyerId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let locations_raw: String = row.get(15)?;
    let tags_raw: String = row.get(16)?;
    let property_type_raw: String = row.get(21)?;
    let status_raw: String = row.get(26)?;
    Ok(Buyer {
        id,
        fname: row.get(1)?,
        lname: row.get(2)?,
        full_name: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        phone2: row.get(6)?,
        phone3: row.get(7)?,
        company: row.get(8)?,
        score: row.get(9)?,
        notes: row.get(10)?,
        mailing_address: row.get(11)?,
        mailing_city: row.get(12)?,
        mailing_state: row.get(13)?,
        mailing_zip: row.get(14)?,
        locations: decode_labels(&locations_raw)?,
        tags: decode_labels(&tags_raw)?,
        vetted: row.get(17)?,
        vip: row.get(18)?,
        can_receive_sms: row.get(19)?,
        can_receive_email: row.get(20)?,
        property_type: decode_labels(&property_type_raw)?,
        budget_min: row.get(22)?,
        budget_max: row.get(23)?,
        timeline: row.get(24)?,
        source: row.get(25)?,
        status: BuyerStatus::parse(&status_raw),
        created_at: row.get(27)?,
        updated_at: row.get(28)?,
    })
}
