use crate::coerce::apply_cell;
use crate::error::ImportError;
use crate::mapping::Mapping;
use crate::record::BuyerDraft;
use crate::schema::field_by_key;
use serde::Serialize;
use std::collections::HashSet;
use std::io;

pub const DEFAULT_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reads delimiter-separated text with a header row; empty lines are
/// skipped. A malformed file fails as a whole with the parser's message and
/// retains nothing.
pub fn parse_csv<R: io::Read>(reader: R) -> Result<ParsedCsv, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|err| ImportError::Parse(err.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|err| ImportError::Parse(err.to_string()))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ParsedCsv { headers, rows })
}

/// Coerces every parsed row through the mapping and applies defaults.
/// An empty mapping never reaches the store.
pub fn build_records(parsed: &ParsedCsv, mapping: &Mapping) -> Result<Vec<BuyerDraft>, ImportError> {
    if mapping.is_empty() {
        return Err(ImportError::Validation(
            "no target fields mapped".to_string(),
        ));
    }

    let mut records = Vec::with_capacity(parsed.rows.len());
    for row in &parsed.rows {
        let mut draft = BuyerDraft::default();
        for (key, column) in mapping.entries() {
            let raw = row.get(column).map(String::as_str).unwrap_or("");
            apply_cell(&mut draft, field_by_key(key), raw);
        }
        draft.apply_defaults();
        records.push(draft);
    }
    Ok(records)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupePolicy {
    /// Repeat imports may duplicate rows; matches the historical behavior.
    #[default]
    None,
    Email,
    Phone,
}

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub batch_size: usize,
    pub dedupe: DedupePolicy,
    /// Keys already present in the store, lowercased, per the active policy.
    pub existing_keys: HashSet<String>,
}

impl ImportOptions {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Default::default()
        }
    }
}

/// One store round-trip per call. Implementations translate their own
/// failure type into `ImportError::Store`.
pub trait BuyerSink {
    fn insert_batch(&mut self, batch: &[BuyerDraft]) -> Result<(), ImportError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub inserted: usize,
    pub skipped_duplicates: usize,
    pub batches: usize,
}

/// Submits records in fixed-size batches, strictly in order. Progress is
/// recomputed after each batch as a rounded whole percentage. The first
/// failing batch aborts the run; earlier batches stay persisted and later
/// ones are never attempted.
pub fn run_import<F>(
    records: Vec<BuyerDraft>,
    sink: &mut dyn BuyerSink,
    options: &ImportOptions,
    mut progress: F,
) -> Result<ImportReport, ImportError>
where
    F: FnMut(u8),
{
    let batch_size = options.batch_size.max(1);
    let total_rows = records.len();

    let mut seen = options.existing_keys.clone();
    let mut retained = Vec::with_capacity(records.len());
    let mut skipped_duplicates = 0;
    for record in records {
        match record.dedupe_key(options.dedupe) {
            Some(key) if !seen.insert(key.clone()) => skipped_duplicates += 1,
            _ => retained.push(record),
        }
    }

    let total = retained.len();
    let mut report = ImportReport {
        total_rows,
        skipped_duplicates,
        ..Default::default()
    };

    for batch in retained.chunks(batch_size) {
        sink.insert_batch(batch)?;
        report.inserted += batch.len();
        report.batches += 1;
        let percent = (report.inserted as f64 / total as f64 * 100.0).round() as u8;
        progress(percent);
    }

    Ok(report)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    Idle,
    Parsed,
    Mapping,
    Importing,
    Done,
    Error,
}

/// Drives one import attempt: Idle, Parsed, Mapping, Importing, then Done
/// or Error. Errors are terminal for the attempt but the session is
/// reusable; loading another file starts over.
#[derive(Debug, Default)]
pub struct ImportSession {
    state: Option<SessionState>,
    last_error: Option<String>,
}

#[derive(Debug)]
enum SessionState {
    Parsed(ParsedCsv),
    Mapped(ParsedCsv, Mapping),
    Finished,
    Failed,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ImportState {
        match &self.state {
            None => ImportState::Idle,
            Some(SessionState::Parsed(_)) => ImportState::Parsed,
            Some(SessionState::Mapped(_, _)) => ImportState::Mapping,
            Some(SessionState::Finished) => ImportState::Done,
            Some(SessionState::Failed) => ImportState::Error,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn load<R: io::Read>(&mut self, reader: R) -> Result<&ParsedCsv, ImportError> {
        self.last_error = None;
        match parse_csv(reader) {
            Ok(parsed) => {
                self.state = Some(SessionState::Parsed(parsed));
                match &self.state {
                    Some(SessionState::Parsed(parsed)) => Ok(parsed),
                    _ => unreachable!("state just set"),
                }
            }
            Err(err) => {
                self.state = Some(SessionState::Failed);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn headers(&self) -> Option<&[String]> {
        match &self.state {
            Some(SessionState::Parsed(parsed)) | Some(SessionState::Mapped(parsed, _)) => {
                Some(&parsed.headers)
            }
            _ => None,
        }
    }

    pub fn row_count(&self) -> usize {
        match &self.state {
            Some(SessionState::Parsed(parsed)) | Some(SessionState::Mapped(parsed, _)) => {
                parsed.rows.len()
            }
            _ => 0,
        }
    }

    pub fn set_mapping(&mut self, mapping: Mapping) -> Result<(), ImportError> {
        if mapping.is_empty() {
            return Err(ImportError::Validation(
                "no target fields mapped".to_string(),
            ));
        }
        match self.state.take() {
            Some(SessionState::Parsed(parsed)) | Some(SessionState::Mapped(parsed, _)) => {
                self.state = Some(SessionState::Mapped(parsed, mapping));
                Ok(())
            }
            other => {
                self.state = other;
                Err(ImportError::Validation(
                    "no parsed file to map".to_string(),
                ))
            }
        }
    }

    /// Coerced records without any store interaction; requires a mapping.
    pub fn preview(&self) -> Result<Vec<BuyerDraft>, ImportError> {
        match &self.state {
            Some(SessionState::Mapped(parsed, mapping)) => build_records(parsed, mapping),
            _ => Err(ImportError::Validation(
                "import is not ready to run".to_string(),
            )),
        }
    }

    /// Coerces, dedupes, and submits. On success the transient rows are
    /// dropped and the caller reloads its buyer collection.
    pub fn run<F>(
        &mut self,
        sink: &mut dyn BuyerSink,
        options: &ImportOptions,
        progress: F,
    ) -> Result<ImportReport, ImportError>
    where
        F: FnMut(u8),
    {
        let (parsed, mapping) = match self.state.take() {
            Some(SessionState::Mapped(parsed, mapping)) => (parsed, mapping),
            other => {
                self.state = other;
                return Err(ImportError::Validation(
                    "import is not ready to run".to_string(),
                ));
            }
        };

        let outcome = build_records(&parsed, &mapping)
            .and_then(|records| run_import(records, sink, options, progress));
        match outcome {
            Ok(report) => {
                self.state = Some(SessionState::Finished);
                self.last_error = None;
                Ok(report)
            }
            Err(err) => {
                self.state = Some(SessionState::Failed);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = None;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        build_records, parse_csv, run_import, BuyerSink, DedupePolicy, ImportOptions,
        ImportSession, ImportState,
    };
    use crate::error::ImportError;
    use crate::mapping::Mapping;
    use crate::record::BuyerDraft;

    #[derive(Default)]
    struct MemorySink {
        batches: Vec<Vec<BuyerDraft>>,
        fail_on_batch: Option<usize>,
    }

    impl BuyerSink for MemorySink {
        fn insert_batch(&mut self, batch: &[BuyerDraft]) -> Result<(), ImportError> {
            if self.fail_on_batch == Some(self.batches.len() + 1) {
                return Err(ImportError::Store("duplicate key value".to_string()));
            }
            self.batches.push(batch.to_vec());
            Ok(())
        }
    }

    fn drafts(count: usize) -> Vec<BuyerDraft> {
        (0..count)
            .map(|i| BuyerDraft {
                fname: Some(format!("Buyer {i}")),
                email: Some(format!("buyer{i}@example.com")),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn parse_skips_empty_lines_and_keeps_headers() {
        let data = "Email,Score\nann@example.com,90\n\n,,\nbob@example.com,70\n";
        let parsed = parse_csv(data.as_bytes()).expect("parse");
        assert_eq!(parsed.headers, vec!["Email", "Score"]);
        assert_eq!(parsed.rows.len(), 2);
    }

    #[test]
    fn parse_surfaces_parser_message() {
        let data: &[u8] = b"Email,Score\nann@example.com,90\n\xff\xfe,50\n";
        let err = parse_csv(data).unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn build_records_requires_a_mapping() {
        let parsed = parse_csv("Email\nann@example.com\n".as_bytes()).expect("parse");
        let err = build_records(&parsed, &Mapping::default()).unwrap_err();
        assert!(matches!(err, ImportError::Validation(_)));
    }

    #[test]
    fn build_records_coerces_and_defaults() {
        let data = "Email,Score,Is VIP?,Tags\nann@example.com,,Yes,\"Investor, Cash Buyer\"\n";
        let parsed = parse_csv(data.as_bytes()).expect("parse");
        let mapping = Mapping::auto(&parsed.headers);
        let records = build_records(&parsed, &mapping).expect("build");
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.email.as_deref(), Some("ann@example.com"));
        // Empty score cell is absent at coercion time, then defaulted.
        assert_eq!(record.score, Some(0));
        assert_eq!(record.vip, Some(true));
        assert_eq!(record.status.as_deref(), Some("lead"));
        assert_eq!(
            record.tags,
            Some(vec!["Investor".to_string(), "Cash Buyer".to_string()])
        );
    }

    #[test]
    fn progress_sequence_for_120_records_in_batches_of_50() {
        let mut sink = MemorySink::default();
        let mut seen = Vec::new();
        let report = run_import(
            drafts(120),
            &mut sink,
            &ImportOptions::new(50),
            |percent| seen.push(percent),
        )
        .expect("run");

        assert_eq!(seen, vec![42, 83, 100]);
        assert_eq!(report.inserted, 120);
        assert_eq!(report.batches, 3);
        assert_eq!(sink.batches.len(), 3);
        assert_eq!(sink.batches[0].len(), 50);
        assert_eq!(sink.batches[2].len(), 20);
    }

    #[test]
    fn failing_batch_aborts_and_keeps_prior_batches() {
        let mut sink = MemorySink {
            fail_on_batch: Some(2),
            ..Default::default()
        };
        let mut seen = Vec::new();
        let err = run_import(
            drafts(150),
            &mut sink,
            &ImportOptions::new(50),
            |percent| seen.push(percent),
        )
        .unwrap_err();

        assert_eq!(err, ImportError::Store("duplicate key value".to_string()));
        // Batch 1 persisted, batch 3 never attempted.
        assert_eq!(sink.batches.len(), 1);
        assert_eq!(seen, vec![33]);
    }

    #[test]
    fn dedupe_skips_existing_and_in_file_duplicates() {
        let mut records = drafts(3);
        records.push(records[0].clone());

        let mut options = ImportOptions::new(50);
        options.dedupe = DedupePolicy::Email;
        options
            .existing_keys
            .insert("buyer1@example.com".to_string());

        let mut sink = MemorySink::default();
        let report = run_import(records, &mut sink, &options, |_| {}).expect("run");
        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped_duplicates, 2);
    }

    #[test]
    fn session_walks_the_state_machine() {
        let mut session = ImportSession::new();
        assert_eq!(session.state(), ImportState::Idle);

        let data = "Email,Score\nann@example.com,90\nbob@example.com,70\n";
        session.load(data.as_bytes()).expect("load");
        assert_eq!(session.state(), ImportState::Parsed);
        assert_eq!(session.row_count(), 2);

        let headers: Vec<String> = session.headers().expect("headers").to_vec();
        session
            .set_mapping(Mapping::auto(&headers))
            .expect("mapping");
        assert_eq!(session.state(), ImportState::Mapping);

        let mut sink = MemorySink::default();
        let report = session
            .run(&mut sink, &ImportOptions::new(50), |_| {})
            .expect("run");
        assert_eq!(session.state(), ImportState::Done);
        assert_eq!(report.inserted, 2);

        session.reset();
        assert_eq!(session.state(), ImportState::Idle);
    }

    #[test]
    fn session_rejects_running_without_mapping() {
        let mut session = ImportSession::new();
        session
            .load("Email\nann@example.com\n".as_bytes())
            .expect("load");
        let mut sink = MemorySink::default();
        let err = session
            .run(&mut sink, &ImportOptions::new(50), |_| {})
            .unwrap_err();
        assert!(matches!(err, ImportError::Validation(_)));
        // The parsed file survives an invalid transition.
        assert_eq!(session.state(), ImportState::Parsed);
    }

    #[test]
    fn session_records_parse_failures() {
        let mut session = ImportSession::new();
        let data: &[u8] = b"Email\n\xff\xfe\n";
        let err = session.load(data).unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
        assert_eq!(session.state(), ImportState::Error);
        assert!(session.last_error().is_some());
        assert_eq!(session.row_count(), 0);
    }

    #[test]
    fn empty_mapping_cannot_be_set() {
        let mut session = ImportSession::new();
        session
            .load("Email\nann@example.com\n".as_bytes())
            .expect("load");
        let err = session.set_mapping(Mapping::default()).unwrap_err();
        assert!(matches!(err, ImportError::Validation(_)));
    }
}
