pub mod coerce;
pub mod error;
pub mod mapping;
pub mod pipeline;
pub mod record;
pub mod schema;

pub use error::ImportError;
pub use mapping::Mapping;
pub use pipeline::{
    parse_csv, run_import, BuyerSink, DedupePolicy, ImportOptions, ImportReport, ImportSession,
    ImportState, ParsedCsv, DEFAULT_BATCH_SIZE,
};
pub use record::BuyerDraft;
pub use schema::{template_csv, FieldKey, FieldKind, TargetField, TARGET_FIELDS};
