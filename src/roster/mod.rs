pub mod normalize;
pub mod source;
pub mod types;

pub use normalize::{coerce_cell, normalize_roster, normalize_row};
pub use source::{
    fetch_roster, get_source_from_env, parse_roster_bytes, parse_roster_csv, parse_roster_xlsx,
    SourceError, ENV_SOURCE_VAR,
};
pub use types::{Member, RawRow, INPUT_COLUMNS};
