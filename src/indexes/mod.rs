//! Index definition translation
//!
//! Maps between the database's admin index configuration and a typed model, in
//! both directions:
//!
//! - **Extraction** - per-family admin XML responses become an [`IndexConfiguration`]
//! - **Generation** - an [`IndexConfiguration`] becomes an installation script with
//!   collision-free identifiers
//!
//! Ten families are supported, grouped into range, geospatial point and
//! geospatial region indexes (see [`IndexKind`]).

mod extract;
mod generator;
mod identifiers;
mod kinds;
mod parser;
mod types;

pub use extract::{IndexResponses, extract_indexes};
pub use generator::{SCRIPT_EPILOGUE, parse_leading_int, render_index_script, script_preamble};
pub use identifiers::{
    DEFAULT_IDENTIFIER, IdentifierAllocator, RESERVED_IDENTIFIERS, sanitize_identifier,
};
pub use kinds::{IndexGroup, IndexKind};
pub use parser::{AttributeSet, definition_from_attributes, parse_family};
pub use types::{
    AttributeRangeIndex, ElementRangeIndex, FieldRangeIndex, GeoElementChildIndex,
    GeoElementIndex, GeoPairIndex, GeoPathIndex, GeoPointIndex, GeoRegionIndex,
    GeoRegionPathIndex, IndexConfiguration, IndexDefinition, IndexRecord, PathRangeIndex,
    RangeIndex, RawResponse,
};
