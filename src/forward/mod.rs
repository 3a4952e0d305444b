//! Forward engineering
//!
//! Turns modelled container schemas back into a script that stores them as
//! validation schemas in the schema database.

mod apply;
mod error;
mod schema;
mod script;

pub use apply::ApplyTarget;
pub use error::{ForwardError, ForwardResult};
pub use schema::{
    ADOPTED_KEYWORDS, ENVELOPE_KEYWORDS, ValidationSchemaData, adopt_schema, adopt_type,
    schema_uri,
};
pub use script::{
    SCHEMA_SCRIPT_PREAMBLE, generate_container_script, insert_statement, render_schema_script,
};
