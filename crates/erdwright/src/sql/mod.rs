//! Schema model to SQL DDL conversion.

mod dialect;
mod naming;
mod script;
mod types;

pub use dialect::{Dialect, SCRIPT_MIME_TYPE};
pub use naming::{ConstraintNamer, MAX_CONSTRAINT_NAME_LEN};
pub use script::{
    format_default_value, generate_script, generate_script_at, quote_identifier, ScriptRenderer,
};
pub use types::{map_type, GENERIC_TYPES};
