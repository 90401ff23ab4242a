pub mod extract;
pub mod ident;
pub mod types;

pub use ident::{extract_jira_id, normalize_key};
pub use types::*;
