pub mod carryover;
pub mod draft;

pub use carryover::{detect_unclear_items, merge_unclear_items};
pub use draft::{merge_with_resolutions, parse, render};
