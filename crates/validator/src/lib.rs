// Validation: nav and sidebar links against the content tree, body links,
// trailing-slash diagnostics

pub mod content;
pub mod links;
pub mod report;

pub use content::{ContentIndex, Resolution};
pub use report::{ValidationReport, validate_links, validate_site};
