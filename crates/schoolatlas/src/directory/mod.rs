//! School-directory domain: school records, the composite rating engine, and
//! the roll importer feeding both.

pub mod import;
pub mod schools;
