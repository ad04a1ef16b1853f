/// All CMS entity identifiers are integers.
pub type DbId = i64;
