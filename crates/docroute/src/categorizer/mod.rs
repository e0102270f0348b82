pub mod matcher;

pub use matcher::{Categorization, Categorizer, DocumentType, Rule};
