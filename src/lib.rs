pub mod api; // Local HTTP surface for the form front end
pub mod config;
pub mod interactions; // Static pairwise interaction table
pub mod report; // Pair enumeration + plain-text export
pub mod severity; // Keyword classifier + patient escalation
