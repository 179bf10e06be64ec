// Business domains
pub mod messages;
