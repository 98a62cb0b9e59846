pub mod add;
pub mod commissions;
pub mod help;
pub mod list;
pub mod start;
