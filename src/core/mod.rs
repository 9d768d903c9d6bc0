pub mod backup;
pub mod calendar;
pub mod ledger;
pub mod log;
pub mod mark;
pub mod member;
pub mod program;
pub mod stats;
