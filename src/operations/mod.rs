pub mod add;
pub mod report;
pub mod shell;
