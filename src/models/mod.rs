mod report;

pub use report::{Report, ReportCategory, ReportInput};
