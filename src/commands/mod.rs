pub mod done;
pub mod login;
pub mod note;
pub mod plan;
pub mod start_date;
pub mod status;
pub mod today;
