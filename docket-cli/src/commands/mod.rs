pub mod agenda;
pub mod calendar;
pub mod case;
pub mod cases;
pub mod delete;
pub mod delete_case;
pub mod edit;
pub mod new;
pub mod outcome;
pub mod schedule_hearing;
pub mod session;
pub mod upload;
