pub mod status;
pub mod time;
