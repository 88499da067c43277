pub mod panic;
pub mod trace;
