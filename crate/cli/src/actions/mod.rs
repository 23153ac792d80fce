pub mod console;
pub mod resolve;
pub mod validate;
