pub mod cmd;
pub mod result;
pub mod serde;
pub mod settings;
