pub mod members;
pub mod ping;
pub mod webhook;
