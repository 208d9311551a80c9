pub mod claims;
pub mod orders;
pub mod webhook;
