pub mod order_service;
pub mod webhook_service;

#[cfg(test)]
pub(crate) mod fakes;
