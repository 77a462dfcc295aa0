pub mod batch;
pub mod config;
pub mod extract;
pub mod pipeline;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;
