//! Car catalog service module

mod service;

#[cfg(test)]
mod tests;

pub use service::CatalogService;
