//! Service layer providing business-oriented subscription operations on top
//! of models.
//! - Separates request-shape concerns (dto, mapper) from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod dto;
pub mod errors;
pub mod mapper;
pub mod subscription_service;
#[cfg(test)]
pub mod test_support;
