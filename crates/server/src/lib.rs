pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod subscriptions;

pub use startup::run;
