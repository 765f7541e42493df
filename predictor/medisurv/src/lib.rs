//! Web front end for the breast cancer 10-year survival predictor.

pub mod page;
pub mod server;
