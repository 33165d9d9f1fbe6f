//! Request-processing middleware and extractors.
//!
//! - [`auth`]: Bearer-token extractor used by the `/me` style endpoints

pub mod auth;
