//! NAB Market application layer: configuration, logging, preference storage and the listing
//! submission workflow around the core query engine.

pub mod config;
pub mod context;
pub mod observability;
pub mod preferences;
pub mod seller;
pub mod submissions;
pub mod uuids;
