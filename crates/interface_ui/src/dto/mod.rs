//! Wire types for the collection endpoint

pub mod collection;

pub use collection::{CollectionRequest, CollectionResponse, CollectionStats, RemainderActionCode};
