//! Publish utils for the Move package

pub mod publisher;

pub use publisher::MovePublisher;
