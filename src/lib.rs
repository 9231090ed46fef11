//! Courier Engine
//!
//! This crate prices parcel deliveries from a configurable tariff and
//! aggregates rider earnings from completed deliveries, as a library and as a
//! small JSON HTTP service.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
