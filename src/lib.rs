//! Async client for the Kuaidi100 logistics-tracking aggregation service.
//!
//! Three things live here:
//!
//! - [`Kuaidi100Client::query`] — fetch the current tracking log of a parcel
//!   by carrier display name and tracking number.
//! - [`Kuaidi100Client::subscribe`] — register a push subscription so the
//!   provider POSTs status changes to a callback URL.
//! - [`decode_callback`] — decode the body of such a callback into the same
//!   [`TrackingResult`] a direct query produces.
//!
//! Carrier display names are resolved to provider carrier codes through a
//! bundled dataset (see [`CarrierRegistry`]); lookups are case-insensitive.
//! The crate does not retry, cache, or validate tracking-number formats.

pub mod callback;
pub mod carriers;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod signature;

pub use callback::decode_callback;
pub use carriers::{CarrierRegistry, carrier_names};
pub use client::Kuaidi100Client;
pub use config::Config;
pub use error::TrackError;
pub use models::{LogEntry, TrackingResult, TrackingState};
