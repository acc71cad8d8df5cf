//! Adobe Analytics provider: maps canonical events onto the Adobe SDK's
//! `trackState` / `trackAction` primitives.
//!
//! # Modules
//!
//! - [`adapter`]: SDK boundary trait the provider drives
//! - [`provider`]: [`AdobeAnalyticsProvider`], default translations and normalizer routing
//! - [`serialize`]: `&&products` encoding and hit-name derivation
//! - [`clients`]: tracing-backed and recording SDK clients

pub mod adapter;
pub mod clients;
pub mod provider;
pub mod serialize;

pub use adapter::AdobeAnalyticsApi;
pub use clients::{ClientCall, RecordingClient, TracingClient};
pub use provider::{AdapterConfig, AdobeAnalyticsProvider};
pub use serialize::{
    generate_action_name, serialize_product, serialize_products, ProductFields, ProductRecord,
    PRODUCTS_KEY,
};
