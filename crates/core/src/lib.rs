//! Core analytics abstractions: the canonical event taxonomy, the context
//! payload model, the provider contract and the normalizer registry shared by
//! every analytics provider.

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod normalizers;
pub mod provider;

pub use crate::config::{CommonConfiguration, EngageConfig};
pub use context::{ContextData, Dictionary, HitType};
pub use error::{EngageError, EngageResult};
pub use events::{CanonicalEvent, EventKind};
pub use normalizers::{EventNormalizers, Normalizer};
pub use provider::AnalyticsProvider;
