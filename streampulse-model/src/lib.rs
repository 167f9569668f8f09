//! Core data model definitions shared across StreamPulse crates.
#![allow(missing_docs)]

pub mod ads;
pub mod category;
pub mod error;
pub mod ids;
pub mod markup;
pub mod media;
pub mod source;
pub mod subscriber;
pub mod template;

// Intentionally curated re-exports for downstream consumers.
pub use ads::{AdConfig, AdPlacement, AdZone, VIDEO_PAUSE_ZONE};
pub use category::CategoryCount;
pub use error::{ModelError, Result as ModelResult};
pub use ids::{MovieID, SubscriberID};
pub use markup::TrustedMarkup;
pub use media::Movie;
pub use source::{DEFAULT_ADAPTIVE_EXTENSIONS, MediaKind, MediaSource};
pub use subscriber::{Subscriber, SubscriptionStatus};
pub use template::EmailTemplate;
