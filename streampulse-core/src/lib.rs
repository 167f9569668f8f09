//! # StreamPulse Core
//!
//! In-memory application state shared by the viewer and the CMS surfaces.
//!
//! - [`store::AppStore`]: the single owned state structure. Movies,
//!   newsletter subscribers, email templates and ad-zone placements live here and are only
//!   changed through its mutators.
//! - [`newsletter`]: placeholder substitution for email subjects and HTML
//!   bodies.
//! - [`seed`]: the demo catalog the application boots with.

pub mod error;
pub mod newsletter;
pub mod seed;
pub mod store;

pub use error::{Result, StoreError};
pub use newsletter::{RenderedEmail, TemplateVars, render_email, render_template};
pub use store::AppStore;
