//! Player domain
//!
//! Playback controller, pause-ad state machine, controls auto-hide and the
//! host traits a video surface implements.

pub mod ad_break;
pub mod controller;
pub mod controls;
pub mod messages;
pub mod state;
pub mod update;
pub mod video;
pub mod video_backend;

pub use ad_break::{AdBreakError, AdBreakPhase, AdBreakState};
pub use controller::PlayerController;
pub use controls::format_time;
pub use messages::{MediaEvent, PlayerMessage, PlayerNotice, PlayerUpdate};
pub use state::{PlaybackState, SourceStatus};
pub use update::update_player;
