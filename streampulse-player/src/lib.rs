//! StreamPulse player library
//!
//! The playback controller and its pause-ad state machine live under
//! [`domains::player`]. [`app`] wires them to a headless host for the
//! `streampulse-player` binary; [`infra`] holds the virtual-clock timers.
//!
//! Notes
//! - Hosts implement the traits in `domains::player::video_backend` and feed
//!   their signals back as `MediaEvent`s.
//! - Nothing here reads the wall clock; time only moves through
//!   `PlayerMessage::Tick`.

pub mod app;
pub mod domains;
pub mod infra;
