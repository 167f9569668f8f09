use log::{debug, trace};

use super::controller::PlayerController;
use super::messages::{PlayerMessage, PlayerUpdate};

/// Route one player message to the controller.
pub fn update_player(
    controller: &mut PlayerController,
    message: PlayerMessage,
) -> PlayerUpdate {
    trace!("[Player] {}", message.name());

    match message {
        PlayerMessage::Open { source, poster } => controller.open(source, poster),
        PlayerMessage::Close => controller.close(),
        PlayerMessage::TogglePlay => controller.toggle_play(),
        PlayerMessage::Seek(percentage) => controller.seek(percentage),
        PlayerMessage::SetVolume(volume) => controller.set_volume(volume),
        PlayerMessage::ToggleMute => controller.toggle_mute(),
        PlayerMessage::ToggleFullscreen => controller.toggle_fullscreen(),
        PlayerMessage::DismissAd => match controller.dismiss_ad() {
            Ok(update) => update,
            Err(err) => {
                debug!("[Player] Ignoring dismiss: {err}");
                PlayerUpdate::none()
            }
        },
        PlayerMessage::PointerMoved => controller.pointer_moved(),
        PlayerMessage::SetAdOverlay(overlay) => controller.set_ad_overlay(overlay),
        PlayerMessage::Media(event) => controller.handle_media_event(event),
        PlayerMessage::Tick(elapsed) => controller.advance(elapsed),
    }
}
