use super::queue::Queue;

/// Mutable half of a [`Player`], guarded by the player's lock.
///
/// [`Player`]: crate::player::Player
#[derive(Clone, Debug, Default)]
pub struct PlayerState {
    pub queue: Queue,
    pub playing: bool,
    pub paused: bool,
    pub track_repeat: bool,
    pub queue_repeat: bool
}
