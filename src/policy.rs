//! Track transition table of a player.
//!
//! [`transition`] applies a [`Signal`] to a [`PlayerState`] and returns what
//! the manager must do afterwards. It never performs I/O itself, so it can run
//! while the player's lock is held.

use crate::{
    error::TransportError,
    model::{player::PlayerState, track::Track},
    transport::Signal
};

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Playback began, emit `track_start`.
    Start(Option<Track>),
    /// Same track again, emit `track_end` and play.
    RepeatTrack(Track),
    /// Finished track went to the back of the queue, emit `track_end` and play.
    CycleQueue(Track),
    /// Moved to the next track. `track_end` is only emitted for `Some`.
    Advance(Option<Track>),
    /// Nothing left, emit `queue_end` and destroy the player.
    QueueEnd(Option<Track>),
    Error(TransportError)
}

pub fn transition(state: &mut PlayerState, signal: Signal) -> Transition {
    match signal {
        Signal::Ready => {
            state.playing = true;
            state.paused = false;

            Transition::Start(state.queue.current.clone())
        },
        Signal::Finish => finish(state),
        Signal::Error(e) => Transition::Error(e)
    }
}

fn finish(state: &mut PlayerState) -> Transition {
    let queue = &mut state.queue;

    if let Some(track) = queue.current.clone() {
        if state.track_repeat {
            return Transition::RepeatTrack(track);
        }

        if state.queue_repeat {
            queue.upcoming.push_back(track.clone());
            queue.current = queue.shift();

            return Transition::CycleQueue(track);
        }
    }

    if !queue.is_empty() {
        let finished = queue.current.take();

        if let Some(ref track) = finished {
            queue.previous.push(track.clone());
        }

        queue.current = queue.shift();

        return Transition::Advance(finished);
    }

    let last = queue.current.take();

    if let Some(ref track) = last {
        queue.previous.push(track.clone());
    }

    state.playing = false;
    state.paused = false;

    Transition::QueueEnd(last)
}
