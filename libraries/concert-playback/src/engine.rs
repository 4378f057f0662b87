//! Playback engine - core orchestration
//!
//! Owns the two audio slots, the upcoming queues and the history. Decides
//! which slot is active, when to buffer ahead, and whether a transition is
//! gapless or discrete.
//!
//! The engine is single-threaded and event-driven. The host drives it with
//! three inputs:
//! - commands (the public methods, or [`crate::Command`] via `apply`)
//! - periodic [`PlaybackEngine::tick`] calls while audio is playing
//! - [`MediaEvent`]s forwarded from the media backend

use crate::{
    backend::{MediaBackend, MediaEvent, MediaEventKind, UnitToken},
    config::EngineConfig,
    error::{MediaError, PlaybackError},
    events::{ListenerId, Notifier, PlaybackListener, PlaybackSnapshot},
    history::History,
    queue::UpcomingQueue,
    repeat::{self, EndAction},
    shuffle::{shuffler_for, Shuffler},
    slots::{SlotId, Slots},
    types::{LoadErrorPolicy, PlaybackStatus, RepeatMode},
    unit::AudioUnit,
    volume::Volume,
};
use concert_core::{AlwaysValid, SessionGate, Track, UniqueId};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// How the outgoing track is left behind when a new one is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// User-initiated change; the outgoing unit is paused
    Discrete,

    /// The outgoing track reached its natural end
    Natural,

    /// Early start near the end; the outgoing unit plays out its tail
    Gapless,
}

/// Gapless dual-buffer playback engine
pub struct PlaybackEngine<B: MediaBackend> {
    backend: B,
    config: EngineConfig,

    slots: Slots,
    queue: UpcomingQueue,
    history: History,
    volume: Volume,
    repeat: RepeatMode,
    shuffler: Box<dyn Shuffler>,
    session: Box<dyn SessionGate>,
    notifier: Notifier,

    current: Option<Track>,
    is_paused: bool,
    position: f64,
    duration: f64,

    // Outgoing unit whose natural end must be swallowed
    gapless_pending: Option<UnitToken>,

    generation: u64,
}

impl<B: MediaBackend> PlaybackEngine<B> {
    /// Create an engine with default configuration
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, EngineConfig::default())
    }

    /// Create an engine with the given configuration
    pub fn with_config(backend: B, config: EngineConfig) -> Self {
        Self {
            backend,
            slots: Slots::new(),
            queue: UpcomingQueue::new(),
            history: History::new(config.history_size),
            volume: Volume::new(config.volume, config.volume_curve),
            repeat: config.repeat,
            shuffler: shuffler_for(config.shuffle),
            session: Box::new(AlwaysValid),
            notifier: Notifier::new(),
            current: None,
            is_paused: true,
            position: 0.0,
            duration: 0.0,
            gapless_pending: None,
            generation: 0,
            config,
        }
    }

    /// Use a custom shuffle policy
    #[must_use]
    pub fn with_shuffler(mut self, shuffler: impl Shuffler + 'static) -> Self {
        self.shuffler = Box::new(shuffler);
        self
    }

    /// Gate playback on a session validity signal
    #[must_use]
    pub fn with_session_gate(mut self, gate: impl SessionGate + 'static) -> Self {
        self.session = Box::new(gate);
        self
    }

    /// Replace the shuffle policy
    pub fn set_shuffler(&mut self, shuffler: Box<dyn Shuffler>) {
        self.shuffler = shuffler;
    }

    /// Register a listener
    pub fn subscribe(&mut self, listener: impl PlaybackListener + 'static) -> ListenerId {
        self.notifier.subscribe(Box::new(listener))
    }

    /// Remove a listener
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Media backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable media backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ===== Queue Commands =====

    /// Replace the queue and start playing `tracks[start_index]`
    ///
    /// Both slots are discarded and the priority tier is cleared. Tracks
    /// before `start_index` become history; an out-of-bounds index starts at
    /// the first track. Every track gets a fresh enqueue identity.
    pub fn play_tracks(&mut self, tracks: Vec<Track>, start_index: usize) {
        if !self.ensure_session() {
            return;
        }

        self.gapless_pending = None;
        self.slots.clear();

        let was_shuffled = self.queue.is_shuffled();
        self.queue.clear();

        let mut played: Vec<Track> = tracks.into_iter().map(Track::reissued).collect();
        let start = if start_index < played.len() { start_index } else { 0 };
        let mut upcoming = played.split_off(start);
        let first = if upcoming.is_empty() {
            None
        } else {
            Some(upcoming.remove(0))
        };

        info!(
            history = played.len(),
            upcoming = upcoming.len(),
            "Replacing play queue"
        );

        self.history.replace_with_played(played);
        self.queue.set_next(upcoming);
        if was_shuffled {
            self.queue.enable_shuffle(self.shuffler.as_mut());
        }

        if let Some(abandoned) = self.current.take() {
            self.notifier.track_ended(&abandoned);
        }

        self.select_next(first, Transition::Discrete);
    }

    /// Append tracks to the priority tier
    ///
    /// If the tier was empty, the new head is buffered right away.
    pub fn queue_priority_tracks(&mut self, tracks: Vec<Track>) {
        let had_priority = self.queue.has_priority();
        self.queue
            .queue_priority(tracks.into_iter().map(Track::reissued));

        if !had_priority {
            self.buffer_next_track();
        }
        self.notify();
    }

    /// Remove the priority track with this enqueue identity (idempotent)
    pub fn remove_priority_track(&mut self, unique_id: &UniqueId) {
        if self.queue.remove_priority(unique_id).is_some() {
            self.buffer_next_track();
            self.notify();
        }
    }

    /// Drop every priority track
    pub fn clear_priority_tracks(&mut self) {
        if self.queue.has_priority() {
            self.queue.clear_priority();
            self.buffer_next_track();
            self.notify();
        }
    }

    // ===== Playback Control =====

    /// Resume the active track, or start the next one
    pub fn play(&mut self) {
        if !self.ensure_session() {
            return;
        }

        let Some(unit) = self.slots.active_unit_mut() else {
            self.select_next(None, Transition::Discrete);
            return;
        };

        match unit.play() {
            Ok(()) => self.is_paused = false,
            Err(e) => {
                let track = unit.track().clone();
                self.report_error(PlaybackError::Transport(e), Some(&track));
            }
        }
        self.notify();
    }

    /// Pause playback (idempotent)
    ///
    /// A gapless tail still playing from the previous track is dropped.
    pub fn pause(&mut self) {
        if let Some(token) = self.gapless_pending.take() {
            debug!(slot = ?token.slot, "Dropping gapless tail on pause");
            self.discard_slot(token.slot);
            self.buffer_next_track();
        }

        let was_paused = self.is_paused;
        self.is_paused = true;

        if let Some(unit) = self.slots.active_unit_mut() {
            if let Err(e) = unit.pause() {
                let track = unit.track().clone();
                self.report_error(PlaybackError::Transport(e), Some(&track));
            }
        }

        if !was_paused {
            self.notify();
        }
    }

    /// Seek within the current track
    ///
    /// The position is clamped to `[0, duration]`; NaN means 0. Returns the
    /// position actually used, or 0 without an active track.
    pub fn seek(&mut self, position: f64) -> f64 {
        let Some(unit) = self.slots.active_unit_mut() else {
            return 0.0;
        };

        let position = if position.is_nan() { 0.0 } else { position };
        let duration = unit.duration().unwrap_or(unit.track().duration).max(0.0);
        let clamped = position.clamp(0.0, duration);

        if let Err(e) = unit.seek(clamped) {
            let track = unit.track().clone();
            self.report_error(PlaybackError::Transport(e), Some(&track));
        }

        self.position = clamped;
        self.notify();
        clamped
    }

    /// Seek relative to the current position, clamped like [`Self::seek`]
    pub fn seek_by(&mut self, delta: f64) -> f64 {
        let Some(unit) = self.slots.active_unit() else {
            return 0.0;
        };
        let delta = if delta.is_nan() { 0.0 } else { delta };
        let target = unit.position() + delta;
        self.seek(target)
    }

    /// Skip to the next track
    pub fn next_track(&mut self) {
        self.gapless_pending = None;
        self.pause_active();
        self.select_next(None, Transition::Discrete);
    }

    /// Go back
    ///
    /// Restarts the current track when it has played for at least the
    /// restart threshold or there is no history. Otherwise the most recent
    /// history entry becomes current and the current track goes back to the
    /// head of the continuation.
    pub fn previous_track(&mut self) {
        self.gapless_pending = None;

        let Some(unit) = self.slots.active_unit() else {
            if let Some(previous) = self.history.pop() {
                self.select_next(Some(previous), Transition::Discrete);
            }
            return;
        };

        if unit.position() >= self.config.restart_threshold_secs || self.history.is_empty() {
            debug!("Restarting current track");
            self.seek(0.0);
            return;
        }

        let Some(previous) = self.history.pop() else {
            return;
        };

        if let Some(current) = self.current.take() {
            self.queue.push_front_next(current.clone());
            self.notifier.track_ended(&current);
        }

        self.pause_active();
        self.select_next(Some(previous), Transition::Discrete);
    }

    // ===== Settings =====

    /// Set the volume in percent
    ///
    /// `<= 0` mutes and keeps the stored level. Non-finite values are
    /// ignored.
    pub fn set_volume(&mut self, percent: f32) {
        if self.volume.set_percent(percent) {
            self.apply_gain();
            self.notify();
        }
    }

    /// Mute output (keeps the volume level)
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_gain();
        self.notify();
    }

    /// Unmute output
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_gain();
        self.notify();
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_gain();
        self.notify();
    }

    /// Set the repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        if let Some(unit) = self.slots.active_unit_mut() {
            unit.set_looping(repeat::uses_native_loop(mode));
        }
        self.notify();
    }

    /// Shuffle the continuation (no-op when already shuffled)
    pub fn enable_shuffle(&mut self) {
        if self.queue.enable_shuffle(self.shuffler.as_mut()) {
            debug!(tracks = self.queue.next().len(), "Shuffle enabled");
            self.buffer_next_track();
            self.notify();
        }
    }

    /// Restore the continuation to its original order
    pub fn disable_shuffle(&mut self) {
        if self.queue.disable_shuffle() {
            debug!("Shuffle disabled");
            self.buffer_next_track();
            self.notify();
        }
    }

    // ===== Host Inputs =====

    /// Poll progress of the active track
    ///
    /// Call periodically while playing. Starts the next track early when the
    /// remaining time drops below the gapless threshold.
    pub fn tick(&mut self) {
        let Some(unit) = self.slots.active_unit() else {
            return;
        };
        if !unit.is_playing() {
            return;
        }

        let token = unit.token();
        self.position = unit.position();
        if let Some(duration) = unit.duration() {
            self.duration = duration;
        }
        self.notify();

        let remaining = self.duration - self.position;
        if self.gapless_pending.is_none()
            && repeat::allows_gapless(self.repeat)
            && self.duration > 0.0
            && remaining < self.config.gapless_threshold_secs
            && self.queue.peek_next().is_some()
        {
            debug!(remaining, "Starting gapless transition");
            self.gapless_pending = Some(token);
            self.select_next(None, Transition::Gapless);
        }
    }

    /// Handle an event reported by the media backend
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        let token = event.token;
        let live = self
            .slots
            .get(token.slot)
            .is_some_and(|unit| unit.token() == token);
        if !live {
            debug!(?token, "Ignoring event for discarded unit");
            return;
        }

        let is_active = self.slots.active() == Some(token.slot);
        match event.kind {
            MediaEventKind::Loaded => self.on_loaded(token.slot, is_active),
            MediaEventKind::Ended => self.on_ended(token, is_active),
            MediaEventKind::Failed(error) => self.on_failed(token.slot, is_active, error),
        }
    }

    // ===== State Queries =====

    /// Track being played
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Whether playback is paused (true when nothing plays)
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Last known position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration of the current track in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Volume level (0-100)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Whether output is muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    /// Whether the continuation is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.queue.is_shuffled()
    }

    /// Explicitly queued tracks
    pub fn priority_tracks(&self) -> &VecDeque<Track> {
        self.queue.priority()
    }

    /// Continuation in playback order
    pub fn next_tracks(&self) -> &VecDeque<Track> {
        self.queue.next()
    }

    /// Continuation in original order
    pub fn non_shuffled_next_tracks(&self) -> &VecDeque<Track> {
        self.queue.non_shuffled()
    }

    /// Played tracks, most recent first
    pub fn previous_tracks(&self) -> &VecDeque<Track> {
        self.history.tracks()
    }

    /// Track that would play after the current one
    pub fn peek_next(&self) -> Option<&Track> {
        self.queue.peek_next()
    }

    /// Whether anything is upcoming
    pub fn has_next(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Whether there is history to go back to
    pub fn has_previous(&self) -> bool {
        !self.history.is_empty()
    }

    /// Active slot, if anything is playing
    pub fn active_slot(&self) -> Option<SlotId> {
        self.slots.active()
    }

    /// Track buffered in the standby slot
    pub fn buffered_track(&self) -> Option<&Track> {
        let standby = self.slots.standby()?;
        self.slots.get(standby).map(AudioUnit::track)
    }

    /// Derived playback status
    pub fn status(&self) -> PlaybackStatus {
        if self.current.is_none() {
            return PlaybackStatus::Stopped;
        }
        match self.slots.active_unit() {
            Some(unit) if !unit.is_loaded() && !self.is_paused => PlaybackStatus::Loading,
            _ if self.is_paused => PlaybackStatus::Paused,
            _ => PlaybackStatus::Playing,
        }
    }

    /// Immutable snapshot for UI layers
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            is_paused: self.is_paused,
            status: self.status(),
            position: self.position,
            duration: self.duration,
            repeat_mode: self.repeat,
            is_shuffled: self.queue.is_shuffled(),
            current_track: self.current.clone(),
            priority_tracks: self.queue.priority().iter().cloned().collect(),
            next_tracks: self.queue.next().iter().cloned().collect(),
            previous_tracks: self.history.tracks().iter().cloned().collect(),
        }
    }

    // ===== Internal: Selection =====

    /// Make the next track current
    ///
    /// The candidate is `override_track`, else the head of the queues. The
    /// previous current track goes to history unless it is the candidate.
    fn select_next(&mut self, override_track: Option<Track>, transition: Transition) {
        let mut candidate = override_track.or_else(|| self.queue.pop_next());
        let outgoing = self.slots.active();

        if let Some(current) = self.current.take() {
            let reselected = candidate
                .as_ref()
                .is_some_and(|c| c.is_same_instance(&current));
            if !reselected {
                self.history.push(current.clone());
                self.notifier.track_ended(&current);
            }
        }

        loop {
            let Some(track) = candidate.take() else {
                self.stop_at_end(outgoing);
                return;
            };

            let slot = self.slots.next_slot();
            match self.prepare_slot(slot, &track) {
                Ok(()) => {
                    self.start_slot(slot, track, outgoing, transition);
                    return;
                }
                Err(e) => {
                    warn!(track_id = %track.id, error = %e, "Failed to load track");
                    self.discard_slot(slot);
                    self.report_error(PlaybackError::Load(e), Some(&track));

                    match self.config.load_error_policy {
                        LoadErrorPolicy::Skip => candidate = self.queue.pop_next(),
                        LoadErrorPolicy::Halt => {}
                    }
                }
            }
        }
    }

    /// Ensure `slot` holds a unit for `track`, reusing a matching one
    fn prepare_slot(&mut self, slot: SlotId, track: &Track) -> Result<(), MediaError> {
        if let Some(unit) = self.slots.get_mut(slot) {
            if unit.url() == track.url {
                debug!(track_id = %track.id, ?slot, "Reusing buffered unit");
                unit.set_track(track.clone());
                return Ok(());
            }
        }

        self.discard_slot(slot);
        let unit = self.create_unit(slot, track)?;
        self.slots.replace(slot, unit);
        Ok(())
    }

    fn start_slot(
        &mut self,
        slot: SlotId,
        track: Track,
        outgoing: Option<SlotId>,
        transition: Transition,
    ) {
        self.slots.set_active(Some(slot));

        let gain = self.volume.gain();
        let looping = repeat::uses_native_loop(self.repeat);
        let mut errors = Vec::new();
        let mut loaded = false;
        let mut started = false;
        let mut duration = track.duration;

        if let Some(unit) = self.slots.get_mut(slot) {
            unit.set_looping(looping);
            errors.extend(unit.set_gain(gain).err());
            errors.extend(unit.seek(0.0).err());
            match unit.play() {
                Ok(()) => started = true,
                Err(e) => errors.push(e),
            }
            loaded = unit.is_loaded();
            if let Some(known) = unit.duration() {
                duration = known;
            }
        }

        info!(track_id = %track.id, name = %track.name, ?slot, ?transition, "Track started");

        self.duration = duration.max(0.0);
        self.position = 0.0;
        self.is_paused = !started;
        self.current = Some(track.clone());
        self.notifier.track_started(&track);

        for e in errors {
            self.report_error(PlaybackError::Transport(e), Some(&track));
        }

        if transition != Transition::Gapless {
            if let Some(outgoing) = outgoing.filter(|s| *s != slot) {
                self.pause_slot(outgoing);
            }
        }

        if loaded {
            self.buffer_next_track();
        }
        self.notify();
    }

    /// Quiet terminal state when nothing is left to play
    fn stop_at_end(&mut self, outgoing: Option<SlotId>) {
        if let Some(slot) = outgoing {
            let tail_playing = self.gapless_pending.is_some_and(|t| t.slot == slot);
            if !tail_playing {
                self.pause_slot(slot);
                self.discard_slot(slot);
            }
        }

        info!("Reached end of queue");
        self.slots.set_active(None);
        self.current = None;
        self.is_paused = true;
        self.position = 0.0;
        self.duration = 0.0;
        self.notify();
    }

    // ===== Internal: Buffering =====

    /// Load the upcoming track into the standby slot
    ///
    /// Skipped when the standby already holds that URL or is still playing a
    /// gapless tail.
    fn buffer_next_track(&mut self) {
        let Some(standby) = self.slots.standby() else {
            return;
        };

        if self.gapless_pending.is_some_and(|t| t.slot == standby) {
            debug!(?standby, "Standby busy with gapless tail, deferring buffer");
            return;
        }

        let Some(candidate) = self.queue.peek_next().cloned() else {
            return;
        };

        if self
            .slots
            .get(standby)
            .is_some_and(|unit| unit.url() == candidate.url)
        {
            debug!(track_id = %candidate.id, "Next track already buffered");
            return;
        }

        self.discard_slot(standby);
        match self.create_unit(standby, &candidate) {
            Ok(unit) => {
                debug!(track_id = %candidate.id, ?standby, "Buffering next track");
                self.slots.replace(standby, unit);
            }
            Err(e) => {
                warn!(track_id = %candidate.id, error = %e, "Failed to buffer next track");
                self.report_error(PlaybackError::Load(e), Some(&candidate));
            }
        }
    }

    fn create_unit(&mut self, slot: SlotId, track: &Track) -> Result<AudioUnit, MediaError> {
        self.generation += 1;
        let token = UnitToken {
            slot,
            generation: self.generation,
        };

        let handle = self.backend.create(&track.url, token)?;
        let mut unit = AudioUnit::new(token, track.clone(), handle);
        // Not loaded yet, so these only record the settings
        unit.set_gain(self.volume.gain())?;
        unit.set_looping(repeat::uses_native_loop(self.repeat));
        Ok(unit)
    }

    fn discard_slot(&mut self, slot: SlotId) {
        if let Some(unit) = self.slots.take(slot) {
            if self.gapless_pending == Some(unit.token()) {
                self.gapless_pending = None;
            }
        }
    }

    // ===== Internal: Media Events =====

    fn on_loaded(&mut self, slot: SlotId, is_active: bool) {
        let Some(unit) = self.slots.get_mut(slot) else {
            return;
        };

        let errors = unit.mark_loaded();
        let track = unit.track().clone();
        let duration = unit.duration();
        let play_rejected = unit.wants_play() && !unit.is_playing();
        debug!(track_id = %track.id, ?slot, is_active, "Unit loaded");

        for e in errors {
            self.report_error(PlaybackError::Transport(e), Some(&track));
        }

        if is_active {
            if play_rejected {
                self.is_paused = true;
            }
            if let Some(duration) = duration {
                self.duration = duration;
            }
            self.buffer_next_track();
            self.notify();
        }
    }

    fn on_ended(&mut self, token: UnitToken, is_active: bool) {
        if self.gapless_pending == Some(token) {
            debug!(?token, "Gapless tail finished");
            self.gapless_pending = None;
            self.buffer_next_track();
            return;
        }

        if !is_active {
            debug!(?token, "Ignoring end of standby unit");
            return;
        }

        match repeat::on_natural_end(self.repeat) {
            EndAction::Advance => self.select_next(None, Transition::Natural),
            EndAction::Restart { then } => {
                self.repeat = then;
                let mut errors = Vec::new();
                let mut track = None;

                if let Some(unit) = self.slots.active_unit_mut() {
                    unit.set_looping(repeat::uses_native_loop(then));
                    errors.extend(unit.seek(0.0).err());
                    errors.extend(unit.play().err());
                    track = Some(unit.track().clone());
                }

                debug!(?then, "Repeating track");
                self.position = 0.0;
                self.is_paused = false;
                for e in errors {
                    self.report_error(PlaybackError::Transport(e), track.as_ref());
                }
                self.notify();
            }
        }
    }

    fn on_failed(&mut self, slot: SlotId, is_active: bool, error: MediaError) {
        let Some(unit) = self.slots.get(slot) else {
            return;
        };
        let track = unit.track().clone();

        warn!(track_id = %track.id, ?slot, is_active, error = %error, "Media failed to load");
        self.discard_slot(slot);
        self.report_error(PlaybackError::Load(error), Some(&track));

        if !is_active {
            return;
        }

        // The failed track is dropped, not kept in history
        if self
            .current
            .as_ref()
            .is_some_and(|current| current.is_same_instance(&track))
        {
            self.current = None;
        }

        match self.config.load_error_policy {
            LoadErrorPolicy::Skip => self.select_next(None, Transition::Discrete),
            LoadErrorPolicy::Halt => self.stop_at_end(Some(slot)),
        }
    }

    // ===== Internal: Helpers =====

    fn ensure_session(&mut self) -> bool {
        if self.session.is_session_valid() {
            return true;
        }
        warn!("Playback requested without a valid session");
        self.report_error(PlaybackError::SessionUnavailable, None);
        false
    }

    fn pause_active(&mut self) {
        if let Some(slot) = self.slots.active() {
            self.pause_slot(slot);
        }
    }

    fn pause_slot(&mut self, slot: SlotId) {
        let Some(unit) = self.slots.get_mut(slot) else {
            return;
        };
        if let Err(e) = unit.pause() {
            let track = unit.track().clone();
            self.report_error(PlaybackError::Transport(e), Some(&track));
        }
    }

    fn apply_gain(&mut self) {
        let gain = self.volume.gain();
        let mut failures = Vec::new();
        self.slots.for_each_mut(|unit| {
            if let Err(e) = unit.set_gain(gain) {
                failures.push((e, unit.track().clone()));
            }
        });
        for (e, track) in failures {
            self.report_error(PlaybackError::Transport(e), Some(&track));
        }
    }

    fn report_error(&mut self, error: PlaybackError, track: Option<&Track>) {
        if let PlaybackError::Transport(ref e) = error {
            warn!(error = %e, "Transport command failed");
        }
        self.notifier.error(&error, track);
    }

    fn notify(&mut self) {
        if self.notifier.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.notifier.state_changed(&snapshot);
    }
}

impl<B: MediaBackend> std::fmt::Debug for PlaybackEngine<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("current", &self.current.as_ref().map(|t| &t.id))
            .field("active_slot", &self.slots.active())
            .field("is_paused", &self.is_paused)
            .field("position", &self.position)
            .field("duration", &self.duration)
            .field("repeat", &self.repeat)
            .field("gapless_pending", &self.gapless_pending)
            .finish_non_exhaustive()
    }
}
