//! Autoplay state machine

use std::time::Duration;

use super::events::AutoplayEvent;
use super::state::{AutoplayStatus, PlaybackState};
use crate::config::{AutoplayOptions, OptionsResolver, PartialOptions};
use crate::host::CarouselHost;
use crate::timing::{Clock, ElapsedTime, ManualScheduler, Scheduler, TimerId, TimerSlot};
use crate::triggers::{bindings_for, ControlAction, DomEvent, ListenerScope};
use crate::{Result, PLUGIN_NAME};

/// Picks the element listeners attach to from the host's root element.
/// Returning `None` falls back to the host root.
pub type RootSelector<N> = Box<dyn Fn(&N) -> Option<N> + Send>;

/// Timed-advance controller for one carousel instance
///
/// Every control call is a no-op until [`init`](Self::init) has bound a
/// host, and again after [`destroy`](Self::destroy). Timer callbacks are
/// delivered by the owner of the event loop through
/// [`on_timer`](Self::on_timer).
pub struct AutoplayController<H: CarouselHost, S: Scheduler> {
    /// Options as given by the user, resolved at init
    user_options: PartialOptions,
    /// Resolved options, fixed for the controller's lifetime
    options: Option<AutoplayOptions>,
    host: Option<H>,
    scheduler: S,
    state: PlaybackState,
    timer: TimerSlot,
    elapsed: ElapsedTime,
    listeners: ListenerScope<H::Node>,
    root_selector: Option<RootSelector<H::Node>>,
    select_subscribed: bool,
    destroyed: bool,
}

impl<H: CarouselHost, S: Scheduler> AutoplayController<H, S> {
    /// Create an unbound controller
    pub fn new(scheduler: S, user_options: PartialOptions) -> Self {
        Self {
            user_options,
            options: None,
            host: None,
            scheduler,
            state: PlaybackState::Stopped,
            timer: TimerSlot::new(),
            elapsed: ElapsedTime::new(),
            listeners: ListenerScope::new(),
            root_selector: None,
            select_subscribed: false,
            destroyed: false,
        }
    }

    /// Attach listeners to a different element than the host root
    pub fn with_root_selector<F>(mut self, selector: F) -> Self
    where
        F: Fn(&H::Node) -> Option<H::Node> + Send + 'static,
    {
        self.root_selector = Some(Box::new(selector));
        self
    }

    /// Plugin identity
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Bind to `host`, resolve options, install triggers and optionally
    /// start playing
    ///
    /// Fails only when the resolved options are invalid, in which case
    /// nothing is bound.
    pub fn init(&mut self, host: H, resolver: &OptionsResolver) -> Result<()> {
        if self.host.is_some() || self.destroyed {
            log::warn!("Autoplay already initialized, ignoring init");
            return Ok(());
        }

        let options = resolver.resolve(&self.user_options, |query| host.matches_media(query))?;
        if options.pause_on_last_snap || options.stop_on_last_snap {
            log::warn!("pause_on_last_snap/stop_on_last_snap are reserved and have no effect");
        }

        self.host = Some(host);
        self.options = Some(options.clone());

        if !options.active {
            log::info!("Autoplay bound but inactive");
            return Ok(());
        }

        if let Some(host) = self.host.as_mut() {
            let pages = host.page_count();
            if pages < 2 {
                log::debug!("Autoplay bound to a carousel with {} page(s)", pages);
            }
            host.subscribe_select();
            self.select_subscribed = true;
        }

        self.install_listeners(&options);

        log::info!(
            "Autoplay initialized (delay: {}ms, listeners: {})",
            options.delay,
            self.listeners.len()
        );

        if options.play_on_init {
            self.play();
        }

        Ok(())
    }

    /// Register one listener per configured trigger on the resolved root
    fn install_listeners(&mut self, options: &AutoplayOptions) {
        let Some(host) = self.host.as_mut() else {
            return;
        };

        let host_root = host.root_element();
        let root = self
            .root_selector
            .as_ref()
            .and_then(|select| select(&host_root))
            .unwrap_or(host_root);

        for (event, action) in bindings_for(options) {
            // The host delivers each event once; the scope fans it out
            if self.listeners.actions_for(event).is_empty() {
                host.add_listener(&root, event);
            }
            log::debug!("Autoplay listening for {} ({:?})", event, action);
            self.listeners.add(root.clone(), event, action);
        }
    }

    /// Whether control calls currently have an effect
    fn is_bound(&self) -> bool {
        !self.destroyed
            && self.host.is_some()
            && self.options.as_ref().map_or(false, |options| options.active)
    }

    fn delay(&self) -> Duration {
        self.options
            .as_ref()
            .map(AutoplayOptions::delay)
            .unwrap_or_default()
    }

    fn emit(&mut self, event: AutoplayEvent) {
        if let Some(host) = self.host.as_mut() {
            host.emit(event);
        }
    }

    /// Schedule the next tick for what is left of the delay and mark running
    fn schedule_tick(&mut self) {
        let delay = self.delay();
        self.elapsed.begin(self.scheduler.now());
        let remaining = self.elapsed.remaining(delay);
        let id = self.timer.schedule(&mut self.scheduler, remaining);
        self.state = PlaybackState::Running;

        log::debug!("Autoplay scheduled {} in {}ms", id, remaining.as_millis());
        self.emit(AutoplayEvent::Play);
    }

    /// Start playback. Does nothing while already running.
    pub fn play(&mut self) {
        if !self.is_bound() {
            log::debug!("Autoplay play ignored: not initialized");
            return;
        }
        if self.state.is_running() {
            return;
        }
        self.schedule_tick();
    }

    /// Alias of [`play`](Self::play)
    pub fn start(&mut self) {
        self.play();
    }

    /// Cancel the pending tick and discard elapsed time
    ///
    /// Does nothing when already stopped.
    pub fn stop(&mut self) {
        if !self.is_bound() || self.state.is_stopped() {
            return;
        }
        self.halt();
    }

    fn halt(&mut self) {
        self.timer.cancel(&mut self.scheduler);
        self.state = PlaybackState::Stopped;
        self.elapsed.clear();

        log::debug!("Autoplay stopped");
        self.emit(AutoplayEvent::Stop);
    }

    /// Cancel the pending tick, keeping the time already waited
    ///
    /// Only a running controller can be paused.
    pub fn pause(&mut self) {
        if !self.is_bound() || !self.state.is_running() {
            return;
        }

        self.timer.cancel(&mut self.scheduler);
        self.state = PlaybackState::Paused;
        let elapsed = self.elapsed.capture(self.scheduler.now());

        log::debug!("Autoplay paused after {}ms", elapsed.as_millis());
        self.emit(AutoplayEvent::Pause);
    }

    /// Continue playback
    ///
    /// From paused the remaining delay is honored; from stopped a full
    /// delay starts over.
    pub fn resume(&mut self) {
        if !self.is_bound() {
            return;
        }

        match self.state {
            PlaybackState::Stopped => {
                self.elapsed.clear();
                self.play();
            }
            PlaybackState::Paused => self.play(),
            PlaybackState::Running => {}
        }

        log::debug!("Autoplay resumed");
        self.emit(AutoplayEvent::Resume);
    }

    /// Restart the cycle from zero elapsed time
    ///
    /// Always emits `Stop`, `Play` and `Reset`, even from the stopped state.
    pub fn reset(&mut self) {
        if !self.is_bound() {
            return;
        }

        self.halt();
        self.play();
        self.emit(AutoplayEvent::Reset);
    }

    /// Host notification that the selected page changed
    ///
    /// Restarts the tick with the full delay whatever the current state.
    pub fn on_select(&mut self) {
        if !self.is_bound() || !self.select_subscribed {
            return;
        }

        self.timer.cancel(&mut self.scheduler);
        self.elapsed.clear();
        self.schedule_tick();
    }

    /// Deliver a fired timer. Returns true when a page advance was requested.
    ///
    /// Stale timers and timers that fire after a pause or stop are
    /// discarded.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if !self.timer.fire(id) {
            log::trace!("Autoplay discarded stale {}", id);
            return false;
        }
        if !self.is_bound() || !self.state.is_running() {
            log::trace!("Autoplay discarded {} while {}", id, self.state);
            return false;
        }

        let Some(host) = self.host.as_mut() else {
            return false;
        };

        if host.can_advance() {
            log::debug!("Autoplay advancing to next page");
            host.advance();
        } else {
            log::debug!("Autoplay wrapping around to first page");
            host.advance_to(0);
        }

        self.elapsed.clear();
        self.schedule_tick();
        true
    }

    /// Route a DOM event delivered by the host to its bound triggers
    pub fn handle_dom_event(&mut self, event: DomEvent) {
        if !self.is_bound() {
            return;
        }

        let revert = self
            .options
            .as_ref()
            .map_or(false, |options| options.revert_on_event);

        for action in self.listeners.actions_for(event) {
            match action.resolve(self.state, revert) {
                Some(ControlAction::Pause) => self.pause(),
                Some(ControlAction::Stop) => self.stop(),
                Some(ControlAction::Resume) => self.resume(),
                None => {}
            }
        }
    }

    /// Stop and release every listener installed at init
    ///
    /// Safe to call without a prior init.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        self.stop();
        self.timer.cancel(&mut self.scheduler);

        if let Some(host) = self.host.as_mut() {
            host.clear_listeners();
        }
        let released = self.listeners.clear();
        self.select_subscribed = false;
        self.destroyed = true;

        log::info!("Autoplay destroyed ({} listeners released)", released);
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Snapshot of the playback flags
    pub fn status(&self) -> AutoplayStatus {
        self.state.status()
    }

    /// Whether a tick is scheduled
    pub fn is_playing(&self) -> bool {
        self.state.is_running()
    }

    /// Whether playback is paused with elapsed time kept
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Whether playback is stopped
    pub fn is_stopped(&self) -> bool {
        self.state.is_stopped()
    }

    /// Time consumed within the current interval as of the last pause
    pub fn elapsed(&self) -> Duration {
        self.elapsed.elapsed()
    }

    /// Whether `init` has bound a host
    pub fn is_initialized(&self) -> bool {
        self.host.is_some()
    }

    /// Whether `destroy` has run
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Resolved options (after init)
    pub fn options(&self) -> Option<&AutoplayOptions> {
        self.options.as_ref()
    }

    /// The pending tick, if any
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer.pending()
    }

    /// Listeners installed at init
    pub fn listeners(&self) -> &ListenerScope<H::Node> {
        &self.listeners
    }

    /// The bound host, if any
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Mutable access to the bound host
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// The scheduler ticks are placed on
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<H: CarouselHost> AutoplayController<H, ManualScheduler> {
    /// Move virtual time forward by `by`, delivering every timer that
    /// becomes due on the way. Returns the number of page advances.
    pub fn advance_time(&mut self, by: Duration) -> usize {
        let target = self.scheduler.now() + by;
        let mut advances = 0;

        while let Some(id) = self.scheduler.pop_due(target) {
            if self.on_timer(id) {
                advances += 1;
            }
        }
        self.scheduler.set_now(target);

        advances
    }
}
