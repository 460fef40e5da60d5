//! End-to-end behavior of the autoplay controller against a mock carousel

use std::time::Duration;

use carousel_autoplay::{
    AutoplayController, AutoplayEvent, CarouselHost, DomEvent, ManualScheduler, OptionsResolver,
    PartialOptions, PlaybackState,
};

#[derive(Debug, Default)]
struct MockCarousel {
    pages: usize,
    index: usize,
    advance_calls: usize,
    advance_to_calls: Vec<usize>,
    events: Vec<AutoplayEvent>,
    listeners: Vec<(String, DomEvent)>,
    select_subscribed: bool,
}

impl MockCarousel {
    fn new(pages: usize) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    fn count(&self, event: AutoplayEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl CarouselHost for MockCarousel {
    type Node = String;

    fn page_count(&self) -> usize {
        self.pages
    }

    fn can_advance(&self) -> bool {
        self.index + 1 < self.pages
    }

    fn advance(&mut self) {
        self.advance_calls += 1;
        self.index += 1;
    }

    fn advance_to(&mut self, index: usize) {
        self.advance_to_calls.push(index);
        self.index = index;
    }

    fn root_element(&self) -> String {
        "carousel".to_string()
    }

    fn emit(&mut self, event: AutoplayEvent) {
        self.events.push(event);
    }

    fn subscribe_select(&mut self) {
        self.select_subscribed = true;
    }

    fn add_listener(&mut self, target: &String, event: DomEvent) {
        self.listeners.push((target.clone(), event));
    }

    fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    fn matches_media(&self, query: &str) -> bool {
        query == "(min-width: 768px)"
    }
}

type Controller = AutoplayController<MockCarousel, ManualScheduler>;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn controller_with(pages: usize, options: PartialOptions) -> Controller {
    init_logging();
    let mut controller = AutoplayController::new(ManualScheduler::new(), options);
    controller
        .init(MockCarousel::new(pages), &OptionsResolver::new())
        .expect("valid options");
    controller
}

fn host(controller: &Controller) -> &MockCarousel {
    controller.host().expect("host bound")
}

fn assert_consistent(controller: &Controller) {
    let status = controller.status();
    assert!(!(status.is_playing && status.is_paused));
    if status.is_stopped {
        assert!(!status.is_playing && !status.is_paused);
    }
    assert!(controller.scheduler().pending_count() <= 1);
    assert_eq!(
        controller.pending_timer().is_some(),
        controller.state() == PlaybackState::Running
    );
}

#[test]
fn test_elapsed_time_is_conserved_across_pause() {
    let mut controller = controller_with(5, PartialOptions::new().with_delay(1_000));

    controller.advance_time(ms(400));
    controller.pause();
    assert_eq!(controller.elapsed(), ms(400));

    // Time spent paused does not count
    controller.advance_time(ms(10_000));
    assert_eq!(host(&controller).advance_calls, 0);

    controller.resume();
    assert_eq!(controller.advance_time(ms(599)), 0);
    assert_eq!(controller.advance_time(ms(1)), 1);
}

#[test]
fn test_stop_resets_elapsed_time() {
    let mut controller = controller_with(5, PartialOptions::new().with_delay(1_000));

    controller.advance_time(ms(400));
    controller.stop();
    assert_eq!(controller.elapsed(), Duration::ZERO);

    controller.resume();
    assert_eq!(controller.advance_time(ms(999)), 0);
    assert_eq!(controller.advance_time(ms(1)), 1);
}

#[test]
fn test_wraparound_requests_first_page() {
    let mut controller = controller_with(2, PartialOptions::new().with_delay(100));

    controller.advance_time(ms(100));
    assert_eq!(host(&controller).index, 1);
    assert!(host(&controller).advance_to_calls.is_empty());

    controller.advance_time(ms(100));
    assert_eq!(host(&controller).advance_to_calls, vec![0]);
    assert_eq!(host(&controller).advance_calls, 1);
    assert_eq!(host(&controller).index, 0);
}

#[test]
fn test_single_page_keeps_requesting_first_page() {
    let mut controller = controller_with(1, PartialOptions::new().with_delay(100));

    assert_eq!(controller.advance_time(ms(300)), 3);
    assert_eq!(host(&controller).advance_to_calls, vec![0, 0, 0]);
}

#[test]
fn test_play_is_idempotent() {
    let mut controller = controller_with(5, PartialOptions::new().with_play_on_init(false));

    controller.play();
    controller.play();

    assert_eq!(controller.scheduler().pending_count(), 1);
    assert_eq!(host(&controller).count(AutoplayEvent::Play), 1);
}

#[test]
fn test_start_alias() {
    let mut controller = controller_with(5, PartialOptions::new().with_play_on_init(false));
    controller.start();
    assert!(controller.is_playing());
}

#[test]
fn test_destroy_without_init() {
    init_logging();
    let mut controller: Controller = AutoplayController::new(ManualScheduler::new(), PartialOptions::new());

    controller.destroy();

    assert!(controller.is_destroyed());
    assert!(controller.pending_timer().is_none());
    assert_eq!(controller.scheduler().pending_count(), 0);
}

#[test]
fn test_controls_before_init_are_noops() {
    init_logging();
    let mut controller: Controller = AutoplayController::new(ManualScheduler::new(), PartialOptions::new());

    controller.play();
    controller.pause();
    controller.resume();
    controller.reset();
    controller.stop();
    controller.on_select();
    controller.handle_dom_event(DomEvent::Click);

    assert!(controller.is_stopped());
    assert_eq!(controller.scheduler().pending_count(), 0);
    assert_eq!(controller.advance_time(ms(10_000)), 0);
}

#[test]
fn test_destroy_stops_and_clears_listeners() {
    let mut controller = controller_with(5, PartialOptions::new().with_pause_on_focus_in(true));
    assert_eq!(host(&controller).listeners.len(), 2);

    controller.destroy();

    assert!(controller.is_stopped());
    assert!(host(&controller).listeners.is_empty());
    assert!(controller.listeners().is_empty());
    assert_eq!(controller.scheduler().pending_count(), 0);
    assert_eq!(host(&controller).count(AutoplayEvent::Stop), 1);

    // Nothing revives a destroyed controller
    controller.play();
    controller.on_select();
    assert_eq!(controller.advance_time(ms(10_000)), 0);
}

#[test]
fn test_pause_on_mouse_enter_with_revert() {
    let mut controller = controller_with(
        5,
        PartialOptions::new()
            .with_delay(1_000)
            .with_pause_on_mouse_enter(true),
    );
    assert_eq!(
        host(&controller).listeners,
        vec![
            ("carousel".to_string(), DomEvent::PointerEnter),
            ("carousel".to_string(), DomEvent::PointerLeave),
        ]
    );

    controller.advance_time(ms(250));
    controller.handle_dom_event(DomEvent::PointerEnter);
    assert_eq!(controller.state(), PlaybackState::Paused);

    controller.advance_time(ms(3_000));
    controller.handle_dom_event(DomEvent::PointerLeave);
    assert_eq!(controller.state(), PlaybackState::Running);

    assert_eq!(controller.advance_time(ms(749)), 0);
    assert_eq!(controller.advance_time(ms(1)), 1);
}

#[test]
fn test_pause_on_click_toggles() {
    let mut controller = controller_with(5, PartialOptions::new().with_pause_on_click(true));

    controller.handle_dom_event(DomEvent::Click);
    assert!(controller.is_paused());

    controller.handle_dom_event(DomEvent::Click);
    assert!(controller.is_playing());
}

#[test]
fn test_pause_on_click_without_revert_only_resumes() {
    let mut controller = controller_with(
        5,
        PartialOptions::new()
            .with_pause_on_click(true)
            .with_revert_on_event(false),
    );

    controller.handle_dom_event(DomEvent::Click);
    assert!(controller.is_playing());

    controller.pause();
    controller.handle_dom_event(DomEvent::Click);
    assert!(controller.is_playing());
}

#[test]
fn test_stop_on_focus_in_and_back() {
    let mut controller = controller_with(
        5,
        PartialOptions::new()
            .with_delay(1_000)
            .with_stop_on_focus_in(true),
    );

    controller.advance_time(ms(600));
    controller.handle_dom_event(DomEvent::FocusIn);
    assert!(controller.is_stopped());

    controller.handle_dom_event(DomEvent::FocusOut);
    assert!(controller.is_playing());
    // Full delay after a stop
    assert_eq!(controller.advance_time(ms(999)), 0);
    assert_eq!(controller.advance_time(ms(1)), 1);
}

#[test]
fn test_stop_on_click_branches_on_paused() {
    let mut controller = controller_with(5, PartialOptions::new().with_stop_on_click(true));

    // Running: the click resumes, which leaves playback running
    controller.handle_dom_event(DomEvent::Click);
    assert!(controller.is_playing());

    controller.pause();
    controller.handle_dom_event(DomEvent::Click);
    assert!(controller.is_stopped());

    // Stopped: the click resumes
    controller.handle_dom_event(DomEvent::Click);
    assert!(controller.is_playing());
}

#[test]
fn test_stop_on_mouse_enter() {
    let mut controller = controller_with(5, PartialOptions::new().with_stop_on_mouse_enter(true));

    controller.handle_dom_event(DomEvent::PointerEnter);
    assert!(controller.is_stopped());
    assert_eq!(controller.scheduler().pending_count(), 0);

    controller.handle_dom_event(DomEvent::PointerLeave);
    assert!(controller.is_playing());
}

#[test]
fn test_unbound_events_are_ignored() {
    let mut controller = controller_with(5, PartialOptions::new());
    controller.handle_dom_event(DomEvent::PointerEnter);
    controller.handle_dom_event(DomEvent::Click);
    assert!(controller.is_playing());
}

#[test]
fn test_pause_during_pending_tick_suppresses_advance() {
    let mut controller = controller_with(5, PartialOptions::new().with_delay(1_000));
    let pending = controller.pending_timer().expect("tick scheduled");

    controller.advance_time(ms(999));
    controller.pause();

    // A scheduler that already dequeued the tick still cannot advance
    assert!(!controller.on_timer(pending));
    assert_eq!(host(&controller).advance_calls, 0);
}

#[test]
fn test_reset_restarts_from_zero() {
    let mut controller = controller_with(5, PartialOptions::new().with_delay(1_000));

    controller.advance_time(ms(300));
    controller.pause();
    controller.reset();

    assert!(controller.is_playing());
    assert_eq!(controller.advance_time(ms(999)), 0);
    assert_eq!(controller.advance_time(ms(1)), 1);

    let events = &host(&controller).events;
    let tail: Vec<_> = events.iter().skip(2).take(3).copied().collect();
    assert_eq!(
        tail,
        vec![AutoplayEvent::Stop, AutoplayEvent::Play, AutoplayEvent::Reset]
    );
}

#[test]
fn test_select_subscription_restarts_tick() {
    let mut controller = controller_with(5, PartialOptions::new().with_delay(1_000));
    assert!(host(&controller).select_subscribed);

    controller.stop();
    controller.on_select();
    assert!(controller.is_playing());
    assert_eq!(controller.scheduler().pending_count(), 1);
}

#[test]
fn test_select_while_paused_waits_full_delay() {
    let mut controller = controller_with(5, PartialOptions::new().with_delay(1_000));

    controller.advance_time(ms(900));
    controller.pause();
    controller.on_select();

    assert!(controller.is_playing());
    assert_eq!(controller.elapsed(), Duration::ZERO);
    assert_eq!(controller.advance_time(ms(100)), 0);
    assert_eq!(controller.advance_time(ms(899)), 0);
    assert_eq!(controller.advance_time(ms(1)), 1);
}

#[test]
fn test_select_after_pause_and_resume_waits_full_delay() {
    let mut controller = controller_with(5, PartialOptions::new().with_delay(1_000));

    controller.advance_time(ms(400));
    controller.pause();
    controller.resume();
    controller.advance_time(ms(100));
    controller.on_select();

    assert_eq!(controller.advance_time(ms(600)), 0);
    assert_eq!(controller.advance_time(ms(399)), 0);
    assert_eq!(controller.advance_time(ms(1)), 1);
}

#[test]
fn test_reset_from_stopped_emits_stop() {
    let mut controller = controller_with(5, PartialOptions::new().with_play_on_init(false));

    controller.reset();

    assert!(controller.is_playing());
    assert_eq!(
        host(&controller).events,
        vec![AutoplayEvent::Stop, AutoplayEvent::Play, AutoplayEvent::Reset]
    );
}

#[test]
fn test_notifications_in_order() {
    let mut controller = controller_with(5, PartialOptions::new().with_delay(1_000));
    controller.advance_time(ms(100));
    controller.pause();
    controller.resume();
    controller.stop();

    assert_eq!(
        host(&controller).events,
        vec![
            AutoplayEvent::Play,
            AutoplayEvent::Pause,
            AutoplayEvent::Play,
            AutoplayEvent::Resume,
            AutoplayEvent::Stop,
        ]
    );
}

#[test]
fn test_breakpoint_from_host_media() {
    let options = PartialOptions::new()
        .with_delay(1_000)
        .with_breakpoint("(min-width: 768px)", PartialOptions::new().with_delay(250))
        .with_breakpoint("(max-width: 320px)", PartialOptions::new().with_delay(9_000));
    let controller = controller_with(5, options);

    assert_eq!(controller.options().map(|o| o.delay), Some(250));
}

#[test]
fn test_base_layer_defaults() {
    init_logging();
    let resolver = OptionsResolver::with_base(PartialOptions::new().with_delay(2_000).with_play_on_init(false));
    let mut controller: Controller = AutoplayController::new(ManualScheduler::new(), PartialOptions::new());
    controller.init(MockCarousel::new(3), &resolver).unwrap();

    assert!(controller.is_stopped());
    controller.play();
    assert_eq!(controller.advance_time(ms(2_000)), 1);
}

#[test]
fn test_random_interleavings_keep_invariants() {
    let mut controller = controller_with(
        4,
        PartialOptions::new()
            .with_delay(700)
            .with_pause_on_mouse_enter(true)
            .with_pause_on_click(true)
            .with_stop_on_focus_in(true),
    );

    // Deterministic pseudo-random walk over every entry point
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..2_000 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;

        match seed % 12 {
            0 => controller.play(),
            1 => controller.stop(),
            2 => controller.pause(),
            3 => controller.resume(),
            4 => controller.reset(),
            5 => controller.on_select(),
            6 => controller.handle_dom_event(DomEvent::PointerEnter),
            7 => controller.handle_dom_event(DomEvent::PointerLeave),
            8 => controller.handle_dom_event(DomEvent::Click),
            9 => controller.handle_dom_event(DomEvent::FocusIn),
            10 => controller.handle_dom_event(DomEvent::FocusOut),
            _ => {
                controller.advance_time(ms(seed % 900));
            }
        }

        assert_consistent(&controller);
        assert!(controller.elapsed() <= ms(700));
    }
}
