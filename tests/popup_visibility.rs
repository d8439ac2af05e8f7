use shortcut_hud::popup::{PopupSignal, PopupVisibilityController, CLOSE_DELAY};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum R {
    Header,
    Popup,
    Detail,
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn starts_open_only_when_pinned() {
    assert!(!PopupVisibilityController::<R>::new(false).is_open());
    assert!(PopupVisibilityController::<R>::new(true).is_open());
}

#[test]
fn handoff_between_adjacent_regions_does_not_close() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);

    assert_eq!(c.on_region_enter(R::Header), Some(PopupSignal::Open));
    c.on_region_leave(&R::Header, t0);
    assert_eq!(c.on_region_enter(R::Popup), None);
    assert!(c.is_open());

    assert_eq!(c.tick(t0 + CLOSE_DELAY), None);
    assert_eq!(c.tick(t0 + CLOSE_DELAY * 5), None);
    assert!(c.is_open());
}

#[test]
fn leaving_all_regions_closes_exactly_once_after_delay() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);
    c.on_region_enter(R::Header);
    c.on_region_leave(&R::Header, t0);

    assert_eq!(c.tick(t0 + ms(199)), None);
    assert!(c.is_open());
    assert_eq!(c.tick(t0 + CLOSE_DELAY), Some(PopupSignal::Close));
    assert!(!c.is_open());
    assert_eq!(c.tick(t0 + ms(1000)), None);
}

#[test]
fn stale_timer_is_ignored_when_a_region_is_hovered() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);
    c.on_region_enter(R::Header);
    c.on_region_enter(R::Popup);
    c.on_region_leave(&R::Header, t0);
    assert!(c.is_close_pending());
    // Popup is still hovered when the timer fires.
    assert_eq!(c.tick(t0 + CLOSE_DELAY), None);
    assert!(c.is_open());
    assert!(c.is_hovered(&R::Popup));
}

#[test]
fn three_regions_chain_without_flicker() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);
    let mut closes = 0;
    let path = [R::Header, R::Popup, R::Detail, R::Popup, R::Header];
    let mut now = t0;
    for pair in path.windows(2) {
        if c.on_region_enter(pair[0]) == Some(PopupSignal::Close) {
            closes += 1;
        }
        now += ms(50);
        c.on_region_leave(&pair[0], now);
        now += ms(150);
        if c.tick(now) == Some(PopupSignal::Close) {
            closes += 1;
        }
    }
    assert_eq!(closes, 0);
    assert!(c.is_open());
}

#[test]
fn pinned_ignores_leave_timer_and_escape() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);
    assert_eq!(c.set_pinned(true, t0), Some(PopupSignal::Open));

    c.on_region_enter(R::Header);
    c.on_region_leave(&R::Header, t0);
    assert!(!c.is_close_pending());
    assert_eq!(c.tick(t0 + ms(1000)), None);
    assert_eq!(c.on_escape(), None);
    assert!(c.is_open());
}

#[test]
fn pinning_cancels_pending_close() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);
    c.on_region_enter(R::Popup);
    c.on_region_leave(&R::Popup, t0);
    c.set_pinned(true, t0 + ms(100));
    assert_eq!(c.tick(t0 + ms(500)), None);
    assert!(c.is_open());
}

#[test]
fn unpinning_closes_after_grace_period() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::<R>::new(true);
    assert_eq!(c.set_pinned(false, t0), None);
    assert!(c.is_open());
    assert_eq!(c.tick(t0 + ms(100)), None);
    assert_eq!(c.tick(t0 + CLOSE_DELAY), Some(PopupSignal::Close));
}

#[test]
fn unpinning_while_hovering_keeps_popup_open() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(true);
    c.on_region_enter(R::Header);
    c.set_pinned(false, t0);
    assert_eq!(c.tick(t0 + CLOSE_DELAY), None);
    assert!(c.is_open());
}

#[test]
fn minimize_closes_even_when_pinned() {
    let mut c = PopupVisibilityController::<R>::new(true);
    assert_eq!(c.on_window_minimized(), Some(PopupSignal::Close));
    assert!(!c.is_open());
    assert!(c.is_pinned());
    assert_eq!(c.on_window_minimized(), None);
}

#[test]
fn escape_closes_immediately_when_unpinned() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);
    c.on_region_enter(R::Header);
    c.on_region_leave(&R::Header, t0);
    assert_eq!(c.on_escape(), Some(PopupSignal::Close));
    assert!(!c.is_close_pending());
    assert_eq!(c.on_escape(), None);
}

#[test]
fn toggle_pin_twice_restores_state() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);
    c.on_region_enter(R::Header);
    let before = (c.is_pinned(), c.is_open());

    let (pinned, _) = c.on_toggle_pin(t0);
    assert!(pinned);
    let (pinned, _) = c.on_toggle_pin(t0);
    assert!(!pinned);

    assert_eq!((c.is_pinned(), c.is_open()), before);
}

#[test]
fn leave_of_unknown_region_is_ignored() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);
    c.on_region_enter(R::Header);
    c.on_region_leave(&R::Detail, t0);
    assert!(!c.is_close_pending());
    assert!(c.is_open());
}

#[test]
fn next_deadline_reports_remaining_delay() {
    let t0 = Instant::now();
    let mut c = PopupVisibilityController::new(false);
    assert_eq!(c.next_deadline(t0), None);
    c.on_region_enter(R::Header);
    c.on_region_leave(&R::Header, t0);
    assert_eq!(c.next_deadline(t0 + ms(50)), Some(ms(150)));
}
