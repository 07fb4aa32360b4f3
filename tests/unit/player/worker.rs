use super::*;
use crate::foundation::core::NodeType;
use crate::memory::{MemoryEngine, MemoryRenderer, MemoryWindow, RenderEvent, RenderProbe};
use crate::native::{EngineRef, RawScene};
use crate::node::Node;
use crate::player::refresh::ManualRefresh;
use crate::player::time::ManualTimeSource;
use crate::render::WindowHandle;
use crate::scene::SceneParams;
use std::time::Duration;

const SEC: i64 = 1_000_000_000;
const WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, PartialEq)]
enum Event {
    Ready,
    FirstFrame,
    Frame(FrameReport),
}

struct Recorder(mpsc::Sender<Event>);

impl PlayerListener for Recorder {
    fn on_ready(&mut self) {
        let _ = self.0.send(Event::Ready);
    }

    fn on_first_frame(&mut self) {
        let _ = self.0.send(Event::FirstFrame);
    }

    fn on_frame_drawn(&mut self, report: &FrameReport) {
        let _ = self.0.send(Event::Frame(*report));
    }
}

struct Harness {
    player: Player,
    probe: RenderProbe,
    time: ManualTimeSource,
    refresh: ManualRefresh,
    events: mpsc::Receiver<Event>,
}

impl Harness {
    fn new(frame_rate: Rational, duration: f64) -> Self {
        let probe = RenderProbe::default();
        let time = ManualTimeSource::default();
        let refresh = ManualRefresh::default();
        let (tx, events) = mpsc::channel();
        let setup = PlayerSetup::new(
            Box::new(MemoryRenderer::new(probe.clone())),
            RenderConfig::offscreen(64, 64),
        )
        .with_time_source(Arc::new(time.clone()))
        .with_refresh(Box::new(refresh.clone()))
        .with_listener(Box::new(Recorder(tx)))
        .with_timeline(frame_rate, duration);
        let player = Player::spawn(setup).unwrap();
        Self {
            player,
            probe,
            time,
            refresh,
            events,
        }
    }

    fn next(&self) -> Event {
        self.events.recv_timeout(WAIT).unwrap()
    }

    fn next_frame(&self) -> FrameReport {
        loop {
            if let Event::Frame(report) = self.next() {
                return report;
            }
        }
    }
}

fn scene(engine: &EngineRef, frame_rate: Rational, duration: f64) -> Scene {
    let root = Node::create(engine, NodeType::from_tag(*b"Grp ")).unwrap();
    let params = SceneParams {
        duration,
        frame_rate,
        ..SceneParams::default()
    };
    Scene::new(engine, &root, params).unwrap()
}

fn scene_events(probe: &RenderProbe) -> Vec<Option<RawScene>> {
    probe
        .events()
        .into_iter()
        .filter_map(|e| match e {
            RenderEvent::SetScene(raw) => Some(raw),
            _ => None,
        })
        .collect()
}

fn report(frame_index: i64, time: f64) -> FrameReport {
    FrameReport {
        frame_index,
        time,
        status: 0,
        consecutive_failures: 0,
    }
}

#[test]
fn rejected_configuration_fails_spawn_and_releases_the_window() {
    let probe = RenderProbe::default();
    let window = MemoryWindow::new(WindowHandle(1));
    let setup = PlayerSetup::new(
        Box::new(MemoryRenderer::new(probe.clone())),
        RenderConfig::offscreen(0, 0),
    )
    .with_window(Box::new(window.clone()))
    .with_refresh(Box::new(ManualRefresh::default()));
    let err = Player::spawn(setup).err().unwrap();
    assert!(matches!(err, NglError::Configure { .. }));
    assert!(window.is_released());
    assert_eq!(probe.events().last(), Some(&RenderEvent::Release));
}

#[test]
fn draws_follow_the_clock_and_loop() {
    let h = Harness::new(Rational::new(30, 1), 2.0);
    h.player.start().unwrap();
    h.player.request_render().unwrap();
    assert_eq!(h.next(), Event::Ready);
    assert_eq!(h.next(), Event::FirstFrame);
    assert_eq!(h.next(), Event::Frame(report(0, 0.0)));

    h.time.set(SEC);
    assert!(h.refresh.fire());
    assert_eq!(h.next(), Event::Frame(report(30, 1.0)));

    h.time.set(2 * SEC);
    assert!(h.refresh.fire());
    assert_eq!(h.next(), Event::FirstFrame);
    assert_eq!(h.next(), Event::Frame(report(0, 0.0)));
    assert_eq!(h.probe.draw_times(), vec![0.0, 1.0, 0.0]);
}

#[test]
fn pause_step_and_stop() {
    let h = Harness::new(Rational::new(30, 1), 2.0);
    h.player.start().unwrap();
    h.player.request_render().unwrap();
    assert_eq!(h.next_frame().frame_index, 0);

    h.player.pause().unwrap();
    h.time.set(SEC);
    h.player.request_render().unwrap();
    assert_eq!(h.next_frame().frame_index, 0);

    h.player.step(5).unwrap();
    assert_eq!(h.next_frame().frame_index, 5);
    h.player.step(1000).unwrap();
    assert_eq!(h.next_frame().frame_index, 60);
    h.player.step(-1000).unwrap();
    assert_eq!(h.next_frame().frame_index, 0);

    assert!(h.refresh.is_subscribed());
    h.player.stop().unwrap();
    h.player.request_render().unwrap();
    h.next_frame();
    assert!(!h.refresh.is_subscribed());
}

#[test]
fn draw_failures_are_reported_and_playback_continues() {
    let h = Harness::new(Rational::new(30, 1), 2.0);
    h.probe.fail_next_draws(2);
    let mut statuses = Vec::new();
    for _ in 0..3 {
        h.player.request_render().unwrap();
        let r = h.next_frame();
        statuses.push((r.status != 0, r.consecutive_failures));
    }
    assert_eq!(statuses, vec![(true, 1), (true, 2), (false, 0)]);
}

#[test]
fn explicit_time_draw_leaves_the_clock_alone() {
    let h = Harness::new(Rational::new(30, 1), 2.0);
    h.player.request_render_at(0.5).unwrap();
    assert_eq!(h.next_frame(), report(15, 0.5));
    h.player.request_render().unwrap();
    assert_eq!(h.next_frame(), report(0, 0.0));
}

#[test]
fn set_scene_adopts_the_scene_timeline() {
    let h = Harness::new(Rational::new(30, 1), 2.0);
    let engine: EngineRef = Arc::new(MemoryEngine::new());
    let root = Node::create(&engine, NodeType::from_tag(*b"Grp ")).unwrap();
    let params = SceneParams {
        duration: 1.0,
        frame_rate: Rational::new(10, 1),
        ..SceneParams::default()
    };
    let scene = Scene::new(&engine, &root, params).unwrap();
    let raw = scene.raw();

    h.player.set_scene(Some(scene)).unwrap();
    assert_eq!(h.next_frame(), report(0, 0.0));
    assert!(h.probe.events().contains(&RenderEvent::SetScene(Some(raw))));

    h.player.seek(0.55).unwrap();
    assert_eq!(h.next_frame(), report(6, 0.6));
    h.player.step(100).unwrap();
    assert_eq!(h.next_frame().frame_index, 10);
}

#[test]
fn release_is_terminal() {
    let mut h = Harness::new(Rational::new(30, 1), 2.0);
    h.player.start().unwrap();
    h.player.release().unwrap();
    assert_eq!(h.probe.events().last(), Some(&RenderEvent::Release));
    assert!(!h.refresh.is_subscribed());
    assert!(matches!(h.player.start(), Err(NglError::Player(_))));
    assert!(matches!(h.player.request_render(), Err(NglError::Player(_))));
    assert!(h.player.release().is_err());
}

#[test]
fn window_handle_feeds_the_configuration() {
    let probe = RenderProbe::default();
    let window = MemoryWindow::new(WindowHandle(9));
    let setup = PlayerSetup::new(
        Box::new(MemoryRenderer::new(probe.clone())),
        RenderConfig::default(),
    )
    .with_window(Box::new(window.clone()))
    .with_refresh(Box::new(ManualRefresh::default()));
    let mut player = Player::spawn(setup).unwrap();
    player.resize(640, 480).unwrap();
    assert!(probe.wait_until(WAIT, |e| e.contains(&RenderEvent::Resize(640, 480))));
    player.release().unwrap();
    assert!(window.is_released());
}

#[test]
fn start_then_stop_during_a_draw_ends_stopped() {
    let h = Harness::new(Rational::new(30, 1), 2.0);
    h.probe.hold_draws(true);
    h.player.request_render().unwrap();
    assert!(h.probe.wait_until(WAIT, |e| e.contains(&RenderEvent::Draw(0.0))));
    h.player.start().unwrap();
    h.player.stop().unwrap();
    h.player.request_render().unwrap();
    h.probe.hold_draws(false);
    h.next_frame();
    h.next_frame();
    assert!(!h.refresh.is_subscribed());
}

#[test]
fn scene_changes_queued_together_keep_their_order() {
    let h = Harness::new(Rational::new(30, 1), 2.0);
    let engine: EngineRef = Arc::new(MemoryEngine::new());
    let first = scene(&engine, Rational::new(10, 1), 1.0);
    let second = scene(&engine, Rational::new(25, 1), 4.0);
    let (a, b) = (first.raw(), second.raw());

    h.probe.hold_draws(true);
    h.player.request_render().unwrap();
    assert!(h.probe.wait_until(WAIT, |e| e.contains(&RenderEvent::Draw(0.0))));
    h.player.set_scene(Some(first)).unwrap();
    h.player.set_scene(Some(second)).unwrap();
    h.probe.hold_draws(false);
    h.next_frame();
    assert_eq!(h.next_frame(), report(0, 0.0));
    assert_eq!(scene_events(&h.probe), vec![Some(a), Some(b)]);

    h.player.step(1000).unwrap();
    assert_eq!(h.next_frame().frame_index, 100);
}

#[test]
fn rejected_scene_keeps_the_current_timeline() {
    let h = Harness::new(Rational::new(30, 1), 2.0);
    let engine: EngineRef = Arc::new(MemoryEngine::new());
    let rejected = scene(&engine, Rational::new(10, 1), 1.0);
    let raw = rejected.raw();

    h.probe.fail_next_scenes(1);
    h.player.set_scene(Some(rejected)).unwrap();
    h.player.request_render_at(0.5).unwrap();
    assert_eq!(h.next_frame(), report(15, 0.5));
    h.player.step(1000).unwrap();
    assert_eq!(h.next_frame().frame_index, 60);
    assert_eq!(scene_events(&h.probe), vec![Some(raw)]);
}

#[test]
fn start_rearms_the_first_frame_notification() {
    let h = Harness::new(Rational::new(30, 1), 2.0);
    h.player.request_render().unwrap();
    assert_eq!(h.next(), Event::Ready);
    assert_eq!(h.next(), Event::FirstFrame);
    assert_eq!(h.next(), Event::Frame(report(0, 0.0)));

    h.player.start().unwrap();
    h.player.request_render().unwrap();
    assert_eq!(h.next(), Event::FirstFrame);
    assert_eq!(h.next(), Event::Frame(report(0, 0.0)));
}
