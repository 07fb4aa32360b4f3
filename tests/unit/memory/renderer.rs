use super::*;

fn offscreen_rgba() -> RenderConfig {
    RenderConfig {
        clear_color: [1.0, 1.0, 0.0, 1.0],
        ..RenderConfig::offscreen(256, 256)
    }
}

#[test]
fn capture_buffer_receives_the_clear_color() {
    let mut r = MemoryRenderer::default();
    let config = offscreen_rgba();
    assert_eq!(r.configure(&config), 0);
    let buffer: CaptureBuffer = Arc::new(Mutex::new(vec![0; config.capture_len()]));
    assert_eq!(r.set_capture_buffer(Some(buffer.clone())), 0);
    assert_eq!(r.draw(0.0), 0);

    let pixels = buffer.lock().unwrap();
    assert_eq!(pixels.len(), 256 * 256 * 4);
    assert_eq!(&pixels[..4], &[0xFF, 0xFF, 0x00, 0xFF]);
    assert!(pixels.chunks(4).all(|px| px == [0xFF, 0xFF, 0x00, 0xFF]));
}

#[test]
fn wrong_sized_capture_buffer_fails_the_draw() {
    let mut r = MemoryRenderer::default();
    r.configure(&offscreen_rgba());
    r.set_capture_buffer(Some(Arc::new(Mutex::new(vec![0; 16]))));
    assert_eq!(r.draw(0.0), STATUS_INVALID_USAGE);
}

#[test]
fn offscreen_targets_cannot_be_resized() {
    let mut r = MemoryRenderer::default();
    r.configure(&offscreen_rgba());
    assert_ne!(r.resize(128, 128), 0);

    let mut onscreen = MemoryRenderer::default();
    let config = RenderConfig {
        window: Some(WindowHandle(7)),
        ..RenderConfig::default()
    };
    assert_eq!(onscreen.configure(&config), 0);
    assert_eq!(onscreen.resize(128, 128), 0);
    assert_ne!(onscreen.set_capture_buffer(None), 0);
}

#[test]
fn calls_before_configure_fail() {
    let mut r = MemoryRenderer::default();
    assert_eq!(r.draw(0.0), STATUS_INVALID_USAGE);
    assert_eq!(r.update(0.0), STATUS_INVALID_USAGE);
    assert_ne!(r.configure(&RenderConfig::offscreen(0, 0)), 0);
}

#[test]
fn probe_records_calls_and_injects_failures() {
    let probe = RenderProbe::default();
    let mut r = MemoryRenderer::new(probe.clone());
    r.configure(&offscreen_rgba());
    probe.fail_next_draws(1);
    assert_eq!(r.draw(0.5), STATUS_DRAW_FAILED);
    assert_eq!(r.draw(1.0), 0);
    r.release();

    assert_eq!(probe.draw_times(), vec![0.5, 1.0]);
    assert_eq!(
        probe.events(),
        vec![
            RenderEvent::Configure(0),
            RenderEvent::Draw(0.5),
            RenderEvent::Draw(1.0),
            RenderEvent::Release,
        ]
    );
    assert!(probe.wait_until(Duration::from_millis(1), |e| e.len() == 4));
    assert!(!probe.wait_until(Duration::from_millis(1), |e| e.len() == 5));
}

#[test]
fn window_release_is_shared_between_clones() {
    let window = MemoryWindow::new(WindowHandle(3));
    let mut owned = window.clone();
    assert_eq!(owned.handle(), WindowHandle(3));
    owned.release();
    assert!(window.is_released());
}

#[test]
fn scene_rejections_are_injected_once() {
    let probe = RenderProbe::default();
    let mut r = MemoryRenderer::new(probe.clone());
    r.configure(&offscreen_rgba());
    probe.fail_next_scenes(1);
    assert_eq!(r.set_scene(None), STATUS_SCENE_REJECTED);
    assert_eq!(r.set_scene(None), 0);
}

#[test]
fn held_draws_wait_for_release() {
    let probe = RenderProbe::default();
    let mut r = MemoryRenderer::new(probe.clone());
    r.configure(&offscreen_rgba());
    probe.hold_draws(true);
    let drawer = std::thread::spawn(move || r.draw(0.25));
    assert!(probe.wait_until(Duration::from_secs(5), |e| e.contains(&RenderEvent::Draw(0.25))));
    probe.hold_draws(false);
    assert_eq!(drawer.join().unwrap(), 0);
}
