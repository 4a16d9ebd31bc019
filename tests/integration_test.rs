// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the sign classification pipeline

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use image::{DynamicImage, ImageFormat, RgbImage};
use sign_inference::frame::encode_payload;
use sign_inference::landmarks::HAND_LANDMARK_COUNT;
use sign_inference::smoothing::WINDOW_SIZE;
use sign_inference::{
    Classification, Gesture, InferenceError, Label, Landmark, LandmarkDetector, LandmarkSet,
    Result, Sentinel, Session, SharedSession, vocabulary,
};

/// Detector replaying scripted outcomes; `Ok(None)` once exhausted.
struct Scripted {
    script: VecDeque<Result<Option<LandmarkSet>>>,
    resets: Arc<Mutex<usize>>,
}

impl Scripted {
    fn new(script: Vec<Result<Option<LandmarkSet>>>) -> Self {
        Self {
            script: script.into(),
            resets: Arc::new(Mutex::new(0)),
        }
    }
}

impl LandmarkDetector for Scripted {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Option<LandmarkSet>> {
        self.script.pop_front().unwrap_or(Ok(None))
    }

    fn reset(&mut self) {
        *self.resets.lock().unwrap() += 1;
    }
}

/// Detector that panics when entered by two callers at once.
struct Exclusive {
    hand: LandmarkSet,
    in_use: AtomicBool,
    calls: Arc<AtomicUsize>,
}

impl Exclusive {
    fn new(hand: LandmarkSet) -> Self {
        Self {
            hand,
            in_use: AtomicBool::new(false),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl LandmarkDetector for Exclusive {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Option<LandmarkSet>> {
        assert!(!self.in_use.swap(true, Ordering::SeqCst), "detector entered concurrently");
        thread::sleep(Duration::from_millis(2));
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.in_use.store(false, Ordering::SeqCst);
        Ok(Some(self.hand.clone()))
    }
}

/// Detector that always sees the same hand.
struct Steady(LandmarkSet);

impl LandmarkDetector for Steady {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Option<LandmarkSet>> {
        Ok(Some(self.0.clone()))
    }
}

fn encode(format: ImageFormat) -> String {
    let img = RgbImage::from_fn(32, 24, |x, y| image::Rgb([(x * 8) as u8, (y * 10) as u8, 128]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    encode_payload(&bytes)
}

fn frame() -> String {
    encode(ImageFormat::Png)
}

/// Hand with the given fingers (thumb to pinky) extended and the wrist at `wrist_x`.
fn hand(fingers: [bool; 5], wrist_x: f32) -> LandmarkSet {
    let mut points = [Landmark::new(0.5, 0.5, 0.0); HAND_LANDMARK_COUNT];
    points[0] = Landmark::new(wrist_x, 0.9, 0.0);
    points[3] = Landmark::new(0.40, 0.60, 0.0);
    points[4] = Landmark::new(if fingers[0] { 0.32 } else { 0.46 }, 0.62, 0.0);
    for (i, (tip, pip)) in [(8, 6), (12, 10), (16, 14), (20, 18)].into_iter().enumerate() {
        points[pip] = Landmark::new(0.5, 0.50, 0.0);
        points[tip] = Landmark::new(0.5, if fingers[i + 1] { 0.25 } else { 0.58 }, 0.0);
    }
    LandmarkSet::new(points)
}

const OPEN: [bool; 5] = [true; 5];
const FIST: [bool; 5] = [false; 5];
const POINT: [bool; 5] = [false, true, false, false, false];

fn assert_result(result: Classification, label: impl Into<Label>, confidence: f32) {
    assert_eq!(result.label, label.into());
    assert!(
        (result.confidence - confidence).abs() < f32::EPSILON,
        "confidence {} != {confidence}",
        result.confidence
    );
}

#[test]
fn test_first_open_palm_is_hello() {
    let mut session = Session::with_detector(Scripted::new(vec![Ok(Some(hand(OPEN, 0.5)))]));
    assert_result(session.classify_frame(&frame()), Gesture::Hello, 0.94);
}

#[test]
fn test_wave_ties_to_first_seen() {
    let mut session = Session::with_detector(Scripted::new(vec![
        Ok(Some(hand(OPEN, 0.10))),
        Ok(Some(hand(OPEN, 0.20))),
        Ok(Some(hand(OPEN, 0.10))),
    ]));
    let payload = frame();

    assert_result(session.classify_frame(&payload), Gesture::Hello, 0.94);
    // Window is [HELLO, BYE]: tie, HELLO seen first; confidence is BYE's
    assert_result(session.classify_frame(&payload), Gesture::Hello, 0.95);
    assert_eq!(
        session.window().iter().copied().collect::<Vec<_>>(),
        [Gesture::Hello, Gesture::Bye]
    );
    // Third waving frame breaks the tie
    assert_result(session.classify_frame(&payload), Gesture::Bye, 0.95);
}

#[test]
fn test_sustained_wave_takes_over() {
    let xs = [0.10, 0.20, 0.10, 0.20, 0.10];
    let script = xs.iter().map(|&x| Ok(Some(hand(OPEN, x)))).collect();
    let mut session = Session::with_detector(Scripted::new(script));
    let payload = frame();

    let results: Vec<_> = xs.iter().map(|_| session.classify_frame(&payload)).collect();
    assert_result(results[4], Gesture::Bye, 0.95);
}

#[test]
fn test_no_hand_then_unknown() {
    let mut session = Session::with_detector(Scripted::new(vec![
        Ok(Some(hand(FIST, 0.5))),
        Ok(Some(hand(FIST, 0.5))),
        Ok(None),
        Ok(Some(hand(POINT, 0.5))),
    ]));
    let payload = frame();

    assert_result(session.classify_frame(&payload), Gesture::No, 0.90);
    assert_result(session.classify_frame(&payload), Gesture::No, 0.90);
    assert_result(session.classify_frame(&payload), Sentinel::NoHand, 0.0);
    assert_result(session.classify_frame(&payload), Gesture::Unknown, 0.40);
    assert_eq!(session.window().len(), 1);
}

#[test]
fn test_no_hand_resets_detector_tracking() {
    let detector = Scripted::new(vec![Ok(Some(hand(OPEN, 0.5))), Ok(None)]);
    let resets = Arc::clone(&detector.resets);
    let mut session = Session::with_detector(detector);
    let payload = frame();

    session.classify_frame(&payload);
    session.classify_frame(&payload);
    assert_eq!(*resets.lock().unwrap(), 1);
}

#[test]
fn test_motion_does_not_span_gap() {
    let mut session = Session::with_detector(Scripted::new(vec![
        Ok(Some(hand(OPEN, 0.10))),
        Ok(None),
        Ok(Some(hand(OPEN, 0.90))),
    ]));
    let payload = frame();

    session.classify_frame(&payload);
    session.classify_frame(&payload);
    assert_result(session.classify_frame(&payload), Gesture::Hello, 0.94);
    assert_eq!(session.motion().previous_x(), Some(0.90));
}

#[test]
fn test_malformed_payloads() {
    let mut session = Session::with_detector(Steady(hand(OPEN, 0.5)));

    assert_result(session.classify_frame(""), Sentinel::InvalidFrame, 0.0);
    assert_result(session.classify_frame("iVBORw0KGgo"), Sentinel::InvalidFrame, 0.0);
    assert_result(session.classify_frame(",iVBORw0KGgo"), Sentinel::InvalidFrame, 0.0);
    assert_result(session.classify_frame("data:image/png;base64,@@@"), Sentinel::InvalidImage, 0.0);

    // Valid base64 of bytes that are not an image
    let text = encode_payload(b"definitely not an image");
    assert_result(session.classify_frame(&text), Sentinel::InvalidImage, 0.0);

    // Nothing above touched the window
    assert!(session.window().is_empty());
}

#[test]
fn test_jpeg_payload_decodes() {
    let mut session = Session::with_detector(Steady(hand(FIST, 0.5)));
    assert_result(session.classify_frame(&encode(ImageFormat::Jpeg)), Gesture::No, 0.90);
}

#[test]
fn test_unavailable_detector() {
    let mut session = Session::with_factory(|| -> Result<Box<dyn LandmarkDetector>> {
        Err(InferenceError::FeatureNotEnabled("onnx".to_string()))
    });
    let payload = frame();

    assert_result(session.classify_frame(&payload), Sentinel::UnsupportedEnv, 0.0);
    assert_result(session.classify_frame(&payload), Sentinel::UnsupportedEnv, 0.0);
    // Frame checks still run first
    assert_result(session.classify_frame("garbage"), Sentinel::InvalidFrame, 0.0);
}

#[test]
fn test_missing_model_is_unsupported() {
    let factory = sign_inference::OnnxDetectorFactory::new("does/not/exist.onnx");
    let mut session = Session::with_factory(factory);
    assert_result(session.classify_frame(&frame()), Sentinel::UnsupportedEnv, 0.0);
}

#[test]
fn test_detector_failure_is_error() {
    let mut session = Session::with_detector(Scripted::new(vec![
        Err(InferenceError::InferenceError("runtime fault".to_string())),
        Ok(Some(hand(OPEN, 0.5))),
    ]));
    let payload = frame();

    assert_result(session.classify_frame(&payload), Sentinel::Error, 0.0);
    // Session stays usable
    assert_result(session.classify_frame(&payload), Gesture::Hello, 0.94);
}

#[test]
fn test_try_classify_surfaces_errors() {
    let mut session = Session::with_detector(Steady(hand(OPEN, 0.5)));
    let err = session.try_classify("no separator").unwrap_err();
    assert!(matches!(err, InferenceError::InvalidFrame(_)));
}

#[test]
fn test_shared_session_serializes_whole_calls() {
    const THREADS: usize = 4;
    const CALLS: usize = 5;

    let detector = Exclusive::new(hand(OPEN, 0.5));
    let calls = Arc::clone(&detector.calls);
    let shared = SharedSession::new(Session::with_detector(detector));
    let payload = Arc::new(frame());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let shared = shared.clone();
            let payload = Arc::clone(&payload);
            thread::spawn(move || {
                (0..CALLS)
                    .map(|_| shared.classify_frame(&payload))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.extend(handle.join().unwrap());
    }

    assert_eq!(results.len(), THREADS * CALLS);
    assert_eq!(calls.load(Ordering::SeqCst), THREADS * CALLS);
    for result in results {
        assert_result(result, Gesture::Hello, 0.94);
    }
    shared.with_session(|session| {
        assert_eq!(session.window().len(), WINDOW_SIZE);
        assert_eq!(session.motion().previous_x(), Some(0.5));
    });
}

#[test]
fn test_result_json_shape() {
    let json = serde_json::to_value(Classification::gesture(Gesture::CallMe, 0.94)).unwrap();
    assert_eq!(json["label"], "CALL_ME");

    let json = serde_json::to_value(Classification::sentinel(Sentinel::NoHand)).unwrap();
    assert_eq!(json["label"], "NO_HAND");
    assert_eq!(json["confidence"], 0.0);
}

#[test]
fn test_voice_lookup() {
    let sequence = vocabulary::lookup("Hello thankyou and goodbye");
    let labels: Vec<_> = sequence.iter().map(|s| s.label).collect();
    assert_eq!(labels, ["HELLO", "THANK YOU", "BYE"]);
}
