use super::*;
use crate::assets::load::{DefaultImageLoader, LoaderConfig};
use crate::assets::resolve::ImageSource;
use crate::encode::sink::InMemorySink;
use crate::model::sequence::FrameSequence;
use crate::text::fonts::{FontBook, FontConfig};

/// Each character is 10 units wide.
fn fixed(s: &str) -> StayframeResult<f32> {
    Ok(s.chars().count() as f32 * 10.0)
}

#[test]
fn wrap_is_greedy_and_keeps_trailing_space() {
    let lines = wrap_words("aa bb cc dd", 70.0, fixed).unwrap();
    assert_eq!(lines, vec!["aa bb ", "cc dd "]);
}

#[test]
fn long_first_word_is_never_split() {
    let lines = wrap_words("abcdefghij k", 50.0, fixed).unwrap();
    assert_eq!(lines, vec!["abcdefghij ", "k "]);
}

#[test]
fn every_word_too_long_gets_its_own_line() {
    let lines = wrap_words("aaaaaa bbbbbb cccccc", 40.0, fixed).unwrap();
    assert_eq!(lines, vec!["aaaaaa ", "bbbbbb ", "cccccc "]);
}

#[test]
fn explicit_newlines_are_not_breaks() {
    let lines = wrap_words("a\nb", 1000.0, fixed).unwrap();
    assert_eq!(lines, vec!["a\nb "]);
}

#[test]
fn measure_errors_propagate() {
    let err = wrap_words("a b", 10.0, |_| Err(StayframeError::render("boom"))).unwrap_err();
    assert!(err.to_string().contains("boom"));
}

fn compositor() -> Option<Compositor> {
    let fonts = FontBook::new(&FontConfig::default());
    if fonts.face_count() == 0 {
        return None;
    }
    let loader = DefaultImageLoader::new(LoaderConfig::default()).unwrap();
    Some(Compositor::new(fonts, Box::new(loader)))
}

#[test]
fn empty_sequence_is_rejected_before_sink_begins() {
    let Some(mut c) = compositor() else {
        return;
    };
    let mut sink = InMemorySink::new();
    let dims = CanvasDimensions::new(32, 32).unwrap();
    let err = c.generate(dims, &[], &mut sink, &mut |_| {}).unwrap_err();
    assert!(matches!(err, StayframeError::Validation(_)));
    assert!(sink.config().is_none());
    assert!(c.generate_gif(dims, &[], &mut |_| {}).is_err());
}

#[test]
fn frames_are_pushed_in_order_with_progress() {
    let Some(mut c) = compositor() else {
        return;
    };
    let mut seq = FrameSequence::new();
    seq.add_frame(ImageSource::None, "one");
    seq.set_frame_duration(300);
    seq.add_frame(ImageSource::Url("/nope/missing.png".into()), "two");
    seq.set_frame_duration(700);
    seq.add_frame(ImageSource::None, "");

    let dims = CanvasDimensions::new(120, 60).unwrap();
    let mut sink = InMemorySink::new();
    let mut seen = Vec::new();
    c.generate(dims, seq.frames(), &mut sink, &mut |p| seen.push(p))
        .unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config().map(|c| (c.width, c.height)), Some((120, 60)));
    let delays: Vec<u32> = sink.frames().iter().map(|(_, d)| *d).collect();
    assert_eq!(delays, vec![500, 300, 700]);
    assert_eq!(seen.len(), 3);
    assert!((seen[0] - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(seen[2], 1.0);

    // Black clear, no overlay, even when the background failed to load.
    let (f, _) = &sink.frames()[1];
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(sink.frames()[0].0.width, 120);
}
