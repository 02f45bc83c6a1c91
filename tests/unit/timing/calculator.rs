use super::*;
use crate::record::model::RecordId;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn fps30() -> Fps {
    Fps::integer(30).unwrap()
}

fn images(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("img/{i}.png")).collect()
}

fn record(script: &str, n_images: usize) -> VideoRecord {
    VideoRecord {
        id: RecordId::from("r1"),
        script: script.to_string(),
        image_list: images(n_images),
        audio_file_url: "voice.mp3".to_string(),
        // 3 seconds -> 90 frames at 30fps.
        captions: vec![
            Caption::new("one", 0, 1000),
            Caption::new("two", 1000, 2000),
            Caption::new("three", 2000, 3000),
        ],
    }
}

#[test]
fn empty_captions_use_thirty_second_fallback() {
    let calc =
        TimingCalculator::new(fps30(), vec![], images(2), TimingConfig::default()).unwrap();
    assert_eq!(calc.total_frames(), 900.0);
    assert_eq!(calc.duration_in_frames(), 900);
}

#[test]
fn duration_rounds_to_whole_frames() {
    let calc = TimingCalculator::new(
        fps30(),
        vec![Caption::new("x", 0, 1234)],
        vec![],
        TimingConfig::default(),
    )
    .unwrap();
    assert!(approx(calc.total_frames(), 37.02));
    assert_eq!(calc.duration_in_frames(), 37);
}

#[test]
fn slots_follow_image_count() {
    let calc = TimingCalculator::from_record(&record("s", 3), fps30(), TimingConfig::default())
        .unwrap();
    assert_eq!(calc.total_frames(), 90.0);
    let slot = calc.slot(1);
    assert_eq!(slot.duration, 22.5);
    assert_eq!(slot.start, 22.5);
    assert_eq!(slot.end(), 45.0);
}

#[test]
fn image_transform_matches_curves() {
    let calc = TimingCalculator::from_record(&record("s", 1), fps30(), TimingConfig::default())
        .unwrap();
    // One image over 90 frames: slot [0, 45), mid 22.5.
    let at_start = calc.image_transform(0, FrameIndex(0)).unwrap();
    assert_eq!(at_start.scale, 1.0);
    assert_eq!(at_start.opacity, 1.0);
    assert!(at_start.visible);

    let at_end = calc.image_transform(0, FrameIndex(45)).unwrap();
    assert_eq!(at_end.scale, 1.0);
    assert_eq!(at_end.opacity, 0.0);
    assert!(at_end.visible);

    let gone = calc.image_transform(0, FrameIndex(55)).unwrap();
    assert!(!gone.visible);
}

#[test]
fn eval_frame_reports_caption_images_and_audio() {
    let calc = TimingCalculator::from_record(&record("s", 3), fps30(), TimingConfig::default())
        .unwrap();

    let state = calc.eval_frame(FrameIndex(30)).unwrap();
    assert_eq!(state.caption, "one");
    assert!(state.caption_visible);
    // Image 0 ends at 22.5 but stays mounted until 32.5; image 1 started at 22.5.
    let indices: Vec<usize> = state.images.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(state.images[1].source, "img/1.png");

    let audio = state.audio.unwrap();
    assert_eq!(audio.source, "voice.mp3");
    assert_eq!(audio.range.end, FrameIndex(90));
}

#[test]
fn eval_frame_transform_zooms_about_canvas_center() {
    let calc = TimingCalculator::from_record(&record("s", 1), fps30(), TimingConfig::default())
        .unwrap();
    let state = calc.eval_frame(FrameIndex(0)).unwrap();
    assert_eq!(state.images[0].transform, Affine::IDENTITY);

    let state = calc.eval_frame(FrameIndex(22)).unwrap();
    let img = &state.images[0];
    let center = kurbo::Point::new(150.0, 225.0);
    let mapped = img.transform * center;
    assert!(approx(mapped.x, center.x));
    assert!(approx(mapped.y, center.y));
    assert!(img.scale > 1.7);
}

#[test]
fn eval_frame_rejects_out_of_bounds() {
    let calc = TimingCalculator::from_record(&record("s", 3), fps30(), TimingConfig::default())
        .unwrap();
    assert!(calc.eval_frame(FrameIndex(89)).is_ok());
    let err = calc.eval_frame(FrameIndex(90)).unwrap_err();
    assert!(matches!(err, StoryreelError::Evaluation(_)));
}

#[test]
fn missing_script_draws_nothing_but_keeps_audio() {
    let calc = TimingCalculator::from_record(&record("  ", 3), fps30(), TimingConfig::default())
        .unwrap();
    let state = calc.eval_frame(FrameIndex(30)).unwrap();
    assert!(state.images.is_empty());
    assert_eq!(state.caption, "");
    assert!(!state.caption_visible);
    assert!(state.audio.is_some());
}

#[test]
fn no_images_still_reports_captions() {
    let calc = TimingCalculator::from_record(&record("s", 0), fps30(), TimingConfig::default())
        .unwrap();
    let state = calc.eval_frame(FrameIndex(75)).unwrap();
    assert!(state.images.is_empty());
    assert_eq!(state.caption, "three");
    assert!(!state.caption_visible);
    assert_eq!(calc.slot(0).duration, 90.0);
}

#[test]
fn caption_hidden_after_last_image_unmounts() {
    let calc = TimingCalculator::from_record(&record("s", 3), fps30(), TimingConfig::default())
        .unwrap();
    // Image 2 ends at 67.5 and stays mounted until 77.5.
    let mounted = calc.eval_frame(FrameIndex(77)).unwrap();
    assert_eq!(mounted.caption, "three");
    assert!(mounted.caption_visible);

    let bare = calc.eval_frame(FrameIndex(78)).unwrap();
    assert!(bare.images.is_empty());
    assert_eq!(bare.caption, "three");
    assert!(!bare.caption_visible);
}

#[test]
fn overlap_is_configurable() {
    let cfg = TimingConfig {
        overlap_frames: 0.0,
        ..TimingConfig::default()
    };
    let calc = TimingCalculator::from_record(&record("s", 3), fps30(), cfg).unwrap();
    let state = calc.eval_frame(FrameIndex(30)).unwrap();
    let indices: Vec<usize> = state.images.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![1]);
}

#[test]
fn evaluation_is_pure() {
    let calc = TimingCalculator::from_record(&record("s", 3), fps30(), TimingConfig::default())
        .unwrap();
    for f in [0u64, 17, 44, 89] {
        assert_eq!(
            calc.eval_frame(FrameIndex(f)).unwrap(),
            calc.eval_frame(FrameIndex(f)).unwrap()
        );
    }
}

#[test]
fn rejects_invalid_inputs() {
    let bad_fps = Fps { num: 0, den: 1 };
    assert!(TimingCalculator::new(bad_fps, vec![], vec![], TimingConfig::default()).is_err());

    let bad_cfg = TimingConfig {
        fallback_duration_secs: -1.0,
        ..TimingConfig::default()
    };
    assert!(TimingCalculator::new(fps30(), vec![], vec![], bad_cfg).is_err());

    let calc = TimingCalculator::new(fps30(), vec![], vec![], TimingConfig::default()).unwrap();
    assert!(
        calc.with_canvas(Canvas {
            width: 0,
            height: 10
        })
        .is_err()
    );
}

#[test]
fn fingerprint_tracks_dataset_not_tuning() {
    let base = TimingCalculator::from_record(&record("s", 3), fps30(), TimingConfig::default())
        .unwrap();
    let same = TimingCalculator::from_record(&record("s", 3), fps30(), TimingConfig::default())
        .unwrap();
    assert_eq!(base.dataset_fingerprint(), same.dataset_fingerprint());

    let more_images =
        TimingCalculator::from_record(&record("s", 4), fps30(), TimingConfig::default()).unwrap();
    assert_ne!(base.dataset_fingerprint(), more_images.dataset_fingerprint());

    let faster = TimingCalculator::from_record(
        &record("s", 3),
        Fps::integer(60).unwrap(),
        TimingConfig::default(),
    )
    .unwrap();
    assert_ne!(base.dataset_fingerprint(), faster.dataset_fingerprint());

    let retuned = TimingCalculator::from_record(
        &record("s", 3),
        fps30(),
        TimingConfig {
            zoom_peak: 2.0,
            ..TimingConfig::default()
        },
    )
    .unwrap();
    assert_eq!(base.dataset_fingerprint(), retuned.dataset_fingerprint());
}
