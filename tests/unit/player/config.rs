use super::*;
use crate::record::model::RecordId;

#[test]
fn defaults_are_portrait_thirty_fps() {
    let cfg = PlayerConfig::default();
    assert_eq!(cfg.duration_in_frames, 100);
    assert_eq!(
        cfg.canvas(),
        Canvas {
            width: 300,
            height: 450
        }
    );
    assert_eq!(cfg.timeline_fps().unwrap(), Fps { num: 30, den: 1 });
    cfg.validate().unwrap();
}

#[test]
fn apply_duration_rounds() {
    let mut cfg = PlayerConfig::default();
    cfg.apply_duration(149.5);
    assert_eq!(cfg.duration_in_frames, 150);
    cfg.apply_duration(37.02);
    assert_eq!(cfg.duration_in_frames, 37);
}

#[test]
fn validate_rejects_degenerate_sizes() {
    let cfg = PlayerConfig {
        composition_width: 0,
        ..PlayerConfig::default()
    };
    assert!(cfg.validate().is_err());
    let cfg = PlayerConfig {
        fps: 0,
        ..PlayerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn renderer_input_serializes_flat_camel_case() {
    let input = RendererInput {
        player: PlayerConfig::default(),
        input_props: VideoRecord {
            id: RecordId::from("9"),
            script: "s".to_string(),
            image_list: vec!["a.png".to_string()],
            audio_file_url: "a.mp3".to_string(),
            captions: vec![],
        },
    };
    let v = serde_json::to_value(&input).unwrap();
    assert_eq!(v["durationInFrames"], 100);
    assert_eq!(v["compositionWidth"], 300);
    assert_eq!(v["compositionHeight"], 450);
    assert_eq!(v["fps"], 30);
    assert_eq!(v["inputProps"]["imageList"][0], "a.png");
    assert_eq!(v["inputProps"]["audioFileUrl"], "a.mp3");
}
