use super::*;
use crate::{Caption, TimingConfig};

fn calc() -> TimingCalculator {
    TimingCalculator::new(
        Fps::integer(30).unwrap(),
        vec![
            Caption::new("first", 0, 1500),
            Caption::new("second", 1500, 4000),
        ],
        (0..4).map(|i| format!("{i}.jpg")).collect(),
        TimingConfig::default(),
    )
    .unwrap()
}

#[test]
fn sequential_plan_covers_every_frame() {
    let plan = FramePlan::build(&calc(), PlanOpts::default()).unwrap();
    assert_eq!(plan.duration_in_frames, 120);
    assert_eq!(plan.frames.len(), 120);
    for (i, f) in plan.frames.iter().enumerate() {
        assert_eq!(f.frame, FrameIndex(i as u64));
    }
}

#[test]
fn parallel_plan_matches_sequential() {
    let c = calc();
    let seq = FramePlan::build(&c, PlanOpts::default()).unwrap();
    let par = FramePlan::build(
        &c,
        PlanOpts {
            parallel: true,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn zero_threads_is_rejected() {
    let err = FramePlan::build(
        &calc(),
        PlanOpts {
            parallel: true,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, StoryreelError::Validation(_)));
}
