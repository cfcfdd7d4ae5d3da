use super::*;
use crate::segment::segmenter::segment;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn words() -> Vec<Word> {
    vec![
        Word::new("a", 0, 900),
        Word::new("b", 1000, 1900),
        Word::new("c", 4200, 5000),
    ]
}

#[test]
fn spans_follow_word_extents() {
    let w = words();
    let scenes = segment(&w, 4000);
    let tl = Timeline::build(&scenes, &w, fps30(), None);
    assert_eq!(tl.spans().len(), 2);
    assert_eq!(tl.spans()[0].range.start, FrameIndex(0));
    assert_eq!(tl.spans()[0].range.end, FrameIndex(57));
    assert_eq!(tl.spans()[1].range.start, FrameIndex(126));
    assert_eq!(tl.spans()[1].range.end, FrameIndex(150));
    assert_eq!(tl.duration_frames(), 150);
}

#[test]
fn last_scene_is_clamped_to_total_duration() {
    let w = words();
    let scenes = segment(&w, 4000);
    let tl = Timeline::build(&scenes, &w, fps30(), Some(140));
    assert_eq!(tl.spans()[1].range.end, FrameIndex(140));
    assert_eq!(tl.duration_frames(), 140);
}

#[test]
fn spans_past_total_duration_are_dropped() {
    let w = words();
    let scenes = segment(&w, 4000);
    let tl = Timeline::build(&scenes, &w, fps30(), Some(100));
    assert_eq!(tl.spans().len(), 1);
}

#[test]
fn zero_length_scene_gets_one_frame() {
    let w = vec![Word::new("blip", 1000, 1000)];
    let scenes = segment(&w, 4000);
    let tl = Timeline::build(&scenes, &w, fps30(), None);
    assert_eq!(tl.spans()[0].range.len_frames(), 1);
}

#[test]
fn unresolvable_scenes_are_skipped() {
    let w = words();
    let scenes = segment(&w, 4000);
    let tl = Timeline::build(&scenes, &[], fps30(), None);
    assert!(tl.spans().is_empty());
    assert_eq!(tl.duration_frames(), 1);
}

#[test]
fn active_scene_by_containment() {
    let w = words();
    let scenes = segment(&w, 4000);
    let tl = Timeline::build(&scenes, &w, fps30(), None);
    assert_eq!(tl.active(FrameIndex(0)).map(|s| s.scene_id), Some(1));
    assert_eq!(tl.active(FrameIndex(56)).map(|s| s.scene_id), Some(1));
    assert_eq!(tl.active(FrameIndex(57)), None);
    assert_eq!(tl.active(FrameIndex(126)).map(|s| s.scene_id), Some(2));
    assert_eq!(tl.active(FrameIndex(150)), None);
}

#[test]
fn overlapping_spans_prefer_later_scene() {
    let w = vec![
        Word::new("long", 3000, 6000),
        Word::new("next", 4100, 4500),
    ];
    let scenes = segment(&w, 4000);
    let tl = Timeline::build(&scenes, &w, fps30(), None);
    // scene 1: [90, 180), scene 2: [123, 135)
    assert_eq!(tl.active(FrameIndex(100)).map(|s| s.scene_id), Some(1));
    assert_eq!(tl.active(FrameIndex(125)).map(|s| s.scene_id), Some(2));
    assert_eq!(tl.active(FrameIndex(140)).map(|s| s.scene_id), Some(1));
}

#[test]
fn saturated_frame_numbers_do_not_overflow() {
    let w = vec![Word::new("x", u64::MAX, u64::MAX)];
    let scenes = segment(&w, 4000);
    let fps = Fps::new(u32::MAX, 1).unwrap();
    let tl = Timeline::build(&scenes, &w, fps, None);
    // The scene starts on the last representable frame and has no room left.
    assert!(tl.spans().is_empty());
    assert_eq!(tl.duration_frames(), u64::MAX);
}

#[test]
fn spans_are_ordered_by_start_frame() {
    let w = words();
    let mut scenes = segment(&w, 4000);
    scenes.reverse();
    let tl = Timeline::build(&scenes, &w, fps30(), None);
    let ids: Vec<u32> = tl.spans().iter().map(|s| s.scene_id).collect();
    assert_eq!(ids, [1, 2]);
    assert_eq!(tl.active(FrameIndex(130)).map(|s| s.scene_id), Some(2));
    assert_eq!(tl.active(FrameIndex(10)).map(|s| s.scene_id), Some(1));
}
