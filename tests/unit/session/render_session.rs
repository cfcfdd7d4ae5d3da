use super::*;
use crate::session::sink::InMemorySink;
use crate::transcript::model::Word;

fn transcript() -> Transcript {
    Transcript::new(vec![
        Word::new("a", 0, 900),
        Word::new("b", 1000, 1900),
        Word::new("c", 4200, 5000),
    ])
    .unwrap()
}

fn session() -> RenderSession {
    RenderSession::new(RenderConfig::default(), transcript()).unwrap()
}

fn full_range(s: &RenderSession) -> FrameRange {
    FrameRange::new(FrameIndex(0), FrameIndex(s.duration_frames())).unwrap()
}

#[test]
fn snapshot_combines_scene_and_caption() {
    let s = session();
    assert_eq!(s.scenes().len(), 2);
    assert_eq!(s.duration_frames(), 150);

    let snap = s.frame_snapshot(FrameIndex(30)).unwrap();
    let scene = snap.scene.unwrap();
    assert_eq!(scene.scene_id, 1);
    assert_eq!(scene.local_frame, 30);
    assert_eq!(scene.duration_frames, 57);
    assert_eq!(snap.caption.unwrap().current.text, "b");
}

#[test]
fn gap_between_scenes_has_no_scene_or_caption() {
    let s = session();
    let snap = s.frame_snapshot(FrameIndex(100)).unwrap();
    assert!(snap.scene.is_none());
    assert!(snap.caption.is_none());
}

#[test]
fn second_scene_uses_next_variant() {
    let s = session();
    let snap = s.frame_snapshot(FrameIndex(130)).unwrap();
    let scene = snap.scene.unwrap();
    assert_eq!(scene.scene_id, 2);
    assert_eq!(scene.local_frame, 4);
    assert_eq!(scene.state.preset, 1);
    assert_eq!(scene.state.grade, crate::motion::grade::ColorGrade::Cool);
}

#[test]
fn frames_past_the_end_are_rejected() {
    let s = session();
    assert!(s.frame_snapshot(FrameIndex(150)).is_err());
}

#[test]
fn parallel_and_sequential_renders_match() {
    let s = session();
    let range = full_range(&s);

    let mut seq = InMemorySink::new();
    let seq_stats = s
        .render_range(range, &RenderThreading::default(), &mut seq)
        .unwrap();

    let mut par = InMemorySink::new();
    let par_stats = s
        .render_range(
            range,
            &RenderThreading {
                parallel: true,
                chunk_size: 7,
                threads: Some(3),
            },
            &mut par,
        )
        .unwrap();

    assert_eq!(seq.frames(), par.frames());
    assert_eq!(seq_stats, par_stats);
    assert_eq!(seq_stats.frames_total, 150);
    assert_eq!(seq_stats.frames_with_scene, 57 + 24);
    assert_eq!(seq.config().unwrap().frames, 150);
    for (i, f) in par.frames().iter().enumerate() {
        assert_eq!(f.frame, FrameIndex(i as u64));
    }
}

#[test]
fn zero_threads_is_rejected() {
    let s = session();
    let mut sink = InMemorySink::new();
    let err = s
        .render_range(
            full_range(&s),
            &RenderThreading {
                parallel: true,
                chunk_size: 16,
                threads: Some(0),
            },
            &mut sink,
        )
        .unwrap_err();
    assert!(err.to_string().contains("threads"));
}

#[test]
fn range_past_duration_is_rejected() {
    let s = session();
    let mut sink = InMemorySink::new();
    let range = FrameRange::new(FrameIndex(100), FrameIndex(151)).unwrap();
    assert!(
        s.render_range(range, &RenderThreading::default(), &mut sink)
            .is_err()
    );
}

#[test]
fn empty_transcript_renders_one_blank_frame() {
    let s = RenderSession::new(RenderConfig::default(), Transcript::default()).unwrap();
    assert!(s.scenes().is_empty());
    assert_eq!(s.duration_frames(), 1);
    let snap = s.frame_snapshot(FrameIndex(0)).unwrap();
    assert!(snap.scene.is_none());
    assert!(snap.caption.is_none());
}

#[test]
fn scenes_replayed_against_shorter_transcript_are_clamped() {
    let long = session();
    let scenes = long.scenes().to_vec();
    let short = Transcript::new(vec![Word::new("a", 0, 900)]).unwrap();
    let s = RenderSession::with_scenes(RenderConfig::default(), short, scenes).unwrap();
    // Both scenes clamp onto word 0 and share its extent; the later one is on top.
    let snap = s.frame_snapshot(FrameIndex(10)).unwrap();
    assert_eq!(snap.scene.unwrap().scene_id, 2);
}

#[test]
fn configured_duration_clamps_last_scene() {
    let cfg = RenderConfig {
        duration_frames: Some(140),
        ..RenderConfig::default()
    };
    let s = RenderSession::new(cfg, transcript()).unwrap();
    assert_eq!(s.duration_frames(), 140);
    let last = s.frame_snapshot(FrameIndex(139)).unwrap().scene.unwrap();
    assert_eq!(last.duration_frames, 14);
    assert_eq!(last.local_frame, 13);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = RenderConfig {
        bucket_ms: 0,
        ..RenderConfig::default()
    };
    assert!(RenderSession::new(cfg, transcript()).is_err());
}

#[test]
fn unordered_scenes_are_rejected() {
    let mut scenes = session().scenes().to_vec();
    scenes.reverse();
    let err = RenderSession::with_scenes(RenderConfig::default(), transcript(), scenes)
        .unwrap_err();
    assert!(err.to_string().contains("before scene"));
}

#[test]
fn extreme_timestamps_build_a_session() {
    let cfg = RenderConfig {
        fps: crate::foundation::core::Fps::new(u32::MAX, 1).unwrap(),
        ..RenderConfig::default()
    };
    let t = Transcript::new(vec![Word::new("x", u64::MAX, u64::MAX)]).unwrap();
    let s = RenderSession::new(cfg, t).unwrap();
    assert!(s.timeline().spans().is_empty());
    assert!(s.frame_snapshot(FrameIndex(0)).unwrap().scene.is_none());
}
