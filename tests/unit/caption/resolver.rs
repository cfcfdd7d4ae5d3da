use super::*;

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
fn finds_word_by_inclusive_frame_range() {
    let w = words();
    let style = CaptionStyle::default();
    // "a" covers frames 0..=27, "b" 30..=57, "c" 126..=150.
    let c = resolve_caption(FrameIndex(27), &w, fps30(), &style).unwrap();
    assert_eq!(c.current.text, "a");
    assert!(c.previous.is_none());

    let c = resolve_caption(FrameIndex(30), &w, fps30(), &style).unwrap();
    assert_eq!(c.current.text, "b");
    assert_eq!(c.previous.as_ref().map(|p| p.text.as_str()), Some("a"));

    let c = resolve_caption(FrameIndex(150), &w, fps30(), &style).unwrap();
    assert_eq!(c.index, 2);
}

#[test]
fn gaps_resolve_to_none() {
    let w = words();
    let style = CaptionStyle::default();
    assert!(resolve_caption(FrameIndex(28), &w, fps30(), &style).is_none());
    assert!(resolve_caption(FrameIndex(100), &w, fps30(), &style).is_none());
    assert!(resolve_caption(FrameIndex(151), &w, fps30(), &style).is_none());
    assert!(resolve_caption(FrameIndex(0), &[], fps30(), &style).is_none());
}

#[test]
fn overlap_takes_first_word_in_sequence() {
    let w = vec![Word::new("x", 0, 2000), Word::new("y", 500, 700)];
    let style = CaptionStyle::default();
    let c = resolve_caption(FrameIndex(18), &w, fps30(), &style).unwrap();
    assert_eq!(c.current.text, "x");
}

#[test]
fn pop_scale_ramps_over_window() {
    let w = words();
    let style = CaptionStyle::default();
    let at = |f| {
        resolve_caption(FrameIndex(f), &w, fps30(), &style)
            .unwrap()
            .pop_scale
    };
    assert_eq!(at(30), 0.92);
    assert!(at(32) > 0.92 && at(32) < 1.0);
    assert_eq!(at(35), 1.0);
    assert_eq!(at(50), 1.0);
}

#[test]
fn zero_pop_window_is_full_scale() {
    let style = CaptionStyle {
        pop_start: 0.5,
        pop_window_frames: 0,
    };
    assert_eq!(style.pop_scale(10, 10), 1.0);
}

#[test]
fn index_agrees_with_linear_scan() {
    let mut w = Vec::new();
    for i in 0..300u64 {
        let start = i * 180 + (i % 5) * 37;
        // Every seventh word lingers and overlaps its successors.
        let end = if i % 7 == 0 { start + 900 } else { start + 120 + (i % 3) * 40 };
        w.push(Word::new(format!("w{i}"), start, end));
    }
    w.push(Word::new("tail", 60_000, 60_000));

    let style = CaptionStyle::default();
    for fps in [fps30(), Fps::new(24, 1).unwrap(), Fps::new(30000, 1001).unwrap()] {
        let idx = CaptionIndex::new(&w, fps);
        for f in 0..1900u64 {
            let frame = FrameIndex(f);
            assert_eq!(
                idx.resolve(frame, &w, &style),
                resolve_caption(frame, &w, fps, &style),
                "frame {f}"
            );
        }
    }
}

#[test]
fn empty_index_resolves_nothing() {
    let idx = CaptionIndex::new(&[], fps30());
    assert_eq!(idx.active_index(FrameIndex(0)), None);
}

#[test]
fn style_validation() {
    CaptionStyle::default().validate().unwrap();
    let bad = CaptionStyle {
        pop_start: 0.0,
        pop_window_frames: 5,
    };
    assert!(bad.validate().is_err());
}
