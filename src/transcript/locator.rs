//! Map a playback position to a transcript segment.

use super::TranscriptSegment;

/// Find the segment for playback time `t`.
///
/// The first segment containing `t` wins. When none does (gaps, times past
/// the end), the segment whose start or end lies closest to `t` is returned,
/// earlier segments winning ties. Returns `None` only for an empty slice.
pub fn locate(segments: &[TranscriptSegment], t: f64) -> Option<&TranscriptSegment> {
    if let Some(seg) = segments.iter().find(|s| s.contains(t)) {
        return Some(seg);
    }

    let mut nearest: Option<(&TranscriptSegment, f64)> = None;
    for seg in segments {
        let distance = seg.distance_to(t);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((seg, distance)),
        }
    }

    nearest.map(|(seg, _)| seg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(0.0, 7.0, "first"),
            TranscriptSegment::new(7.0, 15.0, "second"),
            TranscriptSegment::new(20.0, 30.0, "third"),
        ]
    }

    #[test]
    fn test_locate_contained() {
        let segs = segments();
        assert_eq!(locate(&segs, 3.0).map(|s| s.text.as_str()), Some("first"));
        assert_eq!(locate(&segs, 25.0).map(|s| s.text.as_str()), Some("third"));
    }

    #[test]
    fn test_locate_boundary_prefers_first() {
        let segs = segments();
        assert_eq!(locate(&segs, 7.0).map(|s| s.text.as_str()), Some("first"));
    }

    #[test]
    fn test_locate_gap_uses_nearest() {
        let segs = segments();
        assert_eq!(locate(&segs, 16.0).map(|s| s.text.as_str()), Some("second"));
        assert_eq!(locate(&segs, 19.0).map(|s| s.text.as_str()), Some("third"));
        assert_eq!(locate(&segs, 500.0).map(|s| s.text.as_str()), Some("third"));
    }

    #[test]
    fn test_locate_gap_tie_prefers_earlier() {
        let segs = segments();
        assert_eq!(locate(&segs, 17.5).map(|s| s.text.as_str()), Some("second"));
    }

    #[test]
    fn test_locate_empty() {
        assert!(locate(&[], 4.0).is_none());
    }

    #[test]
    fn test_locate_is_repeatable() {
        let segs = segments();
        let a = locate(&segs, 18.0).cloned();
        let b = locate(&segs, 18.0).cloned();
        assert_eq!(a, b);
    }

    #[test]
    fn test_locate_overlapping_segments() {
        let segs = vec![
            TranscriptSegment::new(0.0, 10.0, "wide"),
            TranscriptSegment::new(5.0, 8.0, "inner"),
        ];
        assert_eq!(locate(&segs, 6.0).map(|s| s.text.as_str()), Some("wide"));
    }
}
