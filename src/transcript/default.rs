//! Built-in transcript used when no source can be loaded.

use super::{parse_vtt, TranscriptSegment};

/// Sample lecture on searching and sorting, in WebVTT form.
pub const DEFAULT_TRANSCRIPT_VTT: &str = "WEBVTT

1
00:00:00.000 --> 00:00:07.000
Welcome to this lesson on algorithms. Today we look at searching through sorted data.

2
00:00:07.000 --> 00:00:15.000
An algorithm is a precise sequence of steps. A search algorithm finds a target value inside a collection.

3
00:00:15.000 --> 00:00:24.000
Linear search checks every element in order. Linear search is simple but slow on large collections.

4
00:00:24.000 --> 00:00:33.000
Binary search needs sorted input. Binary search compares the target with the middle element and discards half of the remaining range.

5
00:00:33.000 --> 00:00:42.000
Because each comparison halves the range, binary search runs in logarithmic time. We write this complexity as big O of log n.

6
00:00:42.000 --> 00:00:52.000
Sorting comes first. Merge sort splits the data, sorts each half, and merges the sorted halves in n log n time.

7
00:00:52.000 --> 00:01:00.000
Space complexity matters too. Merge sort needs extra memory, while binary search needs only constant space.

8
00:01:00.000 --> 00:01:08.000
To recap: sort the data once, then binary search answers each query quickly. Try the quiz to check your understanding.
";

/// Parse the built-in transcript.
pub fn default_segments() -> Vec<TranscriptSegment> {
    parse_vtt(DEFAULT_TRANSCRIPT_VTT)
}
