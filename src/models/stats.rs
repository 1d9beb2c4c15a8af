use std::time::{Duration, Instant};

use super::image::ProcessedImage;
use crate::config::StrategyKind;

/// Snapshot of viewer-side frame statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames recorded since the tracker was created or reset
    pub frame_count: u64,
    /// Frames per second over the last completed one-second window
    pub fps: u32,
    /// Resolution of the most recent frame
    pub resolution: (usize, usize),
    /// Pipeline time of the most recent frame
    pub processing_time: Duration,
    /// Strategy of the most recent frame
    pub strategy: StrategyKind,
}

/// Caller-owned FPS and timing tracker.
///
/// The pipeline keeps no state between frames; a viewer that wants an FPS
/// readout owns one of these and feeds it each result.
#[derive(Debug, Clone)]
pub struct FrameStatsTracker {
    frame_count: u64,
    window_frames: u32,
    window_start: Option<Instant>,
    fps: u32,
    last: Option<(usize, usize, Duration, StrategyKind)>,
}

const FPS_WINDOW: Duration = Duration::from_millis(1000);

impl FrameStatsTracker {
    /// Empty tracker
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            window_frames: 0,
            window_start: None,
            fps: 0,
            last: None,
        }
    }

    /// Record a processed frame observed at `now`.
    pub fn record(&mut self, image: &ProcessedImage, now: Instant) -> FrameStats {
        self.frame_count += 1;
        self.window_frames += 1;
        self.last = Some((image.width(), image.height(), image.elapsed(), image.strategy()));

        let start = *self.window_start.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= FPS_WINDOW {
            self.fps = (self.window_frames as u128 * 1000 / elapsed.as_millis()) as u32;
            self.window_frames = 0;
            self.window_start = Some(now);
        }

        self.snapshot()
    }

    /// Current statistics
    pub fn snapshot(&self) -> FrameStats {
        let (w, h, processing_time, strategy) =
            self.last
                .unwrap_or((0, 0, Duration::ZERO, StrategyKind::Canny));
        FrameStats {
            frame_count: self.frame_count,
            fps: self.fps,
            resolution: (w, h),
            processing_time,
            strategy,
        }
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FrameStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(elapsed_ms: u64) -> ProcessedImage {
        ProcessedImage::new(
            vec![0; 4 * 2 * 3],
            4,
            2,
            StrategyKind::Canny,
            Duration::from_millis(elapsed_ms),
        )
    }

    #[test]
    fn test_fps_window() {
        let mut tracker = FrameStatsTracker::new();
        let t0 = Instant::now();

        // 30 frames inside the first second: no FPS figure yet
        for i in 0..30 {
            let stats = tracker.record(&frame(5), t0 + Duration::from_millis(i * 33));
            assert_eq!(stats.fps, 0);
        }

        // Crossing the one second mark publishes the window rate
        let stats = tracker.record(&frame(7), t0 + Duration::from_millis(1000));
        assert_eq!(stats.fps, 31);
        assert_eq!(stats.frame_count, 31);
        assert_eq!(stats.resolution, (4, 2));
        assert_eq!(stats.processing_time, Duration::from_millis(7));
    }

    #[test]
    fn test_reset() {
        let mut tracker = FrameStatsTracker::new();
        tracker.record(&frame(1), Instant::now());
        tracker.reset();
        let stats = tracker.snapshot();
        assert_eq!(stats.frame_count, 0);
        assert_eq!(stats.resolution, (0, 0));
    }
}
