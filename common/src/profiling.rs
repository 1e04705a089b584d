//! Frame timing statistics for the periodic heartbeat log.
//!
//! Time sources differ between targets (`std::time::Instant` in the
//! simulator, `embassy_time::Instant` on the firmware), so this module only
//! takes durations in microseconds. Each target measures, calls
//! [`FrameStats::record`] once per frame and logs a heartbeat when it
//! returns `true`.
//!
//! # Usage
//!
//! ```ignore
//! let mut stats = FrameStats::new();
//! if stats.record(render_us, flush_us) {
//!     info!("frame {}: render {} us, flush {} us", stats.frames(), stats.render_us(), stats.flush_us());
//! }
//! ```

use crate::config::HEARTBEAT_INTERVAL;

/// Per-frame timings plus running extremes since start-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    frames: u32,
    render_us: u32,
    flush_us: u32,
    max_render_us: u32,
    max_flush_us: u32,
}

impl FrameStats {
    /// Create empty statistics.
    pub const fn new() -> Self {
        Self {
            frames: 0,
            render_us: 0,
            flush_us: 0,
            max_render_us: 0,
            max_flush_us: 0,
        }
    }

    /// Record one frame. Returns `true` every [`HEARTBEAT_INTERVAL`] frames.
    pub fn record(
        &mut self,
        render_us: u32,
        flush_us: u32,
    ) -> bool {
        self.frames = self.frames.wrapping_add(1);
        self.render_us = render_us;
        self.flush_us = flush_us;
        self.max_render_us = self.max_render_us.max(render_us);
        self.max_flush_us = self.max_flush_us.max(flush_us);
        self.frames.is_multiple_of(HEARTBEAT_INTERVAL)
    }

    /// Frames recorded so far.
    #[inline]
    pub const fn frames(&self) -> u32 { self.frames }

    /// Render time of the last frame.
    #[inline]
    pub const fn render_us(&self) -> u32 { self.render_us }

    /// Flush time of the last frame.
    #[inline]
    pub const fn flush_us(&self) -> u32 { self.flush_us }

    /// Slowest render since start-up.
    #[inline]
    pub const fn max_render_us(&self) -> u32 { self.max_render_us }

    /// Slowest flush since start-up.
    #[inline]
    pub const fn max_flush_us(&self) -> u32 { self.max_flush_us }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heartbeat_interval() {
        let mut stats = FrameStats::new();
        let beats: Vec<u32> = (1..=3 * HEARTBEAT_INTERVAL)
            .filter(|_| stats.record(10, 20))
            .collect();
        assert_eq!(beats, vec![HEARTBEAT_INTERVAL, 2 * HEARTBEAT_INTERVAL, 3 * HEARTBEAT_INTERVAL]);
        assert_eq!(stats.frames(), 3 * HEARTBEAT_INTERVAL);
    }

    #[test]
    fn test_tracks_last_and_max() {
        let mut stats = FrameStats::new();
        stats.record(1200, 9000);
        stats.record(800, 9500);
        assert_eq!((stats.render_us(), stats.flush_us()), (800, 9500));
        assert_eq!((stats.max_render_us(), stats.max_flush_us()), (1200, 9500));
    }
}
