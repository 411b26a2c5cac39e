use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// Counters for the current session; nothing here outlives the process
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub apples_eaten: u32,
    pub resets: u32,
    pub best_length: usize,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            apples_eaten: 0,
            resets: 0,
            best_length: 1,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold one tick's outcome into the counters
    pub fn record_tick(&mut self, outcome: TickOutcome, snake_length: usize) {
        if outcome.collided {
            self.resets += 1;
        }
        if outcome.ate_apple {
            self.apples_eaten += 1;
        }
        self.best_length = self.best_length.max(snake_length);
    }

    /// Session clock as `mm:ss`, growing an hours field once it passes 60 minutes
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs / 60) % 60;
        let seconds = total_secs % 60;
        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}", minutes, seconds)
        }
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_clock_formatting() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.format_time(), "00:00");

        // 10 ticks per second for 600 ticks
        metrics.elapsed_time = Duration::from_millis(100) * 600;
        assert_eq!(metrics.format_time(), "01:00");

        metrics.elapsed_time = Duration::from_secs(59 * 60 + 59);
        assert_eq!(metrics.format_time(), "59:59");

        metrics.elapsed_time = Duration::from_secs(2 * 3600 + 5 * 60 + 9);
        assert_eq!(metrics.format_time(), "2:05:09");
    }

    #[test]
    fn test_tick_counters() {
        let mut metrics = GameMetrics::new();

        metrics.record_tick(
            TickOutcome {
                ate_apple: true,
                collided: false,
            },
            1,
        );
        metrics.record_tick(TickOutcome::default(), 2);
        assert_eq!(metrics.apples_eaten, 1);
        assert_eq!(metrics.best_length, 2);

        metrics.record_tick(
            TickOutcome {
                ate_apple: false,
                collided: true,
            },
            1,
        );
        assert_eq!(metrics.resets, 1);
        assert_eq!(metrics.best_length, 2); // Should not decrease
    }

    #[test]
    fn test_update_tracks_elapsed() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 20);
    }
}
