use std::time::{Duration, Instant};

/// Session bookkeeping shown next to the board
///
/// The round clock starts with the first accepted move and stops when the
/// round ends, so time spent on the start prompt or the game-over panel
/// is not counted.
pub struct GameMetrics {
    pub high_score: u32,
    pub games_played: u32,
    round_started: Option<Instant>,
    round_time: Duration,
    new_record: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::with_high_score(0)
    }

    /// Start from a previously persisted high score
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            games_played: 0,
            round_started: None,
            round_time: Duration::ZERO,
            new_record: false,
        }
    }

    /// Refresh the round clock
    pub fn update(&mut self) {
        if let Some(started) = self.round_started {
            self.round_time = started.elapsed();
        }
    }

    /// Called when a round leaves NotStarted
    pub fn on_round_start(&mut self) {
        self.round_started = Some(Instant::now());
        self.round_time = Duration::ZERO;
        self.new_record = false;
    }

    /// Called when a fresh round replaces a finished one
    pub fn on_reset(&mut self) {
        self.round_started = None;
        self.round_time = Duration::ZERO;
        self.new_record = false;
    }

    /// Record a finished round. Returns true only if the score beat the high score.
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.update();
        self.round_started = None;
        self.games_played += 1;

        self.new_record = final_score > self.high_score;
        if self.new_record {
            self.high_score = final_score;
        }
        self.new_record
    }

    /// Whether the last finished round set a new high score
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn round_time(&self) -> Duration {
        self.round_time
    }

    /// Round clock as `MM:SS`; minutes keep counting past an hour
    pub fn format_time(&self) -> String {
        let secs = self.round_time.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
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

    fn with_round_time(secs: u64) -> GameMetrics {
        let mut metrics = GameMetrics::new();
        metrics.round_time = Duration::from_secs(secs);
        metrics
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(with_round_time(0).format_time(), "00:00");
        assert_eq!(with_round_time(59).format_time(), "00:59");
        assert_eq!(with_round_time(125).format_time(), "02:05");
        assert_eq!(with_round_time(3661).format_time(), "61:01");
    }

    #[test]
    fn test_only_strictly_higher_scores_are_records() {
        let mut metrics = GameMetrics::with_high_score(30);

        assert!(!metrics.on_game_over(30));
        assert!(!metrics.is_new_record());
        assert_eq!(metrics.high_score, 30);

        assert!(!metrics.on_game_over(20));
        assert_eq!(metrics.high_score, 30);

        assert!(metrics.on_game_over(40));
        assert!(metrics.is_new_record());
        assert_eq!(metrics.high_score, 40);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_record_flag_cleared_for_next_round() {
        let mut metrics = GameMetrics::new();
        metrics.on_round_start();
        assert!(metrics.on_game_over(10));

        metrics.on_reset();
        assert!(!metrics.is_new_record());
        assert_eq!(metrics.high_score, 10);
    }

    #[test]
    fn test_clock_runs_only_during_a_round() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(30));
        metrics.update();
        assert_eq!(metrics.round_time(), Duration::ZERO);

        metrics.on_round_start();
        std::thread::sleep(Duration::from_millis(30));
        metrics.update();
        assert!(metrics.round_time() >= Duration::from_millis(30));

        metrics.on_game_over(0);
        let frozen = metrics.round_time();
        std::thread::sleep(Duration::from_millis(10));
        metrics.update();
        assert_eq!(metrics.round_time(), frozen);

        metrics.on_reset();
        assert_eq!(metrics.round_time(), Duration::ZERO);
    }
}
