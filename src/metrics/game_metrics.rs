use std::time::{Duration, Instant};

use crate::game::MatchResult;

/// Session statistics shown next to the board; reset when the process exits
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Best single-player score this session
    pub high_score: u32,
    pub matches_played: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            matches_played: 0,
            running: false,
        }
    }

    /// Refresh the match clock; frozen between matches
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_match_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_match_over(&mut self, result: MatchResult) {
        self.update();
        self.running = false;
        self.matches_played += 1;
        if let MatchResult::Solo { score } = result {
            self.high_score = self.high_score.max(score);
        }
    }

    /// Match left early: stop the clock without counting it
    pub fn on_match_abandoned(&mut self) {
        self.update();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
