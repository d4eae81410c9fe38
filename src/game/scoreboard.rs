/// Final outcome of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Single player: the points collected
    Solo { score: u32 },
    /// Player index with more rounds won
    Winner(usize),
    Draw,
}

/// Points and round wins per player, kept for a whole match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    points: [u32; 2],
    rounds_won: [u32; 2],
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self, player: usize) -> u32 {
        self.points[player]
    }

    pub fn rounds_won(&self, player: usize) -> u32 {
        self.rounds_won[player]
    }

    pub fn add_points(&mut self, player: usize, value: u32) {
        self.points[player] += value;
    }

    /// Credit a round win and return the player's new total
    pub fn award_round(&mut self, player: usize) -> u32 {
        self.rounds_won[player] += 1;
        self.rounds_won[player]
    }

    /// Decide the match from round wins; `solo` reports player one's points
    pub fn match_result(&self, solo: bool) -> MatchResult {
        if solo {
            return MatchResult::Solo {
                score: self.points[0],
            };
        }

        match self.rounds_won[0].cmp(&self.rounds_won[1]) {
            std::cmp::Ordering::Greater => MatchResult::Winner(0),
            std::cmp::Ordering::Less => MatchResult::Winner(1),
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }
}
