//! Score keeping and the end-of-match condition

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::Side;

/// Which sides scored during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scored {
    pub left: bool,
    pub right: bool,
}

impl Scored {
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub left: u32,
    pub right: u32,
    pub win_threshold: u32,
}

impl ScoreTracker {
    pub fn new(win_threshold: u32) -> Self {
        Self {
            left: 0,
            right: 0,
            win_threshold,
        }
    }

    /// Award points for a dot touching either end wall
    ///
    /// Touching the left wall scores for the right player and vice versa.
    /// The two checks are independent. Nothing resets the dot, so a dot that
    /// stays in a scoring zone keeps scoring on every call.
    pub fn update(&mut self, center: IVec2, radius: i32, arena_width: i32) -> Scored {
        let mut scored = Scored::default();
        if center.x - radius <= 0 {
            self.right += 1;
            scored.right = true;
        }
        if center.x + radius >= arena_width {
            self.left += 1;
            scored.left = true;
        }
        scored
    }

    pub fn is_match_over(&self) -> bool {
        self.left >= self.win_threshold || self.right >= self.win_threshold
    }

    /// Side that reached the threshold, if any (left wins a tie)
    pub fn winner(&self) -> Option<Side> {
        if self.left >= self.win_threshold {
            Some(Side::Left)
        } else if self.right >= self.win_threshold {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ARENA_WIDTH, WIN_SCORE};

    #[test]
    fn test_left_wall_scores_for_right() {
        let mut score = ScoreTracker::new(WIN_SCORE);
        let scored = score.update(IVec2::new(5, 200), 10, ARENA_WIDTH);
        assert_eq!((score.left, score.right), (0, 1));
        assert!(scored.right && !scored.left);
    }

    #[test]
    fn test_right_wall_scores_for_left() {
        let mut score = ScoreTracker::new(WIN_SCORE);
        score.update(IVec2::new(490, 200), 10, ARENA_WIDTH);
        assert_eq!((score.left, score.right), (1, 0));
    }

    #[test]
    fn test_no_score_in_open_field() {
        let mut score = ScoreTracker::new(WIN_SCORE);
        let scored = score.update(IVec2::new(11, 200), 10, ARENA_WIDTH);
        assert!(!scored.any());
        let scored = score.update(IVec2::new(489, 200), 10, ARENA_WIDTH);
        assert!(!scored.any());
    }

    #[test]
    fn test_lingering_dot_keeps_scoring() {
        let mut score = ScoreTracker::new(WIN_SCORE);
        for _ in 0..3 {
            score.update(IVec2::new(2, 100), 10, ARENA_WIDTH);
        }
        assert_eq!(score.right, 3);
    }

    #[test]
    fn test_both_walls_in_a_narrow_arena() {
        let mut score = ScoreTracker::new(WIN_SCORE);
        let scored = score.update(IVec2::new(8, 0), 10, 15);
        assert!(scored.left && scored.right);
        assert_eq!((score.left, score.right), (1, 1));
    }

    #[test]
    fn test_match_over_threshold() {
        let mut score = ScoreTracker::new(WIN_SCORE);
        score.left = 10;
        score.right = 10;
        assert!(!score.is_match_over());
        assert_eq!(score.winner(), None);

        score.left = 11;
        score.right = 3;
        assert!(score.is_match_over());
        assert_eq!(score.winner(), Some(Side::Left));

        score.left = 4;
        score.right = 12;
        assert!(score.is_match_over());
        assert_eq!(score.winner(), Some(Side::Right));
    }
}
