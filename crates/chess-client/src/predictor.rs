//! Local mirror of a match for instant feedback.
//!
//! The predictor holds the last state the service sent plus the current
//! square selection. It never becomes authoritative: anything the service
//! sends replaces it.

use std::collections::BTreeSet;

use chess_core::{engine, gate, movegen, Action, Color, GameState, MatchSnapshot, RulesError, Square};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not this player's turn, the game is over, or nothing to select.
    Ignored,
    Selected {
        square: Square,
        targets: BTreeSet<Square>,
    },
    Deselected,
    /// A highlighted destination was clicked; submit this move.
    Submit(Action),
}

#[derive(Debug, Clone)]
struct Selection {
    square: Square,
    targets: BTreeSet<Square>,
}

#[derive(Debug, Clone)]
pub struct Predictor {
    player_id: String,
    snapshot: MatchSnapshot,
    selection: Option<Selection>,
}

impl Predictor {
    pub fn new(player_id: impl Into<String>, snapshot: MatchSnapshot) -> Self {
        Self {
            player_id: player_id.into(),
            snapshot,
            selection: None,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn snapshot(&self) -> &MatchSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &GameState {
        &self.snapshot.record.game_state
    }

    pub fn color(&self) -> Result<Color, RulesError> {
        gate::seat_of(self.state(), &self.player_id)
    }

    /// The color this player may act as right now, if any.
    fn acting_color(&self) -> Option<Color> {
        let state = self.state();
        let color = self.color().ok()?;
        (!state.is_finished() && state.current_turn == color).then_some(color)
    }

    pub fn is_my_turn(&self) -> bool {
        self.acting_color().is_some()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selection.as_ref().map(|s| s.square)
    }

    pub fn highlighted(&self) -> Option<&BTreeSet<Square>> {
        self.selection.as_ref().map(|s| &s.targets)
    }

    fn targets_from(&self, square: Square, color: Color) -> BTreeSet<Square> {
        movegen::legal_moves(&self.state().board, square, color)
    }

    pub fn click(&mut self, square: Square) -> ClickOutcome {
        let Some(color) = self.acting_color() else {
            self.selection = None;
            return ClickOutcome::Ignored;
        };

        let previous = self.selection.take();
        if let Some(sel) = &previous {
            if sel.square == square {
                return ClickOutcome::Deselected;
            }
            if sel.targets.contains(&square) {
                return ClickOutcome::Submit(Action::Move {
                    from: sel.square,
                    to: square,
                    promotion: None,
                });
            }
        }

        let targets = self.targets_from(square, color);
        if targets.is_empty() {
            return match previous {
                Some(_) => ClickOutcome::Deselected,
                None => ClickOutcome::Ignored,
            };
        }
        self.selection = Some(Selection {
            square,
            targets: targets.clone(),
        });
        ClickOutcome::Selected { square, targets }
    }

    /// Run `action` through the same engine the service uses, on a copy.
    pub fn predict(&self, action: &Action) -> Result<GameState, RulesError> {
        engine::apply(self.state(), &self.player_id, action)
    }

    /// Take a fresh snapshot from the service, whatever the local copy says.
    pub fn replace(&mut self, snapshot: MatchSnapshot) {
        self.snapshot = snapshot;
        self.refresh_selection();
    }

    /// Take the state echoed back for a submitted action.
    pub fn replace_state(&mut self, state: GameState) {
        if state.is_finished() {
            self.snapshot.record.phase = "Finished".to_string();
        }
        self.snapshot.record.game_state = state;
        self.refresh_selection();
    }

    fn refresh_selection(&mut self) {
        let Some(sel) = self.selection.take() else {
            return;
        };
        let Some(color) = self.acting_color() else {
            return;
        };
        let targets = self.targets_from(sel.square, color);
        if !targets.is_empty() {
            self.selection = Some(Selection {
                square: sel.square,
                targets,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::setup::{new_match, MatchRules, PlayerSeat};

    fn sq(label: &str) -> Square {
        Square::parse(label).unwrap()
    }

    fn snapshot() -> MatchSnapshot {
        MatchSnapshot {
            match_id: "m1".into(),
            record: new_match(
                [PlayerSeat::new("w1", "ana"), PlayerSeat::new("b1", "bo")],
                &MatchRules::default(),
                serde_json::Value::Null,
            ),
        }
    }

    #[test]
    fn test_select_then_submit() {
        let mut p = Predictor::new("w1", snapshot());
        match p.click(sq("e2")) {
            ClickOutcome::Selected { square, targets } => {
                assert_eq!(square, sq("e2"));
                assert_eq!(targets, BTreeSet::from([sq("e3"), sq("e4")]));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            p.click(sq("e4")),
            ClickOutcome::Submit(Action::Move { from: sq("e2"), to: sq("e4"), promotion: None })
        );
        assert!(p.selected().is_none());
    }

    #[test]
    fn test_same_square_deselects() {
        let mut p = Predictor::new("w1", snapshot());
        p.click(sq("g1"));
        assert_eq!(p.click(sq("g1")), ClickOutcome::Deselected);
        assert!(p.highlighted().is_none());
    }

    #[test]
    fn test_other_piece_reselects_and_empty_square_resets() {
        let mut p = Predictor::new("w1", snapshot());
        p.click(sq("e2"));
        assert!(matches!(p.click(sq("b1")), ClickOutcome::Selected { .. }));
        assert_eq!(p.selected(), Some(sq("b1")));

        assert_eq!(p.click(sq("e5")), ClickOutcome::Deselected);
        assert!(p.selected().is_none());
        // A piece with no moves cannot be selected.
        assert_eq!(p.click(sq("a1")), ClickOutcome::Ignored);
    }

    #[test]
    fn test_clicks_ignored_off_turn() {
        let mut p = Predictor::new("b1", snapshot());
        assert!(!p.is_my_turn());
        assert_eq!(p.click(sq("e7")), ClickOutcome::Ignored);

        let mut stranger = Predictor::new("x9", snapshot());
        assert_eq!(stranger.click(sq("e2")), ClickOutcome::Ignored);
    }

    #[test]
    fn test_predict_matches_engine_and_leaves_local_copy() {
        let p = Predictor::new("b1", snapshot());
        let err = p
            .predict(&Action::Move { from: sq("e7"), to: sq("e5"), promotion: None })
            .unwrap_err();
        assert_eq!(err, RulesError::TurnViolation { to_move: Color::White });

        let p = Predictor::new("w1", snapshot());
        let next = p.predict(&Action::DrawOffer).unwrap();
        assert_eq!(next.draw_offer, Some(Color::White));
        assert_eq!(p.state().draw_offer, None);
    }

    #[test]
    fn test_replace_overwrites_and_drops_stale_selection() {
        let mut p = Predictor::new("w1", snapshot());
        p.click(sq("e2"));

        let mut next = snapshot();
        next.record.game_state = engine::apply(
            &next.record.game_state,
            "w1",
            &Action::Move { from: sq("d2"), to: sq("d4"), promotion: None },
        )
        .unwrap();
        p.replace(next.clone());

        assert_eq!(p.snapshot(), &next);
        assert!(p.selected().is_none());
        assert!(!p.is_my_turn());
    }

    #[test]
    fn test_replace_keeps_selection_when_still_playable() {
        let mut p = Predictor::new("w1", snapshot());
        p.click(sq("e2"));
        let mut same = snapshot();
        same.record.metadata = serde_json::json!({"note": "refreshed"});
        p.replace(same);
        assert_eq!(p.selected(), Some(sq("e2")));
    }

    #[test]
    fn test_finished_echo_marks_phase() {
        let mut p = Predictor::new("w1", snapshot());
        let resigned = p.predict(&Action::Resign).unwrap();
        p.replace_state(resigned);
        assert_eq!(p.snapshot().record.phase, "Finished");
        assert_eq!(p.click(sq("e2")), ClickOutcome::Ignored);
    }
}
