//! Player actions, in their loose wire form and their checked form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coord::Square;
use crate::error::RulesError;
use crate::piece::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Move,
    Resign,
    DrawOffer,
    DrawAccept,
    DrawDecline,
}

impl ActionType {
    pub const ALL: [ActionType; 5] = [
        ActionType::Move,
        ActionType::Resign,
        ActionType::DrawOffer,
        ActionType::DrawAccept,
        ActionType::DrawDecline,
    ];

    /// Wire name, e.g. `draw_offer`.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Move => "move",
            ActionType::Resign => "resign",
            ActionType::DrawOffer => "draw_offer",
            ActionType::DrawAccept => "draw_accept",
            ActionType::DrawDecline => "draw_decline",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RulesError::Validation("Invalid action type".into()))
    }
}

/// An action as submitted: `{ "actionType": "move", "from": "e2", "to": "e4" }`.
///
/// `actionType` stays a plain string here so that an unknown type is reported
/// as a rule rejection rather than a decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

/// A checked action. Squares are parsed and a move always has both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
    Resign,
    DrawOffer,
    DrawAccept,
    DrawDecline,
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Move { .. } => ActionType::Move,
            Action::Resign => ActionType::Resign,
            Action::DrawOffer => ActionType::DrawOffer,
            Action::DrawAccept => ActionType::DrawAccept,
            Action::DrawDecline => ActionType::DrawDecline,
        }
    }
}

fn parse_promotion(raw: &str) -> Result<PieceKind, RulesError> {
    let mut chars = raw.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(c), None) => PieceKind::from_letter(c),
        _ => None,
    };
    match kind {
        Some(k @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => {
            Ok(k)
        }
        _ => Err(RulesError::Validation(format!(
            "Invalid promotion piece: {raw:?}"
        ))),
    }
}

impl TryFrom<ActionPayload> for Action {
    type Error = RulesError;

    fn try_from(payload: ActionPayload) -> Result<Self, Self::Error> {
        let action_type: ActionType = payload
            .action_type
            .as_deref()
            .ok_or_else(|| RulesError::Validation("Missing required field: actionType".into()))?
            .parse()?;

        match action_type {
            ActionType::Move => {
                let from = payload
                    .from
                    .as_deref()
                    .ok_or_else(|| RulesError::Validation("Missing required field: from".into()))?;
                let to = payload
                    .to
                    .as_deref()
                    .ok_or_else(|| RulesError::Validation("Missing required field: to".into()))?;
                let promotion = payload
                    .promotion
                    .as_deref()
                    .map(parse_promotion)
                    .transpose()?;
                Ok(Action::Move {
                    from: Square::parse(from)?,
                    to: Square::parse(to)?,
                    promotion,
                })
            }
            ActionType::Resign => Ok(Action::Resign),
            ActionType::DrawOffer => Ok(Action::DrawOffer),
            ActionType::DrawAccept => Ok(Action::DrawAccept),
            ActionType::DrawDecline => Ok(Action::DrawDecline),
        }
    }
}

impl From<Action> for ActionPayload {
    fn from(action: Action) -> Self {
        match action {
            Action::Move { from, to, promotion } => ActionPayload {
                action_type: Some(ActionType::Move.to_string()),
                from: Some(from.to_string()),
                to: Some(to.to_string()),
                promotion: promotion.map(|k| k.letter().to_string()),
            },
            other => ActionPayload {
                action_type: Some(other.action_type().to_string()),
                ..ActionPayload::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ActionPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_move_payload_parses() {
        let action = Action::try_from(payload(json!({
            "actionType": "move", "from": "e2", "to": "e4"
        })))
        .unwrap();
        assert_eq!(
            action,
            Action::Move {
                from: Square::parse("e2").unwrap(),
                to: Square::parse("e4").unwrap(),
                promotion: None,
            }
        );
    }

    #[test]
    fn test_move_missing_fields_is_validation_error() {
        let err = Action::try_from(payload(json!({"actionType": "move", "from": "e2"}))).unwrap_err();
        assert_eq!(err, RulesError::Validation("Missing required field: to".into()));

        let err = Action::try_from(payload(json!({"from": "e2", "to": "e4"}))).unwrap_err();
        assert!(matches!(err, RulesError::Validation(_)));
    }

    #[test]
    fn test_bad_square_is_invalid_square() {
        let err = Action::try_from(payload(json!({
            "actionType": "move", "from": "e2", "to": "e9"
        })))
        .unwrap_err();
        assert_eq!(err, RulesError::InvalidSquare("e9".into()));
    }

    #[test]
    fn test_promotion_letter_checked() {
        let ok = Action::try_from(payload(json!({
            "actionType": "move", "from": "a7", "to": "a8", "promotion": "n"
        })))
        .unwrap();
        assert!(matches!(ok, Action::Move { promotion: Some(PieceKind::Knight), .. }));

        for bad in ["k", "p", "queen"] {
            let err = Action::try_from(payload(json!({
                "actionType": "move", "from": "a7", "to": "a8", "promotion": bad
            })))
            .unwrap_err();
            assert!(matches!(err, RulesError::Validation(_)), "{bad}");
        }
    }

    #[test]
    fn test_unknown_action_type_is_validation_error() {
        let err = Action::try_from(payload(json!({"actionType": "castle"}))).unwrap_err();
        assert_eq!(err, RulesError::Validation("Invalid action type".into()));
    }

    #[test]
    fn test_draw_actions_round_trip_to_wire() {
        for action in [Action::Resign, Action::DrawOffer, Action::DrawAccept, Action::DrawDecline] {
            let wire = serde_json::to_value(ActionPayload::from(action)).unwrap();
            assert_eq!(wire, json!({"actionType": action.action_type().as_str()}));
        }
    }
}
