/// Backend wire types: serde shapes for the snake_case REST API.
/// These map to the clean domain types via the mapping fns in client.rs.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Every endpoint wraps its payload:
/// `{"success": true, "data": T}` or `{"success": false, "message": "..."}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Read shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub created_at: Option<String>, // ISO 8601
    pub has_participated: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTournament {
    pub id: i64,
    pub name: String,
    pub date: Option<String>, // YYYY-MM-DD
    pub location: Option<String>,
    pub status: Option<String>, // "pending" | "in_progress" | "completed"
    pub winner_id: Option<i64>,
    pub winner: Option<WireTeam>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatch {
    pub id: i64,
    pub tournament_id: i64,
    pub round: Option<u32>,
    /// 1-based slot within the round; the domain side uses 0-based position.
    pub match_number: Option<u32>,
    pub team1_id: Option<i64>,
    pub team2_id: Option<i64>,
    pub team1: Option<WireTeam>,
    pub team2: Option<WireTeam>,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub winner_id: Option<i64>,
    pub winner: Option<WireTeam>,
    pub status: Option<String>, // "pending" | "completed"
    // Present only on the score-update response.
    pub tournament_completed: Option<bool>,
    pub tournament_winner_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// Write shapes, mapping domain names back to backend field names
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CreateTeamBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateTeamBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTournamentBody {
    pub name: String,
    pub date: String,
    pub location: String,
    pub team_ids: Vec<i64>,
}

/// Internal score1/score2 become team1_score/team2_score on the wire.
#[derive(Debug, Serialize)]
pub struct ScoreUpdateBody {
    pub team1_score: u32,
    pub team2_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_success_variant() {
        let env: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2,3]}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(vec![1, 2, 3]));
        assert!(env.message.is_none());
    }

    #[test]
    fn envelope_decodes_failure_variant() {
        let env: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"success":false,"message":"no such team"}"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("no such team"));
    }

    #[test]
    fn envelope_tolerates_null_data() {
        // DELETE endpoints respond with data: null.
        let env: Envelope<WireTeam> =
            serde_json::from_str(r#"{"success":true,"data":null}"#).unwrap();
        assert!(env.success);
        assert!(env.data.is_none());
    }

    #[test]
    fn score_update_body_uses_backend_field_names() {
        let body = ScoreUpdateBody { team1_score: 3, team2_score: 1 };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"team1_score": 3, "team2_score": 1}));
    }

    #[test]
    fn create_team_body_omits_missing_logo() {
        let body = CreateTeamBody { name: "FC Milano".into(), logo: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"name":"FC Milano"}"#);
    }

    #[test]
    fn create_tournament_body_sends_team_ids() {
        let body = CreateTournamentBody {
            name: "Spring Cup".into(),
            date: "2026-05-03".into(),
            location: "City Stadium".into(),
            team_ids: vec![4, 8, 15, 16],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["team_ids"], serde_json::json!([4, 8, 15, 16]));
    }
}
