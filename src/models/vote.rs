use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vote_target", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VoteTarget {
    Post,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vote_direction", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub target_type: VoteTarget,
    pub target_id: Uuid,
    pub direction: VoteDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnvoteRequest {
    pub target_type: VoteTarget,
    pub target_id: Uuid,
}

// Aggregate counts for one target after a vote change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VoteTally {
    #[serde(with = "crate::models::count")]
    pub upvotes: i64,
    #[serde(with = "crate::models::count")]
    pub downvotes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vote_request_uses_camel_case_fields() {
        let target_id = Uuid::new_v4();
        let request: VoteRequest = serde_json::from_value(json!({
            "targetType": "comment",
            "targetId": target_id,
            "direction": "down"
        }))
        .unwrap();

        assert_eq!(request.target_type, VoteTarget::Comment);
        assert_eq!(request.target_id, target_id);
        assert_eq!(request.direction, VoteDirection::Down);
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let result = serde_json::from_value::<VoteRequest>(json!({
            "targetType": "post",
            "targetId": Uuid::new_v4(),
            "direction": "sideways"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn tally_counts_are_strings_on_the_wire() {
        let tally = VoteTally {
            upvotes: 3,
            downvotes: 0,
        };
        let value = serde_json::to_value(tally).unwrap();
        assert_eq!(value, json!({ "upvotes": "3", "downvotes": "0" }));

        let back: VoteTally = serde_json::from_value(value).unwrap();
        assert_eq!(back, tally);
    }
}
