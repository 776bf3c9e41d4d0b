use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// The row returned by the remote `authenticate_user` call.
///
/// Persisted verbatim as the active session under a fixed storage key;
/// there is no expiry and no refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub username: String,
    pub prn: String,
    pub email: String,
    pub department: Option<String>,
    pub course: Option<String>,
    pub grad_year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_json_roundtrip_preserves_every_field() {
        let account = Account {
            id: UserId::generate(),
            username: "asha.k".to_string(),
            prn: "PRN2021001".to_string(),
            email: "asha@example.com".to_string(),
            department: Some("CSE".to_string()),
            course: None,
            grad_year: Some(2025),
        };
        let json = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account, back);
    }
}
