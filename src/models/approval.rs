// src/models/approval.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;

pub const PENDING: &str = "pending";
pub const REJECTED: &str = "rejected";

/// Entidades que passam pelo fluxo de aprovação do gerente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalTarget {
    User,
    Transaction,
}

impl ApprovalTarget {
    pub fn table(self) -> &'static str {
        match self {
            ApprovalTarget::User => "users",
            ApprovalTarget::Transaction => "transactions",
        }
    }

    /// Tipo ENUM da coluna `status` no Postgres.
    pub fn status_type(self) -> &'static str {
        match self {
            ApprovalTarget::User => "user_status",
            ApprovalTarget::Transaction => "transaction_status",
        }
    }

    pub fn approved_status(self) -> &'static str {
        match self {
            ApprovalTarget::User => "active",
            ApprovalTarget::Transaction => "approved",
        }
    }

    // Só a tabela de usuários tem updated_at
    pub fn touches_updated_at(self) -> bool {
        matches!(self, ApprovalTarget::User)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// pending --approve--> active/approved, pending --reject--> rejected.
    pub fn resulting_status(self, target: ApprovalTarget) -> &'static str {
        match self {
            Decision::Approve => target.approved_status(),
            Decision::Reject => REJECTED,
        }
    }
}

impl FromStr for Decision {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(Decision::Approve),
            "reject" => Ok(Decision::Reject),
            _ => Err(AppError::InvalidAction(s.to_string())),
        }
    }
}

// A ação é conferida em `Decision::from_str`, depois da checagem de papel
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ApprovalPayload {
    #[schema(example = "approve")]
    pub action: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalOutcome {
    pub id: Uuid,
    #[schema(example = "approved")]
    pub status: String,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_are_parsed_case_insensitively() {
        assert_eq!("approve".parse::<Decision>().unwrap(), Decision::Approve);
        assert_eq!(" REJECT ".parse::<Decision>().unwrap(), Decision::Reject);
    }

    #[test]
    fn unknown_actions_are_refused() {
        for action in ["", "accept", "approved", "delete"] {
            let err = action.parse::<Decision>().unwrap_err();
            assert!(matches!(err, AppError::InvalidAction(a) if a == action));
        }
    }

    #[test]
    fn approval_status_depends_on_the_entity() {
        assert_eq!(Decision::Approve.resulting_status(ApprovalTarget::User), "active");
        assert_eq!(
            Decision::Approve.resulting_status(ApprovalTarget::Transaction),
            "approved"
        );
        assert_eq!(Decision::Reject.resulting_status(ApprovalTarget::User), "rejected");
        assert_eq!(
            Decision::Reject.resulting_status(ApprovalTarget::Transaction),
            "rejected"
        );
    }
}
