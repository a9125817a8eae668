use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Room role, from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
    Readonly,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Readonly => "readonly",
        }
    }
}

/// A member as reported by the live room roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMember {
    pub account_id: i64,
    pub name: String,
    pub role: Role,
}

/// A member as persisted in the roster snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub account_id: i64,
    #[serde(with = "crate::utils::timestamp")]
    pub join_time: DateTime<Utc>,
    pub role: Role,
}

impl Member {
    pub fn joined(member: &RoomMember, join_time: DateTime<Utc>) -> Self {
        Self {
            name: member.name.clone(),
            account_id: member.account_id,
            join_time,
            role: member.role,
        }
    }
}

pub fn is_admin(account_id: i64, roster: &[RoomMember]) -> bool {
    roster
        .iter()
        .any(|m| m.account_id == account_id && m.role == Role::Admin)
}

/// Full role assignment for a room, as the bulk-update endpoint expects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePartition {
    pub admin_ids: Vec<i64>,
    pub member_ids: Vec<i64>,
    pub readonly_ids: Vec<i64>,
}

impl RolePartition {
    pub fn from_roster(roster: &[RoomMember]) -> Self {
        let mut partition = Self::default();
        for member in roster {
            partition.bucket_mut(member.role).push(member.account_id);
        }
        partition
    }

    /// Moves `account_id` into the bucket for `role`. The account is added
    /// even when it was not part of the roster.
    pub fn assign(mut self, account_id: i64, role: Role) -> Self {
        self.admin_ids.retain(|id| *id != account_id);
        self.member_ids.retain(|id| *id != account_id);
        self.readonly_ids.retain(|id| *id != account_id);
        self.bucket_mut(role).push(account_id);
        self
    }

    fn bucket_mut(&mut self, role: Role) -> &mut Vec<i64> {
        match role {
            Role::Admin => &mut self.admin_ids,
            Role::Member => &mut self.member_ids,
            Role::Readonly => &mut self.readonly_ids,
        }
    }
}
