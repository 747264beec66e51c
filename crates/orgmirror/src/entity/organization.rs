//! Organization entity - the local mirror of a remote code-host organization.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::host_type::HostType;

/// Organization model - one row per known remote organization.
///
/// A remote organization is addressable by two keys: a stable numeric
/// `remote_id` assigned by the host, and a mutable `login`. `remote_id`
/// outranks `login` for identity; once set it is never changed. A record may
/// temporarily have no `remote_id` when it was created as a placeholder from
/// a login alone.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Which code host this organization lives on.
    pub host_type: HostType,
    /// Host-assigned numeric id. Immutable once set.
    pub remote_id: Option<i64>,
    /// Current login on the host. Renames update this in place.
    pub login: String,

    /// Display name.
    pub name: Option<String>,
    /// Website URL.
    #[sea_orm(column_type = "Text", nullable)]
    pub site: Option<String>,
    /// Public contact email.
    pub email: Option<String>,
    /// Free-form location string.
    pub location: Option<String>,
    /// Profile description.
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    /// Operator flag excluding this organization from public listings.
    /// Never touched by reconciliation.
    #[sea_orm(default_value = false)]
    pub hidden: bool,

    /// When a full sync last completed for this organization.
    pub last_synced_at: Option<DateTimeWithTimeZone>,
    /// When this record was created locally.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An organization owns zero or more repositories.
    #[sea_orm(has_many = "super::repository::Entity")]
    Repository,
}

impl Related<super::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repository.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the host's numeric id for this organization is known.
    pub fn has_remote_id(&self) -> bool {
        self.remote_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_test_model(login: &str, remote_id: Option<i64>) -> Model {
        Model {
            id: Uuid::new_v4(),
            host_type: HostType::GitHub,
            remote_id,
            login: login.to_string(),
            name: Some("Test Org".to_string()),
            site: None,
            email: None,
            location: None,
            bio: None,
            hidden: false,
            last_synced_at: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_has_remote_id() {
        assert!(make_test_model("rails", Some(4223)).has_remote_id());
        assert!(!make_test_model("rails", None).has_remote_id());
    }
}
