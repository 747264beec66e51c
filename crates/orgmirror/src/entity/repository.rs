//! Repository entity - a repository owned by an organization or a user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::host_type::HostType;

/// Repository model.
///
/// Ownership is split across two nullable foreign keys: exactly one of
/// `organization_id` and `user_id` is set at a time. Relinking after an
/// organization rename moves repositories from user ownership to
/// organization ownership by matching the `login/` prefix of `full_name`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repositories")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Which code host this repository lives on.
    pub host_type: HostType,
    /// Owner-qualified name, `owner/name`. Unique per host, case-insensitive.
    pub full_name: String,

    /// Owning organization, if any.
    pub organization_id: Option<Uuid>,
    /// Owning user, if any. Cleared when an organization adopts the repo.
    pub user_id: Option<Uuid>,

    /// When this record was created locally.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A repository may belong to an organization.
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id"
    )]
    Organization,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The owner segment of `full_name`, i.e. everything before the first `/`.
    pub fn owner(&self) -> &str {
        self.full_name
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or(&self.full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_test_model(full_name: &str) -> Model {
        Model {
            id: Uuid::new_v4(),
            host_type: HostType::GitHub,
            full_name: full_name.to_string(),
            organization_id: None,
            user_id: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_owner() {
        assert_eq!(make_test_model("rails/rails").owner(), "rails");
        assert_eq!(make_test_model("weird-no-slash").owner(), "weird-no-slash");
    }
}
