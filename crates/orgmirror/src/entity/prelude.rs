//! Common re-exports for convenient entity usage.

pub use super::host_type::HostType;
pub use super::organization::{
    ActiveModel as OrganizationActiveModel, Column as OrganizationColumn, Entity as Organization,
    Model as OrganizationModel,
};
pub use super::repository::{
    ActiveModel as RepositoryActiveModel, Column as RepositoryColumn, Entity as Repository,
    Model as RepositoryModel,
};
