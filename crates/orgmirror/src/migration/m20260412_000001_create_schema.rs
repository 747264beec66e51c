//! Initial migration to create the orgmirror database schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_organizations(manager).await?;
        self.create_repositories(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Repositories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_organizations(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    // Internal
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // Host identity
                    .col(ColumnDef::new(Organizations::HostType).string().not_null())
                    .col(
                        ColumnDef::new(Organizations::RemoteId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Organizations::Login).string().not_null())
                    // Profile
                    .col(ColumnDef::new(Organizations::Name).string().null())
                    .col(ColumnDef::new(Organizations::Site).text().null())
                    .col(ColumnDef::new(Organizations::Email).string().null())
                    .col(ColumnDef::new(Organizations::Location).string().null())
                    .col(ColumnDef::new(Organizations::Bio).text().null())
                    // Operator state
                    .col(
                        ColumnDef::new(Organizations::Hidden)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // Tracking
                    .col(
                        ColumnDef::new(Organizations::LastSyncedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The reconciliation engine relies on these constraints as its
        // concurrency arbiter. Both are partial or expression indexes,
        // which the index builder cannot express, so raw SQL it is.
        let conn = manager.get_connection();

        // One row per (host, remote id). Placeholder rows without a remote
        // id are exempt until a sync assigns one.
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_organizations_host_remote_id \
             ON organizations (host_type, remote_id) \
             WHERE remote_id IS NOT NULL",
        )
        .await?;

        // Logins are unique per host, case-insensitively. A row whose login
        // was cleared by a collision adoption is exempt.
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_organizations_host_login \
             ON organizations (host_type, lower(login)) \
             WHERE login <> ''",
        )
        .await?;

        Ok(())
    }

    async fn create_repositories(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Repositories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repositories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Repositories::HostType).string().not_null())
                    .col(ColumnDef::new(Repositories::FullName).string().not_null())
                    .col(ColumnDef::new(Repositories::OrganizationId).uuid().null())
                    .col(ColumnDef::new(Repositories::UserId).uuid().null())
                    .col(
                        ColumnDef::new(Repositories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repositories_organization")
                            .from(Repositories::Table, Repositories::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Full names are unique per host, case-insensitively.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_repositories_host_full_name \
                 ON repositories (host_type, lower(full_name))",
            )
            .await?;

        // Index on organization_id for ownership lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_repositories_organization")
                    .table(Repositories::Table)
                    .col(Repositories::OrganizationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
#[sea_orm(iden = "organizations")]
enum Organizations {
    Table,
    Id,
    HostType,
    RemoteId,
    Login,
    Name,
    Site,
    Email,
    Location,
    Bio,
    Hidden,
    LastSyncedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "repositories")]
enum Repositories {
    Table,
    Id,
    HostType,
    FullName,
    OrganizationId,
    UserId,
    CreatedAt,
}
