use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

use crate::db::repositories::user::hash_password;
use crate::entities::users;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Initial users: one per role so every permission level is reachable
/// out of the box. Passwords must be rotated before real use.
const SEED_USERS: [(&str, &str, &str); 3] = [
    ("admin", "admin123", "admin"),
    ("super1", "super123", "supervisor"),
    ("tech1", "tech123", "technician"),
];

/// Derive a first name from the username the same way the fallback dataset
/// does, so a user renders identically from either data source.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |c| {
        c.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Sites)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(ProductionLines)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Equipment)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(MaintenanceEvents)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let now = chrono::Utc::now().to_rfc3339();

        for (username, password, role) in SEED_USERS {
            let password_hash = hash_password(password)
                .map_err(|e| DbErr::Migration(format!("Failed to hash seed password: {e}")))?;

            let insert = sea_orm_migration::sea_query::Query::insert()
                .into_table(Users)
                .columns([
                    users::Column::Username,
                    users::Column::PasswordHash,
                    users::Column::Email,
                    users::Column::FirstName,
                    users::Column::LastName,
                    users::Column::Role,
                    users::Column::IsActive,
                    users::Column::CreatedAt,
                    users::Column::UpdatedAt,
                ])
                .values_panic([
                    username.into(),
                    password_hash.into(),
                    format!("{username}@maintenance.com").into(),
                    capitalize(username).into(),
                    "User".into(),
                    role.into(),
                    true.into(),
                    now.clone().into(),
                    now.clone().into(),
                ])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaintenanceEvents).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipment).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductionLines).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sites).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
