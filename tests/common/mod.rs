#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use querycrate::{SeaOrmStore, QueryService};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection, DbErr};
use sea_orm_migration::prelude::*;

pub mod challenge_entity;
pub mod cord_entity;
pub mod player_entity;

pub type ChallengeService = QueryService<challenge_entity::Entity, SeaOrmStore<challenge_entity::Entity>>;
pub type CordService = QueryService<cord_entity::Entity, SeaOrmStore<cord_entity::Entity>>;
pub type PlayerService = QueryService<player_entity::Entity, SeaOrmStore<player_entity::Entity>>;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Migrated database with the fixture records below.
pub async fn setup_seeded_db() -> Result<DatabaseConnection, DbErr> {
    let db = setup_test_db().await?;
    seed(&db).await?;
    Ok(db)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture time {year}-{month}-{day} {hour}h"))
}

/// Players
///
/// | id | full name   | level    | gender | phone    | status  |
/// |----|-------------|----------|--------|----------|---------|
/// | 1  | Alice Smith | ADVANCED | WOMEN  | 555-0101 | ACTIVE  |
/// | 2  | Bob Jones   | BEGINNER | MAN    |          | PASSIVE |
/// | 3  | Carol White |          | WOMEN  | 555-0199 | ACTIVE  |
///
/// Cords: 1 Central Court (ACTIVE), 2 River Court (PASSIVE), 3 Old Court (DELETED, no address)
///
/// Challenges
///
/// | id | proposer | acceptor | cord | status    | match time       |
/// |----|----------|----------|------|-----------|------------------|
/// | 1  | 1        | 2        | 1    | ACCEPTED  | 2024-05-01 10:00 |
/// | 2  | 1        | 3        | 1    | REQUESTED | 2024-05-10 18:00 |
/// | 3  | 2        |          | 2    | REQUESTED |                  |
/// | 4  | 3        | 1        |      | REJECTED  | 2024-06-02 09:00 |
pub async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    for (id, full_name, level, gender, phone, status) in [
        (1, "Alice Smith", Some("ADVANCED"), Some("WOMEN"), Some("555-0101"), "ACTIVE"),
        (2, "Bob Jones", Some("BEGINNER"), Some("MAN"), None, "PASSIVE"),
        (3, "Carol White", None, Some("WOMEN"), Some("555-0199"), "ACTIVE"),
    ] {
        player_entity::ActiveModel {
            id: Set(id),
            full_name: Set(full_name.to_string()),
            level: Set(level.map(str::to_string)),
            gender: Set(gender.map(str::to_string)),
            phone: Set(phone.map(str::to_string)),
            status: Set(status.to_string()),
        }
        .insert(db)
        .await?;
    }

    for (id, name, address, status) in [
        (1, "Central Court", Some("1 Main St"), "ACTIVE"),
        (2, "River Court", Some("9 Bank Rd"), "PASSIVE"),
        (3, "Old Court", None, "DELETED"),
    ] {
        cord_entity::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            address: Set(address.map(str::to_string)),
            status: Set(status.to_string()),
        }
        .insert(db)
        .await?;
    }

    for (id, proposer, acceptor, cord, status, match_time) in [
        (1, Some(1), Some(2), Some(1), "ACCEPTED", Some(at(2024, 5, 1, 10))),
        (2, Some(1), Some(3), Some(1), "REQUESTED", Some(at(2024, 5, 10, 18))),
        (3, Some(2), None, Some(2), "REQUESTED", None),
        (4, Some(3), Some(1), None, "REJECTED", Some(at(2024, 6, 2, 9))),
    ] {
        challenge_entity::ActiveModel {
            id: Set(id),
            match_time: Set(match_time),
            status: Set(status.to_string()),
            proposer_id: Set(proposer),
            acceptor_id: Set(acceptor),
            cord_id: Set(cord),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateTables)]
    }
}

pub struct CreateTables;

impl MigrationName for CreateTables {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_player_cord_challenge"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateTables {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Player::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Player::FullName).text().not_null())
                    .col(ColumnDef::new(Player::Level).string().null())
                    .col(ColumnDef::new(Player::Gender).string().null())
                    .col(ColumnDef::new(Player::Phone).string().null())
                    .col(ColumnDef::new(Player::Status).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cord::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cord::Name).string().not_null())
                    .col(ColumnDef::new(Cord::Address).string().null())
                    .col(ColumnDef::new(Cord::Status).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Challenge::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Challenge::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Challenge::MatchTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Challenge::Status).string().not_null())
                    .col(ColumnDef::new(Challenge::ProposerId).integer().null())
                    .col(ColumnDef::new(Challenge::AcceptorId).integer().null())
                    .col(ColumnDef::new(Challenge::CordId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Challenge::Table, Challenge::ProposerId)
                            .to(Player::Table, Player::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Challenge::Table, Challenge::AcceptorId)
                            .to(Player::Table, Player::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Challenge::Table, Challenge::CordId)
                            .to(Cord::Table, Cord::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Challenge::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cord::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Player::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Player {
    Table,
    Id,
    FullName,
    Level,
    Gender,
    Phone,
    Status,
}

#[derive(DeriveIden)]
enum Cord {
    Table,
    Id,
    Name,
    Address,
    Status,
}

#[derive(DeriveIden)]
enum Challenge {
    Table,
    Id,
    MatchTime,
    Status,
    ProposerId,
    AcceptorId,
    CordId,
}
