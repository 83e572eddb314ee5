use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Sub,
    Email,
    Username,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Sessions {
    Table,
    Id,
    Code,
    Label,
    ExperimenterName,
    Comment,
    IsDemo,
    NumParticipants,
    RngSeed,
    TimeStarted,
    CreatedAt,
}

#[derive(Iden)]
enum Participants {
    Table,
    Id,
    SessionId,
    IdInSession,
    Code,
    Label,
    CreatedAt,
}

#[derive(Iden)]
enum Subsessions {
    Table,
    Id,
    SessionId,
    RoundNumber,
}

#[derive(Iden)]
enum Groups {
    Table,
    Id,
    SubsessionId,
    IdInSubsession,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    SubsessionId,
    GroupId,
    ParticipantId,
    IdInGroup,
    Payoff,
}

#[derive(Iden)]
enum Decisions {
    Table,
    Id,
    PlayerId,
    Value,
    PlayerDecision,
    Reason,
    CreatedAt,
    UpdatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users (experimenters allowed to create sessions and export data)
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_col(Users::Id))
                    .col(ColumnDef::new(Users::Sub).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_sub")
                    .table(Users::Table)
                    .col(Users::Sub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // sessions
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(id_col(Sessions::Id))
                    .col(ColumnDef::new(Sessions::Code).string_len(16).not_null())
                    .col(ColumnDef::new(Sessions::Label).string().not_null())
                    .col(ColumnDef::new(Sessions::ExperimenterName).string().null())
                    .col(ColumnDef::new(Sessions::Comment).text().null())
                    .col(
                        ColumnDef::new(Sessions::IsDemo)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Sessions::NumParticipants)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sessions::RngSeed).big_integer().not_null())
                    .col(
                        ColumnDef::new(Sessions::TimeStarted)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_sessions_code")
                    .table(Sessions::Table)
                    .col(Sessions::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // participants
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(id_col(Participants::Id))
                    .col(
                        ColumnDef::new(Participants::SessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::IdInSession)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participants::Code).string_len(16).not_null())
                    .col(ColumnDef::new(Participants::Label).string().null())
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participants_session_id")
                            .from(Participants::Table, Participants::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_participants_code")
                    .table(Participants::Table)
                    .col(Participants::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_participants_session_id_in_session")
                    .table(Participants::Table)
                    .col(Participants::SessionId)
                    .col(Participants::IdInSession)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // subsessions (one per round)
        manager
            .create_table(
                Table::create()
                    .table(Subsessions::Table)
                    .if_not_exists()
                    .col(id_col(Subsessions::Id))
                    .col(
                        ColumnDef::new(Subsessions::SessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subsessions::RoundNumber)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subsessions_session_id")
                            .from(Subsessions::Table, Subsessions::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_subsessions_session_round")
                    .table(Subsessions::Table)
                    .col(Subsessions::SessionId)
                    .col(Subsessions::RoundNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // groups
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(id_col(Groups::Id))
                    .col(
                        ColumnDef::new(Groups::SubsessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Groups::IdInSubsession)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_groups_subsession_id")
                            .from(Groups::Table, Groups::SubsessionId)
                            .to(Subsessions::Table, Subsessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(id_col(Players::Id))
                    .col(
                        ColumnDef::new(Players::SubsessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Players::GroupId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Players::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Players::IdInGroup).integer().not_null())
                    .col(ColumnDef::new(Players::Payoff).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_subsession_id")
                            .from(Players::Table, Players::SubsessionId)
                            .to(Subsessions::Table, Subsessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_group_id")
                            .from(Players::Table, Players::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_participant_id")
                            .from(Players::Table, Players::ParticipantId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_players_subsession_participant")
                    .table(Players::Table)
                    .col(Players::SubsessionId)
                    .col(Players::ParticipantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // decisions
        manager
            .create_table(
                Table::create()
                    .table(Decisions::Table)
                    .if_not_exists()
                    .col(id_col(Decisions::Id))
                    .col(ColumnDef::new(Decisions::PlayerId).big_integer().not_null())
                    .col(ColumnDef::new(Decisions::Value).integer().not_null())
                    .col(ColumnDef::new(Decisions::PlayerDecision).boolean().null())
                    .col(ColumnDef::new(Decisions::Reason).string_len(32).null())
                    .col(
                        ColumnDef::new(Decisions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Decisions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(Decisions::Value).between(1, 10))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_decisions_player_id")
                            .from(Decisions::Table, Decisions::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_decisions_player_id")
                    .table(Decisions::Table)
                    .col(Decisions::PlayerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        for table in [
            Decisions::Table.into_iden(),
            Players::Table.into_iden(),
            Groups::Table.into_iden(),
            Subsessions::Table.into_iden(),
            Participants::Table.into_iden(),
            Sessions::Table.into_iden(),
            Users::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}
