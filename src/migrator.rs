use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_fields_table::Migration),
            Box::new(m20250601_000002_create_users_table::Migration),
            Box::new(m20250601_000003_create_cultivation_seasons_table::Migration),
            Box::new(m20250601_000004_create_work_orders_table::Migration),
            Box::new(m20250601_000005_create_saved_templates_table::Migration),
        ]
    }
}

mod m20250601_000001_create_fields_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000001_create_fields_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Fields::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Fields::Id)
                                .big_integer()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Fields::Name).string().not_null())
                        .col(ColumnDef::new(Fields::AreaHectares).decimal().null())
                        .col(ColumnDef::new(Fields::AssignedUserId).big_integer().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Fields::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Fields {
        Table,
        Id,
        Name,
        AreaHectares,
        AssignedUserId,
    }
}

mod m20250601_000002_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000002_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .big_integer()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Users::FirstName).string().not_null())
                        .col(ColumnDef::new(Users::LastName).string().not_null())
                        .col(ColumnDef::new(Users::Email).string().not_null())
                        .col(ColumnDef::new(Users::Role).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_users_role")
                        .table(Users::Table)
                        .col(Users::Role)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Users {
        Table,
        Id,
        FirstName,
        LastName,
        Email,
        Role,
    }
}

mod m20250601_000003_create_cultivation_seasons_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000003_create_cultivation_seasons_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CultivationSeasons::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CultivationSeasons::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CultivationSeasons::FieldId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CultivationSeasons::SeasonNumber)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CultivationSeasons::Name).string().not_null())
                        .col(
                            ColumnDef::new(CultivationSeasons::PlantingDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CultivationSeasons::Status)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CultivationSeasons::Notes).string().null())
                        .col(ColumnDef::new(CultivationSeasons::CreatedBy).string().null())
                        .col(
                            ColumnDef::new(CultivationSeasons::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CultivationSeasons::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Two racing planning sessions cannot both commit the same
            // season number for one field.
            manager
                .create_index(
                    Index::create()
                        .name("uq_seasons_field_number")
                        .table(CultivationSeasons::Table)
                        .col(CultivationSeasons::FieldId)
                        .col(CultivationSeasons::SeasonNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_seasons_field_status")
                        .table(CultivationSeasons::Table)
                        .col(CultivationSeasons::FieldId)
                        .col(CultivationSeasons::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CultivationSeasons::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum CultivationSeasons {
        Table,
        Id,
        FieldId,
        SeasonNumber,
        Name,
        PlantingDate,
        Status,
        Notes,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250601_000004_create_work_orders_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000004_create_work_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WorkOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WorkOrders::FieldId).big_integer().not_null())
                        .col(
                            ColumnDef::new(WorkOrders::CultivationSeasonId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WorkOrders::Title).string().not_null())
                        .col(ColumnDef::new(WorkOrders::ActivityKind).string().not_null())
                        .col(ColumnDef::new(WorkOrders::Category).string().not_null())
                        .col(ColumnDef::new(WorkOrders::Status).string().not_null())
                        .col(ColumnDef::new(WorkOrders::Priority).string().not_null())
                        .col(ColumnDef::new(WorkOrders::Assignee).string().not_null())
                        .col(ColumnDef::new(WorkOrders::StartDate).date().null())
                        .col(ColumnDef::new(WorkOrders::EndDate).date().null())
                        .col(
                            ColumnDef::new(WorkOrders::Progress)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(WorkOrders::Description).string().null())
                        .col(ColumnDef::new(WorkOrders::CreatedBy).string().null())
                        .col(
                            ColumnDef::new(WorkOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_work_orders_season")
                                .from(WorkOrders::Table, WorkOrders::CultivationSeasonId)
                                .to(
                                    super::m20250601_000003_create_cultivation_seasons_table::CultivationSeasons::Table,
                                    super::m20250601_000003_create_cultivation_seasons_table::CultivationSeasons::Id,
                                )
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_work_orders_field")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::FieldId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_work_orders_assignee_status")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::Assignee)
                        .col(WorkOrders::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum WorkOrders {
        Table,
        Id,
        FieldId,
        CultivationSeasonId,
        Title,
        ActivityKind,
        Category,
        Status,
        Priority,
        Assignee,
        StartDate,
        EndDate,
        Progress,
        Description,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250601_000005_create_saved_templates_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250601_000005_create_saved_templates_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SavedTemplates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SavedTemplates::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SavedTemplates::Name).string().not_null())
                        .col(ColumnDef::new(SavedTemplates::Description).string().null())
                        .col(
                            ColumnDef::new(SavedTemplates::PlantingDate)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SavedTemplates::Activities).json().not_null())
                        .col(
                            ColumnDef::new(SavedTemplates::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SavedTemplates::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum SavedTemplates {
        Table,
        Id,
        Name,
        Description,
        PlantingDate,
        Activities,
        CreatedAt,
    }
}
