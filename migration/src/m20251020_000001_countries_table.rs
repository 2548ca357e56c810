use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 countries 表
        manager
            .create_table(
                Table::create()
                    .table(Country::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Country::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Country::Name).string().not_null())
                    .col(ColumnDef::new(Country::Capital).text().null())
                    .col(ColumnDef::new(Country::Region).string().null())
                    .col(ColumnDef::new(Country::Population).big_integer().not_null())
                    .col(ColumnDef::new(Country::CurrencyCode).string().null())
                    .col(ColumnDef::new(Country::ExchangeRate).double().null())
                    .col(
                        ColumnDef::new(Country::EstimatedGdp)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Country::FlagUrl).text().null())
                    .col(
                        ColumnDef::new(Country::LastRefreshedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 名称查询 / 删除
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_countries_name")
                    .table(Country::Table)
                    .col(Country::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_countries_region")
                    .table(Country::Table)
                    .col(Country::Region)
                    .to_owned(),
            )
            .await?;

        // GDP 排序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_countries_estimated_gdp")
                    .table(Country::Table)
                    .col(Country::EstimatedGdp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_countries_estimated_gdp",
            "idx_countries_region",
            "idx_countries_name",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Country::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Country::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Country {
    #[sea_orm(iden = "countries")]
    Table,
    Id,
    Name,
    Capital,
    Region,
    Population,
    CurrencyCode,
    ExchangeRate,
    EstimatedGdp,
    FlagUrl,
    LastRefreshedAt,
}
