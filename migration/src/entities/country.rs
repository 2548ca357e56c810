use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub exchange_rate: Option<f64>,
    #[sea_orm(column_type = "Double")]
    pub estimated_gdp: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
