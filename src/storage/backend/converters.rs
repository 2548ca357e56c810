use chrono::{DateTime, Utc};

use crate::storage::{CountryRow, NewCountryRow};
use migration::entities::country;

/// 将 Sea-ORM Model 转换为 CountryRow
pub fn model_to_row(model: country::Model) -> CountryRow {
    CountryRow {
        id: model.id,
        name: model.name,
        capital: model.capital,
        region: model.region,
        population: model.population,
        currency_code: model.currency_code,
        exchange_rate: model.exchange_rate,
        estimated_gdp: model.estimated_gdp,
        flag_url: model.flag_url,
        last_refreshed_at: model.last_refreshed_at,
    }
}

/// 将待写入行转换为 ActiveModel，id 由调用方按插入顺序分配
pub fn new_row_to_active_model(
    row: &NewCountryRow,
    id: i32,
    refreshed_at: DateTime<Utc>,
) -> country::ActiveModel {
    use sea_orm::ActiveValue::*;

    country::ActiveModel {
        id: Set(id),
        name: Set(row.name.clone()),
        capital: Set(row.capital.clone()),
        region: Set(row.region.clone()),
        population: Set(row.population),
        currency_code: Set(row.currency_code.clone()),
        exchange_rate: Set(row.exchange_rate),
        estimated_gdp: Set(row.estimated_gdp),
        flag_url: Set(row.flag_url.clone()),
        last_refreshed_at: Set(refreshed_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn create_test_row() -> NewCountryRow {
        NewCountryRow {
            name: "Atlantis".to_string(),
            capital: Some("Poseidonia".to_string()),
            region: Some("Oceania".to_string()),
            population: 5_000_000,
            currency_code: Some("ATL".to_string()),
            exchange_rate: Some(1.23),
            estimated_gdp: 7_500_000_000.0,
            flag_url: None,
        }
    }

    #[test]
    fn test_model_to_row_copies_all_fields() {
        let now = Utc::now();
        let model = country::Model {
            id: 7,
            name: "Noland".to_string(),
            capital: None,
            region: Some("Europe".to_string()),
            population: 1000,
            currency_code: None,
            exchange_rate: None,
            estimated_gdp: 0.0,
            flag_url: Some("https://flagcdn.com/nl.svg".to_string()),
            last_refreshed_at: now,
        };

        let row = model_to_row(model);

        assert_eq!(row.id, 7);
        assert_eq!(row.name, "Noland");
        assert!(row.currency_code.is_none());
        assert!(row.exchange_rate.is_none());
        assert_eq!(row.estimated_gdp, 0.0);
        assert_eq!(row.last_refreshed_at, now);
    }

    #[test]
    fn test_new_row_to_active_model_sets_everything() {
        let row = create_test_row();
        let now = Utc::now();
        let active_model = new_row_to_active_model(&row, 3, now);

        assert!(matches!(active_model.id, ActiveValue::Set(3)));
        assert!(matches!(active_model.last_refreshed_at, ActiveValue::Set(t) if t == now));
        if let ActiveValue::Set(code) = active_model.currency_code {
            assert_eq!(code.as_deref(), Some("ATL"));
        } else {
            panic!("currency_code should be set");
        }
        if let ActiveValue::Set(rate) = active_model.exchange_rate {
            assert_eq!(rate, Some(1.23));
        } else {
            panic!("exchange_rate should be set");
        }
    }

    #[test]
    fn test_new_row_to_active_model_keeps_nulls() {
        let mut row = create_test_row();
        row.currency_code = None;
        row.exchange_rate = None;
        row.estimated_gdp = 0.0;

        let active_model = new_row_to_active_model(&row, 1, Utc::now());

        assert!(matches!(active_model.currency_code, ActiveValue::Set(None)));
        assert!(matches!(active_model.exchange_rate, ActiveValue::Set(None)));
        assert!(matches!(active_model.estimated_gdp, ActiveValue::Set(g) if g == 0.0));
    }
}
