//! Merge engine: joins country records with the rate table
//!
//! Pure row derivation, no I/O. The GDP factor source is injected so the
//! rules can be tested deterministically.

use tracing::warn;

use crate::sources::{CountryRecord, RateTable};
use crate::storage::NewCountryRow;

/// GDP 随机系数区间（闭区间）
pub const GDP_FACTOR_MIN: i64 = 1000;
pub const GDP_FACTOR_MAX: i64 = 2000;

/// 汇率保留 6 位小数，GDP 保留 2 位
const EXCHANGE_RATE_DECIMALS: i32 = 6;
const GDP_DECIMALS: i32 = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub rows: Vec<NewCountryRow>,
    /// 缺少 name 或 population 而被丢弃的记录数
    pub skipped: usize,
}

/// 从 [GDP_FACTOR_MIN, GDP_FACTOR_MAX] 均匀抽取
pub fn random_gdp_factor() -> i64 {
    rand::random_range(GDP_FACTOR_MIN..=GDP_FACTOR_MAX)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// 对单条记录求值；无效记录返回 None
pub fn build_row(
    record: &CountryRecord,
    rates: &RateTable,
    factor: &mut impl FnMut() -> i64,
) -> Option<NewCountryRow> {
    // 仅用 trim 判断是否为空，存储原始名称
    let name = record.name.as_deref().filter(|n| !n.trim().is_empty());
    let (name, population) = match (name, record.population) {
        (Some(name), Some(population)) => (name, population),
        _ => {
            warn!(
                "Dropping country record with missing name or population: {:?}",
                record.name
            );
            return None;
        }
    };

    let population = i64::try_from(population).unwrap_or(i64::MAX);
    let currency_code = record.primary_currency_code().map(str::to_string);
    let exchange_rate = currency_code
        .as_deref()
        .and_then(|code| rates.get(code))
        .map(|rate| round_to(*rate, EXCHANGE_RATE_DECIMALS));

    let estimated_gdp = match exchange_rate {
        Some(_) => round_to(population as f64 * factor() as f64, GDP_DECIMALS),
        None => 0.0,
    };

    Some(NewCountryRow {
        name: name.to_string(),
        capital: record.capital.clone(),
        region: record.region.clone(),
        population,
        currency_code,
        exchange_rate,
        estimated_gdp,
        flag_url: record.flag.clone(),
    })
}

/// 对全部记录求值，保持输入顺序
pub fn build_rows(
    records: &[CountryRecord],
    rates: &RateTable,
    mut factor: impl FnMut() -> i64,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for record in records {
        match build_row(record, rates, &mut factor) {
            Some(row) => outcome.rows.push(row),
            None => outcome.skipped += 1,
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::CurrencyDescriptor;

    fn currency(code: &str) -> CurrencyDescriptor {
        CurrencyDescriptor {
            code: Some(code.to_string()),
            name: None,
            symbol: None,
        }
    }

    fn record(name: Option<&str>, population: Option<u64>, codes: &[&str]) -> CountryRecord {
        CountryRecord {
            name: name.map(str::to_string),
            capital: Some("Capital".to_string()),
            region: Some("Africa".to_string()),
            population,
            flag: Some("https://flagcdn.com/xx.svg".to_string()),
            currencies: Some(codes.iter().map(|c| currency(c)).collect()),
        }
    }

    fn rates(pairs: &[(&str, f64)]) -> RateTable {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_matched_currency_gets_rate_and_gdp() {
        let records = vec![record(Some("Atlantis"), Some(5_000_000), &["ATL"])];
        let outcome = build_rows(&records, &rates(&[("ATL", 1.23)]), || 1500);

        assert_eq!(outcome.skipped, 0);
        let row = &outcome.rows[0];
        assert_eq!(row.currency_code.as_deref(), Some("ATL"));
        assert_eq!(row.exchange_rate, Some(1.23));
        assert_eq!(row.estimated_gdp, 7_500_000_000.0);
        assert_eq!(row.flag_url.as_deref(), Some("https://flagcdn.com/xx.svg"));
    }

    #[test]
    fn test_no_currency_yields_null_rate_and_zero_gdp() {
        let records = vec![record(Some("Noland"), Some(1000), &[])];
        let outcome = build_rows(&records, &rates(&[("USD", 1.0)]), || {
            panic!("factor must not be drawn without a rate")
        });

        let row = &outcome.rows[0];
        assert!(row.currency_code.is_none());
        assert!(row.exchange_rate.is_none());
        assert_eq!(row.estimated_gdp, 0.0);
    }

    #[test]
    fn test_unknown_currency_keeps_code_but_no_rate() {
        let records = vec![record(Some("Elbonia"), Some(42), &["ELB"])];
        let outcome = build_rows(&records, &rates(&[("USD", 1.0)]), || 1000);

        let row = &outcome.rows[0];
        assert_eq!(row.currency_code.as_deref(), Some("ELB"));
        assert!(row.exchange_rate.is_none());
        assert_eq!(row.estimated_gdp, 0.0);
    }

    #[test]
    fn test_only_first_currency_is_used() {
        let records = vec![record(Some("Zimbabwe"), Some(100), &["ZWL", "USD"])];
        let outcome = build_rows(&records, &rates(&[("USD", 1.0)]), || 1000);

        let row = &outcome.rows[0];
        assert_eq!(row.currency_code.as_deref(), Some("ZWL"));
        assert!(row.exchange_rate.is_none());
        assert_eq!(row.estimated_gdp, 0.0);
    }

    #[test]
    fn test_missing_name_or_population_is_skipped() {
        let records = vec![
            record(None, Some(10), &["USD"]),
            record(Some("   "), Some(10), &["USD"]),
            record(Some("Nopop"), None, &["USD"]),
            record(Some("Valid"), Some(10), &["USD"]),
        ];
        let outcome = build_rows(&records, &rates(&[("USD", 1.0)]), || 1000);

        assert_eq!(outcome.skipped, 3);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].name, "Valid");
    }

    #[test]
    fn test_name_is_stored_as_received() {
        let records = vec![
            record(Some(" Foo "), Some(10), &["USD"]),
            record(Some("\t"), Some(10), &["USD"]),
        ];
        let outcome = build_rows(&records, &rates(&[("USD", 1.0)]), || 1000);

        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].name, " Foo ");
    }

    #[test]
    fn test_zero_population_is_kept() {
        let records = vec![record(Some("Empty Isle"), Some(0), &["USD"])];
        let outcome = build_rows(&records, &rates(&[("USD", 1.0)]), || 1000);

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].estimated_gdp, 0.0);
    }

    #[test]
    fn test_exchange_rate_rounded_to_six_decimals() {
        let records = vec![record(Some("Precise"), Some(1), &["PRC"])];
        let outcome = build_rows(&records, &rates(&[("PRC", 0.123456789)]), || 1000);

        assert_eq!(outcome.rows[0].exchange_rate, Some(0.123457));
    }

    #[test]
    fn test_random_factor_stays_in_range() {
        for _ in 0..1000 {
            let factor = random_gdp_factor();
            assert!((GDP_FACTOR_MIN..=GDP_FACTOR_MAX).contains(&factor));
        }
    }

    #[test]
    fn test_gdp_over_population_is_integer_factor() {
        let records: Vec<CountryRecord> = (1..=50)
            .map(|i| record(Some(&format!("C{}", i)), Some(i * 1_000), &["USD"]))
            .collect();
        let outcome = build_rows(&records, &rates(&[("USD", 1.0)]), random_gdp_factor);

        for row in &outcome.rows {
            let ratio = row.estimated_gdp / row.population as f64;
            assert_eq!(ratio.fract(), 0.0);
            assert!((GDP_FACTOR_MIN as f64..=GDP_FACTOR_MAX as f64).contains(&ratio));
        }
    }

    #[test]
    fn test_input_order_is_preserved() {
        let records = vec![
            record(Some("B"), Some(1), &[]),
            record(Some("A"), Some(1), &[]),
            record(Some("C"), Some(1), &[]),
        ];
        let outcome = build_rows(&records, &RateTable::new(), || 1000);
        let names: Vec<&str> = outcome.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }
}
