// ═══════════════════════════════════════════════════════════════════
// Model Tests — Country, FlightWatch/WatchKey, PriceHistory,
// cards, Settings, Sparkline
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::collections::HashSet;

use travel_explorer_core::errors::CoreError;
use travel_explorer_core::models::airport::Airport;
use travel_explorer_core::models::card::{
    price_line, CardContext, CardField, WatchCard, WatchCardState, WishlistAction,
    WishlistToggle, PRICE_ERROR_TEXT, PRICE_PENDING_TEXT,
};
use travel_explorer_core::models::chart::{Sparkline, SparklineStyle};
use travel_explorer_core::models::country::Country;
use travel_explorer_core::models::history::{PriceHistory, MAX_HISTORY_LEN};
use travel_explorer_core::models::settings::{Endpoints, Settings};
use travel_explorer_core::models::watch::{FlightWatch, PricingMode, WatchKey};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Country
// ═══════════════════════════════════════════════════════════════════

mod country {
    use super::*;

    const FRANCE_JSON: &str = r#"{
        "name": {
            "common": "France",
            "official": "French Republic",
            "nativeName": {"fra": {"official": "République française", "common": "France"}}
        },
        "capital": ["Paris"],
        "population": 67391582,
        "region": "Europe",
        "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
        "flags": {
            "svg": "https://flagcdn.com/fr.svg",
            "png": "https://flagcdn.com/w320/fr.png",
            "source": "flagcdn"
        },
        "latlng": [46.0, 2.0],
        "cca3": "FRA"
    }"#;

    #[test]
    fn parses_service_record() {
        let c: Country = serde_json::from_str(FRANCE_JSON).unwrap();
        assert_eq!(c.common_name(), "France");
        assert_eq!(c.primary_capital(), Some("Paris"));
        assert_eq!(c.population, 67_391_582);
        assert_eq!(c.region, "Europe");
        assert_eq!(c.primary_currency(), Some("EUR"));
        assert_eq!(c.flag_url(), Some("https://flagcdn.com/fr.svg"));
        assert_eq!(c.coordinates(), Some((46.0, 2.0)));
    }

    #[test]
    fn unknown_fields_survive_reserialization() {
        let c: Country = serde_json::from_str(FRANCE_JSON).unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["cca3"], "FRA");
        assert_eq!(
            json["name"]["nativeName"]["fra"]["official"],
            "République française"
        );
        assert_eq!(json["flags"]["source"], "flagcdn");

        let again: Country = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&again).unwrap(), json);
    }

    #[test]
    fn absent_collections_stay_absent() {
        let c: Country = serde_json::from_str(r#"{"name": {"common": "Antarctica"}}"#).unwrap();
        let json = serde_json::to_value(&c).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("capital"));
        assert!(!obj.contains_key("currencies"));
        assert!(!obj.contains_key("latlng"));
    }

    #[test]
    fn equality_uses_common_name_only() {
        let mut a = Country::new("Japan");
        a.population = 1;
        let mut b = Country::new("Japan");
        b.population = 2;
        b.region = "Asia".into();
        assert_eq!(a, b);
        assert_ne!(a, Country::new("japan"));

        let set: HashSet<Country> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn sparse_record_defaults() {
        let c: Country = serde_json::from_str(r#"{"name": {"common": "Antarctica"}}"#).unwrap();
        assert_eq!(c.primary_capital(), None);
        assert_eq!(c.primary_currency(), None);
        assert_eq!(c.flag_url(), None);
        assert_eq!(c.coordinates(), None);
    }

    #[test]
    fn png_flag_used_without_svg() {
        let mut c = Country::new("Nowhere");
        c.flags.png = Some("https://flagcdn.com/w320/xx.png".into());
        assert_eq!(c.flag_url(), Some("https://flagcdn.com/w320/xx.png"));
    }

    #[test]
    fn first_currency_is_alphabetical() {
        let c: Country = serde_json::from_str(
            r#"{"name": {"common": "Zimbabwe"}, "currencies": {"ZWL": {"name": "a"}, "USD": {"name": "b"}}}"#,
        )
        .unwrap();
        assert_eq!(c.primary_currency(), Some("USD"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FlightWatch & WatchKey
// ═══════════════════════════════════════════════════════════════════

mod flight_watch {
    use super::*;

    #[test]
    fn new_normalizes_codes() {
        let w = FlightWatch::new(" jfk", "lhr ", date(2025, 6, 1), "usd");
        assert_eq!(w.origin, "JFK");
        assert_eq!(w.destination, "LHR");
        assert_eq!(w.currency, "USD");
        assert_eq!(w.return_date, None);
        assert_eq!(w.window_days, 0);
    }

    #[test]
    fn pricing_mode_selection() {
        let base = FlightWatch::new("JFK", "LHR", date(2025, 6, 1), "USD");
        assert_eq!(base.pricing_mode(), PricingMode::OneWay);

        let rt = base.clone().with_return(date(2025, 6, 10));
        assert_eq!(
            rt.pricing_mode(),
            PricingMode::RoundTrip {
                return_date: date(2025, 6, 10)
            }
        );

        let flex = base.clone().with_window(3);
        assert_eq!(flex.pricing_mode(), PricingMode::FlexibleRange { window_days: 3 });
    }

    #[test]
    fn return_date_wins_over_window() {
        let w = FlightWatch::new("JFK", "LHR", date(2025, 6, 1), "USD")
            .with_return(date(2025, 6, 10))
            .with_window(3);
        assert!(matches!(w.pricing_mode(), PricingMode::RoundTrip { .. }));
    }

    #[test]
    fn json_uses_camel_case_and_iso_dates() {
        let w = FlightWatch::new("JFK", "LHR", date(2025, 6, 1), "USD").with_window(2);
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["departDate"], "2025-06-01");
        assert_eq!(json["windowDays"], 2);
        assert!(json["returnDate"].is_null());
    }

    #[test]
    fn missing_optional_fields_default() {
        let w: FlightWatch = serde_json::from_str(
            r#"{"origin":"JFK","destination":"LHR","departDate":"2025-06-01","currency":"USD"}"#,
        )
        .unwrap();
        assert_eq!(w.return_date, None);
        assert_eq!(w.window_days, 0);
    }

    #[test]
    fn null_window_reads_as_zero() {
        let w: FlightWatch = serde_json::from_str(
            r#"{"origin":"JFK","destination":"LHR","departDate":"2025-06-01",
                "returnDate":null,"windowDays":null,"currency":"USD"}"#,
        )
        .unwrap();
        assert_eq!(w.window_days, 0);
        assert_eq!(w.pricing_mode(), PricingMode::OneWay);
    }

    #[test]
    fn key_excludes_currency() {
        let usd = FlightWatch::new("JFK", "LHR", date(2025, 6, 1), "USD");
        let eur = FlightWatch::new("JFK", "LHR", date(2025, 6, 1), "EUR");
        assert_eq!(usd.key(), eur.key());
    }
}

mod watch_key {
    use super::*;

    fn key(ret: Option<NaiveDate>, window: u32) -> WatchKey {
        WatchKey {
            origin: "JFK".into(),
            destination: "LHR".into(),
            depart_date: date(2025, 6, 1),
            return_date: ret,
            window_days: window,
        }
    }

    #[test]
    fn history_key_formats() {
        assert_eq!(key(None, 0).history_key(), "history-JFK-LHR-2025-06-01");
        assert_eq!(key(None, 3).history_key(), "history-JFK-LHR-2025-06-01-wd-3");
        assert_eq!(
            key(Some(date(2025, 6, 10)), 0).history_key(),
            "history-JFK-LHR-2025-06-01-rt-2025-06-10"
        );
    }

    #[test]
    fn chart_id_format() {
        assert_eq!(key(None, 0).chart_id(), "chart_JFK_LHR_2025-06-01");
        assert_eq!(key(None, 3).chart_id(), "chart_JFK_LHR_2025-06-01_wd_3");
    }

    #[test]
    fn distinct_identities_get_distinct_keys() {
        let keys = [
            key(None, 0),
            key(None, 3),
            key(Some(date(2025, 6, 10)), 0),
            key(Some(date(2025, 6, 10)), 3),
            key(Some(date(2025, 6, 3)), 0),
        ];
        let history: HashSet<String> = keys.iter().map(WatchKey::history_key).collect();
        let charts: HashSet<String> = keys.iter().map(WatchKey::chart_id).collect();
        assert_eq!(history.len(), keys.len());
        assert_eq!(charts.len(), keys.len());
    }

    #[test]
    fn display() {
        assert_eq!(key(None, 0).to_string(), "JFK → LHR on 2025-06-01");
        assert_eq!(
            key(Some(date(2025, 6, 10)), 2).to_string(),
            "JFK → LHR on 2025-06-01 returning 2025-06-10 (±2 days)"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// PriceHistory
// ═══════════════════════════════════════════════════════════════════

mod price_history {
    use super::*;

    #[test]
    fn push_keeps_most_recent_ten() {
        let mut h = PriceHistory::new();
        for p in 1..=11 {
            h.push(p as f64);
        }
        assert_eq!(h.len(), MAX_HISTORY_LEN);
        assert_eq!(h.prices().first(), Some(&2.0));
        assert_eq!(h.latest(), Some(11.0));
    }

    #[test]
    fn from_prices_truncates_oldest() {
        let h = PriceHistory::from_prices((0..15).map(f64::from).collect());
        assert_eq!(h.prices(), &[5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn min_max() {
        assert_eq!(PriceHistory::new().min_max(), None);
        let h = PriceHistory::from_prices(vec![345.23, 300.0, 320.5]);
        assert_eq!(h.min_max(), Some((300.0, 345.23)));
    }

    #[test]
    fn serializes_as_bare_array() {
        let h = PriceHistory::from_prices(vec![1.5, 2.0]);
        assert_eq!(serde_json::to_string(&h).unwrap(), "[1.5,2.0]");
        let back: PriceHistory = serde_json::from_str("[3.0]").unwrap();
        assert_eq!(back.prices(), &[3.0]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Cards
// ═══════════════════════════════════════════════════════════════════

mod cards {
    use super::*;

    fn card() -> WatchCard {
        let watch = FlightWatch::new("JFK", "LHR", date(2025, 6, 1), "USD");
        let key = watch.key();
        WatchCard {
            heading: "JFK → LHR".into(),
            details: vec![CardField::new("Depart", "2025-06-01")],
            currency: "USD".into(),
            state: WatchCardState::Created,
            price_text: String::new(),
            chart_id: key.chart_id(),
            chart: None,
            stats: None,
            key,
        }
    }

    fn sparkline(values: Vec<f64>) -> Sparkline {
        Sparkline {
            labels: (1..=values.len()).collect(),
            values,
            currency: "USD".into(),
            style: SparklineStyle::default(),
        }
    }

    #[test]
    fn card_field_display() {
        assert_eq!(CardField::new("Capital", "Paris").to_string(), "Capital: Paris");
    }

    #[test]
    fn toggle_labels() {
        let add = WishlistToggle::for_membership(false, CardContext::Search);
        assert_eq!(add.action, WishlistAction::Add);
        assert_eq!(add.label, "Add to Wishlist");
        assert!(!add.compact);

        let remove = WishlistToggle::for_membership(true, CardContext::Search);
        assert_eq!(remove.action, WishlistAction::Remove);
        assert_eq!(remove.label, "Remove from Wishlist");

        let compact = WishlistToggle::for_membership(true, CardContext::Wishlist);
        assert_eq!(compact.label, "×");
        assert_eq!(compact.title, "Remove from Wishlist");
        assert!(compact.compact);
    }

    #[test]
    fn price_lines() {
        assert_eq!(price_line(PricingMode::OneWay, 345.234, "USD"), "One-way: 345.23 USD");
        assert_eq!(
            price_line(
                PricingMode::RoundTrip {
                    return_date: date(2025, 6, 10)
                },
                700.0,
                "EUR"
            ),
            "Round-trip: 700.00 EUR"
        );
        assert_eq!(
            price_line(PricingMode::FlexibleRange { window_days: 3 }, 289.1, "USD"),
            "Cheapest ±3d: 289.10 USD"
        );
    }

    #[test]
    fn successful_lifecycle() {
        let mut c = card();
        c.begin_fetch().unwrap();
        assert_eq!(c.state, WatchCardState::PriceFetching);
        assert_eq!(c.price_text, PRICE_PENDING_TEXT);

        c.show_price(
            PricingMode::OneWay,
            320.0,
            sparkline(vec![300.0, 320.0]),
            Some((300.0, 320.0)),
        )
        .unwrap();
        assert_eq!(c.state, WatchCardState::PriceDisplayed);
        assert_eq!(c.price_text, "One-way: 320.00 USD");
        assert_eq!(c.stats.as_deref(), Some("Low: 300.00, High: 320.00"));
        assert!(c.chart.is_some());

        c.mark_removed().unwrap();
        assert_eq!(c.state, WatchCardState::Removed);
    }

    #[test]
    fn failed_lifecycle() {
        let mut c = card();
        c.begin_fetch().unwrap();
        c.fail().unwrap();
        assert_eq!(c.state, WatchCardState::PriceFetchFailed);
        assert_eq!(c.price_text, PRICE_ERROR_TEXT);
        assert!(c.chart.is_none());
    }

    #[test]
    fn illegal_transitions_rejected() {
        let mut c = card();
        assert!(matches!(c.fail(), Err(CoreError::ValidationError(_))));
        assert!(c.mark_removed().is_err());

        c.begin_fetch().unwrap();
        assert!(c.begin_fetch().is_err());

        c.fail().unwrap();
        assert!(c.mark_removed().is_err());
        assert!(c
            .show_price(PricingMode::OneWay, 1.0, sparkline(vec![1.0]), None)
            .is_err());
        assert_eq!(c.state, WatchCardState::PriceFetchFailed);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings, Sparkline, Airport
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.default_currency, "USD");
        assert!(s.api_keys.is_empty());
        assert_eq!(s.endpoints, Endpoints::default());
        assert_eq!(s.endpoints.countries, "https://restcountries.com/v3.1");
    }

    #[test]
    fn from_json_fills_missing_endpoints() {
        let s = Settings::from_json(
            r#"{"default_currency":"EUR","api_keys":{"exchangerate_api":"k"},
                "endpoints":{"countries":"http://localhost:9000"}}"#,
        )
        .unwrap();
        assert_eq!(s.default_currency, "EUR");
        assert_eq!(s.api_key("exchangerate_api"), Some("k"));
        assert_eq!(s.api_key("amadeus_client_id"), None);
        assert_eq!(s.endpoints.countries, "http://localhost:9000");
        assert_eq!(s.endpoints.summaries, Endpoints::default().summaries);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            Settings::from_json("not json"),
            Err(CoreError::Deserialization(_))
        ));
    }
}

mod sparkline {
    use super::*;

    #[test]
    fn style_defaults() {
        let s = SparklineStyle::default();
        assert_eq!(s.border_color, "#4B34D1");
        assert!(s.fill);
        assert_eq!(s.tension, 0.3);
        assert_eq!(s.point_radius, 0.0);
        assert!(!s.show_legend);
        assert!(!s.show_axes);
    }

    #[test]
    fn tooltip_label() {
        let s = Sparkline {
            labels: vec![1],
            values: vec![345.234],
            currency: "USD".into(),
            style: SparklineStyle::default(),
        };
        assert_eq!(s.tooltip_label(345.234), "345.23 USD");
        assert!(!s.is_empty());
    }
}

mod airport {
    use super::*;

    #[test]
    fn label() {
        let a = Airport::new("JFK", "John F Kennedy International Airport");
        assert_eq!(a.label(), "JFK — John F Kennedy International Airport");
    }
}
