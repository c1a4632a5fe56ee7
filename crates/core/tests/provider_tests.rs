// ═══════════════════════════════════════════════════════════════════
// Provider Tests — response parsing, URL building, ProviderSet
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;

use travel_explorer_core::errors::CoreError;
use travel_explorer_core::models::country::Country;
use travel_explorer_core::models::settings::Settings;
use travel_explorer_core::providers::amadeus::parse_cheapest_offer;
use travel_explorer_core::providers::exchange_rate::parse_rate;
use travel_explorer_core::providers::registry::ProviderSet;
use travel_explorer_core::providers::rest_countries::parse_country_lookup;
use travel_explorer_core::providers::static_map::build_static_map_url;
use travel_explorer_core::providers::traits::{CountryProvider, SummaryProvider};
use travel_explorer_core::providers::wikipedia::first_sentence;

// ═══════════════════════════════════════════════════════════════════
// REST Countries
// ═══════════════════════════════════════════════════════════════════

mod rest_countries {
    use super::*;

    #[test]
    fn takes_first_record() {
        let body = r#"[
            {"name": {"common": "Japan"}, "capital": ["Tokyo"], "region": "Asia"},
            {"name": {"common": "Japan (duplicate)"}}
        ]"#;
        let c = parse_country_lookup(body, "Japan").unwrap();
        assert_eq!(c.common_name(), "Japan");
        assert_eq!(c.primary_capital(), Some("Tokyo"));
    }

    #[test]
    fn empty_array_is_not_found() {
        match parse_country_lookup("[]", "Atlantis") {
            Err(CoreError::NotFound(name)) => assert_eq!(name, "Atlantis"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn malformed_body() {
        assert!(matches!(
            parse_country_lookup(r#"{"status":404}"#, "Atlantis"),
            Err(CoreError::Deserialization(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ExchangeRate-API
// ═══════════════════════════════════════════════════════════════════

mod exchange_rate {
    use super::*;

    const BODY: &str = r#"{"result":"success","base_code":"USD",
        "conversion_rates":{"USD":1,"EUR":0.92,"JPY":151.3}}"#;

    #[test]
    fn reads_rate() {
        assert_eq!(parse_rate(BODY, "EUR").unwrap(), 0.92);
        assert_eq!(parse_rate(BODY, "jpy").unwrap(), 151.3);
    }

    #[test]
    fn missing_code_is_invalid_rate() {
        match parse_rate(BODY, "zzz") {
            Err(CoreError::InvalidRate(code)) => assert_eq!(code, "ZZZ"),
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn missing_table_is_invalid_rate() {
        let body = r#"{"result":"error","error-type":"invalid-key"}"#;
        assert!(matches!(parse_rate(body, "EUR"), Err(CoreError::InvalidRate(_))));
    }

    #[test]
    fn non_positive_rate_is_invalid() {
        let body = r#"{"conversion_rates":{"EUR":0}}"#;
        assert!(matches!(parse_rate(body, "EUR"), Err(CoreError::InvalidRate(_))));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Amadeus
// ═══════════════════════════════════════════════════════════════════

mod amadeus {
    use super::*;

    #[test]
    fn first_offer_total() {
        let body = r#"{"data":[{"price":{"currency":"USD","total":"345.23"}},
                                {"price":{"currency":"USD","total":"400.00"}}]}"#;
        assert_eq!(parse_cheapest_offer(body, "JFK", "LHR", "2025-06-01").unwrap(), 345.23);
    }

    #[test]
    fn empty_data_is_no_offers() {
        match parse_cheapest_offer(r#"{"data":[]}"#, "jfk", "lhr", "2025-06-01") {
            Err(CoreError::NoOffers {
                origin,
                destination,
                date,
            }) => {
                assert_eq!(origin, "JFK");
                assert_eq!(destination, "LHR");
                assert_eq!(date, "2025-06-01");
            }
            other => panic!("Expected NoOffers, got {:?}", other),
        }
    }

    #[test]
    fn missing_data_is_no_offers() {
        assert!(matches!(
            parse_cheapest_offer("{}", "JFK", "LHR", "2025-06-01"),
            Err(CoreError::NoOffers { .. })
        ));
    }

    #[test]
    fn unparseable_total() {
        let body = r#"{"data":[{"price":{"total":"n/a"}}]}"#;
        assert!(matches!(
            parse_cheapest_offer(body, "JFK", "LHR", "2025-06-01"),
            Err(CoreError::ServiceError { status: 200, .. })
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Wikipedia & static maps
// ═══════════════════════════════════════════════════════════════════

mod wikipedia {
    use super::*;

    #[test]
    fn cuts_at_first_sentence_break() {
        let extract = "France is a country in Western Europe. Its capital is Paris.";
        assert_eq!(first_sentence(extract), "France is a country in Western Europe.");
    }

    #[test]
    fn single_sentence_kept_whole() {
        assert_eq!(first_sentence("  Tuvalu is an island country.  "), "Tuvalu is an island country.");
        assert_eq!(first_sentence(""), "");
    }

    #[test]
    fn abbreviation_without_space_does_not_split() {
        assert_eq!(first_sentence("Washington, D.C.is odd"), "Washington, D.C.is odd");
    }
}

mod static_map {
    use super::*;

    #[test]
    fn url_format() {
        let url = build_static_map_url("https://staticmap.openstreetmap.de/staticmap.php", 46.0, 2.0);
        assert_eq!(
            url,
            "https://staticmap.openstreetmap.de/staticmap.php?center=46,2&zoom=5&size=600x300&markers=46,2,red-pushpin"
        );
    }

    #[test]
    fn negative_and_fractional_coordinates() {
        let url = build_static_map_url("http://maps.local/map", -33.5, 151.25);
        assert!(url.starts_with("http://maps.local/map?center=-33.5,151.25&"));
        assert!(url.ends_with("markers=-33.5,151.25,red-pushpin"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ProviderSet & default trait methods
// ═══════════════════════════════════════════════════════════════════

struct FixedCountries(Vec<&'static str>);

#[async_trait]
impl CountryProvider for FixedCountries {
    fn name(&self) -> &str {
        "Fixed"
    }

    async fn find_by_name(&self, name: &str) -> Result<Country, CoreError> {
        self.0
            .iter()
            .find(|n| **n == name)
            .map(|n| Country::new(*n))
            .ok_or_else(|| CoreError::NotFound(name.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Country>, CoreError> {
        Ok(self.0.iter().map(|n| Country::new(*n)).collect())
    }
}

struct NoSummaries;

#[async_trait]
impl SummaryProvider for NoSummaries {
    fn name(&self) -> &str {
        "None"
    }

    async fn get_summary(&self, _subject: &str) -> String {
        String::new()
    }
}

mod provider_set {
    use super::*;

    #[test]
    fn defaults_without_keys() {
        let set = ProviderSet::new_with_defaults(&Settings::default());
        assert!(!set.has_rates());
        assert!(!set.has_flights());
        assert!(matches!(set.rates(), Err(CoreError::NoProvider(_))));
        assert!(matches!(set.flights(), Err(CoreError::NoProvider(_))));
        assert_eq!(set.provider_names(), vec!["REST Countries", "Wikipedia"]);
    }

    #[test]
    fn rate_key_enables_rates() {
        let mut settings = Settings::default();
        settings.api_keys.insert("exchangerate_api".into(), "k".into());
        let set = ProviderSet::new_with_defaults(&settings);
        assert!(set.has_rates());
        assert_eq!(set.rates().unwrap().name(), "ExchangeRate-API");
    }

    #[test]
    fn flights_need_both_credentials() {
        let mut settings = Settings::default();
        settings.api_keys.insert("amadeus_client_id".into(), "id".into());
        assert!(!ProviderSet::new_with_defaults(&settings).has_flights());

        settings
            .api_keys
            .insert("amadeus_client_secret".into(), "secret".into());
        let set = ProviderSet::new_with_defaults(&settings);
        assert!(set.has_flights());
        assert_eq!(set.flights().unwrap().name(), "Amadeus");
    }

    #[test]
    fn custom_clients() {
        let set = ProviderSet::new(Box::new(FixedCountries(vec!["France"])), Box::new(NoSummaries));
        assert_eq!(set.countries().name(), "Fixed");
        assert_eq!(set.summaries().name(), "None");
    }

    #[tokio::test]
    async fn random_picks_from_list() {
        let provider = FixedCountries(vec!["France", "Japan", "Peru"]);
        for _ in 0..20 {
            let c = provider.random().await.unwrap();
            assert!(["France", "Japan", "Peru"].contains(&c.common_name()));
        }
    }

    #[tokio::test]
    async fn random_from_empty_list_fails() {
        let provider = FixedCountries(vec![]);
        assert!(matches!(
            provider.random().await,
            Err(CoreError::ServiceError { .. })
        ));
    }
}
