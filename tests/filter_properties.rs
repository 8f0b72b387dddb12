use geodir::query::{geodesic_km, CompanyQuery, FilterEngine};
use geodir::{Company, Coordinate, DatasetStore, Error, Location};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn company_strategy() -> impl Strategy<Value = (String, f64, f64)> {
    ("[A-Za-z][A-Za-z ]{0,15}", -89.0f64..89.0, -179.0f64..179.0)
}

fn store_strategy() -> impl Strategy<Value = DatasetStore> {
    (
        prop::collection::vec(company_strategy(), 1..20),
        prop::collection::vec((0i64..25, -60.0f64..60.0, -170.0f64..170.0), 0..40),
    )
        .prop_map(|(companies, locations)| {
            let companies = companies
                .into_iter()
                .enumerate()
                .map(|(i, (name, lat, lon))| Company::new(i as i64, name, "addr", lat, lon))
                .collect();
            let locations = locations
                .into_iter()
                .enumerate()
                .map(|(i, (company_id, lat, lon))| {
                    Location::new(1000 + i as i64, company_id, "site", "addr", lat, lon)
                })
                .collect();
            DatasetStore::from_records(companies, locations)
        })
}

proptest! {
    #[test]
    fn lookup_by_id_returns_the_record(store in store_strategy()) {
        let engine = FilterEngine::new(&store);
        for company in store.all_companies() {
            prop_assert_eq!(engine.find_company_by_id(company.company_id).unwrap(), company);
        }
        let absent = store.all_companies().len() as i64 + 1;
        prop_assert!(matches!(
            engine.find_company_by_id(absent),
            Err(Error::CompanyNotFound(_))
        ));
    }

    #[test]
    fn unfiltered_listing_is_whole_table(store in store_strategy()) {
        let engine = FilterEngine::new(&store);
        let all = engine.find_companies(&CompanyQuery::default()).unwrap();
        prop_assert_eq!(all.len(), store.all_companies().len());
        for (found, original) in all.iter().zip(store.all_companies()) {
            prop_assert_eq!(*found, original);
        }
    }

    #[test]
    fn name_substring_in_any_case_matches(
        store in store_strategy(),
        start in 0usize..16,
        len in 1usize..8,
        upper in any::<bool>(),
    ) {
        let engine = FilterEngine::new(&store);
        for company in store.all_companies() {
            let name = &company.name;
            let start = start.min(name.len() - 1);
            let end = (start + len).min(name.len());
            let needle = if upper {
                name[start..end].to_uppercase()
            } else {
                name[start..end].to_lowercase()
            };
            if needle.trim().is_empty() {
                continue;
            }
            let found = engine.find_companies(&CompanyQuery::by_name(needle)).unwrap();
            prop_assert!(found.iter().any(|c| c.company_id == company.company_id));
        }
    }

    #[test]
    fn zero_radius_contains_self(store in store_strategy()) {
        let engine = FilterEngine::new(&store);
        for company in store.all_companies() {
            let query = CompanyQuery::within(company.coordinate(), Some(0.0));
            let found = engine.find_companies(&query).unwrap();
            prop_assert!(found.iter().any(|c| c.company_id == company.company_id));
        }
    }

    #[test]
    fn radius_results_grow_monotonically(
        store in store_strategy(),
        lat in -80.0f64..80.0,
        lon in -170.0f64..170.0,
        radius in 0.0f64..5000.0,
        epsilon in 0.001f64..1000.0,
    ) {
        let engine = FilterEngine::new(&store);
        let center = Coordinate::new(lat, lon);

        let inner: BTreeSet<i64> = engine
            .find_companies(&CompanyQuery::within(center, Some(radius)))
            .unwrap()
            .iter()
            .map(|c| c.company_id)
            .collect();
        let outer: BTreeSet<i64> = engine
            .find_companies(&CompanyQuery::within(center, Some(radius + epsilon)))
            .unwrap()
            .iter()
            .map(|c| c.company_id)
            .collect();

        prop_assert!(inner.is_subset(&outer));
        for company in store.all_companies() {
            let inside = geodesic_km(company.coordinate(), center) <= radius;
            prop_assert_eq!(inside, inner.contains(&company.company_id));
        }
    }

    #[test]
    fn out_of_range_center_is_rejected(
        store in store_strategy(),
        lat in 90.001f64..1000.0,
        lon in -180.0f64..180.0,
        south in any::<bool>(),
    ) {
        let engine = FilterEngine::new(&store);
        let lat = if south { -lat } else { lat };
        let result = engine.find_companies(&CompanyQuery::within(Coordinate::new(lat, lon), Some(1.0e5)));
        prop_assert!(matches!(result, Err(Error::InvalidQuery(_))));
    }

    #[test]
    fn locations_partition_by_company(store in store_strategy()) {
        let engine = FilterEngine::new(&store);
        let company_ids: BTreeSet<i64> =
            store.all_locations().iter().map(|l| l.company_id).collect();

        let mut seen = Vec::new();
        for id in &company_ids {
            let locations = engine.find_locations_by_company_id(*id).unwrap();
            prop_assert!(locations.iter().all(|l| l.company_id == *id));
            seen.extend(locations.iter().map(|l| l.location_id));
        }

        seen.sort_unstable();
        let mut expected: Vec<i64> = store.all_locations().iter().map(|l| l.location_id).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }
}

#[test]
fn scenario_companies_and_locations() {
    let store = DatasetStore::from_records(
        vec![
            Company::new(1, "Acme Corp", "1 Main St", 40.0, -74.0),
            Company::new(2, "Beta LLC", "2 Side St", 41.0, -73.0),
        ],
        vec![
            Location::new(10, 1, "Acme HQ", "1 Main St", 40.0, -74.0),
            Location::new(11, 1, "Acme Depot", "5 Dock Rd", 40.1, -74.1),
            Location::new(12, 2, "Beta HQ", "2 Side St", 41.0, -73.0),
        ],
    );
    let engine = FilterEngine::new(&store);

    let acme = engine.find_companies(&CompanyQuery::by_name("acme")).unwrap();
    assert_eq!(acme.len(), 1);
    assert_eq!(acme[0].company_id, 1);
    assert!(engine.find_companies(&CompanyQuery::by_name("zzz")).unwrap().is_empty());
    assert_eq!(engine.find_company_by_id(2).unwrap().name, "Beta LLC");
    assert!(matches!(engine.find_company_by_id(99), Err(Error::CompanyNotFound(99))));

    let ids: Vec<_> = engine
        .find_locations_by_company_id(1)
        .unwrap()
        .iter()
        .map(|l| l.location_id)
        .collect();
    assert_eq!(ids, vec![10, 11]);
    assert!(matches!(
        engine.find_locations_by_company_id(3),
        Err(Error::LocationsNotFound(3))
    ));
}

#[test]
fn sample_data_loads() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let store = DatasetStore::load(&root.join("companies.csv"), &root.join("locations.csv")).unwrap();
    let stats = store.stats();
    assert_eq!(stats.companies, 5);
    assert_eq!(stats.locations, 6);
    assert_eq!(stats.orphan_locations, 0);

    // Acme Corp (Midtown) and Acme Supply (Lower Manhattan) are ~4.6 km apart
    let engine = FilterEngine::new(&store);
    let near_midtown = engine.find_companies(&CompanyQuery::within(
        Coordinate::new(40.748817, -73.985428),
        Some(5.0),
    )).unwrap();
    let ids: Vec<_> = near_midtown.iter().map(|c| c.company_id).collect();
    assert_eq!(ids, vec![1, 4]);
}
