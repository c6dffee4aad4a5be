//! Catalog Module Tests
//!
//! Validates the in-memory store's predicate lowering, sorting, grouping
//! and suggestion primitives.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use crate::catalog::memory::MemoryCatalog;
    use crate::catalog::store::{
        price_bucket_label, CatalogStore, FacetDimension, SuggestField,
    };
    use crate::catalog::types::{Condition, Part, PartStatus, Seller, SellerType, Vehicle};
    use crate::query::params::RawSearchParams;
    use crate::query::{PageRequest, Predicate, SearchRequest, SortOrder};

    fn seller(name: &str, province: &str, verified: bool, rating: f64) -> Seller {
        Seller {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            business_name: name.to_string(),
            business_type: SellerType::ScrapYard,
            province: province.to_string(),
            city: "Johannesburg".to_string(),
            coordinates: None,
            is_verified: verified,
            rating,
            total_sales: 0,
        }
    }

    fn vehicle(seller: &Seller, make: &str, model: &str, year: i32) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            seller_id: seller.id,
            vin: format!("VIN{:014}", year),
            year,
            make: make.to_string(),
            model: model.to_string(),
            variant: None,
            engine_size: None,
            fuel_type: None,
            transmission: None,
            color: None,
            mileage: None,
            condition: Condition::Good,
        }
    }

    fn part(
        vehicle: &Vehicle,
        name: &str,
        price: f64,
        condition: Condition,
        age_minutes: i64,
    ) -> Part {
        let created = Utc::now() - Duration::minutes(age_minutes);
        Part {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            seller_id: vehicle.seller_id,
            name: name.to_string(),
            part_number: None,
            description: format!("Used {} in working order", name),
            condition,
            price,
            currency: "ZAR".to_string(),
            status: PartStatus::Available,
            location: None,
            images: Vec::new(),
            is_listed_on_marketplace: true,
            category_id: None,
            created_at: created,
            updated_at: created,
        }
    }

    /// One verified seller with a Toyota holding the given parts.
    fn catalog_with(parts: Vec<Part>) -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        for p in parts {
            catalog.insert_part(p);
        }
        catalog
    }

    fn first_page() -> PageRequest {
        PageRequest {
            page: 1,
            page_size: 20,
        }
    }

    // ============================================================
    // VISIBILITY LOWERING
    // ============================================================

    #[tokio::test]
    async fn test_base_predicate_excludes_unlisted_and_sold_parts() {
        let catalog = MemoryCatalog::new();
        let s = seller("Jozi Spares", "Gauteng", true, 4.5);
        let v = vehicle(&s, "Toyota", "Corolla", 2018);

        let listed = part(&v, "Brake Pads", 450.0, Condition::Good, 5);
        let mut unlisted = part(&v, "Alternator", 900.0, Condition::Good, 5);
        unlisted.is_listed_on_marketplace = false;
        let mut sold = part(&v, "Starter Motor", 700.0, Condition::Good, 5);
        sold.status = PartStatus::Sold;

        catalog.insert_seller(s);
        catalog.insert_vehicle(v);
        catalog.insert_part(listed);
        catalog.insert_part(unlisted);
        catalog.insert_part(sold);

        let count = catalog.count(&Predicate::base()).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_unverified_seller_parts_are_invisible() {
        let catalog = MemoryCatalog::new();
        let s = seller("Backyard Bob", "Gauteng", false, 5.0);
        let v = vehicle(&s, "Toyota", "Corolla", 2018);
        let p = part(&v, "Brake Pads", 450.0, Condition::Good, 5);

        catalog.insert_seller(s);
        catalog.insert_vehicle(v);
        catalog.insert_part(p);

        let count = catalog.count(&Predicate::base()).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_part_with_missing_vehicle_is_skipped() {
        let catalog = MemoryCatalog::new();
        let s = seller("Jozi Spares", "Gauteng", true, 4.5);
        let v = vehicle(&s, "Toyota", "Corolla", 2018);
        let p = part(&v, "Brake Pads", 450.0, Condition::Good, 5);

        catalog.insert_seller(s);
        // Vehicle deliberately not inserted.
        catalog.insert_part(p);

        let count = catalog.count(&Predicate::base()).await.unwrap();
        assert_eq!(count, 0);
    }

    // ============================================================
    // CLAUSE LOWERING
    // ============================================================

    async fn count_for(catalog: &MemoryCatalog, params: RawSearchParams) -> u64 {
        let predicate = SearchRequest::from_raw(params).unwrap().predicate();
        catalog.count(&predicate).await.unwrap()
    }

    fn seeded() -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        let s = seller("Jozi Spares", "Gauteng", true, 4.5);
        let v1 = vehicle(&s, "Toyota", "Corolla", 2018);
        let v2 = vehicle(&s, "Volkswagen", "Polo", 2015);

        catalog.insert_part(part(&v1, "Brake Pads", 450.0, Condition::Good, 30));
        catalog.insert_part(part(&v1, "Engine Block", 15000.0, Condition::Excellent, 20));
        catalog.insert_part(part(&v2, "Brake Disc", 800.0, Condition::Fair, 10));
        catalog.insert_seller(s);
        catalog.insert_vehicle(v1);
        catalog.insert_vehicle(v2);
        catalog
    }

    #[tokio::test]
    async fn test_substring_match_is_case_insensitive() {
        let catalog = seeded();
        let mut params = RawSearchParams::default();
        params.make = Some("toyo".to_string());

        assert_eq!(count_for(&catalog, params).await, 2);
    }

    #[tokio::test]
    async fn test_free_text_searches_name_and_description() {
        let catalog = seeded();
        let mut params = RawSearchParams::default();
        params.q = Some("BRAKE".to_string());

        assert_eq!(count_for(&catalog, params).await, 2);
    }

    #[tokio::test]
    async fn test_price_range_bounds_are_inclusive() {
        let catalog = seeded();
        let mut params = RawSearchParams::default();
        params.min_price = Some("450".to_string());
        params.max_price = Some("800".to_string());

        assert_eq!(count_for(&catalog, params).await, 2);
    }

    #[tokio::test]
    async fn test_year_is_exact_match() {
        let catalog = seeded();
        let mut params = RawSearchParams::default();
        params.year = Some("2015".to_string());

        assert_eq!(count_for(&catalog, params).await, 1);
    }

    #[tokio::test]
    async fn test_condition_set_membership() {
        let catalog = seeded();
        let mut params = RawSearchParams::default();
        params.condition = Some("GOOD,FAIR".to_string());

        assert_eq!(count_for(&catalog, params).await, 2);
    }

    // ============================================================
    // SORTING AND PAGINATION
    // ============================================================

    #[tokio::test]
    async fn test_price_sort_orders() {
        let catalog = seeded();
        let predicate = Predicate::base();

        let low = catalog
            .fetch_page(&predicate, SortOrder::PriceLow, first_page())
            .await
            .unwrap();
        let prices: Vec<f64> = low.iter().map(|l| l.part.price).collect();
        assert_eq!(prices, vec![450.0, 800.0, 15000.0]);

        let high = catalog
            .fetch_page(&predicate, SortOrder::PriceHigh, first_page())
            .await
            .unwrap();
        assert_eq!(high[0].part.price, 15000.0);
    }

    #[tokio::test]
    async fn test_newest_sort_order() {
        let catalog = seeded();
        let listings = catalog
            .fetch_page(&Predicate::base(), SortOrder::Newest, first_page())
            .await
            .unwrap();
        let names: Vec<&str> = listings.iter().map(|l| l.part.name.as_str()).collect();
        assert_eq!(names, vec!["Brake Disc", "Engine Block", "Brake Pads"]);
    }

    #[tokio::test]
    async fn test_condition_sort_ranks_new_first() {
        let catalog = MemoryCatalog::new();
        let s = seller("Jozi Spares", "Gauteng", true, 4.5);
        let v = vehicle(&s, "Toyota", "Corolla", 2018);
        catalog.insert_part(part(&v, "Poor Part", 100.0, Condition::Poor, 1));
        catalog.insert_part(part(&v, "New Part", 100.0, Condition::New, 2));
        catalog.insert_part(part(&v, "Good Part", 100.0, Condition::Good, 3));
        catalog.insert_seller(s);
        catalog.insert_vehicle(v);

        let listings = catalog
            .fetch_page(&Predicate::base(), SortOrder::Condition, first_page())
            .await
            .unwrap();
        let names: Vec<&str> = listings.iter().map(|l| l.part.name.as_str()).collect();
        assert_eq!(names, vec!["New Part", "Good Part", "Poor Part"]);
    }

    #[tokio::test]
    async fn test_relevance_sorts_by_seller_rating_then_recency() {
        let catalog = MemoryCatalog::new();
        let top = seller("Top Rated", "Gauteng", true, 4.9);
        let mid = seller("Mid Rated", "Gauteng", true, 3.0);
        let tv = vehicle(&top, "Toyota", "Corolla", 2018);
        let mv = vehicle(&mid, "Toyota", "Hilux", 2016);

        catalog.insert_part(part(&tv, "Older Top", 100.0, Condition::Good, 60));
        catalog.insert_part(part(&tv, "Newer Top", 100.0, Condition::Good, 5));
        catalog.insert_part(part(&mv, "Mid Part", 100.0, Condition::Good, 1));
        catalog.insert_seller(top);
        catalog.insert_seller(mid);
        catalog.insert_vehicle(tv);
        catalog.insert_vehicle(mv);

        let listings = catalog
            .fetch_page(&Predicate::base(), SortOrder::Relevance, first_page())
            .await
            .unwrap();
        let names: Vec<&str> = listings.iter().map(|l| l.part.name.as_str()).collect();
        assert_eq!(names, vec!["Newer Top", "Older Top", "Mid Part"]);
    }

    #[tokio::test]
    async fn test_fetch_page_applies_offset_and_size() {
        let catalog = seeded();
        let page = PageRequest {
            page: 2,
            page_size: 2,
        };
        let listings = catalog
            .fetch_page(&Predicate::base(), SortOrder::PriceLow, page)
            .await
            .unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].part.price, 15000.0);
    }

    // ============================================================
    // GROUP COUNTS
    // ============================================================

    #[tokio::test]
    async fn test_group_count_by_make_sorts_by_count() {
        let catalog = seeded();
        let makes = catalog
            .group_count(&Predicate::base(), FacetDimension::VehicleMake)
            .await
            .unwrap();
        assert_eq!(
            makes,
            vec![
                ("Toyota".to_string(), 2),
                ("Volkswagen".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_price_buckets_keep_bucket_order_and_skip_empty() {
        let catalog = seeded();
        let buckets = catalog
            .group_count(&Predicate::base(), FacetDimension::PriceBucket)
            .await
            .unwrap();
        assert_eq!(
            buckets,
            vec![("0-1000".to_string(), 2), ("10000-25000".to_string(), 1)]
        );
    }

    #[test]
    fn test_price_bucket_boundaries() {
        assert_eq!(price_bucket_label(0.0), Some("0-1000"));
        assert_eq!(price_bucket_label(1000.0), Some("0-1000"));
        assert_eq!(price_bucket_label(1000.01), Some("1000-5000"));
        assert_eq!(price_bucket_label(25000.0), Some("10000-25000"));
        assert_eq!(price_bucket_label(25000.01), Some("25000+"));
        assert_eq!(price_bucket_label(-5.0), None);
    }

    // ============================================================
    // SUGGESTIONS AND LOOKUPS
    // ============================================================

    #[tokio::test]
    async fn test_distinct_values_dedupes_and_limits() {
        let catalog = seeded();
        let makes = catalog
            .distinct_values(SuggestField::VehicleMake, "o", 10)
            .await
            .unwrap();
        assert_eq!(makes, vec!["Toyota".to_string(), "Volkswagen".to_string()]);

        let limited = catalog
            .distinct_values(SuggestField::VehicleMake, "o", 1)
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_values_only_cover_visible_listings() {
        let catalog = MemoryCatalog::new();
        let s = seller("Backyard Bob", "Gauteng", false, 5.0);
        let v = vehicle(&s, "Nissan", "Navara", 2019);
        catalog.insert_part(part(&v, "Tailgate", 1200.0, Condition::Good, 5));
        catalog.insert_seller(s);
        catalog.insert_vehicle(v);

        let makes = catalog
            .distinct_values(SuggestField::VehicleMake, "nis", 10)
            .await
            .unwrap();
        assert!(makes.is_empty());
    }

    #[tokio::test]
    async fn test_existence_and_brief_lookups() {
        let catalog = MemoryCatalog::new();
        let s = seller("Jozi Spares", "Gauteng", true, 4.5);
        let v = vehicle(&s, "Toyota", "Corolla", 2018);
        let p = part(&v, "Brake Pads", 450.0, Condition::Good, 5);
        let part_id = p.id;
        let seller_id = s.id;
        catalog.insert_seller(s);
        catalog.insert_vehicle(v);
        catalog.insert_part(p);

        assert!(catalog.part_exists(part_id).await.unwrap());
        assert!(catalog.seller_exists(seller_id).await.unwrap());
        assert!(!catalog.part_exists(Uuid::new_v4()).await.unwrap());

        let brief = catalog.part_brief(part_id).await.unwrap().unwrap();
        assert_eq!(brief.name, "Brake Pads");
        assert_eq!(brief.price, 450.0);
        assert!(catalog.part_brief(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_catalog_with_helper_has_no_joins() {
        // Parts without their vehicle/seller rows never surface.
        let s = seller("Jozi Spares", "Gauteng", true, 4.5);
        let v = vehicle(&s, "Toyota", "Corolla", 2018);
        let catalog = catalog_with(vec![part(&v, "Brake Pads", 450.0, Condition::Good, 5)]);
        assert_eq!(catalog.count(&Predicate::base()).await.unwrap(), 0);
        assert_eq!(catalog.part_count(), 1);
    }
}
