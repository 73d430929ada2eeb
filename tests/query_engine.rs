//! Integration tests for the listing query engine

use jiff::civil::{Date, date};
use rustc_hash::FxHashSet;
use testresult::TestResult;

use nab_market::{
    catalog::Catalog,
    categories::Category,
    conditions::Condition,
    products::Product,
    query::{DatePosted, ListingFilters, PriceRange, SortOrder, compose},
};

const TODAY: Date = date(2025, 6, 1);

fn ids(products: &[&Product]) -> Vec<u32> {
    products.iter().map(|product| product.id.0).collect()
}

fn sample_filters() -> Vec<ListingFilters> {
    let mut electronics = ListingFilters::new();
    electronics.select_category(Category::Electronics);

    let mut cheap = ListingFilters::new();
    cheap.set_price_range(PriceRange::dollars(0, 500));

    let mut good_in_melbourne = ListingFilters::new();
    good_in_melbourne.toggle_condition(Condition::Good);
    good_in_melbourne.toggle_location("Melbourne");

    let mut searched = ListingFilters::new();
    searched.set_search("professional");

    let mut nothing = ListingFilters::new();
    nothing.set_search("zzz-no-such-product");

    vec![
        ListingFilters::new(),
        electronics,
        cheap,
        good_in_melbourne,
        searched,
        nothing,
    ]
}

#[test]
fn electronics_newest_first() -> TestResult {
    let catalog = Catalog::demo()?;
    let mut filters = ListingFilters::new();
    filters.select_category(Category::Electronics);

    let results = compose(&catalog, &filters, SortOrder::Newest, TODAY);

    assert_eq!(ids(&results), vec![8, 1, 3]);

    Ok(())
}

#[test]
fn price_range_is_inclusive() -> TestResult {
    let catalog = Catalog::demo()?;
    let mut filters = ListingFilters::new();
    filters.set_price_range(PriceRange::dollars(0, 500));

    let results = compose(&catalog, &filters, SortOrder::Newest, TODAY);

    assert_eq!(ids(&results), vec![2, 4, 5]);

    filters.set_price_range(PriceRange::dollars(450, 350));
    let results = compose(&catalog, &filters, SortOrder::PriceLow, TODAY);

    assert_eq!(ids(&results), vec![2, 4]);

    Ok(())
}

#[test]
fn search_is_case_insensitive_and_trimmed() -> TestResult {
    let catalog = Catalog::demo()?;

    for query in ["camera", "CAMERA", "  Camera  "] {
        let mut filters = ListingFilters::new();
        filters.set_search(query);

        let results = compose(&catalog, &filters, SortOrder::Newest, TODAY);

        assert_eq!(ids(&results), vec![3], "query {query:?}");
    }

    Ok(())
}

#[test]
fn multi_select_groups_combine_with_or() -> TestResult {
    let catalog = Catalog::demo()?;
    let mut filters = ListingFilters::new();
    filters.toggle_condition(Condition::LikeNew);
    filters.toggle_condition(Condition::Excellent);

    let results = compose(&catalog, &filters, SortOrder::Newest, TODAY);

    assert_eq!(ids(&results), vec![8, 1, 3]);

    filters.toggle_location("Brisbane");
    filters.toggle_location("Sydney");

    let results = compose(&catalog, &filters, SortOrder::Newest, TODAY);

    assert_eq!(ids(&results), vec![3]);

    Ok(())
}

#[test]
fn date_buckets_relative_to_today() -> TestResult {
    let catalog = Catalog::demo()?;
    let today = date(2025, 5, 30);
    let mut filters = ListingFilters::new();

    filters.set_date_posted(DatePosted::Today);
    assert_eq!(
        ids(&compose(&catalog, &filters, SortOrder::Newest, today)),
        vec![8]
    );

    filters.set_date_posted(DatePosted::ThisWeek);
    assert_eq!(
        ids(&compose(&catalog, &filters, SortOrder::Newest, today)),
        vec![8, 1, 2, 3, 4, 5, 6]
    );

    filters.set_date_posted(DatePosted::ThisMonth);
    assert_eq!(compose(&catalog, &filters, SortOrder::Newest, today).len(), 8);

    Ok(())
}

#[test]
fn comparator_table_orders() -> TestResult {
    let catalog = Catalog::demo()?;
    let filters = ListingFilters::new();

    let expected = [
        (SortOrder::Newest, vec![8, 1, 2, 3, 4, 5, 6, 7]),
        (SortOrder::Oldest, vec![7, 6, 5, 4, 3, 2, 1, 8]),
        (SortOrder::PriceLow, vec![5, 2, 4, 7, 6, 8, 3, 1]),
        (SortOrder::PriceHigh, vec![1, 3, 8, 6, 7, 4, 2, 5]),
        (SortOrder::Popular, vec![8, 3, 1, 5, 6, 2, 7, 4]),
        (SortOrder::NameAz, vec![4, 3, 7, 2, 8, 1, 6, 5]),
        (SortOrder::NameZa, vec![5, 6, 1, 8, 2, 7, 3, 4]),
        (SortOrder::Rating, vec![2, 5, 8, 1, 6, 3, 7, 4]),
    ];

    for (sort, order) in expected {
        assert_eq!(ids(&compose(&catalog, &filters, sort, TODAY)), order, "{sort}");
    }

    Ok(())
}

#[test]
fn results_are_a_duplicate_free_subset() -> TestResult {
    let catalog = Catalog::demo()?;
    let all: FxHashSet<u32> = catalog.iter().map(|product| product.id.0).collect();

    for filters in sample_filters() {
        for sort in SortOrder::ALL {
            let results = ids(&compose(&catalog, &filters, sort, TODAY));
            let unique: FxHashSet<u32> = results.iter().copied().collect();

            assert_eq!(unique.len(), results.len());
            assert!(unique.is_subset(&all));
        }
    }

    Ok(())
}

#[test]
fn sort_order_never_changes_membership() -> TestResult {
    let catalog = Catalog::demo()?;

    for filters in sample_filters() {
        let baseline: FxHashSet<u32> = ids(&compose(&catalog, &filters, SortOrder::Newest, TODAY))
            .into_iter()
            .collect();

        for sort in SortOrder::ALL {
            let members: FxHashSet<u32> = ids(&compose(&catalog, &filters, sort, TODAY))
                .into_iter()
                .collect();

            assert_eq!(members, baseline, "{sort}");
        }
    }

    Ok(())
}

#[test]
fn compose_is_idempotent() -> TestResult {
    let catalog = Catalog::demo()?;

    for filters in sample_filters() {
        for sort in SortOrder::ALL {
            let first = ids(&compose(&catalog, &filters, sort, TODAY));
            let second = ids(&compose(&catalog, &filters, sort, TODAY));

            assert_eq!(first, second);
        }
    }

    Ok(())
}

#[test]
fn price_high_reverses_price_low_without_ties() -> TestResult {
    let catalog = Catalog::demo()?;
    let filters = ListingFilters::new();

    let mut low = ids(&compose(&catalog, &filters, SortOrder::PriceLow, TODAY));
    let high = ids(&compose(&catalog, &filters, SortOrder::PriceHigh, TODAY));

    low.reverse();

    assert_eq!(low, high);

    Ok(())
}

#[test]
fn empty_filters_return_the_full_catalog() -> TestResult {
    let catalog = Catalog::demo()?;
    let results = compose(&catalog, &ListingFilters::new(), SortOrder::default(), TODAY);

    assert_eq!(results.len(), catalog.len());

    Ok(())
}

#[test]
fn no_match_is_an_empty_list() -> TestResult {
    let catalog = Catalog::demo()?;
    let mut filters = ListingFilters::new();
    filters.set_search("zzz-no-such-product");

    assert!(compose(&catalog, &filters, SortOrder::Newest, TODAY).is_empty());

    Ok(())
}
