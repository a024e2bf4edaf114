use job_board::catalog::sample_listings;
use job_board::filter::{facet, ListingFilter};
use job_board::ListFilter;

#[test]
fn test_search_and_department_narrow_to_one_fellowship() {
    let listings = sample_listings();
    assert_eq!(listings.len(), 9);

    let mut filter = ListingFilter {
        query: "Research".into(),
        department: "Computer Science".into(),
        ..Default::default()
    };

    let matched = filter.apply(&listings);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].title, "Junior Research Fellow (JRF)");

    filter.clear();
    let restored = filter.apply_cloned(&listings);
    assert_eq!(restored, listings);
    let ids: Vec<i64> = restored.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_query_alone_matches_title_or_department() {
    let listings = sample_listings();
    let filter = ListingFilter {
        query: "research".into(),
        ..Default::default()
    };
    let ids: Vec<i64> = filter.apply(&listings).iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 4, 7]);

    let by_department = ListingFilter {
        query: "SCIENCE".into(),
        ..Default::default()
    };
    let ids: Vec<i64> = by_department.apply(&listings).iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 9]);
}

#[test]
fn test_selectors_offered_for_the_catalog() {
    let listings = sample_listings();
    assert_eq!(facet(&listings, |l| l.job_type.as_str()), vec!["Full-time", "Part-time"]);
    assert_eq!(facet(&listings, |l| l.department.as_str()).len(), 8);
}
