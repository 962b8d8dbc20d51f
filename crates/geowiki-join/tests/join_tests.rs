use tokio::sync::mpsc;

use geowiki_core::{GeoEntity, RankedGeo, RankedPage};
use geowiki_join::{rank, JoinIndex, MatchOutcome, Matcher};

fn entity(id: i64, wiki: &str) -> GeoEntity {
    GeoEntity {
        id,
        name: format!("place {id}"),
        wiki: wiki.to_string(),
        aliases: vec![],
        latitude: 0.0,
        longitude: 0.0,
        country_code: "FR".to_string(),
        feature_code: "PPLC".to_string(),
        population: 0,
    }
}

fn page(title: &str, order: i64) -> RankedPage {
    RankedPage { title: title.to_string(), rank: 1.0 / (order + 1) as f64, order, page_id: order }
}

fn index_of(wikis: &[&str]) -> JoinIndex {
    let mut index = JoinIndex::new();
    for (i, wiki) in wikis.iter().enumerate() {
        index.insert(entity(i as i64 + 1, wiki));
    }
    index
}

#[test]
fn lookup_normalizes_both_sides() {
    let index = index_of(&["New York", "Portland, Oregon"]);
    assert!(index.lookup("New_York").is_some());
    assert!(index.lookup("New York").is_some());
    assert!(index.lookup("Portland%2C_Oregon").is_some());
    assert!(index.lookup("Portland, Oregon").is_some());
    assert!(index.lookup("new york").is_none(), "matching is case-sensitive");
}

#[test]
fn duplicate_keys_resolve_to_last_registered_entity() {
    let mut index = JoinIndex::new();
    let first = index.insert(entity(1, "Paris"));
    let second = index.insert(entity(2, "Paris"));

    assert_eq!(index.len(), 2, "both entities keep a slot");
    assert_eq!(index.key_count(), 1);
    assert_eq!(index.lookup("Paris"), Some(second));
    assert_ne!(index.lookup("Paris"), Some(first));

    let mut matcher = Matcher::new(index, 0);
    assert_eq!(matcher.offer(page("Paris", 4)), MatchOutcome::Attached(second));
    let slots = matcher.index();
    assert!(!slots.get(first).unwrap().is_ranked());
    assert_eq!(slots.get(second).unwrap().entity().id, 2);
    assert_eq!(slots.get(second).unwrap().order(), Some(4));
}

#[test]
fn keys_differing_only_in_spaces_collide() {
    let mut index = JoinIndex::new();
    index.insert(entity(1, "Paris Texas"));
    let second = index.insert(entity(2, "Paris_Texas"));
    assert_eq!(index.key_count(), 1);
    assert_eq!(index.lookup("Paris Texas"), Some(second));
}

#[test]
fn matcher_counts_found_and_missing() {
    let mut matcher = Matcher::new(index_of(&["New York", "Boston"]), 50);
    assert!(matches!(matcher.offer(page("New York", 1)), MatchOutcome::Attached(_)));
    assert_eq!(matcher.offer(page("Chicago", 2)), MatchOutcome::Missing);

    let stats = matcher.stats();
    assert_eq!((stats.found, stats.missing), (1, 1));
}

#[test]
fn second_page_for_same_slot_keeps_first() {
    let mut matcher = Matcher::new(index_of(&["Rome"]), 50);
    let slot = match matcher.offer(page("Rome", 9)) {
        MatchOutcome::Attached(slot) => slot,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(matcher.offer(page("Rome", 2)), MatchOutcome::AlreadyRanked(slot));

    assert_eq!(matcher.index().get(slot).unwrap().order(), Some(9));
    let stats = matcher.stats();
    assert_eq!(stats.found, 2);
    assert_eq!(stats.duplicate_hits, 1);
    assert_eq!(stats.total(), 2);
}

#[test]
fn duplicate_hits_past_the_log_sample_are_still_counted() {
    let mut matcher = Matcher::new(index_of(&["Rome"]), 1);
    matcher.offer(page("Rome", 1));
    for order in 2..10 {
        assert!(matches!(matcher.offer(page("Rome", order)), MatchOutcome::AlreadyRanked(_)));
    }
    let stats = matcher.stats();
    assert_eq!((stats.found, stats.duplicate_hits, stats.missing), (9, 8, 0));
}

#[test]
fn counters_are_conserved_past_the_log_sample() {
    let wikis: Vec<String> = (0..80).map(|i| format!("Town {i}")).collect();
    let refs: Vec<&str> = wikis.iter().map(String::as_str).collect();
    let mut matcher = Matcher::new(index_of(&refs), 50);

    let mut offered = 0;
    for i in 0..200 {
        matcher.offer(page(&format!("Town {}", i * 2), i));
        offered += 1;
    }
    let stats = matcher.stats();
    assert_eq!(stats.total(), offered);
    assert_eq!(stats.found, 40);
}

#[test]
fn ranked_slots_sort_before_unranked_and_by_order() {
    let mut matcher = Matcher::new(index_of(&["A", "B", "C", "D", "E"]), 0);
    matcher.offer(page("D", 30));
    matcher.offer(page("B", 10));
    matcher.offer(page("E", 20));

    let (index, _) = matcher.into_parts();
    let mut slots = index.into_slots();
    rank(&mut slots);

    let orders: Vec<Option<i64>> = slots.iter().map(RankedGeo::order).collect();
    assert_eq!(&orders[..3], &[Some(10), Some(20), Some(30)]);
    assert!(orders[3..].iter().all(Option::is_none));
    assert_eq!(slots[0].entity().wiki, "B");
}

#[test]
fn equal_orders_stay_ahead_of_unranked() {
    let mut matcher = Matcher::new(index_of(&["X", "Y", "Z"]), 0);
    matcher.offer(page("Z", 5));
    matcher.offer(page("X", 5));

    let mut slots = matcher.into_parts().0.into_slots();
    rank(&mut slots);
    assert_eq!(slots[0].order(), Some(5));
    assert_eq!(slots[1].order(), Some(5));
    assert_eq!(slots[2].entity().wiki, "Y");
}

#[tokio::test]
async fn build_then_run_over_queues() {
    let (geo_tx, geo_rx) = mpsc::channel(2);
    let producer = tokio::spawn(async move {
        for (i, wiki) in ["New York", "Boston", "Paris", "Paris"].iter().enumerate() {
            geo_tx.send(entity(i as i64 + 1, wiki)).await.unwrap();
        }
    });
    let index = JoinIndex::build(geo_rx, 50).await;
    producer.await.unwrap();
    assert_eq!(index.len(), 4);
    assert_eq!(index.key_count(), 3);

    let (page_tx, page_rx) = mpsc::channel(1);
    let producer = tokio::spawn(async move {
        for p in [page("New York", 1), page("Chicago", 2), page("Paris", 3)] {
            page_tx.send(p).await.unwrap();
        }
    });
    let (index, stats) = Matcher::new(index, 50).run(page_rx).await;
    producer.await.unwrap();

    assert_eq!((stats.found, stats.missing), (2, 1));
    let ranked: Vec<i64> = index.into_slots().iter().filter(|s| s.is_ranked()).map(|s| s.entity().id).collect();
    assert_eq!(ranked, vec![1, 4], "later Paris entity takes the page");
}
