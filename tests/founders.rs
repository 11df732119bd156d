use probing_map::{MapError, ProbingMap};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const FOUNDERS: [(&str, &str); 5] = [
    ("Facebook", "Zuckerberg"),
    ("KPCB", "Kleiner"),
    ("Google", "Brin"),
    ("Microsoft", "Gates"),
    ("Snapchat", "Spiegel"),
];

fn founders_map() -> ProbingMap<&'static str> {
    let mut map = ProbingMap::with_capacity(5).unwrap();
    for (count, (company, founder)) in FOUNDERS.into_iter().enumerate() {
        assert_eq!(map.set(company, founder), Ok(None));
        assert_eq!(map.len(), count + 1);
    }
    map
}

#[test]
fn fills_to_full_load() {
    init_logger();
    let mut map = founders_map();
    assert!((map.load() - 1.0).abs() < f64::EPSILON);
    assert_eq!(map.set("Twitter", "Dorsey"), Err(MapError::CapacityExhausted { capacity: 5 }));
    assert_eq!(map.len(), 5);
    assert!(!map.contains("Twitter"));
}

#[test]
fn overwrite_keeps_count() {
    init_logger();
    let mut map = founders_map();
    assert_eq!(map.set("Google", "Page"), Ok(Some("Brin")));
    assert_eq!(map.len(), 5);
    assert_eq!(map.get("Google"), Some(&"Page"));
}

#[test]
fn contains_matches_keys_only() {
    init_logger();
    let map = founders_map();
    let found: Vec<bool> = ["KPCB", "Google", "Microsoft", "Gates", "Facebook", "Zuckerberg", "A random dude", "Snapchat"]
        .into_iter()
        .map(|key| map.contains(key))
        .collect();
    assert_eq!(found, vec![true, true, true, false, true, false, false, true]);
}

#[test]
fn get_returns_stored_values() {
    init_logger();
    let mut map = founders_map();
    map.set("Google", "Page").unwrap();
    assert_eq!(map.get("KPCB"), Some(&"Kleiner"));
    assert_eq!(map.get("Facebook"), Some(&"Zuckerberg"));
    assert_eq!(map.get("Google"), Some(&"Page"));
    assert_eq!(map.get("Gates"), None);
    assert_eq!(map.get("Twitter"), None);
}

#[test]
fn delete_leaves_other_entries_reachable() {
    init_logger();
    let mut map = founders_map();
    map.set("Google", "Page").unwrap();

    assert_eq!(map.delete("Facebook"), Some("Zuckerberg"));
    assert!(!map.contains("Facebook"));
    assert_eq!(map.get("Facebook"), None);
    assert_eq!(map.get("Google"), Some(&"Page"));
    assert_eq!(map.len(), 4);

    let expected = [("KPCB", "Kleiner"), ("Google", "Page"), ("Microsoft", "Gates"), ("Snapchat", "Spiegel")];
    for (position, (company, founder)) in expected.into_iter().enumerate() {
        assert_eq!(map.delete(company), Some(founder));
        assert!(!map.contains(company));
        assert_eq!(map.len(), 3 - position);
        for (later, founder) in expected.into_iter().skip(position + 1) {
            assert_eq!(map.get(later), Some(&founder));
        }
    }

    assert!(map.is_empty());
    assert!(map.load().abs() < f64::EPSILON);
    assert_eq!(map.delete("Google"), None);
    map.teardown();
}
