//! On-disk cache behavior.

use std::fs;

use er_cache::{CacheKey, CacheStatus, ResultCache};
use er_core::{MatchOptions, Matcher, ResultTable};
use tempfile::TempDir;

const SOURCE: [&str; 2] = ["appel", "orange"];
const TARGET: [&str; 3] = ["apple", "orage", "banana"];

fn resolve(options: MatchOptions) -> er_core::Result<ResultTable> {
    Matcher::new(options)?.resolve(&SOURCE, &TARGET)
}

#[test]
fn test_entries_survive_a_new_cache() {
    let dir = TempDir::new().unwrap();
    let options = MatchOptions::default();
    let key = CacheKey::new(&SOURCE, &TARGET, &options);

    let mut first = ResultCache::with_dir(dir.path()).unwrap();
    let (table, status) = first
        .get_or_compute(key.clone(), || resolve(options))
        .unwrap();
    assert_eq!(status, CacheStatus::Miss);
    assert!(dir.path().join(key.file_name()).exists());

    let mut second = ResultCache::with_dir(dir.path()).unwrap();
    assert!(second.is_empty());
    let (cached, status) = second
        .get_or_compute(key, || -> er_core::Result<ResultTable> {
            panic!("should be served from disk")
        })
        .unwrap();
    assert_eq!(status, CacheStatus::Hit);
    assert_eq!(cached, table);
}

#[test]
fn test_corrupt_entry_is_a_miss() {
    let dir = TempDir::new().unwrap();
    let options = MatchOptions::default().with_k(1);
    let key = CacheKey::new(&SOURCE, &TARGET, &options);
    fs::write(dir.path().join(key.file_name()), b"{ not json").unwrap();

    let mut cache = ResultCache::with_dir(dir.path()).unwrap();
    assert!(cache.get(&key).is_none());

    let (table, status) = cache.get_or_compute(key.clone(), || resolve(options)).unwrap();
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(table.k, 1);

    // The recomputed entry replaced the corrupt file.
    let mut fresh = ResultCache::with_dir(dir.path()).unwrap();
    assert_eq!(fresh.get(&key), Some(table));
}

#[test]
fn test_different_options_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let mut cache = ResultCache::with_dir(dir.path()).unwrap();

    for k in [1, 2] {
        let options = MatchOptions::default().with_k(k);
        let key = CacheKey::new(&SOURCE, &TARGET, &options);
        let (table, status) = cache.get_or_compute(key, || resolve(options)).unwrap();
        assert_eq!(status, CacheStatus::Miss);
        assert!(table.iter().all(|r| r.len() == k));
    }
    assert_eq!(cache.len(), 2);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_failed_write_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let options = MatchOptions::default();
    let key = CacheKey::new(&SOURCE, &TARGET, &options);
    let entry_path = dir.path().join(key.file_name());
    // A directory in the entry's place makes the final rename fail.
    fs::create_dir(&entry_path).unwrap();

    let mut cache = ResultCache::with_dir(dir.path()).unwrap();
    let table = resolve(options).unwrap();
    assert!(cache.insert(key.clone(), table.clone()).is_err());
    assert!(!entry_path.with_extension("json.tmp").exists());
    assert!(cache.is_empty());

    let (got, status) = cache.get_or_compute(key, || resolve(options)).unwrap();
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(got, table);
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}
