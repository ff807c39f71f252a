use quiz_core::model::AggregateStats;
use quiz_core::time::fixed_now;
use storage::repository::{KeyValueStore, StatsRecord};
use storage::sqlite::SqliteStore;

#[tokio::test]
async fn sqlite_roundtrip_persists_scalar_keys() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    assert_eq!(store.get("games_count").await.unwrap(), None);

    store.set("games_count", "3").await.unwrap();
    assert_eq!(store.get("games_count").await.unwrap().as_deref(), Some("3"));

    // overwrite wins
    store.set("games_count", "4").await.unwrap();
    assert_eq!(store.get("games_count").await.unwrap().as_deref(), Some("4"));
}

#[tokio::test]
async fn sqlite_roundtrip_persists_aggregate_stats() {
    let store = SqliteStore::connect("sqlite:file:memdb_stats_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    let mut stats = AggregateStats::new();
    stats.record(7, 1, fixed_now());
    stats.record(9, 1, fixed_now());

    StatsRecord::from_stats(&stats)
        .write_to(&store)
        .await
        .expect("write");
    let reloaded = StatsRecord::read_from(&store)
        .await
        .expect("read")
        .into_stats();

    assert_eq!(reloaded.games_played(), 2);
    assert_eq!(reloaded.cumulative_correct(), 16);
    assert_eq!(reloaded.best_game().unwrap().correct(), 9);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let store = SqliteStore::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("first migrate");
    store.migrate().await.expect("second migrate");
}
