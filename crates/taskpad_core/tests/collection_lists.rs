use std::sync::{Arc, Mutex};

use taskpad_core::db::open_db_in_memory;
use taskpad_core::{LogList, SlotKey, SlotRepository, SqliteSlotRepository, TaskList};

#[test]
fn absent_slots_load_as_empty_collections() {
    let repo = memory_repo();

    let tasks = TaskList::load(repo.clone()).unwrap();
    let logs = LogList::load(repo.clone()).unwrap();

    assert!(tasks.is_empty());
    assert!(logs.is_empty());
    // Loading alone writes nothing.
    assert_eq!(repo.read_slot(SlotKey::Tasks).unwrap(), None);
    assert_eq!(repo.read_slot(SlotKey::Logs).unwrap(), None);
}

#[test]
fn add_persists_a_bare_json_array() {
    let repo = memory_repo();
    let mut tasks = TaskList::load(repo.clone()).unwrap();

    tasks.add("a").unwrap();
    tasks.add("b").unwrap();

    let payload = repo.read_slot(SlotKey::Tasks).unwrap().unwrap();
    assert_eq!(payload, r#"["a","b"]"#);
}

#[test]
fn reload_observes_prior_mutations() {
    let repo = memory_repo();
    let mut tasks = TaskList::load(repo.clone()).unwrap();
    tasks.add("first").unwrap();
    tasks.add("second").unwrap();

    let reloaded = TaskList::load(repo).unwrap();
    assert_eq!(reloaded.items(), ["first", "second"]);
}

#[test]
fn remove_drops_every_equal_element() {
    let repo = memory_repo();
    let mut tasks = TaskList::load(repo.clone()).unwrap();
    tasks.add("a").unwrap();
    tasks.add("b").unwrap();
    tasks.add("a").unwrap();

    let removed = tasks.remove("a").unwrap();

    assert_eq!(removed, 2);
    assert_eq!(tasks.items(), ["b"]);
    let reloaded = TaskList::load(repo).unwrap();
    assert_eq!(reloaded.items(), ["b"]);
}

#[test]
fn remove_of_absent_value_still_broadcasts() {
    let repo = memory_repo();
    let mut tasks = TaskList::load(repo).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    tasks.on_removed(move |task| sink.lock().unwrap().push(task.to_owned()));

    let removed = tasks.remove("ghost").unwrap();

    assert_eq!(removed, 0);
    assert_eq!(*seen.lock().unwrap(), ["ghost"]);
}

#[test]
fn added_broadcast_carries_the_new_task() {
    let repo = memory_repo();
    let mut tasks = TaskList::load(repo).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    tasks.on_added(move |task| sink.lock().unwrap().push(task.to_owned()));

    tasks.add("x").unwrap();
    tasks.add("y").unwrap();

    assert_eq!(*seen.lock().unwrap(), ["x", "y"]);
}

#[test]
fn corrupt_payload_is_discarded_on_load() {
    let repo = memory_repo();
    repo.write_slot(SlotKey::Tasks, "{definitely not an array")
        .unwrap();

    let tasks = TaskList::load(repo.clone()).unwrap();

    assert!(tasks.is_empty());
    assert_eq!(
        repo.read_slot(SlotKey::Tasks).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn collections_store_text_verbatim() {
    let repo = memory_repo();
    let mut tasks = TaskList::load(repo.clone()).unwrap();
    tasks.add("  padded  ").unwrap();
    tasks.add("say \"hi\"").unwrap();
    tasks.add("emoji \u{1f680}").unwrap();

    let reloaded = TaskList::load(repo).unwrap();
    assert_eq!(
        reloaded.items(),
        ["  padded  ", "say \"hi\"", "emoji \u{1f680}"]
    );
}

#[test]
fn log_mutations_never_touch_the_task_slot() {
    let repo = memory_repo();
    let mut tasks = TaskList::load(repo.clone()).unwrap();
    let mut logs = LogList::load(repo.clone()).unwrap();
    tasks.add("a").unwrap();
    logs.add("entry one").unwrap();
    logs.add("entry one").unwrap();

    let removed = logs.remove("entry one").unwrap();

    assert_eq!(removed, 2);
    assert!(logs.is_empty());
    let reloaded_tasks = TaskList::load(repo).unwrap();
    assert_eq!(reloaded_tasks.items(), ["a"]);
}

fn memory_repo() -> SqliteSlotRepository {
    let conn = open_db_in_memory().unwrap();
    SqliteSlotRepository::try_new(Arc::new(Mutex::new(conn))).unwrap()
}
