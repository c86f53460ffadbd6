use taskpad_core::store::todo::TODOS_KEY;
use taskpad_core::{MemoryStorage, Storage, StoreError, TodoStore};

fn store_with(texts: &[&str]) -> TodoStore<MemoryStorage> {
    let mut store = TodoStore::load(MemoryStorage::new()).unwrap();
    for text in texts {
        store.add(text).unwrap();
    }
    store
}

fn id_of(store: &TodoStore<MemoryStorage>, text: &str) -> i64 {
    store
        .tasks()
        .iter()
        .find(|task| task.text == text)
        .map(|task| task.id)
        .expect("task should exist")
}

#[test]
fn add_prepends_newest_first() {
    let store = store_with(&["a", "b"]);

    let texts: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["b", "a"]);
    assert!(store.tasks().iter().all(|t| !t.completed && !t.deleted));
}

#[test]
fn add_changes_length_iff_trimmed_text_is_nonempty() {
    let mut store = store_with(&[]);

    let err = store.add("   ").unwrap_err();
    assert!(matches!(err, StoreError::EmptyText));
    assert!(store.tasks().is_empty());

    store.add("  real  ").unwrap();
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn add_stores_raw_untrimmed_text() {
    let mut store = store_with(&[]);
    store.add("  padded  ").unwrap();

    // Emptiness is checked on the trimmed value, but the stored text keeps
    // its whitespace.
    assert_eq!(store.tasks()[0].text, "  padded  ");
}

#[test]
fn toggle_affects_only_the_matching_task() {
    let mut store = store_with(&["a", "b"]);
    let a = id_of(&store, "a");

    store.toggle(a).unwrap();

    assert!(store.tasks().iter().find(|t| t.id == a).unwrap().completed);
    assert!(!store.tasks().iter().find(|t| t.text == "b").unwrap().completed);
}

#[test]
fn toggle_unknown_id_is_rejected_without_mutation() {
    let mut store = store_with(&["a"]);
    let before = store.tasks().to_vec();

    let err = store.toggle(999).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(999)));
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn toggle_is_suppressed_for_deleted_tasks() {
    let mut store = store_with(&["a"]);
    let a = id_of(&store, "a");
    store.soft_delete(a).unwrap();

    let err = store.toggle(a).unwrap_err();
    assert!(matches!(err, StoreError::TaskDeleted(id) if id == a));
    assert!(!store.tasks()[0].completed);
}

#[test]
fn soft_delete_is_idempotent() {
    let mut store = store_with(&["a", "b"]);
    let a = id_of(&store, "a");

    store.soft_delete(a).unwrap();
    let after_once = store.tasks().to_vec();

    store.soft_delete(a).unwrap();
    assert_eq!(store.tasks(), after_once.as_slice());
    assert_eq!(store.tasks().len(), 2, "soft delete never removes records");
}

#[test]
fn visible_order_puts_deleted_before_live() {
    let mut store = store_with(&["a", "b", "c"]);
    let b = id_of(&store, "b");
    store.soft_delete(b).unwrap();
    store.toggle(id_of(&store, "c")).unwrap();

    let order: Vec<(&str, bool)> = store
        .visible_order()
        .iter()
        .map(|t| (t.text.as_str(), t.deleted))
        .collect();
    assert_eq!(order, [("b", true), ("c", false), ("a", false)]);

    // Holds after any further sequence of operations.
    store.soft_delete(id_of(&store, "a")).unwrap();
    let flags: Vec<bool> = store.visible_order().iter().map(|t| t.deleted).collect();
    let first_live = flags.iter().position(|deleted| !deleted).unwrap_or(flags.len());
    assert!(flags[..first_live].iter().all(|&deleted| deleted));
    assert!(flags[first_live..].iter().all(|&deleted| !deleted));
}

#[test]
fn edit_flow_overwrites_text_with_raw_buffer() {
    let mut store = store_with(&["draft"]);
    let id = id_of(&store, "draft");

    store.start_edit(id).unwrap();
    assert_eq!(store.editing_id(), Some(id));
    assert_eq!(store.edit_text(), Some("draft"));

    store.set_edit_text("  final  ");
    store.save_edit().unwrap();

    assert_eq!(store.tasks()[0].text, "  final  ");
    assert_eq!(store.editing_id(), None);
}

#[test]
fn save_edit_with_blank_buffer_keeps_text_and_clears_edit_state() {
    let mut store = store_with(&["keep me"]);
    let id = id_of(&store, "keep me");

    store.start_edit(id).unwrap();
    store.set_edit_text("   ");
    let err = store.save_edit().unwrap_err();

    assert!(matches!(err, StoreError::EmptyText));
    assert_eq!(store.tasks()[0].text, "keep me");
    assert_eq!(store.editing_id(), None, "edit state clears either way");
}

#[test]
fn starting_a_second_edit_abandons_the_first_buffer() {
    let mut store = store_with(&["a", "b"]);
    let a = id_of(&store, "a");
    let b = id_of(&store, "b");

    store.start_edit(a).unwrap();
    store.set_edit_text("a rewritten");

    store.start_edit(b).unwrap();
    store.set_edit_text("b rewritten");
    store.save_edit().unwrap();

    assert_eq!(store.tasks().iter().find(|t| t.id == a).unwrap().text, "a");
    assert_eq!(
        store.tasks().iter().find(|t| t.id == b).unwrap().text,
        "b rewritten"
    );
}

#[test]
fn cancel_edit_discards_buffer_without_mutation() {
    let mut store = store_with(&["untouched"]);
    let id = id_of(&store, "untouched");

    store.start_edit(id).unwrap();
    store.set_edit_text("would-be change");
    store.cancel_edit();

    assert_eq!(store.editing_id(), None);
    assert_eq!(store.tasks()[0].text, "untouched");
    assert!(matches!(
        store.save_edit().unwrap_err(),
        StoreError::NoActiveEdit
    ));
}

#[test]
fn save_edit_applies_to_deleted_tasks() {
    // Tombstoned records freeze completion, not text: the model matches the
    // original app, where save is unconditional of deleted state.
    let mut store = store_with(&["doomed"]);
    let id = id_of(&store, "doomed");

    store.start_edit(id).unwrap();
    store.soft_delete(id).unwrap();
    store.set_edit_text("edited after delete");
    store.save_edit().unwrap();

    assert_eq!(store.tasks()[0].text, "edited after delete");
    assert!(store.tasks()[0].deleted);
}

#[test]
fn every_mutation_mirrors_full_state_to_storage() {
    let mut store = store_with(&["a"]);
    let a = id_of(&store, "a");
    store.toggle(a).unwrap();

    let storage = store.into_storage();
    let blob = storage.load(TODOS_KEY).unwrap().expect("blob saved");
    assert!(blob.contains("\"completed\":true"));
}

#[test]
fn save_then_load_reproduces_an_equal_collection() {
    let mut store = store_with(&["a", "b", "c"]);
    store.toggle(id_of(&store, "b")).unwrap();
    store.soft_delete(id_of(&store, "c")).unwrap();
    let expected = store.tasks().to_vec();

    let reloaded = TodoStore::load(store.into_storage()).unwrap();
    assert_eq!(reloaded.tasks(), expected.as_slice());
}

#[test]
fn load_treats_absent_and_malformed_blobs_as_empty() {
    let empty = TodoStore::load(MemoryStorage::new()).unwrap();
    assert!(empty.tasks().is_empty());

    let malformed = MemoryStorage::with_entry(TODOS_KEY, "][ not json");
    let recovered = TodoStore::load(malformed).unwrap();
    assert!(recovered.tasks().is_empty());
}

#[test]
fn ids_stay_unique_after_reload() {
    let mut store = store_with(&["persisted"]);
    let existing = store.tasks()[0].id;

    let mut reloaded = TodoStore::load(store.into_storage()).unwrap();
    reloaded.add("fresh").unwrap();

    let fresh = id_of(&reloaded, "fresh");
    assert_ne!(fresh, existing);
    assert!(fresh > existing, "new ids never reuse loaded ones");
}
