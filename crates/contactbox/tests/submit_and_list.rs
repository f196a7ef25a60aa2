//! Submit forms and list them back through the public API.

use std::time::Instant;

use contactbox::config::FormConfig;
use contactbox::record::{INTERES, NOMBRE};
use contactbox::{
    escape, recompute, render_list, Config, Form, ListingView, Record, RecordStore, SortMode,
    Storage, SubmissionHandler,
};

fn create_store() -> RecordStore {
    RecordStore::new(Storage::open_in_memory().unwrap(), "iglesia_contacto_data")
}

fn submit(store: &RecordStore, fields: &[(&str, &str)]) {
    let mut handler = SubmissionHandler::new(store, &FormConfig::default());
    let mut form = Form::new();
    for (name, value) in fields {
        form.set(*name, *value);
    }
    handler.submit(&mut form, Instant::now());
}

fn names(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.nombre().unwrap_or_default()).collect()
}

#[test]
fn test_submit_then_list_scenario() {
    let store = create_store();
    submit(&store, &[(NOMBRE, "Ana"), (INTERES, "retiros")]);
    submit(&store, &[(NOMBRE, "Bob"), (INTERES, "misa")]);

    let mut view = ListingView::open(&store);
    assert_eq!(names(&view.visible()), vec!["Ana", "Bob"]);
    assert_eq!(names(&view.set_filter("misa")), vec!["Bob"]);
    view.set_filter("");
    assert_eq!(names(&view.sort_by(SortMode::Name)), vec!["Ana", "Bob"]);

    submit(&store, &[(NOMBRE, "Al")]);

    // the open view keeps its snapshot
    assert_eq!(names(&view.visible()), vec!["Ana", "Bob"]);

    let mut reopened = ListingView::open(&store);
    assert_eq!(
        names(&reopened.sort_by(SortMode::Name)),
        vec!["Al", "Ana", "Bob"]
    );
}

#[test]
fn test_each_submission_appends() {
    let store = create_store();
    let mut previous = store.load();
    for name in ["Zoe", "", "Ana", "Zoe"] {
        submit(&store, &[(NOMBRE, name)]);
        let current = store.load();
        assert_eq!(current.len(), previous.len() + 1);
        assert_eq!(&current[..previous.len()], previous.as_slice());
        assert_eq!(current.last().unwrap().nombre(), Some(name));
        previous = current;
    }
}

#[test]
fn test_corrupted_store_lists_empty() {
    let store = create_store();
    store
        .storage()
        .set_item(store.key(), "[{\"nombre\": \"Ana\"")
        .unwrap();

    let view = ListingView::open(&store);
    assert!(view.visible().is_empty());
    let html = view.render(&Config::default().display).into_string();
    assert!(html.contains("No hay datos disponibles."));
}

#[test]
fn test_rendered_fields_are_escaped() {
    let store = create_store();
    submit(&store, &[(NOMBRE, "<b>x</b>")]);

    let records = recompute(&store.load(), "", None);
    let html = render_list(&records, &Config::default().display).into_string();
    assert!(html.contains(&escape("<b>x</b>")));
    assert!(!html.contains("<b>x</b>"));
}

#[test]
fn test_store_opened_from_config() {
    let mut config = Config::default();
    let path = std::env::temp_dir().join(format!(
        "contactbox_it_{}/contactbox.db",
        std::process::id()
    ));
    config.storage.database_path = Some(path.clone());
    config.storage.key = "custom_slot".to_string();

    {
        let store = RecordStore::open(&config).unwrap();
        submit(&store, &[(NOMBRE, "Ana")]);
        assert_eq!(store.key(), "custom_slot");
    }

    let store = RecordStore::open(&config).unwrap();
    assert_eq!(names(&store.load()), vec!["Ana"]);
    assert!(store.storage().get_item("iglesia_contacto_data").unwrap().is_none());

    drop(store);
    if let Some(parent) = path.parent() {
        let _ = std::fs::remove_dir_all(parent);
    }
}
