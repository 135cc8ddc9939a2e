use tokio::sync::mpsc;

use phq9_core::models::{EntityDescriptor, EntityId, EntityKey, Platform, Subject, SubjectId};
use phq9_host::{
    EntityDirectory, EntityPlatform, IdentityEvent, IdentityProvider, MemoryHost, StateChanged,
    StateStore,
};

fn select(unique_id: &str, object_id: &str, initial: Option<&str>) -> EntityDescriptor {
    EntityDescriptor {
        key: EntityKey {
            platform: Platform::Select,
            unique_id: unique_id.to_string(),
        },
        object_id: object_id.to_string(),
        name: object_id.to_string(),
        options: vec!["a".to_string(), "b".to_string()],
        initial_state: initial.map(str::to_string),
        attributes: Default::default(),
    }
}

#[tokio::test]
async fn registered_entities_resolve_by_key() {
    let host = MemoryHost::new();
    let ids = host
        .add_entities(vec![select("phq9_1_1", "phq9_1_q1", Some("a"))])
        .await
        .unwrap();
    assert_eq!(ids, vec![EntityId::new("select.phq9_1_q1")]);

    let key = EntityKey {
        platform: Platform::Select,
        unique_id: "phq9_1_1".to_string(),
    };
    assert_eq!(host.resolve(&key).await, Some(ids[0].clone()));
    assert_eq!(host.get(&ids[0]).await.as_deref(), Some("a"));

    let missing = EntityKey {
        platform: Platform::Sensor,
        unique_id: "phq9_1_1".to_string(),
    };
    assert_eq!(host.resolve(&missing).await, None);
}

#[tokio::test]
async fn duplicate_keys_are_rejected() {
    let host = MemoryHost::new();
    host.add_entities(vec![select("k", "obj", None)]).await.unwrap();
    assert!(host.add_entities(vec![select("k", "other", None)]).await.is_err());
}

#[tokio::test]
async fn colliding_object_ids_get_a_suffix() {
    let host = MemoryHost::new();
    let ids = host
        .add_entities(vec![select("k1", "obj", None), select("k2", "obj", None)])
        .await
        .unwrap();
    assert_eq!(ids[1], EntityId::new("select.obj_2"));
}

#[tokio::test]
async fn subscribers_receive_old_and_new() {
    let host = MemoryHost::new();
    let ids = host
        .add_entities(vec![select("k", "obj", Some("a"))])
        .await
        .unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _sub = host.subscribe(&ids, tx);

    host.set(&ids[0], Some("b".to_string())).await.unwrap();
    assert_eq!(
        rx.recv().await,
        Some(StateChanged {
            entity_id: ids[0].clone(),
            old: Some("a".to_string()),
            new: Some("b".to_string()),
        })
    );
}

#[tokio::test]
async fn unchanged_values_do_not_notify() {
    let host = MemoryHost::new();
    let ids = host
        .add_entities(vec![select("k", "obj", Some("a"))])
        .await
        .unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _sub = host.subscribe(&ids, tx);

    host.set(&ids[0], Some("a".to_string())).await.unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn unsubscribe_is_idempotent_and_stops_delivery() {
    let host = MemoryHost::new();
    let ids = host
        .add_entities(vec![select("k", "obj", Some("a"))])
        .await
        .unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut sub = host.subscribe(&ids, tx);
    assert_eq!(host.subscriber_count(), 1);

    sub.unsubscribe();
    sub.unsubscribe();
    assert!(!sub.is_active());
    assert_eq!(host.subscriber_count(), 0);

    host.set(&ids[0], Some("b".to_string())).await.unwrap();
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn removal_reports_missing_new_value() {
    let host = MemoryHost::new();
    let ids = host
        .add_entities(vec![select("k", "obj", Some("a"))])
        .await
        .unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _sub = host.subscribe(&ids, tx);

    host.remove_entities(&ids).await.unwrap();
    let change = rx.recv().await.unwrap();
    assert_eq!(change.new, None);
    assert!(!change.is_transition());
    assert_eq!(host.entity_count(), 0);
    assert!(host.set(&ids[0], Some("b".to_string())).await.is_err());
}

#[tokio::test]
async fn person_changes_are_announced() {
    let host = MemoryHost::new();
    let mut events = host.events();

    host.add_person(Subject::new("1234", "test").unwrap());
    let id = SubjectId::new("1234").unwrap();
    assert_eq!(events.recv().await.unwrap(), IdentityEvent::Created(id.clone()));
    assert_eq!(host.subjects().await.len(), 1);

    host.remove_person(&id);
    assert_eq!(events.recv().await.unwrap(), IdentityEvent::Removed(id));
    assert!(host.subjects().await.is_empty());
}

#[test]
fn transitions_need_both_sides() {
    let change = |old: Option<&str>, new: Option<&str>| StateChanged {
        entity_id: EntityId::new("select.x"),
        old: old.map(str::to_string),
        new: new.map(str::to_string),
    };
    assert!(change(Some("a"), Some("b")).is_transition());
    assert!(!change(Some("a"), Some("a")).is_transition());
    assert!(!change(None, Some("a")).is_transition());
    assert!(!change(Some("a"), None).is_transition());
}
