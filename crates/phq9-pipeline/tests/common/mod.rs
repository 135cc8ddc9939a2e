#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use phq9_core::models::{EntityId, EntityKey, Subject};
use phq9_host::{BoxFuture, EntityDirectory, HostContext, MemoryHost};
use phq9_pipeline::{Clock, Phq9Config};

/// Clock that only moves when told to.
pub struct ManualClock(Mutex<jiff::Timestamp>);

impl ManualClock {
    pub fn at(second: i64) -> Arc<Self> {
        Arc::new(Self(Mutex::new(
            jiff::Timestamp::from_second(second).expect("valid timestamp"),
        )))
    }

    pub fn advance(&self, seconds: i64) -> jiff::Timestamp {
        let mut now = self.0.lock().unwrap();
        *now = now
            .checked_add(jiff::SignedDuration::from_secs(seconds))
            .expect("timestamp in range");
        *now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> jiff::Timestamp {
        *self.0.lock().unwrap()
    }
}

/// Directory that never finds anything.
pub struct EmptyDirectory;

impl EntityDirectory for EmptyDirectory {
    fn resolve<'a>(&'a self, _key: &'a EntityKey) -> BoxFuture<'a, Option<EntityId>> {
        Box::pin(async { None })
    }
}

pub fn person(id: &str, name: &str) -> Subject {
    Subject::new(id, name).expect("valid subject")
}

pub fn host_with(people: Vec<Subject>) -> (Arc<MemoryHost>, HostContext) {
    let host = Arc::new(MemoryHost::with_people(people));
    let ctx = HostContext::new(host.clone());
    (host, ctx)
}

pub fn fast_config() -> Phq9Config {
    Phq9Config {
        retry_interval_secs: 1,
        max_attempts: 3,
        ..Phq9Config::default()
    }
}

pub fn id(entity_id: &str) -> EntityId {
    EntityId::new(entity_id)
}

/// Poll until `entity_id` holds `expected`. Meant for paused-clock tests,
/// where each sleep lets spawned sensor tasks run.
pub async fn wait_for_state(host: &MemoryHost, entity_id: &str, expected: &str) {
    let target = id(entity_id);
    for _ in 0..200 {
        if host.state(&target).as_deref() == Some(expected) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "{entity_id} never reached {expected:?}, last value {:?}",
        host.state(&target)
    );
}

/// Let spawned tasks drain their queues.
pub async fn settle() {
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
