//! Optimistic mutation and reconciliation against the remote proxy.
//!
//! Mutations apply to the local store first so views update immediately, then
//! run against the proxy. A failed remote call restores the pre-mutation
//! snapshot. A successful save is followed by an authoritative re-fetch; the
//! server collection always wins on reload. A successful delete stands as-is
//! with no re-fetch.

use std::sync::MutexGuard;

use tokio::sync::watch;

use crate::error::ScheduleResult;
use crate::record::ScheduleRecord;
use crate::remote::RemoteApi;
use crate::store::{ScheduleStore, SharedStore};

/// Result of a successful save.
#[derive(Debug)]
pub struct SaveOutcome {
    /// The record as sent to the proxy, including any generated id.
    pub record: ScheduleRecord,
    /// False when the post-save authoritative fetch failed. The store keeps
    /// the optimistic state until the next refresh, so the displayed data
    /// may be stale.
    pub refreshed: bool,
}

pub struct Reconciler<R: RemoteApi> {
    store: SharedStore,
    remote: R,
    tz_offset_hours: i64,
    changed: watch::Sender<u64>,
    /// Held across a whole mutation; `refresh` takes it too, so a background
    /// refresh can never clobber an in-flight optimistic update.
    mutation_gate: tokio::sync::Mutex<()>,
}

impl<R: RemoteApi> Reconciler<R> {
    pub fn new(store: SharedStore, remote: R, tz_offset_hours: i64) -> Self {
        let (changed, _) = watch::channel(0);
        Reconciler {
            store,
            remote,
            tz_offset_hours,
            changed,
            mutation_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Current store contents, cloned out from under the lock.
    pub fn snapshot(&self) -> Vec<ScheduleRecord> {
        self.lock_store().snapshot()
    }

    /// Subscribe to store revisions. The value bumps on every visible change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    /// Save a record: optimistic upsert, remote save, authoritative re-fetch.
    ///
    /// A record without an id gets a client-generated one before the upsert.
    /// On remote failure the store is restored to its pre-mutation snapshot
    /// and the error is returned for the caller's single failure notice.
    pub async fn save(&self, mut record: ScheduleRecord) -> ScheduleResult<SaveOutcome> {
        let _gate = self.mutation_gate.lock().await;

        if record.id.is_empty() {
            record.id = self.generate_id();
        }

        let snapshot = {
            let mut store = self.lock_store();
            let snapshot = store.snapshot();
            store.upsert(record.clone());
            snapshot
        };
        self.notify();

        match self.remote.save(&record).await {
            Ok(()) => {
                // The save itself succeeded; if the follow-up fetch fails,
                // the optimistic state stays until the next refresh and the
                // outcome reports it.
                let refreshed = self.reload().await.is_ok();
                Ok(SaveOutcome { record, refreshed })
            }
            Err(err) => {
                self.lock_store().replace_all(snapshot);
                self.notify();
                Err(err)
            }
        }
    }

    /// Delete by id: optimistic removal, remote delete.
    ///
    /// On remote failure the pre-mutation snapshot is restored verbatim. On
    /// success the optimistic removal stands; there is no client-side
    /// tombstone, so a later refresh may reintroduce the id if the server
    /// still has it.
    pub async fn delete(&self, id: &str) -> ScheduleResult<()> {
        let _gate = self.mutation_gate.lock().await;

        let snapshot = {
            let mut store = self.lock_store();
            let snapshot = store.snapshot();
            store.remove_by_id(id);
            snapshot
        };
        self.notify();

        match self.remote.delete(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.lock_store().replace_all(snapshot);
                self.notify();
                Err(err)
            }
        }
    }

    /// Fetch the authoritative collection and replace the store with it.
    /// Waits for any in-flight mutation to resolve first.
    pub async fn refresh(&self) -> ScheduleResult<()> {
        let _gate = self.mutation_gate.lock().await;
        self.reload().await
    }

    async fn reload(&self) -> ScheduleResult<()> {
        let raw = self.remote.fetch_all().await?;
        let records = raw
            .into_iter()
            .map(|r| r.into_record(self.tz_offset_hours))
            .collect();
        self.lock_store().replace_all(records);
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        self.changed.send_modify(|rev| *rev += 1);
    }

    fn lock_store(&self) -> MutexGuard<'_, ScheduleStore> {
        // Store operations cannot leave the Vec inconsistent, so a poisoned
        // lock still holds a usable store.
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Millisecond-timestamp id, bumped until unique within the store.
    fn generate_id(&self) -> String {
        let store = self.lock_store();
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while store.find_by_id(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}
