use std::{fmt, sync::Arc};

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::{debug, warn};

use super::handle::{HandleGenerator, JobHandle, UuidHandleGenerator};
use crate::{address::Address, error::RegistryError};

/// Draws allowed before `create` gives up on finding an unused handle.
const MAX_HANDLE_ATTEMPTS: usize = 8;

#[derive(Debug)]
enum JobState {
    Pending,
    Completed(Arc<[Address]>),
    Failed(Arc<str>),
}

/// Snapshot of a job as seen by a poller.
#[derive(Debug, Clone, PartialEq)]
pub enum JobView {
    Pending,
    Completed(Arc<[Address]>),
    Failed(Arc<str>),
}

impl JobView {
    pub fn status(&self) -> JobStatus {
        match self {
            Self::Pending => JobStatus::Pending,
            Self::Completed(_) => JobStatus::Completed,
            Self::Failed(_) => JobStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStats {
    pub pending: usize,
    pub completed: usize,
    pub failed: usize,
}

impl JobStats {
    pub fn total(&self) -> usize {
        self.pending + self.completed + self.failed
    }
}

/// Owner of every area-search job.
///
/// Entries live in a sharded map: creating or settling one job only locks
/// its shard, and a settle is visible to every `get` that starts after it
/// returns.
pub struct JobRegistry {
    jobs: DashMap<JobHandle, JobState>,
    generator: Arc<dyn HandleGenerator>,
}

impl fmt::Debug for JobRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobRegistry")
            .field("job_count", &self.jobs.len())
            .field("generator", &self.generator)
            .finish()
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::with_generator(Arc::new(UuidHandleGenerator))
    }

    pub fn with_generator(generator: Arc<dyn HandleGenerator>) -> Self {
        Self {
            jobs: DashMap::new(),
            generator,
        }
    }

    /// Registers a new `Pending` job and returns its handle.
    pub fn create(&self) -> Result<JobHandle, RegistryError> {
        for _ in 0..MAX_HANDLE_ATTEMPTS {
            let handle = self.generator.next_handle();
            if let Entry::Vacant(slot) = self.jobs.entry(handle) {
                slot.insert(JobState::Pending);
            } else {
                warn!(%handle, "job handle collision, drawing another");
                continue;
            }

            debug!(%handle, jobs = self.jobs.len(), "area job registered");
            return Ok(handle);
        }

        Err(RegistryError::HandleSpaceExhausted {
            attempts: MAX_HANDLE_ATTEMPTS,
        })
    }

    /// Moves a `Pending` job to `Completed` with its result.
    pub fn complete(
        &self,
        handle: JobHandle,
        result: Vec<Address>,
    ) -> Result<(), RegistryError> {
        self.settle(handle, JobState::Completed(result.into()))
    }

    /// Moves a `Pending` job to `Failed`.
    pub fn fail(
        &self,
        handle: JobHandle,
        reason: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let reason: String = reason.into();
        self.settle(handle, JobState::Failed(reason.into()))
    }

    fn settle(
        &self,
        handle: JobHandle,
        next: JobState,
    ) -> Result<(), RegistryError> {
        let mut state = self
            .jobs
            .get_mut(&handle)
            .ok_or(RegistryError::UnknownHandle(handle))?;

        if !matches!(*state, JobState::Pending) {
            return Err(RegistryError::AlreadySettled(handle));
        }

        *state = next;
        Ok(())
    }

    pub fn get(&self, handle: JobHandle) -> Option<JobView> {
        self.jobs.get(&handle).map(|state| match &*state {
            JobState::Pending => JobView::Pending,
            JobState::Completed(result) => JobView::Completed(Arc::clone(result)),
            JobState::Failed(reason) => JobView::Failed(Arc::clone(reason)),
        })
    }

    pub fn stats(&self) -> JobStats {
        let mut stats = JobStats::default();
        for entry in self.jobs.iter() {
            match entry.value() {
                JobState::Pending => stats.pending += 1,
                JobState::Completed(_) => stats.completed += 1,
                JobState::Failed(_) => stats.failed += 1,
            }
        }
        stats
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{HashSet, VecDeque},
        sync::Mutex,
        thread,
    };

    use uuid::Uuid;

    use super::*;

    fn address(guid: &str) -> Address {
        Address {
            guid: guid.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            address: String::new(),
            tags: Vec::new(),
            is_active: true,
        }
    }

    /// Replays a fixed handle sequence, then repeats the last one forever.
    #[derive(Debug)]
    struct ScriptedGenerator {
        handles: Mutex<VecDeque<JobHandle>>,
    }

    impl ScriptedGenerator {
        fn new(handles: &[JobHandle]) -> Self {
            Self {
                handles: Mutex::new(handles.iter().copied().collect()),
            }
        }
    }

    impl HandleGenerator for ScriptedGenerator {
        fn next_handle(&self) -> JobHandle {
            let mut handles = self.handles.lock().unwrap();
            if handles.len() > 1 {
                handles.pop_front().unwrap()
            } else {
                *handles.front().unwrap()
            }
        }
    }

    fn handle(n: u128) -> JobHandle {
        JobHandle::from_uuid(Uuid::from_u128(n))
    }

    #[test]
    fn new_job_is_pending() {
        let registry = JobRegistry::new();
        let handle = registry.create().unwrap();
        assert_eq!(registry.get(handle), Some(JobView::Pending));
        assert_eq!(registry.stats().pending, 1);
    }

    #[test]
    fn complete_publishes_result() {
        let registry = JobRegistry::new();
        let handle = registry.create().unwrap();

        registry
            .complete(handle, vec![address("a"), address("b")])
            .unwrap();

        match registry.get(handle) {
            Some(JobView::Completed(result)) => {
                let guids: Vec<_> =
                    result.iter().map(|a| a.guid.as_str()).collect();
                assert_eq!(guids, vec!["a", "b"]);
            }
            other => panic!("expected completed job, got {other:?}"),
        }
    }

    #[test]
    fn fail_records_reason() {
        let registry = JobRegistry::new();
        let handle = registry.create().unwrap();

        registry.fail(handle, "bad coordinates").unwrap();

        let view = registry.get(handle).unwrap();
        assert_eq!(view.status(), JobStatus::Failed);
        assert_eq!(view, JobView::Failed("bad coordinates".into()));
    }

    #[test]
    fn unknown_handle_is_not_found() {
        let registry = JobRegistry::new();
        let stranger = UuidHandleGenerator.next_handle();

        assert!(registry.get(stranger).is_none());
        assert_eq!(
            registry.complete(stranger, Vec::new()),
            Err(RegistryError::UnknownHandle(stranger))
        );
    }

    #[test]
    fn settling_twice_is_rejected_and_keeps_first_result() {
        let registry = JobRegistry::new();
        let handle = registry.create().unwrap();

        registry.complete(handle, vec![address("first")]).unwrap();
        assert_eq!(
            registry.complete(handle, vec![address("second")]),
            Err(RegistryError::AlreadySettled(handle))
        );
        assert_eq!(
            registry.fail(handle, "late"),
            Err(RegistryError::AlreadySettled(handle))
        );

        let Some(JobView::Completed(result)) = registry.get(handle) else {
            panic!("job should stay completed");
        };
        assert_eq!(result[0].guid, "first");
    }

    #[test]
    fn concurrent_creates_yield_distinct_handles() {
        let registry = Arc::new(JobRegistry::new());

        let workers: Vec<_> = (0..100)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.create().unwrap())
            })
            .collect();

        let handles: HashSet<_> =
            workers.into_iter().map(|w| w.join().unwrap()).collect();

        assert_eq!(handles.len(), 100);
        assert_eq!(registry.len(), 100);
        assert!(handles.iter().all(|h| registry.get(*h).is_some()));
    }

    #[test]
    fn settle_on_one_thread_is_visible_on_another() {
        let registry = Arc::new(JobRegistry::new());
        let handle = registry.create().unwrap();

        let writer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.complete(handle, vec![address("x")]).unwrap()
            })
        };
        writer.join().unwrap();

        let reader = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.get(handle))
        };
        let view = reader.join().unwrap().unwrap();
        assert_eq!(view.status(), JobStatus::Completed);
    }

    #[test]
    fn colliding_generator_is_redrawn() {
        let registry = JobRegistry::with_generator(Arc::new(
            ScriptedGenerator::new(&[handle(1), handle(1), handle(2)]),
        ));

        assert_eq!(registry.create().unwrap(), handle(1));
        assert_eq!(registry.create().unwrap(), handle(2));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn exhausted_generator_reports_error_without_clobbering() {
        let registry = JobRegistry::with_generator(Arc::new(
            ScriptedGenerator::new(&[handle(7)]),
        ));

        let first = registry.create().unwrap();
        registry.complete(first, vec![address("kept")]).unwrap();

        assert_eq!(
            registry.create(),
            Err(RegistryError::HandleSpaceExhausted {
                attempts: MAX_HANDLE_ATTEMPTS
            })
        );
        assert_eq!(registry.get(first).unwrap().status(), JobStatus::Completed);
    }

    #[test]
    fn stats_count_each_state() {
        let registry = JobRegistry::new();
        let a = registry.create().unwrap();
        let b = registry.create().unwrap();
        let _pending = registry.create().unwrap();

        registry.complete(a, Vec::new()).unwrap();
        registry.fail(b, "boom").unwrap();

        let stats = registry.stats();
        assert_eq!(
            stats,
            JobStats {
                pending: 1,
                completed: 1,
                failed: 1
            }
        );
        assert_eq!(stats.total(), 3);
    }
}
