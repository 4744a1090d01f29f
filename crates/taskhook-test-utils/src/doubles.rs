//! Stand-ins for the SI token hook's collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use taskhook_core::{
    AllocHookResources, ConsulToken, ConsulTokens, Error, Result, TaskEvent, TaskLifecycle,
    TokenSource,
};

/// A [`TaskLifecycle`] recording every kill request.
#[derive(Debug, Default)]
pub struct RecordingLifecycle {
    events: Mutex<Vec<TaskEvent>>,
    fail_kill: bool,
}

impl RecordingLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lifecycle whose kill requests are recorded and then rejected.
    pub fn failing() -> Self {
        Self {
            fail_kill: true,
            ..Self::default()
        }
    }

    /// Kill events received so far.
    pub fn kill_events(&self) -> Vec<TaskEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TaskLifecycle for RecordingLifecycle {
    fn kill(&self, event: &TaskEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail_kill {
            return Err(Error::Lifecycle {
                message: "task runner rejected kill".to_string(),
            });
        }
        Ok(())
    }
}

/// A [`TokenSource`] over real [`AllocHookResources`] that counts lookups.
#[derive(Debug, Default)]
pub struct CountingTokenSource {
    resources: AllocHookResources,
    lookups: AtomicUsize,
}

impl CountingTokenSource {
    pub fn new(tokens: ConsulTokens) -> Arc<Self> {
        let source = Self::default();
        source.resources.set_consul_tokens(tokens);
        Arc::new(source)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl TokenSource for CountingTokenSource {
    fn lookup(&self, cluster: &str, identity_name: &str) -> Option<ConsulToken> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.resources.lookup(cluster, identity_name)
    }
}
