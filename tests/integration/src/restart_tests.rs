//! End-to-end agent restart scenarios
//!
//! Each scenario starts a task through a task runner's prestart phase, throws
//! the runner away as an agent restart would, and resumes the task with a
//! freshly constructed hook over the same task directory.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use taskhook_core::{
    AllocHookResources, PrestartRunner, RecoveredToken, Service, SidsHook, Task, TaskKind,
    TaskPrestartHook, TaskPrestartResponse, TokenSource, logging,
};
use taskhook_test_utils::alloc::{TokensBuilder, connect_alloc};
use taskhook_test_utils::doubles::RecordingLifecycle;
use taskhook_test_utils::task::TestTask;

struct Agent {
    resources: Arc<AllocHookResources>,
    service: Service,
}

impl Agent {
    fn new() -> Self {
        let _ = logging::init();
        Self {
            resources: Arc::new(AllocHookResources::new()),
            service: Service::new("count-api", "http"),
        }
    }

    fn issue_token(&self, secret_id: &str) {
        self.resources.set_consul_tokens(
            TokensBuilder::new()
                .token("default", &self.service.unique_identity_name(), secret_id)
                .build(),
        );
    }

    /// A hook as a newly started task runner would construct it.
    fn hook_for(&self, task: &TestTask) -> SidsHook {
        let token_source: Arc<dyn TokenSource> = self.resources.clone();
        task.sids_hook(
            Arc::new(connect_alloc(vec![self.service.clone()])),
            Arc::new(RecordingLifecycle::new()),
            token_source,
        )
    }
}

fn proxy_task() -> TestTask {
    TestTask::new(Task::new(
        "connect-proxy-count-api",
        TaskKind::connect_proxy("count-api"),
    ))
}

#[test]
fn token_survives_agent_restart() {
    let agent = Agent::new();
    agent.issue_token("tok-123");
    let task = proxy_task();

    let hook: Arc<dyn TaskPrestartHook> = Arc::new(agent.hook_for(&task));
    let runner = PrestartRunner::new(vec![hook]);
    let outcomes = runner.run(&task.prestart_request()).unwrap();
    assert!(outcomes.iter().all(|o| o.done));
    drop(runner);

    tracing::info!(task = %task.task().name, "Simulating agent restart");
    let resumed = agent.hook_for(&task);
    let recovered = resumed.recover_token(&task.task_dir().secrets_dir).unwrap();

    assert_eq!(recovered, RecoveredToken::Found("tok-123".to_string()));
}

#[test]
fn restart_before_first_prestart_recovers_nothing() {
    let agent = Agent::new();
    agent.issue_token("tok-123");
    let task = proxy_task();

    let resumed = agent.hook_for(&task);
    let recovered = resumed.recover_token(&task.task_dir().secrets_dir).unwrap();

    assert_eq!(recovered, RecoveredToken::NotFound);
}

#[test]
fn new_task_runner_writes_token_again() {
    // Idempotency is per task-runner lifetime; a new runner starts over.
    let agent = Agent::new();
    agent.issue_token("tok-old");
    let task = proxy_task();

    let first = agent.hook_for(&task);
    first
        .prestart(&task.prestart_request(), &mut TaskPrestartResponse::default())
        .unwrap();
    assert_eq!(task.read_token().as_deref(), Some("tok-old"));

    agent.issue_token("tok-new");
    let mut resp = TaskPrestartResponse::default();
    first.prestart(&task.prestart_request(), &mut resp).unwrap();
    assert!(resp.done);
    assert_eq!(task.read_token().as_deref(), Some("tok-old"));

    let second = agent.hook_for(&task);
    second
        .prestart(&task.prestart_request(), &mut TaskPrestartResponse::default())
        .unwrap();
    assert_eq!(task.read_token().as_deref(), Some("tok-new"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(task.token_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, taskhook_core::SI_TOKEN_FILE_MODE);
    }
}

#[test]
fn task_without_token_starts_and_recovers_nothing() {
    let agent = Agent::new();
    let task = proxy_task();

    let hook: Arc<dyn TaskPrestartHook> = Arc::new(agent.hook_for(&task));
    let runner = PrestartRunner::new(vec![hook]);
    let outcomes = runner.run(&task.prestart_request()).unwrap();
    assert!(outcomes[0].done);

    let recovered = agent
        .hook_for(&task)
        .recover_token(&task.task_dir().secrets_dir)
        .unwrap();
    assert_eq!(recovered, RecoveredToken::NotFound);
}

#[test]
fn unreadable_token_file_is_distinct_from_absence() {
    let agent = Agent::new();
    let task = proxy_task();
    std::fs::create_dir(task.token_path()).unwrap();

    let result = agent
        .hook_for(&task)
        .recover_token(&task.task_dir().secrets_dir);

    assert!(
        matches!(result, Err(taskhook_core::Error::RecoverToken { .. })),
        "Expected RecoverToken error, got {:?}",
        result
    );
}
