//! Concurrent prestart calls on a single hook instance

use std::sync::{Arc, Barrier};
use std::thread;
use taskhook_core::{Service, Task, TaskKind, TaskPrestartHook, TaskPrestartResponse};
use taskhook_test_utils::alloc::{TokensBuilder, connect_alloc};
use taskhook_test_utils::doubles::{CountingTokenSource, RecordingLifecycle};
use taskhook_test_utils::task::TestTask;

#[test]
fn concurrent_prestarts_look_up_and_write_once() {
    let service = Service::new("web", "http");
    let task = TestTask::new(Task::new("proxy", TaskKind::connect_proxy("web")));
    let tokens = CountingTokenSource::new(
        TokensBuilder::new()
            .token("default", &service.unique_identity_name(), "tok-123")
            .build(),
    );
    let hook = Arc::new(task.sids_hook(
        Arc::new(connect_alloc(vec![service])),
        Arc::new(RecordingLifecycle::new()),
        tokens.clone(),
    ));

    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let hook = Arc::clone(&hook);
            let barrier = Arc::clone(&barrier);
            let req = task.prestart_request();

            thread::spawn(move || {
                barrier.wait();
                let mut resp = TaskPrestartResponse::default();
                hook.prestart(&req, &mut resp).map(|()| resp.done)
            })
        })
        .collect();

    for handle in handles {
        let done = handle.join().expect("Thread should not panic").unwrap();
        assert!(done, "every caller should observe done");
    }

    assert_eq!(tokens.lookups(), 1, "exactly one caller performs the lookup");
    assert_eq!(task.read_token().as_deref(), Some("tok-123"));
}

#[test]
fn hooks_of_different_tasks_do_not_share_state() {
    let service = Service::new("web", "http");
    let tokens = CountingTokenSource::new(
        TokensBuilder::new()
            .token("default", &service.unique_identity_name(), "tok-123")
            .build(),
    );
    let alloc = Arc::new(connect_alloc(vec![service]));

    let first = TestTask::new(Task::new("proxy-1", TaskKind::connect_proxy("web")));
    let second = TestTask::new(Task::new("proxy-2", TaskKind::connect_proxy("web")));

    for task in [&first, &second] {
        let hook = task.sids_hook(
            alloc.clone(),
            Arc::new(RecordingLifecycle::new()),
            tokens.clone(),
        );
        let mut resp = TaskPrestartResponse::default();
        hook.prestart(&task.prestart_request(), &mut resp).unwrap();
        assert!(resp.done);
    }

    assert_eq!(tokens.lookups(), 2);
    assert_eq!(first.read_token().as_deref(), Some("tok-123"));
    assert_eq!(second.read_token().as_deref(), Some("tok-123"));
}
