//! 고정 크기 워커 풀.
//!
//! crossbeam 채널(FIFO)을 큐로 사용하는 메시지 패싱 구조 —
//! 수동 뮤텍스/조건변수 쌍 대신 채널이 대기/깨우기를 담당한다.
//! 우선순위 없음, 취소 없음, 반환값 없음.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::JoinHandle;

use blocksight_core::error::CoreError;
use crossbeam::channel::{unbounded, Sender};
use tracing::{debug, warn};

/// 큐에 들어가는 작업 단위
type Task = Box<dyn FnOnce() + Send + 'static>;

/// 고정 크기 백그라운드 작업 풀.
///
/// 워커는 채널이 빌 때까지 블로킹 대기하고, FIFO 순서로 하나씩 꺼내
/// 실행한다. 패닉하는 작업은 해당 작업만 실패시키고 워커와 풀은 살아남는다.
///
/// 종료 규약: [`TaskPool::shutdown`] (또는 drop) 시점에 이미 큐에 있던
/// 작업은 모두 실행된 뒤 워커가 종료한다. 종료 이후의 `submit`은
/// `CoreError::ExecutorStopped`로 일관되게 거부된다.
pub struct TaskPool {
    /// 작업 송신 측 — `None`이면 종료 신호가 간 상태
    sender: Option<Sender<Task>>,
    workers: Vec<JoinHandle<()>>,
}

impl TaskPool {
    /// `worker_count`개의 워커로 새 풀 생성 (최소 1)
    pub fn new(worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let (sender, receiver) = unbounded::<Task>();

        let workers = (0..worker_count)
            .map(|id| {
                let receiver = receiver.clone();
                std::thread::spawn(move || {
                    debug!("워커 {id} 시작");
                    // 송신 측이 닫히면 남은 작업을 모두 소진한 뒤 루프 종료
                    for task in receiver.iter() {
                        if catch_unwind(AssertUnwindSafe(task)).is_err() {
                            warn!("워커 {id}: 작업 패닉 격리됨, 풀 계속 동작");
                        }
                    }
                    debug!("워커 {id} 종료");
                })
            })
            .collect();

        Self {
            sender: Some(sender),
            workers,
        }
    }

    /// 작업 제출 (fire-and-forget).
    ///
    /// 종료 이후에는 `CoreError::ExecutorStopped`를 반환한다.
    pub fn submit<F>(&self, task: F) -> Result<(), CoreError>
    where
        F: FnOnce() + Send + 'static,
    {
        match &self.sender {
            Some(sender) => sender
                .send(Box::new(task))
                .map_err(|_| CoreError::ExecutorStopped),
            None => Err(CoreError::ExecutorStopped),
        }
    }

    /// 워커 수
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// 풀 종료 — 큐에 남은 작업을 모두 실행한 뒤 모든 워커를 join한다.
    ///
    /// 멱등: 두 번째 호출부터는 아무 일도 하지 않는다.
    pub fn shutdown(&mut self) {
        // 채널을 닫아 워커의 drain-후-종료를 유도
        self.sender.take();

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("워커 join 실패 (스레드 패닉)");
            }
        }
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn all_submitted_tasks_run_exactly_once() {
        let mut pool = TaskPool::new(4);
        let seen = Arc::new(Mutex::new(Vec::new()));

        for id in 0..100usize {
            let seen = Arc::clone(&seen);
            pool.submit(move || {
                seen.lock().unwrap().push(id);
            })
            .unwrap();
        }

        // 종료 시점에 큐에 있던 작업까지 전부 실행됨
        pool.shutdown();

        let mut seen = seen.lock().unwrap().clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn worker_count_floored_at_one() {
        let pool = TaskPool::new(0);
        assert_eq!(pool.worker_count(), 1);
    }

    #[test]
    fn panicking_task_does_not_kill_pool() {
        let mut pool = TaskPool::new(1);
        let counter = Arc::new(AtomicUsize::new(0));

        pool.submit(|| panic!("고의 패닉")).unwrap();

        // 패닉 이후에 제출된 작업도 같은 워커에서 실행되어야 함
        let c = Arc::clone(&counter);
        pool.submit(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        pool.shutdown();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn submit_after_shutdown_is_rejected() {
        let mut pool = TaskPool::new(2);
        pool.shutdown();

        let result = pool.submit(|| {});
        assert!(matches!(result, Err(CoreError::ExecutorStopped)));
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut pool = TaskPool::new(2);
        pool.shutdown();
        pool.shutdown();
        assert_eq!(pool.worker_count(), 0);
    }

    #[test]
    fn single_worker_preserves_fifo_order() {
        let mut pool = TaskPool::new(1);
        let order = Arc::new(Mutex::new(Vec::new()));

        for id in 0..20usize {
            let order = Arc::clone(&order);
            pool.submit(move || {
                order.lock().unwrap().push(id);
            })
            .unwrap();
        }

        pool.shutdown();
        assert_eq!(*order.lock().unwrap(), (0..20).collect::<Vec<_>>());
    }
}
