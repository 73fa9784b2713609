use anyhow::{Context, anyhow};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use tracing::{debug, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Worker {
    id: usize,
    thread: thread::JoinHandle<()>,
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<Receiver<Job>>>) -> anyhow::Result<Worker> {
        let thread = thread::Builder::new()
            .name(format!("conn-worker-{id}"))
            .spawn(move || loop {
                let message = match receiver.lock() {
                    Ok(rx) => rx.recv(),
                    Err(_) => {
                        warn!(worker = id, "job queue lock poisoned, stopping");
                        break;
                    }
                };
                match message {
                    // a panicking job only takes down its own connection
                    Ok(job) => {
                        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                            warn!(worker = id, "job panicked");
                        }
                    }
                    Err(_) => break,
                }
            })
            .with_context(|| format!("Can't spawn worker {id}"))?;

        Ok(Worker { id, thread })
    }
}

/// Fixed set of threads fed from one job queue. Dropping the pool closes the
/// queue and joins every worker.
pub struct ThreadPool {
    workers: Vec<Worker>,
    sender: Option<Sender<Job>>,
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        drop(self.sender.take());

        for worker in self.workers.drain(..) {
            debug!(worker = worker.id, "shutting down worker");
            if worker.thread.join().is_err() {
                warn!(worker = worker.id, "worker panicked");
            }
        }
    }
}

impl ThreadPool {
    pub fn new(size: usize) -> anyhow::Result<Self> {
        if size == 0 {
            return Err(anyhow!("Thread pool needs at least one worker"));
        }

        let (sender, receiver) = mpsc::channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| Worker::new(id, Arc::clone(&receiver)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(ThreadPool {
            workers,
            sender: Some(sender),
        })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn execute<F>(&self, f: F) -> anyhow::Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let job = Box::new(f) as Job;
        self.sender
            .as_ref()
            .ok_or(anyhow!("Thread pool is shut down"))?
            .send(job)
            .map_err(|_| anyhow!("All workers have stopped"))
    }
}
