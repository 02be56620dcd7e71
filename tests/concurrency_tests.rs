//! # Concurrency Tests using Loom
//!
//! Models the status stream protocol: each worker formats its line outside
//! the lock, then writes it whole while holding the lock. Under every
//! interleaving loom explores, no line may be torn.

mod common;

#[cfg(test)]
mod tests {
    use loom::sync::atomic::{AtomicUsize, Ordering};
    use loom::sync::{Arc, Mutex};
    use loom::thread;

    /// Appends one line in two steps, as a writer that flushes partial
    /// buffers would. Holding the lock across both steps is what keeps the
    /// line intact.
    fn emit(stream: &Mutex<Vec<String>>, line: &str) {
        let (head, tail) = line.split_at(line.len() / 2);
        let mut guard = stream.lock().unwrap();
        guard.push(head.to_string());
        guard.push(tail.to_string());
    }

    #[test]
    fn status_lines_are_never_torn() {
        const STACK_SIZE: usize = 8 * 1024 * 1024; // 8 MB

        let builder = std::thread::Builder::new()
            .name("loom-test-thread".into())
            .stack_size(STACK_SIZE);

        let handle = builder
            .spawn(|| {
                loom::model(|| {
                    let stream = Arc::new(Mutex::new(Vec::new()));
                    let completed = Arc::new(AtomicUsize::new(0));

                    let workers: Vec<_> = ["[START alpha for fib]", "[START beta for fib]"]
                        .into_iter()
                        .map(|line| {
                            let stream = stream.clone();
                            let completed = completed.clone();
                            thread::spawn(move || {
                                emit(&stream, line);
                                completed.fetch_add(1, Ordering::SeqCst);
                            })
                        })
                        .collect();

                    for worker in workers {
                        worker.join().unwrap();
                    }

                    // The barrier: both workers have returned before anything reads.
                    assert_eq!(completed.load(Ordering::SeqCst), 2);

                    let parts = stream.lock().unwrap();
                    let lines: Vec<String> = parts.chunks(2).map(|pair| pair.concat()).collect();
                    assert_eq!(lines.len(), 2);
                    assert!(lines.contains(&"[START alpha for fib]".to_string()));
                    assert!(lines.contains(&"[START beta for fib]".to_string()));
                });
            })
            .unwrap();

        handle.join().unwrap();
    }

    #[test]
    fn status_sink_keeps_split_writes_together() {
        use super::common::TricklingWriter;
        use versus_runner::infra::status::StatusSink;

        const THREADS: usize = 8;
        const LINES: usize = 25;

        let writer = TricklingWriter::new();
        let sink = StatusSink::new(writer.clone());
        let workers: Vec<_> = (0..THREADS)
            .map(|worker| {
                let sink = sink.clone();
                std::thread::spawn(move || {
                    for line in 0..LINES {
                        sink.emit(format!("[DONE  worker{worker} for bench_{line:02}] -> capture"));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let output = writer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), THREADS * LINES);
        for worker in 0..THREADS {
            for line in 0..LINES {
                let expected = format!("[DONE  worker{worker} for bench_{line:02}] -> capture");
                assert_eq!(lines.iter().filter(|l| **l == expected).count(), 1, "{expected}");
            }
        }
    }
}
