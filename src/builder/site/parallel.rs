use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use log::debug;
use rayon::prelude::*;

use crate::utils::BuildError;

/// Run `work` over `items` on a dedicated worker pool.
///
/// The pool has one thread per CPU, capped at the number of items. The
/// first error wins: once it lands no new item is started, items already
/// running finish, and that error is returned. Results come back in input
/// order.
pub fn run_phase<T, R, F>(phase: &'static str, items: &[T], work: F) -> Result<Vec<R>, BuildError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R, BuildError> + Sync,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let threads = num_cpus::get().min(items.len()).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(move |i| format!("{}-{}", phase, i))
        .build()?;
    debug!("{}: {} items on {} threads", phase, items.len(), threads);

    let failed = AtomicBool::new(false);
    let first_error: Mutex<Option<BuildError>> = Mutex::new(None);
    let results: Mutex<Vec<(usize, R)>> = Mutex::new(Vec::with_capacity(items.len()));

    pool.install(|| {
        items.par_iter().enumerate().for_each(|(index, item)| {
            if failed.load(Ordering::SeqCst) {
                return;
            }

            match work(item) {
                Ok(result) => results
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push((index, result)),
                Err(err) => {
                    let mut slot = first_error.lock().unwrap_or_else(PoisonError::into_inner);
                    if slot.is_none() {
                        *slot = Some(err);
                    }
                    failed.store(true, Ordering::SeqCst);
                }
            }
        });
    });

    if let Some(err) = first_error.into_inner().unwrap_or_else(PoisonError::into_inner) {
        return Err(err);
    }

    let mut results = results.into_inner().unwrap_or_else(PoisonError::into_inner);
    results.sort_by_key(|(index, _)| *index);
    Ok(results.into_iter().map(|(_, result)| result).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicUsize;

    fn failure(name: &str) -> BuildError {
        BuildError::Artifact {
            name: name.to_string(),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_results_keep_input_order() {
        let items: Vec<usize> = (0..200).collect();
        let doubled = run_phase("test", &items, |n| Ok(n * 2)).unwrap();
        assert_eq!(doubled, items.iter().map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<u8> = Vec::new();
        let out: Vec<u8> = run_phase("test", &items, |n| Ok(*n)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_first_error_wins_and_stops_new_work() {
        let started = AtomicUsize::new(0);
        let items: Vec<usize> = (0..10_000).collect();

        let err = run_phase("test", &items, |n| {
            started.fetch_add(1, Ordering::SeqCst);
            if *n == 0 {
                Err(failure("first"))
            } else {
                Ok(*n)
            }
        })
        .unwrap_err();

        assert!(matches!(err, BuildError::Artifact { ref name, .. } if name == "first"));
        assert!(started.load(Ordering::SeqCst) < items.len());
    }

    #[test]
    fn test_single_error_reported() {
        let items = vec![PathBuf::from("a.md"), PathBuf::from("b.md")];
        let err = run_phase("test", &items, |path| -> Result<(), BuildError> {
            Err(BuildError::Io {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "nope"),
            })
        })
        .unwrap_err();

        assert!(err.path().is_some());
    }
}
