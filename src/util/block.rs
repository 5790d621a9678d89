use std::future::Future;

use tokio::runtime::{Builder, Runtime};

use crate::model::error::ObjectError;

/// Current-thread runtime used to drive SDK futures from blocking callers.
/// `Runtime::block_on` may be entered from several threads at once.
pub fn new_runtime() -> Result<Runtime, ObjectError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| ObjectError::Config(format!("failed to start runtime: {}", err)))
}

pub fn block_until_ready<Fut, T>(runtime: &Runtime, future: Fut) -> T
where
    Fut: Future<Output = T>,
{
    runtime.block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_until_ready() {
        let runtime = new_runtime().unwrap();

        let result = block_until_ready(&runtime, async {
            tokio::task::yield_now().await;
            Ok::<_, ObjectError>(7)
        });

        assert!(matches!(result, Ok(7)));
    }

    #[test]
    fn test_block_until_ready_from_threads() {
        let runtime = std::sync::Arc::new(new_runtime().unwrap());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let runtime = runtime.clone();
                std::thread::spawn(move || block_until_ready(&runtime, async move { i * 2 }))
            })
            .collect();

        let mut results: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        results.sort();
        assert_eq!(results, vec![0, 2, 4, 6]);
    }
}
