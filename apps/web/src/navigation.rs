//! Navigation capability and scheduled redirects

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::routes::Route;

/// Something able to move the client to another page
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, route: Route);
}

/// Navigation scheduled to happen after a delay
///
/// The navigation is cancelled when the timer is cancelled or dropped
/// before the delay elapses.
#[derive(Debug)]
pub struct RedirectTimer {
    route: Route,
    handle: JoinHandle<()>,
}

impl RedirectTimer {
    /// Schedule `route` on `navigator` once `delay` has elapsed
    pub fn schedule<N: Navigator>(navigator: Arc<N>, route: Route, delay: Duration) -> Self {
        info!("Scheduling redirect to {} in {:?}", route, delay);

        let target = route.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!("Redirecting to {}", target);
            navigator.navigate(target);
        });

        Self { route, handle }
    }

    /// Whether the navigation already ran or was cancelled
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            info!("Cancelling redirect to {}", self.route);
            self.handle.abort();
        }
    }
}

impl Drop for RedirectTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.visited.lock().unwrap().push(route);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_redirect_fires_after_delay() {
        let navigator = Arc::new(RecordingNavigator::default());
        let timer =
            RedirectTimer::schedule(navigator.clone(), Route::Login, Duration::from_millis(2000));

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(navigator.visited.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*navigator.visited.lock().unwrap(), vec![Route::Login]);
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_timer_never_fires() {
        let navigator = Arc::new(RecordingNavigator::default());
        let timer =
            RedirectTimer::schedule(navigator.clone(), Route::Login, Duration::from_millis(2000));

        drop(timer);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(navigator.visited.lock().unwrap().is_empty());
    }
}
