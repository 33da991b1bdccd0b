use crate::frontend::{Frontend, FrontendEvent, Subscription};
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

type LoadedAction = Box<dyn FnOnce() + Send>;

/// Single-fire frontend callback waiting for `FinishedLoading`
///
/// The first `FinishedLoading` event removes the callback from the host and
/// runs the deferred action. Any later event never reaches the hook.
pub struct LoadHook {
    frontend: Arc<dyn Frontend>,
    subscription: OnceLock<Subscription>,
    action: Mutex<Option<LoadedAction>>,
}

impl LoadHook {
    /// Register with the host's event dispatcher
    pub fn register(
        frontend: Arc<dyn Frontend>,
        action: impl FnOnce() + Send + 'static,
    ) -> Arc<Self> {
        let hook = Arc::new(Self {
            frontend: Arc::clone(&frontend),
            subscription: OnceLock::new(),
            action: Mutex::new(Some(Box::new(action))),
        });

        let weak = Arc::downgrade(&hook);
        let subscription = frontend.add_event_callback(Arc::new(move |event| {
            if let Some(hook) = weak.upgrade() {
                hook.on_event(event);
            }
        }));
        let _ = hook.subscription.set(subscription);

        debug!("Load hook registered ({:?})", subscription);
        hook
    }

    /// Whether the hook is still waiting for `FinishedLoading`
    pub fn is_armed(&self) -> bool {
        self.action.lock().is_some()
    }

    /// Deregister without running the action; no-op once fired
    pub fn disarm(&self) {
        if self.action.lock().take().is_some() {
            self.deregister();
        }
    }

    fn on_event(&self, event: FrontendEvent) {
        if event != FrontendEvent::FinishedLoading {
            return;
        }

        // Taking the action is the one-shot guard
        let Some(action) = self.action.lock().take() else {
            return;
        };

        self.deregister();
        info!("Frontend finished loading");
        action();
    }

    fn deregister(&self) {
        match self.subscription.get() {
            Some(subscription) => self.frontend.remove_event_callback(*subscription),
            None => warn!("Load hook fired before its subscription was recorded"),
        }
    }
}
