//! Mutex-guarded Bevy `App` shared between rspec closures.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::prelude::App;

/// Wrapper that forwards `Send` and `Sync` because access is mutex-guarded.
#[derive(Debug)]
pub struct ThreadSafeApp(pub App);

impl Deref for ThreadSafeApp {
    type Target = App;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ThreadSafeApp {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// SAFETY: rspec environments must be `Send + Sync`, suites run serially via
// `run_serial`, and every access goes through the mutex.
unsafe impl Send for ThreadSafeApp {}
unsafe impl Sync for ThreadSafeApp {}

/// Shared pointer type for the wrapped app.
pub type SharedApp = Arc<Mutex<ThreadSafeApp>>;

/// Wraps `app` for sharing.
pub fn share(app: App) -> SharedApp {
    Arc::new(Mutex::new(ThreadSafeApp(app)))
}

/// Locks the shared app, recovering from a poisoned mutex.
pub fn lock_app(app: &SharedApp) -> MutexGuard<'_, ThreadSafeApp> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}
