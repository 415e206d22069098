//! Detached task spawning.

use std::future::Future;

/// Fire-and-forget a future on the root scope. Tasks spawned here are not
/// tied to the calling component and outlive it; callers must be running
/// inside the Dioxus runtime.
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    let _ = dioxus::prelude::spawn_forever(future);
}
