//! Image loading for reusable view slots.
//!
//! A view slot (a grid cell, a list row) is reused for different items while
//! image loads are still in flight. Every request is tagged with the slot's
//! generation; a result is applied only if the generation still matches, so
//! a slow response for an old item can never replace the current image.

use std::sync::{Arc, Mutex, MutexGuard};

use url::Url;

/// Handle to an in-flight load.
pub trait Cancellable {
    fn cancel(&self);
}

/// Async image loading service provided by the host app.
///
/// `on_result` is called exactly once with the image, or `None` on failure,
/// unless the load is cancelled first. It may be called synchronously (cache
/// hit) or later from another thread.
pub trait ImageLoader {
    type Image: Send + 'static;
    type Handle: Cancellable;

    fn async_load(
        &self,
        url: &Url,
        on_result: Box<dyn FnOnce(Option<Self::Image>) + Send>,
    ) -> Self::Handle;
}

/// Identifies one request issued by a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

struct Shared<I> {
    generation: u64,
    image: Option<I>,
}

pub struct ImageSlot<L: ImageLoader> {
    shared: Arc<Mutex<Shared<L::Image>>>,
    handle: Option<L::Handle>,
}

impl<L: ImageLoader> Default for ImageSlot<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ImageLoader> ImageSlot<L> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared { generation: 0, image: None })),
            handle: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared<L::Image>> {
        self.shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Invalidate whatever the slot was showing or loading.
    fn invalidate(&mut self) -> LoadToken {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
        let mut shared = self.lock();
        shared.generation += 1;
        shared.image = None;
        LoadToken(shared.generation)
    }

    /// Point the slot at a new image. The previous request is cancelled
    /// before the new one is issued.
    pub fn configure(&mut self, loader: &L, url: Option<&Url>) -> LoadToken {
        let token = self.invalidate();
        let Some(url) = url else {
            return token;
        };

        let shared = Arc::clone(&self.shared);
        // The lock is not held here: loaders may answer synchronously.
        let handle = loader.async_load(
            url,
            Box::new(move |image| {
                apply(&shared, token, image);
            }),
        );
        self.handle = Some(handle);
        token
    }

    /// Reset the slot before reuse.
    pub fn clear(&mut self) {
        self.invalidate();
    }

    /// Apply a result for `token`. Returns `false` for stale results.
    pub fn deliver(&self, token: LoadToken, image: Option<L::Image>) -> bool {
        apply(&self.shared, token, image)
    }

    pub fn current_token(&self) -> LoadToken {
        LoadToken(self.lock().generation)
    }

    pub fn has_image(&self) -> bool {
        self.lock().image.is_some()
    }

    pub fn image(&self) -> Option<L::Image>
    where
        L::Image: Clone,
    {
        self.lock().image.clone()
    }
}

fn apply<I>(shared: &Mutex<Shared<I>>, token: LoadToken, image: Option<I>) -> bool {
    let mut shared = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if shared.generation != token.0 {
        tracing::debug!(
            "Dropping stale image result (generation {}, slot at {})",
            token.0,
            shared.generation
        );
        return false;
    }
    shared.image = image;
    true
}
