//! Deferred single-write provider slot

use once_cell::sync::OnceCell;

use crate::error::{RuntimeError, RuntimeResult};

/// A slot that hands a component to consumers declared before it exists
///
/// Generated initialization allocates one box per provider-referenced
/// component, passes it to every consumer, and populates it exactly once right
/// after the component's constructor runs. Reads never block: a read before
/// population observes `None`. Correct observation rests on initialization
/// phase order, not on callers synchronizing with each other.
#[derive(Debug, Default)]
pub struct ProviderBox<T> {
    cell: OnceCell<T>,
}

impl<T> ProviderBox<T> {
    /// Empty, unpopulated box
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Populate the box with its value
    ///
    /// Fails with [`RuntimeError::AlreadyPopulated`] on a second write.
    pub fn set(&self, value: T) -> RuntimeResult<()> {
        self.cell
            .set(value)
            .map_err(|_| RuntimeError::AlreadyPopulated)
    }

    /// Current contents, `None` before population
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Whether the box has been populated
    pub fn is_populated(&self) -> bool {
        self.cell.get().is_some()
    }
}
