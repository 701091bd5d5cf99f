//! Progress hooks for the DP.

/// Receives the loop boundaries of a DP run.
///
/// Every method defaults to a no-op, so implementors override only what
/// they need. `item` is the 1-based generation number (`1..=items`).
///
/// # Thread Safety
///
/// With the `parallel` feature, [`on_slot_done`](DpObserver::on_slot_done)
/// may be called from several rayon workers at once and in any slot order;
/// the item-level hooks are always called from the driving thread.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use u_mokp::dp::DpObserver;
///
/// #[derive(Default)]
/// struct ItemCounter(AtomicUsize);
///
/// impl DpObserver for ItemCounter {
///     fn on_item_done(&self, _item: usize, _items: usize, _front_len: usize) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait DpObserver: Sync {
    /// Called before the capacity pass of `item`.
    fn on_item_start(&self, _item: usize, _items: usize) {}

    /// Called once per capacity slot after its cell has been written.
    fn on_slot_done(&self, _item: usize, _slot: usize) {}

    /// Called after the pass of `item`, with the size of the
    /// full-capacity front.
    fn on_item_done(&self, _item: usize, _items: usize, _front_len: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DpObserver for NoopObserver {}
