use crate::invariants::{
    debug_assert_bounded_count, debug_assert_cursors, debug_assert_initialized_read,
    debug_assert_strict_growth,
};
use crate::{Config, Iter, Metrics, QueueError};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::{self, MaybeUninit};
use std::ptr;

// =============================================================================
// LAYOUT & GROWTH STRATEGY
// =============================================================================
//
// ## Cursors
//
// `head` and `tail` are physical slot indices in `[0, capacity)`. The live
// elements are the `len` slots starting at `head`, wrapping at the end of the
// buffer. `tail == (head + len) % capacity` always holds, so a full queue has
// `head == tail` and is told apart from an empty one by `len`.
//
// ## Growth
//
// A push that finds `len == capacity` reallocates to `capacity * growth_factor`
// and relocates by logical offset: element `i` in FIFO order moves from
// `(head + i) % old_capacity` to slot `i` of the new buffer. Copying the old
// buffer from physical offset 0 would scramble the order whenever the live
// range wraps, which is exactly the state a full buffer is usually in.
//
// After relocation `head = 0` and `tail = len`. Grows happen at geometrically
// increasing sizes, so the O(len) relocation amortizes to O(1) per push.
//
// ## Slot Initialization
//
// Slots are `MaybeUninit<T>`; only the live range holds initialized values.
// `T` needs no `Default`, and popped slots are moved out with
// `assume_init_read` and left logically uninitialized.
//
// =============================================================================

/// Growable FIFO queue over a circular buffer.
///
/// `push` is amortized O(1); `pop`, `front`, `len` and `swap` are O(1).
/// Capacity only ever grows.
pub struct RingQueue<T> {
    /// Backing storage. Uses `Box<[T]>` since the length is the capacity and a
    /// grow swaps in a whole new allocation.
    buffer: Box<[MaybeUninit<T>]>,
    /// Physical index of the oldest element
    head: usize,
    /// Physical index of the next free slot
    tail: usize,
    /// Number of live elements
    len: usize,
    config: Config,
    metrics: Metrics,
}

impl<T> RingQueue<T> {
    /// Creates an empty queue with the default configuration (4 slots, doubling).
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty queue whose baseline capacity is at least `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::default().with_initial_capacity(capacity))
    }

    /// Creates an empty queue with the given configuration.
    ///
    /// Out-of-range values are clamped (see [`Config::normalized`]).
    pub fn with_config(config: Config) -> Self {
        let config = config.normalized();
        Self {
            buffer: Self::allocate(config.initial_capacity),
            head: 0,
            tail: 0,
            len: 0,
            config,
            metrics: Metrics::new(),
        }
    }

    fn allocate(capacity: usize) -> Box<[MaybeUninit<T>]> {
        let mut buffer = Vec::with_capacity(capacity);
        buffer.resize_with(capacity, MaybeUninit::uninit);
        buffer.into_boxed_slice()
    }

    // ---------------------------------------------------------------------
    // STATUS
    // ---------------------------------------------------------------------

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of elements in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias for [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns true if the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Alias for [`is_empty`](Self::is_empty).
    #[inline]
    pub fn empty(&self) -> bool {
        self.is_empty()
    }

    /// Returns true if the next push will reallocate.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns the active (normalized) configuration.
    #[inline]
    pub fn config(&self) -> Config {
        self.config
    }

    /// Get a snapshot of metrics if enabled.
    pub fn metrics(&self) -> Metrics {
        if self.config.enable_metrics {
            self.metrics
        } else {
            Metrics::default()
        }
    }

    #[inline]
    fn wrap_add(&self, index: usize, n: usize) -> usize {
        (index + n) % self.capacity()
    }

    // ---------------------------------------------------------------------
    // ACCESS
    // ---------------------------------------------------------------------

    /// Returns the oldest element without removing it.
    pub fn front(&self) -> Result<&T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        // SAFETY: len > 0, so the slot at head is inside the live range and
        // holds an initialized value.
        Ok(unsafe { self.buffer[self.head].assume_init_ref() })
    }

    /// Returns a mutable reference to the oldest element.
    pub fn front_mut(&mut self) -> Result<&mut T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        let head = self.head;
        // SAFETY: len > 0, so the slot at head is initialized.
        Ok(unsafe { self.buffer[head].assume_init_mut() })
    }

    /// Returns the element at logical position `index` (0 is the front).
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let idx = self.wrap_add(self.head, index);
        // SAFETY: index < len, so idx is inside the live range.
        Some(unsafe { self.buffer[idx].assume_init_ref() })
    }

    /// Returns a front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    // ---------------------------------------------------------------------
    // MUTATION
    // ---------------------------------------------------------------------

    /// Appends `value` at the back, growing the buffer first if it is full.
    ///
    /// # Panics
    ///
    /// Panics if the grown capacity overflows `usize`.
    pub fn push(&mut self, value: T) {
        if self.is_full() {
            self.grow();
        }

        let tail = self.tail;
        self.buffer[tail].write(value);
        self.tail = self.wrap_add(tail, 1);
        self.len += 1;

        debug_assert_bounded_count!(self.len, self.capacity());
        debug_assert_cursors!(self.head, self.tail, self.len, self.capacity());

        if self.config.enable_metrics {
            self.metrics.record_push();
        }
    }

    /// Removes and returns the oldest element.
    ///
    /// On an empty queue this returns `QueueError::Empty` and changes nothing.
    /// Capacity is never reduced.
    pub fn pop(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        let head = self.head;
        // SAFETY: len > 0, so head is initialized. Advancing head below marks
        // the slot uninitialized, so the value is read out exactly once.
        let item = unsafe { self.buffer[head].assume_init_read() };
        self.head = self.wrap_add(head, 1);
        self.len -= 1;

        debug_assert_cursors!(self.head, self.tail, self.len, self.capacity());

        if self.config.enable_metrics {
            self.metrics.record_pop();
        }

        Ok(item)
    }

    /// Drops every element. Capacity is kept and the cursors restart at slot 0.
    ///
    /// If a destructor panics, the remaining elements are still dropped before
    /// the panic propagates.
    pub fn clear(&mut self) {
        /// Keeps dropping the remaining elements if one destructor panics.
        struct ClearOnUnwind<'a, T>(&'a mut RingQueue<T>);

        impl<T> Drop for ClearOnUnwind<'_, T> {
            fn drop(&mut self) {
                self.0.clear();
            }
        }

        while self.len > 0 {
            let head = self.head;
            self.head = self.wrap_add(head, 1);
            self.len -= 1;

            let guard = ClearOnUnwind(self);
            // SAFETY: head was the front of the live range. It has already been
            // unlinked, so neither the guard nor a later drop touches it again.
            unsafe {
                ptr::drop_in_place(guard.0.buffer[head].as_mut_ptr());
            }
            mem::forget(guard);
        }

        self.head = 0;
        self.tail = 0;
    }

    /// Moves the contents out, leaving `self` as an empty queue at its baseline
    /// capacity.
    ///
    /// Every descriptive field is reset together with the buffer handoff.
    pub fn take(&mut self) -> Self {
        log::debug!(
            "ring queue handing off {} elements (capacity {})",
            self.len,
            self.capacity()
        );
        let config = self.config;
        mem::replace(self, Self::with_config(config))
    }

    /// Exchanges the entire state of two queues in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Reallocate to `capacity * growth_factor`, relocating in FIFO order.
    #[cold]
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_mul(self.config.growth_factor)
            .expect("capacity overflow");

        debug_assert_strict_growth!(old_capacity, new_capacity);

        let mut buffer = Self::allocate(new_capacity);
        for (offset, slot) in buffer.iter_mut().take(self.len).enumerate() {
            debug_assert_initialized_read!(offset, self.len);

            let idx = self.wrap_add(self.head, offset);
            // SAFETY: offset < len, so idx is initialized. The old buffer is
            // dropped as `MaybeUninit` below, so each value ends up owned by the
            // new buffer only.
            let item = unsafe { self.buffer[idx].assume_init_read() };
            slot.write(item);
        }

        let relocated = self.len;
        self.buffer = buffer;
        self.head = 0;
        self.tail = relocated;

        debug_assert_cursors!(self.head, self.tail, self.len, self.capacity());

        log::trace!(
            "ring queue grew {} -> {} slots, relocated {} elements",
            old_capacity,
            new_capacity,
            relocated
        );

        if self.config.enable_metrics {
            self.metrics.record_grow(relocated);
        }
    }
}

impl<T> Drop for RingQueue<T> {
    fn drop(&mut self) {
        // Drop all initialized items; the buffer itself frees as MaybeUninit.
        self.clear();
    }
}

impl<T> Default for RingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RingQueue<T> {
    /// Deep copy that keeps the source's capacity and head offset, so the
    /// clone has the same physical layout.
    fn clone(&self) -> Self {
        // Filled through a queue so that a panicking `T::clone` drops the
        // copies written so far.
        let mut copy = Self {
            buffer: Self::allocate(self.capacity()),
            head: self.head,
            tail: self.head,
            len: 0,
            config: self.config,
            metrics: Metrics::new(),
        };

        for item in self {
            let tail = copy.tail;
            copy.buffer[tail].write(item.clone());
            copy.tail = copy.wrap_add(tail, 1);
            copy.len += 1;
        }

        debug_assert_cursors!(copy.head, copy.tail, copy.len, copy.capacity());
        copy
    }

    /// Copy-then-swap: if cloning an element panics, `self` is left untouched.
    fn clone_from(&mut self, source: &Self) {
        let mut fresh = source.clone();
        self.swap(&mut fresh);
    }
}

impl<T: PartialEq> PartialEq for RingQueue<T> {
    /// Compares logical contents only; capacity and head offset are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingQueue<T> {}

impl<T: Hash> Hash for RingQueue<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for RingQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for RingQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INSTRUMENTED_CONFIG;

    #[test]
    fn test_new_queue_is_empty() {
        let queue = RingQueue::<u64>::new();
        assert!(queue.is_empty());
        assert!(queue.empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), 4);
        assert_eq!(queue.front(), Err(QueueError::Empty));
    }

    #[test]
    fn test_push_front_pop() {
        let mut queue = RingQueue::new();
        queue.push(5);
        assert_eq!(queue.front(), Ok(&5));
        assert_eq!(queue.size(), 1);
        assert_eq!(queue.pop(), Ok(5));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_empty_leaves_state_unchanged() {
        let mut queue = RingQueue::new();
        queue.push(1);
        queue.push(2);
        queue.pop().unwrap();
        queue.pop().unwrap();

        let (head, tail, capacity) = (queue.head, queue.tail, queue.capacity());
        assert_eq!(queue.pop(), Err(QueueError::Empty));
        assert_eq!(queue.front(), Err(QueueError::Empty));
        assert_eq!((queue.head, queue.tail, queue.capacity()), (head, tail, capacity));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_pop_reduces_size() {
        let mut queue = RingQueue::new();
        queue.push(580);
        queue.push(585);
        queue.push(589);
        queue.pop().unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.front(), Ok(&585));
    }

    #[test]
    fn test_front_mut() {
        let mut queue = RingQueue::new();
        assert_eq!(queue.front_mut(), Err(QueueError::Empty));
        queue.push(String::from("a"));
        queue.front_mut().unwrap().push('b');
        assert_eq!(queue.pop().unwrap(), "ab");
    }

    #[test]
    fn test_grow_doubles_capacity() {
        let mut queue = RingQueue::new();
        for i in 0..4 {
            queue.push(i);
        }
        assert_eq!(queue.capacity(), 4);
        assert!(queue.is_full());

        queue.push(4);
        assert_eq!(queue.capacity(), 8);
        assert_eq!(queue.head, 0);
        assert_eq!(queue.tail, 5);
    }

    #[test]
    fn test_grow_relocates_wrapped_range() {
        let mut queue = RingQueue::new();
        for i in 0..4 {
            queue.push(i);
        }
        queue.pop().unwrap();
        queue.pop().unwrap();
        queue.push(4);
        queue.push(5);
        // Live range wraps: head = 2, tail = 2.
        assert_eq!(queue.head, 2);
        assert!(queue.is_full());

        queue.push(6);
        assert_eq!(queue.capacity(), 8);
        assert_eq!(queue.head, 0);

        let drained: Vec<_> = std::iter::from_fn(|| queue.pop().ok()).collect();
        assert_eq!(drained, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_clone_preserves_layout() {
        let mut queue = RingQueue::new();
        queue.push(580);
        queue.push(550);
        queue.pop().unwrap();
        queue.push(32);

        let copy = queue.clone();
        assert_eq!(copy, queue);
        assert_eq!(copy.head, queue.head);
        assert_eq!(copy.tail, queue.tail);
        assert_eq!(copy.capacity(), queue.capacity());
    }

    #[test]
    fn test_clone_from_replaces_state() {
        let mut target: RingQueue<i32> = (0..10).collect();
        let source: RingQueue<i32> = (100..103).collect();
        target.clone_from(&source);
        assert_eq!(target, source);
        assert_eq!(target.capacity(), source.capacity());
    }

    #[test]
    fn test_take_resets_source() {
        let mut queue: RingQueue<i32> = (0..10).collect();
        let moved = queue.take();

        assert_eq!(moved.len(), 10);
        assert_eq!(moved.capacity(), 16);
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 4);
        assert_eq!((queue.head, queue.tail), (0, 0));

        queue.push(7);
        assert_eq!(queue.front(), Ok(&7));
    }

    #[test]
    fn test_swap_exchanges_everything() {
        let mut a: RingQueue<i32> = (0..10).collect();
        let mut b: RingQueue<i32> = RingQueue::new();
        b.push(42);

        a.swap(&mut b);
        assert_eq!(a.len(), 1);
        assert_eq!(a.capacity(), 4);
        assert_eq!(a.front(), Ok(&42));
        assert_eq!(b.len(), 10);
        assert_eq!(b.capacity(), 16);
        assert_eq!(b.front(), Ok(&0));
    }

    #[test]
    fn test_equality_ignores_layout() {
        let mut a = RingQueue::new();
        a.push(5);

        let mut b = RingQueue::with_capacity(64);
        b.push(580);
        b.push(550);
        b.pop().unwrap();
        b.pop().unwrap();
        b.push(5);

        assert_ne!(a.head, b.head);
        assert_eq!(a, b);

        b.push(6);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_matches_equality() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(queue: &RingQueue<u32>) -> u64 {
            let mut hasher = DefaultHasher::new();
            queue.hash(&mut hasher);
            hasher.finish()
        }

        let direct: RingQueue<u32> = (0..6).collect();
        let mut rotated = RingQueue::new();
        for i in 0..3 {
            rotated.push(100 + i);
            rotated.pop().unwrap();
        }
        rotated.extend(0..6);

        assert_eq!(direct, rotated);
        assert_eq!(hash_of(&direct), hash_of(&rotated));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut queue: RingQueue<i32> = (0..20).collect();
        let capacity = queue.capacity();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), capacity);
        queue.push(1);
        assert_eq!(queue.front(), Ok(&1));
    }

    #[test]
    fn test_get_and_debug() {
        let mut queue = RingQueue::new();
        for i in 0..4 {
            queue.push(i);
        }
        queue.pop().unwrap();
        queue.push(4);

        assert_eq!(queue.get(0), Some(&1));
        assert_eq!(queue.get(3), Some(&4));
        assert_eq!(queue.get(4), None);
        assert_eq!(format!("{:?}", queue), "[1, 2, 3, 4]");
    }

    #[test]
    fn test_metrics_counts_grows() {
        let mut queue = RingQueue::with_config(INSTRUMENTED_CONFIG);
        for i in 0..100 {
            queue.push(i);
        }
        for _ in 0..40 {
            queue.pop().unwrap();
        }

        let metrics = queue.metrics();
        assert_eq!(metrics.pushes, 100);
        assert_eq!(metrics.pops, 40);
        // 4 -> 8 -> 16 -> 32 -> 64 -> 128
        assert_eq!(metrics.grows, 5);
        assert_eq!(metrics.relocated, 4 + 8 + 16 + 32 + 64);
    }

    #[test]
    fn test_metrics_disabled_by_default() {
        let mut queue = RingQueue::new();
        for i in 0..10 {
            queue.push(i);
        }
        assert_eq!(queue.metrics(), Metrics::default());
    }

    #[test]
    fn test_drop_releases_live_items_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        struct DropTracker {
            _id: u64,
        }

        impl Drop for DropTracker {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        DROP_COUNT.store(0, Ordering::SeqCst);

        {
            let mut queue = RingQueue::new();
            for i in 0..10 {
                queue.push(DropTracker { _id: i });
            }
            // Popped items are dropped by the caller
            drop(queue.pop().unwrap());
            drop(queue.pop().unwrap());
            assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 2);
        }

        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 10);
    }
}
