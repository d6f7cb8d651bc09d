use std::collections::VecDeque;

/// A fixed-capacity ring holding the most recent entries.
/// This structure uses a `VecDeque` internally. When the capacity is exceeded,
/// the oldest element (at the front) is evicted.
#[derive(Debug, Clone)]
pub struct LinkedBox<T> {
    /// `VecDeque` holding the actual data, oldest first
    list: VecDeque<T>,
    /// `size` represents the maximum length of the queue
    size: usize,
}

impl<T> LinkedBox<T> {
    /// Creates a new `LinkedBox` with the specified maximum size.
    ///
    /// # Arguments
    /// * `size` - The maximum number of elements that the ring can hold. A size of
    ///   zero is raised to one so the latest entry is always retained.
    ///
    /// # Returns
    /// A new, empty `LinkedBox` instance.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self { list: VecDeque::with_capacity(size), size }
    }

    /// Pushes an element to the back of the ring.
    ///
    /// If the size limit is exceeded, the element at the front is removed and returned.
    ///
    /// # Arguments
    /// * `item` - The element to be appended.
    pub fn push(&mut self, item: T) -> Option<T> {
        self.list.push_back(item);
        if self.len() > self.size { self.list.pop_front() } else { None }
    }

    /// Iterates from the oldest to the newest element.
    pub fn iter(&self) -> impl Iterator<Item = &T> { self.list.iter() }

    /// Returns the current number of elements in the ring.
    pub fn len(&self) -> usize { self.list.len() }

    /// Checks if the ring is empty.
    pub fn is_empty(&self) -> bool { self.list.is_empty() }
}
