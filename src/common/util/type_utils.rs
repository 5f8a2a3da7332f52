use std::sync::Arc;

use parking_lot::RwLock;

pub type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic() {
        let atomic_value = atomic(5);
        assert_eq!(*atomic_value.read(), 5);
    }

    #[test]
    fn test_atomic_write() {
        let atomic_value = atomic(5);
        *atomic_value.write() = 10;
        assert_eq!(*atomic_value.read(), 10);
    }

    #[test]
    fn test_atomic_shared_across_clones() {
        let atomic_value = atomic(String::from("a"));
        let clone = atomic_value.clone();
        atomic_value.write().push('b');
        assert_eq!(*clone.read(), "ab");
    }
}
