use std::cmp::Ordering;

/// A total order over items of type `T`.
///
/// The order must stay consistent for the whole lifetime of the tree that uses it; a
/// comparator whose answers change corrupts the tree silently.
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Compare<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders items by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<T> Compare<T> for Natural
where
    T: Ord + ?Sized,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// A three-argument comparison function paired with the opaque context it is called with.
///
/// # Examples
///
/// ```
/// use bbst::{Compare, WithContext};
/// use std::cmp::Ordering;
///
/// // order strings by their byte at a configurable offset
/// let by_offset = WithContext::new(|a: &&str, b: &&str, offset: &usize| {
///     a.as_bytes()[*offset].cmp(&b.as_bytes()[*offset])
/// }, 1);
/// assert_eq!(by_offset.compare(&"az", &"by"), Ordering::Greater);
/// assert_eq!(by_offset.context(), &1);
/// ```
#[derive(Clone, Debug)]
pub struct WithContext<F, X> {
    func: F,
    context: X,
}

impl<F, X> WithContext<F, X> {
    pub fn new(func: F, context: X) -> Self {
        WithContext { func, context }
    }

    pub fn context(&self) -> &X {
        &self.context
    }
}

impl<T, F, X> Compare<T> for WithContext<F, X>
where
    T: ?Sized,
    F: Fn(&T, &T, &X) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.func)(a, b, &self.context)
    }
}
