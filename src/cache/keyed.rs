//! Keyed Capability Module
//!
//! The identity contract stored values must satisfy.

/// A value that can report its own stable cache identity.
///
/// The key must be non-empty and must not change for the lifetime of the
/// value: the cache indexes, evicts and removes by this string, and a key
/// that drifts after insertion would strand the entry.
pub trait Keyed {
    /// Returns the identity string this value is cached under.
    fn cache_key(&self) -> &str;
}

impl<T: Keyed + ?Sized> Keyed for std::sync::Arc<T> {
    fn cache_key(&self) -> &str {
        (**self).cache_key()
    }
}

impl<T: Keyed + ?Sized> Keyed for Box<T> {
    fn cache_key(&self) -> &str {
        (**self).cache_key()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Widget {
        id: String,
    }

    impl Keyed for Widget {
        fn cache_key(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn test_keyed_through_arc_and_box() {
        let widget = Widget {
            id: "widget-7".to_string(),
        };

        let arced: Arc<Widget> = Arc::new(widget);
        assert_eq!(arced.cache_key(), "widget-7");

        let boxed: Box<Widget> = Box::new(Widget {
            id: "widget-8".to_string(),
        });
        assert_eq!(boxed.cache_key(), "widget-8");
    }
}
