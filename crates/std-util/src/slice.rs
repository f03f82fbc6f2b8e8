#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {{
        let actual = &$e;
        if !actual.is_empty() {
            panic!("expected empty; actual={:?}", actual);
        }
    }};
}

/// Asserts no two items of the iterable are equal.
#[macro_export]
macro_rules! assert_unique {
    ($e:expr) => {{
        let items: Vec<_> = $e.into_iter().collect();
        for (i, lhs) in items.iter().enumerate() {
            for rhs in &items[i + 1..] {
                if lhs == rhs {
                    panic!("duplicate item; item={:?}; all={:?}", lhs, items);
                }
            }
        }
    }};
}
