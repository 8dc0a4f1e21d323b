pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use portfolio_utils::Apply;
    /// fn greeting(name: Option<&str>) -> String {
    ///     String::from("Hello").apply_map(name, |slf, name| format!("{slf}, {name}"))
    /// }
    /// assert_eq!(greeting(None), "Hello");
    /// assert_eq!(greeting(Some("World")), "Hello, World");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }

    /// Applies the function `f` only if `condition` is true.
    fn apply_if(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self
    where
        Self: Sized,
    {
        if condition {
            f(self)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the predicate")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_if() {
        assert_eq!(1.apply_if(true, |x| x + 1), 2);
        assert_eq!(1.apply_if(false, |x| x + 1), 1);
    }

    #[test]
    fn assert_matches_with_predicate() {
        assert_matches!(Some(42), Some(x) if *x == 42);
    }

    #[test]
    #[should_panic(expected = "did not match pattern")]
    fn assert_matches_mismatch() {
        assert_matches!(None::<i32>, Some(_));
    }
}
