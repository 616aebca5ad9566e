/// Returns early with `$error` when `$predicate` does not hold.
///
/// Like `assert!`, but for validation paths that must not panic.
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !($predicate) {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
