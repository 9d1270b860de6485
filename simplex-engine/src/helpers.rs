/// Returns early with a `String` error (converted through `?`) when the two expressions differ.
#[macro_export]
macro_rules! ensure_eq {
    ($expr1: expr, $expr2: expr) => {
        if $expr1 != $expr2 {
            return Err(format!(
                "{0} != {1}\n{0} = {2:?}\n{1} = {3:?}",
                stringify!($expr1),
                stringify!($expr2),
                $expr1,
                $expr2
            ))?;
        }
    };
}

/// Logs `expr = value` at debug level through the value's `Display` and yields the value.
#[macro_export]
macro_rules! dbg_display {
    ($e: expr) => {{
        let val = $e;
        log::debug!(
            "[{}:{}] {} = {}",
            module_path!(),
            line!(),
            stringify!($e),
            val
        );
        val
    }};
}
