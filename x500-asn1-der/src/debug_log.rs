#[cfg(not(feature = "debug_log"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug_log")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        ::log::trace!(target: "x500_asn1_der", $($arg)*)
    };
}
