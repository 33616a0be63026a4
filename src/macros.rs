//! Printf-style entry points.
//!
//! `debugf!(logger, "x = {}", x)` expands to `logger.debugf(format_args!(..))`; the
//! `g`-prefixed variants write through [`global::logger`](crate::global::logger).

#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! tracef {
    ($logger:expr, $($arg:tt)+) => {
        $logger.tracef(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! gdebugf {
    ($($arg:tt)+) => {
        $crate::global::logger().debugf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! gtracef {
    ($($arg:tt)+) => {
        $crate::global::logger().tracef(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! ginfof {
    ($($arg:tt)+) => {
        $crate::global::logger().infof(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! gwarnf {
    ($($arg:tt)+) => {
        $crate::global::logger().warnf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! gerrorf {
    ($($arg:tt)+) => {
        $crate::global::logger().errorf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! gfatalf {
    ($($arg:tt)+) => {
        $crate::global::logger().fatalf(::std::format_args!($($arg)+))
    };
}
