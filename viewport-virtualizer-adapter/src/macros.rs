// Same shims as the core crate, under this crate's own log target.

#[cfg(feature = "tracing")]
macro_rules! alog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "viewport_virtualizer_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! alog {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! atrace {
    ($($tt:tt)*) => {
        alog!(trace, $($tt)*)
    };
}

macro_rules! adebug {
    ($($tt:tt)*) => {
        alog!(debug, $($tt)*)
    };
}

macro_rules! awarn {
    ($($tt:tt)*) => {
        alog!(warn, $($tt)*)
    };
}
