// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Forward a call to an optional progress sink.
///
/// `notify!(progress, log("Scraping..."))` expands to
/// `if let Some(p) = progress.as_deref_mut() { p.log("Scraping...") }`.
#[macro_export]
macro_rules! notify {
    ($progress:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        if let Some(p) = $progress.as_deref_mut() {
            p.$method($($arg),*);
        }
    };
}
