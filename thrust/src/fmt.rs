//! Logging shims.
//!
//! With the `defmt` feature the macros forward to defmt, host tests print to
//! stdout, and everything else compiles to nothing.
#![macro_use]
#![allow(unused_macros)]

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::info!($s $(, $x)*);
            #[cfg(all(test, not(feature = "defmt")))]
            println!(concat!("INFO: ", $s) $(, $x)*);
            #[cfg(not(any(test, feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::error!($s $(, $x)*);
            #[cfg(all(test, not(feature = "defmt")))]
            println!(concat!("ERROR: ", $s) $(, $x)*);
            #[cfg(not(any(test, feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}
