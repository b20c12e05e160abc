//! Access to the global debug console.
//!
//! The kernel proper owns the actual output device. It registers the
//! device here once during boot, and everything in this crate prints
//! through the [`lock`] guard. Output produced before a device is
//! installed is dropped.

use core::fmt;
use spin::{Mutex, MutexGuard};

static CONSOLE: Mutex<Console> = Mutex::new(Console { sink: None });

/// The global console, holding the currently installed output device.
pub struct Console {
    sink: Option<&'static mut (dyn fmt::Write + Send)>,
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match &mut self.sink {
            Some(sink) => sink.write_str(s),
            None => Ok(()),
        }
    }
}

/// Install the device that backs the console, replacing any previous one.
pub fn set_sink(sink: &'static mut (dyn fmt::Write + Send)) {
    CONSOLE.lock().sink = Some(sink);
}

/// Lock the console for exclusive access.
///
/// The caller must not hold the guard across another `lock` call, which
/// would deadlock.
pub fn lock() -> MutexGuard<'static, Console> {
    CONSOLE.lock()
}

/// Print to the console.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::console::_print(::core::format_args!($($arg)*)));
}

/// Print to the console, with a trailing newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", ::core::format_args!($($arg)*)));
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments<'_>) {
    use core::fmt::Write;

    lock().write_fmt(args).expect("failed to write to console");
}
