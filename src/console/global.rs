// src/console/global.rs

//! Process-wide console instance
//!
//! The kernel owns exactly one display. It is installed once during
//! startup and then reached through [`with_global`], which holds the lock
//! with interrupts disabled so an interrupt handler printing to the screen
//! cannot deadlock against the code it interrupted.

use super::{CellBuffer, Console, TextModeBuffer};
use crate::arch::{PortBus, X86PortBus};
use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;
use ::x86_64::instructions::interrupts;
use spin::{Mutex, Once};

/// Console driving the real text buffer and CRT controller.
pub type HardwareConsole = Console<TextModeBuffer, X86PortBus>;

static CONSOLE: Once<Mutex<HardwareConsole>> = Once::new();

/// Install the global console, clear the screen and enable the cursor.
///
/// # Errors
///
/// Returns [`ConsoleError::AlreadyInitialized`] on the second call.
///
/// # Safety
///
/// Same contract as [`TextModeBuffer::new`] and [`X86PortBus::new`]: ring 0,
/// `0xB8000` identity mapped, and no other driver of the CRT controller.
pub unsafe fn init_global(
    config: ConsoleConfig,
) -> Result<&'static Mutex<HardwareConsole>, ConsoleError> {
    install(&CONSOLE, || {
        // SAFETY: forwarded from the caller.
        unsafe { Console::with_config(TextModeBuffer::new(), X86PortBus::new(), config) }
    })
}

/// Build, initialize and store a console in `cell` unless one is there.
///
/// Only the caller whose closure runs inside `call_once` succeeds; a
/// concurrent caller that waited on it gets `AlreadyInitialized`.
fn install<B, P, F>(
    cell: &Once<Mutex<Console<B, P>>>,
    make: F,
) -> Result<&Mutex<Console<B, P>>, ConsoleError>
where
    B: CellBuffer,
    P: PortBus,
    F: FnOnce() -> Console<B, P>,
{
    let mut installed = false;
    let console = cell.call_once(|| {
        installed = true;
        let mut console = make();
        console.init();
        Mutex::new(console)
    });
    if !installed {
        log::debug!("global console already installed");
        return Err(ConsoleError::AlreadyInitialized);
    }
    log::debug!("global console installed");
    Ok(console)
}

/// The global console, if installed.
pub fn global() -> Option<&'static Mutex<HardwareConsole>> {
    CONSOLE.get()
}

/// Run `f` on the global console with interrupts disabled.
///
/// # Errors
///
/// Returns [`ConsoleError::NotInitialized`] before [`init_global`].
pub fn with_global<F, R>(f: F) -> Result<R, ConsoleError>
where
    F: FnOnce(&mut HardwareConsole) -> R,
{
    let console = CONSOLE.get().ok_or(ConsoleError::NotInitialized)?;
    Ok(interrupts::without_interrupts(|| f(&mut console.lock())))
}
