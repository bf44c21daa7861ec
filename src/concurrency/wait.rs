//! Address-based blocking on an `AtomicU32`.
//!
//! Linux uses a private futex, Windows uses `WaitOnAddress`, other targets fall back
//! to a yield loop. Every wait may return spuriously; callers re-check their
//! condition in a loop.

use core::sync::atomic::AtomicU32;
#[cfg(not(any(windows, target_os = "linux")))]
use core::sync::atomic::Ordering;

#[cfg(windows)]
use windows_sys::Win32::System::Threading::{WaitOnAddress, WakeByAddressAll};

#[cfg(target_os = "linux")]
use libc::{SYS_futex, FUTEX_PRIVATE_FLAG, FUTEX_WAIT, FUTEX_WAKE};

#[cfg(target_os = "linux")]
#[inline]
fn futex_wait(addr: *const u32, expected: u32) {
    // SAFETY: `addr` points to a live `AtomicU32`; FUTEX_WAIT only reads it.
    unsafe {
        libc::syscall(
            SYS_futex,
            addr,
            FUTEX_WAIT | FUTEX_PRIVATE_FLAG,
            expected,
            core::ptr::null::<libc::timespec>(),
        );
    }
}

#[cfg(target_os = "linux")]
#[inline]
fn futex_wake(addr: *const u32, count: i32) {
    // SAFETY: `addr` points to a live `AtomicU32`.
    unsafe {
        libc::syscall(SYS_futex, addr, FUTEX_WAKE | FUTEX_PRIVATE_FLAG, count);
    }
}

/// Wakes all threads waiting on the given address.
#[inline]
pub fn wake_all_u32(addr: &AtomicU32) {
    #[cfg(windows)]
    // SAFETY: `addr` is a valid address for the duration of the call.
    unsafe {
        WakeByAddressAll(addr as *const AtomicU32 as *const core::ffi::c_void);
    }
    #[cfg(target_os = "linux")]
    {
        futex_wake(addr.as_ptr(), i32::MAX);
    }
    #[cfg(not(any(windows, target_os = "linux")))]
    {
        let _ = addr;
    }
}

/// Blocks while the value at `addr` equals `expected`.
#[inline]
pub fn wait_on_u32(addr: &AtomicU32, expected: u32) {
    #[cfg(windows)]
    // SAFETY: both pointers are valid for `size_of::<u32>()` bytes.
    unsafe {
        let expected_ptr = &expected as *const u32 as *const core::ffi::c_void;
        let addr_ptr = addr as *const AtomicU32 as *const core::ffi::c_void;
        WaitOnAddress(addr_ptr, expected_ptr, core::mem::size_of::<u32>(), u32::MAX);
    }
    #[cfg(target_os = "linux")]
    {
        futex_wait(addr.as_ptr(), expected);
    }
    #[cfg(not(any(windows, target_os = "linux")))]
    while addr.load(Ordering::Acquire) == expected {
        std::thread::yield_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn wait_returns_after_wake() {
        let flag = Arc::new(AtomicU32::new(0));
        let barrier = Arc::new(Barrier::new(2));
        let flag_thread = flag.clone();
        let barrier_thread = barrier.clone();

        let handle = thread::spawn(move || {
            barrier_thread.wait();
            while flag_thread.load(Ordering::Acquire) == 0 {
                wait_on_u32(&flag_thread, 0);
            }
            flag_thread.load(Ordering::Acquire)
        });

        barrier.wait();
        flag.store(1, Ordering::Release);
        wake_all_u32(&flag);

        let value = handle.join().unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn wait_on_stale_value_does_not_block() {
        let flag = AtomicU32::new(5);
        wait_on_u32(&flag, 4);
    }
}
