//! Verification target for memview.
//!
//! Prints a set of known values with their addresses, one
//! `"{type}: {value} at {address}"` line each, then waits for a line on stdin
//! before exiting. On Linux it also prints a `guard` line: an address 8 bytes
//! before an unmapped page.

use std::hint::black_box;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use memview_core::{Value, ValueReport};

const PROMPT: &str = "Press ENTER to quit...";

fn address_of<T>(value: &T) -> u64 {
    value as *const T as usize as u64
}

fn main() -> Result<()> {
    let char_value: u8 = black_box(55);
    let short_value: i16 = black_box(12041);
    let ushort_value: u16 = black_box(54310);
    let int_value: i32 = black_box(-988324);
    let uint_value: u32 = black_box(2134);
    let float_value: f32 = black_box(28.75);
    let double_value: f64 = black_box(-4.125);
    let bytes: [u8; 9] = black_box([11, 22, 33, 44, 55, 66, 77, 88, 99]);

    let reports = [
        ValueReport {
            value: Value::Char(char_value),
            address: address_of(&char_value),
        },
        ValueReport {
            value: Value::Short(short_value),
            address: address_of(&short_value),
        },
        ValueReport {
            value: Value::UnsignedShort(ushort_value),
            address: address_of(&ushort_value),
        },
        ValueReport {
            value: Value::Int(int_value),
            address: address_of(&int_value),
        },
        ValueReport {
            value: Value::UnsignedInt(uint_value),
            address: address_of(&uint_value),
        },
        ValueReport {
            value: Value::Float(float_value),
            address: address_of(&float_value),
        },
        ValueReport {
            value: Value::Double(double_value),
            address: address_of(&double_value),
        },
        ValueReport {
            value: Value::Bytes(bytes.to_vec()),
            address: address_of(&bytes),
        },
    ];

    #[cfg(target_os = "linux")]
    let guard = guard::GuardedPage::map()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for report in &reports {
        writeln!(out, "{}", report)?;
    }
    #[cfg(target_os = "linux")]
    writeln!(out, "guard: 0 at 0x{:x}", guard.tail_address())?;
    writeln!(out, "{}", PROMPT)?;
    out.flush()?;
    drop(out);

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    // Keep every reported location alive until the reader is done.
    black_box((
        &char_value,
        &short_value,
        &ushort_value,
        &int_value,
        &uint_value,
        &float_value,
        &double_value,
        &bytes,
    ));
    Ok(())
}

#[cfg(target_os = "linux")]
mod guard {
    use std::io;

    /// One readable page followed by an unmapped one.
    pub struct GuardedPage {
        base: *mut libc::c_void,
        page: usize,
    }

    impl GuardedPage {
        pub fn map() -> io::Result<Self> {
            // SAFETY: sysconf has no preconditions.
            let page = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
            if page <= 0 {
                return Err(io::Error::last_os_error());
            }
            let page = page as usize;

            // SAFETY: anonymous private mapping with no address hint.
            let base = unsafe {
                libc::mmap(
                    std::ptr::null_mut(),
                    page * 2,
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                    -1,
                    0,
                )
            };
            if base == libc::MAP_FAILED {
                return Err(io::Error::last_os_error());
            }

            // SAFETY: the second page lies inside the mapping created above.
            if unsafe { libc::munmap(base.cast::<u8>().add(page).cast(), page) } != 0 {
                let err = io::Error::last_os_error();
                // SAFETY: undo the whole mapping; nothing references it yet.
                unsafe { libc::munmap(base, page * 2) };
                return Err(err);
            }

            Ok(Self { base, page })
        }

        pub fn tail_address(&self) -> u64 {
            (self.base as usize + self.page - 8) as u64
        }
    }

    impl Drop for GuardedPage {
        fn drop(&mut self) {
            // SAFETY: `base` is the first page mapped in `map`, still mapped.
            unsafe { libc::munmap(self.base, self.page) };
        }
    }
}
