//! # Frame Synchronisation
//!
//! The display draws 228 scanlines per frame. Lines 0-159 are visible; lines
//! 160-227 are the vertical blank, when VRAM and palette writes cannot tear.
//!
//! [`wait_for_vblank`] blocks until the *start* of the next v-blank. It spins
//! while the counter is still inside a v-blank, then spins until the counter
//! reaches line 160 again, so a fast game loop never runs twice in the same
//! blank. There is no timeout.
//!
//! The counter is read through [`ScanlineSource`]; on a host
//! [`SteppedScanlines`] stands in for the display.

use core::cell::Cell;

use log::trace;

use crate::bus::Bus;
use crate::register::VerticalCounter;

/// First scanline of the vertical blank.
pub const VBLANK_START: u16 = 160;
/// Scanlines per frame, blank included.
pub const SCANLINES: u16 = 228;

/// Something that knows which scanline is being drawn.
pub trait ScanlineSource {
    fn scanline(&self) -> u16;
}

impl<B: Bus> ScanlineSource for VerticalCounter<'_, B> {
    #[inline(always)]
    fn scanline(&self) -> u16 {
        self.read().get()
    }
}

/// Spin until the counter crosses into the vertical blank.
pub fn wait_for_vblank<S: ScanlineSource + ?Sized>(source: &S) {
    while source.scanline() >= VBLANK_START {
        core::hint::spin_loop();
    }
    while source.scanline() < VBLANK_START {
        core::hint::spin_loop();
    }
}

/// A scanline counter that advances one line before every read.
///
/// ```ignore
/// let clock = SteppedScanlines::new(150);
/// wait_for_vblank(&clock);
/// assert_eq!(clock.line(), 160);
/// ```
#[derive(Debug, Default)]
pub struct SteppedScanlines {
    line: Cell<u16>,
    reads: Cell<u32>,
}

impl SteppedScanlines {
    /// Start at `line`; the first read returns `line + 1`.
    pub fn new(line: u16) -> Self {
        Self {
            line: Cell::new(line % SCANLINES),
            reads: Cell::new(0),
        }
    }

    /// The line returned by the last read.
    pub fn line(&self) -> u16 {
        self.line.get()
    }

    /// Number of reads so far.
    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl ScanlineSource for SteppedScanlines {
    fn scanline(&self) -> u16 {
        let line = (self.line.get() + 1) % SCANLINES;
        self.line.set(line);
        self.reads.set(self.reads.get() + 1);
        trace!("scanline {}", line);
        line
    }
}
