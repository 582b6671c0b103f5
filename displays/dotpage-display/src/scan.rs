//! Scan-out ordering for chained 32x16 dot-matrix modules
//!
//! The 32x32 panel is two 32x16 modules on one shift chain, top module
//! first. Modules are 1/4 scan: each scan phase lights rows `phase`,
//! `phase + 4`, `phase + 8` and `phase + 12` of every module at once, so
//! a phase shifts out four rows of the whole chain. For every column byte
//! along the chain the four rows are sent bottom-most first. Data is
//! active low: a lit pixel is a 0 bit, and the leftmost pixel of a byte
//! is its MSB.

use crate::backend::{PANEL_HEIGHT, PANEL_WIDTH};

/// Rows per module
pub const MODULE_HEIGHT: u8 = 16;

/// Scan phases per frame
pub const SCAN_PHASES: u8 = 4;

const MODULES: usize = (PANEL_HEIGHT / MODULE_HEIGHT) as usize;
const MODULE_WIDTH_BYTES: usize = PANEL_WIDTH as usize / 8;
const CHAIN_WIDTH_BYTES: usize = MODULE_WIDTH_BYTES * MODULES;
const ROWS_PER_PHASE: usize = (MODULE_HEIGHT / SCAN_PHASES) as usize;

/// Bytes shifted out per scan phase
pub const PHASE_BYTES: usize = CHAIN_WIDTH_BYTES * ROWS_PER_PHASE;

/// Shift-register bytes for one scan phase
pub fn phase_bytes(rows: &[u32; PANEL_HEIGHT as usize], phase: u8) -> [u8; PHASE_BYTES] {
    let phase = phase % SCAN_PHASES;
    let mut out = [0xFF; PHASE_BYTES];
    let mut i = 0;

    for column in 0..CHAIN_WIDTH_BYTES {
        for quarter in (0..ROWS_PER_PHASE as u8).rev() {
            let module_row = phase + quarter * SCAN_PHASES;
            out[i] = !chain_byte(rows, module_row, column);
            i += 1;
        }
    }

    out
}

/// Lit-high byte for `column` of the chain at `module_row`
fn chain_byte(rows: &[u32; PANEL_HEIGHT as usize], module_row: u8, column: usize) -> u8 {
    let module = column / MODULE_WIDTH_BYTES;
    let x0 = (column % MODULE_WIDTH_BYTES) * 8;
    let y = module * MODULE_HEIGHT as usize + module_row as usize;
    let row = rows[y];

    let mut byte = 0u8;
    for bit in 0..8 {
        if row & (1 << (x0 + bit)) != 0 {
            byte |= 0x80 >> bit;
        }
    }
    byte
}

/// Output-enable time within a phase of `period_us` for a brightness
pub fn on_time_us(brightness: u8, period_us: u32) -> u32 {
    period_us * brightness as u32 / 255
}
