//! ASCII renderers for pegs and boards.

use std::fmt::Write as _;

use crate::session::{Frame, Session};
use crate::trace::{PegState, SearchStatus};

const DISK_GLYPH: char = '■';
const PEG_GLYPH: char = '|';
const PEG_GAP: &str = "  ";

/// Draw the three pegs for a `disks`-disk tower, top level first.
///
/// Every cell is `2 * disks - 1` wide: a disk `d` is `2d - 1` glyphs centred
/// in it, an empty level is the bare peg. Each row ends with a newline.
#[must_use]
pub fn render_pegs(pegs: &PegState, disks: usize) -> String {
    let mut out = String::new();
    for level in (0..disks).rev() {
        for peg in pegs.pegs() {
            match peg.get(level) {
                Some(&disk) => {
                    let pad = " ".repeat(disks.saturating_sub(disk));
                    out.push_str(&pad);
                    out.extend(std::iter::repeat(DISK_GLYPH).take((2 * disk).saturating_sub(1)));
                    out.push_str(&pad);
                }
                None => {
                    let pad = " ".repeat(disks.saturating_sub(1));
                    out.push_str(&pad);
                    out.push(PEG_GLYPH);
                    out.push_str(&pad);
                }
            }
            out.push_str(PEG_GAP);
        }
        out.push('\n');
    }
    out
}

/// Draw an N-Queens board: `Q` for a queen, `.` otherwise.
#[must_use]
pub fn render_board(board: &[Option<usize>]) -> String {
    let n = board.len();
    board
        .iter()
        .map(|placed| {
            (0..n)
                .map(|c| if *placed == Some(c) { "Q" } else { "." })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Step {position}/{len}`.
#[must_use]
pub fn render_header(position: usize, len: usize) -> String {
    format!("Step {position}/{len}")
}

/// Status line for an N-Queens position.
#[must_use]
pub fn render_status(status: SearchStatus) -> String {
    status.to_string()
}

/// Header, status and drawing for the session's current position.
#[must_use]
pub fn render_frame(session: &Session) -> String {
    let mut out = render_header(session.position(), session.len());
    match session.frame() {
        Frame::Hanoi { pegs, disks } => {
            out.push_str("\n\n");
            out.push_str(&render_pegs(pegs, disks));
        }
        Frame::Queens { board, status } => {
            let _ = write!(out, " - {}\n\n{}\n", render_status(status), render_board(board));
        }
    }
    out
}
