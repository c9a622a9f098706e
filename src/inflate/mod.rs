//! Streaming DEFLATE decoder (RFC 1951).
//!
//! The context owns a 64 KiB circular window that doubles as the emission
//! buffer: decoded bytes are written into it, match copies read back from
//! it, and the caller receives borrowed views of it. An emission surfaces
//! whenever the window wraps and at end of stream; the view returned by
//! [`output`](Inflate::output) is only valid until the next
//! [`inflate`](Inflate::inflate) call, because the window then starts
//! overwriting it.
//!
//! Input is consumed from the front of the caller's slice through a small
//! bit reader; every decode step is all-or-nothing, so the machine can
//! stop on input starvation mid-block and resume exactly where it paused.

mod huffman;

pub use huffman::{Decode, SymTable, MAX_BITS};

use crate::bits::BitReader;

/// Window (and emission buffer) size: twice the 32 KiB LZ77 distance
/// horizon, so a wrap never overwrites bytes still reachable by a match.
pub const WINDOW_SIZE: usize = 1 << 16;

/// Longest match length.
pub const MATCH_MAX: usize = 258;

const LITLEN_SYMS: usize = 288;
const DIST_SYMS: usize = 30;
const CLEN_SYMS: usize = 19;

// length symbols 257..=285: base values and extra bits
const LEN_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115,
    131, 163, 195, 227, 258,
];
const LEN_EXTRA: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

// distance symbols 0..=29: base values and extra bits
const DIST_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];
const DIST_EXTRA: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12,
    13, 13,
];

// order in which the code-length code lengths arrive
const CLEN_ORDER: [usize; CLEN_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Decoder failure, one kind per grammar production.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InflateError {
    /// Input ended (with `flush`) before the stream completed.
    Incomplete,
    /// Literal/length symbol invalid or unassigned.
    LitLenCode,
    /// Distance symbol invalid, unassigned, or reaching before the start
    /// of output.
    DistCode,
    /// Stored-block LEN / ~NLEN mismatch.
    StoredHeader,
    /// Reserved block type, header counts out of range, or a length
    /// repeat with no previous length / overflowing the alphabet.
    DynHeader,
    /// Bit-length code table unbuildable or produced a bad symbol.
    DynBitLenTree,
    /// Literal/length code table unbuildable (or missing the end code).
    DynLitLenTree,
    /// Distance code table unbuildable.
    DynDistTree,
}

impl InflateError {
    pub fn error_name(&self) -> &'static str {
        match self {
            InflateError::Incomplete => "incomplete stream",
            InflateError::LitLenCode => "bad literal/length code",
            InflateError::DistCode => "bad distance code",
            InflateError::StoredHeader => "bad stored-block header",
            InflateError::DynHeader => "bad dynamic-block header",
            InflateError::DynBitLenTree => "bad bit-length tree",
            InflateError::DynLitLenTree => "bad literal/length tree",
            InflateError::DynDistTree => "bad distance tree",
        }
    }
}

impl core::fmt::Display for InflateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.error_name())
    }
}

impl std::error::Error for InflateError {}

/// What one `inflate` call produced.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    /// Input exhausted with no emission pending; feed more bytes.
    NeedInput,
    /// Bytes available at [`output`](Inflate::output); consume them before
    /// the next call.
    Emit,
    /// Stream complete; [`output`](Inflate::output) holds the final bytes
    /// (possibly none).
    End,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    BlockHead,
    StoredHead,
    StoredCopy,
    DynHead,
    DynCodeLens,
    DynSymLens,
    Block,
    MatchLen,
    MatchDist,
    MatchCopy,
    Done,
}

/// Streaming inflate context.
///
/// Large (the window plus symbol tables); [`new`](Inflate::new) boxes it so
/// the value never lands on a thread stack by accident.
pub struct Inflate {
    window: [u8; WINDOW_SIZE],
    pos: usize,
    emit_start: usize,
    total_out: u64,

    bits: BitReader,

    litlen: SymTable,
    dist: SymTable,
    clen: SymTable,
    l_sym: [u16; LITLEN_SYMS],
    d_sym: [u16; DIST_SYMS],
    c_sym: [u16; CLEN_SYMS],
    lens: [u8; LITLEN_SYMS + DIST_SYMS],

    state: State,
    last_block: bool,
    n_lit: usize,
    n_dist: usize,
    n_clen: usize,
    idx: usize,
    rep_sym: i32,
    copy_len: usize,
    copy_dist: usize,

    out_start: usize,
    out_len: usize,
}

impl Inflate {
    pub fn new() -> Box<Self> {
        Box::new(Inflate {
            window: [0; WINDOW_SIZE],
            pos: 0,
            emit_start: 0,
            total_out: 0,
            bits: BitReader::new(),
            litlen: SymTable::default(),
            dist: SymTable::default(),
            clen: SymTable::default(),
            l_sym: [0; LITLEN_SYMS],
            d_sym: [0; DIST_SYMS],
            c_sym: [0; CLEN_SYMS],
            lens: [0; LITLEN_SYMS + DIST_SYMS],
            state: State::BlockHead,
            last_block: false,
            n_lit: 0,
            n_dist: 0,
            n_clen: 0,
            idx: 0,
            rep_sym: -1,
            copy_len: 0,
            copy_dist: 0,
            out_start: 0,
            out_len: 0,
        })
    }

    /// Reset to a fresh stream without touching the allocation.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.emit_start = 0;
        self.total_out = 0;
        self.bits = BitReader::new();
        self.state = State::BlockHead;
        self.last_block = false;
        self.rep_sym = -1;
        self.out_start = 0;
        self.out_len = 0;
    }

    /// The bytes of the most recent [`Step::Emit`] / [`Step::End`]. Valid
    /// until the next [`inflate`](Inflate::inflate) call.
    pub fn output(&self) -> &[u8] {
        &self.window[self.out_start..self.out_start + self.out_len]
    }

    /// Total decompressed bytes produced so far (including unconsumed
    /// emissions).
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Whole input bytes sitting unread in the bit reader. After
    /// [`Step::End`] these belong to whatever framing follows the deflate
    /// stream (a gzip trailer, say); the caller prepends them to the
    /// unconsumed remainder of its own slice.
    pub fn leftover(&self) -> &[u8] {
        self.bits.remaining_bytes()
    }

    /// Drive the state machine, consuming from the front of `*src`.
    ///
    /// `flush` asserts no input will follow the current slice; starvation
    /// then becomes [`InflateError::Incomplete`] instead of
    /// [`Step::NeedInput`].
    pub fn inflate(&mut self, src: &mut &[u8], flush: bool) -> Result<Step, InflateError> {
        self.out_len = 0;

        loop {
            let rest: &[u8] = *src;
            let n = self.bits.fill(rest);
            *src = &rest[n..];

            let starved = match self.step()? {
                StepInner::Progress => false,
                StepInner::Starved => true,
                StepInner::Emitted => return Ok(Step::Emit),
                StepInner::Finished => {
                    // byte-align so leftover() sees the trailing framing
                    self.bits.skip_to_byte();
                    self.flush_pending();
                    self.state = State::Done;
                    return Ok(Step::End);
                }
            };

            if starved {
                if !src.is_empty() {
                    continue;
                }
                if flush {
                    return Err(InflateError::Incomplete);
                }
                return Ok(Step::NeedInput);
            }
        }
    }

    fn flush_pending(&mut self) {
        self.out_start = self.emit_start;
        self.out_len = self.pos - self.emit_start;
        self.emit_start = self.pos;
    }

    /// Append one decoded byte; returns `true` when the window wrapped and
    /// an emission is now pending.
    fn push_byte(&mut self, b: u8) -> bool {
        self.window[self.pos] = b;
        self.pos += 1;
        self.total_out += 1;
        if self.pos == WINDOW_SIZE {
            self.out_start = self.emit_start;
            self.out_len = WINDOW_SIZE - self.emit_start;
            self.pos = 0;
            self.emit_start = 0;
            true
        } else {
            false
        }
    }

    fn step(&mut self) -> Result<StepInner, InflateError> {
        match self.state {
            State::BlockHead => {
                if self.last_block {
                    return Ok(StepInner::Finished);
                }
                let Some(head) = self.bits.take(3) else {
                    return Ok(StepInner::Starved);
                };
                self.last_block = head & 1 != 0;
                match head >> 1 {
                    0 => {
                        self.bits.skip_to_byte();
                        self.state = State::StoredHead;
                    }
                    1 => {
                        self.fixed_tables();
                        self.state = State::Block;
                    }
                    2 => self.state = State::DynHead,
                    _ => return Err(InflateError::DynHeader),
                }
                Ok(StepInner::Progress)
            }

            State::StoredHead => {
                let Some(v) = self.bits.take(32) else {
                    return Ok(StepInner::Starved);
                };
                let len = v & 0xffff;
                let nlen = v >> 16;
                if len != !nlen & 0xffff {
                    return Err(InflateError::StoredHeader);
                }
                self.copy_len = len as usize;
                self.state = State::StoredCopy;
                Ok(StepInner::Progress)
            }

            State::StoredCopy => {
                while self.copy_len != 0 {
                    let Some(b) = self.bits.take(8) else {
                        return Ok(StepInner::Starved);
                    };
                    self.copy_len -= 1;
                    if self.push_byte(b as u8) {
                        return Ok(StepInner::Emitted);
                    }
                }
                self.state = State::BlockHead;
                Ok(StepInner::Progress)
            }

            State::DynHead => {
                let Some(v) = self.bits.take(14) else {
                    return Ok(StepInner::Starved);
                };
                self.n_lit = (v & 0x1f) as usize + 257;
                self.n_dist = ((v >> 5) & 0x1f) as usize + 1;
                self.n_clen = ((v >> 10) & 0xf) as usize + 4;
                if self.n_lit > 286 || self.n_dist > DIST_SYMS {
                    return Err(InflateError::DynHeader);
                }
                self.idx = 0;
                self.state = State::DynCodeLens;
                Ok(StepInner::Progress)
            }

            State::DynCodeLens => {
                let mut clens = [0u8; CLEN_SYMS];
                // already-read entries live in lens[] scratch
                while self.idx < self.n_clen {
                    let Some(v) = self.bits.take(3) else {
                        return Ok(StepInner::Starved);
                    };
                    self.lens[self.idx] = v as u8;
                    self.idx += 1;
                }
                for (i, &ord) in CLEN_ORDER.iter().enumerate() {
                    clens[ord] = if i < self.n_clen { self.lens[i] } else { 0 };
                }
                if self.clen.build(&clens, &mut self.c_sym).is_err() {
                    return Err(InflateError::DynBitLenTree);
                }
                self.idx = 0;
                self.rep_sym = -1;
                self.lens.fill(0);
                self.state = State::DynSymLens;
                Ok(StepInner::Progress)
            }

            State::DynSymLens => {
                let total = self.n_lit + self.n_dist;
                while self.idx < total {
                    if self.rep_sym < 0 {
                        match self.clen.decode(&mut self.bits, &self.c_sym) {
                            Decode::Starved => return Ok(StepInner::Starved),
                            Decode::Bad => return Err(InflateError::DynBitLenTree),
                            Decode::Sym(s) if s < 16 => {
                                self.lens[self.idx] = s as u8;
                                self.idx += 1;
                                continue;
                            }
                            Decode::Sym(s) => self.rep_sym = i32::from(s),
                        }
                    }

                    let (extra_bits, base, value) = match self.rep_sym {
                        16 => {
                            if self.idx == 0 {
                                return Err(InflateError::DynHeader);
                            }
                            (2, 3, self.lens[self.idx - 1])
                        }
                        17 => (3, 3, 0),
                        _ => (7, 11, 0),
                    };
                    let Some(extra) = self.bits.take(extra_bits) else {
                        return Ok(StepInner::Starved);
                    };
                    self.rep_sym = -1;

                    let run = base + extra as usize;
                    if self.idx + run > total {
                        return Err(InflateError::DynHeader);
                    }
                    self.lens[self.idx..self.idx + run].fill(value);
                    self.idx += run;
                }

                // end-of-block code must exist
                if self.lens[256] == 0 {
                    return Err(InflateError::DynLitLenTree);
                }
                let (lit_lens, dist_lens) = self.lens.split_at(self.n_lit);
                if self.litlen.build(lit_lens, &mut self.l_sym).is_err() {
                    return Err(InflateError::DynLitLenTree);
                }
                if self.dist.build(&dist_lens[..self.n_dist], &mut self.d_sym).is_err() {
                    return Err(InflateError::DynDistTree);
                }
                self.state = State::Block;
                Ok(StepInner::Progress)
            }

            State::Block => {
                loop {
                    match self.litlen.decode(&mut self.bits, &self.l_sym) {
                        Decode::Starved => return Ok(StepInner::Starved),
                        Decode::Bad => return Err(InflateError::LitLenCode),
                        Decode::Sym(s) if s < 256 => {
                            if self.push_byte(s as u8) {
                                return Ok(StepInner::Emitted);
                            }
                        }
                        Decode::Sym(256) => {
                            self.state = State::BlockHead;
                            return Ok(StepInner::Progress);
                        }
                        Decode::Sym(s) => {
                            if s > 285 {
                                return Err(InflateError::LitLenCode);
                            }
                            self.idx = usize::from(s) - 257;
                            self.state = State::MatchLen;
                            return Ok(StepInner::Progress);
                        }
                    }
                }
            }

            State::MatchLen => {
                let Some(extra) = self.bits.take(u32::from(LEN_EXTRA[self.idx])) else {
                    return Ok(StepInner::Starved);
                };
                self.copy_len = usize::from(LEN_BASE[self.idx]) + extra as usize;
                self.state = State::MatchDist;
                Ok(StepInner::Progress)
            }

            State::MatchDist => {
                let s = match self.dist.decode(&mut self.bits, &self.d_sym) {
                    Decode::Starved => return Ok(StepInner::Starved),
                    Decode::Bad => return Err(InflateError::DistCode),
                    Decode::Sym(s) => usize::from(s),
                };
                if s >= DIST_SYMS {
                    return Err(InflateError::DistCode);
                }
                let Some(extra) = self.bits.take(u32::from(DIST_EXTRA[s])) else {
                    // re-decode the symbol on resume: put it back by state
                    self.idx = s;
                    self.state = State::MatchCopy;
                    self.copy_dist = 0;
                    return Ok(StepInner::Starved);
                };
                let dist = usize::from(DIST_BASE[s]) + extra as usize;
                if (dist as u64) > self.total_out {
                    return Err(InflateError::DistCode);
                }
                self.copy_dist = dist;
                self.state = State::MatchCopy;
                Ok(StepInner::Progress)
            }

            State::MatchCopy => {
                if self.copy_dist == 0 {
                    // distance extras were starved mid-read; finish them now
                    let Some(extra) = self.bits.take(u32::from(DIST_EXTRA[self.idx])) else {
                        return Ok(StepInner::Starved);
                    };
                    let dist = usize::from(DIST_BASE[self.idx]) + extra as usize;
                    if (dist as u64) > self.total_out {
                        return Err(InflateError::DistCode);
                    }
                    self.copy_dist = dist;
                }
                while self.copy_len != 0 {
                    let b = self.window[(self.pos + WINDOW_SIZE - self.copy_dist) % WINDOW_SIZE];
                    self.copy_len -= 1;
                    if self.push_byte(b) {
                        return Ok(StepInner::Emitted);
                    }
                }
                self.state = State::Block;
                Ok(StepInner::Progress)
            }

            State::Done => Ok(StepInner::Finished),
        }
    }

    /// Install the fixed literal/length and distance tables of block
    /// type 01.
    fn fixed_tables(&mut self) {
        let mut lens = [0u8; LITLEN_SYMS];
        for (i, l) in lens.iter_mut().enumerate() {
            *l = match i {
                0..=143 => 8,
                144..=255 => 9,
                256..=279 => 7,
                _ => 8,
            };
        }
        self.litlen.build(&lens, &mut self.l_sym).expect("fixed litlen lengths are canonical");
        let dist_lens = [5u8; DIST_SYMS];
        self.dist.build(&dist_lens, &mut self.d_sym).expect("fixed distance lengths are canonical");
    }
}

enum StepInner {
    Progress,
    Starved,
    Emitted,
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mut stream: &[u8]) -> Result<Vec<u8>, InflateError> {
        let mut ctx = Inflate::new();
        let mut out = Vec::new();
        let src = &mut stream;
        loop {
            match ctx.inflate(src, true)? {
                Step::Emit => out.extend_from_slice(ctx.output()),
                Step::End => {
                    out.extend_from_slice(ctx.output());
                    return Ok(out);
                }
                Step::NeedInput => unreachable!("flush never returns NeedInput"),
            }
        }
    }

    #[test]
    fn stored_block() {
        let stream = [0x01, 0x09, 0x00, 0xf6, 0xff, b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9'];
        assert_eq!(run(&stream).unwrap(), b"123456789");
    }

    #[test]
    fn stored_block_header_mismatch() {
        let stream = [0x01, 0x09, 0x00, 0xf6, 0xfe, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(run(&stream), Err(InflateError::StoredHeader));
    }

    #[test]
    fn fixed_block_with_match() {
        // "abracadabra": seven literals then a (len 4, dist 7) match
        let stream = [0x4b, 0x4c, 0x2a, 0x4a, 0x4c, 0x4e, 0x4c, 0x01, 0x51, 0x00];
        assert_eq!(run(&stream).unwrap(), b"abracadabra");
    }

    #[test]
    fn dynamic_block() {
        let stream = [
            0x05, 0xc0, 0x81, 0x08, 0x00, 0x00, 0x00, 0x00, 0x20, 0xd6, 0xfd, 0x25, 0x0e, 0x04,
        ];
        assert_eq!(run(&stream).unwrap(), b"aaaaa");
    }

    #[test]
    fn truncated_stream_with_flush_is_incomplete() {
        let stream = [0x4b, 0x4c, 0x2a];
        assert_eq!(run(&stream), Err(InflateError::Incomplete));
    }

    #[test]
    fn one_byte_at_a_time_feeding() {
        let stream = [0x4b, 0x4c, 0x2a, 0x4a, 0x4c, 0x4e, 0x4c, 0x01, 0x51, 0x00];
        let mut ctx = Inflate::new();
        let mut out = Vec::new();
        for (i, &b) in stream.iter().enumerate() {
            let last = i == stream.len() - 1;
            let mut src: &[u8] = &[b];
            loop {
                match ctx.inflate(&mut src, last).unwrap() {
                    Step::NeedInput => break,
                    Step::Emit => out.extend_from_slice(ctx.output()),
                    Step::End => {
                        out.extend_from_slice(ctx.output());
                        assert_eq!(out, b"abracadabra");
                        return;
                    }
                }
            }
        }
        panic!("stream did not finish");
    }
}
