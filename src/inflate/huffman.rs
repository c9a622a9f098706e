//! Canonical Huffman decoding tables for the DEFLATE symbol alphabets.
//!
//! A table is the per-length code count plus the symbols sorted by
//! (length, symbol), which is enough to decode a code by walking lengths and
//! offsetting into the sorted array, with no tree nodes at all.

use crate::bits::BitReader;

/// Longest DEFLATE code length.
pub const MAX_BITS: usize = 15;

/// Count-per-length table over a separate sorted-symbol slice.
#[derive(Clone, Debug, Default)]
pub struct SymTable {
    pub count: [u16; MAX_BITS + 1],
    pub bits_min: u32,
    pub bits_max: u32,
}

/// Outcome of one symbol decode attempt.
pub enum Decode {
    /// A symbol and the number of bits it consumed.
    Sym(u16),
    /// The bit reader ran out before the code resolved; nothing consumed.
    Starved,
    /// The peeked bits match no assigned code.
    Bad,
}

impl SymTable {
    /// Build from per-symbol code lengths (0 = unused), writing the sorted
    /// symbol order into `sym`. Fails on an oversubscribed length set;
    /// incomplete codes are accepted and surface as [`Decode::Bad`] later.
    pub fn build(&mut self, lens: &[u8], sym: &mut [u16]) -> Result<(), ()> {
        self.count = [0; MAX_BITS + 1];
        for &l in lens {
            self.count[usize::from(l)] += 1;
        }
        if usize::from(self.count[0]) == lens.len() {
            // no codes at all: legal for an unused distance alphabet
            self.bits_min = 0;
            self.bits_max = 0;
            return Ok(());
        }

        // Kraft check: left > 0 means incomplete, < 0 oversubscribed
        let mut left: i32 = 1;
        for l in 1..=MAX_BITS {
            left <<= 1;
            left -= i32::from(self.count[l]);
            if left < 0 {
                return Err(());
            }
        }

        // offset of each length's first symbol in the sorted array
        let mut offs = [0u16; MAX_BITS + 1];
        for l in 1..MAX_BITS {
            offs[l + 1] = offs[l] + self.count[l];
        }
        for (s, &l) in lens.iter().enumerate() {
            if l != 0 {
                sym[usize::from(offs[usize::from(l)])] = s as u16;
                offs[usize::from(l)] += 1;
            }
        }

        self.bits_min = (1..=MAX_BITS).find(|&l| self.count[l] != 0).unwrap() as u32;
        self.bits_max = (1..=MAX_BITS).rev().find(|&l| self.count[l] != 0).unwrap() as u32;
        Ok(())
    }

    /// Decode one symbol from `br` without consuming anything until the
    /// whole code is present. Codes arrive MSB-first, one stream bit at a
    /// time.
    pub fn decode(&self, br: &mut BitReader, sym: &[u16]) -> Decode {
        if self.bits_max == 0 {
            return Decode::Bad;
        }

        let (peeked, missing) = br.peek(self.bits_max);
        let avail = self.bits_max - missing;

        let mut code: u32 = 0;
        let mut first: u32 = 0;
        let mut index: u32 = 0;
        for len in 1..=self.bits_max {
            if len > avail {
                return Decode::Starved;
            }
            code |= (peeked >> (len - 1)) & 1;
            let count = u32::from(self.count[len as usize]);
            if code < first + count {
                br.consume(len);
                return Decode::Sym(sym[(index + code - first) as usize]);
            }
            index += count;
            first = (first + count) << 1;
            code <<= 1;
        }
        Decode::Bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversubscribed_lengths_rejected() {
        let mut t = SymTable::default();
        let mut sym = [0u16; 8];
        // four 1-bit codes cannot exist
        assert!(t.build(&[1, 1, 1, 1], &mut sym).is_err());
        assert!(t.build(&[1, 1], &mut sym).is_ok());
        assert!(t.build(&[2, 2, 2, 2], &mut sym).is_ok());
    }

    #[test]
    fn canonical_order_decodes() {
        // lens: a=2, b=1, c=3, d=3  →  b:0, a:10, c:110, d:111
        let mut t = SymTable::default();
        let mut sym = [0u16; 4];
        t.build(&[2, 1, 3, 3], &mut sym).unwrap();

        let mut br = BitReader::new();
        // stream bits: 0 | 10 | 110 | 111  (MSB-first codes, LSB-first bytes)
        // = 0,1,0,1,1,0,1,1,1 → byte0 = 0b11011010, byte1 = 0b1
        br.fill(&[0b1101_1010, 0b1]);

        let expect = [1u16, 0, 2, 3];
        for &e in &expect {
            match t.decode(&mut br, &sym) {
                Decode::Sym(s) => assert_eq!(s, e),
                _ => panic!("expected symbol {e}"),
            }
        }
    }

    #[test]
    fn starved_reader_consumes_nothing() {
        let mut t = SymTable::default();
        let mut sym = [0u16; 4];
        t.build(&[2, 2, 2, 2], &mut sym).unwrap();

        let mut br = BitReader::new();
        br.fill(&[0b10]); // one byte: codes 01, 10, then 2 bits left... feed 1 bit worth
        // drain to leave a single bit
        br.consume(7);
        match t.decode(&mut br, &sym) {
            Decode::Starved => {}
            _ => panic!("expected starvation"),
        }
        assert_eq!(br.remaining_bits(), 1);
    }
}
