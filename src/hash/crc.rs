//! Table-driven CRC-16/32/64 in MSB-first and LSB-first (reflected) forms.
//!
//! The 256-entry tables are generated at compile time by the standard
//! shift-and-XOR procedure. Two layers of API: raw `*_update_*` runners
//! over a table and a running register (what a streaming consumer such as
//! a gzip reader uses, applying init/final-XOR itself), and one-shot
//! per-variant functions that apply the variant's standard convention.

// ─────────────────────────────────────────────────────────────────────────────
// Polynomials
// ─────────────────────────────────────────────────────────────────────────────

const POLY16_IBM: u16 = 0x8005;
const POLY32_IEEE: u32 = 0x04c11db7;
const POLY32_CASTAGNOLI: u32 = 0x1edc6f41;
const POLY32_KOOPMAN: u32 = 0x741b8cd7;
const POLY32_Q: u32 = 0x814141ab;
const POLY64_ISO: u64 = 0x000000000000001b;
const POLY64_ECMA: u64 = 0x42f0e1eba9ea3693;

// ─────────────────────────────────────────────────────────────────────────────
// Compile-time table generation
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! crc_tables {
    ($ty:ty, $msb:ident, $lsb:ident, $top:expr, $reflect:ident, $width:expr) => {
        const fn $reflect(mut v: $ty) -> $ty {
            let mut r: $ty = 0;
            let mut i = 0;
            while i < $width {
                r = (r << 1) | (v & 1);
                v >>= 1;
                i += 1;
            }
            r
        }

        const fn $msb(poly: $ty) -> [$ty; 256] {
            let mut t = [0; 256];
            let mut i = 0;
            while i < 256 {
                let mut c = (i as $ty) << ($width - 8);
                let mut b = 0;
                while b < 8 {
                    c = if c & $top != 0 { (c << 1) ^ poly } else { c << 1 };
                    b += 1;
                }
                t[i] = c;
                i += 1;
            }
            t
        }

        const fn $lsb(poly: $ty) -> [$ty; 256] {
            let rpoly = $reflect(poly);
            let mut t = [0; 256];
            let mut i = 0;
            while i < 256 {
                let mut c = i as $ty;
                let mut b = 0;
                while b < 8 {
                    c = if c & 1 != 0 { (c >> 1) ^ rpoly } else { c >> 1 };
                    b += 1;
                }
                t[i] = c;
                i += 1;
            }
            t
        }
    };
}

crc_tables!(u16, table16_msb, table16_lsb, 0x8000, reflect16, 16);
crc_tables!(u32, table32_msb, table32_lsb, 0x8000_0000, reflect32, 32);
crc_tables!(u64, table64_msb, table64_lsb, 0x8000_0000_0000_0000, reflect64, 64);

static T16_IBM_MSB: [u16; 256] = table16_msb(POLY16_IBM);
static T16_IBM_LSB: [u16; 256] = table16_lsb(POLY16_IBM);

static T32_IEEE_MSB: [u32; 256] = table32_msb(POLY32_IEEE);
static T32_IEEE_LSB: [u32; 256] = table32_lsb(POLY32_IEEE);
static T32_CAST_MSB: [u32; 256] = table32_msb(POLY32_CASTAGNOLI);
static T32_CAST_LSB: [u32; 256] = table32_lsb(POLY32_CASTAGNOLI);
static T32_KOOP_MSB: [u32; 256] = table32_msb(POLY32_KOOPMAN);
static T32_KOOP_LSB: [u32; 256] = table32_lsb(POLY32_KOOPMAN);
static T32_Q_MSB: [u32; 256] = table32_msb(POLY32_Q);
static T32_Q_LSB: [u32; 256] = table32_lsb(POLY32_Q);

static T64_ISO_MSB: [u64; 256] = table64_msb(POLY64_ISO);
static T64_ISO_LSB: [u64; 256] = table64_lsb(POLY64_ISO);
static T64_ECMA_MSB: [u64; 256] = table64_msb(POLY64_ECMA);
static T64_ECMA_LSB: [u64; 256] = table64_lsb(POLY64_ECMA);

// ─────────────────────────────────────────────────────────────────────────────
// Variant enums
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-16 variants over the IBM polynomial 0x8005.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Crc16Kind {
    /// Unreflected (CRC-16/UMTS style): init 0, no final XOR.
    IbmMsb,
    /// Reflected (CRC-16/ARC): init 0, no final XOR.
    IbmLsb,
}

/// CRC-32 variants.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Crc32Kind {
    /// IEEE 0x04C11DB7, unreflected (BZIP2 convention): init ~0, XOR ~0.
    IeeeMsb,
    /// IEEE 0x04C11DB7, reflected (zlib/gzip): init ~0, XOR ~0.
    IeeeLsb,
    /// Castagnoli 0x1EDC6F41, unreflected: init ~0, XOR ~0.
    CastagnoliMsb,
    /// Castagnoli 0x1EDC6F41, reflected (iSCSI): init ~0, XOR ~0.
    CastagnoliLsb,
    /// Koopman 0x741B8CD7, unreflected: init ~0, XOR ~0.
    KoopmanMsb,
    /// Koopman 0x741B8CD7, reflected: init ~0, XOR ~0.
    KoopmanLsb,
    /// CRC-32Q 0x814141AB, unreflected: init 0, no final XOR.
    QMsb,
    /// CRC-32Q 0x814141AB, reflected: init 0, no final XOR.
    QLsb,
    /// POSIX cksum: IEEE polynomial, unreflected, init 0, XOR ~0, with the
    /// message length fed in (low byte first) after the data.
    Cksum,
}

/// CRC-64 variants.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Crc64Kind {
    /// ISO 0x1B, unreflected: init 0, no final XOR.
    IsoMsb,
    /// ISO 0x1B, reflected (GO-ISO): init ~0, XOR ~0.
    IsoLsb,
    /// ECMA 0x42F0E1EBA9EA3693, unreflected (ECMA-182): init 0, no final XOR.
    EcmaMsb,
    /// ECMA 0x42F0E1EBA9EA3693, reflected (XZ): init ~0, XOR ~0.
    EcmaLsb,
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw table access and running updates
// ─────────────────────────────────────────────────────────────────────────────

pub fn crc16_table(kind: Crc16Kind) -> &'static [u16; 256] {
    match kind {
        Crc16Kind::IbmMsb => &T16_IBM_MSB,
        Crc16Kind::IbmLsb => &T16_IBM_LSB,
    }
}

pub fn crc32_table(kind: Crc32Kind) -> &'static [u32; 256] {
    match kind {
        Crc32Kind::IeeeMsb | Crc32Kind::Cksum => &T32_IEEE_MSB,
        Crc32Kind::IeeeLsb => &T32_IEEE_LSB,
        Crc32Kind::CastagnoliMsb => &T32_CAST_MSB,
        Crc32Kind::CastagnoliLsb => &T32_CAST_LSB,
        Crc32Kind::KoopmanMsb => &T32_KOOP_MSB,
        Crc32Kind::KoopmanLsb => &T32_KOOP_LSB,
        Crc32Kind::QMsb => &T32_Q_MSB,
        Crc32Kind::QLsb => &T32_Q_LSB,
    }
}

pub fn crc64_table(kind: Crc64Kind) -> &'static [u64; 256] {
    match kind {
        Crc64Kind::IsoMsb => &T64_ISO_MSB,
        Crc64Kind::IsoLsb => &T64_ISO_LSB,
        Crc64Kind::EcmaMsb => &T64_ECMA_MSB,
        Crc64Kind::EcmaLsb => &T64_ECMA_LSB,
    }
}

macro_rules! crc_update {
    ($msb:ident, $lsb:ident, $ty:ty, $width:expr) => {
        /// Fold `data` into a running unreflected register. Init and final
        /// XOR are the caller's business.
        pub fn $msb(table: &[$ty; 256], mut crc: $ty, data: &[u8]) -> $ty {
            for &b in data {
                let idx = ((crc >> ($width - 8)) as u8 ^ b) as usize;
                crc = (crc << 8) ^ table[idx];
            }
            crc
        }

        /// Fold `data` into a running reflected register. Init and final
        /// XOR are the caller's business.
        pub fn $lsb(table: &[$ty; 256], mut crc: $ty, data: &[u8]) -> $ty {
            for &b in data {
                let idx = (crc as u8 ^ b) as usize;
                crc = (crc >> 8) ^ table[idx];
            }
            crc
        }
    };
}

crc_update!(crc16_update_msb, crc16_update_lsb, u16, 16);
crc_update!(crc32_update_msb, crc32_update_lsb, u32, 32);
crc_update!(crc64_update_msb, crc64_update_lsb, u64, 64);

// ─────────────────────────────────────────────────────────────────────────────
// One-shot variants
// ─────────────────────────────────────────────────────────────────────────────

/// One-shot CRC-16 with the variant's standard convention applied.
pub fn crc16(data: &[u8], kind: Crc16Kind) -> u16 {
    let table = crc16_table(kind);
    match kind {
        Crc16Kind::IbmMsb => crc16_update_msb(table, 0, data),
        Crc16Kind::IbmLsb => crc16_update_lsb(table, 0, data),
    }
}

/// One-shot CRC-32 with the variant's standard convention applied.
pub fn crc32(data: &[u8], kind: Crc32Kind) -> u32 {
    let table = crc32_table(kind);
    match kind {
        Crc32Kind::IeeeMsb | Crc32Kind::CastagnoliMsb | Crc32Kind::KoopmanMsb => {
            crc32_update_msb(table, !0, data) ^ !0
        }
        Crc32Kind::IeeeLsb | Crc32Kind::CastagnoliLsb | Crc32Kind::KoopmanLsb => {
            crc32_update_lsb(table, !0, data) ^ !0
        }
        Crc32Kind::QMsb => crc32_update_msb(table, 0, data),
        Crc32Kind::QLsb => crc32_update_lsb(table, 0, data),
        Crc32Kind::Cksum => {
            let mut crc = crc32_update_msb(table, 0, data);
            let mut len = data.len();
            while len != 0 {
                crc = crc32_update_msb(table, crc, &[len as u8]);
                len >>= 8;
            }
            crc ^ !0
        }
    }
}

/// One-shot CRC-64 with the variant's standard convention applied.
pub fn crc64(data: &[u8], kind: Crc64Kind) -> u64 {
    let table = crc64_table(kind);
    match kind {
        Crc64Kind::IsoMsb | Crc64Kind::EcmaMsb => crc64_update_msb(table, 0, data),
        Crc64Kind::IsoLsb | Crc64Kind::EcmaLsb => crc64_update_lsb(table, !0, data) ^ !0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECK: &[u8] = b"123456789";

    #[test]
    fn check_values() {
        assert_eq!(crc16(CHECK, Crc16Kind::IbmLsb), 0xbb3d);
        assert_eq!(crc16(CHECK, Crc16Kind::IbmMsb), 0xfee8);

        assert_eq!(crc32(CHECK, Crc32Kind::IeeeLsb), 0xcbf43926);
        assert_eq!(crc32(CHECK, Crc32Kind::IeeeMsb), 0xfc891918);
        assert_eq!(crc32(CHECK, Crc32Kind::CastagnoliLsb), 0xe3069283);
        assert_eq!(crc32(CHECK, Crc32Kind::CastagnoliMsb), 0x05440f15);
        assert_eq!(crc32(CHECK, Crc32Kind::KoopmanLsb), 0x2d3dd0ae);
        assert_eq!(crc32(CHECK, Crc32Kind::KoopmanMsb), 0xd14eb786);
        assert_eq!(crc32(CHECK, Crc32Kind::QMsb), 0x3010bf7f);
        assert_eq!(crc32(CHECK, Crc32Kind::QLsb), 0x17015491);
        assert_eq!(crc32(CHECK, Crc32Kind::Cksum), 0x377a6011);

        assert_eq!(crc64(CHECK, Crc64Kind::IsoLsb), 0xb90956c775a41001);
        assert_eq!(crc64(CHECK, Crc64Kind::IsoMsb), 0xe4ffbea588933790);
        assert_eq!(crc64(CHECK, Crc64Kind::EcmaMsb), 0x6c40df5f0b497347);
        assert_eq!(crc64(CHECK, Crc64Kind::EcmaLsb), 0x995dc9bbdf1939fa);
    }

    #[test]
    fn running_update_is_linear() {
        // CRC(a || b) == update(CRC(a), b) on the raw register
        let table = crc32_table(Crc32Kind::IeeeLsb);
        let whole = crc32_update_lsb(table, !0, CHECK);
        let part = crc32_update_lsb(table, !0, &CHECK[..4]);
        assert_eq!(crc32_update_lsb(table, part, &CHECK[4..]), whole);
        assert_eq!(whole ^ !0, crc32(CHECK, Crc32Kind::IeeeLsb));
    }
}
