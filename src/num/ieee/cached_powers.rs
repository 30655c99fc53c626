//! Normalized powers of ten, `10^-348` to `10^340` in steps of eight, as [`DiyFp`]s.
//!
//! The significands are rounded to nearest, so every entry is within half a unit in the last
//! place of the true power.

use super::DiyFp;

/// A cached power of ten: `significand * 2^binary_exponent ≈ 10^decimal_exponent`.
#[derive(Debug, Clone, Copy)]
pub struct CachedPower {
    pub significand: u64,
    pub binary_exponent: i16,
    pub decimal_exponent: i16,
}

impl CachedPower {
    const fn new(significand: u64, binary_exponent: i16, decimal_exponent: i16) -> CachedPower {
        CachedPower {
            significand,
            binary_exponent,
            decimal_exponent,
        }
    }

    pub const fn diy_fp(&self) -> DiyFp {
        DiyFp::new(self.significand, self.binary_exponent as i32)
    }
}

/// The distance between the decimal exponents of two neighbouring entries.
pub const DECIMAL_EXPONENT_DISTANCE: i32 = 8;
pub const MIN_DECIMAL_EXPONENT: i32 = -348;
pub const MAX_DECIMAL_EXPONENT: i32 = 340;

const CACHED_POWERS_OFFSET: i32 = -MIN_DECIMAL_EXPONENT;
const D_1_LOG2_10: f64 = 0.30102999566398114;

static CACHED_POWERS: [CachedPower; 87] = [
    CachedPower::new(0xfa8fd5a0081c0288, -1220, -348),
    CachedPower::new(0xbaaee17fa23ebf76, -1193, -340),
    CachedPower::new(0x8b16fb203055ac76, -1166, -332),
    CachedPower::new(0xcf42894a5dce35ea, -1140, -324),
    CachedPower::new(0x9a6bb0aa55653b2d, -1113, -316),
    CachedPower::new(0xe61acf033d1a45df, -1087, -308),
    CachedPower::new(0xab70fe17c79ac6ca, -1060, -300),
    CachedPower::new(0xff77b1fcbebcdc4f, -1034, -292),
    CachedPower::new(0xbe5691ef416bd60c, -1007, -284),
    CachedPower::new(0x8dd01fad907ffc3c, -980, -276),
    CachedPower::new(0xd3515c2831559a83, -954, -268),
    CachedPower::new(0x9d71ac8fada6c9b5, -927, -260),
    CachedPower::new(0xea9c227723ee8bcb, -901, -252),
    CachedPower::new(0xaecc49914078536d, -874, -244),
    CachedPower::new(0x823c12795db6ce57, -847, -236),
    CachedPower::new(0xc21094364dfb5637, -821, -228),
    CachedPower::new(0x9096ea6f3848984f, -794, -220),
    CachedPower::new(0xd77485cb25823ac7, -768, -212),
    CachedPower::new(0xa086cfcd97bf97f4, -741, -204),
    CachedPower::new(0xef340a98172aace5, -715, -196),
    CachedPower::new(0xb23867fb2a35b28e, -688, -188),
    CachedPower::new(0x84c8d4dfd2c63f3b, -661, -180),
    CachedPower::new(0xc5dd44271ad3cdba, -635, -172),
    CachedPower::new(0x936b9fcebb25c996, -608, -164),
    CachedPower::new(0xdbac6c247d62a584, -582, -156),
    CachedPower::new(0xa3ab66580d5fdaf6, -555, -148),
    CachedPower::new(0xf3e2f893dec3f126, -529, -140),
    CachedPower::new(0xb5b5ada8aaff80b8, -502, -132),
    CachedPower::new(0x87625f056c7c4a8b, -475, -124),
    CachedPower::new(0xc9bcff6034c13053, -449, -116),
    CachedPower::new(0x964e858c91ba2655, -422, -108),
    CachedPower::new(0xdff9772470297ebd, -396, -100),
    CachedPower::new(0xa6dfbd9fb8e5b88f, -369, -92),
    CachedPower::new(0xf8a95fcf88747d94, -343, -84),
    CachedPower::new(0xb94470938fa89bcf, -316, -76),
    CachedPower::new(0x8a08f0f8bf0f156b, -289, -68),
    CachedPower::new(0xcdb02555653131b6, -263, -60),
    CachedPower::new(0x993fe2c6d07b7fac, -236, -52),
    CachedPower::new(0xe45c10c42a2b3b06, -210, -44),
    CachedPower::new(0xaa242499697392d3, -183, -36),
    CachedPower::new(0xfd87b5f28300ca0e, -157, -28),
    CachedPower::new(0xbce5086492111aeb, -130, -20),
    CachedPower::new(0x8cbccc096f5088cc, -103, -12),
    CachedPower::new(0xd1b71758e219652c, -77, -4),
    CachedPower::new(0x9c40000000000000, -50, 4),
    CachedPower::new(0xe8d4a51000000000, -24, 12),
    CachedPower::new(0xad78ebc5ac620000, 3, 20),
    CachedPower::new(0x813f3978f8940984, 30, 28),
    CachedPower::new(0xc097ce7bc90715b3, 56, 36),
    CachedPower::new(0x8f7e32ce7bea5c70, 83, 44),
    CachedPower::new(0xd5d238a4abe98068, 109, 52),
    CachedPower::new(0x9f4f2726179a2245, 136, 60),
    CachedPower::new(0xed63a231d4c4fb27, 162, 68),
    CachedPower::new(0xb0de65388cc8ada8, 189, 76),
    CachedPower::new(0x83c7088e1aab65db, 216, 84),
    CachedPower::new(0xc45d1df942711d9a, 242, 92),
    CachedPower::new(0x924d692ca61be758, 269, 100),
    CachedPower::new(0xda01ee641a708dea, 295, 108),
    CachedPower::new(0xa26da3999aef774a, 322, 116),
    CachedPower::new(0xf209787bb47d6b85, 348, 124),
    CachedPower::new(0xb454e4a179dd1877, 375, 132),
    CachedPower::new(0x865b86925b9bc5c2, 402, 140),
    CachedPower::new(0xc83553c5c8965d3d, 428, 148),
    CachedPower::new(0x952ab45cfa97a0b3, 455, 156),
    CachedPower::new(0xde469fbd99a05fe3, 481, 164),
    CachedPower::new(0xa59bc234db398c25, 508, 172),
    CachedPower::new(0xf6c69a72a3989f5c, 534, 180),
    CachedPower::new(0xb7dcbf5354e9bece, 561, 188),
    CachedPower::new(0x88fcf317f22241e2, 588, 196),
    CachedPower::new(0xcc20ce9bd35c78a5, 614, 204),
    CachedPower::new(0x98165af37b2153df, 641, 212),
    CachedPower::new(0xe2a0b5dc971f303a, 667, 220),
    CachedPower::new(0xa8d9d1535ce3b396, 694, 228),
    CachedPower::new(0xfb9b7cd9a4a7443c, 720, 236),
    CachedPower::new(0xbb764c4ca7a44410, 747, 244),
    CachedPower::new(0x8bab8eefb6409c1a, 774, 252),
    CachedPower::new(0xd01fef10a657842c, 800, 260),
    CachedPower::new(0x9b10a4e5e9913129, 827, 268),
    CachedPower::new(0xe7109bfba19c0c9d, 853, 276),
    CachedPower::new(0xac2820d9623bf429, 880, 284),
    CachedPower::new(0x80444b5e7aa7cf85, 907, 292),
    CachedPower::new(0xbf21e44003acdd2d, 933, 300),
    CachedPower::new(0x8e679c2f5e44ff8f, 960, 308),
    CachedPower::new(0xd433179d9c8cb841, 986, 316),
    CachedPower::new(0x9e19db92b4e31ba9, 1013, 324),
    CachedPower::new(0xeb96bf6ebadf77d9, 1039, 332),
    CachedPower::new(0xaf87023b9bf0ee6b, 1066, 340),
];

/// Returns a cached power of ten `c` and its decimal exponent `k`, such that for a normalized
/// [`DiyFp`] `w` with exponent `w.e`, the product `w * c` has a binary exponent in
/// `min_exponent..=max_exponent`.
///
/// # Panics
/// Panics if the range is too narrow for the table, which happens when it spans less than 28
/// binary exponents.
pub fn for_binary_exponent_range(min_exponent: i32, max_exponent: i32) -> (DiyFp, i32) {
    let k = ((min_exponent + DiyFp::SIGNIFICAND_SIZE - 1) as f64 * D_1_LOG2_10).ceil() as i32;
    let index = ((CACHED_POWERS_OFFSET + k - 1) / DECIMAL_EXPONENT_DISTANCE + 1) as usize;
    let cached_power = &CACHED_POWERS[index];
    let power = cached_power.diy_fp();
    assert!(
        min_exponent <= power.e && power.e <= max_exponent,
        "Cached power outside of the requested exponent range!"
    );
    (power, cached_power.decimal_exponent as i32)
}

/// Returns the cached power of ten with the largest decimal exponent not above `requested`,
/// along with that exponent. The caller makes up the difference, which is less than
/// [`DECIMAL_EXPONENT_DISTANCE`].
///
/// # Panics
/// Panics if `requested` is outside of `MIN_DECIMAL_EXPONENT..MAX_DECIMAL_EXPONENT +
/// DECIMAL_EXPONENT_DISTANCE`.
pub fn for_decimal_exponent(requested: i32) -> (DiyFp, i32) {
    assert!(
        (MIN_DECIMAL_EXPONENT..MAX_DECIMAL_EXPONENT + DECIMAL_EXPONENT_DISTANCE).contains(&requested),
        "Decimal exponent outside of the cached range!"
    );
    let index = ((requested + CACHED_POWERS_OFFSET) / DECIMAL_EXPONENT_DISTANCE) as usize;
    let cached_power = &CACHED_POWERS[index];
    (cached_power.diy_fp(), cached_power.decimal_exponent as i32)
}
