use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Formatter, UpperHex};

/// The largest number of bits a [`Bignum`] can hold. Enough for `10^1100` or so, which is more than
/// any double conversion needs.
pub const MAX_SIGNIFICANT_BITS: usize = 3584;

/// The number of significant bits in every bigit.
pub const BIGIT_SIZE: usize = 28;

/// The fixed number of bigits backing every [`Bignum`].
pub const BIGIT_CAPACITY: usize = MAX_SIGNIFICANT_BITS / BIGIT_SIZE;

const BIGIT_MASK: u32 = (1 << BIGIT_SIZE) - 1;
const CHUNK_SIZE: u32 = u32::BITS;

// 10^19 is the largest power of ten that fits into a u64.
const MAX_U64_DECIMAL_DIGITS: usize = 19;

const FIVE_27: u64 = 0x6765_c793_fa10_079d;
const FIVE_13: u32 = 1_220_703_125;
const FIVE_1_TO_12: [u32; 12] = [
    5, 25, 125, 625, 3125, 15625, 78125, 390625, 1953125, 9765625, 48828125, 244140625,
];

/// An unsigned arbitrary precision integer with a fixed capacity of [`MAX_SIGNIFICANT_BITS`].
///
/// The value is stored as little endian "bigits" of [`BIGIT_SIZE`] bits each (inside a [`u32`], so
/// that products and carries fit into a [`u64`]) followed by an `exponent` of implicit zero bigits:
///
/// `value = Σ bigits[i] * 2^(28 * i) * 2^(28 * exponent)`
///
/// The implicit zero bigits make shifting by large amounts cheap, which happens a lot when the
/// value is a power of two times something small.
///
/// A Bignum never allocates, all of its storage lives inline. Running out of capacity is a bug
/// and panics.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of used bigits.
///
/// | Method | Complexity |
/// |-|-|
/// | `add_bignum` | `O(n)` |
/// | `multiply_by_u32` | `O(n)` |
/// | `square` | `O(n^2)` |
/// | `compare` | `O(n)` |
/// | `divide_modulo_int_bignum` | `O(n)`* |
///
/// \* Only when the quotient is small, which is the only case it is meant for.
#[derive(Clone)]
pub struct Bignum {
    pub(crate) bigits: [u32; BIGIT_CAPACITY],
    pub(crate) used_bigits: usize,
    pub(crate) exponent: usize,
}

impl Bignum {
    /// Creates a new Bignum with the value zero.
    ///
    /// # Examples
    /// ```
    /// # use float_conv::num::bignum::Bignum;
    /// let zero = Bignum::new();
    /// assert!(zero.is_zero());
    /// assert_eq!(format!("{:X}", zero), "0");
    /// ```
    pub const fn new() -> Bignum {
        Bignum {
            bigits: [0; BIGIT_CAPACITY],
            used_bigits: 0,
            exponent: 0,
        }
    }

    /// Returns true if the value of this Bignum is zero.
    pub const fn is_zero(&self) -> bool {
        self.used_bigits == 0
    }

    /// Resets the value to zero.
    pub const fn zero(&mut self) {
        self.used_bigits = 0;
        self.exponent = 0;
    }

    pub fn assign_u16(&mut self, value: u16) {
        self.zero();
        if value > 0 {
            self.bigits[0] = value as u32;
            self.used_bigits = 1;
        }
    }

    pub fn assign_u64(&mut self, mut value: u64) {
        self.zero();
        while value > 0 {
            self.bigits[self.used_bigits] = (value & BIGIT_MASK as u64) as u32;
            self.used_bigits += 1;
            value >>= BIGIT_SIZE;
        }
    }

    pub fn assign_bignum(&mut self, other: &Bignum) {
        self.exponent = other.exponent;
        self.bigits[..other.used_bigits].copy_from_slice(&other.bigits[..other.used_bigits]);
        self.used_bigits = other.used_bigits;
    }

    /// Assigns the value of a string of ASCII decimal digits, without sign, point or exponent.
    ///
    /// The digits are consumed 19 at a time, the most that fit into a [`u64`], each chunk being
    /// applied as `self * 10^len + chunk`.
    ///
    /// # Panics
    /// Panics if `value` contains anything other than `0..=9` or if the value exceeds the capacity
    /// of a Bignum.
    ///
    /// # Examples
    /// ```
    /// # use float_conv::num::bignum::Bignum;
    /// let mut big = Bignum::new();
    /// big.assign_decimal_string(b"1000000000000000000000");
    /// assert_eq!(format!("{:X}", big), "3635C9ADC5DEA00000");
    /// ```
    pub fn assign_decimal_string(&mut self, value: &[u8]) {
        self.zero();
        for chunk in value.chunks(MAX_U64_DECIMAL_DIGITS) {
            self.multiply_by_power_of_ten(chunk.len());
            self.add_u64(read_u64(chunk));
        }
        self.clamp();
    }

    /// Assigns the value of a string of ASCII hexadecimal digits (either case), without prefix.
    ///
    /// # Panics
    /// Panics if `value` contains anything other than hexadecimal digits or if it is too long
    /// for the capacity of a Bignum.
    ///
    /// # Examples
    /// ```
    /// # use float_conv::num::bignum::Bignum;
    /// let mut big = Bignum::new();
    /// big.assign_hex_string(b"fffffffffffffffffffffff");
    /// assert_eq!(format!("{:X}", big), "FFFFFFFFFFFFFFFFFFFFFFF");
    /// ```
    pub fn assign_hex_string(&mut self, value: &[u8]) {
        self.zero();
        Self::ensure_capacity((value.len() * 4).div_ceil(BIGIT_SIZE));

        // Accumulates converted hex digits until at least a whole bigit is available.
        let mut tmp: u64 = 0;
        let mut count = 0;
        for &ch in value.iter().rev() {
            tmp |= (hex_char_value(ch) as u64) << count;
            count += 4;
            if count >= BIGIT_SIZE {
                self.bigits[self.used_bigits] = (tmp as u32) & BIGIT_MASK;
                self.used_bigits += 1;
                count -= BIGIT_SIZE;
                tmp >>= BIGIT_SIZE;
            }
        }
        if tmp > 0 {
            self.bigits[self.used_bigits] = tmp as u32;
            self.used_bigits += 1;
        }
        self.clamp();
    }

    /// Assigns `base^power_exponent`, using left to right binary exponentiation. Trailing zero bits
    /// of the base are factored out and applied as a single shift at the end.
    ///
    /// # Panics
    /// Panics if `base` is zero or the result exceeds the capacity of a Bignum.
    ///
    /// # Examples
    /// ```
    /// # use float_conv::num::bignum::Bignum;
    /// let mut big = Bignum::new();
    /// big.assign_power_u16(10, 3);
    /// assert_eq!(format!("{:X}", big), "3E8");
    /// ```
    pub fn assign_power_u16(&mut self, base: u16, power_exponent: usize) {
        assert!(base != 0, "Zero base for Bignum power!");
        if power_exponent == 0 {
            self.assign_u16(1);
            return;
        }
        self.zero();

        let mut base = base as u32;
        let mut shifts = 0;
        while base & 1 == 0 {
            base >>= 1;
            shifts += 1;
        }
        let bit_size = (u32::BITS - base.leading_zeros()) as usize;
        Self::ensure_capacity(bit_size * power_exponent / BIGIT_SIZE + 2);

        // The mask starts at the bit below the most significant one of the exponent, that bit is
        // accounted for by starting with the base itself.
        let mut mask: usize = 1;
        while power_exponent >= mask {
            mask <<= 1;
        }
        mask >>= 2;

        // Work in a u64 for as long as possible.
        let mut this_value = base as u64;
        let mut delayed_multiplication = false;
        while mask != 0 && this_value <= u32::MAX as u64 {
            this_value *= this_value;
            if power_exponent & mask != 0 {
                let base_bits_mask = !((1_u64 << (64 - bit_size)) - 1);
                if this_value & base_bits_mask == 0 {
                    this_value *= base as u64;
                } else {
                    delayed_multiplication = true;
                }
            }
            mask >>= 1;
        }
        self.assign_u64(this_value);
        if delayed_multiplication {
            self.multiply_by_u32(base);
        }

        while mask != 0 {
            self.square();
            if power_exponent & mask != 0 {
                self.multiply_by_u32(base);
            }
            mask >>= 1;
        }

        self.shift_left(shifts * power_exponent);
    }

    pub fn add_u16(&mut self, operand: u16) {
        self.add_u64(operand as u64);
    }

    pub fn add_u64(&mut self, operand: u64) {
        if operand == 0 {
            return;
        }
        let mut other = Bignum::new();
        other.assign_u64(operand);
        self.add_bignum(&other);
    }

    /// # Panics
    /// Panics if the sum exceeds the capacity of a Bignum.
    pub fn add_bignum(&mut self, other: &Bignum) {
        debug_assert!(self.is_clamped() && other.is_clamped());

        self.align(other);
        // There are two possibilities:
        //   aaaaaaaaaaa 0000  (where the 0s represent a's exponent)
        //     bbbbb 00000000
        //   ----------------
        //   ccccccccccc 0000
        // or
        //    aaaaaaaaaa 0000
        //  bbbbbbbbb 0000000
        //  -----------------
        //  cccccccccccc 0000
        // In both cases we might need a carry bigit.
        Self::ensure_capacity(
            1 + cmp::max(self.bigit_length(), other.bigit_length()) - self.exponent
        );

        let mut carry = 0;
        let mut bigit_pos = other.exponent - self.exponent;
        if self.used_bigits < bigit_pos {
            self.bigits[self.used_bigits..bigit_pos].fill(0);
        }
        for &other_bigit in &other.bigits[..other.used_bigits] {
            let my = if bigit_pos < self.used_bigits { self.bigits[bigit_pos] } else { 0 };
            let sum = my + other_bigit + carry;
            self.bigits[bigit_pos] = sum & BIGIT_MASK;
            carry = sum >> BIGIT_SIZE;
            bigit_pos += 1;
        }
        while carry != 0 {
            let my = if bigit_pos < self.used_bigits { self.bigits[bigit_pos] } else { 0 };
            let sum = my + carry;
            self.bigits[bigit_pos] = sum & BIGIT_MASK;
            carry = sum >> BIGIT_SIZE;
            bigit_pos += 1;
        }
        self.used_bigits = cmp::max(bigit_pos, self.used_bigits);
    }

    /// Subtracts `other` from self in place.
    ///
    /// The caller must guarantee that `other <= self`, the result is unspecified otherwise.
    pub fn subtract_bignum(&mut self, other: &Bignum) {
        debug_assert!(Bignum::less_equal(other, self), "Bignum subtraction would underflow!");

        self.align(other);
        let offset = other.exponent - self.exponent;
        let mut borrow = 0;
        let mut i = 0;
        while i < other.used_bigits {
            let difference = self.bigits[i + offset]
                .wrapping_sub(other.bigits[i])
                .wrapping_sub(borrow);
            self.bigits[i + offset] = difference & BIGIT_MASK;
            borrow = difference >> (CHUNK_SIZE - 1);
            i += 1;
        }
        while borrow != 0 {
            let difference = self.bigits[i + offset].wrapping_sub(borrow);
            self.bigits[i + offset] = difference & BIGIT_MASK;
            borrow = difference >> (CHUNK_SIZE - 1);
            i += 1;
        }
        self.clamp();
    }

    /// # Panics
    /// Panics if the result exceeds the capacity of a Bignum.
    pub fn shift_left(&mut self, shift_amount: usize) {
        if self.used_bigits == 0 {
            return;
        }
        self.exponent += shift_amount / BIGIT_SIZE;
        let local_shift = shift_amount % BIGIT_SIZE;
        Self::ensure_capacity(self.used_bigits + 1);
        self.bigits_shift_left(local_shift);
    }

    /// # Panics
    /// Panics if the product exceeds the capacity of a Bignum.
    pub fn multiply_by_u32(&mut self, factor: u32) {
        if factor == 1 {
            return;
        }
        if factor == 0 {
            self.zero();
            return;
        }

        // A bigit times the factor is at most 28 + 32 bits, which leaves room for the carry.
        let mut carry: u64 = 0;
        for bigit in &mut self.bigits[..self.used_bigits] {
            let product = factor as u64 * *bigit as u64 + carry;
            *bigit = (product & BIGIT_MASK as u64) as u32;
            carry = product >> BIGIT_SIZE;
        }
        self.push_carry(carry as u128);
    }

    /// # Panics
    /// Panics if the product exceeds the capacity of a Bignum.
    pub fn multiply_by_u64(&mut self, factor: u64) {
        if factor == 1 {
            return;
        }
        if factor == 0 {
            self.zero();
            return;
        }

        let mut carry: u128 = 0;
        for bigit in &mut self.bigits[..self.used_bigits] {
            let product = factor as u128 * *bigit as u128 + carry;
            *bigit = (product & BIGIT_MASK as u128) as u32;
            carry = product >> BIGIT_SIZE;
        }
        self.push_carry(carry);
    }

    /// Multiplies by `10^exponent`, as `5^exponent` (in [`u64`] and [`u32`] sized steps) followed
    /// by a left shift of `exponent` bits.
    ///
    /// # Panics
    /// Panics if the product exceeds the capacity of a Bignum.
    ///
    /// # Examples
    /// ```
    /// # use float_conv::num::bignum::Bignum;
    /// let mut big = Bignum::from(1_u64);
    /// big.multiply_by_power_of_ten(2);
    /// assert_eq!(big, Bignum::from(100_u64));
    /// ```
    pub fn multiply_by_power_of_ten(&mut self, exponent: usize) {
        if exponent == 0 || self.used_bigits == 0 {
            return;
        }

        let mut remaining_exponent = exponent;
        while remaining_exponent >= 27 {
            self.multiply_by_u64(FIVE_27);
            remaining_exponent -= 27;
        }
        while remaining_exponent >= 13 {
            self.multiply_by_u32(FIVE_13);
            remaining_exponent -= 13;
        }
        if remaining_exponent > 0 {
            self.multiply_by_u32(FIVE_1_TO_12[remaining_exponent - 1]);
        }
        self.shift_left(exponent);
    }

    pub fn times_10(&mut self) {
        self.multiply_by_u32(10);
    }

    /// Squares the value in place, one product column at a time (Comba multiplication).
    ///
    /// # Panics
    /// Panics if the square exceeds the capacity of a Bignum.
    pub fn square(&mut self) {
        debug_assert!(self.is_clamped());
        let used = self.used_bigits;
        if used == 0 {
            return;
        }
        let product_length = 2 * used;
        Self::ensure_capacity(product_length);

        // Every column sums at most BIGIT_CAPACITY products of 56 bits each, which can't overflow
        // the u64 accumulator as long as there are fewer than 256 bigits.
        let source = self.bigits;
        let mut accumulator: u64 = 0;
        for column in 0..product_length {
            let first = column.saturating_sub(used - 1);
            let last = cmp::min(column, used - 1);
            for i in first..=last {
                accumulator += source[i] as u64 * source[column - i] as u64;
            }
            self.bigits[column] = (accumulator as u32) & BIGIT_MASK;
            accumulator >>= BIGIT_SIZE;
        }
        debug_assert_eq!(accumulator, 0);

        self.used_bigits = product_length;
        self.exponent *= 2;
        self.clamp();
    }

    /// Divides self by `other`, returning the quotient and leaving the remainder in self.
    ///
    /// This is only meant for digit generation, where the quotient is known to be small (usually
    /// a single decimal digit). A large quotient works but is very slow.
    ///
    /// # Panics
    /// Panics if `other` is zero.
    ///
    /// # Examples
    /// ```
    /// # use float_conv::num::bignum::Bignum;
    /// let mut big = Bignum::from(23_u64);
    /// assert_eq!(big.divide_modulo_int_bignum(&Bignum::from(7_u64)), 3);
    /// assert_eq!(big, Bignum::from(2_u64));
    /// ```
    pub fn divide_modulo_int_bignum(&mut self, other: &Bignum) -> u16 {
        assert!(!other.is_zero(), "Bignum division by zero!");
        debug_assert!(self.is_clamped() && other.is_clamped());

        if self.bigit_length() < other.bigit_length() {
            return 0;
        }

        self.align(other);

        let mut result: u16 = 0;

        // Remove multiples of 'other' until both numbers have the same number of bigits. The
        // most significant bigit of self is a lower bound for the quotient at this point.
        while self.bigit_length() > other.bigit_length() {
            let top = self.bigits[self.used_bigits - 1];
            debug_assert!(top < 0x10000);
            result += top as u16;
            self.subtract_times(other, top);
        }

        debug_assert_eq!(self.bigit_length(), other.bigit_length());

        let this_bigit = self.bigits[self.used_bigits - 1];
        let other_bigit = other.bigits[other.used_bigits - 1];

        if other.used_bigits == 1 {
            let quotient = this_bigit / other_bigit;
            self.bigits[self.used_bigits - 1] = this_bigit - other_bigit * quotient;
            result += quotient as u16;
            self.clamp();
            return result;
        }

        let division_estimate = this_bigit / (other_bigit + 1);
        result += division_estimate as u16;
        self.subtract_times(other, division_estimate);

        if other_bigit * (division_estimate + 1) > this_bigit {
            // No need to even try to subtract. Even if other's remaining bigits were zero another
            // subtraction would be too much.
            return result;
        }

        while Bignum::less_equal(other, self) {
            self.subtract_bignum(other);
            result += 1;
        }
        result
    }

    /// Compares two Bignums.
    ///
    /// # Examples
    /// ```
    /// # use float_conv::num::bignum::Bignum;
    /// # use std::cmp::Ordering;
    /// let small = Bignum::from(12_u64);
    /// let mut large = Bignum::from(3_u64);
    /// large.shift_left(100);
    /// assert_eq!(Bignum::compare(&small, &large), Ordering::Less);
    /// ```
    pub fn compare(a: &Bignum, b: &Bignum) -> Ordering {
        debug_assert!(a.is_clamped() && b.is_clamped());

        let bigit_length_a = a.bigit_length();
        let bigit_length_b = b.bigit_length();
        if bigit_length_a != bigit_length_b {
            return bigit_length_a.cmp(&bigit_length_b);
        }
        for i in (cmp::min(a.exponent, b.exponent)..bigit_length_a).rev() {
            let bigit_a = a.bigit_or_zero(i);
            let bigit_b = b.bigit_or_zero(i);
            if bigit_a != bigit_b {
                return bigit_a.cmp(&bigit_b);
            }
        }
        Ordering::Equal
    }

    pub fn equal(a: &Bignum, b: &Bignum) -> bool {
        Bignum::compare(a, b).is_eq()
    }

    pub fn less_equal(a: &Bignum, b: &Bignum) -> bool {
        Bignum::compare(a, b).is_le()
    }

    pub fn less(a: &Bignum, b: &Bignum) -> bool {
        Bignum::compare(a, b).is_lt()
    }

    /// Compares `a + b` with `c` without computing the sum.
    ///
    /// # Examples
    /// ```
    /// # use float_conv::num::bignum::Bignum;
    /// # use std::cmp::Ordering;
    /// let a = Bignum::from(5_u64);
    /// let b = Bignum::from(7_u64);
    /// assert_eq!(Bignum::plus_compare(&a, &b, &Bignum::from(12_u64)), Ordering::Equal);
    /// assert_eq!(Bignum::plus_compare(&a, &b, &Bignum::from(13_u64)), Ordering::Less);
    /// ```
    pub fn plus_compare(a: &Bignum, b: &Bignum, c: &Bignum) -> Ordering {
        debug_assert!(a.is_clamped() && b.is_clamped() && c.is_clamped());

        if a.bigit_length() < b.bigit_length() {
            return Bignum::plus_compare(b, a, c);
        }
        if a.bigit_length() + 1 < c.bigit_length() {
            return Ordering::Less;
        }
        if a.bigit_length() > c.bigit_length() {
            return Ordering::Greater;
        }
        // The exponent encodes zero bigits. If 'a' has more of those than 'b' has bigits, the sum
        // has the same bigit length as 'a'.
        if a.exponent >= b.bigit_length() && a.bigit_length() < c.bigit_length() {
            return Ordering::Less;
        }

        let mut borrow: u32 = 0;
        // Below the smallest exponent all bigits are zero.
        let min_exponent = cmp::min(cmp::min(a.exponent, b.exponent), c.exponent);
        for i in (min_exponent..c.bigit_length()).rev() {
            let sum = a.bigit_or_zero(i) + b.bigit_or_zero(i);
            let chunk_c = c.bigit_or_zero(i);
            if sum > chunk_c + borrow {
                return Ordering::Greater;
            }
            borrow = chunk_c + borrow - sum;
            if borrow > 1 {
                return Ordering::Less;
            }
            borrow <<= BIGIT_SIZE;
        }
        if borrow == 0 { Ordering::Equal } else { Ordering::Less }
    }
}

impl Bignum {
    const fn bigit_length(&self) -> usize {
        self.used_bigits + self.exponent
    }

    fn bigit_or_zero(&self, index: usize) -> u32 {
        if index >= self.bigit_length() || index < self.exponent {
            0
        } else {
            self.bigits[index - self.exponent]
        }
    }

    pub(crate) fn is_clamped(&self) -> bool {
        self.used_bigits == 0 || self.bigits[self.used_bigits - 1] != 0
    }

    /// Removes leading zero bigits, resetting the exponent if the value becomes zero.
    fn clamp(&mut self) {
        while self.used_bigits > 0 && self.bigits[self.used_bigits - 1] == 0 {
            self.used_bigits -= 1;
        }
        if self.used_bigits == 0 {
            self.exponent = 0;
        }
    }

    /// Makes the exponent of self at most the exponent of `other`, by materializing implicit zero
    /// bigits.
    fn align(&mut self, other: &Bignum) {
        if self.exponent > other.exponent {
            let zero_bigits = self.exponent - other.exponent;
            Self::ensure_capacity(self.used_bigits + zero_bigits);
            self.bigits.copy_within(..self.used_bigits, zero_bigits);
            self.bigits[..zero_bigits].fill(0);
            self.used_bigits += zero_bigits;
            self.exponent -= zero_bigits;
        }
    }

    fn bigits_shift_left(&mut self, shift_amount: usize) {
        debug_assert!(shift_amount < BIGIT_SIZE);
        let mut carry = 0;
        for bigit in &mut self.bigits[..self.used_bigits] {
            let new_carry = *bigit >> (BIGIT_SIZE - shift_amount);
            *bigit = ((*bigit << shift_amount) + carry) & BIGIT_MASK;
            carry = new_carry;
        }
        if carry != 0 {
            self.bigits[self.used_bigits] = carry;
            self.used_bigits += 1;
        }
    }

    fn push_carry(&mut self, mut carry: u128) {
        while carry != 0 {
            Self::ensure_capacity(self.used_bigits + 1);
            self.bigits[self.used_bigits] = (carry & BIGIT_MASK as u128) as u32;
            self.used_bigits += 1;
            carry >>= BIGIT_SIZE;
        }
    }

    /// Subtracts `factor * other` from self, where the result is known not to underflow.
    fn subtract_times(&mut self, other: &Bignum, factor: u32) {
        debug_assert!(self.exponent <= other.exponent);
        if factor < 3 {
            for _ in 0..factor {
                self.subtract_bignum(other);
            }
            return;
        }

        let mut borrow: u32 = 0;
        let exponent_diff = other.exponent - self.exponent;
        for i in 0..other.used_bigits {
            let product = factor as u64 * other.bigits[i] as u64;
            let remove = borrow as u64 + product;
            let difference = self.bigits[i + exponent_diff]
                .wrapping_sub((remove & BIGIT_MASK as u64) as u32);
            self.bigits[i + exponent_diff] = difference & BIGIT_MASK;
            borrow = (difference >> (CHUNK_SIZE - 1)) + (remove >> BIGIT_SIZE) as u32;
        }
        for i in (other.used_bigits + exponent_diff)..self.used_bigits {
            if borrow == 0 {
                break;
            }
            let difference = self.bigits[i].wrapping_sub(borrow);
            self.bigits[i] = difference & BIGIT_MASK;
            borrow = difference >> (CHUNK_SIZE - 1);
        }
        self.clamp();
    }

    /// # Panics
    /// Panics if `size` exceeds [`BIGIT_CAPACITY`].
    fn ensure_capacity(size: usize) {
        assert!(size <= BIGIT_CAPACITY, "Bignum capacity overflow!");
    }
}

fn read_u64(digits: &[u8]) -> u64 {
    digits.iter().fold(0, |result, &ch| {
        assert!(ch.is_ascii_digit(), "Invalid decimal digit in Bignum string!");
        result * 10 + (ch - b'0') as u64
    })
}

fn hex_char_value(ch: u8) -> u32 {
    match ch {
        b'0'..=b'9' => (ch - b'0') as u32,
        b'a'..=b'f' => (ch - b'a' + 10) as u32,
        b'A'..=b'F' => (ch - b'A' + 10) as u32,
        _ => panic!("Invalid hexadecimal digit in Bignum string!"),
    }
}

impl Default for Bignum {
    fn default() -> Bignum {
        Bignum::new()
    }
}

impl From<u64> for Bignum {
    fn from(value: u64) -> Bignum {
        let mut big = Bignum::new();
        big.assign_u64(value);
        big
    }
}

impl PartialEq for Bignum {
    fn eq(&self, other: &Self) -> bool {
        Bignum::equal(self, other)
    }
}

impl Eq for Bignum {}

impl PartialOrd for Bignum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bignum {
    fn cmp(&self, other: &Self) -> Ordering {
        Bignum::compare(self, other)
    }
}

impl UpperHex for Bignum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.used_bigits == 0 {
            return write!(f, "0");
        }
        // Every bigit is exactly 7 hex digits wide, except the leading one.
        write!(f, "{:X}", self.bigits[self.used_bigits - 1])?;
        for bigit in self.bigits[..self.used_bigits - 1].iter().rev() {
            write!(f, "{:07X}", bigit)?;
        }
        for _ in 0..self.exponent {
            write!(f, "0000000")?;
        }
        Ok(())
    }
}

impl Debug for Bignum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Bignum(0x{:X})", self)
    }
}
