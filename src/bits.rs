//! Compile-time bit arithmetic used to pack configuration values.
//!
//! All functions are `const fn`. When they are evaluated in a const context (an associated
//! const, a `const` item or a `const { }` block) a bad argument stops the build with the panic
//! message. The macros in this module always evaluate in a const context.

/// ORs together a list of flags, each of which must be below 32.
///
/// ```
/// use typed_periph::bits::disjunction;
///
/// assert_eq!(disjunction(&[]), 0);
/// assert_eq!(disjunction(&[1, 4, 16]), 21);
/// ```
///
/// ```compile_fail,E0080
/// const FLAGS: u32 = typed_periph::bits::disjunction(&[3, 32]);
/// ```
pub const fn disjunction(values: &[u32]) -> u32 {
    let mut value = 0;
    let mut i = 0;
    while i < values.len() {
        assert!(values[i] < 32, "maximum 32 bits can be used");
        value |= values[i];
        i += 1;
    }
    value
}

/// ORs together `1 << index` for every index, each of which must be below 32.
///
/// ```
/// use typed_periph::bits::index_disjunction;
///
/// assert_eq!(index_disjunction(&[]), 0);
/// assert_eq!(index_disjunction(&[0, 5, 31]), 0x8000_0021);
/// ```
///
/// ```compile_fail,E0080
/// const PINS: u32 = typed_periph::bits::index_disjunction(&[32]);
/// ```
pub const fn index_disjunction(indices: &[u8]) -> u32 {
    let mut value = 0;
    let mut i = 0;
    while i < indices.len() {
        assert!(indices[i] < 32, "maximum 32 bits can be used");
        value |= 1 << indices[i];
        i += 1;
    }
    value
}

/// Number of set bits in `value`.
pub const fn bit_weight(value: u32) -> u8 {
    value.count_ones() as u8
}

/// Returns `true` if exactly one bit of `value` is set.
pub const fn is_power_of_two(value: u32) -> bool {
    bit_weight(value) == 1
}

/// ORs together register field encodings that must not share any bit.
///
/// Unlike [`disjunction`], the fields may sit anywhere in the word; this is what packs vendor
/// encodings such as `0x1011_0000` into a single mode value.
///
/// ```compile_fail,E0080
/// const MODE: u32 = typed_periph::bits::merge(&[0x10, 0x30]);
/// ```
pub const fn merge(fields: &[u32]) -> u32 {
    let mut value = 0;
    let mut i = 0;
    while i < fields.len() {
        assert!(value & fields[i] == 0, "overlapping register fields");
        value |= fields[i];
        i += 1;
    }
    value
}

/// [`disjunction`] evaluated at compile time.
///
/// ```
/// assert_eq!(typed_periph::disjunction!(1, 2), 3);
/// ```
#[macro_export]
macro_rules! disjunction {
    ($($value:expr),* $(,)?) => {
        const { $crate::bits::disjunction(&[$($value),*]) }
    };
}

/// [`index_disjunction`] evaluated at compile time.
#[macro_export]
macro_rules! index_disjunction {
    ($($index:expr),* $(,)?) => {
        const { $crate::bits::index_disjunction(&[$($index),*]) }
    };
}

/// [`bit_weight`] evaluated at compile time.
#[macro_export]
macro_rules! bit_weight {
    ($value:expr) => {
        const { $crate::bits::bit_weight($value) }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjunction_is_bitwise_or() {
        assert_eq!(disjunction(&[]), 0);
        assert_eq!(disjunction(&[0]), 0);
        assert_eq!(disjunction(&[31]), 31);
        assert_eq!(disjunction(&[1, 2, 8]), 0b1011);
        // Repeated and overlapping flags are fine here.
        assert_eq!(disjunction(&[3, 3, 5]), 7);

        for a in 0..32 {
            for b in 0..32 {
                assert_eq!(disjunction(&[a, b]), a | b);
            }
        }
    }

    #[test]
    #[should_panic(expected = "maximum 32 bits can be used")]
    fn disjunction_rejects_wide_flags() {
        let values: [u32; 2] = [1, 32];
        disjunction(core::hint::black_box(&values[..]));
    }

    #[test]
    fn index_disjunction_sets_each_bit() {
        assert_eq!(index_disjunction(&[]), 0);
        assert_eq!(index_disjunction(&[0]), 1);
        assert_eq!(index_disjunction(&[31]), 1 << 31);
        assert_eq!(index_disjunction(&[2, 2]), 4);

        let all: [u8; 32] = core::array::from_fn(|i| i as u8);
        assert_eq!(index_disjunction(&all), u32::MAX);
        for i in 0..32u8 {
            assert_eq!(index_disjunction(&[i]), 1 << i);
        }
    }

    #[test]
    #[should_panic(expected = "maximum 32 bits can be used")]
    fn index_disjunction_rejects_index_32() {
        let indices: [u8; 2] = [4, 32];
        index_disjunction(core::hint::black_box(&indices[..]));
    }

    #[test]
    fn bit_weight_counts_ones() {
        assert_eq!(bit_weight(0), 0);
        assert_eq!(bit_weight(u32::MAX), 32);
        assert_eq!(bit_weight(0x8000_0001), 2);
        assert_eq!(bit_weight(0x5555_5555), 16);

        let mut value = 0x1234_5678u32;
        for _ in 0..64 {
            let expected = (0..32).filter(|bit| value >> bit & 1 == 1).count() as u8;
            assert_eq!(bit_weight(value), expected);
            value = value.wrapping_mul(0x9E37_79B9).rotate_left(7);
        }
    }

    #[test]
    fn powers_of_two() {
        for shift in 0..32 {
            assert!(is_power_of_two(1 << shift));
        }
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(17));
        assert!(!is_power_of_two(0x300));
    }

    #[test]
    fn merge_packs_disjoint_fields() {
        assert_eq!(merge(&[]), 0);
        assert_eq!(merge(&[0x0, 0x1001_0000, 0x0010_0000]), 0x1011_0000);
        assert_eq!(merge(&[0x1, 0x10]), 0x11);
    }

    #[test]
    #[should_panic(expected = "overlapping register fields")]
    fn merge_rejects_shared_bits() {
        let fields: [u32; 2] = [0x0010_0000, 0x0030_0000];
        merge(core::hint::black_box(&fields[..]));
    }

    #[test]
    fn macros_evaluate_in_const_context() {
        assert_eq!(crate::disjunction!(), 0);
        assert_eq!(crate::disjunction!(4, 16), 20);
        assert_eq!(crate::index_disjunction!(5, 6), 0x60);
        assert_eq!(crate::bit_weight!(0xF0), 4);
    }
}
