use thiserror::Error;

use crate::BoundedText;

// u64::MAX has 20 decimal digits.
const MAX_U64_DIGITS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("formatted value needs {needed} bytes but only {remaining} remain")]
    Capacity { needed: usize, remaining: usize },
}

/// Append `value` as a fixed-point number with `decimals` fractional digits.
///
/// The fraction is always written in full (`1.50000000`, not `1.5`), and no
/// point is written when `decimals` is zero. Nothing is written on failure.
pub fn format_fixed_point<const N: usize>(
    value: u64,
    decimals: u8,
    out: &mut BoundedText<N>,
) -> Result<(), FormatError> {
    let mut digits = [b'0'; MAX_U64_DIGITS];
    let mut count = 0;
    let mut rest = value;
    loop {
        digits[count] = b'0' + (rest % 10) as u8;
        rest /= 10;
        count += 1;
        if rest == 0 {
            break;
        }
    }

    let decimals = usize::from(decimals);
    let integer_len = count.saturating_sub(decimals).max(1);
    let needed = integer_len + if decimals > 0 { 1 + decimals } else { 0 };
    if needed > out.remaining() {
        return Err(FormatError::Capacity {
            needed,
            remaining: out.remaining(),
        });
    }

    // Positions count from the least significant digit.
    let digit_at = |position: usize| -> char {
        if position < count {
            char::from(digits[position])
        } else {
            '0'
        }
    };

    for position in (decimals..decimals + integer_len).rev() {
        out.push_char(digit_at(position));
    }
    if decimals > 0 {
        out.push_char('.');
        for position in (0..decimals).rev() {
            out.push_char(digit_at(position));
        }
    }

    Ok(())
}
