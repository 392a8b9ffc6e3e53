/// Représentation ASCII d'un octet : 1 à 3 chiffres, sans zéro de tête.
#[derive(Clone, Copy)]
struct Digits {
    bytes: [u8; 3],
    len: u8,
}

const fn byte_to_digits(n: u8) -> Digits {
    if n < 10 {
        Digits {
            bytes: [b'0' + n, 0, 0],
            len: 1,
        }
    } else if n < 100 {
        Digits {
            bytes: [b'0' + n / 10, b'0' + n % 10, 0],
            len: 2,
        }
    } else {
        Digits {
            bytes: [b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10],
            len: 3,
        }
    }
}

const fn build_table() -> [Digits; 256] {
    let mut table = [Digits {
        bytes: [0; 3],
        len: 0,
    }; 256];
    let mut n = 0;
    while n < 256 {
        table[n] = byte_to_digits(n as u8);
        n += 1;
    }
    table
}

/// Table 0..=255 → chiffres, calculée à la compilation.
static DIGIT_TABLE: [Digits; 256] = build_table();

/// Decimal digits of `n`.
///
/// # Example
/// ```
/// use hv_ansi::digits::digits;
/// assert_eq!(digits(7), b"7");
/// assert_eq!(digits(42), b"42");
/// assert_eq!(digits(255), b"255");
/// ```
#[inline(always)]
#[must_use]
pub fn digits(n: u8) -> &'static [u8] {
    let d = &DIGIT_TABLE[n as usize];
    &d.bytes[..d.len as usize]
}

/// Append the decimal form of `n`. Used for cursor coordinates.
///
/// # Example
/// ```
/// use hv_ansi::digits::push_decimal;
/// let mut buf = Vec::new();
/// push_decimal(&mut buf, 1080);
/// assert_eq!(buf, b"1080");
/// ```
pub fn push_decimal(buf: &mut Vec<u8>, n: u32) {
    if let Ok(small) = u8::try_from(n) {
        buf.extend_from_slice(digits(small));
        return;
    }
    let mut tmp = [0u8; 10];
    let mut i = tmp.len();
    let mut v = n;
    while v > 0 {
        i -= 1;
        tmp[i] = b'0' + (v % 10) as u8;
        v /= 10;
    }
    buf.extend_from_slice(&tmp[i..]);
}
