use core::{fmt, mem, str};

/**
A single, raw argument passed in from the command line.

This type is used in two ways: to name long options, and to carry value
tokens. For instance, given `--target foo --path=bar input.txt`, `target`,
`foo`, `path`, `bar`, and `input.txt` would all be passed as [`Arg`] values to
the relevant [`Visitor`][crate::Visitor] methods.

An [`Arg`] internally is just a byte slice, since that's what the OS gives us.
Use [`as_str`][Arg::as_str] to get at the text.
*/
#[derive(Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Arg([u8]);

impl Arg {
    pub const fn new(bytes: &[u8]) -> &Self {
        // SAFETY: Arg is repr transparent to a byte slice, so it's safe to
        // transmute into it.
        unsafe { mem::transmute(bytes) }
    }

    pub const fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Interpret the argument as UTF-8 text.
    pub fn as_str(&self) -> Result<&str, str::Utf8Error> {
        str::from_utf8(&self.0)
    }
}

impl PartialEq<[u8]> for Arg {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<str> for Arg {
    fn eq(&self, other: &str) -> bool {
        self.0 == *other.as_bytes()
    }
}

impl PartialEq<&str> for Arg {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other.as_bytes()
    }
}

/**
Debug-print an arg. This implementation does its best to treat the arg as a
string, but includes non-utf-8 bytes in their hex representation as needed.
 */
impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
            use fmt::Write as _;

            f.write_char('[')?;

            let mut bytes = bytes.iter().copied();

            if let Some(b) = bytes.next() {
                write!(f, "{b:#x}")?;
                bytes.try_for_each(|b| write!(f, ",{b:#x}"))?;
            }

            f.write_char(']')
        }

        if self.0.is_empty() {
            return write!(f, "\"\"");
        }

        self.0.utf8_chunks().enumerate().try_for_each(|(i, chunk)| {
            if i > 0 {
                write!(f, "..")?
            }

            let s = chunk.valid();
            let b = chunk.invalid();

            match (s, b) {
                (s, b"") => write!(f, "{s:?}"),
                ("", b) => write_bytes(f, b),
                (s, b) => {
                    write!(f, "{s:?}..")?;
                    write_bytes(f, b)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::format;

    use super::Arg;

    #[test]
    fn debug_prints_text_as_a_string() {
        assert_eq!(format!("{:?}", Arg::new(b"hello")), "\"hello\"");
    }

    #[test]
    fn debug_prints_invalid_bytes_as_hex() {
        assert_eq!(format!("{:?}", Arg::new(b"ab\xff")), "\"ab\"..[0xff]");
        assert_eq!(format!("{:?}", Arg::new(b"")), "\"\"");
    }

    #[test]
    fn as_str_rejects_invalid_utf8() {
        assert_eq!(Arg::new(b"ok").as_str(), Ok("ok"));
        assert!(Arg::new(b"\xc3\x28").as_str().is_err());
    }
}
