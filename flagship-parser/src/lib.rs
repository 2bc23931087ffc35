#![no_std]

/*!
Low-level implementation of argument classification. Takes care of telling
long options, short options, and plain value tokens apart, that sort of thing.
No type handling happens here, and neither does grouping values under the
options they belong to; that's the job of `flagship`. Usually this is too low
level to use directly.
*/

mod arg;

pub use arg::Arg;

/**
The [`ArgumentsParser`] type operates by passing each argument it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A plain value token, such as `18`, `-5`, or `input.txt`. Anything that
    /// isn't shaped like an option ends up here.
    fn visit_value(self, argument: &'arg Arg) -> Self::Value;

    /// A long option, such as `--name`. Everything after the `--` is the
    /// name, including any `=`.
    fn visit_long(self, option: &'arg Arg) -> Self::Value;

    /// A short option, such as `-n`. Always a single ASCII letter.
    fn visit_short(self, option: u8) -> Self::Value;
}

/**
An `ArgumentsParser` is the main entry point into `flagship_parser`. It
classifies one argument in each call to `next_arg`, sending it to the given
[`Visitor`].

The grammar is deliberately small:

- `--<letter><rest>` is a long option named `<letter><rest>`, unless it
  contains whitespace. There is no `--name=value` form; `name=value` is just
  a (probably unknown) option name.
- `-<letter>` is a short option. Only a single letter is allowed; there are
  no short option clusters.
- Everything else is a value. In particular `-5`, `-`, `--`, and `--5` are
  all values, so negative numbers never need escaping.

[flagship-parser][crate] operates entirely on borrowed data, because we assume
that command-line arguments can be loaded early on in `main` and then handled
in a borrowed form for the rest of the program. The ubiquitous `'arg` lifetime
refers to this borrowed command line data.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<I> {
    args: I,
}

impl<'arg, I> ArgumentsParser<I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of byte slices, where
    each byte slice is a single argument received from the command line. This
    list should *exclude* the name of the program, which is commonly passed as
    the first argument in the list.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            args: args.into_iter(),
        }
    }

    /// Classify the next argument and hand it to `visitor`. Returns `None`
    /// once the arguments are exhausted.
    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        let argument = self.args.next()?;

        Some(match argument {
            [b'-', b'-', option @ ..] if is_long_name(option) => visitor.visit_long(Arg::new(option)),
            &[b'-', short] if short.is_ascii_alphabetic() => visitor.visit_short(short),
            value => visitor.visit_value(Arg::new(value)),
        })
    }
}

/// A long option name starts with a letter and contains no whitespace.
fn is_long_name(option: &[u8]) -> bool {
    match option.split_first() {
        Some((first, rest)) => first.is_ascii_alphabetic() && !contains_whitespace(rest),
        None => false,
    }
}

/// Same set as `u8::is_ascii_whitespace`
fn contains_whitespace(input: &[u8]) -> bool {
    memchr::memchr3(b' ', b'\t', b'\n', input).is_some()
        || memchr::memchr2(b'\r', b'\x0C', input).is_some()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::{string::String, vec, vec::Vec};

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Token {
        Value(String),
        Long(String),
        Short(char),
    }

    fn text(arg: &Arg) -> String {
        String::from_utf8_lossy(arg.bytes()).into_owned()
    }

    struct Recorder;

    impl<'arg> Visitor<'arg> for Recorder {
        type Value = Token;

        fn visit_value(self, argument: &'arg Arg) -> Token {
            Token::Value(text(argument))
        }

        fn visit_long(self, option: &'arg Arg) -> Token {
            Token::Long(text(option))
        }

        fn visit_short(self, option: u8) -> Token {
            Token::Short(option as char)
        }
    }

    fn classify<'a>(args: &[&'a str]) -> Vec<Token> {
        let mut parser = ArgumentsParser::new(args.iter().map(|arg| arg.as_bytes()));
        let mut tokens = Vec::new();

        while let Some(token) = parser.next_arg(Recorder) {
            tokens.push(token);
        }

        tokens
    }

    #[test]
    fn long_short_and_values() {
        assert_eq!(
            classify(&["--name", "Ada", "-a", "18", "input.txt"]),
            vec![
                Token::Long("name".into()),
                Token::Value("Ada".into()),
                Token::Short('a'),
                Token::Value("18".into()),
                Token::Value("input.txt".into()),
            ]
        );
    }

    #[test]
    fn negative_numbers_are_values() {
        assert_eq!(
            classify(&["--height", "-5", "-1.5"]),
            vec![
                Token::Long("height".into()),
                Token::Value("-5".into()),
                Token::Value("-1.5".into()),
            ]
        );
    }

    #[test]
    fn malformed_markers_are_values() {
        assert_eq!(
            classify(&["-", "--", "--5", "-ab", "---x", "--a b"]),
            vec![
                Token::Value("-".into()),
                Token::Value("--".into()),
                Token::Value("--5".into()),
                Token::Value("-ab".into()),
                Token::Value("---x".into()),
                Token::Value("--a b".into()),
            ]
        );
    }

    #[test]
    fn equals_is_part_of_the_long_name() {
        assert_eq!(
            classify(&["--name=Ada", "--expr=a=b", "--empty="]),
            vec![
                Token::Long("name=Ada".into()),
                Token::Long("expr=a=b".into()),
                Token::Long("empty=".into()),
            ]
        );
    }

    #[test]
    fn any_whitespace_makes_a_value() {
        assert_eq!(
            classify(&["--note=hello, world", "--a\tb", "--a\rb"]),
            vec![
                Token::Value("--note=hello, world".into()),
                Token::Value("--a\tb".into()),
                Token::Value("--a\rb".into()),
            ]
        );
    }
}
