use flagship_parser::{Arg, ArgumentsParser, Visitor};
use log::{debug, trace};

use crate::errors::ParseError;
use crate::registry::{Registry, Target};
use crate::state::{Buckets, State};

/// Why the walk over the arguments stopped before the end
#[derive(Debug)]
pub(crate) enum Halt {
    Help,
    Version,
    Error(ParseError),
}

/// Walk the arguments once, left to right, sorting every value token into
/// the bucket of the option it follows. Stops at the first `--help`,
/// `--version`, or unknown option.
pub(crate) fn load_buckets<'arg>(
    registry: &Registry,
    mut arguments: ArgumentsParser<impl Iterator<Item = &'arg [u8]>>,
) -> Result<Buckets<'arg>, Halt> {
    struct Dispatcher<'a, 'arg> {
        registry: &'a Registry,
        state: &'a mut State<'arg>,
    }

    impl Dispatcher<'_, '_> {
        fn enter(&mut self, target: Option<Target>, token: impl FnOnce() -> String) -> Result<(), Halt> {
            match target {
                None => Err(Halt::Error(ParseError::UnknownOption { token: token() })),
                Some(Target::Help) => Err(Halt::Help),
                Some(Target::Version) => Err(Halt::Version),
                Some(Target::Option(index)) => {
                    self.state.enter(index);
                    Ok(())
                }
            }
        }

        fn lookup_long(&self, option: &Arg) -> Option<Target> {
            option
                .as_str()
                .ok()
                .and_then(|name| self.registry.lookup_long(name))
        }
    }

    fn long_token(option: &Arg) -> String {
        format!("--{}", String::from_utf8_lossy(option.bytes()))
    }

    impl<'arg> Visitor<'arg> for Dispatcher<'_, 'arg> {
        type Value = Result<(), Halt>;

        fn visit_value(self, argument: &'arg Arg) -> Self::Value {
            trace!("value {argument:?}");
            self.state.push(argument);
            Ok(())
        }

        fn visit_long(mut self, option: &'arg Arg) -> Self::Value {
            trace!("long option {option:?}");

            let target = self.lookup_long(option);
            self.enter(target, || long_token(option))
        }

        fn visit_short(mut self, option: u8) -> Self::Value {
            let option = char::from(option);
            trace!("short option -{option}");

            let target = self.registry.lookup_short(option);
            self.enter(target, || format!("-{option}"))
        }
    }

    let mut state = State::new(registry.option_count());

    while let Some(result) = arguments.next_arg(Dispatcher {
        registry,
        state: &mut state,
    }) {
        result?;
    }

    let buckets = state.finish();

    debug!(
        "{} options mentioned, {} positional tokens",
        buckets.options.iter().flatten().count(),
        buckets.positional.as_ref().map_or(0, Vec::len),
    );

    Ok(buckets)
}
