/*!
The [`Registry`], which owns every option definition and runs the parse.
 */

use std::{
    cell::RefCell,
    collections::HashMap,
    ffi::OsString,
    io::{self, Write as _},
    path::Path,
    process,
    rc::Rc,
};

use log::debug;

use crate::arguments::LoadedArguments;
use crate::builder::{OptionBuilder, PositionalBuilder};
use crate::build;
use crate::descriptor::{OptionDescriptor, Slot, Validator, check_long, check_short};
use crate::dispatch::{self, Halt};
use crate::errors::{DefinitionError, ParseError};
use crate::help::{
    DEFAULT_VERSION, HELP, ParameterOption, ParameterPositional, Requirement, TextSlot,
    UsageItems, VERSION,
};
use crate::printers;
use crate::value::{Value, ValueKind};

/// Wrap width for generated help, unless changed with
/// [`set_help_width`][Registry::set_help_width]
pub const DEFAULT_HELP_WIDTH: usize = 80;

/// Used in generated text when neither `argv[0]` nor
/// [`set_program_name`][Registry::set_program_name] gives us a name
const FALLBACK_PROGRAM: &str = "program";

/// What a successful call to [`Registry::parse`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// Every option was parsed and validated, and the handles are up to date
    Parsed,

    /// `--help` or `-h` was given. Contains the help text; no option values
    /// were changed.
    Help(String),

    /// `--version` or `-v` was given. Contains the version message; no
    /// option values were changed.
    Version(String),
}

/// Resolved meaning of an option name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Help,
    Version,
    Option(usize),
}

/**
The set of options a program accepts.

Register options with [`option`][Registry::option] and
[`positional`][Registry::positional], then call [`parse`][Registry::parse]
(or one of its variants) once. Every registry comes with `--help`/`-h` and
`--version`/`-v` already defined. After the first parse, the registry is
frozen and further registrations fail.
 */
pub struct Registry {
    description: String,
    program: Option<String>,
    help_width: usize,
    options: Vec<OptionDescriptor>,
    longs: HashMap<String, usize>,
    shorts: HashMap<char, usize>,
    positional: Option<OptionDescriptor>,
    help: TextSlot,
    version: Option<String>,
    frozen: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            description: String::new(),
            program: None,
            help_width: DEFAULT_HELP_WIDTH,
            options: Vec::new(),
            longs: HashMap::new(),
            shorts: HashMap::new(),
            positional: None,
            help: TextSlot::default(),
            version: None,
            frozen: false,
        }
    }

    /// Start registering a `--long` option with a default value. The type of
    /// the default decides the type of the option.
    pub fn option<T: ValueKind>(&mut self, long: impl Into<String>, default: T) -> OptionBuilder<'_, T> {
        OptionBuilder::new(self, long.into(), default)
    }

    /// Start registering the positional argument. There can be only one;
    /// give it a vector type to collect several values.
    pub fn positional<T: ValueKind>(&mut self, default: T) -> PositionalBuilder<'_, T> {
        PositionalBuilder::new(self, default)
    }

    /// Set the program description that opens the generated help text
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.help.discard();
    }

    /// Replace the generated help text entirely
    pub fn set_help(&mut self, text: impl Into<String>) {
        self.help.set(text.into());
    }

    /// Set the version reported by `--version`. Defaults to `1.0.0`.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    /// Use this name in help and version text, instead of the file name from
    /// `argv[0]`
    pub fn set_program_name(&mut self, name: impl Into<String>) {
        self.program = Some(name.into());
    }

    pub fn set_help_width(&mut self, width: usize) {
        self.help_width = width;
        self.help.discard();
    }

    /// The named options, in registration order. The built-in `--help` and
    /// `--version` aren't included.
    #[must_use]
    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    #[must_use]
    pub fn positional_descriptor(&self) -> Option<&OptionDescriptor> {
        self.positional.as_ref()
    }

    /// Look up a registered option by its long name
    #[must_use]
    pub fn get(&self, long: &str) -> Option<&OptionDescriptor> {
        self.longs.get(long).map(|&index| &self.options[index])
    }

    /// True once a parse has started; no more options can be registered.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn option_count(&self) -> usize {
        self.options.len()
    }

    pub(crate) fn lookup_long(&self, name: &str) -> Option<Target> {
        match name {
            name if name == HELP.long => Some(Target::Help),
            name if name == VERSION.long => Some(Target::Version),
            name => self.longs.get(name).copied().map(Target::Option),
        }
    }

    pub(crate) fn lookup_short(&self, short: char) -> Option<Target> {
        match short {
            short if short == HELP.short => Some(Target::Help),
            short if short == VERSION.short => Some(Target::Version),
            short => self.shorts.get(&short).copied().map(Target::Option),
        }
    }

    pub(crate) fn insert(
        &mut self,
        slot: Slot,
        default: Value,
        description: String,
        requirement: Requirement,
        validator: Option<Validator>,
    ) -> Result<Rc<RefCell<Value>>, DefinitionError> {
        if self.frozen {
            return Err(DefinitionError::Frozen { slot });
        }

        match slot {
            Slot::Positional => {
                if self.positional.is_some() {
                    return Err(DefinitionError::DuplicatePositional);
                }
            }
            Slot::Option { ref long, short } => {
                check_long(long)?;

                if self.lookup_long(long).is_some() {
                    return Err(DefinitionError::DuplicateLong { name: long.clone() });
                }

                if let Some(short) = short {
                    check_short(long, short)?;

                    if self.lookup_short(short).is_some() {
                        return Err(DefinitionError::DuplicateShort {
                            long: long.clone(),
                            short,
                        });
                    }
                }
            }
        }

        debug!("registering {slot} of type {}", default.value_type());

        let descriptor = OptionDescriptor::new(slot, default, description, requirement, validator);
        let shared = descriptor.shared();

        match descriptor.slot().clone() {
            Slot::Positional => self.positional = Some(descriptor),
            Slot::Option { long, short } => {
                let index = self.options.len();

                self.longs.insert(long, index);
                if let Some(short) = short {
                    self.shorts.insert(short, index);
                }

                self.options.push(descriptor);
            }
        }

        self.help.discard();

        Ok(shared)
    }

    /**
    Parse a full argument vector, including the program name in the first
    position, and update every option's value.

    On error, no option value is changed. `--help` and `--version` stop the
    parse as soon as they're seen, before any requiredness or value checks.
     */
    pub fn parse<I>(&mut self, args: I) -> Result<Outcome, ParseError>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        self.parse_loaded(&args.into_iter().collect())
    }

    /// Parse the arguments this process was started with
    pub fn parse_env(&mut self) -> Result<Outcome, ParseError> {
        self.parse_loaded(&LoadedArguments::from_env())
    }

    pub fn parse_loaded(&mut self, arguments: &LoadedArguments) -> Result<Outcome, ParseError> {
        self.frozen = true;

        let program = self.program_name(arguments);

        match dispatch::load_buckets(self, arguments.parser()) {
            Ok(buckets) => build::build(self, buckets).map(|()| Outcome::Parsed),
            Err(Halt::Error(error)) => Err(error),
            Err(Halt::Help) => Ok(Outcome::Help(self.help_text(&program).to_owned())),
            Err(Halt::Version) => Ok(Outcome::Version(self.version_text(&program))),
        }
    }

    /**
    Parse the arguments this process was started with, handling everything
    except success on the spot: help and version text go to stdout and the
    process exits with status 0, and errors go to stderr and the process exits
    with status 1.
     */
    pub fn parse_env_or_exit(&mut self) {
        let arguments = LoadedArguments::from_env();

        match self.parse_loaded(&arguments) {
            Ok(Outcome::Parsed) => {}
            Ok(Outcome::Help(text)) => {
                let _ = write!(io::stdout().lock(), "{text}");
                process::exit(0);
            }
            Ok(Outcome::Version(text)) => {
                let _ = writeln!(io::stdout().lock(), "{text}");
                process::exit(0);
            }
            Err(error) => {
                let program = self.program_name(&arguments);
                let _ = writeln!(
                    io::stderr().lock(),
                    "{}",
                    printers::error_message(&program, &error)
                );
                process::exit(1);
            }
        }
    }

    /// The help text: either what was given to [`set_help`][Self::set_help],
    /// or generated from the registered options the first time it's needed.
    /// Generated text is rebuilt if the program name, description, width, or
    /// set of options has changed since.
    pub fn help_text(&mut self, program: &str) -> &str {
        let Self {
            ref description,
            ref options,
            ref positional,
            help_width,
            ref mut help,
            ..
        } = *self;

        help.get_or_generate(program, || {
            printers::render_help(
                program,
                description,
                &usage_items(options, positional.as_ref()),
                help_width,
            )
        })
    }

    /// The version message, like `myprogram 2.1.0`
    #[must_use]
    pub fn version_text(&self, program: &str) -> String {
        let version = self.version.as_deref().unwrap_or(DEFAULT_VERSION);
        format!("{program} {version}")
    }

    fn program_name(&self, arguments: &LoadedArguments) -> String {
        match self.program {
            Some(ref program) => program.clone(),
            None => arguments
                .argv0()
                .and_then(|argv0| Path::new(argv0).file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| FALLBACK_PROGRAM.to_owned()),
        }
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("description", &self.description)
            .field("program", &self.program)
            .field("options", &self.options)
            .field("positional", &self.positional)
            .field("version", &self.version)
            .field("frozen", &self.frozen)
            .finish_non_exhaustive()
    }
}

fn usage_items<'a>(
    options: &'a [OptionDescriptor],
    positional: Option<&'a OptionDescriptor>,
) -> UsageItems<'a> {
    let options = options
        .iter()
        .filter_map(|descriptor| {
            let long = descriptor.long()?;

            Some(ParameterOption {
                long,
                short: descriptor.short(),
                value: Some(descriptor.value_type()),
                requirement: descriptor.requirement(),
                default: Some(descriptor.default_value()),
                description: descriptor.description(),
            })
        })
        .chain([HELP, VERSION].into_iter().map(|builtin| ParameterOption {
            long: builtin.long,
            short: Some(builtin.short),
            value: None,
            requirement: Requirement::Optional,
            default: None,
            description: builtin.description,
        }))
        .collect();

    UsageItems {
        positional: positional.map(|descriptor| ParameterPositional {
            value: descriptor.value_type(),
            requirement: descriptor.requirement(),
            default: descriptor.default_value(),
            description: descriptor.description(),
        }),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_reserved() {
        let mut registry = Registry::new();

        assert_eq!(
            registry.option("help", false).try_add().unwrap_err(),
            DefinitionError::DuplicateLong {
                name: "help".to_owned()
            }
        );

        assert_eq!(
            registry.option("verbose", false).short('v').try_add().unwrap_err(),
            DefinitionError::DuplicateShort {
                long: "verbose".to_owned(),
                short: 'v'
            }
        );

        assert!(registry.options().is_empty());
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut registry = Registry::new();
        registry.option("age", 18_i64).short('a').add();

        assert!(matches!(
            registry.option("age", 1.5_f64).try_add(),
            Err(DefinitionError::DuplicateLong { .. })
        ));
        assert!(matches!(
            registry.option("alpha", 1.5_f64).short('a').try_add(),
            Err(DefinitionError::DuplicateShort { short: 'a', .. })
        ));

        registry.positional(Vec::<String>::new()).add();
        assert!(matches!(
            registry.positional(String::new()).try_add(),
            Err(DefinitionError::DuplicatePositional)
        ));

        assert_eq!(registry.options().len(), 1);
    }

    #[test]
    fn bad_names_are_rejected() {
        let mut registry = Registry::new();

        assert!(matches!(
            registry.option("9lives", 9_i64).try_add(),
            Err(DefinitionError::InvalidLongName { .. })
        ));
        assert!(matches!(
            registry.option("lives", 9_i64).short('9').try_add(),
            Err(DefinitionError::InvalidShortName { short: '9', .. })
        ));

        // A rejected short name doesn't leave its long name behind
        assert!(registry.option("lives", 9_i64).try_add().is_ok());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn add_panics_on_definition_errors() {
        let mut registry = Registry::new();
        registry.option("age", 18_i64).add();
        registry.option("age", 19_i64).add();
    }

    #[test]
    fn lookups() {
        let mut registry = Registry::new();
        registry.option("name", String::new()).short('n').add();

        assert_eq!(registry.lookup_long("name"), Some(Target::Option(0)));
        assert_eq!(registry.lookup_short('n'), Some(Target::Option(0)));
        assert_eq!(registry.lookup_long("help"), Some(Target::Help));
        assert_eq!(registry.lookup_short('v'), Some(Target::Version));
        assert_eq!(registry.lookup_long("nope"), None);
        assert_eq!(registry.lookup_short('x'), None);
    }

    #[test]
    fn registration_after_parse_is_rejected() {
        let mut registry = Registry::new();
        assert_eq!(registry.parse(["prog"]), Ok(Outcome::Parsed));

        assert_eq!(
            registry.option("late", 0_i64).try_add().unwrap_err(),
            DefinitionError::Frozen {
                slot: Slot::option("late", None)
            }
        );
    }

    #[test]
    fn program_name_comes_from_argv0() {
        let mut registry = Registry::new();
        registry.set_version("2.1.0");

        assert_eq!(
            registry.parse(["/usr/local/bin/tool", "-v"]),
            Ok(Outcome::Version("tool 2.1.0".to_owned()))
        );
    }

    #[test]
    fn program_name_override() {
        let mut registry = Registry::new();
        registry.set_program_name("renamed");

        assert_eq!(
            registry.parse(["tool", "--version"]),
            Ok(Outcome::Version("renamed 1.0.0".to_owned()))
        );
    }

    #[test]
    fn empty_argument_vector() {
        let mut registry = Registry::new();
        let age = registry.option("age", 18_i64).add();

        assert_eq!(registry.parse(Vec::<String>::new()), Ok(Outcome::Parsed));
        assert_eq!(age.get(), 18);
    }
}
