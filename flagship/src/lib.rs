/*!
A typed command line option parser.

Register each option with a default value, whose type decides the type of the
option. Registration gives back a [`Handle`] you can read the parsed value
from. Then parse the command line once:

```
use flagship::{Outcome, Registry};

let mut registry = Registry::new();

let age = registry
    .option("age", 18_i64)
    .short('a')
    .description("your age")
    .validate(|&age| match age {
        0..=150 => Ok(()),
        _ => Err("must be between 0 and 150"),
    })
    .add();

let name = registry
    .option("name", String::new())
    .description("your name")
    .required()
    .add();

let likes = registry.option("likes", Vec::<String>::new()).add();

let outcome = registry.parse(["prog", "--name", "Ada", "--likes", "tea", "math"]);

assert_eq!(outcome, Ok(Outcome::Parsed));
assert_eq!(age.get(), 18);
assert_eq!(name.get(), "Ada");
assert_eq!(likes.get(), ["tea", "math"]);
```

Options hold one of a small, closed set of types: `i64`, `f64`, `bool`,
`String`, or a `Vec` of any of those. On the command line, every plain value
after `--option` (or its short form `-o`) belongs to that option, until the
next option. Values that come before any option belong to the
[positional argument][Registry::positional], if there is one. A scalar option
uses the first of its values; a vector option uses all of them. A `bool`
option given no values at all is `true`.

`--help`/`-h` and `--version`/`-v` are always defined; they end the parse
early with [`Outcome::Help`] or [`Outcome::Version`].

The lower level tokenizer lives in `flagship-parser`, and is re-exported
here as [`Arg`].
*/

pub mod arguments;
pub mod builder;
mod build;
pub mod descriptor;
mod dispatch;
pub mod errors;
mod handle;
pub mod help;
mod impls;
mod printers;
pub mod registry;
mod state;
pub mod value;

pub use arguments::LoadedArguments;
pub use builder::{OptionBuilder, PositionalBuilder};
pub use descriptor::{OptionDescriptor, Slot};
pub use errors::{CoercionError, DefinitionError, ParseError};
pub use flagship_parser::Arg;
pub use handle::Handle;
pub use help::{Repetition, Requirement};
pub use registry::{Outcome, Registry};
pub use value::{Scalar, Value, ValueKind, ValueType};
