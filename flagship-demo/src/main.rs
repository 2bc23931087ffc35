use anyhow::Context as _;
use flagship::{Handle, Registry, Value};
use lazy_format::lazy_format;
use log::info;

/// Everything the demo asks about a student
struct Student {
    age: Handle<i64>,
    odds: Handle<Vec<i64>>,
    height: Handle<f64>,
    float_values: Handle<Vec<f64>>,
    weight: Handle<f64>,
    double_values: Handle<Vec<f64>>,
    sex: Handle<bool>,
    bool_values: Handle<Vec<bool>>,
    name: Handle<String>,
    likes: Handle<Vec<String>>,
    note: Handle<String>,
}

impl Student {
    fn register(registry: &mut Registry) -> Result<Self, flagship::DefinitionError> {
        Ok(Self {
            age: registry
                .option("age", 18_i64)
                .short('a')
                .description("the age of the student")
                .validate(|&age| match age > 0 {
                    true => Ok(()),
                    false => Err("age must be greater than 0"),
                })
                .try_add()?,

            odds: registry
                .option("odds", vec![1_i64, 3])
                .description("the odd number(s)")
                .validate(|odds: &Vec<i64>| match odds.iter().all(|n| n % 2 != 0) {
                    true => Ok(()),
                    false => Err("not all numbers entered are odd"),
                })
                .try_add()?,

            height: registry
                .option("height", 174.5_f64)
                .description("the height")
                .validate(|&height| match height > 0.0 {
                    true => Ok(()),
                    false => Err("the value of height must be positive"),
                })
                .try_add()?,

            float_values: registry
                .option("fvs", vec![3.5_f64, 2.25, 1.5])
                .description("the float-type parameter(s)")
                .try_add()?,

            weight: registry
                .option("weight", 60.0_f64)
                .short('w')
                .description("the weight")
                .try_add()?,

            double_values: registry
                .option("dvs", vec![1.1_f64, 2.2])
                .description("the double-type parameter(s)")
                .try_add()?,

            sex: registry
                .option("sex", true)
                .short('s')
                .description("the sex (male: on, female: off)")
                .required()
                .try_add()?,

            bool_values: registry
                .option("bvs", vec![true, false])
                .description("the bool-type parameter(s)")
                .required()
                .try_add()?,

            name: registry
                .option("name", String::new())
                .short('n')
                .description("the name")
                .required()
                .validate(|name: &String| match name.is_empty() {
                    true => Err("the name string cannot be an empty string"),
                    false => Ok(()),
                })
                .try_add()?,

            likes: registry
                .option("likes", vec!["eat".to_owned(), "sleep".to_owned()])
                .short('l')
                .description("the likes")
                .try_add()?,

            note: registry
                .positional("hello, world".to_owned())
                .description("a note")
                .try_add()?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut registry = Registry::new();
    registry.set_description("Record the details of a student.");
    registry.set_version(env!("CARGO_PKG_VERSION"));

    let student = Student::register(&mut registry).context("failed to define options")?;

    registry.parse_env_or_exit();

    info!("parsed {} options", registry.options().len());

    let sex = match student.sex.get() {
        true => "male",
        false => "female",
    };

    let summary = lazy_format!(
        "{name} ({sex}), age {age}, {height}cm, {weight}kg",
        name = student.name.borrow(),
        age = student.age.get(),
        height = student.height.get(),
        weight = student.weight.get(),
    );

    println!("{summary}");
    println!("likes: {}", Value::StrVec(student.likes.get()));
    println!("odds: {}", Value::IntVec(student.odds.get()));
    println!("fvs: {}", Value::FloatVec(student.float_values.get()));
    println!("dvs: {}", Value::FloatVec(student.double_values.get()));
    println!("bvs: {}", Value::BoolVec(student.bool_values.get()));
    println!("note: {}", student.note.borrow());
    println!();

    registry
        .options()
        .iter()
        .chain(registry.positional_descriptor())
        .for_each(|option| println!("  {option}"));

    Ok(())
}
