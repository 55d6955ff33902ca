use mathexpr_rs::{Decimal, Environment, Parser};

fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        [("price", Decimal::from(120)), ("volume", Decimal::from(3000))],
        [("price", Decimal::from(80)), ("volume", Decimal::from(6000))],
    ];

    let expression = "price * volume / (volume - 1000)";
    let ast = Parser::parse_expression(expression).expect("Failed to parse");

    for (i, bindings) in contexts.iter().enumerate() {
        let mut env = Environment::new();
        for (name, value) in bindings {
            env.define_variable(name, *value);
        }

        match mathexpr_rs::eval(&ast, &env) {
            Ok(result) => println!("Result {}: {}", i, result),
            Err(err) => println!("Error {}: {}", i, err),
        }
    }
}
