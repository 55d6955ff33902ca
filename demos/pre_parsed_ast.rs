use mathexpr_rs::functions::register_functions;
use mathexpr_rs::{Decimal, Environment, Evaluator, Parser};

fn main() {
    pretty_env_logger::init();

    let expression = "max(abs(x - 10), sqrt(x)) * pi";
    let ast = Parser::parse_expression(expression).expect("Failed to parse");
    println!("Parsed: {}", ast);

    let mut env = Environment::new();
    register_functions(&mut env);
    env.define_function("hypot", 2, |args| {
        let (a, b) = (args[0], args[1]);
        let squared = a
            .checked_mul(a)
            .and_then(|a2| b.checked_mul(b).and_then(|b2| a2.checked_add(b2)))
            .ok_or(mathexpr_rs::EvalError::Overflow { operator: '*' })?;
        mathexpr_rs::functions::other::sqrt(&[squared])
    });

    for x in [1, 16, 100] {
        env.define_variable("x", Decimal::from(x));
        match Evaluator::new(&env).evaluate(&ast) {
            Ok(result) => println!("x = {}: {}", x, result),
            Err(err) => println!("x = {}: error: {}", x, err),
        }
    }

    println!(
        "hypot(3, 4) = {:?}",
        env.eval_math_string("hypot(3, 4)")
    );
}
