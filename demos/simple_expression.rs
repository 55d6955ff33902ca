use log::debug;
use mathexpr_rs::{eval_math_string, lex, Environment, Token};

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!("  {}", token);
    }
}

fn main() {
    pretty_env_logger::init();

    let env = Environment::new();

    let expr = "2^(2*2 + 4) - 1";
    let tokens = lex(expr).unwrap();
    debug!("tokens: {tokens:?}");
    println!("Tokens of {expr}:");
    print_tokens(&tokens);

    for expr in [expr, "-2^2", "10 - 3 + 2", "sin(pi / 2)", "pi()", "1 + 1 1", "foo"] {
        match eval_math_string(expr, &env) {
            Ok(result) => println!("{expr} = {result}"),
            Err(err) => println!("Couldn't evaluate {expr}: {err}"),
        }
    }
}
