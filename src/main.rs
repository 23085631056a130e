use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;
use log::info;
use tally::{Config, Error, Expr};

/// tally evaluates arithmetic expressions made of decimal numbers, the four
/// operators `+ - * /` and parentheses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Decimal separator, `.` or `,`. Defaults to TALLY_DECIMAL_SEPARATOR,
    /// then to the separator of the current locale.
    #[arg(short, long)]
    separator: Option<char>,

    /// Number of fractional digits results are rounded to.
    #[arg(short, long, default_value_t = 2)]
    precision: u8,

    /// Also print the expression in reverse polish notation.
    #[arg(short, long)]
    rpn: bool,

    /// Expression to evaluate. Without it, expressions are read from the
    /// standard input, one per line, until `exit` or the end of input.
    expression: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match args.separator {
        Some(separator) => Config::with_separator(separator),
        None => Config::from_env(),
    };
    let config = config
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(2);
        })
        .with_precision(args.precision);
    info!("using '{}' as decimal separator", config.separator());

    if let Some(expression) = &args.expression {
        match evaluate(&config, expression) {
            Ok((expr, value)) => println!("{}", render(&config, &expr, value, args.rpn)),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = prompt(&config, args.rpn) {
        eprintln!("Failed to read the standard input: {e}");
        process::exit(1);
    }
}

fn evaluate(config: &Config, expression: &str) -> Result<(Expr, f64), Error> {
    let expr = Expr::parse(expression, config.separator())?;
    let value = expr.eval()?;
    Ok((expr, value))
}

fn render(config: &Config, expr: &Expr, value: f64, rpn: bool) -> String {
    if rpn {
        format!("{expr}\n{}", config.format(value))
    } else {
        config.format(value)
    }
}

fn prompt(config: &Config, rpn: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        writeln!(stdout, "Enter an expression (`exit` to quit):")?;
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        if line == "exit" || line == "quit" {
            break;
        }

        let answer = match evaluate(config, line) {
            Ok((expr, value)) => format!("Answer: {}", render(config, &expr, value, rpn)),
            Err(e) => e.to_string(),
        };
        writeln!(stdout, "********\n{answer}\n********")?;
    }
    Ok(())
}
