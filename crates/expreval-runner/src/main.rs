use expreval_runner::{execute, init_tracing, render_error, resolve_config, Cli};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    let result = resolve_config(&cli).and_then(|config| {
        init_tracing(config.log.level.as_str())?;
        execute(&cli, &config)
    });

    match result {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("{}", render_error(&error, &cli.format));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
