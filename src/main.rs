mod debug_report;

use betscreen::analyze;
use std::io::{self, IsTerminal, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let analysis = match analyze(&config.transcript, &config.ocr_text) {
        Ok(analysis) => analysis,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if config.json {
        match serde_json::to_string_pretty(&analysis) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    } else {
        debug_report::print_run(&config.transcript, &analysis, config.color);
    }
}

struct CliConfig {
    transcript: String,
    ocr_text: String,
    color: bool,
    json: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut transcript: Option<String> = None;
    let mut ocr_text = String::new();
    let mut color = io::stdout().is_terminal();
    let mut json = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("betscreen {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--ocr" => {
                let value = args.next().ok_or_else(|| "error: --ocr expects a value".to_string())?;
                ocr_text = value;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if transcript.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                transcript = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if transcript.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    transcript = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--ocr=") => {
                ocr_text = arg.trim_start_matches("--ocr=").to_string();
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if transcript.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                transcript = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if transcript.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                transcript = Some(rest);
                break;
            }
        }
    }

    let transcript = match transcript {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if transcript.trim().is_empty() && ocr_text.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { transcript, ocr_text, color, json })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "betscreen {version}

Responsible-gaming compliance screening CLI.

Usage:
  betscreen [OPTIONS] [--] <transcript...>
  betscreen [OPTIONS] --input <text>

Options:
  -i, --input <text>         Transcript text to screen. If omitted, reads
                             remaining args or stdin when no args are provided.
  --ocr <text>               On-screen (OCR) text to screen alongside the
                             transcript.
  --json                     Print the full analysis as JSON.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
