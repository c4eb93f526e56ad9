use std::io::BufRead;

use color_print::ceprintln;

use qsworker::protocol::ClientMessage;
use qsworker::server;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

/// Reads one JSON client message per stdin line and writes one JSON output
/// message per assembly pass to stdout.
#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Keep explicit arg_push instructions instead of call-style sugar
    #[clap(long)]
    manual_stack: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();

    let worker = server::spawn(args.manual_stack, |output| {
        match serde_json::to_string(&output) {
            Ok(json) => println!("{json}"),
            Err(err) => ceprintln!("<red,bold>error</>: failed to serialize output: {}", err),
        }
    });

    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ClientMessage>(&line) {
            Ok(message) => {
                if !worker.send(message) {
                    break;
                }
            }
            Err(err) => ceprintln!("<red,bold>error</>: invalid message: {}", err),
        }
    }
}
