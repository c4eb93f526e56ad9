use std::collections::BTreeMap;

use color_print::{cformat, cprint, cprintln};

use qsasm::diag::Severity;
use qsasm::{assemble, disassemble};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files
    #[clap(default_value = "main.qsc")]
    input: Vec<String>,

    /// Output file
    #[clap(short, long, default_value = "main.qsc.bin")]
    output: String,

    /// Label offset table output (YAML)
    #[clap(short, long)]
    labels: Option<String>,

    /// Dump the disassembled listing
    #[clap(short, long)]
    dump: bool,

    /// Keep explicit arg_push instructions instead of call-style sugar
    #[clap(long)]
    manual_stack: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Quest script assembler");

    println!("1. Read Files and Parse Lines");

    let mut lines: Vec<String> = vec![];
    // (path, first global line index) per input file.
    let mut files: Vec<(String, usize)> = vec![];

    for path in &args.input {
        println!("  < {}", path);
        let text = std::fs::read_to_string(path)
            .expect(&cformat!("<red,bold>Failed to open file</>: {}", path));
        files.push((path.clone(), lines.len()));
        lines.extend(text.lines().map(str::to_string));
    }

    let assembly = assemble(&lines, args.manual_stack);

    let mut errors = 0;

    for diag in &assembly.diagnostics {
        if diag.severity == Severity::Error {
            errors += 1;
        }

        let global_idx = diag.line_no as usize - 1;
        let (path, file_start) = files
            .iter()
            .rev()
            .find(|(_, start)| global_idx >= *start)
            .cloned()
            .unwrap_or_else(|| ("<input>".to_string(), 0));
        let line = lines.get(global_idx).map(String::as_str).unwrap_or("");

        diag.print(&path, global_idx - file_start + 1, line);
    }

    println!("2. Resolve Labels and Generate Bytecode");

    if errors > 0 {
        cprintln!(
            "<red,bold>error</>: assembly failed with {} error(s), no output written",
            errors
        );
        std::process::exit(1);
    }

    let (bytecode, label_offsets) = isa::codec::encode(&assembly.object_code);

    println!("  > {}", &args.output);
    std::fs::write(&args.output, &bytecode)
        .expect(&cformat!("<red,bold>Failed to write file</>: {}", &args.output));

    if let Some(path) = &args.labels {
        let table: BTreeMap<u16, i32> = label_offsets
            .iter()
            .enumerate()
            .filter(|(_, &offset)| offset >= 0)
            .map(|(label, &offset)| (label as u16, offset))
            .collect();

        let yaml = serde_yaml::to_string(&table)
            .expect(&cformat!("<red,bold>Failed to serialize label table</>"));

        println!("  > {}", path);
        std::fs::write(path, yaml)
            .expect(&cformat!("<red,bold>Failed to write file</>: {}", path));
    }

    if args.dump {
        for line in disassemble(&assembly.object_code, args.manual_stack) {
            print_listing_line(&line);
        }
        println!("{}", "-".repeat(72));
    }
}

fn print_listing_line(line: &str) {
    let trimmed = line.trim_start();

    if trimmed.ends_with(':') && trimmed[..trimmed.len() - 1].bytes().all(|b| b.is_ascii_digit())
    {
        cprintln!("<green>{}</>", line);
    } else if trimmed.starts_with('.') {
        cprintln!("<yellow>{}</>", line);
    } else if let Some((mnemonic, rest)) = trimmed.split_once(' ') {
        let indent = &line[..line.len() - trimmed.len()];
        cprint!("{}<red>{:<18}</>", indent, mnemonic);
        cprintln!("<blue>{}</>", rest);
    } else if !trimmed.is_empty() {
        let indent = &line[..line.len() - trimmed.len()];
        cprintln!("{}<red>{}</>", indent, trimmed);
    } else {
        println!();
    }
}
