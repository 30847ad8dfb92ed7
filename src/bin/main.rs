/// Terminal player for choice scripts
use choice_tree::catalog::{InMemoryCatalog, Player};
use choice_tree::{
    build_script, diagnostic, BuildOptions, ChoiceNode, ChoiceRuntime, Effect, RuntimeError,
    Transition,
};
use std::env;
use std::io::{self, BufRead, Read, Write};
use std::process;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  choice-tree <file> [--strict]    Play a choice script");
    eprintln!("  choice-tree -                    Check a script from stdin and show its first choice");
    eprintln!("  choice-tree --help               Show this help message");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --strict    Treat malformed action lines as errors");
    eprintln!();
    eprintln!("Enter an option number to pick it, or 'q' to quit.");
    eprintln!("Set RUST_LOG=debug to see every applied effect.");
}

fn print_choice(node: &ChoiceNode) {
    println!();
    for line in &node.synopsis {
        println!("{}", line);
    }
    for (index, option) in node.options.iter().enumerate() {
        println!("  {}. {}", index + 1, option.synopsis.trim_start());
    }
}

fn print_effects(effects: &[Effect], player: &Player) {
    for effect in effects {
        match effect {
            Effect::CreditsGranted { amount } => println!("  {:+} credits", amount),
            Effect::ItemGranted { item } => println!("  + {}", item.name),
            Effect::ItemRemoved { item, removed: true } => println!("  - {}", item.name),
            Effect::ItemRemoved {
                item,
                removed: false,
            } => println!("  (you have no {})", item.name),
            Effect::EnteredChoice { .. } => {}
        }
    }
    let inventory: Vec<&str> = player.inventory.iter().map(|i| i.name.as_str()).collect();
    println!(
        "  [credits: {} | hold: {}]",
        player.credits,
        if inventory.is_empty() {
            "empty".to_string()
        } else {
            inventory.join(", ")
        }
    );
}

fn catalog() -> InMemoryCatalog {
    #[cfg(feature = "builtin-items")]
    {
        InMemoryCatalog::builtin()
    }
    #[cfg(not(feature = "builtin-items"))]
    {
        InMemoryCatalog::new()
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    if args[1] == "--help" || args[1] == "-h" {
        print_usage();
        process::exit(0);
    }

    let strict = args[2..].iter().any(|arg| arg == "--strict");

    let source = if args[1] == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).unwrap_or_else(|e| {
            eprintln!("Error reading from stdin: {}", e);
            process::exit(1);
        });
        buffer
    } else {
        tokio::fs::read_to_string(&args[1])
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error reading file '{}': {}", args[1], e);
                process::exit(1);
            })
    };

    let source_name: &str = if args[1] == "-" { "<stdin>" } else { &args[1] };

    let options = BuildOptions::new().with_warnings_as_errors(strict);
    let built = build_script(&source, options).unwrap_or_else(|e| {
        eprint!("{}", diagnostic::report_parse_error(source_name, &source, &e));
        process::exit(1);
    });
    for warning in &built.warnings {
        eprint!(
            "{}",
            diagnostic::report_build_warning(source_name, &source, warning)
        );
    }

    let catalog = catalog();
    let mut player = Player::default();
    let mut runtime = ChoiceRuntime::new(&built.root);

    // Reading stdin for both the script and the answers is not supported
    if args[1] == "-" {
        print_choice(runtime.current());
        return;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();

    loop {
        print_choice(runtime.current());
        print!("> ");
        io::stdout().flush().unwrap_or_else(|e| {
            eprintln!("Error writing to stdout: {}", e);
            process::exit(1);
        });

        let Some(Ok(answer)) = input.next() else {
            break;
        };
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("q") {
            break;
        }

        let index = match answer.parse::<usize>() {
            Ok(number) if number >= 1 => number - 1,
            _ => {
                println!("Pick an option number.");
                continue;
            }
        };

        match runtime.select(index, &catalog, &mut player) {
            Ok(selection) => {
                print_effects(&selection.effects, &player);
                if let Transition::Exhausted = selection.transition {
                    println!();
                    println!("(end)");
                    break;
                }
            }
            Err(RuntimeError::OptionOutOfRange { len, .. }) => {
                println!("There are only {} option(s).", len);
            }
            Err(e) => {
                eprint!("{}", diagnostic::report_runtime_error(source_name, &source, &e));
                break;
            }
        }
    }
}
