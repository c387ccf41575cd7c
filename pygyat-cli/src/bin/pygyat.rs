use clap::{Arg, ArgAction, Command, value_parser};
use pygyat_cli::{DriverOptions, dependency_reports, run};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("pygyat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Transpile PyGyat sources to Python (or back)")
        .arg(
            Arg::new("files")
                .help("Source files to transpile")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output path for the (single) input file"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .short('p')
                .help("Prefix for generated file names (default: \".\")"),
        )
        .arg(
            Arg::new("compile")
                .long("compile")
                .short('c')
                .help("Write plain outputs instead of hidden ones")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('d')
                .help("Directory for generated files (default: next to each input)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("reverse")
                .long("reverse")
                .short('r')
                .help("Translate Python to PyGyat")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("rename-imports")
                .long("rename-imports")
                .help("JSON object mapping module names to replacement import names")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("keywords")
                .long("keywords")
                .help("JSON object of extra PyGyat keywords and their Python meaning")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("deps")
                .long("deps")
                .help("Print the modules each input imports, as JSON, and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-follow")
                .long("no-follow")
                .help("Do not transpile imported local modules")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every step")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let inputs: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default();

    if matches.get_flag("deps") {
        let reports = dependency_reports(&inputs)?;
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let options = DriverOptions {
        inputs,
        output: matches.get_one::<String>("output").cloned(),
        prefix: matches.get_one::<String>("prefix").cloned(),
        compile: matches.get_flag("compile"),
        output_dir: matches.get_one::<PathBuf>("output-dir").cloned(),
        reverse: matches.get_flag("reverse"),
        rename_imports: matches.get_one::<PathBuf>("rename-imports").cloned(),
        keywords: matches.get_one::<PathBuf>("keywords").cloned(),
        follow_imports: !matches.get_flag("no-follow"),
    };

    if let Err(e) = run(&options) {
        error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}
