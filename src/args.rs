use clap::{value_parser, Arg, ArgAction, Command};

/// Parse an integer given in decimal or with a `0x` prefix
pub fn parse_int(value: &str) -> Result<u32, String> {
    let value = value.trim();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("Invalid integer '{}': {}", value, e))
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file")
        .required(true)
        .index(1)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .help("Output file (default: stdout)")
        .value_name("FILE")
}

fn hex_arg(help: &'static str) -> Arg {
    Arg::new("hex")
        .short('x')
        .long("hex")
        .help(help)
        .action(ArgAction::SetTrue)
}

fn coder_args() -> Vec<Arg> {
    vec![
        Arg::new("block_length")
            .short('k')
            .long("block-length")
            .help("Data bytes per block (at least 11)")
            .value_name("BYTES")
            .value_parser(value_parser!(usize))
            .default_value("223")
            .global(true),
        Arg::new("parity")
            .short('e')
            .long("parity")
            .help("Parity bytes per block; corrects up to half as many byte errors")
            .value_name("BYTES")
            .value_parser(value_parser!(usize))
            .default_value("32")
            .global(true),
        Arg::new("primitive")
            .long("primitive")
            .help("Primitive polynomial of the field as a bitmask")
            .value_name("POLY")
            .value_parser(parse_int)
            .default_value("0x11D")
            .global(true),
        Arg::new("field_size")
            .long("field-size")
            .help("Number of field elements")
            .value_name("SIZE")
            .value_parser(value_parser!(usize))
            .default_value("256")
            .global(true),
        Arg::new("generator_base")
            .long("generator-base")
            .help("First generator root exponent (0 or 1)")
            .value_name("BASE")
            .value_parser(value_parser!(usize))
            .default_value("0")
            .global(true),
    ]
}

/// Command-line interface of the `rscoder` binary
pub fn build_cli() -> Command {
    Command::new("rscoder")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reed-Solomon encoder/decoder over GF(256)")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .args(coder_args())
        .subcommand(
            Command::new("encode")
                .visible_alias("e")
                .about("Encode a file, appending parity to every block")
                .arg(input_arg())
                .arg(output_arg())
                .arg(hex_arg("Write the codeword as hex text")),
        )
        .subcommand(
            Command::new("decode")
                .visible_alias("d")
                .about("Decode a file, correcting errors where possible")
                .arg(input_arg())
                .arg(output_arg())
                .arg(hex_arg("Read the codeword as hex text")),
        )
        .subcommand(
            Command::new("experiment")
                .visible_alias("x")
                .about("Estimate decode success rates under injected bit errors")
                .arg(input_arg())
                .arg(hex_arg("Read the codeword as hex text"))
                .arg(
                    Arg::new("max_errors")
                        .short('m')
                        .long("max-errors")
                        .help("Highest number of bit errors per block")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .default_value("12"),
                )
                .arg(
                    Arg::new("trials")
                        .short('n')
                        .long("trials")
                        .help("Trials per error count")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .help("Seed for reproducible runs")
                        .value_name("SEED")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .help("Number of CPU threads for trials (0 = auto-detect)")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("no-parallel")
                        .long("no-parallel")
                        .help("Run trials sequentially")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Quiet mode - print only the final table")
                        .action(ArgAction::SetTrue),
                ),
        )
}
