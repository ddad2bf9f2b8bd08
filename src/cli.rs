use clap::{Arg, Command, ArgAction};
use log::debug;
use std::time::Instant;

pub fn build_cli() -> Command {
    debug!("⚙️ Building CLI interface...");
    let start_time = Instant::now();
    let cmd = Command::new("save-image-dir")
        .version("0.1.0")
        .author("OwlV Developers")
        .about("Saves image batches as PNG files with collision-free names, embedded generation metadata and optional custom output directories.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom configuration file")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Default output directory (overrides config)")
                .global(true)
                .action(ArgAction::Set)
        )
        .subcommand(
            Command::new("save")
                .about("Saves the given images as one batch")
                .arg(Arg::new("images").value_name("IMAGE").required_unless_present("tensors").num_args(1..).help("Input image files, in batch order").action(ArgAction::Append))
                .arg(Arg::new("tensors").long("tensors").value_name("JSON_FILE").conflicts_with("images").help("JSON array of {width, height, channels, data} float tensors with values in [0, 1]").action(ArgAction::Set))
                .arg(Arg::new("prefix").short('p').long("prefix").value_name("TEMPLATE").help("Filename prefix; supports %width%, %height%, %date% and %batch_num%").action(ArgAction::Set))
                .arg(Arg::new("custom-path").long("custom-path").value_name("DIR").help("Save originals here instead of the default output directory").action(ArgAction::Set))
                .arg(Arg::new("use-custom-path").long("use-custom-path").help("Enable --custom-path (implied when --custom-path is given)").action(ArgAction::SetTrue))
                .arg(Arg::new("prompt").long("prompt").value_name("JSON_FILE").help("JSON file embedded as the 'prompt' text chunk").action(ArgAction::Set))
                .arg(Arg::new("extra-pnginfo").long("extra-pnginfo").value_name("JSON_FILE").help("JSON object file; each key becomes its own text chunk").action(ArgAction::Set))
                .arg(Arg::new("no-metadata").long("no-metadata").help("Do not embed any metadata").action(ArgAction::SetTrue))
        )
        .subcommand(
            Command::new("inspect")
                .about("Lists the text chunks embedded in PNG files")
                .arg(Arg::new("files").value_name("PNG").required(true).num_args(1..).action(ArgAction::Append))
        )
        .subcommand(
            Command::new("counter")
                .about("Shows or resets the persisted filename counter")
                .arg(Arg::new("reset").long("reset").help("Reset the counter to zero").action(ArgAction::SetTrue))
        )
        .subcommand(
            Command::new("describe")
                .about("Prints the node definition and input schema as JSON")
        );
    debug!("✅ CLI interface built in {:?}", start_time.elapsed());
    cmd
}
