use std::io::Write as _;
use std::process;

use clap::Parser;
use color_print::cformat;
use git_pivotal::commands::{
    FinishOptions, handle_config_get, handle_config_set, handle_config_show, handle_finish,
    handle_reminder, handle_start,
};
use git_pivotal::git::{GitError, set_base_path};
use git_pivotal::styling::{eprintln, error_message};
use log::LevelFilter;

mod cli;

use cli::{Cli, Commands, ConfigCommand};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(directory) = cli.directory {
        set_base_path(directory);
    }

    let result = match cli.command {
        Commands::Start { filter } => handle_start(filter.as_deref()),
        Commands::Finish { no_complete } => handle_finish(FinishOptions {
            complete: !no_complete,
        }),
        Commands::Reminder => handle_reminder(),
        Commands::Config(action) => match action {
            ConfigCommand::Show => handle_config_show(),
            ConfigCommand::Get { setting } => handle_config_get(setting),
            ConfigCommand::Set {
                setting,
                value,
                global,
            } => handle_config_set(setting, &value, global),
        },
    };

    if let Err(e) = result {
        // GitError renders its own symbol and hints
        match e.downcast_ref::<GitError>() {
            Some(err) => eprintln!("{err}"),
            None => eprintln!("{}", error_message(format!("{e:#}"))),
        }
        process::exit(1);
    }
}

/// Logs go to stderr: off by default, `-v` for info, `-vv` for debug.
/// `RUST_LOG` overrides either.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                cformat!("<dim>[{}] {}</>", record.level().as_str().to_lowercase(), record.args())
            )
        })
        .init();
}
