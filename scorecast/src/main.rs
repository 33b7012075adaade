use clap::{Parser, ValueEnum};
use crossbeam_channel::bounded;
use log::{LevelFilter, info, warn};
#[cfg(debug_assertions)]
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::{
    append::rolling_file::{
        RollingFileAppender,
        policy::compound::{
            CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
        },
    },
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use scorecast_common::match_state::MatchState;
use std::{
    io::Write,
    path::PathBuf,
    sync::{Arc, Mutex},
};

mod config;
mod network;
mod poller;
mod views;

use config::AppConfig;
use network::AdminAction;
use views::{
    Renderable,
    admin::{AdminView, EditSession, spawn_input_thread},
    penalties::PenaltiesView,
    scoreboard::ScoreboardView,
};

const APP_NAME: &str = "scorecast";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(long, short, value_enum, default_value_t = View::Scoreboard)]
    /// Which page to display
    view: View,

    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,

    #[clap(long)]
    /// Directory within which log files will be placed, default is platform dependent
    log_location: Option<PathBuf>,

    #[clap(long, default_value = "5000000")]
    /// Max size in bytes that a log file is allowed to reach before being rolled over
    log_max_file_size: u64,

    #[clap(long, default_value = "3")]
    /// Number of archived logs to keep
    num_old_logs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Scoreboard,
    Admin,
    Penalties,
}

fn main() {
    let args = Cli::parse();
    init_logging(&args);

    let config: AppConfig = match confy::load(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to read config file, overwriting with default. Error: {e}");
            let config = AppConfig::default();
            confy::store(APP_NAME, None, &config).unwrap();
            config
        }
    };

    let (snapshot_tx, snapshot_rx) = bounded::<MatchState>(3);
    let (action_tx, action_rx) = tokio::sync::mpsc::channel::<AdminAction>(8);

    let net_config = config.clone();
    std::thread::spawn(move || {
        network::networking_thread(snapshot_tx, action_rx, net_config);
    });

    let mut view: Box<dyn Renderable> = match args.view {
        View::Scoreboard => {
            drop(action_tx);
            Box::new(ScoreboardView::new(Default::default()))
        }
        View::Penalties => {
            drop(action_tx);
            Box::new(PenaltiesView::new())
        }
        View::Admin => {
            let session = Arc::new(Mutex::new(EditSession::default()));
            spawn_input_thread(session.clone(), action_tx);
            Box::new(AdminView::new(Default::default(), session))
        }
    };

    info!(
        "Starting the {:?} view against {}",
        args.view, config.backend.url
    );

    for snapshot in snapshot_rx.iter() {
        draw(&view.render(&snapshot));
    }

    info!("Snapshot channel closed, exiting");
}

fn draw(frame: &str) {
    let mut stdout = std::io::stdout().lock();
    // Clear, home, redraw; the whole frame is rewritten every cycle.
    let _ = write!(stdout, "\x1b[2J\x1b[H{frame}");
    let _ = stdout.flush();
}

fn init_logging(args: &Cli) {
    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let log_base_path = args.log_location.clone().unwrap_or_else(|| {
        let mut path = directories::BaseDirs::new()
            .expect("Could not find a directory to store logs")
            .data_local_dir()
            .to_path_buf();
        path.push("scorecast-logs");
        path
    });
    let mut log_path = log_base_path.clone();
    let mut archived_log_path = log_base_path.clone();
    log_path.push(format!("{APP_NAME}-log.txt"));
    archived_log_path.push(format!("{APP_NAME}-log-{{}}.txt.gz"));

    #[cfg(debug_assertions)]
    println!("Log path: {}", log_path.display());

    // Only log to the console in debug mode
    #[cfg(all(debug_assertions, not(target_os = "windows")))]
    let console_target = Target::Stderr;
    #[cfg(all(debug_assertions, target_os = "windows"))]
    let console_target = Target::Stdout; // Windows apps don't get a stderr handle
    #[cfg(debug_assertions)]
    let console = ConsoleAppender::builder()
        .target(console_target)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    // Setup the file log roller
    let roller = FixedWindowRoller::builder()
        .build(
            archived_log_path.as_os_str().to_str().unwrap(),
            args.num_old_logs,
        )
        .unwrap();
    let file_policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(args.log_max_file_size)),
        Box::new(roller),
    );
    let file_appender = RollingFileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new("[{d} {l:5} {M}] {m}{n}")))
        .build(log_path, Box::new(file_policy))
        .unwrap();

    // Setup the logging from all locations to use `LevelFilter::Error`
    let root = Root::builder().appender("file_appender");
    #[cfg(debug_assertions)]
    let root = root.appender("console");
    let root = root.build(LevelFilter::Error);

    // Setup the top level logging config
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("file_appender", Box::new(file_appender)));

    #[cfg(debug_assertions)]
    let log_config = log_config.appender(Appender::builder().build("console", Box::new(console)));

    let log_config = log_config
        .logger(Logger::builder().build(APP_NAME, log_level))
        .logger(Logger::builder().build("scorecast_common", log_level))
        .build(root)
        .unwrap();

    log4rs::init_config(log_config).unwrap();
    log_panics::init();
}
