mod cli;
mod lib;
mod report;

use std::io;
use std::process;

use cli::{config::Config, menu::Session};
use lib::{catalog::Context, error::Error, metrics::Frame, record::Dataset};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cfg = Config::from_env();
    log::debug!("{:?}", cfg);

    let data = match Dataset::builtin() {
        Ok(data) => data,
        Err(err) => {
            eprintln!("{}", err.diagnose("Invalid dataset"));
            process::exit(1);
        }
    };
    let frame = Frame::derive(&data);
    let catalog = report::catalog();
    let ctx = Context {
        frame: &frame,
        out_dir: &cfg.out_dir,
    };
    let stdin = io::stdin();
    let mut session = Session::new(&catalog, ctx, cfg.policy, cfg.pause, stdin.lock(), io::stdout());

    match &cfg.select {
        Some(line) => match session.run_once(line) {
            Ok(Some(report)) if !report.is_success() => process::exit(1),
            Ok(_) => {}
            Err(err @ Error::Render(_)) => {
                log::error!("terminal i/o failed: {}", err);
                process::exit(1);
            }
            Err(err) => {
                eprintln!("{}", err.diagnose("Invalid selection"));
                process::exit(2);
            }
        },
        None => {
            if let Err(err) = session.run() {
                log::error!("terminal i/o failed: {}", err);
                process::exit(1);
            }
        }
    }
}
