use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::error;

use thorn::{Args, PgmFilePresenter, ThornController};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = match args.to_params() {
        Ok(params) => params,
        Err(err) => Args::command().error(ErrorKind::ValueValidation, err).exit(),
    };

    let mut controller = ThornController::new(PgmFilePresenter::new());
    if let Some(threads) = args.threads {
        controller = controller.with_threads(threads);
    }

    match controller.render(&params, &args.pgmfile) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
