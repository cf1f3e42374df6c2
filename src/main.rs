use config_render::{
    cli::{get_args, get_log_level_from_verbose, print_help_and_exit, run},
    error::{default_error_handler, Error},
};

fn main() {
    let args = get_args();
    env_logger::Builder::new().filter_level(get_log_level_from_verbose(args.verbose)).init();

    match run(args) {
        Ok(_) => {}
        Err(Error::NoTemplates) => {
            eprintln!("{}\n", Error::NoTemplates);
            print_help_and_exit();
        }
        Err(err) => default_error_handler(err),
    }
}
