use DigesterDAE::Examples::digester_examples::digester_examples;
use DigesterDAE::Utils::logger::init_logger;
use log::LevelFilter;

pub fn main() {
    if let Err(e) = init_logger(LevelFilter::Info) {
        eprintln!("logger is not available: {}", e);
    }
    let task: usize = 0;
    digester_examples(task);
}
